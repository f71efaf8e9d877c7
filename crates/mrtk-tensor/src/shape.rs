use crate::error::{DimensionError, TensorError};

/// Number of named axes of an MR acquisition.
pub const ACQUISITION_AXES: usize = 16;

/// The named axes of an MR acquisition, in storage order.
///
/// Axis 0 (the readout column) varies fastest in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum AcquisitionAxis {
    /// Readout samples.
    Column = 0,
    /// Phase encoding lines.
    Line,
    /// Receive channels.
    Channel,
    /// Sets.
    Set,
    /// Echoes.
    Echo,
    /// Cardiac or respiratory phases.
    Phase,
    /// Repetitions.
    Repetition,
    /// Segments.
    Segment,
    /// Partitions (second phase encoding direction).
    Partition,
    /// Slices.
    Slice,
    /// Free index A.
    IdA,
    /// Free index B.
    IdB,
    /// Free index C.
    IdC,
    /// Free index D.
    IdD,
    /// Free index E.
    IdE,
    /// Averages.
    Average,
}

impl AcquisitionAxis {
    /// All axes in storage order.
    pub const ALL: [AcquisitionAxis; ACQUISITION_AXES] = [
        Self::Column,
        Self::Line,
        Self::Channel,
        Self::Set,
        Self::Echo,
        Self::Phase,
        Self::Repetition,
        Self::Segment,
        Self::Partition,
        Self::Slice,
        Self::IdA,
        Self::IdB,
        Self::IdC,
        Self::IdD,
        Self::IdE,
        Self::Average,
    ];

    /// The storage position of the axis.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Computes the strides for a column-major (Fortran-contiguous) layout.
///
/// The first axis has stride 1 and each following stride is the previous one
/// multiplied by the previous extent.
///
/// # Examples
///
/// ```rust
/// use mrtk_tensor::shape::get_strides_from_shape;
///
/// assert_eq!(get_strides_from_shape(&[3, 4]), vec![1, 3]);
/// assert_eq!(get_strides_from_shape(&[2, 3, 4]), vec![1, 2, 6]);
/// ```
pub fn get_strides_from_shape(dims: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(dims.len());
    let mut stride = 1;
    for &d in dims {
        strides.push(stride);
        stride *= d;
    }
    strides
}

/// Checks that a dimension vector is non-empty and free of zero extents.
pub fn validate_dims(dims: &[usize]) -> Result<(), DimensionError> {
    if dims.is_empty() {
        return Err(DimensionError::EmptyDimensions);
    }
    if let Some(axis) = dims.iter().position(|&d| d == 0) {
        return Err(DimensionError::ZeroExtent { axis });
    }
    Ok(())
}

/// Drops the trailing run of extent-1 axes, always keeping at least one axis.
pub fn trim_trailing_singletons(dims: &mut Vec<usize>) {
    while dims.len() > 1 && dims.last() == Some(&1) {
        dims.pop();
    }
}

/// The dimension, stride and resolution model of a tensor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    dims: Vec<usize>,
    strides: Vec<usize>,
    resolution: Vec<f32>,
}

impl Shape {
    /// Creates a shape with unit resolution along every axis.
    ///
    /// # Errors
    ///
    /// Fails if `dims` is empty or contains a zero extent.
    pub fn new(dims: &[usize]) -> Result<Self, DimensionError> {
        Self::with_resolution(dims, &vec![1.0; dims.len()])
    }

    /// Creates a shape with explicit per-axis resolution.
    ///
    /// A resolution vector shorter than `dims` is padded with 1.0, a longer one
    /// is truncated.
    pub fn with_resolution(dims: &[usize], resolution: &[f32]) -> Result<Self, DimensionError> {
        validate_dims(dims)?;
        let mut resolution = resolution.to_vec();
        resolution.resize(dims.len(), 1.0);
        Ok(Self {
            strides: get_strides_from_shape(dims),
            dims: dims.to_vec(),
            resolution,
        })
    }

    /// Creates the shape of an MR acquisition from up to 16 named extents.
    ///
    /// Missing trailing axes default to 1 and the trailing run of singleton
    /// axes is trimmed.
    pub fn acquisition(extents: &[usize]) -> Result<Self, TensorError> {
        if extents.len() > ACQUISITION_AXES {
            return Err(TensorError::RankUnsupported {
                rank: extents.len(),
                max: ACQUISITION_AXES,
            });
        }
        let mut dims = extents.to_vec();
        validate_dims(&dims)?;
        trim_trailing_singletons(&mut dims);
        Ok(Self::new(&dims)?)
    }

    /// An empty shape, used by cleared tensors.
    pub(crate) fn empty() -> Self {
        Self {
            dims: Vec::new(),
            strides: Vec::new(),
            resolution: Vec::new(),
        }
    }

    /// The number of stored axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// The stored extents.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// The column-major strides.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// The per-axis resolution.
    #[inline]
    pub fn resolution(&self) -> &[f32] {
        &self.resolution
    }

    /// Mutable access to the per-axis resolution.
    #[inline]
    pub fn resolution_mut(&mut self) -> &mut [f32] {
        &mut self.resolution
    }

    /// The extent of `axis`, or 1 past the stored rank.
    #[inline]
    pub fn dim(&self, axis: usize) -> usize {
        self.dims.get(axis).copied().unwrap_or(1)
    }

    /// The number of elements described by the shape.
    #[inline]
    pub fn numel(&self) -> usize {
        if self.dims.is_empty() {
            0
        } else {
            self.dims.iter().product()
        }
    }

    /// Whether this is the empty shape of a cleared tensor.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Replaces the extents and recomputes the strides.
    ///
    /// Resolution entries of surviving axes are kept; new axes get 1.0.
    pub fn set_dims(&mut self, dims: &[usize]) -> Result<(), DimensionError> {
        validate_dims(dims)?;
        self.dims = dims.to_vec();
        self.strides = get_strides_from_shape(dims);
        self.resolution.resize(dims.len(), 1.0);
        Ok(())
    }

    /// Maps a multi-index to a flat offset.
    ///
    /// Fewer coordinates than the rank leave the remaining axes at 0. Extra
    /// coordinates past the rank address implicit singleton axes and only 0 is
    /// accepted there.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::IndexOutOfRange`] if any coordinate exceeds its axis.
    pub fn offset(&self, index: &[usize]) -> Result<usize, TensorError> {
        let mut offset = 0;
        for (axis, &idx) in index.iter().enumerate() {
            if idx == 0 {
                continue;
            }
            let extent = self.dim(axis);
            if idx >= extent {
                return Err(TensorError::index_out_of_range(idx, extent));
            }
            offset += idx * self.strides[axis];
        }
        Ok(offset)
    }

    /// Maps a flat offset back to its multi-index. The reverse of [`Shape::offset`].
    pub fn index_of(&self, offset: usize) -> Result<Vec<usize>, TensorError> {
        let numel = self.numel();
        if offset >= numel {
            return Err(TensorError::index_out_of_range(offset, numel));
        }
        let mut rem = offset;
        Ok(self
            .dims
            .iter()
            .map(|&d| {
                let idx = rem % d;
                rem /= d;
                idx
            })
            .collect())
    }
}
