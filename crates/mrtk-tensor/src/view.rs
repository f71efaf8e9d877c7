use crate::{
    error::{RangeError, TensorError},
    range::Range,
    shape::Shape,
    storage::TensorStorage,
    Tensor, MAX_VIEW_RANK,
};

/// The read surface shared by owning tensors and views.
///
/// Algorithms that only need to read elements and query extents can be
/// written once against this trait and accept either a [`Tensor`] or one of
/// its views.
///
/// # Example
///
/// ```rust
/// use mrtk_tensor::{Range, Tensor, TensorLike, TensorError};
///
/// fn total<V: TensorLike<f32>>(v: &V) -> Result<f32, TensorError> {
///     let mut sum = 0.0;
///     for i in 0..v.numel() {
///         sum += *v.element(i)?;
///     }
///     Ok(sum)
/// }
///
/// let t = Tensor::<f32>::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0])?;
/// assert_eq!(total(&t)?, 10.0);
/// assert_eq!(total(&t.view(&[Range::single(1)?, Range::all()])?)?, 6.0);
/// # Ok::<(), TensorError>(())
/// ```
pub trait TensorLike<T> {
    /// The number of addressable elements.
    fn numel(&self) -> usize;

    /// The extents of all axes.
    fn dims(&self) -> &[usize];

    /// The extent of `axis`, or 1 past the last axis.
    fn dim(&self, axis: usize) -> usize {
        self.dims().get(axis).copied().unwrap_or(1)
    }

    /// The element at linear position `i`.
    ///
    /// # Errors
    ///
    /// Fails with [`TensorError::IndexOutOfRange`] if `i >= numel()`.
    fn element(&self, i: usize) -> Result<&T, TensorError>;
}

impl<T> TensorLike<T> for Tensor<T> {
    fn numel(&self) -> usize {
        Tensor::numel(self)
    }

    fn dims(&self) -> &[usize] {
        Tensor::dims(self)
    }

    fn dim(&self, axis: usize) -> usize {
        Tensor::dim(self, axis)
    }

    fn element(&self, i: usize) -> Result<&T, TensorError> {
        self.at(i)
    }
}

/// The resolved addressing of a view: ranges, projected shape and offsets.
#[derive(Debug, Clone, PartialEq)]
struct Projection {
    ranges: Vec<Range>,
    free_axes: Vec<usize>,
    dims: Vec<usize>,
    addresses: Vec<usize>,
}

impl Projection {
    /// Resolves `ranges` against `shape`.
    ///
    /// A single range addresses the flattened tensor. Otherwise range `i`
    /// addresses axis `i`; axes past the last range are pinned at coordinate 0.
    fn resolve(shape: &Shape, ranges: &[Range]) -> Result<Self, TensorError> {
        if ranges.is_empty() {
            return Err(RangeError::EmptyRangeSpecification.into());
        }
        if ranges.len() > MAX_VIEW_RANK {
            return Err(TensorError::RankUnsupported {
                rank: ranges.len(),
                max: MAX_VIEW_RANK,
            });
        }
        if shape.is_empty() {
            return Err(TensorError::index_out_of_range(0, 0));
        }

        let flat = ranges.len() == 1;
        let mut ranges = ranges.to_vec();
        for (axis, range) in ranges.iter_mut().enumerate() {
            // an empty flat range covers axis 0, explicit flat coordinates reach numel
            range.resolve_full(shape.dim(axis));
            let extent = if flat { shape.numel() } else { shape.dim(axis) };
            if let Some(bad) = range.iter().find(|&idx| idx >= extent) {
                return Err(TensorError::index_out_of_range(bad, extent));
            }
        }

        let free_axes: Vec<usize> = ranges
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.is_singleton())
            .map(|(axis, _)| axis)
            .collect();
        let mut dims: Vec<usize> = free_axes.iter().map(|&a| ranges[a].len()).collect();
        if dims.is_empty() {
            dims.push(1);
        }

        let count: usize = ranges.iter().map(Range::len).product();
        let mut addresses = Vec::with_capacity(count);
        if flat {
            addresses.extend(ranges[0].iter());
        } else {
            let mut pos = vec![0; ranges.len()];
            let mut coords: Vec<usize> = ranges.iter().map(|r| r[0]).collect();
            for _ in 0..count {
                addresses.push(shape.offset(&coords)?);
                for (axis, p) in pos.iter_mut().enumerate() {
                    *p += 1;
                    if *p < ranges[axis].len() {
                        coords[axis] = ranges[axis][*p];
                        break;
                    }
                    *p = 0;
                    coords[axis] = ranges[axis][0];
                }
            }
        }

        log::trace!(
            "view over {:?}: ranges {}, free axes {:?}, {} addresses",
            shape.dims(),
            DisplayRanges(&ranges),
            free_axes,
            addresses.len()
        );

        Ok(Self {
            ranges,
            free_axes,
            dims,
            addresses,
        })
    }

    fn check(&self, i: usize) -> Result<usize, TensorError> {
        self.addresses
            .get(i)
            .copied()
            .ok_or_else(|| TensorError::index_out_of_range(i, self.addresses.len()))
    }

    /// Resolution of the materialized tensor: the source resolution of each free axis.
    fn resolution(&self, shape: &Shape) -> Vec<f32> {
        if self.ranges.len() == 1 {
            return vec![1.0];
        }
        self.free_axes
            .iter()
            .map(|&a| shape.resolution().get(a).copied().unwrap_or(1.0))
            .collect()
    }
}

struct DisplayRanges<'a>(&'a [Range]);

impl std::fmt::Display for DisplayRanges<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, r) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{r}")?;
        }
        write!(f, ")")
    }
}

fn materialize<T: Clone>(
    tensor: &Tensor<T>,
    projection: &Projection,
) -> Result<Tensor<T>, TensorError> {
    let src = tensor.as_slice();
    let data: Vec<T> = projection.addresses.iter().map(|&a| src[a].clone()).collect();
    let shape = Shape::with_resolution(&projection.dims, &projection.resolution(tensor.shape()))?;
    Ok(Tensor::from_parts(TensorStorage::from_vec(data), shape))
}

/// A read-only projection of a tensor through one [`Range`] per axis.
///
/// The view resolves its ranges once, at construction, into the list of flat
/// offsets it addresses. Element `i` of the view is the tensor element at the
/// `i`-th offset, in column-major order over the selected coordinates.
///
/// # Addressing
///
/// - An empty range selects the full extent of its axis.
/// - Axes selected by a single coordinate are collapsed: the view's shape lists
///   only the sizes of the remaining, free axes, or `[1]` if none remain.
/// - A single range on a multi-axis tensor addresses the flattened tensor.
/// - With fewer ranges than axes, the trailing axes are pinned at coordinate 0.
///
/// The view borrows the tensor, so the tensor cannot be resized, cleared or
/// dropped while the view is alive.
///
/// # Example
///
/// ```rust
/// use mrtk_tensor::{Range, Tensor};
///
/// let t = Tensor::<u8>::from_shape_fn(&[3, 4], |idx| (idx[0] + 3 * idx[1]) as u8).unwrap();
/// let row = t.view(&[Range::single(1).unwrap(), Range::all()]).unwrap();
/// assert_eq!(row.dims(), &[4]);
/// assert_eq!(row.to_tensor().unwrap().as_slice(), &[1, 4, 7, 10]);
/// ```
pub struct TensorView<'a, T> {
    tensor: &'a Tensor<T>,
    projection: Projection,
}

impl<'a, T> TensorView<'a, T> {
    /// Resolves `ranges` against `tensor`.
    ///
    /// # Errors
    ///
    /// - [`TensorError::RankUnsupported`] for more than [`MAX_VIEW_RANK`] ranges
    /// - [`TensorError::IndexOutOfRange`] if a coordinate exceeds its axis
    /// - [`RangeError::EmptyRangeSpecification`] if no range is given
    pub fn new(tensor: &'a Tensor<T>, ranges: &[Range]) -> Result<Self, TensorError> {
        let projection = Projection::resolve(tensor.shape(), ranges)?;
        Ok(Self { tensor, projection })
    }

    /// The number of elements addressed by the view.
    #[inline]
    pub fn numel(&self) -> usize {
        self.projection.addresses.len()
    }

    /// The projected shape: the sizes of the free axes.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.projection.dims
    }

    /// The resolved range of every addressed axis.
    #[inline]
    pub fn ranges(&self) -> &[Range] {
        &self.projection.ranges
    }

    /// The source axes that were not collapsed.
    #[inline]
    pub fn free_axes(&self) -> &[usize] {
        &self.projection.free_axes
    }

    /// The flat offsets into the source tensor, in view order.
    #[inline]
    pub fn addresses(&self) -> &[usize] {
        &self.projection.addresses
    }

    /// The element at view position `i`.
    pub fn get(&self, i: usize) -> Result<&'a T, TensorError> {
        let offset = self.projection.check(i)?;
        self.tensor.at(offset)
    }

    /// Iterates over the addressed elements in view order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        let src: &'a [T] = self.tensor.as_slice();
        self.projection.addresses.iter().map(move |&a| &src[a])
    }

    /// Copies the addressed elements into a new tensor of the projected shape.
    pub fn to_tensor(&self) -> Result<Tensor<T>, TensorError>
    where
        T: Clone,
    {
        materialize(self.tensor, &self.projection)
    }
}

impl<T> TensorLike<T> for TensorView<'_, T> {
    fn numel(&self) -> usize {
        TensorView::numel(self)
    }

    fn dims(&self) -> &[usize] {
        TensorView::dims(self)
    }

    fn element(&self, i: usize) -> Result<&T, TensorError> {
        self.get(i)
    }
}

impl<T> std::ops::Index<usize> for TensorView<'_, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        match self.get(i) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> std::fmt::Display for TensorView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        DisplayRanges(self.ranges()).fmt(f)
    }
}

impl<T> std::fmt::Debug for TensorView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorView")
            .field("ranges", &self.projection.ranges)
            .field("dims", &self.projection.dims)
            .finish()
    }
}

impl<T: Clone> TryFrom<&TensorView<'_, T>> for Tensor<T> {
    type Error = TensorError;

    fn try_from(view: &TensorView<'_, T>) -> Result<Self, Self::Error> {
        view.to_tensor()
    }
}

/// A mutable projection of a tensor through one [`Range`] per axis.
///
/// Addressing follows [`TensorView`]. Writes go straight to the tensor's
/// storage. The view holds the tensor's exclusive borrow for its lifetime.
///
/// # Example
///
/// ```rust
/// use mrtk_tensor::{Range, Tensor};
///
/// let mut t = Tensor::<f32>::zeros(&[2, 3]).unwrap();
/// t.view_mut(&[Range::all(), Range::single(1).unwrap()]).unwrap().fill(7.0);
/// assert_eq!(t.as_slice(), &[0.0, 0.0, 7.0, 7.0, 0.0, 0.0]);
/// ```
pub struct TensorViewMut<'a, T> {
    tensor: &'a mut Tensor<T>,
    projection: Projection,
}

impl<'a, T> TensorViewMut<'a, T> {
    /// Resolves `ranges` against `tensor`. See [`TensorView::new`].
    pub fn new(tensor: &'a mut Tensor<T>, ranges: &[Range]) -> Result<Self, TensorError> {
        let projection = Projection::resolve(tensor.shape(), ranges)?;
        Ok(Self { tensor, projection })
    }

    /// A read-only view with the same addressing.
    pub fn as_view(&self) -> TensorView<'_, T> {
        TensorView {
            tensor: &*self.tensor,
            projection: self.projection.clone(),
        }
    }

    /// The number of elements addressed by the view.
    #[inline]
    pub fn numel(&self) -> usize {
        self.projection.addresses.len()
    }

    /// The projected shape: the sizes of the free axes.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.projection.dims
    }

    /// The resolved range of every addressed axis.
    #[inline]
    pub fn ranges(&self) -> &[Range] {
        &self.projection.ranges
    }

    /// The source axes that were not collapsed.
    #[inline]
    pub fn free_axes(&self) -> &[usize] {
        &self.projection.free_axes
    }

    /// The flat offsets into the source tensor, in view order.
    #[inline]
    pub fn addresses(&self) -> &[usize] {
        &self.projection.addresses
    }

    /// The element at view position `i`.
    pub fn get(&self, i: usize) -> Result<&T, TensorError> {
        let offset = self.projection.check(i)?;
        self.tensor.at(offset)
    }

    /// The element at view position `i`, mutably.
    pub fn get_mut(&mut self, i: usize) -> Result<&mut T, TensorError> {
        let offset = self.projection.check(i)?;
        self.tensor.at_mut(offset)
    }

    /// Sets every addressed element to `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.for_each_mut(|v| *v = value.clone());
    }

    /// Copies a tensor into the addressed elements, in column-major order.
    ///
    /// # Errors
    ///
    /// Fails with [`TensorError::SizeMismatch`] unless `src` holds exactly as
    /// many elements as the view addresses.
    pub fn assign(&mut self, src: &Tensor<T>) -> Result<(), TensorError>
    where
        T: Clone,
    {
        if src.numel() != self.numel() {
            return Err(TensorError::size_mismatch(self.numel(), src.numel()));
        }
        let dst = self.tensor.as_slice_mut();
        for (&a, v) in self.projection.addresses.iter().zip(src.iter()) {
            dst[a] = v.clone();
        }
        Ok(())
    }

    /// Copies the elements addressed by another view into this one.
    ///
    /// # Errors
    ///
    /// Fails with [`TensorError::ShapeMismatch`] unless the free-axis sizes of
    /// both views agree pairwise.
    pub fn assign_view(&mut self, src: &TensorView<'_, T>) -> Result<(), TensorError>
    where
        T: Clone,
    {
        if self.dims() != src.dims() {
            return Err(TensorError::shape_mismatch(self.dims(), src.dims()));
        }
        let dst = self.tensor.as_slice_mut();
        for (&a, v) in self.projection.addresses.iter().zip(src.iter()) {
            dst[a] = v.clone();
        }
        Ok(())
    }

    /// Adds `value` to every addressed element.
    pub fn add_assign_scalar(&mut self, value: T)
    where
        T: std::ops::AddAssign + Clone,
    {
        self.for_each_mut(|v| *v += value.clone());
    }

    /// Multiplies every addressed element by `value`.
    pub fn mul_assign_scalar(&mut self, value: T)
    where
        T: std::ops::MulAssign + Clone,
    {
        self.for_each_mut(|v| *v *= value.clone());
    }

    /// Copies the addressed elements into a new tensor of the projected shape.
    pub fn to_tensor(&self) -> Result<Tensor<T>, TensorError>
    where
        T: Clone,
    {
        materialize(&*self.tensor, &self.projection)
    }

    fn for_each_mut<F: FnMut(&mut T)>(&mut self, mut f: F) {
        let dst = self.tensor.as_slice_mut();
        for &a in &self.projection.addresses {
            f(&mut dst[a]);
        }
    }
}

impl<T> TensorLike<T> for TensorViewMut<'_, T> {
    fn numel(&self) -> usize {
        TensorViewMut::numel(self)
    }

    fn dims(&self) -> &[usize] {
        TensorViewMut::dims(self)
    }

    fn element(&self, i: usize) -> Result<&T, TensorError> {
        self.get(i)
    }
}

impl<T> std::ops::Index<usize> for TensorViewMut<'_, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        match self.get(i) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> std::ops::IndexMut<usize> for TensorViewMut<'_, T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        match self.get_mut(i) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> std::fmt::Display for TensorViewMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        DisplayRanges(self.ranges()).fmt(f)
    }
}

impl<T> std::fmt::Debug for TensorViewMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorViewMut")
            .field("ranges", &self.projection.ranges)
            .field("dims", &self.projection.dims)
            .finish()
    }
}
