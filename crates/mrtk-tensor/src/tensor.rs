use crate::{
    element::{CompareOp, Conjugate, ElementCompare},
    error::TensorError,
    range::{parse_range_spec, Range},
    shape::{AcquisitionAxis, Shape},
    storage::TensorStorage,
    view::{TensorView, TensorViewMut},
};

/// A dense, column-major, N-dimensional array with owned data.
///
/// `Tensor` is the core container of the reconstruction toolkit. It combines a
/// flat element buffer with a [`Shape`] holding the extents, strides and
/// per-axis resolution of the data. The rank is dynamic: MR data routinely
/// carries anywhere from 1 to 16 axes.
///
/// # Memory Layout
///
/// Data is stored column-major: axis 0 varies fastest and
/// `strides[i] = strides[i - 1] * dims[i - 1]`. The buffer always holds exactly
/// `dims.iter().product()` elements, except after [`Tensor::clear`].
///
/// # Ownership
///
/// A tensor exclusively owns its buffer. Cloning deep-copies it, moving
/// transfers it. Views borrow the tensor, so it cannot be resized or cleared
/// while a view is alive.
///
/// # Examples
///
/// ```rust
/// use mrtk_tensor::Tensor;
///
/// let t = Tensor::<f32>::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(t.dims(), &[2, 2]);
/// assert_eq!(t.strides(), &[1, 2]);
/// // column-major: (row 1, column 0) is the second element
/// assert_eq!(*t.get(&[1, 0]).unwrap(), 2.0);
/// ```
pub struct Tensor<T> {
    storage: TensorStorage<T>,
    shape: Shape,
    name: Option<String>,
}

impl<T> Tensor<T> {
    pub(crate) fn from_parts(storage: TensorStorage<T>, shape: Shape) -> Self {
        Self {
            storage,
            shape,
            name: None,
        }
    }

    /// Creates a new `Tensor` with the given dimensions and data.
    ///
    /// The data is interpreted in column-major order.
    ///
    /// # Errors
    ///
    /// Fails if the dimensions are invalid or if the number of elements in the
    /// data does not match the product of the dimensions.
    ///
    /// # Example
    ///
    /// ```
    /// use mrtk_tensor::Tensor;
    ///
    /// let t = Tensor::<u8>::from_shape_vec(&[3, 2], vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(t.numel(), 6);
    /// assert_eq!(*t.get(&[0, 1]).unwrap(), 4);
    /// ```
    pub fn from_shape_vec(dims: &[usize], data: Vec<T>) -> Result<Self, TensorError> {
        let shape = Shape::new(dims)?;
        if shape.numel() != data.len() {
            return Err(TensorError::size_mismatch(shape.numel(), data.len()));
        }
        Ok(Self::from_parts(TensorStorage::from_vec(data), shape))
    }

    /// Creates a new `Tensor` with the given dimensions and slice of data.
    pub fn from_shape_slice(dims: &[usize], data: &[T]) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        Self::from_shape_vec(dims, data.to_vec())
    }

    /// Creates a new `Tensor` with every element set to `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use mrtk_tensor::Tensor;
    ///
    /// let t = Tensor::<u8>::from_shape_val(&[2, 1, 3], 2).unwrap();
    /// assert_eq!(t.as_slice(), &[2, 2, 2, 2, 2, 2]);
    /// ```
    pub fn from_shape_val(dims: &[usize], value: T) -> Result<Self, TensorError>
    where
        T: Clone,
    {
        let shape = Shape::new(dims)?;
        let data = vec![value; shape.numel()];
        Ok(Self::from_parts(TensorStorage::from_vec(data), shape))
    }

    /// Creates a new `Tensor` from a function of the multi-index.
    ///
    /// The function is called once per element, in column-major order.
    ///
    /// # Example
    ///
    /// ```
    /// use mrtk_tensor::Tensor;
    ///
    /// let t = Tensor::<usize>::from_shape_fn(&[2, 3], |idx| idx[0] + 10 * idx[1]).unwrap();
    /// assert_eq!(t.as_slice(), &[0, 1, 10, 11, 20, 21]);
    /// ```
    pub fn from_shape_fn<F>(dims: &[usize], mut f: F) -> Result<Self, TensorError>
    where
        F: FnMut(&[usize]) -> T,
    {
        let shape = Shape::new(dims)?;
        let numel = shape.numel();
        let mut data = Vec::with_capacity(numel);
        let mut index = vec![0; dims.len()];
        for _ in 0..numel {
            data.push(f(&index));
            for (idx, &extent) in index.iter_mut().zip(dims) {
                *idx += 1;
                if *idx < extent {
                    break;
                }
                *idx = 0;
            }
        }
        Ok(Self::from_parts(TensorStorage::from_vec(data), shape))
    }

    /// Creates a default-initialized tensor with the given dimensions.
    ///
    /// The dimensions are kept exactly as requested, trailing singleton axes
    /// included.
    pub fn new(dims: &[usize]) -> Result<Self, TensorError>
    where
        T: Clone + Default,
    {
        Self::from_shape_val(dims, T::default())
    }

    /// Creates a default-initialized tensor with explicit per-axis resolution.
    pub fn with_resolution(dims: &[usize], resolution: &[f32]) -> Result<Self, TensorError>
    where
        T: Clone + Default,
    {
        let shape = Shape::with_resolution(dims, resolution)?;
        let data = vec![T::default(); shape.numel()];
        Ok(Self::from_parts(TensorStorage::from_vec(data), shape))
    }

    /// Creates a default-initialized 1-D tensor.
    pub fn new_1d(n: usize) -> Result<Self, TensorError>
    where
        T: Clone + Default,
    {
        Self::new(&[n])
    }

    /// Creates a default-initialized 2-D tensor with `m` rows and `n` columns.
    pub fn new_2d(m: usize, n: usize) -> Result<Self, TensorError>
    where
        T: Clone + Default,
    {
        Self::new(&[m, n])
    }

    /// Creates a default-initialized 3-D volume.
    pub fn new_3d(m: usize, n: usize, k: usize) -> Result<Self, TensorError>
    where
        T: Clone + Default,
    {
        Self::new(&[m, n, k])
    }

    /// Creates a default-initialized tensor laid out along the MR acquisition axes.
    ///
    /// `extents` lists up to 16 extents in [`AcquisitionAxis`] order; missing
    /// axes are 1. The trailing run of singleton axes is trimmed.
    ///
    /// # Example
    ///
    /// ```
    /// use mrtk_tensor::Tensor;
    ///
    /// let t = Tensor::<f32>::acquisition(&[4, 3, 1, 1]).unwrap();
    /// assert_eq!(t.dims(), &[4, 3]);
    /// ```
    pub fn acquisition(extents: &[usize]) -> Result<Self, TensorError>
    where
        T: Clone + Default,
    {
        let shape = Shape::acquisition(extents)?;
        let data = vec![T::default(); shape.numel()];
        Ok(Self::from_parts(TensorStorage::from_vec(data), shape))
    }

    /// Creates a new tensor with all elements set to zero.
    pub fn zeros(dims: &[usize]) -> Result<Self, TensorError>
    where
        T: Clone + num_traits::Zero,
    {
        Self::from_shape_val(dims, T::zero())
    }

    /// Attaches a diagnostic name to the tensor.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The diagnostic name, if any.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the diagnostic name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// The shape model of the tensor.
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// The extents of all axes.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    /// The extent of `axis`, or 1 for any axis past the rank.
    #[inline]
    pub fn dim(&self, axis: usize) -> usize {
        self.shape.dim(axis)
    }

    /// The extent of a named acquisition axis.
    #[inline]
    pub fn extent(&self, axis: AcquisitionAxis) -> usize {
        self.shape.dim(axis.index())
    }

    /// The extent of axis 0.
    #[inline]
    pub fn height(&self) -> usize {
        self.shape.dim(0)
    }

    /// The extent of axis 1.
    #[inline]
    pub fn width(&self) -> usize {
        self.shape.dim(1)
    }

    /// The column-major strides.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.shape.strides()
    }

    /// The per-axis resolution.
    #[inline]
    pub fn resolution(&self) -> &[f32] {
        self.shape.resolution()
    }

    /// Sets the resolution of one axis.
    ///
    /// # Errors
    ///
    /// Fails if `axis` is not a stored axis.
    pub fn set_resolution(&mut self, axis: usize, value: f32) -> Result<(), TensorError> {
        let rank = self.rank();
        let res = self
            .shape
            .resolution_mut()
            .get_mut(axis)
            .ok_or_else(|| TensorError::index_out_of_range(axis, rank))?;
        *res = value;
        Ok(())
    }

    /// Returns the number of elements in the tensor.
    #[inline]
    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    /// True after [`Tensor::clear`], before the tensor is given a new shape.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Get the data of the tensor as a slice, in column-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Get the data of the tensor as a mutable slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Get the data of the tensor as a pointer.
    ///
    /// The pointer is valid for [`Tensor::numel`] elements for as long as the
    /// tensor is borrowed and not resized.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Get the data of the tensor as a mutable pointer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// A pointer to the element at flat `offset`.
    ///
    /// # Errors
    ///
    /// Fails if `offset` is outside the buffer.
    pub fn ptr_at(&self, offset: usize) -> Result<*const T, TensorError> {
        self.storage.get(offset).map(|v| v as *const T)
    }

    /// A mutable pointer to the element at flat `offset`.
    pub fn mut_ptr_at(&mut self, offset: usize) -> Result<*mut T, TensorError> {
        self.storage.get_mut(offset).map(|v| v as *mut T)
    }

    /// Consumes the tensor and returns the underlying vector.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.storage.into_vec()
    }

    /// Returns an iterator over the elements in column-major order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a mutable iterator over the elements in column-major order.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_slice_mut().iter_mut()
    }

    /// The element at flat offset `p`.
    ///
    /// # Errors
    ///
    /// Fails with [`TensorError::IndexOutOfRange`] if `p >= numel()`.
    #[inline]
    pub fn at(&self, p: usize) -> Result<&T, TensorError> {
        self.storage.get(p)
    }

    /// The element at flat offset `p`, mutably.
    #[inline]
    pub fn at_mut(&mut self, p: usize) -> Result<&mut T, TensorError> {
        self.storage.get_mut(p)
    }

    /// The flat offset of a multi-index. See [`Shape::offset`].
    #[inline]
    pub fn offset(&self, index: &[usize]) -> Result<usize, TensorError> {
        self.shape.offset(index)
    }

    /// The multi-index of a flat offset.
    #[inline]
    pub fn index_of(&self, offset: usize) -> Result<Vec<usize>, TensorError> {
        self.shape.index_of(offset)
    }

    /// The element at a multi-index.
    ///
    /// Any number of coordinates is accepted: omitted trailing coordinates are
    /// 0, and coordinates past the rank must be 0. This covers the 1- to 4-axis
    /// forms as well as the full 16-axis acquisition form.
    ///
    /// # Example
    ///
    /// ```
    /// use mrtk_tensor::Tensor;
    ///
    /// let t = Tensor::<u8>::from_shape_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
    /// assert_eq!(t.get(&[1, 1]), Ok(&4));
    /// assert_eq!(t.get(&[1]), Ok(&2));
    /// assert!(t.get(&[2, 0]).is_err());
    /// ```
    pub fn get(&self, index: &[usize]) -> Result<&T, TensorError> {
        let offset = self.shape.offset(index)?;
        self.storage.get(offset)
    }

    /// The element at a multi-index, mutably.
    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut T, TensorError> {
        let offset = self.shape.offset(index)?;
        self.storage.get_mut(offset)
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.storage.as_mut_slice().fill(value);
    }

    /// Replaces the dimension vector.
    ///
    /// Strides are recomputed and the buffer is reallocated only if the element
    /// count changes; new elements are default-initialized. Resolution entries
    /// of surviving axes are kept.
    ///
    /// # Errors
    ///
    /// Fails without touching the tensor if `dims` is invalid.
    pub fn resize(&mut self, dims: &[usize]) -> Result<(), TensorError>
    where
        T: Clone + Default,
    {
        self.shape.set_dims(dims)?;
        let numel = self.shape.numel();
        if self.storage.resize(numel, T::default()) {
            log::debug!("tensor {:?}: reallocated for {:?} ({numel} elements)", self.name, dims);
        } else {
            log::debug!("tensor {:?}: reshaped to {:?} in place", self.name, dims);
        }
        Ok(())
    }

    /// Releases all storage and resets the shape to empty.
    ///
    /// The tensor must be given a shape again with [`Tensor::resize`] before
    /// its elements can be accessed.
    pub fn clear(&mut self) {
        log::debug!("tensor {:?}: cleared {} elements", self.name, self.numel());
        self.storage.clear();
        self.shape = Shape::empty();
    }

    /// A read-only view over one range per axis.
    ///
    /// See [`TensorView`] for the addressing rules.
    pub fn view(&self, ranges: &[Range]) -> Result<TensorView<'_, T>, TensorError> {
        TensorView::new(self, ranges)
    }

    /// A mutable view over one range per axis.
    pub fn view_mut(&mut self, ranges: &[Range]) -> Result<TensorViewMut<'_, T>, TensorError> {
        TensorViewMut::new(self, ranges)
    }

    /// A read-only view from a textual range specification such as `"0:2,:"`.
    pub fn view_str(&self, spec: &str) -> Result<TensorView<'_, T>, TensorError> {
        let ranges = parse_range_spec(spec)?;
        TensorView::new(self, &ranges)
    }

    /// A mutable view from a textual range specification.
    pub fn view_mut_str(&mut self, spec: &str) -> Result<TensorViewMut<'_, T>, TensorError> {
        let ranges = parse_range_spec(spec)?;
        TensorViewMut::new(self, &ranges)
    }

    /// Apply a function to each element of the tensor.
    ///
    /// The result has the same dimensions and resolution.
    ///
    /// # Example
    ///
    /// ```
    /// use mrtk_tensor::Tensor;
    ///
    /// let t = Tensor::<u8>::from_shape_vec(&[4], vec![1, 2, 3, 4]).unwrap();
    /// let t2 = t.map(|x| *x + 1);
    /// assert_eq!(t2.as_slice(), &[2, 3, 4, 5]);
    /// ```
    pub fn map<U, F>(&self, f: F) -> Tensor<U>
    where
        F: FnMut(&T) -> U,
    {
        let data: Vec<U> = self.as_slice().iter().map(f).collect();
        Tensor::from_parts(TensorStorage::from_vec(data), self.shape.clone())
    }

    /// Cast the tensor to a new element type.
    ///
    /// # Example
    ///
    /// ```
    /// use mrtk_tensor::Tensor;
    ///
    /// let t = Tensor::<u8>::from_shape_vec(&[4], vec![1, 2, 3, 4]).unwrap();
    /// let t2 = t.cast::<f32>();
    /// assert_eq!(t2.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    /// ```
    pub fn cast<U>(&self) -> Tensor<U>
    where
        U: From<T>,
        T: Clone,
    {
        self.map(|x| U::from(x.clone()))
    }

    /// Cast the tensor to a numeric type that may not hold every value.
    ///
    /// # Errors
    ///
    /// Fails with [`TensorError::CastError`] at the first value that does not
    /// fit into `U`.
    ///
    /// # Example
    ///
    /// ```
    /// use mrtk_tensor::Tensor;
    ///
    /// let t = Tensor::<f64>::from_shape_vec(&[3], vec![1.0, 2.5, 300.0]).unwrap();
    /// assert!(t.try_cast::<u8>().is_err());
    /// assert_eq!(t.try_cast::<f32>().unwrap().as_slice(), &[1.0, 2.5, 300.0]);
    /// ```
    pub fn try_cast<U>(&self) -> Result<Tensor<U>, TensorError>
    where
        T: num_traits::ToPrimitive + Copy,
        U: num_traits::NumCast,
    {
        let data = self
            .as_slice()
            .iter()
            .enumerate()
            .map(|(offset, &x)| U::from(x).ok_or(TensorError::CastError { offset }))
            .collect::<Result<Vec<U>, _>>()?;
        Ok(Tensor::from_parts(
            TensorStorage::from_vec(data),
            self.shape.clone(),
        ))
    }

    /// Perform an element-wise operation on two tensors of identical shape.
    ///
    /// # Errors
    ///
    /// Fails with [`TensorError::ShapeMismatch`] if the dimensions differ.
    ///
    /// # Example
    ///
    /// ```
    /// use mrtk_tensor::Tensor;
    ///
    /// let t1 = Tensor::<u8>::from_shape_vec(&[4], vec![1, 2, 3, 4]).unwrap();
    /// let t2 = Tensor::<u8>::from_shape_vec(&[4], vec![1, 2, 3, 4]).unwrap();
    ///
    /// let t3 = t1.element_wise_op(&t2, |a, b| *a + *b).unwrap();
    /// assert_eq!(t3.as_slice(), &[2, 4, 6, 8]);
    /// ```
    pub fn element_wise_op<U, F>(&self, other: &Tensor<T>, mut op: F) -> Result<Tensor<U>, TensorError>
    where
        F: FnMut(&T, &T) -> U,
    {
        self.check_same_shape(other)?;
        let data = self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(a, b)| op(a, b))
            .collect();
        Ok(Tensor::from_parts(
            TensorStorage::from_vec(data),
            self.shape.clone(),
        ))
    }

    /// Perform an element-wise operation in place.
    ///
    /// # Errors
    ///
    /// Fails with [`TensorError::ShapeMismatch`] if the dimensions differ; the
    /// tensor is left untouched.
    pub fn element_wise_op_inplace<F>(&mut self, other: &Tensor<T>, mut op: F) -> Result<(), TensorError>
    where
        F: FnMut(&mut T, &T),
    {
        self.check_same_shape(other)?;
        self.as_slice_mut()
            .iter_mut()
            .zip(other.as_slice())
            .for_each(|(a, b)| op(a, b));
        Ok(())
    }

    /// Compare two tensors element by element.
    ///
    /// The result holds `true` wherever the predicate holds. Ordering follows
    /// the [`ElementCompare`] strategy of the element type.
    pub fn compare(&self, other: &Tensor<T>, op: CompareOp) -> Result<Tensor<bool>, TensorError>
    where
        T: ElementCompare,
    {
        self.element_wise_op(other, |a, b| op.apply(a, b))
    }

    /// Compare every element against a scalar.
    ///
    /// # Example
    ///
    /// ```
    /// use mrtk_tensor::{CompareOp, Tensor};
    ///
    /// let a = Tensor::<f32>::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let mask = a.compare_scalar(&2.0, CompareOp::Eq);
    /// assert_eq!(mask.as_slice(), &[false, true, false, false]);
    /// ```
    pub fn compare_scalar(&self, scalar: &T, op: CompareOp) -> Tensor<bool>
    where
        T: ElementCompare,
    {
        self.map(|a| op.apply(a, scalar))
    }

    /// Swap axes 0 and 1 of a 2-D tensor.
    ///
    /// # Errors
    ///
    /// Fails with [`TensorError::UnsupportedOperation`] unless the tensor has
    /// exactly two axes.
    pub fn transpose(&self) -> Result<Tensor<T>, TensorError>
    where
        T: Clone,
    {
        self.transpose_with(|x| x.clone())
    }

    /// Conjugate transpose of a 2-D tensor; a plain transpose for real types.
    ///
    /// # Example
    ///
    /// ```
    /// use mrtk_tensor::Tensor;
    /// use num_complex::Complex;
    ///
    /// let a = Tensor::from_shape_vec(
    ///     &[1, 2],
    ///     vec![Complex::new(1.0_f32, 1.0), Complex::new(2.0, -3.0)],
    /// ).unwrap();
    /// let h = a.adjoint().unwrap();
    /// assert_eq!(h.dims(), &[2, 1]);
    /// assert_eq!(h.as_slice(), &[Complex::new(1.0, -1.0), Complex::new(2.0, 3.0)]);
    /// ```
    pub fn adjoint(&self) -> Result<Tensor<T>, TensorError>
    where
        T: Conjugate,
    {
        self.transpose_with(|x| x.conjugate())
    }

    fn transpose_with<F>(&self, mut f: F) -> Result<Tensor<T>, TensorError>
    where
        F: FnMut(&T) -> T,
    {
        if self.rank() != 2 {
            return Err(TensorError::unsupported_operation(
                "transpose",
                format!("requires exactly 2 axes, got {:?}", self.dims()),
            ));
        }
        let (rows, cols) = (self.dims()[0], self.dims()[1]);
        let src = self.as_slice();
        let mut data = Vec::with_capacity(src.len());
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(&src[i + j * rows]));
            }
        }
        let res = self.resolution();
        let shape = Shape::with_resolution(&[cols, rows], &[res[1], res[0]])?;
        Ok(Tensor::from_parts(TensorStorage::from_vec(data), shape))
    }

    pub(crate) fn check_same_shape<U>(&self, other: &Tensor<U>) -> Result<(), TensorError> {
        if self.dims() != other.dims() {
            return Err(TensorError::shape_mismatch(self.dims(), other.dims()));
        }
        Ok(())
    }
}

macro_rules! scalar_comparisons {
    ($($name:ident => $op:ident, $doc:literal;)*) => {
        impl<T: ElementCompare> Tensor<T> {
            $(
                #[doc = concat!("Elementwise `", $doc, "` against a scalar.")]
                #[inline]
                pub fn $name(&self, scalar: &T) -> Tensor<bool> {
                    self.compare_scalar(scalar, CompareOp::$op)
                }
            )*
        }
    };
}

scalar_comparisons! {
    eq_scalar => Eq, "==";
    ne_scalar => Ne, "!=";
    lt_scalar => Lt, "<";
    le_scalar => Le, "<=";
    gt_scalar => Gt, ">";
    ge_scalar => Ge, ">=";
}

macro_rules! tensor_comparisons {
    ($($name:ident => $op:ident, $doc:literal;)*) => {
        impl<T: ElementCompare> Tensor<T> {
            $(
                #[doc = concat!("Elementwise `", $doc, "` against a tensor of identical shape.")]
                #[inline]
                pub fn $name(&self, other: &Tensor<T>) -> Result<Tensor<bool>, TensorError> {
                    self.compare(other, CompareOp::$op)
                }
            )*
        }
    };
}

tensor_comparisons! {
    eq_elementwise => Eq, "==";
    ne_elementwise => Ne, "!=";
    lt_elementwise => Lt, "<";
    le_elementwise => Le, "<=";
    gt_elementwise => Gt, ">";
    ge_elementwise => Ge, ">=";
}

impl<T: Clone> Clone for Tensor<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            shape: self.shape.clone(),
            name: self.name.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Tensor<T> {
    /// Tensors are equal when their dimensions and elements are; names and
    /// resolution are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.dims() == other.dims() && self.as_slice() == other.as_slice()
    }
}

impl<T> std::ops::Index<usize> for Tensor<T> {
    type Output = T;

    /// Flat, bounds-checked access.
    ///
    /// # Panics
    ///
    /// Panics if `p` is out of range; use [`Tensor::at`] for a checked error.
    fn index(&self, p: usize) -> &T {
        &self.as_slice()[p]
    }
}

impl<T> std::ops::IndexMut<usize> for Tensor<T> {
    fn index_mut(&mut self, p: usize) -> &mut T {
        &mut self.as_slice_mut()[p]
    }
}

impl<T, const N: usize> std::ops::Index<[usize; N]> for Tensor<T> {
    type Output = T;

    /// Multi-index access.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of range; use [`Tensor::get`] for a
    /// checked error.
    fn index(&self, index: [usize; N]) -> &T {
        match self.get(&index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, const N: usize> std::ops::IndexMut<[usize; N]> for Tensor<T> {
    fn index_mut(&mut self, index: [usize; N]) -> &mut T {
        match self.get_mut(&index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> std::fmt::Debug for Tensor<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor")
            .field("name", &self.name)
            .field("dims", &self.dims())
            .field("resolution", &self.resolution())
            .field("data", &self.as_slice())
            .finish()
    }
}

impl<T> std::fmt::Display for Tensor<T>
where
    T: std::fmt::Display,
{
    /// Prints the data as a sequence of 2-D slices, rows along axis 0.
    ///
    /// A precision given to the formatter, as in `{:.4}`, is applied to every element.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        let precision = f.precision();
        let cell = |v: &T| match precision {
            Some(p) => format!("{v:.p$}"),
            None => format!("{v}"),
        };
        let rows = self.dim(0);
        let cols = self.dim(1);
        let plane = rows * cols;
        let width = self.iter().map(|v| cell(v).len()).max().unwrap_or(0);
        let slices = self.numel() / plane;
        for s in 0..slices {
            if slices > 1 {
                let idx = self.index_of(s * plane).unwrap_or_default();
                let tail: Vec<String> = idx.iter().skip(2).map(|i| i.to_string()).collect();
                writeln!(f, "(:,:,{})", tail.join(","))?;
            }
            for i in 0..rows {
                write!(f, "[")?;
                for j in 0..cols {
                    if j > 0 {
                        write!(f, ", ")?;
                    }
                    let v = &self.as_slice()[s * plane + i + j * rows];
                    write!(f, "{:>width$}", cell(v))?;
                }
                writeln!(f, "]")?;
            }
        }
        Ok(())
    }
}
