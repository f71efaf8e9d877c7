use std::ops::{Add, Mul};

use mrtk_tensor::{Conjugate, ElementCompare, Tensor};
use num_traits::Zero;

use crate::error::TensorOpsError;

pub use mrtk_tensor::ops::{logical_and, logical_or, powf};

/// How an operand enters a matrix product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transpose {
    /// The operand as stored.
    #[default]
    None,
    /// The transposed operand.
    Transpose,
    /// The conjugate transpose of the operand.
    Adjoint,
}

/// Compute the sum of the elements in the tensor along axis `dim`.
///
/// The result keeps the rank of the input with an extent of 1 along `dim`.
///
/// # Arguments
///
/// * `tensor` - The tensor to sum the elements of.
/// * `dim` - The index of the axis to perform the sum over.
///
/// # Errors
///
/// If the requested axis is not an axis of the tensor, an error is returned.
///
/// # Example
///
/// ```
/// use mrtk_tensor::Tensor;
/// use mrtk_tensor_ops::ops::sum_elements;
///
/// let t = Tensor::<u8>::from_shape_slice(&[2, 3], &[1, 1, 1, 1, 1, 1]).unwrap();
/// let agg = sum_elements(&t, 1).unwrap();
/// assert_eq!(agg.dims(), &[2, 1]);
/// assert_eq!(agg.as_slice(), &[3, 3]);
/// ```
pub fn sum_elements<T>(tensor: &Tensor<T>, dim: usize) -> Result<Tensor<T>, TensorOpsError>
where
    T: Zero + Clone + Add<Output = T>,
{
    let rank = tensor.rank();
    if dim >= rank {
        return Err(TensorOpsError::DimOutOfBounds(dim, rank.saturating_sub(1)));
    }

    let dims = tensor.dims();
    let inner: usize = dims[..dim].iter().product();
    let extent = dims[dim];
    let outer: usize = dims[dim + 1..].iter().product();

    let src = tensor.as_slice();
    let mut data = vec![T::zero(); inner * outer];
    for o in 0..outer {
        for d in 0..extent {
            let base = (o * extent + d) * inner;
            for (i, agg) in data[o * inner..(o + 1) * inner].iter_mut().enumerate() {
                *agg = agg.clone() + src[base + i].clone();
            }
        }
    }

    let mut out_dims = dims.to_vec();
    out_dims[dim] = 1;
    let mut out = Tensor::from_shape_vec(&out_dims, data)?;
    for (axis, &res) in tensor.resolution().iter().enumerate() {
        out.set_resolution(axis, res)?;
    }
    Ok(out)
}

/// Compute the dot product `Σ a·b` of two tensors of identical dimensions.
///
/// # Errors
///
/// If the dimensions of the tensors don't match, an error is returned.
///
/// # Example
///
/// ```
/// use mrtk_tensor::Tensor;
/// use mrtk_tensor_ops::ops::dot;
///
/// let a = Tensor::<i32>::from_shape_slice(&[3], &[1, 2, 3]).unwrap();
/// let b = Tensor::<i32>::from_shape_slice(&[3], &[4, 5, 6]).unwrap();
/// assert_eq!(dot(&a, &b).unwrap(), 32);
/// ```
pub fn dot<T>(a: &Tensor<T>, b: &Tensor<T>) -> Result<T, TensorOpsError>
where
    T: Zero + Clone + Add<Output = T> + Mul<Output = T>,
{
    check_same_dims(a, b)?;
    Ok(a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (x, y)| acc + x.clone() * y.clone()))
}

/// Compute the conjugated dot product `Σ conj(a)·b`.
///
/// For real element types this equals [`dot`].
///
/// # Example
///
/// ```
/// use mrtk_tensor::Tensor;
/// use mrtk_tensor_ops::ops::dotc;
/// use num_complex::Complex;
///
/// let a = Tensor::from_shape_vec(&[1], vec![Complex::new(0.0_f32, 1.0)]).unwrap();
/// // |i|^2 = 1
/// assert_eq!(dotc(&a, &a).unwrap(), Complex::new(1.0, 0.0));
/// ```
pub fn dotc<T>(a: &Tensor<T>, b: &Tensor<T>) -> Result<T, TensorOpsError>
where
    T: Zero + Clone + Conjugate + Add<Output = T> + Mul<Output = T>,
{
    check_same_dims(a, b)?;
    Ok(a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (x, y)| acc + x.conjugate() * y.clone()))
}

/// Matrix product `op(a) · op(b)` of two matrices.
///
/// A 1-D tensor is taken as a column vector. Each operand can be used as
/// stored, transposed or conjugate-transposed.
///
/// # Errors
///
/// - [`TensorOpsError::NotAMatrix`] if an operand has more than two axes
/// - [`TensorOpsError::ShapeMismatch`] if the inner extents of `op(a)` and `op(b)` differ
///
/// # Example
///
/// ```
/// use mrtk_tensor::Tensor;
/// use mrtk_tensor_ops::{ops::matmul, Transpose};
///
/// // [[1, 3], [2, 4]] in column-major order
/// let a = Tensor::<i32>::from_shape_vec(&[2, 2], vec![1, 2, 3, 4]).unwrap();
/// let x = Tensor::<i32>::from_shape_vec(&[2], vec![1, 1]).unwrap();
/// let y = matmul(&a, Transpose::None, &x, Transpose::None).unwrap();
/// assert_eq!(y.dims(), &[2, 1]);
/// assert_eq!(y.as_slice(), &[4, 6]);
/// ```
pub fn matmul<T>(
    a: &Tensor<T>,
    ta: Transpose,
    b: &Tensor<T>,
    tb: Transpose,
) -> Result<Tensor<T>, TensorOpsError>
where
    T: Zero + Clone + Conjugate + Add<Output = T> + Mul<Output = T>,
{
    let (m, k) = op_dims(a, ta)?;
    let (kb, n) = op_dims(b, tb)?;
    if k != kb {
        return Err(TensorOpsError::ShapeMismatch(vec![m, k], vec![kb, n]));
    }

    let mut data = Vec::with_capacity(m * n);
    for j in 0..n {
        for i in 0..m {
            let mut acc = T::zero();
            for l in 0..k {
                acc = acc + op_at(a, ta, i, l) * op_at(b, tb, l, j);
            }
            data.push(acc);
        }
    }
    Ok(Tensor::from_shape_vec(&[m, n], data)?)
}

/// Element-wise minimum of two tensors.
///
/// Elements are ordered by their [`ElementCompare`] strategy, so complex
/// values are compared by magnitude.
///
/// # Errors
///
/// If the dimensions of the tensors don't match, an error is returned.
pub fn min<T>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, TensorOpsError>
where
    T: ElementCompare + Clone,
{
    Ok(a.element_wise_op(b, |x, y| {
        if y.cmp_less(x) {
            y.clone()
        } else {
            x.clone()
        }
    })?)
}

/// Element-wise maximum of two tensors.
pub fn max<T>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, TensorOpsError>
where
    T: ElementCompare + Clone,
{
    Ok(a.element_wise_op(b, |x, y| {
        if y.cmp_greater(x) {
            y.clone()
        } else {
            x.clone()
        }
    })?)
}

fn check_same_dims<T>(a: &Tensor<T>, b: &Tensor<T>) -> Result<(), TensorOpsError> {
    if a.dims() != b.dims() {
        return Err(TensorOpsError::ShapeMismatch(
            a.dims().to_vec(),
            b.dims().to_vec(),
        ));
    }
    Ok(())
}

fn op_dims<T>(t: &Tensor<T>, op: Transpose) -> Result<(usize, usize), TensorOpsError> {
    if t.rank() > 2 {
        return Err(TensorOpsError::NotAMatrix(t.dims().to_vec()));
    }
    let (rows, cols) = (t.dim(0), t.dim(1));
    Ok(match op {
        Transpose::None => (rows, cols),
        Transpose::Transpose | Transpose::Adjoint => (cols, rows),
    })
}

/// Element `(i, j)` of `op(t)`.
fn op_at<T: Clone + Conjugate>(t: &Tensor<T>, op: Transpose, i: usize, j: usize) -> T {
    let rows = t.dim(0);
    let src = t.as_slice();
    match op {
        Transpose::None => src[i + j * rows].clone(),
        Transpose::Transpose => src[j + i * rows].clone(),
        Transpose::Adjoint => src[j + i * rows].conjugate(),
    }
}
