//! Operations for tensors.
//!
//! Elementwise arithmetic between tensors checks that both operands have
//! identical dimensions and returns a `Result`. Arithmetic with a scalar
//! broadcasts the scalar over every element and cannot fail.
//!
//! The operators are available both as free functions and through the
//! `std::ops` traits:
//!
//! | expression            | result                          |
//! |-----------------------|---------------------------------|
//! | `&a + &b`             | `Result<Tensor<T>, TensorError>`|
//! | `&a * 2.0`, `a * 2.0` | `Tensor<T>`                     |
//! | `2.0 * &a`            | `Tensor<T>` (primitive scalars) |
//! | `a *= 2.0`            | in place                        |
//! | `-&a`, `-a`           | `Tensor<T>`                     |

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_complex::Complex;

use crate::{element::Truthy, error::TensorError, tensor::Tensor};

/// Add two tensors element-wise.
///
/// # Errors
///
/// Fails with [`TensorError::ShapeMismatch`] if the dimensions differ.
///
/// # Example
///
/// ```
/// use mrtk_tensor::{ops, Tensor};
///
/// let a = Tensor::<u8>::from_shape_vec(&[2], vec![1, 2]).unwrap();
/// let b = Tensor::<u8>::from_shape_vec(&[2], vec![3, 4]).unwrap();
/// assert_eq!(ops::add(&a, &b).unwrap().as_slice(), &[4, 6]);
/// ```
pub fn add<T>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>, TensorError>
where
    T: Add<Output = T> + Clone,
{
    lhs.element_wise_op(rhs, |a, b| a.clone() + b.clone())
}

/// Subtract two tensors element-wise.
pub fn sub<T>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>, TensorError>
where
    T: Sub<Output = T> + Clone,
{
    lhs.element_wise_op(rhs, |a, b| a.clone() - b.clone())
}

/// Multiply two tensors element-wise.
pub fn mul<T>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>, TensorError>
where
    T: Mul<Output = T> + Clone,
{
    lhs.element_wise_op(rhs, |a, b| a.clone() * b.clone())
}

/// Divide two tensors element-wise.
pub fn div<T>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<T>, TensorError>
where
    T: Div<Output = T> + Clone,
{
    lhs.element_wise_op(rhs, |a, b| a.clone() / b.clone())
}

/// Add `rhs` to `lhs` in place.
///
/// # Errors
///
/// Fails with [`TensorError::ShapeMismatch`] if the dimensions differ, leaving
/// `lhs` untouched.
pub fn add_inplace<T>(lhs: &mut Tensor<T>, rhs: &Tensor<T>) -> Result<(), TensorError>
where
    T: AddAssign + Clone,
{
    lhs.element_wise_op_inplace(rhs, |a, b| *a += b.clone())
}

/// Subtract `rhs` from `lhs` in place.
pub fn sub_inplace<T>(lhs: &mut Tensor<T>, rhs: &Tensor<T>) -> Result<(), TensorError>
where
    T: SubAssign + Clone,
{
    lhs.element_wise_op_inplace(rhs, |a, b| *a -= b.clone())
}

/// Multiply `lhs` by `rhs` in place.
pub fn mul_inplace<T>(lhs: &mut Tensor<T>, rhs: &Tensor<T>) -> Result<(), TensorError>
where
    T: MulAssign + Clone,
{
    lhs.element_wise_op_inplace(rhs, |a, b| *a *= b.clone())
}

/// Divide `lhs` by `rhs` in place.
pub fn div_inplace<T>(lhs: &mut Tensor<T>, rhs: &Tensor<T>) -> Result<(), TensorError>
where
    T: DivAssign + Clone,
{
    lhs.element_wise_op_inplace(rhs, |a, b| *a /= b.clone())
}

/// Raise every element to the power `exponent`.
///
/// # Example
///
/// ```
/// use mrtk_tensor::{ops, Tensor};
///
/// let a = Tensor::<f64>::from_shape_vec(&[3], vec![1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(ops::powf(&a, 2.0).as_slice(), &[1.0, 4.0, 9.0]);
/// ```
pub fn powf<T>(t: &Tensor<T>, exponent: T) -> Tensor<T>
where
    T: num_traits::Float,
{
    t.map(|x| x.powf(exponent))
}

/// Element-wise logical AND; an element is true when it is non-zero.
///
/// # Errors
///
/// Fails with [`TensorError::ShapeMismatch`] if the dimensions differ.
pub fn logical_and<T>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<bool>, TensorError>
where
    T: Truthy,
{
    lhs.element_wise_op(rhs, |a, b| a.is_truthy() && b.is_truthy())
}

/// Element-wise logical OR; an element is true when it is non-zero.
pub fn logical_or<T>(lhs: &Tensor<T>, rhs: &Tensor<T>) -> Result<Tensor<bool>, TensorError>
where
    T: Truthy,
{
    lhs.element_wise_op(rhs, |a, b| a.is_truthy() || b.is_truthy())
}

macro_rules! impl_tensor_binop {
    ($trait:ident, $method:ident, $func:ident, $assign_trait:ident, $assign_method:ident) => {
        impl<T> $trait<&Tensor<T>> for &Tensor<T>
        where
            T: $trait<Output = T> + Clone,
        {
            type Output = Result<Tensor<T>, TensorError>;

            fn $method(self, rhs: &Tensor<T>) -> Self::Output {
                $func(self, rhs)
            }
        }

        impl<T> $trait<T> for &Tensor<T>
        where
            T: $trait<Output = T> + Clone,
        {
            type Output = Tensor<T>;

            fn $method(self, rhs: T) -> Self::Output {
                self.map(|a| a.clone().$method(rhs.clone()))
            }
        }

        impl<T> $trait<T> for Tensor<T>
        where
            T: $assign_trait + Clone,
        {
            type Output = Tensor<T>;

            fn $method(mut self, rhs: T) -> Self::Output {
                self.$assign_method(rhs);
                self
            }
        }

        impl<T> $assign_trait<T> for Tensor<T>
        where
            T: $assign_trait + Clone,
        {
            fn $assign_method(&mut self, rhs: T) {
                self.iter_mut().for_each(|a| a.$assign_method(rhs.clone()));
            }
        }
    };
}

impl_tensor_binop!(Add, add, add, AddAssign, add_assign);
impl_tensor_binop!(Sub, sub, sub, SubAssign, sub_assign);
impl_tensor_binop!(Mul, mul, mul, MulAssign, mul_assign);
impl_tensor_binop!(Div, div, div, DivAssign, div_assign);

macro_rules! impl_scalar_lhs {
    ($($t:ty),*) => {
        $(
            impl Add<&Tensor<$t>> for $t {
                type Output = Tensor<$t>;

                fn add(self, rhs: &Tensor<$t>) -> Tensor<$t> {
                    rhs.map(|&a| self + a)
                }
            }

            impl Sub<&Tensor<$t>> for $t {
                type Output = Tensor<$t>;

                fn sub(self, rhs: &Tensor<$t>) -> Tensor<$t> {
                    rhs.map(|&a| self - a)
                }
            }

            impl Mul<&Tensor<$t>> for $t {
                type Output = Tensor<$t>;

                fn mul(self, rhs: &Tensor<$t>) -> Tensor<$t> {
                    rhs.map(|&a| self * a)
                }
            }

            impl Div<&Tensor<$t>> for $t {
                type Output = Tensor<$t>;

                fn div(self, rhs: &Tensor<$t>) -> Tensor<$t> {
                    rhs.map(|&a| self / a)
                }
            }
        )*
    };
}

impl_scalar_lhs!(
    u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64, Complex<f32>, Complex<f64>
);

impl<T> Neg for &Tensor<T>
where
    T: Neg<Output = T> + Clone,
{
    type Output = Tensor<T>;

    fn neg(self) -> Tensor<T> {
        self.map(|a| -a.clone())
    }
}

impl<T> Neg for Tensor<T>
where
    T: Neg<Output = T> + Clone,
{
    type Output = Tensor<T>;

    fn neg(mut self) -> Tensor<T> {
        self.iter_mut().for_each(|a| *a = -a.clone());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompareOp;

    #[test]
    fn test_add() -> Result<(), TensorError> {
        let a = Tensor::<f32>::from_shape_fn(&[3, 4], |idx| (idx[0] + 3 * idx[1]) as f32)?;
        let b = Tensor::<f32>::from_shape_val(&[3, 4], 1.0)?;
        let c = add(&a, &b)?;
        let expected: Vec<f32> = (1..=12).map(|v| v as f32).collect();
        assert_eq!(c.as_slice(), expected.as_slice());
        assert_eq!((&a + &b)?, c);
        Ok(())
    }

    #[test]
    fn test_add_shape_mismatch() -> Result<(), TensorError> {
        let a = Tensor::<f32>::new(&[3, 4])?;
        let b = Tensor::<f32>::new(&[4, 3])?;
        assert_eq!(
            add(&a, &b).err(),
            Some(TensorError::shape_mismatch(&[3, 4], &[4, 3]))
        );
        assert!((&a - &b).is_err());
        Ok(())
    }

    #[test]
    fn test_sub_mul_div() -> Result<(), TensorError> {
        let a = Tensor::<i32>::from_shape_vec(&[2, 2], vec![6, 8, 10, 12])?;
        let b = Tensor::<i32>::from_shape_vec(&[2, 2], vec![1, 2, 5, 3])?;
        assert_eq!(sub(&a, &b)?.as_slice(), &[5, 6, 5, 9]);
        assert_eq!(mul(&a, &b)?.as_slice(), &[6, 16, 50, 36]);
        assert_eq!(div(&a, &b)?.as_slice(), &[6, 4, 2, 4]);
        assert_eq!((&a * &b)?.as_slice(), &[6, 16, 50, 36]);
        assert_eq!((&a / &b)?.as_slice(), &[6, 4, 2, 4]);
        Ok(())
    }

    #[test]
    fn test_inplace() -> Result<(), TensorError> {
        let mut a = Tensor::<f64>::from_shape_vec(&[3], vec![1.0, 2.0, 3.0])?;
        let b = Tensor::<f64>::from_shape_vec(&[3], vec![2.0, 2.0, 2.0])?;
        add_inplace(&mut a, &b)?;
        assert_eq!(a.as_slice(), &[3.0, 4.0, 5.0]);
        mul_inplace(&mut a, &b)?;
        assert_eq!(a.as_slice(), &[6.0, 8.0, 10.0]);
        sub_inplace(&mut a, &b)?;
        div_inplace(&mut a, &b)?;
        assert_eq!(a.as_slice(), &[2.0, 3.0, 4.0]);

        let c = Tensor::<f64>::new(&[4])?;
        assert!(add_inplace(&mut a, &c).is_err());
        assert_eq!(a.as_slice(), &[2.0, 3.0, 4.0]);
        Ok(())
    }

    #[test]
    fn test_scalar_ops() -> Result<(), TensorError> {
        let a = Tensor::<f32>::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0])?;
        assert_eq!((&a * 2.0).as_slice(), &[2.0, 4.0, 6.0, 8.0]);
        assert_eq!((&a + 1.0).as_slice(), &[2.0, 3.0, 4.0, 5.0]);
        assert_eq!((&a - 1.0).as_slice(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!((&a / 2.0).as_slice(), &[0.5, 1.0, 1.5, 2.0]);
        assert_eq!((10.0_f32 - &a).as_slice(), &[9.0, 8.0, 7.0, 6.0]);
        assert_eq!((2.0_f32 * &a).as_slice(), &[2.0, 4.0, 6.0, 8.0]);
        assert_eq!((12.0_f32 / &a).as_slice(), &[12.0, 6.0, 4.0, 3.0]);
        assert_eq!((1.0_f32 + &a).as_slice(), &[2.0, 3.0, 4.0, 5.0]);
        assert_eq!(a.clone() * 3.0, &a * 3.0);

        let b = Tensor::<u8>::from_shape_vec(&[3], vec![1, 2, 4])?;
        assert_eq!((8_u8 / &b).as_slice(), &[8, 4, 2]);
        assert_eq!((3_u8 * &b).as_slice(), &[3, 6, 12]);
        let c = Tensor::<usize>::from_shape_vec(&[2], vec![1, 5])?;
        assert_eq!((10_usize - &c).as_slice(), &[9, 5]);
        Ok(())
    }

    #[test]
    fn test_scalar_assign() -> Result<(), TensorError> {
        let mut a = Tensor::<i64>::from_shape_val(&[3], 4)?;
        a += 2;
        a *= 3;
        a -= 1;
        a /= 17;
        assert_eq!(a.as_slice(), &[1, 1, 1]);
        Ok(())
    }

    #[test]
    fn test_complex_scalar_ops() -> Result<(), TensorError> {
        let a = Tensor::from_shape_vec(&[2], vec![Complex::new(1.0_f64, 1.0), Complex::new(0.0, 2.0)])?;
        let i = Complex::new(0.0, 1.0);
        let b = i * &a;
        assert_eq!(b.as_slice(), &[Complex::new(-1.0, 1.0), Complex::new(-2.0, 0.0)]);
        assert_eq!((&a * i).as_slice(), b.as_slice());
        Ok(())
    }

    #[test]
    fn test_neg() -> Result<(), TensorError> {
        let a = Tensor::<i32>::from_shape_vec(&[2, 2], vec![1, -2, 3, 0])?;
        assert_eq!((-&a).as_slice(), &[-1, 2, -3, 0]);
        assert_eq!(-(-a.clone()), a);
        Ok(())
    }

    #[test]
    fn test_a_times_two_and_eq_two() -> Result<(), TensorError> {
        let a = Tensor::<f32>::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0])?;
        let v = a.view(&[crate::Range::single(1)?])?;
        assert_eq!(v[0], 2.0);
        assert_eq!((&a * 2.0)[1], 4.0);
        assert_eq!(
            a.compare_scalar(&2.0, CompareOp::Eq).as_slice(),
            &[false, true, false, false]
        );
        Ok(())
    }

    #[test]
    fn test_powf() -> Result<(), TensorError> {
        let a = Tensor::<f32>::from_shape_vec(&[2], vec![4.0, 9.0])?;
        let r = powf(&a, 0.5);
        approx::assert_relative_eq!(r.as_slice()[0], 2.0);
        approx::assert_relative_eq!(r.as_slice()[1], 3.0);
        Ok(())
    }

    #[test]
    fn test_logical() -> Result<(), TensorError> {
        let a = Tensor::<i32>::from_shape_vec(&[4], vec![0, 1, 0, 5])?;
        let b = Tensor::<i32>::from_shape_vec(&[4], vec![0, 0, 2, 3])?;
        assert_eq!(logical_and(&a, &b)?.as_slice(), &[false, false, false, true]);
        assert_eq!(logical_or(&a, &b)?.as_slice(), &[false, true, true, true]);

        let m = Tensor::<bool>::from_shape_vec(&[4], vec![true, false, true, false])?;
        let n = a.gt_scalar(&0);
        assert_eq!(logical_and(&m, &n)?.as_slice(), &[false, false, false, false]);
        assert!(logical_or(&a, &Tensor::<i32>::new(&[2])?).is_err());
        Ok(())
    }
}
