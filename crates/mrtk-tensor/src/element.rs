//! Per-element-type behaviour used by the tensor operators.
//!
//! Comparison, conjugation and truthiness differ between real and complex
//! element types. Each is a small trait implemented once per element type, so
//! the operators stay generic and a new element type is a local addition.

use num_complex::Complex;

/// Comparison strategy for tensor elements.
///
/// Real types order by value. Complex types order by magnitude and compare
/// equal only when both components are equal.
pub trait ElementCompare {
    /// Element equality.
    fn cmp_eq(&self, other: &Self) -> bool;

    /// Strict ordering.
    fn cmp_less(&self, other: &Self) -> bool;

    /// Non-strict ordering.
    fn cmp_less_eq(&self, other: &Self) -> bool;

    /// Element inequality.
    #[inline]
    fn cmp_ne(&self, other: &Self) -> bool {
        !self.cmp_eq(other)
    }

    /// Strict reverse ordering.
    #[inline]
    fn cmp_greater(&self, other: &Self) -> bool {
        other.cmp_less(self)
    }

    /// Non-strict reverse ordering.
    #[inline]
    fn cmp_greater_eq(&self, other: &Self) -> bool {
        other.cmp_less_eq(self)
    }
}

/// The six elementwise comparison predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CompareOp {
    /// Evaluates the predicate on a pair of elements.
    #[inline]
    pub fn apply<T: ElementCompare>(self, a: &T, b: &T) -> bool {
        match self {
            CompareOp::Eq => a.cmp_eq(b),
            CompareOp::Ne => a.cmp_ne(b),
            CompareOp::Lt => a.cmp_less(b),
            CompareOp::Le => a.cmp_less_eq(b),
            CompareOp::Gt => a.cmp_greater(b),
            CompareOp::Ge => a.cmp_greater_eq(b),
        }
    }
}

/// Complex conjugation; the identity for real types.
pub trait Conjugate {
    /// Returns the complex conjugate of the element.
    fn conjugate(&self) -> Self;
}

/// Truthiness of an element, used by the logical operators.
pub trait Truthy {
    /// True if the element is non-zero.
    fn is_truthy(&self) -> bool;
}

macro_rules! impl_real_element {
    ($($t:ty),*) => {
        $(
            impl ElementCompare for $t {
                #[inline]
                fn cmp_eq(&self, other: &Self) -> bool {
                    self == other
                }
                #[inline]
                fn cmp_less(&self, other: &Self) -> bool {
                    self < other
                }
                #[inline]
                fn cmp_less_eq(&self, other: &Self) -> bool {
                    self <= other
                }
            }

            impl Conjugate for $t {
                #[inline]
                fn conjugate(&self) -> Self {
                    *self
                }
            }

            impl Truthy for $t {
                #[inline]
                fn is_truthy(&self) -> bool {
                    *self != <$t as num_traits::Zero>::zero()
                }
            }
        )*
    };
}

impl_real_element!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl ElementCompare for bool {
    #[inline]
    fn cmp_eq(&self, other: &Self) -> bool {
        self == other
    }
    #[inline]
    fn cmp_less(&self, other: &Self) -> bool {
        self < other
    }
    #[inline]
    fn cmp_less_eq(&self, other: &Self) -> bool {
        self <= other
    }
}

impl Conjugate for bool {
    #[inline]
    fn conjugate(&self) -> Self {
        *self
    }
}

impl Truthy for bool {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_complex_element {
    ($($t:ty),*) => {
        $(
            impl ElementCompare for Complex<$t> {
                #[inline]
                fn cmp_eq(&self, other: &Self) -> bool {
                    self == other
                }
                #[inline]
                fn cmp_less(&self, other: &Self) -> bool {
                    self.norm() < other.norm()
                }
                #[inline]
                fn cmp_less_eq(&self, other: &Self) -> bool {
                    self.norm() <= other.norm()
                }
            }

            impl Conjugate for Complex<$t> {
                #[inline]
                fn conjugate(&self) -> Self {
                    self.conj()
                }
            }

            impl Truthy for Complex<$t> {
                #[inline]
                fn is_truthy(&self) -> bool {
                    self.re != 0.0 || self.im != 0.0
                }
            }
        )*
    };
}

impl_complex_element!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_ordering() {
        assert!(1.0_f32.cmp_less(&2.0));
        assert!(2.0_f32.cmp_greater(&1.0));
        assert!(2_i32.cmp_less_eq(&2));
        assert!(2_i32.cmp_greater_eq(&2));
        assert!(3_u8.cmp_ne(&4));
        assert!(!f32::NAN.cmp_eq(&f32::NAN));
    }

    #[test]
    fn complex_orders_by_magnitude() {
        let a = Complex::new(3.0_f64, 4.0);
        let b = Complex::new(-5.0_f64, 0.0);
        let c = Complex::new(0.0_f64, 1.0);
        assert!(a.cmp_less_eq(&b));
        assert!(a.cmp_greater_eq(&b));
        assert!(!a.cmp_eq(&b));
        assert!(c.cmp_less(&a));
    }

    #[test]
    fn compare_op_dispatch() {
        let ops = [
            CompareOp::Eq,
            CompareOp::Ne,
            CompareOp::Lt,
            CompareOp::Le,
            CompareOp::Gt,
            CompareOp::Ge,
        ];
        let got: Vec<bool> = ops.iter().map(|op| op.apply(&1_i32, &2)).collect();
        assert_eq!(got, vec![false, true, true, true, false, false]);
    }

    #[test]
    fn conjugate() {
        assert_eq!(2.5_f32.conjugate(), 2.5);
        assert_eq!(
            Complex::new(1.0_f32, -2.0).conjugate(),
            Complex::new(1.0, 2.0)
        );
    }

    #[test]
    fn truthiness() {
        assert!(1_i16.is_truthy());
        assert!(!0.0_f64.is_truthy());
        assert!(Complex::new(0.0_f32, 1.0).is_truthy());
        assert!(!Complex::new(0.0_f32, 0.0).is_truthy());
        assert!(true.is_truthy());
    }
}
