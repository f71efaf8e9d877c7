#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for tensor operations.
///
/// Defines [`TensorOpsError`] for handling failures during tensor computations.
pub mod error;

/// Reductions, products and elementwise helpers over tensors.
///
/// Includes inner products, matrix products with optional transposition of
/// either operand, axis sums and elementwise minimum and maximum.
pub mod ops;

pub use error::TensorOpsError;
pub use ops::Transpose;
