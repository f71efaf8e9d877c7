#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `mrtk-tensor` is the array engine underneath the MR reconstruction toolkit.
//! It provides a dense, column-major [`Tensor`] of any rank, a small
//! [`Range`] language for selecting coordinates along an axis, and
//! [`TensorView`] / [`TensorViewMut`] projections that read and write through
//! to the tensor they were built from.
//!
//! # Architecture
//!
//! - **Tensor**: owned element buffer plus a [`shape::Shape`] (extents, strides, resolution)
//! - **Range**: an ordered coordinate list along one axis, built from indices or parsed from text
//! - **TensorView / TensorViewMut**: borrowed projections resolved to a list of flat offsets
//! - **TensorLike**: the read surface shared by tensors and views
//! - **Element traits**: per-type comparison, conjugation and truthiness
//!
//! # Quick Start
//!
//! ```rust
//! use mrtk_tensor::{Range, Tensor, TensorError};
//!
//! // a 3x4 tensor holding 0..=11 in column-major order
//! let mut t = Tensor::<f32>::from_shape_fn(&[3, 4], |idx| (idx[0] + 3 * idx[1]) as f32)?;
//! assert_eq!(t.strides(), &[1, 3]);
//!
//! // the first three elements of the flattened tensor
//! let v = t.view(&[Range::span(0, 2)?])?;
//! assert_eq!(v.to_tensor()?.as_slice(), &[0.0, 1.0, 2.0]);
//!
//! // overwrite them through a mutable view
//! t.view_mut(&[Range::span(0, 2)?])?.fill(5.0);
//! assert_eq!(&t.as_slice()[..3], &[5.0, 5.0, 5.0]);
//!
//! // select the second row with a textual range specification
//! let row = t.view_str("1, :")?.to_tensor()?;
//! assert_eq!(row.as_slice(), &[5.0, 4.0, 7.0, 10.0]);
//! # Ok::<(), TensorError>(())
//! ```
//!
//! Arithmetic between tensors checks shapes and returns a `Result`; scalar
//! arithmetic broadcasts:
//!
//! ```rust
//! use mrtk_tensor::Tensor;
//!
//! let a = Tensor::<f32>::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let b = (&a * 2.0_f32) + 1.0;
//! assert_eq!(b.as_slice(), &[3.0, 5.0, 7.0, 9.0]);
//!
//! let c = (&a + &b).unwrap();
//! assert_eq!(c.as_slice(), &[4.0, 7.0, 10.0, 13.0]);
//! ```

/// Element-type traits for comparison, conjugation and truthiness.
pub mod element;

/// Error types for dimensions, ranges and tensor operations.
pub mod error;

/// Operator implementations and free-function arithmetic.
pub mod ops;

/// Coordinate ranges and the textual range grammar.
pub mod range;

/// Serde support for tensors.
///
/// Enabled with the `serde` feature.
#[cfg(feature = "serde")]
pub mod serde;

/// Dimension, stride and resolution model.
pub mod shape;

/// Owned flat storage for tensor elements.
pub mod storage;

/// The tensor container.
pub mod tensor;

/// Views projecting a tensor through ranges.
pub mod view;

/// The maximum number of ranges a single view can combine.
pub const MAX_VIEW_RANK: usize = 16;

pub use crate::element::{CompareOp, Conjugate, ElementCompare, Truthy};
pub use crate::error::{DimensionError, RangeError, TensorError};
pub use crate::range::{parse_range_spec, Range};
pub use crate::shape::{AcquisitionAxis, Shape, ACQUISITION_AXES};
pub use crate::tensor::Tensor;
pub use crate::view::{TensorLike, TensorView, TensorViewMut};
