use thiserror::Error;

/// An error raised while building the dimension vector of a tensor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    /// The dimension vector has no axes.
    #[error("Empty dimensions vector")]
    EmptyDimensions,

    /// One of the axes has an extent of zero.
    #[error("Dimensions vector contains a zero extent at axis {axis}")]
    ZeroExtent {
        /// The first axis found with a zero extent
        axis: usize,
    },
}

/// An error raised while building or parsing a [`crate::Range`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// A coordinate or range endpoint is below zero.
    #[error("Negative index {0} in range declaration")]
    NegativeIndex(i64),

    /// A strided range was declared with a stride of zero.
    #[error("Stride must not be zero")]
    ZeroStride,

    /// The stride points away from the end of the range.
    #[error("Range {begin}:{stride}:{end} runs against its stride")]
    InvalidDirection {
        /// First coordinate of the range
        begin: i64,
        /// Signed step between coordinates
        stride: i64,
        /// Last coordinate of the range
        end: i64,
    },

    /// The textual specification contains no axis at all.
    #[error("Range specification must consist of at least one axis")]
    EmptyRangeSpecification,

    /// An axis specification could not be parsed.
    #[error("Malformed range specification '{0}': expected index, begin:end or begin:stride:end")]
    MalformedRangeSpecification(String),

    /// The range declares more coordinates than can be allocated.
    #[error("Range of {count} coordinates cannot be allocated")]
    TooLarge {
        /// Number of coordinates the range declares
        count: u64,
    },

    /// The specification uses the `end` keyword, which has no defined arithmetic yet.
    #[error("End-relative range '{0}' is not supported")]
    EndRelativeUnsupported(String),
}

/// Error type for tensor operations.
///
/// This enum covers construction, indexing, view and arithmetic failures. Every
/// failure is surfaced to the immediate caller; nothing is retried or recovered
/// inside the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    /// The tensor could not be built from the requested dimensions.
    #[error("Invalid dimensions: {0}")]
    Dimension(#[from] DimensionError),

    /// A range could not be built or parsed.
    #[error("Invalid range: {0}")]
    Range(#[from] RangeError),

    /// Two tensors taking part in an elementwise operation have different shapes.
    ///
    /// # Recommended Actions
    /// - Verify tensor shapes with `tensor.dims()`
    /// - Materialize or reshape one operand first
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Shape of the left-hand operand
        expected: Vec<usize>,
        /// Shape of the right-hand operand
        actual: Vec<usize>,
    },

    /// An assignment through a view received a different number of elements.
    #[error("Size mismatch: expected {expected} elements, got {actual}")]
    SizeMismatch {
        /// Number of elements addressed by the target
        expected: usize,
        /// Number of elements supplied by the source
        actual: usize,
    },

    /// A view was requested over more ranges than the engine enumerates.
    #[error("View over {rank} ranges is unsupported (maximum {max})")]
    RankUnsupported {
        /// The number of ranges requested
        rank: usize,
        /// The maximum number of simultaneous ranges
        max: usize,
    },

    /// A bounds-checked access fell outside an axis or the flat buffer.
    ///
    /// # Common Causes
    /// - Off-by-one errors in indexing loops
    /// - Using coordinates from a tensor of a different shape
    /// - Accessing a tensor after `clear()`
    #[error("Index {index} out of range for extent {size}")]
    IndexOutOfRange {
        /// The invalid index that was attempted
        index: usize,
        /// The extent being indexed
        size: usize,
    },

    /// Type casting operation failed.
    ///
    /// This occurs when a value does not fit into the target element type.
    #[error("Type cast failed: value at offset {offset} cannot be represented in the target type")]
    CastError {
        /// Flat offset of the first value that failed to convert
        offset: usize,
    },

    /// Operation not supported for this tensor configuration.
    #[error("Unsupported operation: {operation} - {reason}")]
    UnsupportedOperation {
        /// Name of the operation that failed
        operation: String,
        /// Reason why the operation is not supported
        reason: String,
    },
}

impl TensorError {
    /// Creates an IndexOutOfRange error.
    pub fn index_out_of_range(index: usize, size: usize) -> Self {
        Self::IndexOutOfRange { index, size }
    }

    /// Creates a ShapeMismatch error from two dimension slices.
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Creates a SizeMismatch error.
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Creates an UnsupportedOperation error with context.
    pub fn unsupported_operation(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Returns a user-friendly suggestion for resolving the error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::Dimension(_) => "Use a non-empty dimension vector whose extents are all at least 1",
            Self::Range(RangeError::EndRelativeUnsupported(_)) => {
                "Replace 'end' with the explicit last coordinate of the axis"
            }
            Self::Range(RangeError::TooLarge { .. }) => {
                "Bound the range by the extent of the axis it selects"
            }
            Self::Range(_) => {
                "Use non-negative coordinates and a non-zero stride pointing towards the end"
            }
            Self::ShapeMismatch { .. } => "Check that both operands have identical dimensions",
            Self::SizeMismatch { .. } => {
                "Ensure the source holds exactly as many elements as the view addresses"
            }
            Self::RankUnsupported { .. } => "Select fewer axes at once or flatten trailing axes",
            Self::IndexOutOfRange { .. } => {
                "Verify indices are within bounds (0 <= index < extent)"
            }
            Self::CastError { .. } => {
                "Check that source values are within the valid range for the target type"
            }
            Self::UnsupportedOperation { .. } => {
                "Check the operation requirements for the tensor rank and element type"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_error_converts() {
        let err: TensorError = DimensionError::ZeroExtent { axis: 2 }.into();
        assert_eq!(
            err,
            TensorError::Dimension(DimensionError::ZeroExtent { axis: 2 })
        );
        assert!(err.to_string().contains("axis 2"));
    }

    #[test]
    fn range_error_suggestion() {
        let err: TensorError = RangeError::EndRelativeUnsupported("6:end-3".into()).into();
        assert!(err.suggestion().contains("end"));
        let err: TensorError = RangeError::ZeroStride.into();
        assert!(err.suggestion().contains("stride"));
    }

    #[test]
    fn helper_constructors() {
        assert_eq!(
            TensorError::shape_mismatch(&[3, 4], &[4, 3]),
            TensorError::ShapeMismatch {
                expected: vec![3, 4],
                actual: vec![4, 3]
            }
        );
        assert_eq!(
            TensorError::index_out_of_range(5, 4).to_string(),
            "Index 5 out of range for extent 4"
        );
    }
}
