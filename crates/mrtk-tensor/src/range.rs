//! Coordinate ranges along a single axis and the textual range grammar.
//!
//! ```text
//! range-spec := axis-spec ("," axis-spec)*
//! axis-spec  := index | index ":" index | index ":" index ":" index
//! index      := non-negative integer literal
//! ```
//!
//! An empty axis-spec or the lone `:` selects the whole axis.

use std::str::FromStr;

use crate::error::RangeError;

/// An explicit, ordered list of coordinates along one axis.
///
/// An empty range stands for the full extent of the axis it is applied to and
/// is resolved when a view is built. A range with exactly one coordinate is a
/// singleton selector and collapses its axis out of a view's shape.
///
/// Building on an existing range appends coordinates, so composite selections
/// can be assembled from several pieces:
///
/// ```rust
/// use mrtk_tensor::Range;
///
/// let mut r = Range::span(0, 2).unwrap();
/// r.push_strided(10, 5, 20).unwrap();
/// assert_eq!(r.indices(), &[0, 1, 2, 10, 15, 20]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    indices: Vec<usize>,
}

fn non_negative(v: i64) -> Result<usize, RangeError> {
    if v < 0 {
        return Err(RangeError::NegativeIndex(v));
    }
    Ok(v as usize)
}

impl Range {
    /// A range selecting the whole axis it is applied to.
    #[inline]
    pub fn all() -> Self {
        Self::default()
    }

    /// A singleton range holding `index`.
    ///
    /// # Errors
    ///
    /// Fails with [`RangeError::NegativeIndex`] if `index` is negative.
    pub fn single(index: i64) -> Result<Self, RangeError> {
        let mut r = Self::default();
        r.push_single(index)?;
        Ok(r)
    }

    /// The inclusive ascending range `begin..=end`.
    pub fn span(begin: i64, end: i64) -> Result<Self, RangeError> {
        let mut r = Self::default();
        r.push_span(begin, end)?;
        Ok(r)
    }

    /// The inclusive range `begin, begin + stride, ...` bounded by `end`.
    ///
    /// `end` is part of the range only when it is reachable in whole strides.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mrtk_tensor::Range;
    ///
    /// assert_eq!(Range::strided(0, 3, 7).unwrap().indices(), &[0, 3, 6]);
    /// assert_eq!(Range::strided(3, -1, 2).unwrap().indices(), &[3, 2]);
    /// ```
    pub fn strided(begin: i64, stride: i64, end: i64) -> Result<Self, RangeError> {
        let mut r = Self::default();
        r.push_strided(begin, stride, end)?;
        Ok(r)
    }

    /// A range over an explicit list of coordinates.
    #[inline]
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Appends a single coordinate.
    pub fn push_single(&mut self, index: i64) -> Result<&mut Self, RangeError> {
        let index = non_negative(index)?;
        self.indices.push(index);
        Ok(self)
    }

    /// Appends the coordinates `begin..=end`.
    pub fn push_span(&mut self, begin: i64, end: i64) -> Result<&mut Self, RangeError> {
        let b = non_negative(begin)?;
        let e = non_negative(end)?;
        if e < b {
            return Err(RangeError::InvalidDirection {
                begin,
                stride: 1,
                end,
            });
        }
        self.reserve((e - b) as u64 + 1)?;
        self.indices.extend(b..=e);
        Ok(self)
    }

    /// Appends the coordinates of a strided range.
    pub fn push_strided(
        &mut self,
        begin: i64,
        stride: i64,
        end: i64,
    ) -> Result<&mut Self, RangeError> {
        non_negative(begin)?;
        non_negative(end)?;
        if stride == 0 {
            return Err(RangeError::ZeroStride);
        }
        if (stride > 0 && end < begin) || (stride < 0 && end > begin) {
            return Err(RangeError::InvalidDirection { begin, stride, end });
        }
        // both operands share a sign, so the quotient is the exact floor
        let count = ((end - begin) / stride) as u64 + 1;
        self.reserve(count)?;
        self.indices
            .extend((0..count as i64).map(|k| (begin + k * stride) as usize));
        Ok(self)
    }

    fn reserve(&mut self, count: u64) -> Result<(), RangeError> {
        let additional = usize::try_from(count).map_err(|_| RangeError::TooLarge { count })?;
        self.indices
            .try_reserve_exact(additional)
            .map_err(|_| RangeError::TooLarge { count })
    }

    /// Clears the range and refills it with a single coordinate.
    pub fn reset_single(&mut self, index: i64) -> Result<&mut Self, RangeError> {
        self.indices.clear();
        self.push_single(index)
    }

    /// Clears the range and refills it with `begin..=end`.
    pub fn reset_span(&mut self, begin: i64, end: i64) -> Result<&mut Self, RangeError> {
        self.indices.clear();
        self.push_span(begin, end)
    }

    /// Clears the range and refills it with a strided range.
    pub fn reset_strided(
        &mut self,
        begin: i64,
        stride: i64,
        end: i64,
    ) -> Result<&mut Self, RangeError> {
        self.indices.clear();
        self.push_strided(begin, stride, end)
    }

    /// The coordinates of the range.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The number of coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True for a full-axis range that has not been resolved yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// True if the range selects exactly one coordinate.
    #[inline]
    pub fn is_singleton(&self) -> bool {
        self.indices.len() == 1
    }

    /// The `i`-th coordinate, if any.
    #[inline]
    pub fn get(&self, i: usize) -> Option<usize> {
        self.indices.get(i).copied()
    }

    /// Iterates over the coordinates.
    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, usize>> {
        self.indices.iter().copied()
    }

    /// Replaces an empty range by `0..extent`.
    pub(crate) fn resolve_full(&mut self, extent: usize) {
        if self.indices.is_empty() {
            self.indices.extend(0..extent);
        }
    }
}

impl std::ops::Index<usize> for Range {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.indices[i]
    }
}

impl From<usize> for Range {
    fn from(index: usize) -> Self {
        Self {
            indices: vec![index],
        }
    }
}

impl From<Vec<usize>> for Range {
    fn from(indices: Vec<usize>) -> Self {
        Self { indices }
    }
}

impl From<std::ops::RangeInclusive<usize>> for Range {
    fn from(r: std::ops::RangeInclusive<usize>) -> Self {
        Self {
            indices: r.collect(),
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.indices.is_empty() {
            return write!(f, ":");
        }
        write!(f, "[")?;
        for (i, idx) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{idx}")?;
        }
        write!(f, "]")
    }
}

fn parse_index(part: &str, axis_spec: &str) -> Result<i64, RangeError> {
    if part.contains("end") {
        return Err(RangeError::EndRelativeUnsupported(axis_spec.to_string()));
    }
    part.parse::<i64>()
        .map_err(|_| RangeError::MalformedRangeSpecification(axis_spec.to_string()))
}

/// Parses a single axis-spec without surrounding whitespace.
fn parse_axis_spec(axis_spec: &str) -> Result<Range, RangeError> {
    if axis_spec.is_empty() || axis_spec == ":" {
        return Ok(Range::all());
    }
    let parts: Vec<&str> = axis_spec.split(':').collect();
    match parts.as_slice() {
        [index] => Range::single(parse_index(index, axis_spec)?),
        [begin, end] => Range::span(
            parse_index(begin, axis_spec)?,
            parse_index(end, axis_spec)?,
        ),
        [begin, stride, end] => Range::strided(
            parse_index(begin, axis_spec)?,
            parse_index(stride, axis_spec)?,
            parse_index(end, axis_spec)?,
        ),
        _ => Err(RangeError::MalformedRangeSpecification(
            axis_spec.to_string(),
        )),
    }
}

/// Parses a comma-separated range specification into one [`Range`] per axis.
///
/// # Errors
///
/// - [`RangeError::EmptyRangeSpecification`] for an empty (or all-whitespace) string
/// - [`RangeError::MalformedRangeSpecification`] for more than three colon-separated
///   parts or a token that is not an integer literal
/// - [`RangeError::EndRelativeUnsupported`] for `end`-relative tokens
/// - any error of the range constructors
///
/// # Example
///
/// ```rust
/// use mrtk_tensor::range::parse_range_spec;
///
/// let ranges = parse_range_spec("0:2, :, 3").unwrap();
/// assert_eq!(ranges[0].indices(), &[0, 1, 2]);
/// assert!(ranges[1].is_empty());
/// assert!(ranges[2].is_singleton());
/// ```
pub fn parse_range_spec(spec: &str) -> Result<Vec<Range>, RangeError> {
    let compact: String = spec.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(RangeError::EmptyRangeSpecification);
    }
    compact.split(',').map(parse_axis_spec).collect()
}

impl FromStr for Range {
    type Err = RangeError;

    /// Parses the specification of a single axis.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ranges = parse_range_spec(s)?;
        if ranges.len() != 1 {
            return Err(RangeError::MalformedRangeSpecification(s.to_string()));
        }
        Ok(ranges.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single() -> Result<(), RangeError> {
        let r = Range::single(4)?;
        assert_eq!(r.indices(), &[4]);
        assert!(r.is_singleton());
        assert_eq!(Range::single(-1), Err(RangeError::NegativeIndex(-1)));
        Ok(())
    }

    #[test]
    fn span() -> Result<(), RangeError> {
        assert_eq!(Range::span(0, 2)?.indices(), &[0, 1, 2]);
        assert_eq!(Range::span(3, 3)?.indices(), &[3]);
        assert_eq!(Range::span(-1, 3), Err(RangeError::NegativeIndex(-1)));
        assert_eq!(Range::span(1, -3), Err(RangeError::NegativeIndex(-3)));
        assert_eq!(
            Range::span(4, 2),
            Err(RangeError::InvalidDirection {
                begin: 4,
                stride: 1,
                end: 2
            })
        );
        Ok(())
    }

    #[test]
    fn oversized_range_is_an_error() {
        let huge = 9_223_372_036_854_775_806;
        assert_eq!(
            Range::strided(0, 1, huge),
            Err(RangeError::TooLarge { count: huge as u64 + 1 })
        );
        assert_eq!(
            Range::span(0, i64::MAX),
            Err(RangeError::TooLarge { count: i64::MAX as u64 + 1 })
        );
        assert_eq!(
            parse_range_spec("0:1:9223372036854775806"),
            Err(RangeError::TooLarge { count: huge as u64 + 1 })
        );
    }

    #[test]
    fn strided() -> Result<(), RangeError> {
        assert_eq!(Range::strided(0, 1, 6)?.indices(), &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(Range::strided(2, 1, 3)?.indices(), &[2, 3]);
        assert_eq!(Range::strided(0, 2, 7)?.indices(), &[0, 2, 4, 6]);
        assert_eq!(Range::strided(0, 3, 9)?.indices(), &[0, 3, 6, 9]);
        assert_eq!(Range::strided(9, -3, 0)?.indices(), &[9, 6, 3, 0]);
        assert_eq!(Range::strided(8, -3, 0)?.indices(), &[8, 5, 2]);
        assert_eq!(Range::strided(5, 7, 5)?.indices(), &[5]);
        assert_eq!(Range::strided(0, 0, 4), Err(RangeError::ZeroStride));
        assert_eq!(Range::strided(-2, 1, 4), Err(RangeError::NegativeIndex(-2)));
        assert_eq!(
            Range::strided(4, 1, 0),
            Err(RangeError::InvalidDirection {
                begin: 4,
                stride: 1,
                end: 0
            })
        );
        assert_eq!(
            Range::strided(0, -1, 4),
            Err(RangeError::InvalidDirection {
                begin: 0,
                stride: -1,
                end: 4
            })
        );
        Ok(())
    }

    #[test]
    fn strided_count_is_exact() -> Result<(), RangeError> {
        // counts that a float division would round the wrong way
        for stride in 1..50_i64 {
            for end in 0..200_i64 {
                let r = Range::strided(0, stride, end)?;
                assert_eq!(r.len() as i64, end / stride + 1);
                assert!(*r.indices().last().unwrap_or(&0) as i64 <= end);
            }
        }
        Ok(())
    }

    #[test]
    fn push_accumulates() -> Result<(), RangeError> {
        let mut r = Range::single(7)?;
        r.push_span(0, 1)?.push_single(3)?;
        assert_eq!(r.indices(), &[7, 0, 1, 3]);
        r.reset_span(2, 4)?;
        assert_eq!(r.indices(), &[2, 3, 4]);
        r.reset_strided(4, -2, 0)?;
        assert_eq!(r.indices(), &[4, 2, 0]);
        r.reset_single(1)?;
        assert_eq!(r.indices(), &[1]);
        Ok(())
    }

    #[test]
    fn failed_push_leaves_range_untouched() -> Result<(), RangeError> {
        let mut r = Range::span(0, 1)?;
        assert!(r.push_strided(0, 0, 3).is_err());
        assert_eq!(r.indices(), &[0, 1]);
        Ok(())
    }

    #[test]
    fn conversions() {
        assert_eq!(Range::from(3_usize).indices(), &[3]);
        assert_eq!(Range::from(vec![4, 1, 2]).indices(), &[4, 1, 2]);
        assert_eq!(Range::from(1..=3).indices(), &[1, 2, 3]);
        assert_eq!(Range::from(1..=3)[2], 3);
        assert_eq!(Range::from(1..=3).get(3), None);
        assert_eq!(Range::from(1..=3).iter().sum::<usize>(), 6);
    }

    #[test]
    fn display() -> Result<(), RangeError> {
        assert_eq!(Range::all().to_string(), ":");
        assert_eq!(Range::span(0, 2)?.to_string(), "[0, 1, 2]");
        Ok(())
    }

    #[test]
    fn parse_forms() -> Result<(), RangeError> {
        assert_eq!("0:2".parse::<Range>()?.indices(), &[0, 1, 2]);
        assert_eq!("0:1:6".parse::<Range>()?.indices(), &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!("3".parse::<Range>()?.indices(), &[3]);
        assert_eq!("3:-1:2".parse::<Range>()?.indices(), &[3, 2]);
        assert!(":".parse::<Range>()?.is_empty());
        assert_eq!(" 1 : 3 ".parse::<Range>()?.indices(), &[1, 2, 3]);
        Ok(())
    }

    #[test]
    fn parse_spec_list() -> Result<(), RangeError> {
        let ranges = parse_range_spec("1:1,:")?;
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].indices(), &[1]);
        assert!(ranges[1].is_empty());

        let ranges = parse_range_spec("0,0:2")?;
        assert_eq!(ranges[0].indices(), &[0]);
        assert_eq!(ranges[1].indices(), &[0, 1, 2]);

        let ranges = parse_range_spec(",2")?;
        assert!(ranges[0].is_empty());
        Ok(())
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            parse_range_spec(""),
            Err(RangeError::EmptyRangeSpecification)
        );
        assert_eq!(
            parse_range_spec("   "),
            Err(RangeError::EmptyRangeSpecification)
        );
        assert_eq!(
            parse_range_spec("-1:3"),
            Err(RangeError::NegativeIndex(-1))
        );
        assert_eq!(
            parse_range_spec("0:1:2:3"),
            Err(RangeError::MalformedRangeSpecification("0:1:2:3".into()))
        );
        assert_eq!(
            parse_range_spec("a:3"),
            Err(RangeError::MalformedRangeSpecification("a:3".into()))
        );
        assert_eq!(
            parse_range_spec("1:"),
            Err(RangeError::MalformedRangeSpecification("1:".into()))
        );
        assert_eq!(
            parse_range_spec("6:end-3"),
            Err(RangeError::EndRelativeUnsupported("6:end-3".into()))
        );
        assert_eq!(
            "0,1".parse::<Range>(),
            Err(RangeError::MalformedRangeSpecification("0,1".into()))
        );
    }
}
