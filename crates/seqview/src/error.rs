// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// The result type for fallible view operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error returned by a fallible view operation.
///
/// Only a few operations can fail:
///
/// * Checked element access ([`View::at()`][crate::View::at]) with an index outside the view.
/// * Checked access to the first or last element of an empty view.
/// * Construction of a view over more elements than its [`Offset`][crate::Offset] type can address.
///
/// Sub-range requests never fail (they are clamped) and searches report absence with a sentinel
/// value, so neither produces an error.
///
/// # Examples
///
/// ```
/// use seqview::{ErrorKind, View};
///
/// let view = View::new(&[1, 2, 3]);
/// let error = view.at(7).unwrap_err();
///
/// assert_eq!(error.kind(), &ErrorKind::IndexOutOfBounds { index: 7, len: 3 });
/// ```
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] ErrorKind);

/// The specific reason a view operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A relative index was not smaller than the view length.
    #[error("index {index} is out of view bounds (view length is {len})")]
    IndexOutOfBounds {
        /// The requested index, relative to the view start.
        index: usize,
        /// The length of the view.
        len: usize,
    },

    /// The first or last element of an empty view was requested.
    #[error("view is empty")]
    Empty,

    /// The sequence is too long to be addressed by the offset type of the view.
    #[error("sequence of {len} elements cannot be addressed by an offset type with maximum value {max}")]
    OffsetOverflow {
        /// The number of elements in the sequence.
        len: usize,
        /// The maximum value of the offset type.
        max: u128,
    },
}

impl Error {
    pub(crate) const fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self(ErrorKind::IndexOutOfBounds { index, len })
    }

    pub(crate) const fn empty() -> Self {
        Self(ErrorKind::Empty)
    }

    pub(crate) const fn offset_overflow(len: usize, max: u128) -> Self {
        Self(ErrorKind::OffsetOverflow { len, max })
    }

    /// Returns the specific reason for the failure.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.0
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: std::error::Error, Send, Sync);

    #[test]
    fn display_index_out_of_bounds() {
        insta::assert_snapshot!(
            Error::index_out_of_bounds(4, 3).to_string(),
            @"index 4 is out of view bounds (view length is 3)"
        );
    }

    #[test]
    fn display_empty() {
        insta::assert_snapshot!(Error::empty().to_string(), @"view is empty");
    }

    #[test]
    fn display_offset_overflow() {
        insta::assert_snapshot!(
            Error::offset_overflow(300, 255).to_string(),
            @"sequence of 300 elements cannot be addressed by an offset type with maximum value 255"
        );
    }

    #[test]
    fn kind_round_trips_through_from() {
        let error = Error::from(ErrorKind::Empty);
        assert_eq!(error.kind(), &ErrorKind::Empty);
    }
}
