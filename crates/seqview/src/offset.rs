// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Debug;
use std::hash::Hash;

use num_traits::{AsPrimitive, NumCast, PrimInt, Unsigned};

/// An unsigned integer type used to store view positions.
///
/// Implemented for every primitive unsigned integer (`u8`, `u16`, `u32`, `u64`, `u128` and
/// `usize`). Pick the narrowest type that can address the longest sequence you intend to view -
/// a [`DetachedView`][crate::DetachedView] is exactly two offsets wide.
pub trait Offset: PrimInt + Unsigned + AsPrimitive<usize> + Hash + Debug + Send + Sync + 'static {}

impl<O> Offset for O where O: PrimInt + Unsigned + AsPrimitive<usize> + Hash + Debug + Send + Sync + 'static {}

/// Converts an offset into a slice index.
///
/// Offsets of views cut from a storage never exceed the storage length, which is `usize`-bounded.
#[inline]
pub(crate) fn to_index<O: Offset>(offset: O) -> usize {
    offset.as_()
}

/// Converts a sequence length into an offset, or `None` if the offset type is too narrow.
#[inline]
pub(crate) fn from_len<O: Offset>(len: usize) -> Option<O> {
    <O as NumCast>::from(len)
}

/// Widens an offset for use in diagnostics, saturating on the (theoretical) overflow.
pub(crate) fn to_usize_saturating<O: Offset>(offset: O) -> usize {
    offset.to_usize().unwrap_or(usize::MAX)
}

/// The largest value of the offset type, widened for use in diagnostics.
pub(crate) fn max_as_u128<O: Offset>() -> u128 {
    O::max_value().to_u128().unwrap_or(u128::MAX)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(u8: Offset);
    assert_impl_all!(u16: Offset);
    assert_impl_all!(u32: Offset);
    assert_impl_all!(u64: Offset);
    assert_impl_all!(u128: Offset);
    assert_impl_all!(usize: Offset);

    #[test]
    fn from_len_fits() {
        assert_eq!(from_len::<u8>(255), Some(255_u8));
        assert_eq!(from_len::<u16>(256), Some(256_u16));
        assert_eq!(from_len::<usize>(usize::MAX), Some(usize::MAX));
    }

    #[test]
    fn from_len_overflows() {
        assert_eq!(from_len::<u8>(256), None);
        assert_eq!(from_len::<u16>(70_000), None);
    }

    #[test]
    fn to_index_widens() {
        assert_eq!(to_index(200_u8), 200);
        assert_eq!(to_index(65_535_u16), 65_535);
        assert_eq!(to_index(7_u128), 7);
    }

    #[test]
    fn diagnostics_helpers() {
        assert_eq!(to_usize_saturating(5_u32), 5);
        assert_eq!(to_usize_saturating(u128::MAX), usize::MAX);
        assert_eq!(max_as_u128::<u8>(), 255);
        assert_eq!(max_as_u128::<u128>(), u128::MAX);
    }
}
