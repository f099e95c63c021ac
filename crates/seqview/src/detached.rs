// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Bound, RangeBounds};

use tracing::{Level, event};

use crate::offset::{from_len, max_as_u128, to_index, to_usize_saturating};
use crate::{Error, Fields, Indexed, Offset, Result, Storage, View};

/// A view that does not hold a reference to its storage.
///
/// A detached view is a pair of offsets `[start, end)` into some [`Storage`]. It is `Copy`,
/// `Send` and `Sync` regardless of the element type, making it suitable for storing in bulk
/// (e.g. as the spans of a token table) or for serialization. Every operation that needs to read
/// elements takes the storage as an explicit argument.
///
/// The offsets returned by [`start()`][Self::start] and [`end()`][Self::end] are absolute
/// positions in the storage. All positional arguments accepted by the methods of this type are
/// relative to the start of the view.
///
/// Use [`attach()`][Self::attach] to pair the view with its storage again, yielding a [`View`].
///
/// # Storage identity
///
/// The offsets are only meaningful for the storage the view was cut from. Passing a different
/// storage to any method is a contract violation that is not detected: a storage shorter than
/// [`end()`][Self::end] causes a panic, any other storage silently yields unrelated elements.
///
/// # Equality
///
/// The `PartialEq` implementation of this type compares offsets, not contents - it answers
/// "is this the same span?". Use [`equal()`][Self::equal] to compare the viewed elements.
pub struct DetachedView<T, O = usize> {
    start: O,
    end: O,

    // The view never owns a `T`, so it is `Send + Sync` for any `T`.
    _element: PhantomData<fn() -> T>,
}

impl<T, O: Offset> DetachedView<T, O> {
    /// Creates a view from a pair of absolute offsets.
    ///
    /// If `start` is greater than `end`, it is clamped down to `end`, yielding an empty view.
    /// No check is made against any storage - the caller is responsible for the offsets being in
    /// bounds of the storage the view is later used with.
    #[must_use]
    pub fn new(start: O, end: O) -> Self {
        Self::from_ordered(start.min(end), end)
    }

    /// Creates an empty view at offset zero.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_ordered(O::zero(), O::zero())
    }

    const fn from_ordered(start: O, end: O) -> Self {
        Self {
            start,
            end,
            _element: PhantomData,
        }
    }

    /// Copies a slice into a new storage and returns a view spanning all of it,
    /// together with the storage.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OffsetOverflow`][crate::ErrorKind::OffsetOverflow] if the slice is
    /// longer than the offset type can address.
    pub fn from_slice(elements: &[T]) -> Result<(Self, Storage<T>)>
    where
        T: Clone,
    {
        let storage = Storage::copied_from_slice(elements);
        let view = Self::from_storage(&storage)?;
        Ok((view, storage))
    }

    /// Creates a view spanning an entire storage.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OffsetOverflow`][crate::ErrorKind::OffsetOverflow] if the storage is
    /// longer than the offset type can address.
    pub fn from_storage(storage: &Storage<T>) -> Result<Self> {
        let len = storage.len();

        let Some(end) = from_len::<O>(len) else {
            let max = max_as_u128::<O>();
            event!(Level::DEBUG, len, max, "storage too long for view offset type");
            return Err(Error::offset_overflow(len, max));
        };

        Ok(Self::from_ordered(O::zero(), end))
    }

    /// Pairs the view with a storage, yielding an attached [`View`].
    ///
    /// The storage must be the one the view was cut from. This is not checked, other than by a
    /// debug assertion that the view does not extend past the end of the storage.
    #[must_use]
    pub fn attach(self, storage: Storage<T>) -> View<T, O> {
        debug_assert!(
            to_index(self.end) <= storage.len(),
            "view ends at {:?} but storage length is {}",
            self.end,
            storage.len()
        );

        View::from_parts(self, storage)
    }

    /// The absolute offset of the first element of the view.
    #[must_use]
    pub const fn start(&self) -> O {
        self.start
    }

    /// The absolute offset one past the last element of the view.
    #[must_use]
    pub const fn end(&self) -> O {
        self.end
    }

    /// The number of elements in the view.
    #[must_use]
    pub fn len(&self) -> O {
        self.end - self.start
    }

    /// Whether the view contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// References the viewed elements as a slice of the storage.
    ///
    /// # Panics
    ///
    /// Panics if the storage is shorter than the end of the view, which can only happen if the
    /// view is used with a storage it was not cut from.
    #[must_use]
    pub fn raw<'s>(&self, storage: &'s Storage<T>) -> &'s [T] {
        &storage.as_slice()[to_index(self.start)..to_index(self.end)]
    }

    /// Returns the element at `index`, relative to the start of the view.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IndexOutOfBounds`][crate::ErrorKind::IndexOutOfBounds] if `index`
    /// is not smaller than the length of the view.
    pub fn at<'s>(&self, storage: &'s Storage<T>, index: O) -> Result<&'s T> {
        let len = self.len();
        if index >= len {
            return Err(Error::index_out_of_bounds(to_usize_saturating(index), to_usize_saturating(len)));
        }

        Ok(&self.raw(storage)[to_index(index)])
    }

    /// Returns the element at `index`, relative to the start of the view, without checking bounds.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `index` is smaller than the length of the view and that
    /// `storage` is the storage the view was cut from.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Risk of UB if this returns the wrong element.
    pub unsafe fn at_unchecked<'s>(&self, storage: &'s Storage<T>, index: O) -> &'s T {
        // SAFETY: The caller guarantees that `start + index` is in bounds of the view,
        // and the view is in bounds of the storage.
        unsafe { storage.as_slice().get_unchecked(to_index(self.start + index)) }
    }

    /// Returns the first element of the view.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Empty`][crate::ErrorKind::Empty] if the view is empty.
    pub fn front<'s>(&self, storage: &'s Storage<T>) -> Result<&'s T> {
        self.raw(storage).first().ok_or_else(Error::empty)
    }

    /// Returns the first element of the view without checking that the view is not empty.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that the view is not empty and that `storage` is the storage
    /// the view was cut from.
    #[must_use]
    pub unsafe fn front_unchecked<'s>(&self, storage: &'s Storage<T>) -> &'s T {
        // SAFETY: Forwarding the caller's guarantees - index 0 is in bounds of a non-empty view.
        unsafe { self.at_unchecked(storage, O::zero()) }
    }

    /// Returns the last element of the view.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Empty`][crate::ErrorKind::Empty] if the view is empty.
    pub fn back<'s>(&self, storage: &'s Storage<T>) -> Result<&'s T> {
        self.raw(storage).last().ok_or_else(Error::empty)
    }

    /// Returns the last element of the view without checking that the view is not empty.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that the view is not empty and that `storage` is the storage
    /// the view was cut from.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Risk of UB if this returns the wrong element.
    pub unsafe fn back_unchecked<'s>(&self, storage: &'s Storage<T>) -> &'s T {
        // SAFETY: Forwarding the caller's guarantees - `end - 1` is in bounds of a non-empty view.
        unsafe { storage.as_slice().get_unchecked(to_index(self.end - O::one())) }
    }

    /// Returns a sub-view over `[start, end)`, relative to the start of this view.
    ///
    /// Out-of-range requests are clamped rather than rejected: `end` is clamped to the length of
    /// the view and `start` is then clamped to `end`. The result is always a valid (possibly empty)
    /// range within this view.
    ///
    /// `view.subview(0, view.len())` is the same span as `view`.
    #[must_use]
    pub fn subview(&self, start: O, end: O) -> Self {
        let end = end.min(self.len());
        let start = start.min(end);

        Self::from_ordered(self.start + start, self.start + end)
    }

    /// Returns a sub-view over a range relative to the start of this view.
    ///
    /// This accepts any Rust range syntax (`a..b`, `a..=b`, `..b`, `a..`, `..`) and applies the
    /// same clamping rules as [`subview()`][Self::subview].
    #[must_use]
    pub fn subrange<R>(&self, range: R) -> Self
    where
        R: RangeBounds<O>,
    {
        let after = |x: O| x.checked_add(&O::one()).unwrap_or_else(O::max_value);

        let start = match range.start_bound() {
            Bound::Included(&x) => x,
            Bound::Excluded(&x) => after(x),
            Bound::Unbounded => O::zero(),
        };

        let end = match range.end_bound() {
            Bound::Included(&x) => after(x),
            Bound::Excluded(&x) => x,
            Bound::Unbounded => self.len(),
        };

        self.subview(start, end)
    }

    /// Whether the elements of this view equal the elements of `other`.
    ///
    /// The views may come from different storages - only the contents are compared.
    #[must_use]
    pub fn equal(&self, storage: &Storage<T>, other: &Self, other_storage: &Storage<T>) -> bool
    where
        T: PartialEq,
    {
        self.raw(storage) == other.raw(other_storage)
    }

    /// Iterates over the elements of the view.
    pub fn iter<'s>(&self, storage: &'s Storage<T>) -> std::slice::Iter<'s, T> {
        self.raw(storage).iter()
    }

    /// Iterates over the elements of the view, each paired with its position relative to the
    /// start of the view.
    pub fn indexed<'s>(&self, storage: &'s Storage<T>) -> Indexed<'s, T, O> {
        Indexed::new(self.raw(storage), self.len())
    }

    /// Returns the position of the first element equal to `item`, relative to the start of the
    /// view, or the length of the view if there is no such element.
    #[must_use]
    pub fn index(&self, storage: &Storage<T>, item: &T) -> O
    where
        T: PartialEq,
    {
        self.index_func(storage, |x| x == item)
    }

    /// Returns the position of the first element for which `predicate` returns true, relative
    /// to the start of the view, or the length of the view if there is no such element.
    ///
    /// Elements are tested in order and the scan stops at the first match.
    #[must_use]
    pub fn index_func<F>(&self, storage: &Storage<T>, mut predicate: F) -> O
    where
        F: FnMut(&T) -> bool,
    {
        self.indexed(storage)
            .find(|(_, x)| predicate(*x))
            .map_or_else(|| self.len(), |(index, _)| index)
    }

    /// Whether any element of the view equals `item`.
    #[must_use]
    pub fn contains(&self, storage: &Storage<T>, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.raw(storage).contains(item)
    }

    /// Whether the elements of `prefix` are the leading elements of this view.
    #[must_use]
    pub fn has_prefix(&self, storage: &Storage<T>, prefix: &Self, prefix_storage: &Storage<T>) -> bool
    where
        T: PartialEq,
    {
        self.len() >= prefix.len() && self.raw(storage).starts_with(prefix.raw(prefix_storage))
    }

    /// Whether the elements of `suffix` are the trailing elements of this view.
    #[must_use]
    pub fn has_suffix(&self, storage: &Storage<T>, suffix: &Self, suffix_storage: &Storage<T>) -> bool
    where
        T: PartialEq,
    {
        self.len() >= suffix.len() && self.raw(storage).ends_with(suffix.raw(suffix_storage))
    }

    /// Returns the longest leading sub-view of this view whose elements match the leading
    /// elements of `other`.
    ///
    /// If every compared element matches, the result is as long as the shorter of the two views.
    #[must_use]
    pub fn longest_common_prefix(&self, storage: &Storage<T>, other: &Self, other_storage: &Storage<T>) -> Self
    where
        T: PartialEq,
    {
        let common = self.len().min(other.len());

        let len = self
            .indexed(storage)
            .zip(other.iter(other_storage))
            .find(|((_, a), b)| a != b)
            .map_or(common, |((index, _), _)| index);

        self.subview(O::zero(), len)
    }

    /// Returns the longest trailing sub-view of this view whose elements match the trailing
    /// elements of `other`.
    ///
    /// If every compared element matches, the result is as long as the shorter of the two views.
    #[must_use]
    pub fn longest_common_suffix(&self, storage: &Storage<T>, other: &Self, other_storage: &Storage<T>) -> Self
    where
        T: PartialEq,
    {
        let len = self.len();
        let common = len.min(other.len());

        let start = self
            .indexed(storage)
            .rev()
            .zip(other.iter(other_storage).rev())
            .find(|((_, a), b)| a != b)
            .map_or(len - common, |((index, _), _)| index + O::one());

        self.subview(start, len)
    }

    /// Returns the smallest view covering this view and all of `others`.
    ///
    /// All views must have been cut from the same storage. This is not checked.
    #[must_use]
    pub fn merge<I>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        others
            .into_iter()
            .fold(*self, |merged, other| Self::from_ordered(merged.start.min(other.start), merged.end.max(other.end)))
    }

    /// Returns a view that keeps the end of this view but starts at the smallest start
    /// offset among this view and `others`.
    ///
    /// All views must have been cut from the same storage. This is not checked.
    #[must_use]
    pub fn merge_start<I>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let start = others.into_iter().fold(self.start, |start, other| start.min(other.start));
        Self::from_ordered(start, self.end)
    }

    /// Returns a view that keeps the start of this view but ends at the largest end
    /// offset among this view and `others`.
    ///
    /// All views must have been cut from the same storage. This is not checked.
    #[must_use]
    pub fn merge_end<I>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let end = others.into_iter().fold(self.end, |end, other| end.max(other.end));
        Self::from_ordered(self.start, end)
    }

    /// Splits the view in two at `index`, relative to the start of the view.
    ///
    /// Equivalent to `(self.subview(0, index), self.subview(index, self.len()))`, so an `index`
    /// past the end yields the whole view followed by an empty view.
    #[must_use]
    pub fn partition(&self, index: O) -> (Self, Self) {
        (self.subview(O::zero(), index), self.subview(index, self.len()))
    }

    /// Splits the view into the maximal runs of elements for which `is_separator` returns false.
    ///
    /// Runs are yielded lazily, in left-to-right order, as sub-views of this view. Separator
    /// elements are not part of any run and no empty runs are yielded.
    ///
    /// `is_separator` must be a pure function of its argument: no guarantees are made about
    /// the order or number of times it is called for each element.
    pub fn fields<'s, F>(&self, storage: &'s Storage<T>, is_separator: F) -> Fields<'s, T, O, F>
    where
        F: FnMut(&T) -> bool,
    {
        Fields::new(*self, self.indexed(storage), is_separator)
    }
}

impl<T, O: Offset> Default for DetachedView<T, O> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, O: Offset> Clone for DetachedView<T, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, O: Offset> Copy for DetachedView<T, O> {}

impl<T, O: Offset> PartialEq for DetachedView<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<T, O: Offset> Eq for DetachedView<T, O> {}

impl<T, O: Offset> Hash for DetachedView<T, O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl<T, O: Offset> fmt::Debug for DetachedView<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetachedView")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

/// Serializes the view as the two-element sequence `[start, end]`.
#[cfg(feature = "serde")]
impl<T, O> serde_core::Serialize for DetachedView<T, O>
where
    O: Offset + serde_core::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde_core::Serializer,
    {
        serde_core::Serialize::serialize(&(self.start, self.end), serializer)
    }
}

/// Deserializes the view from the two-element sequence `[start, end]`, clamping `start` to `end`.
#[cfg(feature = "serde")]
impl<'de, T, O> serde_core::Deserialize<'de> for DetachedView<T, O>
where
    O: Offset + serde_core::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde_core::Deserializer<'de>,
    {
        let (start, end) = <(O, O) as serde_core::Deserialize<'de>>::deserialize(deserializer)?;
        Ok(Self::new(start, end))
    }
}
