// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeBounds;
use std::slice;

use crate::{DetachedView, Indexed, Offset, Result, Storage};

/// A view over a range of elements of a [`Storage`].
///
/// This is the attached form of a view: it holds a handle to its storage, so all operations can
/// be called without passing the storage around. Views created from a view (sub-views, merges,
/// partitions, fields) share the same storage handle. Cloning a view clones the handle, never
/// the elements.
///
/// All positional arguments are relative to the start of the view.
///
/// Use [`detach()`][Self::detach] to obtain the bare offsets of the view (e.g. for compact
/// storage in a large table) and [`DetachedView::attach()`] to turn them back into a `View`.
///
/// # Equality
///
/// `View` implements `PartialEq`, `Eq` and `Hash` in terms of the viewed elements, so views over
/// different storages (or different parts of the same storage) are equal if their contents are.
pub struct View<T, O = usize> {
    view: DetachedView<T, O>,
    storage: Storage<T>,
}

impl<T: Clone> View<T, usize> {
    /// Copies a slice into a new storage and returns a view spanning all of it.
    ///
    /// A slice can never be longer than `usize::MAX`, so with `usize` offsets this cannot fail.
    /// Use [`try_new()`][View::try_new] for other offset types.
    #[must_use]
    pub fn new(elements: &[T]) -> Self {
        let storage = Storage::copied_from_slice(elements);
        let view = DetachedView::new(0, storage.len());
        Self::from_parts(view, storage)
    }
}

impl<T, O: Offset> View<T, O> {
    /// Copies a slice into a new storage and returns a view spanning all of it.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OffsetOverflow`][crate::ErrorKind::OffsetOverflow] if the slice is
    /// longer than the offset type can address.
    pub fn try_new(elements: &[T]) -> Result<Self>
    where
        T: Clone,
    {
        Self::from_storage(Storage::copied_from_slice(elements))
    }

    /// Returns a view spanning an entire storage.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OffsetOverflow`][crate::ErrorKind::OffsetOverflow] if the storage is
    /// longer than the offset type can address.
    pub fn from_storage(storage: Storage<T>) -> Result<Self> {
        let view = DetachedView::from_storage(&storage)?;
        Ok(Self::from_parts(view, storage))
    }

    pub(crate) const fn from_parts(view: DetachedView<T, O>, storage: Storage<T>) -> Self {
        Self { view, storage }
    }

    fn with_view(&self, view: DetachedView<T, O>) -> Self {
        Self::from_parts(view, self.storage.clone())
    }

    /// Splits the view into its offsets and a handle to its storage.
    ///
    /// The view itself remains usable. Use [`into_parts()`][Self::into_parts] to avoid cloning
    /// the storage handle when the view is no longer needed.
    #[must_use]
    pub fn detach(&self) -> (DetachedView<T, O>, Storage<T>) {
        (self.view, self.storage.clone())
    }

    /// Consumes the view, returning its offsets and its storage handle.
    #[must_use]
    pub fn into_parts(self) -> (DetachedView<T, O>, Storage<T>) {
        (self.view, self.storage)
    }

    /// The offsets of the view, without the storage.
    #[must_use]
    pub const fn as_detached(&self) -> &DetachedView<T, O> {
        &self.view
    }

    /// The storage the view points into.
    #[must_use]
    pub const fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    /// The absolute offset of the first element of the view in its storage.
    #[must_use]
    pub const fn start(&self) -> O {
        self.view.start()
    }

    /// The absolute offset one past the last element of the view in its storage.
    #[must_use]
    pub const fn end(&self) -> O {
        self.view.end()
    }

    /// The number of elements in the view.
    #[must_use]
    pub fn len(&self) -> O {
        self.view.len()
    }

    /// Whether the view contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// References the viewed elements as a slice.
    #[must_use]
    pub fn raw(&self) -> &[T] {
        self.view.raw(&self.storage)
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IndexOutOfBounds`][crate::ErrorKind::IndexOutOfBounds] if `index`
    /// is not smaller than the length of the view.
    pub fn at(&self, index: O) -> Result<&T> {
        self.view.at(&self.storage, index)
    }

    /// Returns the element at `index` without checking bounds.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that `index` is smaller than the length of the view.
    #[must_use]
    pub unsafe fn at_unchecked(&self, index: O) -> &T {
        // SAFETY: Forwarding the caller's guarantee. The storage is our own.
        unsafe { self.view.at_unchecked(&self.storage, index) }
    }

    /// Returns the first element of the view.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Empty`][crate::ErrorKind::Empty] if the view is empty.
    pub fn front(&self) -> Result<&T> {
        self.view.front(&self.storage)
    }

    /// Returns the first element of the view without checking that the view is not empty.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that the view is not empty.
    #[must_use]
    pub unsafe fn front_unchecked(&self) -> &T {
        // SAFETY: Forwarding the caller's guarantee. The storage is our own.
        unsafe { self.view.front_unchecked(&self.storage) }
    }

    /// Returns the last element of the view.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Empty`][crate::ErrorKind::Empty] if the view is empty.
    pub fn back(&self) -> Result<&T> {
        self.view.back(&self.storage)
    }

    /// Returns the last element of the view without checking that the view is not empty.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that the view is not empty.
    #[must_use]
    pub unsafe fn back_unchecked(&self) -> &T {
        // SAFETY: Forwarding the caller's guarantee. The storage is our own.
        unsafe { self.view.back_unchecked(&self.storage) }
    }

    /// Returns a sub-view over `[start, end)`.
    ///
    /// Out-of-range requests are clamped: `end` is clamped to the length of the view and `start`
    /// is then clamped to `end`. See [`DetachedView::subview()`].
    #[must_use]
    pub fn subview(&self, start: O, end: O) -> Self {
        self.with_view(self.view.subview(start, end))
    }

    /// Returns a sub-view over a range, with the same clamping rules as
    /// [`subview()`][Self::subview].
    #[must_use]
    pub fn subrange<R>(&self, range: R) -> Self
    where
        R: RangeBounds<O>,
    {
        self.with_view(self.view.subrange(range))
    }

    /// Whether the elements of this view equal the elements of `other`.
    ///
    /// This is the same comparison as `==`.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool
    where
        T: PartialEq,
    {
        self.view.equal(&self.storage, &other.view, &other.storage)
    }

    /// Iterates over the elements of the view.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.view.iter(&self.storage)
    }

    /// Iterates over the elements of the view, each paired with its position relative to the
    /// start of the view.
    pub fn indexed(&self) -> Indexed<'_, T, O> {
        self.view.indexed(&self.storage)
    }

    /// Returns the position of the first element equal to `item`, or the length of the view if
    /// there is no such element.
    #[must_use]
    pub fn index(&self, item: &T) -> O
    where
        T: PartialEq,
    {
        self.view.index(&self.storage, item)
    }

    /// Returns the position of the first element for which `predicate` returns true, or the
    /// length of the view if there is no such element.
    #[must_use]
    pub fn index_func<F>(&self, predicate: F) -> O
    where
        F: FnMut(&T) -> bool,
    {
        self.view.index_func(&self.storage, predicate)
    }

    /// Whether any element of the view equals `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.view.contains(&self.storage, item)
    }

    /// Whether the elements of `prefix` are the leading elements of this view.
    #[must_use]
    pub fn has_prefix(&self, prefix: &Self) -> bool
    where
        T: PartialEq,
    {
        self.view.has_prefix(&self.storage, &prefix.view, &prefix.storage)
    }

    /// Whether the elements of `suffix` are the trailing elements of this view.
    #[must_use]
    pub fn has_suffix(&self, suffix: &Self) -> bool
    where
        T: PartialEq,
    {
        self.view.has_suffix(&self.storage, &suffix.view, &suffix.storage)
    }

    /// Returns the longest leading sub-view of this view whose elements match the leading
    /// elements of `other`.
    #[must_use]
    pub fn longest_common_prefix(&self, other: &Self) -> Self
    where
        T: PartialEq,
    {
        self.with_view(self.view.longest_common_prefix(&self.storage, &other.view, &other.storage))
    }

    /// Returns the longest trailing sub-view of this view whose elements match the trailing
    /// elements of `other`.
    #[must_use]
    pub fn longest_common_suffix(&self, other: &Self) -> Self
    where
        T: PartialEq,
    {
        self.with_view(self.view.longest_common_suffix(&self.storage, &other.view, &other.storage))
    }

    /// Returns the smallest view covering this view and all of `others`.
    ///
    /// All views must share this view's storage. This is not checked - the result always uses
    /// the storage of `self`.
    #[must_use]
    pub fn merge<'a, I>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        T: 'a,
        O: 'a,
    {
        self.with_view(self.view.merge(others.into_iter().map(|other| other.view)))
    }

    /// Returns a view that keeps the end of this view but starts at the smallest start
    /// offset among this view and `others`.
    ///
    /// All views must share this view's storage. This is not checked.
    #[must_use]
    pub fn merge_start<'a, I>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        T: 'a,
        O: 'a,
    {
        self.with_view(self.view.merge_start(others.into_iter().map(|other| other.view)))
    }

    /// Returns a view that keeps the start of this view but ends at the largest end
    /// offset among this view and `others`.
    ///
    /// All views must share this view's storage. This is not checked.
    #[must_use]
    pub fn merge_end<'a, I>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        T: 'a,
        O: 'a,
    {
        self.with_view(self.view.merge_end(others.into_iter().map(|other| other.view)))
    }

    /// Splits the view in two at `index`.
    ///
    /// An `index` past the end yields the whole view followed by an empty view.
    #[must_use]
    pub fn partition(&self, index: O) -> (Self, Self) {
        let (head, tail) = self.view.partition(index);
        (self.with_view(head), self.with_view(tail))
    }

    /// Splits the view into the maximal runs of elements for which `is_separator` returns false.
    ///
    /// See [`DetachedView::fields()`].
    pub fn fields<F>(&self, is_separator: F) -> impl Iterator<Item = Self>
    where
        F: FnMut(&T) -> bool,
    {
        self.view
            .fields(&self.storage, is_separator)
            .map(|field| self.with_view(field))
    }
}

impl<T, O: Offset> Clone for View<T, O> {
    fn clone(&self) -> Self {
        self.with_view(self.view)
    }
}

impl<T: PartialEq, O: Offset> PartialEq for View<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T: Eq, O: Offset> Eq for View<T, O> {}

impl<T: Hash, O: Offset> Hash for View<T, O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw().hash(state);
    }
}

impl<'v, T, O: Offset> IntoIterator for &'v View<T, O> {
    type Item = &'v T;
    type IntoIter = slice::Iter<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, O: Offset> fmt::Debug for View<T, O> {
    #[cfg_attr(coverage_nightly, coverage(off))] // There is no specific API contract here for us to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("start", &self.view.start())
            .field("end", &self.view.end())
            .field("storage", &self.storage)
            .finish()
    }
}
