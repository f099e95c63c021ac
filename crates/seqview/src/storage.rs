// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use tracing::{Level, event};

/// The immutable backing buffer that views point into.
///
/// A storage owns its elements and never changes after construction. Cloning a storage clones
/// the handle, not the elements - all clones refer to the same buffer, which is released when the
/// last handle is dropped.
///
/// # Identity
///
/// View offsets are only meaningful against the storage they were cut from. Two storages with
/// the same contents are still different storages, which is why `Storage` does not implement
/// `PartialEq`. Use [`ptr_eq()`][Self::ptr_eq] to check whether two handles refer to the same
/// buffer.
pub struct Storage<T> {
    elements: Arc<[T]>,
}

impl<T> Storage<T> {
    /// Creates a storage by copying the contents of a slice.
    ///
    /// The caller's slice is never referenced afterwards.
    #[must_use]
    pub fn copied_from_slice(elements: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_arc(Arc::from(elements))
    }

    fn from_arc(elements: Arc<[T]>) -> Self {
        event!(Level::TRACE, len = elements.len(), "backing storage created");
        Self { elements }
    }

    /// The number of elements in the storage.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the storage contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at `index`, or `None` if the index is past the end of the storage.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// References all elements of the storage.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Whether two handles refer to the same storage.
    ///
    /// This compares identity, not contents.
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.elements, &other.elements)
    }
}

impl<T> Clone for Storage<T> {
    fn clone(&self) -> Self {
        Self {
            elements: Arc::clone(&self.elements),
        }
    }
}

impl<T> Deref for Storage<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for Storage<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> From<Vec<T>> for Storage<T> {
    /// Takes ownership of the vector's elements. No element is copied or cloned.
    fn from(elements: Vec<T>) -> Self {
        Self::from_arc(Arc::from(elements))
    }
}

impl<T> From<Box<[T]>> for Storage<T> {
    fn from(elements: Box<[T]>) -> Self {
        Self::from_arc(Arc::from(elements))
    }
}

impl<T> FromIterator<T> for Storage<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_arc(iter.into_iter().collect())
    }
}

impl<T> fmt::Debug for Storage<T> {
    #[cfg_attr(coverage_nightly, coverage(off))] // There is no specific API contract here for us to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("ptr", &Arc::as_ptr(&self.elements).cast::<T>())
            .field("len", &self.len())
            .finish()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};
    use tracing_test::traced_test;

    use super::*;

    // Immutable after construction, so shareable whenever the elements are.
    assert_impl_all!(Storage<u8>: Send, Sync);
    assert_not_impl_any!(Storage<Rc<u8>>: Send, Sync);
    assert_not_impl_any!(Storage<u8>: PartialEq);

    #[test]
    fn copied_from_slice_copies() {
        let mut source = vec![1, 2, 3];
        let storage = Storage::copied_from_slice(&source);

        source[0] = 100;

        assert_eq!(storage.as_slice(), &[1, 2, 3]);
        assert_eq!(storage.len(), 3);
        assert!(!storage.is_empty());
    }

    #[test]
    fn from_vec_does_not_clone_elements() {
        struct CountsClones<'a>(&'a Cell<usize>);

        impl Clone for CountsClones<'_> {
            fn clone(&self) -> Self {
                self.0.set(self.0.get() + 1);
                Self(self.0)
            }
        }

        let clones = Cell::new(0);
        let storage = Storage::from(vec![CountsClones(&clones), CountsClones(&clones)]);
        let handle = storage.clone();

        assert_eq!(handle.len(), 2);
        assert_eq!(clones.get(), 0);
    }

    #[test]
    fn get_checks_bounds() {
        let storage = Storage::from(vec!['a', 'b']);

        assert_eq!(storage.get(1), Some(&'b'));
        assert_eq!(storage.get(2), None);
    }

    #[test]
    fn clone_shares_identity() {
        let storage = Storage::from(vec![1, 2, 3]);
        let handle = storage.clone();

        assert!(Storage::ptr_eq(&storage, &handle));
    }

    #[test]
    fn equal_contents_are_different_storages() {
        let a = Storage::from(vec![1, 2, 3]);
        let b = Storage::copied_from_slice(&[1, 2, 3]);

        assert_eq!(a.as_slice(), b.as_slice());
        assert!(!Storage::ptr_eq(&a, &b));
    }

    #[test]
    fn from_iter_and_box() {
        let collected: Storage<u32> = (0..4).collect();
        assert_eq!(&*collected, &[0, 1, 2, 3]);

        let boxed = Storage::from(vec![5_u32].into_boxed_slice());
        assert_eq!(boxed.as_ref(), &[5]);
    }

    #[test]
    fn empty_storage() {
        let storage = Storage::<u8>::from(Vec::new());

        assert!(storage.is_empty());
        assert_eq!(storage.len(), 0);
    }

    #[traced_test]
    #[test]
    fn construction_is_logged() {
        _ = Storage::copied_from_slice(&[1, 2, 3, 4]);

        assert!(logs_contain("backing storage created"));
        assert!(logs_contain("len=4"));
    }
}
