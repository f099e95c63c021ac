// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::iter::FusedIterator;
use std::slice;

use crate::Offset;

/// Iterates over the elements of a view together with their position relative to the view start.
///
/// Returned by [`View::indexed()`][crate::View::indexed] and
/// [`DetachedView::indexed()`][crate::DetachedView::indexed].
#[derive(Debug)]
pub struct Indexed<'s, T, O> {
    elements: slice::Iter<'s, T>,

    // Relative position of the next element yielded from the front.
    front: O,
    // Relative position one past the next element yielded from the back.
    back: O,
}

impl<'s, T, O: Offset> Indexed<'s, T, O> {
    pub(crate) fn new(elements: &'s [T], len: O) -> Self {
        Self {
            elements: elements.iter(),
            front: O::zero(),
            back: len,
        }
    }
}

impl<T, O: Offset> Clone for Indexed<'_, T, O> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            front: self.front,
            back: self.back,
        }
    }
}

impl<'s, T, O: Offset> Iterator for Indexed<'s, T, O> {
    type Item = (O, &'s T);

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.elements.next()?;
        let index = self.front;
        self.front = self.front + O::one();
        Some((index, element))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

impl<T, O: Offset> DoubleEndedIterator for Indexed<'_, T, O> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let element = self.elements.next_back()?;
        self.back = self.back - O::one();
        Some((self.back, element))
    }
}

impl<T, O: Offset> ExactSizeIterator for Indexed<'_, T, O> {}

impl<T, O: Offset> FusedIterator for Indexed<'_, T, O> {}
