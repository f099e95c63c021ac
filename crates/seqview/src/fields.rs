// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::iter::FusedIterator;

use crate::{DetachedView, Indexed, Offset};

/// Iterates over the maximal runs of non-separator elements of a view.
///
/// Returned by [`DetachedView::fields()`]. Each run is yielded as a sub-view of the original view,
/// in left-to-right order. Runs are never empty - consecutive separators, as well as separators at
/// either end of the view, produce no runs.
pub struct Fields<'s, T, O, F> {
    view: DetachedView<T, O>,
    elements: Indexed<'s, T, O>,
    is_separator: F,
}

impl<'s, T, O, F> Fields<'s, T, O, F>
where
    O: Offset,
    F: FnMut(&T) -> bool,
{
    pub(crate) fn new(view: DetachedView<T, O>, elements: Indexed<'s, T, O>, is_separator: F) -> Self {
        Self {
            view,
            elements,
            is_separator,
        }
    }
}

impl<T, O, F> Iterator for Fields<'_, T, O, F>
where
    O: Offset,
    F: FnMut(&T) -> bool,
{
    type Item = DetachedView<T, O>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = loop {
            let (index, element) = self.elements.next()?;
            if !(self.is_separator)(element) {
                break index;
            }
        };

        let end = loop {
            match self.elements.next() {
                Some((index, element)) if (self.is_separator)(element) => break index,
                Some(_) => {}
                None => break self.view.len(),
            }
        };

        Some(self.view.subview(start, end))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // At most one run per two remaining elements, rounded up.
        let remaining = self.elements.len();
        (0, Some(remaining.div_ceil(2)))
    }
}

impl<T, O, F> FusedIterator for Fields<'_, T, O, F>
where
    O: Offset,
    F: FnMut(&T) -> bool,
{
}

impl<T, O: Offset, F> fmt::Debug for Fields<'_, T, O, F> {
    #[cfg_attr(coverage_nightly, coverage(off))] // There is no specific API contract here for us to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fields")
            .field("view", &self.view)
            .field("remaining", &self.elements.len())
            .finish_non_exhaustive()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::Storage;

    fn fields_of(text: &str) -> Vec<String> {
        let storage = Storage::<char>::from_text(text);
        let view = DetachedView::<char, u32>::from_storage(&storage).unwrap();

        view.fields(&storage, |c| !c.is_alphanumeric())
            .map(|field| field.render(&storage))
            .collect()
    }

    #[test]
    fn splits_on_separators() {
        assert_eq!(fields_of("  foo1;bar2,baz3..."), vec!["foo1", "bar2", "baz3"]);
    }

    #[test]
    fn no_separators() {
        assert_eq!(fields_of("word"), vec!["word"]);
    }

    #[test]
    fn only_separators() {
        assert!(fields_of(" ;,. ").is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(fields_of("").is_empty());
    }

    #[test]
    fn single_element_runs() {
        assert_eq!(fields_of("a b c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn runs_are_relative_to_a_subview() {
        let (view, storage) = DetachedView::<i32>::from_slice(&[0, 1, 0, 2, 3, 0, 4, 0]).unwrap();
        let inner = view.subview(2, 7);

        let runs: Vec<_> = inner.fields(&storage, |x| *x == 0).collect();

        assert_eq!(runs, vec![DetachedView::new(3, 5), DetachedView::new(6, 7)]);
        assert_eq!(runs[0].raw(&storage), &[2, 3]);
        assert_eq!(runs[1].raw(&storage), &[4]);
    }

    #[test]
    fn size_hint_is_an_upper_bound() {
        let (view, storage) = DetachedView::<u8>::from_slice(&[1, 0, 1, 0, 1]).unwrap();
        let fields = view.fields(&storage, |x| *x == 0);

        assert_eq!(fields.size_hint(), (0, Some(3)));
        assert_eq!(fields.count(), 3);
    }
}
