// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Views over text, one `char` (Unicode scalar value) per element.

use std::fmt::{self, Write};

use crate::{DetachedView, Offset, Result, Storage, View};

impl Storage<char> {
    /// Creates a storage holding the characters of `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        text.chars().collect()
    }
}

impl View<char, usize> {
    /// Creates a view over the characters of `text`.
    ///
    /// Offsets count characters, not bytes.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let storage = Storage::from_text(text);
        let view = DetachedView::new(0, storage.len());
        Self::from_parts(view, storage)
    }
}

impl<O: Offset> View<char, O> {
    /// Creates a view over the characters of `text`, with offsets of type `O`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OffsetOverflow`][crate::ErrorKind::OffsetOverflow] if `text` has
    /// more characters than the offset type can address.
    pub fn try_from_text(text: &str) -> Result<Self> {
        Self::from_storage(Storage::from_text(text))
    }
}

impl<O: Offset> DetachedView<char, O> {
    /// Renders the viewed characters as a `String`.
    ///
    /// # Panics
    ///
    /// Panics if the storage is shorter than the end of the view, which can only happen if the
    /// view is used with a storage it was not cut from.
    #[must_use]
    pub fn render(&self, storage: &Storage<char>) -> String {
        self.iter(storage).collect()
    }
}

impl From<&str> for View<char, usize> {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl<O: Offset> fmt::Display for View<char, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|c| f.write_char(*c))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detach() {
        let view = View::<char, u32>::try_from_text("hello").unwrap();
        let (detached, storage) = view.subview(1, 4).detach();

        assert_eq!(detached.render(&storage), "ell");
        assert_eq!(detached.attach(storage).to_string(), "ell");
    }

    #[test]
    fn offsets_count_characters() {
        let view = View::from_text("žluťoučký kůň");

        assert_eq!(view.len(), 13);
        assert_eq!(view.subview(10, 13).to_string(), "kůň");
        assert_eq!(view.at(1).unwrap(), &'l');
    }

    #[test]
    fn from_str_and_display() {
        let view = View::from("hello world");

        assert_eq!(format!("[{}]", view.subview(6, 11)), "[world]");
        assert_eq!(view.subview(5, 5).to_string(), "");
    }

    #[test]
    fn display_ignores_width() {
        // Characters are written verbatim, formatting flags do not apply.
        let view = View::from_text("ab");
        assert_eq!(format!("{view:>5}"), "ab");
    }

    #[test]
    fn text_storage() {
        let storage = Storage::from_text("abc");
        assert_eq!(storage.as_slice(), &['a', 'b', 'c']);
    }

    #[test]
    fn fields_over_text() {
        let view = View::from_text("  foo1;bar2,baz3...");

        let fields: Vec<String> = view
            .fields(|c| !c.is_alphabetic() && !c.is_numeric())
            .map(|field| field.to_string())
            .collect();

        assert_eq!(fields, vec!["foo1", "bar2", "baz3"]);
    }

    #[test]
    fn text_too_long_for_offsets() {
        let text = "x".repeat(256);
        View::<char, u8>::try_from_text(&text).unwrap_err();
    }
}
