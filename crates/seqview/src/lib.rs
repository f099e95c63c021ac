// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Zero-copy views over shared immutable sequences.
//!
//! A view is a half-open range `[start, end)` of offsets into a backing buffer. Creating
//! sub-views, comparing, searching, splitting and merging views never copies the elements
//! of the buffer - only the offsets change.
//!
//! This is the kind of indirection that lexers, parsers and interning tables build on: a token
//! is just a pair of offsets into the source text, cheap to store by the million and cheap to
//! compare when needed.
//!
//! # Attached and Detached Views
//!
//! Views come in two shapes:
//!
//! * [`View`] is an *attached* view. It holds a handle to its [`Storage`] and exposes the full
//!   operation set directly: indexing, iteration, comparison, searching, splitting and merging.
//! * [`DetachedView`] is a *detached* view. It is a bare pair of offsets with no reference to
//!   any storage, so it is `Copy`, `Send + Sync` regardless of the element type and as small as
//!   the chosen [`Offset`] type permits. Every operation that reads elements takes the storage
//!   as an explicit argument.
//!
//! Moving between the two is free: [`View::detach()`] splits a view into its offsets and a
//! storage handle, [`DetachedView::attach()`] puts them back together.
//!
//! ```
//! use seqview::View;
//!
//! let view = View::new(&[0, 1, 2, 3, 4, 5, 6]);
//!
//! let middle = view.subview(1, 4);
//! assert_eq!(middle.raw(), &[1, 2, 3]);
//!
//! // Detached views are plain offsets - store them wherever you like.
//! let (span, storage) = middle.detach();
//! assert_eq!((span.start(), span.end()), (1, 4));
//!
//! // And bring them back to life later.
//! let again = span.attach(storage);
//! assert_eq!(again, middle);
//! ```
//!
//! # Storage Identity
//!
//! Offsets are only meaningful against the exact [`Storage`] they were cut from. Two storages
//! with identical contents are still different storages. The crate does not tag storages with an
//! identity and does not check that a detached view is re-attached to its original storage - doing
//! otherwise is a contract violation on the part of the caller. Pairing a view with a storage
//! shorter than the view's end offset panics when elements are accessed; pairing it with an
//! unrelated storage of sufficient length silently reads unrelated elements.
//!
//! Use [`Storage::ptr_eq()`] when you need to know whether two handles refer to the same storage.
//!
//! # Clamping
//!
//! Sub-range requests never fail. [`View::subview()`] and [`View::partition()`] clamp their
//! arguments to the nearest valid (possibly empty) range, so offsets derived from arithmetic on
//! other views can be passed in without prior validation.
//!
//! ```
//! use seqview::View;
//!
//! let view = View::new(&[0, 1, 2, 3, 4, 5, 6]);
//!
//! assert!(view.subview(10, 13).is_empty());
//! assert!(view.subview(2, 1).is_empty());
//! assert_eq!(view.subview(5, 100).raw(), &[5, 6]);
//! ```
//!
//! # Offset Width
//!
//! Both view types are generic over the [`Offset`] type used to store positions, defaulting to
//! `usize`. Narrower widths (e.g. `u32`) halve the size of a [`DetachedView`], which matters when
//! storing large tables of spans. Constructing a view over more elements than the offset type can
//! address fails with [`ErrorKind::OffsetOverflow`].
//!
//! ```
//! use seqview::{DetachedView, View};
//!
//! let view = View::<u8, u32>::try_new(b"hello world")?;
//! assert_eq!(size_of::<DetachedView<u8, u32>>(), 8);
//! # Ok::<(), seqview::Error>(())
//! ```
//!
//! # Text
//!
//! Views over `char` have a small text adapter: they can be created from a `&str` and render
//! back into text via [`Display`][std::fmt::Display].
//!
//! ```
//! use seqview::View;
//!
//! let text = View::from_text("hello");
//! let (span, storage) = text.subview(1, 4).detach();
//!
//! assert_eq!(span.render(&storage), "ell");
//! assert_eq!(span.attach(storage).to_string(), "ell");
//! ```
//!
//! # Features
//!
//! - **`serde`** - Adds serialization and deserialization support for [`DetachedView`] via
//!   [serde](https://serde.rs/). A detached view is serialized as the two-element sequence
//!   `[start, end]`.


mod detached;
mod error;
mod fields;
mod indexed;
mod offset;
mod storage;
mod text;
mod view;

pub use detached::DetachedView;
pub use error::{Error, ErrorKind, Result};
pub use fields::Fields;
pub use indexed::Indexed;
pub use offset::Offset;
pub use storage::Storage;
pub use view::View;
