// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for the invariants that hold across all view operations.

use seqview::{DetachedView, Storage, View};

fn sample() -> View<u8, u16> {
    View::try_new(b"the quick brown fox jumps over the lazy dog").unwrap()
}

#[test]
fn subview_length_matches_request() {
    let view = sample().subview(4, 30);
    let len = view.len();

    for start in 0..=len {
        for end in start..=len {
            let sub = view.subview(start, end);

            assert_eq!(sub.len(), end - start);
            assert_eq!(sub.raw(), &view.raw()[usize::from(start)..usize::from(end)]);
        }
    }

    assert_eq!(view.subview(0, len), view);
    assert_eq!(view.subview(0, len).as_detached(), view.as_detached());
}

#[test]
fn subview_never_escapes_parent() {
    let view = sample().subview(10, 20);

    for start in [0, 5, 10, 11, 200, u16::MAX] {
        for end in [0, 3, 10, 15, 300, u16::MAX] {
            let sub = view.subview(start, end);

            assert!(sub.start() >= view.start());
            assert!(sub.end() <= view.end());
            assert!(sub.start() <= sub.end());
        }
    }
}

#[test]
fn partition_then_merge_restores_view() {
    let view = sample().subview(3, 17);

    for index in (0..=view.len() + 5).chain([u16::MAX]) {
        let (head, tail) = view.partition(index);

        assert_eq!(head.len() + tail.len(), view.len());
        assert_eq!(head.end(), tail.start());

        let merged = head.merge([&tail]);
        assert_eq!(merged, view);
        assert_eq!(merged.as_detached(), view.as_detached());
    }
}

#[test]
fn detach_attach_round_trip() {
    let view = sample().subview(4, 9);

    let (detached, storage) = view.detach();
    let again = detached.attach(storage);

    assert_eq!(again.start(), view.start());
    assert_eq!(again.end(), view.end());
    assert_eq!(again, view);
    assert!(Storage::ptr_eq(again.storage(), view.storage()));
}

#[test]
fn equal_is_reflexive_symmetric_and_content_based() {
    let a = View::new(&[3, 1, 4, 1, 5, 9, 2, 6]);
    let b = View::new(&[0, 0, 1, 5, 9, 0]);

    let x = a.subview(3, 6);
    let y = b.subview(2, 5);

    assert!(x.equal(&x));
    assert!(x.equal(&y));
    assert!(y.equal(&x));
    assert!(!Storage::ptr_eq(x.storage(), y.storage()));
}

#[test]
fn index_agrees_with_contains_and_at() {
    let view = sample();

    for item in b"abcdefghijklmnopqrstuvwxyz !?".iter() {
        let index = view.index(item);

        if view.contains(item) {
            assert!(index < view.len());
            assert_eq!(view.at(index).unwrap(), item);
            assert!(!view.subview(0, index).contains(item));
        } else {
            assert_eq!(index, view.len());
        }
    }
}

#[test]
fn fields_cover_everything_but_separators() {
    let view = View::from_text(",,alpha,beta,,gamma,");
    let is_separator = |c: &char| *c == ',';

    let fields: Vec<_> = view.fields(is_separator).collect();

    assert_eq!(fields.iter().map(ToString::to_string).collect::<Vec<_>>(), vec!["alpha", "beta", "gamma"]);

    let mut previous_end = view.start();
    for field in &fields {
        assert!(!field.is_empty());
        assert!(field.start() >= previous_end);

        // Everything between runs is a separator, nothing inside a run is.
        let gap = view.subview(previous_end - view.start(), field.start() - view.start());
        assert!(gap.iter().all(is_separator));
        assert!(!field.iter().any(is_separator));

        previous_end = field.end();
    }

    let trailing = view.subview(previous_end - view.start(), view.len());
    assert!(trailing.iter().all(is_separator));
}

#[test]
fn detached_views_are_storage_independent_values() {
    let storage = Storage::from_text("one two three");
    let whole = DetachedView::<char, u32>::from_storage(&storage).unwrap();

    // A compact table of spans, kept apart from the storage.
    let table: Vec<DetachedView<char, u32>> = whole.fields(&storage, |c| c.is_whitespace()).collect();
    assert_eq!(table, vec![DetachedView::new(0, 3), DetachedView::new(4, 7), DetachedView::new(8, 13)]);

    let words: Vec<String> = table.iter().map(|span| span.render(&storage)).collect();
    assert_eq!(words, vec!["one", "two", "three"]);
}
