// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Keeping a compact table of word spans apart from the text they point into.
//!
//! 1. We load a document into shared storage, one element per character.
//! 2. We split it into words and keep only the detached spans, 8 bytes each with 32-bit offsets.
//! 3. We answer a few questions about the words by reattaching spans to the storage on demand.

use seqview::{DetachedView, Storage, View};

const DOCUMENT: &str = "Příliš žluťoučký kůň úpěl ďábelské ódy. \
                        The quick brown fox jumps over the lazy dog, then the dog sleeps.";

fn main() -> Result<(), seqview::Error> {
    let document = View::<char, u32>::try_from_text(DOCUMENT)?;

    let table = build_span_table(&document);
    let storage = document.storage().clone();

    // The view itself is no longer needed. The table plus the storage is everything we keep.
    drop(document);

    println!(
        "Indexed {} words using {} bytes of spans over {} characters of text.",
        table.len(),
        table.len() * size_of::<DetachedView<char, u32>>(),
        storage.len()
    );

    print_longest_word(&table, &storage);
    print_shared_prefixes(&table, &storage);
    print_first_word_containing(&table, &storage, 'z');

    Ok(())
}

fn build_span_table(document: &View<char, u32>) -> Vec<DetachedView<char, u32>> {
    document
        .fields(|c| !c.is_alphanumeric())
        .map(|word| *word.as_detached())
        .collect()
}

fn print_longest_word(table: &[DetachedView<char, u32>], storage: &Storage<char>) {
    let Some(longest) = table.iter().max_by_key(|span| span.len()) else {
        println!("The document has no words.");
        return;
    };

    println!(
        "Longest word is '{}' at characters {}..{}.",
        longest.render(storage),
        longest.start(),
        longest.end()
    );
}

fn print_shared_prefixes(table: &[DetachedView<char, u32>], storage: &Storage<char>) {
    for pair in table.windows(2) {
        let [left, right] = pair else {
            continue;
        };

        let common = left.longest_common_prefix(storage, right, storage);
        if common.len() >= 2 {
            println!(
                "'{}' and '{}' share the prefix '{}'.",
                left.render(storage),
                right.render(storage),
                common.render(storage)
            );
        }
    }
}

fn print_first_word_containing(table: &[DetachedView<char, u32>], storage: &Storage<char>, needle: char) {
    let found = table.iter().find(|span| span.contains(storage, &needle));

    match found {
        Some(span) => {
            // Reattaching is cheap: it only clones the storage handle.
            let word = span.attach(storage.clone());
            println!("First word containing '{needle}' is '{word}', at offset {} within it.", word.index(&needle));
        }
        None => println!("No word contains '{needle}'."),
    }
}
