//! Deterministic ordering of posting lists and words.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::{Posting, WordPosting};

/// Count descending, then document id ascending.
pub fn posting_order(a: &Posting, b: &Posting) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.document_id.cmp(&b.document_id))
}

/// Sort one posting list in rank order.
pub fn rank_postings(postings: &mut [Posting]) {
    postings.sort_unstable_by(posting_order);
}

/// Whether a posting list is strictly in rank order (which also rules out
/// duplicate document ids).
pub fn is_ranked(postings: &[Posting]) -> bool {
    postings
        .windows(2)
        .all(|w| posting_order(&w[0], &w[1]) == Ordering::Less)
}

/// Rank every group and order the words ascending.
pub fn rank(groups: HashMap<String, Vec<Posting>>) -> Vec<WordPosting> {
    let mut words: Vec<WordPosting> = groups
        .into_iter()
        .map(|(word, mut postings)| {
            rank_postings(&mut postings);
            WordPosting { word, postings }
        })
        .collect();
    words.sort_unstable_by(|a, b| a.word.cmp(&b.word));
    words
}
