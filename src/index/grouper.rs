//! Re-keys count entries by word.

use std::collections::HashMap;

use crate::types::{CountEntry, Posting};

/// Collect every (document, count) pair sharing a word. Order within a group
/// is unspecified; ranking happens afterwards.
pub fn group_by_word<I>(entries: I) -> HashMap<String, Vec<Posting>>
where
    I: IntoIterator<Item = CountEntry>,
{
    let mut groups: HashMap<String, Vec<Posting>> = HashMap::new();
    for entry in entries {
        groups.entry(entry.word).or_default().push(Posting {
            document_id: entry.document_id,
            count: entry.count,
        });
    }
    groups
}
