//! Documents as read from the corpus.

/// One corpus document: a unique identifier and its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// The placeholder substituted for a malformed input line.
    /// Its text tokenizes to nothing, so it never reaches the index.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.text.is_empty()
    }
}
