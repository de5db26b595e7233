//! Errors produced while parsing tag text.

/// Reasons a string cannot be turned into a [`Tag`](crate::Tag).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    /// The input was empty.
    #[error("tag must not be empty")]
    Empty,

    /// Two separators in a row, or a leading/trailing separator.
    #[error("tag `{tag}` contains an empty segment")]
    EmptySegment { tag: String },

    /// Whitespace anywhere in the input.
    #[error("tag `{tag}` contains whitespace")]
    Whitespace { tag: String },
}
