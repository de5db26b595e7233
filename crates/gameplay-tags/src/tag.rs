//! A single hierarchical tag.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{TagError, TagSet};

/// A dotted hierarchical identifier such as `ability.movement.dash`.
///
/// Equality, ordering and hashing use the full string. Hierarchy is only
/// consulted by [`Tag::matches`] and the non-exact [`TagSet`] queries.
///
/// # Example
/// ```
/// # use gameplay_tags::Tag;
/// let dash: Tag = "ability.movement.dash".parse().unwrap();
/// let movement: Tag = "ability.movement".parse().unwrap();
///
/// assert!(dash.matches(&movement));
/// assert!(!movement.matches(&dash));
/// assert!(!dash.matches_exact(&movement));
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Tag(Arc<str>);

impl Tag {
    /// Segment separator.
    pub const SEPARATOR: char = '.';

    /// Parses and validates a tag.
    pub fn new(text: impl AsRef<str>) -> Result<Self, TagError> {
        let text = text.as_ref();
        if text.is_empty() {
            return Err(TagError::Empty);
        }
        if text.chars().any(char::is_whitespace) {
            return Err(TagError::Whitespace {
                tag: text.to_owned(),
            });
        }
        if text.split(Self::SEPARATOR).any(str::is_empty) {
            return Err(TagError::EmptySegment {
                tag: text.to_owned(),
            });
        }
        Ok(Self(Arc::from(text)))
    }

    /// Full dotted form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates the segments from root to leaf.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(Self::SEPARATOR)
    }

    /// Number of segments (`a.b.c` has depth 3).
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// The immediate parent, or `None` for a root tag.
    pub fn parent(&self) -> Option<Tag> {
        self.0
            .rsplit_once(Self::SEPARATOR)
            .map(|(parent, _)| Self(Arc::from(parent)))
    }

    /// Returns true if `self` equals `other` or is a descendant of it.
    pub fn matches(&self, other: &Tag) -> bool {
        match self.0.strip_prefix(other.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with(Self::SEPARATOR),
            None => false,
        }
    }

    /// Returns true if both tags are identical.
    #[inline]
    pub fn matches_exact(&self, other: &Tag) -> bool {
        self == other
    }

    /// Returns true if this tag matches any member of `set` hierarchically.
    pub fn matches_any(&self, set: &TagSet) -> bool {
        set.iter().any(|candidate| self.matches(candidate))
    }

    /// Returns true if this tag is exactly a member of `set`.
    pub fn matches_any_exact(&self, set: &TagSet) -> bool {
        set.has_exact(self)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.0)
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Tag {
    type Error = TagError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Tag {
    type Error = TagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0.as_ref().to_owned()
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
