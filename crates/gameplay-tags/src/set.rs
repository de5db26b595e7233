//! Insertion-ordered tag sets.

use crate::Tag;

/// An ordered set of tags.
///
/// Iteration follows insertion order. Adding a tag that is already present is
/// a no-op. Sets are small in practice (a handful of tags per ability or
/// effect), so membership is a linear scan.
///
/// Two families of queries are provided:
/// - `*_exact` compare tags by full string
/// - the plain variants accept descendants: a set holding `effect.burn.small`
///   answers `has(effect.burn)` with `true`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Tag>", into = "Vec<Tag>")
)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Creates a set holding a single tag.
    pub fn single(tag: Tag) -> Self {
        Self { tags: vec![tag] }
    }

    /// Returns true if `tag` is a member.
    pub fn has_exact(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Returns true if any member is `tag` or one of its descendants.
    pub fn has(&self, tag: &Tag) -> bool {
        self.tags.iter().any(|t| t.matches(tag))
    }

    /// Returns true if at least one tag of `other` is a member.
    ///
    /// An empty `other` never matches.
    pub fn has_any_exact(&self, other: &TagSet) -> bool {
        other.iter().any(|t| self.has_exact(t))
    }

    /// Hierarchical version of [`TagSet::has_any_exact`].
    pub fn has_any(&self, other: &TagSet) -> bool {
        other.iter().any(|t| self.has(t))
    }

    /// Returns true if every tag of `other` is a member.
    ///
    /// An empty `other` always matches.
    pub fn has_all_exact(&self, other: &TagSet) -> bool {
        other.iter().all(|t| self.has_exact(t))
    }

    /// Hierarchical version of [`TagSet::has_all_exact`].
    pub fn has_all(&self, other: &TagSet) -> bool {
        other.iter().all(|t| self.has(t))
    }

    /// Inserts `tag`, returning false if it was already present.
    pub fn add(&mut self, tag: Tag) -> bool {
        if self.has_exact(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes `tag`, returning false if it was absent.
    pub fn remove(&mut self, tag: &Tag) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    /// Inserts every tag of `other` that is not yet present.
    pub fn append(&mut self, other: &TagSet) {
        for tag in other.iter() {
            self.add(tag.clone());
        }
    }

    /// Removes every tag of `other`, returning the number removed.
    pub fn remove_all(&mut self, other: &TagSet) -> usize {
        let before = self.tags.len();
        self.tags.retain(|t| !other.has_exact(t));
        before - self.tags.len()
    }

    /// Removes every tag.
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = TagSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Tag> for TagSet {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        for tag in iter {
            self.add(tag);
        }
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl IntoIterator for TagSet {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

impl From<Vec<Tag>> for TagSet {
    fn from(tags: Vec<Tag>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<Tag> {
    fn from(set: TagSet) -> Self {
        set.tags
    }
}

impl From<Tag> for TagSet {
    fn from(tag: Tag) -> Self {
        Self::single(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(text: &str) -> Tag {
        Tag::new(text).unwrap()
    }

    fn set(tags: &[&str]) -> TagSet {
        tags.iter().map(|t| tag(t)).collect()
    }

    #[test]
    fn duplicate_add_is_noop() {
        let mut tags = TagSet::new();

        assert!(tags.add(tag("ability.dash")));
        assert!(!tags.add(tag("ability.dash")));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let tags = set(&["c.one", "a.two", "b.three", "a.two"]);
        let order: Vec<&str> = tags.iter().map(Tag::as_str).collect();

        assert_eq!(order, vec!["c.one", "a.two", "b.three"]);
    }

    #[test]
    fn exact_queries_ignore_hierarchy() {
        let tags = set(&["effect.burn.small", "effect.stun"]);

        assert!(tags.has_exact(&tag("effect.stun")));
        assert!(!tags.has_exact(&tag("effect.burn")));
        assert!(tags.has(&tag("effect.burn")));
        assert!(tags.has(&tag("effect")));
    }

    #[test]
    fn any_and_all_queries() {
        let tags = set(&["ability.dash", "ability.jump"]);

        assert!(tags.has_any_exact(&set(&["ability.dash", "ability.roll"])));
        assert!(!tags.has_any_exact(&set(&["ability.roll"])));
        assert!(!tags.has_any_exact(&TagSet::new()));

        assert!(tags.has_all_exact(&set(&["ability.jump", "ability.dash"])));
        assert!(!tags.has_all_exact(&set(&["ability.jump", "ability.roll"])));
        assert!(tags.has_all_exact(&TagSet::new()));

        assert!(tags.has_all(&set(&["ability"])));
        assert!(tags.has_any(&set(&["ability", "effect"])));
    }

    #[test]
    fn append_and_remove_all() {
        let mut tags = set(&["a.one"]);
        tags.append(&set(&["a.one", "a.two", "a.three"]));
        assert_eq!(tags.len(), 3);

        let removed = tags.remove_all(&set(&["a.one", "a.three", "a.four"]));
        assert_eq!(removed, 2);
        assert_eq!(tags, set(&["a.two"]));

        assert!(tags.remove(&tag("a.two")));
        assert!(!tags.remove(&tag("a.two")));
        assert!(tags.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_and_validates_strings() {
        let tags: TagSet = serde_json::from_str(r#"["ability.dash", "ability.jump"]"#).unwrap();
        assert_eq!(tags, set(&["ability.dash", "ability.jump"]));

        let bad: Result<TagSet, _> = serde_json::from_str(r#"["ability..dash"]"#);
        assert!(bad.is_err());
    }
}
