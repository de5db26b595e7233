//! Attribute modifiers and stacking rules.

use std::sync::atomic::{AtomicU64, Ordering};

use gameplay_tags::{Tag, TagSet};

/// Process-unique modifier identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierId(u64);

impl ModifierId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Opaque identity of whatever applied a modifier (an actor, an item, an
/// effect instance). Only compared, never dereferenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceKey(pub u64);

/// How a modifier combines with an existing one that shares its stack tag.
///
/// The policy of the *incoming* modifier decides.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StackingPolicy {
    /// Sum values into the existing modifier, up to its `max_stacks`.
    #[default]
    Add,
    /// Keep whichever value is strictly higher.
    Max,
    /// Keep whichever value is strictly lower.
    Min,
    /// Overwrite the existing modifier and reset its stack count.
    Replace,
    /// Keep modifiers independent.
    None,
}

/// A single adjustment to an attribute.
///
/// Flat modifiers are summed onto the base value; percentage modifiers
/// (`0.1` = +10%) scale the result afterwards.
///
/// # Example
/// ```
/// # use ability_system::{Modifier, StackingPolicy, SourceKey};
/// # use gameplay_tags::Tag;
/// let poison = Modifier::flat(-5.0)
///     .with_source(SourceKey(42))
///     .with_tag(Tag::new("debuff.poison").unwrap())
///     .stacking(Tag::new("stack.poison").unwrap(), StackingPolicy::Add)
///     .with_max_stacks(3);
///
/// assert_eq!(poison.stack_count, 1);
/// assert!(!poison.is_percentage);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    #[cfg_attr(feature = "serde", serde(skip, default = "ModifierId::next"))]
    pub id: ModifierId,
    pub value: f32,
    pub is_percentage: bool,
    pub source: Option<SourceKey>,
    pub tags: TagSet,
    /// Modifiers sharing a stack tag combine per `stacking_policy`.
    pub stack_tag: Option<Tag>,
    pub stacking_policy: StackingPolicy,
    pub stack_count: u32,
    /// Hard cap for [`StackingPolicy::Add`]; `0` means unlimited.
    pub max_stacks: u32,
}

impl Modifier {
    pub fn new(value: f32, is_percentage: bool) -> Self {
        Self {
            id: ModifierId::next(),
            value,
            is_percentage,
            source: None,
            tags: TagSet::new(),
            stack_tag: None,
            stacking_policy: StackingPolicy::default(),
            stack_count: 1,
            max_stacks: 0,
        }
    }

    /// Additive modifier.
    pub fn flat(value: f32) -> Self {
        Self::new(value, false)
    }

    /// Multiplicative modifier (`0.25` = +25%).
    pub fn percent(value: f32) -> Self {
        Self::new(value, true)
    }

    pub fn with_source(mut self, source: SourceKey) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.add(tag);
        self
    }

    pub fn with_tags(mut self, tags: &TagSet) -> Self {
        self.tags.append(tags);
        self
    }

    /// Joins the stack identified by `stack_tag`.
    pub fn stacking(mut self, stack_tag: Tag, policy: StackingPolicy) -> Self {
        self.stack_tag = Some(stack_tag);
        self.stacking_policy = policy;
        self
    }

    pub fn with_max_stacks(mut self, max_stacks: u32) -> Self {
        self.max_stacks = max_stacks;
        self
    }

    /// Hierarchical tag check.
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.has(tag)
    }

    /// Hierarchical check against any tag of `tags`.
    pub fn has_any_tags(&self, tags: &TagSet) -> bool {
        self.tags.has_any(tags)
    }

    pub fn in_stack(&self, stack_tag: &Tag) -> bool {
        self.stack_tag.as_ref() == Some(stack_tag)
    }

    /// Folds `incoming` into `self` according to the incoming policy.
    ///
    /// Returns `Ok(true)` if `self` changed, `Ok(false)` if the incoming
    /// modifier was rejected, and `Err(incoming)` when the policy keeps the
    /// two independent.
    pub(crate) fn absorb(&mut self, incoming: Modifier) -> Result<bool, Modifier> {
        match incoming.stacking_policy {
            StackingPolicy::Add => {
                if self.max_stacks > 0 && self.stack_count >= self.max_stacks {
                    return Ok(false);
                }
                self.stack_count += 1;
                self.value += incoming.value;
                self.tags.append(&incoming.tags);
                Ok(true)
            }
            StackingPolicy::Max => Ok(self.replace_if(incoming, |new, old| new > old)),
            StackingPolicy::Min => Ok(self.replace_if(incoming, |new, old| new < old)),
            StackingPolicy::Replace => {
                *self = incoming;
                self.stack_count = 1;
                Ok(true)
            }
            StackingPolicy::None => Err(incoming),
        }
    }

    fn replace_if(&mut self, incoming: Modifier, wins: impl Fn(f32, f32) -> bool) -> bool {
        if !wins(incoming.value, self.value) {
            return false;
        }
        self.value = incoming.value;
        self.source = incoming.source;
        self.tags = incoming.tags;
        self.stack_count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(text: &str) -> Tag {
        Tag::new(text).unwrap()
    }

    #[test]
    fn ids_are_unique() {
        let a = Modifier::flat(1.0);
        let b = Modifier::flat(1.0);

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn add_policy_respects_existing_cap() {
        let mut existing = Modifier::flat(10.0)
            .stacking(tag("stack.rage"), StackingPolicy::Add)
            .with_max_stacks(2);

        let incoming = || Modifier::flat(10.0).stacking(tag("stack.rage"), StackingPolicy::Add);

        assert_eq!(existing.absorb(incoming()), Ok(true));
        assert_eq!(existing.absorb(incoming()), Ok(false));
        assert_eq!(existing.stack_count, 2);
        assert_eq!(existing.value, 20.0);
    }

    #[test]
    fn max_policy_only_takes_strictly_greater() {
        let mut existing = Modifier::flat(5.0).stacking(tag("stack.aura"), StackingPolicy::Max);

        let equal = Modifier::flat(5.0)
            .with_source(SourceKey(9))
            .stacking(tag("stack.aura"), StackingPolicy::Max);
        assert_eq!(existing.absorb(equal), Ok(false));
        assert_eq!(existing.source, None);

        let higher = Modifier::flat(8.0)
            .with_source(SourceKey(9))
            .stacking(tag("stack.aura"), StackingPolicy::Max);
        assert_eq!(existing.absorb(higher), Ok(true));
        assert_eq!(existing.value, 8.0);
        assert_eq!(existing.source, Some(SourceKey(9)));
        assert_eq!(existing.stack_count, 2);
    }

    #[test]
    fn none_policy_hands_modifier_back() {
        let mut existing = Modifier::flat(5.0).stacking(tag("stack.aura"), StackingPolicy::None);
        let incoming = Modifier::flat(3.0).stacking(tag("stack.aura"), StackingPolicy::None);
        let id = incoming.id;

        let returned = existing.absorb(incoming).unwrap_err();
        assert_eq!(returned.id, id);
        assert_eq!(existing.value, 5.0);
    }

    #[test]
    fn policy_parses_from_snake_case() {
        assert_eq!("replace".parse::<StackingPolicy>(), Ok(StackingPolicy::Replace));
        assert_eq!(StackingPolicy::Max.to_string(), "max");
    }
}
