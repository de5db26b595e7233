//! Modifiable numeric attributes.
//!
//! An [`Attribute`] keeps a base value, an optional cap, and two ordered
//! modifier lists. The current value is cached and recomputed after every
//! mutation:
//!
//! ```text
//! current = (base + Σ flat) × Π (1 + percent)      // percent in list order
//! current = min(current, max)                      // only when max > 0
//! ```
mod modifier;
mod operation;

pub use modifier::{Modifier, ModifierId, SourceKey, StackingPolicy};
pub use operation::AttributeOperation;

use gameplay_tags::{Tag, TagSet};

/// A base value plus stacked modifiers.
///
/// # Example
/// ```
/// # use ability_system::{Attribute, Modifier};
/// let mut health = Attribute::capped(100.0, 150.0);
/// health.add_modifier(Modifier::flat(60.0));
/// health.add_modifier(Modifier::percent(0.5));
///
/// // (100 + 60) × 1.5 = 240, clamped last
/// assert_eq!(health.current_value(), 150.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    base_value: f32,
    /// `<= 0` means uncapped.
    max_value: f32,
    current_value: f32,
    flat_modifiers: Vec<Modifier>,
    percent_modifiers: Vec<Modifier>,
}

impl Attribute {
    /// Uncapped attribute.
    pub fn new(base_value: f32) -> Self {
        Self::capped(base_value, 0.0)
    }

    pub fn capped(base_value: f32, max_value: f32) -> Self {
        Self {
            base_value,
            max_value,
            current_value: base_value,
            flat_modifiers: Vec::new(),
            percent_modifiers: Vec::new(),
        }
    }

    /// Resets the base value and drops every modifier.
    ///
    /// `Some(max)` replaces the cap (`<= 0` removes it); `None` keeps it.
    pub fn initialize(&mut self, base_value: f32, max_value: Option<f32>) {
        self.base_value = base_value;
        if let Some(max_value) = max_value {
            self.max_value = max_value;
        }
        self.flat_modifiers.clear();
        self.percent_modifiers.clear();
        self.refresh();
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    /// Inserts or stacks a modifier. Returns false if a stack rule rejected it.
    pub fn add_modifier(&mut self, modifier: Modifier) -> bool {
        let list = if modifier.is_percentage {
            &mut self.percent_modifiers
        } else {
            &mut self.flat_modifiers
        };
        let changed = Self::insert(list, modifier);
        self.refresh();
        changed
    }

    fn insert(list: &mut Vec<Modifier>, modifier: Modifier) -> bool {
        let existing = match modifier.stack_tag.as_ref() {
            Some(stack_tag) => list.iter().position(|m| m.in_stack(stack_tag)),
            None => None,
        };

        let Some(index) = existing else {
            list.push(modifier);
            return true;
        };

        match list[index].absorb(modifier) {
            Ok(changed) => changed,
            Err(independent) => {
                list.push(independent);
                true
            }
        }
    }

    pub fn remove_modifiers_by_source(&mut self, source: SourceKey) -> bool {
        self.remove_where(|m| m.source == Some(source))
    }

    pub fn remove_modifier_by_id(&mut self, id: ModifierId) -> bool {
        self.remove_where(|m| m.id == id)
    }

    /// Removes every modifier tagged with `tag` or one of its descendants.
    pub fn remove_modifiers_by_tag(&mut self, tag: &Tag) -> bool {
        self.remove_where(|m| m.has_tag(tag))
    }

    pub fn remove_modifiers_by_tags(&mut self, tags: &TagSet) -> bool {
        self.remove_where(|m| m.has_any_tags(tags))
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&Modifier) -> bool) -> bool {
        let before = self.flat_modifiers.len() + self.percent_modifiers.len();
        self.flat_modifiers.retain(|m| !predicate(m));
        self.percent_modifiers.retain(|m| !predicate(m));
        let removed = self.flat_modifiers.len() + self.percent_modifiers.len() != before;
        if removed {
            self.refresh();
        }
        removed
    }

    /// Drops one stack from the first modifier in `stack_tag`'s stack.
    ///
    /// Flat modifiers are searched before percentage ones. An `Add` stack keeps
    /// its per-stack value: `value / old_count × new_count`.
    pub fn remove_stack(&mut self, stack_tag: &Tag) -> bool {
        let removed = Self::pop_stack(&mut self.flat_modifiers, stack_tag)
            || Self::pop_stack(&mut self.percent_modifiers, stack_tag);
        if removed {
            self.refresh();
        }
        removed
    }

    fn pop_stack(list: &mut Vec<Modifier>, stack_tag: &Tag) -> bool {
        let Some(index) = list.iter().position(|m| m.in_stack(stack_tag)) else {
            return false;
        };

        let modifier = &mut list[index];
        let old_count = modifier.stack_count;
        modifier.stack_count = old_count.saturating_sub(1);

        if modifier.stack_count == 0 {
            list.remove(index);
        } else if modifier.stacking_policy == StackingPolicy::Add {
            modifier.value = modifier.value / old_count as f32 * modifier.stack_count as f32;
        }
        true
    }

    // ========================================================================
    // Base value
    // ========================================================================

    pub fn set_base_value(&mut self, base_value: f32) {
        self.base_value = base_value;
        self.refresh();
    }

    /// Applies `operation` to the base value.
    ///
    /// Returns false and leaves the attribute untouched on division by zero.
    pub fn apply_operation(&mut self, operation: AttributeOperation, magnitude: f32) -> bool {
        match operation.apply(self.base_value, magnitude) {
            Some(value) => {
                self.set_base_value(value);
                true
            }
            None => {
                tracing::warn!(%operation, magnitude, "rejected attribute operation");
                false
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn calculate_value(&self) -> f32 {
        let flat: f32 = self.flat_modifiers.iter().map(|m| m.value).sum();
        let value = self
            .percent_modifiers
            .iter()
            .fold(self.base_value + flat, |acc, m| acc * (1.0 + m.value));

        if self.is_capped() && value > self.max_value {
            self.max_value
        } else {
            value
        }
    }

    /// Net contribution of all modifiers: `current - base`.
    pub fn modifier_value(&self) -> f32 {
        self.current_value - self.base_value
    }

    /// Stack count of the first modifier in `stack_tag`'s stack, or 0.
    pub fn stack_count(&self, stack_tag: &Tag) -> u32 {
        self.modifiers()
            .find(|m| m.in_stack(stack_tag))
            .map_or(0, |m| m.stack_count)
    }

    pub fn modifiers_with_tag(&self, tag: &Tag) -> Vec<Modifier> {
        self.modifiers().filter(|m| m.has_tag(tag)).cloned().collect()
    }

    pub fn modifiers_with_any_tags(&self, tags: &TagSet) -> Vec<Modifier> {
        self.modifiers()
            .filter(|m| m.has_any_tags(tags))
            .cloned()
            .collect()
    }

    /// Flat modifiers followed by percentage modifiers.
    pub fn modifiers(&self) -> impl Iterator<Item = &Modifier> {
        self.flat_modifiers.iter().chain(self.percent_modifiers.iter())
    }

    pub fn base_value(&self) -> f32 {
        self.base_value
    }

    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub fn current_value(&self) -> f32 {
        self.current_value
    }

    pub fn is_capped(&self) -> bool {
        self.max_value > 0.0
    }

    pub fn flat_modifiers(&self) -> &[Modifier] {
        &self.flat_modifiers
    }

    pub fn percent_modifiers(&self) -> &[Modifier] {
        &self.percent_modifiers
    }

    fn refresh(&mut self) {
        self.current_value = self.calculate_value();
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::new(0.0)
    }
}
