//! Catalog entry shapes.
//!
//! Definitions mirror the runtime specs but stay plain data: they are
//! `Clone`, carry no hooks, and name their behavior through payload enums
//! that the [`crate::ContentLibrary`] turns into hook objects.

use ability_system::{
    AbilityCost, AbilityFlags, AbilitySpec, Attribute, AttributeOperation, EffectDuration,
    EffectMagnitude, EffectSpec, Modifier, SourceKey, StackingPolicy,
};
use gameplay_tags::{Tag, TagSet};
use serde::{Deserialize, Serialize};

use crate::payload::{self, ActivateOnApply, ApplyOperation, FinishOnActivate, GrantModifier};

fn default_level() -> u32 {
    1
}

/// Authored form of a [`Modifier`].
///
/// ```ron
/// (value: 0.25, percentage: true, stack: Some("stack.haste"), stacking: Max)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierDefinition {
    pub value: f32,
    #[serde(default)]
    pub percentage: bool,
    #[serde(default)]
    pub tags: TagSet,
    #[serde(default)]
    pub stack: Option<Tag>,
    #[serde(default)]
    pub stacking: StackingPolicy,
    /// `0` means unlimited.
    #[serde(default)]
    pub max_stacks: u32,
}

impl ModifierDefinition {
    /// Builds a fresh modifier (new id) attributed to `source`.
    pub fn to_modifier(&self, source: SourceKey) -> Modifier {
        let mut modifier = Modifier::new(self.value, self.percentage)
            .with_source(source)
            .with_tags(&self.tags)
            .with_max_stacks(self.max_stacks);
        if let Some(stack) = &self.stack {
            modifier = modifier.stacking(stack.clone(), self.stacking);
        }
        modifier
    }
}

/// Behavior attached to an ability. Payloads run in listed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AbilityPayload {
    /// Applies a catalog effect on activation. With `remove_on_end` the
    /// effect is removed again when the ability finishes or is cancelled.
    ApplyEffect {
        effect: Tag,
        #[serde(default)]
        remove_on_end: bool,
    },
    /// Grants a modifier for as long as the ability is active.
    GrantModifier {
        attribute: Tag,
        modifier: ModifierDefinition,
    },
    /// Applies an arithmetic change to an attribute's base on activation.
    Operation {
        attribute: Tag,
        operation: AttributeOperation,
        magnitude: f32,
    },
    /// Finishes the ability as soon as it activates, starting its cooldown.
    /// Payloads listed after this one never see the activation.
    FinishImmediately,
}

/// Behavior attached to an effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectPayload {
    /// Grants a modifier for as long as the effect is applied.
    GrantModifier {
        attribute: Tag,
        modifier: ModifierDefinition,
    },
    /// Activates an ability when the effect is applied.
    ActivateAbility { ability: Tag },
}

/// Catalog entry for an ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub tag: Tag,
    /// Unlocked by [`crate::ContentLibrary::populate`].
    #[serde(default)]
    pub granted: bool,
    #[serde(default)]
    pub blocking_tags: TagSet,
    #[serde(default)]
    pub cancel_tags: TagSet,
    #[serde(default)]
    pub cooldown: f32,
    #[serde(default)]
    pub flags: AbilityFlags,
    #[serde(default)]
    pub input_action: Option<Tag>,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub cost: Option<AbilityCost>,
    #[serde(default)]
    pub payloads: Vec<AbilityPayload>,
}

impl AbilityDefinition {
    /// Effects referenced by `ApplyEffect` payloads.
    pub fn referenced_effects(&self) -> impl Iterator<Item = &Tag> {
        self.payloads.iter().filter_map(|payload| match payload {
            AbilityPayload::ApplyEffect { effect, .. } => Some(effect),
            _ => None,
        })
    }

    /// Spec without hooks.
    pub(crate) fn base_spec(&self) -> AbilitySpec {
        let mut spec = AbilitySpec::new(self.tag.clone())
            .with_blocking_tags(self.blocking_tags.clone())
            .with_cancel_tags(self.cancel_tags.clone())
            .with_cooldown(self.cooldown)
            .with_flags(self.flags)
            .with_level(self.level);
        if let Some(action) = &self.input_action {
            spec = spec.with_input_action(action.clone());
        }
        if let Some(cost) = &self.cost {
            spec = spec.with_cost(cost.clone());
        }
        spec
    }

    /// Attaches hooks for every payload except `ApplyEffect`, which needs the
    /// effect catalog and is resolved by the library.
    pub(crate) fn attach_local_payload(
        &self,
        spec: AbilitySpec,
        payload: &AbilityPayload,
    ) -> AbilitySpec {
        let source = payload::source_key(&self.tag);
        match payload {
            AbilityPayload::GrantModifier {
                attribute,
                modifier,
            } => spec.with_hooks(GrantModifier::new(
                attribute.clone(),
                modifier.clone(),
                source,
            )),
            AbilityPayload::Operation {
                attribute,
                operation,
                magnitude,
            } => spec.with_hooks(ApplyOperation::new(
                attribute.clone(),
                *operation,
                *magnitude,
            )),
            AbilityPayload::FinishImmediately => spec.with_hooks(FinishOnActivate),
            AbilityPayload::ApplyEffect { .. } => spec,
        }
    }
}

/// Catalog entry for an effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDefinition {
    pub tag: Tag,
    #[serde(default)]
    pub duration: EffectDuration,
    #[serde(default)]
    pub cancel_on_apply: TagSet,
    #[serde(default)]
    pub block_on_apply: TagSet,
    #[serde(default)]
    pub magnitude: Option<EffectMagnitude>,
    #[serde(default)]
    pub payloads: Vec<EffectPayload>,
}

impl EffectDefinition {
    /// Builds a ready-to-apply spec with its payload hooks.
    ///
    /// Timed durations are clamped to the runtime minimums.
    pub fn to_spec(&self) -> EffectSpec {
        let mut spec = EffectSpec::permanent(self.tag.clone())
            .with_cancel_on_apply(self.cancel_on_apply.clone())
            .with_block_on_apply(self.block_on_apply.clone());
        spec.duration = self.duration.clamped();
        if let Some(magnitude) = &self.magnitude {
            spec = spec.with_magnitude(magnitude.clone());
        }

        let source = payload::source_key(&self.tag);
        for payload in &self.payloads {
            spec = match payload {
                EffectPayload::GrantModifier {
                    attribute,
                    modifier,
                } => spec.with_hooks(GrantModifier::new(
                    attribute.clone(),
                    modifier.clone(),
                    source,
                )),
                EffectPayload::ActivateAbility { ability } => {
                    spec.with_hooks(ActivateOnApply::new(ability.clone()))
                }
            };
        }
        spec
    }
}

/// Catalog entry for an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub tag: Tag,
    pub base: f32,
    /// Cap on the derived value; absent or `<= 0` means uncapped.
    #[serde(default)]
    pub max: Option<f32>,
    /// Innate modifiers, attributed to the attribute's own source key.
    #[serde(default)]
    pub modifiers: Vec<ModifierDefinition>,
}

impl AttributeDefinition {
    pub fn to_attribute(&self) -> Attribute {
        let mut attribute = Attribute::capped(self.base, self.max.unwrap_or(0.0));
        let source = payload::source_key(&self.tag);
        for modifier in &self.modifiers {
            attribute.add_modifier(modifier.to_modifier(source));
        }
        attribute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(text: &str) -> Tag {
        Tag::new(text).unwrap()
    }

    #[test]
    fn modifier_definition_defaults_to_flat_and_unstacked() {
        let definition: ModifierDefinition = ron::from_str("(value: 4.0)").unwrap();
        let modifier = definition.to_modifier(SourceKey(9));

        assert!(!modifier.is_percentage);
        assert_eq!(modifier.source, Some(SourceKey(9)));
        assert_eq!(modifier.stack_tag, None);
        assert_eq!(modifier.max_stacks, 0);
    }

    #[test]
    fn modifiers_built_twice_get_distinct_ids() {
        let definition = ModifierDefinition {
            value: 1.0,
            percentage: false,
            tags: TagSet::new(),
            stack: Some(tag("stack.rage")),
            stacking: StackingPolicy::Add,
            max_stacks: 3,
        };
        let first = definition.to_modifier(SourceKey(1));
        let second = definition.to_modifier(SourceKey(1));

        assert_ne!(first.id, second.id);
        assert!(first.in_stack(&tag("stack.rage")));
    }

    #[test]
    fn attribute_definition_applies_cap_and_innate_modifiers() {
        let definition: AttributeDefinition = ron::from_str(
            r#"(
                tag: "attr.health",
                base: 100.0,
                max: Some(150.0),
                modifiers: [(value: 60.0), (value: 0.5, percentage: true)],
            )"#,
        )
        .unwrap();

        let attribute = definition.to_attribute();
        assert_eq!(attribute.base_value(), 100.0);
        assert_eq!(attribute.current_value(), 150.0);
    }

    #[test]
    fn effect_definition_clamps_timed_duration() {
        let definition: EffectDefinition = ron::from_str(
            r#"(tag: "effect.flash", duration: Timed(duration: 0.0, interval: 0.0))"#,
        )
        .unwrap();

        let spec = definition.to_spec();
        assert_eq!(spec.duration, EffectDuration::timed(0.0, 0.0));
        assert!(spec.hooks.is_empty());
    }

    #[test]
    fn invalid_tag_text_is_rejected_while_parsing() {
        let parsed: Result<AbilityDefinition, _> = ron::from_str(r#"(tag: "ability..dash")"#);
        assert!(parsed.is_err());
    }
}
