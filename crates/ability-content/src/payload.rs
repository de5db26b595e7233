//! Hook objects built from catalog payloads.

use std::hash::{DefaultHasher, Hash, Hasher};

use ability_system::{AbilityHooks, AttributeOperation, EffectHooks, HookContext, SourceKey};
use gameplay_tags::Tag;

use crate::definitions::{EffectDefinition, ModifierDefinition};

/// Stable modifier source for content owned by `tag`.
///
/// Every payload of one ability or effect shares the key, so ending the owner
/// strips all of its modifiers from an attribute at once.
pub fn source_key(tag: &Tag) -> SourceKey {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    SourceKey(hasher.finish())
}

/// Adds a modifier when its owner starts and removes it when the owner ends.
pub struct GrantModifier {
    attribute: Tag,
    modifier: ModifierDefinition,
    source: SourceKey,
}

impl GrantModifier {
    pub fn new(attribute: Tag, modifier: ModifierDefinition, source: SourceKey) -> Self {
        Self {
            attribute,
            modifier,
            source,
        }
    }

    fn grant(&self, ctx: &mut HookContext<'_>) {
        ctx.add_modifier(self.attribute.clone(), self.modifier.to_modifier(self.source));
    }

    fn revoke(&self, ctx: &mut HookContext<'_>) {
        ctx.remove_modifiers_by_source(self.attribute.clone(), self.source);
    }
}

impl AbilityHooks for GrantModifier {
    fn on_activated(&mut self, ctx: &mut HookContext<'_>) {
        self.grant(ctx);
    }

    fn on_finished(&mut self, ctx: &mut HookContext<'_>) {
        self.revoke(ctx);
    }

    fn on_cancelled(&mut self, ctx: &mut HookContext<'_>) {
        self.revoke(ctx);
    }
}

impl EffectHooks for GrantModifier {
    fn on_applied(&mut self, ctx: &mut HookContext<'_>) {
        self.grant(ctx);
    }

    fn on_removed(&mut self, ctx: &mut HookContext<'_>) {
        self.revoke(ctx);
    }
}

/// Applies a catalog effect whenever the ability activates.
pub struct ApplyEffect {
    effect: EffectDefinition,
    remove_on_end: bool,
}

impl ApplyEffect {
    pub fn new(effect: EffectDefinition, remove_on_end: bool) -> Self {
        Self {
            effect,
            remove_on_end,
        }
    }

    fn end(&self, ctx: &mut HookContext<'_>) {
        if self.remove_on_end {
            ctx.remove_effect(self.effect.tag.clone());
        }
    }
}

impl AbilityHooks for ApplyEffect {
    fn on_activated(&mut self, ctx: &mut HookContext<'_>) {
        ctx.add_effect(self.effect.to_spec());
    }

    fn on_finished(&mut self, ctx: &mut HookContext<'_>) {
        self.end(ctx);
    }

    fn on_cancelled(&mut self, ctx: &mut HookContext<'_>) {
        self.end(ctx);
    }
}

pub struct ApplyOperation {
    attribute: Tag,
    operation: AttributeOperation,
    magnitude: f32,
}

impl ApplyOperation {
    pub fn new(attribute: Tag, operation: AttributeOperation, magnitude: f32) -> Self {
        Self {
            attribute,
            operation,
            magnitude,
        }
    }
}

impl AbilityHooks for ApplyOperation {
    fn on_activated(&mut self, ctx: &mut HookContext<'_>) {
        ctx.apply_attribute_operation(self.attribute.clone(), self.operation, self.magnitude);
    }
}

/// Instant abilities: finish right after activating.
pub struct FinishOnActivate;

impl AbilityHooks for FinishOnActivate {
    fn on_activated(&mut self, ctx: &mut HookContext<'_>) {
        ctx.finish_self();
    }
}

pub struct ActivateOnApply {
    ability: Tag,
}

impl ActivateOnApply {
    pub fn new(ability: Tag) -> Self {
        Self { ability }
    }
}

impl EffectHooks for ActivateOnApply {
    fn on_applied(&mut self, ctx: &mut HookContext<'_>) {
        ctx.activate_ability(self.ability.clone());
    }
}
