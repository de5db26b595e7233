//! Payload hooks attached to abilities and effects.
//!
//! Gameplay payloads (play a montage, spawn a projectile, apply a buff) live
//! outside the director. They implement [`AbilityHooks`] or [`EffectHooks`]
//! and are invoked in registration order at each lifecycle point. A hook talks
//! back to the director only through the [`HookContext`] it is handed: reads
//! are immediate, writes are queued as [`DirectorCommand`]s and applied right
//! after the hook returns.

use std::collections::BTreeMap;

use gameplay_tags::{Tag, TagSet};

use crate::ability::InputPhase;
use crate::attribute::{Attribute, AttributeOperation, Modifier, SourceKey};
use crate::command::DirectorCommand;
use crate::effect::EffectSpec;

/// Read access to the director plus a command queue.
pub struct HookContext<'a> {
    owner: Tag,
    level: u32,
    now: f32,
    attributes: &'a BTreeMap<Tag, Attribute>,
    commands: Vec<DirectorCommand>,
}

impl<'a> HookContext<'a> {
    pub(crate) fn new(
        owner: Tag,
        level: u32,
        now: f32,
        attributes: &'a BTreeMap<Tag, Attribute>,
    ) -> Self {
        Self {
            owner,
            level,
            now,
            attributes,
            commands: Vec::new(),
        }
    }

    /// Tag of the ability or effect running the hook.
    pub fn owner(&self) -> &Tag {
        &self.owner
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Scheduler time at which the hook runs.
    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn attribute(&self, tag: &Tag) -> Option<&Attribute> {
        self.attributes.get(tag)
    }

    pub fn attribute_value(&self, tag: &Tag) -> Option<f32> {
        self.attribute(tag).map(Attribute::current_value)
    }

    /// Commands queued so far.
    pub fn commands(&self) -> &[DirectorCommand] {
        &self.commands
    }

    pub fn push(&mut self, command: DirectorCommand) {
        self.commands.push(command);
    }

    pub(crate) fn into_commands(self) -> Vec<DirectorCommand> {
        self.commands
    }

    // ===== shorthands for the owner =====

    /// Finishes the owning ability with its base cooldown.
    pub fn finish_self(&mut self) {
        let ability = self.owner.clone();
        self.finish_ability(ability, None);
    }

    pub fn finish_self_with_cooldown(&mut self, cooldown: f32) {
        let ability = self.owner.clone();
        self.finish_ability(ability, Some(cooldown));
    }

    pub fn cancel_self(&mut self) {
        let ability = self.owner.clone();
        self.cancel_ability(ability);
    }

    // ===== abilities =====

    pub fn activate_ability(&mut self, ability: Tag) {
        self.push(DirectorCommand::ActivateAbility(ability));
    }

    pub fn finish_ability(&mut self, ability: Tag, cooldown_override: Option<f32>) {
        self.push(DirectorCommand::FinishAbility {
            ability,
            cooldown_override,
        });
    }

    pub fn cancel_ability(&mut self, ability: Tag) {
        self.push(DirectorCommand::CancelAbility(ability));
    }

    pub fn cancel_abilities(&mut self, abilities: TagSet) {
        self.push(DirectorCommand::CancelAbilities(abilities));
    }

    pub fn trigger_cooldown(&mut self, ability: Tag, cooldown_override: Option<f32>) {
        self.push(DirectorCommand::TriggerCooldown {
            ability,
            cooldown_override,
        });
    }

    pub fn block_abilities(&mut self, abilities: TagSet) {
        self.push(DirectorCommand::BlockAbilities(abilities));
    }

    pub fn unblock_abilities(&mut self, abilities: TagSet) {
        self.push(DirectorCommand::UnblockAbilities(abilities));
    }

    // ===== effects =====

    pub fn add_effect(&mut self, effect: EffectSpec) {
        self.push(DirectorCommand::AddEffect(effect));
    }

    pub fn remove_effect(&mut self, effect: Tag) {
        self.push(DirectorCommand::RemoveEffect(effect));
    }

    // ===== attributes =====

    pub fn add_modifier(&mut self, attribute: Tag, modifier: Modifier) {
        self.push(DirectorCommand::AddModifier {
            attribute,
            modifier,
        });
    }

    pub fn remove_modifiers_by_source(&mut self, attribute: Tag, source: SourceKey) {
        self.push(DirectorCommand::RemoveModifiersBySource { attribute, source });
    }

    pub fn apply_attribute_operation(
        &mut self,
        attribute: Tag,
        operation: AttributeOperation,
        magnitude: f32,
    ) {
        self.push(DirectorCommand::ApplyAttributeOperation {
            attribute,
            operation,
            magnitude,
        });
    }
}

/// Lifecycle callbacks of a granted ability. Every method defaults to a no-op.
pub trait AbilityHooks {
    /// The ability was granted.
    fn on_added(&mut self, _ctx: &mut HookContext<'_>) {}

    /// The ability is about to be removed.
    fn on_removed(&mut self, _ctx: &mut HookContext<'_>) {}

    /// The ability became active. Call [`HookContext::finish_self`] or
    /// [`HookContext::cancel_self`] to end it; later hooks are then skipped.
    fn on_activated(&mut self, _ctx: &mut HookContext<'_>) {}

    fn on_finished(&mut self, _ctx: &mut HookContext<'_>) {}

    fn on_cancelled(&mut self, _ctx: &mut HookContext<'_>) {}

    fn on_cooldown_finished(&mut self, _ctx: &mut HookContext<'_>) {}

    /// Input routed to the ability, after its auto-action (if any) ran.
    fn on_input(&mut self, _phase: InputPhase, _ctx: &mut HookContext<'_>) {}
}

/// Lifecycle callbacks of an applied effect. Every method defaults to a no-op.
pub trait EffectHooks {
    fn on_applied(&mut self, _ctx: &mut HookContext<'_>) {}

    fn on_removed(&mut self, _ctx: &mut HookContext<'_>) {}

    /// Payload tick. Runs after the effect's magnitude (if any) was applied.
    fn on_triggered(&mut self, _ctx: &mut HookContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthands_target_the_owner() {
        let attributes = BTreeMap::new();
        let owner = Tag::new("ability.dash").unwrap();
        let mut ctx = HookContext::new(owner.clone(), 1, 0.0, &attributes);

        ctx.finish_self_with_cooldown(2.0);
        ctx.cancel_self();

        let commands = ctx.into_commands();
        assert!(matches!(
            &commands[0],
            DirectorCommand::FinishAbility { ability, cooldown_override: Some(c) }
                if *ability == owner && *c == 2.0
        ));
        assert!(matches!(&commands[1], DirectorCommand::CancelAbility(t) if *t == owner));
    }

    #[test]
    fn attribute_reads_are_immediate() {
        let health = Tag::new("attr.health").unwrap();
        let attributes = BTreeMap::from([(health.clone(), Attribute::new(42.0))]);
        let ctx = HookContext::new(Tag::new("effect.heal").unwrap(), 1, 3.0, &attributes);

        assert_eq!(ctx.attribute_value(&health), Some(42.0));
        assert_eq!(ctx.now(), 3.0);
        assert!(ctx.commands().is_empty());
    }
}
