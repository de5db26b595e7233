use super::AbilityDirector;
use crate::command::DirectorCommand;
use crate::scheduler::Scheduler;

impl<S: Scheduler> AbilityDirector<S> {
    /// Applies hook commands in the order they were queued.
    pub(super) fn apply_commands(&mut self, commands: Vec<DirectorCommand>) {
        for command in commands {
            self.apply_command(command);
        }
    }

    /// Executes one command through the public API.
    pub fn apply_command(&mut self, command: DirectorCommand) {
        tracing::trace!(?command, "applying hook command");
        match command {
            DirectorCommand::ActivateAbility(ability) => {
                self.activate_ability_by_tag(&ability);
            }
            DirectorCommand::FinishAbility {
                ability,
                cooldown_override,
            } => {
                self.finish_ability_by_tag(&ability, cooldown_override);
            }
            DirectorCommand::CancelAbility(ability) => {
                self.cancel_ability_by_tag(&ability);
            }
            DirectorCommand::CancelAbilities(abilities) => self.cancel_abilities(&abilities),
            DirectorCommand::TriggerCooldown {
                ability,
                cooldown_override,
            } => {
                self.trigger_cooldown(&ability, cooldown_override);
            }
            DirectorCommand::BlockAbilities(abilities) => {
                self.block_abilities(&abilities);
            }
            DirectorCommand::UnblockAbilities(abilities) => self.unblock_abilities(&abilities),
            DirectorCommand::AddEffect(effect) => {
                self.add_effect(effect);
            }
            DirectorCommand::RemoveEffect(effect) => {
                self.remove_effect_by_tag(&effect);
            }
            DirectorCommand::AddModifier {
                attribute,
                modifier,
            } => {
                self.add_modifier(&attribute, modifier);
            }
            DirectorCommand::RemoveModifiersBySource { attribute, source } => {
                if let Some(target) = self.attributes.get_mut(&attribute) {
                    target.remove_modifiers_by_source(source);
                }
            }
            DirectorCommand::ApplyAttributeOperation {
                attribute,
                operation,
                magnitude,
            } => {
                self.apply_attribute_operation(&attribute, operation, magnitude);
            }
        }
    }
}
