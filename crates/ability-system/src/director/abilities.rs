//! Ability lifecycle: unlock, activate, finish, cancel, remove, cooldowns and input.

use gameplay_tags::{Tag, TagSet};

use super::AbilityDirector;
use crate::ability::{AbilityFlags, AbilityId, AbilityRuntime, AbilitySpec, Cooldown, InputPhase};
use crate::attribute::AttributeOperation;
use crate::error::{ActivationError, GameplayError};
use crate::event::DirectorEvent;
use crate::scheduler::{Scheduler, TimerEvent};

impl<S: Scheduler> AbilityDirector<S> {
    // ========================================================================
    // Granting
    // ========================================================================

    /// Grants an ability. Returns false if its tag is already unlocked.
    ///
    /// Once granted, the ability auto-activates if flagged, announces its
    /// input binding and runs its `on_added` hooks.
    pub fn unlock_ability(&mut self, spec: AbilitySpec) -> bool {
        if self.unlocked_abilities.has_exact(&spec.tag) {
            tracing::debug!(ability = %spec.tag, "ability already unlocked");
            return false;
        }

        let id = self.next_ability_id();
        let tag = spec.tag.clone();
        self.unlocked_abilities.add(tag.clone());
        self.abilities.push(AbilityRuntime::new(id, spec));
        tracing::debug!(ability = %tag, "ability unlocked");

        if self
            .ability_by_id(id)
            .is_some_and(|a| a.has_flag(AbilityFlags::AUTO_ACTIVATE_ON_ADD))
        {
            self.try_activate(id);
        }

        if let Some(action) = self.ability_by_id(id).and_then(|a| a.input_action().cloned()) {
            self.emit(DirectorEvent::InputBound {
                ability: tag.clone(),
                action,
            });
        }

        self.run_ability_hooks(id, |hooks, ctx| hooks.on_added(ctx), |_| false);
        self.emit(DirectorEvent::AbilityUnlocked(tag));
        true
    }

    /// Marks a bare feature tag as unlocked, without a runtime.
    ///
    /// Returns false if the tag was already unlocked.
    pub fn unlock_ability_tag(&mut self, tag: Tag) -> bool {
        self.unlocked_abilities.add(tag)
    }

    /// Removes a granted ability, cancelling it first if it is active.
    ///
    /// The cancellation never starts a cooldown, and a running cooldown is
    /// dropped without a `CooldownFinished` event.
    pub fn remove_ability_by_tag(&mut self, tag: &Tag) -> bool {
        let Some(id) = self.ability_id(tag) else {
            tracing::debug!(ability = %tag, "remove ignored, ability not granted");
            return false;
        };

        if self.is_ability_id_active(id) {
            self.interrupt(id, false);
        }
        self.clear_cooldown(id);

        self.run_ability_hooks(id, |hooks, ctx| hooks.on_removed(ctx), |_| false);

        let Some(index) = self.abilities.iter().position(|a| a.id() == id) else {
            return false;
        };
        let runtime = self.abilities.remove(index);
        if let Some(cooldown) = runtime.cooldown {
            self.scheduler.cancel(cooldown.handle);
        }
        if runtime.is_active() {
            self.active_abilities.remove(runtime.tag());
        }
        if let Some(action) = runtime.input_action() {
            self.emit(DirectorEvent::InputUnbound {
                ability: runtime.tag().clone(),
                action: action.clone(),
            });
        }

        self.unlocked_abilities.remove(runtime.tag());
        tracing::debug!(ability = %runtime.tag(), "ability removed");
        self.emit(DirectorEvent::AbilityRemoved(runtime.tag().clone()));
        true
    }

    /// Sets the level used for cost scaling. Levels start at 1.
    pub fn set_ability_level(&mut self, tag: &Tag, level: u32) -> bool {
        match self.abilities.iter_mut().find(|a| a.tag() == tag) {
            Some(runtime) => {
                runtime.set_level(level);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Explains why `tag` would not activate right now.
    pub fn check_activation(&self, tag: &Tag) -> Result<(), ActivationError> {
        let runtime = self
            .ability(tag)
            .ok_or_else(|| ActivationError::NotGranted { tag: tag.clone() })?;
        self.check_runtime(runtime)
    }

    pub fn can_activate_ability(&self, tag: &Tag) -> bool {
        self.check_activation(tag).is_ok()
    }

    fn check_runtime(&self, runtime: &AbilityRuntime) -> Result<(), ActivationError> {
        let tag = runtime.tag();

        if let Some(blocking) = runtime
            .blocking_tags()
            .iter()
            .find(|blocking| self.active_abilities.has_exact(blocking))
        {
            return Err(ActivationError::BlockedByActive {
                tag: tag.clone(),
                blocking: blocking.clone(),
            });
        }

        if let Some(cooldown) = runtime.cooldown {
            return Err(ActivationError::OnCooldown {
                tag: tag.clone(),
                remaining: self.scheduler.remaining(cooldown.handle).unwrap_or(0.0),
            });
        }

        if runtime.is_active() {
            return Err(ActivationError::AlreadyActive { tag: tag.clone() });
        }

        if self.blocked_abilities.has_exact(tag) {
            return Err(ActivationError::Blocked { tag: tag.clone() });
        }

        if let Some((attribute, required)) = runtime.scaled_cost() {
            let Some(available) = self.attribute_value(attribute) else {
                return Err(ActivationError::CostAttributeMissing {
                    tag: tag.clone(),
                    attribute: attribute.clone(),
                });
            };
            if available < required {
                return Err(ActivationError::InsufficientCost {
                    tag: tag.clone(),
                    attribute: attribute.clone(),
                    required,
                    available,
                });
            }
        }

        Ok(())
    }

    /// Activates the granted ability with exactly this tag.
    pub fn activate_ability_by_tag(&mut self, tag: &Tag) -> bool {
        match self.ability_id(tag) {
            Some(id) => self.try_activate(id),
            None => {
                tracing::debug!(ability = %tag, "activation ignored, ability not granted");
                false
            }
        }
    }

    fn try_activate(&mut self, id: AbilityId) -> bool {
        let Some(runtime) = self.ability_by_id(id) else {
            return false;
        };
        if let Err(error) = self.check_runtime(runtime) {
            tracing::debug!(%error, code = error.error_code(), "activation refused");
            return false;
        }

        let tag = runtime.tag().clone();
        let cancel_tags = runtime.cancel_tags().clone();
        if !cancel_tags.is_empty() {
            self.cancel_abilities(&cancel_tags);
        }

        // cancellation hooks may have removed or re-activated this ability
        let Some(runtime) = self.ability_by_id(id).filter(|a| !a.is_active()) else {
            return false;
        };

        let cost = runtime
            .scaled_cost()
            .map(|(attribute, amount)| (attribute.clone(), amount));
        if let Some((attribute, amount)) = cost {
            self.apply_attribute_operation(&attribute, AttributeOperation::Subtract, amount);
        }

        if let Some(runtime) = self.ability_by_id_mut(id) {
            runtime.is_active = true;
        }
        self.active_abilities.add(tag.clone());
        tracing::debug!(ability = %tag, "ability activated");

        // a hook that ends the ability stops the remaining hooks
        self.run_ability_hooks(
            id,
            |hooks, ctx| hooks.on_activated(ctx),
            |director| !director.is_ability_id_active(id),
        );

        if self.is_ability_id_active(id) {
            self.emit(DirectorEvent::AbilityActivated(tag));
        }
        true
    }

    /// Finishes an active ability and starts its cooldown.
    ///
    /// A positive `cooldown_override` replaces the base cooldown.
    pub fn finish_ability_by_tag(&mut self, tag: &Tag, cooldown_override: Option<f32>) -> bool {
        self.ability_id(tag)
            .is_some_and(|id| self.finish_ability(id, cooldown_override))
    }

    /// Cancels an active ability. The cooldown only starts with
    /// [`AbilityFlags::COOLDOWN_ON_CANCEL`].
    pub fn cancel_ability_by_tag(&mut self, tag: &Tag) -> bool {
        self.ability_id(tag)
            .is_some_and(|id| self.cancel_ability(id))
    }

    /// Cancels every active ability whose tag matches any of `tags`
    /// hierarchically.
    pub fn cancel_abilities(&mut self, tags: &TagSet) {
        let targets: Vec<AbilityId> = self
            .abilities
            .iter()
            .filter(|a| a.is_active() && a.tag().matches_any(tags))
            .map(AbilityRuntime::id)
            .collect();

        for id in targets {
            self.cancel_ability(id);
        }
    }

    fn finish_ability(&mut self, id: AbilityId, cooldown_override: Option<f32>) -> bool {
        let Some(tag) = self.deactivate(id) else {
            return false;
        };
        tracing::debug!(ability = %tag, "ability finished");

        self.start_cooldown(id, cooldown_override);
        self.run_ability_hooks(id, |hooks, ctx| hooks.on_finished(ctx), |_| false);
        self.emit(DirectorEvent::AbilityFinished(tag));
        true
    }

    fn cancel_ability(&mut self, id: AbilityId) -> bool {
        self.interrupt(id, true)
    }

    /// Deactivates and runs the cancel hooks. `allow_cooldown` gates the
    /// [`AbilityFlags::COOLDOWN_ON_CANCEL`] cooldown.
    fn interrupt(&mut self, id: AbilityId, allow_cooldown: bool) -> bool {
        let Some(tag) = self.deactivate(id) else {
            return false;
        };
        tracing::debug!(ability = %tag, "ability cancelled");

        if allow_cooldown
            && self
                .ability_by_id(id)
                .is_some_and(|a| a.has_flag(AbilityFlags::COOLDOWN_ON_CANCEL))
        {
            self.start_cooldown(id, None);
        }
        self.run_ability_hooks(id, |hooks, ctx| hooks.on_cancelled(ctx), |_| false);
        self.emit(DirectorEvent::AbilityCancelled(tag));
        true
    }

    fn deactivate(&mut self, id: AbilityId) -> Option<Tag> {
        let runtime = self.ability_by_id_mut(id).filter(|a| a.is_active())?;
        runtime.is_active = false;
        let tag = runtime.tag().clone();
        self.active_abilities.remove(&tag);
        Some(tag)
    }

    // ========================================================================
    // Blocking
    // ========================================================================

    /// Blocks activation of `tags`. Abilities that are already active keep
    /// running. Returns false if every tag was already blocked, by this call's
    /// predecessors or by an applied effect.
    ///
    /// The block is held until [`Self::unblock_abilities`] releases it, even if
    /// an effect blocking the same tag is removed in between.
    pub fn block_abilities(&mut self, tags: &TagSet) -> bool {
        let changed = tags
            .iter()
            .any(|tag| !self.blocked_abilities.has_exact(tag));
        self.held_ability_blocks.append(tags);
        self.refresh_ability_blocks();
        changed
    }

    /// Releases a block taken through [`Self::block_abilities`]. Blocks held by
    /// applied effects stay. Returns false if the tag was not held.
    pub fn unblock_ability(&mut self, tag: &Tag) -> bool {
        let released = self.held_ability_blocks.remove(tag);
        self.refresh_ability_blocks();
        released
    }

    pub fn unblock_abilities(&mut self, tags: &TagSet) {
        self.held_ability_blocks.remove_all(tags);
        self.refresh_ability_blocks();
    }

    /// Rebuilds the blocked registry from every block holder.
    pub(super) fn refresh_ability_blocks(&mut self) {
        let mut blocked = self.held_ability_blocks.clone();
        for effect in self
            .effects
            .iter()
            .filter(|effect| effect.holds_blocks && effect.is_applied())
        {
            blocked.append(effect.block_on_apply());
        }
        self.blocked_abilities = blocked;
    }

    // ========================================================================
    // Cooldowns
    // ========================================================================

    /// Starts `tag`'s cooldown, restarting a running one. A positive
    /// `cooldown_override` replaces the base cooldown.
    pub fn trigger_cooldown(&mut self, tag: &Tag, cooldown_override: Option<f32>) -> bool {
        let Some(id) = self.ability_id(tag) else {
            return false;
        };
        self.start_cooldown(id, cooldown_override);
        true
    }

    /// Restarts `tag`'s cooldown so that `remaining` seconds are left.
    /// A non-positive value clears the cooldown.
    pub fn set_cooldown_remaining(&mut self, tag: &Tag, remaining: f32) -> bool {
        let Some(id) = self.ability_id(tag) else {
            return false;
        };
        self.restart_cooldown(id, remaining);
        true
    }

    /// `(remaining, total)` of the running cooldown, or `(0, 0)`.
    ///
    /// `total` is the duration the cooldown was last started with.
    pub fn get_cooldown_remaining(&self, tag: &Tag) -> (f32, f32) {
        self.ability(tag)
            .and_then(|runtime| runtime.cooldown)
            .and_then(|cooldown| {
                self.scheduler
                    .remaining(cooldown.handle)
                    .map(|remaining| (remaining, cooldown.duration))
            })
            .unwrap_or((0.0, 0.0))
    }

    pub fn is_ability_on_cooldown(&self, tag: &Tag) -> bool {
        self.ability(tag).is_some_and(AbilityRuntime::is_on_cooldown)
    }

    pub fn abilities_on_cooldown(&self) -> TagSet {
        self.abilities
            .iter()
            .filter(|a| a.is_on_cooldown())
            .map(|a| a.tag().clone())
            .collect()
    }

    fn start_cooldown(&mut self, id: AbilityId, cooldown_override: Option<f32>) {
        let Some(duration) = self
            .ability_by_id(id)
            .map(|runtime| runtime.resolve_cooldown(cooldown_override))
        else {
            return;
        };
        self.restart_cooldown(id, duration);
    }

    /// Replaces any running cooldown; `duration <= 0` leaves none running.
    fn restart_cooldown(&mut self, id: AbilityId, duration: f32) {
        let Some(tag) = self.ability_by_id(id).map(|a| a.tag().clone()) else {
            return;
        };
        self.clear_cooldown(id);
        if duration <= 0.0 {
            return;
        }

        let handle = self
            .scheduler
            .schedule_once(duration, TimerEvent::AbilityCooldown(id));
        if let Some(runtime) = self.ability_by_id_mut(id) {
            runtime.cooldown = Some(Cooldown { handle, duration });
        }
        tracing::debug!(ability = %tag, duration, "cooldown started");
        self.emit(DirectorEvent::CooldownStarted {
            ability: tag,
            duration,
        });
    }

    fn clear_cooldown(&mut self, id: AbilityId) {
        let previous = self
            .ability_by_id_mut(id)
            .and_then(|runtime| runtime.cooldown.take());
        if let Some(previous) = previous {
            self.scheduler.cancel(previous.handle);
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Routes a started input action. Returns the number of abilities the
    /// input was delivered to.
    pub fn input_started(&mut self, action: &Tag) -> usize {
        self.route_input(action, InputPhase::Started)
    }

    /// Only delivered to abilities with [`AbilityFlags::ALLOW_INPUT_ONGOING`].
    pub fn input_ongoing(&mut self, action: &Tag) -> usize {
        self.route_input(action, InputPhase::Ongoing)
    }

    pub fn input_completed(&mut self, action: &Tag) -> usize {
        self.route_input(action, InputPhase::Completed)
    }

    pub fn input_cancelled(&mut self, action: &Tag) -> usize {
        self.route_input(action, InputPhase::Cancelled)
    }

    fn route_input(&mut self, action: &Tag, phase: InputPhase) -> usize {
        let bound: Vec<AbilityId> = self
            .abilities
            .iter()
            .filter(|a| a.input_action() == Some(action))
            .map(AbilityRuntime::id)
            .collect();

        bound
            .into_iter()
            .filter(|&id| self.deliver_input(id, phase))
            .count()
    }

    fn deliver_input(&mut self, id: AbilityId, phase: InputPhase) -> bool {
        let Some(flags) = self.ability_by_id(id).map(AbilityRuntime::flags) else {
            return false;
        };

        match phase {
            InputPhase::Started if flags.contains(AbilityFlags::AUTO_ACTIVATE_ON_INPUT_STARTED) => {
                self.try_activate(id);
            }
            InputPhase::Ongoing if !flags.contains(AbilityFlags::ALLOW_INPUT_ONGOING) => return false,
            InputPhase::Completed if flags.contains(AbilityFlags::AUTO_FINISH_ON_INPUT_COMPLETED) => {
                self.finish_ability(id, None);
            }
            InputPhase::Cancelled if flags.contains(AbilityFlags::AUTO_CANCEL_ON_INPUT_CANCELLED) => {
                self.cancel_ability(id);
            }
            _ => {}
        }

        self.run_ability_hooks(id, |hooks, ctx| hooks.on_input(phase, ctx), |_| false);
        true
    }
}
