//! Effect lifecycle: add, trigger, expire, remove and effect blocking.

use gameplay_tags::{Tag, TagSet};

use super::AbilityDirector;
use crate::effect::{EffectDuration, EffectId, EffectRuntime, EffectSpec, EffectState};
use crate::error::{EffectError, GameplayError};
use crate::event::DirectorEvent;
use crate::scheduler::{Scheduler, TimerEvent};

impl<S: Scheduler> AbilityDirector<S> {
    /// Explains why an effect tagged `tag` could not be added right now.
    pub fn check_effect(&self, tag: &Tag) -> Result<(), EffectError> {
        if self.active_effects.has_exact(tag) {
            return Err(EffectError::AlreadyActive { tag: tag.clone() });
        }
        if self.blocked_effects.has_exact(tag) {
            return Err(EffectError::Blocked { tag: tag.clone() });
        }
        Ok(())
    }

    /// Applies an effect. Returns false if the same tag is already applied or
    /// blocked.
    pub fn add_effect(&mut self, spec: EffectSpec) -> bool {
        if let Err(error) = self.check_effect(&spec.tag) {
            tracing::debug!(%error, code = error.error_code(), "effect refused");
            return false;
        }

        let id = self.next_effect_id();
        self.active_effects.add(spec.tag.clone());
        self.effects.push(EffectRuntime::new(id, spec));
        self.apply_effect(id);
        true
    }

    fn apply_effect(&mut self, id: EffectId) {
        let Some(effect) = self.effect_by_id(id) else {
            return;
        };
        let tag = effect.tag().clone();
        let duration = effect.duration();
        let cancel_on_apply = effect.cancel_on_apply().clone();
        let block_on_apply = effect.block_on_apply().clone();

        tracing::debug!(effect = %tag, ?duration, "effect applied");
        self.emit(DirectorEvent::EffectApplied(tag));

        match duration {
            EffectDuration::Permanent => self.trigger_effect(id),
            EffectDuration::Timed { duration, interval } => {
                let duration_timer = self
                    .scheduler
                    .schedule_once(duration, TimerEvent::EffectDuration(id));
                let trigger_timer = self
                    .scheduler
                    .schedule_repeating(interval, TimerEvent::EffectTrigger(id));
                if let Some(effect) = self.effect_by_id_mut(id) {
                    effect.duration_timer = Some(duration_timer);
                    effect.trigger_timer = Some(trigger_timer);
                    effect.state = EffectState::Ticking;
                }
            }
        }

        self.run_effect_hooks(id, |hooks, ctx| hooks.on_applied(ctx));

        // hooks may already have removed the effect
        if !self.effect_by_id(id).is_some_and(EffectRuntime::is_applied) {
            return;
        }
        if !cancel_on_apply.is_empty() {
            self.cancel_abilities(&cancel_on_apply);
        }
        if !block_on_apply.is_empty() {
            if let Some(effect) = self.effect_by_id_mut(id) {
                effect.holds_blocks = true;
            }
            self.refresh_ability_blocks();
        }
    }

    /// Applies the effect's magnitude and runs its `on_triggered` hooks.
    pub(super) fn trigger_effect(&mut self, id: EffectId) {
        let Some(effect) = self.effect_by_id_mut(id) else {
            return;
        };
        effect.trigger_count += 1;
        let tag = effect.tag().clone();
        let magnitude = effect.magnitude().cloned();

        if let Some(magnitude) = magnitude {
            self.apply_attribute_operation(
                &magnitude.attribute,
                magnitude.operation,
                magnitude.value(),
            );
        }

        tracing::trace!(effect = %tag, "effect triggered");
        self.emit(DirectorEvent::EffectTriggered(tag));
        self.run_effect_hooks(id, |hooks, ctx| hooks.on_triggered(ctx));
    }

    /// Removes the first applied effect whose tag matches `tag`
    /// hierarchically.
    pub fn remove_effect_by_tag(&mut self, tag: &Tag) -> bool {
        let target = self
            .effects
            .iter()
            .find(|e| e.is_applied() && e.tag().matches(tag))
            .map(EffectRuntime::id);
        target.is_some_and(|id| self.remove_effect(id))
    }

    /// Removes the applied effect whose tag is exactly `tag`.
    pub fn remove_effect_by_tag_exact(&mut self, tag: &Tag) -> bool {
        let target = self.effect(tag).map(EffectRuntime::id);
        target.is_some_and(|id| self.remove_effect(id))
    }

    /// Tears an effect down.
    ///
    /// A trigger that is due at this instant fires one last time before the
    /// timers are cancelled.
    pub(super) fn remove_effect(&mut self, id: EffectId) -> bool {
        let Some(effect) = self
            .effect_by_id_mut(id)
            .filter(|effect| effect.is_applied())
        else {
            return false;
        };
        effect.state = EffectState::Removed;
        let tag = effect.tag().clone();
        let block_on_apply = effect.block_on_apply().clone();
        let trigger_timer = effect.trigger_timer.take();
        let duration_timer = effect.duration_timer.take();

        if let Some(handle) = trigger_timer {
            let due_now = self
                .scheduler
                .remaining(handle)
                .is_some_and(|remaining| self.config.is_nearly_zero(remaining));
            self.scheduler.cancel(handle);
            if due_now {
                self.trigger_effect(id);
            }
        }
        if let Some(handle) = duration_timer {
            self.scheduler.cancel(handle);
        }

        self.run_effect_hooks(id, |hooks, ctx| hooks.on_removed(ctx));

        self.active_effects.remove(&tag);
        self.effects.retain(|effect| effect.id() != id);
        if !block_on_apply.is_empty() {
            self.refresh_ability_blocks();
        }

        tracing::debug!(effect = %tag, "effect removed");
        self.emit(DirectorEvent::EffectRemoved(tag));
        true
    }

    /// Prevents `tags` from being added. Already applied effects stay.
    /// Returns false if every tag was already blocked.
    pub fn block_effects(&mut self, tags: &TagSet) -> bool {
        tags.iter().fold(false, |changed, tag| {
            self.blocked_effects.add(tag.clone()) || changed
        })
    }

    pub fn unblock_effects(&mut self, tags: &TagSet) {
        self.blocked_effects.remove_all(tags);
    }
}
