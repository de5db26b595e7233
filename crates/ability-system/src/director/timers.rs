//! Routing of fired timers back to their runtimes.

use super::AbilityDirector;
use crate::ability::AbilityId;
use crate::effect::EffectId;
use crate::event::DirectorEvent;
use crate::scheduler::{FiredTimer, Scheduler, TimerEvent, TimerHandle};

impl<S: Scheduler> AbilityDirector<S> {
    pub(super) fn dispatch(&mut self, fired: FiredTimer) {
        let handled = match fired.event {
            TimerEvent::EffectTrigger(id) => self.on_trigger_timer(id, fired.handle),
            TimerEvent::AbilityCooldown(id) => self.on_cooldown_timer(id, fired.handle),
            TimerEvent::EffectDuration(id) => self.on_duration_timer(id, fired.handle),
        };

        if !handled {
            tracing::trace!(?fired, "ignoring stale timer");
        }
    }

    fn on_trigger_timer(&mut self, id: EffectId, handle: TimerHandle) -> bool {
        let live = self
            .effect_by_id(id)
            .is_some_and(|effect| effect.is_applied() && effect.trigger_timer == Some(handle));
        if live {
            self.trigger_effect(id);
        }
        live
    }

    fn on_duration_timer(&mut self, id: EffectId, handle: TimerHandle) -> bool {
        let live = self
            .effect_by_id(id)
            .is_some_and(|effect| effect.is_applied() && effect.duration_timer == Some(handle));
        if live {
            self.remove_effect(id);
        }
        live
    }

    fn on_cooldown_timer(&mut self, id: AbilityId, handle: TimerHandle) -> bool {
        let Some(runtime) = self
            .ability_by_id_mut(id)
            .filter(|runtime| runtime.cooldown.is_some_and(|c| c.handle == handle))
        else {
            return false;
        };
        runtime.cooldown = None;
        let tag = runtime.tag().clone();

        tracing::debug!(ability = %tag, "cooldown finished");
        self.run_ability_hooks(id, |hooks, ctx| hooks.on_cooldown_finished(ctx), |_| false);
        self.emit(DirectorEvent::CooldownFinished(tag));
        true
    }
}
