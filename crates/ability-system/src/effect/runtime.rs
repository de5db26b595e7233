use gameplay_tags::{Tag, TagSet};

use super::{EffectDuration, EffectId, EffectMagnitude, EffectSpec};
use crate::hooks::EffectHooks;
use crate::scheduler::TimerHandle;

/// Lifecycle of an applied effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum EffectState {
    /// Applied and waiting; permanent effects stay here.
    Applied,
    /// A timed effect with pending trigger and duration timers.
    Ticking,
    Removed,
}

/// An applied effect owned by the director.
pub struct EffectRuntime {
    id: EffectId,
    tag: Tag,
    duration: EffectDuration,
    cancel_on_apply: TagSet,
    block_on_apply: TagSet,
    magnitude: Option<EffectMagnitude>,
    pub(crate) hooks: Vec<Box<dyn EffectHooks>>,
    pub(crate) state: EffectState,
    pub(crate) duration_timer: Option<TimerHandle>,
    pub(crate) trigger_timer: Option<TimerHandle>,
    pub(crate) trigger_count: u32,
    /// Set once `block_on_apply` has been applied; cleared on removal.
    pub(crate) holds_blocks: bool,
}

impl EffectRuntime {
    pub(crate) fn new(id: EffectId, spec: EffectSpec) -> Self {
        Self {
            id,
            tag: spec.tag,
            duration: spec.duration.clamped(),
            cancel_on_apply: spec.cancel_on_apply,
            block_on_apply: spec.block_on_apply,
            magnitude: spec.magnitude,
            hooks: spec.hooks,
            state: EffectState::Applied,
            duration_timer: None,
            trigger_timer: None,
            trigger_count: 0,
            holds_blocks: false,
        }
    }

    pub fn id(&self) -> EffectId {
        self.id
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn duration(&self) -> EffectDuration {
        self.duration
    }

    pub fn is_permanent(&self) -> bool {
        self.duration.is_permanent()
    }

    pub fn cancel_on_apply(&self) -> &TagSet {
        &self.cancel_on_apply
    }

    pub fn block_on_apply(&self) -> &TagSet {
        &self.block_on_apply
    }

    pub fn magnitude(&self) -> Option<&EffectMagnitude> {
        self.magnitude.as_ref()
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    /// True until removal starts.
    pub fn is_applied(&self) -> bool {
        self.state != EffectState::Removed
    }

    /// Number of payload triggers delivered so far.
    pub fn trigger_count(&self) -> u32 {
        self.trigger_count
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }
}

impl core::fmt::Debug for EffectRuntime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EffectRuntime")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("state", &self.state)
            .field("duration", &self.duration)
            .field("trigger_count", &self.trigger_count)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}
