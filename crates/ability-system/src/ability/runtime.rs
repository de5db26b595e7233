use gameplay_tags::{Tag, TagSet};

use super::{AbilityCost, AbilityFlags, AbilityId, AbilitySpec};
use crate::hooks::AbilityHooks;
use crate::scheduler::TimerHandle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Cooldown {
    pub(crate) handle: TimerHandle,
    pub(crate) duration: f32,
}

/// A granted ability owned by the director.
///
/// State only changes through the director, which keeps its registries in
/// sync with [`AbilityRuntime::is_active`].
pub struct AbilityRuntime {
    id: AbilityId,
    tag: Tag,
    blocking_tags: TagSet,
    cancel_tags: TagSet,
    base_cooldown: f32,
    flags: AbilityFlags,
    input_action: Option<Tag>,
    level: u32,
    cost: Option<AbilityCost>,
    pub(crate) hooks: Vec<Box<dyn AbilityHooks>>,
    pub(crate) is_active: bool,
    pub(crate) cooldown: Option<Cooldown>,
}

impl AbilityRuntime {
    pub(crate) fn new(id: AbilityId, spec: AbilitySpec) -> Self {
        Self {
            id,
            tag: spec.tag,
            blocking_tags: spec.blocking_tags,
            cancel_tags: spec.cancel_tags,
            base_cooldown: spec.base_cooldown,
            flags: spec.flags,
            input_action: spec.input_action,
            level: spec.level.max(1),
            cost: spec.cost,
            hooks: spec.hooks,
            is_active: false,
            cooldown: None,
        }
    }

    pub fn id(&self) -> AbilityId {
        self.id
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn blocking_tags(&self) -> &TagSet {
        &self.blocking_tags
    }

    pub fn cancel_tags(&self) -> &TagSet {
        &self.cancel_tags
    }

    pub fn base_cooldown(&self) -> f32 {
        self.base_cooldown
    }

    pub fn flags(&self) -> AbilityFlags {
        self.flags
    }

    pub fn has_flag(&self, flag: AbilityFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn input_action(&self) -> Option<&Tag> {
        self.input_action.as_ref()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub(crate) fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    pub fn cost(&self) -> Option<&AbilityCost> {
        self.cost.as_ref()
    }

    /// Cost at the current level as `(attribute, amount)`.
    pub fn scaled_cost(&self) -> Option<(&Tag, f32)> {
        self.cost
            .as_ref()
            .map(|cost| (&cost.attribute, cost.amount(self.level)))
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// True while a cooldown timer is pending.
    pub fn is_on_cooldown(&self) -> bool {
        self.cooldown.is_some()
    }

    /// Duration the running cooldown was started with.
    pub fn cooldown_duration(&self) -> Option<f32> {
        self.cooldown.map(|cooldown| cooldown.duration)
    }

    /// Duration for a new cooldown: the override when positive, else the base.
    pub(crate) fn resolve_cooldown(&self, cooldown_override: Option<f32>) -> f32 {
        cooldown_override
            .filter(|duration| *duration > 0.0)
            .unwrap_or(self.base_cooldown)
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }
}

impl core::fmt::Debug for AbilityRuntime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AbilityRuntime")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("is_active", &self.is_active)
            .field("cooldown", &self.cooldown)
            .field("level", &self.level)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_override_falls_back_to_base() {
        let spec = AbilitySpec::new(Tag::new("ability.dash").unwrap()).with_cooldown(3.0);
        let runtime = AbilityRuntime::new(AbilityId(1), spec);

        assert_eq!(runtime.resolve_cooldown(None), 3.0);
        assert_eq!(runtime.resolve_cooldown(Some(0.0)), 3.0);
        assert_eq!(runtime.resolve_cooldown(Some(-1.0)), 3.0);
        assert_eq!(runtime.resolve_cooldown(Some(0.5)), 0.5);
    }
}
