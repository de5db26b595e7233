//! Ability definitions and runtime state.
//!
//! An [`AbilitySpec`] describes an ability; the director turns it into an
//! [`AbilityRuntime`] when the ability is unlocked. A runtime is either
//! inactive or active, and carries an orthogonal cooldown timer.
mod runtime;

pub use runtime::AbilityRuntime;
pub(crate) use runtime::Cooldown;

use bitflags::bitflags;
use gameplay_tags::{Tag, TagSet};

use crate::hooks::AbilityHooks;
use crate::scaling::LevelScaling;

/// Director-local identity of a granted ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AbilityId(pub u32);

bitflags! {
    /// Behaviour switches of an ability.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AbilityFlags: u8 {
        /// Try to activate as soon as the ability is unlocked.
        const AUTO_ACTIVATE_ON_ADD           = 1 << 0;
        /// Start the base cooldown when the ability is cancelled.
        const COOLDOWN_ON_CANCEL             = 1 << 1;
        const AUTO_ACTIVATE_ON_INPUT_STARTED = 1 << 2;
        const AUTO_FINISH_ON_INPUT_COMPLETED = 1 << 3;
        const AUTO_CANCEL_ON_INPUT_CANCELLED = 1 << 4;
        /// Deliver the `Ongoing` input phase to hooks.
        const ALLOW_INPUT_ONGOING            = 1 << 5;
    }
}

/// Phase of an input action routed to an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum InputPhase {
    Started,
    Ongoing,
    Completed,
    Cancelled,
}

/// Attribute spent when the ability activates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityCost {
    pub attribute: Tag,
    pub value: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: LevelScaling,
}

impl AbilityCost {
    pub fn new(attribute: Tag, value: f32) -> Self {
        Self {
            attribute,
            value,
            scaling: LevelScaling::FLAT,
        }
    }

    pub fn with_scaling(mut self, scaling: LevelScaling) -> Self {
        self.scaling = scaling;
        self
    }

    /// Cost at `level`, never negative.
    pub fn amount(&self, level: u32) -> f32 {
        self.scaling.scale(self.value, level).max(0.0)
    }
}

/// Description of an ability to unlock.
///
/// Hooks are not serialized; loaders attach them after deserializing.
///
/// # Example
/// ```
/// # use ability_system::{AbilityFlags, AbilitySpec};
/// # use gameplay_tags::{Tag, TagSet};
/// let dash = AbilitySpec::new(Tag::new("ability.dash").unwrap())
///     .with_cooldown(1.5)
///     .with_blocking_tags(TagSet::single(Tag::new("ability.stunned").unwrap()))
///     .with_flags(AbilityFlags::COOLDOWN_ON_CANCEL);
///
/// assert_eq!(dash.level, 1);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySpec {
    pub tag: Tag,
    /// Activation is refused while any of these abilities is active (exact).
    #[cfg_attr(feature = "serde", serde(default))]
    pub blocking_tags: TagSet,
    /// Active abilities matching these (hierarchically) are cancelled on activation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cancel_tags: TagSet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_cooldown: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: AbilityFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub input_action: Option<Tag>,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Option<AbilityCost>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub hooks: Vec<Box<dyn AbilityHooks>>,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

impl AbilitySpec {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            blocking_tags: TagSet::new(),
            cancel_tags: TagSet::new(),
            base_cooldown: 0.0,
            flags: AbilityFlags::empty(),
            input_action: None,
            level: 1,
            cost: None,
            hooks: Vec::new(),
        }
    }

    pub fn with_blocking_tags(mut self, tags: TagSet) -> Self {
        self.blocking_tags = tags;
        self
    }

    pub fn with_cancel_tags(mut self, tags: TagSet) -> Self {
        self.cancel_tags = tags;
        self
    }

    pub fn with_cooldown(mut self, seconds: f32) -> Self {
        self.base_cooldown = seconds;
        self
    }

    pub fn with_flags(mut self, flags: AbilityFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_input_action(mut self, action: Tag) -> Self {
        self.input_action = Some(action);
        self
    }

    /// Levels start at 1; lower values are raised to 1.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    pub fn with_cost(mut self, cost: AbilityCost) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_hooks(mut self, hooks: impl AbilityHooks + 'static) -> Self {
        self.hooks.push(Box::new(hooks));
        self
    }
}

impl core::fmt::Debug for AbilitySpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AbilitySpec")
            .field("tag", &self.tag)
            .field("blocking_tags", &self.blocking_tags)
            .field("cancel_tags", &self.cancel_tags)
            .field("base_cooldown", &self.base_cooldown)
            .field("flags", &self.flags)
            .field("input_action", &self.input_action)
            .field("level", &self.level)
            .field("cost", &self.cost)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
