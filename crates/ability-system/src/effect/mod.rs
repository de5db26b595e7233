//! Status effect definitions and runtime state.
//!
//! A permanent effect triggers once when applied and stays until removed. A
//! timed effect triggers every `interval` seconds and removes itself after
//! `duration`; a trigger that lands on the expiry instant still fires.
mod runtime;

pub use runtime::{EffectRuntime, EffectState};

use gameplay_tags::{Tag, TagSet};

use crate::attribute::AttributeOperation;
use crate::config::DirectorConfig;
use crate::hooks::EffectHooks;
use crate::scaling::LevelScaling;

/// Director-local identity of an applied effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EffectId(pub u32);

/// Lifetime of an effect.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectDuration {
    /// Triggers once on apply; removed only on request.
    #[default]
    Permanent,
    /// Triggers every `interval` seconds and expires after `duration`.
    Timed { duration: f32, interval: f32 },
}

impl EffectDuration {
    pub fn timed(duration: f32, interval: f32) -> Self {
        Self::Timed { duration, interval }.clamped()
    }

    /// Raises timed values to [`DirectorConfig::MIN_EFFECT_DURATION`] and
    /// [`DirectorConfig::MIN_TRIGGER_INTERVAL`].
    pub fn clamped(self) -> Self {
        match self {
            Self::Permanent => Self::Permanent,
            Self::Timed { duration, interval } => Self::Timed {
                duration: duration.max(DirectorConfig::MIN_EFFECT_DURATION),
                interval: interval.max(DirectorConfig::MIN_TRIGGER_INTERVAL),
            },
        }
    }

    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Permanent)
    }
}

/// Attribute change applied on every trigger.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectMagnitude {
    pub attribute: Tag,
    pub operation: AttributeOperation,
    pub base: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: LevelScaling,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
    /// `0` means no ceiling.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_level: u32,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

impl EffectMagnitude {
    pub fn new(attribute: Tag, operation: AttributeOperation, base: f32) -> Self {
        Self {
            attribute,
            operation,
            base,
            scaling: LevelScaling::FLAT,
            level: 1,
            max_level: 0,
        }
    }

    pub fn with_scaling(mut self, scaling: LevelScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_level(mut self, level: u32, max_level: u32) -> Self {
        self.level = level;
        self.max_level = max_level;
        self
    }

    pub fn effective_level(&self) -> u32 {
        let level = self.level.max(1);
        if self.max_level > 0 {
            level.min(self.max_level)
        } else {
            level
        }
    }

    /// Magnitude at the effective level.
    pub fn value(&self) -> f32 {
        self.scaling.scale(self.base, self.effective_level())
    }
}

/// Description of an effect to apply.
///
/// # Example
/// ```
/// # use ability_system::{AttributeOperation, EffectMagnitude, EffectSpec};
/// # use gameplay_tags::Tag;
/// let burn = EffectSpec::timed(Tag::new("effect.burn").unwrap(), 3.0, 1.0)
///     .with_magnitude(EffectMagnitude::new(
///         Tag::new("attr.health").unwrap(),
///         AttributeOperation::Subtract,
///         4.0,
///     ));
///
/// assert!(!burn.duration.is_permanent());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSpec {
    pub tag: Tag,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: EffectDuration,
    /// Active abilities matching these are cancelled when the effect applies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cancel_on_apply: TagSet,
    /// Abilities blocked for as long as the effect is applied.
    #[cfg_attr(feature = "serde", serde(default))]
    pub block_on_apply: TagSet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magnitude: Option<EffectMagnitude>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub hooks: Vec<Box<dyn EffectHooks>>,
}

impl EffectSpec {
    pub fn permanent(tag: Tag) -> Self {
        Self {
            tag,
            duration: EffectDuration::Permanent,
            cancel_on_apply: TagSet::new(),
            block_on_apply: TagSet::new(),
            magnitude: None,
            hooks: Vec::new(),
        }
    }

    pub fn timed(tag: Tag, duration: f32, interval: f32) -> Self {
        Self {
            duration: EffectDuration::timed(duration, interval),
            ..Self::permanent(tag)
        }
    }

    pub fn with_cancel_on_apply(mut self, abilities: TagSet) -> Self {
        self.cancel_on_apply = abilities;
        self
    }

    pub fn with_block_on_apply(mut self, abilities: TagSet) -> Self {
        self.block_on_apply = abilities;
        self
    }

    pub fn with_magnitude(mut self, magnitude: EffectMagnitude) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_hooks(mut self, hooks: impl EffectHooks + 'static) -> Self {
        self.hooks.push(Box::new(hooks));
        self
    }
}

impl core::fmt::Debug for EffectSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EffectSpec")
            .field("tag", &self.tag)
            .field("duration", &self.duration)
            .field("cancel_on_apply", &self.cancel_on_apply)
            .field("block_on_apply", &self.block_on_apply)
            .field("magnitude", &self.magnitude)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
