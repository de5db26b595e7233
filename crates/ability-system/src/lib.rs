//! Tag-addressed ability, effect and attribute runtime for a single actor.
//!
//! `ability-system` grants, activates and resolves timed abilities, applies
//! status effects with periodic triggers, and derives attribute values from
//! stacked modifiers. Everything is addressed by [`gameplay_tags::Tag`]; all
//! state mutation flows through [`AbilityDirector`].
//!
//! # Architecture
//!
//! - [`Attribute`]: base value, cap and stacked [`Modifier`]s
//! - [`EffectRuntime`]: one applied effect with trigger and duration timers
//! - [`AbilityRuntime`]: one granted ability with its cooldown
//! - [`AbilityDirector`]: registries, routing and cross-cutting invariants
//! - [`Scheduler`]: injected timer service ([`TimerQueue`] is a manual clock)
//! - [`AbilityHooks`] / [`EffectHooks`]: payload collaborators that talk back
//!   through [`DirectorCommand`]s
//! - [`DirectorEvent`]: drainable log of every state change
pub mod ability;
pub mod attribute;
pub mod command;
pub mod config;
pub mod director;
pub mod effect;
pub mod error;
pub mod event;
pub mod hooks;
pub mod scaling;
pub mod scheduler;

pub use ability::{AbilityCost, AbilityFlags, AbilityId, AbilityRuntime, AbilitySpec, InputPhase};
pub use attribute::{
    Attribute, AttributeOperation, Modifier, ModifierId, SourceKey, StackingPolicy,
};
pub use command::DirectorCommand;
pub use config::DirectorConfig;
pub use director::{AbilityDirector, DirectorBuilder};
pub use effect::{
    EffectDuration, EffectId, EffectMagnitude, EffectRuntime, EffectSpec, EffectState,
};
pub use error::{ActivationError, EffectError, ErrorSeverity, GameplayError};
pub use event::DirectorEvent;
pub use hooks::{AbilityHooks, EffectHooks, HookContext};
pub use scaling::{LevelScaling, ScalingCurve};
pub use scheduler::{FiredTimer, Scheduler, TimerEvent, TimerHandle, TimerQueue};
