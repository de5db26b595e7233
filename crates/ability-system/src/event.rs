//! Observable state changes, appended to the director's event log.

use gameplay_tags::Tag;

/// One entry of the log returned by
/// [`AbilityDirector::drain_events`](crate::AbilityDirector::drain_events).
///
/// Events are recorded in the order the transitions happened, including
/// transitions caused by hook commands.
#[derive(Clone, Debug, PartialEq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DirectorEvent {
    AbilityUnlocked(Tag),
    AbilityRemoved(Tag),
    AbilityActivated(Tag),
    AbilityFinished(Tag),
    AbilityCancelled(Tag),
    CooldownStarted { ability: Tag, duration: f32 },
    CooldownFinished(Tag),
    EffectApplied(Tag),
    EffectTriggered(Tag),
    EffectRemoved(Tag),
    /// The host should route `action` input to the ability.
    InputBound { ability: Tag, action: Tag },
    InputUnbound { ability: Tag, action: Tag },
}

impl DirectorEvent {
    /// The ability or effect the event is about.
    pub fn subject(&self) -> &Tag {
        match self {
            Self::AbilityUnlocked(tag)
            | Self::AbilityRemoved(tag)
            | Self::AbilityActivated(tag)
            | Self::AbilityFinished(tag)
            | Self::AbilityCancelled(tag)
            | Self::CooldownFinished(tag)
            | Self::EffectApplied(tag)
            | Self::EffectTriggered(tag)
            | Self::EffectRemoved(tag) => tag,
            Self::CooldownStarted { ability, .. }
            | Self::InputBound { ability, .. }
            | Self::InputUnbound { ability, .. } => ability,
        }
    }

    /// Stable snake_case name of the variant.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}
