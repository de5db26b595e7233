//! Deferred requests issued by hooks.

use gameplay_tags::{Tag, TagSet};

use crate::attribute::{AttributeOperation, Modifier, SourceKey};
use crate::effect::EffectSpec;

/// A request from a hook back to the director.
///
/// Hooks never hold the director. They push commands into their
/// [`HookContext`](crate::HookContext), and the director applies them in
/// order as soon as the hook returns.
#[derive(Debug)]
pub enum DirectorCommand {
    ActivateAbility(Tag),
    FinishAbility {
        ability: Tag,
        cooldown_override: Option<f32>,
    },
    CancelAbility(Tag),
    /// Hierarchical match against every active ability.
    CancelAbilities(TagSet),
    TriggerCooldown {
        ability: Tag,
        cooldown_override: Option<f32>,
    },
    BlockAbilities(TagSet),
    UnblockAbilities(TagSet),
    AddEffect(EffectSpec),
    /// Hierarchical match, first active effect only.
    RemoveEffect(Tag),
    AddModifier {
        attribute: Tag,
        modifier: Modifier,
    },
    RemoveModifiersBySource {
        attribute: Tag,
        source: SourceKey,
    },
    ApplyAttributeOperation {
        attribute: Tag,
        operation: AttributeOperation,
        magnitude: f32,
    },
}
