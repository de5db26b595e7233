//! The composition root: registries, runtimes and attributes of one actor.
//!
//! Every public operation is addressed by tag and is total: a request that an
//! invariant forbids returns `false` (or does nothing) and is logged at
//! `debug`. State changes are mirrored into a drainable [`DirectorEvent`] log.
//!
//! # Registries
//!
//! | registry                 | contents                                  |
//! |--------------------------|-------------------------------------------|
//! | `unlocked_abilities`     | granted abilities and bare feature tags   |
//! | `blocked_abilities`      | abilities that may not activate           |
//! | `held_ability_blocks`    | blocks requested through the public API   |
//! | `active_abilities`       | exactly the tags of active runtimes       |
//! | `blocked_effects`        | effects that may not be added             |
//! | `active_effects`         | exactly the tags of applied effects       |
mod abilities;
mod builder;
mod commands;
mod effects;
mod timers;

pub use builder::DirectorBuilder;

use std::collections::BTreeMap;

use gameplay_tags::{Tag, TagSet};

use crate::ability::{AbilityId, AbilityRuntime};
use crate::attribute::{Attribute, AttributeOperation, Modifier, SourceKey};
use crate::config::DirectorConfig;
use crate::effect::{EffectId, EffectRuntime};
use crate::event::DirectorEvent;
use crate::hooks::{AbilityHooks, EffectHooks, HookContext};
use crate::scheduler::{Scheduler, TimerQueue};

/// Owns and drives the abilities, effects and attributes of one actor.
///
/// The director is single-threaded. Time only moves through
/// [`AbilityDirector::advance`], which forwards to the injected [`Scheduler`].
///
/// # Example
/// ```
/// # use ability_system::{AbilityDirector, AbilitySpec, DirectorEvent};
/// # use gameplay_tags::Tag;
/// let dash = Tag::new("ability.dash").unwrap();
/// let mut director = AbilityDirector::new();
///
/// director.unlock_ability(AbilitySpec::new(dash.clone()).with_cooldown(1.0));
/// assert!(director.activate_ability_by_tag(&dash));
/// assert!(director.finish_ability_by_tag(&dash, None));
/// assert!(director.is_ability_on_cooldown(&dash));
///
/// director.advance(1.0);
/// assert!(!director.is_ability_on_cooldown(&dash));
/// assert_eq!(
///     director.drain_events().last(),
///     Some(&DirectorEvent::CooldownFinished(dash))
/// );
/// ```
pub struct AbilityDirector<S: Scheduler = TimerQueue> {
    config: DirectorConfig,
    scheduler: S,

    unlocked_abilities: TagSet,
    /// Union of `held_ability_blocks` and the `block_on_apply` of every
    /// effect currently holding its blocks.
    blocked_abilities: TagSet,
    held_ability_blocks: TagSet,
    active_abilities: TagSet,
    blocked_effects: TagSet,
    active_effects: TagSet,

    abilities: Vec<AbilityRuntime>,
    effects: Vec<EffectRuntime>,
    attributes: BTreeMap<Tag, Attribute>,

    events: Vec<DirectorEvent>,
    next_ability_id: u32,
    next_effect_id: u32,
}

impl AbilityDirector<TimerQueue> {
    /// Director on a fresh manual clock with default configuration.
    pub fn new() -> Self {
        Self::with_scheduler(DirectorConfig::default(), TimerQueue::new())
    }

    pub fn builder() -> DirectorBuilder<TimerQueue> {
        DirectorBuilder::new()
    }
}

impl Default for AbilityDirector<TimerQueue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scheduler> AbilityDirector<S> {
    pub fn with_scheduler(config: DirectorConfig, scheduler: S) -> Self {
        Self {
            config,
            scheduler,
            unlocked_abilities: TagSet::new(),
            blocked_abilities: TagSet::new(),
            held_ability_blocks: TagSet::new(),
            active_abilities: TagSet::new(),
            blocked_effects: TagSet::new(),
            active_effects: TagSet::new(),
            abilities: Vec::new(),
            effects: Vec::new(),
            attributes: BTreeMap::new(),
            events: Vec::new(),
            next_ability_id: 0,
            next_effect_id: 0,
        }
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn now(&self) -> f32 {
        self.scheduler.now()
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Moves time forward by `dt` seconds and dispatches every timer that
    /// came due, one at a time. Returns the number of timers dispatched.
    ///
    /// A timer cancelled by an earlier callback of the same call never fires.
    pub fn advance(&mut self, dt: f32) -> usize {
        self.scheduler.advance(dt);

        let limit = self.config.max_dispatches_per_advance;
        let mut dispatched = 0;
        while dispatched < limit {
            let Some(fired) = self.scheduler.pop_due() else {
                return dispatched;
            };
            self.dispatch(fired);
            dispatched += 1;
        }

        tracing::warn!(
            limit,
            now = self.scheduler.now(),
            "dispatch limit reached, deferring remaining timers"
        );
        dispatched
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Takes every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<DirectorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[DirectorEvent] {
        &self.events
    }

    fn emit(&mut self, event: DirectorEvent) {
        tracing::trace!(kind = event.kind(), subject = %event.subject(), "director event");
        self.events.push(event);
    }

    // ========================================================================
    // Registries
    // ========================================================================

    pub fn unlocked_abilities(&self) -> &TagSet {
        &self.unlocked_abilities
    }

    pub fn blocked_abilities(&self) -> &TagSet {
        &self.blocked_abilities
    }

    pub fn active_abilities(&self) -> &TagSet {
        &self.active_abilities
    }

    pub fn blocked_effects(&self) -> &TagSet {
        &self.blocked_effects
    }

    pub fn active_effects(&self) -> &TagSet {
        &self.active_effects
    }

    pub fn has_ability_unlocked(&self, tag: &Tag) -> bool {
        self.unlocked_abilities.has_exact(tag)
    }

    pub fn has_ability_active(&self, tag: &Tag) -> bool {
        self.active_abilities.has_exact(tag)
    }

    pub fn has_ability_blocked(&self, tag: &Tag) -> bool {
        self.blocked_abilities.has_exact(tag)
    }

    pub fn has_effect_active(&self, tag: &Tag) -> bool {
        self.active_effects.has_exact(tag)
    }

    pub fn has_effect_blocked(&self, tag: &Tag) -> bool {
        self.blocked_effects.has_exact(tag)
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Registers an attribute. Returns false if `tag` is already registered.
    pub fn add_attribute(&mut self, tag: Tag, attribute: Attribute) -> bool {
        if self.attributes.contains_key(&tag) {
            tracing::debug!(attribute = %tag, "attribute already registered");
            return false;
        }
        self.attributes.insert(tag, attribute);
        true
    }

    pub fn attribute(&self, tag: &Tag) -> Option<&Attribute> {
        self.attributes.get(tag)
    }

    pub fn attribute_mut(&mut self, tag: &Tag) -> Option<&mut Attribute> {
        self.attributes.get_mut(tag)
    }

    pub fn attribute_value(&self, tag: &Tag) -> Option<f32> {
        self.attribute(tag).map(Attribute::current_value)
    }

    pub fn attributes(&self) -> &BTreeMap<Tag, Attribute> {
        &self.attributes
    }

    /// Returns false if the attribute is missing or a stack rule rejected it.
    pub fn add_modifier(&mut self, attribute: &Tag, modifier: Modifier) -> bool {
        match self.attributes.get_mut(attribute) {
            Some(target) => target.add_modifier(modifier),
            None => {
                tracing::debug!(%attribute, "modifier targets unknown attribute");
                false
            }
        }
    }

    /// Removes `source`'s modifiers from every attribute.
    pub fn remove_modifiers_by_source(&mut self, source: SourceKey) -> bool {
        self.attributes
            .values_mut()
            .fold(false, |removed, attribute| {
                attribute.remove_modifiers_by_source(source) || removed
            })
    }

    pub fn apply_attribute_operation(
        &mut self,
        attribute: &Tag,
        operation: AttributeOperation,
        magnitude: f32,
    ) -> bool {
        match self.attributes.get_mut(attribute) {
            Some(target) => target.apply_operation(operation, magnitude),
            None => {
                tracing::debug!(%attribute, %operation, "operation targets unknown attribute");
                false
            }
        }
    }

    // ========================================================================
    // Runtime lookup
    // ========================================================================

    pub fn abilities(&self) -> &[AbilityRuntime] {
        &self.abilities
    }

    pub fn effects(&self) -> &[EffectRuntime] {
        &self.effects
    }

    /// Granted ability with exactly this tag.
    pub fn ability(&self, tag: &Tag) -> Option<&AbilityRuntime> {
        self.abilities.iter().find(|ability| ability.tag() == tag)
    }

    /// Applied effect with exactly this tag.
    pub fn effect(&self, tag: &Tag) -> Option<&EffectRuntime> {
        self.effects
            .iter()
            .find(|effect| effect.is_applied() && effect.tag() == tag)
    }

    fn ability_id(&self, tag: &Tag) -> Option<AbilityId> {
        self.ability(tag).map(AbilityRuntime::id)
    }

    fn ability_by_id(&self, id: AbilityId) -> Option<&AbilityRuntime> {
        self.abilities.iter().find(|ability| ability.id() == id)
    }

    fn ability_by_id_mut(&mut self, id: AbilityId) -> Option<&mut AbilityRuntime> {
        self.abilities.iter_mut().find(|ability| ability.id() == id)
    }

    fn effect_by_id(&self, id: EffectId) -> Option<&EffectRuntime> {
        self.effects.iter().find(|effect| effect.id() == id)
    }

    fn effect_by_id_mut(&mut self, id: EffectId) -> Option<&mut EffectRuntime> {
        self.effects.iter_mut().find(|effect| effect.id() == id)
    }

    fn is_ability_id_active(&self, id: AbilityId) -> bool {
        self.ability_by_id(id).is_some_and(AbilityRuntime::is_active)
    }

    fn next_ability_id(&mut self) -> AbilityId {
        self.next_ability_id += 1;
        AbilityId(self.next_ability_id)
    }

    fn next_effect_id(&mut self) -> EffectId {
        self.next_effect_id += 1;
        EffectId(self.next_effect_id)
    }

    // ========================================================================
    // Hook invocation
    // ========================================================================

    /// Runs one lifecycle point over an ability's hooks in order.
    ///
    /// The runtime is re-resolved by id before each hook, and each hook's
    /// commands are applied before the next hook runs. Stops early when the
    /// ability is gone or `halt` returns true.
    fn run_ability_hooks(
        &mut self,
        id: AbilityId,
        mut call: impl FnMut(&mut dyn AbilityHooks, &mut HookContext<'_>),
        halt: impl Fn(&Self) -> bool,
    ) {
        let mut index = 0;
        loop {
            let now = self.scheduler.now();
            let Some(runtime) = self.abilities.iter_mut().find(|a| a.id() == id) else {
                return;
            };
            let owner = runtime.tag().clone();
            let level = runtime.level();
            let Some(hook) = runtime.hooks.get_mut(index) else {
                return;
            };

            let mut ctx = HookContext::new(owner, level, now, &self.attributes);
            call(hook.as_mut(), &mut ctx);
            let commands = ctx.into_commands();
            self.apply_commands(commands);

            if halt(self) {
                return;
            }
            index += 1;
        }
    }

    fn run_effect_hooks(
        &mut self,
        id: EffectId,
        mut call: impl FnMut(&mut dyn EffectHooks, &mut HookContext<'_>),
    ) {
        let mut index = 0;
        loop {
            let now = self.scheduler.now();
            let Some(runtime) = self.effects.iter_mut().find(|e| e.id() == id) else {
                return;
            };
            let owner = runtime.tag().clone();
            let level = runtime.magnitude().map_or(1, |m| m.effective_level());
            let Some(hook) = runtime.hooks.get_mut(index) else {
                return;
            };

            let mut ctx = HookContext::new(owner, level, now, &self.attributes);
            call(hook.as_mut(), &mut ctx);
            let commands = ctx.into_commands();
            self.apply_commands(commands);

            index += 1;
        }
    }
}
