use gameplay_tags::Tag;

use super::AbilityDirector;
use crate::ability::AbilitySpec;
use crate::attribute::Attribute;
use crate::config::DirectorConfig;
use crate::effect::EffectSpec;
use crate::scheduler::{Scheduler, TimerQueue};

/// Builder for [`AbilityDirector`] with default grants.
///
/// Attributes are registered first, then bare tags, then abilities, then
/// effects, so that costs and auto-activation see the attributes.
pub struct DirectorBuilder<S: Scheduler = TimerQueue> {
    config: DirectorConfig,
    scheduler: S,
    attributes: Vec<(Tag, Attribute)>,
    unlocked_tags: Vec<Tag>,
    abilities: Vec<AbilitySpec>,
    effects: Vec<EffectSpec>,
}

impl DirectorBuilder<TimerQueue> {
    pub fn new() -> Self {
        Self {
            config: DirectorConfig::default(),
            scheduler: TimerQueue::new(),
            attributes: Vec::new(),
            unlocked_tags: Vec::new(),
            abilities: Vec::new(),
            effects: Vec::new(),
        }
    }
}

impl Default for DirectorBuilder<TimerQueue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scheduler> DirectorBuilder<S> {
    /// Override director configuration
    pub fn config(mut self, config: DirectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the timer service
    pub fn scheduler<T: Scheduler>(self, scheduler: T) -> DirectorBuilder<T> {
        DirectorBuilder {
            config: self.config,
            scheduler,
            attributes: self.attributes,
            unlocked_tags: self.unlocked_tags,
            abilities: self.abilities,
            effects: self.effects,
        }
    }

    pub fn attribute(mut self, tag: Tag, attribute: Attribute) -> Self {
        self.attributes.push((tag, attribute));
        self
    }

    /// Unlock a bare feature tag on build
    pub fn unlocked_tag(mut self, tag: Tag) -> Self {
        self.unlocked_tags.push(tag);
        self
    }

    /// Grant an ability on build
    pub fn ability(mut self, spec: AbilitySpec) -> Self {
        self.abilities.push(spec);
        self
    }

    /// Apply an effect on build
    pub fn effect(mut self, spec: EffectSpec) -> Self {
        self.effects.push(spec);
        self
    }

    pub fn build(self) -> AbilityDirector<S> {
        let mut director = AbilityDirector::with_scheduler(self.config, self.scheduler);

        for (tag, attribute) in self.attributes {
            director.add_attribute(tag, attribute);
        }
        for tag in self.unlocked_tags {
            director.unlock_ability_tag(tag);
        }
        for spec in self.abilities {
            director.unlock_ability(spec);
        }
        for spec in self.effects {
            director.add_effect(spec);
        }

        director
    }
}
