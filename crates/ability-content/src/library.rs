use std::collections::BTreeMap;

use ability_system::{AbilitySpec, Attribute, DirectorBuilder, EffectSpec, Scheduler};
use gameplay_tags::Tag;

use crate::definitions::{AbilityDefinition, AbilityPayload, AttributeDefinition, EffectDefinition};
use crate::error::ContentError;
use crate::loaders::{AbilityLoader, AttributeLoader, EffectLoader, LoadResult};
use crate::payload::ApplyEffect;

/// Validated catalogs, indexed by tag.
///
/// Construction rejects duplicate tags and abilities that apply effects the
/// catalog does not define, so building a spec from a library only fails for
/// tags the library does not contain.
#[derive(Debug, Clone, Default)]
pub struct ContentLibrary {
    abilities: BTreeMap<Tag, AbilityDefinition>,
    effects: BTreeMap<Tag, EffectDefinition>,
    attributes: BTreeMap<Tag, AttributeDefinition>,
}

impl ContentLibrary {
    pub fn new(
        abilities: Vec<AbilityDefinition>,
        effects: Vec<EffectDefinition>,
        attributes: Vec<AttributeDefinition>,
    ) -> Result<Self, ContentError> {
        let library = Self {
            abilities: index("ability", abilities, |d| &d.tag)?,
            effects: index("effect", effects, |d| &d.tag)?,
            attributes: index("attribute", attributes, |d| &d.tag)?,
        };

        for ability in library.abilities.values() {
            for effect in ability.referenced_effects() {
                if !library.effects.contains_key(effect) {
                    return Err(ContentError::UnknownEffect {
                        ability: ability.tag.clone(),
                        effect: effect.clone(),
                    });
                }
            }
        }
        Ok(library)
    }

    /// The catalogs shipped in this crate's `data/` directory.
    pub fn embedded() -> LoadResult<Self> {
        let abilities = AbilityLoader::parse(include_str!("../data/abilities.ron"))?;
        let effects = EffectLoader::parse(include_str!("../data/effects.ron"))?;
        let attributes = AttributeLoader::parse(include_str!("../data/attributes.ron"))?;
        Ok(Self::new(abilities, effects, attributes)?)
    }

    pub fn ability(&self, tag: &Tag) -> Option<&AbilityDefinition> {
        self.abilities.get(tag)
    }

    pub fn effect(&self, tag: &Tag) -> Option<&EffectDefinition> {
        self.effects.get(tag)
    }

    pub fn attribute(&self, tag: &Tag) -> Option<&AttributeDefinition> {
        self.attributes.get(tag)
    }

    pub fn abilities(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.abilities.values()
    }

    pub fn effects(&self) -> impl Iterator<Item = &EffectDefinition> {
        self.effects.values()
    }

    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.attributes.values()
    }

    /// Builds the spec of `tag` with one hook per payload, in listed order.
    pub fn ability_spec(&self, tag: &Tag) -> Result<AbilitySpec, ContentError> {
        let definition = self.abilities.get(tag).ok_or_else(|| ContentError::Missing {
            kind: "ability",
            tag: tag.clone(),
        })?;

        let mut spec = definition.base_spec();
        for payload in &definition.payloads {
            spec = match payload {
                AbilityPayload::ApplyEffect {
                    effect,
                    remove_on_end,
                } => {
                    let effect_definition = self.effects.get(effect).ok_or_else(|| {
                        ContentError::UnknownEffect {
                            ability: tag.clone(),
                            effect: effect.clone(),
                        }
                    })?;
                    spec.with_hooks(ApplyEffect::new(effect_definition.clone(), *remove_on_end))
                }
                local => definition.attach_local_payload(spec, local),
            };
        }
        Ok(spec)
    }

    pub fn effect_spec(&self, tag: &Tag) -> Result<EffectSpec, ContentError> {
        self.effects
            .get(tag)
            .map(EffectDefinition::to_spec)
            .ok_or_else(|| ContentError::Missing {
                kind: "effect",
                tag: tag.clone(),
            })
    }

    pub fn build_attribute(&self, tag: &Tag) -> Result<Attribute, ContentError> {
        self.attributes
            .get(tag)
            .map(AttributeDefinition::to_attribute)
            .ok_or_else(|| ContentError::Missing {
                kind: "attribute",
                tag: tag.clone(),
            })
    }

    /// Registers every attribute and every `granted` ability on `builder`.
    pub fn populate<S: Scheduler>(
        &self,
        mut builder: DirectorBuilder<S>,
    ) -> Result<DirectorBuilder<S>, ContentError> {
        for definition in self.attributes.values() {
            builder = builder.attribute(definition.tag.clone(), definition.to_attribute());
        }
        for definition in self.abilities.values().filter(|d| d.granted) {
            builder = builder.ability(self.ability_spec(&definition.tag)?);
        }
        Ok(builder)
    }
}

fn index<T>(
    kind: &'static str,
    definitions: Vec<T>,
    tag_of: impl Fn(&T) -> &Tag,
) -> Result<BTreeMap<Tag, T>, ContentError> {
    let mut map = BTreeMap::new();
    for definition in definitions {
        let tag = tag_of(&definition).clone();
        if map.contains_key(&tag) {
            return Err(ContentError::Duplicate { kind, tag });
        }
        map.insert(tag, definition);
    }
    Ok(map)
}
