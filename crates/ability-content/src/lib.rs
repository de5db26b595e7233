//! Data-driven content for the ability runtime.
//!
//! Abilities, effects and attributes are authored as RON catalogs and turned
//! into [`ability_system`] specs by a [`ContentLibrary`]. Tag strings are
//! validated while deserializing, so a loaded catalog only holds well-formed
//! tags; cross references (an ability applying an effect) are resolved when
//! the library is assembled.
//!
//! # Layout
//!
//! - [`definitions`]: serde shapes of the catalog entries
//! - [`payload`]: hook implementations attached to built specs
//! - [`loaders`]: RON file loaders and the [`ContentFactory`]
//! - [`ContentLibrary`]: validated definitions, indexed by tag
pub mod definitions;
pub mod error;
pub mod library;
pub mod loaders;
pub mod payload;

pub use definitions::{
    AbilityDefinition, AbilityPayload, AttributeDefinition, EffectDefinition, EffectPayload,
    ModifierDefinition,
};
pub use error::ContentError;
pub use library::ContentLibrary;
pub use loaders::{AbilityLoader, AttributeLoader, ContentFactory, EffectLoader, LoadResult};
