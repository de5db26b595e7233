//! Hierarchical gameplay tags and ordered tag sets.
//!
//! Tags are dotted symbolic identifiers (`ability.movement.dash`) used as the
//! addressing primitive for abilities, effects, attributes and modifiers.
//!
//! - **Exact matching** compares the full dotted string
//! - **Hierarchical matching** also accepts ancestors: `ability.dash` matches `ability`
//! - **Cheap clones**: a [`Tag`] is a shared immutable string
//!
//! # Architecture
//!
//! - [`Tag`]: a single validated identifier
//! - [`TagSet`]: an insertion-ordered set with exact and hierarchical queries
//! - [`TagError`]: rejected tag text

pub mod error;
pub mod set;
pub mod tag;

pub use error::TagError;
pub use set::TagSet;
pub use tag::Tag;
