//! Data-driven content for the rules engine.
//!
//! This crate owns every file the engine touches:
//! - Ruleset catalogs (RON, one file per purchase family)
//! - Engine configuration (TOML)
//! - Character documents (camelCase JSON)
//!
//! The bundled ruleset under `data/` is available through
//! [`ContentFactory::bundled`].

pub mod loaders;

pub use loaders::{CatalogLoader, CharacterLoader, ConfigLoader, ContentFactory, LoadResult};
