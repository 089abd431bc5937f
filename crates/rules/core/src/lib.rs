//! Point-buy character rules: pools, limit scaling, stats and validation.
//!
//! `rules-core` is the calculation and validation engine for a tier-based
//! character builder. It never performs I/O: catalogs arrive as
//! [`CatalogSnapshot`] values and characters as in-memory [`Character`]
//! documents. Mutations flow through the domain [`systems`] (or the
//! [`CharacterBuilder`] facade); queries are pure functions over a document.
pub mod archetype;
pub mod builder;
pub mod catalog;
pub mod character;
pub mod config;
pub mod error;
pub mod limits;
pub mod pools;
pub mod stats;
pub mod systems;
pub mod tier;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use archetype::{
    Archetype, ArchetypeCategory, ArchetypeInfo, ArchetypeSystem, ResolvedArchetypes,
    SelectionCheck, SpecialAttackPointMethod, archetypes_for_category,
};
pub use builder::CharacterBuilder;
pub use catalog::{Catalog, CatalogSnapshot, EffectTags, LimitLevel, LimitTree};
pub use character::{
    AttackId, AttackType, AttributeKey, Attributes, Character, EffectType, ExpertiseLevel,
    SpecialAttack, UtilityItemKind,
};
pub use config::RulesConfig;
pub use error::{BuildError, CatalogError, ErrorSeverity, RulesError, TierError};
pub use limits::{AttackPoints, LimitScaling, calculate_limit_scaling};
pub use pools::{AttackPool, PointPools, Pool, PoolIssue, calculate_all_pools};
pub use stats::{CharacterStats, StatCache, StatCategory, StatKey};
pub use systems::{
    AttackTypeSystem, AttributeSystem, SpecialAttackSystem, TraitFlawSystem, UniqueAbilitySystem,
    UtilitySystem,
};
pub use tier::{TierEffects, TierPools};
pub use validation::{
    BuildPhase, BuildState, CharacterValidator, IssueSeverity, ValidationContext, ValidationIssue,
    ValidationReport, Validator, ValidatorKind,
};
