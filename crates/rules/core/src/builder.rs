//! Single entry point over one character document.
//!
//! `CharacterBuilder` owns the document and its [`StatCache`] and routes every
//! mutation through the matching domain system, so callers never touch the
//! document fields directly.

use crate::archetype::{ArchetypeCategory, ArchetypeInfo, ArchetypeSystem, SelectionCheck};
use crate::catalog::{Catalog, LimitNode, UpgradeDefinition};
use crate::character::{
    AttackId, AttackType, AttributeKey, BoonPurchase, Character, EffectType, ExpertiseLevel,
    FlawPurchase, SpecialAttack, TraitPurchase, UtilityItemKind,
};
use crate::config::RulesConfig;
use crate::error::BuildError;
use crate::limits::AttackPoints;
use crate::pools::{PointPools, calculate_all_pools};
use crate::stats::{CharacterStats, StatCache, StatCategory, StatKey, calculate_specific_stats};
use crate::systems::{
    AttackTypeSystem, AttributeSystem, SpecialAttackSystem, TraitFlawSystem, UniqueAbilitySystem,
    UtilitySystem,
};
use crate::validation::{CharacterValidator, ValidationReport};
use std::collections::BTreeMap;

/// Edits one character against a catalog.
pub struct CharacterBuilder<'c> {
    catalog: &'c Catalog,
    config: RulesConfig,
    character: Character,
    cache: StatCache,
}

impl<'c> CharacterBuilder<'c> {
    /// Blank character at the configured default tier.
    pub fn new(catalog: &'c Catalog, config: RulesConfig) -> Self {
        let character = Character::from_config(&config);
        Self::from_character(catalog, config, character)
    }

    /// Wraps an existing document, e.g. one loaded from disk.
    pub fn from_character(catalog: &'c Catalog, config: RulesConfig, character: Character) -> Self {
        Self {
            catalog,
            cache: StatCache::from_config(&config),
            config,
            character,
        }
    }

    /// The document being edited.
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Hands back the document, e.g. for saving.
    pub fn into_character(self) -> Character {
        self.character
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Rules configuration this builder was created with.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Memoized stats; exposes hit and miss counters.
    pub fn stat_cache(&self) -> &StatCache {
        &self.cache
    }

    // ===== queries =====

    /// Every point pool, or an error when the tier is out of range.
    pub fn calculate_all_pools(&self) -> Result<PointPools, BuildError> {
        calculate_all_pools(&self.character, self.catalog)
    }

    /// Full stat block, served from the cache when the inputs are unchanged.
    pub fn calculate_all_stats(&mut self) -> CharacterStats {
        self.cache.calculate_all_stats(&self.character, self.catalog)
    }

    /// Stats of one category only. Bypasses the cache.
    pub fn calculate_specific_stats(&self, category: StatCategory) -> BTreeMap<StatKey, i32> {
        calculate_specific_stats(&self.character, self.catalog, category)
    }

    /// Runs every validator against the document without mutating it.
    pub fn validate_character(&self) -> ValidationReport {
        CharacterValidator::new(self.catalog, &self.config).validate(&self.character)
    }

    /// Options in `category` with their descriptions.
    pub fn archetypes_for_category(&self, category: ArchetypeCategory) -> Vec<ArchetypeInfo> {
        ArchetypeSystem::new(self.catalog).archetypes_for_category(category)
    }

    /// Limits that could still be attached to `attack`.
    pub fn available_limits(&self, attack: AttackId) -> Result<Vec<&'c LimitNode>, BuildError> {
        SpecialAttackSystem::new(self.catalog).get_available_limits(&self.character, attack)
    }

    /// Upgrades `attack` may take and can still afford at quantity 1.
    pub fn available_upgrades(
        &self,
        attack: AttackId,
    ) -> Result<Vec<&'c UpgradeDefinition>, BuildError> {
        SpecialAttackSystem::new(self.catalog).get_available_upgrades(&self.character, attack)
    }

    // ===== tier, archetypes, attributes =====

    /// Changes the tier and refreshes attack points. Returns warnings about
    /// values the new tier no longer allows.
    pub fn set_tier(&mut self, tier: i32) -> Result<Vec<String>, BuildError> {
        AttributeSystem::new(self.catalog).set_tier(&mut self.character, tier)
    }

    /// Dry run of [`Self::set_archetype`].
    pub fn check_archetype(&self, category: ArchetypeCategory, id: &str) -> SelectionCheck {
        ArchetypeSystem::new(self.catalog).validate_archetype_selection(
            &self.character,
            category,
            id,
        )
    }

    /// Selects `id` for `category`; returned strings are warnings.
    pub fn set_archetype(
        &mut self,
        category: ArchetypeCategory,
        id: &str,
    ) -> Result<Vec<String>, BuildError> {
        ArchetypeSystem::new(self.catalog).set_archetype(&mut self.character, category, id)
    }

    pub fn clear_archetype(&mut self, category: ArchetypeCategory) {
        ArchetypeSystem::new(self.catalog).clear_archetype(&mut self.character, category);
    }

    /// Sets an attribute outright. Returns the new value.
    pub fn set_attribute(&mut self, attribute: AttributeKey, value: i32) -> Result<i32, BuildError> {
        AttributeSystem::new(self.catalog).set_attribute(&mut self.character, attribute, value)
    }

    /// Raises an attribute by `points`, bounded by the tier and its pool.
    pub fn purchase_attribute(
        &mut self,
        attribute: AttributeKey,
        points: i32,
    ) -> Result<i32, BuildError> {
        AttributeSystem::new(self.catalog).purchase_attribute(&mut self.character, attribute, points)
    }

    pub fn remove_attribute(
        &mut self,
        attribute: AttributeKey,
        points: i32,
    ) -> Result<i32, BuildError> {
        AttributeSystem::new(self.catalog).remove_attribute(&mut self.character, attribute, points)
    }

    /// Zeroes every attribute.
    pub fn reset_attributes(&mut self) {
        AttributeSystem::new(self.catalog).reset_attributes(&mut self.character);
    }

    // ===== main pool =====

    /// Buys a boon; `quantity` only matters for per-unit costs.
    pub fn purchase_boon(&mut self, id: &str, quantity: i32) -> Result<(), BuildError> {
        UniqueAbilitySystem::new(self.catalog).purchase_boon(&mut self.character, id, quantity)
    }

    pub fn remove_boon(&mut self, id: &str) -> Result<BoonPurchase, BuildError> {
        UniqueAbilitySystem::new(self.catalog).remove_boon(&mut self.character, id)
    }

    /// Buys a primary action upgrade from the main pool.
    pub fn purchase_primary_action_upgrade(&mut self, id: &str) -> Result<(), BuildError> {
        UniqueAbilitySystem::new(self.catalog)
            .purchase_primary_action_upgrade(&mut self.character, id)
    }

    pub fn remove_primary_action_upgrade(&mut self, id: &str) -> Result<(), BuildError> {
        UniqueAbilitySystem::new(self.catalog)
            .remove_primary_action_upgrade(&mut self.character, id)
    }

    /// Buys a trait boosting `stats`.
    pub fn purchase_trait(&mut self, id: &str, stats: &[StatKey]) -> Result<(), BuildError> {
        TraitFlawSystem::new(self.catalog).purchase_trait(&mut self.character, id, stats)
    }

    /// Removes the trait at `index` in purchase order.
    pub fn remove_trait(&mut self, index: usize) -> Result<TraitPurchase, BuildError> {
        TraitFlawSystem::new(self.catalog).remove_trait(&mut self.character, index)
    }

    /// Takes a flaw for its main pool bonus, optionally with a stat bonus.
    pub fn purchase_flaw(&mut self, id: &str, stat_bonus: Option<StatKey>) -> Result<(), BuildError> {
        TraitFlawSystem::new(self.catalog).purchase_flaw(&mut self.character, id, stat_bonus)
    }

    /// Fails when the flaw's bonus is already spent.
    pub fn remove_flaw(&mut self, id: &str) -> Result<FlawPurchase, BuildError> {
        TraitFlawSystem::new(self.catalog).remove_flaw(&mut self.character, id)
    }

    // ===== utility =====

    /// Buys `level` expertise in `id` under `attribute`.
    pub fn purchase_expertise(
        &mut self,
        attribute: AttributeKey,
        id: &str,
        level: ExpertiseLevel,
    ) -> Result<(), BuildError> {
        UtilitySystem::new(self.catalog).purchase_expertise(&mut self.character, attribute, id, level)
    }

    pub fn remove_expertise(
        &mut self,
        attribute: AttributeKey,
        id: &str,
        level: ExpertiseLevel,
    ) -> Result<(), BuildError> {
        UtilitySystem::new(self.catalog).remove_expertise(&mut self.character, attribute, id, level)
    }

    /// Adds a feature, sense, movement or descriptor from the utility pool.
    pub fn purchase_utility_item(&mut self, kind: UtilityItemKind, id: &str) -> Result<(), BuildError> {
        UtilitySystem::new(self.catalog).purchase_utility_item(&mut self.character, kind, id)
    }

    pub fn remove_utility_item(&mut self, kind: UtilityItemKind, id: &str) -> Result<(), BuildError> {
        UtilitySystem::new(self.catalog).remove_utility_item(&mut self.character, kind, id)
    }

    // ===== special attacks =====

    /// New empty attack, subject to the archetype's attack cap.
    pub fn create_special_attack(&mut self, name: &str) -> Result<AttackId, BuildError> {
        SpecialAttackSystem::new(self.catalog).create_special_attack(&mut self.character, name)
    }

    /// Drops the attack and returns it.
    pub fn delete_special_attack(&mut self, id: AttackId) -> Result<SpecialAttack, BuildError> {
        SpecialAttackSystem::new(self.catalog).delete_special_attack(&mut self.character, id)
    }

    pub fn rename_special_attack(&mut self, id: AttackId, name: &str) -> Result<(), BuildError> {
        SpecialAttackSystem::new(self.catalog).rename_special_attack(&mut self.character, id, name)
    }

    /// Attaches a limit. Variable limits take their `points`; fixed ones ignore it.
    pub fn add_limit(
        &mut self,
        id: AttackId,
        limit_id: &str,
        points: Option<i32>,
    ) -> Result<AttackPoints, BuildError> {
        SpecialAttackSystem::new(self.catalog).add_limit_to_attack(
            &mut self.character,
            id,
            limit_id,
            points,
        )
    }

    /// Removes a limit and its variants. Returns every removed id.
    pub fn remove_limit(&mut self, id: AttackId, limit_id: &str) -> Result<Vec<String>, BuildError> {
        SpecialAttackSystem::new(self.catalog).remove_limit_from_attack(
            &mut self.character,
            id,
            limit_id,
        )
    }

    /// Adds an upgrade if the attack can afford it.
    pub fn add_upgrade(
        &mut self,
        id: AttackId,
        upgrade_id: &str,
        quantity: i32,
    ) -> Result<AttackPoints, BuildError> {
        SpecialAttackSystem::new(self.catalog).add_upgrade_to_attack(
            &mut self.character,
            id,
            upgrade_id,
            quantity,
        )
    }

    pub fn remove_upgrade(
        &mut self,
        id: AttackId,
        upgrade_id: &str,
    ) -> Result<AttackPoints, BuildError> {
        SpecialAttackSystem::new(self.catalog).remove_upgrade_from_attack(
            &mut self.character,
            id,
            upgrade_id,
        )
    }

    /// Refreshes the stored totals of one attack.
    pub fn recalculate_attack_points(&mut self, id: AttackId) -> Result<AttackPoints, BuildError> {
        SpecialAttackSystem::new(self.catalog).recalculate_attack_points(&mut self.character, id)
    }

    pub fn add_attack_type(
        &mut self,
        id: AttackId,
        attack_type: AttackType,
    ) -> Result<AttackPoints, BuildError> {
        AttackTypeSystem::new(self.catalog).add_attack_type(&mut self.character, id, attack_type)
    }

    pub fn remove_attack_type(
        &mut self,
        id: AttackId,
        attack_type: AttackType,
    ) -> Result<AttackPoints, BuildError> {
        AttackTypeSystem::new(self.catalog).remove_attack_type(&mut self.character, id, attack_type)
    }

    /// Replaces the attack's effect type.
    pub fn set_effect_type(
        &mut self,
        id: AttackId,
        effect: EffectType,
    ) -> Result<AttackPoints, BuildError> {
        AttackTypeSystem::new(self.catalog).set_effect_type(&mut self.character, id, effect)
    }

    /// Adds a basic or advanced condition to the attack.
    pub fn add_condition(
        &mut self,
        id: AttackId,
        condition_id: &str,
    ) -> Result<AttackPoints, BuildError> {
        AttackTypeSystem::new(self.catalog).add_condition(&mut self.character, id, condition_id)
    }

    pub fn remove_condition(
        &mut self,
        id: AttackId,
        condition_id: &str,
    ) -> Result<AttackPoints, BuildError> {
        AttackTypeSystem::new(self.catalog).remove_condition(&mut self.character, id, condition_id)
    }
}
