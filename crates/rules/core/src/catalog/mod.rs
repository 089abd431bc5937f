//! Read-only ruleset catalogs keyed by stable string ids.
//!
//! Catalog data lives outside the engine (RON files in `rules-content`). It
//! arrives as a flat [`CatalogSnapshot`] and is indexed and checked once by
//! [`Catalog::from_snapshot`]; after that the engine only reads it.

mod limits;
mod tags;

pub use limits::{LimitLevel, LimitNode, LimitTree};
pub use tags::EffectTags;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::archetype::{Archetype, ArchetypeCategory};
use crate::character::{
    AttackType, AttributeKey, EffectType, ExpertiseLevel, SpecialAttack, UtilityItemKind,
};
use crate::config::RulesConfig;
use crate::error::{CatalogError, CatalogKind};
use crate::stats::StatKey;

// ============================================================================
// Costs
// ============================================================================

/// Point cost of a purchasable entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cost {
    Fixed(i32),
    /// `n × tier`
    PerTier(i32),
    /// `n × quantity`
    PerUnit(i32),
}

impl Cost {
    /// Saturates instead of overflowing on out-of-range tiers or quantities.
    pub const fn resolve(self, tier: i32, quantity: i32) -> i32 {
        match self {
            Self::Fixed(n) => n,
            Self::PerTier(n) => n.saturating_mul(tier),
            Self::PerUnit(n) => n.saturating_mul(quantity),
        }
    }

    pub const fn is_per_unit(self) -> bool {
        matches!(self, Self::PerUnit(_))
    }
}

/// Limit point value: fixed, or chosen by the player within a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitCost {
    Fixed(i32),
    Variable { min: i32, max: i32 },
}

impl LimitCost {
    /// Points recorded when the limit is applied.
    ///
    /// Fixed limits ignore `requested`; variable limits require it in range.
    pub fn resolve(self, requested: Option<i32>) -> Result<i32, String> {
        match (self, requested) {
            (Self::Fixed(points), _) => Ok(points),
            (Self::Variable { min, max }, Some(points)) if (min..=max).contains(&points) => {
                Ok(points)
            }
            (Self::Variable { min, max }, Some(points)) => Err(format!(
                "{points} points is outside the allowed range {min}..={max}"
            )),
            (Self::Variable { min, max }, None) => {
                Err(format!("variable limit requires a point value between {min} and {max}"))
            }
        }
    }

    /// Whether `points` is a value this limit could have produced.
    pub fn accepts(self, points: i32) -> bool {
        match self {
            Self::Fixed(fixed) => fixed == points,
            Self::Variable { min, max } => (min..=max).contains(&points),
        }
    }
}

// ============================================================================
// Definitions
// ============================================================================

/// Tags on limits that interact with archetypes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum LimitRestriction {
    /// Unavailable to the behemoth movement archetype.
    BehemothRestricted,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub cost: LimitCost,
    #[serde(default)]
    pub restrictions: Vec<LimitRestriction>,
    #[serde(default)]
    pub description: String,
}

impl LimitDefinition {
    pub fn has_restriction(&self, restriction: LimitRestriction) -> bool {
        self.restrictions.contains(&restriction)
    }
}

/// Prerequisite an attack must satisfy to take an upgrade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeRequirement {
    AttackType(AttackType),
    /// Any of the listed effect types.
    EffectType(Vec<EffectType>),
}

impl UpgradeRequirement {
    pub fn is_met(&self, attack: &SpecialAttack) -> bool {
        match self {
            Self::AttackType(attack_type) => attack.has_attack_type(*attack_type),
            Self::EffectType(effects) => effects.contains(&attack.effect_type),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::AttackType(attack_type) => format!("requires the {attack_type} attack type"),
            Self::EffectType(effects) => {
                let names: Vec<String> = effects.iter().map(ToString::to_string).collect();
                format!("requires effect type {}", names.join(" or "))
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub cost: Cost,
    #[serde(default)]
    pub requires: Vec<UpgradeRequirement>,
    #[serde(default)]
    pub description: String,
}

impl UpgradeDefinition {
    /// Requirement descriptions the attack does not satisfy.
    pub fn unmet_requirements(&self, attack: &SpecialAttack) -> Vec<String> {
        self.requires
            .iter()
            .filter(|requirement| !requirement.is_met(attack))
            .map(UpgradeRequirement::describe)
            .collect()
    }
}

/// Magnitude of a stat effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatAmount {
    Flat(i32),
    PerTier(i32),
    /// Scales with the purchased quantity.
    PerUnit(i32),
}

impl StatAmount {
    pub const fn resolve(self, tier: i32, quantity: i32) -> i32 {
        match self {
            Self::Flat(n) => n,
            Self::PerTier(n) => n.saturating_mul(tier),
            Self::PerUnit(n) => n.saturating_mul(quantity),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEffect {
    pub stat: StatKey,
    pub amount: StatAmount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoonDefinition {
    pub id: String,
    pub name: String,
    pub cost: Cost,
    #[serde(default)]
    pub effects: Vec<StatEffect>,
    #[serde(default)]
    pub immunities: EffectTags,
    #[serde(default)]
    pub vulnerabilities: EffectTags,
    #[serde(default)]
    pub disables_passive_healing: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitDefinition {
    pub id: String,
    pub name: String,
    pub cost: Cost,
    /// How many distinct stats one purchase may boost.
    pub max_stat_bonuses: usize,
    /// When the bonus applies at the table; descriptive only.
    #[serde(default)]
    pub trigger: String,
}

/// A stat penalty or construction constraint imposed by a flaw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlawPenalty {
    StatFlat { stat: StatKey, amount: i32 },
    StatPerTier { stat: StatKey, per_tier: i32 },
    ZeroStat(StatKey),
    /// Initiative loses its tier term.
    RemoveInitiativeTierBonus,
    /// Every combat attribute must be at least `tier / divisor`.
    MinimumCombatAttributes { divisor: i32 },
}

/// Reference to one archetype option by category and id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeRef {
    pub category: ArchetypeCategory,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlawDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub penalties: Vec<FlawPenalty>,
    #[serde(default)]
    pub excludes_archetypes: Vec<ArchetypeRef>,
    #[serde(default)]
    pub description: String,
}

impl FlawDefinition {
    /// The minimum combat attribute required at `tier`, if this flaw imposes one.
    pub fn minimum_combat_attribute(&self, tier: i32) -> Option<i32> {
        self.penalties.iter().find_map(|penalty| match penalty {
            FlawPenalty::MinimumCombatAttributes { divisor } if *divisor > 0 => {
                Some(tier / divisor)
            }
            _ => None,
        })
    }

    pub fn excludes(&self, category: ArchetypeCategory, id: &str) -> bool {
        self.excludes_archetypes
            .iter()
            .any(|excluded| excluded.category == category && excluded.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryActionUpgradeDefinition {
    pub id: String,
    pub name: String,
    pub cost: Cost,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ExpertiseKind {
    Activity,
    Situational,
}

impl ExpertiseKind {
    pub const fn cost(self, level: ExpertiseLevel) -> i32 {
        match (self, level) {
            (Self::Activity, ExpertiseLevel::Basic) => 2,
            (Self::Activity, ExpertiseLevel::Mastered) => 6,
            (Self::Situational, ExpertiseLevel::Basic) => 1,
            (Self::Situational, ExpertiseLevel::Mastered) => 3,
        }
    }

    /// Charge for one list entry: mastering costs the difference over basic.
    pub const fn step_cost(self, level: ExpertiseLevel) -> i32 {
        match level {
            ExpertiseLevel::Basic => self.cost(ExpertiseLevel::Basic),
            ExpertiseLevel::Mastered => {
                self.cost(ExpertiseLevel::Mastered) - self.cost(ExpertiseLevel::Basic)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertiseDefinition {
    pub id: String,
    pub name: String,
    pub attribute: AttributeKey,
    pub kind: ExpertiseKind,
}

/// A feature, sense, movement mode or descriptor bought from the utility pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityItemDefinition {
    pub id: String,
    pub name: String,
    pub cost: i32,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ConditionTier {
    Basic,
    Advanced,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionDefinition {
    pub id: String,
    pub name: String,
    pub tier: ConditionTier,
}

// ============================================================================
// Indexed tables
// ============================================================================

/// An entry addressable by a unique string id.
pub trait CatalogEntry {
    const KIND: CatalogKind;

    fn id(&self) -> &str;
}

macro_rules! catalog_entry {
    ($($ty:ty => $kind:expr),+ $(,)?) => {
        $(
            impl CatalogEntry for $ty {
                const KIND: CatalogKind = $kind;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

catalog_entry! {
    UpgradeDefinition => CatalogKind::Upgrade,
    BoonDefinition => CatalogKind::Boon,
    TraitDefinition => CatalogKind::Trait,
    FlawDefinition => CatalogKind::Flaw,
    PrimaryActionUpgradeDefinition => CatalogKind::PrimaryActionUpgrade,
    ExpertiseDefinition => CatalogKind::Expertise,
    ConditionDefinition => CatalogKind::Condition,
}

/// Entries in file order with an id index.
#[derive(Clone, Debug, PartialEq)]
pub struct Table<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn build(
        entries: Vec<T>,
        kind: CatalogKind,
        id_of: impl Fn(&T) -> &str,
    ) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let id = id_of(entry);
            if index.insert(id.to_string(), i).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind,
                    id: id.to_string(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: CatalogEntry> Table<T> {
    fn from_entries(entries: Vec<T>) -> Result<Self, CatalogError> {
        Self::build(entries, T::KIND, T::id)
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Flat, serializable catalog contents as stored in data files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
    pub limits: Vec<LimitDefinition>,
    pub upgrades: Vec<UpgradeDefinition>,
    pub boons: Vec<BoonDefinition>,
    pub traits: Vec<TraitDefinition>,
    pub flaws: Vec<FlawDefinition>,
    pub primary_action_upgrades: Vec<PrimaryActionUpgradeDefinition>,
    pub expertise: Vec<ExpertiseDefinition>,
    pub features: Vec<UtilityItemDefinition>,
    pub senses: Vec<UtilityItemDefinition>,
    pub movement: Vec<UtilityItemDefinition>,
    pub descriptors: Vec<UtilityItemDefinition>,
    pub conditions: Vec<ConditionDefinition>,
}

/// Indexed, validated catalog. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    limits: LimitTree,
    upgrades: Table<UpgradeDefinition>,
    boons: Table<BoonDefinition>,
    traits: Table<TraitDefinition>,
    flaws: Table<FlawDefinition>,
    primary_action_upgrades: Table<PrimaryActionUpgradeDefinition>,
    expertise: Table<ExpertiseDefinition>,
    features: Table<UtilityItemDefinition>,
    senses: Table<UtilityItemDefinition>,
    movement: Table<UtilityItemDefinition>,
    descriptors: Table<UtilityItemDefinition>,
    conditions: Table<ConditionDefinition>,
}

impl Catalog {
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self, CatalogError> {
        for limit in &snapshot.limits {
            if let LimitCost::Variable { min, max } = limit.cost {
                if min < 0 || min > max {
                    return Err(invalid(
                        CatalogKind::Limit,
                        &limit.id,
                        format!("variable range {min}..={max} is empty or negative"),
                    ));
                }
            }
        }
        for entry in &snapshot.traits {
            if entry.max_stat_bonuses == 0 {
                return Err(invalid(
                    CatalogKind::Trait,
                    &entry.id,
                    "max_stat_bonuses must be at least 1",
                ));
            }
        }
        for flaw in &snapshot.flaws {
            for excluded in &flaw.excludes_archetypes {
                if Archetype::parse(excluded.category, &excluded.id).is_none() {
                    return Err(invalid(
                        CatalogKind::Flaw,
                        &flaw.id,
                        format!("excludes unknown {} archetype '{}'", excluded.category, excluded.id),
                    ));
                }
            }
        }

        Ok(Self {
            limits: LimitTree::build(snapshot.limits)?,
            upgrades: Table::from_entries(snapshot.upgrades)?,
            boons: Table::from_entries(snapshot.boons)?,
            traits: Table::from_entries(snapshot.traits)?,
            flaws: Table::from_entries(snapshot.flaws)?,
            primary_action_upgrades: Table::from_entries(snapshot.primary_action_upgrades)?,
            expertise: Table::from_entries(snapshot.expertise)?,
            features: utility_table(snapshot.features, CatalogKind::Feature)?,
            senses: utility_table(snapshot.senses, CatalogKind::Sense)?,
            movement: utility_table(snapshot.movement, CatalogKind::MovementFeature)?,
            descriptors: utility_table(snapshot.descriptors, CatalogKind::Descriptor)?,
            conditions: Table::from_entries(snapshot.conditions)?,
        })
    }

    pub fn limits(&self) -> &LimitTree {
        &self.limits
    }

    pub fn limit(&self, id: &str) -> Option<&LimitNode> {
        self.limits.get(id)
    }

    pub fn upgrades(&self) -> &Table<UpgradeDefinition> {
        &self.upgrades
    }

    pub fn upgrade(&self, id: &str) -> Option<&UpgradeDefinition> {
        self.upgrades.get(id)
    }

    pub fn boons(&self) -> &Table<BoonDefinition> {
        &self.boons
    }

    pub fn boon(&self, id: &str) -> Option<&BoonDefinition> {
        self.boons.get(id)
    }

    pub fn traits(&self) -> &Table<TraitDefinition> {
        &self.traits
    }

    pub fn trait_definition(&self, id: &str) -> Option<&TraitDefinition> {
        self.traits.get(id)
    }

    pub fn flaws(&self) -> &Table<FlawDefinition> {
        &self.flaws
    }

    pub fn flaw(&self, id: &str) -> Option<&FlawDefinition> {
        self.flaws.get(id)
    }

    pub fn primary_action_upgrades(&self) -> &Table<PrimaryActionUpgradeDefinition> {
        &self.primary_action_upgrades
    }

    pub fn primary_action_upgrade(&self, id: &str) -> Option<&PrimaryActionUpgradeDefinition> {
        self.primary_action_upgrades.get(id)
    }

    pub fn expertise(&self) -> &Table<ExpertiseDefinition> {
        &self.expertise
    }

    pub fn expertise_entry(&self, id: &str) -> Option<&ExpertiseDefinition> {
        self.expertise.get(id)
    }

    pub fn utility_items(&self, kind: UtilityItemKind) -> &Table<UtilityItemDefinition> {
        match kind {
            UtilityItemKind::Feature => &self.features,
            UtilityItemKind::Sense => &self.senses,
            UtilityItemKind::Movement => &self.movement,
            UtilityItemKind::Descriptor => &self.descriptors,
        }
    }

    pub fn utility_item(&self, kind: UtilityItemKind, id: &str) -> Option<&UtilityItemDefinition> {
        self.utility_items(kind).get(id)
    }

    pub fn conditions(&self) -> &Table<ConditionDefinition> {
        &self.conditions
    }

    pub fn condition(&self, id: &str) -> Option<&ConditionDefinition> {
        self.conditions.get(id)
    }

    /// Entry counts per kind, for listings and load logs.
    pub fn counts(&self) -> Vec<(CatalogKind, usize)> {
        vec![
            (CatalogKind::Limit, self.limits.len()),
            (CatalogKind::Upgrade, self.upgrades.len()),
            (CatalogKind::Boon, self.boons.len()),
            (CatalogKind::Trait, self.traits.len()),
            (CatalogKind::Flaw, self.flaws.len()),
            (CatalogKind::PrimaryActionUpgrade, self.primary_action_upgrades.len()),
            (CatalogKind::Expertise, self.expertise.len()),
            (CatalogKind::Feature, self.features.len()),
            (CatalogKind::Sense, self.senses.len()),
            (CatalogKind::MovementFeature, self.movement.len()),
            (CatalogKind::Descriptor, self.descriptors.len()),
            (CatalogKind::Condition, self.conditions.len()),
        ]
    }

    /// Cost of an upgrade on an attack at `tier`; unknown ids cost nothing.
    pub fn upgrade_cost(&self, id: &str, tier: i32, quantity: i32) -> i32 {
        self.upgrade(id)
            .map_or(0, |upgrade| upgrade.cost.resolve(tier, quantity))
    }

    /// Advanced-condition cost for one attack, after free grants.
    pub fn advanced_condition_cost(count: usize, free: usize) -> i32 {
        let paid = i32::try_from(count.saturating_sub(free)).unwrap_or(i32::MAX);
        paid.saturating_mul(RulesConfig::ADVANCED_CONDITION_COST)
    }
}

fn utility_table(
    entries: Vec<UtilityItemDefinition>,
    kind: CatalogKind,
) -> Result<Table<UtilityItemDefinition>, CatalogError> {
    Table::build(entries, kind, |item| item.id.as_str())
}

fn invalid(kind: CatalogKind, id: &str, reason: impl Into<String>) -> CatalogError {
    CatalogError::InvalidEntry {
        kind,
        id: id.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::AttackId;
    use crate::testing::sample_catalog;

    #[test]
    fn costs_resolve_by_kind() {
        assert_eq!(Cost::Fixed(20).resolve(7, 3), 20);
        assert_eq!(Cost::PerTier(10).resolve(7, 3), 70);
        assert_eq!(Cost::PerUnit(5).resolve(7, 3), 15);
        assert_eq!(Cost::PerTier(10).resolve(i32::MAX, 1), i32::MAX);
        assert_eq!(Cost::PerUnit(5).resolve(7, i32::MAX), i32::MAX);
    }

    #[test]
    fn variable_limits_need_points_in_range() {
        let cost = LimitCost::Variable { min: 10, max: 30 };
        assert_eq!(cost.resolve(Some(20)), Ok(20));
        assert!(cost.resolve(Some(40)).is_err());
        assert!(cost.resolve(None).is_err());
        assert_eq!(LimitCost::Fixed(30).resolve(Some(5)), Ok(30));
    }

    #[test]
    fn sample_catalog_indexes_everything() {
        let catalog = sample_catalog();
        assert!(catalog.limit("chargesNoRecharge").is_some());
        assert_eq!(catalog.limits().category("cooldownEscalating"), Some("cooldown"));
        assert!(catalog.upgrade("brutal").is_some());
        assert!(catalog.boon("robot").is_some());
        assert!(catalog.flaw("balanced").is_some());
        assert!(catalog.utility_item(UtilityItemKind::Sense, "darkvision").is_some());
        assert!(catalog.condition("stunned").is_some());
        assert!(catalog.counts().iter().all(|(_, n)| *n > 0));
    }

    #[test]
    fn duplicate_upgrade_ids_are_rejected() {
        let upgrade = UpgradeDefinition {
            id: "brutal".into(),
            name: "Brutal".into(),
            category: "damage".into(),
            cost: Cost::Fixed(40),
            requires: Vec::new(),
            description: String::new(),
        };
        let snapshot = CatalogSnapshot {
            upgrades: vec![upgrade.clone(), upgrade],
            ..CatalogSnapshot::default()
        };
        assert_eq!(
            Catalog::from_snapshot(snapshot).unwrap_err(),
            CatalogError::DuplicateId {
                kind: CatalogKind::Upgrade,
                id: "brutal".into()
            }
        );
    }

    #[test]
    fn inverted_variable_range_is_rejected() {
        let snapshot = CatalogSnapshot {
            limits: vec![LimitDefinition {
                id: "odd".into(),
                name: "Odd".into(),
                parent: None,
                cost: LimitCost::Variable { min: 30, max: 10 },
                restrictions: Vec::new(),
                description: String::new(),
            }],
            ..CatalogSnapshot::default()
        };
        assert!(matches!(
            Catalog::from_snapshot(snapshot),
            Err(CatalogError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn upgrade_requirements_check_the_attack() {
        let catalog = sample_catalog();
        let mut attack = SpecialAttack::new(AttackId(1), "Wave");
        let scale = catalog.upgrade("enhancedScale").unwrap();
        assert_eq!(scale.unmet_requirements(&attack).len(), 1);
        attack.attack_types.push(AttackType::Area);
        assert!(scale.unmet_requirements(&attack).is_empty());
    }

    #[test]
    fn balanced_minimum_is_half_tier() {
        let catalog = sample_catalog();
        let balanced = catalog.flaw("balanced").unwrap();
        assert_eq!(balanced.minimum_combat_attribute(4), Some(2));
        assert_eq!(balanced.minimum_combat_attribute(7), Some(3));
        assert_eq!(catalog.flaw("sickly").unwrap().minimum_combat_attribute(4), None);
    }

    #[test]
    fn advanced_conditions_cost_after_free_grants() {
        assert_eq!(Catalog::advanced_condition_cost(3, 0), 60);
        assert_eq!(Catalog::advanced_condition_cost(3, 2), 20);
        assert_eq!(Catalog::advanced_condition_cost(1, 2), 0);
    }
}
