//! The character document.
//!
//! [`Character`] is the root mutable record the UI edits. It is plain data:
//! every rule lives in the systems, calculators and validators that read it.
//! The serde shape (camelCase keys, archetypes as strings) is the persisted
//! document format and must stay stable for existing saved characters.

mod attack;
mod purchases;

pub use attack::{
    AttackId, AttackPointCache, AttackType, EffectType, LimitSelection, SpecialAttack,
    UpgradeSelection,
};
pub use purchases::{
    BoonPurchase, ExpertiseLevel, ExpertiseLevels, FlawPurchase, MainPoolPurchases,
    TraitPurchase, UtilityItemKind, UtilityPurchases,
};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::archetype::ArchetypeCategory;
use crate::config::RulesConfig;

/// Which attribute pool an attribute draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AttributePool {
    Combat,
    Utility,
}

/// The seven fixed attribute keys.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum AttributeKey {
    Focus,
    Mobility,
    Power,
    Endurance,
    Awareness,
    Communication,
    Intelligence,
}

impl AttributeKey {
    pub const COMBAT: [Self; 4] = [Self::Focus, Self::Mobility, Self::Power, Self::Endurance];
    pub const UTILITY: [Self; 3] = [Self::Awareness, Self::Communication, Self::Intelligence];

    pub const fn pool(self) -> AttributePool {
        match self {
            Self::Focus | Self::Mobility | Self::Power | Self::Endurance => AttributePool::Combat,
            Self::Awareness | Self::Communication | Self::Intelligence => AttributePool::Utility,
        }
    }
}

/// Raw attribute values. Each must stay within `0..=tier`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    pub focus: i32,
    pub mobility: i32,
    pub power: i32,
    pub endurance: i32,
    pub awareness: i32,
    pub communication: i32,
    pub intelligence: i32,
}

impl Attributes {
    pub fn get(&self, key: AttributeKey) -> i32 {
        match key {
            AttributeKey::Focus => self.focus,
            AttributeKey::Mobility => self.mobility,
            AttributeKey::Power => self.power,
            AttributeKey::Endurance => self.endurance,
            AttributeKey::Awareness => self.awareness,
            AttributeKey::Communication => self.communication,
            AttributeKey::Intelligence => self.intelligence,
        }
    }

    pub fn set(&mut self, key: AttributeKey, value: i32) {
        let slot = match key {
            AttributeKey::Focus => &mut self.focus,
            AttributeKey::Mobility => &mut self.mobility,
            AttributeKey::Power => &mut self.power,
            AttributeKey::Endurance => &mut self.endurance,
            AttributeKey::Awareness => &mut self.awareness,
            AttributeKey::Communication => &mut self.communication,
            AttributeKey::Intelligence => &mut self.intelligence,
        };
        *slot = value;
    }

    /// All seven attributes in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, i32)> + '_ {
        AttributeKey::iter().map(|key| (key, self.get(key)))
    }

    /// Sum of the attributes drawing from `pool`.
    pub fn total(&self, pool: AttributePool) -> i32 {
        self.iter()
            .filter(|(key, _)| key.pool() == pool)
            .fold(0, |total: i32, (_, value)| total.saturating_add(value))
    }

    pub fn any_assigned(&self) -> bool {
        self.iter().any(|(_, value)| value > 0)
    }
}

/// One archetype id (or nothing) per category.
///
/// Stored as strings so that documents carrying ids unknown to this build
/// still load; the archetype system resolves and reports them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArchetypeSelections {
    pub movement: Option<String>,
    pub attack_type: Option<String>,
    pub effect_type: Option<String>,
    pub unique_ability: Option<String>,
    pub defensive: Option<String>,
    pub special_attack: Option<String>,
    pub utility: Option<String>,
}

impl ArchetypeSelections {
    pub fn get(&self, category: ArchetypeCategory) -> Option<&str> {
        self.slot(category).as_deref()
    }

    pub fn set(&mut self, category: ArchetypeCategory, id: Option<String>) {
        *self.slot_mut(category) = id;
    }

    fn slot(&self, category: ArchetypeCategory) -> &Option<String> {
        match category {
            ArchetypeCategory::Movement => &self.movement,
            ArchetypeCategory::AttackType => &self.attack_type,
            ArchetypeCategory::EffectType => &self.effect_type,
            ArchetypeCategory::UniqueAbility => &self.unique_ability,
            ArchetypeCategory::Defensive => &self.defensive,
            ArchetypeCategory::SpecialAttack => &self.special_attack,
            ArchetypeCategory::Utility => &self.utility,
        }
    }

    fn slot_mut(&mut self, category: ArchetypeCategory) -> &mut Option<String> {
        match category {
            ArchetypeCategory::Movement => &mut self.movement,
            ArchetypeCategory::AttackType => &mut self.attack_type,
            ArchetypeCategory::EffectType => &mut self.effect_type,
            ArchetypeCategory::UniqueAbility => &mut self.unique_ability,
            ArchetypeCategory::Defensive => &mut self.defensive,
            ArchetypeCategory::SpecialAttack => &mut self.special_attack,
            ArchetypeCategory::Utility => &mut self.utility,
        }
    }

    /// Categories without a selection, in canonical order.
    pub fn missing(&self) -> Vec<ArchetypeCategory> {
        ArchetypeCategory::iter()
            .filter(|category| self.get(*category).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

/// The root character document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Character {
    pub tier: i32,
    pub attributes: Attributes,
    pub archetypes: ArchetypeSelections,
    pub main_pool_purchases: MainPoolPurchases,
    pub utility_purchases: UtilityPurchases,
    pub special_attacks: Vec<SpecialAttack>,
}

impl Character {
    /// A blank character at `tier`: zeroed attributes, no archetypes, no purchases.
    pub fn new(tier: i32) -> Self {
        Self {
            tier,
            attributes: Attributes::default(),
            archetypes: ArchetypeSelections::default(),
            main_pool_purchases: MainPoolPurchases::default(),
            utility_purchases: UtilityPurchases::default(),
            special_attacks: Vec::new(),
        }
    }

    /// A blank character at the configured default tier.
    pub fn from_config(config: &RulesConfig) -> Self {
        Self::new(config.default_tier)
    }

    pub fn attack(&self, id: AttackId) -> Option<&SpecialAttack> {
        self.special_attacks.iter().find(|attack| attack.id == id)
    }

    pub fn attack_mut(&mut self, id: AttackId) -> Option<&mut SpecialAttack> {
        self.special_attacks.iter_mut().find(|attack| attack.id == id)
    }

    /// Next unused attack id (one past the highest in use).
    pub fn next_attack_id(&self) -> AttackId {
        let next = self
            .special_attacks
            .iter()
            .map(|attack| attack.id.0)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        AttackId(next)
    }

    pub fn has_main_pool_purchases(&self) -> bool {
        !self.main_pool_purchases.is_empty()
    }

    pub fn has_utility_purchases(&self) -> bool {
        !self.utility_purchases.is_empty()
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new(RulesConfig::DEFAULT_TIER)
    }
}
