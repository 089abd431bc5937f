//! Special attack entities owned by a character.

use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;

/// Identifier of a special attack, unique within one character.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AttackId(pub u32);

impl core::fmt::Display for AttackId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Canonical attack delivery types. An attack holds at most one of each.
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
pub enum AttackType {
    Melee,
    Ranged,
    Direct,
    Area,
    Hybrid,
}

impl AttackType {
    /// Upgrade point cost when the type is not granted free by the archetype.
    pub const fn cost(self) -> i32 {
        match self {
            Self::Melee | Self::Ranged => RulesConfig::SINGLE_TARGET_TYPE_COST,
            Self::Direct | Self::Area | Self::Hybrid => RulesConfig::AREA_TYPE_COST,
        }
    }

    /// Types that carry the flat accuracy/damage penalty.
    pub const fn is_penalized(self) -> bool {
        matches!(self, Self::Direct | Self::Area | Self::Hybrid)
    }
}

/// What an attack does on hit.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum EffectType {
    #[default]
    Damage,
    Condition,
    Hybrid,
}

impl EffectType {
    pub const fn allows_conditions(self) -> bool {
        matches!(self, Self::Condition | Self::Hybrid)
    }
}

/// A limit applied to an attack.
///
/// `category` and `parent` mirror the catalog tree at the time the limit was
/// added; the catalog remains authoritative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSelection {
    pub id: String,
    pub points: i32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub parent: Option<String>,
}

/// An upgrade purchased for an attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeSelection {
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

impl UpgradeSelection {
    pub fn new(id: impl Into<String>, quantity: i32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// Derived point totals for one attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackPointCache {
    pub limit_points_total: i32,
    pub upgrade_points_from_limits: i32,
    pub upgrade_points_from_archetype: i32,
    pub upgrade_points_available: i32,
    pub upgrade_points_spent: i32,
}

impl AttackPointCache {
    pub fn remaining(&self) -> i32 {
        self.upgrade_points_available
            .saturating_sub(self.upgrade_points_spent)
    }
}

/// A configurable special attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialAttack {
    pub id: AttackId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attack_types: Vec<AttackType>,
    #[serde(default)]
    pub effect_type: EffectType,
    #[serde(default)]
    pub limits: Vec<LimitSelection>,
    #[serde(default)]
    pub upgrades: Vec<UpgradeSelection>,
    #[serde(default)]
    pub basic_conditions: Vec<String>,
    #[serde(default)]
    pub advanced_conditions: Vec<String>,

    // Cached totals; written only by `systems::special_attacks::recalculate_attack_points`.
    #[serde(default)]
    limit_points_total: i32,
    #[serde(default)]
    upgrade_points_from_limits: i32,
    #[serde(default)]
    upgrade_points_from_archetype: i32,
    #[serde(default)]
    upgrade_points_available: i32,
    #[serde(default)]
    upgrade_points_spent: i32,
}

impl SpecialAttack {
    pub fn new(id: AttackId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attack_types: Vec::new(),
            effect_type: EffectType::Damage,
            limits: Vec::new(),
            upgrades: Vec::new(),
            basic_conditions: Vec::new(),
            advanced_conditions: Vec::new(),
            limit_points_total: 0,
            upgrade_points_from_limits: 0,
            upgrade_points_from_archetype: 0,
            upgrade_points_available: 0,
            upgrade_points_spent: 0,
        }
    }

    pub fn has_attack_type(&self, attack_type: AttackType) -> bool {
        self.attack_types.contains(&attack_type)
    }

    pub fn has_limit(&self, id: &str) -> bool {
        self.limits.iter().any(|limit| limit.id == id)
    }

    pub fn has_upgrade(&self, id: &str) -> bool {
        self.upgrades.iter().any(|upgrade| upgrade.id == id)
    }

    pub fn has_condition(&self, id: &str) -> bool {
        self.basic_conditions.iter().any(|c| c == id)
            || self.advanced_conditions.iter().any(|c| c == id)
    }

    /// The stored point cache as last written by the engine.
    pub fn cached_points(&self) -> AttackPointCache {
        AttackPointCache {
            limit_points_total: self.limit_points_total,
            upgrade_points_from_limits: self.upgrade_points_from_limits,
            upgrade_points_from_archetype: self.upgrade_points_from_archetype,
            upgrade_points_available: self.upgrade_points_available,
            upgrade_points_spent: self.upgrade_points_spent,
        }
    }

    pub(crate) fn store_points(&mut self, points: AttackPointCache) {
        self.limit_points_total = points.limit_points_total;
        self.upgrade_points_from_limits = points.upgrade_points_from_limits;
        self.upgrade_points_from_archetype = points.upgrade_points_from_archetype;
        self.upgrade_points_available = points.upgrade_points_available;
        self.upgrade_points_spent = points.upgrade_points_spent;
    }
}
