//! Main pool and utility pool purchase records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::AttributeKey;
use crate::stats::StatKey;

fn one() -> i32 {
    1
}

/// A purchased boon. `quantity` only matters for per-unit costs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoonPurchase {
    pub id: String,
    #[serde(default = "one")]
    pub quantity: i32,
}

impl BoonPurchase {
    pub fn new(id: impl Into<String>, quantity: i32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// A purchased trait and the stats it boosts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitPurchase {
    pub id: String,
    #[serde(default)]
    pub stat_bonuses: Vec<StatKey>,
    /// Stable purchase order shared with flaws; drives stacking reduction.
    #[serde(default)]
    pub sequence: u64,
}

/// A purchased flaw and its optional stat bonus selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlawPurchase {
    pub id: String,
    #[serde(default)]
    pub stat_bonus: Option<StatKey>,
    #[serde(default)]
    pub sequence: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MainPoolPurchases {
    pub boons: Vec<BoonPurchase>,
    pub traits: Vec<TraitPurchase>,
    pub flaws: Vec<FlawPurchase>,
    pub primary_action_upgrades: Vec<String>,
}

impl MainPoolPurchases {
    pub fn is_empty(&self) -> bool {
        self.boons.is_empty()
            && self.traits.is_empty()
            && self.flaws.is_empty()
            && self.primary_action_upgrades.is_empty()
    }

    /// Sequence number for the next trait or flaw purchase.
    pub fn next_sequence(&self) -> u64 {
        let traits = self.traits.iter().map(|t| t.sequence);
        let flaws = self.flaws.iter().map(|f| f.sequence);
        traits.chain(flaws).max().map_or(1, |max| max.saturating_add(1))
    }

    pub fn has_flaw(&self, id: &str) -> bool {
        self.flaws.iter().any(|flaw| flaw.id == id)
    }

    pub fn has_boon(&self, id: &str) -> bool {
        self.boons.iter().any(|boon| boon.id == id)
    }
}

/// Expertise depth.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ExpertiseLevel {
    Basic,
    Mastered,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpertiseLevels {
    pub basic: Vec<String>,
    pub mastered: Vec<String>,
}

impl ExpertiseLevels {
    pub fn list(&self, level: ExpertiseLevel) -> &Vec<String> {
        match level {
            ExpertiseLevel::Basic => &self.basic,
            ExpertiseLevel::Mastered => &self.mastered,
        }
    }

    pub fn list_mut(&mut self, level: ExpertiseLevel) -> &mut Vec<String> {
        match level {
            ExpertiseLevel::Basic => &mut self.basic,
            ExpertiseLevel::Mastered => &mut self.mastered,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.basic.is_empty() && self.mastered.is_empty()
    }
}

/// The non-expertise utility purchase lists.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum UtilityItemKind {
    Feature,
    Sense,
    Movement,
    Descriptor,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityPurchases {
    pub expertise: BTreeMap<AttributeKey, ExpertiseLevels>,
    pub features: Vec<String>,
    pub senses: Vec<String>,
    pub movement: Vec<String>,
    pub descriptors: Vec<String>,
}

impl UtilityPurchases {
    pub fn items(&self, kind: UtilityItemKind) -> &Vec<String> {
        match kind {
            UtilityItemKind::Feature => &self.features,
            UtilityItemKind::Sense => &self.senses,
            UtilityItemKind::Movement => &self.movement,
            UtilityItemKind::Descriptor => &self.descriptors,
        }
    }

    pub fn items_mut(&mut self, kind: UtilityItemKind) -> &mut Vec<String> {
        match kind {
            UtilityItemKind::Feature => &mut self.features,
            UtilityItemKind::Sense => &mut self.senses,
            UtilityItemKind::Movement => &mut self.movement,
            UtilityItemKind::Descriptor => &mut self.descriptors,
        }
    }

    pub fn has_expertise(&self) -> bool {
        self.expertise.values().any(|levels| !levels.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        !self.has_expertise()
            && self.features.is_empty()
            && self.senses.is_empty()
            && self.movement.is_empty()
            && self.descriptors.is_empty()
    }
}
