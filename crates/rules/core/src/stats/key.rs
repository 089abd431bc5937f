//! Stat identifiers and their display categories.

use serde::{Deserialize, Serialize};

/// Which part of the sheet a stat belongs to.
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
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum StatCategory {
    Combat,
    Defense,
    Utility,
}

/// Every derived stat the pipeline computes.
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
    strum::EnumCount,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum StatKey {
    Accuracy,
    Damage,
    Conditions,
    Initiative,
    Movement,
    Reactions,
    Avoidance,
    Durability,
    Resolve,
    Stability,
    Vitality,
    Hp,
    Awareness,
    Communication,
    Intelligence,
}

impl StatKey {
    /// The nine stats raised by the cutAbove archetype.
    pub const CUT_ABOVE: [Self; 9] = [
        Self::Accuracy,
        Self::Damage,
        Self::Conditions,
        Self::Avoidance,
        Self::Durability,
        Self::Resolve,
        Self::Stability,
        Self::Vitality,
        Self::Initiative,
    ];

    pub const fn category(self) -> StatCategory {
        match self {
            Self::Accuracy
            | Self::Damage
            | Self::Conditions
            | Self::Initiative
            | Self::Movement
            | Self::Reactions => StatCategory::Combat,
            Self::Avoidance
            | Self::Durability
            | Self::Resolve
            | Self::Stability
            | Self::Vitality
            | Self::Hp => StatCategory::Defense,
            Self::Awareness | Self::Communication | Self::Intelligence => StatCategory::Utility,
        }
    }

    /// Stats that trait and flaw bonus selections may target.
    pub const fn is_bonusable(self) -> bool {
        !matches!(
            self,
            Self::Reactions | Self::Hp | Self::Awareness | Self::Communication | Self::Intelligence
        )
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}
