//! Derived statistics.
//!
//! Stats come out of a fixed five-stage pipeline:
//! Base → Archetype → Boon → Trait/flaw stacking → Final (penalties + clamp).
//!
//! Every stage records what it added as a [`Contribution`], so the sum of a
//! stat's contributions always equals its final value.

mod cache;
mod key;
mod pipeline;
pub mod stacking;

pub use cache::{Fingerprint, StatCache, fingerprint};
pub use key::{StatCategory, StatKey};
pub use pipeline::{calculate_all_stats, calculate_specific_stats};

use std::collections::BTreeMap;

use serde::Serialize;

use crate::archetype::{EffectTypeArchetype, ResolvedArchetypes};
use crate::catalog::EffectTags;
use crate::character::{Character, EffectType, SpecialAttack};

/// Pipeline stage that produced a contribution.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, strum::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Stage {
    /// Tier and attribute formulas.
    Base,
    /// Bonuses granted by the selected archetypes.
    Archetype,
    Boon,
    /// Trait and flaw bonuses after diminishing returns.
    Stacking,
    /// Flaw penalties, then the floors on HP, reactions and avoidance.
    Final,
}

/// One additive change to one stat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub stage: Stage,
    /// What caused the change, e.g. a boon id, `trait:<id>` or `clamp`.
    pub source: String,
    pub stat: StatKey,
    pub amount: i32,
}

/// Final stats grouped by category, with immunities and a contribution log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterStats {
    pub combat: BTreeMap<StatKey, i32>,
    pub defense: BTreeMap<StatKey, i32>,
    pub utility: BTreeMap<StatKey, i32>,
    pub immunities: EffectTags,
    pub vulnerabilities: EffectTags,
    /// Cleared by boons that stop natural recovery.
    pub passive_healing: bool,
    /// Every change in the order the pipeline made it.
    pub contributions: Vec<Contribution>,
}

impl CharacterStats {
    /// The map holding `category`'s stats.
    pub fn section(&self, category: StatCategory) -> &BTreeMap<StatKey, i32> {
        match category {
            StatCategory::Combat => &self.combat,
            StatCategory::Defense => &self.defense,
            StatCategory::Utility => &self.utility,
        }
    }

    /// Final value of `stat`; zero when its category was not computed.
    pub fn get(&self, stat: StatKey) -> i32 {
        self.section(stat.category())
            .get(&stat)
            .copied()
            .unwrap_or_default()
    }

    /// Contributions to one stat, in pipeline order.
    pub fn breakdown(&self, stat: StatKey) -> Vec<&Contribution> {
        self.contributions
            .iter()
            .filter(|contribution| contribution.stat == stat)
            .collect()
    }
}

/// Accuracy, damage and conditions for one special attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AttackProfile {
    pub accuracy: i32,
    pub damage: i32,
    pub conditions: i32,
    /// Flat penalty applied to accuracy and damage.
    pub penalty: i32,
}

/// Applies the attack-type penalty to the character's base attack stats.
///
/// At most one `-tier` penalty applies, whether the attack uses one or
/// several of direct, area and hybrid, or the hybrid effect. The hybrid
/// effect alone carries no penalty for hybridSpecialist.
pub fn attack_profile(
    character: &Character,
    stats: &CharacterStats,
    attack: &SpecialAttack,
) -> AttackProfile {
    let archetypes = ResolvedArchetypes::resolve(&character.archetypes);
    let penalized_type = attack.attack_types.iter().any(|t| t.is_penalized());
    let penalized_effect = attack.effect_type == EffectType::Hybrid
        && archetypes.effect_type != Some(EffectTypeArchetype::HybridSpecialist);
    let penalty = if penalized_type || penalized_effect {
        character.tier
    } else {
        0
    };
    AttackProfile {
        accuracy: stats.get(StatKey::Accuracy).saturating_sub(penalty),
        damage: stats.get(StatKey::Damage).saturating_sub(penalty),
        conditions: stats.get(StatKey::Conditions),
        penalty,
    }
}
