//! Tier arithmetic: bounds, bonuses and per-tier budgets.
//!
//! Everything here is a pure function of the tier (plus an attribute or
//! archetype where noted). Only the pool and archetype-point lookups can fail.

use core::str::FromStr;

use serde::Serialize;

use crate::archetype::SpecialAttackArchetype;
use crate::config::RulesConfig;
use crate::error::TierError;
use crate::limits::LimitScaling;

pub fn is_valid_tier(tier: i32) -> bool {
    (RulesConfig::TIER_MIN..=RulesConfig::TIER_MAX).contains(&tier)
}

pub fn validate_tier(tier: i32) -> Result<(), TierError> {
    if is_valid_tier(tier) {
        Ok(())
    } else {
        Err(TierError::InvalidTier {
            tier,
            min: RulesConfig::TIER_MIN,
            max: RulesConfig::TIER_MAX,
        })
    }
}

/// `max(mobility + 6, mobility + tier)`
pub fn calculate_base_movement(tier: i32, mobility: i32) -> i32 {
    mobility
        .saturating_add(RulesConfig::BASE_MOVEMENT_BONUS)
        .max(mobility.saturating_add(tier))
}

/// Half the tier, rounded up.
pub const fn half_tier_bonus(tier: i32) -> i32 {
    tier.saturating_add(1).div_euclid(2)
}

/// The cutAbove bonus for the tier band.
pub const fn cut_above_bonus(tier: i32) -> i32 {
    if tier <= 4 {
        1
    } else if tier <= 7 {
        2
    } else {
        3
    }
}

pub fn main_pool_base(tier: i32) -> i32 {
    tier.saturating_sub(RulesConfig::MAIN_POOL_BASE_TIER)
        .saturating_mul(RulesConfig::MAIN_POOL_MULT)
        .max(0)
}

pub fn utility_pool_base(tier: i32, base_tier: i32) -> i32 {
    tier.saturating_sub(base_tier)
        .saturating_mul(RulesConfig::UTILITY_POOL_MULT)
        .max(0)
}

/// See [`crate::limits::calculate_limit_scaling`].
pub fn calculate_limit_scaling(
    limit_points: i32,
    tier: i32,
    archetype: Option<SpecialAttackArchetype>,
) -> LimitScaling {
    crate::limits::calculate_limit_scaling(limit_points, tier, archetype)
}

/// Base budgets for a valid tier, before archetype adjustments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TierPools {
    pub combat_attributes: i32,
    pub utility_attributes: i32,
    pub main_pool: i32,
    pub utility_pool_specialized: i32,
    pub utility_pool_practical: i32,
}

pub fn point_pools(tier: i32) -> Result<TierPools, TierError> {
    validate_tier(tier)?;
    Ok(TierPools {
        combat_attributes: tier.saturating_mul(RulesConfig::COMBAT_MULT),
        utility_attributes: tier.saturating_mul(RulesConfig::UTILITY_MULT),
        main_pool: main_pool_base(tier),
        utility_pool_specialized: utility_pool_base(
            tier,
            RulesConfig::UTILITY_BASE_TIER_SPECIALIZED,
        ),
        utility_pool_practical: utility_pool_base(tier, RulesConfig::UTILITY_BASE_TIER_PRACTICAL),
    })
}

/// Fixed upgrade points per attack for a special-attack archetype id.
///
/// Limit-driven archetypes grant no fixed points and return 0.
pub fn archetype_points(tier: i32, archetype: &str) -> Result<i32, TierError> {
    validate_tier(tier)?;
    let archetype = SpecialAttackArchetype::from_str(archetype)
        .map_err(|_| TierError::UnknownArchetype(archetype.to_string()))?;
    Ok(archetype.fixed_points(tier).unwrap_or(0))
}

/// Display snapshot of every tier-derived constant.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierEffects {
    pub tier: i32,
    pub valid: bool,
    pub max_attribute: i32,
    pub combat_attribute_points: i32,
    pub utility_attribute_points: i32,
    pub main_pool_points: i32,
    pub limit_first_threshold: i32,
    pub limit_second_threshold: i32,
    pub base_movement_bonus: i32,
    pub half_tier_bonus: i32,
    pub cut_above_bonus: i32,
    pub paragon_points: i32,
    pub one_trick_points: i32,
    pub dual_natured_points: i32,
    pub basic_attack_points: i32,
}

/// Total: out-of-range tiers produce a snapshot with `valid == false`.
pub fn get_tier_effects(tier: i32) -> TierEffects {
    let fixed = |archetype: SpecialAttackArchetype| archetype.fixed_points(tier).unwrap_or(0);
    TierEffects {
        tier,
        valid: is_valid_tier(tier),
        max_attribute: tier,
        combat_attribute_points: tier.saturating_mul(RulesConfig::COMBAT_MULT),
        utility_attribute_points: tier.saturating_mul(RulesConfig::UTILITY_MULT),
        main_pool_points: main_pool_base(tier),
        limit_first_threshold: tier.saturating_mul(RulesConfig::LIMIT_FIRST_MULT),
        limit_second_threshold: tier.saturating_mul(RulesConfig::LIMIT_SECOND_MULT),
        base_movement_bonus: RulesConfig::BASE_MOVEMENT_BONUS,
        half_tier_bonus: half_tier_bonus(tier),
        cut_above_bonus: cut_above_bonus(tier),
        paragon_points: fixed(SpecialAttackArchetype::Paragon),
        one_trick_points: fixed(SpecialAttackArchetype::OneTrick),
        dual_natured_points: fixed(SpecialAttackArchetype::DualNatured),
        basic_attack_points: fixed(SpecialAttackArchetype::Basic),
    }
}
