//! Limit scaling and per-attack upgrade point accounting.
//!
//! Limit points convert to upgrade points along a three-segment
//! diminishing-returns curve. Segment thresholds scale with tier and every
//! segment rate is multiplied by the special-attack archetype's rate
//! `m(A)`, so the rounded result is already the spendable amount.
//!
//! ```text
//! value = min(L, 10T)·m + clamp(L − 10T, 0, 20T)·m/2 + max(L − 30T, 0)·m/4
//! final = ceil(value / 10) · 10
//! ```

use serde::Serialize;

use crate::archetype::{
    EffectTypeArchetype, ResolvedArchetypes, SpecialAttackArchetype, SpecialAttackPointMethod,
};
use crate::catalog::Catalog;
use crate::character::{AttackPointCache, SpecialAttack};
use crate::config::RulesConfig;

const ROUNDING_EPSILON: f64 = 1e-9;

/// Ceiling to the next multiple of the rounding step; exact multiples stay.
pub fn round_up_to_step(value: f64) -> i32 {
    if value <= ROUNDING_EPSILON {
        return 0;
    }
    let step = f64::from(RulesConfig::LIMIT_ROUNDING_STEP);
    // Float to int casts saturate.
    #[allow(clippy::cast_possible_truncation)]
    let buckets = ((value - ROUNDING_EPSILON) / step).ceil() as i32;
    buckets.saturating_mul(RulesConfig::LIMIT_ROUNDING_STEP)
}

/// One segment of the scaling curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ScalingSegment {
    pub points: i32,
    pub rate: f64,
    pub value: f64,
}

/// Full result of converting limit points into upgrade points.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitScaling {
    pub limit_points: i32,
    pub tier: i32,
    pub rate_multiplier: f64,
    pub first_threshold: i32,
    pub second_threshold: i32,
    pub segments: [ScalingSegment; 3],
    /// Sum of the segment values before rounding.
    pub total_value: f64,
    /// Spendable upgrade points.
    pub final_points: i32,
}

impl LimitScaling {
    /// Scales `limit_points` at an explicit rate multiplier.
    pub fn with_rate(limit_points: i32, tier: i32, rate_multiplier: f64) -> Self {
        let first_threshold = tier.saturating_mul(RulesConfig::LIMIT_FIRST_MULT);
        let second_threshold = tier.saturating_mul(RulesConfig::LIMIT_SECOND_MULT);

        if limit_points <= 0 || rate_multiplier <= 0.0 {
            return Self {
                limit_points: limit_points.max(0),
                tier,
                rate_multiplier: rate_multiplier.max(0.0),
                first_threshold,
                second_threshold,
                segments: [ScalingSegment::default(); 3],
                total_value: 0.0,
                final_points: 0,
            };
        }

        let first_points = limit_points.min(first_threshold).max(0);
        let second_points = limit_points
            .saturating_sub(first_threshold)
            .clamp(0, second_threshold.max(0));
        let third_points = limit_points
            .saturating_sub(first_threshold)
            .saturating_sub(second_threshold)
            .max(0);

        let segment = |points: i32, base_rate: f64| {
            let rate = base_rate * rate_multiplier;
            ScalingSegment {
                points,
                rate,
                value: f64::from(points) * rate,
            }
        };
        let segments = [
            segment(first_points, RulesConfig::LIMIT_FIRST_VALUE),
            segment(second_points, RulesConfig::LIMIT_SECOND_VALUE),
            segment(third_points, RulesConfig::LIMIT_THIRD_VALUE),
        ];
        let total_value: f64 = segments.iter().map(|s| s.value).sum();

        Self {
            limit_points,
            tier,
            rate_multiplier,
            first_threshold,
            second_threshold,
            segments,
            total_value,
            final_points: round_up_to_step(total_value),
        }
    }

    /// Value added by rounding up.
    pub fn rounding_bonus(&self) -> f64 {
        f64::from(self.final_points) - self.total_value
    }

    /// Additional limit points needed before `final_points` rises, if it can.
    pub fn points_to_next_bucket(&self) -> Option<i32> {
        if self.rate_multiplier <= 0.0 {
            return None;
        }
        let ceiling = self.limit_points.saturating_add(RulesConfig::LIMIT_ROUNDING_STEP * 100);
        (self.limit_points.saturating_add(1)..=ceiling)
            .find(|&points| {
                Self::with_rate(points, self.tier, self.rate_multiplier).final_points
                    > self.final_points
            })
            .map(|points| points - self.limit_points)
    }

    /// Human-readable lines describing each non-empty segment and the total.
    pub fn breakdown(&self) -> Vec<String> {
        let labels = ["First", "Next", "Remaining"];
        let mut lines: Vec<String> = self
            .segments
            .iter()
            .zip(labels)
            .filter(|(segment, _)| segment.points > 0)
            .map(|(segment, label)| {
                format!(
                    "{label} {} points at {:.2}: {:.1}",
                    segment.points, segment.rate, segment.value
                )
            })
            .collect();
        lines.push(format!(
            "Total {:.1}, rounded up to {}",
            self.total_value, self.final_points
        ));
        lines
    }
}

/// Scales limit points for `archetype`; unset or limit-forbidding archetypes yield 0.
pub fn calculate_limit_scaling(
    limit_points: i32,
    tier: i32,
    archetype: Option<SpecialAttackArchetype>,
) -> LimitScaling {
    let rate = archetype.map_or(0.0, |archetype| archetype.rate_multiplier(tier));
    LimitScaling::with_rate(limit_points, tier, rate)
}

/// Sum of the points of every limit on the attack.
pub fn calculate_limit_points_total(attack: &SpecialAttack) -> i32 {
    attack
        .limits
        .iter()
        .fold(0, |total: i32, limit| total.saturating_add(limit.points))
}

/// Where an attack's upgrade points went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpentBreakdown {
    pub attack_types: i32,
    pub upgrades: i32,
    pub advanced_conditions: i32,
}

impl SpentBreakdown {
    pub fn total(&self) -> i32 {
        self.attack_types
            .saturating_add(self.upgrades)
            .saturating_add(self.advanced_conditions)
    }
}

/// Derived point totals for one attack, computed from its current contents.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackPoints {
    pub method: Option<SpecialAttackPointMethod>,
    pub limit_points_total: i32,
    pub scaling: Option<LimitScaling>,
    pub from_limits: i32,
    pub from_archetype: i32,
    pub available: i32,
    pub spent: SpentBreakdown,
}

impl AttackPoints {
    pub fn compute(
        attack: &SpecialAttack,
        tier: i32,
        archetypes: &ResolvedArchetypes,
        catalog: &Catalog,
    ) -> Self {
        let method = archetypes.special_attack_point_method(tier);

        let (limit_points_total, scaling, from_archetype) = match method {
            Some(SpecialAttackPointMethod::LimitsScaled { rate }) => {
                let total = calculate_limit_points_total(attack);
                (total, Some(LimitScaling::with_rate(total, tier, rate)), 0)
            }
            Some(SpecialAttackPointMethod::SharedUses) => {
                let total = calculate_limit_points_total(attack);
                (total, Some(LimitScaling::with_rate(total, tier, 1.0)), 0)
            }
            Some(
                SpecialAttackPointMethod::FixedPoints { per_attack }
                | SpecialAttackPointMethod::FixedPerAttackCapped { per_attack, .. },
            ) => (0, None, per_attack),
            None => (0, None, 0),
        };
        let from_limits = scaling.as_ref().map_or(0, |s| s.final_points);

        Self {
            method,
            limit_points_total,
            scaling,
            from_limits,
            from_archetype,
            available: from_limits.saturating_add(from_archetype),
            spent: spent_points(attack, tier, archetypes, catalog),
        }
    }

    pub fn remaining(&self) -> i32 {
        self.available.saturating_sub(self.spent.total())
    }

    /// The values stored on the attack document.
    pub fn to_cache(&self) -> AttackPointCache {
        AttackPointCache {
            limit_points_total: self.limit_points_total,
            upgrade_points_from_limits: self.from_limits,
            upgrade_points_from_archetype: self.from_archetype,
            upgrade_points_available: self.available,
            upgrade_points_spent: self.spent.total(),
        }
    }
}

fn spent_points(
    attack: &SpecialAttack,
    tier: i32,
    archetypes: &ResolvedArchetypes,
    catalog: &Catalog,
) -> SpentBreakdown {
    let free = archetypes.free_attack_types();
    let attack_types = attack
        .attack_types
        .iter()
        .filter(|attack_type| !free.contains(attack_type))
        .fold(0, |total: i32, attack_type| total.saturating_add(attack_type.cost()));
    let upgrades = attack
        .upgrades
        .iter()
        .fold(0, |total: i32, upgrade| {
            total.saturating_add(catalog.upgrade_cost(&upgrade.id, tier, upgrade.quantity))
        });
    let free_advanced = match archetypes.effect_type {
        Some(EffectTypeArchetype::CrowdControl) => RulesConfig::CROWD_CONTROL_FREE_ADVANCED,
        _ => 0,
    };
    SpentBreakdown {
        attack_types,
        upgrades,
        advanced_conditions: Catalog::advanced_condition_cost(
            attack.advanced_conditions.len(),
            free_advanced,
        ),
    }
}
