/// Ruleset constants and runtime-tunable engine parameters.
///
/// The associated constants are fixed by the ruleset and are not meant to be
/// edited by players. The fields are host preferences, loaded from
/// `config.toml` by `rules-content`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Tier given to freshly created characters.
    pub default_tier: i32,
    /// Emit a warning for every pool whose remaining points are exactly zero.
    pub report_fully_spent_pools: bool,
    /// Reuse the last stat computation while the document fingerprint is unchanged.
    pub stat_cache_enabled: bool,
}

impl RulesConfig {
    // ===== tier bounds =====
    pub const TIER_MIN: i32 = 1;
    pub const TIER_MAX: i32 = 10;

    // ===== attribute pools =====
    pub const COMBAT_MULT: i32 = 2;
    pub const UTILITY_MULT: i32 = 1;

    // ===== main pool =====
    pub const MAIN_POOL_BASE_TIER: i32 = 2;
    pub const MAIN_POOL_MULT: i32 = 15;
    pub const FLAW_BONUS: i32 = 30;

    // ===== utility pool =====
    pub const UTILITY_POOL_MULT: i32 = 5;
    pub const UTILITY_BASE_TIER_SPECIALIZED: i32 = 2;
    pub const UTILITY_BASE_TIER_PRACTICAL: i32 = 1;

    // ===== limit scaling =====
    pub const LIMIT_FIRST_MULT: i32 = 10;
    pub const LIMIT_SECOND_MULT: i32 = 20;
    pub const LIMIT_FIRST_VALUE: f64 = 1.0;
    pub const LIMIT_SECOND_VALUE: f64 = 0.5;
    pub const LIMIT_THIRD_VALUE: f64 = 0.25;
    pub const LIMIT_ROUNDING_STEP: i32 = 10;

    // ===== fixed special attack points (× tier) =====
    pub const PARAGON_POINTS_PER_TIER: i32 = 10;
    pub const ONE_TRICK_POINTS_PER_TIER: i32 = 20;
    pub const DUAL_NATURED_POINTS_PER_TIER: i32 = 15;
    pub const BASIC_POINTS_PER_TIER: i32 = 10;

    // ===== special attack costs =====
    pub const SINGLE_TARGET_TYPE_COST: i32 = 20;
    pub const AREA_TYPE_COST: i32 = 30;
    pub const ADVANCED_CONDITION_COST: i32 = 20;
    pub const CROWD_CONTROL_FREE_ADVANCED: usize = 2;

    // ===== stats =====
    pub const BASE_MOVEMENT_BONUS: i32 = 6;
    pub const AVOIDANCE_BASE: i32 = 10;
    pub const RESISTANCE_BASE: i32 = 10;
    pub const BASE_HP: i32 = 100;
    pub const BASE_REACTIONS: i32 = 1;
    pub const JUGGERNAUT_HP_PER_TIER: i32 = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TIER: i32 = 4;

    pub fn new() -> Self {
        Self {
            default_tier: Self::DEFAULT_TIER,
            report_fully_spent_pools: true,
            stat_cache_enabled: true,
        }
    }

    pub fn with_default_tier(default_tier: i32) -> Self {
        Self {
            default_tier,
            ..Self::new()
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
