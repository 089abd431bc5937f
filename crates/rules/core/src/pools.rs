//! The five point budgets and what has been spent from them.
//!
//! Spent amounts are always recomputed from the purchase lists; the cached
//! attack fields on the document are never read here.

use serde::Serialize;

use crate::archetype::{ResolvedArchetypes, UniqueAbilityArchetype, UtilityArchetype};
use crate::catalog::Catalog;
use crate::character::{
    AttackId, AttributePool, Character, ExpertiseLevel, SpecialAttack, UtilityItemKind,
};
use crate::config::RulesConfig;
use crate::error::BuildError;
use crate::limits::AttackPoints;
use crate::tier::{self, main_pool_base, utility_pool_base};
use crate::validation::IssueSeverity;

/// `{available, spent, remaining}` for one budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Pool {
    pub available: i32,
    pub spent: i32,
    pub remaining: i32,
}

impl Pool {
    pub fn new(available: i32, spent: i32) -> Self {
        Self {
            available,
            spent,
            remaining: available.saturating_sub(spent),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0
    }

    /// Whether spending `cost` more would stay within budget.
    pub fn can_afford(&self, cost: i32) -> bool {
        self.remaining.saturating_sub(cost) >= 0
    }
}

/// Upgrade point budget of a single special attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AttackPool {
    pub id: AttackId,
    pub name: String,
    /// `limits_scaled`, `fixed_archetype`, `shared_resource` or `none`.
    pub method: &'static str,
    pub pool: Pool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SpecialAttackPools {
    pub total: Pool,
    pub attacks: Vec<AttackPool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointPools {
    pub combat_attributes: Pool,
    pub utility_attributes: Pool,
    pub main_pool: Pool,
    pub utility_pool: Pool,
    pub special_attacks: SpecialAttackPools,
}

impl PointPools {
    /// Every pool with a display name, attacks last.
    pub fn named(&self) -> Vec<(String, Pool)> {
        let mut pools = vec![
            ("combat attributes".to_string(), self.combat_attributes),
            ("utility attributes".to_string(), self.utility_attributes),
            ("main pool".to_string(), self.main_pool),
            ("utility pool".to_string(), self.utility_pool),
        ];
        pools.extend(
            self.special_attacks
                .attacks
                .iter()
                .map(|attack| (format!("special attack '{}'", attack.name), attack.pool)),
        );
        pools
    }
}

pub fn calculate_all_pools(
    character: &Character,
    catalog: &Catalog,
) -> Result<PointPools, BuildError> {
    tier::validate_tier(character.tier)?;
    let archetypes = ResolvedArchetypes::resolve(&character.archetypes);
    let tier = character.tier;

    let attacks: Vec<AttackPool> = character
        .special_attacks
        .iter()
        .map(|attack| single_attack_pool(character, attack, &archetypes, catalog))
        .collect();
    let total = attacks.iter().fold(Pool::default(), |acc, attack| {
        Pool::new(
            acc.available.saturating_add(attack.pool.available),
            acc.spent.saturating_add(attack.pool.spent),
        )
    });

    Ok(PointPools {
        combat_attributes: Pool::new(
            tier.saturating_mul(RulesConfig::COMBAT_MULT),
            character.attributes.total(AttributePool::Combat),
        ),
        utility_attributes: Pool::new(
            tier.saturating_mul(RulesConfig::UTILITY_MULT),
            character.attributes.total(AttributePool::Utility),
        ),
        main_pool: Pool::new(
            main_pool_available(character, &archetypes),
            main_pool_spent(character, catalog),
        ),
        utility_pool: Pool::new(
            utility_pool_available(tier, archetypes.utility),
            utility_pool_spent(character, catalog),
        ),
        special_attacks: SpecialAttackPools { total, attacks },
    })
}

pub fn main_pool_available(character: &Character, archetypes: &ResolvedArchetypes) -> i32 {
    let mut available = main_pool_base(character.tier);
    if archetypes.unique_ability == Some(UniqueAbilityArchetype::Extraordinary) {
        available = available.saturating_mul(2);
    }
    let flaws = i32::try_from(character.main_pool_purchases.flaws.len()).unwrap_or(i32::MAX);
    available.saturating_add(flaws.saturating_mul(RulesConfig::FLAW_BONUS))
}

pub fn utility_pool_available(tier: i32, archetype: Option<UtilityArchetype>) -> i32 {
    match archetype {
        Some(UtilityArchetype::Specialized | UtilityArchetype::JackOfAllTrades) => {
            utility_pool_base(tier, RulesConfig::UTILITY_BASE_TIER_SPECIALIZED)
        }
        Some(UtilityArchetype::Practical) => {
            utility_pool_base(tier, RulesConfig::UTILITY_BASE_TIER_PRACTICAL)
        }
        None => 0,
    }
}

/// Boons, traits and primary action upgrades at catalog cost.
pub fn main_pool_spent(character: &Character, catalog: &Catalog) -> i32 {
    let tier = character.tier;
    let purchases = &character.main_pool_purchases;

    let boons: i32 = purchases
        .boons
        .iter()
        .map(|boon| match catalog.boon(&boon.id) {
            Some(definition) => definition.cost.resolve(tier, boon.quantity),
            None => unknown_cost("boon", &boon.id),
        })
        .fold(0, i32::saturating_add);
    let traits: i32 = purchases
        .traits
        .iter()
        .map(|purchase| match catalog.trait_definition(&purchase.id) {
            Some(definition) => definition.cost.resolve(tier, 1),
            None => unknown_cost("trait", &purchase.id),
        })
        .fold(0, i32::saturating_add);
    let upgrades: i32 = purchases
        .primary_action_upgrades
        .iter()
        .map(|id| match catalog.primary_action_upgrade(id) {
            Some(definition) => definition.cost.resolve(tier, 1),
            None => unknown_cost("primary action upgrade", id),
        })
        .fold(0, i32::saturating_add);

    boons.saturating_add(traits).saturating_add(upgrades)
}

/// Expertise plus features, senses, movement and descriptors.
pub fn utility_pool_spent(character: &Character, catalog: &Catalog) -> i32 {
    let purchases = &character.utility_purchases;

    let expertise: i32 = purchases
        .expertise
        .values()
        .flat_map(|levels| {
            [ExpertiseLevel::Basic, ExpertiseLevel::Mastered]
                .into_iter()
                .flat_map(move |level| levels.list(level).iter().map(move |id| (level, id)))
        })
        .map(|(level, id)| match catalog.expertise_entry(id) {
            Some(definition) => definition.kind.step_cost(level),
            None => unknown_cost("expertise", id),
        })
        .fold(0, i32::saturating_add);

    let items: i32 = [
        UtilityItemKind::Feature,
        UtilityItemKind::Sense,
        UtilityItemKind::Movement,
        UtilityItemKind::Descriptor,
    ]
    .into_iter()
    .flat_map(|kind| purchases.items(kind).iter().map(move |id| (kind, id)))
    .map(|(kind, id)| match catalog.utility_item(kind, id) {
        Some(definition) => definition.cost,
        None => unknown_cost("utility item", id),
    })
    .fold(0, i32::saturating_add);

    expertise.saturating_add(items)
}

fn unknown_cost(kind: &str, id: &str) -> i32 {
    tracing::warn!(kind, id, "unknown catalog id costs nothing");
    0
}

/// Budget of one attack, dispatched on the special-attack point method.
pub fn calculate_single_attack_pool(
    character: &Character,
    attack: &SpecialAttack,
    catalog: &Catalog,
) -> AttackPool {
    let archetypes = ResolvedArchetypes::resolve(&character.archetypes);
    single_attack_pool(character, attack, &archetypes, catalog)
}

fn single_attack_pool(
    character: &Character,
    attack: &SpecialAttack,
    archetypes: &ResolvedArchetypes,
    catalog: &Catalog,
) -> AttackPool {
    let points = AttackPoints::compute(attack, character.tier, archetypes, catalog);
    AttackPool {
        id: attack.id,
        name: attack.name.clone(),
        method: points.method.map_or("none", |method| method.pool_method()),
        pool: Pool::new(points.available, points.spent.total()),
    }
}

/// A budget finding from [`validate_point_spending`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PoolIssue {
    pub pool: String,
    pub severity: IssueSeverity,
    pub message: String,
}

/// Over-budget pools are errors; exactly spent pools are warnings when enabled.
pub fn validate_point_spending(pools: &PointPools, config: &RulesConfig) -> Vec<PoolIssue> {
    let mut issues = Vec::new();
    for (name, pool) in pools.named() {
        if pool.is_over_budget() {
            issues.push(PoolIssue {
                message: format!(
                    "{name} is over budget by {} ({} spent of {})",
                    -pool.remaining, pool.spent, pool.available
                ),
                pool: name,
                severity: IssueSeverity::Error,
            });
        } else if pool.remaining == 0 && pool.available > 0 && config.report_fully_spent_pools {
            issues.push(PoolIssue {
                message: format!("{name} is fully spent"),
                pool: name,
                severity: IssueSeverity::Warning,
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{BoonPurchase, FlawPurchase, LimitSelection, TraitPurchase};
    use crate::stats::StatKey;
    use crate::testing::{ready_character, sample_catalog};

    #[test]
    fn attribute_pools() {
        let catalog = sample_catalog();
        let mut character = ready_character(5, "normal");
        character.attributes.power = 3;
        character.attributes.awareness = 2;
        let pools = calculate_all_pools(&character, &catalog).unwrap();
        assert_eq!(pools.combat_attributes, Pool::new(10, 4));
        assert_eq!(pools.utility_attributes, Pool::new(5, 2));
    }

    #[test]
    fn main_pool_counts_flaws_and_extraordinary() {
        let catalog = sample_catalog();
        let mut character = ready_character(5, "normal");
        character.main_pool_purchases.flaws.push(FlawPurchase {
            id: "sickly".into(),
            stat_bonus: None,
            sequence: 1,
        });
        let pools = calculate_all_pools(&character, &catalog).unwrap();
        assert_eq!(pools.main_pool.available, 45 + 30);

        character.archetypes.unique_ability = Some("extraordinary".into());
        let pools = calculate_all_pools(&character, &catalog).unwrap();
        assert_eq!(pools.main_pool.available, 90 + 30);
    }

    #[test]
    fn main_pool_spending_resolves_costs() {
        let catalog = sample_catalog();
        let mut character = ready_character(6, "normal");
        let purchases = &mut character.main_pool_purchases;
        purchases.boons.push(BoonPurchase::new("toughness", 3));
        purchases.traits.push(TraitPurchase {
            id: "bloodied".into(),
            stat_bonuses: vec![StatKey::Damage],
            sequence: 1,
        });
        purchases.primary_action_upgrades.push("counterAttack".into());
        purchases.primary_action_upgrades.push("noSuchUpgrade".into());
        let pools = calculate_all_pools(&character, &catalog).unwrap();
        assert_eq!(pools.main_pool.spent, 30 + 15 + 20);
        assert_eq!(pools.main_pool.remaining, 60 - 65);
    }

    #[test]
    fn utility_pool_by_archetype() {
        assert_eq!(utility_pool_available(6, Some(UtilityArchetype::Specialized)), 20);
        assert_eq!(utility_pool_available(6, Some(UtilityArchetype::JackOfAllTrades)), 20);
        assert_eq!(utility_pool_available(6, Some(UtilityArchetype::Practical)), 25);
        assert_eq!(utility_pool_available(6, None), 0);
        assert_eq!(utility_pool_available(1, Some(UtilityArchetype::Specialized)), 0);
    }

    #[test]
    fn utility_spending_charges_mastery_as_a_step() {
        let catalog = sample_catalog();
        let mut character = ready_character(6, "normal");
        let levels = character
            .utility_purchases
            .expertise
            .entry(crate::character::AttributeKey::Awareness)
            .or_default();
        levels.basic.push("tracking".into());
        levels.mastered.push("tracking".into());
        levels.basic.push("ambushSense".into());
        character.utility_purchases.senses.push("darkvision".into());
        let pools = calculate_all_pools(&character, &catalog).unwrap();
        assert_eq!(pools.utility_pool.spent, 2 + 4 + 1 + 5);
    }

    #[test]
    fn special_attack_pools_per_attack() {
        let catalog = sample_catalog();
        let mut character = ready_character(6, "normal");
        let mut attack = SpecialAttack::new(AttackId(1), "Lance");
        for (id, points) in [("charges", 30), ("cooldown", 20), ("delayed", 20), ("costly", 20)] {
            attack.limits.push(LimitSelection {
                id: id.into(),
                points,
                category: id.into(),
                parent: None,
            });
        }
        character.special_attacks.push(attack);
        let pools = calculate_all_pools(&character, &catalog).unwrap();
        let pool = &pools.special_attacks.attacks[0];
        assert_eq!(pool.method, "limits_scaled");
        assert_eq!(pool.pool.available, 80);
        assert_eq!(pools.special_attacks.total.available, 80);
    }

    #[test]
    fn unset_special_attack_archetype_has_no_points() {
        let catalog = sample_catalog();
        let mut character = ready_character(6, "normal");
        character.archetypes.special_attack = None;
        character
            .special_attacks
            .push(SpecialAttack::new(AttackId(1), "Lance"));
        let pools = calculate_all_pools(&character, &catalog).unwrap();
        assert_eq!(pools.special_attacks.attacks[0].method, "none");
        assert_eq!(pools.special_attacks.attacks[0].pool.available, 0);
    }

    #[test]
    fn invalid_tier_fails() {
        let catalog = sample_catalog();
        let character = Character::new(0);
        assert!(matches!(
            calculate_all_pools(&character, &catalog),
            Err(BuildError::Tier(_))
        ));
    }

    #[test]
    fn spending_issues() {
        let pools = PointPools {
            main_pool: Pool::new(30, 45),
            combat_attributes: Pool::new(8, 8),
            ..PointPools::default()
        };
        let issues = validate_point_spending(&pools, &RulesConfig::default());
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, IssueSeverity::Warning);
        assert_eq!(issues[0].pool, "combat attributes");
        assert_eq!(issues[1].severity, IssueSeverity::Error);
        assert!(issues[1].message.contains("over budget by 15"));

        let quiet = RulesConfig {
            report_fully_spent_pools: false,
            ..RulesConfig::default()
        };
        assert_eq!(validate_point_spending(&pools, &quiet).len(), 1);
    }

    #[test]
    fn remaining_is_available_minus_spent() {
        let pool = Pool::new(20, 35);
        assert_eq!(pool.remaining, -15);
        assert!(pool.is_over_budget());
        assert!(Pool::new(20, 5).can_afford(15));
        assert!(!Pool::new(20, 5).can_afford(16));
    }
}
