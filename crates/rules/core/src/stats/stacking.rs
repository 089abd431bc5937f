//! Diminishing stacking of trait and flaw stat bonuses.
//!
//! Each bonus to a stat is worth `tier`, but the *i*-th bonus to the same
//! stat (counting from 0 in purchase order) is worth `max(1, tier - i)`.

use std::collections::HashMap;

use super::StatKey;
use crate::character::MainPoolPurchases;

/// Where a stat bonus selection came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BonusOrigin {
    Trait,
    Flaw,
}

/// One stat bonus selection from a trait or flaw purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BonusSource {
    pub origin: BonusOrigin,
    pub id: String,
    pub stat: StatKey,
    pub sequence: u64,
}

/// A source with the amount it contributes after stacking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackedBonus {
    pub source: BonusSource,
    /// 0-based position among bonuses to the same stat.
    pub position: usize,
    pub amount: i32,
}

/// Worth of the bonus at `position` among bonuses to one stat.
pub fn stacked_value(tier: i32, position: usize) -> i32 {
    let position = i32::try_from(position).unwrap_or(i32::MAX);
    tier.saturating_sub(position).max(1)
}

/// Total for `count` bonuses to one stat: `Σ max(1, tier - i)`.
pub fn total_stacked_bonus(tier: i32, count: usize) -> i32 {
    (0..count)
        .map(|position| stacked_value(tier, position))
        .fold(0, i32::saturating_add)
}

/// Every bonus selection in stable purchase order.
///
/// Sorted by `sequence`; equal sequences keep traits before flaws, each in
/// list order.
pub fn collect_sources(purchases: &MainPoolPurchases) -> Vec<BonusSource> {
    let traits = purchases.traits.iter().flat_map(|purchase| {
        purchase.stat_bonuses.iter().map(|&stat| BonusSource {
            origin: BonusOrigin::Trait,
            id: purchase.id.clone(),
            stat,
            sequence: purchase.sequence,
        })
    });
    let flaws = purchases.flaws.iter().filter_map(|purchase| {
        purchase.stat_bonus.map(|stat| BonusSource {
            origin: BonusOrigin::Flaw,
            id: purchase.id.clone(),
            stat,
            sequence: purchase.sequence,
        })
    });
    let mut sources: Vec<BonusSource> = traits.chain(flaws).collect();
    sources.sort_by_key(|source| source.sequence);
    sources
}

/// Assigns each source its reduced amount.
pub fn apply_stacking(tier: i32, sources: Vec<BonusSource>) -> Vec<StackedBonus> {
    let mut seen: HashMap<StatKey, usize> = HashMap::new();
    sources
        .into_iter()
        .map(|source| {
            let position = seen.entry(source.stat).or_insert(0);
            let stacked = StackedBonus {
                amount: stacked_value(tier, *position),
                position: *position,
                source,
            };
            *position += 1;
            stacked
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{FlawPurchase, TraitPurchase};

    fn trait_purchase(id: &str, stats: &[StatKey], sequence: u64) -> TraitPurchase {
        TraitPurchase {
            id: id.into(),
            stat_bonuses: stats.to_vec(),
            sequence,
        }
    }

    #[test]
    fn three_damage_bonuses_at_tier_five() {
        assert_eq!(total_stacked_bonus(5, 3), 12);
        assert_eq!(total_stacked_bonus(5, 1), 5);
        assert_eq!(total_stacked_bonus(5, 0), 0);
    }

    #[test]
    fn stacking_floors_at_one() {
        assert_eq!(total_stacked_bonus(2, 4), 2 + 1 + 1 + 1);
        assert_eq!(stacked_value(3, 10), 1);
    }

    #[test]
    fn order_follows_purchase_sequence_not_list_order() {
        let mut purchases = MainPoolPurchases::default();
        purchases
            .traits
            .push(trait_purchase("late", &[StatKey::Damage], 5));
        purchases
            .traits
            .push(trait_purchase("early", &[StatKey::Damage, StatKey::Accuracy], 1));
        purchases.flaws.push(FlawPurchase {
            id: "sickly".into(),
            stat_bonus: Some(StatKey::Damage),
            sequence: 3,
        });

        let stacked = apply_stacking(6, collect_sources(&purchases));
        let damage: Vec<(&str, i32)> = stacked
            .iter()
            .filter(|bonus| bonus.source.stat == StatKey::Damage)
            .map(|bonus| (bonus.source.id.as_str(), bonus.amount))
            .collect();
        assert_eq!(damage, vec![("early", 6), ("sickly", 5), ("late", 4)]);

        let accuracy = stacked
            .iter()
            .find(|bonus| bonus.source.stat == StatKey::Accuracy)
            .unwrap();
        assert_eq!(accuracy.amount, 6);
        assert_eq!(accuracy.position, 0);
    }

    #[test]
    fn equal_sequences_put_traits_first() {
        let mut purchases = MainPoolPurchases::default();
        purchases.flaws.push(FlawPurchase {
            id: "weak".into(),
            stat_bonus: Some(StatKey::Avoidance),
            sequence: 0,
        });
        purchases
            .traits
            .push(trait_purchase("focused", &[StatKey::Avoidance], 0));
        let sources = collect_sources(&purchases);
        assert_eq!(sources[0].origin, BonusOrigin::Trait);
        assert_eq!(sources[1].origin, BonusOrigin::Flaw);
    }
}
