//! Five-stage stat computation over one character.

use std::collections::BTreeMap;

use strum::{EnumCount, IntoEnumIterator};

use super::stacking::{BonusOrigin, apply_stacking, collect_sources};
use super::{CharacterStats, Contribution, Stage, StatCategory, StatKey};
use crate::archetype::{
    DefensiveArchetype, EffectTypeArchetype, MovementArchetype, ResolvedArchetypes,
    UniqueAbilityArchetype, UtilityArchetype,
};
use crate::catalog::{Catalog, EffectTags, FlawPenalty};
use crate::character::{AttributeKey, Character};
use crate::config::RulesConfig;
use crate::tier::{calculate_base_movement, cut_above_bonus, half_tier_bonus};

/// Runs the full pipeline.
pub fn calculate_all_stats(character: &Character, catalog: &Catalog) -> CharacterStats {
    Pipeline::new(character, catalog, None).run()
}

/// Runs the pipeline for one category only.
///
/// Equal to the matching section of [`calculate_all_stats`].
pub fn calculate_specific_stats(
    character: &Character,
    catalog: &Catalog,
    category: StatCategory,
) -> BTreeMap<StatKey, i32> {
    Pipeline::new(character, catalog, Some(category))
        .run()
        .section(category)
        .clone()
}

/// Running totals for one calculation. `filter` skips stats outside a category.
struct Pipeline<'a> {
    character: &'a Character,
    catalog: &'a Catalog,
    archetypes: ResolvedArchetypes,
    filter: Option<StatCategory>,
    values: [i32; StatKey::COUNT],
    contributions: Vec<Contribution>,
    immunities: EffectTags,
    vulnerabilities: EffectTags,
    passive_healing: bool,
}

impl<'a> Pipeline<'a> {
    fn new(character: &'a Character, catalog: &'a Catalog, filter: Option<StatCategory>) -> Self {
        Self {
            character,
            catalog,
            archetypes: ResolvedArchetypes::resolve(&character.archetypes),
            filter,
            values: [0; StatKey::COUNT],
            contributions: Vec::new(),
            immunities: EffectTags::empty(),
            vulnerabilities: EffectTags::empty(),
            passive_healing: true,
        }
    }

    fn includes(&self, stat: StatKey) -> bool {
        self.filter.is_none_or(|category| stat.category() == category)
    }

    /// Adds `amount` to `stat` and logs it; zero amounts leave no trace.
    fn add(&mut self, stage: Stage, source: &str, stat: StatKey, amount: i32) {
        if amount == 0 || !self.includes(stat) {
            return;
        }
        let slot = &mut self.values[stat.index()];
        *slot = slot.saturating_add(amount);
        self.contributions.push(Contribution {
            stage,
            source: source.to_string(),
            stat,
            amount,
        });
    }

    fn value(&self, stat: StatKey) -> i32 {
        self.values[stat.index()]
    }

    fn run(mut self) -> CharacterStats {
        self.base();
        self.archetype_overlay();
        self.boon_overlay();
        self.stacking();
        self.final_stage();
        self.finish()
    }

    // ===== stage 1 =====

    fn base(&mut self) {
        let tier = self.character.tier;
        let attr = |key| self.character.attributes.get(key);
        let focus = attr(AttributeKey::Focus);
        let mobility = attr(AttributeKey::Mobility);
        let power = attr(AttributeKey::Power);
        let endurance = attr(AttributeKey::Endurance);
        let awareness = attr(AttributeKey::Awareness);
        let communication = attr(AttributeKey::Communication);
        let intelligence = attr(AttributeKey::Intelligence);

        let sum = |parts: &[i32]| {
            parts
                .iter()
                .fold(0, |total: i32, &part| total.saturating_add(part))
        };
        let resistance = RulesConfig::RESISTANCE_BASE;
        let base = [
            (StatKey::Accuracy, sum(&[tier, focus])),
            (StatKey::Damage, sum(&[tier, scaled(power)])),
            (StatKey::Conditions, sum(&[tier, tier, power])),
            (StatKey::Initiative, sum(&[tier, mobility, focus, awareness])),
            (StatKey::Movement, calculate_base_movement(tier, mobility)),
            (StatKey::Reactions, RulesConfig::BASE_REACTIONS),
            (StatKey::Avoidance, sum(&[RulesConfig::AVOIDANCE_BASE, tier, mobility])),
            (StatKey::Durability, sum(&[tier, scaled(endurance)])),
            (StatKey::Resolve, sum(&[resistance, tier, focus])),
            (StatKey::Stability, sum(&[resistance, tier, power])),
            (StatKey::Vitality, sum(&[resistance, tier, endurance])),
            (StatKey::Hp, RulesConfig::BASE_HP),
            (StatKey::Awareness, sum(&[tier, awareness])),
            (StatKey::Communication, sum(&[tier, communication])),
            (StatKey::Intelligence, sum(&[tier, intelligence])),
        ];
        debug_assert_eq!(base.len(), StatKey::COUNT);
        for (stat, value) in base {
            self.add(Stage::Base, "base", stat, value);
        }
    }

    // ===== stage 2 =====

    /// Movement, defensive, effect-type, unique ability and utility archetypes.
    fn archetype_overlay(&mut self) {
        let tier = self.character.tier;
        let half = half_tier_bonus(tier);
        let stage = Stage::Archetype;

        if let Some(movement) = self.archetypes.movement {
            match movement {
                MovementArchetype::Swift => self.add(stage, "swift", StatKey::Movement, half),
                MovementArchetype::Bulwark => self.add(stage, "bulwark", StatKey::Stability, half),
                MovementArchetype::Juggernaut => self.add(
                    stage,
                    "juggernaut",
                    StatKey::Hp,
                    tier.saturating_mul(RulesConfig::JUGGERNAUT_HP_PER_TIER),
                ),
                MovementArchetype::Behemoth => {
                    self.immunities |= EffectTags::GRABBED | EffectTags::PRONE | EffectTags::MOVED;
                }
                MovementArchetype::Skirmisher
                | MovementArchetype::Flight
                | MovementArchetype::Teleportation => {}
            }
        }

        // Attack-type archetypes only change attack costs.
        if let Some(effect) = self.archetypes.effect_type {
            match effect {
                EffectTypeArchetype::CrowdControl => {
                    self.add(stage, "crowdControl", StatKey::Damage, -tier);
                }
                EffectTypeArchetype::DamageSpecialist | EffectTypeArchetype::HybridSpecialist => {}
            }
        }

        if let Some(unique) = self.archetypes.unique_ability {
            match unique {
                UniqueAbilityArchetype::CutAbove => {
                    let bonus = cut_above_bonus(tier);
                    for stat in StatKey::CUT_ABOVE {
                        self.add(stage, "cutAbove", stat, bonus);
                    }
                }
                UniqueAbilityArchetype::VersatileMaster | UniqueAbilityArchetype::Extraordinary => {}
            }
        }

        if let Some(defensive) = self.archetypes.defensive {
            match defensive {
                DefensiveArchetype::Stalwart => {
                    self.add(stage, "stalwart", StatKey::Avoidance, -tier);
                    self.add(stage, "stalwart", StatKey::Durability, tier);
                }
                DefensiveArchetype::Fortress => {
                    self.add(stage, "fortress", StatKey::Durability, tier);
                }
                DefensiveArchetype::Resilient => {
                    for stat in [StatKey::Resolve, StatKey::Stability, StatKey::Vitality] {
                        self.add(stage, "resilient", stat, tier);
                    }
                }
                DefensiveArchetype::Immutable => {
                    self.immunities |= EffectTags::STUN | EffectTags::FEAR | EffectTags::MENTAL;
                }
            }
        }

        if let Some(utility) = self.archetypes.utility {
            match utility {
                UtilityArchetype::JackOfAllTrades => {
                    for stat in [StatKey::Awareness, StatKey::Communication, StatKey::Intelligence] {
                        self.add(stage, "jackOfAllTrades", stat, half);
                    }
                }
                UtilityArchetype::Specialized | UtilityArchetype::Practical => {}
            }
        }
    }

    // ===== stage 3 =====

    fn boon_overlay(&mut self) {
        let tier = self.character.tier;
        let catalog = self.catalog;
        for purchase in &self.character.main_pool_purchases.boons {
            let Some(boon) = catalog.boon(&purchase.id) else {
                tracing::warn!(id = %purchase.id, "unknown boon skipped in stat calculation");
                continue;
            };
            for effect in &boon.effects {
                let amount = effect.amount.resolve(tier, purchase.quantity);
                self.add(Stage::Boon, &boon.id, effect.stat, amount);
            }
            self.immunities |= boon.immunities;
            self.vulnerabilities |= boon.vulnerabilities;
            if boon.disables_passive_healing {
                self.passive_healing = false;
            }
        }
    }

    // ===== stage 4 =====

    /// Trait and flaw bonuses, worth less the more share a stat.
    fn stacking(&mut self) {
        let tier = self.character.tier;
        let sources = collect_sources(&self.character.main_pool_purchases);
        for bonus in apply_stacking(tier, sources) {
            let source = match bonus.source.origin {
                BonusOrigin::Trait => format!("trait:{}", bonus.source.id),
                BonusOrigin::Flaw => format!("flaw:{}", bonus.source.id),
            };
            self.add(Stage::Stacking, &source, bonus.source.stat, bonus.amount);
        }
    }

    // ===== stage 5 =====

    /// Flaw penalties, then floors.
    fn final_stage(&mut self) {
        let tier = self.character.tier;
        let catalog = self.catalog;
        for purchase in &self.character.main_pool_purchases.flaws {
            let Some(flaw) = catalog.flaw(&purchase.id) else {
                tracing::warn!(id = %purchase.id, "unknown flaw skipped in stat calculation");
                continue;
            };
            for penalty in &flaw.penalties {
                match *penalty {
                    FlawPenalty::StatFlat { stat, amount } => {
                        self.add(Stage::Final, &flaw.id, stat, amount);
                    }
                    FlawPenalty::StatPerTier { stat, per_tier } => {
                        self.add(Stage::Final, &flaw.id, stat, per_tier.saturating_mul(tier));
                    }
                    FlawPenalty::ZeroStat(stat) => {
                        let current = self.value(stat);
                        self.add(Stage::Final, &flaw.id, stat, current.saturating_neg());
                    }
                    FlawPenalty::RemoveInitiativeTierBonus => {
                        self.add(Stage::Final, &flaw.id, StatKey::Initiative, tier.saturating_neg());
                    }
                    FlawPenalty::MinimumCombatAttributes { .. } => {}
                }
            }
        }

        for (stat, floor) in [
            (StatKey::Hp, 1),
            (StatKey::Reactions, 0),
            (StatKey::Avoidance, 0),
        ] {
            let current = self.value(stat);
            if current < floor {
                self.add(Stage::Final, "clamp", stat, floor.saturating_sub(current));
            }
        }
    }

    fn finish(self) -> CharacterStats {
        let mut stats = CharacterStats {
            immunities: self.immunities,
            vulnerabilities: self.vulnerabilities,
            passive_healing: self.passive_healing,
            contributions: self.contributions,
            ..CharacterStats::default()
        };
        for stat in StatKey::iter().filter(|stat| self.filter.is_none_or(|c| stat.category() == c)) {
            let value = self.values[stat.index()];
            match stat.category() {
                StatCategory::Combat => stats.combat.insert(stat, value),
                StatCategory::Defense => stats.defense.insert(stat, value),
                StatCategory::Utility => stats.utility.insert(stat, value),
            };
        }
        stats
    }
}

/// `floor(value × 1.5)` for non-negative attributes.
fn scaled(value: i32) -> i32 {
    value.saturating_mul(3) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{BoonPurchase, FlawPurchase, TraitPurchase};
    use crate::testing::{ready_character, sample_catalog};

    fn stats_for(character: &Character) -> CharacterStats {
        calculate_all_stats(character, &sample_catalog())
    }

    #[test]
    fn base_formulas() {
        let mut character = ready_character(4, "normal");
        character.attributes.focus = 2;
        character.attributes.mobility = 1;
        character.attributes.power = 3;
        character.attributes.endurance = 1;
        character.attributes.awareness = 2;
        character.archetypes.defensive = Some("immutable".into());
        let stats = stats_for(&character);
        assert_eq!(stats.get(StatKey::Accuracy), 6);
        assert_eq!(stats.get(StatKey::Damage), 4 + 4);
        assert_eq!(stats.get(StatKey::Conditions), 8 + 3);
        assert_eq!(stats.get(StatKey::Initiative), 4 + 1 + 2 + 2);
        assert_eq!(stats.get(StatKey::Movement), 7);
        assert_eq!(stats.get(StatKey::Reactions), 1);
        assert_eq!(stats.get(StatKey::Avoidance), 15);
        assert_eq!(stats.get(StatKey::Durability), 4 + 1);
        assert_eq!(stats.get(StatKey::Resolve), 16);
        assert_eq!(stats.get(StatKey::Stability), 17);
        assert_eq!(stats.get(StatKey::Vitality), 15);
        assert_eq!(stats.get(StatKey::Hp), 100);
        assert_eq!(stats.get(StatKey::Awareness), 6);
        assert!(stats.immunities.contains(EffectTags::STUN | EffectTags::FEAR));
    }

    #[test]
    fn movement_archetypes() {
        let mut character = ready_character(5, "normal");
        character.archetypes.movement = Some("swift".into());
        assert_eq!(stats_for(&character).get(StatKey::Movement), 6 + 3);

        character.archetypes.movement = Some("juggernaut".into());
        assert_eq!(stats_for(&character).get(StatKey::Hp), 125);

        character.archetypes.movement = Some("bulwark".into());
        assert_eq!(stats_for(&character).get(StatKey::Stability), 15 + 3);

        character.archetypes.movement = Some("behemoth".into());
        let stats = stats_for(&character);
        let immovable = EffectTags::GRABBED | EffectTags::PRONE | EffectTags::MOVED;
        assert!(stats.immunities.contains(immovable));
    }

    #[test]
    fn cut_above_touches_nine_stats() {
        let mut character = ready_character(8, "normal");
        character.archetypes.unique_ability = Some("cutAbove".into());
        let stats = stats_for(&character);
        let cut: Vec<_> = stats
            .contributions
            .iter()
            .filter(|c| c.source == "cutAbove")
            .collect();
        assert_eq!(cut.len(), 9);
        assert!(cut.iter().all(|c| c.amount == 3));
        assert_eq!(stats.get(StatKey::Movement), 8);
    }

    #[test]
    fn defensive_archetypes() {
        let mut character = ready_character(6, "normal");
        character.archetypes.defensive = Some("stalwart".into());
        let stats = stats_for(&character);
        assert_eq!(stats.get(StatKey::Avoidance), 10);
        assert_eq!(stats.get(StatKey::Durability), 12);

        character.archetypes.defensive = Some("resilient".into());
        let stats = stats_for(&character);
        assert_eq!(stats.get(StatKey::Resolve), 10 + 6 + 1 + 6);
        assert_eq!(stats.get(StatKey::Vitality), 22);
    }

    #[test]
    fn crowd_control_reduces_damage() {
        let mut character = ready_character(6, "normal");
        character.archetypes.effect_type = Some("crowdControl".into());
        assert_eq!(stats_for(&character).get(StatKey::Damage), 0);
    }

    #[test]
    fn jack_of_all_trades_boosts_utility_checks() {
        let mut character = ready_character(5, "normal");
        character.archetypes.utility = Some("jackOfAllTrades".into());
        let stats = stats_for(&character);
        assert_eq!(stats.get(StatKey::Communication), 5 + 3);
    }

    #[test]
    fn boons_apply_effects_and_tags() {
        let mut character = ready_character(5, "normal");
        let boons = &mut character.main_pool_purchases.boons;
        boons.push(BoonPurchase::new("combatReflexes", 1));
        boons.push(BoonPurchase::new("robot", 1));
        boons.push(BoonPurchase::new("toughness", 2));
        boons.push(BoonPurchase::new("ironWill", 1));
        let stats = stats_for(&character);
        assert_eq!(stats.get(StatKey::Reactions), 2);
        assert_eq!(stats.get(StatKey::Hp), 120);
        assert_eq!(stats.get(StatKey::Resolve), 10 + 5 + 1 + 5);
        let robotic = EffectTags::POISON | EffectTags::DISEASE | EffectTags::BLEED;
        assert!(stats.immunities.contains(robotic));
        assert!(stats.vulnerabilities.contains(EffectTags::ELECTRIC));
        assert!(!stats.passive_healing);
    }

    #[test]
    fn stacked_trait_bonuses_to_damage() {
        let mut character = ready_character(5, "normal");
        for (i, id) in ["bloodied", "focused", "vengeful"].into_iter().enumerate() {
            character.main_pool_purchases.traits.push(TraitPurchase {
                id: id.into(),
                stat_bonuses: vec![StatKey::Damage],
                sequence: i as u64 + 1,
            });
        }
        let stats = stats_for(&character);
        assert_eq!(stats.get(StatKey::Damage), 5 + 12);
    }

    #[test]
    fn flaw_penalties_then_clamp() {
        let mut character = ready_character(4, "normal");
        character.attributes.mobility = 2;
        let flaws = &mut character.main_pool_purchases.flaws;
        for (i, id) in ["sickly", "unresponsive"].into_iter().enumerate() {
            flaws.push(FlawPurchase {
                id: id.into(),
                stat_bonus: None,
                sequence: i as u64 + 1,
            });
        }
        let stats = stats_for(&character);
        assert_eq!(stats.get(StatKey::Hp), 70);
        assert_eq!(stats.get(StatKey::Reactions), 0);
        assert_eq!(stats.get(StatKey::Initiative), 2 + 1);
    }

    #[test]
    fn hp_is_clamped_to_one() {
        let mut character = ready_character(4, "normal");
        for i in 0..4 {
            character.main_pool_purchases.flaws.push(FlawPurchase {
                id: "sickly".into(),
                stat_bonus: None,
                sequence: i,
            });
        }
        let stats = stats_for(&character);
        assert_eq!(stats.get(StatKey::Hp), 1);
        assert!(stats.breakdown(StatKey::Hp).iter().any(|c| c.source == "clamp"));
    }

    #[test]
    fn contributions_sum_to_final_values() {
        let mut character = ready_character(7, "normal");
        character.archetypes.unique_ability = Some("cutAbove".into());
        character.archetypes.defensive = Some("stalwart".into());
        character.main_pool_purchases.traits.push(TraitPurchase {
            id: "bloodied".into(),
            stat_bonuses: vec![StatKey::Accuracy, StatKey::Avoidance],
            sequence: 1,
        });
        let stats = stats_for(&character);
        for stat in StatKey::iter() {
            let sum: i32 = stats.breakdown(stat).iter().map(|c| c.amount).sum();
            assert_eq!(sum, stats.get(stat), "{stat}");
        }
    }

    #[test]
    fn specific_stats_match_full_sections() {
        let catalog = sample_catalog();
        let mut character = ready_character(6, "normal");
        character.archetypes.movement = Some("juggernaut".into());
        character.archetypes.utility = Some("jackOfAllTrades".into());
        character.main_pool_purchases.flaws.push(FlawPurchase {
            id: "unresponsive".into(),
            stat_bonus: Some(StatKey::Durability),
            sequence: 1,
        });
        let full = calculate_all_stats(&character, &catalog);
        for category in StatCategory::iter() {
            assert_eq!(
                &calculate_specific_stats(&character, &catalog, category),
                full.section(category)
            );
        }
    }
}
