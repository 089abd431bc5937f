//! Trait and flaw purchases from the main pool.

use std::collections::BTreeSet;

use strum::IntoEnumIterator;

use super::{budget_message, combat_attribute_minimum, main_pool_remaining};
use crate::archetype::ArchetypeCategory;
use crate::catalog::Catalog;
use crate::character::{AttributeKey, Character, FlawPurchase, TraitPurchase};
use crate::config::RulesConfig;
use crate::error::{BuildError, CatalogKind};
use crate::stats::StatKey;

pub struct TraitFlawSystem<'c> {
    catalog: &'c Catalog,
}

impl<'c> TraitFlawSystem<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Buys a trait boosting `stats` (distinct, bonusable, at most the trait's maximum).
    pub fn purchase_trait(
        &self,
        character: &mut Character,
        id: &str,
        stats: &[StatKey],
    ) -> Result<(), BuildError> {
        let definition = self
            .catalog
            .trait_definition(id)
            .ok_or_else(|| BuildError::not_found(CatalogKind::Trait, id))?;

        let mut reasons = Vec::new();
        if character
            .main_pool_purchases
            .traits
            .iter()
            .any(|purchase| purchase.id == id)
        {
            reasons.push(format!("trait '{id}' is already purchased"));
        }
        if stats.is_empty() || stats.len() > definition.max_stat_bonuses {
            reasons.push(format!(
                "trait '{id}' takes between 1 and {} stat bonuses, got {}",
                definition.max_stat_bonuses,
                stats.len()
            ));
        }
        let distinct: BTreeSet<StatKey> = stats.iter().copied().collect();
        if distinct.len() != stats.len() {
            reasons.push("each stat may only be chosen once per trait".into());
        }
        for stat in stats.iter().filter(|stat| !stat.is_bonusable()) {
            reasons.push(format!("{stat} cannot receive trait bonuses"));
        }
        let cost = definition.cost.resolve(character.tier, 1);
        let remaining = main_pool_remaining(character, self.catalog);
        if cost > remaining {
            reasons.push(budget_message("main pool", cost, remaining));
        }
        BuildError::check("purchase trait", reasons)?;

        let sequence = character.main_pool_purchases.next_sequence();
        character.main_pool_purchases.traits.push(TraitPurchase {
            id: id.to_string(),
            stat_bonuses: stats.to_vec(),
            sequence,
        });
        tracing::debug!(trait_id = id, ?stats, sequence, "trait purchased");
        Ok(())
    }

    pub fn remove_trait(
        &self,
        character: &mut Character,
        index: usize,
    ) -> Result<TraitPurchase, BuildError> {
        let traits = &mut character.main_pool_purchases.traits;
        if index >= traits.len() {
            return Err(BuildError::rejected(
                "remove trait",
                format!("no trait at position {index}"),
            ));
        }
        let removed = traits.remove(index);
        tracing::debug!(trait_id = %removed.id, "trait removed");
        Ok(removed)
    }

    /// Takes a flaw, optionally with a stat bonus selection.
    pub fn purchase_flaw(
        &self,
        character: &mut Character,
        id: &str,
        stat_bonus: Option<StatKey>,
    ) -> Result<(), BuildError> {
        let definition = self
            .catalog
            .flaw(id)
            .ok_or_else(|| BuildError::not_found(CatalogKind::Flaw, id))?;

        let mut reasons = Vec::new();
        if character.main_pool_purchases.has_flaw(id) {
            reasons.push(format!("flaw '{id}' is already taken"));
        }
        if let Some(stat) = stat_bonus.filter(|stat| !stat.is_bonusable()) {
            reasons.push(format!("{stat} cannot receive flaw bonuses"));
        }
        for category in ArchetypeCategory::iter() {
            if let Some(selected) = character.archetypes.get(category) {
                if definition.excludes(category, selected) {
                    reasons.push(format!(
                        "flaw '{id}' cannot be taken with the {selected} {category} archetype"
                    ));
                }
            }
        }
        if let Some(minimum) = definition.minimum_combat_attribute(character.tier) {
            for key in AttributeKey::COMBAT {
                let value = character.attributes.get(key);
                if value < minimum {
                    reasons.push(format!(
                        "flaw '{id}' requires {key} of at least {minimum}, currently {value}"
                    ));
                }
            }
        }
        BuildError::check("purchase flaw", reasons)?;

        let sequence = character.main_pool_purchases.next_sequence();
        character.main_pool_purchases.flaws.push(FlawPurchase {
            id: id.to_string(),
            stat_bonus,
            sequence,
        });
        tracing::debug!(flaw = id, ?stat_bonus, sequence, "flaw purchased");
        Ok(())
    }

    /// Drops a flaw unless losing its main pool bonus would overspend the pool.
    pub fn remove_flaw(
        &self,
        character: &mut Character,
        id: &str,
    ) -> Result<FlawPurchase, BuildError> {
        let Some(index) = character
            .main_pool_purchases
            .flaws
            .iter()
            .position(|flaw| flaw.id == id)
        else {
            return Err(BuildError::rejected(
                "remove flaw",
                format!("flaw '{id}' is not taken"),
            ));
        };
        let remaining = main_pool_remaining(character, self.catalog);
        if remaining < RulesConfig::FLAW_BONUS {
            return Err(BuildError::rejected(
                "remove flaw",
                format!(
                    "the main pool would be overspent by {}",
                    RulesConfig::FLAW_BONUS.saturating_sub(remaining)
                ),
            ));
        }
        let removed = character.main_pool_purchases.flaws.remove(index);
        tracing::debug!(flaw = id, "flaw removed");
        Ok(removed)
    }

    /// Name and value of the combat attribute floor imposed by flaws, if any.
    pub fn combat_attribute_minimum(&self, character: &Character) -> Option<(String, i32)> {
        combat_attribute_minimum(character, self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ready_character, sample_catalog};

    #[test]
    fn trait_purchase_rules() {
        let catalog = sample_catalog();
        let system = TraitFlawSystem::new(&catalog);
        // Tier 4: main pool 30.
        let mut character = ready_character(4, "normal");

        assert!(
            system
                .purchase_trait(&mut character, "ambusher", &[StatKey::Damage, StatKey::Accuracy])
                .is_err()
        );
        assert!(
            system
                .purchase_trait(&mut character, "bloodied", &[StatKey::Damage, StatKey::Damage])
                .is_err()
        );
        assert!(
            system
                .purchase_trait(&mut character, "bloodied", &[StatKey::Hp])
                .is_err()
        );
        assert!(system.purchase_trait(&mut character, "bloodied", &[]).is_err());

        system
            .purchase_trait(&mut character, "bloodied", &[StatKey::Damage, StatKey::Accuracy])
            .unwrap();
        system
            .purchase_trait(&mut character, "focused", &[StatKey::Damage])
            .unwrap();
        // 30 spent of 30.
        let err = system
            .purchase_trait(&mut character, "vengeful", &[StatKey::Damage])
            .unwrap_err();
        assert!(err.to_string().contains("main pool"));

        let traits = &character.main_pool_purchases.traits;
        assert_eq!(traits[0].sequence, 1);
        assert_eq!(traits[1].sequence, 2);
    }

    #[test]
    fn flaws_extend_the_pool_and_guard_removal() {
        let catalog = sample_catalog();
        let system = TraitFlawSystem::new(&catalog);
        let mut character = ready_character(2, "normal");
        // Tier 2: main pool 0 until a flaw is taken.
        assert!(
            system
                .purchase_trait(&mut character, "ambusher", &[StatKey::Initiative])
                .is_err()
        );
        system
            .purchase_flaw(&mut character, "sickly", Some(StatKey::Avoidance))
            .unwrap();
        system
            .purchase_trait(&mut character, "ambusher", &[StatKey::Initiative])
            .unwrap();
        assert!(system.purchase_flaw(&mut character, "sickly", None).is_err());

        let err = system.remove_flaw(&mut character, "sickly").unwrap_err();
        assert!(err.to_string().contains("overspent"));

        system.remove_trait(&mut character, 0).unwrap();
        system.remove_flaw(&mut character, "sickly").unwrap();
        assert!(character.main_pool_purchases.flaws.is_empty());
    }

    #[test]
    fn flaw_archetype_exclusion() {
        let catalog = sample_catalog();
        let system = TraitFlawSystem::new(&catalog);
        let mut character = ready_character(4, "normal");
        character.archetypes.movement = Some("swift".into());
        let err = system.purchase_flaw(&mut character, "slow", None).unwrap_err();
        assert!(err.to_string().contains("swift"));
    }

    #[test]
    fn balanced_requires_current_attributes() {
        let catalog = sample_catalog();
        let system = TraitFlawSystem::new(&catalog);
        let mut character = ready_character(4, "normal");
        let err = system
            .purchase_flaw(&mut character, "balanced", None)
            .unwrap_err();
        assert_eq!(err.reasons().len(), 4);

        for key in AttributeKey::COMBAT {
            character.attributes.set(key, 2);
        }
        system.purchase_flaw(&mut character, "balanced", None).unwrap();
        assert_eq!(
            system.combat_attribute_minimum(&character),
            Some(("balanced".to_string(), 2))
        );
    }

    #[test]
    fn flaw_bonus_must_be_bonusable() {
        let catalog = sample_catalog();
        let system = TraitFlawSystem::new(&catalog);
        let mut character = ready_character(4, "normal");
        assert!(
            system
                .purchase_flaw(&mut character, "weak", Some(StatKey::Hp))
                .is_err()
        );
    }
}
