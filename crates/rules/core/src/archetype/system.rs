//! Archetype selection: checks, application and derived queries.

use serde::Serialize;

use super::{
    Archetype, ArchetypeCategory, ArchetypeInfo, EffectTypeArchetype, MovementArchetype,
    ResolvedArchetypes, SpecialAttackPointMethod, UtilityArchetype, archetypes_for_category,
    conflict_between,
};
use crate::catalog::{Catalog, LimitRestriction};
use crate::character::{AttackType, Character, EffectType};
use crate::error::BuildError;
use crate::systems::special_attacks::recalculate_all_attacks;

/// Outcome of checking one archetype selection against a character.
///
/// Errors block the selection; warnings are shown but do not.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SelectionCheck {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl SelectionCheck {
    pub fn is_allowed(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct ArchetypeSystem<'c> {
    catalog: &'c Catalog,
}

impl<'c> ArchetypeSystem<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn archetypes_for_category(&self, category: ArchetypeCategory) -> Vec<ArchetypeInfo> {
        archetypes_for_category(category)
    }

    /// Checks whether `id` may be selected for `category` given the rest of the build.
    pub fn validate_archetype_selection(
        &self,
        character: &Character,
        category: ArchetypeCategory,
        id: &str,
    ) -> SelectionCheck {
        let mut check = SelectionCheck::default();
        let Some(archetype) = Archetype::parse(category, id) else {
            check
                .errors
                .push(format!("unknown {category} archetype '{id}'"));
            return check;
        };

        let resolved = ResolvedArchetypes::resolve(&character.archetypes);
        for other in resolved.selected() {
            if other.category() == category {
                continue;
            }
            if let Some(reason) = conflict_between(archetype, other) {
                check.errors.push(format!(
                    "{id} conflicts with {} archetype {}: {reason}",
                    other.category(),
                    other.id()
                ));
            }
        }

        self.check_constraints(character, archetype, &mut check);

        let current = character.archetypes.get(category);
        if current.is_some_and(|current| current != id) {
            if character.attributes.any_assigned() {
                check.warnings.push(format!(
                    "changing the {category} archetype after assigning attributes may invalidate them"
                ));
            }
            if character.has_main_pool_purchases() {
                check.warnings.push(format!(
                    "changing the {category} archetype after main pool purchases may invalidate them"
                ));
            }
        }

        check
    }

    /// Rules tying `archetype` to content already in the build.
    pub(crate) fn check_constraints(
        &self,
        character: &Character,
        archetype: Archetype,
        check: &mut SelectionCheck,
    ) {
        for purchase in &character.main_pool_purchases.flaws {
            if let Some(flaw) = self.catalog.flaw(&purchase.id) {
                if flaw.excludes(archetype.category(), archetype.id()) {
                    check.errors.push(format!(
                        "flaw '{}' excludes the {} archetype",
                        flaw.name,
                        archetype.id()
                    ));
                }
            }
        }

        match archetype {
            Archetype::Movement(MovementArchetype::Behemoth) => {
                for attack in &character.special_attacks {
                    for limit in &attack.limits {
                        let restricted = self.catalog.limit(&limit.id).is_some_and(|node| {
                            node.definition
                                .has_restriction(LimitRestriction::BehemothRestricted)
                        });
                        if restricted {
                            check.errors.push(format!(
                                "special attack '{}' uses limit '{}', which behemoth cannot take",
                                attack.name, limit.id
                            ));
                        }
                    }
                }
            }
            Archetype::SpecialAttack(special) => {
                let count = character.special_attacks.len();
                if let Some(max) = special.max_attacks() {
                    if count > max {
                        check.errors.push(format!(
                            "{special} allows at most {max} special attacks, character has {count}"
                        ));
                    }
                }
                if special.forbids_limits() {
                    let with_limits = character
                        .special_attacks
                        .iter()
                        .filter(|attack| !attack.limits.is_empty())
                        .count();
                    if with_limits > 0 {
                        check.warnings.push(format!(
                            "{special} does not use limits; limits on {with_limits} special attacks will be ignored"
                        ));
                    }
                }
            }
            Archetype::EffectType(EffectTypeArchetype::DamageSpecialist) => {
                for attack in &character.special_attacks {
                    if attack.effect_type != EffectType::Damage {
                        check.errors.push(format!(
                            "special attack '{}' uses the {} effect type; damageSpecialist requires damage",
                            attack.name, attack.effect_type
                        ));
                    }
                }
            }
            Archetype::Utility(UtilityArchetype::JackOfAllTrades) => {
                if character.utility_purchases.has_expertise() {
                    check
                        .errors
                        .push("jackOfAllTrades cannot be combined with purchased expertise".into());
                }
            }
            _ => {}
        }
    }

    /// Selects an archetype and recalculates every attack's point cache.
    ///
    /// Returns the warnings of the selection check.
    pub fn set_archetype(
        &self,
        character: &mut Character,
        category: ArchetypeCategory,
        id: &str,
    ) -> Result<Vec<String>, BuildError> {
        if Archetype::parse(category, id).is_none() {
            return Err(BuildError::UnknownArchetype {
                category,
                id: id.to_string(),
            });
        }
        let check = self.validate_archetype_selection(character, category, id);
        BuildError::check("set archetype", check.errors)?;

        character.archetypes.set(category, Some(id.to_string()));
        recalculate_all_attacks(character, self.catalog);
        tracing::debug!(%category, id, "archetype selected");
        Ok(check.warnings)
    }

    pub fn clear_archetype(&self, character: &mut Character, category: ArchetypeCategory) {
        character.archetypes.set(category, None);
        recalculate_all_attacks(character, self.catalog);
        tracing::debug!(%category, "archetype cleared");
    }

    pub fn get_free_attack_types(&self, character: &Character) -> &'static [AttackType] {
        ResolvedArchetypes::resolve(&character.archetypes).free_attack_types()
    }

    pub fn get_special_attack_point_method(
        &self,
        character: &Character,
    ) -> Option<SpecialAttackPointMethod> {
        ResolvedArchetypes::resolve(&character.archetypes)
            .special_attack_point_method(character.tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{
        AttackId, ExpertiseLevels, FlawPurchase, LimitSelection, SpecialAttack,
    };
    use crate::testing::{ready_character, sample_catalog};

    fn limit(id: &str, points: i32) -> LimitSelection {
        LimitSelection {
            id: id.into(),
            points,
            category: id.into(),
            parent: None,
        }
    }

    #[test]
    fn unknown_id_is_an_error() {
        let catalog = sample_catalog();
        let system = ArchetypeSystem::new(&catalog);
        let character = ready_character(4, "normal");
        let check =
            system.validate_archetype_selection(&character, ArchetypeCategory::Movement, "warp");
        assert!(!check.is_allowed());
        assert!(check.errors[0].contains("warp"));
    }

    #[test]
    fn basic_conflicts_with_crowd_control() {
        let catalog = sample_catalog();
        let system = ArchetypeSystem::new(&catalog);
        let mut character = ready_character(4, "basic");
        character.special_attacks.clear();
        let check = system.validate_archetype_selection(
            &character,
            ArchetypeCategory::EffectType,
            "crowdControl",
        );
        assert_eq!(check.errors.len(), 1);
        assert!(check.errors[0].contains("basic"));
    }

    #[test]
    fn behemoth_rejected_with_restricted_limit() {
        let catalog = sample_catalog();
        let system = ArchetypeSystem::new(&catalog);
        let mut character = ready_character(4, "normal");
        let mut attack = SpecialAttack::new(AttackId(1), "Slam");
        attack.limits.push(limit("rooted", 30));
        character.special_attacks.push(attack);

        let check = system.validate_archetype_selection(
            &character,
            ArchetypeCategory::Movement,
            "behemoth",
        );
        assert!(!check.is_allowed());
        let err = system
            .set_archetype(&mut character, ArchetypeCategory::Movement, "behemoth")
            .unwrap_err();
        assert_eq!(err.reasons().len(), 1);
        assert_eq!(character.archetypes.movement.as_deref(), Some("flight"));
    }

    #[test]
    fn attack_caps_block_one_trick() {
        let catalog = sample_catalog();
        let system = ArchetypeSystem::new(&catalog);
        let mut character = ready_character(4, "normal");
        character
            .special_attacks
            .push(SpecialAttack::new(AttackId(1), "A"));
        character
            .special_attacks
            .push(SpecialAttack::new(AttackId(2), "B"));

        let check = system.validate_archetype_selection(
            &character,
            ArchetypeCategory::SpecialAttack,
            "oneTrick",
        );
        assert!(!check.is_allowed());
        let check = system.validate_archetype_selection(
            &character,
            ArchetypeCategory::SpecialAttack,
            "dualNatured",
        );
        assert!(check.is_allowed());
    }

    #[test]
    fn limit_forbidding_archetype_warns() {
        let catalog = sample_catalog();
        let system = ArchetypeSystem::new(&catalog);
        let mut character = ready_character(4, "normal");
        let mut attack = SpecialAttack::new(AttackId(1), "Slam");
        attack.limits.push(limit("charges", 30));
        character.special_attacks.push(attack);

        let check = system.validate_archetype_selection(
            &character,
            ArchetypeCategory::SpecialAttack,
            "paragon",
        );
        assert!(check.is_allowed());
        assert!(check.warnings.iter().any(|w| w.contains("limits")));
    }

    #[test]
    fn damage_specialist_needs_damage_attacks() {
        let catalog = sample_catalog();
        let system = ArchetypeSystem::new(&catalog);
        let mut character = ready_character(4, "normal");
        let mut attack = SpecialAttack::new(AttackId(1), "Hex");
        attack.effect_type = EffectType::Condition;
        character.special_attacks.push(attack);
        let check = system.validate_archetype_selection(
            &character,
            ArchetypeCategory::EffectType,
            "damageSpecialist",
        );
        assert!(!check.is_allowed());
    }

    #[test]
    fn jack_of_all_trades_excludes_expertise() {
        let catalog = sample_catalog();
        let system = ArchetypeSystem::new(&catalog);
        let mut character = ready_character(4, "normal");
        character.utility_purchases.expertise.insert(
            crate::character::AttributeKey::Awareness,
            ExpertiseLevels {
                basic: vec!["tracking".into()],
                mastered: Vec::new(),
            },
        );
        let check = system.validate_archetype_selection(
            &character,
            ArchetypeCategory::Utility,
            "jackOfAllTrades",
        );
        assert!(!check.is_allowed());
    }

    #[test]
    fn flaw_exclusions_apply() {
        let catalog = sample_catalog();
        let system = ArchetypeSystem::new(&catalog);
        let mut character = ready_character(4, "normal");
        character.main_pool_purchases.flaws.push(FlawPurchase {
            id: "slow".into(),
            stat_bonus: None,
            sequence: 1,
        });
        let check =
            system.validate_archetype_selection(&character, ArchetypeCategory::Movement, "swift");
        assert!(!check.is_allowed());
    }

    #[test]
    fn changing_with_progress_warns_but_allows() {
        let catalog = sample_catalog();
        let system = ArchetypeSystem::new(&catalog);
        let mut character = ready_character(4, "normal");
        let warnings = system
            .set_archetype(&mut character, ArchetypeCategory::Defensive, "fortress")
            .unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(character.archetypes.defensive.as_deref(), Some("fortress"));
    }

    #[test]
    fn switching_method_recalculates_attacks() {
        let catalog = sample_catalog();
        let system = ArchetypeSystem::new(&catalog);
        let mut character = ready_character(6, "normal");
        character
            .special_attacks
            .push(SpecialAttack::new(AttackId(1), "Bolt"));
        system
            .set_archetype(&mut character, ArchetypeCategory::SpecialAttack, "paragon")
            .unwrap();
        assert_eq!(
            character.special_attacks[0]
                .cached_points()
                .upgrade_points_available,
            60
        );
        assert_eq!(
            system.get_special_attack_point_method(&character),
            Some(SpecialAttackPointMethod::FixedPoints { per_attack: 60 })
        );

        system.clear_archetype(&mut character, ArchetypeCategory::SpecialAttack);
        assert_eq!(
            character.special_attacks[0]
                .cached_points()
                .upgrade_points_available,
            0
        );
        assert_eq!(system.get_special_attack_point_method(&character), None);
    }

    #[test]
    fn free_types_follow_attack_type_archetype() {
        let catalog = sample_catalog();
        let system = ArchetypeSystem::new(&catalog);
        let character = ready_character(4, "normal");
        assert_eq!(
            system.get_free_attack_types(&character),
            &[AttackType::Melee, AttackType::Ranged]
        );
    }
}
