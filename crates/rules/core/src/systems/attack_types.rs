//! Attack delivery types, effect types and conditions on special attacks.

use crate::archetype::{EffectTypeArchetype, ResolvedArchetypes};
use crate::catalog::{Catalog, ConditionTier};
use crate::character::{AttackId, AttackType, Character, EffectType, SpecialAttack};
use crate::error::{BuildError, CatalogKind};
use crate::limits::AttackPoints;

use super::special_attacks::{budget_reason, commit, project, stage};

pub struct AttackTypeSystem<'c> {
    catalog: &'c Catalog,
}

impl<'c> AttackTypeSystem<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn is_free_attack_type(&self, character: &Character, attack_type: AttackType) -> bool {
        ResolvedArchetypes::resolve(&character.archetypes)
            .free_attack_types()
            .contains(&attack_type)
    }

    /// Upgrade points the type costs this character; 0 when free.
    pub fn attack_type_cost(&self, character: &Character, attack_type: AttackType) -> i32 {
        if self.is_free_attack_type(character, attack_type) {
            0
        } else {
            attack_type.cost()
        }
    }

    pub fn add_attack_type(
        &self,
        character: &mut Character,
        id: AttackId,
        attack_type: AttackType,
    ) -> Result<AttackPoints, BuildError> {
        let mut staged = stage(character, id)?;
        if staged.has_attack_type(attack_type) {
            return Err(BuildError::rejected(
                "add attack type",
                format!("attack already has the {attack_type} type"),
            ));
        }
        let before = project(character, &staged, self.catalog);
        staged.attack_types.push(attack_type);
        let after = project(character, &staged, self.catalog);
        BuildError::check(
            "add attack type",
            budget_reason(&before, &after).into_iter().collect(),
        )?;

        let result = commit(character, staged, self.catalog)?;
        tracing::debug!(attack = %id, %attack_type, "attack type added");
        Ok(result)
    }

    /// Removes a type unless an applied upgrade depends on it.
    pub fn remove_attack_type(
        &self,
        character: &mut Character,
        id: AttackId,
        attack_type: AttackType,
    ) -> Result<AttackPoints, BuildError> {
        let mut staged = stage(character, id)?;
        if !staged.has_attack_type(attack_type) {
            return Err(BuildError::rejected(
                "remove attack type",
                format!("attack does not have the {attack_type} type"),
            ));
        }
        staged.attack_types.retain(|t| *t != attack_type);
        BuildError::check("remove attack type", self.broken_upgrades(&staged))?;

        let result = commit(character, staged, self.catalog)?;
        tracing::debug!(attack = %id, %attack_type, "attack type removed");
        Ok(result)
    }

    pub fn set_effect_type(
        &self,
        character: &mut Character,
        id: AttackId,
        effect: EffectType,
    ) -> Result<AttackPoints, BuildError> {
        let mut staged = stage(character, id)?;
        let archetypes = ResolvedArchetypes::resolve(&character.archetypes);

        let mut reasons = Vec::new();
        if archetypes.effect_type == Some(EffectTypeArchetype::DamageSpecialist)
            && effect != EffectType::Damage
        {
            reasons.push("damageSpecialist attacks must use the damage effect type".to_string());
        }
        let conditions = staged.basic_conditions.len() + staged.advanced_conditions.len();
        if !effect.allows_conditions() && conditions > 0 {
            reasons.push(format!(
                "remove the attack's {conditions} conditions before switching to {effect}"
            ));
        }
        staged.effect_type = effect;
        reasons.extend(self.broken_upgrades(&staged));
        BuildError::check("set effect type", reasons)?;

        let result = commit(character, staged, self.catalog)?;
        tracing::debug!(attack = %id, %effect, "effect type set");
        Ok(result)
    }

    pub fn add_condition(
        &self,
        character: &mut Character,
        id: AttackId,
        condition_id: &str,
    ) -> Result<AttackPoints, BuildError> {
        let definition = self
            .catalog
            .condition(condition_id)
            .ok_or_else(|| BuildError::not_found(CatalogKind::Condition, condition_id))?;
        let mut staged = stage(character, id)?;
        let before = project(character, &staged, self.catalog);

        let mut reasons = Vec::new();
        if !staged.effect_type.allows_conditions() {
            reasons.push(format!(
                "the {} effect type cannot apply conditions",
                staged.effect_type
            ));
        }
        if staged.has_condition(condition_id) {
            reasons.push(format!("condition '{condition_id}' is already applied"));
        }
        if reasons.is_empty() {
            match definition.tier {
                ConditionTier::Basic => staged.basic_conditions.push(condition_id.to_string()),
                ConditionTier::Advanced => {
                    staged.advanced_conditions.push(condition_id.to_string())
                }
            }
            let after = project(character, &staged, self.catalog);
            reasons.extend(budget_reason(&before, &after));
        }
        BuildError::check("add condition", reasons)?;

        let result = commit(character, staged, self.catalog)?;
        tracing::debug!(attack = %id, condition = condition_id, "condition added");
        Ok(result)
    }

    pub fn remove_condition(
        &self,
        character: &mut Character,
        id: AttackId,
        condition_id: &str,
    ) -> Result<AttackPoints, BuildError> {
        let mut staged = stage(character, id)?;
        if !staged.has_condition(condition_id) {
            return Err(BuildError::rejected(
                "remove condition",
                format!("condition '{condition_id}' is not applied"),
            ));
        }
        staged.basic_conditions.retain(|c| c != condition_id);
        staged.advanced_conditions.retain(|c| c != condition_id);

        let result = commit(character, staged, self.catalog)?;
        tracing::debug!(attack = %id, condition = condition_id, "condition removed");
        Ok(result)
    }

    fn broken_upgrades(&self, attack: &SpecialAttack) -> Vec<String> {
        attack
            .upgrades
            .iter()
            .filter_map(|upgrade| self.catalog.upgrade(&upgrade.id))
            .flat_map(|definition| {
                definition
                    .unmet_requirements(attack)
                    .into_iter()
                    .map(move |reason| format!("upgrade '{}' {reason}", definition.id))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::SpecialAttackSystem;
    use crate::testing::{ready_character, sample_catalog};

    fn setup(tier: i32, archetype: &str) -> (Catalog, Character, AttackId) {
        let catalog = sample_catalog();
        let mut character = ready_character(tier, archetype);
        let id = SpecialAttackSystem::new(&catalog)
            .create_special_attack(&mut character, "Wave")
            .unwrap();
        (catalog, character, id)
    }

    #[test]
    fn free_types_cost_nothing() {
        let (catalog, character, _) = setup(4, "paragon");
        let system = AttackTypeSystem::new(&catalog);
        assert!(system.is_free_attack_type(&character, AttackType::Melee));
        assert_eq!(system.attack_type_cost(&character, AttackType::Ranged), 0);
        assert_eq!(system.attack_type_cost(&character, AttackType::Area), 30);
    }

    #[test]
    fn paid_types_consume_points() {
        let (catalog, mut character, id) = setup(4, "paragon");
        let system = AttackTypeSystem::new(&catalog);
        let points = system
            .add_attack_type(&mut character, id, AttackType::Area)
            .unwrap();
        assert_eq!(points.spent.attack_types, 30);
        assert!(
            system
                .add_attack_type(&mut character, id, AttackType::Area)
                .is_err()
        );
        // 10 remaining, direct costs 30.
        assert!(
            system
                .add_attack_type(&mut character, id, AttackType::Direct)
                .is_err()
        );
    }

    #[test]
    fn removing_type_checks_dependent_upgrades() {
        let (catalog, mut character, id) = setup(6, "paragon");
        let system = AttackTypeSystem::new(&catalog);
        system
            .add_attack_type(&mut character, id, AttackType::Ranged)
            .unwrap();
        SpecialAttackSystem::new(&catalog)
            .add_upgrade_to_attack(&mut character, id, "extendedRange", 1)
            .unwrap();
        let err = system
            .remove_attack_type(&mut character, id, AttackType::Ranged)
            .unwrap_err();
        assert!(err.to_string().contains("extendedRange"));
        assert!(character.attack(id).unwrap().has_attack_type(AttackType::Ranged));
    }

    #[test]
    fn conditions_need_a_condition_effect() {
        let (catalog, mut character, id) = setup(6, "paragon");
        let system = AttackTypeSystem::new(&catalog);
        assert!(system.add_condition(&mut character, id, "prone").is_err());

        system
            .set_effect_type(&mut character, id, EffectType::Condition)
            .unwrap();
        system.add_condition(&mut character, id, "prone").unwrap();
        let points = system.add_condition(&mut character, id, "stunned").unwrap();
        assert_eq!(points.spent.advanced_conditions, 20);
        let attack = character.attack(id).unwrap();
        assert_eq!(attack.basic_conditions, vec!["prone"]);
        assert_eq!(attack.advanced_conditions, vec!["stunned"]);

        let err = system
            .set_effect_type(&mut character, id, EffectType::Damage)
            .unwrap_err();
        assert!(err.to_string().contains("conditions"));

        system.remove_condition(&mut character, id, "prone").unwrap();
        system.remove_condition(&mut character, id, "stunned").unwrap();
        system
            .set_effect_type(&mut character, id, EffectType::Damage)
            .unwrap();
    }

    #[test]
    fn crowd_control_gets_two_free_advanced_conditions() {
        let (catalog, mut character, id) = setup(4, "paragon");
        character.archetypes.effect_type = Some("crowdControl".into());
        let system = AttackTypeSystem::new(&catalog);
        system
            .set_effect_type(&mut character, id, EffectType::Condition)
            .unwrap();
        for condition in ["stunned", "frightened"] {
            system.add_condition(&mut character, id, condition).unwrap();
        }
        let points = system
            .add_condition(&mut character, id, "controlled")
            .unwrap();
        assert_eq!(points.spent.advanced_conditions, 20);
    }

    #[test]
    fn damage_specialist_locks_effect_type() {
        let (catalog, mut character, id) = setup(4, "paragon");
        character.archetypes.effect_type = Some("damageSpecialist".into());
        let system = AttackTypeSystem::new(&catalog);
        assert!(
            system
                .set_effect_type(&mut character, id, EffectType::Hybrid)
                .is_err()
        );
    }

    #[test]
    fn unknown_condition_is_not_found() {
        let (catalog, mut character, id) = setup(4, "paragon");
        let system = AttackTypeSystem::new(&catalog);
        assert!(matches!(
            system.add_condition(&mut character, id, "petrified"),
            Err(BuildError::NotFound { .. })
        ));
    }
}
