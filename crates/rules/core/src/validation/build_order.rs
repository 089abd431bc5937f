//! Build-order gating.
//!
//! Phases unlock forward only: archetypes, then attributes, then the three
//! purchase phases together. Content in a phase that is still locked is an
//! error; a later phase never locks an earlier one.

use serde::Serialize;

use super::{ValidationContext, ValidationIssue, Validator, ValidatorKind};
use crate::character::Character;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display, strum::EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum BuildPhase {
    Archetypes,
    Attributes,
    MainPool,
    SpecialAttacks,
    Utility,
}

/// Progress flags derived from a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildState {
    pub archetypes_complete: bool,
    pub attributes_assigned: bool,
    pub main_pool_purchases: bool,
    pub has_special_attacks: bool,
}

impl BuildState {
    pub fn from_character(character: &Character) -> Self {
        Self {
            archetypes_complete: character.archetypes.is_complete(),
            attributes_assigned: character.attributes.any_assigned(),
            main_pool_purchases: character.has_main_pool_purchases(),
            has_special_attacks: !character.special_attacks.is_empty(),
        }
    }

    pub fn can_access(&self, phase: BuildPhase) -> bool {
        match phase {
            BuildPhase::Archetypes => true,
            BuildPhase::Attributes => self.archetypes_complete,
            BuildPhase::MainPool | BuildPhase::SpecialAttacks | BuildPhase::Utility => {
                self.archetypes_complete && self.attributes_assigned
            }
        }
    }

    /// What is still missing before `phase` unlocks.
    fn blocker(&self, phase: BuildPhase) -> &'static str {
        if !self.archetypes_complete {
            "select all seven archetypes first"
        } else if phase != BuildPhase::Attributes && !self.attributes_assigned {
            "assign attributes first"
        } else {
            ""
        }
    }
}

pub(super) struct BuildOrderValidator;

impl Validator for BuildOrderValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::BuildOrder
    }

    fn validate(&self, ctx: &ValidationContext<'_>, issues: &mut Vec<ValidationIssue>) {
        let character = ctx.character;
        let state = BuildState::from_character(character);

        let missing = character.archetypes.missing();
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            issues.push(ValidationIssue::warning(
                self.kind(),
                "ARCHETYPES_INCOMPLETE",
                format!("no archetype selected for: {}", names.join(", ")),
            ));
        }

        let content = [
            (BuildPhase::Attributes, state.attributes_assigned, "attributes are assigned"),
            (BuildPhase::MainPool, state.main_pool_purchases, "main pool purchases exist"),
            (
                BuildPhase::SpecialAttacks,
                state.has_special_attacks,
                "special attacks exist",
            ),
            (
                BuildPhase::Utility,
                character.has_utility_purchases(),
                "utility purchases exist",
            ),
        ];
        for (phase, present, what) in content {
            if present && !state.can_access(phase) {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "BUILD_ORDER_VIOLATION",
                    format!("{what} but the {phase} phase is locked: {}", state.blocker(phase)),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::BoonPurchase;
    use crate::config::RulesConfig;
    use crate::testing::{neutral_archetypes, sample_catalog};

    fn run(character: &Character) -> Vec<ValidationIssue> {
        let catalog = sample_catalog();
        let config = RulesConfig::default();
        let ctx = ValidationContext {
            character,
            catalog: &catalog,
            config: &config,
        };
        let mut issues = Vec::new();
        BuildOrderValidator.validate(&ctx, &mut issues);
        issues
    }

    #[test]
    fn phases_unlock_forward() {
        let mut character = Character::new(4);
        let state = BuildState::from_character(&character);
        assert!(state.can_access(BuildPhase::Archetypes));
        assert!(!state.can_access(BuildPhase::Attributes));

        character.archetypes = neutral_archetypes("normal");
        let state = BuildState::from_character(&character);
        assert!(state.can_access(BuildPhase::Attributes));
        assert!(!state.can_access(BuildPhase::MainPool));

        character.attributes.power = 1;
        let state = BuildState::from_character(&character);
        for phase in [BuildPhase::MainPool, BuildPhase::SpecialAttacks, BuildPhase::Utility] {
            assert!(state.can_access(phase));
        }
        // Purchases never lock earlier phases.
        character.main_pool_purchases.boons.push(BoonPurchase::new("robot", 1));
        let state = BuildState::from_character(&character);
        assert!(state.can_access(BuildPhase::Attributes));
    }

    #[test]
    fn blank_character_only_warns() {
        let issues = run(&Character::new(4));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "ARCHETYPES_INCOMPLETE");
        assert!(!issues[0].is_error());
    }

    #[test]
    fn content_in_locked_phase_is_an_error() {
        let mut character = Character::new(4);
        character.attributes.focus = 2;
        character.main_pool_purchases.boons.push(BoonPurchase::new("robot", 1));
        let issues = run(&character);
        let errors: Vec<_> = issues.iter().filter(|issue| issue.is_error()).collect();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("archetypes"));
    }

    #[test]
    fn purchases_before_attributes() {
        let mut character = Character::new(4);
        character.archetypes = neutral_archetypes("normal");
        character
            .utility_purchases
            .features
            .push("linguist".into());
        let issues = run(&character);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("assign attributes"));
    }
}
