use super::{ValidationContext, ValidationIssue, Validator, ValidatorKind};
use crate::archetype::{
    Archetype, ArchetypeSystem, ResolvedArchetypes, SelectionCheck, conflict_between,
};

/// Unknown ids, pairwise conflicts and per-archetype constraints.
///
/// Special-attack caps and the no-limits rule are reported by the special
/// attack validator so they appear once.
pub(super) struct ArchetypeValidator;

impl Validator for ArchetypeValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Archetype
    }

    fn validate(&self, ctx: &ValidationContext<'_>, issues: &mut Vec<ValidationIssue>) {
        let resolved = ResolvedArchetypes::resolve(&ctx.character.archetypes);
        for (category, id) in &resolved.unknown {
            issues.push(ValidationIssue::error(
                self.kind(),
                "ARCHETYPE_UNKNOWN",
                format!("unknown {category} archetype '{id}'"),
            ));
        }

        let selected = resolved.selected();
        for (i, &a) in selected.iter().enumerate() {
            for &b in &selected[i + 1..] {
                if let Some(reason) = conflict_between(a, b) {
                    issues.push(ValidationIssue::error(
                        self.kind(),
                        "ARCHETYPE_CONFLICT",
                        format!("{} conflicts with {}: {reason}", a.id(), b.id()),
                    ));
                }
            }
        }

        let system = ArchetypeSystem::new(ctx.catalog);
        for archetype in selected {
            if matches!(archetype, Archetype::SpecialAttack(_)) {
                continue;
            }
            let mut check = SelectionCheck::default();
            system.check_constraints(ctx.character, archetype, &mut check);
            for message in check.errors {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "ARCHETYPE_CONSTRAINT",
                    message,
                ));
            }
            for message in check.warnings {
                issues.push(ValidationIssue::warning(
                    self.kind(),
                    "ARCHETYPE_CONSTRAINT",
                    message,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Character, EffectType, FlawPurchase, SpecialAttack};
    use crate::config::RulesConfig;
    use crate::testing::{ready_character, sample_catalog};

    fn run(character: &Character) -> Vec<ValidationIssue> {
        let catalog = sample_catalog();
        let config = RulesConfig::default();
        let ctx = ValidationContext {
            character,
            catalog: &catalog,
            config: &config,
        };
        let mut issues = Vec::new();
        ArchetypeValidator.validate(&ctx, &mut issues);
        issues
    }

    #[test]
    fn neutral_build_is_clean() {
        assert!(run(&ready_character(4, "normal")).is_empty());
    }

    #[test]
    fn unknown_and_conflicting_archetypes() {
        let mut character = ready_character(4, "basic");
        character.archetypes.effect_type = Some("crowdControl".into());
        character.archetypes.defensive = Some("nonsense".into());
        let issues = run(&character);
        let codes: Vec<_> = issues.iter().map(|issue| issue.code).collect();
        assert_eq!(codes, ["ARCHETYPE_UNKNOWN", "ARCHETYPE_CONFLICT"]);
        assert!(issues.iter().all(ValidationIssue::is_error));
    }

    #[test]
    fn constraints_against_existing_content() {
        let mut character = ready_character(4, "normal");
        character.archetypes.effect_type = Some("damageSpecialist".into());
        character.archetypes.movement = Some("swift".into());
        let mut attack = SpecialAttack::new(character.next_attack_id(), "Snare");
        attack.effect_type = EffectType::Condition;
        character.special_attacks.push(attack);
        character.main_pool_purchases.flaws.push(FlawPurchase {
            id: "slow".into(),
            stat_bonus: None,
            sequence: 1,
        });

        let issues = run(&character);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|issue| issue.message.contains("Snare")));
        assert!(issues.iter().any(|issue| issue.message.contains("swift")));
    }
}
