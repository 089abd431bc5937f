use super::archetype::ArchetypeValidator;
use super::attribute::AttributeValidator;
use super::build_order::{BuildOrderValidator, BuildState};
use super::special_attack::SpecialAttackValidator;
use super::{
    IssueSeverity, ValidationContext, ValidationIssue, ValidationReport, Validator, ValidatorKind,
};
use crate::catalog::Catalog;
use crate::character::Character;
use crate::config::RulesConfig;
use crate::pools::{calculate_all_pools, validate_point_spending};

/// Point budgets across every pool.
struct PointPoolValidator;

impl Validator for PointPoolValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::PointPool
    }

    fn validate(&self, ctx: &ValidationContext<'_>, issues: &mut Vec<ValidationIssue>) {
        let pools = match calculate_all_pools(ctx.character, ctx.catalog) {
            Ok(pools) => pools,
            Err(err) => {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "POOLS_UNAVAILABLE",
                    format!("point pools cannot be calculated: {err}"),
                ));
                return;
            }
        };
        for issue in validate_point_spending(&pools, ctx.config) {
            issues.push(match issue.severity {
                IssueSeverity::Error => {
                    ValidationIssue::error(self.kind(), "POOL_OVER_BUDGET", issue.message)
                }
                IssueSeverity::Warning => {
                    ValidationIssue::warning(self.kind(), "POOL_FULLY_SPENT", issue.message)
                }
            });
        }
    }
}

/// Runs every validator over a character and collects a [`ValidationReport`].
///
/// Each validator runs regardless of earlier findings, so one report lists
/// every problem at once.
pub struct CharacterValidator<'c> {
    catalog: &'c Catalog,
    config: &'c RulesConfig,
}

impl<'c> CharacterValidator<'c> {
    pub fn new(catalog: &'c Catalog, config: &'c RulesConfig) -> Self {
        Self { catalog, config }
    }

    pub fn validate(&self, character: &Character) -> ValidationReport {
        let ctx = ValidationContext {
            character,
            catalog: self.catalog,
            config: self.config,
        };
        let validators: [&dyn Validator; 5] = [
            &BuildOrderValidator,
            &ArchetypeValidator,
            &AttributeValidator,
            &SpecialAttackValidator,
            &PointPoolValidator,
        ];

        let mut issues = Vec::new();
        for validator in validators {
            let before = issues.len();
            validator.validate(&ctx, &mut issues);
            tracing::trace!(
                validator = %validator.kind(),
                found = issues.len() - before,
                "validator finished"
            );
        }

        let report = ValidationReport::from_issues(issues, BuildState::from_character(character));
        tracing::debug!(
            valid = report.is_valid,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "character validated"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{BoonPurchase, FlawPurchase};
    use crate::testing::{ready_character, sample_catalog};

    fn quiet() -> RulesConfig {
        RulesConfig {
            report_fully_spent_pools: false,
            ..RulesConfig::default()
        }
    }

    #[test]
    fn ready_character_is_valid() {
        let catalog = sample_catalog();
        let config = quiet();
        let report = CharacterValidator::new(&catalog, &config).validate(&ready_character(4, "normal"));
        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.warnings.is_empty());
        assert!(report.build_state.archetypes_complete);
        assert!(report.build_state.attributes_assigned);
    }

    #[test]
    fn over_budget_main_pool() {
        let catalog = sample_catalog();
        let config = quiet();
        let mut character = ready_character(2, "normal");
        character
            .main_pool_purchases
            .boons
            .push(BoonPurchase::new("combatReflexes", 1));
        let report = CharacterValidator::new(&catalog, &config).validate(&character);
        assert!(!report.is_valid);
        assert!(report.has_code("POOL_OVER_BUDGET"));
    }

    #[test]
    fn fully_spent_pools_warn_when_enabled() {
        let catalog = sample_catalog();
        let config = RulesConfig::default();
        let mut character = ready_character(2, "normal");
        character.attributes.power = 2;
        character.attributes.mobility = 1;
        let report = CharacterValidator::new(&catalog, &config).validate(&character);
        assert!(report.is_valid);
        assert!(report.has_code("POOL_FULLY_SPENT"));
    }

    #[test]
    fn every_validator_reports_in_one_pass() {
        let catalog = sample_catalog();
        let config = quiet();
        let mut character = ready_character(11, "normal");
        character.archetypes.utility = None;
        character.archetypes.defensive = Some("nonsense".into());
        character.main_pool_purchases.flaws.push(FlawPurchase {
            id: "balanced".into(),
            stat_bonus: None,
            sequence: 1,
        });

        let report = CharacterValidator::new(&catalog, &config).validate(&character);
        let sources: Vec<_> = report.issues().map(|issue| issue.source).collect();
        for kind in [
            ValidatorKind::BuildOrder,
            ValidatorKind::Archetype,
            ValidatorKind::Attribute,
            ValidatorKind::PointPool,
        ] {
            assert!(sources.contains(&kind), "no issue from {kind}");
        }
        assert!(report.has_code("TIER_INVALID"));
        assert!(report.has_code("POOLS_UNAVAILABLE"));
    }
}
