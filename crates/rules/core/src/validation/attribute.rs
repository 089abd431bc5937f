use super::{ValidationContext, ValidationIssue, Validator, ValidatorKind};
use crate::character::AttributeKey;
use crate::config::RulesConfig;
use crate::systems::combat_attribute_minimum;
use crate::tier;

/// Tier bounds and per-attribute limits. Pool totals are checked with the
/// other point pools.
pub(super) struct AttributeValidator;

impl Validator for AttributeValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Attribute
    }

    fn validate(&self, ctx: &ValidationContext<'_>, issues: &mut Vec<ValidationIssue>) {
        let character = ctx.character;
        let tier = character.tier;
        if !tier::is_valid_tier(tier) {
            issues.push(ValidationIssue::error(
                self.kind(),
                "TIER_INVALID",
                format!(
                    "tier {tier} is outside {}..={}",
                    RulesConfig::TIER_MIN,
                    RulesConfig::TIER_MAX
                ),
            ));
        }

        for (key, value) in character.attributes.iter() {
            if value < 0 {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "ATTRIBUTE_NEGATIVE",
                    format!("{key} is {value}"),
                ));
            } else if value > tier {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "ATTRIBUTE_ABOVE_TIER",
                    format!("{key} is {value}, above the tier {tier} maximum"),
                ));
            }
        }

        if let Some((flaw, minimum)) = combat_attribute_minimum(character, ctx.catalog) {
            for key in AttributeKey::COMBAT {
                let value = character.attributes.get(key);
                if value < minimum {
                    issues.push(ValidationIssue::error(
                        self.kind(),
                        "ATTRIBUTE_BELOW_FLAW_MINIMUM",
                        format!("{flaw} requires {key} of at least {minimum}, currently {value}"),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Character, FlawPurchase};
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
        AttributeValidator.validate(&ctx, &mut issues);
        issues
    }

    #[test]
    fn bounds() {
        let mut character = ready_character(3, "normal");
        character.attributes.power = 4;
        character.attributes.awareness = -1;
        let codes: Vec<_> = run(&character).iter().map(|issue| issue.code).collect();
        assert_eq!(codes, ["ATTRIBUTE_ABOVE_TIER", "ATTRIBUTE_NEGATIVE"]);

        character.tier = 0;
        character.attributes = Default::default();
        let codes: Vec<_> = run(&character).iter().map(|issue| issue.code).collect();
        assert_eq!(codes, ["TIER_INVALID"]);
    }

    #[test]
    fn balanced_minimum_applies_to_each_combat_attribute() {
        let mut character = ready_character(4, "normal");
        for key in AttributeKey::COMBAT {
            character.attributes.set(key, 1);
        }
        character.main_pool_purchases.flaws.push(FlawPurchase {
            id: "balanced".into(),
            stat_bonus: None,
            sequence: 1,
        });
        let issues = run(&character);
        assert_eq!(issues.len(), 4);
        assert!(
            issues
                .iter()
                .all(|issue| issue.code == "ATTRIBUTE_BELOW_FLAW_MINIMUM")
        );
    }
}
