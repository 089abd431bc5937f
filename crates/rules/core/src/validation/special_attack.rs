use std::collections::BTreeSet;

use super::{ValidationContext, ValidationIssue, Validator, ValidatorKind};
use crate::archetype::{MovementArchetype, ResolvedArchetypes};
use crate::catalog::{ConditionTier, LimitRestriction};
use crate::character::SpecialAttack;
use crate::limits::AttackPoints;
use crate::systems::BANNED_UPGRADE_PAIRS;

/// Structural checks on every special attack. Budgets are left to the point
/// pool validator.
pub(super) struct SpecialAttackValidator;

impl Validator for SpecialAttackValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::SpecialAttack
    }

    fn validate(&self, ctx: &ValidationContext<'_>, issues: &mut Vec<ValidationIssue>) {
        let character = ctx.character;
        let archetypes = ResolvedArchetypes::resolve(&character.archetypes);

        if let Some(special) = archetypes.special_attack {
            let count = character.special_attacks.len();
            if let Some(max) = special.max_attacks() {
                if count > max {
                    issues.push(ValidationIssue::error(
                        self.kind(),
                        "ATTACK_COUNT_EXCEEDED",
                        format!("{special} allows at most {max} special attacks, found {count}"),
                    ));
                }
            }
        }

        let mut ids = BTreeSet::new();
        for attack in &character.special_attacks {
            if !ids.insert(attack.id) {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "ATTACK_ID_DUPLICATE",
                    format!("attack id {} is used more than once", attack.id),
                ));
            }
            if attack.name.trim().is_empty() {
                issues.push(ValidationIssue::warning(
                    self.kind(),
                    "ATTACK_NAME_EMPTY",
                    format!("attack {} has no name", attack.id),
                ));
            }

            let expected = AttackPoints::compute(attack, character.tier, &archetypes, ctx.catalog);
            if attack.cached_points() != expected.to_cache() {
                issues.push(ValidationIssue::warning(
                    self.kind(),
                    "ATTACK_POINTS_STALE",
                    format!(
                        "'{}' stores outdated point totals; recalculate the attack",
                        attack.name
                    ),
                ));
            }

            self.check_attack_types(attack, issues);
            self.check_limits(ctx, &archetypes, attack, issues);
            self.check_upgrades(ctx, attack, issues);
            self.check_conditions(ctx, attack, issues);
        }
    }
}

impl SpecialAttackValidator {
    fn check_attack_types(&self, attack: &SpecialAttack, issues: &mut Vec<ValidationIssue>) {
        let mut seen = BTreeSet::new();
        for attack_type in &attack.attack_types {
            if !seen.insert(*attack_type) {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "ATTACK_TYPE_DUPLICATE",
                    format!("'{}' lists {attack_type} more than once", attack.name),
                ));
            }
        }
    }

    fn check_limits(
        &self,
        ctx: &ValidationContext<'_>,
        archetypes: &ResolvedArchetypes,
        attack: &SpecialAttack,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if attack.limits.is_empty() {
            return;
        }
        if archetypes.forbids_limits() {
            issues.push(ValidationIssue::warning(
                self.kind(),
                "LIMITS_IGNORED",
                format!(
                    "'{}' has limits but the special attack archetype does not use them",
                    attack.name
                ),
            ));
        }

        let behemoth = archetypes.movement == Some(MovementArchetype::Behemoth);
        let tree = ctx.catalog.limits();
        let mut seen = BTreeSet::new();
        for limit in &attack.limits {
            if !seen.insert(limit.id.as_str()) {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "LIMIT_DUPLICATE",
                    format!("'{}' has limit '{}' more than once", attack.name, limit.id),
                ));
                continue;
            }
            let Some(node) = tree.get(&limit.id) else {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "LIMIT_UNKNOWN",
                    format!("'{}' uses unknown limit '{}'", attack.name, limit.id),
                ));
                continue;
            };
            if let Some(parent) = tree.parent(&limit.id) {
                if !attack.has_limit(parent.id()) {
                    issues.push(ValidationIssue::error(
                        self.kind(),
                        "LIMIT_PARENT_MISSING",
                        format!(
                            "'{}' has limit '{}' without its parent '{}'",
                            attack.name,
                            limit.id,
                            parent.id()
                        ),
                    ));
                }
            }
            if !node.definition.cost.accepts(limit.points) {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "LIMIT_POINTS_INVALID",
                    format!(
                        "'{}' records {} points for limit '{}'",
                        attack.name, limit.points, limit.id
                    ),
                ));
            }
            if behemoth
                && node
                    .definition
                    .has_restriction(LimitRestriction::BehemothRestricted)
            {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "LIMIT_RESTRICTED",
                    format!(
                        "'{}' uses limit '{}', which behemoth cannot take",
                        attack.name, limit.id
                    ),
                ));
            }
        }
    }

    fn check_upgrades(
        &self,
        ctx: &ValidationContext<'_>,
        attack: &SpecialAttack,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let mut seen = BTreeSet::new();
        for upgrade in &attack.upgrades {
            if !seen.insert(upgrade.id.as_str()) {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "UPGRADE_DUPLICATE",
                    format!("'{}' has upgrade '{}' more than once", attack.name, upgrade.id),
                ));
                continue;
            }
            let Some(definition) = ctx.catalog.upgrade(&upgrade.id) else {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "UPGRADE_UNKNOWN",
                    format!("'{}' uses unknown upgrade '{}'", attack.name, upgrade.id),
                ));
                continue;
            };
            let quantity_ok = if definition.cost.is_per_unit() {
                upgrade.quantity >= 1
            } else {
                upgrade.quantity == 1
            };
            if !quantity_ok {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "UPGRADE_QUANTITY_INVALID",
                    format!(
                        "'{}' takes upgrade '{}' {} times",
                        attack.name, upgrade.id, upgrade.quantity
                    ),
                ));
            }
            for requirement in definition.unmet_requirements(attack) {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "UPGRADE_REQUIREMENT_UNMET",
                    format!("'{}': upgrade '{}' {requirement}", attack.name, upgrade.id),
                ));
            }
        }

        for (a, b) in BANNED_UPGRADE_PAIRS {
            if attack.has_upgrade(a) && attack.has_upgrade(b) {
                issues.push(ValidationIssue::error(
                    self.kind(),
                    "UPGRADE_CONFLICT",
                    format!("'{}' combines '{a}' and '{b}'", attack.name),
                ));
            }
        }
    }

    fn check_conditions(
        &self,
        ctx: &ValidationContext<'_>,
        attack: &SpecialAttack,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let lists = [
            (ConditionTier::Basic, &attack.basic_conditions),
            (ConditionTier::Advanced, &attack.advanced_conditions),
        ];
        let any = lists.iter().any(|(_, list)| !list.is_empty());
        if any && !attack.effect_type.allows_conditions() {
            issues.push(ValidationIssue::error(
                self.kind(),
                "CONDITIONS_NOT_ALLOWED",
                format!(
                    "'{}' has conditions but the {} effect type cannot apply them",
                    attack.name, attack.effect_type
                ),
            ));
        }

        for (tier, list) in lists {
            for id in list {
                match ctx.catalog.condition(id) {
                    None => issues.push(ValidationIssue::error(
                        self.kind(),
                        "CONDITION_UNKNOWN",
                        format!("'{}' uses unknown condition '{id}'", attack.name),
                    )),
                    Some(condition) if condition.tier != tier => {
                        issues.push(ValidationIssue::error(
                            self.kind(),
                            "CONDITION_TIER_MISMATCH",
                            format!(
                                "'{}' lists {} condition '{id}' among its {} conditions",
                                attack.name, condition.tier, tier
                            ),
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
    }
}
