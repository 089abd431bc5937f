//! Shared fixtures for unit tests.

use crate::catalog::{
    ArchetypeRef, BoonDefinition, Catalog, CatalogSnapshot, ConditionDefinition, ConditionTier,
    Cost, EffectTags, ExpertiseDefinition, ExpertiseKind, FlawDefinition, FlawPenalty,
    LimitCost, LimitDefinition, LimitRestriction, PrimaryActionUpgradeDefinition, StatAmount,
    StatEffect, TraitDefinition, UpgradeDefinition, UpgradeRequirement, UtilityItemDefinition,
};
use crate::archetype::ArchetypeCategory;
use crate::character::{ArchetypeSelections, AttackType, AttributeKey, Character, EffectType};
use crate::stats::StatKey;

fn limit(id: &str, parent: Option<&str>, cost: LimitCost) -> LimitDefinition {
    LimitDefinition {
        id: id.into(),
        name: id.into(),
        parent: parent.map(Into::into),
        cost,
        restrictions: Vec::new(),
        description: String::new(),
    }
}

fn restricted(mut definition: LimitDefinition) -> LimitDefinition {
    definition.restrictions.push(LimitRestriction::BehemothRestricted);
    definition
}

fn upgrade(id: &str, category: &str, cost: Cost, requires: Vec<UpgradeRequirement>) -> UpgradeDefinition {
    UpgradeDefinition {
        id: id.into(),
        name: id.into(),
        category: category.into(),
        cost,
        requires,
        description: String::new(),
    }
}

fn boon(id: &str, cost: Cost, effects: Vec<StatEffect>) -> BoonDefinition {
    BoonDefinition {
        id: id.into(),
        name: id.into(),
        cost,
        effects,
        immunities: EffectTags::empty(),
        vulnerabilities: EffectTags::empty(),
        disables_passive_healing: false,
        description: String::new(),
    }
}

fn trait_def(id: &str, max_stat_bonuses: usize) -> TraitDefinition {
    TraitDefinition {
        id: id.into(),
        name: id.into(),
        cost: Cost::Fixed(15),
        max_stat_bonuses,
        trigger: String::new(),
    }
}

fn flaw(id: &str, penalties: Vec<FlawPenalty>) -> FlawDefinition {
    FlawDefinition {
        id: id.into(),
        name: id.into(),
        penalties,
        excludes_archetypes: Vec::new(),
        description: String::new(),
    }
}

fn item(id: &str, cost: i32) -> UtilityItemDefinition {
    UtilityItemDefinition {
        id: id.into(),
        name: id.into(),
        cost,
        description: String::new(),
    }
}

fn expertise(id: &str, attribute: AttributeKey, kind: ExpertiseKind) -> ExpertiseDefinition {
    ExpertiseDefinition {
        id: id.into(),
        name: id.into(),
        attribute,
        kind,
    }
}

fn condition(id: &str, tier: ConditionTier) -> ConditionDefinition {
    ConditionDefinition {
        id: id.into(),
        name: id.into(),
        tier,
    }
}

/// The same entries as the bundled data files in `rules-content`.
pub(crate) fn sample_snapshot() -> CatalogSnapshot {
    use LimitCost::{Fixed, Variable};

    let area = || vec![UpgradeRequirement::AttackType(AttackType::Area)];
    let conditional =
        || vec![UpgradeRequirement::EffectType(vec![EffectType::Condition, EffectType::Hybrid])];

    let mut robot = boon("robot", Cost::Fixed(30), Vec::new());
    robot.immunities = EffectTags::POISON | EffectTags::DISEASE | EffectTags::BLEED;
    robot.vulnerabilities = EffectTags::ELECTRIC;
    robot.disables_passive_healing = true;

    let mut slow = flaw(
        "slow",
        vec![FlawPenalty::StatFlat {
            stat: StatKey::Movement,
            amount: -2,
        }],
    );
    slow.excludes_archetypes.push(ArchetypeRef {
        category: ArchetypeCategory::Movement,
        id: "swift".into(),
    });

    CatalogSnapshot {
        limits: vec![
            limit("charges", None, Fixed(30)),
            limit("chargesSingle", Some("charges"), Fixed(20)),
            limit("chargesNoRecharge", Some("chargesSingle"), Fixed(10)),
            limit("chargesDaily", Some("charges"), Fixed(10)),
            limit("cooldown", None, Fixed(20)),
            limit("cooldownLong", Some("cooldown"), Fixed(20)),
            limit("cooldownEscalating", Some("cooldownLong"), Variable { min: 10, max: 30 }),
            limit("unreliable", None, Fixed(30)),
            limit("unreliableSevere", Some("unreliable"), Fixed(30)),
            limit("unreliableBacklash", Some("unreliableSevere"), Fixed(10)),
            restricted(limit("rooted", None, Fixed(30))),
            restricted(limit("rootedFullTurn", Some("rooted"), Fixed(20))),
            limit("finisher", None, Fixed(30)),
            limit("finisherBloodied", Some("finisher"), Variable { min: 10, max: 40 }),
            limit("delayed", None, Fixed(20)),
            limit("delayedTwoTurns", Some("delayed"), Fixed(20)),
            limit("costly", None, Fixed(20)),
            limit("costlyHealth", Some("costly"), Fixed(20)),
            limit("costlyHealthSevere", Some("costlyHealth"), Fixed(20)),
        ],
        upgrades: vec![
            upgrade("accurateAttack", "accuracy", Cost::Fixed(10), Vec::new()),
            upgrade("reliableAccuracy", "accuracy", Cost::Fixed(20), Vec::new()),
            upgrade("powerAttack", "damage", Cost::Fixed(10), Vec::new()),
            upgrade("brutal", "damage", Cost::Fixed(40), Vec::new()),
            upgrade("heavyStrike", "damage", Cost::Fixed(40), Vec::new()),
            upgrade("highImpact", "damage", Cost::Fixed(20), Vec::new()),
            upgrade("criticalEffect", "critical", Cost::Fixed(20), Vec::new()),
            upgrade("armorPiercing", "damage", Cost::PerTier(10), Vec::new()),
            upgrade(
                "bleed",
                "damage",
                Cost::Fixed(30),
                vec![UpgradeRequirement::EffectType(vec![EffectType::Damage, EffectType::Hybrid])],
            ),
            upgrade("enhancedScale", "area", Cost::Fixed(20), area()),
            upgrade("precise", "area", Cost::Fixed(30), area()),
            upgrade("reach", "range", Cost::PerUnit(5), Vec::new()),
            upgrade(
                "extendedRange",
                "range",
                Cost::PerUnit(5),
                vec![UpgradeRequirement::AttackType(AttackType::Ranged)],
            ),
            upgrade("lingering", "condition", Cost::Fixed(20), conditional()),
            upgrade("overwhelming", "condition", Cost::Fixed(30), conditional()),
        ],
        boons: vec![
            boon(
                "combatReflexes",
                Cost::Fixed(15),
                vec![StatEffect {
                    stat: StatKey::Reactions,
                    amount: StatAmount::Flat(1),
                }],
            ),
            robot,
            boon(
                "toughness",
                Cost::PerUnit(10),
                vec![StatEffect {
                    stat: StatKey::Hp,
                    amount: StatAmount::PerUnit(10),
                }],
            ),
            boon(
                "fleetFooted",
                Cost::Fixed(15),
                vec![StatEffect {
                    stat: StatKey::Movement,
                    amount: StatAmount::Flat(2),
                }],
            ),
            boon(
                "ironWill",
                Cost::Fixed(20),
                vec![StatEffect {
                    stat: StatKey::Resolve,
                    amount: StatAmount::PerTier(1),
                }],
            ),
        ],
        traits: vec![
            trait_def("bloodied", 2),
            trait_def("focused", 2),
            trait_def("ambusher", 1),
            trait_def("vengeful", 2),
            trait_def("lastStand", 3),
        ],
        flaws: vec![
            flaw(
                "balanced",
                vec![FlawPenalty::MinimumCombatAttributes { divisor: 2 }],
            ),
            flaw(
                "sickly",
                vec![FlawPenalty::StatFlat {
                    stat: StatKey::Hp,
                    amount: -30,
                }],
            ),
            flaw(
                "unresponsive",
                vec![
                    FlawPenalty::ZeroStat(StatKey::Reactions),
                    FlawPenalty::RemoveInitiativeTierBonus,
                ],
            ),
            slow,
            flaw(
                "weak",
                vec![FlawPenalty::StatPerTier {
                    stat: StatKey::Stability,
                    per_tier: -1,
                }],
            ),
            flaw(
                "fragile",
                vec![FlawPenalty::StatPerTier {
                    stat: StatKey::Durability,
                    per_tier: -1,
                }],
            ),
        ],
        primary_action_upgrades: vec![
            PrimaryActionUpgradeDefinition {
                id: "quickStrikes".into(),
                name: "Quick Strikes".into(),
                cost: Cost::Fixed(15),
                description: String::new(),
            },
            PrimaryActionUpgradeDefinition {
                id: "guardStance".into(),
                name: "Guard Stance".into(),
                cost: Cost::Fixed(15),
                description: String::new(),
            },
            PrimaryActionUpgradeDefinition {
                id: "counterAttack".into(),
                name: "Counter Attack".into(),
                cost: Cost::Fixed(20),
                description: String::new(),
            },
        ],
        expertise: vec![
            expertise("tracking", AttributeKey::Awareness, ExpertiseKind::Activity),
            expertise("ambushSense", AttributeKey::Awareness, ExpertiseKind::Situational),
            expertise("diplomacy", AttributeKey::Communication, ExpertiseKind::Activity),
            expertise("deception", AttributeKey::Communication, ExpertiseKind::Situational),
            expertise("arcana", AttributeKey::Intelligence, ExpertiseKind::Activity),
            expertise("tactics", AttributeKey::Intelligence, ExpertiseKind::Situational),
            expertise("athletics", AttributeKey::Power, ExpertiseKind::Activity),
            expertise("acrobatics", AttributeKey::Mobility, ExpertiseKind::Activity),
        ],
        features: vec![item("linguist", 5), item("tinkerer", 10)],
        senses: vec![item("darkvision", 5), item("tremorsense", 10)],
        movement: vec![item("climbing", 5), item("swimming", 5), item("wallRunning", 10)],
        descriptors: vec![item("fireAffinity", 5), item("shadowAffinity", 5)],
        conditions: vec![
            condition("grabbed", ConditionTier::Basic),
            condition("prone", ConditionTier::Basic),
            condition("blinded", ConditionTier::Basic),
            condition("slowed", ConditionTier::Basic),
            condition("stunned", ConditionTier::Advanced),
            condition("frightened", ConditionTier::Advanced),
            condition("controlled", ConditionTier::Advanced),
            condition("paralyzed", ConditionTier::Advanced),
        ],
    }
}

pub(crate) fn sample_catalog() -> Catalog {
    Catalog::from_snapshot(sample_snapshot()).expect("sample catalog is valid")
}

/// Archetypes with no stat effects beyond the special-attack method.
pub(crate) fn neutral_archetypes(special_attack: &str) -> ArchetypeSelections {
    ArchetypeSelections {
        movement: Some("flight".into()),
        attack_type: Some("singleTarget".into()),
        effect_type: Some("hybridSpecialist".into()),
        unique_ability: Some("versatileMaster".into()),
        defensive: Some("immutable".into()),
        special_attack: Some(special_attack.into()),
        utility: Some("specialized".into()),
    }
}

/// A character past the archetype and attribute phases.
pub(crate) fn ready_character(tier: i32, special_attack: &str) -> Character {
    let mut character = Character::new(tier);
    character.archetypes = neutral_archetypes(special_attack);
    character.attributes.focus = 1;
    character
}
