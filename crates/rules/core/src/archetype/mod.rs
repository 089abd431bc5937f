//! Archetype catalog: the seven categories and their options.
//!
//! Documents store archetypes as strings; [`ResolvedArchetypes::resolve`]
//! turns them into the typed enums below so every rule that depends on an
//! archetype is an exhaustive `match`.

mod system;

pub use system::{ArchetypeSystem, SelectionCheck};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::character::{ArchetypeSelections, AttackType};
use crate::config::RulesConfig;

/// The seven archetype categories, in build order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum ArchetypeCategory {
    Movement,
    AttackType,
    EffectType,
    UniqueAbility,
    Defensive,
    SpecialAttack,
    Utility,
}

macro_rules! archetype_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $desc:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            Hash,
            Serialize,
            Deserialize,
            strum::Display,
            strum::EnumString,
            strum::AsRefStr,
            strum::IntoStaticStr,
            strum::EnumIter,
        )]
        #[serde(rename_all = "camelCase")]
        #[strum(serialize_all = "camelCase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const fn description(self) -> &'static str {
                match self {
                    $(Self::$variant => $desc),+
                }
            }
        }
    };
}

archetype_enum! {
    /// How the character gets around the battlefield.
    MovementArchetype {
        Swift => "Bonus movement equal to half tier, rounded up.",
        Skirmisher => "Moves freely around engaged enemies.",
        Behemoth => "Cannot be grabbed, knocked prone or moved; excludes behemoth-restricted limits.",
        Bulwark => "Bonus stability equal to half tier, rounded up.",
        Juggernaut => "Bonus hit points equal to five times tier.",
        Flight => "Moves through the air.",
        Teleportation => "Moves by instantaneous displacement.",
    }
}

archetype_enum! {
    /// Which attack delivery types come free.
    AttackTypeArchetype {
        AoeSpecialist => "Area attacks are free.",
        DirectSpecialist => "Direct attacks are free.",
        SingleTarget => "Melee and ranged attacks are free.",
    }
}

archetype_enum! {
    /// How attacks resolve their effects.
    EffectTypeArchetype {
        DamageSpecialist => "Special attacks must use the damage effect type.",
        HybridSpecialist => "Hybrid effects carry no penalty.",
        CrowdControl => "Damage reduced by tier; two advanced conditions free on every attack.",
    }
}

archetype_enum! {
    /// Signature ability shaping the main pool or stats.
    UniqueAbilityArchetype {
        VersatileMaster => "Broad competence across primary actions.",
        Extraordinary => "Main pool points doubled.",
        CutAbove => "Bonus to nine core stats by tier band.",
    }
}

archetype_enum! {
    /// Defensive specialisation.
    DefensiveArchetype {
        Stalwart => "Trade avoidance for durability.",
        Fortress => "Bonus durability equal to tier.",
        Resilient => "Bonus resolve, stability and vitality equal to tier.",
        Immutable => "Immune to stun, fear and mental effects.",
    }
}

archetype_enum! {
    /// How special attacks earn their upgrade points.
    SpecialAttackArchetype {
        Normal => "Limits convert to upgrade points at tier/6.",
        Specialist => "Limits convert to upgrade points at tier/3.",
        Straightforward => "Limits convert to upgrade points at tier/2.",
        SharedUses => "Limits feed a shared-use pool at full rate.",
        Paragon => "Fixed points per attack; no limits.",
        OneTrick => "One attack with a large fixed budget; no limits.",
        DualNatured => "Two attacks with fixed budgets; no limits.",
        Basic => "No special attacks; base attacks are upgraded instead.",
    }
}

archetype_enum! {
    /// Shape of the utility pool.
    UtilityArchetype {
        Specialized => "Focused expertise.",
        Practical => "Larger utility pool.",
        JackOfAllTrades => "Bonus to every utility check; cannot buy expertise.",
    }
}

/// How a special-attack archetype funds its attacks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SpecialAttackPointMethod {
    /// Scaled limit points, rate folded into the scaling curve.
    LimitsScaled { rate: f64 },
    /// Fixed points per attack, no cap on attack count.
    FixedPoints { per_attack: i32 },
    /// Fixed points per attack with a maximum number of attacks.
    FixedPerAttackCapped { per_attack: i32, max_attacks: usize },
    /// Scaled limit points at rate 1.0, spent as shared uses.
    SharedUses,
}

impl SpecialAttackPointMethod {
    /// The pool dispatch name used by the point-pool calculator.
    pub const fn pool_method(&self) -> &'static str {
        match self {
            Self::LimitsScaled { .. } => "limits_scaled",
            Self::FixedPoints { .. } | Self::FixedPerAttackCapped { .. } => "fixed_archetype",
            Self::SharedUses => "shared_resource",
        }
    }

    pub const fn reads_limits(&self) -> bool {
        matches!(self, Self::LimitsScaled { .. } | Self::SharedUses)
    }
}

impl SpecialAttackArchetype {
    /// Rate multiplier `m(A)` applied to the limit scaling curve.
    pub fn rate_multiplier(self, tier: i32) -> f64 {
        match self {
            Self::Normal => f64::from(tier) / 6.0,
            Self::Specialist => f64::from(tier) / 3.0,
            Self::Straightforward => f64::from(tier) / 2.0,
            Self::SharedUses => 1.0,
            Self::Paragon | Self::OneTrick | Self::DualNatured | Self::Basic => 0.0,
        }
    }

    pub const fn forbids_limits(self) -> bool {
        matches!(
            self,
            Self::Paragon | Self::OneTrick | Self::DualNatured | Self::Basic
        )
    }

    /// Maximum number of special attacks, if capped.
    pub const fn max_attacks(self) -> Option<usize> {
        match self {
            Self::Basic => Some(0),
            Self::OneTrick => Some(1),
            Self::DualNatured => Some(2),
            Self::Normal
            | Self::Specialist
            | Self::Straightforward
            | Self::SharedUses
            | Self::Paragon => None,
        }
    }

    /// Fixed upgrade points granted per attack (tier × constant).
    pub const fn fixed_points(self, tier: i32) -> Option<i32> {
        match self {
            Self::Paragon => Some(tier.saturating_mul(RulesConfig::PARAGON_POINTS_PER_TIER)),
            Self::OneTrick => Some(tier.saturating_mul(RulesConfig::ONE_TRICK_POINTS_PER_TIER)),
            Self::DualNatured => {
                Some(tier.saturating_mul(RulesConfig::DUAL_NATURED_POINTS_PER_TIER))
            }
            Self::Basic => Some(tier.saturating_mul(RulesConfig::BASIC_POINTS_PER_TIER)),
            Self::Normal | Self::Specialist | Self::Straightforward | Self::SharedUses => None,
        }
    }

    pub fn point_method(self, tier: i32) -> SpecialAttackPointMethod {
        match self {
            Self::Normal | Self::Specialist | Self::Straightforward => {
                SpecialAttackPointMethod::LimitsScaled {
                    rate: self.rate_multiplier(tier),
                }
            }
            Self::SharedUses => SpecialAttackPointMethod::SharedUses,
            Self::Paragon => SpecialAttackPointMethod::FixedPoints {
                per_attack: tier.saturating_mul(RulesConfig::PARAGON_POINTS_PER_TIER),
            },
            Self::OneTrick => SpecialAttackPointMethod::FixedPerAttackCapped {
                per_attack: tier.saturating_mul(RulesConfig::ONE_TRICK_POINTS_PER_TIER),
                max_attacks: 1,
            },
            Self::DualNatured => SpecialAttackPointMethod::FixedPerAttackCapped {
                per_attack: tier.saturating_mul(RulesConfig::DUAL_NATURED_POINTS_PER_TIER),
                max_attacks: 2,
            },
            Self::Basic => SpecialAttackPointMethod::FixedPerAttackCapped {
                per_attack: tier.saturating_mul(RulesConfig::BASIC_POINTS_PER_TIER),
                max_attacks: 0,
            },
        }
    }
}

impl AttackTypeArchetype {
    pub const fn free_attack_types(self) -> &'static [AttackType] {
        match self {
            Self::AoeSpecialist => &[AttackType::Area],
            Self::DirectSpecialist => &[AttackType::Direct],
            Self::SingleTarget => &[AttackType::Melee, AttackType::Ranged],
        }
    }
}

/// A typed archetype from any category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Archetype {
    Movement(MovementArchetype),
    AttackType(AttackTypeArchetype),
    EffectType(EffectTypeArchetype),
    UniqueAbility(UniqueAbilityArchetype),
    Defensive(DefensiveArchetype),
    SpecialAttack(SpecialAttackArchetype),
    Utility(UtilityArchetype),
}

impl Archetype {
    /// Parses `id` within `category`; `None` when the id is unknown.
    pub fn parse(category: ArchetypeCategory, id: &str) -> Option<Self> {
        use core::str::FromStr;
        match category {
            ArchetypeCategory::Movement => MovementArchetype::from_str(id).ok().map(Self::Movement),
            ArchetypeCategory::AttackType => {
                AttackTypeArchetype::from_str(id).ok().map(Self::AttackType)
            }
            ArchetypeCategory::EffectType => {
                EffectTypeArchetype::from_str(id).ok().map(Self::EffectType)
            }
            ArchetypeCategory::UniqueAbility => UniqueAbilityArchetype::from_str(id)
                .ok()
                .map(Self::UniqueAbility),
            ArchetypeCategory::Defensive => {
                DefensiveArchetype::from_str(id).ok().map(Self::Defensive)
            }
            ArchetypeCategory::SpecialAttack => SpecialAttackArchetype::from_str(id)
                .ok()
                .map(Self::SpecialAttack),
            ArchetypeCategory::Utility => UtilityArchetype::from_str(id).ok().map(Self::Utility),
        }
    }

    pub const fn category(self) -> ArchetypeCategory {
        match self {
            Self::Movement(_) => ArchetypeCategory::Movement,
            Self::AttackType(_) => ArchetypeCategory::AttackType,
            Self::EffectType(_) => ArchetypeCategory::EffectType,
            Self::UniqueAbility(_) => ArchetypeCategory::UniqueAbility,
            Self::Defensive(_) => ArchetypeCategory::Defensive,
            Self::SpecialAttack(_) => ArchetypeCategory::SpecialAttack,
            Self::Utility(_) => ArchetypeCategory::Utility,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Movement(a) => a.into(),
            Self::AttackType(a) => a.into(),
            Self::EffectType(a) => a.into(),
            Self::UniqueAbility(a) => a.into(),
            Self::Defensive(a) => a.into(),
            Self::SpecialAttack(a) => a.into(),
            Self::Utility(a) => a.into(),
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Movement(a) => a.description(),
            Self::AttackType(a) => a.description(),
            Self::EffectType(a) => a.description(),
            Self::UniqueAbility(a) => a.description(),
            Self::Defensive(a) => a.description(),
            Self::SpecialAttack(a) => a.description(),
            Self::Utility(a) => a.description(),
        }
    }
}

/// Display record for one archetype option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArchetypeInfo {
    pub category: ArchetypeCategory,
    pub id: &'static str,
    pub description: &'static str,
}

/// All options of one category, in catalog order.
pub fn archetypes_for_category(category: ArchetypeCategory) -> Vec<ArchetypeInfo> {
    fn collect<T>(category: ArchetypeCategory, wrap: fn(T) -> Archetype) -> Vec<ArchetypeInfo>
    where
        T: IntoEnumIterator,
    {
        T::iter()
            .map(|option| {
                let archetype = wrap(option);
                ArchetypeInfo {
                    category,
                    id: archetype.id(),
                    description: archetype.description(),
                }
            })
            .collect()
    }

    match category {
        ArchetypeCategory::Movement => collect::<MovementArchetype>(category, Archetype::Movement),
        ArchetypeCategory::AttackType => {
            collect::<AttackTypeArchetype>(category, Archetype::AttackType)
        }
        ArchetypeCategory::EffectType => {
            collect::<EffectTypeArchetype>(category, Archetype::EffectType)
        }
        ArchetypeCategory::UniqueAbility => {
            collect::<UniqueAbilityArchetype>(category, Archetype::UniqueAbility)
        }
        ArchetypeCategory::Defensive => {
            collect::<DefensiveArchetype>(category, Archetype::Defensive)
        }
        ArchetypeCategory::SpecialAttack => {
            collect::<SpecialAttackArchetype>(category, Archetype::SpecialAttack)
        }
        ArchetypeCategory::Utility => collect::<UtilityArchetype>(category, Archetype::Utility),
    }
}

/// Pairs of archetypes that cannot be chosen together.
pub const ARCHETYPE_CONFLICTS: &[(Archetype, Archetype, &str)] = &[(
    Archetype::SpecialAttack(SpecialAttackArchetype::Basic),
    Archetype::EffectType(EffectTypeArchetype::CrowdControl),
    "crowd control grants conditions to special attacks, which the basic archetype cannot have",
)];

/// Conflict reason between two archetypes, checked in both orders.
pub fn conflict_between(a: Archetype, b: Archetype) -> Option<&'static str> {
    ARCHETYPE_CONFLICTS
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, reason)| *reason)
}

/// Typed view of a document's archetype selections.
///
/// Unknown ids resolve to `None` and are listed in `unknown`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedArchetypes {
    pub movement: Option<MovementArchetype>,
    pub attack_type: Option<AttackTypeArchetype>,
    pub effect_type: Option<EffectTypeArchetype>,
    pub unique_ability: Option<UniqueAbilityArchetype>,
    pub defensive: Option<DefensiveArchetype>,
    pub special_attack: Option<SpecialAttackArchetype>,
    pub utility: Option<UtilityArchetype>,
    pub unknown: Vec<(ArchetypeCategory, String)>,
}

impl ResolvedArchetypes {
    pub fn resolve(selections: &ArchetypeSelections) -> Self {
        let mut resolved = Self::default();
        for category in ArchetypeCategory::iter() {
            let Some(id) = selections.get(category) else {
                continue;
            };
            match Archetype::parse(category, id) {
                Some(archetype) => resolved.insert(archetype),
                None => resolved.unknown.push((category, id.to_string())),
            }
        }
        resolved
    }

    fn insert(&mut self, archetype: Archetype) {
        match archetype {
            Archetype::Movement(a) => self.movement = Some(a),
            Archetype::AttackType(a) => self.attack_type = Some(a),
            Archetype::EffectType(a) => self.effect_type = Some(a),
            Archetype::UniqueAbility(a) => self.unique_ability = Some(a),
            Archetype::Defensive(a) => self.defensive = Some(a),
            Archetype::SpecialAttack(a) => self.special_attack = Some(a),
            Archetype::Utility(a) => self.utility = Some(a),
        }
    }

    /// Every successfully resolved archetype.
    pub fn selected(&self) -> Vec<Archetype> {
        [
            self.movement.map(Archetype::Movement),
            self.attack_type.map(Archetype::AttackType),
            self.effect_type.map(Archetype::EffectType),
            self.unique_ability.map(Archetype::UniqueAbility),
            self.defensive.map(Archetype::Defensive),
            self.special_attack.map(Archetype::SpecialAttack),
            self.utility.map(Archetype::Utility),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Attack types granted free by the attack-type archetype.
    pub fn free_attack_types(&self) -> &'static [AttackType] {
        match self.attack_type {
            Some(archetype) => archetype.free_attack_types(),
            None => &[],
        }
    }

    /// Point method of the special-attack archetype, if one is selected.
    pub fn special_attack_point_method(&self, tier: i32) -> Option<SpecialAttackPointMethod> {
        self.special_attack.map(|archetype| archetype.point_method(tier))
    }

    pub fn forbids_limits(&self) -> bool {
        self.special_attack
            .is_some_and(SpecialAttackArchetype::forbids_limits)
    }
}
