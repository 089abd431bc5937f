//! Domain systems: every mutation of a character goes through one of these.
//!
//! Each mutation checks its preconditions against the current document,
//! applies the change only if every check passed, then recomputes what
//! depends on it. A returned [`BuildError`](crate::BuildError) means the
//! document was not touched.

mod attack_types;
mod attributes;
pub mod special_attacks;
mod traits_flaws;
mod unique_abilities;
mod utility;

pub use attack_types::AttackTypeSystem;
pub use attributes::AttributeSystem;
pub use special_attacks::{BANNED_UPGRADE_PAIRS, SpecialAttackSystem};
pub use traits_flaws::TraitFlawSystem;
pub use unique_abilities::UniqueAbilitySystem;
pub use utility::UtilitySystem;

use crate::archetype::ResolvedArchetypes;
use crate::catalog::Catalog;
use crate::character::Character;
use crate::pools;

pub(crate) fn main_pool_remaining(character: &Character, catalog: &Catalog) -> i32 {
    let archetypes = ResolvedArchetypes::resolve(&character.archetypes);
    pools::main_pool_available(character, &archetypes)
        .saturating_sub(pools::main_pool_spent(character, catalog))
}

pub(crate) fn utility_pool_remaining(character: &Character, catalog: &Catalog) -> i32 {
    let archetypes = ResolvedArchetypes::resolve(&character.archetypes);
    pools::utility_pool_available(character.tier, archetypes.utility)
        .saturating_sub(pools::utility_pool_spent(character, catalog))
}

/// Highest combat attribute minimum imposed by purchased flaws, with the flaw's name.
pub(crate) fn combat_attribute_minimum(
    character: &Character,
    catalog: &Catalog,
) -> Option<(String, i32)> {
    character
        .main_pool_purchases
        .flaws
        .iter()
        .filter_map(|purchase| catalog.flaw(&purchase.id))
        .filter_map(|flaw| {
            flaw.minimum_combat_attribute(character.tier)
                .map(|minimum| (flaw.name.clone(), minimum))
        })
        .max_by_key(|(_, minimum)| *minimum)
}

fn budget_message(pool: &str, cost: i32, remaining: i32) -> String {
    format!("costs {cost} points but only {} remain in the {pool}", remaining.max(0))
}
