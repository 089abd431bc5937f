//! Expertise and utility items bought from the utility pool.

use super::{budget_message, utility_pool_remaining};
use crate::archetype::{ResolvedArchetypes, UtilityArchetype};
use crate::catalog::Catalog;
use crate::character::{AttributeKey, Character, ExpertiseLevel, UtilityItemKind};
use crate::error::{BuildError, CatalogKind};

pub struct UtilitySystem<'c> {
    catalog: &'c Catalog,
}

impl<'c> UtilitySystem<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Buys expertise at `level`. Mastered requires the basic level first and
    /// charges only the difference.
    pub fn purchase_expertise(
        &self,
        character: &mut Character,
        attribute: AttributeKey,
        id: &str,
        level: ExpertiseLevel,
    ) -> Result<(), BuildError> {
        let definition = self
            .catalog
            .expertise_entry(id)
            .ok_or_else(|| BuildError::not_found(CatalogKind::Expertise, id))?;
        let archetypes = ResolvedArchetypes::resolve(&character.archetypes);
        let owned = character.utility_purchases.expertise.get(&attribute);
        let has = |level: ExpertiseLevel| {
            owned.is_some_and(|levels| levels.list(level).iter().any(|e| e == id))
        };

        let mut reasons = Vec::new();
        if archetypes.utility == Some(UtilityArchetype::JackOfAllTrades) {
            reasons.push("jackOfAllTrades cannot purchase expertise".to_string());
        }
        if definition.attribute != attribute {
            reasons.push(format!(
                "expertise '{id}' belongs to {}, not {attribute}",
                definition.attribute
            ));
        }
        if has(level) {
            reasons.push(format!("{level} expertise '{id}' is already purchased"));
        }
        if level == ExpertiseLevel::Mastered && !has(ExpertiseLevel::Basic) {
            reasons.push(format!("mastered expertise '{id}' requires the basic level first"));
        }
        let cost = definition.kind.step_cost(level);
        let remaining = utility_pool_remaining(character, self.catalog);
        if cost > remaining {
            reasons.push(budget_message("utility pool", cost, remaining));
        }
        BuildError::check("purchase expertise", reasons)?;

        character
            .utility_purchases
            .expertise
            .entry(attribute)
            .or_default()
            .list_mut(level)
            .push(id.to_string());
        tracing::debug!(%attribute, expertise = id, %level, cost, "expertise purchased");
        Ok(())
    }

    /// Removes expertise; removing the basic level also removes mastery.
    pub fn remove_expertise(
        &self,
        character: &mut Character,
        attribute: AttributeKey,
        id: &str,
        level: ExpertiseLevel,
    ) -> Result<(), BuildError> {
        let expertise = &mut character.utility_purchases.expertise;
        let Some(levels) = expertise.get_mut(&attribute) else {
            return Err(not_owned(id, level));
        };
        if !levels.list(level).iter().any(|e| e == id) {
            return Err(not_owned(id, level));
        }
        levels.list_mut(level).retain(|e| e != id);
        if level == ExpertiseLevel::Basic {
            levels.mastered.retain(|e| e != id);
        }
        if levels.is_empty() {
            expertise.remove(&attribute);
        }
        tracing::debug!(%attribute, expertise = id, %level, "expertise removed");
        Ok(())
    }

    pub fn purchase_utility_item(
        &self,
        character: &mut Character,
        kind: UtilityItemKind,
        id: &str,
    ) -> Result<(), BuildError> {
        let definition = self
            .catalog
            .utility_item(kind, id)
            .ok_or_else(|| BuildError::not_found(catalog_kind(kind), id))?;

        let mut reasons = Vec::new();
        if character.utility_purchases.items(kind).iter().any(|e| e == id) {
            reasons.push(format!("{kind} '{id}' is already purchased"));
        }
        let remaining = utility_pool_remaining(character, self.catalog);
        if definition.cost > remaining {
            reasons.push(budget_message("utility pool", definition.cost, remaining));
        }
        BuildError::check("purchase utility item", reasons)?;

        character
            .utility_purchases
            .items_mut(kind)
            .push(id.to_string());
        tracing::debug!(%kind, item = id, cost = definition.cost, "utility item purchased");
        Ok(())
    }

    pub fn remove_utility_item(
        &self,
        character: &mut Character,
        kind: UtilityItemKind,
        id: &str,
    ) -> Result<(), BuildError> {
        let items = character.utility_purchases.items_mut(kind);
        let before = items.len();
        items.retain(|e| e != id);
        if items.len() == before {
            return Err(BuildError::rejected(
                "remove utility item",
                format!("{kind} '{id}' is not purchased"),
            ));
        }
        tracing::debug!(%kind, item = id, "utility item removed");
        Ok(())
    }
}

fn not_owned(id: &str, level: ExpertiseLevel) -> BuildError {
    BuildError::rejected(
        "remove expertise",
        format!("{level} expertise '{id}' is not purchased"),
    )
}

fn catalog_kind(kind: UtilityItemKind) -> CatalogKind {
    match kind {
        UtilityItemKind::Feature => CatalogKind::Feature,
        UtilityItemKind::Sense => CatalogKind::Sense,
        UtilityItemKind::Movement => CatalogKind::MovementFeature,
        UtilityItemKind::Descriptor => CatalogKind::Descriptor,
    }
}
