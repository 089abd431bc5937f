//! Boons and primary action upgrades bought from the main pool.

use super::{budget_message, main_pool_remaining};
use crate::catalog::Catalog;
use crate::character::{BoonPurchase, Character};
use crate::error::{BuildError, CatalogKind};

pub struct UniqueAbilitySystem<'c> {
    catalog: &'c Catalog,
}

impl<'c> UniqueAbilitySystem<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn purchase_boon(
        &self,
        character: &mut Character,
        id: &str,
        quantity: i32,
    ) -> Result<(), BuildError> {
        let definition = self
            .catalog
            .boon(id)
            .ok_or_else(|| BuildError::not_found(CatalogKind::Boon, id))?;

        let mut reasons = Vec::new();
        if character.main_pool_purchases.has_boon(id) {
            reasons.push(format!("boon '{id}' is already purchased"));
        }
        if quantity < 1 {
            reasons.push("quantity must be at least 1".into());
        } else if quantity > 1 && !definition.cost.is_per_unit() {
            reasons.push(format!("boon '{id}' cannot be bought in quantity"));
        }
        let cost = definition.cost.resolve(character.tier, quantity);
        let remaining = main_pool_remaining(character, self.catalog);
        if cost > remaining {
            reasons.push(budget_message("main pool", cost, remaining));
        }
        BuildError::check("purchase boon", reasons)?;

        character
            .main_pool_purchases
            .boons
            .push(BoonPurchase::new(id, quantity));
        tracing::debug!(boon = id, quantity, cost, "boon purchased");
        Ok(())
    }

    pub fn remove_boon(
        &self,
        character: &mut Character,
        id: &str,
    ) -> Result<BoonPurchase, BuildError> {
        let boons = &mut character.main_pool_purchases.boons;
        let index = boons.iter().position(|boon| boon.id == id).ok_or_else(|| {
            BuildError::rejected("remove boon", format!("boon '{id}' is not purchased"))
        })?;
        let removed = boons.remove(index);
        tracing::debug!(boon = id, "boon removed");
        Ok(removed)
    }

    pub fn purchase_primary_action_upgrade(
        &self,
        character: &mut Character,
        id: &str,
    ) -> Result<(), BuildError> {
        let definition = self
            .catalog
            .primary_action_upgrade(id)
            .ok_or_else(|| BuildError::not_found(CatalogKind::PrimaryActionUpgrade, id))?;

        let mut reasons = Vec::new();
        let owned = &character.main_pool_purchases.primary_action_upgrades;
        if owned.iter().any(|owned| owned == id) {
            reasons.push(format!("'{}' is already purchased", definition.name));
        }
        let cost = definition.cost.resolve(character.tier, 1);
        let remaining = main_pool_remaining(character, self.catalog);
        if cost > remaining {
            reasons.push(budget_message("main pool", cost, remaining));
        }
        BuildError::check("purchase primary action upgrade", reasons)?;

        character
            .main_pool_purchases
            .primary_action_upgrades
            .push(id.to_string());
        tracing::debug!(upgrade = id, cost, "primary action upgrade purchased");
        Ok(())
    }

    pub fn remove_primary_action_upgrade(
        &self,
        character: &mut Character,
        id: &str,
    ) -> Result<(), BuildError> {
        let owned = &mut character.main_pool_purchases.primary_action_upgrades;
        let before = owned.len();
        owned.retain(|owned| owned != id);
        if owned.len() == before {
            return Err(BuildError::rejected(
                "remove primary action upgrade",
                format!("'{id}' is not purchased"),
            ));
        }
        tracing::debug!(upgrade = id, "primary action upgrade removed");
        Ok(())
    }
}
