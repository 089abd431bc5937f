//! Attribute assignment and tier changes.

use super::combat_attribute_minimum;
use super::special_attacks::recalculate_all_attacks;
use crate::catalog::Catalog;
use crate::character::{AttributeKey, AttributePool, Attributes, Character};
use crate::config::RulesConfig;
use crate::error::BuildError;
use crate::tier;

pub struct AttributeSystem<'c> {
    catalog: &'c Catalog,
}

impl<'c> AttributeSystem<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Points available to the attribute pool at the character's tier.
    pub fn pool_size(&self, character: &Character, pool: AttributePool) -> i32 {
        match pool {
            AttributePool::Combat => character.tier.saturating_mul(RulesConfig::COMBAT_MULT),
            AttributePool::Utility => character.tier.saturating_mul(RulesConfig::UTILITY_MULT),
        }
    }

    pub fn purchase_attribute(
        &self,
        character: &mut Character,
        attribute: AttributeKey,
        points: i32,
    ) -> Result<i32, BuildError> {
        if points < 1 {
            return Err(BuildError::rejected(
                "purchase attribute",
                "points must be at least 1",
            ));
        }
        let value = character
            .attributes
            .get(attribute)
            .checked_add(points)
            .ok_or_else(|| {
                BuildError::rejected(
                    "purchase attribute",
                    format!("{attribute} cannot grow by {points} points"),
                )
            })?;
        self.assign(character, attribute, value, "purchase attribute")
    }

    pub fn remove_attribute(
        &self,
        character: &mut Character,
        attribute: AttributeKey,
        points: i32,
    ) -> Result<i32, BuildError> {
        if points < 1 {
            return Err(BuildError::rejected(
                "remove attribute",
                "points must be at least 1",
            ));
        }
        let value = character
            .attributes
            .get(attribute)
            .checked_sub(points)
            .ok_or_else(|| {
                BuildError::rejected(
                    "remove attribute",
                    format!("{attribute} cannot shrink by {points} points"),
                )
            })?;
        self.assign(character, attribute, value, "remove attribute")
    }

    pub fn set_attribute(
        &self,
        character: &mut Character,
        attribute: AttributeKey,
        value: i32,
    ) -> Result<i32, BuildError> {
        self.assign(character, attribute, value, "set attribute")
    }

    /// Zeroes every attribute. Flaw minimums are left to validation.
    pub fn reset_attributes(&self, character: &mut Character) {
        character.attributes = Attributes::default();
        tracing::debug!("attributes reset");
    }

    /// Moves the character to a new tier and recalculates every attack.
    ///
    /// Returns warnings for attributes now above the tier cap.
    pub fn set_tier(
        &self,
        character: &mut Character,
        tier: i32,
    ) -> Result<Vec<String>, BuildError> {
        tier::validate_tier(tier)?;
        character.tier = tier;
        recalculate_all_attacks(character, self.catalog);
        tracing::debug!(tier, "tier changed");

        Ok(character
            .attributes
            .iter()
            .filter(|(_, value)| *value > tier)
            .map(|(key, value)| format!("{key} is {value}, above the tier {tier} maximum"))
            .collect())
    }

    fn assign(
        &self,
        character: &mut Character,
        attribute: AttributeKey,
        value: i32,
        action: &'static str,
    ) -> Result<i32, BuildError> {
        let current = character.attributes.get(attribute);
        let mut reasons = Vec::new();
        if value < 0 {
            reasons.push(format!("{attribute} cannot go below 0"));
        }
        if value > character.tier {
            reasons.push(format!(
                "{attribute} cannot exceed the tier maximum of {}",
                character.tier
            ));
        }
        if value > current {
            let pool = attribute.pool();
            let total = character
                .attributes
                .total(pool)
                .saturating_sub(current)
                .saturating_add(value);
            let available = self.pool_size(character, pool);
            if total > available {
                reasons.push(format!(
                    "{pool} attribute pool has {} points left, {} needed",
                    available.saturating_sub(character.attributes.total(pool)),
                    value.saturating_sub(current)
                ));
            }
        }
        if value < current && attribute.pool() == AttributePool::Combat {
            if let Some((flaw, minimum)) = combat_attribute_minimum(character, self.catalog) {
                if value < minimum {
                    reasons.push(format!("{flaw} requires {attribute} of at least {minimum}"));
                }
            }
        }
        BuildError::check(action, reasons)?;

        character.attributes.set(attribute, value);
        tracing::debug!(%attribute, from = current, to = value, "attribute assigned");
        Ok(value)
    }
}
