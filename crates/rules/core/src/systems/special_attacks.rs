//! Special attack lifecycle, limits and upgrades.
//!
//! [`recalculate_attack_points`] is the only code that writes an attack's
//! stored point fields. Every mutation here and in the attack-type system
//! stages its change on a copy of the attack, checks the copy, then commits
//! it through that function.

use std::collections::BTreeSet;

use crate::archetype::{MovementArchetype, ResolvedArchetypes};
use crate::catalog::{Catalog, LimitNode, LimitRestriction, UpgradeDefinition};
use crate::character::{AttackId, Character, LimitSelection, SpecialAttack, UpgradeSelection};
use crate::error::{BuildError, CatalogKind};
use crate::limits::AttackPoints;

/// Upgrades that cannot appear together on one attack.
pub const BANNED_UPGRADE_PAIRS: &[(&str, &str)] = &[
    ("brutal", "heavyStrike"),
    ("accurateAttack", "powerAttack"),
    ("reliableAccuracy", "criticalEffect"),
    ("lingering", "overwhelming"),
];

/// The upgrade already on `attack` that `id` may not be combined with.
pub fn banned_partner<'a>(attack: &'a SpecialAttack, id: &str) -> Option<&'a str> {
    BANNED_UPGRADE_PAIRS.iter().find_map(|(a, b)| {
        let partner = if *a == id {
            *b
        } else if *b == id {
            *a
        } else {
            return None;
        };
        attack
            .upgrades
            .iter()
            .find(|upgrade| upgrade.id == partner)
            .map(|upgrade| upgrade.id.as_str())
    })
}

/// Recomputes and stores the point cache of one attack.
pub fn recalculate_attack_points(
    character: &mut Character,
    id: AttackId,
    catalog: &Catalog,
) -> Result<AttackPoints, BuildError> {
    let archetypes = ResolvedArchetypes::resolve(&character.archetypes);
    let tier = character.tier;
    let attack = character
        .attack_mut(id)
        .ok_or(BuildError::AttackNotFound(id))?;
    let points = AttackPoints::compute(attack, tier, &archetypes, catalog);
    attack.store_points(points.to_cache());
    tracing::debug!(
        attack = %id,
        available = points.available,
        spent = points.spent.total(),
        "attack points recalculated"
    );
    Ok(points)
}

/// Recomputes every attack; run after tier or archetype changes.
pub fn recalculate_all_attacks(character: &mut Character, catalog: &Catalog) {
    let ids: Vec<AttackId> = character.special_attacks.iter().map(|a| a.id).collect();
    for id in ids {
        if let Err(err) = recalculate_attack_points(character, id, catalog) {
            tracing::warn!(attack = %id, %err, "attack points not recalculated");
        }
    }
    tracing::debug!(
        attacks = character.special_attacks.len(),
        "all attack points recalculated"
    );
}

/// Copy of an attack, for staging a change.
pub(crate) fn stage(character: &Character, id: AttackId) -> Result<SpecialAttack, BuildError> {
    character
        .attack(id)
        .cloned()
        .ok_or(BuildError::AttackNotFound(id))
}

/// Points the staged attack would have inside `character`.
pub(crate) fn project(
    character: &Character,
    attack: &SpecialAttack,
    catalog: &Catalog,
) -> AttackPoints {
    let archetypes = ResolvedArchetypes::resolve(&character.archetypes);
    AttackPoints::compute(attack, character.tier, &archetypes, catalog)
}

/// Rejection reason when the staged attack overspends and got worse.
pub(crate) fn budget_reason(before: &AttackPoints, after: &AttackPoints) -> Option<String> {
    let remaining = after.remaining();
    (remaining < 0 && remaining < before.remaining()).then(|| {
        format!(
            "needs {} upgrade points but only {} remain",
            after.spent.total().saturating_sub(before.spent.total()),
            before.remaining().max(0)
        )
    })
}

/// Replaces the attack with the staged copy and recomputes its cache.
pub(crate) fn commit(
    character: &mut Character,
    staged: SpecialAttack,
    catalog: &Catalog,
) -> Result<AttackPoints, BuildError> {
    let id = staged.id;
    let slot = character
        .attack_mut(id)
        .ok_or(BuildError::AttackNotFound(id))?;
    *slot = staged;
    recalculate_attack_points(character, id, catalog)
}

pub struct SpecialAttackSystem<'c> {
    catalog: &'c Catalog,
}

impl<'c> SpecialAttackSystem<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Creates an empty attack, respecting the archetype's attack cap.
    pub fn create_special_attack(
        &self,
        character: &mut Character,
        name: &str,
    ) -> Result<AttackId, BuildError> {
        let archetypes = ResolvedArchetypes::resolve(&character.archetypes);
        let mut reasons = Vec::new();
        if let Some(archetype) = archetypes.special_attack {
            if let Some(max) = archetype.max_attacks() {
                if character.special_attacks.len() >= max {
                    reasons.push(format!("{archetype} allows at most {max} special attacks"));
                }
            }
        }
        if name.trim().is_empty() {
            reasons.push("special attack name cannot be empty".into());
        }
        BuildError::check("create special attack", reasons)?;

        let id = character.next_attack_id();
        if character.attack(id).is_some() {
            return Err(BuildError::rejected(
                "create special attack",
                format!("attack id {id} is already taken"),
            ));
        }
        character
            .special_attacks
            .push(SpecialAttack::new(id, name.trim()));
        recalculate_attack_points(character, id, self.catalog)?;
        tracing::debug!(attack = %id, name, "special attack created");
        Ok(id)
    }

    pub fn delete_special_attack(
        &self,
        character: &mut Character,
        id: AttackId,
    ) -> Result<SpecialAttack, BuildError> {
        let index = character
            .special_attacks
            .iter()
            .position(|attack| attack.id == id)
            .ok_or(BuildError::AttackNotFound(id))?;
        let removed = character.special_attacks.remove(index);
        tracing::debug!(attack = %id, "special attack deleted");
        Ok(removed)
    }

    pub fn rename_special_attack(
        &self,
        character: &mut Character,
        id: AttackId,
        name: &str,
    ) -> Result<(), BuildError> {
        if name.trim().is_empty() {
            return Err(BuildError::rejected(
                "rename special attack",
                "special attack name cannot be empty",
            ));
        }
        let attack = character
            .attack_mut(id)
            .ok_or(BuildError::AttackNotFound(id))?;
        attack.name = name.trim().to_string();
        Ok(())
    }

    /// Applies a limit. Variable limits need `points`; fixed limits use the catalog value.
    pub fn add_limit_to_attack(
        &self,
        character: &mut Character,
        id: AttackId,
        limit_id: &str,
        points: Option<i32>,
    ) -> Result<AttackPoints, BuildError> {
        let tree = self.catalog.limits();
        let node = tree
            .get(limit_id)
            .ok_or_else(|| BuildError::not_found(CatalogKind::Limit, limit_id))?;
        let mut staged = stage(character, id)?;
        let archetypes = ResolvedArchetypes::resolve(&character.archetypes);

        let mut reasons = Vec::new();
        if let Some(archetype) = archetypes.special_attack.filter(|a| a.forbids_limits()) {
            reasons.push(format!("{archetype} special attacks cannot take limits"));
        }
        if staged.has_limit(limit_id) {
            reasons.push(format!("limit '{limit_id}' is already applied"));
        }
        let parent = tree.parent(limit_id).map(|parent| parent.id().to_string());
        if let Some(parent) = &parent {
            if !staged.has_limit(parent) {
                reasons.push(format!(
                    "limit '{limit_id}' requires its parent '{parent}' to be applied first"
                ));
            }
        }
        if archetypes.movement == Some(MovementArchetype::Behemoth)
            && node
                .definition
                .has_restriction(LimitRestriction::BehemothRestricted)
        {
            reasons.push(format!("behemoth cannot take the '{limit_id}' limit"));
        }
        let resolved = node.definition.cost.resolve(points);
        if let Err(reason) = &resolved {
            reasons.push(reason.clone());
        }
        BuildError::check("add limit", reasons)?;

        staged.limits.push(LimitSelection {
            id: limit_id.to_string(),
            points: resolved.unwrap_or_default(),
            category: tree.category(limit_id).unwrap_or(limit_id).to_string(),
            parent,
        });
        let result = commit(character, staged, self.catalog)?;
        tracing::debug!(attack = %id, limit = limit_id, "limit added");
        Ok(result)
    }

    /// Removes a limit and every applied limit beneath it.
    ///
    /// Returns the removed limit ids. Removing a main limit clears its whole
    /// category.
    pub fn remove_limit_from_attack(
        &self,
        character: &mut Character,
        id: AttackId,
        limit_id: &str,
    ) -> Result<Vec<String>, BuildError> {
        let mut staged = stage(character, id)?;
        if !staged.has_limit(limit_id) {
            return Err(BuildError::rejected(
                "remove limit",
                format!("limit '{limit_id}' is not applied to this attack"),
            ));
        }

        let tree = self.catalog.limits();
        let mut doomed: BTreeSet<&str> = tree.descendants(limit_id).into_iter().collect();
        doomed.insert(limit_id);
        let is_main = tree.parent(limit_id).is_none();

        let mut removed = Vec::new();
        staged.limits.retain(|limit| {
            let drop = doomed.contains(limit.id.as_str()) || (is_main && limit.category == limit_id);
            if drop {
                removed.push(limit.id.clone());
            }
            !drop
        });
        commit(character, staged, self.catalog)?;
        tracing::debug!(attack = %id, ?removed, "limits removed");
        Ok(removed)
    }

    pub fn add_upgrade_to_attack(
        &self,
        character: &mut Character,
        id: AttackId,
        upgrade_id: &str,
        quantity: i32,
    ) -> Result<AttackPoints, BuildError> {
        let definition = self
            .catalog
            .upgrade(upgrade_id)
            .ok_or_else(|| BuildError::not_found(CatalogKind::Upgrade, upgrade_id))?;
        let mut staged = stage(character, id)?;
        let before = project(character, &staged, self.catalog);

        let mut reasons = self.upgrade_conflicts(&staged, definition);
        if quantity < 1 {
            reasons.push("quantity must be at least 1".into());
        } else if quantity > 1 && !definition.cost.is_per_unit() {
            reasons.push(format!("upgrade '{upgrade_id}' cannot be bought in quantity"));
        }
        if reasons.is_empty() {
            staged
                .upgrades
                .push(UpgradeSelection::new(upgrade_id, quantity));
            let after = project(character, &staged, self.catalog);
            reasons.extend(budget_reason(&before, &after));
        }
        BuildError::check("add upgrade", reasons)?;

        let result = commit(character, staged, self.catalog)?;
        tracing::debug!(attack = %id, upgrade = upgrade_id, quantity, "upgrade added");
        Ok(result)
    }

    pub fn remove_upgrade_from_attack(
        &self,
        character: &mut Character,
        id: AttackId,
        upgrade_id: &str,
    ) -> Result<AttackPoints, BuildError> {
        let mut staged = stage(character, id)?;
        let before = staged.upgrades.len();
        staged.upgrades.retain(|upgrade| upgrade.id != upgrade_id);
        if staged.upgrades.len() == before {
            return Err(BuildError::rejected(
                "remove upgrade",
                format!("upgrade '{upgrade_id}' is not on this attack"),
            ));
        }
        let result = commit(character, staged, self.catalog)?;
        tracing::debug!(attack = %id, upgrade = upgrade_id, "upgrade removed");
        Ok(result)
    }

    /// Recomputes one attack's stored points.
    pub fn recalculate_attack_points(
        &self,
        character: &mut Character,
        id: AttackId,
    ) -> Result<AttackPoints, BuildError> {
        recalculate_attack_points(character, id, self.catalog)
    }

    /// Limits that could be added to the attack right now.
    pub fn get_available_limits(
        &self,
        character: &Character,
        id: AttackId,
    ) -> Result<Vec<&'c LimitNode>, BuildError> {
        let attack = character.attack(id).ok_or(BuildError::AttackNotFound(id))?;
        let archetypes = ResolvedArchetypes::resolve(&character.archetypes);
        if archetypes.forbids_limits() {
            return Ok(Vec::new());
        }
        let behemoth = archetypes.movement == Some(MovementArchetype::Behemoth);
        let tree = self.catalog.limits();
        Ok(tree
            .iter()
            .filter(|node| !attack.has_limit(node.id()))
            .filter(|node| {
                tree.parent(node.id())
                    .is_none_or(|parent| attack.has_limit(parent.id()))
            })
            .filter(|node| {
                !(behemoth
                    && node
                        .definition
                        .has_restriction(LimitRestriction::BehemothRestricted))
            })
            .collect())
    }

    /// Upgrades the attack meets the requirements for and can afford at quantity 1.
    pub fn get_available_upgrades(
        &self,
        character: &Character,
        id: AttackId,
    ) -> Result<Vec<&'c UpgradeDefinition>, BuildError> {
        let attack = character.attack(id).ok_or(BuildError::AttackNotFound(id))?;
        let remaining = project(character, attack, self.catalog).remaining();
        Ok(self
            .catalog
            .upgrades()
            .iter()
            .filter(|definition| self.upgrade_conflicts(attack, definition).is_empty())
            .filter(|definition| definition.cost.resolve(character.tier, 1) <= remaining)
            .collect())
    }

    fn upgrade_conflicts(
        &self,
        attack: &SpecialAttack,
        definition: &UpgradeDefinition,
    ) -> Vec<String> {
        let mut reasons = Vec::new();
        if attack.has_upgrade(&definition.id) {
            reasons.push(format!("upgrade '{}' is already on this attack", definition.id));
        }
        if let Some(partner) = banned_partner(attack, &definition.id) {
            reasons.push(format!(
                "upgrade '{}' cannot be combined with '{partner}'",
                definition.id
            ));
        }
        reasons.extend(definition.unmet_requirements(attack));
        reasons
    }
}
