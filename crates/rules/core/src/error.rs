//! Common error infrastructure for rules-core.
//!
//! Domain errors (`TierError`, `CatalogError`, `BuildError`) are plain
//! `thiserror` enums. Each implements [`RulesError`] so callers can classify a
//! failure without matching on every variant.
//!
//! Validation findings are *not* errors: they are reported as
//! [`crate::validation::ValidationIssue`] values and never abort a pass.

use crate::archetype::ArchetypeCategory;
use crate::character::AttackId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// The request was well-formed but the rules refuse it in the current state.
    ///
    /// Examples: pool over budget, parent limit missing, duplicate purchase.
    Recoverable,

    /// Invalid input that should not be retried without changes.
    ///
    /// Examples: tier out of range, unknown catalog id.
    Validation,

    /// Unexpected inconsistency inside the engine or catalog data.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the caller may retry after changing other selections.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all rules-core errors.
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failures of the pure tier functions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TierError {
    /// Tier outside `[TIER_MIN, TIER_MAX]`.
    #[error("invalid tier {tier}: must be between {min} and {max}")]
    InvalidTier { tier: i32, min: i32, max: i32 },

    /// Archetype id not known to the tier tables.
    #[error("unknown archetype '{0}'")]
    UnknownArchetype(String),
}

impl RulesError for TierError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTier { .. } => "TIER_INVALID",
            Self::UnknownArchetype(_) => "TIER_UNKNOWN_ARCHETYPE",
        }
    }
}

/// Kinds of catalog entries, used in not-found errors and listings.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum CatalogKind {
    Limit,
    Upgrade,
    Boon,
    Trait,
    Flaw,
    PrimaryActionUpgrade,
    Expertise,
    Feature,
    Sense,
    MovementFeature,
    Descriptor,
    Condition,
}

/// Catalog construction failures (raised while building a [`crate::Catalog`]).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: CatalogKind, id: String },

    #[error("limit '{id}' references unknown parent '{parent}'")]
    UnknownParent { id: String, parent: String },

    #[error("limit hierarchy contains a cycle through '{0}'")]
    Cycle(String),

    #[error("limit '{id}' is nested {depth} levels deep (maximum is 3)")]
    TooDeep { id: String, depth: usize },

    #[error("invalid {kind} '{id}': {reason}")]
    InvalidEntry {
        kind: CatalogKind,
        id: String,
        reason: String,
    },
}

impl RulesError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => "CATALOG_DUPLICATE_ID",
            Self::UnknownParent { .. } => "CATALOG_UNKNOWN_PARENT",
            Self::Cycle(_) => "CATALOG_CYCLE",
            Self::TooDeep { .. } => "CATALOG_TOO_DEEP",
            Self::InvalidEntry { .. } => "CATALOG_INVALID_ENTRY",
        }
    }
}

/// Errors returned by mutation operations.
///
/// A mutation that returns any of these has left the character untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Tier(#[from] TierError),

    #[error("unknown {category} archetype '{id}'")]
    UnknownArchetype {
        category: ArchetypeCategory,
        id: String,
    },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: CatalogKind, id: String },

    #[error("special attack {0} not found")]
    AttackNotFound(AttackId),

    /// Local validation refused the mutation.
    #[error("{action} rejected: {}", reasons.join("; "))]
    Rejected {
        action: &'static str,
        reasons: Vec<String>,
    },
}

impl BuildError {
    /// Create a not-found error for a catalog id.
    pub fn not_found(kind: CatalogKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a rejection with a single reason.
    pub fn rejected(action: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            action,
            reasons: vec![reason.into()],
        }
    }

    /// Returns `Ok(())` when `reasons` is empty, otherwise a rejection.
    pub fn check(action: &'static str, reasons: Vec<String>) -> Result<(), Self> {
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(Self::Rejected { action, reasons })
        }
    }

    /// Human-readable reasons carried by this error.
    pub fn reasons(&self) -> Vec<String> {
        match self {
            Self::Rejected { reasons, .. } => reasons.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl RulesError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Tier(err) => err.severity(),
            Self::UnknownArchetype { .. } | Self::NotFound { .. } | Self::AttackNotFound(_) => {
                ErrorSeverity::Validation
            }
            Self::Rejected { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Tier(err) => err.error_code(),
            Self::UnknownArchetype { .. } => "BUILD_UNKNOWN_ARCHETYPE",
            Self::NotFound { .. } => "BUILD_NOT_FOUND",
            Self::AttackNotFound(_) => "BUILD_ATTACK_NOT_FOUND",
            Self::Rejected { .. } => "BUILD_REJECTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_lists_every_reason() {
        let err = BuildError::Rejected {
            action: "add limit",
            reasons: vec!["parent missing".into(), "archetype forbids limits".into()],
        };
        assert_eq!(
            err.to_string(),
            "add limit rejected: parent missing; archetype forbids limits"
        );
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert_eq!(err.reasons().len(), 2);
    }

    #[test]
    fn check_passes_on_empty_reasons() {
        assert!(BuildError::check("noop", Vec::new()).is_ok());
        let err = BuildError::check("noop", vec!["bad".into()]).unwrap_err();
        assert_eq!(err.error_code(), "BUILD_REJECTED");
    }

    #[test]
    fn tier_errors_convert_into_build_errors() {
        let err: BuildError = TierError::InvalidTier {
            tier: 11,
            min: 1,
            max: 10,
        }
        .into();
        assert_eq!(err.error_code(), "TIER_INVALID");
        assert!(err.to_string().contains("11"));
        assert!(!err.severity().is_recoverable());
    }

    #[test]
    fn not_found_names_the_catalog_kind() {
        let err = BuildError::not_found(CatalogKind::PrimaryActionUpgrade, "quickDraw");
        assert_eq!(err.to_string(), "primary_action_upgrade 'quickDraw' not found");
    }
}
