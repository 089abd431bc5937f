//! Whole-character validation.
//!
//! Validators inspect a document and emit [`ValidationIssue`]s; they never
//! mutate it and never fail. [`CharacterValidator`] runs every validator
//! unconditionally and folds the results into a [`ValidationReport`].

mod archetype;
mod attribute;
mod build_order;
mod character;
mod special_attack;

pub use build_order::{BuildPhase, BuildState};
pub use character::CharacterValidator;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::character::Character;
use crate::config::RulesConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Which validator produced an issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ValidatorKind {
    BuildOrder,
    Archetype,
    Attribute,
    SpecialAttack,
    PointPool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    /// Stable machine-readable identifier, e.g. `ATTRIBUTE_ABOVE_TIER`.
    pub code: &'static str,
    pub message: String,
    pub source: ValidatorKind,
}

impl ValidationIssue {
    pub fn error(source: ValidatorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Error,
            code,
            message: message.into(),
            source,
        }
    }

    pub fn warning(source: ValidatorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            code,
            message: message.into(),
            source,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}

impl core::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub build_state: BuildState,
}

impl ValidationReport {
    pub fn from_issues(issues: Vec<ValidationIssue>, build_state: BuildState) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            issues.into_iter().partition(ValidationIssue::is_error);
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            build_state,
        }
    }

    /// Every issue, errors first.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(&self.warnings)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.issues().any(|issue| issue.code == code)
    }
}

/// Shared read-only context handed to each validator.
pub struct ValidationContext<'a> {
    pub character: &'a Character,
    pub catalog: &'a Catalog,
    pub config: &'a RulesConfig,
}

/// One family of construction rules.
pub trait Validator {
    fn kind(&self) -> ValidatorKind;

    fn validate(&self, ctx: &ValidationContext<'_>, issues: &mut Vec<ValidationIssue>);
}
