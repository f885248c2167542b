//! Provider and supervision suggestion records.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A rule suggesting providers for a patient relationship type.
///
/// The rule itself is an opaque criteria string interpreted by the named
/// evaluator in the service layer; this crate only stores and filters them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSuggestion {
    /// Database id; `None` until saved.
    pub id: Option<i64>,
    /// Stable external identifier.
    pub uuid: Uuid,
    /// Display name of the suggestion.
    pub name: String,
    /// The relationship type this suggestion applies to.
    pub relationship_type_id: i64,
    /// Name of the evaluator that interprets `criteria`.
    pub evaluator: String,
    /// Opaque rule text.
    pub criteria: String,
    /// Soft-delete flag.
    pub retired: bool,
    /// When this record was first saved.
    pub date_created: DateTime<Utc>,
}

impl ProviderSuggestion {
    /// Creates a new unsaved provider suggestion.
    pub fn new(
        name: impl Into<String>,
        relationship_type_id: i64,
        evaluator: impl Into<String>,
        criteria: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            name: name.into(),
            relationship_type_id,
            evaluator: evaluator.into(),
            criteria: criteria.into(),
            retired: false,
            date_created: Utc::now(),
        }
    }
}

/// Whether a supervision suggestion proposes supervisors or supervisees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisionSuggestionType {
    /// Suggests supervisors for providers in the role.
    SupervisorSuggestion,
    /// Suggests supervisees for providers in the role.
    SuperviseeSuggestion,
}

impl SupervisionSuggestionType {
    /// Stable string form used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupervisionSuggestionType::SupervisorSuggestion => "supervisor-suggestion",
            SupervisionSuggestionType::SuperviseeSuggestion => "supervisee-suggestion",
        }
    }

    /// Parses the stable string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "supervisor-suggestion" => Some(SupervisionSuggestionType::SupervisorSuggestion),
            "supervisee-suggestion" => Some(SupervisionSuggestionType::SuperviseeSuggestion),
            _ => None,
        }
    }
}

impl fmt::Display for SupervisionSuggestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule suggesting supervision assignments for a provider role.
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisionSuggestion {
    /// Database id; `None` until saved.
    pub id: Option<i64>,
    /// Stable external identifier.
    pub uuid: Uuid,
    /// Display name of the suggestion.
    pub name: String,
    /// The provider role this suggestion applies to.
    pub provider_role_id: i64,
    /// Direction of the suggestion.
    pub suggestion_type: SupervisionSuggestionType,
    /// Name of the evaluator that interprets `criteria`.
    pub evaluator: String,
    /// Opaque rule text.
    pub criteria: String,
    /// Soft-delete flag.
    pub retired: bool,
    /// When this record was first saved.
    pub date_created: DateTime<Utc>,
}

impl SupervisionSuggestion {
    /// Creates a new unsaved supervision suggestion.
    pub fn new(
        name: impl Into<String>,
        provider_role_id: i64,
        suggestion_type: SupervisionSuggestionType,
        evaluator: impl Into<String>,
        criteria: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            name: name.into(),
            provider_role_id,
            suggestion_type,
            evaluator: evaluator.into(),
            criteria: criteria.into(),
            retired: false,
            date_created: Utc::now(),
        }
    }
}
