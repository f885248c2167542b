//! Provider records.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A person acting in a care-delivery role.
///
/// Associates a person with a [`ProviderRole`] and an external identifier
/// string. One person may hold multiple provider records, though this is rare.
///
/// [`ProviderRole`]: crate::types::ProviderRole
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    /// Database id; `None` until saved.
    pub id: Option<i64>,
    /// Stable external identifier.
    pub uuid: Uuid,
    /// The person this provider record belongs to.
    pub person_id: i64,
    /// The role the person holds, if assigned.
    pub provider_role_id: Option<i64>,
    /// External identifier string, e.g. a registration number.
    pub identifier: Option<String>,
    /// Soft-delete flag. Retired providers are excluded from active searches
    /// unless explicitly requested.
    pub retired: bool,
    /// When this record was first saved.
    pub date_created: DateTime<Utc>,
}

impl Provider {
    /// Creates a new unsaved provider record for a person.
    pub fn new(person_id: i64) -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            person_id,
            provider_role_id: None,
            identifier: None,
            retired: false,
            date_created: Utc::now(),
        }
    }

    /// Sets the identifier string.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the provider role.
    pub fn with_role(mut self, role_id: i64) -> Self {
        self.provider_role_id = Some(role_id);
        self
    }

    /// Marks the provider as retired.
    pub fn retired(mut self) -> Self {
        self.retired = true;
        self
    }
}
