//! Provider role records.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A named category of provider, e.g. nurse or physician.
///
/// Roles carry two many-to-many associations: the relationship types a
/// provider in this role can have with patients, and the roles it can
/// supervise.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRole {
    /// Database id; `None` until saved.
    pub id: Option<i64>,
    /// Stable external identifier.
    pub uuid: Uuid,
    /// Role name.
    pub name: String,
    /// Soft-delete flag.
    pub retired: bool,
    /// Ids of relationship types providers in this role may hold.
    pub relationship_type_ids: Vec<i64>,
    /// Ids of roles this role supervises.
    pub supervisee_role_ids: Vec<i64>,
    /// When this record was first saved.
    pub date_created: DateTime<Utc>,
}

impl ProviderRole {
    /// Creates a new unsaved role.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            name: name.into(),
            retired: false,
            relationship_type_ids: Vec::new(),
            supervisee_role_ids: Vec::new(),
            date_created: Utc::now(),
        }
    }

    /// Adds a relationship type association.
    pub fn with_relationship_type(mut self, relationship_type_id: i64) -> Self {
        self.relationship_type_ids.push(relationship_type_id);
        self
    }

    /// Adds a supervisee role association.
    pub fn with_supervisee_role(mut self, role_id: i64) -> Self {
        self.supervisee_role_ids.push(role_id);
        self
    }

    /// Marks the role as retired.
    pub fn retired(mut self) -> Self {
        self.retired = true;
        self
    }
}
