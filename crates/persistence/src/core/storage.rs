//! Core provider storage trait.
//!
//! [`ProviderStore`] is the data-access boundary for provider management. It
//! offers fetch-by-id, fetch-by-uuid, insert-or-update, and delete for every
//! record type, plus the provider search. Implementations are stateless
//! request/response: each call runs one read or write against the backing
//! store and returns; no caching, no retries, no partial results.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StorageResult;
use crate::types::{
    Person, Provider, ProviderRole, ProviderSearch, ProviderSuggestion, SupervisionSuggestion,
    SupervisionSuggestionType,
};

/// Data-access operations for providers, roles, and suggestions.
///
/// Save operations assign ids to unsaved records and update existing rows
/// otherwise (insert-or-update semantics). Fetch operations return `None`
/// rather than an error when the record does not exist; delete operations on
/// a missing record fail with `RecordError::NotFound`.
#[async_trait]
pub trait ProviderStore: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    // -- Provider roles ------------------------------------------------------

    /// Returns all provider roles, optionally including retired ones.
    async fn all_provider_roles(&self, include_retired: bool) -> StorageResult<Vec<ProviderRole>>;

    /// Fetches a provider role by id.
    async fn provider_role(&self, id: i64) -> StorageResult<Option<ProviderRole>>;

    /// Fetches a provider role by uuid.
    async fn provider_role_by_uuid(&self, uuid: Uuid) -> StorageResult<Option<ProviderRole>>;

    /// Returns the non-retired roles associated with a relationship type.
    async fn provider_roles_by_relationship_type(
        &self,
        relationship_type_id: i64,
    ) -> StorageResult<Vec<ProviderRole>>;

    /// Returns the non-retired roles that supervise the given role.
    async fn provider_roles_by_supervisee_role(
        &self,
        role_id: i64,
    ) -> StorageResult<Vec<ProviderRole>>;

    /// Inserts or updates a provider role, assigning an id on first save.
    async fn save_provider_role(&self, role: &mut ProviderRole) -> StorageResult<()>;

    /// Deletes a provider role and its associations.
    async fn delete_provider_role(&self, id: i64) -> StorageResult<()>;

    // -- Persons -------------------------------------------------------------

    /// Fetches a person by id, with names, addresses, and attributes.
    async fn person(&self, id: i64) -> StorageResult<Option<Person>>;

    /// Fetches a person by uuid.
    async fn person_by_uuid(&self, uuid: Uuid) -> StorageResult<Option<Person>>;

    /// Inserts or updates a person together with their names, addresses, and
    /// attributes, assigning an id on first save.
    async fn save_person(&self, person: &mut Person) -> StorageResult<()>;

    /// Deletes a person and their component records.
    async fn delete_person(&self, id: i64) -> StorageResult<()>;

    // -- Providers -----------------------------------------------------------

    /// Fetches a provider record by id.
    async fn provider(&self, id: i64) -> StorageResult<Option<Provider>>;

    /// Inserts or updates a provider record, assigning an id on first save.
    async fn save_provider(&self, provider: &mut Provider) -> StorageResult<()>;

    /// Deletes a provider record.
    async fn delete_provider(&self, id: i64) -> StorageResult<()>;

    /// Searches for persons with matching provider records.
    ///
    /// Executes the expression built by
    /// [`ProviderSearchQueryBuilder`](crate::search::ProviderSearchQueryBuilder)
    /// and returns distinct persons ordered by given, middle, then family
    /// name ascending. A person with several matching provider, name, or
    /// address rows appears exactly once. Never returns an error for any
    /// filter combination; empty filters are skipped.
    async fn search_providers(&self, search: &ProviderSearch) -> StorageResult<Vec<Person>>;

    /// Returns the provider records for a person, ordered by provider id.
    async fn providers_for_person(
        &self,
        person_id: i64,
        include_retired: bool,
    ) -> StorageResult<Vec<Provider>>;

    /// Returns the provider records holding any of the given roles, ordered
    /// by provider id.
    async fn providers_with_roles(
        &self,
        role_ids: &[i64],
        include_retired: bool,
    ) -> StorageResult<Vec<Provider>>;

    // -- Provider suggestions ------------------------------------------------

    /// Fetches a provider suggestion by id.
    async fn provider_suggestion(&self, id: i64) -> StorageResult<Option<ProviderSuggestion>>;

    /// Fetches a provider suggestion by uuid.
    async fn provider_suggestion_by_uuid(
        &self,
        uuid: Uuid,
    ) -> StorageResult<Option<ProviderSuggestion>>;

    /// Returns the non-retired suggestions for a relationship type.
    async fn provider_suggestions_by_relationship_type(
        &self,
        relationship_type_id: i64,
    ) -> StorageResult<Vec<ProviderSuggestion>>;

    /// Inserts or updates a provider suggestion, assigning an id on first
    /// save.
    async fn save_provider_suggestion(
        &self,
        suggestion: &mut ProviderSuggestion,
    ) -> StorageResult<()>;

    /// Deletes a provider suggestion.
    async fn delete_provider_suggestion(&self, id: i64) -> StorageResult<()>;

    // -- Supervision suggestions ---------------------------------------------

    /// Fetches a supervision suggestion by id.
    async fn supervision_suggestion(
        &self,
        id: i64,
    ) -> StorageResult<Option<SupervisionSuggestion>>;

    /// Fetches a supervision suggestion by uuid.
    async fn supervision_suggestion_by_uuid(
        &self,
        uuid: Uuid,
    ) -> StorageResult<Option<SupervisionSuggestion>>;

    /// Returns the non-retired supervision suggestions for a provider role,
    /// optionally restricted to one suggestion type.
    async fn supervision_suggestions_by_role_and_type(
        &self,
        role_id: i64,
        suggestion_type: Option<SupervisionSuggestionType>,
    ) -> StorageResult<Vec<SupervisionSuggestion>>;

    /// Inserts or updates a supervision suggestion, assigning an id on first
    /// save.
    async fn save_supervision_suggestion(
        &self,
        suggestion: &mut SupervisionSuggestion,
    ) -> StorageResult<()>;

    /// Deletes a supervision suggestion.
    async fn delete_supervision_suggestion(&self, id: i64) -> StorageResult<()>;
}
