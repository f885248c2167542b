//! Provider management persistence for the Atria EMR platform.
//!
//! This crate is the data-access layer for provider management: the people
//! who deliver care (providers), the roles they hold, and the suggestion
//! rules that propose providers and supervisors for patient relationships.
//! It exposes a storage-agnostic [`ProviderStore`] trait, a composable SQL
//! search expression builder, and a SQLite backend.
//!
//! # Architecture
//!
//! - [`types`] - domain records: persons, providers, roles, suggestions
//! - [`core`] - the [`ProviderStore`] trait
//! - [`search`] - the provider search query builder
//! - [`backends`] - storage implementations (SQLite)
//! - [`error`] - error types
//!
//! # Example
//!
//! ```no_run
//! use atria_persistence::backends::sqlite::SqliteBackend;
//! use atria_persistence::{ProviderSearch, ProviderStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::in_memory()?;
//! backend.init_schema()?;
//!
//! let search = ProviderSearch::new().with_name("Jane Doe");
//! let persons = backend.search_providers(&search).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod search;
pub mod types;

pub use crate::core::ProviderStore;
pub use error::{BackendError, RecordError, StorageError, StorageResult};
pub use types::{
    Person, PersonAddress, PersonAttribute, PersonName, Provider, ProviderRole, ProviderSearch,
    ProviderSuggestion, SupervisionSuggestion, SupervisionSuggestionType,
};
