//! Core types for the provider management persistence layer.
//!
//! This module provides the domain model used throughout the crate:
//!
//! - [`Person`], [`PersonName`], [`PersonAddress`], [`PersonAttribute`] - person records
//! - [`Provider`], [`ProviderRole`] - provider records and their roles
//! - [`ProviderSuggestion`], [`SupervisionSuggestion`] - suggestion records
//! - [`ProviderSearch`] - the provider search filter request
//!
//! # Examples
//!
//! ## Building a Search Request
//!
//! ```
//! use atria_persistence::types::{PersonAddress, ProviderSearch};
//!
//! let search = ProviderSearch::new()
//!     .with_name("Doe, Jane")
//!     .with_identifier("MD-10")
//!     .with_address(PersonAddress {
//!         city_village: Some("Springfield".to_string()),
//!         ..Default::default()
//!     })
//!     .with_roles(vec![1, 2]);
//!
//! assert!(!search.include_retired);
//! ```

mod person;
mod provider;
mod role;
mod search;
mod suggestion;

pub use person::{Person, PersonAddress, PersonAttribute, PersonName};
pub use provider::Provider;
pub use role::ProviderRole;
pub use search::ProviderSearch;
pub use suggestion::{ProviderSuggestion, SupervisionSuggestion, SupervisionSuggestionType};
