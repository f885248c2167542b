//! Provider search query construction.
//!
//! Translates a [`ProviderSearch`](crate::types::ProviderSearch) into a single
//! immutable SQL expression that backends execute verbatim.

mod query_builder;

pub use query_builder::{AddressField, NameField, ProviderSearchQueryBuilder, SqlFragment, SqlParam};
