//! The provider search filter request.

use super::{PersonAddress, PersonAttribute};

/// Filters for a provider search.
///
/// All filters are optional; an absent or empty filter is skipped rather than
/// rejected. Active filters combine with AND. See
/// [`ProviderSearchQueryBuilder`] for the exact matching semantics of each
/// filter.
///
/// [`ProviderSearchQueryBuilder`]: crate::search::ProviderSearchQueryBuilder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSearch {
    /// Free-text name filter. `", "` is treated as a space so that
    /// `"Doe, Jane"` and `"Jane Doe"` match the same persons; each whitespace
    /// token must prefix-match at least one name field.
    pub name: Option<String>,

    /// Case-insensitive prefix filter on the provider identifier.
    pub identifier: Option<String>,

    /// Address filter; every supplied field must match as a case-insensitive
    /// substring, and a person matches if any one of their addresses
    /// satisfies all supplied fields.
    pub address: Option<PersonAddress>,

    /// Person attribute filters. Accepted for interface compatibility but not
    /// yet applied to the generated query.
    pub attributes: Vec<PersonAttribute>,

    /// Restrict to providers holding one of these role ids. An empty list
    /// skips the filter entirely rather than matching nothing.
    pub roles: Vec<i64>,

    /// Include retired providers. Defaults to false.
    pub include_retired: bool,
}

impl ProviderSearch {
    /// Creates an empty search that matches every non-voided person with a
    /// non-retired provider record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name filter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the identifier prefix filter.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the address filter.
    pub fn with_address(mut self, address: PersonAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// Sets the person attribute filters.
    pub fn with_attributes(mut self, attributes: Vec<PersonAttribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets the role id filter.
    pub fn with_roles(mut self, roles: Vec<i64>) -> Self {
        self.roles = roles;
        self
    }

    /// Includes retired providers in the results.
    pub fn include_retired(mut self) -> Self {
        self.include_retired = true;
        self
    }
}
