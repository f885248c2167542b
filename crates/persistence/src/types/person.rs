//! Person records and their name/address/attribute components.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A person known to the system.
///
/// A person may act as a provider through one or more [`Provider`] records.
/// Names, addresses, and attributes are one-to-many components persisted and
/// loaded together with the person row.
///
/// [`Provider`]: crate::types::Provider
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    /// Database id; `None` until the person has been saved.
    pub id: Option<i64>,
    /// Stable external identifier.
    pub uuid: Uuid,
    /// Soft-delete flag. Voided persons are excluded from every search.
    pub voided: bool,
    /// Name records, zero or more.
    pub names: Vec<PersonName>,
    /// Address records, zero or more.
    pub addresses: Vec<PersonAddress>,
    /// Free-form attributes, zero or more.
    pub attributes: Vec<PersonAttribute>,
    /// When this record was first saved.
    pub date_created: DateTime<Utc>,
}

impl Person {
    /// Creates a new unsaved person with a fresh uuid.
    pub fn new() -> Self {
        Self {
            id: None,
            uuid: Uuid::new_v4(),
            voided: false,
            names: Vec::new(),
            addresses: Vec::new(),
            attributes: Vec::new(),
            date_created: Utc::now(),
        }
    }

    /// Adds a name record.
    pub fn with_name(mut self, name: PersonName) -> Self {
        self.names.push(name);
        self
    }

    /// Adds an address record.
    pub fn with_address(mut self, address: PersonAddress) -> Self {
        self.addresses.push(address);
        self
    }

    /// Marks the person as voided.
    pub fn voided(mut self) -> Self {
        self.voided = true;
        self
    }

    /// Returns the first name record, if any.
    pub fn preferred_name(&self) -> Option<&PersonName> {
        self.names.first()
    }
}

impl Default for Person {
    fn default() -> Self {
        Self::new()
    }
}

/// A single name record for a person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonName {
    /// Given (first) name.
    pub given: Option<String>,
    /// Middle name.
    pub middle: Option<String>,
    /// Family (last) name.
    pub family: Option<String>,
    /// Second family name, used in locales with two surnames.
    pub family2: Option<String>,
}

impl PersonName {
    /// Creates a name from given and family parts.
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given: Some(given.into()),
            family: Some(family.into()),
            ..Default::default()
        }
    }

    /// Sets the middle name.
    pub fn with_middle(mut self, middle: impl Into<String>) -> Self {
        self.middle = Some(middle.into());
        self
    }

    /// Sets the second family name.
    pub fn with_family2(mut self, family2: impl Into<String>) -> Self {
        self.family2 = Some(family2.into());
        self
    }
}

/// A single address record for a person.
///
/// Also doubles as the address filter in [`ProviderSearch`]: every supplied
/// (`Some`) field must match the corresponding stored column as a
/// case-insensitive substring.
///
/// [`ProviderSearch`]: crate::types::ProviderSearch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct PersonAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: Option<String>,
    pub address4: Option<String>,
    pub address5: Option<String>,
    pub address6: Option<String>,
    pub city_village: Option<String>,
    pub country: Option<String>,
    pub county_district: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
}

impl PersonAddress {
    /// Returns true if no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.address1.is_none()
            && self.address2.is_none()
            && self.address3.is_none()
            && self.address4.is_none()
            && self.address5.is_none()
            && self.address6.is_none()
            && self.city_village.is_none()
            && self.country.is_none()
            && self.county_district.is_none()
            && self.state_province.is_none()
            && self.postal_code.is_none()
    }
}

/// A typed free-form attribute attached to a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonAttribute {
    /// Attribute type name, e.g. `"Health District"`.
    pub attribute_type: String,
    /// Attribute value.
    pub value: String,
}

impl PersonAttribute {
    /// Creates a new attribute.
    pub fn new(attribute_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute_type: attribute_type.into(),
            value: value.into(),
        }
    }
}
