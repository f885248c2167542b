//! SQL query builder for provider search.
//!
//! Translates a [`ProviderSearch`] into a SQL statement selecting distinct
//! matching persons, ordered by name. The builder is a pure function from the
//! filter request to one finished [`SqlFragment`]; backends bind its
//! parameters and execute it in a single read.

use crate::types::{PersonAddress, ProviderSearch};

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
    /// Null parameter.
    Null,
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }
}

impl SqlFragment {
    /// Creates a new SQL fragment.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Combines with another fragment using AND.
    pub fn and(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({}) AND ({})", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Combines with another fragment using OR.
    pub fn or(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({}) OR ({})", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Returns true if this fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Name columns a search token can prefix-match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    /// Given (first) name.
    Given,
    /// Family (last) name.
    Family,
    /// Middle name.
    Middle,
    /// Second family name.
    Family2,
}

impl NameField {
    /// All name fields, in the order tokens are matched against them.
    pub const ALL: [NameField; 4] = [
        NameField::Given,
        NameField::Family,
        NameField::Middle,
        NameField::Family2,
    ];

    /// The `person_name` column backing this field.
    pub fn column(&self) -> &'static str {
        match self {
            NameField::Given => "given_name",
            NameField::Family => "family_name",
            NameField::Middle => "middle_name",
            NameField::Family2 => "family_name2",
        }
    }
}

/// Address columns a search can substring-match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum AddressField {
    Address1,
    Address2,
    Address3,
    Address4,
    Address5,
    Address6,
    CityVillage,
    Country,
    CountyDistrict,
    StateProvince,
    PostalCode,
}

impl AddressField {
    /// All address fields.
    pub const ALL: [AddressField; 11] = [
        AddressField::Address1,
        AddressField::Address2,
        AddressField::Address3,
        AddressField::Address4,
        AddressField::Address5,
        AddressField::Address6,
        AddressField::CityVillage,
        AddressField::Country,
        AddressField::CountyDistrict,
        AddressField::StateProvince,
        AddressField::PostalCode,
    ];

    /// The `person_address` column backing this field.
    pub fn column(&self) -> &'static str {
        match self {
            AddressField::Address1 => "address1",
            AddressField::Address2 => "address2",
            AddressField::Address3 => "address3",
            AddressField::Address4 => "address4",
            AddressField::Address5 => "address5",
            AddressField::Address6 => "address6",
            AddressField::CityVillage => "city_village",
            AddressField::Country => "country",
            AddressField::CountyDistrict => "county_district",
            AddressField::StateProvince => "state_province",
            AddressField::PostalCode => "postal_code",
        }
    }

    /// The supplied filter value for this field, if any.
    pub fn value<'a>(&self, address: &'a PersonAddress) -> Option<&'a str> {
        match self {
            AddressField::Address1 => address.address1.as_deref(),
            AddressField::Address2 => address.address2.as_deref(),
            AddressField::Address3 => address.address3.as_deref(),
            AddressField::Address4 => address.address4.as_deref(),
            AddressField::Address5 => address.address5.as_deref(),
            AddressField::Address6 => address.address6.as_deref(),
            AddressField::CityVillage => address.city_village.as_deref(),
            AddressField::Country => address.country.as_deref(),
            AddressField::CountyDistrict => address.county_district.as_deref(),
            AddressField::StateProvince => address.state_province.as_deref(),
            AddressField::PostalCode => address.postal_code.as_deref(),
        }
    }
}

const SELECT_BASE: &str = "SELECT DISTINCT per.person_id, pn.given_name, pn.middle_name, pn.family_name \
     FROM provider p \
     JOIN person per ON per.person_id = p.person_id \
     JOIN person_name pn ON pn.person_id = per.person_id";

const ADDRESS_JOIN: &str = " JOIN person_address pa ON pa.person_id = per.person_id";

const ORDER_BY: &str =
    " ORDER BY pn.given_name ASC, pn.middle_name ASC, pn.family_name ASC";

/// Builds the provider search SQL expression.
///
/// Filter semantics:
///
/// - voided persons are always excluded;
/// - retired providers are excluded unless `include_retired` is set;
/// - a non-empty identifier must prefix-match the provider identifier,
///   case-insensitively;
/// - a non-empty role list restricts to providers holding one of the roles;
/// - each whitespace token of the name (after replacing `", "` with a space)
///   must prefix-match at least one name field, case-insensitively;
/// - each supplied address field must substring-match its column,
///   case-insensitively, all against the same address row.
///
/// The result row set may still contain one row per matching name or address
/// row; executors deduplicate to distinct persons preserving the sort order.
pub struct ProviderSearchQueryBuilder;

impl ProviderSearchQueryBuilder {
    /// Builds the complete search statement for a filter request.
    pub fn build(search: &ProviderSearch) -> SqlFragment {
        let address = search.address.as_ref().filter(|a| !a.is_empty());

        // Voided persons are excluded unconditionally.
        let mut conditions = SqlFragment::new("per.voided = 0");

        if !search.include_retired {
            conditions = conditions.and(SqlFragment::new("p.retired = 0"));
        }

        if let Some(identifier) = non_empty(search.identifier.as_deref()) {
            let offset = conditions.params.len();
            conditions = conditions.and(Self::identifier_condition(identifier, offset));
        }

        if !search.roles.is_empty() {
            let offset = conditions.params.len();
            conditions = conditions.and(Self::role_condition(&search.roles, offset));
        }

        if let Some(name) = non_empty(search.name.as_deref()) {
            let offset = conditions.params.len();
            conditions = conditions.and(Self::name_conditions(name, offset));
        }

        if let Some(addr) = address {
            let offset = conditions.params.len();
            conditions = conditions.and(Self::address_conditions(addr, offset));
        }

        let mut sql = String::from(SELECT_BASE);
        if address.is_some() {
            sql.push_str(ADDRESS_JOIN);
        }
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.sql);
        sql.push_str(ORDER_BY);

        SqlFragment::with_params(sql, conditions.params)
    }

    /// Case-insensitive prefix match on the provider identifier.
    fn identifier_condition(identifier: &str, offset: usize) -> SqlFragment {
        SqlFragment::with_params(
            format!("p.identifier COLLATE NOCASE LIKE ?{} || '%'", offset + 1),
            vec![SqlParam::string(identifier.to_lowercase())],
        )
    }

    /// Membership test on the provider role id.
    fn role_condition(roles: &[i64], offset: usize) -> SqlFragment {
        let mut params = Vec::with_capacity(roles.len());
        let placeholders: Vec<String> = roles
            .iter()
            .enumerate()
            .map(|(i, role_id)| {
                params.push(SqlParam::integer(*role_id));
                format!("?{}", offset + i + 1)
            })
            .collect();

        SqlFragment::with_params(
            format!("p.provider_role_id IN ({})", placeholders.join(", ")),
            params,
        )
    }

    /// One AND clause per name token; within a token, a four-way OR over the
    /// name fields.
    fn name_conditions(name: &str, offset: usize) -> SqlFragment {
        // "Last, First" input is folded into plain token form.
        let normalized = name.replace(", ", " ");

        let mut combined = SqlFragment::new("");
        let mut current = offset;

        for token in normalized.split_whitespace() {
            let mut token_condition = SqlFragment::new("");
            for field in NameField::ALL {
                current += 1;
                token_condition = token_condition.or(SqlFragment::with_params(
                    format!(
                        "pn.{} COLLATE NOCASE LIKE ?{} || '%'",
                        field.column(),
                        current
                    ),
                    vec![SqlParam::string(token.to_lowercase())],
                ));
            }
            combined = combined.and(token_condition);
        }

        combined
    }

    /// One AND clause per supplied address field, all bound to the same
    /// joined address row.
    fn address_conditions(address: &PersonAddress, offset: usize) -> SqlFragment {
        let mut combined = SqlFragment::new("");
        let mut current = offset;

        for field in AddressField::ALL {
            if let Some(value) = field.value(address) {
                current += 1;
                combined = combined.and(SqlFragment::with_params(
                    format!(
                        "pa.{} COLLATE NOCASE LIKE '%' || ?{} || '%'",
                        field.column(),
                        current
                    ),
                    vec![SqlParam::string(value.to_lowercase())],
                ));
            }
        }

        combined
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProviderSearch;

    #[test]
    fn test_fragment_and() {
        let frag1 = SqlFragment::with_params("a = ?1", vec![SqlParam::string("x")]);
        let frag2 = SqlFragment::with_params("b = ?2", vec![SqlParam::string("y")]);

        let combined = frag1.and(frag2);
        assert_eq!(combined.sql, "(a = ?1) AND (b = ?2)");
        assert_eq!(combined.params.len(), 2);
    }

    #[test]
    fn test_fragment_and_empty_side() {
        let frag = SqlFragment::new("a = ?1").and(SqlFragment::new(""));
        assert_eq!(frag.sql, "a = ?1");

        let frag = SqlFragment::new("").and(SqlFragment::new("b = ?1"));
        assert_eq!(frag.sql, "b = ?1");
    }

    #[test]
    fn test_fragment_or() {
        let frag1 = SqlFragment::new("a = ?1");
        let frag2 = SqlFragment::new("b = ?2");

        let combined = frag1.or(frag2);
        assert_eq!(combined.sql, "(a = ?1) OR (b = ?2)");
    }

    #[test]
    fn test_empty_search_defaults() {
        let fragment = ProviderSearchQueryBuilder::build(&ProviderSearch::new());

        assert!(fragment.sql.contains("per.voided = 0"));
        assert!(fragment.sql.contains("p.retired = 0"));
        assert!(fragment.sql.ends_with(ORDER_BY));
        assert!(fragment.params.is_empty());
        // No address filter, no address join
        assert!(!fragment.sql.contains("person_address"));
    }

    #[test]
    fn test_include_retired_drops_retired_condition() {
        let fragment =
            ProviderSearchQueryBuilder::build(&ProviderSearch::new().include_retired());
        assert!(!fragment.sql.contains("p.retired = 0"));
        assert!(fragment.sql.contains("per.voided = 0"));
    }

    #[test]
    fn test_identifier_prefix_condition() {
        let fragment =
            ProviderSearchQueryBuilder::build(&ProviderSearch::new().with_identifier("MD-10"));

        assert!(fragment
            .sql
            .contains("p.identifier COLLATE NOCASE LIKE ?1 || '%'"));
        assert_eq!(fragment.params, vec![SqlParam::string("md-10")]);
    }

    #[test]
    fn test_empty_identifier_skipped() {
        let with_empty =
            ProviderSearchQueryBuilder::build(&ProviderSearch::new().with_identifier(""));
        let without = ProviderSearchQueryBuilder::build(&ProviderSearch::new());
        assert_eq!(with_empty.sql, without.sql);
        assert!(with_empty.params.is_empty());
    }

    #[test]
    fn test_role_membership_condition() {
        let fragment =
            ProviderSearchQueryBuilder::build(&ProviderSearch::new().with_roles(vec![3, 5]));

        assert!(fragment.sql.contains("p.provider_role_id IN (?1, ?2)"));
        assert_eq!(
            fragment.params,
            vec![SqlParam::integer(3), SqlParam::integer(5)]
        );
    }

    #[test]
    fn test_name_tokens_and_fields() {
        let fragment =
            ProviderSearchQueryBuilder::build(&ProviderSearch::new().with_name("Jane Doe"));

        // Two tokens, four fields each
        assert_eq!(fragment.params.len(), 8);
        assert!(fragment.params.contains(&SqlParam::string("jane")));
        assert!(fragment.params.contains(&SqlParam::string("doe")));
        for column in ["given_name", "family_name", "middle_name", "family_name2"] {
            assert!(fragment.sql.contains(&format!("pn.{} COLLATE NOCASE LIKE", column)));
        }
    }

    #[test]
    fn test_comma_space_normalization() {
        let straight =
            ProviderSearchQueryBuilder::build(&ProviderSearch::new().with_name("Jane Doe"));
        let inverted =
            ProviderSearchQueryBuilder::build(&ProviderSearch::new().with_name("Doe, Jane"));

        assert_eq!(straight.sql, inverted.sql);
        // Same token multiset, different order
        assert_eq!(straight.params.len(), inverted.params.len());
        assert!(inverted.params.contains(&SqlParam::string("jane")));
        assert!(inverted.params.contains(&SqlParam::string("doe")));
    }

    #[test]
    fn test_empty_name_behaves_as_absent() {
        let with_empty = ProviderSearchQueryBuilder::build(&ProviderSearch::new().with_name(""));
        let blank_tokens =
            ProviderSearchQueryBuilder::build(&ProviderSearch::new().with_name("  ,  "));
        let without = ProviderSearchQueryBuilder::build(&ProviderSearch::new());

        assert_eq!(with_empty.sql, without.sql);
        assert_eq!(blank_tokens.sql, without.sql);
    }

    #[test]
    fn test_address_substring_conditions() {
        use crate::types::PersonAddress;

        let fragment = ProviderSearchQueryBuilder::build(
            &ProviderSearch::new().with_address(PersonAddress {
                city_village: Some("Spring".to_string()),
                postal_code: Some("55101".to_string()),
                ..Default::default()
            }),
        );

        assert!(fragment.sql.contains(ADDRESS_JOIN.trim_start()));
        assert!(fragment
            .sql
            .contains("pa.city_village COLLATE NOCASE LIKE '%' || ?1 || '%'"));
        assert!(fragment
            .sql
            .contains("pa.postal_code COLLATE NOCASE LIKE '%' || ?2 || '%'"));
        assert_eq!(
            fragment.params,
            vec![SqlParam::string("spring"), SqlParam::string("55101")]
        );
    }

    #[test]
    fn test_blank_address_skips_join() {
        use crate::types::PersonAddress;

        let fragment = ProviderSearchQueryBuilder::build(
            &ProviderSearch::new().with_address(PersonAddress::default()),
        );
        assert!(!fragment.sql.contains("person_address"));
    }

    #[test]
    fn test_combined_filters_number_params_sequentially() {
        use crate::types::PersonAddress;

        let fragment = ProviderSearchQueryBuilder::build(
            &ProviderSearch::new()
                .with_identifier("MD")
                .with_roles(vec![1])
                .with_name("Jane")
                .with_address(PersonAddress {
                    country: Some("US".to_string()),
                    ..Default::default()
                }),
        );

        // identifier + role + 4 name fields + 1 address field
        assert_eq!(fragment.params.len(), 7);
        for n in 1..=7 {
            assert!(
                fragment.sql.contains(&format!("?{}", n)),
                "missing placeholder ?{} in {}",
                n,
                fragment.sql
            );
        }
    }

    #[test]
    fn test_attributes_are_not_applied() {
        use crate::types::PersonAttribute;

        let with_attrs = ProviderSearchQueryBuilder::build(
            &ProviderSearch::new()
                .with_attributes(vec![PersonAttribute::new("Health District", "North")]),
        );
        let without = ProviderSearchQueryBuilder::build(&ProviderSearch::new());

        assert_eq!(with_attrs.sql, without.sql);
        assert!(with_attrs.params.is_empty());
    }

    #[test]
    fn test_order_by_name_fields() {
        let fragment = ProviderSearchQueryBuilder::build(&ProviderSearch::new());
        assert!(fragment.sql.ends_with(
            "ORDER BY pn.given_name ASC, pn.middle_name ASC, pn.family_name ASC"
        ));
    }
}
