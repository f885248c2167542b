//! ProviderStore implementation for SQLite.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use uuid::Uuid;

use crate::core::ProviderStore;
use crate::error::{BackendError, RecordError, StorageError, StorageResult};
use crate::search::{ProviderSearchQueryBuilder, SqlParam};
use crate::types::{
    Person, PersonAddress, PersonAttribute, PersonName, Provider, ProviderRole, ProviderSearch,
    ProviderSuggestion, SupervisionSuggestion, SupervisionSuggestionType,
};

use super::SqliteBackend;

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

fn parse_uuid(raw: &str) -> StorageResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| internal_error(format!("Failed to parse uuid '{}': {}", raw, e)))
}

fn parse_timestamp(raw: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| internal_error(format!("Failed to parse timestamp '{}': {}", raw, e)))
}

fn to_value(param: &SqlParam) -> Value {
    match param {
        SqlParam::String(s) => Value::Text(s.clone()),
        SqlParam::Integer(i) => Value::Integer(*i),
        SqlParam::Null => Value::Null,
    }
}

/// Builds `?N, ?N+1, ...` placeholders for an IN list.
fn in_placeholders(count: usize, offset: usize) -> String {
    (0..count)
        .map(|i| format!("?{}", offset + i + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

// Row loading helpers. These take a connection rather than &self so that a
// whole operation runs against one pooled connection.

fn load_person(conn: &Connection, id: i64) -> StorageResult<Option<Person>> {
    let header = conn
        .query_row(
            "SELECT uuid, voided, date_created FROM person WHERE person_id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, bool>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    let (uuid_raw, voided, created_raw) = match header {
        Some(h) => h,
        None => return Ok(None),
    };

    let mut stmt = conn.prepare(
        "SELECT given_name, middle_name, family_name, family_name2
         FROM person_name WHERE person_id = ?1 ORDER BY person_name_id",
    )?;
    let names = stmt
        .query_map(params![id], |row| {
            Ok(PersonName {
                given: row.get(0)?,
                middle: row.get(1)?,
                family: row.get(2)?,
                family2: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT address1, address2, address3, address4, address5, address6,
                city_village, country, county_district, state_province, postal_code
         FROM person_address WHERE person_id = ?1 ORDER BY person_address_id",
    )?;
    let addresses = stmt
        .query_map(params![id], |row| {
            Ok(PersonAddress {
                address1: row.get(0)?,
                address2: row.get(1)?,
                address3: row.get(2)?,
                address4: row.get(3)?,
                address5: row.get(4)?,
                address6: row.get(5)?,
                city_village: row.get(6)?,
                country: row.get(7)?,
                county_district: row.get(8)?,
                state_province: row.get(9)?,
                postal_code: row.get(10)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT attribute_type, value FROM person_attribute
         WHERE person_id = ?1 ORDER BY person_attribute_id",
    )?;
    let attributes = stmt
        .query_map(params![id], |row| {
            Ok(PersonAttribute {
                attribute_type: row.get(0)?,
                value: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Person {
        id: Some(id),
        uuid: parse_uuid(&uuid_raw)?,
        voided,
        names,
        addresses,
        attributes,
        date_created: parse_timestamp(&created_raw)?,
    }))
}

fn load_role(conn: &Connection, id: i64) -> StorageResult<Option<ProviderRole>> {
    let header = conn
        .query_row(
            "SELECT uuid, name, retired, date_created FROM provider_role WHERE provider_role_id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, bool>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    let (uuid_raw, name, retired, created_raw) = match header {
        Some(h) => h,
        None => return Ok(None),
    };

    let mut stmt = conn.prepare(
        "SELECT relationship_type_id FROM provider_role_relationship_type
         WHERE provider_role_id = ?1 ORDER BY relationship_type_id",
    )?;
    let relationship_type_ids = stmt
        .query_map(params![id], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT supervisee_role_id FROM provider_role_supervisee
         WHERE provider_role_id = ?1 ORDER BY supervisee_role_id",
    )?;
    let supervisee_role_ids = stmt
        .query_map(params![id], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;

    Ok(Some(ProviderRole {
        id: Some(id),
        uuid: parse_uuid(&uuid_raw)?,
        name,
        retired,
        relationship_type_ids,
        supervisee_role_ids,
        date_created: parse_timestamp(&created_raw)?,
    }))
}

fn load_roles_by_ids(conn: &Connection, ids: Vec<i64>) -> StorageResult<Vec<ProviderRole>> {
    let mut roles = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(role) = load_role(conn, id)? {
            roles.push(role);
        }
    }
    Ok(roles)
}

/// Raw provider row: (id, uuid, person_id, role_id, identifier, retired, created).
type ProviderRow = (i64, String, i64, Option<i64>, Option<String>, bool, String);

fn provider_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProviderRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn provider_from_row(raw: ProviderRow) -> StorageResult<Provider> {
    let (id, uuid_raw, person_id, provider_role_id, identifier, retired, created_raw) = raw;
    Ok(Provider {
        id: Some(id),
        uuid: parse_uuid(&uuid_raw)?,
        person_id,
        provider_role_id,
        identifier,
        retired,
        date_created: parse_timestamp(&created_raw)?,
    })
}

const PROVIDER_COLUMNS: &str =
    "provider_id, uuid, person_id, provider_role_id, identifier, retired, date_created";

/// Raw suggestion row shared by both suggestion tables:
/// (id, uuid, name, subject_id, type_or_none, evaluator, criteria, retired, created).
type SuggestionRow = (
    i64,
    String,
    String,
    i64,
    Option<String>,
    String,
    String,
    bool,
    String,
);

fn provider_suggestion_from_row(raw: SuggestionRow) -> StorageResult<ProviderSuggestion> {
    let (id, uuid_raw, name, relationship_type_id, _, evaluator, criteria, retired, created_raw) =
        raw;
    Ok(ProviderSuggestion {
        id: Some(id),
        uuid: parse_uuid(&uuid_raw)?,
        name,
        relationship_type_id,
        evaluator,
        criteria,
        retired,
        date_created: parse_timestamp(&created_raw)?,
    })
}

fn supervision_suggestion_from_row(raw: SuggestionRow) -> StorageResult<SupervisionSuggestion> {
    let (id, uuid_raw, name, provider_role_id, type_raw, evaluator, criteria, retired, created_raw) =
        raw;
    let type_raw = type_raw
        .ok_or_else(|| internal_error("supervision suggestion row missing type".to_string()))?;
    let suggestion_type = SupervisionSuggestionType::parse(&type_raw)
        .ok_or_else(|| internal_error(format!("Unknown suggestion type '{}'", type_raw)))?;
    Ok(SupervisionSuggestion {
        id: Some(id),
        uuid: parse_uuid(&uuid_raw)?,
        name,
        provider_role_id,
        suggestion_type,
        evaluator,
        criteria,
        retired,
        date_created: parse_timestamp(&created_raw)?,
    })
}

#[async_trait]
impl ProviderStore for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    // -- Provider roles ------------------------------------------------------

    async fn all_provider_roles(&self, include_retired: bool) -> StorageResult<Vec<ProviderRole>> {
        let conn = self.get_connection()?;
        let sql = if include_retired {
            "SELECT provider_role_id FROM provider_role ORDER BY provider_role_id"
        } else {
            "SELECT provider_role_id FROM provider_role WHERE retired = 0 ORDER BY provider_role_id"
        };
        let mut stmt = conn.prepare(sql)?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        drop(stmt);
        load_roles_by_ids(&conn, ids)
    }

    async fn provider_role(&self, id: i64) -> StorageResult<Option<ProviderRole>> {
        let conn = self.get_connection()?;
        load_role(&conn, id)
    }

    async fn provider_role_by_uuid(&self, uuid: Uuid) -> StorageResult<Option<ProviderRole>> {
        let conn = self.get_connection()?;
        let id: Option<i64> = conn
            .query_row(
                "SELECT provider_role_id FROM provider_role WHERE uuid = ?1",
                params![uuid.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        match id {
            Some(id) => load_role(&conn, id),
            None => Ok(None),
        }
    }

    async fn provider_roles_by_relationship_type(
        &self,
        relationship_type_id: i64,
    ) -> StorageResult<Vec<ProviderRole>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT r.provider_role_id
             FROM provider_role r
             JOIN provider_role_relationship_type l ON l.provider_role_id = r.provider_role_id
             WHERE r.retired = 0 AND l.relationship_type_id = ?1
             ORDER BY r.provider_role_id",
        )?;
        let ids = stmt
            .query_map(params![relationship_type_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        drop(stmt);
        load_roles_by_ids(&conn, ids)
    }

    async fn provider_roles_by_supervisee_role(
        &self,
        role_id: i64,
    ) -> StorageResult<Vec<ProviderRole>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT r.provider_role_id
             FROM provider_role r
             JOIN provider_role_supervisee l ON l.provider_role_id = r.provider_role_id
             WHERE r.retired = 0 AND l.supervisee_role_id = ?1
             ORDER BY r.provider_role_id",
        )?;
        let ids = stmt
            .query_map(params![role_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        drop(stmt);
        load_roles_by_ids(&conn, ids)
    }

    async fn save_provider_role(&self, role: &mut ProviderRole) -> StorageResult<()> {
        let conn = self.get_connection()?;

        let id = match role.id {
            None => {
                conn.execute(
                    "INSERT INTO provider_role (uuid, name, retired, date_created)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        role.uuid.to_string(),
                        role.name,
                        role.retired,
                        role.date_created.to_rfc3339()
                    ],
                )?;
                let id = conn.last_insert_rowid();
                role.id = Some(id);
                id
            }
            Some(id) => {
                let updated = conn.execute(
                    "UPDATE provider_role SET uuid = ?1, name = ?2, retired = ?3, date_created = ?4
                     WHERE provider_role_id = ?5",
                    params![
                        role.uuid.to_string(),
                        role.name,
                        role.retired,
                        role.date_created.to_rfc3339(),
                        id
                    ],
                )?;
                if updated == 0 {
                    return Err(RecordError::NotFound {
                        kind: "provider_role",
                        id,
                    }
                    .into());
                }
                id
            }
        };

        // Link tables are rewritten on every save
        conn.execute(
            "DELETE FROM provider_role_relationship_type WHERE provider_role_id = ?1",
            params![id],
        )?;
        for relationship_type_id in &role.relationship_type_ids {
            conn.execute(
                "INSERT OR IGNORE INTO provider_role_relationship_type
                 (provider_role_id, relationship_type_id) VALUES (?1, ?2)",
                params![id, relationship_type_id],
            )?;
        }

        conn.execute(
            "DELETE FROM provider_role_supervisee WHERE provider_role_id = ?1",
            params![id],
        )?;
        for supervisee_role_id in &role.supervisee_role_ids {
            conn.execute(
                "INSERT OR IGNORE INTO provider_role_supervisee
                 (provider_role_id, supervisee_role_id) VALUES (?1, ?2)",
                params![id, supervisee_role_id],
            )?;
        }

        Ok(())
    }

    async fn delete_provider_role(&self, id: i64) -> StorageResult<()> {
        let conn = self.get_connection()?;
        conn.execute(
            "DELETE FROM provider_role_relationship_type WHERE provider_role_id = ?1",
            params![id],
        )?;
        conn.execute(
            "DELETE FROM provider_role_supervisee WHERE provider_role_id = ?1",
            params![id],
        )?;
        let deleted = conn.execute(
            "DELETE FROM provider_role WHERE provider_role_id = ?1",
            params![id],
        )?;
        if deleted == 0 {
            return Err(RecordError::NotFound {
                kind: "provider_role",
                id,
            }
            .into());
        }
        Ok(())
    }

    // -- Persons -------------------------------------------------------------

    async fn person(&self, id: i64) -> StorageResult<Option<Person>> {
        let conn = self.get_connection()?;
        load_person(&conn, id)
    }

    async fn person_by_uuid(&self, uuid: Uuid) -> StorageResult<Option<Person>> {
        let conn = self.get_connection()?;
        let id: Option<i64> = conn
            .query_row(
                "SELECT person_id FROM person WHERE uuid = ?1",
                params![uuid.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        match id {
            Some(id) => load_person(&conn, id),
            None => Ok(None),
        }
    }

    async fn save_person(&self, person: &mut Person) -> StorageResult<()> {
        let conn = self.get_connection()?;

        let id = match person.id {
            None => {
                conn.execute(
                    "INSERT INTO person (uuid, voided, date_created) VALUES (?1, ?2, ?3)",
                    params![
                        person.uuid.to_string(),
                        person.voided,
                        person.date_created.to_rfc3339()
                    ],
                )?;
                let id = conn.last_insert_rowid();
                person.id = Some(id);
                id
            }
            Some(id) => {
                let updated = conn.execute(
                    "UPDATE person SET uuid = ?1, voided = ?2, date_created = ?3
                     WHERE person_id = ?4",
                    params![
                        person.uuid.to_string(),
                        person.voided,
                        person.date_created.to_rfc3339(),
                        id
                    ],
                )?;
                if updated == 0 {
                    return Err(RecordError::NotFound { kind: "person", id }.into());
                }
                // Component rows are rewritten on every save
                conn.execute("DELETE FROM person_name WHERE person_id = ?1", params![id])?;
                conn.execute(
                    "DELETE FROM person_address WHERE person_id = ?1",
                    params![id],
                )?;
                conn.execute(
                    "DELETE FROM person_attribute WHERE person_id = ?1",
                    params![id],
                )?;
                id
            }
        };

        for name in &person.names {
            conn.execute(
                "INSERT INTO person_name (person_id, given_name, middle_name, family_name, family_name2)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![id, name.given, name.middle, name.family, name.family2],
            )?;
        }

        for address in &person.addresses {
            conn.execute(
                "INSERT INTO person_address (person_id, address1, address2, address3, address4,
                    address5, address6, city_village, country, county_district, state_province,
                    postal_code)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    id,
                    address.address1,
                    address.address2,
                    address.address3,
                    address.address4,
                    address.address5,
                    address.address6,
                    address.city_village,
                    address.country,
                    address.county_district,
                    address.state_province,
                    address.postal_code
                ],
            )?;
        }

        for attribute in &person.attributes {
            conn.execute(
                "INSERT INTO person_attribute (person_id, attribute_type, value)
                 VALUES (?1, ?2, ?3)",
                params![id, attribute.attribute_type, attribute.value],
            )?;
        }

        Ok(())
    }

    async fn delete_person(&self, id: i64) -> StorageResult<()> {
        let conn = self.get_connection()?;
        conn.execute("DELETE FROM person_name WHERE person_id = ?1", params![id])?;
        conn.execute(
            "DELETE FROM person_address WHERE person_id = ?1",
            params![id],
        )?;
        conn.execute(
            "DELETE FROM person_attribute WHERE person_id = ?1",
            params![id],
        )?;
        let deleted = conn.execute("DELETE FROM person WHERE person_id = ?1", params![id])?;
        if deleted == 0 {
            return Err(RecordError::NotFound { kind: "person", id }.into());
        }
        Ok(())
    }

    // -- Providers -----------------------------------------------------------

    async fn provider(&self, id: i64) -> StorageResult<Option<Provider>> {
        let conn = self.get_connection()?;
        let raw = conn
            .query_row(
                &format!(
                    "SELECT {} FROM provider WHERE provider_id = ?1",
                    PROVIDER_COLUMNS
                ),
                params![id],
                provider_row,
            )
            .optional()?;
        raw.map(provider_from_row).transpose()
    }

    async fn save_provider(&self, provider: &mut Provider) -> StorageResult<()> {
        let conn = self.get_connection()?;
        match provider.id {
            None => {
                conn.execute(
                    "INSERT INTO provider (uuid, person_id, provider_role_id, identifier, retired, date_created)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        provider.uuid.to_string(),
                        provider.person_id,
                        provider.provider_role_id,
                        provider.identifier,
                        provider.retired,
                        provider.date_created.to_rfc3339()
                    ],
                )?;
                provider.id = Some(conn.last_insert_rowid());
            }
            Some(id) => {
                let updated = conn.execute(
                    "UPDATE provider SET uuid = ?1, person_id = ?2, provider_role_id = ?3,
                        identifier = ?4, retired = ?5, date_created = ?6
                     WHERE provider_id = ?7",
                    params![
                        provider.uuid.to_string(),
                        provider.person_id,
                        provider.provider_role_id,
                        provider.identifier,
                        provider.retired,
                        provider.date_created.to_rfc3339(),
                        id
                    ],
                )?;
                if updated == 0 {
                    return Err(RecordError::NotFound {
                        kind: "provider",
                        id,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    async fn delete_provider(&self, id: i64) -> StorageResult<()> {
        let conn = self.get_connection()?;
        let deleted = conn.execute("DELETE FROM provider WHERE provider_id = ?1", params![id])?;
        if deleted == 0 {
            return Err(RecordError::NotFound {
                kind: "provider",
                id,
            }
            .into());
        }
        Ok(())
    }

    async fn search_providers(&self, search: &ProviderSearch) -> StorageResult<Vec<Person>> {
        let conn = self.get_connection()?;
        let fragment = ProviderSearchQueryBuilder::build(search);
        tracing::debug!(sql = %fragment.sql, params = fragment.params.len(), "provider search");

        let mut stmt = conn.prepare(&fragment.sql)?;
        let values: Vec<Value> = fragment.params.iter().map(to_value).collect();
        let mut rows = stmt.query(params_from_iter(values))?;

        // The joins multiply rows per name/address/provider record; keep the
        // first occurrence of each person to preserve the sort order.
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            let person_id: i64 = row.get(0)?;
            if seen.insert(person_id) {
                ids.push(person_id);
            }
        }
        drop(rows);
        drop(stmt);

        let mut persons = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(person) = load_person(&conn, id)? {
                persons.push(person);
            }
        }
        Ok(persons)
    }

    async fn providers_for_person(
        &self,
        person_id: i64,
        include_retired: bool,
    ) -> StorageResult<Vec<Provider>> {
        let conn = self.get_connection()?;
        let sql = if include_retired {
            format!(
                "SELECT {} FROM provider WHERE person_id = ?1 ORDER BY provider_id",
                PROVIDER_COLUMNS
            )
        } else {
            format!(
                "SELECT {} FROM provider WHERE person_id = ?1 AND retired = 0 ORDER BY provider_id",
                PROVIDER_COLUMNS
            )
        };
        let mut stmt = conn.prepare(&sql)?;
        let raw_rows = stmt
            .query_map(params![person_id], provider_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raw_rows.into_iter().map(provider_from_row).collect()
    }

    async fn providers_with_roles(
        &self,
        role_ids: &[i64],
        include_retired: bool,
    ) -> StorageResult<Vec<Provider>> {
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_connection()?;
        let mut sql = format!(
            "SELECT {} FROM provider WHERE provider_role_id IN ({})",
            PROVIDER_COLUMNS,
            in_placeholders(role_ids.len(), 0)
        );
        if !include_retired {
            sql.push_str(" AND retired = 0");
        }
        sql.push_str(" ORDER BY provider_id");

        let mut stmt = conn.prepare(&sql)?;
        let raw_rows = stmt
            .query_map(params_from_iter(role_ids.iter()), provider_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raw_rows.into_iter().map(provider_from_row).collect()
    }

    // -- Provider suggestions ------------------------------------------------

    async fn provider_suggestion(&self, id: i64) -> StorageResult<Option<ProviderSuggestion>> {
        let conn = self.get_connection()?;
        let raw = conn
            .query_row(
                "SELECT provider_suggestion_id, uuid, name, relationship_type_id, NULL,
                        evaluator, criteria, retired, date_created
                 FROM provider_suggestion WHERE provider_suggestion_id = ?1",
                params![id],
                suggestion_row,
            )
            .optional()?;
        raw.map(provider_suggestion_from_row).transpose()
    }

    async fn provider_suggestion_by_uuid(
        &self,
        uuid: Uuid,
    ) -> StorageResult<Option<ProviderSuggestion>> {
        let conn = self.get_connection()?;
        let raw = conn
            .query_row(
                "SELECT provider_suggestion_id, uuid, name, relationship_type_id, NULL,
                        evaluator, criteria, retired, date_created
                 FROM provider_suggestion WHERE uuid = ?1",
                params![uuid.to_string()],
                suggestion_row,
            )
            .optional()?;
        raw.map(provider_suggestion_from_row).transpose()
    }

    async fn provider_suggestions_by_relationship_type(
        &self,
        relationship_type_id: i64,
    ) -> StorageResult<Vec<ProviderSuggestion>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT provider_suggestion_id, uuid, name, relationship_type_id, NULL,
                    evaluator, criteria, retired, date_created
             FROM provider_suggestion
             WHERE retired = 0 AND relationship_type_id = ?1
             ORDER BY provider_suggestion_id",
        )?;
        let raw_rows = stmt
            .query_map(params![relationship_type_id], suggestion_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raw_rows
            .into_iter()
            .map(provider_suggestion_from_row)
            .collect()
    }

    async fn save_provider_suggestion(
        &self,
        suggestion: &mut ProviderSuggestion,
    ) -> StorageResult<()> {
        let conn = self.get_connection()?;
        match suggestion.id {
            None => {
                conn.execute(
                    "INSERT INTO provider_suggestion
                        (uuid, name, relationship_type_id, evaluator, criteria, retired, date_created)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        suggestion.uuid.to_string(),
                        suggestion.name,
                        suggestion.relationship_type_id,
                        suggestion.evaluator,
                        suggestion.criteria,
                        suggestion.retired,
                        suggestion.date_created.to_rfc3339()
                    ],
                )?;
                suggestion.id = Some(conn.last_insert_rowid());
            }
            Some(id) => {
                let updated = conn.execute(
                    "UPDATE provider_suggestion SET uuid = ?1, name = ?2, relationship_type_id = ?3,
                        evaluator = ?4, criteria = ?5, retired = ?6, date_created = ?7
                     WHERE provider_suggestion_id = ?8",
                    params![
                        suggestion.uuid.to_string(),
                        suggestion.name,
                        suggestion.relationship_type_id,
                        suggestion.evaluator,
                        suggestion.criteria,
                        suggestion.retired,
                        suggestion.date_created.to_rfc3339(),
                        id
                    ],
                )?;
                if updated == 0 {
                    return Err(RecordError::NotFound {
                        kind: "provider_suggestion",
                        id,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    async fn delete_provider_suggestion(&self, id: i64) -> StorageResult<()> {
        let conn = self.get_connection()?;
        let deleted = conn.execute(
            "DELETE FROM provider_suggestion WHERE provider_suggestion_id = ?1",
            params![id],
        )?;
        if deleted == 0 {
            return Err(RecordError::NotFound {
                kind: "provider_suggestion",
                id,
            }
            .into());
        }
        Ok(())
    }

    // -- Supervision suggestions ---------------------------------------------

    async fn supervision_suggestion(
        &self,
        id: i64,
    ) -> StorageResult<Option<SupervisionSuggestion>> {
        let conn = self.get_connection()?;
        let raw = conn
            .query_row(
                "SELECT supervision_suggestion_id, uuid, name, provider_role_id, suggestion_type,
                        evaluator, criteria, retired, date_created
                 FROM supervision_suggestion WHERE supervision_suggestion_id = ?1",
                params![id],
                suggestion_row,
            )
            .optional()?;
        raw.map(supervision_suggestion_from_row).transpose()
    }

    async fn supervision_suggestion_by_uuid(
        &self,
        uuid: Uuid,
    ) -> StorageResult<Option<SupervisionSuggestion>> {
        let conn = self.get_connection()?;
        let raw = conn
            .query_row(
                "SELECT supervision_suggestion_id, uuid, name, provider_role_id, suggestion_type,
                        evaluator, criteria, retired, date_created
                 FROM supervision_suggestion WHERE uuid = ?1",
                params![uuid.to_string()],
                suggestion_row,
            )
            .optional()?;
        raw.map(supervision_suggestion_from_row).transpose()
    }

    async fn supervision_suggestions_by_role_and_type(
        &self,
        role_id: i64,
        suggestion_type: Option<SupervisionSuggestionType>,
    ) -> StorageResult<Vec<SupervisionSuggestion>> {
        let conn = self.get_connection()?;
        let mut sql = String::from(
            "SELECT supervision_suggestion_id, uuid, name, provider_role_id, suggestion_type,
                    evaluator, criteria, retired, date_created
             FROM supervision_suggestion
             WHERE retired = 0 AND provider_role_id = ?1",
        );
        let mut values: Vec<Value> = vec![Value::Integer(role_id)];
        if let Some(t) = suggestion_type {
            sql.push_str(" AND suggestion_type = ?2");
            values.push(Value::Text(t.as_str().to_string()));
        }
        sql.push_str(" ORDER BY supervision_suggestion_id");

        let mut stmt = conn.prepare(&sql)?;
        let raw_rows = stmt
            .query_map(params_from_iter(values), suggestion_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raw_rows
            .into_iter()
            .map(supervision_suggestion_from_row)
            .collect()
    }

    async fn save_supervision_suggestion(
        &self,
        suggestion: &mut SupervisionSuggestion,
    ) -> StorageResult<()> {
        let conn = self.get_connection()?;
        match suggestion.id {
            None => {
                conn.execute(
                    "INSERT INTO supervision_suggestion
                        (uuid, name, provider_role_id, suggestion_type, evaluator, criteria,
                         retired, date_created)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        suggestion.uuid.to_string(),
                        suggestion.name,
                        suggestion.provider_role_id,
                        suggestion.suggestion_type.as_str(),
                        suggestion.evaluator,
                        suggestion.criteria,
                        suggestion.retired,
                        suggestion.date_created.to_rfc3339()
                    ],
                )?;
                suggestion.id = Some(conn.last_insert_rowid());
            }
            Some(id) => {
                let updated = conn.execute(
                    "UPDATE supervision_suggestion SET uuid = ?1, name = ?2, provider_role_id = ?3,
                        suggestion_type = ?4, evaluator = ?5, criteria = ?6, retired = ?7,
                        date_created = ?8
                     WHERE supervision_suggestion_id = ?9",
                    params![
                        suggestion.uuid.to_string(),
                        suggestion.name,
                        suggestion.provider_role_id,
                        suggestion.suggestion_type.as_str(),
                        suggestion.evaluator,
                        suggestion.criteria,
                        suggestion.retired,
                        suggestion.date_created.to_rfc3339(),
                        id
                    ],
                )?;
                if updated == 0 {
                    return Err(RecordError::NotFound {
                        kind: "supervision_suggestion",
                        id,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    async fn delete_supervision_suggestion(&self, id: i64) -> StorageResult<()> {
        let conn = self.get_connection()?;
        let deleted = conn.execute(
            "DELETE FROM supervision_suggestion WHERE supervision_suggestion_id = ?1",
            params![id],
        )?;
        if deleted == 0 {
            return Err(RecordError::NotFound {
                kind: "supervision_suggestion",
                id,
            }
            .into());
        }
        Ok(())
    }
}

fn suggestion_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SuggestionRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}
