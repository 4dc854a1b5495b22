//! Entity mapping engine.
//!
//! A record type declares its shape once — field names, resolved columns,
//! value kinds, primary-key flag — through the [`Record`] trait (usually
//! via `#[derive(Record)]`). An [`EntityMapper`] derives and memoizes an
//! [`EntityMapping`] from that shape plus one record instance, then reuses
//! it to turn cursor rows back into records or generic maps, and to build
//! sparse write statements over the fields that actually hold values.

use std::collections::HashMap;
use std::marker::PhantomData;

use crate::builder::{InsertBuilder, UpdateBuilder};
#[cfg(test)]
use crate::builder::Statement;
use crate::error::OrmResult;
use crate::ident::storage_name;
use crate::row::RowCursor;
use crate::value::{Value, ValueKind};

/// Per-field configuration supplied by a record definition.
///
/// The column is explicit or derived from the field name via
/// [`storage_name`]; the primary-key marker is a typed flag.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    /// Field identifier in the record type.
    pub name: String,
    /// Explicit storage column, if any.
    pub column: Option<String>,
    /// Declared value kind.
    pub kind: ValueKind,
    /// Whether this field holds the record's unique identifier.
    pub primary_key: bool,
}

impl FieldSpec {
    /// Create a field spec with a derived column and no primary-key flag.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            column: None,
            kind,
            primary_key: false,
        }
    }

    /// Name the storage column explicitly.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Mark this field as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// One resolved field entry of an [`EntityMapping`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldMapping {
    /// Field identifier in the record type.
    pub field: String,
    /// Resolved storage column.
    pub column: String,
    /// Declared value kind.
    pub kind: ValueKind,
    /// Whether this field holds the record's unique identifier.
    pub primary_key: bool,
}

/// A record shape with a registration-time mapping table.
///
/// Derivable via `#[derive(Record)]` with `#[orm(...)]` attributes; manual
/// implementations follow the same contract. `Default` supplies the fresh
/// instance scanning writes into.
pub trait Record: Default {
    /// Storage table name. Derived impls fall back to
    /// `storage_name(<type name>)` when no table is named.
    fn table() -> String;

    /// The per-field configuration, in declaration order.
    fn fields() -> Vec<FieldSpec>;

    /// Read a field's current value. Unknown fields read as `Null`.
    fn value_of(&self, field: &str) -> Value;

    /// Assign a coerced value into a field. Unknown fields are ignored.
    fn apply(&mut self, field: &str, value: Value);
}

/// Derived mapping for one record shape and instance.
#[derive(Clone, Debug)]
pub struct EntityMapping {
    table: String,
    fields: Vec<FieldMapping>,
    present_columns: Vec<String>,
    present_values: Vec<Value>,
    primary_key: Option<(String, Value)>,
}

impl EntityMapping {
    /// The derived table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The resolved field entries, in declaration order.
    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }

    /// Columns whose value was non-default at introspection time.
    pub fn present_columns(&self) -> &[String] {
        &self.present_columns
    }

    /// Values parallel to [`present_columns`](EntityMapping::present_columns).
    pub fn present_values(&self) -> &[Value] {
        &self.present_values
    }

    /// The primary-key column and its value, if a field is marked.
    pub fn primary_key(&self) -> Option<&(String, Value)> {
        self.primary_key.as_ref()
    }

    /// Build a sparse INSERT touching only the not-empty columns.
    pub fn insert_statement(&self) -> InsertBuilder {
        let cols: Vec<&str> = self.present_columns.iter().map(String::as_str).collect();
        crate::builder::insert(&self.table)
            .columns(&cols)
            .values(self.present_values.clone())
    }

    /// Build a sparse UPDATE setting the not-empty, non-key columns.
    ///
    /// The caller adds the row predicate; [`primary_key`] supplies the
    /// usual one.
    ///
    /// [`primary_key`]: EntityMapping::primary_key
    pub fn update_statement(&self) -> UpdateBuilder {
        let key_column = self.primary_key.as_ref().map(|(col, _)| col.as_str());
        let mut qb = crate::builder::update(&self.table);
        for (col, value) in self.present_columns.iter().zip(&self.present_values) {
            if Some(col.as_str()) == key_column {
                continue;
            }
            qb = qb.set(col, value.clone());
        }
        qb
    }
}

/// Maps one record shape to and from stored rows.
///
/// The mapping is derived lazily and memoized for the mapper's lifetime;
/// a mapper serves exactly one record shape and one caller at a time.
#[derive(Debug, Default)]
pub struct EntityMapper<R: Record> {
    mapping: Option<EntityMapping>,
    _shape: PhantomData<R>,
}

impl<R: Record> EntityMapper<R> {
    /// Create a mapper with no derived mapping yet.
    pub fn new() -> Self {
        Self {
            mapping: None,
            _shape: PhantomData,
        }
    }

    /// Derive (or reuse) the mapping from the given record instance.
    ///
    /// Memoized: after the first call, the instance is ignored until
    /// [`reintrospect`](EntityMapper::reintrospect).
    pub fn introspect(&mut self, record: &R) -> &EntityMapping {
        self.mapping.get_or_insert_with(|| derive_mapping(record))
    }

    /// Discard any memoized mapping and derive it again.
    pub fn reintrospect(&mut self, record: &R) -> &EntityMapping {
        self.mapping.insert(derive_mapping(record))
    }

    fn mapping_for_scan(&mut self) -> &EntityMapping {
        self.mapping
            .get_or_insert_with(|| derive_mapping(&R::default()))
    }

    /// Convert one row into a freshly allocated record.
    ///
    /// Columns match field mappings by exact, case-sensitive name; matched
    /// values are coerced to the field's kind and applied. Unmatched result
    /// columns are ignored; fields without a result column keep their
    /// default.
    pub fn row_to_record(&mut self, columns: &[String], values: &[Value]) -> R {
        let mapping = self.mapping_for_scan();
        let mut record = R::default();
        for (idx, column) in columns.iter().enumerate() {
            let Some(raw) = values.get(idx) else {
                continue;
            };
            if let Some(fm) = mapping.fields.iter().find(|f| &f.column == column) {
                record.apply(&fm.field, fm.kind.coerce(raw.clone()));
            }
        }
        record
    }

    /// Scan every row into a record, closing the cursor when done.
    pub fn scan_records(&mut self, cursor: &mut impl RowCursor) -> OrmResult<Vec<R>> {
        self.scan_records_with(cursor, true)
    }

    /// Scan every row into a record.
    ///
    /// When `close_cursor` is false the caller retains cursor ownership and
    /// must release it. A cursor failure aborts the scan, discards the
    /// rows accumulated so far, and propagates the error; the cursor is
    /// still closed on failure when closing is enabled.
    pub fn scan_records_with(
        &mut self,
        cursor: &mut impl RowCursor,
        close_cursor: bool,
    ) -> OrmResult<Vec<R>> {
        let columns = cursor.columns();
        let mut buf = vec![Value::Null; columns.len()];
        let mut records = Vec::new();
        while cursor.advance() {
            if let Err(err) = cursor.scan(&mut buf) {
                if close_cursor {
                    cursor.close();
                }
                return Err(err);
            }
            records.push(self.row_to_record(&columns, &buf));
        }
        if close_cursor {
            cursor.close();
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(rows = records.len(), table = %self.mapping_for_scan().table, "scanned records");
        Ok(records)
    }

    /// Scan every row into a column-name-to-raw-value map, closing the
    /// cursor when done.
    pub fn scan_maps(
        &mut self,
        cursor: &mut impl RowCursor,
    ) -> OrmResult<Vec<HashMap<String, Value>>> {
        self.scan_maps_with(cursor, true)
    }

    /// Scan every row into a map without any kind coercion.
    ///
    /// Same ownership and failure policy as
    /// [`scan_records_with`](EntityMapper::scan_records_with).
    pub fn scan_maps_with(
        &mut self,
        cursor: &mut impl RowCursor,
        close_cursor: bool,
    ) -> OrmResult<Vec<HashMap<String, Value>>> {
        let columns = cursor.columns();
        let mut buf = vec![Value::Null; columns.len()];
        let mut rows = Vec::new();
        while cursor.advance() {
            if let Err(err) = cursor.scan(&mut buf) {
                if close_cursor {
                    cursor.close();
                }
                return Err(err);
            }
            let row: HashMap<String, Value> =
                columns.iter().cloned().zip(buf.iter().cloned()).collect();
            rows.push(row);
        }
        if close_cursor {
            cursor.close();
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(rows = rows.len(), "scanned maps");
        Ok(rows)
    }
}

fn derive_mapping<R: Record>(record: &R) -> EntityMapping {
    let specs = R::fields();
    let mut fields = Vec::with_capacity(specs.len());
    let mut present_columns = Vec::new();
    let mut present_values = Vec::new();
    let mut primary_key = None;

    for spec in specs {
        let column = spec
            .column
            .clone()
            .unwrap_or_else(|| storage_name(&spec.name));
        let value = record.value_of(&spec.name);
        if spec.primary_key && primary_key.is_none() {
            primary_key = Some((column.clone(), value.clone()));
        }
        if !value.is_default() {
            present_columns.push(column.clone());
            present_values.push(value);
        }
        fields.push(FieldMapping {
            field: spec.name,
            column,
            kind: spec.kind,
            primary_key: spec.primary_key,
        });
    }

    EntityMapping {
        table: R::table(),
        fields,
        present_columns,
        present_values,
        primary_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OrmError, OrmResult};
    use crate::row::MemoryRows;
    use crate::value::FromValue;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct User {
        id: i64,
        name: String,
        email: Option<String>,
        active: bool,
        score: f64,
    }

    impl Record for User {
        fn table() -> String {
            "users".to_string()
        }

        fn fields() -> Vec<FieldSpec> {
            vec![
                FieldSpec::new("id", ValueKind::Int).primary_key(),
                FieldSpec::new("name", ValueKind::Text),
                FieldSpec::new("email", ValueKind::Text).with_column("email_address"),
                FieldSpec::new("active", ValueKind::Bool),
                FieldSpec::new("score", ValueKind::Float),
            ]
        }

        fn value_of(&self, field: &str) -> Value {
            match field {
                "id" => self.id.into(),
                "name" => self.name.clone().into(),
                "email" => self.email.clone().into(),
                "active" => self.active.into(),
                "score" => self.score.into(),
                _ => Value::Null,
            }
        }

        fn apply(&mut self, field: &str, value: Value) {
            match field {
                "id" => self.id = FromValue::from_value(value),
                "name" => self.name = FromValue::from_value(value),
                "email" => self.email = FromValue::from_value(value),
                "active" => self.active = FromValue::from_value(value),
                "score" => self.score = FromValue::from_value(value),
                _ => {}
            }
        }
    }

    fn sample_user() -> User {
        User {
            id: 7,
            name: "alice".into(),
            email: Some("a@example.com".into()),
            active: true,
            score: 3.5,
        }
    }

    #[test]
    fn mapping_resolves_columns_and_key() {
        let mut mapper = EntityMapper::<User>::new();
        let mapping = mapper.introspect(&sample_user());

        assert_eq!(mapping.table(), "users");
        let columns: Vec<&str> = mapping.fields().iter().map(|f| f.column.as_str()).collect();
        assert_eq!(columns, vec!["id", "name", "email_address", "active", "score"]);
        assert_eq!(
            mapping.primary_key(),
            Some(&("id".to_string(), Value::Int(7)))
        );
    }

    #[test]
    fn not_empty_subset_skips_defaults() {
        let user = User {
            id: 7,
            name: "alice".into(),
            ..User::default()
        };
        let mut mapper = EntityMapper::<User>::new();
        let mapping = mapper.introspect(&user);
        assert_eq!(mapping.present_columns(), &["id", "name"]);
        assert_eq!(
            mapping.present_values(),
            &[Value::Int(7), Value::Text("alice".into())]
        );
    }

    #[test]
    fn introspection_is_memoized_until_forced() {
        let mut mapper = EntityMapper::<User>::new();
        mapper.introspect(&sample_user());

        let other = User {
            id: 99,
            ..User::default()
        };
        assert_eq!(
            mapper.introspect(&other).primary_key(),
            Some(&("id".to_string(), Value::Int(7)))
        );
        assert_eq!(
            mapper.reintrospect(&other).primary_key(),
            Some(&("id".to_string(), Value::Int(99)))
        );
    }

    #[test]
    fn insert_statement_covers_present_columns() {
        let mut mapper = EntityMapper::<User>::new();
        let (sql, params) = mapper.introspect(&sample_user()).insert_statement().build();
        assert_eq!(
            sql,
            "INSERT INTO users (id, name, email_address, active, score) VALUES (?, ?, ?, ?, ?) "
        );
        assert_eq!(params.len(), 5);
        assert_eq!(params[2], Value::Text("a@example.com".into()));
    }

    #[test]
    fn update_statement_excludes_the_key() {
        let mut mapper = EntityMapper::<User>::new();
        let mapping = mapper.introspect(&sample_user());
        let (key_column, key_value) = mapping.primary_key().cloned().unwrap();
        let qb = mapping
            .update_statement()
            .where_bind(&format!("{key_column} = ?"), key_value);
        let (sql, params) = qb.build();
        assert_eq!(
            sql,
            "UPDATE users SET name = ?, email_address = ?, active = ?, score = ? WHERE id = ? "
        );
        assert_eq!(params.last(), Some(&Value::Int(7)));
    }

    #[test]
    fn row_to_record_ignores_unknown_columns() {
        let mut mapper = EntityMapper::<User>::new();
        let columns = vec![
            "id".to_string(),
            "mystery".to_string(),
            "name".to_string(),
        ];
        let values = vec![
            Value::Int(3),
            Value::Text("ignored".into()),
            Value::Text("bob".into()),
        ];
        let user = mapper.row_to_record(&columns, &values);
        assert_eq!(user.id, 3);
        assert_eq!(user.name, "bob");
        assert_eq!(user.email, None);
    }

    #[test]
    fn scan_records_closes_the_cursor() {
        let mut cursor = MemoryRows::new(
            vec!["id".into(), "name".into()],
            vec![
                vec![Value::Int(1), Value::Text("a".into())],
                vec![Value::Int(2), Value::Text("b".into())],
            ],
        );
        let mut mapper = EntityMapper::<User>::new();
        let users = mapper.scan_records(&mut cursor).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].id, 2);
        assert!(cursor.is_closed());
    }

    #[test]
    fn scan_records_can_leave_the_cursor_open() {
        let mut cursor = MemoryRows::new(vec!["id".into()], vec![vec![Value::Int(1)]]);
        let mut mapper = EntityMapper::<User>::new();
        let users = mapper.scan_records_with(&mut cursor, false).unwrap();
        assert_eq!(users.len(), 1);
        assert!(!cursor.is_closed());
    }

    #[test]
    fn scan_maps_keeps_raw_values() {
        let mut cursor = MemoryRows::new(
            vec!["id".into(), "payload".into()],
            vec![vec![Value::Int(1), Value::Other("{}".into())]],
        );
        let mut mapper = EntityMapper::<User>::new();
        let rows = mapper.scan_maps(&mut cursor).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["payload"], Value::Other("{}".into()));
        assert!(cursor.is_closed());
    }

    /// A cursor whose second row fails to read.
    struct FlakyCursor {
        row: usize,
        closed: bool,
    }

    impl RowCursor for FlakyCursor {
        fn columns(&self) -> Vec<String> {
            vec!["id".into()]
        }

        fn advance(&mut self) -> bool {
            self.row += 1;
            self.row <= 2
        }

        fn scan(&mut self, out: &mut [Value]) -> OrmResult<()> {
            if self.row == 2 {
                return Err(OrmError::cursor("connection reset"));
            }
            out[0] = Value::Int(self.row as i64);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[test]
    fn mid_scan_failure_discards_rows_and_closes() {
        let mut cursor = FlakyCursor { row: 0, closed: false };
        let mut mapper = EntityMapper::<User>::new();
        let err = mapper.scan_records(&mut cursor).unwrap_err();
        assert!(err.is_cursor());
        assert!(cursor.closed);
    }

    #[test]
    fn mid_scan_failure_respects_caller_ownership() {
        let mut cursor = FlakyCursor { row: 0, closed: false };
        let mut mapper = EntityMapper::<User>::new();
        assert!(mapper.scan_maps_with(&mut cursor, false).is_err());
        assert!(!cursor.closed);
    }

    #[test]
    fn insert_round_trip_reproduces_values() {
        let original = sample_user();
        let mut mapper = EntityMapper::<User>::new();
        let mapping = mapper.introspect(&original).clone();

        let (_, params) = mapping.insert_statement().build();
        let mut cursor = MemoryRows::new(mapping.present_columns().to_vec(), vec![params]);

        let restored = mapper.scan_records(&mut cursor).unwrap().remove(0);
        assert_eq!(restored, original);
    }
}
