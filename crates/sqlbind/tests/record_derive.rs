//! End-to-end tests for `#[derive(Record)]`.

use sqlbind::{EntityMapper, MemoryRows, Record, Statement, Value, ValueKind};

#[derive(Clone, Debug, Default, PartialEq, Record)]
#[orm(table = "users")]
struct User {
    #[orm(primary_key)]
    id: i64,
    name: String,
    #[orm(column = "email_address")]
    email: Option<String>,
    active: bool,
    score: f64,
}

/// A type outside the core scalar set; rides the `Other` kind.
#[derive(Clone, Debug, Default, PartialEq)]
struct Tag(String);

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Tag(s)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Record)]
#[orm(table = "articles")]
struct Article {
    #[orm(primary_key)]
    id: i64,
    title: String,
    tag: Tag,
    draft_of: Option<Tag>,
}

#[allow(non_snake_case)]
#[derive(Clone, Debug, Default, Record)]
struct Login {
    UserID: i64,
    token: String,
}

#[test]
fn derived_metadata() {
    assert_eq!(User::table(), "users");

    let fields = User::fields();
    assert_eq!(fields.len(), 5);
    assert_eq!(fields[0].name, "id");
    assert_eq!(fields[0].kind, ValueKind::Int);
    assert!(fields[0].primary_key);
    assert_eq!(fields[2].column.as_deref(), Some("email_address"));
    assert_eq!(fields[3].kind, ValueKind::Bool);
    assert_eq!(fields[4].kind, ValueKind::Float);
}

#[test]
fn derived_table_falls_back_to_the_storage_name() {
    // No #[orm(table)]: the capitalized type name gains a leading underscore.
    assert_eq!(Login::table(), "_login");
}

#[test]
fn derived_columns_follow_the_storage_name_rule() {
    let mut mapper = EntityMapper::<Login>::new();
    let mapping = mapper.introspect(&Login::default());
    let columns: Vec<&str> = mapping.fields().iter().map(|f| f.column.as_str()).collect();
    assert_eq!(columns, vec!["_user_i_d", "token"]);
}

#[test]
fn value_of_and_apply() {
    let mut user = User {
        id: 1,
        name: "alice".into(),
        email: None,
        active: true,
        score: 2.5,
    };

    assert_eq!(user.value_of("id"), Value::Int(1));
    assert_eq!(user.value_of("email"), Value::Null);
    assert_eq!(user.value_of("nope"), Value::Null);

    user.apply("email", Value::Text("a@example.com".into()));
    user.apply("active", Value::Bool(false));
    user.apply("nope", Value::Int(9));
    assert_eq!(user.email.as_deref(), Some("a@example.com"));
    assert!(!user.active);
}

#[test]
fn other_kind_round_trips_through_strings() {
    let article = Article {
        id: 4,
        title: "intro".into(),
        tag: Tag("rust".into()),
        draft_of: None,
    };

    assert_eq!(article.value_of("tag"), Value::Other("rust".into()));
    assert_eq!(article.value_of("draft_of"), Value::Null);

    let mut scanned = Article::default();
    scanned.apply("tag", Value::Other("sql".into()));
    scanned.apply("draft_of", Value::Other("old".into()));
    assert_eq!(scanned.tag, Tag("sql".into()));
    assert_eq!(scanned.draft_of, Some(Tag("old".into())));
}

#[test]
fn introspect_build_scan_round_trip() {
    let original = User {
        id: 7,
        name: "alice".into(),
        email: Some("a@example.com".into()),
        active: true,
        score: 3.5,
    };

    let mut mapper = EntityMapper::<User>::new();
    let mapping = mapper.introspect(&original).clone();

    let (sql, params) = mapping.insert_statement().build();
    assert_eq!(
        sql,
        "INSERT INTO users (id, name, email_address, active, score) VALUES (?, ?, ?, ?, ?) "
    );

    let mut cursor = MemoryRows::new(mapping.present_columns().to_vec(), vec![params]);
    let restored = mapper.scan_records(&mut cursor).unwrap().remove(0);
    assert_eq!(restored, original);
    assert!(cursor.is_closed());
}

#[test]
fn sparse_update_from_a_patch_record() {
    let patch = User {
        id: 7,
        name: "renamed".into(),
        ..User::default()
    };

    let mut mapper = EntityMapper::<User>::new();
    let mapping = mapper.introspect(&patch);
    let (key_column, key_value) = mapping.primary_key().cloned().unwrap();

    let (sql, params) = mapping
        .update_statement()
        .where_bind(&format!("{key_column} = ?"), key_value)
        .build();
    assert_eq!(sql, "UPDATE users SET name = ? WHERE id = ? ");
    assert_eq!(
        params,
        vec![Value::Text("renamed".into()), Value::Int(7)]
    );
}
