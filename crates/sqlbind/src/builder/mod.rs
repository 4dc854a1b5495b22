//! Chainable statement builders.
//!
//! Builders accumulate statement text and bound parameters separately and
//! never interpolate values into the text; `?` is the single positional
//! placeholder marker. Successive condition fragments are joined with an
//! automatic `AND` managed by a small connector state machine
//! ([`StatementBuilder`]); an explicit [`Statement::or`] overrides the
//! default joining for the following condition.
//!
//! # Usage
//!
//! ```ignore
//! use sqlbind::builder::{self, Statement};
//!
//! let (sql, params) = builder::select(&["id", "name"])
//!     .from("users")
//!     .where_bind("age = ?", 30)
//!     .where_bind("city = ?", "NYC")
//!     .build();
//! // sql:    SELECT id, name FROM users a WHERE age = ? AND city = ?
//! // params: [Int(30), Text("NYC")]
//! ```

mod delete;
mod insert;
mod select;
mod statement;
mod traits;
mod update;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use statement::StatementBuilder;
pub use traits::Statement;
pub use update::UpdateBuilder;

/// Create a SELECT builder with the given column list.
///
/// # Example
/// ```ignore
/// let qb = sqlbind::select(&["id", "name"]).from("users");
/// ```
pub fn select(cols: &[&str]) -> SelectBuilder {
    SelectBuilder::new().select(cols)
}

/// Create an INSERT builder for the given table.
///
/// # Example
/// ```ignore
/// let qb = sqlbind::insert("users")
///     .columns(&["name", "age"])
///     .values(vec!["alice".into(), 30i64.into()]);
/// ```
pub fn insert(table: &str) -> InsertBuilder {
    InsertBuilder::new(table)
}

/// Create an UPDATE builder for the given table.
///
/// # Example
/// ```ignore
/// let qb = sqlbind::update("users")
///     .set("status", "inactive")
///     .where_bind("id = ?", 7);
/// ```
pub fn update(table: &str) -> UpdateBuilder {
    UpdateBuilder::new(table)
}

/// Create a DELETE builder.
///
/// Only the `DELETE` keyword is emitted; supply the table via
/// [`Statement::append`] or use [`delete_from`].
pub fn delete() -> DeleteBuilder {
    DeleteBuilder::new()
}

/// Create a DELETE builder with the table already named.
pub fn delete_from(table: &str) -> DeleteBuilder {
    DeleteBuilder::from_table(table)
}
