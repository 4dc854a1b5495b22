//! # sqlbind
//!
//! A chainable SQL statement assembler paired with a lightweight row
//! mapper.
//!
//! ## Features
//!
//! - **Parameters stay out of the text**: builders accumulate statement
//!   text and bound [`Value`]s separately; `?` is the only placeholder
//! - **Automatic connectors**: successive conditions are joined with
//!   `AND`; absent filter values simply drop out
//! - **Record mapping**: a record declares its shape once (usually via
//!   `#[derive(Record)]`) and an [`EntityMapper`] converts cursor rows
//!   into records or generic maps, and builds sparse writes
//! - **No execution layer**: statements and parameters are handed to
//!   whatever driver the surrounding system uses; results come back
//!   through the [`RowCursor`] seam
//!
//! ## Building statements
//!
//! ```ignore
//! use sqlbind::prelude::*;
//!
//! let (sql, params) = sqlbind::select(&["id", "name"])
//!     .from("users")
//!     .where_bind("age = ?", 30)
//!     .where_bind("city = ?", "NYC")
//!     .in_list("id IN (?)", [1i64, 2, 3])
//!     .append("ORDER BY id")
//!     .build();
//! ```
//!
//! ## Mapping rows
//!
//! ```ignore
//! use sqlbind::prelude::*;
//!
//! #[derive(Default, Record)]
//! #[orm(table = "users")]
//! struct User {
//!     #[orm(primary_key)]
//!     id: i64,
//!     name: String,
//!     #[orm(column = "email_address")]
//!     email: Option<String>,
//! }
//!
//! let mut mapper = EntityMapper::<User>::new();
//! let users = mapper.scan_records(&mut cursor)?;
//! ```

pub mod builder;
pub mod error;
pub mod ident;
pub mod mapper;
pub mod prelude;
pub mod row;
pub mod value;

pub use builder::{
    DeleteBuilder, InsertBuilder, SelectBuilder, Statement, StatementBuilder, UpdateBuilder,
    delete, delete_from, insert, select, update,
};
pub use error::{OrmError, OrmResult};
pub use ident::storage_name;
pub use mapper::{EntityMapper, EntityMapping, FieldMapping, FieldSpec, Record};
pub use row::{MemoryRows, RowCursor, rows_to_json_string};
pub use value::{FromValue, Value, ValueKind};

#[cfg(feature = "derive")]
pub use sqlbind_derive::Record;

/// Process-wide version marker.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
