//! Convenient imports for typical `sqlbind` usage.
//!
//! This module is intentionally small and focused on the most common APIs so
//! call sites can start with:
//!
//! ```ignore
//! use sqlbind::prelude::*;
//! ```

pub use crate::{
    EntityMapper, FieldSpec, OrmError, OrmResult, Record, RowCursor, Statement, Value, ValueKind,
    delete, delete_from, insert, select, update,
};
