//! Result-cursor abstraction and row utilities.
//!
//! Executing a statement belongs to the surrounding system; this crate only
//! consumes the cursor it hands back. [`RowCursor`] is that seam, shaped
//! like a relational driver's result set: a columns list, row-at-a-time
//! advancement, positional reads, and explicit release.

use std::collections::HashMap;

use crate::error::{OrmError, OrmResult};
use crate::value::Value;

/// A positional row source over a fixed column list.
///
/// Ownership transfers explicitly: either the scanning operation closes the
/// cursor (the default) or the caller keeps it and must close it, never
/// both.
pub trait RowCursor {
    /// The result column names, in positional order.
    fn columns(&self) -> Vec<String>;

    /// Advance to the next row; false once exhausted.
    fn advance(&mut self) -> bool;

    /// Read the current row into `out`, one value per column.
    ///
    /// `out` has exactly `columns().len()` slots when called by this
    /// crate's scanning operations.
    fn scan(&mut self, out: &mut [Value]) -> OrmResult<()>;

    /// Release the cursor. Idempotent.
    fn close(&mut self);
}

/// An in-memory [`RowCursor`] over pre-materialized rows.
///
/// Useful in tests and anywhere rows arrive detached from a live driver.
#[derive(Debug, Default)]
pub struct MemoryRows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    cursor: usize,
    started: bool,
    closed: bool,
}

impl MemoryRows {
    /// Create a cursor over the given columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows,
            cursor: 0,
            started: false,
            closed: false,
        }
    }

    /// Whether [`close`](RowCursor::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl RowCursor for MemoryRows {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn advance(&mut self) -> bool {
        if self.closed {
            return false;
        }
        if self.started {
            self.cursor += 1;
        }
        self.started = true;
        self.cursor < self.rows.len()
    }

    fn scan(&mut self, out: &mut [Value]) -> OrmResult<()> {
        let row = self
            .rows
            .get(self.cursor)
            .ok_or_else(|| OrmError::cursor("scan past end of rows"))?;
        if row.len() != out.len() {
            return Err(OrmError::cursor(format!(
                "row width {} != target width {}",
                row.len(),
                out.len()
            )));
        }
        out.clone_from_slice(row);
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Render scanned row maps as a JSON array string.
pub fn rows_to_json_string(rows: &[HashMap<String, Value>]) -> OrmResult<String> {
    Ok(serde_json::to_string(rows)?)
}
