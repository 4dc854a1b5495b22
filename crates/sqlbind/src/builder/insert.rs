//! INSERT statement builder.

use crate::builder::statement::StatementBuilder;
use crate::builder::traits::Statement;
use crate::value::Value;

/// INSERT builder.
///
/// Unlike the condition surface, [`values`](InsertBuilder::values) binds
/// every positional value it is given, absent ones included: a column named
/// in the column list must receive exactly one placeholder, so inserts are
/// explicit rather than sparse-by-omission.
#[must_use]
#[derive(Debug)]
pub struct InsertBuilder {
    core: StatementBuilder,
}

impl InsertBuilder {
    /// Open an insert statement for the given table.
    pub fn new(table: &str) -> Self {
        let mut core = StatementBuilder::new();
        core.push("INSERT INTO ");
        core.push(table);
        core.push(" ");
        Self { core }
    }

    /// Append the parenthesized column list.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.core.push("(");
        self.core.push(&cols.join(", "));
        self.core.push(") ");
        self
    }

    /// Append `VALUES (?, ...)` with one placeholder per value and bind
    /// them all, in the exact order given.
    pub fn values(mut self, values: Vec<Value>) -> Self {
        self.core.push("VALUES (");
        self.core.push(&vec!["?"; values.len()].join(", "));
        self.core.push(") ");
        for value in values {
            self.core.push_param(value);
        }
        self
    }
}

impl Statement for InsertBuilder {
    fn core(&self) -> &StatementBuilder {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StatementBuilder {
        &mut self.core
    }
}
