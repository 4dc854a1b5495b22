//! UPDATE statement builder.

use crate::builder::statement::StatementBuilder;
use crate::builder::traits::Statement;
use crate::value::Value;

/// UPDATE builder.
///
/// [`set`](UpdateBuilder::set) takes column-value pairs and binds the value
/// itself, so the assignment list and the parameter sequence can never
/// drift apart. Values are bound unconditionally (`Null` sets the column
/// to NULL); sparse updates are built by simply not calling `set` for a
/// column.
#[must_use]
#[derive(Debug)]
pub struct UpdateBuilder {
    core: StatementBuilder,
    set_opened: bool,
}

impl UpdateBuilder {
    /// Open an update statement for the given table.
    pub fn new(table: &str) -> Self {
        let mut core = StatementBuilder::new();
        core.push("UPDATE ");
        core.push(table);
        core.push(" ");
        Self {
            core,
            set_opened: false,
        }
    }

    /// Append `SET col = ?` (or `, col = ?` after the first) and bind the
    /// value.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        if self.set_opened {
            self.core.push(", ");
        } else {
            self.core.push("SET ");
            self.set_opened = true;
        }
        self.core.push(column);
        self.core.push(" = ?");
        self.core.push_param(value.into());
        self
    }
}

impl Statement for UpdateBuilder {
    fn core(&self) -> &StatementBuilder {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StatementBuilder {
        &mut self.core
    }
}
