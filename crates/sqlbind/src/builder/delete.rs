//! DELETE statement builder.

use crate::builder::statement::StatementBuilder;
use crate::builder::traits::Statement;

/// DELETE builder; table and conditions come from the shared [`Statement`]
/// surface (or use [`from_table`](DeleteBuilder::from_table)).
#[must_use]
#[derive(Debug)]
pub struct DeleteBuilder {
    core: StatementBuilder,
}

impl DeleteBuilder {
    /// Open a delete statement (the `DELETE` keyword only).
    pub fn new() -> Self {
        let mut core = StatementBuilder::new();
        core.push("DELETE ");
        Self { core }
    }

    /// Open a delete statement with the table already named.
    pub fn from_table(table: &str) -> Self {
        let mut core = StatementBuilder::new();
        core.push("DELETE FROM ");
        core.push(table);
        core.push(" ");
        Self { core }
    }
}

impl Default for DeleteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Statement for DeleteBuilder {
    fn core(&self) -> &StatementBuilder {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StatementBuilder {
        &mut self.core
    }
}
