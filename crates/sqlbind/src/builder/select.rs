//! SELECT statement builder.

use crate::builder::statement::StatementBuilder;
use crate::builder::traits::Statement;

/// SELECT builder; conditions and joins come from the shared [`Statement`]
/// surface.
#[must_use]
#[derive(Debug, Default)]
pub struct SelectBuilder {
    core: StatementBuilder,
}

impl SelectBuilder {
    /// Create an empty SELECT builder.
    pub fn new() -> Self {
        Self {
            core: StatementBuilder::new(),
        }
    }

    /// Append `SELECT col1, col2, ...`.
    pub fn select(mut self, cols: &[&str]) -> Self {
        self.core.push("SELECT ");
        self.core.push(&cols.join(", "));
        self
    }

    /// Append the from-clause. The primary table gets the fixed alias `a`.
    pub fn from(mut self, table: &str) -> Self {
        self.core.push(" FROM ");
        self.core.push(table);
        self.core.push(" a ");
        self
    }
}

impl Statement for SelectBuilder {
    fn core(&self) -> &StatementBuilder {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StatementBuilder {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_from() {
        let qb = SelectBuilder::new().select(&["id", "name"]).from("users");
        assert_eq!(qb.to_sql(), "SELECT id, name FROM users a ");
    }

    #[test]
    fn select_star() {
        let qb = SelectBuilder::new().select(&["*"]).from("users");
        assert_eq!(qb.to_sql(), "SELECT * FROM users a ");
    }
}
