//! The chaining surface shared by all statement builders.

use crate::builder::StatementBuilder;
use crate::error::OrmResult;
use crate::value::Value;

/// Condition-appending operations common to every statement kind.
///
/// Each specialized builder wraps a [`StatementBuilder`] and exposes this
/// surface through its `core` accessors; all methods consume and return the
/// builder to support chaining.
pub trait Statement: Sized {
    /// The underlying statement state.
    fn core(&self) -> &StatementBuilder;

    /// The underlying statement state, mutably.
    fn core_mut(&mut self) -> &mut StatementBuilder;

    /// Add a condition with one bound value.
    ///
    /// No-op when the value is absent (`Null` or empty string); emits
    /// `WHERE` once on the first surviving condition and auto-joins
    /// successive conditions with `AND`.
    fn where_bind(mut self, fragment: &str, value: impl Into<Value>) -> Self {
        self.core_mut().push_where(fragment, value.into());
        self
    }

    /// Add an IN condition (`fragment` convention: `"col IN (?)"`).
    ///
    /// No-op on an empty list. Does not emit `WHERE` on the caller's
    /// behalf.
    fn in_list<T: Into<Value>>(
        mut self,
        fragment: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        self.core_mut()
            .push_in(fragment, values.into_iter().map(Into::into).collect());
        self
    }

    /// Add a LIKE condition; `?` markers become `CONCAT('%', ?, '%')`.
    fn like(mut self, fragment: &str, value: impl Into<Value>) -> Self {
        self.core_mut().push_like(fragment, value.into());
        self
    }

    /// Write an explicit `OR` connector for the next condition.
    fn or(mut self) -> Self {
        self.core_mut().push_or();
        self
    }

    /// Append a complete join clause verbatim.
    fn join(mut self, fragment: &str) -> Self {
        self.core_mut().push_join(fragment, Vec::new());
        self
    }

    /// Append a join clause with bound values for its predicates.
    fn join_bind(mut self, fragment: &str, values: Vec<Value>) -> Self {
        self.core_mut().push_join(fragment, values);
        self
    }

    /// Append arbitrary statement text verbatim (ORDER BY, LIMIT, ...).
    fn append(mut self, fragment: &str) -> Self {
        self.core_mut().push(fragment);
        self
    }

    /// Return the accumulated text and parameters. Repeatable.
    fn build(&self) -> (String, Vec<Value>) {
        self.core().build()
    }

    /// Check placeholder count against bound parameter count.
    fn validate(&self) -> OrmResult<()> {
        self.core().validate()
    }

    /// Debug helper for the current statement text.
    fn to_sql(&self) -> String {
        self.core().sql().to_string()
    }
}

impl Statement for StatementBuilder {
    fn core(&self) -> &StatementBuilder {
        self
    }

    fn core_mut(&mut self) -> &mut StatementBuilder {
        self
    }
}
