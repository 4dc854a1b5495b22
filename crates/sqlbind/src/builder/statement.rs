//! The shared statement state machine.

use crate::error::{OrmError, OrmResult};
use crate::value::Value;

/// Connector bookkeeping between condition fragments.
///
/// Modeled as a single enum so the invalid flag combinations of a
/// two-boolean encoding (pending AND stacked on an already-written OR)
/// cannot be represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LinkState {
    /// No connector is owed (start of a clause).
    Start,
    /// A condition was appended; the next condition is auto-joined with `AND`.
    PendingAnd,
    /// An explicit `OR` was just written; the next condition joins bare.
    OrEmitted,
}

/// Accumulated statement text, bound parameters, and condition-linking state.
///
/// A builder owns its state exclusively and covers one logical statement;
/// it is not meant to be shared across threads or reused after [`build`].
///
/// [`build`]: StatementBuilder::build
#[must_use]
#[derive(Debug)]
pub struct StatementBuilder {
    sql: String,
    params: Vec<Value>,
    where_opened: bool,
    link: LinkState,
}

impl StatementBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            where_opened: false,
            link: LinkState::Start,
        }
    }

    /// The statement text accumulated so far.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The parameters bound so far, in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Append raw statement text verbatim. No parameter or connector effects.
    pub fn push(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
    }

    pub(crate) fn push_param(&mut self, value: Value) {
        self.params.push(value);
    }

    /// Emit the owed `AND`, if any, and settle the connector state.
    fn emit_connector(&mut self) {
        if self.link == LinkState::PendingAnd {
            self.sql.push_str("AND ");
        }
        self.link = LinkState::Start;
    }

    /// Append a condition fragment with one bound value.
    ///
    /// Absent values (`Null` or the empty string) drop the whole condition:
    /// optional-filter call sites pass their inputs straight through and the
    /// missing ones simply do not appear in the statement. The `WHERE`
    /// keyword is emitted once, on the first surviving condition.
    pub fn push_where(&mut self, fragment: &str, value: Value) {
        if value.is_absent() {
            return;
        }
        if !self.where_opened {
            if !self.sql.is_empty() && !self.sql.ends_with(' ') {
                self.sql.push(' ');
            }
            self.sql.push_str("WHERE ");
            self.where_opened = true;
        }
        self.emit_connector();
        self.sql.push_str(fragment);
        self.sql.push(' ');
        self.params.push(value);
        self.link = LinkState::PendingAnd;
    }

    /// Append an IN condition, expanding to one placeholder per element.
    ///
    /// The fragment carries the column reference and the `IN (...)` wrapper
    /// with a single `?` standing for the list (`"id IN (?)"`); it is
    /// expanded in place. A fragment without `?` gets the parenthesized
    /// list appended instead. Empty `values` drop the condition entirely.
    ///
    /// Does not emit `WHERE`; a preceding `push_where` (or an explicit
    /// `push("WHERE ")`) must have opened the clause.
    pub fn push_in(&mut self, fragment: &str, values: Vec<Value>) {
        if values.is_empty() {
            return;
        }
        self.emit_connector();
        let placeholders = vec!["?"; values.len()].join(", ");
        if fragment.contains('?') {
            self.sql.push_str(&fragment.replacen('?', &placeholders, 1));
        } else {
            self.sql.push_str(fragment);
            self.sql.push('(');
            self.sql.push_str(&placeholders);
            self.sql.push(')');
        }
        self.sql.push(' ');
        self.params.extend(values);
        self.link = LinkState::PendingAnd;
    }

    /// Append a LIKE condition with wrapped-wildcard placeholders.
    ///
    /// Every `?` in the fragment is rewritten to `CONCAT('%', ?, '%')` so
    /// the bound value is matched as an infix without interpolating `%`
    /// into the value itself. Absent values drop the condition.
    pub fn push_like(&mut self, fragment: &str, value: Value) {
        if value.is_absent() {
            return;
        }
        self.emit_connector();
        self.sql
            .push_str(&fragment.replace('?', "CONCAT('%', ?, '%')"));
        self.sql.push(' ');
        self.params.push(value);
        self.link = LinkState::PendingAnd;
    }

    /// Write an explicit `OR` connector.
    ///
    /// The following condition joins without an automatic `AND`.
    pub fn push_or(&mut self) {
        self.sql.push_str("OR ");
        self.link = LinkState::OrEmitted;
    }

    /// Append a complete join clause verbatim, with optional bound values
    /// for parameterized join predicates. Connector state is untouched.
    pub fn push_join(&mut self, fragment: &str, values: Vec<Value>) {
        self.sql.push_str(fragment);
        self.params.extend(values);
    }

    /// Return the accumulated text and parameter sequence by value.
    ///
    /// Does not reset state; building twice returns the same result.
    pub fn build(&self) -> (String, Vec<Value>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %self.sql, params = self.params.len(), "built statement");
        (self.sql.clone(), self.params.clone())
    }

    /// Check that the text carries exactly one `?` per bound parameter.
    pub fn validate(&self) -> OrmResult<()> {
        let placeholders = self.sql.matches('?').count();
        if placeholders != self.params.len() {
            let params = self.params.len();
            return Err(OrmError::Validation(format!(
                "statement: placeholders({placeholders}) != params({params})"
            )));
        }
        Ok(())
    }
}

impl Default for StatementBuilder {
    fn default() -> Self {
        Self::new()
    }
}
