//! Rendering of predicates into parameterized SQL.
//!
//! Statements use `?` placeholders; identifiers come from the field registry
//! and values are carried separately as binds.

use crate::pagination::PageDescriptor;
use crate::query::fields::FieldRegistry;
use crate::query::filter::{Condition, Predicate, SqlValue};

/// SQL text and the values to bind to its placeholders, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<SqlValue>,
}

/// Count and page statements sharing one predicate set.
#[derive(Clone, Copy, Debug)]
pub struct SelectQuery<'a> {
    registry: &'a FieldRegistry,
    predicates: &'a [Predicate],
}

impl<'a> SelectQuery<'a> {
    pub fn new(registry: &'a FieldRegistry, predicates: &'a [Predicate]) -> Self {
        Self {
            registry,
            predicates,
        }
    }

    pub fn predicates(&self) -> &'a [Predicate] {
        self.predicates
    }

    /// `SELECT COUNT(*) AS count ...` over the filtered rows.
    pub fn count(&self) -> Statement {
        let mut binds = Vec::new();
        let filter = self.where_clause(&mut binds);
        let sql = format!(
            "SELECT COUNT(*) AS count FROM {}{filter}",
            self.registry.table()
        );
        Statement { sql, binds }
    }

    /// Ordered, limited select of the requested page.
    pub fn fetch(&self, page: &PageDescriptor) -> Statement {
        let mut binds = Vec::new();
        let filter = self.where_clause(&mut binds);

        let mut order = vec![format!(
            "{} {}",
            page.sort_column(),
            page.sort_direction().as_sql()
        )];
        order.extend(page.tie_breaker().map(|column| format!("{column} ASC")));

        let sql = format!(
            "SELECT * FROM {}{filter} ORDER BY {} LIMIT ? OFFSET ?",
            self.registry.table(),
            order.join(", ")
        );
        binds.push(SqlValue::Integer(to_i64(page.page_size())));
        binds.push(SqlValue::Integer(to_i64(page.offset())));

        Statement { sql, binds }
    }

    /// ` WHERE a AND b ...`, or nothing when unfiltered.
    fn where_clause(&self, binds: &mut Vec<SqlValue>) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let clauses: Vec<String> = self
            .predicates
            .iter()
            .map(|predicate| render(predicate, binds))
            .collect();
        format!(" WHERE {}", clauses.join(" AND "))
    }
}

/// Renders one predicate and appends its values to `binds`.
fn render(predicate: &Predicate, binds: &mut Vec<SqlValue>) -> String {
    let column = predicate.column;
    match &predicate.condition {
        Condition::Eq(value) => {
            binds.push(value.clone());
            format!("{column} = ?")
        }
        Condition::Gte(value) => {
            binds.push(value.clone());
            format!("{column} >= ?")
        }
        Condition::Lte(value) => {
            binds.push(value.clone());
            format!("{column} <= ?")
        }
        Condition::Between(lower, upper) => {
            binds.push(lower.clone());
            binds.push(upper.clone());
            format!("{column} BETWEEN ? AND ?")
        }
        Condition::In(values) => {
            binds.extend(values.iter().cloned());
            format!("{column} IN ({})", vec!["?"; values.len()].join(", "))
        }
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
