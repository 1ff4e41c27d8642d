//! Clause value objects consumed by the statement builder

use crate::{IntoOperator, Operator, Value};

/// Qualify a bare column name with its table.
///
/// Names that already carry a table prefix, or that are expressions rather
/// than plain identifiers, pass through untouched.
pub(crate) fn qualify(table: &str, column: &str) -> String {
    if column.contains('.') || column.contains('(') || column.contains(' ') {
        column.to_string()
    } else {
        format!("{}.{}", table, column)
    }
}

/// A single WHERE predicate
///
/// Comparison filters render as `<column> <op> <placeholder>` and carry the
/// bound value; null checks render with no placeholder and carry no value.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Compare {
        column: String,
        operator: Operator,
        value: Value,
    },
    Null {
        column: String,
        negated: bool,
    },
}

impl Filter {
    /// Create a comparison filter
    pub fn new<T>(column: &str, operator: impl IntoOperator, value: T) -> Self
    where
        T: Into<Value>,
    {
        Self::Compare {
            column: column.to_string(),
            operator: operator.into_operator(),
            value: value.into(),
        }
    }

    /// Create an `IS NULL` check
    pub fn is_null(column: &str) -> Self {
        Self::Null {
            column: column.to_string(),
            negated: false,
        }
    }

    /// Create an `IS NOT NULL` check
    pub fn is_not_null(column: &str) -> Self {
        Self::Null {
            column: column.to_string(),
            negated: true,
        }
    }

    /// The column (or expression) this filter applies to
    pub fn column(&self) -> &str {
        match self {
            Self::Compare { column, .. } => column,
            Self::Null { column, .. } => column,
        }
    }

    /// The bound value, if this filter carries one
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Compare { value, .. } => Some(value),
            Self::Null { .. } => None,
        }
    }

    /// Render this filter against its table with the given placeholder text
    pub fn render(&self, table: &str, placeholder: &str) -> String {
        match self {
            Self::Compare {
                column, operator, ..
            } => format!("{} {} {}", qualify(table, column), operator, placeholder),
            Self::Null { column, negated } => {
                let check = if *negated { "IS NOT NULL" } else { "IS NULL" };
                format!("{} {}", qualify(table, column), check)
            }
        }
    }
}

/// Trait for values that can be used as WHERE filters
pub trait IntoFilter {
    fn into_filter(self) -> Filter;
}

impl IntoFilter for Filter {
    fn into_filter(self) -> Filter {
        self
    }
}

// Implementation for shorthand equality: filter(("age", 18))
impl<T> IntoFilter for (&str, T)
where
    T: Into<Value>,
{
    fn into_filter(self) -> Filter {
        Filter::new(self.0, Operator::EQ, self.1)
    }
}

// Implementation for explicit operators: filter(("age", op::GT, 18)) or filter(("age", ">", 18))
impl<T, O> IntoFilter for (&str, O, T)
where
    T: Into<Value>,
    O: IntoOperator,
{
    fn into_filter(self) -> Filter {
        Filter::new(self.0, self.1, self.2)
    }
}

/// JOIN types
#[derive(Debug, Clone, PartialEq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl std::fmt::Display for JoinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER"),
            JoinType::Left => write!(f, "LEFT"),
            JoinType::Right => write!(f, "RIGHT"),
            JoinType::Full => write!(f, "FULL OUTER"),
            JoinType::Cross => write!(f, "CROSS"),
        }
    }
}

/// A JOIN clause, held as its rendered SQL fragment
///
/// Joins are deduplicated by fragment text, so two joins are equal exactly
/// when they render identically.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    sql: String,
}

impl Join {
    /// Create a join with a single equality ON condition
    pub fn new(join_type: JoinType, table: &str, left_column: &str, right_column: &str) -> Self {
        Self {
            sql: format!(
                "{} JOIN {} ON {} = {}",
                join_type, table, left_column, right_column
            ),
        }
    }

    /// Create an INNER JOIN
    pub fn inner(table: &str, left_column: &str, right_column: &str) -> Self {
        Self::new(JoinType::Inner, table, left_column, right_column)
    }

    /// Create a LEFT JOIN
    pub fn left(table: &str, left_column: &str, right_column: &str) -> Self {
        Self::new(JoinType::Left, table, left_column, right_column)
    }

    /// Create a RIGHT JOIN
    pub fn right(table: &str, left_column: &str, right_column: &str) -> Self {
        Self::new(JoinType::Right, table, left_column, right_column)
    }

    /// Create a FULL OUTER JOIN
    pub fn full(table: &str, left_column: &str, right_column: &str) -> Self {
        Self::new(JoinType::Full, table, left_column, right_column)
    }

    /// Create a CROSS JOIN (no ON condition)
    pub fn cross(table: &str) -> Self {
        Self {
            sql: format!("CROSS JOIN {}", table),
        }
    }

    /// Create a join from a pre-rendered SQL fragment
    pub fn raw(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }

    /// The rendered SQL fragment
    pub fn as_str(&self) -> &str {
        &self.sql
    }
}

/// Sort direction for ORDER BY clauses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// An ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    column: String,
    direction: SortDirection,
}

impl OrderBy {
    pub fn new(column: &str, direction: SortDirection) -> Self {
        Self {
            column: column.to_string(),
            direction,
        }
    }

    pub fn asc(column: &str) -> Self {
        Self::new(column, SortDirection::Asc)
    }

    pub fn desc(column: &str) -> Self {
        Self::new(column, SortDirection::Desc)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// The same ordering with its direction flipped
    pub fn reversed(self) -> Self {
        Self {
            column: self.column,
            direction: match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            },
        }
    }
}

/// Aggregation function types
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl std::fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateFunction::Count => write!(f, "COUNT"),
            AggregateFunction::Sum => write!(f, "SUM"),
            AggregateFunction::Avg => write!(f, "AVG"),
            AggregateFunction::Min => write!(f, "MIN"),
            AggregateFunction::Max => write!(f, "MAX"),
        }
    }
}

/// Trait to convert various types into columns
pub trait IntoColumns {
    fn into_columns(self) -> Vec<String>;
}

impl IntoColumns for &str {
    fn into_columns(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoColumns for Vec<String> {
    fn into_columns(self) -> Vec<String> {
        self
    }
}

impl IntoColumns for Vec<&str> {
    fn into_columns(self) -> Vec<String> {
        self.into_iter().map(|s| s.to_string()).collect()
    }
}

impl IntoColumns for &[&str] {
    fn into_columns(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

// For tuples
impl IntoColumns for (&str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![self.0.to_string(), self.1.to_string()]
    }
}

impl IntoColumns for (&str, &str, &str) {
    fn into_columns(self) -> Vec<String> {
        vec![self.0.to_string(), self.1.to_string(), self.2.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::op;

    #[test]
    fn test_filter_tuple_conversions() {
        // Shorthand equality
        let filter = ("name", "John").into_filter();
        assert_eq!(filter, Filter::new("name", op::EQ, "John"));

        // Explicit operator constant
        let filter = ("age", op::GT, 18).into_filter();
        assert_eq!(filter, Filter::new("age", op::GT, 18));

        // String operator
        let filter = ("age", ">", 18).into_filter();
        assert_eq!(filter, Filter::new("age", op::GT, 18));
    }

    #[test]
    fn test_filter_render() {
        let filter = Filter::new("age", op::GT, 18);
        assert_eq!(filter.render("users", "$1"), "users.age > $1");
    }

    #[test]
    fn test_filter_render_qualified_column_untouched() {
        let filter = Filter::new("profiles.age", op::GT, 18);
        assert_eq!(filter.render("users", "$1"), "profiles.age > $1");
    }

    #[test]
    fn test_null_filter_render() {
        assert_eq!(
            Filter::is_null("deleted_at").render("users", "$1"),
            "users.deleted_at IS NULL"
        );
        assert_eq!(
            Filter::is_not_null("deleted_at").render("users", "$1"),
            "users.deleted_at IS NOT NULL"
        );
    }

    #[test]
    fn test_null_filter_has_no_value() {
        assert_eq!(Filter::is_null("deleted_at").value(), None);
        assert_eq!(
            Filter::new("id", op::EQ, 1).value(),
            Some(&Value::I32(1))
        );
    }

    #[test]
    fn test_join_rendering() {
        let join = Join::inner("profiles", "users.id", "profiles.user_id");
        assert_eq!(
            join.as_str(),
            "INNER JOIN profiles ON users.id = profiles.user_id"
        );

        let join = Join::left("profiles", "users.id", "profiles.user_id");
        assert_eq!(
            join.as_str(),
            "LEFT JOIN profiles ON users.id = profiles.user_id"
        );

        let join = Join::cross("numbers");
        assert_eq!(join.as_str(), "CROSS JOIN numbers");
    }

    #[test]
    fn test_join_equality_by_text() {
        let a = Join::inner("profiles", "users.id", "profiles.user_id");
        let b = Join::raw("INNER JOIN profiles ON users.id = profiles.user_id");
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_by_reversed() {
        let order = OrderBy::asc("age");
        assert_eq!(order.clone().reversed(), OrderBy::desc("age"));
        assert_eq!(order.clone().reversed().reversed(), order);
    }

    #[test]
    fn test_into_columns_implementations() {
        assert_eq!("name".into_columns(), vec!["name"]);
        assert_eq!(("name", "age").into_columns(), vec!["name", "age"]);
        assert_eq!(vec!["name", "age"].into_columns(), vec!["name", "age"]);
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("users", "email"), "users.email");
        assert_eq!(qualify("users", "profiles.email"), "profiles.email");
        assert_eq!(qualify("users", "LOWER(email)"), "LOWER(email)");
    }
}
