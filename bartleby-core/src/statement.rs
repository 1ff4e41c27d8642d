//! The statement builder: clause accumulation and SQL rendering

use crate::clause::{
    qualify, AggregateFunction, Filter, IntoColumns, IntoFilter, Join, OrderBy, SortDirection,
};
use crate::{Error, Result, Value};

/// SELECT projection of a statement
#[derive(Debug, Clone, PartialEq)]
enum Projection {
    /// Every column of the target table
    All,
    /// An explicit column list, qualified by the target at render time
    Columns(Vec<String>),
    /// A single aggregate expression
    Aggregate {
        function: AggregateFunction,
        column: Option<String>,
    },
}

/// A chainable SQL statement builder for one target table.
///
/// Clauses accumulate through the chaining methods and render to a
/// parameterized SQL string plus the ordered list of bound values. Bound
/// values only ever appear as positional placeholders (`$1`, `$2`, ...),
/// never interpolated into the SQL text.
///
/// Duplicate clauses are filtered out lazily when the statement renders,
/// not when they are added.
///
/// # Examples
/// ```
/// use bartleby_core::{table, op};
///
/// let (sql, values) = table("users")
///     .filter(("email", "foo@bar.com"))
///     .filter(("age", op::GT, 30))
///     .to_sql();
///
/// assert_eq!(sql, "SELECT users.* FROM users WHERE users.email = $1 AND users.age > $2");
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Statement {
    target: String,
    projection: Projection,
    filters: Vec<Filter>,
    raw_filters: Vec<String>,
    joins: Vec<Join>,
    orderings: Vec<OrderBy>,
    groupings: Vec<String>,
    limit_value: Option<u64>,
    offset_value: Option<u64>,
    distinct: bool,
    distinct_on: Option<String>,
    delete_mode: bool,
}

impl Statement {
    /// Create a new statement builder for the given table
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            projection: Projection::All,
            filters: Vec::new(),
            raw_filters: Vec::new(),
            joins: Vec::new(),
            orderings: Vec::new(),
            groupings: Vec::new(),
            limit_value: None,
            offset_value: None,
            distinct: false,
            distinct_on: None,
            delete_mode: false,
        }
    }

    /// The table this statement targets
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Add a WHERE filter
    pub fn filter<C>(mut self, condition: C) -> Self
    where
        C: IntoFilter,
    {
        self.filters.push(condition.into_filter());
        self
    }

    /// Add a verbatim WHERE fragment with no bound value
    ///
    /// Raw fragments render after all predicate filters, joined by AND.
    pub fn raw_filter(mut self, sql: impl Into<String>) -> Self {
        self.raw_filters.push(sql.into());
        self
    }

    /// Add a JOIN clause
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// Add an INNER JOIN clause
    pub fn inner_join(self, table: &str, left_column: &str, right_column: &str) -> Self {
        self.join(Join::inner(table, left_column, right_column))
    }

    /// Add a LEFT JOIN clause
    pub fn left_join(self, table: &str, left_column: &str, right_column: &str) -> Self {
        self.join(Join::left(table, left_column, right_column))
    }

    /// Add a RIGHT JOIN clause
    pub fn right_join(self, table: &str, left_column: &str, right_column: &str) -> Self {
        self.join(Join::right(table, left_column, right_column))
    }

    /// Add an ORDER BY clause
    ///
    /// Ordering the same column again overrides the earlier direction; only
    /// the most recent entry for a column survives rendering.
    pub fn order_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.orderings.push(OrderBy::new(column, direction));
        self
    }

    /// Add an ORDER BY ASC clause (convenience method)
    pub fn order_by_asc(self, column: &str) -> Self {
        self.order_by(column, SortDirection::Asc)
    }

    /// Add an ORDER BY DESC clause (convenience method)
    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by(column, SortDirection::Desc)
    }

    /// Remove all ORDER BY clauses
    pub fn clear_orderings(mut self) -> Self {
        self.orderings.clear();
        self
    }

    /// Apply the opposite ordering.
    ///
    /// Flips every direction and reverses the sequence, so the
    /// last-specified column becomes the primary sort key. Applying it twice
    /// restores the original orderings.
    pub fn reverse_orderings(mut self) -> Self {
        self.orderings = self
            .orderings
            .into_iter()
            .rev()
            .map(OrderBy::reversed)
            .collect();
        self
    }

    /// Add GROUP BY columns
    pub fn group_by<C>(mut self, columns: C) -> Self
    where
        C: IntoColumns,
    {
        self.groupings.extend(columns.into_columns());
        self
    }

    /// Set a LIMIT.
    ///
    /// Errors if an aggregate projection is already selected.
    pub fn limit(mut self, count: u64) -> Result<Self> {
        self.ensure_not_aggregated("LIMIT")?;
        self.limit_value = Some(count);
        Ok(self)
    }

    /// Set an OFFSET.
    ///
    /// Errors if an aggregate projection is already selected.
    pub fn offset(mut self, offset: u64) -> Result<Self> {
        self.ensure_not_aggregated("OFFSET")?;
        self.offset_value = Some(offset);
        Ok(self)
    }

    /// The current LIMIT, if set
    pub fn limit_value(&self) -> Option<u64> {
        self.limit_value
    }

    /// The current OFFSET, if set
    pub fn offset_value(&self) -> Option<u64> {
        self.offset_value
    }

    /// Replace the projection with the given columns, qualified by the target
    pub fn select<C>(mut self, columns: C) -> Self
    where
        C: IntoColumns,
    {
        self.projection = Projection::Columns(columns.into_columns());
        self
    }

    /// Select `COUNT(*)`
    pub fn select_count(self) -> Result<Self> {
        self.aggregate(AggregateFunction::Count, None)
    }

    /// Select `MIN(column)`
    pub fn select_min(self, column: &str) -> Result<Self> {
        self.aggregate(AggregateFunction::Min, Some(column))
    }

    /// Select `MAX(column)`
    pub fn select_max(self, column: &str) -> Result<Self> {
        self.aggregate(AggregateFunction::Max, Some(column))
    }

    /// Select `AVG(column)`
    pub fn select_avg(self, column: &str) -> Result<Self> {
        self.aggregate(AggregateFunction::Avg, Some(column))
    }

    /// Select `SUM(column)`
    pub fn select_sum(self, column: &str) -> Result<Self> {
        self.aggregate(AggregateFunction::Sum, Some(column))
    }

    /// Mark the statement as DISTINCT
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Mark the statement as DISTINCT ON the given column.
    ///
    /// Takes precedence over a plain DISTINCT mark when both are set.
    pub fn distinct_on(mut self, column: &str) -> Self {
        self.distinct_on = Some(column.to_string());
        self
    }

    /// Switch the statement verb to DELETE.
    ///
    /// Delete statements render no projection clause.
    pub fn delete(mut self) -> Self {
        self.delete_mode = true;
        self
    }

    /// Whether this statement renders as DELETE
    pub fn is_delete(&self) -> bool {
        self.delete_mode
    }

    /// Copy another statement's filters, raw filters, joins, orderings and
    /// groupings into this one by replaying them through the normal adders,
    /// so render-time dedup applies across the merged set.
    ///
    /// Projection, limit, offset and the distinct/delete marks are not
    /// copied.
    pub fn merge(mut self, other: &Statement) -> Self {
        for filter in &other.filters {
            self = self.filter(filter.clone());
        }
        for raw in &other.raw_filters {
            self = self.raw_filter(raw.clone());
        }
        for join in &other.joins {
            self = self.join(join.clone());
        }
        for order in &other.orderings {
            self = self.order_by(order.column(), order.direction());
        }
        for group in &other.groupings {
            self = self.group_by(group.as_str());
        }
        self
    }

    /// Merge another statement's clauses and additionally copy its
    /// projection, limit and offset.
    ///
    /// The limit and offset are copied verbatim; selecting an aggregate on
    /// the result of copying a limited statement errors at that later call.
    pub fn copy_from(mut self, other: &Statement) -> Self {
        self = self.merge(other);
        self.projection = other.projection.clone();
        self.limit_value = other.limit_value;
        self.offset_value = other.offset_value;
        self
    }

    /// Render the statement to SQL text and its ordered bound values.
    ///
    /// Rendering is pure: repeated calls with no mutation in between yield
    /// byte-identical output. Placeholder numbering restarts at `$1` on
    /// every render.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut values = Vec::new();
        let mut counter = 0usize;

        let mut fragments = Vec::new();
        fragments.push(self.render_head());
        fragments.push(self.render_joins());
        fragments.push(self.render_where(&mut counter, &mut values));
        fragments.push(self.render_group_by());
        fragments.push(self.render_order_by());
        if let Some(limit) = self.limit_value {
            fragments.push(format!("LIMIT {}", limit));
        }
        if let Some(offset) = self.offset_value {
            fragments.push(format!("OFFSET {}", offset));
        }

        (Self::assemble(fragments), values)
    }

    /// Render an UPDATE statement from the accumulated clauses.
    ///
    /// SET placeholders take the low numbers and the WHERE placeholders
    /// continue the same counter, so the bound values are the assignment
    /// values followed by the filter values. Assignment values are coerced
    /// to their canonical text form; filter values bind untouched.
    pub fn to_update_sql<A>(&self, assignments: A) -> (String, Vec<Value>)
    where
        A: IntoAssignments,
    {
        let mut values = Vec::new();
        let mut counter = 0usize;

        let mut sets = Vec::new();
        for (column, value) in assignments.into_assignments() {
            counter += 1;
            sets.push(format!("{} = ${}", column, counter));
            values.push(value.coerce_text());
        }

        let mut fragments = Vec::new();
        fragments.push(format!("UPDATE {} SET {}", self.target, sets.join(", ")));
        fragments.push(self.render_joins());
        fragments.push(self.render_where(&mut counter, &mut values));
        fragments.push(self.render_group_by());
        fragments.push(self.render_order_by());
        fragments.push(format!("RETURNING {}", self.render_projection()));

        (Self::assemble(fragments), values)
    }

    fn assemble(fragments: Vec<String>) -> String {
        fragments
            .into_iter()
            .filter(|fragment| !fragment.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn ensure_not_aggregated(&self, clause: &str) -> Result<()> {
        if let Projection::Aggregate { function, .. } = &self.projection {
            return Err(Error::unsupported_statement(format!(
                "{} cannot be combined with a {} projection; fetch the matching rows and aggregate in memory instead",
                clause, function
            )));
        }
        Ok(())
    }

    fn aggregate(mut self, function: AggregateFunction, column: Option<&str>) -> Result<Self> {
        if self.limit_value.is_some() || self.offset_value.is_some() {
            return Err(Error::unsupported_statement(format!(
                "{} cannot be combined with LIMIT or OFFSET; fetch the matching rows and aggregate in memory instead",
                function
            )));
        }
        self.projection = Projection::Aggregate {
            function,
            column: column.map(str::to_string),
        };
        // A stray ORDER BY under an aggregate is meaningless and must not leak.
        self.orderings.clear();
        Ok(self)
    }

    fn render_head(&self) -> String {
        if self.delete_mode {
            return format!("DELETE FROM {}", self.target);
        }

        let mut head = String::from("SELECT ");
        if let Some(column) = &self.distinct_on {
            head.push_str("DISTINCT ON (");
            head.push_str(&qualify(&self.target, column));
            head.push_str(") ");
        } else if self.distinct {
            head.push_str("DISTINCT ");
        }
        head.push_str(&self.render_projection());
        head.push_str(" FROM ");
        head.push_str(&self.target);
        head
    }

    fn render_projection(&self) -> String {
        match &self.projection {
            Projection::All => format!("{}.*", self.target),
            Projection::Columns(columns) => columns
                .iter()
                .map(|column| qualify(&self.target, column))
                .collect::<Vec<_>>()
                .join(", "),
            Projection::Aggregate { function, column } => match column {
                Some(column) => format!("{}({})", function, qualify(&self.target, column)),
                None => format!("{}(*)", function),
            },
        }
    }

    fn render_joins(&self) -> String {
        let mut seen: Vec<&str> = Vec::new();
        for join in &self.joins {
            if !seen.contains(&join.as_str()) {
                seen.push(join.as_str());
            }
        }
        seen.join(" ")
    }

    fn render_where(&self, counter: &mut usize, values: &mut Vec<Value>) -> String {
        let filters = self.dedup_filters();
        let raws = self.dedup_raw_filters();
        if filters.is_empty() && raws.is_empty() {
            return String::new();
        }

        let mut terms = Vec::with_capacity(filters.len() + raws.len());
        for filter in filters {
            match filter.value() {
                Some(value) => {
                    *counter += 1;
                    terms.push(filter.render(&self.target, &format!("${}", counter)));
                    values.push(value.clone());
                }
                None => terms.push(filter.render(&self.target, "")),
            }
        }
        for raw in raws {
            terms.push(raw.clone());
        }

        format!("WHERE {}", terms.join(" AND "))
    }

    fn render_group_by(&self) -> String {
        let mut seen: Vec<String> = Vec::new();
        for group in &self.groupings {
            let qualified = qualify(&self.target, group);
            if !seen.contains(&qualified) {
                seen.push(qualified);
            }
        }
        if seen.is_empty() {
            return String::new();
        }
        format!("GROUP BY {}", seen.join(", "))
    }

    fn render_order_by(&self) -> String {
        let orderings = self.dedup_orderings();
        if orderings.is_empty() {
            return String::new();
        }
        let terms: Vec<String> = orderings
            .iter()
            .map(|order| {
                format!(
                    "{} {}",
                    qualify(&self.target, order.column()),
                    order.direction()
                )
            })
            .collect();
        format!("ORDER BY {}", terms.join(", "))
    }

    /// Structurally identical filters collapse to one; the first occurrence
    /// survives. The key is the rendered predicate with a fixed placeholder
    /// plus the bound value.
    fn dedup_filters(&self) -> Vec<&Filter> {
        let mut seen: Vec<(String, Option<&Value>)> = Vec::new();
        let mut kept = Vec::new();
        for filter in &self.filters {
            let key = (filter.render(&self.target, "?"), filter.value());
            if !seen.contains(&key) {
                seen.push(key);
                kept.push(filter);
            }
        }
        kept
    }

    fn dedup_raw_filters(&self) -> Vec<&String> {
        let mut kept: Vec<&String> = Vec::new();
        for raw in &self.raw_filters {
            if !kept.contains(&raw) {
                kept.push(raw);
            }
        }
        kept
    }

    /// For a column ordered more than once, the most recent entry survives
    /// at its own position.
    fn dedup_orderings(&self) -> Vec<&OrderBy> {
        let mut kept: Vec<&OrderBy> = Vec::new();
        for order in self.orderings.iter().rev() {
            if !kept.iter().any(|seen| seen.column() == order.column()) {
                kept.push(order);
            }
        }
        kept.reverse();
        kept
    }
}

/// Trait for types that can be converted to UPDATE assignments
///
/// Assignments are ordered pairs; their order fixes the SET clause and its
/// placeholder numbering.
pub trait IntoAssignments {
    fn into_assignments(self) -> Vec<(String, Value)>;
}

impl IntoAssignments for Vec<(String, Value)> {
    fn into_assignments(self) -> Vec<(String, Value)> {
        self
    }
}

impl<T> IntoAssignments for Vec<(&str, T)>
where
    T: Into<Value>,
{
    fn into_assignments(self) -> Vec<(String, Value)> {
        self.into_iter()
            .map(|(column, value)| (column.to_string(), value.into()))
            .collect()
    }
}

impl<T, const N: usize> IntoAssignments for [(&str, T); N]
where
    T: Into<Value>,
{
    fn into_assignments(self) -> Vec<(String, Value)> {
        self.into_iter()
            .map(|(column, value)| (column.to_string(), value.into()))
            .collect()
    }
}
