//! Bartleby Core - a chainable, parameterized SQL statement builder
//!
//! This crate provides the statement-assembly engine behind Bartleby:
//! declarative operations accumulate on a per-table [`Statement`] and render
//! to a SQL string plus an ordered list of bound values, ready for a
//! prepared-statement execute call. Values only ever appear as positional
//! `$n` placeholders.

pub mod clause;
pub mod error;
pub mod operator;
pub mod statement;
pub mod value;

// Re-export main types
pub use clause::{
    AggregateFunction, Filter, IntoColumns, IntoFilter, Join, JoinType, OrderBy, SortDirection,
};
pub use error::{Error, Result};
pub use operator::{op, IntoOperator, Operator};
pub use statement::{IntoAssignments, Statement};
pub use value::Value;

/// Create a new statement builder for the given table
pub fn table(name: &str) -> Statement {
    Statement::new(name)
}
