//! Library for building SQL SELECT statements.
//!
//! Queries are assembled from in-memory objects: tables and columns, literal
//! values, and WHERE criteria. Every part renders itself into any
//! `std::fmt::Write` sink, and reports the tables it refers to so that the
//! FROM clause can be filled in automatically.
//!
//! ```
//! use squiggle::{Comparison, Criteria, SelectQuery, Style, Table};
//!
//! # fn main() -> squiggle::Result<()> {
//! let people = Table::new("people")?;
//! let mut select = SelectQuery::new();
//! select.add_column(&people, "firstname")?;
//! select.add_criteria(Criteria::matching(
//!     people.column("height")?,
//!     Comparison::Greater,
//!     1.8,
//! ));
//! assert_eq!(
//!     select.render(&Style::compact()),
//!     "SELECT people.firstname FROM people WHERE people.height > 1.8"
//! );
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate lazy_static;

pub mod criteria;
pub mod error;
pub mod expression;
pub mod literal;
pub mod matchable;
pub mod ops;
pub mod query;
pub mod table;

mod set;
mod util;

pub use criteria::Criteria;
pub use error::{Error, Result};
pub use expression::CriteriaExpression;
pub use literal::Literal;
pub use matchable::Matchable;
pub use ops::{Comparison, Logic};
pub use query::{Direction, Order, Rendered, SelectQuery, Style};
pub use set::OrderSet;
pub use table::{Column, Selectable, Table, TableSet};
