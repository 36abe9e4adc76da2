//! Operands of criteria.

use std::fmt;

use chrono::NaiveDateTime;

use crate::literal::Literal;
use crate::table::{Column, TableSet};

/// A value that can appear on either side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Matchable {
    /// A column of some table.
    Column(Column),
    /// A constant value.
    Literal(Literal),
}

impl Matchable {
    /// Writes the SQL representation of the operand to `out`.
    pub fn write<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        match self {
            Matchable::Column(column) => column.write(out),
            Matchable::Literal(literal) => literal.write(out),
        }
    }

    /// Adds the tables the operand refers to. Literals refer to none.
    pub fn add_referenced_tables_to(&self, tables: &mut TableSet) {
        if let Matchable::Column(column) = self {
            column.add_referenced_tables_to(tables);
        }
    }
}

impl fmt::Display for Matchable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write(f)
    }
}

impl From<Column> for Matchable {
    fn from(column: Column) -> Matchable {
        Matchable::Column(column)
    }
}

impl<'a> From<&'a Column> for Matchable {
    fn from(column: &'a Column) -> Matchable {
        Matchable::Column(column.clone())
    }
}

impl From<Literal> for Matchable {
    fn from(literal: Literal) -> Matchable {
        Matchable::Literal(literal)
    }
}

/// Implements `From` for types that convert to a `Literal`.
macro_rules! literal_matchable {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Matchable {
                fn from(value: $t) -> Matchable {
                    Matchable::Literal(Literal::from(value))
                }
            }
        )*
    };
}

literal_matchable!(String, i32, i64, f64, bool, NaiveDateTime);

impl<'a> From<&'a str> for Matchable {
    fn from(value: &'a str) -> Matchable {
        Matchable::Literal(Literal::from(value))
    }
}
