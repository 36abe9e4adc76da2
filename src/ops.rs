//! SQL operators.
//!
//! This module defines the closed vocabulary of operators that criteria can
//! use: comparison operators for match criteria, and logical operators for
//! joining criteria together.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A binary comparison operator.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Comparison {
    /// `=`
    Equal,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `LIKE`
    Like,
    /// `<>`
    NotEqual,
}

/// A logical operator joining two criteria.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Logic {
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
}

/// All comparison operators, in declaration order.
const COMPARISON_LIST: [Comparison; 7] = [
    Comparison::Equal,
    Comparison::Greater,
    Comparison::GreaterEqual,
    Comparison::Less,
    Comparison::LessEqual,
    Comparison::Like,
    Comparison::NotEqual,
];

lazy_static! {
    /// A mapping from SQL symbols to comparison operators.
    static ref COMPARISON_MAP: HashMap<&'static str, Comparison> = {
        let mut map = HashMap::new();
        for &op in COMPARISON_LIST.iter() {
            map.insert(op.symbol(), op);
        }
        map
    };
}

impl Comparison {
    /// Returns the SQL symbol for the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Equal => "=",
            Comparison::Greater => ">",
            Comparison::GreaterEqual => ">=",
            Comparison::Less => "<",
            Comparison::LessEqual => "<=",
            Comparison::Like => "LIKE",
            Comparison::NotEqual => "<>",
        }
    }
}

impl Logic {
    /// Returns the SQL keyword for the operator.
    pub fn keyword(self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Comparison {
    type Err = Error;

    fn from_str(s: &str) -> Result<Comparison, Error> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("like") {
            return Ok(Comparison::Like);
        }
        COMPARISON_MAP
            .get(token)
            .cloned()
            .ok_or_else(|| Error::UnknownOperator(s.to_string()))
    }
}

impl FromStr for Logic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Logic, Error> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Logic::And),
            "OR" => Ok(Logic::Or),
            _ => Err(Error::UnknownOperator(s.to_string())),
        }
    }
}
