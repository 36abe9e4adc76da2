//! Literal values.
//!
//! A literal is an immutable constant that renders itself as SQL text. Text
//! and dates are single-quoted; numbers and booleans are written as-is.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};

/// A constant value in a SQL query.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A string, rendered inside single quotes.
    String(String),
    /// An integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// A boolean, rendered as `true` or `false`.
    Boolean(bool),
    /// A date, formatted when the literal is created.
    Date(String),
}

impl Literal {
    /// Creates a date literal with the format `yyyy-MM-dd HH:mm:ss.S`.
    ///
    /// The fractional part is the number of milliseconds, without padding.
    pub fn date(value: NaiveDateTime) -> Literal {
        let millis = (value.nanosecond() / 1_000_000) % 1000;
        Literal::Date(format!("{}.{}", value.format("%Y-%m-%d %H:%M:%S"), millis))
    }

    /// Writes the SQL representation of the literal to `out`.
    ///
    /// Quotes embedded in strings are not escaped.
    pub fn write<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        match self {
            Literal::String(s) | Literal::Date(s) => {
                out.write_char('\'')?;
                out.write_str(s)?;
                out.write_char('\'')
            }
            Literal::Integer(n) => write!(out, "{}", n),
            Literal::Float(x) if x.is_nan() => out.write_str("NaN"),
            Literal::Float(x) if x.is_infinite() => {
                out.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // Debug keeps the fractional digit on whole numbers (18.0).
            Literal::Float(x) => write!(out, "{:?}", x),
            Literal::Boolean(b) => write!(out, "{}", b),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write(f)
    }
}

impl<'a> From<&'a str> for Literal {
    fn from(value: &'a str) -> Literal {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Literal {
        Literal::String(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Literal {
        Literal::Integer(value.into())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Literal {
        Literal::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Literal {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Literal {
        Literal::Boolean(value)
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(value: NaiveDateTime) -> Literal {
        Literal::date(value)
    }
}
