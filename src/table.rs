//! Tables and columns.
//!
//! A [`Table`] is identified by its name and optional alias. It is used as a
//! set key when collecting the tables a query refers to, and as the qualifier
//! when rendering column names (`people.age`, or `p.age` if aliased).
//!
//! [`Table`]: struct.Table.html

use std::fmt;

use regex::Regex;

use crate::error::{Error, Result};
use crate::set::OrderSet;

lazy_static! {
    /// Pattern for plain SQL identifiers.
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Insertion-ordered set of tables referenced by part of a query.
pub type TableSet = OrderSet<Table>;

/// A database table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    /// The table name.
    name: String,
    /// Name used to qualify columns, if different from the table name.
    alias: Option<String>,
}

/// A column belonging to a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    table: Table,
    name: String,
}

/// An item in the selection list of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selectable {
    /// A single column.
    Column(Column),
    /// All columns of a table (`table.*`).
    Wildcard(Table),
}

/// Checks that `name` is a plain SQL identifier.
fn validate_identifier(name: &str) -> Result<()> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(name.to_string()))
    }
}

impl Table {
    /// Creates a table with the given name.
    pub fn new(name: &str) -> Result<Table> {
        validate_identifier(name)?;
        Ok(Table {
            name: name.to_string(),
            alias: None,
        })
    }

    /// Creates a table whose columns are qualified by `alias`.
    pub fn with_alias(name: &str, alias: &str) -> Result<Table> {
        validate_identifier(name)?;
        validate_identifier(alias)?;
        Ok(Table {
            name: name.to_string(),
            alias: Some(alias.to_string()),
        })
    }

    /// Returns the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the alias, if the table has one.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_ref().map(String::as_str)
    }

    /// Returns the name that qualifies this table's columns.
    pub fn qualifier(&self) -> &str {
        self.alias().unwrap_or(&self.name)
    }

    /// Returns the column of this table with the given name.
    pub fn column(&self, name: &str) -> Result<Column> {
        validate_identifier(name)?;
        Ok(Column {
            table: self.clone(),
            name: name.to_string(),
        })
    }

    /// Returns a selection of every column of this table.
    pub fn wildcard(&self) -> Selectable {
        Selectable::Wildcard(self.clone())
    }

    /// Writes the table as it appears in a FROM clause.
    pub fn write<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_str(&self.name)?;
        if let Some(alias) = &self.alias {
            out.write_char(' ')?;
            out.write_str(alias)?;
        }
        Ok(())
    }
}

impl Column {
    /// Returns the table the column belongs to.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns the unqualified column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Writes the qualified column name.
    pub fn write<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_str(self.table.qualifier())?;
        out.write_char('.')?;
        out.write_str(&self.name)
    }

    /// Adds the column's table to `tables`.
    pub fn add_referenced_tables_to(&self, tables: &mut TableSet) {
        tables.insert(self.table.clone());
    }
}

impl Selectable {
    /// Writes the selection item, `table.column` or `table.*`.
    pub fn write<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        match self {
            Selectable::Column(column) => column.write(out),
            Selectable::Wildcard(table) => {
                out.write_str(table.qualifier())?;
                out.write_str(".*")
            }
        }
    }

    /// Adds the item's table to `tables`.
    pub fn add_referenced_tables_to(&self, tables: &mut TableSet) {
        match self {
            Selectable::Column(column) => column.add_referenced_tables_to(tables),
            Selectable::Wildcard(table) => {
                tables.insert(table.clone());
            }
        }
    }
}

impl From<Column> for Selectable {
    fn from(column: Column) -> Selectable {
        Selectable::Column(column)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write(f)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write(f)
    }
}

impl fmt::Display for Selectable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_column() {
        let people = Table::new("people").unwrap();
        assert_eq!(people.column("height").unwrap().to_string(), "people.height");
    }

    #[test]
    fn aliased_table() {
        let people = Table::with_alias("people", "p").unwrap();
        assert_eq!(people.to_string(), "people p");
        assert_eq!(people.column("age").unwrap().to_string(), "p.age");
        assert_eq!(people.wildcard().to_string(), "p.*");
    }

    #[test]
    fn invalid_identifiers() {
        assert_eq!(
            Table::new("people; DROP"),
            Err(Error::InvalidIdentifier("people; DROP".to_string()))
        );
        assert!(Table::new("").is_err());
        assert!(Table::new("1st").is_err());
        assert!(Table::with_alias("people", "p.q").is_err());
        let people = Table::new("people").unwrap();
        assert_eq!(
            people.column("*"),
            Err(Error::InvalidIdentifier("*".to_string()))
        );
    }

    #[test]
    fn alias_distinguishes_tables() {
        let mut tables = TableSet::new();
        let a = Table::with_alias("people", "a").unwrap();
        let b = Table::with_alias("people", "b").unwrap();
        a.column("id").unwrap().add_referenced_tables_to(&mut tables);
        b.column("id").unwrap().add_referenced_tables_to(&mut tables);
        a.wildcard().add_referenced_tables_to(&mut tables);
        assert_eq!(tables.len(), 2);
    }
}
