//! SELECT statements.
//!
//! A [`SelectQuery`] collects a selection list, WHERE criteria and ordering.
//! The FROM clause is not specified directly: it lists every table that the
//! rest of the query refers to, in order of first reference.
//!
//! [`SelectQuery`]: struct.SelectQuery.html

use std::fmt;

use tracing::debug;

use crate::criteria::Criteria;
use crate::error::Result;
use crate::expression::CriteriaExpression;
use crate::ops::Logic;
use crate::table::{Column, Selectable, Table, TableSet};

/// Style options for rendering a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Put each clause and item on its own line instead of using one line.
    pub pretty: bool,
    /// Number of spaces to indent items by, when pretty-printing.
    pub indent: usize,
}

/// Sort order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `ASC`
    Ascending,
    /// `DESC`
    Descending,
}

/// An ORDER BY item.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// The column to sort by.
    pub column: Column,
    /// The sort direction.
    pub direction: Direction,
}

/// A SQL SELECT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectQuery {
    /// Use SELECT DISTINCT.
    distinct: bool,
    /// The columns to select.
    selection: Vec<Selectable>,
    /// The WHERE clause, as a list of conjuncts.
    criteria: Vec<Criteria>,
    /// The ORDER BY clause.
    order: Vec<Order>,
}

impl Style {
    /// Returns the single-line style.
    pub fn compact() -> Style {
        Style {
            pretty: false,
            indent: 0,
        }
    }

    /// Writes the whitespace that precedes a clause keyword or list item.
    fn line_break<W: fmt::Write + ?Sized>(&self, out: &mut W, level: usize) -> fmt::Result {
        if self.pretty {
            out.write_char('\n')?;
            for _ in 0..level * self.indent {
                out.write_char(' ')?;
            }
            Ok(())
        } else {
            out.write_char(' ')
        }
    }
}

impl Default for Style {
    fn default() -> Style {
        Style {
            pretty: true,
            indent: 4,
        }
    }
}

impl Direction {
    /// Returns the SQL keyword for the direction.
    pub fn keyword(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

impl Order {
    /// Writes `<column> ASC` or `<column> DESC`.
    pub fn write<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        self.column.write(out)?;
        out.write_char(' ')?;
        out.write_str(self.direction.keyword())
    }
}

impl SelectQuery {
    /// Creates an empty query.
    pub fn new() -> SelectQuery {
        SelectQuery::default()
    }

    /// Returns true if the query selects distinct rows.
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Sets whether to use SELECT DISTINCT.
    pub fn set_distinct(&mut self, distinct: bool) {
        self.distinct = distinct;
    }

    /// Adds the named column of `table` to the selection.
    pub fn add_column(&mut self, table: &Table, name: &str) -> Result<()> {
        let column = table.column(name)?;
        self.selection.push(Selectable::Column(column));
        Ok(())
    }

    /// Adds a column or wildcard to the selection.
    pub fn add_to_selection<S: Into<Selectable>>(&mut self, selectable: S) {
        self.selection.push(selectable.into());
    }

    /// Adds a criteria, joined to the others with AND.
    pub fn add_criteria(&mut self, criteria: Criteria) {
        self.criteria.push(criteria);
    }

    /// Adds an ORDER BY item after any existing ones.
    pub fn add_order(&mut self, column: Column, direction: Direction) {
        self.order.push(Order { column, direction });
    }

    /// Returns the selection list.
    pub fn selection(&self) -> &[Selectable] {
        &self.selection
    }

    /// Returns the WHERE conjuncts, in the order they were added.
    pub fn criteria(&self) -> &[Criteria] {
        &self.criteria
    }

    /// Returns the WHERE clause as a single expression.
    pub fn where_expression(&self) -> CriteriaExpression {
        CriteriaExpression::from_terms(self.criteria.clone(), Logic::And)
    }

    /// Returns the tables for the FROM clause, in order of first reference.
    pub fn list_tables(&self) -> TableSet {
        let mut tables = TableSet::new();
        for selectable in &self.selection {
            selectable.add_referenced_tables_to(&mut tables);
        }
        for criteria in &self.criteria {
            criteria.add_referenced_tables_to(&mut tables);
        }
        for order in &self.order {
            order.column.add_referenced_tables_to(&mut tables);
        }
        tables
    }

    /// Writes the query to `out` using `style`.
    pub fn write<W: fmt::Write + ?Sized>(&self, out: &mut W, style: &Style) -> fmt::Result {
        let tables = self.list_tables();
        debug!(
            tables = tables.len(),
            criteria = self.criteria.len(),
            pretty = style.pretty,
            "Rendering select query"
        );

        out.write_str(if self.distinct { "SELECT DISTINCT" } else { "SELECT" })?;
        write_items(out, style, &self.selection, |out, s| s.write(out))?;

        if !tables.is_empty() {
            style.line_break(out, 0)?;
            out.write_str("FROM")?;
            write_items(out, style, tables.iter(), |out, t| t.write(out))?;
        }

        let expression = self.where_expression();
        if !expression.is_empty() {
            style.line_break(out, 0)?;
            out.write_str("WHERE")?;
            style.line_break(out, 1)?;
            expression.write(out)?;
        }

        if !self.order.is_empty() {
            style.line_break(out, 0)?;
            out.write_str("ORDER BY")?;
            write_items(out, style, &self.order, |out, o| o.write(out))?;
        }
        Ok(())
    }

    /// Returns a `Display` adapter that renders the query using `style`.
    pub fn display<'a>(&'a self, style: &'a Style) -> Rendered<'a> {
        Rendered { query: self, style }
    }

    /// Renders the query to a string.
    pub fn render(&self, style: &Style) -> String {
        self.display(style).to_string()
    }
}

/// A query paired with the style to render it in.
pub struct Rendered<'a> {
    query: &'a SelectQuery,
    style: &'a Style,
}

impl<'a> fmt::Display for Rendered<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.query.write(f, self.style)
    }
}

/// Writes a comma-separated list of items, one level deeper than its clause.
fn write_items<W, I, F>(out: &mut W, style: &Style, items: I, mut write_item: F) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    I: IntoIterator,
    F: FnMut(&mut W, I::Item) -> fmt::Result,
{
    for (i, item) in items.into_iter().enumerate() {
        if i != 0 {
            out.write_str(if style.pretty { " ," } else { "," })?;
        }
        style.line_break(out, 1)?;
        write_item(out, item)?;
    }
    Ok(())
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write(f, &Style::default())
    }
}
