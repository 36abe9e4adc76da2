//! WHERE clause criteria.
//!
//! This module defines the predicates that can appear in a WHERE clause. Each
//! variant renders itself with a fixed template, substituting the rendering
//! of its operands, and can report the set of tables it refers to. Logical
//! composites (`And`, `Or`) never insert parentheses on their own: grouping
//! must be requested explicitly with `Parens` when mixing operators.

use std::fmt;

use crate::error::Result;
use crate::expression::CriteriaExpression;
use crate::matchable::Matchable;
use crate::ops::{Comparison, Logic};
use crate::query::{SelectQuery, Style};
use crate::table::{Table, TableSet};
use crate::util::CommaSep;

/// A boolean predicate in a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Criteria {
    /// `<left> <op> <right>`
    Match {
        left: Matchable,
        op: Comparison,
        right: Matchable,
    },
    /// `<matched> IS NULL`
    IsNull(Matchable),
    /// `<matched> IS NOT NULL`
    IsNotNull(Matchable),
    /// `<subject> BETWEEN <lower> AND <upper>`
    Between {
        subject: Matchable,
        lower: Matchable,
        upper: Matchable,
    },
    /// `<subject> IN ( <v1>, <v2>, ... )`
    In {
        subject: Matchable,
        values: Vec<Matchable>,
    },
    /// `<subject> IN ( <query> )`
    InSubquery {
        subject: Matchable,
        query: Box<SelectQuery>,
    },
    /// `<lhs> AND <rhs>`
    And(Box<Criteria>, Box<Criteria>),
    /// `<lhs> OR <rhs>`
    Or(Box<Criteria>, Box<Criteria>),
    /// `NOT <criteria>`
    Not(Box<Criteria>),
    /// `( <criteria> )`
    Parens(Box<Criteria>),
    /// A chain of criteria joined by a logical operator.
    Expression(CriteriaExpression),
}

impl Criteria {
    /// Creates the comparison `<left> <op> <right>`.
    pub fn matching<L, R>(left: L, op: Comparison, right: R) -> Criteria
    where
        L: Into<Matchable>,
        R: Into<Matchable>,
    {
        Criteria::Match {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    /// Creates `<matched> IS NULL`.
    pub fn is_null<M: Into<Matchable>>(matched: M) -> Criteria {
        Criteria::IsNull(matched.into())
    }

    /// Creates `<matched> IS NOT NULL`.
    pub fn is_not_null<M: Into<Matchable>>(matched: M) -> Criteria {
        Criteria::IsNotNull(matched.into())
    }

    /// Creates `<subject> BETWEEN <lower> AND <upper>`.
    pub fn between<S, L, U>(subject: S, lower: L, upper: U) -> Criteria
    where
        S: Into<Matchable>,
        L: Into<Matchable>,
        U: Into<Matchable>,
    {
        Criteria::Between {
            subject: subject.into(),
            lower: lower.into(),
            upper: upper.into(),
        }
    }

    /// Creates an IN criteria over a list of values, keeping their order.
    pub fn in_values<S, I>(subject: S, values: I) -> Criteria
    where
        S: Into<Matchable>,
        I: IntoIterator,
        I::Item: Into<Matchable>,
    {
        Criteria::In {
            subject: subject.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates `<subject> IN ( <query> )`.
    pub fn in_subquery<S: Into<Matchable>>(subject: S, query: SelectQuery) -> Criteria {
        Criteria::InSubquery {
            subject: subject.into(),
            query: Box::new(query),
        }
    }

    /// Joins two criteria with AND, without parentheses.
    pub fn and(lhs: Criteria, rhs: Criteria) -> Criteria {
        Criteria::And(Box::new(lhs), Box::new(rhs))
    }

    /// Joins two criteria with OR, without parentheses.
    pub fn or(lhs: Criteria, rhs: Criteria) -> Criteria {
        Criteria::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Negates a criteria.
    pub fn not(criteria: Criteria) -> Criteria {
        Criteria::Not(Box::new(criteria))
    }

    /// Wraps a criteria in parentheses.
    pub fn parens(criteria: Criteria) -> Criteria {
        Criteria::Parens(Box::new(criteria))
    }

    /// Compares the named column of `table` with `value`.
    ///
    /// Fails if `column` is not a valid identifier.
    pub fn matching_column<V>(table: &Table, column: &str, op: Comparison, value: V) -> Result<Criteria>
    where
        V: Into<Matchable>,
    {
        Ok(Criteria::matching(table.column(column)?, op, value))
    }

    /// Tests the named column of `table` against a list of values.
    ///
    /// Fails if `column` is not a valid identifier.
    pub fn in_column<I>(table: &Table, column: &str, values: I) -> Result<Criteria>
    where
        I: IntoIterator,
        I::Item: Into<Matchable>,
    {
        Ok(Criteria::in_values(table.column(column)?, values))
    }

    /// Joins all `terms` with AND.
    pub fn all(terms: Vec<Criteria>) -> Criteria {
        Criteria::Expression(CriteriaExpression::from_terms(terms, Logic::And))
    }

    /// Joins all `terms` with OR.
    pub fn any(terms: Vec<Criteria>) -> Criteria {
        Criteria::Expression(CriteriaExpression::from_terms(terms, Logic::Or))
    }

    /// Writes the SQL representation of the criteria to `out`.
    pub fn write<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        match self {
            Criteria::Match { left, op, right } => {
                left.write(out)?;
                write!(out, " {} ", op)?;
                right.write(out)
            }
            Criteria::IsNull(matched) => {
                matched.write(out)?;
                out.write_str(" IS NULL")
            }
            Criteria::IsNotNull(matched) => {
                matched.write(out)?;
                out.write_str(" IS NOT NULL")
            }
            Criteria::Between {
                subject,
                lower,
                upper,
            } => {
                subject.write(out)?;
                out.write_str(" BETWEEN ")?;
                lower.write(out)?;
                out.write_str(" AND ")?;
                upper.write(out)
            }
            Criteria::In { subject, values } => {
                subject.write(out)?;
                write!(out, " IN ( {} )", CommaSep(values))
            }
            Criteria::InSubquery { subject, query } => {
                subject.write(out)?;
                out.write_str(" IN ( ")?;
                query.write(out, &Style::compact())?;
                out.write_str(" )")
            }
            Criteria::And(lhs, rhs) => write_logic(out, lhs, Logic::And, rhs),
            Criteria::Or(lhs, rhs) => write_logic(out, lhs, Logic::Or, rhs),
            Criteria::Not(criteria) => {
                out.write_str("NOT ")?;
                criteria.write(out)
            }
            Criteria::Parens(criteria) => {
                out.write_str("( ")?;
                criteria.write(out)?;
                out.write_str(" )")
            }
            Criteria::Expression(expression) => expression.write(out),
        }
    }

    /// Adds every table the criteria refers to into `tables`.
    ///
    /// A subquery's own tables are not included, since it has its own FROM
    /// clause.
    pub fn add_referenced_tables_to(&self, tables: &mut TableSet) {
        match self {
            Criteria::Match { left, right, .. } => {
                left.add_referenced_tables_to(tables);
                right.add_referenced_tables_to(tables);
            }
            Criteria::IsNull(matched) | Criteria::IsNotNull(matched) => {
                matched.add_referenced_tables_to(tables);
            }
            Criteria::Between {
                subject,
                lower,
                upper,
            } => {
                subject.add_referenced_tables_to(tables);
                lower.add_referenced_tables_to(tables);
                upper.add_referenced_tables_to(tables);
            }
            Criteria::In { subject, values } => {
                subject.add_referenced_tables_to(tables);
                for value in values {
                    value.add_referenced_tables_to(tables);
                }
            }
            Criteria::InSubquery { subject, .. } => {
                subject.add_referenced_tables_to(tables);
            }
            Criteria::And(lhs, rhs) | Criteria::Or(lhs, rhs) => {
                lhs.add_referenced_tables_to(tables);
                rhs.add_referenced_tables_to(tables);
            }
            Criteria::Not(criteria) | Criteria::Parens(criteria) => {
                criteria.add_referenced_tables_to(tables);
            }
            Criteria::Expression(expression) => expression.add_referenced_tables_to(tables),
        }
    }

    /// Returns the tables the criteria refers to, in order of first reference.
    pub fn referenced_tables(&self) -> TableSet {
        let mut tables = TableSet::new();
        self.add_referenced_tables_to(&mut tables);
        tables
    }
}

/// Writes `<lhs> <op> <rhs>` without parentheses.
pub(crate) fn write_logic<W, L, R>(out: &mut W, lhs: &L, op: Logic, rhs: &R) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    L: fmt::Display + ?Sized,
    R: fmt::Display + ?Sized,
{
    write!(out, "{} {} {}", lhs, op, rhs)
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write(f)
    }
}

impl From<CriteriaExpression> for Criteria {
    fn from(expression: CriteriaExpression) -> Criteria {
        Criteria::Expression(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;
    use crate::table::Column;

    fn people(name: &str) -> Column {
        Table::new("people").unwrap().column(name).unwrap()
    }

    #[test]
    fn match_template() {
        let c = Criteria::matching(people("height"), Comparison::Greater, 1.8);
        assert_eq!(c.to_string(), "people.height > 1.8");
        let c = Criteria::matching(people("name"), Comparison::Like, "J%");
        assert_eq!(c.to_string(), "people.name LIKE 'J%'");
        let c = Criteria::matching(people("age"), Comparison::NotEqual, 3);
        assert_eq!(c.to_string(), "people.age <> 3");
    }

    #[test]
    fn match_between_columns() {
        let orders = Table::new("orders").unwrap();
        let c = Criteria::matching(
            orders.column("customer").unwrap(),
            Comparison::Equal,
            people("id"),
        );
        assert_eq!(c.to_string(), "orders.customer = people.id");
        let tables = c.referenced_tables();
        assert_eq!(
            tables.iter().map(Table::name).collect::<Vec<_>>(),
            vec!["orders", "people"]
        );
    }

    #[test]
    fn column_by_name() {
        let people = Table::new("people").unwrap();
        let c = Criteria::matching_column(&people, "height", Comparison::Greater, 1.8).unwrap();
        assert_eq!(c.to_string(), "people.height > 1.8");
        let c = Criteria::in_column(&people, "department", vec!["I.T.", "Cooking"]).unwrap();
        assert_eq!(c.to_string(), "people.department IN ( 'I.T.', 'Cooking' )");
        assert_eq!(
            Criteria::matching_column(&people, "bad name", Comparison::Equal, 1),
            Err(Error::InvalidIdentifier("bad name".to_string()))
        );
    }

    #[test]
    fn null_templates() {
        assert_eq!(Criteria::is_null(people("name")).to_string(), "people.name IS NULL");
        assert_eq!(
            Criteria::is_not_null(people("age")).to_string(),
            "people.age IS NOT NULL"
        );
    }

    #[test]
    fn between_template() {
        let c = Criteria::between(people("age"), 18, 30);
        assert_eq!(c.to_string(), "people.age BETWEEN 18 AND 30");
    }

    #[test]
    fn in_template() {
        let c = Criteria::in_values(people("department"), vec!["I.T.", "Cooking"]);
        assert_eq!(c.to_string(), "people.department IN ( 'I.T.', 'Cooking' )");
        let c = Criteria::in_values(people("age"), vec![1, 2, 3]);
        assert_eq!(c.to_string(), "people.age IN ( 1, 2, 3 )");
    }

    #[test]
    fn empty_in_list_renders_literally() {
        let c = Criteria::in_values(people("age"), Vec::<i64>::new());
        assert_eq!(c.to_string(), "people.age IN (  )");
    }

    #[test]
    fn in_subquery_excludes_inner_tables() {
        let staff = Table::new("staff").unwrap();
        let mut inner = SelectQuery::new();
        inner.add_column(&staff, "person_id").unwrap();
        let c = Criteria::in_subquery(people("id"), inner);
        assert_eq!(
            c.to_string(),
            "people.id IN ( SELECT staff.person_id FROM staff )"
        );
        let tables = c.referenced_tables();
        assert_eq!(tables.len(), 1);
        assert!(!tables.contains(&staff));
    }

    #[test]
    fn composites_do_not_add_parentheses() {
        let c = Criteria::or(
            Criteria::is_null(people("name")),
            Criteria::and(
                Criteria::is_null(people("age")),
                Criteria::is_null(people("height")),
            ),
        );
        assert_eq!(
            c.to_string(),
            "people.name IS NULL OR people.age IS NULL AND people.height IS NULL"
        );
    }

    #[test]
    fn explicit_grouping() {
        let c = Criteria::and(
            Criteria::parens(Criteria::or(
                Criteria::is_null(people("name")),
                Criteria::is_null(people("age")),
            )),
            Criteria::not(Criteria::is_null(people("height"))),
        );
        assert_eq!(
            c.to_string(),
            "( people.name IS NULL OR people.age IS NULL ) AND NOT people.height IS NULL"
        );
    }

    #[test]
    fn referenced_tables_are_a_union() {
        let rivers = Table::new("rivers").unwrap();
        let c = Criteria::any(vec![
            Criteria::is_null(people("name")),
            Criteria::between(
                rivers.column("level").unwrap(),
                rivers.column("lower_limit").unwrap(),
                100,
            ),
            Criteria::matching(people("age"), Comparison::Less, 3),
        ]);
        let mut tables = TableSet::new();
        c.add_referenced_tables_to(&mut tables);
        c.add_referenced_tables_to(&mut tables);
        assert_eq!(
            tables.iter().map(Table::name).collect::<Vec<_>>(),
            vec!["people", "rivers"]
        );
    }

    #[test]
    fn writes_into_any_sink() {
        let mut out = String::from("WHERE ");
        Criteria::is_null(people("name")).write(&mut out).unwrap();
        assert_eq!(out, "WHERE people.name IS NULL");
    }
}
