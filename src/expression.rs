//! Compound criteria expressions.
//!
//! A [`CriteriaExpression`] is a list of criteria terms joined by logical
//! operators. In Backus-Naur Form:
//!
//! ```text
//! <expression> ::= <term> | <term> <operator> <expression>
//! <operator>   ::= AND | OR
//! ```
//!
//! The chain nests to the right, so `a AND b AND c` is stored as
//! `a AND (b AND c)`. Rendering writes no parentheses, which is only correct
//! when every operator in the chain is the same. [`from_terms`] always builds
//! such a chain; callers mixing operators must group with
//! [`Criteria::Parens`].
//!
//! [`CriteriaExpression`]: struct.CriteriaExpression.html
//! [`from_terms`]: struct.CriteriaExpression.html#method.from_terms
//! [`Criteria::Parens`]: ../criteria/enum.Criteria.html

use std::fmt;
use std::iter;

use crate::criteria::Criteria;
use crate::ops::Logic;
use crate::table::TableSet;
use tracing::trace;

/// A right-nested chain of criteria joined by logical operators.
///
/// Chains can hold many thousands of terms, so every traversal (rendering,
/// table collection, cloning, comparison and dropping) walks the chain in a
/// loop rather than recursing.
#[derive(Default)]
pub struct CriteriaExpression {
    /// The first term, absent only in the empty expression.
    term: Option<Box<Criteria>>,
    /// The operator joining `term` to the rest of the chain.
    rest: Option<(Logic, Box<CriteriaExpression>)>,
}

impl CriteriaExpression {
    /// Creates an expression that renders nothing.
    pub fn empty() -> CriteriaExpression {
        CriteriaExpression::default()
    }

    /// Creates an expression with a single term.
    pub fn leaf(term: Criteria) -> CriteriaExpression {
        CriteriaExpression {
            term: Some(Box::new(term)),
            rest: None,
        }
    }

    /// Creates the expression `<term> <operator> <expression>`.
    pub fn new(term: Criteria, operator: Logic, expression: CriteriaExpression) -> CriteriaExpression {
        CriteriaExpression {
            term: Some(Box::new(term)),
            rest: Some((operator, Box::new(expression))),
        }
    }

    /// Joins each of `terms` to the next with `operator`, keeping their order.
    ///
    /// An empty list gives the empty expression, and a single term gives a
    /// leaf with no operator.
    pub fn from_terms(terms: Vec<Criteria>, operator: Logic) -> CriteriaExpression {
        trace!(terms = terms.len(), %operator, "Folding criteria expression");
        let mut terms = terms.into_iter().rev();
        let last = match terms.next() {
            Some(term) => CriteriaExpression::leaf(term),
            None => return CriteriaExpression::empty(),
        };
        terms.fold(last, |expression, term| {
            CriteriaExpression::new(term, operator, expression)
        })
    }

    /// Returns the first term of the expression.
    pub fn term(&self) -> Option<&Criteria> {
        self.term.as_deref()
    }

    /// Returns the operator joining the first term to the trailing expression.
    pub fn operator(&self) -> Option<Logic> {
        self.rest.as_ref().map(|(op, _)| *op)
    }

    /// Returns the trailing expression.
    pub fn expression(&self) -> Option<&CriteriaExpression> {
        self.rest.as_ref().map(|(_, expression)| &**expression)
    }

    /// Returns true if the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.term.is_none()
    }

    /// Returns an iterator over the nodes of the chain, starting with this one.
    fn nodes(&self) -> impl Iterator<Item = &CriteriaExpression> {
        iter::successors(Some(self), |node| node.expression())
    }

    /// Returns the number of terms in the chain.
    pub fn len(&self) -> usize {
        self.nodes().filter(|node| node.term.is_some()).count()
    }

    /// Writes the SQL representation of the expression to `out`.
    ///
    /// Terms are joined by their operators without parentheses. The empty
    /// expression writes nothing.
    pub fn write<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        for node in self.nodes() {
            if let Some(term) = &node.term {
                term.write(out)?;
            }
            if let Some(op) = node.operator() {
                write!(out, " {} ", op)?;
            }
        }
        Ok(())
    }

    /// Adds every table referenced by any term into `tables`.
    pub fn add_referenced_tables_to(&self, tables: &mut TableSet) {
        for term in self.nodes().filter_map(CriteriaExpression::term) {
            term.add_referenced_tables_to(tables);
        }
    }
}

impl Clone for CriteriaExpression {
    fn clone(&self) -> CriteriaExpression {
        let nodes: Vec<_> = self.nodes().collect();
        let mut nodes = nodes.into_iter().rev();
        let mut chain = match nodes.next() {
            Some(last) => CriteriaExpression {
                term: last.term.clone(),
                rest: None,
            },
            None => return CriteriaExpression::empty(),
        };
        for node in nodes {
            // Every node but the last has a trailing expression.
            let op = node.operator().unwrap_or(Logic::And);
            chain = CriteriaExpression {
                term: node.term.clone(),
                rest: Some((op, Box::new(chain))),
            };
        }
        chain
    }
}

impl PartialEq for CriteriaExpression {
    fn eq(&self, other: &CriteriaExpression) -> bool {
        let mut lhs = self.nodes();
        let mut rhs = other.nodes();
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => return true,
                (Some(l), Some(r)) if l.term == r.term && l.operator() == r.operator() => (),
                _ => return false,
            }
        }
    }
}

impl fmt::Debug for CriteriaExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut list = f.debug_list();
        for node in self.nodes() {
            if let Some(term) = &node.term {
                list.entry(term);
            }
            if let Some(op) = node.operator() {
                list.entry(&op);
            }
        }
        list.finish()
    }
}

impl Drop for CriteriaExpression {
    fn drop(&mut self) {
        let mut rest = self.rest.take();
        while let Some((_, mut next)) = rest {
            rest = next.rest.take();
        }
    }
}

impl fmt::Display for CriteriaExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ops::Comparison;
    use crate::table::{Column, Table};

    fn col(table: &str, name: &str) -> Column {
        Table::new(table).unwrap().column(name).unwrap()
    }

    fn terms(n: usize) -> Vec<Criteria> {
        (0..n)
            .map(|i| Criteria::matching(col("t", "c"), Comparison::Equal, i as i64))
            .collect()
    }

    #[test]
    fn empty_renders_nothing() {
        let expression = CriteriaExpression::from_terms(vec![], Logic::And);
        assert!(expression.is_empty());
        assert_eq!(expression.to_string(), "");
        let mut tables = TableSet::new();
        expression.add_referenced_tables_to(&mut tables);
        assert!(tables.is_empty());
    }

    #[test]
    fn single_term_renders_alone() {
        let term = Criteria::is_null(col("people", "name"));
        let expression = CriteriaExpression::from_terms(vec![term.clone()], Logic::Or);
        assert_eq!(expression.to_string(), term.to_string());
        assert_eq!(expression.operator(), None);
        assert!(expression.expression().is_none());
    }

    #[test]
    fn joins_in_list_order() {
        for &op in &[Logic::And, Logic::Or] {
            for n in 2..6 {
                let list = terms(n);
                let expected = list
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(format!(" {} ", op).as_str());
                let expression = CriteriaExpression::from_terms(list, op);
                assert_eq!(expression.to_string(), expected);
                assert_eq!(expression.len(), n);
            }
        }
    }

    #[test]
    fn nests_to_the_right() {
        let expression = CriteriaExpression::from_terms(terms(3), Logic::And);
        assert_eq!(expression.term().unwrap().to_string(), "t.c = 0");
        assert_eq!(expression.operator(), Some(Logic::And));
        let tail = expression.expression().unwrap();
        assert_eq!(tail.to_string(), "t.c = 1 AND t.c = 2");
        assert_eq!(tail.expression().unwrap().operator(), None);
    }

    #[test]
    fn explicit_nesting() {
        let inner = CriteriaExpression::from_terms(terms(2), Logic::Or);
        let expression = CriteriaExpression::new(
            Criteria::is_null(col("t", "d")),
            Logic::And,
            CriteriaExpression::leaf(Criteria::parens(inner.into())),
        );
        assert_eq!(
            expression.to_string(),
            "t.d IS NULL AND ( t.c = 0 OR t.c = 1 )"
        );
    }

    #[test]
    fn referenced_tables_ignore_shape() {
        let list = vec![
            Criteria::is_null(col("a", "x")),
            Criteria::is_null(col("b", "x")),
            Criteria::is_null(col("a", "y")),
        ];
        let flat = Criteria::all(list.clone());
        let nested = Criteria::and(
            Criteria::and(list[0].clone(), list[1].clone()),
            list[2].clone(),
        );
        assert_eq!(flat.referenced_tables(), nested.referenced_tables());
        let mut tables = TableSet::new();
        let expression = CriteriaExpression::from_terms(list, Logic::Or);
        expression.add_referenced_tables_to(&mut tables);
        expression.add_referenced_tables_to(&mut tables);
        assert_eq!(tables, flat.referenced_tables());
        assert_eq!(tables.len(), 2);
    }

    #[test]
    fn long_chains_do_not_recurse() {
        let n = 100_000;
        let expression = CriteriaExpression::from_terms(terms(n), Logic::And);
        assert_eq!(expression.len(), n);

        let mut tables = TableSet::new();
        expression.add_referenced_tables_to(&mut tables);
        assert_eq!(tables.len(), 1);

        let sql = expression.to_string();
        assert!(sql.starts_with("t.c = 0 AND t.c = 1 AND "));
        assert!(sql.ends_with(" AND t.c = 99999"));
        assert_eq!(sql.matches(" AND ").count(), n - 1);

        let copy = expression.clone();
        assert!(copy == expression);
        drop(copy);
        drop(expression);
    }

    #[test]
    fn trailing_empty_expression_keeps_operator() {
        let expression = CriteriaExpression::new(
            Criteria::is_null(col("t", "d")),
            Logic::Or,
            CriteriaExpression::empty(),
        );
        assert_eq!(expression.to_string(), "t.d IS NULL OR ");
        assert_eq!(expression.len(), 1);
    }
}
