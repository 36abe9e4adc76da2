//! Ordered set data structure.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A hash set that remembers insertion order.
///
/// Inserting a value that is already present leaves its original position
/// unchanged, so iteration order is the order of first insertion.
#[derive(Clone)]
pub struct OrderSet<T> {
    /// Values in insertion order.
    values: Vec<T>,
    /// Index of each value in `values`.
    index: HashMap<T, usize>,
}

impl<T> OrderSet<T>
where
    T: Eq + Hash + Clone,
{
    /// Creates a new, empty `OrderSet`.
    pub fn new() -> OrderSet<T> {
        OrderSet {
            values: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Checks if the set contains a value.
    pub fn contains(&self, value: &T) -> bool {
        self.index.contains_key(value)
    }

    /// Returns the insertion position of a value, if present.
    pub fn position(&self, value: &T) -> Option<usize> {
        self.index.get(value).cloned()
    }

    /// Inserts a value, returning false if it was already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.index.contains_key(&value) {
            return false;
        }
        self.index.insert(value.clone(), self.values.len());
        self.values.push(value);
        true
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the set has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over the values in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Checks if the set is a subset of another, ignoring order.
    pub fn is_subset(&self, other: &OrderSet<T>) -> bool {
        self.values.iter().all(|v| other.contains(v))
    }

    /// Removes all values from the set.
    pub fn clear(&mut self) {
        self.values.clear();
        self.index.clear();
    }
}

impl<T> Default for OrderSet<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> OrderSet<T> {
        OrderSet::new()
    }
}

impl<T> PartialEq for OrderSet<T>
where
    T: Eq + Hash + Clone,
{
    fn eq(&self, other: &OrderSet<T>) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T> Eq for OrderSet<T> where T: Eq + Hash + Clone {}

impl<T> fmt::Debug for OrderSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.values.iter()).finish()
    }
}

impl<T> Extend<T> for OrderSet<T>
where
    T: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> std::iter::FromIterator<T> for OrderSet<T>
where
    T: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> OrderSet<T> {
        let mut set = OrderSet::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a OrderSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> std::slice::Iter<'a, T> {
        self.values.iter()
    }
}
