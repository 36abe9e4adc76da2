//! Miscellaneous utilities.

use std::fmt;

/// Helper newtype for implementing `Display` on lists of items.
///
/// Items are separated by a comma and a space.
pub struct CommaSep<'a, T: 'a>(pub &'a [T]);

impl<'a, T> fmt::Display for CommaSep<'a, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            item.fmt(f)?
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_with_commas() {
        assert_eq!(CommaSep(&[1, 2, 3]).to_string(), "1, 2, 3");
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(CommaSep::<u8>(&[]).to_string(), "");
        assert_eq!(CommaSep(&["a"]).to_string(), "a");
    }
}
