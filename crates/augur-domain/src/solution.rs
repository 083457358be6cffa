//! Solutions reported by an inference engine

use serde::Serialize;
use std::collections::BTreeMap;

/// One satisfying assignment of a goal's named variables
///
/// Bindings form an unordered set; iteration is by variable name. Anonymous
/// variables (`_`, `_Foo`) are never reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Solution {
    bindings: BTreeMap<String, String>,
}

impl Solution {
    /// Create a solution with no bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a binding
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Value bound to `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    /// Iterate over `(variable, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True for ground goals, which bind nothing
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Solution {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        let mut solution = Solution::new();
        assert!(solution.is_empty());

        solution.bind("Collab", "afi");
        assert_eq!(solution.get("Collab"), Some("afi"));
        assert_eq!(solution.get("Other"), None);
        assert_eq!(solution.len(), 1);
    }

    #[test]
    fn test_from_iter() {
        let solution: Solution = [("Y", "2"), ("X", "1")].into_iter().collect();
        let pairs: Vec<_> = solution.iter().collect();
        assert_eq!(pairs, vec![("X", "1"), ("Y", "2")]);
    }
}
