//! `Bindings` type mapping variable names to values.

use std::{
    collections::{hash_map, BTreeSet, HashMap},
    ops,
};

use formula_tree::Number;

/// Map of variable names to [`Number`]s used to substitute free variables of a formula.
///
/// # Examples
///
/// ```
/// use formula_eval::{Bindings, Number};
///
/// let bindings = Bindings::new().with("x", 2).with("y", 8.2);
/// assert_eq!(bindings["x"], Number::Int(2));
/// assert_eq!(bindings.get("y"), Some(Number::Real(8.2)));
/// assert!(bindings.get("z").is_none());
///
/// // Bindings can also be collected from an iterator.
/// let bindings: Bindings = [("x", 1), ("y", -1)].into_iter().collect();
/// assert_eq!(bindings.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, Number>,
}

impl Bindings {
    /// Creates empty bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding in the builder fashion.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Number>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a binding, returning the previous value bound to the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Number>) -> Option<Number> {
        self.values.insert(name.into(), value.into())
    }

    /// Returns the value bound to the specified name.
    pub fn get(&self, name: &str) -> Option<Number> {
        self.values.get(name).copied()
    }

    /// Checks if a value is bound to the specified name.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of bindings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks whether there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over bound names.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    /// Returns bound names as an ordered set.
    pub fn name_set(&self) -> BTreeSet<String> {
        self.values.keys().cloned().collect()
    }

    /// Checks whether the bound names are exactly `names`.
    pub(crate) fn matches(&self, names: &BTreeSet<String>) -> bool {
        self.len() == names.len() && names.iter().all(|name| self.contains(name))
    }

    /// Iterates over bindings.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Number)> + '_ {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    /// Returns bindings extended with `other`. If both bindings contain the same name,
    /// the value from `other` wins.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut values = self.values.clone();
        values.extend(other.iter().map(|(name, value)| (name.to_owned(), value)));
        Self { values }
    }
}

impl ops::Index<&str> for Bindings {
    type Output = Number;

    fn index(&self, index: &str) -> &Self::Output {
        self.values
            .get(index)
            .unwrap_or_else(|| panic!("Variable `{index}` is not bound"))
    }
}

impl<K: Into<String>, V: Into<Number>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Number>> Extend<(K, V)> for Bindings {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let new_values = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()));
        self.values.extend(new_values);
    }
}

impl IntoIterator for Bindings {
    type Item = (String, Number);
    type IntoIter = hash_map::IntoIter<String, Number>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_names() {
        let bindings = Bindings::new().with("x", 1).with("y", 2.0);
        let names: BTreeSet<_> = ["x".to_owned(), "y".to_owned()].into();
        assert!(bindings.matches(&names));

        let subset: BTreeSet<_> = ["x".to_owned()].into();
        assert!(!bindings.matches(&subset));
        let superset: BTreeSet<_> = ["x".to_owned(), "y".to_owned(), "z".to_owned()].into();
        assert!(!bindings.matches(&superset));
    }

    #[test]
    fn merging_bindings() {
        let first = Bindings::new().with("x", 1).with("y", 2);
        let second = Bindings::new().with("y", 3).with("z", true);
        let merged = first.merged(&second);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged["y"], Number::Int(3));
        assert_eq!(merged["z"], Number::Bool(true));
        // Original bindings are not changed.
        assert_eq!(first["y"], Number::Int(2));
    }

    #[test]
    fn extending_bindings() {
        let mut bindings = Bindings::new();
        bindings.extend([("a", 1.5), ("b", -0.5)]);
        let mut names: Vec<_> = bindings.names().collect();
        names.sort_unstable();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(bindings.insert("a", 0), Some(Number::Real(1.5)));
    }
}
