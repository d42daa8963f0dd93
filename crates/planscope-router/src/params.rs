//! Path parameters bound by a route match
//!
//! Insertion-ordered: iteration follows the left-to-right order of the
//! placeholders in the pattern that produced them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered `name → value` mapping extracted from a path
///
/// An empty `Params` is a valid successful match for a pattern without
/// placeholders. "No match" is expressed as `Option::None` by the matcher,
/// never as an empty map.
///
/// # Examples
///
/// ```
/// use planscope_router::Params;
///
/// let mut params = Params::new();
/// params.insert("city", "haifa");
/// params.insert("id", "42");
///
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.keys().collect::<Vec<_>>(), vec!["city", "id"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(IndexMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// The value a resolver reports when no registered pattern matched
    pub fn empty() -> Self {
        Self::new()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Binds `name` to `value`
    ///
    /// A repeated name keeps its original position and takes the newest
    /// value (last write wins). Returns the replaced value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut params = Params::new();
        params.insert("a", "1");
        params.insert("b", "2");
        let replaced = params.insert("a", "3");

        assert_eq!(replaced, Some("1".to_string()));
        assert_eq!(params.get("a"), Some("3"));
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_is_empty() {
        assert!(Params::empty().is_empty());
        assert_eq!(Params::empty().len(), 0);
    }

    #[test]
    fn test_from_iter() {
        let params: Params = [("id", "7")].into_iter().collect();
        assert!(params.contains_key("id"));
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("id", "7")]);
    }
}
