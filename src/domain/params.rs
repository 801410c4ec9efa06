//! Query parameters for list endpoints.
//!
//! Absence means "no filter": a key whose value is missing, JSON `null`, or
//! the empty string never reaches the outgoing query string.

use serde_json::Value;

/// Ordered filter map (search, categoryId, sellerId, page, limit, skip,
/// sortBy, sortOrder, status, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, or remove it when `value` is absent or renders empty.
    pub fn set<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        let value = value.map(|v| v.to_string()).filter(|v| !v.is_empty());
        match (self.pairs.iter().position(|(k, _)| k == key), value) {
            (Some(idx), Some(value)) => self.pairs[idx].1 = value,
            (Some(idx), None) => {
                self.pairs.remove(idx);
            }
            (None, Some(value)) => self.pairs.push((key.to_string(), value)),
            (None, None) => {}
        }
        self
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.set(key, Some(value));
        self
    }

    pub fn with_opt<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        self.set(key, value);
        self
    }

    /// Build from a JSON object. Nulls and empty strings are dropped, scalars
    /// are rendered as text, arrays and objects as compact JSON.
    pub fn from_json(value: &Value) -> Self {
        let mut params = Self::new();
        if let Value::Object(map) = value {
            for (key, value) in map {
                let text = match value {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                };
                params.set(key, text);
            }
        }
        params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

impl<K: AsRef<str>, V: ToString> FromIterator<(K, Option<V>)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.set(key.as_ref(), value);
        }
        params
    }
}
