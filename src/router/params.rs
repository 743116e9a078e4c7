use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Maximum number of distinct parameter names stored inline before spilling to the heap.
/// Most navigation paths carry one or two path parameters plus a handful of query keys.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Multi-valued parameter mapping produced by a match
///
/// Keys keep first-insertion order and each key keeps its values in insertion
/// order, so `?tag=a&tag=b` yields `tag => ["a", "b"]`. Path parameters and
/// query parameters share the same mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    entries: SmallVec<[(String, Vec<String>); MAX_INLINE_PARAMS]>,
}

impl Parameters {
    /// Create an empty mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// First value recorded for `name`
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// All values recorded for `name`, empty if the key is absent
    #[inline]
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[String] {
        self.position(name)
            .map(|i| self.entries[i].1.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the values of `name` with a single value
    ///
    /// Used for path parameters: a parameter captured deeper in the path
    /// overrides one with the same name captured earlier.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(i) => self.entries[i].1 = vec![value],
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Append one value to `name`, creating the key if needed
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(i) => self.entries[i].1.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Append every value of `other` onto this mapping, key by key
    pub fn merge(&mut self, other: &Parameters) {
        for (name, values) in other.iter() {
            for value in values {
                self.append(name, value.as_str());
            }
        }
    }

    /// Iterate keys with their values in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Key names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Convert to a `HashMap` for callers that want keyed access without order
    /// Note: This allocates
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, Vec<String>> {
        self.entries.iter().cloned().collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == name)
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (k, v) in iter {
            params.append(k, v);
        }
        params
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
