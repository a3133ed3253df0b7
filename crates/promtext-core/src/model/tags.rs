//! Label sets.
//!
//! Labels keep insertion order (that is the order they are rendered in) while
//! identity ignores order: two sets with the same pairs are the same series.

use std::hash::{Hash, Hasher};

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct TagSet {
    labels: Vec<(String, String)>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a label. An existing label keeps its position and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.labels.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.labels.push((name, value)),
        }
    }

    /// Copy of this set with one label set; `self` is left untouched.
    pub fn with(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut out = self.clone();
        out.insert(name, value);
        out
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn sorted(&self) -> Vec<&(String, String)> {
        let mut v: Vec<_> = self.labels.iter().collect();
        v.sort();
        v
    }
}

impl PartialEq for TagSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for TagSet {}

impl Hash for TagSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = TagSet::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

impl From<Vec<(String, String)>> for TagSet {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}
