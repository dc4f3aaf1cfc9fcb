//! Name-keyed tables that keep insertion order.
//!
//! [`OrderedMap`] backs both [`FeatureTable`] (feature name to tensor) and
//! [`DirectedEdgeData`](super::edge::DirectedEdgeData) (direction label to
//! table). Iteration and serialization follow insertion order; equality does
//! not, so two tables with the same entries in a different order compare
//! equal.

use super::tensor::{self, Tensor};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

/// Per-entity feature tensors keyed by feature name.
pub type FeatureTable = OrderedMap<Tensor>;

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts `value` under `name`.
    ///
    /// An existing entry keeps its position and its old value is returned.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.position(name).map(|idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut V> {
        self.position(name).map(move |idx| &mut self.entries[idx].1)
    }

    pub fn remove(&mut self, name: &str) -> Option<V> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Builds a new map with the same names, in order, from `f` applied to
    /// each entry. Stops at the first error.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(&str, &V) -> Result<U, E>,
    ) -> Result<OrderedMap<U>, E> {
        let mut out = OrderedMap::new();
        for (name, value) in &self.entries {
            out.entries.push((name.clone(), f(name, value)?));
        }
        Ok(out)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }
}

impl OrderedMap<Tensor> {
    /// Copies rows `range` out of every feature.
    pub fn slice_rows(&self, range: Range<usize>) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(name, t)| (name.clone(), tensor::slice_rows(t, range.clone())))
                .collect(),
        }
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map keyed by name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        while let Some((name, value)) = access.next_entry::<String, V>()? {
            if map.insert(name.clone(), value).is_some() {
                return Err(serde::de::Error::custom(format!("duplicate entry '{name}'")));
            }
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    fn t(values: &[f32]) -> Tensor {
        arr1(values).into_dyn()
    }

    #[test]
    fn insert_keeps_position_on_replace() {
        let mut table = FeatureTable::new();
        table.insert("a", t(&[1.0]));
        table.insert("b", t(&[2.0]));
        let old = table.insert("a", t(&[3.0]));

        assert_eq!(old, Some(t(&[1.0])));
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(table.get("a"), Some(&t(&[3.0])));
    }

    #[test]
    fn equality_ignores_order() {
        let left = FeatureTable::new().with("x", t(&[1.0])).with("y", t(&[2.0]));
        let right = FeatureTable::new().with("y", t(&[2.0])).with("x", t(&[1.0]));
        assert_eq!(left, right);

        let different = FeatureTable::new().with("x", t(&[1.0]));
        assert_ne!(left, different);
    }

    #[test]
    fn remove_and_contains() {
        let mut table = FeatureTable::new().with("x", t(&[1.0]));
        assert!(table.contains("x"));
        assert_eq!(table.remove("x"), Some(t(&[1.0])));
        assert!(table.is_empty());
        assert_eq!(table.remove("x"), None);
    }

    #[test]
    fn slice_rows_applies_to_every_feature() {
        let table = FeatureTable::new()
            .with("charge", t(&[0.1, 0.2, 0.3]))
            .with("mass", t(&[1.0, 12.0, 16.0]));
        let sliced = table.slice_rows(1..3);
        assert_eq!(sliced.get("charge"), Some(&t(&[0.2, 0.3])));
        assert_eq!(sliced.get("mass"), Some(&t(&[12.0, 16.0])));
    }

    #[test]
    fn json_keeps_insertion_order() {
        let table: OrderedMap<u32> = [("zeta", 1u32), ("alpha", 2)].into_iter().collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2}"#);

        let back: OrderedMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn json_rejects_duplicate_names() {
        let result: Result<OrderedMap<u32>, _> = serde_json::from_str(r#"{"a":1,"a":2}"#);
        assert!(result.is_err());
    }
}
