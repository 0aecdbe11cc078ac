use indexmap::{IndexMap, map};

use crate::{
    Keyed, StoredValue, Visitor, VisitorMut, VisitableContainer, VisitableContainerMut, bridge,
};

/// A string-keyed container with unique keys.
///
/// Entries keep their insertion order, which is also the order
/// [`iterate`](VisitableContainer::iterate) visits them in. Replacing the
/// value of an existing key keeps its position. Lookups and inserts hash the
/// key.
///
/// Two maps are equal when they hold the same entries in the same order.
#[derive(Clone, Debug, Default)]
pub struct Map {
    entries: IndexMap<String, StoredValue>,
}

impl Map {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&StoredValue> {
        self.entries.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut StoredValue> {
        self.entries.get_mut(key)
    }

    /// The entry at `index` in insertion order.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(&str, &StoredValue)> {
        self.entries
            .get_index(index)
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Inserts `value` under `key` and returns the value it replaces.
    ///
    /// ```
    /// use value_visit::{Map, StoredValue};
    ///
    /// let mut map = Map::new();
    /// assert_eq!(map.insert("a", 1), None);
    /// map.insert("b", 2);
    /// assert_eq!(map.insert("a", "one"), Some(StoredValue::Integral(1)));
    /// assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
    /// ```
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<StoredValue>,
    ) -> Option<StoredValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes `key`, keeping the order of the remaining entries.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<StoredValue> {
        self.entries.shift_remove(key)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear()
    }

    #[inline]
    pub fn iter(&self) -> MapIter<'_> {
        MapIter {
            inner: self.entries.iter(),
        }
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &StoredValue> + '_ {
        self.entries.values()
    }
}

/// Iterator over the entries of a [`Map`], in order.
#[derive(Clone, Debug)]
pub struct MapIter<'a> {
    inner: map::Iter<'a, String, StoredValue>,
}

impl<'a> Iterator for MapIter<'a> {
    type Item = (&'a str, &'a StoredValue);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for MapIter<'_> {}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a str, &'a StoredValue);
    type IntoIter = MapIter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<StoredValue>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<StoredValue>> Extend<(K, V)> for Map {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl VisitableContainer for Map {
    type Indexing = Keyed;

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn accept<'k>(&self, key: &'k str, visitor: &mut dyn Visitor<'k, Keyed>) {
        match self.get(key) {
            Some(value) => {
                bridge::dispatch::<_, Keyed, _>(value, key, visitor);
            }
            None => tracing::trace!(key, "no such key"),
        }
    }

    fn iterate<'a>(&'a self, visitor: &mut dyn Visitor<'a, Keyed>) -> bool {
        for (key, value) in &self.entries {
            if bridge::dispatch::<_, Keyed, _>(value, key.as_str(), visitor) == Some(false) {
                return false;
            }
        }
        true
    }
}

impl VisitableContainerMut for Map {
    fn accept_mut<'k>(&mut self, key: &'k str, visitor: &mut dyn VisitorMut<'k, Keyed>) {
        match self.entries.get_mut(key) {
            Some(value) => {
                bridge::dispatch_mut::<_, Keyed, _>(value, key, visitor);
            }
            None => tracing::trace!(key, "no such key"),
        }
    }

    fn iterate_mut<'a>(&'a mut self, visitor: &mut dyn VisitorMut<'a, Keyed>) -> bool {
        for (key, value) in self.entries.iter_mut() {
            if bridge::dispatch_mut::<_, Keyed, _>(value, key.as_str(), visitor) == Some(false) {
                return false;
            }
        }
        true
    }
}
