use std::slice;

use crate::{
    Positional, StoredValue, Visitor, VisitorMut, VisitableContainer, VisitableContainerMut, bridge,
};

/// A dense, 0-indexed sequence of values of any category.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct List {
    items: Vec<StoredValue>,
}

impl List {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&StoredValue> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut StoredValue> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn push(&mut self, value: impl Into<StoredValue>) {
        self.items.push(value.into())
    }

    #[inline]
    pub fn pop(&mut self) -> Option<StoredValue> {
        self.items.pop()
    }

    /// Inserts `value` at `index`, shifting later elements up.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[inline]
    pub fn insert(&mut self, index: usize, value: impl Into<StoredValue>) {
        self.items.insert(index, value.into())
    }

    /// Removes the element at `index`, shifting later elements down.
    #[inline]
    pub fn remove(&mut self, index: usize) -> Option<StoredValue> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, StoredValue> {
        self.items.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[StoredValue] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a StoredValue;
    type IntoIter = slice::Iter<'a, StoredValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<V: Into<StoredValue>> FromIterator<V> for List {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<V: Into<StoredValue>> Extend<V> for List {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into))
    }
}

impl From<Vec<StoredValue>> for List {
    #[inline]
    fn from(items: Vec<StoredValue>) -> Self {
        Self { items }
    }
}

impl VisitableContainer for List {
    type Indexing = Positional;

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    fn accept<'k>(&self, index: usize, visitor: &mut dyn Visitor<'k, Positional>) {
        match self.items.get(index) {
            Some(value) => {
                bridge::dispatch::<_, Positional, _>(value, index, visitor);
            }
            None => tracing::trace!(index, len = self.items.len(), "position out of range"),
        }
    }

    fn iterate<'a>(&'a self, visitor: &mut dyn Visitor<'a, Positional>) -> bool {
        for (index, value) in self.items.iter().enumerate() {
            if bridge::dispatch::<_, Positional, _>(value, index, visitor) == Some(false) {
                return false;
            }
        }
        true
    }
}

impl VisitableContainerMut for List {
    fn accept_mut<'k>(&mut self, index: usize, visitor: &mut dyn VisitorMut<'k, Positional>) {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(value) => {
                bridge::dispatch_mut::<_, Positional, _>(value, index, visitor);
            }
            None => tracing::trace!(index, len, "position out of range"),
        }
    }

    fn iterate_mut<'a>(&'a mut self, visitor: &mut dyn VisitorMut<'a, Positional>) -> bool {
        for (index, value) in self.items.iter_mut().enumerate() {
            if bridge::dispatch_mut::<_, Positional, _>(value, index, visitor) == Some(false) {
                return false;
            }
        }
        true
    }
}
