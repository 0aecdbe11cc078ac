//! `Serialize` for value trees.
//!
//! Containers are written by traversing them with a visitor that forwards
//! each element to the serializer. The first serializer error stops the
//! traversal and is returned.

use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{
    ArrayElement, ArrayView, CategoryList, Flat, Keyed, List, ListNode, Map, MapNode, Positional,
    StoredValue, Value, Visitable, Visitor,
};

impl<T: ArrayElement + Serialize> Serialize for ArrayView<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

struct Bytes<'a>(&'a [u8]);

impl Serialize for Bytes<'_> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0)
    }
}

/// A nested container reached through its traversal protocol.
enum Node<'a> {
    Map(&'a MapNode<'a>),
    List(&'a ListNode<'a>),
}

impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Map(map) => {
                let mut sink = EntrySink {
                    map: serializer.serialize_map(Some(map.len()))?,
                    error: None,
                };
                map.iterate(&mut sink);
                match sink.error {
                    Some(error) => Err(error),
                    None => sink.map.end(),
                }
            }
            Node::List(list) => {
                let mut sink = ElementSink {
                    seq: serializer.serialize_seq(Some(list.len()))?,
                    error: None,
                };
                list.iterate(&mut sink);
                match sink.error {
                    Some(error) => Err(error),
                    None => sink.seq.end(),
                }
            }
        }
    }
}

struct EntrySink<M: SerializeMap> {
    map: M,
    error: Option<M::Error>,
}

impl<M: SerializeMap> EntrySink<M> {
    fn entry<V: Serialize + ?Sized>(&mut self, key: &str, value: &V) -> bool {
        match self.map.serialize_entry(key, value) {
            Ok(()) => true,
            Err(error) => {
                self.error = Some(error);
                false
            }
        }
    }
}

impl<'k, M: SerializeMap> Visitor<'k, Keyed> for EntrySink<M> {
    fn categories(&self) -> CategoryList {
        CategoryList::VALUE
    }

    fn visit_integral(&mut self, key: &'k str, value: i64) -> bool {
        self.entry(key, &value)
    }

    fn visit_floating(&mut self, key: &'k str, value: f64) -> bool {
        self.entry(key, &value)
    }

    fn visit_string(&mut self, key: &'k str, value: &str) -> bool {
        self.entry(key, value)
    }

    fn visit_integral_array(&mut self, key: &'k str, value: ArrayView<'_, i64>) -> bool {
        self.entry(key, &value)
    }

    fn visit_floating_array(&mut self, key: &'k str, value: ArrayView<'_, f64>) -> bool {
        self.entry(key, &value)
    }

    fn visit_binary_array(&mut self, key: &'k str, value: ArrayView<'_, u8>) -> bool {
        self.entry(key, &Bytes(value.as_bytes()))
    }

    fn visit_map(&mut self, key: &'k str, map: &MapNode<'_>) -> bool {
        self.entry(key, &Node::Map(map))
    }

    fn visit_list(&mut self, key: &'k str, list: &ListNode<'_>) -> bool {
        self.entry(key, &Node::List(list))
    }
}

struct ElementSink<Q: SerializeSeq> {
    seq: Q,
    error: Option<Q::Error>,
}

impl<Q: SerializeSeq> ElementSink<Q> {
    fn element<V: Serialize + ?Sized>(&mut self, value: &V) -> bool {
        match self.seq.serialize_element(value) {
            Ok(()) => true,
            Err(error) => {
                self.error = Some(error);
                false
            }
        }
    }
}

impl<Q: SerializeSeq> Visitor<'_, Positional> for ElementSink<Q> {
    fn categories(&self) -> CategoryList {
        CategoryList::VALUE
    }

    fn visit_integral(&mut self, _: usize, value: i64) -> bool {
        self.element(&value)
    }

    fn visit_floating(&mut self, _: usize, value: f64) -> bool {
        self.element(&value)
    }

    fn visit_string(&mut self, _: usize, value: &str) -> bool {
        self.element(value)
    }

    fn visit_integral_array(&mut self, _: usize, value: ArrayView<'_, i64>) -> bool {
        self.element(&value)
    }

    fn visit_floating_array(&mut self, _: usize, value: ArrayView<'_, f64>) -> bool {
        self.element(&value)
    }

    fn visit_binary_array(&mut self, _: usize, value: ArrayView<'_, u8>) -> bool {
        self.element(&Bytes(value.as_bytes()))
    }

    fn visit_map(&mut self, _: usize, map: &MapNode<'_>) -> bool {
        self.element(&Node::Map(map))
    }

    fn visit_list(&mut self, _: usize, list: &ListNode<'_>) -> bool {
        self.element(&Node::List(list))
    }
}

/// Serializes the single value it is handed.
struct LeafSink<S: Serializer> {
    serializer: Option<S>,
    result: Option<Result<S::Ok, S::Error>>,
}

impl<S: Serializer> LeafSink<S> {
    fn emit<V: Serialize + ?Sized>(&mut self, value: &V) {
        if let Some(serializer) = self.serializer.take() {
            self.result = Some(value.serialize(serializer));
        }
    }

    fn finish(self) -> Result<S::Ok, S::Error> {
        self.result
            .unwrap_or_else(|| Err(ser::Error::custom("value was not visited")))
    }
}

impl<S: Serializer> Visitor<'_, Flat> for LeafSink<S> {
    fn categories(&self) -> CategoryList {
        CategoryList::VALUE
    }

    fn visit_integral(&mut self, _: (), value: i64) {
        self.emit(&value)
    }

    fn visit_floating(&mut self, _: (), value: f64) {
        self.emit(&value)
    }

    fn visit_string(&mut self, _: (), value: &str) {
        self.emit(value)
    }

    fn visit_integral_array(&mut self, _: (), value: ArrayView<'_, i64>) {
        self.emit(&value)
    }

    fn visit_floating_array(&mut self, _: (), value: ArrayView<'_, f64>) {
        self.emit(&value)
    }

    fn visit_binary_array(&mut self, _: (), value: ArrayView<'_, u8>) {
        self.emit(&Bytes(value.as_bytes()))
    }

    fn visit_map(&mut self, _: (), map: &MapNode<'_>) {
        self.emit(&Node::Map(map))
    }

    fn visit_list(&mut self, _: (), list: &ListNode<'_>) {
        self.emit(&Node::List(list))
    }
}

fn serialize_leaf<T: Visitable + ?Sized, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut sink = LeafSink {
        serializer: Some(serializer),
        result: None,
    };
    value.accept(&mut sink);
    sink.finish()
}

impl Serialize for StoredValue {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_leaf(self, serializer)
    }
}

impl Serialize for Value {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_leaf(self, serializer)
    }
}

impl Serialize for Map {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Node::Map(self).serialize(serializer)
    }
}

impl Serialize for List {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Node::List(self).serialize(serializer)
    }
}
