use std::{borrow::Cow, sync::Arc};

use value_visit::{
    Category, CategoryList, Flat, Keyed, List, Map, Positional, StoredValue, Value,
    VisitableContainerMut, VisitableMut, VisitorMut, bridge, list, map,
};

/// Scales every number it reaches, descending into nested containers.
struct Scale {
    factor: i64,
    budget: usize,
}

impl Scale {
    const CATEGORIES: CategoryList = CategoryList::NUMERIC
        .union(CategoryList::NUMERIC_ARRAY)
        .union(CategoryList::CONTAINER);

    fn new(factor: i64) -> Self {
        Self {
            factor,
            budget: usize::MAX,
        }
    }

    fn spend(&mut self) -> bool {
        self.budget -= 1;
        self.budget > 0
    }
}

impl<'k> VisitorMut<'k, Keyed> for Scale {
    fn categories(&self) -> CategoryList {
        Self::CATEGORIES
    }

    fn visit_integral(&mut self, _: &'k str, value: &mut i64) -> bool {
        *value *= self.factor;
        self.spend()
    }

    fn visit_floating(&mut self, _: &'k str, value: &mut f64) -> bool {
        *value *= self.factor as f64;
        self.spend()
    }

    fn visit_integral_array(&mut self, _: &'k str, values: &mut [i64]) -> bool {
        values.iter_mut().for_each(|value| *value *= self.factor);
        self.spend()
    }

    fn visit_map(&mut self, _: &'k str, map: &mut Map) -> bool {
        map.iterate_mut(self)
    }

    fn visit_list(&mut self, _: &'k str, list: &mut List) -> bool {
        list.iterate_mut(self)
    }
}

impl VisitorMut<'_, Positional> for Scale {
    fn categories(&self) -> CategoryList {
        Self::CATEGORIES
    }

    fn visit_integral(&mut self, _: usize, value: &mut i64) -> bool {
        *value *= self.factor;
        self.spend()
    }

    fn visit_floating(&mut self, _: usize, value: &mut f64) -> bool {
        *value *= self.factor as f64;
        self.spend()
    }

    fn visit_integral_array(&mut self, _: usize, values: &mut [i64]) -> bool {
        values.iter_mut().for_each(|value| *value *= self.factor);
        self.spend()
    }

    fn visit_map(&mut self, _: usize, map: &mut Map) -> bool {
        map.iterate_mut(self)
    }

    fn visit_list(&mut self, _: usize, list: &mut List) -> bool {
        list.iterate_mut(self)
    }
}

#[test]
fn test_iterate_mut_edits_in_place() {
    let mut tree = map! {
        "a" => 1,
        "b" => list![2, 0.5, "text"],
        "c" => map! { "d" => vec![3i64, 4] },
    };

    assert!(tree.iterate_mut(&mut Scale::new(10)));
    assert_eq!(
        tree,
        map! {
            "a" => 10,
            "b" => list![20, 5.0, "text"],
            "c" => map! { "d" => vec![30i64, 40] },
        }
    );
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_iterate_mut_stops_permanently() {
    let mut list: List = (1..=5).collect();
    let mut scale = Scale {
        factor: -1,
        budget: 2,
    };
    assert!(!list.iterate_mut(&mut scale));
    assert_eq!(list, list![-1, -2, 3, 4, 5]);
}

#[test]
fn test_undeclared_values_stay_untouched() {
    struct Texts(usize);

    impl VisitorMut<'_, Keyed> for Texts {
        fn categories(&self) -> CategoryList {
            CategoryList::new().with(Category::String)
        }

        fn visit_string(&mut self, _: &str, value: &mut String) -> bool {
            self.0 += 1;
            value.push('!');
            true
        }
    }

    let mut map = map! { "n" => 1, "s" => "hi", "bytes" => vec![1u8], "t" => "yo" };
    let mut texts = Texts(0);
    map.accept_mut("n", &mut texts);
    map.accept_mut("missing", &mut texts);
    assert_eq!(texts.0, 0);
    assert!(matches!(map.get("t"), Some(StoredValue::String(Cow::Borrowed("yo")))));

    map.accept_mut("s", &mut texts);
    assert_eq!(texts.0, 1);
    assert_eq!(map.get("s").and_then(StoredValue::as_str), Some("hi!"));
    assert!(matches!(map.get("t"), Some(StoredValue::String(Cow::Borrowed(_)))));
    assert_eq!(map.get("n"), Some(&StoredValue::Integral(1)));
    assert_eq!(map.get("bytes"), Some(&StoredValue::BinaryArray(vec![1])));
}

#[test]
fn test_accept_mut_by_position() {
    let mut list = list![1, 2];
    let mut scale = Scale::new(3);
    list.accept_mut(1, &mut scale);
    list.accept_mut(2, &mut scale);
    assert_eq!(list, list![1, 6]);
}

#[test]
fn test_nested_containers_can_be_restructured() {
    struct Tag;

    impl VisitorMut<'_, Positional> for Tag {
        fn categories(&self) -> CategoryList {
            CategoryList::CONTAINER
        }

        fn visit_map(&mut self, index: usize, map: &mut Map) -> bool {
            map.insert("position", index as i64);
            map.remove("drop");
            true
        }

        fn visit_list(&mut self, _: usize, list: &mut List) -> bool {
            list.push("tail");
            true
        }
    }

    let mut list = list![map! { "drop" => 1 }, list![], 5];
    assert!(list.iterate_mut(&mut Tag));
    assert_eq!(list, list![map! { "position" => 0 }, list!["tail"], 5]);
}

#[test]
fn test_shared_child_is_detached_before_editing() {
    let child = Arc::new(map! { "x" => 1 });
    let mut parent = map! { "child" => Arc::clone(&child) };

    assert!(parent.iterate_mut(&mut Scale::new(2)));
    assert_eq!(child.get("x"), Some(&StoredValue::Integral(1)));
    assert_eq!(
        parent.get("child").and_then(|c| c.get("x")),
        Some(&StoredValue::Integral(2))
    );
}

#[test]
fn test_leaf_accept_mut() {
    struct Negate;

    impl VisitorMut<'_> for Negate {
        fn categories(&self) -> CategoryList {
            CategoryList::NUMERIC.union(CategoryList::CONTIGUOUS)
        }

        fn visit_integral(&mut self, _: (), value: &mut i64) {
            *value = -*value;
        }

        fn visit_floating_array(&mut self, _: (), values: &mut [f64]) {
            values.iter_mut().for_each(|value| *value = -*value);
        }

        fn visit_binary_array(&mut self, _: (), values: &mut [u8]) {
            values.reverse();
        }
    }

    let mut value = Value::new(4);
    value.accept_mut(&mut Negate);
    assert_eq!(value.get(), &StoredValue::Integral(-4));

    let mut value = Value::new(vec![1.5f64, -2.0]);
    value.accept_mut(&mut Negate);
    assert_eq!(value.get(), &StoredValue::FloatingArray(vec![-1.5, 2.0]));

    let mut stored = StoredValue::from(vec![1u8, 2, 3]);
    stored.accept_mut(&mut Negate);
    assert_eq!(stored, StoredValue::BinaryArray(vec![3, 2, 1]));

    let mut text = Value::new("unchanged");
    text.accept_mut(&mut Negate);
    assert_eq!(text.get().as_str(), Some("unchanged"));

    let mut raw = vec![1.0f64];
    assert_eq!(bridge::dispatch_mut::<_, Flat, _>(&mut raw, (), &mut Negate), Some(()));
    assert_eq!(raw, [-1.0]);
    let mut owned = String::from("x");
    assert_eq!(bridge::dispatch_mut::<_, Flat, _>(&mut owned, (), &mut Negate), None);
    let mut bytes = [1u8, 2];
    assert_eq!(bridge::dispatch_mut::<_, Flat, _>(&mut bytes[..], (), &mut Negate), Some(()));
    assert_eq!(bytes, [2, 1]);
}

#[test]
fn test_edits_are_visible_to_readers() {
    let mut list = list![1, list![2, 3]];
    assert!(list.iterate_mut(&mut Scale::new(5)));
    assert_eq!(list.len(), 2);
    assert_eq!(
        list.get(1).and_then(StoredValue::as_list).map(List::len),
        Some(2)
    );
    assert_eq!(list, list![5, list![10, 15]]);
}
