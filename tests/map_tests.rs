use value_visit::{
    ArrayView, Category, CategoryList, Keyed, Map, StoredValue, Visitor, VisitableContainer, map,
};

/// Records `(key, category)` for every call and stops at `stop_at`.
#[derive(Default)]
struct KeyRecorder {
    declared: CategoryList,
    seen: Vec<(String, Category)>,
    stop_at: Option<&'static str>,
}

impl KeyRecorder {
    fn new(declared: CategoryList) -> Self {
        Self {
            declared,
            ..Default::default()
        }
    }

    fn record(&mut self, key: &str, category: Category) -> bool {
        self.seen.push((key.to_owned(), category));
        self.stop_at != Some(key)
    }
}

impl<'k> Visitor<'k, Keyed> for KeyRecorder {
    fn categories(&self) -> CategoryList {
        self.declared
    }

    fn visit_integral(&mut self, key: &'k str, _: i64) -> bool {
        self.record(key, Category::Integral)
    }

    fn visit_floating(&mut self, key: &'k str, _: f64) -> bool {
        self.record(key, Category::Floating)
    }

    fn visit_string(&mut self, key: &'k str, _: &str) -> bool {
        self.record(key, Category::String)
    }

    fn visit_integral_array(&mut self, key: &'k str, _: ArrayView<'_, i64>) -> bool {
        self.record(key, Category::IntegralArray)
    }

    fn visit_map(&mut self, key: &'k str, _: &value_visit::MapNode<'_>) -> bool {
        self.record(key, Category::MapReference)
    }
}

fn sample() -> Map {
    map! {
        "int" => 1,
        "float" => 2.0,
        "text" => "three",
        "ints" => vec![4i64, 5],
        "child" => Map::new(),
    }
}

#[test]
fn test_accept_matching_handler() {
    let map = sample();
    let mut recorder = KeyRecorder::new(CategoryList::NUMERIC);

    map.accept("float", &mut recorder);
    assert_eq!(recorder.seen, vec![("float".to_owned(), Category::Floating)]);

    recorder.seen.clear();
    map.accept("text", &mut recorder);
    map.accept("missing", &mut recorder);
    assert!(recorder.seen.is_empty());
}

#[test]
fn test_accept_with_borrowed_key() {
    let map = sample();
    let mut recorder = KeyRecorder::new(CategoryList::VALUE);
    let key = String::from("child");
    map.accept(&key, &mut recorder);
    drop(key);
    assert_eq!(recorder.seen, vec![("child".to_owned(), Category::MapReference)]);
}

#[test]
fn test_iterate_in_storage_order() {
    let map = sample();
    let mut recorder = KeyRecorder::new(CategoryList::VALUE);
    assert!(map.iterate(&mut recorder));
    assert_eq!(recorder.seen.len(), map.len());
    assert_eq!(
        recorder.seen.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
        ["int", "float", "text", "ints", "child"]
    );
}

#[test]
fn test_iterate_stops_at_false() {
    let map = sample();
    let mut recorder = KeyRecorder::new(CategoryList::VALUE);
    recorder.stop_at = Some("text");
    assert!(!map.iterate(&mut recorder));
    assert_eq!(recorder.seen.len(), 3);
}

#[test]
fn test_iterate_skips_undeclared() {
    let map = sample();
    let mut recorder = KeyRecorder::new(CategoryList::new().with(Category::String));
    assert!(map.iterate(&mut recorder));
    assert_eq!(recorder.seen, vec![("text".to_owned(), Category::String)]);

    let empty = Map::new();
    assert!(empty.is_empty());
    assert!(empty.iterate(&mut recorder));
}

#[test]
fn test_insert_replaces_in_place() {
    let mut map = sample();
    assert_eq!(map.insert("float", "two"), Some(StoredValue::Floating(2.0)));
    assert_eq!(map.len(), 5);
    assert_eq!(map.keys().nth(1), Some("float"));
    assert_eq!(map.get("float").and_then(StoredValue::as_str), Some("two"));
}

#[test]
fn test_remove_keeps_order() {
    let mut map = sample();
    assert_eq!(map.remove("text"), Some(StoredValue::from("three")));
    assert_eq!(map.remove("text"), None);
    assert!(!map.contains_key("text"));
    assert_eq!(
        map.keys().collect::<Vec<_>>(),
        ["int", "float", "ints", "child"]
    );
}

#[test]
fn test_get_mut_and_iter() {
    let mut map = sample();
    if let Some(value) = map.get_mut("int") {
        *value = StoredValue::Integral(10);
    }
    let (key, value) = map.iter().next().unwrap();
    assert_eq!(key, "int");
    assert_eq!(value.as_integral(), Some(10));
    assert_eq!(map.iter().len(), 5);
    assert_eq!((&map).into_iter().count(), 5);
}

#[test]
fn test_from_iterator() {
    let map: Map = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("a"), Some(&StoredValue::Integral(3)));

    let mut map = map;
    map.extend([("c".to_owned(), "x")]);
    assert_eq!(map.values().count(), 3);
    map.clear();
    assert!(map.is_empty());
}

#[test]
fn test_many_keys_keep_order_and_lookups() {
    const COUNT: usize = 50_000;

    let mut map: Map = (0..COUNT).map(|i| (format!("k{i}"), i as i64)).collect();
    assert_eq!(map.len(), COUNT);
    for i in 0..COUNT {
        assert_eq!(map.get(&format!("k{i}")), Some(&StoredValue::Integral(i as i64)));
    }
    assert_eq!(map.insert("k7", "seven"), Some(StoredValue::Integral(7)));
    assert_eq!(map.get_index(7).map(|(key, _)| key), Some("k7"));

    for i in (0..COUNT).step_by(2) {
        assert!(map.remove(&format!("k{i}")).is_some());
    }
    assert_eq!(map.len(), COUNT / 2);
    assert_eq!(map.keys().take(3).collect::<Vec<_>>(), ["k1", "k3", "k5"]);
    assert_eq!(map.get_index(2).and_then(|(_, value)| value.as_str()), None);
    assert_eq!(map.get_index(3).and_then(|(_, value)| value.as_str()), Some("seven"));
    assert_eq!(map.get_index(COUNT), None);
}

#[test]
fn test_equality_follows_order() {
    let ab = map! { "a" => 1, "b" => 2 };
    let ba = map! { "b" => 2, "a" => 1 };
    assert_eq!(ab, map! { "a" => 1, "b" => 2 });
    assert_ne!(ab, ba);
    assert_ne!(ab, map! { "a" => 1 });
}
