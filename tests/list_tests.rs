use value_visit::{
    Category, CategoryList, FreeVisitor, List, Positional, StoredValue, ValueRef, Visitor,
    VisitableContainer, capability, list,
};

/// Records every integral position and stops when `limit` calls were made.
struct Positions {
    seen: Vec<usize>,
    limit: usize,
}

impl Visitor<'_, Positional> for Positions {
    fn categories(&self) -> CategoryList {
        CategoryList::new().with(Category::Integral)
    }

    fn visit_integral(&mut self, index: usize, _: i64) -> bool {
        self.seen.push(index);
        self.seen.len() < self.limit
    }
}

#[test]
fn test_iterate_in_position_order() {
    let list: List = (0..5).collect();
    let mut positions = Positions {
        seen: Vec::new(),
        limit: usize::MAX,
    };
    assert!(list.iterate(&mut positions));
    assert_eq!(positions.seen, [0, 1, 2, 3, 4]);
    assert_eq!(positions.seen.len(), list.len());
}

#[test]
fn test_iterate_stops_permanently() {
    let list: List = (0..5).collect();
    let mut positions = Positions {
        seen: Vec::new(),
        limit: 2,
    };
    assert!(!list.iterate(&mut positions));
    assert_eq!(positions.seen, [0, 1]);
}

#[test]
fn test_accept_out_of_range_is_a_no_op() {
    let list = list![10, 20];
    let mut positions = Positions {
        seen: Vec::new(),
        limit: usize::MAX,
    };
    list.accept(1, &mut positions);
    list.accept(2, &mut positions);
    list.accept(usize::MAX, &mut positions);
    assert_eq!(positions.seen, [1]);
}

#[test]
fn test_string_visitor_over_numbers_makes_no_calls() {
    let mut calls = 0;
    let mut visitor = FreeVisitor::<capability::String<Positional>>::builder()
        .string(|_: usize, _: &str| {
            calls += 1;
            true
        })
        .build()
        .unwrap();

    let list = list![1, 2.5, 3, vec![4i64], vec![5.0f64]];
    assert!(list.iterate(&mut visitor));
    drop(visitor);
    assert_eq!(calls, 0);
}

#[test]
fn test_mutation() {
    let mut list = List::new();
    assert!(list.is_empty());
    list.push(1);
    list.push("two");
    list.insert(0, 0.5);
    assert_eq!(list.len(), 3);
    assert_eq!(list.get(0), Some(&StoredValue::Floating(0.5)));
    assert_eq!(list.remove(5), None);
    assert_eq!(list.remove(1), Some(StoredValue::Integral(1)));
    assert_eq!(list.pop().as_ref().and_then(StoredValue::as_str), Some("two"));
    if let Some(value) = list.get_mut(0) {
        *value = StoredValue::from(vec![1u8]);
    }
    assert_eq!(list.iter().next().map(StoredValue::category), Some(Category::BinaryArray));
    list.clear();
    assert!(list.as_slice().is_empty());
}

#[test]
fn test_heterogeneous_elements_reach_one_handler_each() {
    let mut categories = Vec::new();
    let mut visitor = FreeVisitor::<capability::Value<Positional>>::builder()
        .rest(|index: usize, value: ValueRef<'_>| {
            categories.push((index, value.category()));
            true
        })
        .build()
        .unwrap();

    let list = list![
        1,
        1.5,
        "s",
        vec![1i64],
        vec![1.0f64],
        vec![1u8],
        value_visit::Map::new(),
        List::new(),
    ];
    assert!(list.iterate(&mut visitor));
    drop(visitor);
    assert_eq!(
        categories,
        Category::ALL.into_iter().enumerate().collect::<Vec<_>>()
    );
}
