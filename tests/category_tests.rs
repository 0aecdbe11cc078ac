use value_visit::{
    Category::{self, *},
    CategoryList, category,
};

#[test]
fn test_category_predicates() {
    for c in Category::ALL {
        assert_eq!(c.is_scalar(), c.is_numeric() || c == String);
        assert_eq!(c.is_contiguous(), c.is_numeric_array() || c == BinaryArray);
        assert_eq!(
            [c.is_scalar(), c.is_contiguous(), c.is_container()]
                .iter()
                .filter(|b| **b)
                .count(),
            1,
            "{c} must be in exactly one bucket"
        );
    }
    assert_eq!(Category::ALL.len(), Category::COUNT);
    assert_eq!(MapReference.to_string(), "MapReference");
}

#[test]
fn test_unique_keeps_first_occurrence() {
    let list = category::unique(&[String, Integral, String, Floating, Integral]);
    assert_eq!(list.as_slice(), &[String, Integral, Floating]);
    assert!(category::unique(&[]).is_empty());
}

#[test]
fn test_concat_keeps_duplicates() {
    let list = category::concat(&[&[Integral, String], &[String], &[]]);
    assert_eq!(list, vec![Integral, String, String]);
}

#[test]
fn test_union_and_intersect() {
    let a: &[Category] = &[Floating, Integral, Floating];
    let b: &[Category] = &[String, Integral];

    let union = category::union(&[a, b]);
    assert_eq!(union.as_slice(), &[Floating, Integral, String]);

    assert_eq!(category::intersect(union.as_slice(), a), category::unique(a));
    assert_eq!(category::union(&[a, a]), category::unique(a));
    assert_eq!(category::intersect(b, a).as_slice(), &[Integral]);
    assert!(category::intersect(&[BinaryArray], b).is_empty());
}

#[test]
fn test_intersect_keeps_order_of_first_argument() {
    let value = CategoryList::VALUE;
    let picked = CategoryList::new().with(ListReference).with(Integral);
    assert_eq!(value.intersect(picked).as_slice(), &[Integral, ListReference]);
    assert_eq!(picked.intersect(value).as_slice(), &[ListReference, Integral]);
}

#[test]
fn test_named_lists() {
    assert_eq!(CategoryList::NUMERIC.as_slice(), &[Integral, Floating]);
    assert_eq!(CategoryList::SCALAR.as_slice(), &[Integral, Floating, String]);
    assert_eq!(
        CategoryList::CONTIGUOUS.as_slice(),
        &[IntegralArray, FloatingArray, BinaryArray]
    );
    assert_eq!(CategoryList::CONTAINER.as_slice(), &[MapReference, ListReference]);
    assert_eq!(CategoryList::VALUE.as_slice(), &Category::ALL);
}

#[test]
fn test_membership_ignores_order() {
    let a = CategoryList::new().with(String).with(Integral);
    let b = CategoryList::new().with(Integral).with(String);
    assert_ne!(a, b);
    assert!(a.same_set(b));
    assert!(CategoryList::SCALAR.includes(a));
    assert!(!a.includes(CategoryList::SCALAR));
    assert!(a.includes(CategoryList::EMPTY));
    assert_eq!(a.position(Integral), Some(1));
    assert_eq!(a.position(Floating), None);
}

#[test]
fn test_with_ignores_duplicates() {
    let list = CategoryList::new().with(String).with(String);
    assert_eq!(list.len(), 1);
    let collected: CategoryList = [BinaryArray, BinaryArray, Integral].into_iter().collect();
    assert_eq!(collected.as_slice(), &[BinaryArray, Integral]);
    assert_eq!(collected.into_iter().collect::<Vec<_>>(), vec![BinaryArray, Integral]);
    assert_eq!(format!("{collected:?}"), "[BinaryArray, Integral]");
}

#[test]
fn test_const_evaluation() {
    const TEXT_AND_BYTES: CategoryList = category::union(&[&[String], &[BinaryArray, String]]);
    const ONLY_TEXT: CategoryList = TEXT_AND_BYTES.intersect(CategoryList::SCALAR);
    assert_eq!(TEXT_AND_BYTES.as_slice(), &[String, BinaryArray]);
    assert_eq!(ONLY_TEXT.as_slice(), &[String]);
}
