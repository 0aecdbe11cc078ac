use value_visit::{
    Capability, Category, CategoryList, Declaration, Declared, Error, Flat, IndexKind, Keyed,
    List, Positional, Visitor, VisitableContainer,
    capability::{self, Group},
    list,
};

#[test]
fn test_single_capabilities() {
    assert_eq!(
        <capability::Integral as Capability>::CATEGORIES.as_slice(),
        &[Category::Integral]
    );
    assert_eq!(
        <capability::Map<Keyed> as Capability>::CATEGORIES.as_slice(),
        &[Category::MapReference]
    );
    assert_eq!(
        <capability::List<Positional> as Capability>::DECLARATION.kind(),
        IndexKind::Position
    );
    assert_eq!(
        <capability::BinaryArray as Capability>::DECLARATION.kind(),
        IndexKind::None
    );
}

#[test]
fn test_group_is_ordered_union() {
    type NumericAndText = Group<(capability::Numeric, capability::String)>;
    assert_eq!(
        <NumericAndText as Capability>::CATEGORIES.as_slice(),
        &[Category::Integral, Category::Floating, Category::String]
    );

    type Overlapping = Group<(capability::String, capability::Scalar, capability::Integral)>;
    assert_eq!(
        <Overlapping as Capability>::CATEGORIES.as_slice(),
        &[Category::String, Category::Integral, Category::Floating]
    );
}

#[test]
fn test_conventional_groups() {
    assert_eq!(
        <capability::Numeric as Capability>::CATEGORIES,
        CategoryList::NUMERIC
    );
    assert_eq!(
        <capability::Scalar as Capability>::CATEGORIES,
        CategoryList::SCALAR
    );
    assert_eq!(
        <capability::NumericArray as Capability>::CATEGORIES,
        CategoryList::NUMERIC_ARRAY
    );
    assert_eq!(
        <capability::Contiguous as Capability>::CATEGORIES,
        CategoryList::CONTIGUOUS
    );
    assert_eq!(
        <capability::Container as Capability>::CATEGORIES,
        CategoryList::CONTAINER
    );
    assert_eq!(
        <capability::Value<Keyed> as Capability>::CATEGORIES,
        CategoryList::VALUE
    );
    assert_eq!(
        <capability::Value<Keyed> as Capability>::DECLARATION.kind(),
        IndexKind::Key
    );
}

#[test]
fn test_declaration_group() {
    let numeric = Declaration::of::<capability::Numeric>();
    let text = Declaration::of::<capability::String>();
    let group = Declaration::group(&[numeric, text]).unwrap();

    assert_eq!(group, Declaration::of::<capability::Scalar>());
    assert!(group.handles(Category::String));
    assert!(!group.handles(Category::BinaryArray));
    assert!(group.includes(&numeric));
    assert!(!numeric.includes(&group));

    let single = Declaration::group(&[text]).unwrap();
    assert_eq!(single, text);
}

#[test]
fn test_declaration_group_errors() {
    assert_eq!(Declaration::group(&[]), Err(Error::EmptyGroup));

    let flat = Declaration::of::<capability::Integral<Flat>>();
    let keyed = Declaration::of::<capability::String<Keyed>>();
    let positional = Declaration::new(IndexKind::Position, CategoryList::NUMERIC);

    assert_eq!(
        Declaration::group(&[flat, flat, keyed]),
        Err(Error::IndexKindMismatch {
            expected: IndexKind::None,
            found: IndexKind::Key,
        })
    );
    assert_eq!(
        Declaration::group(&[positional, keyed]),
        Err(Error::IndexKindMismatch {
            expected: IndexKind::Position,
            found: IndexKind::Key,
        })
    );
}

#[test]
fn test_includes_requires_same_kind() {
    let flat = Declaration::of::<capability::Scalar>();
    let keyed = Declaration::of::<capability::Scalar<Keyed>>();
    assert!(!flat.includes(&keyed));
    assert!(flat.includes(&flat));
}

/// Handles Integral, Floating and String at list positions.
#[derive(Default)]
struct ScalarRecorder {
    seen: Vec<(usize, Category)>,
}

impl Declared for ScalarRecorder {
    type Capability = capability::Scalar<Positional>;
}

impl Visitor<'_, Positional> for ScalarRecorder {
    fn categories(&self) -> CategoryList {
        <<Self as Declared>::Capability as Capability>::CATEGORIES
    }

    fn visit_integral(&mut self, index: usize, _: i64) -> bool {
        self.seen.push((index, Category::Integral));
        true
    }

    fn visit_floating(&mut self, index: usize, _: f64) -> bool {
        self.seen.push((index, Category::Floating));
        true
    }

    fn visit_string(&mut self, index: usize, _: &str) -> bool {
        self.seen.push((index, Category::String));
        true
    }
}

fn mixed() -> List {
    list![1, 2.0, "three", vec![4u8], list![5]]
}

#[test]
fn test_group_visitor_accepts_every_member() {
    let mut recorder = ScalarRecorder::default();
    assert!(mixed().iterate(&mut recorder));
    assert_eq!(
        recorder.seen,
        vec![
            (0, Category::Integral),
            (1, Category::Floating),
            (2, Category::String),
        ]
    );
}

#[test]
fn test_narrow_to_member() {
    let mut recorder = ScalarRecorder::default();
    let list = mixed();

    let mut numbers = recorder.narrow::<capability::Numeric<Positional>>();
    assert_eq!(numbers.declaration().categories(), CategoryList::NUMERIC);
    assert!(list.iterate(&mut numbers));

    let mut text = recorder.narrow::<capability::String<Positional>>();
    list.accept(2, &mut text);
    list.accept(0, &mut text);

    assert_eq!(
        recorder.seen,
        vec![
            (0, Category::Integral),
            (1, Category::Floating),
            (2, Category::String),
        ]
    );
}
