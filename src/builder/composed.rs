use std::{fmt, marker::PhantomData};

use super::{Idx, Sig};
use crate::{
    ArrayView, Capability, Category, CategoryList, Declared, Error, Flow, ListNode, MapNode,
    Result, Visitor,
};

type Part<'h, K> = Box<dyn for<'k> Visitor<'k, K> + 'h>;

/// A visitor for the group `C` assembled from complete visitors of disjoint
/// parts of it.
///
/// Each category is delegated to the one part declaring it.
///
/// # Example
///
/// ```
/// use value_visit::{ComposedVisitor, FreeVisitor, Visitable, Value, capability};
///
/// let numbers = FreeVisitor::<capability::Numeric>::builder()
///     .integral(|_: (), value: i64| println!("int {value}"))
///     .floating(|_: (), value: f64| println!("float {value}"))
///     .build()
///     .unwrap();
/// let text = FreeVisitor::<capability::String>::builder()
///     .string(|_: (), value: &str| println!("text {value}"))
///     .build()
///     .unwrap();
///
/// let mut scalar = ComposedVisitor::<capability::Scalar>::builder()
///     .with(numbers)
///     .with(text)
///     .build()
///     .unwrap();
///
/// Value::from("hello").accept(&mut scalar);
/// ```
///
/// Parts must share the group's indexing:
///
/// ```compile_fail
/// use value_visit::{ComposedVisitor, FreeVisitor, Keyed, capability};
///
/// let keyed = FreeVisitor::<capability::String<Keyed>>::builder()
///     .string(|_: &str, _: &str| true)
///     .build()
///     .unwrap();
/// let _ = ComposedVisitor::<capability::Scalar>::builder().with(keyed);
/// ```
pub struct ComposedVisitor<'h, C: Capability> {
    parts: Vec<Part<'h, C::Indexing>>,
    routes: [Option<usize>; Category::COUNT],
    capability: PhantomData<C>,
}

impl<'h, C: Capability> ComposedVisitor<'h, C> {
    #[inline]
    pub fn builder() -> ComposedVisitorBuilder<'h, C> {
        ComposedVisitorBuilder {
            parts: Vec::new(),
            capability: PhantomData,
        }
    }

    /// Number of parts.
    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    #[inline]
    fn part(&mut self, category: Category) -> Option<&mut (dyn for<'k> Visitor<'k, C::Indexing> + 'h)> {
        match self.routes[category.index()] {
            Some(part) => self.parts.get_mut(part).map(|part| &mut **part),
            None => None,
        }
    }
}

impl<C: Capability> Declared for ComposedVisitor<'_, C> {
    type Capability = C;
}

impl<C: Capability> fmt::Debug for ComposedVisitor<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedVisitor")
            .field("categories", &C::CATEGORIES)
            .field("parts", &self.parts.len())
            .finish()
    }
}

pub struct ComposedVisitorBuilder<'h, C: Capability> {
    parts: Vec<Part<'h, C::Indexing>>,
    capability: PhantomData<C>,
}

impl<'h, C: Capability> ComposedVisitorBuilder<'h, C> {
    /// Adds a part. It must be a visitor for every key or position, with the
    /// group's indexing.
    pub fn with<V>(mut self, part: V) -> Self
    where
        V: for<'k> Visitor<'k, C::Indexing> + 'h,
    {
        self.parts.push(Box::new(part));
        self
    }

    /// Routes every category of `C` to the part declaring it.
    ///
    /// # Errors
    ///
    /// - [`Error::UnusedHandler`] if a part declares no categories
    /// - [`Error::UndeclaredCategory`] if a part declares a category `C` does
    ///   not
    /// - [`Error::OverlappingHandlers`] if two parts declare the same category
    /// - [`Error::MissingHandler`] if no part declares a category of `C`
    pub fn build(self) -> Result<ComposedVisitor<'h, C>> {
        let declared = C::CATEGORIES;
        let mut routes = [None; Category::COUNT];

        for (index, part) in self.parts.iter().enumerate() {
            let categories = part.categories();
            if categories.is_empty() {
                return Err(reject(Error::UnusedHandler));
            }
            for category in categories {
                if !declared.contains(category) {
                    return Err(reject(Error::UndeclaredCategory(category)));
                }
                if routes[category.index()].replace(index).is_some() {
                    return Err(reject(Error::OverlappingHandlers(category)));
                }
            }
        }

        if let Some(category) = declared
            .into_iter()
            .find(|category| routes[category.index()].is_none())
        {
            return Err(reject(Error::MissingHandler(category)));
        }

        Ok(ComposedVisitor {
            parts: self.parts,
            routes,
            capability: PhantomData,
        })
    }
}

fn reject(error: Error) -> Error {
    tracing::debug!(%error, "composed visitor rejected");
    error
}

macro_rules! delegated_visits {
    ($k:lifetime; $($method:ident($arg:ident: $ty:ty) => $category:ident;)+) => {
        $(
            #[inline]
            fn $method(&mut self, index: Idx<$k, C>, $arg: $ty) -> Sig<C> {
                match self.part(Category::$category) {
                    Some(part) => part.$method(index, $arg),
                    None => <Sig<C> as Flow>::proceed(),
                }
            }
        )+
    };
}

impl<'k, C: Capability> Visitor<'k, C::Indexing> for ComposedVisitor<'_, C> {
    #[inline]
    fn categories(&self) -> CategoryList {
        C::CATEGORIES
    }

    delegated_visits! { 'k;
        visit_integral(value: i64) => Integral;
        visit_floating(value: f64) => Floating;
        visit_string(value: &str) => String;
        visit_integral_array(value: ArrayView<'_, i64>) => IntegralArray;
        visit_floating_array(value: ArrayView<'_, f64>) => FloatingArray;
        visit_binary_array(value: ArrayView<'_, u8>) => BinaryArray;
        visit_map(map: &MapNode<'_>) => MapReference;
        visit_list(list: &ListNode<'_>) => ListReference;
    }
}
