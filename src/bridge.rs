//! Runtime dispatch of tagged values to visitors.
//!
//! [`dispatch`] is the single place where a value's runtime category meets a
//! visitor's declared categories. Values are checked in a fixed order of
//! buckets, scalar first, then contiguous, then container, and the first
//! bucket whose category the visitor declares receives the value. Values no
//! bucket accepts are dropped silently.
//!
//! [`dispatch_mut`] is the same chain over values lent for editing.

use std::borrow::Cow;

use crate::{
    ArrayElement, ArrayMut, ArrayRef, ArraySource, AsContiguous, Category, ContainerMut,
    ContainerRef, Indexing, ScalarMut, ScalarRef, ValueRef, Visitor, VisitorMut,
};

/// A value with a runtime category.
///
/// Implementors report their category and expose themselves through the
/// accessor for their bucket; the other accessors keep returning `None`.
pub trait Tagged {
    fn category(&self) -> Category;

    #[inline]
    fn scalar(&self) -> Option<ScalarRef<'_>> {
        None
    }

    #[inline]
    fn contiguous(&self) -> Option<ArrayRef<'_>> {
        None
    }

    #[inline]
    fn container(&self) -> Option<ContainerRef<'_>> {
        None
    }
}

/// A [`Tagged`] value that can also be lent for editing.
///
/// Each accessor returns `Some` exactly when its shared counterpart does.
pub trait TaggedMut: Tagged {
    #[inline]
    fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
        None
    }

    #[inline]
    fn contiguous_mut(&mut self) -> Option<ArrayMut<'_>> {
        None
    }

    #[inline]
    fn container_mut(&mut self) -> Option<ContainerMut<'_>> {
        None
    }
}

/// Calls the handler of `visitor` matching the category of `value`.
///
/// Returns the handler's signal, or `None` when the visitor does not declare
/// the category and nothing was called.
///
/// # Example
///
/// ```
/// use value_visit::{Category, CategoryList, Flat, Visitor, bridge};
///
/// struct Texts(Vec<String>);
///
/// impl Visitor<'_> for Texts {
///     fn categories(&self) -> CategoryList {
///         CategoryList::new().with(Category::String)
///     }
///
///     fn visit_string(&mut self, _: (), value: &str) {
///         self.0.push(value.to_owned());
///     }
/// }
///
/// let mut texts = Texts(Vec::new());
/// assert!(bridge::dispatch::<_, Flat, _>(&String::from("a"), (), &mut texts).is_some());
/// assert!(bridge::dispatch::<_, Flat, _>(&7i64, (), &mut texts).is_none());
/// assert_eq!(texts.0, ["a"]);
/// ```
pub fn dispatch<'k, T, K, V>(value: &T, index: K::Index<'k>, visitor: &mut V) -> Option<K::Signal>
where
    T: Tagged + ?Sized,
    K: Indexing,
    V: Visitor<'k, K> + ?Sized,
{
    let declared = visitor.categories();

    if let Some(scalar) = value.scalar() {
        if declared.contains(scalar.category()) {
            return Some(visit_scalar(scalar, index, visitor));
        }
    }
    if let Some(array) = value.contiguous() {
        if declared.contains(array.category()) {
            return Some(visit_array(array, index, visitor));
        }
    }
    if let Some(container) = value.container() {
        if declared.contains(container.category()) {
            return Some(visit_container(container, index, visitor));
        }
    }

    tracing::trace!(category = %value.category(), declared = ?declared, "no handler declared");
    None
}

/// Calls the handler matching an already resolved [`ValueRef`].
///
/// Unlike [`dispatch`] this does not consult the visitor's declared
/// categories.
pub fn visit_value<'k, K, V>(value: ValueRef<'_>, index: K::Index<'k>, visitor: &mut V) -> K::Signal
where
    K: Indexing,
    V: Visitor<'k, K> + ?Sized,
{
    match value {
        ValueRef::Integral(value) => visitor.visit_integral(index, value),
        ValueRef::Floating(value) => visitor.visit_floating(index, value),
        ValueRef::String(value) => visitor.visit_string(index, value),
        ValueRef::IntegralArray(view) => visitor.visit_integral_array(index, view),
        ValueRef::FloatingArray(view) => visitor.visit_floating_array(index, view),
        ValueRef::BinaryArray(view) => visitor.visit_binary_array(index, view),
        ValueRef::Map(map) => visitor.visit_map(index, map),
        ValueRef::List(list) => visitor.visit_list(index, list),
    }
}

/// Calls the editing handler of `visitor` matching the category of `value`.
///
/// Buckets are checked in the same order as [`dispatch`]. A bucket is only
/// borrowed mutably once the visitor is known to declare its category, so
/// undeclared values are left untouched.
///
/// ```
/// use value_visit::{Category, CategoryList, Flat, VisitorMut, bridge};
///
/// struct Double;
///
/// impl VisitorMut<'_> for Double {
///     fn categories(&self) -> CategoryList {
///         CategoryList::new().with(Category::Integral)
///     }
///
///     fn visit_integral(&mut self, _: (), value: &mut i64) {
///         *value *= 2;
///     }
/// }
///
/// let mut value = 21i64;
/// assert!(bridge::dispatch_mut::<_, Flat, _>(&mut value, (), &mut Double).is_some());
/// assert_eq!(value, 42);
/// assert!(bridge::dispatch_mut::<_, Flat, _>(&mut 0.5f64, (), &mut Double).is_none());
/// ```
pub fn dispatch_mut<'k, T, K, V>(
    value: &mut T,
    index: K::Index<'k>,
    visitor: &mut V,
) -> Option<K::Signal>
where
    T: TaggedMut + ?Sized,
    K: Indexing,
    V: VisitorMut<'k, K> + ?Sized,
{
    let declared = visitor.categories();

    if let Some(category) = value.scalar().map(|scalar| scalar.category()) {
        if declared.contains(category) {
            if let Some(scalar) = value.scalar_mut() {
                return Some(visit_scalar_mut(scalar, index, visitor));
            }
        }
    }
    if let Some(category) = value.contiguous().map(|array| array.category()) {
        if declared.contains(category) {
            if let Some(array) = value.contiguous_mut() {
                return Some(visit_array_mut(array, index, visitor));
            }
        }
    }
    if let Some(category) = value.container().map(|container| container.category()) {
        if declared.contains(category) {
            if let Some(container) = value.container_mut() {
                return Some(visit_container_mut(container, index, visitor));
            }
        }
    }

    tracing::trace!(category = %value.category(), declared = ?declared, "no editing handler declared");
    None
}

#[inline]
fn visit_scalar<'k, K, V>(scalar: ScalarRef<'_>, index: K::Index<'k>, visitor: &mut V) -> K::Signal
where
    K: Indexing,
    V: Visitor<'k, K> + ?Sized,
{
    match scalar {
        ScalarRef::Integral(value) => visitor.visit_integral(index, value),
        ScalarRef::Floating(value) => visitor.visit_floating(index, value),
        ScalarRef::String(value) => visitor.visit_string(index, value),
    }
}

#[inline]
fn visit_array<'k, K, V>(array: ArrayRef<'_>, index: K::Index<'k>, visitor: &mut V) -> K::Signal
where
    K: Indexing,
    V: Visitor<'k, K> + ?Sized,
{
    match array {
        ArrayRef::Integral(view) => visitor.visit_integral_array(index, view),
        ArrayRef::Floating(view) => visitor.visit_floating_array(index, view),
        ArrayRef::Binary(view) => visitor.visit_binary_array(index, view),
    }
}

#[inline]
fn visit_container<'k, K, V>(
    container: ContainerRef<'_>,
    index: K::Index<'k>,
    visitor: &mut V,
) -> K::Signal
where
    K: Indexing,
    V: Visitor<'k, K> + ?Sized,
{
    match container {
        ContainerRef::Map(map) => visitor.visit_map(index, map),
        ContainerRef::List(list) => visitor.visit_list(index, list),
    }
}

#[inline]
fn visit_scalar_mut<'k, K, V>(scalar: ScalarMut<'_>, index: K::Index<'k>, visitor: &mut V) -> K::Signal
where
    K: Indexing,
    V: VisitorMut<'k, K> + ?Sized,
{
    match scalar {
        ScalarMut::Integral(value) => visitor.visit_integral(index, value),
        ScalarMut::Floating(value) => visitor.visit_floating(index, value),
        ScalarMut::String(value) => visitor.visit_string(index, value),
    }
}

#[inline]
fn visit_array_mut<'k, K, V>(array: ArrayMut<'_>, index: K::Index<'k>, visitor: &mut V) -> K::Signal
where
    K: Indexing,
    V: VisitorMut<'k, K> + ?Sized,
{
    match array {
        ArrayMut::Integral(values) => visitor.visit_integral_array(index, values),
        ArrayMut::Floating(values) => visitor.visit_floating_array(index, values),
        ArrayMut::Binary(values) => visitor.visit_binary_array(index, values),
    }
}

#[inline]
fn visit_container_mut<'k, K, V>(
    container: ContainerMut<'_>,
    index: K::Index<'k>,
    visitor: &mut V,
) -> K::Signal
where
    K: Indexing,
    V: VisitorMut<'k, K> + ?Sized,
{
    match container {
        ContainerMut::Map(map) => visitor.visit_map(index, map),
        ContainerMut::List(list) => visitor.visit_list(index, list),
    }
}

macro_rules! tagged_integral {
    ($($ty:ty),+) => {
        $(
            impl Tagged for $ty {
                #[inline]
                fn category(&self) -> Category {
                    Category::Integral
                }

                #[inline]
                fn scalar(&self) -> Option<ScalarRef<'_>> {
                    Some(ScalarRef::Integral(i64::from(*self)))
                }
            }
        )+
    };
}

tagged_integral!(bool, i8, i16, i32, i64, u8, u16, u32);

// Values beyond the range of i64 have no scalar form; dispatch drops them.
macro_rules! tagged_integral_checked {
    ($($ty:ty),+) => {
        $(
            impl Tagged for $ty {
                #[inline]
                fn category(&self) -> Category {
                    Category::Integral
                }

                #[inline]
                fn scalar(&self) -> Option<ScalarRef<'_>> {
                    i64::try_from(*self).ok().map(ScalarRef::Integral)
                }
            }
        )+
    };
}

tagged_integral_checked!(isize, usize, u64);

macro_rules! tagged_floating {
    ($($ty:ty),+) => {
        $(
            impl Tagged for $ty {
                #[inline]
                fn category(&self) -> Category {
                    Category::Floating
                }

                #[inline]
                fn scalar(&self) -> Option<ScalarRef<'_>> {
                    Some(ScalarRef::Floating(f64::from(*self)))
                }
            }
        )+
    };
}

tagged_floating!(f32, f64);

macro_rules! tagged_string {
    ($($ty:ty),+) => {
        $(
            impl Tagged for $ty {
                #[inline]
                fn category(&self) -> Category {
                    Category::String
                }

                #[inline]
                fn scalar(&self) -> Option<ScalarRef<'_>> {
                    Some(ScalarRef::String(self))
                }
            }
        )+
    };
}

tagged_string!(str, String, Box<str>, Cow<'_, str>);

macro_rules! tagged_contiguous {
    ($($ty:ty),+) => {
        $(
            impl<E: ArraySource> Tagged for $ty {
                #[inline]
                fn category(&self) -> Category {
                    <E::Element as ArrayElement>::CATEGORY
                }

                #[inline]
                fn contiguous(&self) -> Option<ArrayRef<'_>> {
                    Some(<E::Element as ArrayElement>::array_ref(self.as_contiguous()))
                }
            }
        )+
    };
}

tagged_contiguous!([E], Vec<E>, Box<[E]>);

impl<E: ArraySource, const N: usize> Tagged for [E; N] {
    #[inline]
    fn category(&self) -> Category {
        <E::Element as ArrayElement>::CATEGORY
    }

    #[inline]
    fn contiguous(&self) -> Option<ArrayRef<'_>> {
        Some(<E::Element as ArrayElement>::array_ref(self.as_contiguous()))
    }
}

impl TaggedMut for i64 {
    #[inline]
    fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
        Some(ScalarMut::Integral(self))
    }
}

impl TaggedMut for f64 {
    #[inline]
    fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
        Some(ScalarMut::Floating(self))
    }
}

impl TaggedMut for String {
    #[inline]
    fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
        Some(ScalarMut::String(self))
    }
}

// Only storage of the view's own element type can be lent mutably.
macro_rules! tagged_mut_array {
    ($($elem:ty => $variant:ident),+) => {
        $(
            impl TaggedMut for [$elem] {
                #[inline]
                fn contiguous_mut(&mut self) -> Option<ArrayMut<'_>> {
                    Some(ArrayMut::$variant(self))
                }
            }

            impl TaggedMut for Vec<$elem> {
                #[inline]
                fn contiguous_mut(&mut self) -> Option<ArrayMut<'_>> {
                    Some(ArrayMut::$variant(self.as_mut_slice()))
                }
            }
        )+
    };
}

tagged_mut_array!(i64 => Integral, f64 => Floating, u8 => Binary);
