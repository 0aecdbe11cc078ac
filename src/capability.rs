//! Compile-time capability declarations.
//!
//! A capability names a set of categories and an [`Indexing`]. Single
//! categories are declared by the marker types in this module; [`Group`]
//! unions several capabilities that share one indexing. Groups of members
//! with different indexings do not type-check:
//!
//! ```compile_fail
//! use value_visit::{Capability, Flat, Keyed, capability::{Group, Integral, String}};
//!
//! let _ = <Group<(Integral<Flat>, String<Keyed>)> as Capability>::CATEGORIES;
//! ```
//!
//! The conventional groups are provided as aliases:
//!
//! ```
//! use value_visit::{Capability, Category, capability::Scalar};
//!
//! assert_eq!(
//!     <Scalar as Capability>::CATEGORIES.as_slice(),
//!     &[Category::Integral, Category::Floating, Category::String]
//! );
//! ```

mod declaration;

use std::marker::PhantomData;

use crate::{Category, CategoryList, Flat, Indexing};

pub use declaration::*;

/// Type-level declaration of the categories a visitor handles.
pub trait Capability: 'static {
    type Indexing: Indexing;

    /// Handled categories, ordered and without duplicates.
    const CATEGORIES: CategoryList;

    /// The same declaration as a runtime value.
    const DECLARATION: Declaration =
        Declaration::new(<Self::Indexing as Indexing>::KIND, Self::CATEGORIES);
}

macro_rules! single_capability {
    ($($(#[$meta:meta])* $name:ident => $category:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            pub struct $name<K = Flat>(PhantomData<K>);

            impl<K: Indexing> Capability for $name<K> {
                type Indexing = K;
                const CATEGORIES: CategoryList = CategoryList::EMPTY.with(Category::$category);
            }
        )+
    };
}

single_capability! {
    /// Signed integers, handed out as `i64`.
    Integral => Integral,
    /// Floating point numbers, handed out as `f64`.
    Floating => Floating,
    /// Text, handed out as `&str`.
    String => String,
    IntegralArray => IntegralArray,
    FloatingArray => FloatingArray,
    /// Raw bytes.
    BinaryArray => BinaryArray,
    /// Nested string-keyed containers.
    Map => MapReference,
    /// Nested position-indexed containers.
    List => ListReference,
}

/// The union of the capabilities in the tuple `T`.
///
/// Categories keep the order of the members, first occurrence wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Group<T>(PhantomData<T>);

macro_rules! group_capability {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: Capability $(, $rest: Capability<Indexing = $first::Indexing>)*> Capability
            for Group<($first, $($rest,)*)>
        {
            type Indexing = $first::Indexing;
            const CATEGORIES: CategoryList = $first::CATEGORIES $(.union($rest::CATEGORIES))*;
        }
    };
}

group_capability!(A);
group_capability!(A, B);
group_capability!(A, B, C);
group_capability!(A, B, C, D);

pub type Numeric<K = Flat> = Group<(Integral<K>, Floating<K>)>;
pub type Scalar<K = Flat> = Group<(Numeric<K>, String<K>)>;
pub type NumericArray<K = Flat> = Group<(IntegralArray<K>, FloatingArray<K>)>;
pub type Contiguous<K = Flat> = Group<(NumericArray<K>, BinaryArray<K>)>;
pub type Container<K = Flat> = Group<(Map<K>, List<K>)>;
/// Every category.
pub type Value<K = Flat> = Group<(Scalar<K>, Contiguous<K>, Container<K>)>;
