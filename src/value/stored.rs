use std::{borrow::Cow, num::TryFromIntError, sync::Arc};

use crate::{
    ArrayMut, ArrayRef, AsContiguous, Category, ContainerMut, ContainerRef, Flat, Index, List, Map,
    Nested, ScalarMut, ScalarRef, Tagged, TaggedMut, ValueRef, Visitable, VisitableMut, Visitor,
    VisitorMut, bridge,
};

/// A value of any category, as held by [`Map`], [`List`] and
/// [`Value`](crate::Value).
#[derive(Clone, Debug, PartialEq)]
pub enum StoredValue {
    Integral(i64),
    Floating(f64),
    String(Cow<'static, str>),
    IntegralArray(Vec<i64>),
    FloatingArray(Vec<f64>),
    BinaryArray(Vec<u8>),
    Map(Nested<Map>),
    List(Nested<List>),
}

impl Default for StoredValue {
    #[inline]
    fn default() -> Self {
        StoredValue::Integral(0)
    }
}

impl StoredValue {
    pub fn category(&self) -> Category {
        match self {
            StoredValue::Integral(_) => Category::Integral,
            StoredValue::Floating(_) => Category::Floating,
            StoredValue::String(_) => Category::String,
            StoredValue::IntegralArray(_) => Category::IntegralArray,
            StoredValue::FloatingArray(_) => Category::FloatingArray,
            StoredValue::BinaryArray(_) => Category::BinaryArray,
            StoredValue::Map(_) => Category::MapReference,
            StoredValue::List(_) => Category::ListReference,
        }
    }

    /// Borrows the value, tagged by category.
    pub fn as_value_ref(&self) -> ValueRef<'_> {
        match self {
            StoredValue::Integral(value) => ValueRef::Integral(*value),
            StoredValue::Floating(value) => ValueRef::Floating(*value),
            StoredValue::String(value) => ValueRef::String(value),
            StoredValue::IntegralArray(value) => ValueRef::IntegralArray(value.as_contiguous()),
            StoredValue::FloatingArray(value) => ValueRef::FloatingArray(value.as_contiguous()),
            StoredValue::BinaryArray(value) => ValueRef::BinaryArray(value.as_contiguous()),
            StoredValue::Map(map) => ValueRef::Map(&**map),
            StoredValue::List(list) => ValueRef::List(&**list),
        }
    }

    #[inline]
    pub fn as_integral(&self) -> Option<i64> {
        match self {
            StoredValue::Integral(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_floating(&self) -> Option<f64> {
        match self {
            StoredValue::Floating(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StoredValue::String(value) => Some(&**value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            StoredValue::Map(map) => Some(&**map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            StoredValue::List(list) => Some(&**list),
            _ => None,
        }
    }

    /// Mutable access to a nested map, detaching it from other holders if it
    /// is shared.
    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            StoredValue::Map(map) => Some(map.make_mut()),
            _ => None,
        }
    }

    /// Mutable access to a nested list, detaching it from other holders if
    /// it is shared.
    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            StoredValue::List(list) => Some(list.make_mut()),
            _ => None,
        }
    }

    /// Looks up a nested element: a position into a list or a key into a
    /// map.
    ///
    /// ```
    /// use value_visit::{StoredValue, list, map};
    ///
    /// let value = StoredValue::from(map! { "b" => list![2, 3] });
    /// assert_eq!(value.get("b").and_then(|b| b.get(1_usize)), Some(&StoredValue::Integral(3)));
    /// assert_eq!(value.get(0_usize), None);
    /// ```
    #[inline]
    pub fn get(&self, index: impl Index) -> Option<&StoredValue> {
        index.lookup(self)
    }

    #[inline]
    pub fn get_mut(&mut self, index: impl Index) -> Option<&mut StoredValue> {
        index.lookup_mut(self)
    }
}

impl Tagged for StoredValue {
    #[inline]
    fn category(&self) -> Category {
        StoredValue::category(self)
    }

    fn scalar(&self) -> Option<ScalarRef<'_>> {
        match self {
            StoredValue::Integral(value) => Some(ScalarRef::Integral(*value)),
            StoredValue::Floating(value) => Some(ScalarRef::Floating(*value)),
            StoredValue::String(value) => Some(ScalarRef::String(value)),
            _ => None,
        }
    }

    fn contiguous(&self) -> Option<ArrayRef<'_>> {
        match self {
            StoredValue::IntegralArray(value) => Some(ArrayRef::Integral(value.as_contiguous())),
            StoredValue::FloatingArray(value) => Some(ArrayRef::Floating(value.as_contiguous())),
            StoredValue::BinaryArray(value) => Some(ArrayRef::Binary(value.as_contiguous())),
            _ => None,
        }
    }

    fn container(&self) -> Option<ContainerRef<'_>> {
        match self {
            StoredValue::Map(map) => Some(ContainerRef::Map(&**map)),
            StoredValue::List(list) => Some(ContainerRef::List(&**list)),
            _ => None,
        }
    }
}

impl TaggedMut for StoredValue {
    /// A borrowed static string is copied into an owned one first.
    fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
        match self {
            StoredValue::Integral(value) => Some(ScalarMut::Integral(value)),
            StoredValue::Floating(value) => Some(ScalarMut::Floating(value)),
            StoredValue::String(value) => Some(ScalarMut::String(value.to_mut())),
            _ => None,
        }
    }

    fn contiguous_mut(&mut self) -> Option<ArrayMut<'_>> {
        match self {
            StoredValue::IntegralArray(values) => Some(ArrayMut::Integral(values)),
            StoredValue::FloatingArray(values) => Some(ArrayMut::Floating(values)),
            StoredValue::BinaryArray(values) => Some(ArrayMut::Binary(values)),
            _ => None,
        }
    }

    fn container_mut(&mut self) -> Option<ContainerMut<'_>> {
        match self {
            StoredValue::Map(map) => Some(ContainerMut::Map(map.make_mut())),
            StoredValue::List(list) => Some(ContainerMut::List(list.make_mut())),
            _ => None,
        }
    }
}

impl Visitable for StoredValue {
    #[inline]
    fn accept(&self, visitor: &mut dyn Visitor<'_, Flat>) {
        bridge::dispatch::<_, Flat, _>(self, (), visitor);
    }
}

impl VisitableMut for StoredValue {
    #[inline]
    fn accept_mut(&mut self, visitor: &mut dyn VisitorMut<'_, Flat>) {
        bridge::dispatch_mut::<_, Flat, _>(self, (), visitor);
    }
}

macro_rules! from_integral {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for StoredValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    StoredValue::Integral(i64::from(value))
                }
            }
        )+
    };
}

from_integral!(bool, i8, i16, i32, i64, u8, u16, u32);

macro_rules! try_from_integral {
    ($($ty:ty),+) => {
        $(
            impl TryFrom<$ty> for StoredValue {
                type Error = TryFromIntError;

                #[inline]
                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    i64::try_from(value).map(StoredValue::Integral)
                }
            }

            impl TryFrom<Vec<$ty>> for StoredValue {
                type Error = TryFromIntError;

                fn try_from(values: Vec<$ty>) -> Result<Self, Self::Error> {
                    values
                        .into_iter()
                        .map(i64::try_from)
                        .collect::<Result<Vec<_>, _>>()
                        .map(StoredValue::IntegralArray)
                }
            }
        )+
    };
}

try_from_integral!(isize, usize, u64);

impl From<f32> for StoredValue {
    #[inline]
    fn from(value: f32) -> Self {
        StoredValue::Floating(f64::from(value))
    }
}

impl From<f64> for StoredValue {
    #[inline]
    fn from(value: f64) -> Self {
        StoredValue::Floating(value)
    }
}

impl From<&'static str> for StoredValue {
    #[inline]
    fn from(value: &'static str) -> Self {
        StoredValue::String(Cow::Borrowed(value))
    }
}

impl From<String> for StoredValue {
    #[inline]
    fn from(value: String) -> Self {
        StoredValue::String(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for StoredValue {
    #[inline]
    fn from(value: Cow<'static, str>) -> Self {
        StoredValue::String(value)
    }
}

impl From<Vec<i64>> for StoredValue {
    #[inline]
    fn from(value: Vec<i64>) -> Self {
        StoredValue::IntegralArray(value)
    }
}

impl From<Vec<f64>> for StoredValue {
    #[inline]
    fn from(value: Vec<f64>) -> Self {
        StoredValue::FloatingArray(value)
    }
}

impl From<Vec<u8>> for StoredValue {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        StoredValue::BinaryArray(value)
    }
}

macro_rules! from_widened_array {
    ($($ty:ty => $variant:ident of $element:ty),+ $(,)?) => {
        $(
            impl From<Vec<$ty>> for StoredValue {
                fn from(values: Vec<$ty>) -> Self {
                    StoredValue::$variant(values.into_iter().map(<$element>::from).collect())
                }
            }
        )+
    };
}

from_widened_array! {
    i8 => IntegralArray of i64,
    i16 => IntegralArray of i64,
    i32 => IntegralArray of i64,
    u16 => IntegralArray of i64,
    u32 => IntegralArray of i64,
    f32 => FloatingArray of f64,
}

macro_rules! from_container {
    ($($ty:ident),+) => {
        $(
            impl From<$ty> for StoredValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    StoredValue::$ty(Nested::unique(value))
                }
            }

            impl From<Box<$ty>> for StoredValue {
                #[inline]
                fn from(value: Box<$ty>) -> Self {
                    StoredValue::$ty(Nested::Unique(value))
                }
            }

            impl From<Arc<$ty>> for StoredValue {
                #[inline]
                fn from(value: Arc<$ty>) -> Self {
                    StoredValue::$ty(Nested::Shared(value))
                }
            }

            impl From<Nested<$ty>> for StoredValue {
                #[inline]
                fn from(value: Nested<$ty>) -> Self {
                    StoredValue::$ty(value)
                }
            }
        )+
    };
}

from_container!(Map, List);
