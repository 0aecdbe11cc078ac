use std::{borrow::Cow, num::TryFromIntError};

use crate::{
    Category, Flat, List, Map, StoredValue, Visitable, VisitableMut, Visitor, VisitorMut, bridge,
};

/// A leaf holding exactly one value.
///
/// ```
/// use value_visit::{Category, CategoryList, Value, Visitable, Visitor};
///
/// struct Floats(Vec<f64>);
///
/// impl Visitor<'_> for Floats {
///     fn categories(&self) -> CategoryList {
///         CategoryList::new().with(Category::Floating)
///     }
///
///     fn visit_floating(&mut self, _: (), value: f64) {
///         self.0.push(value);
///     }
/// }
///
/// let mut floats = Floats(Vec::new());
/// Value::from(0.5).accept(&mut floats);
/// Value::from("not a float").accept(&mut floats);
/// assert_eq!(floats.0, [0.5]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Value(StoredValue);

impl Value {
    #[inline]
    pub fn new(value: impl Into<StoredValue>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.0.category()
    }

    #[inline]
    pub fn get(&self) -> &StoredValue {
        &self.0
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut StoredValue {
        &mut self.0
    }

    /// Replaces the held value and returns the old one.
    #[inline]
    pub fn set(&mut self, value: impl Into<StoredValue>) -> StoredValue {
        std::mem::replace(&mut self.0, value.into())
    }

    #[inline]
    pub fn into_inner(self) -> StoredValue {
        self.0
    }
}

impl From<StoredValue> for Value {
    #[inline]
    fn from(value: StoredValue) -> Self {
        Self(value)
    }
}

impl From<Value> for StoredValue {
    #[inline]
    fn from(value: Value) -> Self {
        value.0
    }
}

macro_rules! from_stored {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self(StoredValue::from(value))
                }
            }
        )+
    };
}

from_stored!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    &'static str,
    String,
    Cow<'static, str>,
    Vec<i64>,
    Vec<f64>,
    Vec<u8>,
    Vec<i8>,
    Vec<i16>,
    Vec<i32>,
    Vec<u16>,
    Vec<u32>,
    Vec<f32>,
    Map,
    List,
);

macro_rules! try_from_stored {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TryFrom<$ty> for Value {
                type Error = TryFromIntError;

                #[inline]
                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    StoredValue::try_from(value).map(Self)
                }
            }
        )+
    };
}

try_from_stored!(isize, usize, u64, Vec<isize>, Vec<usize>, Vec<u64>);

impl Visitable for Value {
    #[inline]
    fn accept(&self, visitor: &mut dyn Visitor<'_, Flat>) {
        bridge::dispatch::<_, Flat, _>(&self.0, (), visitor);
    }
}

impl VisitableMut for Value {
    #[inline]
    fn accept_mut(&mut self, visitor: &mut dyn VisitorMut<'_, Flat>) {
        bridge::dispatch_mut::<_, Flat, _>(&mut self.0, (), visitor);
    }
}
