use crate::StoredValue;

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}

    impl Sealed for super::Flat {}
    impl Sealed for super::Keyed {}
    impl Sealed for super::Positional {}
}

/// How a visitor's handlers are addressed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum IndexKind {
    /// A single value, no index.
    None,
    /// An element of a string-keyed container.
    Key,
    /// An element of an integer-indexed container.
    Position,
}

/// Continuation signal returned by handlers.
///
/// Handlers of single values return `()`; handlers of container elements
/// return `bool`, where `false` stops the iteration.
pub trait Flow: Copy {
    /// The signal that lets an iteration go on.
    fn proceed() -> Self;

    fn should_continue(self) -> bool;
}

impl Flow for () {
    #[inline]
    fn proceed() -> Self {}

    #[inline]
    fn should_continue(self) -> bool {
        true
    }
}

impl Flow for bool {
    #[inline]
    fn proceed() -> Self {
        true
    }

    #[inline]
    fn should_continue(self) -> bool {
        self
    }
}

/// Type-level index kind of a visitor.
///
/// Sealed; the three implementors are [`Flat`], [`Keyed`] and
/// [`Positional`].
pub trait Indexing: private::Sealed + Send + Sync + 'static {
    const KIND: IndexKind;

    /// What a handler receives alongside the value.
    type Index<'a>: Copy;

    /// What a handler returns.
    type Signal: Flow;
}

/// Single values: handlers receive `()` and return `()`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Flat;

/// Map entries: handlers receive the key and return `bool`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Keyed;

/// List elements: handlers receive the position and return `bool`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Positional;

impl Indexing for Flat {
    const KIND: IndexKind = IndexKind::None;
    type Index<'a> = ();
    type Signal = ();
}

impl Indexing for Keyed {
    const KIND: IndexKind = IndexKind::Key;
    type Index<'a> = &'a str;
    type Signal = bool;
}

impl Indexing for Positional {
    const KIND: IndexKind = IndexKind::Position;
    type Index<'a> = usize;
    type Signal = bool;
}

/// Lookup key into a nested container: `usize` for lists, strings for maps.
///
/// Looking up with the wrong kind of key (a position into a map, a key into a
/// list, anything into a scalar) finds nothing.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn lookup<'a>(&self, value: &'a StoredValue) -> Option<&'a StoredValue>;

    #[doc(hidden)]
    fn lookup_mut<'a>(&self, value: &'a mut StoredValue) -> Option<&'a mut StoredValue>;
}

impl Index for usize {
    #[inline]
    fn lookup<'a>(&self, value: &'a StoredValue) -> Option<&'a StoredValue> {
        match value {
            StoredValue::List(list) => list.get(*self),
            _ => None,
        }
    }

    #[inline]
    fn lookup_mut<'a>(&self, value: &'a mut StoredValue) -> Option<&'a mut StoredValue> {
        match value {
            StoredValue::List(list) => list.make_mut().get_mut(*self),
            _ => None,
        }
    }
}

impl Index for str {
    #[inline]
    fn lookup<'a>(&self, value: &'a StoredValue) -> Option<&'a StoredValue> {
        match value {
            StoredValue::Map(map) => map.get(self),
            _ => None,
        }
    }

    #[inline]
    fn lookup_mut<'a>(&self, value: &'a mut StoredValue) -> Option<&'a mut StoredValue> {
        match value {
            StoredValue::Map(map) => map.make_mut().get_mut(self),
            _ => None,
        }
    }
}

impl Index for String {
    #[inline]
    fn lookup<'a>(&self, value: &'a StoredValue) -> Option<&'a StoredValue> {
        self.as_str().lookup(value)
    }

    #[inline]
    fn lookup_mut<'a>(&self, value: &'a mut StoredValue) -> Option<&'a mut StoredValue> {
        self.as_str().lookup_mut(value)
    }
}

impl<T: ?Sized + Index> Index for &T {
    #[inline]
    fn lookup<'a>(&self, value: &'a StoredValue) -> Option<&'a StoredValue> {
        (**self).lookup(value)
    }

    #[inline]
    fn lookup_mut<'a>(&self, value: &'a mut StoredValue) -> Option<&'a mut StoredValue> {
        (**self).lookup_mut(value)
    }
}
