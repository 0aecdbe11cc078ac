use std::{ops::Deref, sync::Arc};

/// Ownership handle of a nested container.
///
/// `Unique` containers are dropped with their owner. `Shared` ones live as
/// long as their longest holder; writing through [`make_mut`](Self::make_mut)
/// clones the container first if anyone else still holds it.
#[derive(Clone, Debug)]
pub enum Nested<T> {
    Unique(Box<T>),
    Shared(Arc<T>),
}

impl<T> Nested<T> {
    #[inline]
    pub fn unique(value: T) -> Self {
        Nested::Unique(Box::new(value))
    }

    #[inline]
    pub fn shared(value: T) -> Self {
        Nested::Shared(Arc::new(value))
    }

    #[inline]
    pub fn is_shared(&self) -> bool {
        matches!(self, Nested::Shared(_))
    }

    #[inline]
    pub fn make_mut(&mut self) -> &mut T
    where
        T: Clone,
    {
        match self {
            Nested::Unique(value) => value,
            Nested::Shared(value) => Arc::make_mut(value),
        }
    }

    /// Turns this handle into a shared one and returns another holder of the
    /// same container.
    pub fn share(&mut self) -> Arc<T>
    where
        T: Default,
    {
        match self {
            Nested::Shared(shared) => Arc::clone(shared),
            Nested::Unique(unique) => {
                let shared = Arc::new(std::mem::take(&mut **unique));
                *self = Nested::Shared(Arc::clone(&shared));
                shared
            }
        }
    }

    #[inline]
    pub fn into_inner(self) -> T
    where
        T: Clone,
    {
        match self {
            Nested::Unique(value) => *value,
            Nested::Shared(value) => Arc::unwrap_or_clone(value),
        }
    }
}

impl<T> Deref for Nested<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        match self {
            Nested::Unique(value) => value,
            Nested::Shared(value) => value,
        }
    }
}

impl<T> AsRef<T> for Nested<T> {
    #[inline]
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T: PartialEq> PartialEq for Nested<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T> From<Box<T>> for Nested<T> {
    #[inline]
    fn from(value: Box<T>) -> Self {
        Nested::Unique(value)
    }
}

impl<T> From<Arc<T>> for Nested<T> {
    #[inline]
    fn from(value: Arc<T>) -> Self {
        Nested::Shared(value)
    }
}
