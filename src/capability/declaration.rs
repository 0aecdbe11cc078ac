use std::marker::PhantomData;

use crate::{
    ArrayView, Capability, Category, CategoryList, Error, IndexKind, Indexing, ListNode, MapNode,
    Result, Visitor,
};

/// A capability as a runtime value: an index kind and a category list.
///
/// # Example
///
/// ```
/// use value_visit::{Category, Declaration, IndexKind, capability};
///
/// let numeric = Declaration::of::<capability::Numeric>();
/// let text = Declaration::of::<capability::String>();
///
/// let group = Declaration::group(&[numeric, text]).unwrap();
/// assert_eq!(group.kind(), IndexKind::None);
/// assert_eq!(
///     group.categories().as_slice(),
///     &[Category::Integral, Category::Floating, Category::String]
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Declaration {
    kind: IndexKind,
    categories: CategoryList,
}

impl Declaration {
    #[inline]
    pub const fn new(kind: IndexKind, categories: CategoryList) -> Self {
        Self { kind, categories }
    }

    #[inline]
    pub const fn of<C: Capability>() -> Self {
        C::DECLARATION
    }

    #[inline]
    pub const fn kind(&self) -> IndexKind {
        self.kind
    }

    #[inline]
    pub const fn categories(&self) -> CategoryList {
        self.categories
    }

    #[inline]
    pub const fn handles(&self, category: Category) -> bool {
        self.categories.contains(category)
    }

    /// Returns `true` if `other` has the same index kind and a subset of the
    /// categories, so a visitor for `self` can stand in for `other`.
    pub const fn includes(&self, other: &Declaration) -> bool {
        self.kind as u8 == other.kind as u8 && self.categories.includes(other.categories)
    }

    /// Unions `members` into one declaration.
    ///
    /// Fails with [`Error::EmptyGroup`] for no members and with
    /// [`Error::IndexKindMismatch`] when the members disagree on the index
    /// kind.
    pub fn group(members: &[Declaration]) -> Result<Declaration> {
        let (first, rest) = members.split_first().ok_or(Error::EmptyGroup)?;
        let mut categories = first.categories;
        for member in rest {
            if member.kind != first.kind {
                tracing::debug!(
                    expected = ?first.kind,
                    found = ?member.kind,
                    "rejecting capability group"
                );
                return Err(Error::IndexKindMismatch {
                    expected: first.kind,
                    found: member.kind,
                });
            }
            categories = categories.union(member.categories);
        }
        Ok(Declaration::new(first.kind, categories))
    }
}

/// A visitor whose capability is known statically.
pub trait Declared {
    type Capability: Capability;

    #[inline]
    fn declaration(&self) -> Declaration {
        <Self::Capability as Capability>::DECLARATION
    }

    /// Borrows this visitor as a visitor of the narrower capability `C`.
    ///
    /// `C` must declare a subset of this visitor's categories, checked at
    /// compile time.
    ///
    /// ```
    /// use value_visit::{
    ///     Declared, FreeVisitor, Positional, ValueRef, VisitableContainer, capability, list,
    /// };
    ///
    /// let mut seen = Vec::new();
    /// let mut scalar = FreeVisitor::<capability::Scalar<Positional>>::builder()
    ///     .rest(|i: usize, _: ValueRef<'_>| {
    ///         seen.push(i);
    ///         true
    ///     })
    ///     .build()
    ///     .unwrap();
    ///
    /// let list = list![1, "text", 2.5];
    /// let mut text_only = scalar.narrow::<capability::String<Positional>>();
    /// assert_eq!(text_only.declaration().categories().len(), 1);
    /// list.iterate(&mut text_only);
    /// drop(scalar);
    /// assert_eq!(seen, [1]);
    /// ```
    fn narrow<C>(&mut self) -> Narrowed<'_, C, Self>
    where
        C: Capability<Indexing = <Self::Capability as Capability>::Indexing>,
    {
        const {
            assert!(
                <Self::Capability as Capability>::CATEGORIES.includes(C::CATEGORIES),
                "narrowed capability is not a subset"
            )
        };
        Narrowed {
            inner: self,
            capability: PhantomData,
        }
    }
}

/// A visitor restricted to the categories of `C`. See [`Declared::narrow`].
pub struct Narrowed<'v, C, V: ?Sized> {
    inner: &'v mut V,
    capability: PhantomData<C>,
}

impl<'v, C, V: ?Sized> Narrowed<'v, C, V> {
    #[inline]
    pub fn into_inner(self) -> &'v mut V {
        self.inner
    }
}

impl<C: Capability, V: ?Sized> Declared for Narrowed<'_, C, V> {
    type Capability = C;
}

impl<'k, C, V> Visitor<'k, C::Indexing> for Narrowed<'_, C, V>
where
    C: Capability,
    V: Visitor<'k, C::Indexing> + ?Sized,
{
    #[inline]
    fn categories(&self) -> CategoryList {
        C::CATEGORIES
    }

    #[inline]
    fn visit_integral(
        &mut self,
        index: <C::Indexing as Indexing>::Index<'k>,
        value: i64,
    ) -> <C::Indexing as Indexing>::Signal {
        self.inner.visit_integral(index, value)
    }

    #[inline]
    fn visit_floating(
        &mut self,
        index: <C::Indexing as Indexing>::Index<'k>,
        value: f64,
    ) -> <C::Indexing as Indexing>::Signal {
        self.inner.visit_floating(index, value)
    }

    #[inline]
    fn visit_string(
        &mut self,
        index: <C::Indexing as Indexing>::Index<'k>,
        value: &str,
    ) -> <C::Indexing as Indexing>::Signal {
        self.inner.visit_string(index, value)
    }

    #[inline]
    fn visit_integral_array(
        &mut self,
        index: <C::Indexing as Indexing>::Index<'k>,
        value: ArrayView<'_, i64>,
    ) -> <C::Indexing as Indexing>::Signal {
        self.inner.visit_integral_array(index, value)
    }

    #[inline]
    fn visit_floating_array(
        &mut self,
        index: <C::Indexing as Indexing>::Index<'k>,
        value: ArrayView<'_, f64>,
    ) -> <C::Indexing as Indexing>::Signal {
        self.inner.visit_floating_array(index, value)
    }

    #[inline]
    fn visit_binary_array(
        &mut self,
        index: <C::Indexing as Indexing>::Index<'k>,
        value: ArrayView<'_, u8>,
    ) -> <C::Indexing as Indexing>::Signal {
        self.inner.visit_binary_array(index, value)
    }

    #[inline]
    fn visit_map(
        &mut self,
        index: <C::Indexing as Indexing>::Index<'k>,
        map: &MapNode<'_>,
    ) -> <C::Indexing as Indexing>::Signal {
        self.inner.visit_map(index, map)
    }

    #[inline]
    fn visit_list(
        &mut self,
        index: <C::Indexing as Indexing>::Index<'k>,
        list: &ListNode<'_>,
    ) -> <C::Indexing as Indexing>::Signal {
        self.inner.visit_list(index, list)
    }
}
