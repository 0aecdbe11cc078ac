use crate::{Flat, Indexing, Keyed, Positional, Visitor, VisitorMut};

/// A single value that can be handed to a visitor.
pub trait Visitable {
    /// Dispatches the value to the handler for its category.
    ///
    /// Does nothing when the visitor does not declare that category.
    fn accept(&self, visitor: &mut dyn Visitor<'_, Flat>);
}

/// A container whose elements can be handed to a visitor, one by one or all
/// in order.
///
/// The element count cannot change while a traversal runs: both methods
/// borrow the container.
pub trait VisitableContainer {
    /// How elements are addressed: [`Keyed`] for maps, [`Positional`] for
    /// lists.
    type Indexing: Indexing;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatches the element at `index`.
    ///
    /// An absent key or an out-of-range position is a no-op, as is an
    /// element whose category the visitor does not declare.
    fn accept<'k>(
        &self,
        index: <Self::Indexing as Indexing>::Index<'k>,
        visitor: &mut dyn Visitor<'k, Self::Indexing>,
    );

    /// Dispatches every element in natural order until a handler returns
    /// `false`.
    ///
    /// Returns `true` if the iteration ran to completion.
    fn iterate<'a>(&'a self, visitor: &mut dyn Visitor<'a, Self::Indexing>) -> bool;
}

/// A single value that can be lent to an editing visitor.
pub trait VisitableMut {
    /// Lends the value to the editing handler for its category.
    ///
    /// Does nothing when the visitor does not declare that category.
    fn accept_mut(&mut self, visitor: &mut dyn VisitorMut<'_, Flat>);
}

/// A container whose elements can be lent to an editing visitor.
///
/// Handlers edit elements in place. The container itself is borrowed
/// mutably for the whole traversal, so its element count cannot change
/// meanwhile.
pub trait VisitableContainerMut: VisitableContainer {
    /// Lends the element at `index`.
    ///
    /// An absent key or an out-of-range position is a no-op.
    fn accept_mut<'k>(
        &mut self,
        index: <Self::Indexing as Indexing>::Index<'k>,
        visitor: &mut dyn VisitorMut<'k, Self::Indexing>,
    );

    /// Lends every element in natural order until a handler returns `false`.
    ///
    /// Returns `true` if the iteration ran to completion.
    fn iterate_mut<'a>(&'a mut self, visitor: &mut dyn VisitorMut<'a, Self::Indexing>) -> bool;
}

/// A string-keyed container seen through the traversal protocol.
pub type MapNode<'a> = dyn VisitableContainer<Indexing = Keyed> + 'a;

/// A position-indexed container seen through the traversal protocol.
pub type ListNode<'a> = dyn VisitableContainer<Indexing = Positional> + 'a;

impl<T: Visitable + ?Sized> Visitable for &T {
    #[inline]
    fn accept(&self, visitor: &mut dyn Visitor<'_, Flat>) {
        (**self).accept(visitor)
    }
}

impl<T: Visitable + ?Sized> Visitable for Box<T> {
    #[inline]
    fn accept(&self, visitor: &mut dyn Visitor<'_, Flat>) {
        (**self).accept(visitor)
    }
}

impl<T: VisitableMut + ?Sized> VisitableMut for &mut T {
    #[inline]
    fn accept_mut(&mut self, visitor: &mut dyn VisitorMut<'_, Flat>) {
        (**self).accept_mut(visitor)
    }
}

impl<T: VisitableMut + ?Sized> VisitableMut for Box<T> {
    #[inline]
    fn accept_mut(&mut self, visitor: &mut dyn VisitorMut<'_, Flat>) {
        (**self).accept_mut(visitor)
    }
}
