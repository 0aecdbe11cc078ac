use std::{fmt, marker::PhantomData};

use super::{Idx, Sig};
use crate::{
    ArrayView, Capability, Category, CategoryList, Declared, Error, Flow, Indexing, ListNode,
    MapNode, Result, ValueRef, Visitor,
};

enum Slot<'h, K: Indexing> {
    Integral(Box<dyn for<'k> FnMut(K::Index<'k>, i64) -> K::Signal + 'h>),
    Floating(Box<dyn for<'k> FnMut(K::Index<'k>, f64) -> K::Signal + 'h>),
    String(Box<dyn for<'k, 'v> FnMut(K::Index<'k>, &'v str) -> K::Signal + 'h>),
    IntegralArray(Box<dyn for<'k, 'v> FnMut(K::Index<'k>, ArrayView<'v, i64>) -> K::Signal + 'h>),
    FloatingArray(Box<dyn for<'k, 'v> FnMut(K::Index<'k>, ArrayView<'v, f64>) -> K::Signal + 'h>),
    BinaryArray(Box<dyn for<'k, 'v> FnMut(K::Index<'k>, ArrayView<'v, u8>) -> K::Signal + 'h>),
    Map(Box<dyn for<'k, 'v> FnMut(K::Index<'k>, &'v MapNode<'v>) -> K::Signal + 'h>),
    List(Box<dyn for<'k, 'v> FnMut(K::Index<'k>, &'v ListNode<'v>) -> K::Signal + 'h>),
    Any(Box<dyn for<'k, 'v> FnMut(K::Index<'k>, ValueRef<'v>) -> K::Signal + 'h>),
}

#[derive(Clone, Copy)]
enum Claim {
    Exact(Category),
    /// First unclaimed category, in declaration order.
    Next,
    /// Every unclaimed category.
    Rest,
}

struct Pending<'h, K: Indexing> {
    claim: Claim,
    slot: Slot<'h, K>,
}

/// A visitor assembled from one callable per category of `C`.
///
/// # Example
///
/// ```
/// use value_visit::{FreeVisitor, Keyed, ValueRef, VisitableContainer, capability, map};
///
/// let mut total = 0;
/// let mut others = Vec::new();
/// let mut visitor = FreeVisitor::<capability::Scalar<Keyed>>::builder()
///     .integral(|_: &str, value: i64| {
///         total += value;
///         true
///     })
///     .rest(|key: &str, value: ValueRef<'_>| {
///         others.push(format!("{key}={value:?}"));
///         true
///     })
///     .build()
///     .unwrap();
///
/// let map = map! { "a" => 1, "b" => 2.5, "c" => "x", "d" => vec![1u8, 2], "e" => 2 };
/// map.iterate(&mut visitor);
/// drop(visitor);
/// assert_eq!(total, 3);
/// assert_eq!(others, ["b=Floating(2.5)", "c=String(\"x\")"]);
/// ```
pub struct FreeVisitor<'h, C: Capability> {
    slots: Vec<Slot<'h, C::Indexing>>,
    routes: [Option<usize>; Category::COUNT],
    capability: PhantomData<C>,
}

impl<'h, C: Capability> FreeVisitor<'h, C> {
    #[inline]
    pub fn builder() -> FreeVisitorBuilder<'h, C> {
        FreeVisitorBuilder {
            pending: Vec::new(),
            capability: PhantomData,
        }
    }

    #[inline]
    fn slot(&mut self, category: Category) -> Option<&mut Slot<'h, C::Indexing>> {
        match self.routes[category.index()] {
            Some(slot) => self.slots.get_mut(slot),
            None => None,
        }
    }
}

impl<C: Capability> Declared for FreeVisitor<'_, C> {
    type Capability = C;
}

impl<C: Capability> fmt::Debug for FreeVisitor<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeVisitor")
            .field("categories", &C::CATEGORIES)
            .field("handlers", &self.slots.len())
            .finish()
    }
}

/// Collects the callables of a [`FreeVisitor`].
///
/// Typed methods claim their own category. [`any`](Self::any) and
/// [`rest`](Self::rest) take a generic callable receiving a [`ValueRef`] and
/// claim categories left over once every typed callable is placed.
pub struct FreeVisitorBuilder<'h, C: Capability> {
    pending: Vec<Pending<'h, C::Indexing>>,
    capability: PhantomData<C>,
}

macro_rules! exact_handlers {
    ($($(#[$meta:meta])* $method:ident: for<$($lt:lifetime),*> $arg:ty => $category:ident, $slot:ident;)+) => {
        $(
            $(#[$meta])*
            pub fn $method<F>(mut self, handler: F) -> Self
            where
                F: for<'k, $($lt),*> FnMut(Idx<'k, C>, $arg) -> Sig<C> + 'h,
            {
                self.pending.push(Pending {
                    claim: Claim::Exact(Category::$category),
                    slot: Slot::$slot(Box::new(handler)),
                });
                self
            }
        )+
    };
}

impl<'h, C: Capability> FreeVisitorBuilder<'h, C> {
    exact_handlers! {
        integral: for<> i64 => Integral, Integral;
        floating: for<> f64 => Floating, Floating;
        string: for<'v> &'v str => String, String;
        integral_array: for<'v> ArrayView<'v, i64> => IntegralArray, IntegralArray;
        floating_array: for<'v> ArrayView<'v, f64> => FloatingArray, FloatingArray;
        binary_array: for<'v> ArrayView<'v, u8> => BinaryArray, BinaryArray;
        /// Handles nested maps, reached as [`MapNode`] trait objects.
        map: for<'v> &'v MapNode<'v> => MapReference, Map;
        /// Handles nested lists, reached as [`ListNode`] trait objects.
        list: for<'v> &'v ListNode<'v> => ListReference, List;
    }

    /// Adds a generic callable claiming the first declared category no other
    /// callable claims.
    pub fn any<F>(mut self, handler: F) -> Self
    where
        F: for<'k, 'v> FnMut(Idx<'k, C>, ValueRef<'v>) -> Sig<C> + 'h,
    {
        self.pending.push(Pending {
            claim: Claim::Next,
            slot: Slot::Any(Box::new(handler)),
        });
        self
    }

    /// Adds a generic callable claiming every declared category no other
    /// callable claims.
    pub fn rest<F>(mut self, handler: F) -> Self
    where
        F: for<'k, 'v> FnMut(Idx<'k, C>, ValueRef<'v>) -> Sig<C> + 'h,
    {
        self.pending.push(Pending {
            claim: Claim::Rest,
            slot: Slot::Any(Box::new(handler)),
        });
        self
    }

    /// Routes every declared category to exactly one callable.
    ///
    /// Typed callables are placed first, then generic ones in the order they
    /// were added.
    ///
    /// # Errors
    ///
    /// - [`Error::UndeclaredCategory`] if a typed callable targets a category
    ///   `C` does not declare
    /// - [`Error::DuplicateHandler`] if two typed callables target the same
    ///   category
    /// - [`Error::UnusedHandler`] if a generic callable finds nothing left to
    ///   claim
    /// - [`Error::MissingHandler`] if a declared category is left unclaimed
    pub fn build(self) -> Result<FreeVisitor<'h, C>> {
        let declared = C::CATEGORIES;
        let mut routes = [None; Category::COUNT];

        for (slot, pending) in self.pending.iter().enumerate() {
            if let Claim::Exact(category) = pending.claim {
                if !declared.contains(category) {
                    return Err(reject(Error::UndeclaredCategory(category)));
                }
                if routes[category.index()].replace(slot).is_some() {
                    return Err(reject(Error::DuplicateHandler(category)));
                }
            }
        }

        for (slot, pending) in self.pending.iter().enumerate() {
            match pending.claim {
                Claim::Exact(_) => {}
                Claim::Next => {
                    let category = unclaimed(declared, &routes)
                        .next()
                        .ok_or_else(|| reject(Error::UnusedHandler))?;
                    routes[category.index()] = Some(slot);
                }
                Claim::Rest => {
                    let left: CategoryList = unclaimed(declared, &routes).collect();
                    if left.is_empty() {
                        return Err(reject(Error::UnusedHandler));
                    }
                    for category in left {
                        routes[category.index()] = Some(slot);
                    }
                }
            }
        }

        if let Some(category) = unclaimed(declared, &routes).next() {
            return Err(reject(Error::MissingHandler(category)));
        }

        Ok(FreeVisitor {
            slots: self.pending.into_iter().map(|pending| pending.slot).collect(),
            routes,
            capability: PhantomData,
        })
    }
}

fn unclaimed(
    declared: CategoryList,
    routes: &[Option<usize>; Category::COUNT],
) -> impl Iterator<Item = Category> + '_ {
    declared
        .into_iter()
        .filter(move |category| routes[category.index()].is_none())
}

fn reject(error: Error) -> Error {
    tracing::debug!(%error, "free visitor rejected");
    error
}

macro_rules! routed_visits {
    ($k:lifetime; $($method:ident($arg:ident: $ty:ty) => $category:ident, $slot:ident;)+) => {
        $(
            #[inline]
            fn $method(&mut self, index: Idx<$k, C>, $arg: $ty) -> Sig<C> {
                match self.slot(Category::$category) {
                    Some(Slot::$slot(handler)) => handler(index, $arg),
                    Some(Slot::Any(handler)) => handler(index, ValueRef::$slot($arg)),
                    _ => <Sig<C> as Flow>::proceed(),
                }
            }
        )+
    };
}

impl<'k, C: Capability> Visitor<'k, C::Indexing> for FreeVisitor<'_, C> {
    #[inline]
    fn categories(&self) -> CategoryList {
        C::CATEGORIES
    }

    routed_visits! { 'k;
        visit_integral(value: i64) => Integral, Integral;
        visit_floating(value: f64) => Floating, Floating;
        visit_string(value: &str) => String, String;
        visit_integral_array(value: ArrayView<'_, i64>) => IntegralArray, IntegralArray;
        visit_floating_array(value: ArrayView<'_, f64>) => FloatingArray, FloatingArray;
        visit_binary_array(value: ArrayView<'_, u8>) => BinaryArray, BinaryArray;
        visit_map(map: &MapNode<'_>) => MapReference, Map;
        visit_list(list: &ListNode<'_>) => ListReference, List;
    }
}
