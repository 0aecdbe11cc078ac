use crate::{ArrayView, CategoryList, Flat, Flow, Indexing, List, ListNode, Map, MapNode};

/// A handler over a subset of the value categories.
///
/// `categories` names the categories this visitor handles. Values of any
/// other category are never passed to it: the dispatch bridge intersects the
/// value's category with this list before calling anything, so only the
/// methods for declared categories need to be overridden. The remaining
/// methods keep their default body, which does nothing and lets iteration
/// go on.
///
/// `K` selects how elements are addressed. [`Flat`] visitors receive `()`
/// and return `()`; [`Keyed`](crate::Keyed) and
/// [`Positional`](crate::Positional) visitors receive the key or position of
/// the element and return `false` to stop the iteration.
///
/// # Example
///
/// ```
/// use value_visit::{Category, CategoryList, Keyed, Visitor, VisitableContainer, map};
///
/// struct Sum(i64);
///
/// impl Visitor<'_, Keyed> for Sum {
///     fn categories(&self) -> CategoryList {
///         CategoryList::new().with(Category::Integral)
///     }
///
///     fn visit_integral(&mut self, _: &str, value: i64) -> bool {
///         self.0 += value;
///         true
///     }
/// }
///
/// let map = map! { "a" => 1, "b" => "skipped", "c" => 2 };
/// let mut sum = Sum(0);
/// assert!(map.iterate(&mut sum));
/// assert_eq!(sum.0, 3);
/// ```
pub trait Visitor<'k, K: Indexing = Flat> {
    /// The categories this visitor handles, in declaration order.
    fn categories(&self) -> CategoryList;

    fn visit_integral(&mut self, index: K::Index<'k>, value: i64) -> K::Signal {
        let _ = (index, value);
        <K::Signal as Flow>::proceed()
    }

    fn visit_floating(&mut self, index: K::Index<'k>, value: f64) -> K::Signal {
        let _ = (index, value);
        <K::Signal as Flow>::proceed()
    }

    fn visit_string(&mut self, index: K::Index<'k>, value: &str) -> K::Signal {
        let _ = (index, value);
        <K::Signal as Flow>::proceed()
    }

    fn visit_integral_array(&mut self, index: K::Index<'k>, value: ArrayView<'_, i64>) -> K::Signal {
        let _ = (index, value);
        <K::Signal as Flow>::proceed()
    }

    fn visit_floating_array(&mut self, index: K::Index<'k>, value: ArrayView<'_, f64>) -> K::Signal {
        let _ = (index, value);
        <K::Signal as Flow>::proceed()
    }

    fn visit_binary_array(&mut self, index: K::Index<'k>, value: ArrayView<'_, u8>) -> K::Signal {
        let _ = (index, value);
        <K::Signal as Flow>::proceed()
    }

    /// Receives a nested map. Call [`iterate`](crate::VisitableContainer::iterate)
    /// on it to descend.
    fn visit_map(&mut self, index: K::Index<'k>, map: &MapNode<'_>) -> K::Signal {
        let _ = (index, map);
        <K::Signal as Flow>::proceed()
    }

    /// Receives a nested list.
    fn visit_list(&mut self, index: K::Index<'k>, list: &ListNode<'_>) -> K::Signal {
        let _ = (index, list);
        <K::Signal as Flow>::proceed()
    }
}

macro_rules! forward_visitor {
    ($($ty:ty),+) => {
        $(
            impl<'k, K: Indexing, V: Visitor<'k, K> + ?Sized> Visitor<'k, K> for $ty {
                #[inline]
                fn categories(&self) -> CategoryList {
                    (**self).categories()
                }

                #[inline]
                fn visit_integral(&mut self, index: K::Index<'k>, value: i64) -> K::Signal {
                    (**self).visit_integral(index, value)
                }

                #[inline]
                fn visit_floating(&mut self, index: K::Index<'k>, value: f64) -> K::Signal {
                    (**self).visit_floating(index, value)
                }

                #[inline]
                fn visit_string(&mut self, index: K::Index<'k>, value: &str) -> K::Signal {
                    (**self).visit_string(index, value)
                }

                #[inline]
                fn visit_integral_array(&mut self, index: K::Index<'k>, value: ArrayView<'_, i64>) -> K::Signal {
                    (**self).visit_integral_array(index, value)
                }

                #[inline]
                fn visit_floating_array(&mut self, index: K::Index<'k>, value: ArrayView<'_, f64>) -> K::Signal {
                    (**self).visit_floating_array(index, value)
                }

                #[inline]
                fn visit_binary_array(&mut self, index: K::Index<'k>, value: ArrayView<'_, u8>) -> K::Signal {
                    (**self).visit_binary_array(index, value)
                }

                #[inline]
                fn visit_map(&mut self, index: K::Index<'k>, map: &MapNode<'_>) -> K::Signal {
                    (**self).visit_map(index, map)
                }

                #[inline]
                fn visit_list(&mut self, index: K::Index<'k>, list: &ListNode<'_>) -> K::Signal {
                    (**self).visit_list(index, list)
                }
            }
        )+
    };
}

forward_visitor!(&mut V, Box<V>);

/// A handler that edits values of a subset of the categories in place.
///
/// The editing counterpart of [`Visitor`], driven by
/// [`VisitableMut`](crate::VisitableMut) and
/// [`VisitableContainerMut`](crate::VisitableContainerMut). Scalars and
/// array elements can be overwritten but keep their category, and arrays
/// keep their length. Nested containers arrive as the concrete [`Map`] or
/// [`List`], so their entries can be added or removed. A shared nested
/// container is detached from its other holders before it is lent.
///
/// # Example
///
/// ```
/// use value_visit::{
///     Category, CategoryList, Keyed, StoredValue, VisitableContainerMut, VisitorMut, map,
/// };
///
/// struct Shout;
///
/// impl VisitorMut<'_, Keyed> for Shout {
///     fn categories(&self) -> CategoryList {
///         CategoryList::new().with(Category::String)
///     }
///
///     fn visit_string(&mut self, _: &str, value: &mut String) -> bool {
///         value.make_ascii_uppercase();
///         true
///     }
/// }
///
/// let mut map = map! { "a" => "quiet", "b" => 1 };
/// assert!(map.iterate_mut(&mut Shout));
/// assert_eq!(map.get("a").and_then(StoredValue::as_str), Some("QUIET"));
/// assert_eq!(map.get("b"), Some(&StoredValue::Integral(1)));
/// ```
pub trait VisitorMut<'k, K: Indexing = Flat> {
    /// The categories this visitor edits, in declaration order.
    fn categories(&self) -> CategoryList;

    fn visit_integral(&mut self, index: K::Index<'k>, value: &mut i64) -> K::Signal {
        let _ = (index, value);
        <K::Signal as Flow>::proceed()
    }

    fn visit_floating(&mut self, index: K::Index<'k>, value: &mut f64) -> K::Signal {
        let _ = (index, value);
        <K::Signal as Flow>::proceed()
    }

    fn visit_string(&mut self, index: K::Index<'k>, value: &mut String) -> K::Signal {
        let _ = (index, value);
        <K::Signal as Flow>::proceed()
    }

    fn visit_integral_array(&mut self, index: K::Index<'k>, values: &mut [i64]) -> K::Signal {
        let _ = (index, values);
        <K::Signal as Flow>::proceed()
    }

    fn visit_floating_array(&mut self, index: K::Index<'k>, values: &mut [f64]) -> K::Signal {
        let _ = (index, values);
        <K::Signal as Flow>::proceed()
    }

    fn visit_binary_array(&mut self, index: K::Index<'k>, values: &mut [u8]) -> K::Signal {
        let _ = (index, values);
        <K::Signal as Flow>::proceed()
    }

    /// Receives a nested map. Call
    /// [`iterate_mut`](crate::VisitableContainerMut::iterate_mut) on it to
    /// descend.
    fn visit_map(&mut self, index: K::Index<'k>, map: &mut Map) -> K::Signal {
        let _ = (index, map);
        <K::Signal as Flow>::proceed()
    }

    fn visit_list(&mut self, index: K::Index<'k>, list: &mut List) -> K::Signal {
        let _ = (index, list);
        <K::Signal as Flow>::proceed()
    }
}

macro_rules! forward_visitor_mut {
    ($($ty:ty),+) => {
        $(
            impl<'k, K: Indexing, V: VisitorMut<'k, K> + ?Sized> VisitorMut<'k, K> for $ty {
                #[inline]
                fn categories(&self) -> CategoryList {
                    (**self).categories()
                }

                #[inline]
                fn visit_integral(&mut self, index: K::Index<'k>, value: &mut i64) -> K::Signal {
                    (**self).visit_integral(index, value)
                }

                #[inline]
                fn visit_floating(&mut self, index: K::Index<'k>, value: &mut f64) -> K::Signal {
                    (**self).visit_floating(index, value)
                }

                #[inline]
                fn visit_string(&mut self, index: K::Index<'k>, value: &mut String) -> K::Signal {
                    (**self).visit_string(index, value)
                }

                #[inline]
                fn visit_integral_array(&mut self, index: K::Index<'k>, values: &mut [i64]) -> K::Signal {
                    (**self).visit_integral_array(index, values)
                }

                #[inline]
                fn visit_floating_array(&mut self, index: K::Index<'k>, values: &mut [f64]) -> K::Signal {
                    (**self).visit_floating_array(index, values)
                }

                #[inline]
                fn visit_binary_array(&mut self, index: K::Index<'k>, values: &mut [u8]) -> K::Signal {
                    (**self).visit_binary_array(index, values)
                }

                #[inline]
                fn visit_map(&mut self, index: K::Index<'k>, map: &mut Map) -> K::Signal {
                    (**self).visit_map(index, map)
                }

                #[inline]
                fn visit_list(&mut self, index: K::Index<'k>, list: &mut List) -> K::Signal {
                    (**self).visit_list(index, list)
                }
            }
        )+
    };
}

forward_visitor_mut!(&mut V, Box<V>);
