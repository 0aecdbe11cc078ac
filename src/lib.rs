//! Category-based visitor dispatch over heterogeneous, nested value trees.
//!
//! Values belong to one of eight [`Category`]s. A [`Visitor`] declares the
//! categories it handles and only ever sees values of those; everything else
//! passes by silently. Single values implement [`Visitable`], containers
//! implement [`VisitableContainer`], and both hand values to visitors through
//! the runtime [`bridge`].
//!
//! ```
//! use std::cell::RefCell;
//!
//! use value_visit::{
//!     FreeVisitor, Keyed, ListNode, MapNode, ValueRef, VisitableContainer, capability, list, map,
//! };
//!
//! let tree = map! {
//!     "a" => 1,
//!     "b" => list![2, 3],
//!     "c" => map! { "d" => "x" },
//! };
//!
//! let seen = RefCell::new(Vec::new());
//! let mut visitor = FreeVisitor::<capability::Value<Keyed>>::builder()
//!     .map(|key: &str, map: &MapNode<'_>| {
//!         seen.borrow_mut().push(format!("{key}: map of {}", map.len()));
//!         true
//!     })
//!     .list(|key: &str, list: &ListNode<'_>| {
//!         seen.borrow_mut().push(format!("{key}: list of {}", list.len()));
//!         true
//!     })
//!     .rest(|key: &str, value: ValueRef<'_>| {
//!         seen.borrow_mut().push(format!("{key}: {value:?}"));
//!         true
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert!(tree.iterate(&mut visitor));
//! drop(visitor);
//! assert_eq!(seen.into_inner(), ["a: Integral(1)", "b: list of 2", "c: map of 1"]);
//! ```

pub mod bridge;
mod builder;
pub mod capability;
pub mod category;
mod error;
mod index;
#[cfg(feature = "serde")]
mod ser;
mod value;
mod view;
mod visitable;
mod visitor;

pub use bridge::{Tagged, TaggedMut};
pub use builder::*;
pub use capability::{Capability, Declaration, Declared, Narrowed};
pub use category::{Category, CategoryList};
pub use error::*;
pub use index::*;
pub use value::*;
pub use view::*;
pub use visitable::*;
pub use visitor::*;
