//! Error types for assembling visitors and capability groups.
//!
//! Traversal itself never fails: a visitor that does not declare a value's
//! category, an absent key, or an out-of-range position are all silent
//! no-ops. Every [`Error`] is raised while a handler or group is being put
//! together, before any value is visited.
//!
//! # Example
//!
//! ```
//! use value_visit::{Category, Error, FreeVisitor, capability};
//!
//! let result = FreeVisitor::<capability::Numeric>::builder()
//!     .integral(|_: (), _: i64| {})
//!     .build();
//!
//! match result {
//!     Err(Error::MissingHandler(category)) => assert_eq!(category, Category::Floating),
//!     _ => unreachable!(),
//! }
//! ```

use std::fmt::{self, Display};

use crate::{Category, IndexKind};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when assembling
/// a visitor or a capability group.
///
/// # Variants
///
/// - [`IndexKindMismatch`](Error::IndexKindMismatch) - Group members disagree on how elements are indexed
/// - [`EmptyGroup`](Error::EmptyGroup) - A group was requested with no members
/// - [`DuplicateHandler`](Error::DuplicateHandler) - Two callables claim the same category
/// - [`MissingHandler`](Error::MissingHandler) - A declared category has no handler
/// - [`UndeclaredCategory`](Error::UndeclaredCategory) - A handler targets a category the capability does not list
/// - [`OverlappingHandlers`](Error::OverlappingHandlers) - Two composed sub-visitors declare the same category
/// - [`UnusedHandler`](Error::UnusedHandler) - A handler would never be called
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Declarations with different index kinds cannot form one group.
    ///
    /// `expected` is the kind of the first member, `found` the kind of the
    /// first member that differs from it.
    IndexKindMismatch {
        expected: IndexKind,
        found: IndexKind,
    },

    /// A group needs at least one member declaration.
    EmptyGroup,

    /// More than one callable claims this category.
    DuplicateHandler(Category),

    /// The capability declares this category but nothing handles it.
    MissingHandler(Category),

    /// A handler was supplied for a category the capability does not declare.
    UndeclaredCategory(Category),

    /// More than one composed sub-visitor declares this category.
    OverlappingHandlers(Category),

    /// A generic callable or sub-visitor was left with no category to claim.
    UnusedHandler,
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IndexKindMismatch { expected, found } => formatter.write_str(&format!(
                "index kind mismatch in group: expected {expected:?}, got {found:?}"
            )),
            Error::EmptyGroup => formatter.write_str("capability group has no members"),
            Error::DuplicateHandler(category) => {
                formatter.write_str(&format!("duplicate handler for category {category}"))
            }
            Error::MissingHandler(category) => {
                formatter.write_str(&format!("missing handler for category {category}"))
            }
            Error::UndeclaredCategory(category) => formatter.write_str(&format!(
                "handler for undeclared category {category}"
            )),
            Error::OverlappingHandlers(category) => formatter.write_str(&format!(
                "category {category} is handled by more than one sub-visitor"
            )),
            Error::UnusedHandler => formatter.write_str("handler has no category left to claim"),
        }
    }
}

impl std::error::Error for Error {}
