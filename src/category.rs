//! The closed set of value categories and the list algebra over them.
//!
//! Every storable value belongs to exactly one [`Category`]. Visitors declare
//! which categories they handle through a [`CategoryList`], an ordered list
//! that never contains the same category twice. All list operations are
//! `const fn`, so capability sets are computed at compile time:
//!
//! ```
//! use value_visit::{Category, CategoryList, category};
//!
//! const NUMBERS_AND_TEXT: CategoryList = category::union(&[
//!     CategoryList::NUMERIC.as_slice(),
//!     &[Category::String, Category::Integral],
//! ]);
//!
//! assert_eq!(
//!     NUMBERS_AND_TEXT.as_slice(),
//!     &[Category::Integral, Category::Floating, Category::String]
//! );
//! ```

use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

/// The kind of a stored value, which selects the handler it is passed to.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Category {
    Integral = 0,
    Floating = 1,
    String = 2,
    IntegralArray = 3,
    FloatingArray = 4,
    BinaryArray = 5,
    MapReference = 6,
    ListReference = 7,
}

impl Category {
    /// Number of distinct categories.
    pub const COUNT: usize = 8;

    /// Every category, in declaration order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Integral,
        Category::Floating,
        Category::String,
        Category::IntegralArray,
        Category::FloatingArray,
        Category::BinaryArray,
        Category::MapReference,
        Category::ListReference,
    ];

    /// Position of the category in [`Category::ALL`].
    ///
    /// ```
    /// use value_visit::Category;
    ///
    /// assert_eq!(Category::ALL[Category::String.index()], Category::String);
    /// assert_eq!(Category::ListReference.index(), Category::COUNT - 1);
    /// ```
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns `true` for Integral and Floating.
    ///
    /// # Example
    ///
    /// ```
    /// use value_visit::Category;
    ///
    /// assert!(Category::Integral.is_numeric());
    /// assert!(!Category::String.is_numeric());
    /// ```
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integral | Self::Floating)
    }

    /// Returns `true` for the numeric categories and String.
    ///
    /// Scalars are handed to visitors by value (strings by reference).
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::Integral | Self::Floating | Self::String)
    }

    /// Returns `true` for IntegralArray and FloatingArray.
    pub const fn is_numeric_array(self) -> bool {
        matches!(self, Self::IntegralArray | Self::FloatingArray)
    }

    /// Returns `true` for the array categories.
    ///
    /// Contiguous values are handed to visitors as an
    /// [`ArrayView`](crate::ArrayView) over homogeneous elements.
    pub const fn is_contiguous(self) -> bool {
        matches!(
            self,
            Self::IntegralArray | Self::FloatingArray | Self::BinaryArray
        )
    }

    /// Returns `true` for MapReference and ListReference.
    ///
    /// Containers are handed to visitors as the nested map or list itself.
    pub const fn is_container(self) -> bool {
        matches!(self, Self::MapReference | Self::ListReference)
    }

    /// The variant name, as used by `Display`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integral => "Integral",
            Self::Floating => "Floating",
            Self::String => "String",
            Self::IntegralArray => "IntegralArray",
            Self::FloatingArray => "FloatingArray",
            Self::BinaryArray => "BinaryArray",
            Self::MapReference => "MapReference",
            Self::ListReference => "ListReference",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered list of categories without duplicates.
///
/// Membership tests ignore order, but the order is preserved by every
/// operation and decides which handler claims a category when visitors are
/// assembled from generic callables.
#[derive(Clone, Copy)]
pub struct CategoryList {
    items: [Category; Category::COUNT],
    len: u8,
}

impl CategoryList {
    /// The list with no categories.
    pub const EMPTY: Self = Self {
        items: [Category::Integral; Category::COUNT],
        len: 0,
    };

    /// Integral and Floating.
    pub const NUMERIC: Self = unique(&[Category::Integral, Category::Floating]);
    pub const SCALAR: Self = Self::NUMERIC.with(Category::String);
    pub const NUMERIC_ARRAY: Self = unique(&[Category::IntegralArray, Category::FloatingArray]);
    pub const CONTIGUOUS: Self = Self::NUMERIC_ARRAY.with(Category::BinaryArray);
    pub const CONTAINER: Self = unique(&[Category::MapReference, Category::ListReference]);
    pub const VALUE: Self = Self::SCALAR
        .union(Self::CONTIGUOUS)
        .union(Self::CONTAINER);

    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns this list with `category` appended, unless it is already
    /// present.
    pub const fn with(mut self, category: Category) -> Self {
        if self.contains(category) {
            return self;
        }
        self.items[self.len as usize] = category;
        self.len += 1;
        self
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn as_slice(&self) -> &[Category] {
        self.items.split_at(self.len as usize).0
    }

    pub const fn contains(&self, category: Category) -> bool {
        let mut i = 0;
        while i < self.len as usize {
            if self.items[i] as u8 == category as u8 {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Position of `category` in this list.
    pub const fn position(&self, category: Category) -> Option<usize> {
        let mut i = 0;
        while i < self.len as usize {
            if self.items[i] as u8 == category as u8 {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Returns `true` if every category of `other` is in this list.
    pub const fn includes(&self, other: Self) -> bool {
        let mut i = 0;
        while i < other.len as usize {
            if !self.contains(other.items[i]) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Set equality, ignoring order.
    pub const fn same_set(&self, other: Self) -> bool {
        self.len == other.len && self.includes(other)
    }

    /// Categories of `self` followed by the categories of `other` not
    /// already present.
    pub const fn union(self, other: Self) -> Self {
        let mut out = self;
        let mut i = 0;
        while i < other.len as usize {
            out = out.with(other.items[i]);
            i += 1;
        }
        out
    }

    /// Categories of `self` that are also in `other`, in the order of
    /// `self`.
    pub const fn intersect(self, other: Self) -> Self {
        let mut out = Self::EMPTY;
        let mut i = 0;
        while i < self.len as usize {
            if other.contains(self.items[i]) {
                out = out.with(self.items[i]);
            }
            i += 1;
        }
        out
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.as_slice().iter().copied()
    }
}

impl Default for CategoryList {
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialEq for CategoryList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for CategoryList {}

impl Hash for CategoryList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for CategoryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Category> for CategoryList {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl IntoIterator for CategoryList {
    type Item = Category;
    type IntoIter = std::iter::Take<std::array::IntoIter<Category, { Category::COUNT }>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter().take(self.len as usize)
    }
}

impl<'a> IntoIterator for &'a CategoryList {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Removes duplicates from `list`, keeping first occurrences.
pub const fn unique(list: &[Category]) -> CategoryList {
    let mut out = CategoryList::EMPTY;
    let mut i = 0;
    while i < list.len() {
        out = out.with(list[i]);
        i += 1;
    }
    out
}

/// Appends `lists` in argument order. Duplicates are kept.
pub fn concat(lists: &[&[Category]]) -> Vec<Category> {
    lists.iter().flat_map(|list| list.iter().copied()).collect()
}

/// `unique(concat(lists))`.
pub const fn union(lists: &[&[Category]]) -> CategoryList {
    let mut out = CategoryList::EMPTY;
    let mut i = 0;
    while i < lists.len() {
        let mut j = 0;
        while j < lists[i].len() {
            out = out.with(lists[i][j]);
            j += 1;
        }
        i += 1;
    }
    out
}

/// Categories present in both `a` and `b`, in the order of `a`.
pub const fn intersect(a: &[Category], b: &[Category]) -> CategoryList {
    unique(a).intersect(unique(b))
}
