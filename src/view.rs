use std::{fmt, marker::PhantomData};

use zerocopy::{Immutable, IntoBytes};

use crate::{Category, List, ListNode, Map, MapNode};

mod private {
    /// Storage of a contiguous value, one variant per stored element type.
    #[derive(Clone, Copy, Debug)]
    pub enum Elements<'a> {
        I8(&'a [i8]),
        I16(&'a [i16]),
        I32(&'a [i32]),
        I64(&'a [i64]),
        U16(&'a [u16]),
        U32(&'a [u32]),
        U8(&'a [u8]),
        F32(&'a [f32]),
        F64(&'a [f64]),
    }

    pub trait Source: Sized {
        fn elements(data: &[Self]) -> Elements<'_>;
    }

    pub trait Element: Sized {
        fn read(elements: Elements<'_>, index: usize) -> Option<Self>;

        fn native(elements: Elements<'_>) -> Option<&[Self]>;
    }
}

use private::Elements;

impl<'a> Elements<'a> {
    fn len(self) -> usize {
        match self {
            Elements::I8(data) => data.len(),
            Elements::I16(data) => data.len(),
            Elements::I32(data) => data.len(),
            Elements::I64(data) => data.len(),
            Elements::U16(data) => data.len(),
            Elements::U32(data) => data.len(),
            Elements::U8(data) => data.len(),
            Elements::F32(data) => data.len(),
            Elements::F64(data) => data.len(),
        }
    }

    fn as_bytes(self) -> &'a [u8] {
        match self {
            Elements::I8(data) => data.as_bytes(),
            Elements::I16(data) => data.as_bytes(),
            Elements::I32(data) => data.as_bytes(),
            Elements::I64(data) => data.as_bytes(),
            Elements::U16(data) => data.as_bytes(),
            Elements::U32(data) => data.as_bytes(),
            Elements::U8(data) => data,
            Elements::F32(data) => data.as_bytes(),
            Elements::F64(data) => data.as_bytes(),
        }
    }
}

/// Element type of the view a contiguous category is handed out as.
///
/// `i64` for [`Category::IntegralArray`], `f64` for
/// [`Category::FloatingArray`] and `u8` for [`Category::BinaryArray`].
pub trait ArrayElement: private::Element + Copy + Send + Sync + 'static {
    const CATEGORY: Category;

    /// Wraps a view of this element type in its bucket.
    fn array_ref(view: ArrayView<'_, Self>) -> ArrayRef<'_>;
}

/// Element type a contiguous value can be stored with.
///
/// Narrower integers are viewed as [`Category::IntegralArray`] and `f32` as
/// [`Category::FloatingArray`]. Their elements are widened as they are read,
/// so the storage is never copied.
pub trait ArraySource: private::Source + IntoBytes + Immutable + Copy + 'static {
    type Element: ArrayElement;
}

macro_rules! array_source {
    ($($ty:ty => $variant:ident as $element:ty),+ $(,)?) => {
        $(
            impl private::Source for $ty {
                #[inline]
                fn elements(data: &[Self]) -> Elements<'_> {
                    Elements::$variant(data)
                }
            }

            impl ArraySource for $ty {
                type Element = $element;
            }
        )+
    };
}

array_source! {
    i8 => I8 as i64,
    i16 => I16 as i64,
    i32 => I32 as i64,
    i64 => I64 as i64,
    u16 => U16 as i64,
    u32 => U32 as i64,
    u8 => U8 as u8,
    f32 => F32 as f64,
    f64 => F64 as f64,
}

macro_rules! array_element {
    ($ty:ty: $native:ident $(, $widened:ident)* => $category:ident, $bucket:ident) => {
        impl private::Element for $ty {
            #[inline]
            fn read(elements: Elements<'_>, index: usize) -> Option<Self> {
                match elements {
                    Elements::$native(data) => data.get(index).copied(),
                    $(Elements::$widened(data) => data.get(index).map(|&value| <$ty>::from(value)),)*
                    _ => None,
                }
            }

            #[inline]
            fn native(elements: Elements<'_>) -> Option<&[Self]> {
                match elements {
                    Elements::$native(data) => Some(data),
                    _ => None,
                }
            }
        }

        impl ArrayElement for $ty {
            const CATEGORY: Category = Category::$category;

            #[inline]
            fn array_ref(view: ArrayView<'_, Self>) -> ArrayRef<'_> {
                ArrayRef::$bucket(view)
            }
        }
    };
}

array_element!(i64: I64, I8, I16, I32, U16, U32 => IntegralArray, Integral);
array_element!(f64: F64, F32 => FloatingArray, Floating);
array_element!(u8: U8 => BinaryArray, Binary);

/// A borrowed, homogeneous, contiguous run of elements: the stored data plus
/// its length.
///
/// Handlers of the array categories receive one of these instead of the
/// owning container, so any storage exposing a slice can be visited. The
/// stored elements may be narrower than `T` (an `[i32]` seen as
/// `ArrayView<i64>`); [`get`](Self::get) and [`iter`](Self::iter) widen them,
/// [`as_slice`](Self::as_slice) only succeeds when no widening is needed.
///
/// ```
/// use value_visit::ArrayView;
///
/// let narrow = [1i32, -2, 3];
/// let view: ArrayView<'_, i64> = ArrayView::new(&narrow);
/// assert_eq!(view.iter().sum::<i64>(), 2);
/// assert_eq!(view.as_slice(), None);
/// assert_eq!(view.as_bytes().len(), 12);
///
/// let wide = [1i64, -2, 3];
/// assert_eq!(view, ArrayView::new(&wide));
/// assert_eq!(ArrayView::new(&wide).as_slice(), Some(&wide[..]));
/// ```
pub struct ArrayView<'a, T> {
    elements: Elements<'a>,
    element: PhantomData<T>,
}

impl<T> Clone for ArrayView<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArrayView<'_, T> {}

impl<'a, T: ArrayElement> ArrayView<'a, T> {
    #[inline]
    pub fn new<E: ArraySource<Element = T>>(data: &'a [E]) -> Self {
        Self {
            elements: E::elements(data),
            element: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<T> {
        T::read(self.elements, index)
    }

    #[inline]
    pub fn iter(&self) -> ArrayIter<'a, T> {
        ArrayIter {
            view: *self,
            front: 0,
            back: self.len(),
        }
    }

    /// The elements as stored, when they are stored as `T`.
    #[inline]
    pub fn as_slice(&self) -> Option<&'a [T]> {
        T::native(self.elements)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// The raw in-memory bytes of the stored elements, in native byte order
    /// and stored width.
    ///
    /// # Example
    ///
    /// ```
    /// use value_visit::ArrayView;
    ///
    /// let data = [1u8, 2, 3];
    /// assert_eq!(ArrayView::new(&data).as_bytes(), &[1, 2, 3]);
    ///
    /// let data = [1i64];
    /// assert_eq!(ArrayView::new(&data).as_bytes(), &1i64.to_ne_bytes());
    /// ```
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.elements.as_bytes()
    }

    #[inline]
    pub const fn category(&self) -> Category {
        T::CATEGORY
    }
}

impl<T: ArrayElement + PartialEq> PartialEq for ArrayView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<'a, T: ArrayElement> IntoIterator for ArrayView<'a, T> {
    type Item = T;
    type IntoIter = ArrayIter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: ArrayElement + fmt::Debug> fmt::Debug for ArrayView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over the elements of an [`ArrayView`], widened to `T`.
#[derive(Clone)]
pub struct ArrayIter<'a, T> {
    view: ArrayView<'a, T>,
    front: usize,
    back: usize,
}

impl<T: ArrayElement> Iterator for ArrayIter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let value = self.view.get(self.front);
        self.front += 1;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: ArrayElement> DoubleEndedIterator for ArrayIter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.view.get(self.back)
    }
}

impl<T: ArrayElement> ExactSizeIterator for ArrayIter<'_, T> {}

/// Storage that can lend an [`ArrayView`] over its elements.
pub trait AsContiguous {
    type Element: ArrayElement;

    fn as_contiguous(&self) -> ArrayView<'_, Self::Element>;
}

impl<E: ArraySource> AsContiguous for [E] {
    type Element = E::Element;

    #[inline]
    fn as_contiguous(&self) -> ArrayView<'_, E::Element> {
        ArrayView::new(self)
    }
}

impl<E: ArraySource, const N: usize> AsContiguous for [E; N] {
    type Element = E::Element;

    #[inline]
    fn as_contiguous(&self) -> ArrayView<'_, E::Element> {
        ArrayView::new(self.as_slice())
    }
}

impl<E: ArraySource> AsContiguous for Vec<E> {
    type Element = E::Element;

    #[inline]
    fn as_contiguous(&self) -> ArrayView<'_, E::Element> {
        ArrayView::new(self.as_slice())
    }
}

impl<E: ArraySource> AsContiguous for Box<[E]> {
    type Element = E::Element;

    #[inline]
    fn as_contiguous(&self) -> ArrayView<'_, E::Element> {
        ArrayView::new(&**self)
    }
}

/// A scalar lent for editing.
#[derive(Debug)]
pub enum ScalarMut<'a> {
    Integral(&'a mut i64),
    Floating(&'a mut f64),
    String(&'a mut String),
}

impl ScalarMut<'_> {
    pub const fn category(&self) -> Category {
        match self {
            Self::Integral(_) => Category::Integral,
            Self::Floating(_) => Category::Floating,
            Self::String(_) => Category::String,
        }
    }
}

/// A contiguous value lent for editing. Elements can be overwritten, the
/// length is fixed.
#[derive(Debug)]
pub enum ArrayMut<'a> {
    Integral(&'a mut [i64]),
    Floating(&'a mut [f64]),
    Binary(&'a mut [u8]),
}

impl ArrayMut<'_> {
    pub const fn category(&self) -> Category {
        match self {
            Self::Integral(_) => Category::IntegralArray,
            Self::Floating(_) => Category::FloatingArray,
            Self::Binary(_) => Category::BinaryArray,
        }
    }
}

/// A nested container lent for editing.
#[derive(Debug)]
pub enum ContainerMut<'a> {
    Map(&'a mut Map),
    List(&'a mut List),
}

impl ContainerMut<'_> {
    pub const fn category(&self) -> Category {
        match self {
            Self::Map(_) => Category::MapReference,
            Self::List(_) => Category::ListReference,
        }
    }
}

/// A scalar handed out by value (strings by reference).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarRef<'a> {
    Integral(i64),
    Floating(f64),
    String(&'a str),
}

impl ScalarRef<'_> {
    pub const fn category(&self) -> Category {
        match self {
            Self::Integral(_) => Category::Integral,
            Self::Floating(_) => Category::Floating,
            Self::String(_) => Category::String,
        }
    }
}

/// A contiguous value viewed through an [`ArrayView`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArrayRef<'a> {
    Integral(ArrayView<'a, i64>),
    Floating(ArrayView<'a, f64>),
    Binary(ArrayView<'a, u8>),
}

impl ArrayRef<'_> {
    pub const fn category(&self) -> Category {
        match self {
            Self::Integral(_) => Category::IntegralArray,
            Self::Floating(_) => Category::FloatingArray,
            Self::Binary(_) => Category::BinaryArray,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Integral(view) => view.len(),
            Self::Floating(view) => view.len(),
            Self::Binary(view) => view.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Integral(view) => view.as_bytes(),
            Self::Floating(view) => view.as_bytes(),
            Self::Binary(view) => view.as_bytes(),
        }
    }
}

/// A nested container, reached through its traversal protocol.
#[derive(Clone, Copy)]
pub enum ContainerRef<'a> {
    Map(&'a MapNode<'a>),
    List(&'a ListNode<'a>),
}

impl ContainerRef<'_> {
    pub const fn category(&self) -> Category {
        match self {
            Self::Map(_) => Category::MapReference,
            Self::List(_) => Category::ListReference,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Map(map) => map.len(),
            Self::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ContainerRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map(map) => f.debug_struct("Map").field("len", &map.len()).finish(),
            Self::List(list) => f.debug_struct("List").field("len", &list.len()).finish(),
        }
    }
}

/// Any value, borrowed, tagged by category.
///
/// Generic handlers (see [`FreeVisitorBuilder::any`](crate::FreeVisitorBuilder::any))
/// receive this instead of a category-specific argument.
#[derive(Clone, Copy)]
pub enum ValueRef<'a> {
    Integral(i64),
    Floating(f64),
    String(&'a str),
    IntegralArray(ArrayView<'a, i64>),
    FloatingArray(ArrayView<'a, f64>),
    BinaryArray(ArrayView<'a, u8>),
    Map(&'a MapNode<'a>),
    List(&'a ListNode<'a>),
}

impl<'a> ValueRef<'a> {
    pub const fn category(&self) -> Category {
        match self {
            Self::Integral(_) => Category::Integral,
            Self::Floating(_) => Category::Floating,
            Self::String(_) => Category::String,
            Self::IntegralArray(_) => Category::IntegralArray,
            Self::FloatingArray(_) => Category::FloatingArray,
            Self::BinaryArray(_) => Category::BinaryArray,
            Self::Map(_) => Category::MapReference,
            Self::List(_) => Category::ListReference,
        }
    }

    #[inline]
    pub const fn as_integral(&self) -> Option<i64> {
        match self {
            Self::Integral(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_floating(&self) -> Option<f64> {
        match self {
            Self::Floating(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::String(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&'a MapNode<'a>> {
        match self {
            Self::Map(map) => Some(*map),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_list(&self) -> Option<&'a ListNode<'a>> {
        match self {
            Self::List(list) => Some(*list),
            _ => None,
        }
    }
}

impl<'a> From<ScalarRef<'a>> for ValueRef<'a> {
    #[inline]
    fn from(value: ScalarRef<'a>) -> Self {
        match value {
            ScalarRef::Integral(value) => Self::Integral(value),
            ScalarRef::Floating(value) => Self::Floating(value),
            ScalarRef::String(value) => Self::String(value),
        }
    }
}

impl<'a> From<ArrayRef<'a>> for ValueRef<'a> {
    #[inline]
    fn from(value: ArrayRef<'a>) -> Self {
        match value {
            ArrayRef::Integral(view) => Self::IntegralArray(view),
            ArrayRef::Floating(view) => Self::FloatingArray(view),
            ArrayRef::Binary(view) => Self::BinaryArray(view),
        }
    }
}

impl<'a> From<ContainerRef<'a>> for ValueRef<'a> {
    #[inline]
    fn from(value: ContainerRef<'a>) -> Self {
        match value {
            ContainerRef::Map(map) => Self::Map(map),
            ContainerRef::List(list) => Self::List(list),
        }
    }
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integral(value) => f.debug_tuple("Integral").field(value).finish(),
            Self::Floating(value) => f.debug_tuple("Floating").field(value).finish(),
            Self::String(value) => f.debug_tuple("String").field(value).finish(),
            Self::IntegralArray(view) => f.debug_tuple("IntegralArray").field(view).finish(),
            Self::FloatingArray(view) => f.debug_tuple("FloatingArray").field(view).finish(),
            Self::BinaryArray(view) => f.debug_tuple("BinaryArray").field(view).finish(),
            Self::Map(map) => f.debug_struct("Map").field("len", &map.len()).finish(),
            Self::List(list) => f.debug_struct("List").field("len", &list.len()).finish(),
        }
    }
}
