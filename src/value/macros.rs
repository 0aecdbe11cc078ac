/// Builds a [`Map`](crate::Map) from `key => value` pairs, in order.
///
/// ```
/// use value_visit::{StoredValue, list, map};
///
/// let map = map! {
///     "a" => 1,
///     "b" => list![2, 3],
///     "c" => map! { "d" => "x" },
/// };
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.get("a"), Some(&StoredValue::Integral(1)));
/// ```
#[macro_export]
macro_rules! map {
    () => {
        $crate::Map::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert($key, $value);
        )+
        map
    }};
}

/// Builds a [`List`](crate::List) from values, in order.
#[macro_export]
macro_rules! list {
    () => {
        $crate::List::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut list = $crate::List::new();
        $(
            list.push($value);
        )+
        list
    }};
}
