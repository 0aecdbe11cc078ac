mod leaf;
mod list;
mod macros;
mod map;
mod nested;
mod stored;

pub use leaf::*;
pub use list::*;
pub use map::*;
pub use nested::*;
pub use stored::*;
