//! Assembling visitors without writing a `Visitor` impl.
//!
//! [`FreeVisitor`] collects one callable per declared category,
//! [`ComposedVisitor`] stitches complete visitors for disjoint parts of a
//! capability together. Both check at `build` time that every declared
//! category has exactly one handler.

mod composed;
mod free;

pub use composed::*;
pub use free::*;

use crate::{Capability, Indexing};

type Idx<'k, C> = <<C as Capability>::Indexing as Indexing>::Index<'k>;
type Sig<C> = <<C as Capability>::Indexing as Indexing>::Signal;
