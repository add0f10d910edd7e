//! Routing module
//!
//! An explicit route table mapping `(method, path)` to a page handler,
//! matched exactly. No annotations, no reflection: the whole HTTP surface is
//! one constructor.

mod table;

pub use table::{Route, RouteLookup, RouteTable};
