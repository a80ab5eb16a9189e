//! **gridpath-core**: geometry primitives shared by the gridpath crates.
//!
//! Provides integer grid coordinates, the four orthogonal directions in
//! their fixed adjacency order, and half-open rectangles with row-major
//! indexing.

pub mod geom;

pub use geom::{Direction, Point, Range, RangeIter};
