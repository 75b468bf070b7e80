//! Math layer: validated vectors and line primitives

pub mod line;
pub mod vector;

pub use line::{Line, LineSegment, Ray};
pub use vector::Vector;
