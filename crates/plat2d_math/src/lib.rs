//! 2D Geometry Kernel
//!
//! This crate provides the vector and shape primitives for the plat2d
//! platformer core.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components
//! - [`Rect`] - Axis-aligned rectangle (top-left origin)
//! - [`Segment`] - Line segment between two points
//!
//! ## Tests
//!
//! - [`intersect`] - Segment/segment crossing
//! - [`boxes_overlap`] - Rectangle/rectangle overlap (half-open)
//! - [`segment_intersects_box`] - Segment/rectangle contact
//! - [`point_in_polygon`] - Ray-casting containment
//! - [`point_in_box`] - Strict rectangle containment

mod error;
mod intersect;
mod shapes;
mod vec2;

pub use error::GeometryError;
pub use intersect::{boxes_overlap, intersect, point_in_box, point_in_polygon, segment_intersects_box};
pub use shapes::{Rect, RectEdges, Segment};
pub use vec2::Vec2;
