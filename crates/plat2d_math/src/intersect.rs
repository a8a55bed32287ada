//! Intersection and containment tests
//!
//! Boolean predicates over [`Segment`], [`Rect`] and polygons. All tests are
//! exact float comparisons; no epsilon is applied anywhere.

use crate::{GeometryError, Rect, Segment, Vec2};

/// Orientation test: true if `p1 -> p2 -> p3` turns counter-clockwise
/// (in y-up terms)
#[inline]
fn ccw(p1: Vec2, p2: Vec2, p3: Vec2) -> bool {
    (p3.y - p1.y) * (p2.x - p1.x) > (p2.y - p1.y) * (p3.x - p1.x)
}

/// Test whether two segments cross
///
/// Collinear and parallel segments never cross. The result does not depend
/// on argument order.
pub fn intersect(s1: &Segment, s2: &Segment) -> bool {
    ccw(s1.a, s2.a, s2.b) != ccw(s1.b, s2.a, s2.b) && ccw(s1.a, s1.b, s2.a) != ccw(s1.a, s1.b, s2.b)
}

/// Test whether two rectangles overlap
///
/// Half-open on both axes: rectangles that only share an edge do not overlap.
pub fn boxes_overlap(a: &Rect, b: &Rect) -> bool {
    a.x + a.w > b.x && a.y + a.h > b.y && a.x < b.x + b.w && a.y < b.y + b.h
}

/// Test whether a segment touches the interior of a rectangle
///
/// True if either endpoint lies strictly inside, or the segment crosses one
/// of the four edges.
pub fn segment_intersects_box(segment: &Segment, rect: &Rect) -> bool {
    if point_in_box(segment.a, rect) || point_in_box(segment.b, rect) {
        return true;
    }
    rect.edges().iter().any(|edge| intersect(segment, edge))
}

/// Strict interior test of a point against a rectangle
///
/// A rectangle with a zero or non-finite dimension contains nothing.
pub fn point_in_box(point: Vec2, rect: &Rect) -> bool {
    let usable = rect.w != 0.0
        && rect.h != 0.0
        && rect.x.is_finite()
        && rect.y.is_finite()
        && rect.w.is_finite()
        && rect.h.is_finite();

    usable
        && point.x > rect.x
        && point.y > rect.y
        && point.x < rect.x + rect.w
        && point.y < rect.y + rect.h
}

/// Ray-casting parity test of a point against a polygon
///
/// Vertices are taken in order with an implicit closing edge. Fewer than
/// three vertices is an error.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> Result<bool, GeometryError> {
    if vertices.len() < 3 {
        return Err(GeometryError::DegeneratePolygon {
            vertices: vertices.len(),
        });
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for (i, vi) in vertices.iter().enumerate() {
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    Ok(inside)
}
