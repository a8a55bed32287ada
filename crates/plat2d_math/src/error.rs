//! Geometry error types

use thiserror::Error;

/// Error type for geometry operations that have no meaningful answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A zero-length vector has no direction to normalize to
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,
    /// Polygon tests need at least three vertices
    #[error("degenerate polygon with {vertices} vertices (need at least 3)")]
    DegeneratePolygon { vertices: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let msg = GeometryError::DegeneratePolygon { vertices: 2 }.to_string();
        assert!(msg.contains("degenerate polygon"));
        assert!(msg.contains('2'));
        assert!(GeometryError::ZeroLengthVector.to_string().contains("zero-length"));
    }
}
