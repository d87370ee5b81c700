//! Vector glyph outlines in subpixel coordinates.
//!
//! An [`Outline`] is a sequence of path segments in 26.6 units with the
//! y axis pointing up, as fonts define them. Outlines are moved and rotated
//! in place; both operations compose by calling them in sequence.

use crate::bbox::BBox;
use crate::fixed::{Matrix, Vector};

/// A single path command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    /// Start a new contour.
    MoveTo(Vector),
    /// Straight line to a point.
    LineTo(Vector),
    /// Quadratic Bézier through one control point.
    QuadTo(Vector, Vector),
    /// Cubic Bézier through two control points.
    CubicTo(Vector, Vector, Vector),
    /// Close the current contour.
    Close,
}

impl PathSegment {
    fn map_points(&mut self, f: impl Fn(Vector) -> Vector) {
        match self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => *p = f(*p),
            PathSegment::QuadTo(c, p) => {
                *c = f(*c);
                *p = f(*p);
            }
            PathSegment::CubicTo(c1, c2, p) => {
                *c1 = f(*c1);
                *c2 = f(*c2);
                *p = f(*p);
            }
            PathSegment::Close => {}
        }
    }

    fn points(&self) -> impl Iterator<Item = Vector> {
        let (buf, len) = match *self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => ([p, p, p], 1),
            PathSegment::QuadTo(c, p) => ([c, p, p], 2),
            PathSegment::CubicTo(c1, c2, p) => ([c1, c2, p], 3),
            PathSegment::Close => ([Vector::ZERO; 3], 0),
        };
        buf.into_iter().take(len)
    }
}

/// A glyph outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    segments: Vec<PathSegment>,
}

impl Outline {
    /// Create an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, to: Vector) {
        self.segments.push(PathSegment::MoveTo(to));
    }

    pub fn line_to(&mut self, to: Vector) {
        self.segments.push(PathSegment::LineTo(to));
    }

    pub fn quad_to(&mut self, control: Vector, to: Vector) {
        self.segments.push(PathSegment::QuadTo(control, to));
    }

    pub fn cubic_to(&mut self, control1: Vector, control2: Vector, to: Vector) {
        self.segments.push(PathSegment::CubicTo(control1, control2, to));
    }

    pub fn close(&mut self) {
        self.segments.push(PathSegment::Close);
    }

    /// The path segments in drawing order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Check if the outline has no contours (e.g. a space glyph).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Move every point by `delta`.
    pub fn translate(&mut self, delta: Vector) {
        if delta == Vector::ZERO {
            return;
        }
        for segment in &mut self.segments {
            segment.map_points(|p| p + delta);
        }
    }

    /// Apply `matrix` to every point, about the origin.
    pub fn transform(&mut self, matrix: &Matrix) {
        if matrix.is_identity() {
            return;
        }
        for segment in &mut self.segments {
            segment.map_points(|p| p.transform(matrix));
        }
    }

    /// The control box: the extent of every on- and off-curve point.
    ///
    /// Empty outlines report [`BBox::ZERO`].
    pub fn control_box(&self) -> BBox {
        let mut bbox = BBox::EMPTY;
        for point in self.segments.iter().flat_map(PathSegment::points) {
            bbox.include(point);
        }
        bbox.or_zero()
    }
}
