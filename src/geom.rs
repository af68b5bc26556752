use std::fmt;

use geo::{Coordinate, Line};

/// An integer canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point2D {
    pub x: i32,
    pub y: i32,
}

impl Point2D {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Point2D { x, y }
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point2D {
    fn from((x, y): (i32, i32)) -> Self {
        Point2D { x, y }
    }
}

impl From<Point2D> for Coordinate<i32> {
    fn from(p: Point2D) -> Self {
        Coordinate { x: p.x, y: p.y }
    }
}

impl From<Coordinate<i32>> for Point2D {
    fn from(c: Coordinate<i32>) -> Self {
        Point2D { x: c.x, y: c.y }
    }
}

/// A line segment between two canvas coordinates.
///
/// The end points are kept in the order given; `start == end` is a
/// valid (degenerate) segment that covers a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSegment {
    pub start: Point2D,
    pub end: Point2D,
}

impl LineSegment {
    #[inline]
    pub const fn new(start: Point2D, end: Point2D) -> Self {
        LineSegment { start, end }
    }

    /// Checks if both end points coincide.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Signed horizontal extent, widened so that any pair of `i32`
    /// end points fits.
    #[inline]
    pub fn dx(&self) -> i64 {
        self.end.x as i64 - self.start.x as i64
    }

    #[inline]
    pub fn dy(&self) -> i64 {
        self.end.y as i64 - self.start.y as i64
    }

    /// Convert to a float [`Line`] for use with `geo` algorithms.
    pub fn to_geo_f64(&self) -> Line<f64> {
        Line::new(
            Coordinate {
                x: self.start.x as f64,
                y: self.start.y as f64,
            },
            Coordinate {
                x: self.end.x as f64,
                y: self.end.y as f64,
            },
        )
    }
}

impl From<[(i32, i32); 2]> for LineSegment {
    fn from([a, b]: [(i32, i32); 2]) -> Self {
        LineSegment::new(a.into(), b.into())
    }
}

impl From<Line<i32>> for LineSegment {
    fn from(l: Line<i32>) -> Self {
        LineSegment::new(l.start.into(), l.end.into())
    }
}

impl From<LineSegment> for Line<i32> {
    fn from(s: LineSegment) -> Self {
        Line::new(Coordinate::from(s.start), Coordinate::from(s.end))
    }
}
