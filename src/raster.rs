//! Bresenham rasterization of integer segments.

use std::iter::FusedIterator;

use crate::{LineSegment, Point2D};

/// Iterator over the pixels of a segment, in order from `start` to
/// `end`, both inclusive.
///
/// A zero-length segment yields its single point. The iterator is
/// `Clone`, so a traversal can be restarted from any position.
///
/// The walk runs in `i64`, so any two `i32` end points are handled
/// without overflow.
#[derive(Debug, Clone)]
pub struct LinePixels {
    x: i64,
    y: i64,
    x1: i64,
    y1: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl LinePixels {
    pub fn new(segment: &LineSegment) -> Self {
        let LineSegment { start, end } = *segment;
        let dx = segment.dx().abs();
        let dy = segment.dy().abs();
        LinePixels {
            x: start.x as i64,
            y: start.y as i64,
            x1: end.x as i64,
            y1: end.y as i64,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }

    /// Number of pixels left to yield.
    fn remaining(&self) -> usize {
        if self.done {
            0
        } else {
            (self.x1 - self.x).abs().max((self.y1 - self.y).abs()) as usize + 1
        }
    }
}

impl Iterator for LinePixels {
    type Item = Point2D;

    fn next(&mut self) -> Option<Point2D> {
        if self.done {
            return None;
        }
        // Every visited pixel lies between the end points.
        let pt = Point2D::new(self.x as i32, self.y as i32);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(pt);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(pt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for LinePixels {}
impl FusedIterator for LinePixels {}

/// Rasterize a segment; see [`LinePixels`].
#[inline]
pub fn rasterize(segment: &LineSegment) -> LinePixels {
    LinePixels::new(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixels(a: (i32, i32), b: (i32, i32)) -> Vec<Point2D> {
        rasterize(&LineSegment::from([a, b])).collect()
    }

    #[test]
    fn horizontal_line() {
        let pts = pixels((0, 0), (5, 0));
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[0], Point2D::new(0, 0));
        assert_eq!(pts[2], Point2D::new(2, 0));
        assert_eq!(pts[5], Point2D::new(5, 0));
    }

    #[test]
    fn diagonal_line() {
        let pts = pixels((0, 0), (3, 3));
        let expected: Vec<_> = (0..=3).map(|i| Point2D::new(i, i)).collect();
        assert_eq!(pts, expected);
    }

    #[test]
    fn degenerate_is_single_point() {
        assert_eq!(pixels((4, -2), (4, -2)), vec![Point2D::new(4, -2)]);
    }

    #[test]
    fn pixels_are_connected_and_exact_sized() {
        let cases = [((0, 0), (7, 3)), ((5, 9), (-4, 1)), ((-3, -3), (-3, 8)), ((2, 1), (-9, -13))];
        for &(a, b) in cases.iter() {
            let iter = rasterize(&LineSegment::from([a, b]));
            let n = iter.len();
            let pts: Vec<_> = iter.collect();
            assert_eq!(pts.len(), n);
            assert_eq!(pts.first(), Some(&Point2D::from(a)));
            assert_eq!(pts.last(), Some(&Point2D::from(b)));
            for w in pts.windows(2) {
                assert!((w[0].x - w[1].x).abs() <= 1 && (w[0].y - w[1].y).abs() <= 1);
                assert_ne!(w[0], w[1]);
            }
        }
    }

    #[test]
    fn extreme_end_points() {
        let far = 2_000_000_000;
        let mut iter = rasterize(&LineSegment::from([(-far, 5), (far, 5)]));
        assert_eq!(iter.len(), 2 * far as usize + 1);
        assert_eq!(iter.next(), Some(Point2D::new(-far, 5)));
        assert_eq!(iter.next(), Some(Point2D::new(-far + 1, 5)));

        let mut iter = rasterize(&LineSegment::from([(i32::MIN, i32::MIN), (i32::MAX, i32::MAX)]));
        assert_eq!(iter.next(), Some(Point2D::new(i32::MIN, i32::MIN)));
        assert_eq!(iter.next(), Some(Point2D::new(i32::MIN + 1, i32::MIN + 1)));

        let steep = LineSegment::from([(i32::MAX, i32::MAX - 3), (i32::MAX - 1, i32::MAX)]);
        let steep: Vec<_> = rasterize(&steep).collect();
        assert_eq!(steep.len(), 4);
        assert_eq!(steep.last(), Some(&Point2D::new(i32::MAX - 1, i32::MAX)));
    }

    #[test]
    fn restartable() {
        let mut iter = rasterize(&LineSegment::from([(0, 0), (10, 4)]));
        iter.next();
        iter.next();
        let saved = iter.clone();
        let rest: Vec<_> = iter.collect();
        assert_eq!(saved.collect::<Vec<_>>(), rest);
    }
}
