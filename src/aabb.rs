use geo::{Coordinate, Rect};

use crate::{LineSegment, Point2D};

/// Axis-aligned integer box with inclusive bounds.
///
/// `min_x <= max_x` and `min_y <= max_y` always hold; the
/// constructors order their arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Aabb {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl Aabb {
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Aabb {
            min_x: min_x.min(max_x),
            max_x: min_x.max(max_x),
            min_y: min_y.min(max_y),
            max_y: min_y.max(max_y),
        }
    }

    /// The box spanned by two corners, in any order.
    pub fn from_corners(a: Point2D, b: Point2D) -> Self {
        Aabb::new(a.x, b.x, a.y, b.y)
    }

    /// Bounding box of a segment, grown by `padding` on every side.
    /// Bounds saturate at the `i32` range.
    pub fn of_segment(segment: &LineSegment, padding: i32) -> Self {
        let Aabb {
            min_x,
            max_x,
            min_y,
            max_y,
        } = Aabb::from_corners(segment.start, segment.end);
        Aabb {
            min_x: min_x.saturating_sub(padding),
            max_x: max_x.saturating_add(padding),
            min_y: min_y.saturating_sub(padding),
            max_y: max_y.saturating_add(padding),
        }
    }

    #[inline]
    pub fn min_x(&self) -> i32 {
        self.min_x
    }
    #[inline]
    pub fn max_x(&self) -> i32 {
        self.max_x
    }
    #[inline]
    pub fn min_y(&self) -> i32 {
        self.min_y
    }
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    pub fn width(&self) -> i64 {
        self.max_x as i64 - self.min_x as i64
    }

    pub fn height(&self) -> i64 {
        self.max_y as i64 - self.min_y as i64
    }

    /// Closed-interval overlap test.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y)
    }

    #[inline]
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Grow by `padding` and clamp to `[0, width) x [0, height)`.
    ///
    /// Returns `None` if nothing of the grown box remains on the
    /// canvas.
    pub fn inflate_clamped(&self, padding: i32, width: u32, height: u32) -> Option<Aabb> {
        let max_x = self.max_x.saturating_add(padding).min(width as i32 - 1);
        let max_y = self.max_y.saturating_add(padding).min(height as i32 - 1);
        let min_x = self.min_x.saturating_sub(padding).max(0);
        let min_y = self.min_y.saturating_sub(padding).max(0);
        if min_x > max_x || min_y > max_y {
            return None;
        }
        Some(Aabb {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }
}

/// Incrementally tracks the bounds of a point stream.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoundsTracker {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl Default for BoundsTracker {
    fn default() -> Self {
        BoundsTracker {
            min_x: i32::MAX,
            max_x: i32::MIN,
            min_y: i32::MAX,
            max_y: i32::MIN,
        }
    }
}

impl BoundsTracker {
    #[inline]
    pub(crate) fn push(&mut self, p: Point2D) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }

    /// The tracked box, or `None` if no point was pushed.
    pub(crate) fn finish(self) -> Option<Aabb> {
        if self.min_x > self.max_x {
            None
        } else {
            Some(Aabb::new(self.min_x, self.max_x, self.min_y, self.max_y))
        }
    }
}

impl From<Rect<i32>> for Aabb {
    fn from(r: Rect<i32>) -> Self {
        Aabb::new(r.min().x, r.max().x, r.min().y, r.max().y)
    }
}

impl From<Aabb> for Rect<i32> {
    fn from(b: Aabb) -> Self {
        Rect::new(
            Coordinate {
                x: b.min_x,
                y: b.min_y,
            },
            Coordinate {
                x: b.max_x,
                y: b.max_y,
            },
        )
    }
}
