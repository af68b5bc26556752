//! Segment vs box tests: Cohen-Sutherland rejection and Liang-Barsky
//! clipping.
//!
//! Both treat the box as closed, grown by `padding` on every side:
//! `[min - padding, max + padding]` on each axis.

use crate::{Aabb, LineSegment, Point2D};

/// Tolerance for treating a parametric direction as parallel to an
/// axis.
const PARALLEL_EPS: f64 = 1e-9;

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

#[derive(Debug, Clone, Copy)]
struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    fn padded(area: &Aabb, padding: i32) -> Self {
        let padding = padding as f64;
        Bounds {
            x_min: area.min_x() as f64 - padding,
            x_max: area.max_x() as f64 + padding,
            y_min: area.min_y() as f64 - padding,
            y_max: area.max_y() as f64 + padding,
        }
    }

    #[inline]
    fn outcode(&self, x: f64, y: f64) -> u8 {
        let mut code = INSIDE;
        if x < self.x_min {
            code |= LEFT;
        } else if x > self.x_max {
            code |= RIGHT;
        }
        if y < self.y_min {
            code |= BOTTOM;
        } else if y > self.y_max {
            code |= TOP;
        }
        code
    }
}

/// Checks if `segment` touches the padded box, using Cohen-Sutherland
/// outcodes.
///
/// Crossings with the box edges are always computed from the original
/// integer end points, so the decision is exact for canvas-sized
/// coordinates.
pub fn segment_intersects_box(segment: &LineSegment, area: &Aabb, padding: i32) -> bool {
    // Each round moves one end point onto a box edge line; four
    // rounds always suffice.
    const MAX_ROUNDS: usize = 8;

    let bounds = Bounds::padded(area, padding);
    let (ox, oy) = (segment.start.x as f64, segment.start.y as f64);
    let (dx, dy) = (segment.dx() as f64, segment.dy() as f64);

    let (mut x0, mut y0) = (ox, oy);
    let (mut x1, mut y1) = (segment.end.x as f64, segment.end.y as f64);
    let mut code0 = bounds.outcode(x0, y0);
    let mut code1 = bounds.outcode(x1, y1);

    for _ in 0..MAX_ROUNDS {
        if (code0 | code1) == INSIDE {
            return true;
        }
        if (code0 & code1) != INSIDE {
            return false;
        }

        let code_out = if code0 != INSIDE { code0 } else { code1 };
        // A set outcode bit implies the segment spans that edge, so
        // the divisor is non-zero.
        let (x, y) = if code_out & TOP != 0 {
            (ox + dx * (bounds.y_max - oy) / dy, bounds.y_max)
        } else if code_out & BOTTOM != 0 {
            (ox + dx * (bounds.y_min - oy) / dy, bounds.y_min)
        } else if code_out & RIGHT != 0 {
            (bounds.x_max, oy + dy * (bounds.x_max - ox) / dx)
        } else {
            (bounds.x_min, oy + dy * (bounds.x_min - ox) / dx)
        };

        if code_out == code0 {
            x0 = x;
            y0 = y;
            code0 = bounds.outcode(x0, y0);
        } else {
            x1 = x;
            y1 = y;
            code1 = bounds.outcode(x1, y1);
        }
    }
    false
}

/// Clip `segment` to the padded box with the Liang-Barsky algorithm.
///
/// Returns the part of the segment inside the box with end points
/// rounded to the nearest pixel, or `None` if they don't overlap. A
/// degenerate segment is returned unchanged if its point is inside.
pub fn clip_segment(segment: &LineSegment, area: &Aabb, padding: i32) -> Option<LineSegment> {
    let bounds = Bounds::padded(area, padding);
    let (x0, y0) = (segment.start.x as f64, segment.start.y as f64);
    let (dx, dy) = (segment.dx() as f64, segment.dy() as f64);

    let p = [-dx, dx, -dy, dy];
    let q = [
        x0 - bounds.x_min,
        bounds.x_max - x0,
        y0 - bounds.y_min,
        bounds.y_max - y0,
    ];

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (&p, &q) in p.iter().zip(q.iter()) {
        if p.abs() < PARALLEL_EPS {
            if q < 0. {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0. {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
            }
        }
    }

    let at = |t: f64| Point2D::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    Some(LineSegment::new(at(t0), at(t1)))
}
