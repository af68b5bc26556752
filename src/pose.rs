use std::f64::consts::PI;

use crate::{CoordinateMode, Point2D};

/// Placement of a shape on the canvas.
///
/// The rotation is in degrees and is applied about the shape's
/// center before the translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub translate_x: i32,
    pub translate_y: i32,
    pub rotation_deg: f64,
}

impl Pose {
    pub fn new(translate_x: i32, translate_y: i32, rotation_deg: f64) -> Self {
        Pose {
            translate_x,
            translate_y,
            rotation_deg,
        }
    }

    pub fn translation(translate_x: i32, translate_y: i32) -> Self {
        Pose::new(translate_x, translate_y, 0.)
    }
}

/// A pose resolved against a rotation center, ready to map points.
///
/// The trig values are computed once so every point of a shape is
/// mapped with exactly the same coefficients.
#[derive(Debug, Clone, Copy)]
pub struct PointTransform {
    cos: f64,
    sin: f64,
    cx: f64,
    cy: f64,
    tx: f64,
    ty: f64,
}

impl PointTransform {
    pub fn new(center: Point2D, pose: &Pose, mode: CoordinateMode) -> Self {
        // On a y-down raster the standard matrix turns clockwise, so
        // flip the angle to keep positive angles counter-clockwise.
        let deg = match mode {
            CoordinateMode::MathYUp => pose.rotation_deg,
            CoordinateMode::ScreenYDown => -pose.rotation_deg,
        };
        let rad = deg * PI / 180.0;
        PointTransform {
            cos: rad.cos(),
            sin: rad.sin(),
            cx: center.x as f64,
            cy: center.y as f64,
            tx: pose.translate_x as f64,
            ty: pose.translate_y as f64,
        }
    }

    /// Map a local point to canvas space, rounding half away from
    /// zero.
    #[inline]
    pub fn apply(&self, p: Point2D) -> Point2D {
        let x = p.x as f64 - self.cx;
        let y = p.y as f64 - self.cy;

        let x_rot = x * self.cos - y * self.sin;
        let y_rot = x * self.sin + y * self.cos;

        Point2D {
            x: (x_rot + self.cx + self.tx).round() as i32,
            y: (y_rot + self.cy + self.ty).round() as i32,
        }
    }
}

/// Map a single point; see [`PointTransform::apply`].
pub fn transform_point(p: Point2D, center: Point2D, pose: &Pose, mode: CoordinateMode) -> Point2D {
    PointTransform::new(center, pose, mode).apply(p)
}

/// Map every point of a slice in order.
pub fn transform_points<'a>(
    points: &'a [Point2D],
    center: Point2D,
    pose: &Pose,
    mode: CoordinateMode,
) -> impl Iterator<Item = Point2D> + 'a {
    let transform = PointTransform::new(center, pose, mode);
    points.iter().map(move |&p| transform.apply(p))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const ORIGIN: Point2D = Point2D::new(0, 0);

    #[test]
    fn translation_offsets_points() {
        let pose = Pose::translation(10, 5);
        let p = transform_point(ORIGIN, ORIGIN, &pose, CoordinateMode::MathYUp);
        assert_eq!(p, Point2D::new(10, 5));
    }

    #[test]
    fn rotation_about_center() {
        let pose = Pose::new(0, 0, 90.);
        let p = transform_point(Point2D::new(10, 0), ORIGIN, &pose, CoordinateMode::MathYUp);
        assert_eq!(p, Point2D::new(0, 10));

        let center = Point2D::new(50, 50);
        let p = transform_point(Point2D::new(60, 50), center, &pose, CoordinateMode::MathYUp);
        assert_eq!(p, Point2D::new(50, 60));
    }

    #[test]
    fn transform_coefficients() {
        let pose = Pose::new(3, -4, 30.);
        let t = PointTransform::new(Point2D::new(10, 20), &pose, CoordinateMode::MathYUp);
        assert_relative_eq!(t.cos, 3f64.sqrt() / 2., epsilon = 1e-12);
        assert_relative_eq!(t.sin, 0.5, epsilon = 1e-12);
        assert_relative_eq!(t.cx + t.tx, 13.);
        assert_relative_eq!(t.cy + t.ty, 16.);

        let t = PointTransform::new(Point2D::new(10, 20), &pose, CoordinateMode::ScreenYDown);
        assert_relative_eq!(t.sin, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn screen_mode_flips_direction() {
        let pose = Pose::new(0, 0, 90.);
        let p = transform_point(Point2D::new(10, 0), ORIGIN, &pose, CoordinateMode::ScreenYDown);
        assert_eq!(p, Point2D::new(0, -10));
    }

    #[test]
    fn full_turn_is_identity() {
        let points: Vec<_> = (-20..=20)
            .flat_map(|x| (-7..=13).map(move |y| Point2D::new(x * 3, y * 5)))
            .collect();
        let center = Point2D::new(4, -2);
        for &mode in &[CoordinateMode::MathYUp, CoordinateMode::ScreenYDown] {
            let pose = Pose::new(17, -9, 360.);
            let moved: Vec<_> = transform_points(&points, center, &pose, mode).collect();
            let shifted: Vec<_> = points
                .iter()
                .map(|p| Point2D::new(p.x + 17, p.y - 9))
                .collect();
            assert_eq!(moved, shifted);
        }
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 45 degrees maps (1, 0) to (0.707.., 0.707..) and (-1, 0)
        // to (-0.707.., -0.707..).
        let pose = Pose::new(0, 0, 45.);
        let a = transform_point(Point2D::new(1, 0), ORIGIN, &pose, CoordinateMode::MathYUp);
        let b = transform_point(Point2D::new(-1, 0), ORIGIN, &pose, CoordinateMode::MathYUp);
        assert_eq!(a, Point2D::new(1, 1));
        assert_eq!(b, Point2D::new(-1, -1));

        let half = Pose::translation(0, 0);
        let t = PointTransform {
            tx: 0.5,
            ty: -0.5,
            ..PointTransform::new(ORIGIN, &half, CoordinateMode::MathYUp)
        };
        assert_eq!(t.apply(Point2D::new(2, -2)), Point2D::new(3, -3));
    }

    #[test]
    fn reproducible() {
        let pose = Pose::new(3, 4, 33.3);
        let center = Point2D::new(12, 8);
        let a: Vec<_> = transform_points(&[Point2D::new(100, -3)], center, &pose, CoordinateMode::MathYUp).collect();
        let b: Vec<_> = transform_points(&[Point2D::new(100, -3)], center, &pose, CoordinateMode::MathYUp).collect();
        assert_eq!(a, b);
    }
}
