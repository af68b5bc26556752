use std::sync::Arc;

use crate::{
    aabb::BoundsTracker, pose::transform_points, CoordinateMode, Point2D, Pose,
};

/// Identifier of a shape, unique within a session.
pub type ShapeId = u32;

/// A shape made of discrete points, placed on the canvas by a [`Pose`].
///
/// The local points are shared and never change; only the pose is
/// mutated as the shape is moved around.
#[derive(Debug, Clone)]
pub struct Shape {
    id: ShapeId,
    points: Arc<[Point2D]>,
    center: Point2D,
    pose: Pose,
}

impl Shape {
    /// Create a shape at the identity pose.
    ///
    /// The rotation center is the midpoint of the local bounding box,
    /// rounded toward zero, or the origin if there are no points.
    pub fn new<I: IntoIterator<Item = Point2D>>(id: ShapeId, points: I) -> Self {
        let points: Arc<[Point2D]> = points.into_iter().collect();
        let mut bounds = BoundsTracker::default();
        points.iter().for_each(|&p| bounds.push(p));
        let center = bounds
            .finish()
            .map(|b| {
                Point2D::new(
                    ((b.min_x() as i64 + b.max_x() as i64) / 2) as i32,
                    ((b.min_y() as i64 + b.max_y() as i64) / 2) as i32,
                )
            })
            .unwrap_or_default();
        Shape {
            id,
            points,
            center,
            pose: Pose::default(),
        }
    }

    /// A filled `width x height` block of points with its lower-left
    /// corner at the local origin (both bounds inclusive).
    pub fn block(id: ShapeId, width: i32, height: i32) -> Self {
        Shape::new(
            id,
            (0..=width).flat_map(|x| (0..=height).map(move |y| Point2D::new(x, y))),
        )
    }

    /// Same local points under a new id, at the identity pose.
    pub fn with_id(&self, id: ShapeId) -> Self {
        Shape {
            id,
            points: self.points.clone(),
            center: self.center,
            pose: Pose::default(),
        }
    }

    #[inline]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[inline]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    #[inline]
    pub fn center(&self) -> Point2D {
        self.center
    }

    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    #[inline]
    pub fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Translate so that the center lands on `(x, y)`, with the given
    /// rotation.
    pub fn place_center_at(&mut self, x: i32, y: i32, rotation_deg: f64) {
        self.pose = Pose::new(x - self.center.x, y - self.center.y, rotation_deg);
    }

    /// Canvas-space points under the current pose.
    pub fn world_points(&self, mode: CoordinateMode) -> impl Iterator<Item = Point2D> + '_ {
        transform_points(&self.points, self.center, &self.pose, mode)
    }
}
