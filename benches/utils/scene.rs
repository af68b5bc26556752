#![allow(dead_code)]

use car_crossings::{EngineConfig, LineSegment, Point2D, Shape, ShapeId};
use rand::Rng;

use crate::random::*;

/// `count` lines, half of them uniform across the canvas and half of
/// them short strokes of `stroke` pixels.
pub fn random_lines<R: Rng>(rng: &mut R, config: &EngineConfig, count: usize, stroke: f64) -> Vec<LineSegment> {
    let bounds = canvas_rect(config.canvas_width, config.canvas_height);
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                uniform_line(rng, bounds).into()
            } else {
                uniform_line_with_length(rng, bounds, stroke).into()
            }
        })
        .collect()
}

/// A blob shape of the given radius, centered somewhere on the canvas
/// at a random angle.
pub fn random_shape<R: Rng>(rng: &mut R, config: &EngineConfig, id: ShapeId, radius: i32) -> Shape {
    let mut shape = Shape::new(id, blob_points(rng, radius).into_iter().map(Point2D::from));
    let x = rng.gen_range(0..config.canvas_width as i32);
    let y = rng.gen_range(0..config.canvas_height as i32);
    shape.place_center_at(x, y, uniform_angle(rng));
    shape
}
