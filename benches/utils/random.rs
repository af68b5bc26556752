#![allow(dead_code)]

use std::f64::consts::PI;

use geo::{Coordinate, Line, Rect};

use rand::Rng;
use rand_distr::{Distribution, Normal, Standard};

/// The pixels of a `width x height` canvas, as an inclusive rect.
#[inline]
pub fn canvas_rect(width: u32, height: u32) -> Rect<i32> {
    Rect::new(
        Coordinate { x: 0, y: 0 },
        Coordinate {
            x: width as i32 - 1,
            y: height as i32 - 1,
        },
    )
}

#[inline]
pub fn uniform_coord<R: Rng>(rng: &mut R, bounds: Rect<i32>) -> Coordinate<i32> {
    Coordinate {
        x: rng.gen_range(bounds.min().x..=bounds.max().x),
        y: rng.gen_range(bounds.min().y..=bounds.max().y),
    }
}

#[inline]
pub fn uniform_line<R: Rng>(rng: &mut R, bounds: Rect<i32>) -> Line<i32> {
    Line::new(uniform_coord(rng, bounds), uniform_coord(rng, bounds))
}

/// A line of roughly `length` pixels starting inside `bounds`, in a
/// uniformly random direction. The end may leave `bounds`.
#[inline]
pub fn uniform_line_with_length<R: Rng>(rng: &mut R, bounds: Rect<i32>, length: f64) -> Line<i32> {
    let start = uniform_coord(rng, bounds);
    let angle = rng.sample::<f64, _>(Standard) * 2. * PI;
    let end = Coordinate {
        x: start.x + (length * angle.cos()).round() as i32,
        y: start.y + (length * angle.sin()).round() as i32,
    };
    Line::new(start, end)
}

/// Rotation in degrees, uniform in `[0, 360)`.
#[inline]
pub fn uniform_angle<R: Rng>(rng: &mut R) -> f64 {
    rng.sample::<f64, _>(Standard) * 360.
}

/// An irregular blob of points around the origin: every lattice point
/// within a radius that wobbles with the direction.
pub fn blob_points<R: Rng>(rng: &mut R, radius: i32) -> Vec<Coordinate<i32>> {
    let r = radius as f64;
    let wobble = Normal::new(0., r / 8.).expect("valid deviation");
    let lobes: Vec<f64> = (0..8).map(|_| (r + wobble.sample(rng)).max(r / 4.)).collect();
    let reach = |x: i32, y: i32| {
        let t = (y as f64).atan2(x as f64).rem_euclid(2. * PI) / (2. * PI) * 8.;
        let i = t.floor() as usize % 8;
        let f = t.fract();
        lobes[i] * (1. - f) + lobes[(i + 1) % 8] * f
    };

    let bound = (2 * radius).max(1);
    (-bound..=bound)
        .flat_map(|x| (-bound..=bound).map(move |y| Coordinate { x, y }))
        .filter(|c| (((c.x * c.x + c.y * c.y) as f64).sqrt()) <= reach(c.x, c.y))
        .collect()
}
