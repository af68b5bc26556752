//! Pixel-exact overlap queries between point-cloud shapes and large
//! collections of line segments.
//!
//! 1. [Geometry](#geometry)
//! 1. [Broad Phase](#broad-phase)
//! 1. [Queries](#queries)
//!
//! # Geometry
//!
//! Everything lives on an integer canvas. A [`Shape`] is a list of
//! local points placed by a [`Pose`]: a rotation about the shape's
//! center followed by a translation. Segments are rasterized with
//! Bresenham's algorithm ([`rasterize`]) and cut down to a box with
//! Liang-Barsky ([`clip_segment`]) or just tested against it with
//! Cohen-Sutherland outcodes ([`segment_intersects_box`]).
//!
//! # Broad Phase
//!
//! A [`UniformGrid`] registers each segment in every cell its path
//! touches, using an exact integer grid walk ([`CellTraversal`]). Box
//! queries then only visit the segments stored in the overlapped cells.
//! [`RTreeIndex`] offers the same [`CandidateIndex`] contract on top of
//! an R-tree.
//!
//! # Queries
//!
//! [`IntersectionEngine::intersect`] counts the pixels a target shape
//! shares with another shape and with the lines, and reports where.
//! Shape footprints are memoized per shape and pose in a
//! [`FootprintCache`], so moving one shape only rebuilds its own
//! footprint.
//!
//! ```rust
//! use car_crossings::{EngineConfig, IntersectionEngine, LineSegment, Shape, UniformGrid};
//!
//! let config = EngineConfig::square(1000);
//! let mut car = Shape::block(1, 100, 100);
//! car.place_center_at(500, 500, 30.);
//! let mut other = Shape::block(2, 100, 100);
//! other.place_center_at(100, 100, 0.);
//!
//! let lines = vec![LineSegment::from([(400, 500), (600, 500)])];
//! let grid = UniformGrid::from_segments(1000, 1000, 50, lines.iter()).unwrap();
//!
//! let engine = IntersectionEngine::new();
//! let result = engine
//!     .intersect(&car, &other, &lines, &config, Some(&grid))
//!     .unwrap();
//! assert!(result.total_hits_lines > 0);
//! assert_eq!(result.total_hits_shapes, 0);
//! ```
mod error;
pub use error::{Error, Result};

mod config;
pub use config::{CoordinateMode, EngineConfig};

mod geom;
pub use geom::{LineSegment, Point2D};

mod aabb;
pub use aabb::Aabb;

mod pose;
pub use pose::{transform_point, transform_points, PointTransform, Pose};

mod shape;
pub use shape::{Shape, ShapeId};

pub mod raster;
pub use raster::{rasterize, LinePixels};

pub mod clip;
pub use clip::{clip_segment, segment_intersects_box};

mod index;
pub use index::{CandidateIndex, RTreeIndex};

pub mod grid;
pub use grid::{CellTraversal, UniformGrid};

pub mod footprint;
pub use footprint::{pose_hash, Canvas, Footprint, FootprintCache, PixelKey};

mod intersect;
pub use intersect::{IntersectionEngine, IntersectionResult, PhaseTimings};

pub mod loader;
pub use loader::{load_points_file, parse_points, parse_points_str};

pub mod scene;
pub use scene::Scene;

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;

pub mod utils;
