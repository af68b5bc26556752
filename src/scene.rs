//! A two-shape scene with a growing set of lines.

use std::{collections::HashMap, path::Path};

use log::debug;
use rand::Rng;

use crate::{
    loader::load_points_file, Aabb, EngineConfig, Error, IntersectionEngine, IntersectionResult,
    LineSegment, Point2D, Pose, Result, Shape, ShapeId, UniformGrid,
};

pub const PRIMARY: ShapeId = 1;
pub const SECONDARY: ShapeId = 2;

/// Horizontal offset of the secondary shape when a scene is loaded.
pub const SECONDARY_OFFSET_X: i32 = 410;

/// Padding of the target box reported by [`Scene::debug_box`].
const DEBUG_BOX_PADDING: i32 = 2;

/// Two copies of one shape, the lines drawn so far, a grid over those
/// lines, and the last query result per shape.
#[derive(Debug)]
pub struct Scene {
    config: EngineConfig,
    engine: IntersectionEngine,
    shapes: Vec<Shape>,
    lines: Vec<LineSegment>,
    grid: UniformGrid,
    results: HashMap<ShapeId, IntersectionResult>,
}

impl Scene {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let grid = UniformGrid::new(config.canvas_width, config.canvas_height, config.cell_size)?;
        Ok(Scene {
            config,
            engine: IntersectionEngine::new(),
            shapes: Vec::new(),
            lines: Vec::new(),
            grid,
            results: HashMap::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn engine(&self) -> &IntersectionEngine {
        &self.engine
    }

    /// Replace both shapes with fresh copies of `points`.
    ///
    /// The primary shape starts at the identity pose, the secondary one
    /// [`SECONDARY_OFFSET_X`] pixels to the right. Previous results and
    /// cached footprints are dropped.
    pub fn load_shapes(&mut self, points: Vec<Point2D>) {
        let primary = Shape::new(PRIMARY, points);
        let mut secondary = primary.with_id(SECONDARY);
        secondary.set_pose(Pose::translation(SECONDARY_OFFSET_X, 0));
        debug!("scene: loaded shapes with {} points", primary.points().len());

        self.shapes = vec![primary, secondary];
        self.results.clear();
        self.engine.invalidate_cache();
    }

    /// Parse a point list file and load it; see [`load_shapes`](Self::load_shapes).
    pub fn load_shapes_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let points = load_points_file(path, self.config.max_points)?;
        self.load_shapes(points);
        Ok(())
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Result<&Shape> {
        self.shapes
            .iter()
            .find(|s| s.id() == id)
            .ok_or(Error::UnknownShape(id))
    }

    pub fn set_pose(&mut self, id: ShapeId, pose: Pose) -> Result<()> {
        let shape = self
            .shapes
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(Error::UnknownShape(id))?;
        shape.set_pose(pose);
        Ok(())
    }

    #[inline]
    pub fn lines(&self) -> &[LineSegment] {
        &self.lines
    }

    #[inline]
    pub fn grid(&self) -> &UniformGrid {
        &self.grid
    }

    pub fn add_line(&mut self, segment: LineSegment) {
        self.grid.add(&segment, self.lines.len());
        self.lines.push(segment);
    }

    pub fn add_lines<I: IntoIterator<Item = LineSegment>>(&mut self, segments: I) {
        for segment in segments {
            self.add_line(segment);
        }
    }

    /// Add up to `count` lines with end points uniform on the canvas,
    /// capped at `max_random_lines`. Returns how many were added.
    pub fn generate_random_lines<R: Rng>(&mut self, rng: &mut R, count: usize) -> usize {
        let count = count.min(self.config.max_random_lines);
        let (w, h) = (self.config.canvas_width as i32, self.config.canvas_height as i32);
        self.lines.reserve(count);
        for _ in 0..count {
            let start = Point2D::new(rng.gen_range(0..w), rng.gen_range(0..h));
            let end = Point2D::new(rng.gen_range(0..w), rng.gen_range(0..h));
            self.add_line(LineSegment::new(start, end));
        }
        debug!("scene: added {count} random lines ({} total)", self.lines.len());
        count
    }

    /// Remove every line along with the results computed against them.
    pub fn clear_lines(&mut self) {
        self.lines.clear();
        self.grid.clear();
        self.results.clear();
    }

    /// Query shape `id` against the other shape and every line, and
    /// keep the result.
    pub fn find_intersections(&mut self, id: ShapeId) -> Result<&IntersectionResult> {
        let target = self.shape(id)?;
        let other = self
            .shapes
            .iter()
            .find(|s| s.id() != id)
            .ok_or(Error::UnknownShape(id))?;
        let result =
            self.engine
                .intersect(target, other, &self.lines, &self.config, Some(&self.grid))?;

        let slot = self.results.entry(id).or_default();
        *slot = result;
        Ok(slot)
    }

    /// The last result for shape `id`, if any.
    pub fn result(&self, id: ShapeId) -> Option<&IntersectionResult> {
        self.results.get(&id)
    }

    /// Canvas points of shape `id` under its current pose.
    pub fn world_points(&self, id: ShapeId) -> Result<Vec<Point2D>> {
        Ok(self
            .shape(id)?
            .world_points(self.config.coordinate_mode)
            .collect())
    }

    /// The last queried target box of shape `id`, padded and clamped
    /// to the canvas.
    pub fn debug_box(&self, id: ShapeId) -> Option<Aabb> {
        self.results.get(&id).and_then(|r| {
            r.target_box.inflate_clamped(
                DEBUG_BOX_PADDING,
                self.config.canvas_width,
                self.config.canvas_height,
            )
        })
    }
}
