//! Engine configuration.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How the vertical axis of the canvas is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateMode {
    /// Origin top-left, y grows downwards.
    ScreenYDown,
    /// Origin bottom-left, y grows upwards.
    MathYUp,
}

impl Default for CoordinateMode {
    fn default() -> Self {
        CoordinateMode::MathYUp
    }
}

/// Canvas and query configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Canvas width in pixels
    pub canvas_width: u32,

    /// Canvas height in pixels
    pub canvas_height: u32,

    /// Multiplier used to pack `(x, y)` into `y * stride + x`; must be
    /// at least `canvas_width`.
    pub stride: u32,

    /// Maximum number of intersection points kept per query
    pub max_markers: usize,

    /// Stop a query as soon as `max_markers` hits were found
    pub fast_mode: bool,

    pub coordinate_mode: CoordinateMode,

    /// Cell size of the grid index owned by a [`Scene`](crate::Scene)
    pub cell_size: u32,

    /// Upper bound for one batch of random lines
    pub max_random_lines: usize,

    /// Upper bound on distinct points accepted by the points parser
    pub max_points: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: 2000,
            canvas_height: 400,
            stride: 2000,
            max_markers: 5000,
            fast_mode: false,
            coordinate_mode: CoordinateMode::MathYUp,
            cell_size: 100,
            max_random_lines: 50_000,
            max_points: 200_000,
        }
    }
}

impl EngineConfig {
    /// A square canvas with `stride == side`, keeping other defaults.
    pub fn square(side: u32) -> Self {
        Self {
            canvas_width: side,
            canvas_height: side,
            stride: side,
            ..Default::default()
        }
    }

    /// Check the configuration before any computation uses it.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| {
            warn!("rejecting configuration: {msg}");
            Err(Error::Config(msg))
        };
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return fail(format!(
                "canvas must be non-empty (got {}x{})",
                self.canvas_width, self.canvas_height
            ));
        }
        if self.stride < self.canvas_width {
            return fail(format!(
                "stride ({}) must be >= canvas width ({}) to keep pixel keys unique",
                self.stride, self.canvas_width
            ));
        }
        if self.cell_size == 0 {
            return fail("cell size must be positive".to_string());
        }
        if self.max_points == 0 {
            return fail("point cap must be positive".to_string());
        }
        Ok(())
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
