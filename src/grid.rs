//! Uniform grid index over line segments.
//!
//! The canvas is split into square cells of a fixed size. Each segment
//! is stored in every cell its path touches (see [`CellTraversal`]),
//! so a box query only has to look at the segments registered in the
//! cells the box overlaps.

use std::ops::RangeInclusive;

use itertools::Itertools;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::{
    utils::{div_ceil, div_floor},
    Aabb, CandidateIndex, Error, LineSegment, Result,
};

mod traversal;
pub use traversal::{Cell, CellTraversal};

/// Dense cell grid covering `[0, width) x [0, height)`.
///
/// Cells are addressed by `row * cols + col`. Only in-range cells are
/// ever stored: segments leaving the canvas are registered in the
/// cells they touch inside it.
#[derive(Debug, Clone)]
pub struct UniformGrid {
    cell_size: i32,
    cols: i32,
    rows: i32,
    cells: Vec<SmallVec<[usize; 4]>>,
    len: usize,
}

impl UniformGrid {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Config(format!(
                "grid extents must be positive (got {width}x{height})"
            )));
        }
        if cell_size == 0 || cell_size > i32::MAX as u32 {
            return Err(Error::Config(format!("invalid grid cell size {cell_size}")));
        }
        let s = cell_size as i64;
        let cols = div_ceil(width as i64, s) as i32;
        let rows = div_ceil(height as i64, s) as i32;
        debug!("grid: {cols}x{rows} cells of size {cell_size}");
        Ok(UniformGrid {
            cell_size: cell_size as i32,
            cols,
            rows,
            cells: vec![SmallVec::new(); cols as usize * rows as usize],
            len: 0,
        })
    }

    /// Build a grid and add `segments` with their positions as indices.
    pub fn from_segments<'a, I>(width: u32, height: u32, cell_size: u32, segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a LineSegment>,
    {
        let mut grid = UniformGrid::new(width, height, cell_size)?;
        for (index, segment) in segments.into_iter().enumerate() {
            grid.add(segment, index);
        }
        Ok(grid)
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Number of segments added since the last [`clear`](Self::clear).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Storage key of an in-range cell.
    #[inline]
    pub fn cell_key(&self, col: i32, row: i32) -> Option<usize> {
        if (0..self.cols).contains(&col) && (0..self.rows).contains(&row) {
            Some(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    /// Cells touched by `segment` on the unbounded lattice, walked
    /// with this grid's cell size.
    pub fn traverse_cells(&self, segment: &LineSegment) -> CellTraversal {
        CellTraversal::new(segment, self.cell_size)
    }

    /// Register `segment` under `index` in every in-range cell it
    /// touches. A degenerate segment goes into the single cell holding
    /// its point.
    ///
    /// Rasterized pixels of a clipped segment may sit one pixel away
    /// from its geometric path, so cells in the band just outside the
    /// canvas are registered on the adjacent border cell instead of
    /// being dropped.
    pub fn add(&mut self, segment: &LineSegment, index: usize) {
        self.len += 1;
        if segment.is_degenerate() {
            let p = segment.start;
            let s = self.cell_size as i64;
            let cell = (div_floor(p.x as i64, s) as i32, div_floor(p.y as i64, s) as i32);
            if let Some(key) = self.fold_key(cell) {
                self.cells[key].push(index);
            }
            return;
        }

        let mut stored = 0;
        for cell in self.traverse_cells(segment) {
            if let Some(key) = self.fold_key(cell) {
                let entries = &mut self.cells[key];
                if entries.last() != Some(&index) {
                    entries.push(index);
                    stored += 1;
                }
            }
        }
        trace!("grid: segment {index} ({segment:?}) stored in {stored} cells");
    }

    /// Remove every segment.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(SmallVec::clear);
        self.len = 0;
    }

    /// Sorted, deduplicated indices of segments registered in any cell
    /// overlapping `area`.
    pub fn candidates(&self, area: &Aabb) -> Vec<usize> {
        let cols = self.span(area.min_x(), area.max_x(), self.cols);
        let rows = self.span(area.min_y(), area.max_y(), self.rows);

        rows.flat_map(|row| cols.clone().map(move |col| (col, row)))
            .filter_map(|(col, row)| self.cell_key(col, row))
            .flat_map(|key| self.cells[key].iter().copied())
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// In-range cell indices overlapping `[lo, hi]` on one axis.
    fn span(&self, lo: i32, hi: i32, count: i32) -> RangeInclusive<i32> {
        let s = self.cell_size as i64;
        let lo = div_floor(lo as i64, s).max(0);
        let hi = div_floor(hi as i64, s).min(count as i64 - 1);
        lo as i32..=hi as i32
    }

    /// Key of the in-range cell a lattice cell is stored in: itself,
    /// its border neighbour when one step outside the grid, or `None`.
    fn fold_key(&self, (col, row): Cell) -> Option<usize> {
        let fold = |v: i32, n: i32| match v {
            -1 => Some(0),
            v if v == n => Some(n - 1),
            v if (0..n).contains(&v) => Some(v),
            _ => None,
        };
        let col = fold(col, self.cols)?;
        let row = fold(row, self.rows)?;
        self.cell_key(col, row)
    }
}

impl CandidateIndex for UniformGrid {
    fn candidates(&self, area: &Aabb) -> Vec<usize> {
        UniformGrid::candidates(self, area)
    }
}
