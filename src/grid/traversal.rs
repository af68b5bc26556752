use std::iter::FusedIterator;

use smallvec::{smallvec, SmallVec};

use crate::{utils::div_floor, LineSegment};

/// A `(column, row)` pair on an unbounded lattice of square cells.
pub type Cell = (i32, i32);

/// Lazy exact traversal of the cells touched by a segment.
///
/// Cells are closed: `[c*s, (c+1)*s] x [r*s, (r+1)*s]`. Every closed
/// cell containing a point of the segment is yielded at least once.
/// This includes cells that only share an edge or a corner with the
/// segment. Some cells may be yielded more than once, and the order
/// carries no meaning.
///
/// The walk is an integer version of the Amanatides-Woo DDA: the
/// parameter of the next vertical (resp. horizontal) boundary crossing
/// is `dist_x / abs_dx` (resp. `dist_y / abs_dy`), and crossings are
/// compared by cross-multiplying, so corner hits are detected exactly.
#[derive(Debug, Clone)]
pub struct CellTraversal {
    cell_size: i64,
    end: (i64, i64),

    col: i32,
    row: i32,
    step_x: i32,
    step_y: i32,
    abs_dx: i64,
    abs_dy: i64,
    dist_x: i64,
    dist_y: i64,

    // Segment runs along a cell boundary line.
    on_col_line: bool,
    on_row_line: bool,

    pending: SmallVec<[Cell; 8]>,
    walking: bool,
}

impl CellTraversal {
    /// `cell_size` must be positive; [`UniformGrid::new`] rejects
    /// anything else, and [`UniformGrid::traverse_cells`] is the public
    /// way in.
    ///
    /// [`UniformGrid::new`]: crate::UniformGrid::new
    /// [`UniformGrid::traverse_cells`]: crate::UniformGrid::traverse_cells
    pub(crate) fn new(segment: &LineSegment, cell_size: i32) -> Self {
        debug_assert!(cell_size > 0, "cell size must be positive");
        let s = cell_size as i64;
        let (x0, y0) = (segment.start.x as i64, segment.start.y as i64);
        let (x1, y1) = (segment.end.x as i64, segment.end.y as i64);
        let (dx, dy) = (x1 - x0, y1 - y0);

        let col = div_floor(x0, s);
        let row = div_floor(y0, s);

        // Distance along each axis from the start to the first
        // boundary in the direction of travel. Moving backwards from
        // a boundary gives a zero distance, i.e. an immediate crossing.
        let first_dist = |d: i64, origin: i64, cell: i64| {
            if d > 0 {
                (cell + 1) * s - origin
            } else {
                origin - cell * s
            }
        };

        let mut traversal = CellTraversal {
            cell_size: s,
            end: (x1, y1),
            col: col as i32,
            row: row as i32,
            step_x: dx.signum() as i32,
            step_y: dy.signum() as i32,
            abs_dx: dx.abs(),
            abs_dy: dy.abs(),
            dist_x: first_dist(dx, x0, col),
            dist_y: first_dist(dy, y0, row),
            on_col_line: dx == 0 && x0.rem_euclid(s) == 0,
            on_row_line: dy == 0 && y0.rem_euclid(s) == 0,
            pending: SmallVec::new(),
            walking: true,
        };
        traversal.push_point_cells(x0, y0);
        traversal
    }

    /// Push the closed cells containing a lattice point: the floor
    /// cell, and its neighbours across any boundary the point lies on.
    fn push_point_cells(&mut self, x: i64, y: i64) {
        let s = self.cell_size;
        let col = div_floor(x, s) as i32;
        let row = div_floor(y, s) as i32;
        let cols: SmallVec<[i32; 2]> = if x.rem_euclid(s) == 0 {
            smallvec![col, col - 1]
        } else {
            smallvec![col]
        };
        let rows: SmallVec<[i32; 2]> = if y.rem_euclid(s) == 0 {
            smallvec![row, row - 1]
        } else {
            smallvec![row]
        };
        for &c in cols.iter() {
            for &r in rows.iter() {
                self.pending.push((c, r));
            }
        }
    }

    fn push_walked(&mut self, cell: Cell) {
        self.pending.push(cell);
        if self.on_row_line {
            self.pending.push((cell.0, cell.1 - 1));
        }
        if self.on_col_line {
            self.pending.push((cell.0 - 1, cell.1));
        }
    }

    /// Advance to the next cell along the segment; returns `false` once
    /// there are no more boundary crossings within the segment.
    fn step(&mut self) -> bool {
        let cross_x = self.abs_dx > 0 && self.dist_x <= self.abs_dx;
        let cross_y = self.abs_dy > 0 && self.dist_y <= self.abs_dy;
        let (move_x, move_y) = match (cross_x, cross_y) {
            (false, false) => return false,
            (true, false) => (true, false),
            (false, true) => (false, true),
            (true, true) => {
                let t_x = self.dist_x as i128 * self.abs_dy as i128;
                let t_y = self.dist_y as i128 * self.abs_dx as i128;
                (t_x <= t_y, t_y <= t_x)
            }
        };

        if move_x && move_y {
            // Exact corner crossing: the path touches both side cells.
            self.pending.push((self.col + self.step_x, self.row));
            self.pending.push((self.col, self.row + self.step_y));
        }
        if move_x {
            self.col += self.step_x;
            self.dist_x += self.cell_size;
        }
        if move_y {
            self.row += self.step_y;
            self.dist_y += self.cell_size;
        }
        self.push_walked((self.col, self.row));
        true
    }
}

impl Iterator for CellTraversal {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        loop {
            if let Some(cell) = self.pending.pop() {
                return Some(cell);
            }
            if !self.walking {
                return None;
            }
            if !self.step() {
                self.walking = false;
                let (x1, y1) = self.end;
                self.push_point_cells(x1, y1);
            }
        }
    }
}

impl FusedIterator for CellTraversal {}
