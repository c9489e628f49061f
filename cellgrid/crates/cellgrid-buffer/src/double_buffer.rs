//! Front/back grid pair.
//!
//! The **front** grid holds the desired state of the screen and is rebuilt
//! every frame. The **back** grid holds what was last written to the
//! terminal. Only cells of successfully written runs are copied from front
//! to back, so a failed write is retried on the next frame.

use cellgrid_core::{Point, Result};
use tracing::debug;

use crate::diff::{self, Run};
use crate::{Cell, Grid, Parallelism};

/// Double-buffered cell grids.
///
/// # Examples
///
/// ```
/// use cellgrid_buffer::{diff, Cell, DoubleBuffer, Parallelism, RunPolicy};
/// use cellgrid_core::{Color, Point};
///
/// let mut db = DoubleBuffer::new(3, 1, Cell::EMPTY, Parallelism::SEQUENTIAL).unwrap();
/// db.front_mut().set(Point::new(0, 0), Cell::new('A', Color::White, Color::Black));
///
/// let changed = db.diff();
/// let runs = diff::coalesce(db.front(), changed, RunPolicy::RowBounded);
/// db.commit_run(&runs[0]);
/// assert!(db.diff().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct DoubleBuffer {
    /// Desired state.
    front: Grid,
    /// Last state written to the terminal.
    back: Grid,
    parallelism: Parallelism,
    /// Whether the next diff must report every cell.
    force_full_redraw: bool,
}

impl DoubleBuffer {
    /// Allocates both grids filled with `fill`.
    pub fn new(width: i32, height: i32, fill: Cell, parallelism: Parallelism) -> Result<Self> {
        Ok(Self {
            front: Grid::with_parallelism(width, height, fill, parallelism)?,
            back: Grid::with_parallelism(width, height, fill, parallelism)?,
            parallelism,
            force_full_redraw: false,
        })
    }

    /// Returns the grid size.
    #[inline]
    pub fn size(&self) -> Point {
        self.front.size()
    }

    /// Returns the desired-state grid.
    #[inline]
    pub fn front(&self) -> &Grid {
        &self.front
    }

    /// Returns the desired-state grid for rendering.
    #[inline]
    pub fn front_mut(&mut self) -> &mut Grid {
        &mut self.front
    }

    /// Returns the last-written grid.
    #[inline]
    pub fn back(&self) -> &Grid {
        &self.back
    }

    /// Replaces both grids with new ones of the given size filled with `fill`.
    ///
    /// On allocation failure the existing grids are left untouched.
    pub fn reallocate(&mut self, width: i32, height: i32, fill: Cell) -> Result<()> {
        let front = Grid::with_parallelism(width, height, fill, self.parallelism)?;
        let back = Grid::with_parallelism(width, height, fill, self.parallelism)?;
        debug!(
            from_width = self.front.width(),
            from_height = self.front.height(),
            width,
            height,
            "reallocated grids"
        );
        self.front = front;
        self.back = back;
        self.force_full_redraw = false;
        Ok(())
    }

    /// Resets the front grid to `cell` everywhere.
    pub fn clear_front(&mut self, cell: Cell) {
        self.front.fill_all(cell);
    }

    /// Returns every position where front differs from back, unordered.
    ///
    /// After [`force_redraw`](Self::force_redraw) every position is reported.
    pub fn diff(&self) -> Vec<Point> {
        if self.force_full_redraw {
            diff::all_positions(&self.front)
        } else {
            diff::changed_positions(&self.front, &self.back, &self.parallelism)
        }
    }

    /// Copies the cells covered by `run` from front to back.
    pub fn commit_run(&mut self, run: &Run) {
        for position in run.positions(self.front.width()) {
            if let Some(cell) = self.front.get(position).copied() {
                self.back.set(position, cell);
            }
        }
    }

    /// Forces the next [`diff`](Self::diff) to report every cell.
    pub fn force_redraw(&mut self) {
        self.force_full_redraw = true;
    }

    /// Clears the full-redraw request.
    pub fn clear_force_redraw(&mut self) {
        self.force_full_redraw = false;
    }

    /// Returns true if the next diff will report every cell.
    #[inline]
    pub fn needs_full_redraw(&self) -> bool {
        self.force_full_redraw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{coalesce, RunPolicy};
    use cellgrid_core::Color;
    use pretty_assertions::assert_eq;

    fn buffers(width: i32, height: i32) -> DoubleBuffer {
        DoubleBuffer::new(width, height, Cell::EMPTY, Parallelism::SEQUENTIAL).unwrap()
    }

    #[test]
    fn test_new_buffers_match() {
        let db = buffers(8, 4);
        assert_eq!(db.size(), Point::new(8, 4));
        assert!(db.diff().is_empty());
    }

    #[test]
    fn test_commit_run_syncs_only_run_cells() {
        let mut db = buffers(5, 2);
        let cell = Cell::new('k', Color::Green, Color::Black);
        db.front_mut().set(Point::new(0, 0), cell);
        db.front_mut().set(Point::new(1, 0), cell);
        db.front_mut().set(Point::new(4, 1), cell);

        let runs = coalesce(db.front(), db.diff(), RunPolicy::RowBounded);
        assert_eq!(runs.len(), 2);
        db.commit_run(&runs[0]);

        assert_eq!(db.back().get(Point::new(1, 0)), Some(&cell));
        assert_eq!(db.diff(), vec![Point::new(4, 1)]);
    }

    #[test]
    fn test_reallocate_resets_both() {
        let mut db = buffers(2, 2);
        db.front_mut().set(Point::new(0, 0), Cell::EMPTY.with_char('x'));
        let fill = Cell::new(' ', Color::White, Color::DarkBlue);
        db.reallocate(4, 3, fill).unwrap();
        assert_eq!(db.size(), Point::new(4, 3));
        assert!(db.front().cells().iter().all(|c| *c == fill));
        assert!(db.back().cells().iter().all(|c| *c == fill));
    }

    #[test]
    fn test_reallocate_failure_keeps_grids() {
        let mut db = buffers(2, 2);
        assert!(db.reallocate(-1, 2, Cell::EMPTY).is_err());
        assert_eq!(db.size(), Point::new(2, 2));
    }

    #[test]
    fn test_force_redraw() {
        let mut db = buffers(3, 2);
        db.force_redraw();
        assert!(db.needs_full_redraw());
        assert_eq!(db.diff().len(), 6);
        db.clear_force_redraw();
        assert!(db.diff().is_empty());
    }

    #[test]
    fn test_clear_front() {
        let mut db = buffers(3, 1);
        db.front_mut().set(Point::new(2, 0), Cell::EMPTY.with_char('q'));
        db.clear_front(Cell::EMPTY);
        assert!(db.diff().is_empty());
    }
}
