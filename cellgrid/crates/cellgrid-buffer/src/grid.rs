//! Cell grid storage.
//!
//! The [`Grid`] struct is a row-major 2D array of cells sized to the
//! terminal. Out-of-range reads return `None` and out-of-range writes are
//! ignored; clipping happens in the drawing primitives before any write.

use cellgrid_core::{Error, Point, Rect, Result};

use crate::parallel::{self, Parallelism};
use crate::Cell;

/// A 2D grid of cells.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left corner
/// - X increases to the right (columns)
/// - Y increases downward (rows)
///
/// # Examples
///
/// ```
/// use cellgrid_buffer::{Cell, Grid};
/// use cellgrid_core::{Color, Point};
///
/// let mut grid = Grid::try_new(4, 2, Cell::EMPTY).unwrap();
/// assert!(grid.set(Point::new(1, 0), Cell::new('x', Color::Red, Color::Black)));
/// assert!(!grid.set(Point::new(4, 0), Cell::EMPTY));
/// assert_eq!(grid.to_lines(), vec![" x  ".to_string(), "    ".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    /// Cell storage in row-major order.
    cells: Vec<Cell>,

    /// Width in columns.
    width: i32,

    /// Height in rows.
    height: i32,

    parallelism: Parallelism,
}

impl Grid {
    /// Allocates a grid filled with `fill`.
    ///
    /// Fails with [`Error::InvalidDimensions`] for negative sizes and with
    /// [`Error::Allocation`] when the cell storage cannot be reserved.
    pub fn try_new(width: i32, height: i32, fill: Cell) -> Result<Self> {
        Self::with_parallelism(width, height, fill, Parallelism::SEQUENTIAL)
    }

    /// Allocates a grid that uses `parallelism` for fills and drawing.
    pub fn with_parallelism(
        width: i32,
        height: i32,
        fill: Cell,
        parallelism: Parallelism,
    ) -> Result<Self> {
        if width < 0 || height < 0 {
            return Err(Error::InvalidDimensions(format!("{width}x{height}")));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::Allocation { cells: usize::MAX })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| Error::Allocation { cells: len })?;
        cells.resize(len, fill);
        Ok(Self {
            cells,
            width,
            height,
            parallelism,
        })
    }

    /// Returns the width in columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns the height in rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the grid size as a point.
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Returns the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the rectangle covering the whole grid.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::sized(self.width, self.height)
    }

    /// Returns the row-parallel policy.
    #[inline]
    pub fn parallelism(&self) -> &Parallelism {
        &self.parallelism
    }

    /// Replaces the row-parallel policy.
    pub fn set_parallelism(&mut self, parallelism: Parallelism) {
        self.parallelism = parallelism;
    }

    /// Converts a position to a storage index.
    #[inline]
    pub fn index_of(&self, position: Point) -> Option<usize> {
        if position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
        {
            Some(position.y as usize * self.width as usize + position.x as usize)
        } else {
            None
        }
    }

    /// Returns the cell at a position.
    #[inline]
    pub fn get(&self, position: Point) -> Option<&Cell> {
        self.index_of(position).map(|i| &self.cells[i])
    }

    /// Returns a mutable reference to the cell at a position.
    #[inline]
    pub fn get_mut(&mut self, position: Point) -> Option<&mut Cell> {
        self.index_of(position).map(|i| &mut self.cells[i])
    }

    /// Writes a cell. Returns `false` if the position is outside the grid.
    #[inline]
    pub fn set(&mut self, position: Point, cell: Cell) -> bool {
        match self.get_mut(position) {
            Some(slot) => {
                *slot = cell.sanitized();
                true
            }
            None => false,
        }
    }

    /// Returns all cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns a row.
    pub fn row(&self, y: i32) -> Option<&[Cell]> {
        if y < 0 || y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Overwrites every cell with `cell`.
    pub fn fill_all(&mut self, cell: Cell) {
        let region = self.bounds();
        self.for_each_row_in(region, |_, row| row.fill(cell));
    }

    /// Runs `f(y, row)` for every row that `region` touches, passing the
    /// full-width row slice. `region` is clipped to the grid first.
    ///
    /// Rows may be visited concurrently; `f` must only write into the slice
    /// it receives.
    pub fn for_each_row_in<F>(&mut self, region: Rect, f: F)
    where
        F: Fn(i32, &mut [Cell]) + Sync,
    {
        let clip = self.bounds().intersect(region);
        if clip.is_empty() {
            return;
        }
        let width = self.width as usize;
        let top = clip.top_left().y as usize;
        let bottom = clip.bottom_right().y as usize;
        let work = clip.area() as usize;
        let parallelism = self.parallelism;
        parallel::for_each_row(
            &mut self.cells[top * width..bottom * width],
            width,
            top,
            work,
            &parallelism,
            |y, row| f(y as i32, row),
        );
    }

    /// Renders the characters of each row as a string.
    pub fn to_lines(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height as usize];
        }
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|c| c.character).collect())
            .collect()
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Grid {}
