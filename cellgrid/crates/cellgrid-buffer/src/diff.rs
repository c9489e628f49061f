//! Grid diffing and run coalescing.
//!
//! A frame update happens in two steps. [`changed_positions`] scans two
//! equally sized grids (row-parallel for large grids) and reports every
//! position whose cell differs, in no particular order. [`coalesce`] then
//! sorts those positions row-major and merges neighbors that share a color
//! pair into [`Run`]s, each of which becomes a single terminal write.

use cellgrid_core::{Color, Point};
use serde::{Deserialize, Serialize};

use crate::parallel::{self, Parallelism};
use crate::{Cell, Grid};

/// Rule for extending a run past the end of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPolicy {
    /// Runs never cross a row boundary.
    #[default]
    RowBounded,
    /// A run may continue from the last column of a row into column zero of
    /// the next row. Only valid for terminals that auto-wrap.
    Wrapping,
}

impl RunPolicy {
    /// Returns whether `next` directly follows `prev` in scan order.
    #[inline]
    pub fn is_successor(self, prev: Point, next: Point, width: i32) -> bool {
        if next.y == prev.y && next.x == prev.x + 1 {
            return true;
        }
        matches!(self, Self::Wrapping) && prev.x == width - 1 && next.x == 0 && next.y == prev.y + 1
    }
}

/// A contiguous, same-colored sequence of changed cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Position of the first cell.
    pub start: Point,
    /// Foreground color of every cell.
    pub fg: Color,
    /// Background color of every cell.
    pub bg: Color,
    /// Characters in scan order.
    pub text: String,
    /// Number of cells (characters) in the run.
    pub len: usize,
}

impl Run {
    fn open(start: Point, cell: Cell) -> Self {
        let mut text = String::new();
        text.push(cell.sanitized().character);
        Self {
            start,
            fg: cell.fg,
            bg: cell.bg,
            text,
            len: 1,
        }
    }

    #[inline]
    fn accepts(&self, cell: &Cell) -> bool {
        self.fg == cell.fg && self.bg == cell.bg
    }

    /// Returns the positions covered by the run in a grid of `width` columns.
    pub fn positions(&self, width: i32) -> impl Iterator<Item = Point> + '_ {
        let width = i64::from(width.max(1));
        let origin = i64::from(self.start.y) * width + i64::from(self.start.x);
        (0..self.len as i64).map(move |i| {
            let index = origin + i;
            Point::new((index % width) as i32, (index / width) as i32)
        })
    }

    /// Returns the position right after the last cell, on the same row.
    #[inline]
    pub fn end(&self) -> Point {
        self.start.offset(i32::try_from(self.len).unwrap_or(i32::MAX), 0)
    }
}

/// Returns every position where `front` and `back` differ, unordered.
///
/// Grids of different size are treated as entirely different and every
/// position of `front` is reported.
pub fn changed_positions(front: &Grid, back: &Grid, parallelism: &Parallelism) -> Vec<Point> {
    let width = front.width();
    if front.size() != back.size() {
        return all_positions(front);
    }
    parallel::collect_rows(
        front.cells(),
        back.cells(),
        width as usize,
        parallelism,
        |y, f, b, out| {
            for (x, (fc, bc)) in f.iter().zip(b).enumerate() {
                if fc != bc {
                    out.push(Point::new(x as i32, y as i32));
                }
            }
        },
    )
}

/// Returns every position of `grid` in row-major order.
pub fn all_positions(grid: &Grid) -> Vec<Point> {
    let (width, height) = (grid.width(), grid.height());
    (0..height)
        .flat_map(|y| (0..width).map(move |x| Point::new(x, y)))
        .collect()
}

/// Sorts `positions` row-major and merges them into maximal runs of
/// successive same-colored cells taken from `front`.
///
/// Positions outside `front` are ignored. Control characters written
/// through [`Grid::get_mut`] are emitted as spaces, so run text never
/// contains a newline.
pub fn coalesce(front: &Grid, mut positions: Vec<Point>, policy: RunPolicy) -> Vec<Run> {
    positions.sort_unstable_by_key(|p| (p.y, p.x));
    positions.dedup();

    let width = front.width();
    let mut runs: Vec<Run> = Vec::new();
    let mut prev: Option<Point> = None;
    for position in positions {
        let Some(cell) = front.get(position) else {
            continue;
        };
        let extend = match (runs.last(), prev) {
            (Some(run), Some(prev)) => {
                policy.is_successor(prev, position, width) && run.accepts(cell)
            }
            _ => false,
        };
        match runs.last_mut() {
            Some(run) if extend => {
                run.text.push(cell.sanitized().character);
                run.len += 1;
            }
            _ => runs.push(Run::open(position, *cell)),
        }
        prev = Some(position);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(width: i32, height: i32) -> Grid {
        Grid::try_new(width, height, Cell::EMPTY).unwrap()
    }

    fn white(ch: char) -> Cell {
        Cell::new(ch, Color::White, Color::Black)
    }

    fn red(ch: char) -> Cell {
        Cell::new(ch, Color::Red, Color::Black)
    }

    mod changed_positions_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_identical_grids_no_changes() {
            let a = grid(20, 10);
            let b = grid(20, 10);
            assert!(changed_positions(&a, &b, &Parallelism::SEQUENTIAL).is_empty());
        }

        #[test]
        fn test_single_cell_change() {
            let mut front = grid(5, 5);
            let back = grid(5, 5);
            front.set(Point::new(3, 2), white('x'));
            assert_eq!(
                changed_positions(&front, &back, &Parallelism::SEQUENTIAL),
                vec![Point::new(3, 2)]
            );
        }

        #[test]
        fn test_color_only_change_detected() {
            let mut front = grid(2, 1);
            let back = grid(2, 1);
            front.set(Point::new(1, 0), Cell::EMPTY.with_bg(Color::Blue));
            assert_eq!(
                changed_positions(&front, &back, &Parallelism::SEQUENTIAL),
                vec![Point::new(1, 0)]
            );
        }

        #[test]
        fn test_parallel_scan_finds_same_set() {
            let mut front = grid(31, 17);
            let back = grid(31, 17);
            for i in 0..40 {
                front.set(Point::new((i * 7) % 31, (i * 3) % 17), red('#'));
            }
            let forced = Parallelism {
                threshold: 0,
                workers: 4,
            };
            let mut seq = changed_positions(&front, &back, &Parallelism::SEQUENTIAL);
            let mut par = changed_positions(&front, &back, &forced);
            seq.sort();
            par.sort();
            assert_eq!(seq, par);
            assert!(!seq.is_empty());
        }

        #[test]
        fn test_size_mismatch_reports_everything() {
            let front = grid(3, 2);
            let back = grid(2, 2);
            assert_eq!(changed_positions(&front, &back, &Parallelism::SEQUENTIAL).len(), 6);
        }
    }

    mod coalesce_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_single_change_one_run() {
            let mut front = grid(4, 4);
            front.set(Point::new(1, 1), white('z'));
            let runs = coalesce(&front, vec![Point::new(1, 1)], RunPolicy::RowBounded);
            assert_eq!(runs.len(), 1);
            assert_eq!(runs[0].start, Point::new(1, 1));
            assert_eq!(runs[0].text, "z");
            assert_eq!(runs[0].len, 1);
        }

        #[test]
        fn test_adjacent_same_color_merge() {
            let mut front = grid(4, 1);
            front.set(Point::new(1, 0), white('a'));
            front.set(Point::new(2, 0), white('b'));
            let runs = coalesce(
                &front,
                vec![Point::new(2, 0), Point::new(1, 0)],
                RunPolicy::RowBounded,
            );
            assert_eq!(
                runs,
                vec![Run {
                    start: Point::new(1, 0),
                    fg: Color::White,
                    bg: Color::Black,
                    text: "ab".to_string(),
                    len: 2,
                }]
            );
        }

        #[test]
        fn test_adjacent_different_color_split() {
            let mut front = grid(4, 1);
            front.set(Point::new(1, 0), white('a'));
            front.set(Point::new(2, 0), red('b'));
            let runs = coalesce(
                &front,
                vec![Point::new(1, 0), Point::new(2, 0)],
                RunPolicy::RowBounded,
            );
            assert_eq!(runs.len(), 2);
            assert_eq!(runs[0].text, "a");
            assert_eq!(runs[1].start, Point::new(2, 0));
            assert_eq!(runs[1].fg, Color::Red);
        }

        #[test]
        fn test_gap_splits_run() {
            let mut front = grid(5, 1);
            front.set(Point::new(0, 0), white('a'));
            front.set(Point::new(2, 0), white('b'));
            let runs = coalesce(
                &front,
                vec![Point::new(0, 0), Point::new(2, 0)],
                RunPolicy::RowBounded,
            );
            assert_eq!(runs.len(), 2);
        }

        #[test]
        fn test_row_bounded_does_not_wrap() {
            let mut front = grid(3, 2);
            front.set(Point::new(2, 0), white('a'));
            front.set(Point::new(0, 1), white('b'));
            let positions = vec![Point::new(0, 1), Point::new(2, 0)];
            let runs = coalesce(&front, positions.clone(), RunPolicy::RowBounded);
            assert_eq!(runs.len(), 2);
            assert_eq!(runs[0].start, Point::new(2, 0));

            let runs = coalesce(&front, positions, RunPolicy::Wrapping);
            assert_eq!(runs.len(), 1);
            assert_eq!(runs[0].text, "ab");
            assert_eq!(
                runs[0].positions(3).collect::<Vec<_>>(),
                vec![Point::new(2, 0), Point::new(0, 1)]
            );
        }

        #[test]
        fn test_wrapping_joins_across_row_seam() {
            let mut front = grid(3, 3);
            for p in [Point::new(1, 0), Point::new(2, 0), Point::new(0, 1), Point::new(1, 1)] {
                front.set(p, white('w'));
            }
            front.set(Point::new(2, 1), red('r'));
            front.set(Point::new(0, 2), red('s'));
            let positions = vec![
                Point::new(0, 2),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(0, 1),
                Point::new(2, 0),
                Point::new(1, 0),
            ];

            let runs = coalesce(&front, positions.clone(), RunPolicy::Wrapping);
            assert_eq!(
                runs,
                vec![
                    Run {
                        start: Point::new(1, 0),
                        fg: Color::White,
                        bg: Color::Black,
                        text: "wwww".to_string(),
                        len: 4,
                    },
                    Run {
                        start: Point::new(2, 1),
                        fg: Color::Red,
                        bg: Color::Black,
                        text: "rs".to_string(),
                        len: 2,
                    },
                ]
            );
            assert_eq!(
                runs[1].positions(3).collect::<Vec<_>>(),
                vec![Point::new(2, 1), Point::new(0, 2)]
            );

            let bounded = coalesce(&front, positions, RunPolicy::RowBounded);
            let texts: Vec<&str> = bounded.iter().map(|r| r.text.as_str()).collect();
            assert_eq!(texts, vec!["ww", "ww", "r", "s"]);
        }

        #[test]
        fn test_wrapping_needs_last_column() {
            let mut front = grid(4, 2);
            front.set(Point::new(2, 0), white('a'));
            front.set(Point::new(0, 1), white('b'));
            let runs = coalesce(
                &front,
                vec![Point::new(2, 0), Point::new(0, 1)],
                RunPolicy::Wrapping,
            );
            assert_eq!(runs.len(), 2);
        }

        #[test]
        fn test_control_characters_emitted_as_spaces() {
            let mut front = grid(3, 1);
            if let Some(cell) = front.get_mut(Point::new(1, 0)) {
                cell.character = '\n';
            }
            front.set(Point::new(0, 0), white('a'));
            front.set(Point::new(2, 0), white('b'));
            let runs = coalesce(
                &front,
                vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)],
                RunPolicy::RowBounded,
            );
            assert_eq!(runs.len(), 1);
            assert_eq!(runs[0].text, "a b");
        }

        #[test]
        fn test_runs_ordered_row_major() {
            let mut front = grid(3, 3);
            let positions = vec![Point::new(0, 2), Point::new(2, 0), Point::new(1, 1)];
            for p in &positions {
                front.set(*p, red('x'));
            }
            let runs = coalesce(&front, positions, RunPolicy::RowBounded);
            let starts: Vec<Point> = runs.iter().map(|r| r.start).collect();
            assert_eq!(starts, vec![Point::new(2, 0), Point::new(1, 1), Point::new(0, 2)]);
        }

        #[test]
        fn test_duplicates_and_out_of_range_ignored() {
            let front = grid(2, 1);
            let runs = coalesce(
                &front,
                vec![Point::new(0, 0), Point::new(0, 0), Point::new(9, 9)],
                RunPolicy::RowBounded,
            );
            assert_eq!(runs.len(), 1);
            assert_eq!(runs[0].len, 1);
        }

        #[test]
        fn test_run_end() {
            let mut front = grid(6, 1);
            for x in 1..4 {
                front.set(Point::new(x, 0), white('-'));
            }
            let positions = (1..4).map(|x| Point::new(x, 0)).collect();
            let runs = coalesce(&front, positions, RunPolicy::RowBounded);
            assert_eq!(runs[0].end(), Point::new(4, 0));
        }
    }
}
