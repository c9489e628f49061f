//! Row-parallel iteration over cell storage.
//!
//! Rows of a grid are disjoint slices, so work that only touches one row at a
//! time can be split into bands of whole rows and run on scoped threads.
//! Small workloads stay on the calling thread.

use crate::Cell;

/// Controls when row-parallel work is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parallelism {
    /// Minimum number of cells before work is split across threads.
    pub threshold: usize,
    /// Maximum number of threads per operation.
    pub workers: usize,
}

impl Parallelism {
    /// Default cell-count threshold.
    pub const DEFAULT_THRESHOLD: usize = 16_384;

    /// Never spawns threads.
    pub const SEQUENTIAL: Self = Self {
        threshold: usize::MAX,
        workers: 1,
    };

    /// Creates a policy. `workers == 0` uses one thread per logical CPU.
    pub fn new(threshold: usize, workers: usize) -> Self {
        let workers = if workers == 0 { num_cpus::get() } else { workers };
        Self {
            threshold,
            workers: workers.max(1),
        }
    }

    /// Returns how many bands to use for `rows` rows holding `cells` cells.
    #[inline]
    pub fn bands_for(&self, cells: usize, rows: usize) -> usize {
        if cells < self.threshold || self.workers <= 1 {
            1
        } else {
            self.workers.min(rows).max(1)
        }
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD, 0)
    }
}

/// Calls `f(row_index, row)` for every row of `cells`.
///
/// `cells` must hold whole rows of `width` cells; `first_row` is the index of
/// the first row in the slice. `work` is the number of cells the caller will
/// actually touch, used against the threshold.
pub(crate) fn for_each_row<F>(
    cells: &mut [Cell],
    width: usize,
    first_row: usize,
    work: usize,
    parallelism: &Parallelism,
    f: F,
) where
    F: Fn(usize, &mut [Cell]) + Sync,
{
    if width == 0 || cells.is_empty() {
        return;
    }
    let rows = cells.len() / width;
    let bands = parallelism.bands_for(work, rows);
    if bands <= 1 {
        for (i, row) in cells.chunks_mut(width).enumerate() {
            f(first_row + i, row);
        }
        return;
    }

    let rows_per_band = rows.div_ceil(bands);
    let f = &f;
    std::thread::scope(|scope| {
        for (band, chunk) in cells.chunks_mut(rows_per_band * width).enumerate() {
            let band_start = first_row + band * rows_per_band;
            scope.spawn(move || {
                for (i, row) in chunk.chunks_mut(width).enumerate() {
                    f(band_start + i, row);
                }
            });
        }
    });
}

/// Maps every row pair of two equally sized grids and concatenates the
/// per-row outputs. Output order follows band order but is otherwise
/// unspecified.
pub(crate) fn collect_rows<T, F>(
    left: &[Cell],
    right: &[Cell],
    width: usize,
    parallelism: &Parallelism,
    f: F,
) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &[Cell], &[Cell], &mut Vec<T>) + Sync,
{
    if width == 0 || left.is_empty() || left.len() != right.len() {
        return Vec::new();
    }
    let rows = left.len() / width;
    let bands = parallelism.bands_for(left.len(), rows);
    if bands <= 1 {
        let mut out = Vec::new();
        for (y, (l, r)) in left.chunks(width).zip(right.chunks(width)).enumerate() {
            f(y, l, r, &mut out);
        }
        return out;
    }

    let rows_per_band = rows.div_ceil(bands);
    let band_len = rows_per_band * width;
    let mut outputs: Vec<Vec<T>> = std::iter::repeat_with(Vec::new).take(bands).collect();
    let f = &f;
    std::thread::scope(|scope| {
        for (band, ((l, r), out)) in left
            .chunks(band_len)
            .zip(right.chunks(band_len))
            .zip(outputs.iter_mut())
            .enumerate()
        {
            scope.spawn(move || {
                let band_start = band * rows_per_band;
                for (i, (lr, rr)) in l.chunks(width).zip(r.chunks(width)).enumerate() {
                    f(band_start + i, lr, rr, out);
                }
            });
        }
    });
    outputs.into_iter().flatten().collect()
}
