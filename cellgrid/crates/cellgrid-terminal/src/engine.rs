//! Double-buffered frame engine.
//!
//! Each [`FrameEngine::frame`] call:
//!
//! 1. samples the terminal size and the root palette, reallocating both
//!    grids and clearing the screen when either changed
//! 2. clears the front grid and renders the widget tree into it
//! 3. diffs front against back and coalesces the changes into runs
//! 4. writes the runs in row-major order, committing each successful run
//!    to the back grid
//! 5. flushes and delivers the pending key, if any
//!
//! Terminal failures inside a frame are logged and swallowed. Only grid
//! allocation failure is returned to the caller.

use std::time::{Duration, Instant};

use cellgrid_buffer::diff::{self, Run};
use cellgrid_buffer::{Cell, DoubleBuffer};
use cellgrid_core::{Color, Error, Palette, Point, Rect, Result};
use cellgrid_input::KeyEvent;
use cellgrid_widgets::WidgetTree;
use tracing::{debug, trace, warn};

use crate::backend::TerminalBackend;
use crate::config::EngineConfig;

/// Callback fired with the new window rect after every reallocation.
pub type ResizeObserver = Box<dyn FnMut(Rect) + Send>;

/// What one frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Positions reported by the diff.
    pub changed_cells: usize,
    /// Runs produced by coalescing.
    pub runs: usize,
    /// Runs whose terminal write failed.
    pub failed_runs: usize,
    /// Whether the grids were reallocated.
    pub reallocated: bool,
    /// Wall time spent in the frame.
    pub elapsed: Duration,
}

/// Tracked terminal state. `None` means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Pen {
    fg: Option<Color>,
    bg: Option<Color>,
    cursor: Option<Point>,
}

/// Owns the front/back grids and drives a [`TerminalBackend`].
pub struct FrameEngine<B: TerminalBackend> {
    backend: B,
    buffers: DoubleBuffer,
    config: EngineConfig,
    /// Root palette of the last reallocation.
    last_palette: Option<Palette>,
    window: Rect,
    pending_key: Option<KeyEvent>,
    pen: Pen,
    resize_observers: Vec<ResizeObserver>,
}

impl<B: TerminalBackend> FrameEngine<B> {
    /// Creates an engine. Grids are sized on the first frame.
    pub fn new(backend: B, config: EngineConfig) -> Result<Self> {
        let buffers = DoubleBuffer::new(0, 0, Cell::blank(&config.palette), config.parallelism())?;
        Ok(Self {
            backend,
            buffers,
            config,
            last_palette: None,
            window: Rect::ZERO,
            pending_key: None,
            pen: Pen::default(),
            resize_observers: Vec::new(),
        })
    }

    /// Returns the backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the backend mutably.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Returns the grid pair.
    #[inline]
    pub fn buffers(&self) -> &DoubleBuffer {
        &self.buffers
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the last sampled window rect, `(0, 0, width, height)`.
    #[inline]
    pub fn window_rect(&self) -> Rect {
        self.window
    }

    /// Returns the key waiting for the next frame.
    #[inline]
    pub fn pending_key(&self) -> Option<KeyEvent> {
        self.pending_key
    }

    /// Stores `key` for delivery after the next flush, replacing any key
    /// not yet delivered.
    pub fn set_pending_key(&mut self, key: KeyEvent) {
        if let Some(dropped) = self.pending_key.replace(key) {
            trace!(key = %dropped, "replaced undelivered key");
        }
    }

    /// Subscribes `observer` to reallocations.
    pub fn on_resize<F>(&mut self, observer: F)
    where
        F: FnMut(Rect) + Send + 'static,
    {
        self.resize_observers.push(Box::new(observer));
    }

    /// Makes the next frame rewrite every cell.
    pub fn force_redraw(&mut self) {
        self.buffers.force_redraw();
    }

    /// Prepares the terminal for drawing. The next frame reallocates and
    /// clears the screen.
    pub fn setup(&mut self) -> Result<()> {
        self.backend.enter_raw_mode()?;
        self.backend.enter_alternate_screen()?;
        self.backend.hide_cursor()?;
        self.last_palette = None;
        self.pen = Pen::default();
        Ok(())
    }

    /// Restores the terminal.
    pub fn teardown(&mut self) -> Result<()> {
        self.backend.reset_style()?;
        self.backend.show_cursor()?;
        self.backend.leave_alternate_screen()?;
        self.backend.exit_raw_mode()?;
        self.backend.flush()?;
        self.pen = Pen::default();
        Ok(())
    }

    /// Runs one frame against `tree`.
    pub fn frame(&mut self, tree: &mut WidgetTree) -> Result<FrameStats> {
        let started = Instant::now();
        let mut stats = FrameStats::default();

        match self.backend.size() {
            Ok((width, height)) => {
                self.window = Rect::new(0, 0, i32::from(width), i32::from(height));
            }
            Err(err) => debug!(error = %err, "terminal size query failed, keeping last size"),
        }

        let palette = tree.effective_colors(tree.root());
        let resized = self.buffers.size() != self.window.size;
        let recolored = self.last_palette != Some(palette);
        if resized || recolored {
            self.reallocate(palette, resized)?;
            stats.reallocated = true;
        }

        self.buffers.clear_front(Cell::blank(&palette));
        tree.render(self.buffers.front_mut(), self.window);

        let changed = self.buffers.diff();
        stats.changed_cells = changed.len();
        let runs = diff::coalesce(self.buffers.front(), changed, self.config.run_policy);
        stats.runs = runs.len();

        for run in &runs {
            match self.write_run(run) {
                Ok(()) => self.buffers.commit_run(run),
                Err(err) => {
                    warn!(
                        x = run.start.x,
                        y = run.start.y,
                        len = run.len,
                        error = %err,
                        "run flush failed"
                    );
                    self.pen = Pen::default();
                    stats.failed_runs += 1;
                }
            }
        }

        match self.backend.flush() {
            Ok(()) if stats.failed_runs == 0 => self.buffers.clear_force_redraw(),
            Ok(()) => {}
            Err(err) => {
                warn!(error = %err, "terminal flush failed");
                self.pen = Pen::default();
                self.buffers.force_redraw();
            }
        }

        if let Some(key) = self.pending_key.take() {
            tree.dispatch_key(&key);
        }

        stats.elapsed = started.elapsed();
        trace!(
            changed_cells = stats.changed_cells,
            runs = stats.runs,
            failed_runs = stats.failed_runs,
            reallocated = stats.reallocated,
            elapsed = ?stats.elapsed,
            "frame"
        );
        Ok(stats)
    }

    fn reallocate(&mut self, palette: Palette, resized: bool) -> Result<()> {
        let (width, height) = (self.window.width(), self.window.height());
        debug!(
            width,
            height,
            reason = if resized { "resize" } else { "palette" },
            "reallocating frame grids"
        );
        self.buffers
            .reallocate(width, height, Cell::blank(&palette))?;
        self.last_palette = Some(palette);
        self.pen = Pen::default();

        if let Err(err) = self.clear_screen(&palette) {
            warn!(error = %err, "terminal clear failed");
            self.pen = Pen::default();
            self.buffers.force_redraw();
        }

        let window = self.window;
        for observer in &mut self.resize_observers {
            observer(window);
        }
        Ok(())
    }

    fn clear_screen(&mut self, palette: &Palette) -> Result<()> {
        self.backend.set_foreground(palette.foreground)?;
        self.pen.fg = Some(palette.foreground);
        self.backend.set_background(palette.background)?;
        self.pen.bg = Some(palette.background);
        self.backend.clear()
    }

    fn write_run(&mut self, run: &Run) -> Result<()> {
        if self.pen.cursor != Some(run.start) {
            let x = terminal_coord(run.start.x)?;
            let y = terminal_coord(run.start.y)?;
            self.pen.cursor = None;
            self.backend.move_cursor(x, y)?;
            self.pen.cursor = Some(run.start);
        }
        if self.pen.fg != Some(run.fg) {
            self.pen.fg = None;
            self.backend.set_foreground(run.fg)?;
            self.pen.fg = Some(run.fg);
        }
        if self.pen.bg != Some(run.bg) {
            self.pen.bg = None;
            self.backend.set_background(run.bg)?;
            self.pen.bg = Some(run.bg);
        }

        self.pen.cursor = None;
        self.backend.write_str(&run.text)?;

        // A write ending on the last column leaves the cursor in a
        // terminal-specific state.
        let width = self.buffers.size().x;
        self.pen.cursor = run
            .positions(width)
            .last()
            .filter(|last| last.x + 1 < width)
            .map(|last| last.offset(1, 0));
        Ok(())
    }
}

fn terminal_coord(value: i32) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::Terminal(format!("coordinate {value} out of range")))
}
