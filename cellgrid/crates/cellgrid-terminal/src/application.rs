//! Application loop and lifecycle management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use cellgrid_core::Result;
use cellgrid_input::{CrosstermInput, InputSource};
use cellgrid_widgets::WidgetTree;
use tracing::warn;

use crate::backend::{CrosstermBackend, TerminalBackend};
use crate::config::EngineConfig;
use crate::engine::{FrameEngine, FrameStats};
use crate::pacer::FramePacer;

/// Application state for the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    /// Frames are being produced.
    Running,
    /// The loop exits after the current frame.
    Stopping,
    /// The loop is not running.
    Stopped,
}

/// Ties a frame engine, a widget tree and an input source together.
///
/// Each iteration polls at most one key, runs a frame (which delivers the
/// key after flushing), hands the tree to the caller and then sleeps until
/// the next frame is due. Frames that write cells or deliver a key keep the
/// pacer at `max_fps` for `live_frames` further frames.
///
/// # Example
///
/// ```no_run
/// use cellgrid_core::Rect;
/// use cellgrid_input::KeyCode;
/// use cellgrid_terminal::{Application, EngineConfig};
/// use cellgrid_widgets::Label;
///
/// fn main() -> cellgrid_core::Result<()> {
///     let mut app = Application::terminal(EngineConfig::default())?;
///     let root = app.tree().root();
///     app.tree_mut()
///         .add_child_at(root, Rect::new(0, 0, 20, 1), Label::new("q quits"))
///         .unwrap();
///
///     let quit = app.quit_handle();
///     app.tree_mut()
///         .on_key(root, move |key| {
///             if key.code == KeyCode::Char('q') {
///                 quit.store(true, std::sync::atomic::Ordering::Relaxed);
///             }
///         })
///         .unwrap();
///
///     app.run(|_tree, _stats| true)
/// }
/// ```
pub struct Application<B: TerminalBackend = CrosstermBackend, I: InputSource = CrosstermInput> {
    engine: FrameEngine<B>,
    tree: WidgetTree,
    input: I,
    pacer: FramePacer,
    quit: Arc<AtomicBool>,
    state: AppState,
}

impl Application<CrosstermBackend, CrosstermInput> {
    /// Creates an application on stdout and the terminal's key events.
    pub fn terminal(config: EngineConfig) -> Result<Self> {
        Self::new(CrosstermBackend::new(), CrosstermInput::new(), config)
    }
}

impl<B: TerminalBackend, I: InputSource> Application<B, I> {
    /// Creates an application. The tree's global defaults come from the
    /// configured palette.
    pub fn new(backend: B, input: I, config: EngineConfig) -> Result<Self> {
        let pacer =
            FramePacer::new(config.target_fps, config.max_fps).with_linger(config.live_frames);
        let tree = WidgetTree::with_defaults(config.palette);
        let engine = FrameEngine::new(backend, config)?;
        Ok(Self {
            engine,
            tree,
            input,
            pacer,
            quit: Arc::new(AtomicBool::new(false)),
            state: AppState::Stopped,
        })
    }

    /// Returns the current state.
    #[inline]
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Returns the widget tree.
    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Returns the widget tree mutably.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// Returns the frame engine.
    #[inline]
    pub fn engine(&self) -> &FrameEngine<B> {
        &self.engine
    }

    /// Returns the frame engine mutably.
    #[inline]
    pub fn engine_mut(&mut self) -> &mut FrameEngine<B> {
        &mut self.engine
    }

    /// Returns the frame pacer.
    #[inline]
    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    /// Returns the frame pacer mutably.
    #[inline]
    pub fn pacer_mut(&mut self) -> &mut FramePacer {
        &mut self.pacer
    }

    /// Returns a flag that stops the loop when set. Key observers can hold
    /// a clone.
    pub fn quit_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit)
    }

    /// Requests the loop to stop after the current frame.
    pub fn quit(&mut self) {
        self.quit.store(true, Ordering::Relaxed);
    }

    /// Polls one key and runs one frame, without terminal setup.
    ///
    /// A failed poll is logged and the frame runs without a key.
    pub fn step(&mut self) -> Result<FrameStats> {
        match self.input.poll_key() {
            Ok(Some(key)) => self.engine.set_pending_key(key),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "input poll failed"),
        }
        let key_delivered = self.engine.pending_key().is_some();

        let stats = self.engine.frame(&mut self.tree)?;
        self.pacer
            .record_activity(key_delivered || stats.changed_cells > 0 || stats.reallocated);
        Ok(stats)
    }

    /// Sets up the terminal, loops until `callback` returns `false` or the
    /// quit flag is set, then restores the terminal.
    ///
    /// The terminal is restored even when a frame fails.
    pub fn run<F>(&mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(&mut WidgetTree, &FrameStats) -> bool,
    {
        self.engine.setup()?;
        self.state = AppState::Running;

        let result = self.event_loop(&mut callback);

        let teardown_result = self.engine.teardown();
        self.state = AppState::Stopped;

        result?;
        teardown_result
    }

    fn event_loop<F>(&mut self, callback: &mut F) -> Result<()>
    where
        F: FnMut(&mut WidgetTree, &FrameStats) -> bool,
    {
        while self.state == AppState::Running {
            if self.quit.load(Ordering::Relaxed) {
                self.state = AppState::Stopping;
                break;
            }
            let frame_start = Instant::now();

            let stats = self.step()?;
            if !callback(&mut self.tree, &stats) || self.quit.load(Ordering::Relaxed) {
                self.state = AppState::Stopping;
                break;
            }

            self.pacer.wait(frame_start.elapsed());
            self.pacer.tick();
        }
        Ok(())
    }
}

/// Builder for applications with custom pacing.
pub struct ApplicationBuilder<B: TerminalBackend, I: InputSource> {
    backend: B,
    input: I,
    config: EngineConfig,
}

impl<B: TerminalBackend, I: InputSource> ApplicationBuilder<B, I> {
    /// Starts from the default configuration.
    pub fn new(backend: B, input: I) -> Self {
        Self {
            backend,
            input,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the normal frame rate.
    pub fn target_fps(mut self, fps: u32) -> Self {
        self.config.target_fps = fps;
        self.config.max_fps = self.config.max_fps.max(fps);
        self
    }

    /// Sets the live-mode frame rate.
    pub fn max_fps(mut self, fps: u32) -> Self {
        self.config.max_fps = fps;
        self.config.target_fps = self.config.target_fps.min(fps);
        self
    }

    /// Builds the application.
    pub fn build(self) -> Result<Application<B, I>> {
        Application::new(self.backend, self.input, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordingBackend, TerminalOp};
    use cellgrid_core::Rect;
    use cellgrid_input::{KeyCode, KeyEvent, QueueInput};
    use cellgrid_widgets::Label;
    use pretty_assertions::assert_eq;

    struct FailingInput {
        polls: usize,
    }

    impl InputSource for FailingInput {
        fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
            self.polls += 1;
            if self.polls == 1 {
                Err(cellgrid_core::Error::Io(std::io::Error::other("poll")))
            } else {
                Ok(Some(KeyEvent::char('k')))
            }
        }
    }

    fn app(keys: &[char]) -> Application<RecordingBackend, QueueInput> {
        ApplicationBuilder::new(
            RecordingBackend::new(6, 1),
            keys.iter().copied().map(KeyEvent::char).collect::<QueueInput>(),
        )
        .target_fps(1000)
        .max_fps(1000)
        .build()
        .unwrap()
    }

    #[test]
    fn test_quit_from_key_observer() {
        let mut app = app(&['x', 'q', 'z']);
        let root = app.tree().root();
        app.tree_mut()
            .add_child_at(root, Rect::new(0, 0, 6, 1), Label::new("hello"))
            .unwrap();
        let quit = app.quit_handle();
        app.tree_mut()
            .on_key(root, move |key| {
                if key.code == KeyCode::Char('q') {
                    quit.store(true, Ordering::Relaxed);
                }
            })
            .unwrap();

        let mut frames = 0;
        app.run(|_, _| {
            frames += 1;
            true
        })
        .unwrap();

        assert_eq!(frames, 2);
        assert_eq!(app.state(), AppState::Stopped);
        let ops = app.engine().backend().ops();
        assert_eq!(
            &ops[..3],
            &[
                TerminalOp::EnterRawMode,
                TerminalOp::EnterAlternateScreen,
                TerminalOp::HideCursor,
            ]
        );
        assert_eq!(
            &ops[ops.len() - 5..],
            &[
                TerminalOp::ResetStyle,
                TerminalOp::ShowCursor,
                TerminalOp::LeaveAlternateScreen,
                TerminalOp::ExitRawMode,
                TerminalOp::Flush,
            ]
        );
        assert_eq!(
            app.engine().backend().screen_lines(),
            vec!["hello ".to_string()]
        );
    }

    #[test]
    fn test_callback_stops_loop() {
        let mut app = app(&[]);
        let mut frames = 0;
        app.run(|_, stats| {
            frames += 1;
            assert!(stats.reallocated || frames > 1);
            frames < 3
        })
        .unwrap();
        assert_eq!(frames, 3);
        assert_eq!(app.pacer_mut().frame_count(), 2);
    }

    #[test]
    fn test_step_delivers_one_key_per_frame() {
        let mut app = app(&['a', 'b']);
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let root = app.tree().root();
        app.tree_mut()
            .on_key(root, move |key| sink.lock().unwrap().push(key.code))
            .unwrap();

        app.step().unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![KeyCode::Char('a')]);
        app.step().unwrap();
        app.step().unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![KeyCode::Char('a'), KeyCode::Char('b')]
        );
    }

    #[test]
    fn test_activity_drives_live_pacing() {
        let mut app = ApplicationBuilder::new(
            RecordingBackend::new(4, 1),
            [KeyEvent::char('a')].into_iter().collect::<QueueInput>(),
        )
        .config(EngineConfig::default().with_fps(10, 50).with_live_frames(2))
        .build()
        .unwrap();
        assert!(!app.pacer().is_live());

        // First frame reallocates and delivers the key.
        app.step().unwrap();
        assert!(app.pacer().is_live());
        assert_eq!(app.pacer().effective_fps(), 50);

        app.step().unwrap();
        assert!(app.pacer().is_live());
        app.step().unwrap();
        assert!(!app.pacer().is_live());
        assert_eq!(app.pacer().effective_fps(), 10);

        let root = app.tree().root();
        app.tree_mut()
            .add_child_at(root, Rect::new(0, 0, 4, 1), Label::new("hi"))
            .unwrap();
        let stats = app.step().unwrap();
        assert_eq!(stats.changed_cells, 2);
        assert!(app.pacer().is_live());
    }

    #[test]
    fn test_explicit_live_request_outlasts_idle_frames() {
        let mut app = app(&[]);
        app.pacer_mut().request_live();
        for _ in 0..20 {
            app.step().unwrap();
        }
        assert!(app.pacer().is_live());
        app.pacer_mut().drop_live();
        assert!(!app.pacer().is_live());
    }

    #[test]
    fn test_failed_poll_does_not_stop_the_loop() {
        let mut app = ApplicationBuilder::new(RecordingBackend::new(3, 1), FailingInput { polls: 0 })
            .target_fps(1000)
            .max_fps(1000)
            .build()
            .unwrap();
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let root = app.tree().root();
        app.tree_mut()
            .on_key(root, move |key| sink.lock().unwrap().push(key.code))
            .unwrap();

        let mut frames = 0;
        app.run(|_, _| {
            frames += 1;
            frames < 2
        })
        .unwrap();

        assert_eq!(frames, 2);
        assert_eq!(*seen.lock().unwrap(), vec![KeyCode::Char('k')]);
    }

    #[test]
    fn test_tree_uses_configured_palette() {
        let palette = cellgrid_core::Palette {
            background: cellgrid_core::Color::DarkBlue,
            ..cellgrid_core::Palette::DEFAULT
        };
        let app = ApplicationBuilder::new(RecordingBackend::new(1, 1), QueueInput::new())
            .config(EngineConfig::default().with_palette(palette))
            .build()
            .unwrap();
        assert_eq!(app.tree().defaults(), &palette);
    }
}
