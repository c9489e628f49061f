//! Frame pacing.
//!
//! The loop runs at the target rate while the screen is idle and at the
//! maximum rate while something is happening. Two things hold the pacer at
//! the maximum rate:
//!
//! - explicit, counted live requests ([`FramePacer::request_live`]), for
//!   callers that animate
//! - recent activity reported through [`FramePacer::record_activity`],
//!   which keeps the pacer live for a configurable number of frames

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame intervals kept for the measured rate.
const SAMPLE_WINDOW: usize = 32;

/// Frame rate pacer for the application loop.
#[derive(Debug)]
pub struct FramePacer {
    target_fps: u32,
    max_fps: u32,
    idle_budget: Duration,
    live_budget: Duration,
    live_requests: u32,
    linger_frames: u32,
    linger_left: u32,
    last_tick: Option<Instant>,
    intervals: VecDeque<Duration>,
    frame_count: u64,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(30, 60)
    }
}

impl FramePacer {
    /// Creates a pacer. Rates below 1 become 1 and `max_fps` is raised to
    /// `target_fps` if lower.
    pub fn new(target_fps: u32, max_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        let max_fps = max_fps.max(target_fps);
        Self {
            target_fps,
            max_fps,
            idle_budget: budget(target_fps),
            live_budget: budget(max_fps),
            live_requests: 0,
            linger_frames: 0,
            linger_left: 0,
            last_tick: None,
            intervals: VecDeque::with_capacity(SAMPLE_WINDOW),
            frame_count: 0,
        }
    }

    /// Keeps the pacer live for `frames` frames after each reported
    /// activity.
    pub fn with_linger(mut self, frames: u32) -> Self {
        self.linger_frames = frames;
        self
    }

    /// Returns the idle frame rate.
    #[inline]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Returns the live frame rate.
    #[inline]
    pub fn max_fps(&self) -> u32 {
        self.max_fps
    }

    /// Adds one live request. Release it with
    /// [`drop_live`](Self::drop_live).
    pub fn request_live(&mut self) {
        self.live_requests = self.live_requests.saturating_add(1);
    }

    /// Releases one live request. Extra releases are ignored.
    pub fn drop_live(&mut self) {
        self.live_requests = self.live_requests.saturating_sub(1);
    }

    /// Returns the number of outstanding live requests.
    #[inline]
    pub fn live_requests(&self) -> u32 {
        self.live_requests
    }

    /// Reports whether the last frame did anything. Activity restarts the
    /// linger countdown, an idle frame consumes one step of it.
    pub fn record_activity(&mut self, active: bool) {
        if active {
            self.linger_left = self.linger_frames;
        } else {
            self.linger_left = self.linger_left.saturating_sub(1);
        }
    }

    /// Returns whether frames are paced at the live rate.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.live_requests > 0 || self.linger_left > 0
    }

    /// Returns the rate currently aimed for.
    pub fn effective_fps(&self) -> u32 {
        if self.is_live() {
            self.max_fps
        } else {
            self.target_fps
        }
    }

    /// Returns how long to sleep after a frame that took `frame_duration`.
    pub fn frame_delay(&self, frame_duration: Duration) -> Duration {
        let budget = if self.is_live() {
            self.live_budget
        } else {
            self.idle_budget
        };
        budget.saturating_sub(frame_duration)
    }

    /// Sleeps for [`frame_delay`](Self::frame_delay).
    pub fn wait(&self, frame_duration: Duration) {
        let delay = self.frame_delay(frame_duration);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    /// Marks the end of a frame and returns the time since the previous
    /// tick, or zero for the first one.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        if self.last_tick.is_some() {
            self.record_interval(delta);
        }
        self.last_tick = Some(now);
        self.frame_count += 1;
        delta
    }

    /// Returns the number of ticks since creation.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the rate measured over the recent frame intervals, or zero
    /// before two ticks.
    pub fn current_fps(&self) -> f32 {
        let total: Duration = self.intervals.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let frames = self.intervals.len() as f32;
        frames / total.as_secs_f32()
    }

    fn record_interval(&mut self, interval: Duration) {
        if self.intervals.len() == SAMPLE_WINDOW {
            self.intervals.pop_front();
        }
        self.intervals.push_back(interval);
    }
}

fn budget(fps: u32) -> Duration {
    Duration::from_secs(1) / fps
}
