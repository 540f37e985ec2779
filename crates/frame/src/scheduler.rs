use std::time::Duration;

use storehouse_common::Viewport;
use storehouse_input::InputState;
use storehouse_locomotion::{LocomotionController, PointerCapture};
use storehouse_render::Renderer;

use crate::clock::{Clock, SystemClock};
use crate::stage::Stage;
use crate::timer::FrameTimer;

/// Scheduler tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    /// Longest delta handed to the controller; longer gaps (stalls, a
    /// suspended host) are clamped to this.
    pub max_delta: Duration,
    /// Number of frame deltas kept for statistics.
    pub timer_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_delta: Duration::from_millis(100),
            timer_capacity: 120,
        }
    }
}

/// What one scheduled iteration did.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome<T> {
    /// Ticked and rendered with the given delta in seconds.
    Rendered { dt: f32, output: T },
    /// Host unfocused; nothing ticked or rendered.
    Idle,
}

impl<T> FrameOutcome<T> {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    pub fn output(&self) -> Option<&T> {
        match self {
            Self::Rendered { output, .. } => Some(output),
            Self::Idle => None,
        }
    }

    pub fn into_output(self) -> Option<T> {
        match self {
            Self::Rendered { output, .. } => Some(output),
            Self::Idle => None,
        }
    }
}

/// Drives one tick + render per display refresh, gated by host focus.
#[derive(Debug)]
pub struct FrameScheduler<C: Clock = SystemClock> {
    clock: C,
    config: SchedulerConfig,
    last: Option<Duration>,
    focused: bool,
    timer: FrameTimer,
    rendered: u64,
    idle: u64,
}

impl Default for FrameScheduler<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock::new(), SchedulerConfig::default())
    }
}

impl<C: Clock> FrameScheduler<C> {
    pub fn new(clock: C, config: SchedulerConfig) -> Self {
        Self {
            clock,
            config,
            last: None,
            focused: true,
            timer: FrameTimer::new(config.timer_capacity),
            rendered: 0,
            idle: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn rendered_frames(&self) -> u64 {
        self.rendered
    }

    pub fn idle_frames(&self) -> u64 {
        self.idle
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Record host focus. Unfocused frames idle but keep being scheduled.
    pub fn set_focus(&mut self, focused: bool) {
        if self.focused != focused {
            tracing::debug!(focused, "host focus changed");
        }
        self.focused = focused;
    }

    /// Apply a viewport change right away, ahead of the next frame.
    pub fn resize<R: Renderer>(&mut self, stage: &mut Stage<R>, viewport: Viewport) {
        stage.resize(viewport);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            aspect = stage.camera.aspect,
            "viewport resized"
        );
    }

    /// Run one iteration: sample the clock, then tick and render if focused.
    ///
    /// Discrete input is cleared either way, so events that arrived while
    /// unfocused are not replayed on refocus.
    pub fn frame<R: Renderer>(
        &mut self,
        stage: &mut Stage<R>,
        controller: &mut LocomotionController,
        input: &mut InputState,
        capture: &mut dyn PointerCapture,
    ) -> FrameOutcome<R::Output> {
        let delta = self.sample_delta();

        if !self.focused {
            input.clear_discrete();
            self.idle += 1;
            return FrameOutcome::Idle;
        }

        let dt = delta.as_secs_f32();
        controller.handle_requests(input, capture);
        controller.tick(dt, input);
        input.clear_discrete();

        let output = stage.render(controller.state());
        self.timer.record(delta);
        self.rendered += 1;
        tracing::trace!(dt, frame = self.rendered, "frame rendered");

        FrameOutcome::Rendered { dt, output }
    }

    fn sample_delta(&mut self) -> Duration {
        let now = self.clock.now();
        let delta = match self.last {
            Some(last) => now.saturating_sub(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        delta.min(self.config.max_delta)
    }
}
