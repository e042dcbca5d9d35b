//! Gesture lock widget
//!
//! [`GestureLock`] owns the grid, the path recorder, the lock state and the
//! lockout countdown, and drives them from pointer events and timer ticks.
//! Every state change produces a [`Frame`] for the renderer.
//!
//! ```text
//!            down                  up (empty)
//!   Idle ───────────► Drawing ───────────────────► Idle
//!    ▲                   │ up (non-empty)
//!    │                   ▼
//!    │   accept / reject Validating ── lock ──► Locked
//!    └───────────────────┘                        │
//!    ▲                                            │ countdown expired
//!    └────────────────────────────────────────────┘
//! ```
//!
//! All handling is synchronous; the host calls in from its event loop and
//! reports elapsed time through [`GestureLock::advance`] (or one tick at a
//! time through [`GestureLock::tick`]).

use std::time::Duration;

use crate::color::Color;
use crate::config::LockConfig;
use crate::error::Result;
use crate::events::{binding_for, InputBinding, InputKind, PointerEvent, PointerKind, RawInput};
use crate::frame::{Frame, Renderer};
use crate::fsm::StateMachine;
use crate::geometry::{Point, Size};
use crate::grid::{Grid, GridKey};
use crate::hit::HitTester;
use crate::lockout::{substitute_seconds, CountdownStep, LockoutTimer};
use crate::policy::{ErrorPolicy, FixedTitle, RejectAll, SuccessPolicy, Validator};
use crate::recorder::PathRecorder;

/// Interaction phase of the widget
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LockPhase {
    /// Waiting for a gesture
    #[default]
    Idle,
    /// Pointer is down and cells are being collected
    Drawing,
    /// A finished pattern is with the validator
    Validating,
    /// Attempts are rejected until the countdown expires
    Locked,
}

/// Inputs to the phase machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LockEvent {
    PointerDown,
    PointerMove,
    /// Release with nothing selected
    Dismiss,
    /// Release with a pattern to validate
    Release,
    Accept,
    Reject,
    Lock,
    Unlock,
    /// Drawing interrupted by reset, resize or a cancelled gesture
    Abort,
}

fn phase_machine() -> StateMachine<LockPhase, LockEvent> {
    use LockEvent::*;
    use LockPhase::*;

    StateMachine::builder(Idle)
        .on(Idle, PointerDown, Drawing)
        .on(Drawing, PointerDown, Drawing)
        .on(Drawing, PointerMove, Drawing)
        .on(Drawing, Dismiss, Idle)
        .on(Drawing, Abort, Idle)
        .on(Drawing, Release, Validating)
        .on(Validating, Accept, Idle)
        .on(Validating, Reject, Idle)
        .on(Validating, Lock, Locked)
        .on(Idle, Lock, Locked)
        .on(Locked, Lock, Locked)
        .on(Locked, Unlock, Idle)
        .build()
}

/// Failure bookkeeping
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LockState {
    pub is_locked: bool,
    /// Rejections since the last lockout expired
    pub failure_count: u32,
    pub remaining_seconds: u32,
}

/// What an input or tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (locked, or not applicable in this phase)
    Ignored,
    /// A new attempt began
    Started,
    /// The pointer moved; `added` cells joined the path
    Traced { added: usize },
    /// Released without selecting anything; the validator was not called
    Dismissed,
    /// An in-progress attempt was thrown away
    Aborted,
    /// The validator accepted the pattern
    Unlocked,
    /// The validator rejected the pattern
    Rejected {
        failures: u32,
        /// Lockout length, if one started
        lockout: Option<u32>,
    },
    /// The lockout countdown advanced
    CountingDown { remaining: u32 },
    /// The lockout ended
    LockoutExpired,
}

/// Builder for [`GestureLock`]
pub struct GestureLockBuilder {
    config: LockConfig,
    input: InputKind,
    validator: Option<Box<dyn Validator>>,
    error_policy: Option<Box<dyn ErrorPolicy>>,
    success_policy: Option<Box<dyn SuccessPolicy>>,
}

impl GestureLockBuilder {
    pub fn new(config: LockConfig) -> Self {
        Self {
            config,
            input: InputKind::default(),
            validator: None,
            error_policy: None,
            success_policy: None,
        }
    }

    /// Device class used to translate [`RawInput`]
    pub fn input(mut self, input: InputKind) -> Self {
        self.input = input;
        self
    }

    pub fn validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn on_error<P: ErrorPolicy + 'static>(mut self, policy: P) -> Self {
        self.error_policy = Some(Box::new(policy));
        self
    }

    pub fn on_success<P: SuccessPolicy + 'static>(mut self, policy: P) -> Self {
        self.success_policy = Some(Box::new(policy));
        self
    }

    /// Validate the configuration, lay out the grid for `surface` and bind
    /// the renderer. Nothing is drawn until [`GestureLock::init`].
    pub fn build<R: Renderer>(self, surface: Size, renderer: R) -> Result<GestureLock<R>> {
        self.config.validate()?;
        let grid = Grid::compute(surface, self.config.circle.num, self.config.circle.offset_y)?;
        let default_title = self.config.text.title.clone();

        Ok(GestureLock {
            hit_tester: HitTester::new(self.config.hit_shape),
            title: default_title.clone(),
            surface,
            grid,
            recorder: PathRecorder::new(),
            machine: phase_machine(),
            state: LockState::default(),
            timer: LockoutTimer::new(),
            input: binding_for(self.input),
            validator: self.validator.unwrap_or_else(|| Box::new(RejectAll)),
            error_policy: self
                .error_policy
                .unwrap_or_else(|| Box::new(FixedTitle(default_title.clone()))),
            success_policy: self
                .success_policy
                .unwrap_or_else(|| Box::new(FixedTitle(default_title))),
            renderer,
            config: self.config,
        })
    }
}

/// The gesture lock widget
pub struct GestureLock<R: Renderer> {
    config: LockConfig,
    surface: Size,
    grid: Grid,
    hit_tester: HitTester,
    recorder: PathRecorder,
    machine: StateMachine<LockPhase, LockEvent>,
    state: LockState,
    timer: LockoutTimer,
    title: String,
    input: Box<dyn InputBinding>,
    validator: Box<dyn Validator>,
    error_policy: Box<dyn ErrorPolicy>,
    success_policy: Box<dyn SuccessPolicy>,
    renderer: R,
}

impl<R: Renderer> GestureLock<R> {
    /// Draw the initial frame
    pub fn init(&mut self) {
        self.render_clean();
    }

    // ========== Accessors ==========

    pub fn phase(&self) -> LockPhase {
        self.machine.current_state()
    }

    pub fn lock_state(&self) -> LockState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked
    }

    /// Title currently shown
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Cells selected so far in the current attempt
    pub fn attempt(&self) -> &[usize] {
        self.recorder.current()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Recent phase transitions as `(from, event, to)`, oldest first
    pub fn transitions(&self) -> impl Iterator<Item = &(LockPhase, LockEvent, LockPhase)> {
        self.machine.history()
    }

    // ========== Input ==========

    /// Translate platform input through the configured binding and handle it
    pub fn handle_raw(&mut self, raw: &RawInput) -> Outcome {
        match self.input.translate(raw) {
            Some(event) => self.handle(event),
            None => Outcome::Ignored,
        }
    }

    pub fn handle(&mut self, event: PointerEvent) -> Outcome {
        match event.kind {
            PointerKind::Down => self.pointer_down(event.position),
            PointerKind::Move => self.pointer_move(event.position),
            PointerKind::Up => self.pointer_up(),
            PointerKind::Cancel => self.pointer_cancel(),
        }
    }

    /// Abort the attempt without validating it; inert while locked
    pub fn pointer_cancel(&mut self) -> Outcome {
        if self.state.is_locked {
            tracing::trace!("GestureLock::pointer_cancel ignored while locked");
            return Outcome::Ignored;
        }
        self.reset()
    }

    /// Begin an attempt; restarts one already in progress
    pub fn pointer_down(&mut self, position: Point) -> Outcome {
        if self.machine.send(LockEvent::PointerDown).is_none() {
            tracing::trace!("GestureLock::pointer_down ignored in {:?}", self.phase());
            return Outcome::Ignored;
        }

        self.recorder.reset();
        self.recorder.set_pointer(position);
        tracing::debug!("GestureLock: attempt started at ({}, {})", position.x, position.y);
        self.render_clean();
        Outcome::Started
    }

    /// Extend the attempt with any unselected cell under the pointer
    pub fn pointer_move(&mut self, position: Point) -> Outcome {
        if self.machine.send(LockEvent::PointerMove).is_none() {
            return Outcome::Ignored;
        }

        self.recorder.set_pointer(position);
        let hits = self
            .hit_tester
            .hits(position, &self.grid, self.recorder.current());
        let mut added = 0;
        for index in hits {
            if self.recorder.append(index) {
                tracing::trace!("GestureLock: hit cell {}", index);
                added += 1;
            }
        }

        self.render_recorded(Some(position));
        Outcome::Traced { added }
    }

    /// Finish the attempt and score it
    pub fn pointer_up(&mut self) -> Outcome {
        if !self.machine.is_in(LockPhase::Drawing) {
            return Outcome::Ignored;
        }

        if self.recorder.is_empty() {
            self.machine.send(LockEvent::Dismiss);
            self.recorder.reset();
            self.render_clean();
            return Outcome::Dismissed;
        }

        self.machine.send(LockEvent::Release);
        let attempt = self.recorder.take();
        let normal = self.config.normal_color;
        self.render(&attempt, None, normal);

        if self.validator.validate(&attempt) {
            self.title = self.success_policy.on_success();
            self.machine.send(LockEvent::Accept);
            tracing::debug!("GestureLock: pattern accepted");
            self.render_clean();
            return Outcome::Unlocked;
        }

        self.state.failure_count += 1;
        let failures = self.state.failure_count;
        let outcome = self.error_policy.on_error(&attempt, failures);
        let accent = outcome.resolve_color(&self.config);
        let seconds = outcome.lockout_seconds();
        tracing::debug!(
            "GestureLock: pattern rejected (failure {}, lockout {}s)",
            failures,
            seconds
        );

        let lockout = if seconds > 0 {
            self.engage_lockout(&outcome.title, seconds);
            Some(seconds)
        } else {
            self.title = outcome.title;
            self.state.is_locked = false;
            self.machine.send(LockEvent::Reject);
            None
        };

        self.render(&attempt, None, accent);
        Outcome::Rejected { failures, lockout }
    }

    /// Abandon an in-progress attempt and redraw. Does not end a lockout.
    pub fn reset(&mut self) -> Outcome {
        let aborted = self.abort_attempt();
        self.render_clean();
        if aborted {
            Outcome::Aborted
        } else {
            Outcome::Ignored
        }
    }

    /// Re-lay out the grid for a new surface size
    pub fn resize(&mut self, surface: Size) -> Result<()> {
        let key = GridKey {
            surface,
            dimension: self.config.circle.num,
            offset_y: self.config.circle.offset_y,
        };
        if !self.grid.matches(&key) {
            self.grid = Grid::compute(surface, key.dimension, key.offset_y)?;
            self.surface = surface;
            self.abort_attempt();
        }
        self.render_clean();
        Ok(())
    }

    // ========== Lockout ==========

    /// Lock for `seconds`, showing `template` with `{seconds}` substituted.
    /// Supersedes a running lockout. Zero seconds does nothing.
    pub fn start_lockout(&mut self, template: &str, seconds: u32) {
        if seconds == 0 {
            return;
        }
        self.abort_attempt();
        self.engage_lockout(template, seconds);
        self.render_clean();
    }

    /// End the lockout now, as if the countdown had expired
    pub fn cancel_lockout(&mut self) -> bool {
        if !self.state.is_locked {
            return false;
        }
        self.timer.cancel();
        self.expire_lockout();
        true
    }

    /// Apply one countdown tick
    pub fn tick(&mut self) -> Outcome {
        match self.timer.tick() {
            Some(step) => self.apply_step(step),
            None => Outcome::Ignored,
        }
    }

    /// Report elapsed wall time; applies every countdown tick it covers
    pub fn advance(&mut self, dt: Duration) -> Outcome {
        let mut last = Outcome::Ignored;
        for step in self.timer.advance(dt) {
            last = self.apply_step(step);
        }
        last
    }

    fn apply_step(&mut self, step: CountdownStep) -> Outcome {
        match step {
            CountdownStep::Running { remaining, title } => {
                self.state.remaining_seconds = remaining;
                self.title = title;
                self.render_clean();
                Outcome::CountingDown { remaining }
            }
            CountdownStep::Expired => {
                self.expire_lockout();
                Outcome::LockoutExpired
            }
        }
    }

    fn engage_lockout(&mut self, template: &str, seconds: u32) {
        self.state.is_locked = true;
        self.state.remaining_seconds = seconds;
        self.title = substitute_seconds(template, seconds);
        self.timer.start(seconds, template);
        self.machine.send(LockEvent::Lock);
        tracing::debug!("GestureLock: locked for {}s", seconds);
    }

    fn expire_lockout(&mut self) {
        self.state = LockState::default();
        self.title = self.config.text.title.clone();
        self.machine.send(LockEvent::Unlock);
        tracing::debug!("GestureLock: lockout over");
        self.render_clean();
    }

    fn abort_attempt(&mut self) -> bool {
        let aborted = self.machine.send(LockEvent::Abort).is_some();
        self.recorder.reset();
        if aborted {
            tracing::debug!("GestureLock: attempt aborted");
        }
        aborted
    }

    // ========== Rendering ==========

    fn render_clean(&mut self) {
        let normal = self.config.normal_color;
        self.render(&[], None, normal);
    }

    /// Draw the path currently held by the recorder
    fn render_recorded(&mut self, live_point: Option<Point>) {
        let frame = self.compose(self.recorder.current(), live_point, self.config.normal_color);
        self.renderer.draw_frame(&frame);
    }

    fn render(&mut self, selected: &[usize], live_point: Option<Point>, accent: Color) {
        let frame = self.compose(selected, live_point, accent);
        self.renderer.draw_frame(&frame);
    }

    fn compose(&self, selected: &[usize], live_point: Option<Point>, accent: Color) -> Frame {
        Frame::compose(
            self.machine.current_state(),
            self.surface,
            &self.grid,
            selected,
            live_point,
            &self.title,
            accent,
            &self.config,
        )
    }
}
