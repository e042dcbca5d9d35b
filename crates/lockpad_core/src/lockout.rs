//! Lockout countdown
//!
//! A cancellable one-second countdown. Each tick decrements the remaining
//! seconds; the tick that reaches zero expires the lockout. Only one
//! countdown is active at a time: starting a new one cancels the previous
//! task in the scheduler, so a superseded countdown cannot keep ticking.

use std::time::Duration;

use smallvec::SmallVec;

use crate::scheduler::{TaskId, TickScheduler};

/// Interval between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Placeholder replaced by the remaining seconds in title templates
pub const SECONDS_PLACEHOLDER: &str = "{seconds}";

/// Result of one countdown tick
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CountdownStep {
    /// Still locked; `title` is the template with `remaining` substituted
    Running { remaining: u32, title: String },
    /// Lockout over
    Expired,
}

struct Countdown {
    task: TaskId,
    remaining: u32,
    template: String,
}

#[derive(Default)]
pub struct LockoutTimer {
    scheduler: TickScheduler,
    active: Option<Countdown>,
}

impl LockoutTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a countdown of `seconds`, superseding any active one
    pub fn start(&mut self, seconds: u32, template: impl Into<String>) -> TaskId {
        self.cancel();
        let task = self.scheduler.schedule(TICK_PERIOD);
        self.active = Some(Countdown {
            task,
            remaining: seconds,
            template: template.into(),
        });
        tracing::debug!("LockoutTimer::start - {}s", seconds);
        task
    }

    /// Stop the active countdown. Returns `false` if none was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(countdown) => {
                self.scheduler.cancel(countdown.task);
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Handle of the active countdown's scheduled task
    pub fn task(&self) -> Option<TaskId> {
        self.active.as_ref().map(|c| c.task)
    }

    pub fn remaining(&self) -> Option<u32> {
        self.active.as_ref().map(|c| c.remaining)
    }

    /// Apply one tick to the active countdown
    pub fn tick(&mut self) -> Option<CountdownStep> {
        let countdown = self.active.as_mut()?;
        countdown.remaining = countdown.remaining.saturating_sub(1);

        if countdown.remaining == 0 {
            self.cancel();
            tracing::debug!("LockoutTimer::tick - expired");
            return Some(CountdownStep::Expired);
        }

        tracing::trace!("LockoutTimer::tick - {}s left", countdown.remaining);
        Some(CountdownStep::Running {
            remaining: countdown.remaining,
            title: substitute_seconds(&countdown.template, countdown.remaining),
        })
    }

    /// Feed elapsed time and apply the ticks it produces, oldest first
    pub fn advance(&mut self, dt: Duration) -> SmallVec<[CountdownStep; 2]> {
        let mut steps = SmallVec::new();
        let fired = self.scheduler.advance(dt);
        let Some(active) = self.task() else {
            return steps;
        };

        for (task, count) in fired {
            if task != active {
                continue;
            }
            for _ in 0..count {
                match self.tick() {
                    Some(step @ CountdownStep::Expired) => {
                        steps.push(step);
                        return steps;
                    }
                    Some(step) => steps.push(step),
                    None => return steps,
                }
            }
        }
        steps
    }
}

/// Replace the first `{seconds}` marker (ASCII case-insensitive) in `template`
pub fn substitute_seconds(template: &str, seconds: u32) -> String {
    let lowered = template.to_ascii_lowercase();
    match lowered.find(SECONDS_PLACEHOLDER) {
        Some(start) => {
            let end = start + SECONDS_PLACEHOLDER.len();
            format!("{}{}{}", &template[..start], seconds, &template[end..])
        }
        None => template.to_string(),
    }
}
