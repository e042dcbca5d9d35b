//! Collaborator contracts
//!
//! The widget decides nothing about whether a pattern is correct or what
//! to tell the user; it asks these collaborators. They are called
//! synchronously from inside input handling and must not call back into
//! the widget. A panic inside a collaborator propagates to the caller.

use crate::color::Color;
use crate::config::LockConfig;
use crate::error::Result;

/// Decides whether a finished pattern is correct
pub trait Validator {
    fn validate(&mut self, attempt: &[usize]) -> bool;
}

impl<F> Validator for F
where
    F: FnMut(&[usize]) -> bool,
{
    fn validate(&mut self, attempt: &[usize]) -> bool {
        self(attempt)
    }
}

/// Reacts to a rejected pattern
pub trait ErrorPolicy {
    /// `failures` already counts this attempt
    fn on_error(&mut self, attempt: &[usize], failures: u32) -> ErrorOutcome;
}

impl<F> ErrorPolicy for F
where
    F: FnMut(&[usize], u32) -> ErrorOutcome,
{
    fn on_error(&mut self, attempt: &[usize], failures: u32) -> ErrorOutcome {
        self(attempt, failures)
    }
}

/// Reacts to an accepted pattern; returns the title to show next
pub trait SuccessPolicy {
    fn on_success(&mut self) -> String;
}

impl<F> SuccessPolicy for F
where
    F: FnMut() -> String,
{
    fn on_success(&mut self) -> String {
        self()
    }
}

/// Color override for the failure frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleOverride {
    /// Use the configured normal color
    Normal,
    /// Use an explicit color
    Color(Color),
}

impl StyleOverride {
    /// Parse `"normal"` or a color token
    pub fn parse(token: &str) -> Result<Self> {
        if token.trim().eq_ignore_ascii_case("normal") {
            return Ok(StyleOverride::Normal);
        }
        Color::parse(token).map(StyleOverride::Color)
    }
}

/// What the error policy wants shown after a rejection
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorOutcome {
    /// New title; may contain a `{seconds}` marker
    pub title: String,
    /// Lockout duration; `None` or `Some(0)` means no lockout
    pub seconds: Option<u32>,
    /// Failure color; `None` means the configured error color
    pub style: Option<StyleOverride>,
}

impl ErrorOutcome {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            seconds: None,
            style: None,
        }
    }

    pub fn with_lockout(mut self, seconds: u32) -> Self {
        self.seconds = Some(seconds);
        self
    }

    pub fn with_style(mut self, style: StyleOverride) -> Self {
        self.style = Some(style);
        self
    }

    /// Lockout length, zero when none was requested
    pub fn lockout_seconds(&self) -> u32 {
        self.seconds.unwrap_or(0)
    }

    /// Color the failed path is drawn in
    pub fn resolve_color(&self, config: &LockConfig) -> Color {
        match self.style {
            Some(StyleOverride::Normal) => config.normal_color,
            Some(StyleOverride::Color(color)) => color,
            None => config.error_color,
        }
    }
}

/// Rejects every pattern
pub(crate) struct RejectAll;

impl Validator for RejectAll {
    fn validate(&mut self, _attempt: &[usize]) -> bool {
        false
    }
}

/// Shows a fixed title and never locks
pub(crate) struct FixedTitle(pub(crate) String);

impl ErrorPolicy for FixedTitle {
    fn on_error(&mut self, _attempt: &[usize], _failures: u32) -> ErrorOutcome {
        ErrorOutcome::new(self.0.clone())
    }
}

impl SuccessPolicy for FixedTitle {
    fn on_success(&mut self) -> String {
        self.0.clone()
    }
}
