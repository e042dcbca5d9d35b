//! Lockpad Core
//!
//! The logic behind an on-screen pattern lock: an `n × n` grid of targets on
//! which the user traces a path, scored by an external validator, with a
//! timed lockout after failures.
//!
//! - **Grid layout**: cell centers and capture radius from the surface size
//! - **Hit testing**: which unselected cells lie under the pointer
//! - **Path recording**: the ordered, duplicate-free selection
//! - **Phase machine**: Idle / Drawing / Validating / Locked transitions
//! - **Lockout countdown**: cancellable one-second ticks
//! - **Frames**: renderer-agnostic descriptions of what to draw
//!
//! Painting, raw platform input and the decision whether a pattern is
//! correct are supplied by the host through [`Renderer`], [`InputBinding`]
//! and the policy traits.
//!
//! # Example
//!
//! ```rust
//! use lockpad_core::{
//!     ErrorOutcome, Frame, GestureLockBuilder, LockConfig, LockPhase, Outcome, PointerEvent, Size,
//! };
//!
//! let mut lock = GestureLockBuilder::new(LockConfig::default())
//!     .validator(|attempt: &[usize]| attempt == [0, 1, 2])
//!     .on_error(|_: &[usize], failures: u32| {
//!         ErrorOutcome::new("Locked for {seconds}s").with_lockout(failures * 2)
//!     })
//!     .on_success(|| "Welcome".to_string())
//!     .build(Size::new(280.0, 600.0), |_frame: &Frame| {})
//!     .unwrap();
//! lock.init();
//!
//! // Cells of the top row sit at y = 3r + offset_y = 260
//! lock.handle(PointerEvent::down(60.0, 260.0));
//! lock.handle(PointerEvent::moved(60.0, 260.0));
//! lock.handle(PointerEvent::moved(140.0, 260.0));
//! lock.handle(PointerEvent::moved(220.0, 260.0));
//! assert_eq!(lock.attempt(), &[0, 1, 2]);
//!
//! assert_eq!(lock.handle(PointerEvent::up(220.0, 260.0)), Outcome::Unlocked);
//! assert_eq!(lock.title(), "Welcome");
//! assert_eq!(lock.phase(), LockPhase::Idle);
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod events;
pub mod frame;
pub mod fsm;
pub mod geometry;
pub mod grid;
pub mod hit;
pub mod lock;
pub mod lockout;
pub mod policy;
pub mod recorder;
pub mod scheduler;

pub use color::Color;
pub use config::{HitShape, LockConfig, PartialLockConfig};
pub use error::{ConfigError, Result};
pub use events::{InputBinding, InputKind, PointerEvent, PointerKind, RawInput};
pub use frame::{CellFrame, CellMark, Frame, Renderer, TitleAnchor, TitleFrame};
pub use fsm::StateMachine;
pub use geometry::{Point, Size};
pub use grid::{Cell, Grid};
pub use hit::HitTester;
pub use lock::{GestureLock, GestureLockBuilder, LockEvent, LockPhase, LockState, Outcome};
pub use lockout::{CountdownStep, LockoutTimer};
pub use policy::{ErrorOutcome, ErrorPolicy, StyleOverride, SuccessPolicy, Validator};
pub use recorder::PathRecorder;
pub use scheduler::{TaskId, TickScheduler};
