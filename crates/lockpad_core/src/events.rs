//! Pointer input
//!
//! The widget consumes normalized [`PointerEvent`]s in surface coordinates.
//! Raw platform input is translated by an [`InputBinding`] chosen once, at
//! construction, from the device class the host reports.

use serde::Deserialize;
use smallvec::SmallVec;

use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// The platform abandoned the gesture (e.g. touch cancel)
    Cancel,
}

/// A normalized pointer event, relative to the surface origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub const fn new(kind: PointerKind, position: Point) -> Self {
        Self { kind, position }
    }

    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, Point::new(x, y))
    }

    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y))
    }

    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, Point::new(x, y))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MousePhase {
    Down,
    Move,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Raw input as delivered by the platform layer
#[derive(Clone, Debug, PartialEq)]
pub enum RawInput {
    /// Mouse event; `offset` is already relative to the surface
    Mouse { phase: MousePhase, offset: Point },
    /// Touch event; `touches` are client coordinates of the active touch
    /// points, `surface_origin` is the surface's client-space top-left
    Touch {
        phase: TouchPhase,
        touches: SmallVec<[Point; 2]>,
        surface_origin: Point,
    },
}

/// Device class the host runs on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Mouse,
    Touch,
}

/// Translates raw platform input into pointer events
pub trait InputBinding {
    fn translate(&mut self, raw: &RawInput) -> Option<PointerEvent>;
}

/// Build the binding for a device class
pub fn binding_for(kind: InputKind) -> Box<dyn InputBinding> {
    match kind {
        InputKind::Mouse => Box::new(MouseBinding::default()),
        InputKind::Touch => Box::new(TouchBinding::default()),
    }
}

/// Mouse input: moves only count while the button is held
#[derive(Debug, Default)]
pub struct MouseBinding {
    pressed: bool,
}

impl InputBinding for MouseBinding {
    fn translate(&mut self, raw: &RawInput) -> Option<PointerEvent> {
        let RawInput::Mouse { phase, offset } = *raw else {
            return None;
        };
        match phase {
            MousePhase::Down => {
                self.pressed = true;
                Some(PointerEvent::new(PointerKind::Down, offset))
            }
            MousePhase::Move if self.pressed => Some(PointerEvent::new(PointerKind::Move, offset)),
            MousePhase::Move => None,
            MousePhase::Up => {
                self.pressed = false;
                Some(PointerEvent::new(PointerKind::Up, offset))
            }
        }
    }
}

/// Touch input: the first touch point drives the gesture
#[derive(Debug, Default)]
pub struct TouchBinding {
    last: Option<Point>,
}

impl InputBinding for TouchBinding {
    fn translate(&mut self, raw: &RawInput) -> Option<PointerEvent> {
        let RawInput::Touch {
            phase,
            touches,
            surface_origin,
        } = raw
        else {
            return None;
        };
        let primary = touches.first().map(|&client| client - *surface_origin);

        match phase {
            TouchPhase::Start => {
                let position = primary?;
                self.last = Some(position);
                Some(PointerEvent::new(PointerKind::Down, position))
            }
            TouchPhase::Move => {
                // No start seen; nothing to continue
                self.last?;
                let position = primary?;
                self.last = Some(position);
                Some(PointerEvent::new(PointerKind::Move, position))
            }
            TouchPhase::End => {
                let position = self.last.take()?;
                Some(PointerEvent::new(PointerKind::Up, position))
            }
            TouchPhase::Cancel => {
                let position = self.last.take()?;
                Some(PointerEvent::new(PointerKind::Cancel, position))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn mouse(phase: MousePhase, x: f32, y: f32) -> RawInput {
        RawInput::Mouse {
            phase,
            offset: Point::new(x, y),
        }
    }

    fn touch(phase: TouchPhase, points: &[(f32, f32)]) -> RawInput {
        RawInput::Touch {
            phase,
            touches: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            surface_origin: Point::new(10.0, 50.0),
        }
    }

    #[test]
    fn test_mouse_moves_require_button() {
        let mut binding = MouseBinding::default();
        assert_eq!(binding.translate(&mouse(MousePhase::Move, 5.0, 5.0)), None);

        let down = binding.translate(&mouse(MousePhase::Down, 5.0, 6.0)).unwrap();
        assert_eq!(down, PointerEvent::down(5.0, 6.0));
        let moved = binding.translate(&mouse(MousePhase::Move, 7.0, 8.0)).unwrap();
        assert_eq!(moved.kind, PointerKind::Move);

        binding.translate(&mouse(MousePhase::Up, 7.0, 8.0));
        assert_eq!(binding.translate(&mouse(MousePhase::Move, 9.0, 9.0)), None);
    }

    #[test]
    fn test_touch_positions_are_surface_relative() {
        let mut binding = TouchBinding::default();
        let down = binding
            .translate(&touch(TouchPhase::Start, &[(110.0, 150.0), (0.0, 0.0)]))
            .unwrap();
        assert_eq!(down, PointerEvent::down(100.0, 100.0));

        let moved = binding
            .translate(&touch(TouchPhase::Move, &[(30.0, 70.0)]))
            .unwrap();
        assert_eq!(moved, PointerEvent::moved(20.0, 20.0));

        let up = binding.translate(&touch(TouchPhase::End, &[])).unwrap();
        assert_eq!(up, PointerEvent::up(20.0, 20.0));
    }

    #[test]
    fn test_touch_cancel_and_stray_moves() {
        let mut binding = TouchBinding::default();
        assert_eq!(binding.translate(&touch(TouchPhase::Move, &[(1.0, 1.0)])), None);
        assert_eq!(binding.translate(&touch(TouchPhase::End, &[])), None);

        binding.translate(&touch(TouchPhase::Start, &[(10.0, 50.0)]));
        let cancel = binding.translate(&touch(TouchPhase::Cancel, &[])).unwrap();
        assert_eq!(cancel.kind, PointerKind::Cancel);
    }

    #[test]
    fn test_binding_ignores_other_device_class() {
        let mut mouse_binding = binding_for(InputKind::Mouse);
        let raw = RawInput::Touch {
            phase: TouchPhase::Start,
            touches: smallvec![Point::new(1.0, 1.0)],
            surface_origin: Point::ZERO,
        };
        assert_eq!(mouse_binding.translate(&raw), None);
    }
}
