//! Pointer, touch and wheel events delivered by the host.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Modifier keys held during a pointer press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    /// Space bar held, the usual hand-tool chord in painting apps.
    pub space: bool,
}

impl Modifiers {
    /// Whether this chord turns a drag into a pan.
    pub fn pans(&self) -> bool {
        self.alt || self.space
    }
}

/// Raw input in screen (device) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown {
        position: Point,
        #[serde(default)]
        button: MouseButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        position: Point,
    },
    PointerUp {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    /// Touches currently on the surface after a finger went down.
    TouchStart {
        touches: Vec<Point>,
    },
    /// Positions of the active touches.
    TouchMove {
        touches: Vec<Point>,
    },
    /// Touches still on the surface after a finger lifted.
    TouchEnd {
        touches: Vec<Point>,
    },
    Wheel {
        position: Point,
        delta: Vec2,
    },
}

impl InputEvent {
    /// Left-button press without modifiers.
    pub fn down(x: f64, y: f64) -> Self {
        InputEvent::PointerDown {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        InputEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    /// Left-button release.
    pub fn up(x: f64, y: f64) -> Self {
        InputEvent::PointerUp {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_modifiers() {
        assert!(!Modifiers::default().pans());
        assert!(Modifiers { alt: true, ..Default::default() }.pans());
        assert!(Modifiers { space: true, ..Default::default() }.pans());
        assert!(!Modifiers { shift: true, ..Default::default() }.pans());
    }

    #[test]
    fn test_pointer_down_defaults_from_json() {
        let event: InputEvent =
            serde_json::from_str(r#"{ "PointerDown": { "position": { "x": 1.0, "y": 2.0 } } }"#).unwrap();
        assert_eq!(event, InputEvent::down(1.0, 2.0));
    }
}
