//! Per-frame control input
//!
//! Device polling lives outside the core. Whatever polls the keyboard answers
//! `InputSource` queries and the session only ever sees a `TickInput`.

/// Logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Fire,
}

impl Control {
    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Query interface over an input device
pub trait InputSource {
    /// Control is held down this frame (level-triggered)
    fn is_held(&self, control: Control) -> bool;
    /// Control went down this frame (edge-triggered)
    fn is_pressed(&self, control: Control) -> bool;
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Fire pressed this frame
    pub fire: bool,
}

impl TickInput {
    /// Read movement/turning as held and fire as pressed
    pub fn sample(source: &impl InputSource) -> Self {
        Self {
            forward: source.is_held(Control::Forward),
            backward: source.is_held(Control::Backward),
            turn_left: source.is_held(Control::TurnLeft),
            turn_right: source.is_held(Control::TurnRight),
            fire: source.is_pressed(Control::Fire),
        }
    }

    /// Thrust scalar. Forward wins over backward.
    pub fn acceleration(&self) -> f32 {
        if self.forward {
            1.0
        } else if self.backward {
            -1.0
        } else {
            0.0
        }
    }

    /// Rotation scalar (+1 counter-clockwise). Right wins over left.
    pub fn rotation(&self) -> f32 {
        if self.turn_right {
            -1.0
        } else if self.turn_left {
            1.0
        } else {
            0.0
        }
    }
}

/// Plain held/pressed state, filled in by a frontend or a script
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    held: [bool; 5],
    pressed: [bool; 5],
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a control as going down this frame (also held)
    pub fn press(&mut self, control: Control) {
        if !self.held[control.index()] {
            self.pressed[control.index()] = true;
        }
        self.held[control.index()] = true;
    }

    pub fn release(&mut self, control: Control) {
        self.held[control.index()] = false;
        self.pressed[control.index()] = false;
    }

    /// Clear edge-triggered state; call once per frame after sampling
    pub fn end_frame(&mut self) {
        self.pressed = [false; 5];
    }
}

impl InputSource for ControlState {
    fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    fn is_pressed(&self, control: Control) -> bool {
        self.pressed[control.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_held_and_pressed() {
        let mut controls = ControlState::new();
        controls.press(Control::Forward);
        controls.press(Control::Fire);

        let input = TickInput::sample(&controls);
        assert!(input.forward);
        assert!(input.fire);
        assert_eq!(input.acceleration(), 1.0);

        // Fire is edge-triggered: holding it does not re-fire
        controls.end_frame();
        controls.press(Control::Fire);
        let input = TickInput::sample(&controls);
        assert!(input.forward);
        assert!(!input.fire);
    }

    #[test]
    fn test_rotation_sign() {
        let left = TickInput {
            turn_left: true,
            ..Default::default()
        };
        let right = TickInput {
            turn_right: true,
            ..Default::default()
        };
        assert_eq!(left.rotation(), 1.0);
        assert_eq!(right.rotation(), -1.0);
        assert_eq!(TickInput::default().rotation(), 0.0);
    }

    #[test]
    fn test_backward_thrust() {
        let input = TickInput {
            backward: true,
            ..Default::default()
        };
        assert_eq!(input.acceleration(), -1.0);
    }
}
