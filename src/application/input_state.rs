/// Logical inputs the sandbox reacts to, independent of physical keys.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LogicalInput {
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    StartSimulation,
}

/// The one pan direction honoured in a frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    /// Offset `(dx, dy)` applied to an entity's home position.
    ///
    /// The world moves opposite to the view: panning up shifts entities down.
    pub const fn offset(self, step: i32) -> (i32, i32) {
        match self {
            PanDirection::Up => (0, step),
            PanDirection::Down => (0, -step),
            PanDirection::Left => (step, 0),
            PanDirection::Right => (-step, 0),
        }
    }
}

/// Held state of every logical input.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct InputState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    started: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release. `StartSimulation` latches: once pressed,
    /// releasing it has no effect.
    pub fn set_key(&mut self, input: LogicalInput, pressed: bool) {
        match input {
            LogicalInput::PanUp => self.up = pressed,
            LogicalInput::PanDown => self.down = pressed,
            LogicalInput::PanLeft => self.left = pressed,
            LogicalInput::PanRight => self.right = pressed,
            LogicalInput::StartSimulation => self.started |= pressed,
        }
    }

    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// First held direction in priority Up > Down > Left > Right.
    pub fn pan_direction(&self) -> Option<PanDirection> {
        [
            (self.up, PanDirection::Up),
            (self.down, PanDirection::Down),
            (self.left, PanDirection::Left),
            (self.right, PanDirection::Right),
        ]
        .into_iter()
        .find_map(|(held, dir)| held.then_some(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_sticky() {
        let mut input = InputState::new();
        input.set_key(LogicalInput::StartSimulation, true);
        input.set_key(LogicalInput::StartSimulation, false);
        assert!(input.is_started());
    }

    #[test]
    fn test_release_before_start_keeps_stopped() {
        let mut input = InputState::new();
        input.set_key(LogicalInput::StartSimulation, false);
        assert!(!input.is_started());
    }

    #[test]
    fn test_pan_priority() {
        let mut input = InputState::new();
        assert_eq!(input.pan_direction(), None);

        input.set_key(LogicalInput::PanRight, true);
        assert_eq!(input.pan_direction(), Some(PanDirection::Right));
        input.set_key(LogicalInput::PanLeft, true);
        assert_eq!(input.pan_direction(), Some(PanDirection::Left));
        input.set_key(LogicalInput::PanDown, true);
        assert_eq!(input.pan_direction(), Some(PanDirection::Down));
        input.set_key(LogicalInput::PanUp, true);
        assert_eq!(input.pan_direction(), Some(PanDirection::Up));

        input.set_key(LogicalInput::PanUp, false);
        assert_eq!(input.pan_direction(), Some(PanDirection::Down));
    }

    #[test]
    fn test_offsets() {
        assert_eq!(PanDirection::Up.offset(10), (0, 10));
        assert_eq!(PanDirection::Down.offset(10), (0, -10));
        assert_eq!(PanDirection::Left.offset(10), (10, 0));
        assert_eq!(PanDirection::Right.offset(10), (-10, 0));
    }
}
