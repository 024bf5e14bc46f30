/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    ToggleLights,
    ToggleFan,
    ToggleProjector,
    ToggleDoor,
    ReleaseCursor,
    Escape,
}

impl Button {
    pub const ALL: [Button; 12] = [
        Button::Forward,
        Button::Backward,
        Button::Left,
        Button::Right,
        Button::Up,
        Button::Down,
        Button::ToggleLights,
        Button::ToggleFan,
        Button::ToggleProjector,
        Button::ToggleDoor,
        Button::ReleaseCursor,
        Button::Escape,
    ];
}

/// Controller - button state plus press edges for the current frame
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn down_keys(&self) -> &[Button];

    /// True only on the frame the button went down
    fn just_pressed(&self, button: Button) -> bool;

    /// Mouse movement since the last frame, in device units
    fn mouse_delta(&self) -> (f32, f32);

    /// Scroll wheel lines since the last frame
    fn scroll_delta(&self) -> f32;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Scripted controller for driving state updates in tests
    #[derive(Default)]
    pub(crate) struct MockController {
        pub pressed: Vec<Button>,
        pub edges: Vec<Button>,
        pub mouse: (f32, f32),
        pub scroll: f32,
    }

    impl Controller for MockController {
        fn is_down(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }

        fn down_keys(&self) -> &[Button] {
            &self.pressed
        }

        fn just_pressed(&self, button: Button) -> bool {
            self.edges.contains(&button)
        }

        fn mouse_delta(&self) -> (f32, f32) {
            self.mouse
        }

        fn scroll_delta(&self) -> f32 {
            self.scroll
        }
    }

    #[test]
    fn test_all_button_variants_unique() {
        let set: HashSet<_> = Button::ALL.iter().collect();
        assert_eq!(set.len(), Button::ALL.len());
    }

    #[test]
    fn test_controller_is_down() {
        let controller = MockController {
            pressed: vec![Button::Forward, Button::Up],
            ..Default::default()
        };

        assert!(controller.is_down(Button::Forward));
        assert!(controller.is_down(Button::Up));
        assert!(!controller.is_down(Button::Left));
        assert_eq!(controller.down_keys().len(), 2);
    }

    #[test]
    fn test_held_key_is_not_an_edge() {
        let controller = MockController {
            pressed: vec![Button::ToggleFan],
            ..Default::default()
        };

        assert!(controller.is_down(Button::ToggleFan));
        assert!(!controller.just_pressed(Button::ToggleFan));
    }
}
