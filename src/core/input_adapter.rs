use std::collections::HashSet;
use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};

/// Pixels per scroll line for touchpads reporting pixel deltas
const PIXELS_PER_LINE: f32 = 40.0;

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient down_keys)
    pressed_vec: Vec<Button>,
    /// Buttons that went down since the last end_frame
    pressed_this_frame: Vec<Button>,
    /// Raw mouse motion since the last end_frame
    mouse_delta: (f32, f32),
    scroll_delta: f32,
}

impl WinitController {
    /// Create a new WinitController with no pressed keys
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        match event.state {
                            ElementState::Pressed => self.press(button),
                            ElementState::Released => self.release(button),
                        }
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Relative motion arrives as device events, independent of cursor position
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse_delta.0 += delta.0 as f32;
            self.mouse_delta.1 += delta.1 as f32;
        }
    }

    /// Key repeat arrives as repeated presses; only the first one is an edge
    pub fn press(&mut self, button: Button) {
        if self.pressed_keys.insert(button) {
            self.pressed_vec.push(button);
            self.pressed_this_frame.push(button);
        }
    }

    pub fn release(&mut self, button: Button) {
        if self.pressed_keys.remove(&button) {
            self.pressed_vec.retain(|&b| b != button);
        }
    }

    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pressed_vec.clear();
    }

    /// Reset per-frame state (edges, mouse and scroll deltas)
    /// Call this at the end of each frame after processing input
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::Forward),
            KeyCode::KeyS => Some(Button::Backward),
            KeyCode::KeyA => Some(Button::Left),
            KeyCode::KeyD => Some(Button::Right),
            KeyCode::Space => Some(Button::Up),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Down),
            KeyCode::KeyC => Some(Button::ToggleLights),
            KeyCode::KeyV => Some(Button::ToggleFan),
            KeyCode::KeyB => Some(Button::ToggleProjector),
            KeyCode::KeyZ => Some(Button::ToggleDoor),
            KeyCode::Tab => Some(Button::ReleaseCursor),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }

    fn just_pressed(&self, button: Button) -> bool {
        self.pressed_this_frame.contains(&button)
    }

    fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }
}
