use glam::Vec3;

use crate::animation::{Motion, ObjectAnimator, Swing};
use crate::config::SceneConfig;
use crate::core::{Button, Controller};
use crate::frame::FrameInfo;

/// Interactive state that changes between frames
#[derive(Debug, Clone)]
pub struct SceneState {
    pub lights_on: bool,
    pub fan_on: bool,
    pub projector_on: bool,
    pub door_open: bool,
    /// Degrees in 0..360
    fan_angle: f32,
    /// Revolutions per second while running
    fan_speed: f32,
    door: Swing,
    sun: ObjectAnimator,
}

impl SceneState {
    pub fn new(config: &SceneConfig) -> Self {
        let lighting = &config.lighting;
        let mut sun = ObjectAnimator::new(lighting.sun_start)
            .with_motion(Motion::Circular)
            .with_center(lighting.sun_center)
            .with_radius(lighting.sun_radius)
            .with_speed(lighting.sun_speed)
            .with_axis(Vec3::Z);
        sun.update(0.0);

        Self {
            lights_on: false,
            fan_on: false,
            projector_on: false,
            door_open: false,
            fan_angle: 0.0,
            fan_speed: config.fan.speed,
            door: Swing::new(config.door.swing_seconds),
            sun,
        }
    }

    /// Flip a toggle for every key that went down this frame
    pub fn apply_input(&mut self, controller: &impl Controller) {
        if controller.just_pressed(Button::ToggleLights) {
            self.lights_on = !self.lights_on;
            log::info!("Lights {}", on_off(self.lights_on));
        }
        if controller.just_pressed(Button::ToggleFan) {
            self.fan_on = !self.fan_on;
            log::info!("Fan {}", on_off(self.fan_on));
        }
        if controller.just_pressed(Button::ToggleProjector) {
            self.projector_on = !self.projector_on;
            log::info!("Projector {}", on_off(self.projector_on));
        }
        if controller.just_pressed(Button::ToggleDoor) {
            self.door_open = !self.door_open;
            log::info!("Door {}", if self.door_open { "opening" } else { "closing" });
        }
    }

    pub fn update(&mut self, frame: &FrameInfo) {
        if self.fan_on {
            self.fan_angle = (self.fan_angle + frame.delta * self.fan_speed * 360.0).rem_euclid(360.0);
        }
        self.door.update(self.door_open, frame.delta);
        self.sun.update(frame.time);
    }

    pub fn fan_angle(&self) -> f32 {
        self.fan_angle
    }

    /// Eased door openness in 0..=1
    pub fn door_openness(&self) -> f32 {
        self.door.eased()
    }

    pub fn sun_position(&self) -> Vec3 {
        self.sun.position()
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::tests::MockController;

    fn state() -> SceneState {
        SceneState::new(&SceneConfig::default())
    }

    fn pressing(button: Button) -> MockController {
        MockController {
            pressed: vec![button],
            edges: vec![button],
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_toggles() {
        let state = state();
        assert!(!state.lights_on);
        assert!(!state.fan_on);
        assert!(!state.projector_on);
        assert!(!state.door_open);
        assert_eq!(state.door_openness(), 0.0);
    }

    #[test]
    fn test_press_edge_flips_toggle_once() {
        let mut state = state();
        state.apply_input(&pressing(Button::ToggleLights));
        assert!(state.lights_on);

        let held = MockController {
            pressed: vec![Button::ToggleLights],
            ..Default::default()
        };
        state.apply_input(&held);
        assert!(state.lights_on);
    }

    #[test]
    fn test_fan_spins_only_while_on() {
        let mut state = state();
        state.update(&FrameInfo::new(0, 0.1, 0.1));
        assert_eq!(state.fan_angle(), 0.0);

        state.apply_input(&pressing(Button::ToggleFan));
        state.update(&FrameInfo::new(1, 0.2, 0.1));
        let spun = state.fan_angle();
        assert!((spun - 72.0).abs() < 1e-3);

        state.apply_input(&pressing(Button::ToggleFan));
        state.update(&FrameInfo::new(2, 0.3, 0.1));
        assert_eq!(state.fan_angle(), spun);
    }

    #[test]
    fn test_fan_angle_wraps() {
        let mut state = state();
        state.fan_on = true;
        for i in 0..20 {
            state.update(&FrameInfo::new(i, i as f32 * 0.1, 0.1));
        }
        assert!((0.0..360.0).contains(&state.fan_angle()));
    }

    #[test]
    fn test_door_swings_over_configured_time() {
        let mut state = state();
        state.apply_input(&pressing(Button::ToggleDoor));
        state.update(&FrameInfo::new(0, 0.3, 0.3));
        let half = state.door_openness();
        assert!(half > 0.0 && half < 1.0);

        state.update(&FrameInfo::new(1, 0.6, 0.3));
        assert!((state.door_openness() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sun_circles_above_horizon() {
        let mut state = state();
        let config = SceneConfig::default();
        state.update(&FrameInfo::new(0, 0.0, 0.0));
        let start = state.sun_position();
        assert!((start - Vec3::new(15.0, 40.0, -50.0)).length() < 1e-4);

        state.update(&FrameInfo::new(1, 5.0, 0.016));
        let later = state.sun_position();
        let offset = later - config.lighting.sun_center;
        assert!((Vec3::new(offset.x, 0.0, offset.z).length() - config.lighting.sun_radius).abs() < 1e-3);
    }
}
