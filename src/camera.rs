use glam::{Mat4, Vec3};

use crate::config::CameraConfig;
use crate::core::{Button, Controller};

/// Pitch limit, just short of straight up/down
const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;
const MIN_FOV_DEGREES: f32 = 1.0;
const MAX_FOV_DEGREES: f32 = 45.0;

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementState {
    const fn to_direction(positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    const fn velocity(&self) -> (f32, f32, f32) {
        (
            Self::to_direction(self.forward, self.backward),
            Self::to_direction(self.right, self.left),
            Self::to_direction(self.up, self.down),
        )
    }

    pub fn from_controller(controller: &impl Controller) -> Self {
        Self {
            forward: controller.is_down(Button::Forward),
            backward: controller.is_down(Button::Backward),
            left: controller.is_down(Button::Left),
            right: controller.is_down(Button::Right),
            up: controller.is_down(Button::Up),
            down: controller.is_down(Button::Down),
        }
    }
}

/// Fly camera with mouse look
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    /// Radians; PI looks down -Z
    pub yaw: f32,
    /// Radians, clamped to +/- 89 degrees
    pub pitch: f32,
    pub fov_degrees: f32,
    pub movement: MovementState,
    speed: f32,
    sensitivity: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            yaw: config.yaw,
            pitch: config.pitch.clamp(-MAX_PITCH, MAX_PITCH),
            fov_degrees: config.fov_degrees.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES),
            movement: MovementState::default(),
            speed: config.speed,
            sensitivity: config.sensitivity,
            near: config.near,
            far: config.far,
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Turn by a mouse delta; positive x looks right, positive y looks down
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.sensitivity;
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Scroll up narrows the field of view
    pub fn zoom(&mut self, lines: f32) {
        self.fov_degrees = (self.fov_degrees - lines).clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
    }

    /// Move along the view axes for `delta` seconds; vertical motion is world-up
    pub fn update(&mut self, delta: f32) {
        let (fwd, right_dir, up_dir) = self.movement.velocity();
        let step = self.speed * delta;

        self.position += self.forward() * fwd * step
            + self.right() * right_dir * step
            + Vec3::Y * up_dir * step;
    }

    /// Apply one frame of controller input
    pub fn apply_input(&mut self, controller: &impl Controller, delta: f32, look_enabled: bool) {
        self.movement = MovementState::from_controller(controller);
        if look_enabled {
            let (dx, dy) = controller.mouse_delta();
            self.look(dx, dy);
        }
        self.zoom(controller.scroll_delta());
        self.update(delta);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}
