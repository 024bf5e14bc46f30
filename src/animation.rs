// animation.rs - Time-parameterized motion for scene objects
use glam::{Quat, Vec3};
use std::fmt;
use std::sync::Arc;

/// User motion: (start position, scaled time, speed) -> position
pub type MotionFn = Arc<dyn Fn(Vec3, f32, f32) -> Vec3 + Send + Sync>;

/// Motion primitive driven by `ObjectAnimator::update`
#[derive(Clone)]
pub enum Motion {
    /// Circle of `radius` around `center` in the XZ plane
    Circular,
    /// Side to side along X, `amplitude.x` either way
    Linear,
    /// Lemniscate in the XY plane around `center`
    FigureEight,
    /// Rotation of the start offset around `axis` through `center`
    Orbit,
    /// Hops of height `amplitude.y` above the start
    Bounce,
    Custom(MotionFn),
}

impl fmt::Debug for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Motion::Circular => write!(f, "Circular"),
            Motion::Linear => write!(f, "Linear"),
            Motion::FigureEight => write!(f, "FigureEight"),
            Motion::Orbit => write!(f, "Orbit"),
            Motion::Bounce => write!(f, "Bounce"),
            Motion::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Position animator
///
/// Every call to [`ObjectAnimator::update`] recomputes the position from the
/// absolute time, so frames can be skipped or replayed without drift.
#[derive(Debug, Clone)]
pub struct ObjectAnimator {
    start: Vec3,
    current: Vec3,
    center: Vec3,
    axis: Vec3,
    amplitude: Vec3,
    radius: f32,
    speed: f32,
    enabled: bool,
    motion: Motion,
}

impl ObjectAnimator {
    pub fn new(start: Vec3) -> Self {
        Self {
            start,
            current: start,
            center: Vec3::ZERO,
            axis: Vec3::Y,
            amplitude: Vec3::ONE,
            radius: 3.0,
            speed: 1.0,
            enabled: true,
            motion: Motion::Circular,
        }
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_axis(mut self, axis: Vec3) -> Self {
        self.set_axis(axis);
        self
    }

    pub fn with_amplitude(mut self, amplitude: Vec3) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn set_motion(&mut self, motion: Motion) {
        self.motion = motion;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Stored normalized; a zero axis falls back to +Y
    pub fn set_axis(&mut self, axis: Vec3) {
        self.axis = axis.try_normalize().unwrap_or(Vec3::Y);
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn position(&self) -> Vec3 {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = self.start;
    }

    /// Recompute the position for absolute time `time` (seconds)
    pub fn update(&mut self, time: f32) -> Vec3 {
        self.current = if self.enabled {
            self.evaluate(time * self.speed)
        } else {
            self.start
        };
        self.current
    }

    fn evaluate(&self, t: f32) -> Vec3 {
        let c = self.center;
        let r = self.radius;
        match &self.motion {
            Motion::Circular => Vec3::new(c.x + r * t.cos(), c.y + self.start.y, c.z + r * t.sin()),
            Motion::Linear => self.start + Vec3::new(t.sin() * self.amplitude.x, 0.0, 0.0),
            Motion::FigureEight => Vec3::new(c.x + r * t.sin(), c.y + r * (2.0 * t).sin() * 0.5, c.z),
            Motion::Orbit => c + Quat::from_axis_angle(self.axis, t) * (self.start - c),
            Motion::Bounce => self.start + Vec3::new(0.0, t.sin().abs() * self.amplitude.y, 0.0),
            Motion::Custom(f) => f(self.start, t, self.speed),
        }
    }
}

/// Move `current` toward `target` by at most `max_step`, never overshooting
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(delta)
    }
}

/// Eased 0..1 openness that swings toward open or closed at a fixed rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swing {
    progress: f32,
    seconds_to_open: f32,
}

impl Swing {
    pub fn new(seconds_to_open: f32) -> Self {
        Self {
            progress: 0.0,
            seconds_to_open: seconds_to_open.max(f32::EPSILON),
        }
    }

    pub fn update(&mut self, open: bool, delta: f32) {
        let target = if open { 1.0 } else { 0.0 };
        self.progress = approach(self.progress, target, delta / self.seconds_to_open);
    }

    /// Linear progress in 0..=1
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Smoothstep of the progress
    pub fn eased(&self) -> f32 {
        let t = self.progress;
        t * t * (3.0 - 2.0 * t)
    }

    pub fn is_settled(&self) -> bool {
        self.progress == 0.0 || self.progress == 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    const EPSILON: f32 = 1e-4;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_defaults() {
        let animator = ObjectAnimator::new(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(animator.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(animator.axis(), Vec3::Y);
        assert!(animator.is_enabled());
        assert!(matches!(animator.motion(), Motion::Circular));
    }

    #[test]
    fn test_circular_at_time_zero() {
        let mut animator = ObjectAnimator::new(Vec3::new(0.0, 2.0, 0.0))
            .with_center(Vec3::new(1.0, 1.0, 1.0))
            .with_radius(4.0);
        // y is the center height plus the start height
        assert!(close(animator.update(0.0), Vec3::new(5.0, 3.0, 1.0)));
    }

    #[test]
    fn test_circular_quarter_turn() {
        let mut animator = ObjectAnimator::new(Vec3::ZERO).with_radius(2.0);
        assert!(close(animator.update(PI / 2.0), Vec3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_linear_peaks_at_amplitude() {
        let start = Vec3::new(1.0, 1.0, 1.0);
        let mut animator = ObjectAnimator::new(start)
            .with_motion(Motion::Linear)
            .with_amplitude(Vec3::new(3.0, 0.0, 0.0));
        assert!(close(animator.update(PI / 2.0), Vec3::new(4.0, 1.0, 1.0)));
        assert!(close(animator.update(PI), start));
    }

    #[test]
    fn test_figure_eight_crosses_center() {
        let mut animator = ObjectAnimator::new(Vec3::ZERO)
            .with_motion(Motion::FigureEight)
            .with_center(Vec3::new(0.0, 5.0, 0.0));
        assert!(close(animator.update(0.0), Vec3::new(0.0, 5.0, 0.0)));
        assert!(close(animator.update(PI), Vec3::new(0.0, 5.0, 0.0)));
        let quarter = animator.update(PI / 4.0);
        assert!((quarter.y - (5.0 + 1.5)).abs() < EPSILON);
    }

    #[test]
    fn test_orbit_quarter_turn_about_z() {
        let mut animator = ObjectAnimator::new(Vec3::new(1.0, 0.0, 0.0))
            .with_motion(Motion::Orbit)
            .with_axis(Vec3::new(0.0, 0.0, 2.0));
        assert!(close(animator.update(PI / 2.0), Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_orbit_preserves_distance_to_center() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let start = Vec3::new(4.0, 6.0, 3.0);
        let mut animator = ObjectAnimator::new(start)
            .with_motion(Motion::Orbit)
            .with_center(center)
            .with_axis(Vec3::new(1.0, 1.0, 0.0));
        for i in 0..20 {
            let p = animator.update(i as f32 * 0.37);
            assert!(((p - center).length() - 5.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_bounce_never_below_start() {
        let start = Vec3::new(0.0, 1.0, 0.0);
        let mut animator = ObjectAnimator::new(start)
            .with_motion(Motion::Bounce)
            .with_amplitude(Vec3::new(0.0, 2.0, 0.0));
        for i in 0..50 {
            assert!(animator.update(i as f32 * 0.21).y >= start.y);
        }
    }

    #[test]
    fn test_bounce_peak() {
        let mut animator = ObjectAnimator::new(Vec3::new(0.0, 1.0, 0.0))
            .with_motion(Motion::Bounce)
            .with_amplitude(Vec3::new(0.0, 2.0, 0.0));
        assert!(close(animator.update(PI / 2.0), Vec3::new(0.0, 3.0, 0.0)));
        assert!(close(animator.update(3.0 * PI / 2.0), Vec3::new(0.0, 3.0, 0.0)));
    }

    #[test]
    fn test_custom_receives_scaled_time_and_speed() {
        let motion: MotionFn = Arc::new(|start, t, speed| start + Vec3::new(t, speed, 0.0));
        let mut animator = ObjectAnimator::new(Vec3::ZERO)
            .with_motion(Motion::Custom(motion))
            .with_speed(2.0);
        assert!(close(animator.update(3.0), Vec3::new(6.0, 2.0, 0.0)));
    }

    #[test]
    fn test_disabled_pins_to_start() {
        let start = Vec3::new(4.0, 0.0, 0.0);
        let mut animator = ObjectAnimator::new(start).with_motion(Motion::Bounce);
        animator.set_enabled(false);
        assert_eq!(animator.update(1.3), start);
    }

    #[test]
    fn test_reset_restores_start() {
        let start = Vec3::new(0.0, 1.0, 0.0);
        let mut animator = ObjectAnimator::new(start);
        animator.update(1.0);
        assert_ne!(animator.position(), start);
        animator.reset();
        assert_eq!(animator.position(), start);
    }

    #[test]
    fn test_zero_axis_falls_back_to_y() {
        let mut animator = ObjectAnimator::new(Vec3::ZERO);
        animator.set_axis(Vec3::ZERO);
        assert_eq!(animator.axis(), Vec3::Y);
    }

    #[test]
    fn test_approach_never_overshoots() {
        assert_eq!(approach(0.0, 1.0, 0.25), 0.25);
        assert_eq!(approach(0.9, 1.0, 0.25), 1.0);
        assert_eq!(approach(1.0, 0.0, 0.25), 0.75);
        assert_eq!(approach(0.5, 0.5, 0.25), 0.5);
    }

    #[test]
    fn test_swing_opens_and_closes() {
        let mut swing = Swing::new(0.5);
        swing.update(true, 0.25);
        assert!((swing.progress() - 0.5).abs() < EPSILON);
        assert!(!swing.is_settled());
        swing.update(true, 1.0);
        assert_eq!(swing.progress(), 1.0);
        assert_eq!(swing.eased(), 1.0);
        swing.update(false, 10.0);
        assert_eq!(swing.progress(), 0.0);
        assert!(swing.is_settled());
    }

    #[test]
    fn test_full_period_is_tau_over_speed() {
        let speed = 0.1;
        let mut animator = ObjectAnimator::new(Vec3::new(30.0, 20.0, -50.0))
            .with_center(Vec3::new(0.0, 20.0, -50.0))
            .with_radius(15.0)
            .with_speed(speed);
        let first = animator.update(0.0);
        let later = animator.update(TAU / speed);
        assert!((first - later).length() < 1e-3);
    }
}
