// material.rs - Phong material colors and the scene palette
use glam::Vec3;
use serde::Deserialize;

/// Ambient/diffuse/specular reflectance plus opacity
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    #[serde(default = "opaque")]
    pub alpha: f32,
}

/// Opacity of window glass
pub const WINDOW_ALPHA: f32 = 0.3;

fn opaque() -> f32 {
    1.0
}

impl Material {
    pub const fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            alpha: 1.0,
        }
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Scale ambient and diffuse, leaving specular alone
    pub fn tinted(self, factor: f32) -> Self {
        Self {
            ambient: self.ambient * factor,
            diffuse: self.diffuse * factor,
            ..self
        }
    }

    pub fn is_translucent(&self) -> bool {
        self.alpha < 1.0
    }
}

const fn rgb(r: f32, g: f32, b: f32) -> Vec3 {
    Vec3::new(r, g, b)
}

pub mod palette {
    use super::{rgb, Material, WINDOW_ALPHA};

    pub const WOOD: Material = Material::new(rgb(0.3, 0.2, 0.1), rgb(0.6, 0.4, 0.2), rgb(0.3, 0.2, 0.1));
    pub const WALL: Material =
        Material::new(rgb(0.4, 0.35, 0.25), rgb(0.7, 0.6, 0.45), rgb(0.3, 0.3, 0.3));
    pub const FLOOR: Material = Material::new(rgb(0.1, 0.3, 0.1), rgb(0.2, 0.6, 0.2), rgb(0.1, 0.1, 0.1));
    pub const OUTER_FLOOR: Material =
        Material::new(rgb(0.3, 0.3, 0.3), rgb(0.5, 0.5, 0.5), rgb(0.2, 0.2, 0.2));
    pub const HALLWAY_FLOOR: Material =
        Material::new(rgb(0.35, 0.35, 0.35), rgb(0.55, 0.55, 0.55), rgb(0.2, 0.2, 0.2));
    pub const CEILING: Material =
        Material::new(rgb(0.05, 0.05, 0.05), rgb(0.1, 0.1, 0.1), rgb(0.05, 0.05, 0.05));
    pub const METAL_DARK: Material =
        Material::new(rgb(0.15, 0.15, 0.15), rgb(0.25, 0.25, 0.25), rgb(0.4, 0.4, 0.4));
    pub const METAL_LIGHT: Material =
        Material::new(rgb(0.7, 0.7, 0.7), rgb(0.85, 0.85, 0.85), rgb(0.9, 0.9, 0.9));
    pub const FAN_CONNECTOR: Material =
        Material::new(rgb(0.2, 0.2, 0.2), rgb(0.35, 0.35, 0.35), rgb(0.5, 0.5, 0.5));
    pub const LENS: Material = Material::new(rgb(0.05, 0.05, 0.15), rgb(0.1, 0.1, 0.3), rgb(0.8, 0.8, 0.9));
    pub const WINDOW: Material =
        Material::new(rgb(0.1, 0.1, 0.1), rgb(0.2, 0.2, 0.2), rgb(0.5, 0.5, 0.5)).with_alpha(WINDOW_ALPHA);
    pub const BENCH: Material =
        Material::new(rgb(0.2, 0.13, 0.07), rgb(0.4, 0.25, 0.13), rgb(0.2, 0.13, 0.07));
    pub const POSTER: Material = Material::new(rgb(1.0, 1.0, 1.0), rgb(1.0, 1.0, 1.0), rgb(0.3, 0.3, 0.3));
}

/// Framed board: blackboard, projection screen, door
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PanelStyle {
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
    pub frame_thickness: f32,
    pub frame: Material,
    pub surface: Material,
    #[serde(default)]
    pub tray: Option<TrayStyle>,
}

/// Ledge under a panel, drawn in the frame material
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TrayStyle {
    pub height: f32,
    pub depth: f32,
    pub offset: f32,
}

impl Default for TrayStyle {
    fn default() -> Self {
        Self {
            height: 0.1,
            depth: 0.3,
            offset: 0.15,
        }
    }
}

impl PanelStyle {
    pub fn blackboard() -> Self {
        Self {
            width: 25.0,
            height: 8.0,
            thickness: 0.15,
            frame_thickness: 0.2,
            frame: Material::new(rgb(0.3, 0.2, 0.1), rgb(0.5, 0.3, 0.15), rgb(0.2, 0.15, 0.1)),
            surface: Material::new(rgb(0.05, 0.1, 0.05), rgb(0.1, 0.2, 0.1), rgb(0.05, 0.05, 0.05)),
            tray: Some(TrayStyle::default()),
        }
    }

    pub fn projection_screen() -> Self {
        Self {
            width: 15.0,
            height: 9.0,
            thickness: 0.05,
            frame_thickness: 0.15,
            frame: Material::new(rgb(0.05, 0.05, 0.05), rgb(0.1, 0.1, 0.1), rgb(0.2, 0.2, 0.2)),
            surface: Material::new(rgb(0.8, 0.8, 0.8), rgb(0.95, 0.95, 0.95), rgb(0.3, 0.3, 0.3)),
            tray: None,
        }
    }

    pub fn door(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            thickness: 0.15,
            frame_thickness: 0.15,
            frame: Material::new(rgb(0.2, 0.1, 0.05), rgb(0.4, 0.2, 0.1), rgb(0.3, 0.15, 0.08)),
            surface: Material::new(rgb(0.3, 0.2, 0.1), rgb(0.6, 0.4, 0.2), rgb(0.4, 0.3, 0.2)),
            tray: None,
        }
    }
}
