// config.rs - Scene dimensions and placements, optionally loaded from JSON
use anyhow::{bail, Context, Result};
use glam::Vec3;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::material::PanelStyle;

/// Upper bound on desks in the grid
pub const MAX_DESKS: u64 = 4096;
/// Upper bound on hallway pillars
pub const MAX_PILLARS: u64 = 1024;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 960,
            title: "Classroom".to_string(),
        }
    }
}

/// Interior of the room; the floor is centered on the origin
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub wall_thickness: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 15.0,
            depth: 50.0,
            wall_thickness: 0.2,
        }
    }
}

/// Window opening in both side walls, centered on z = 0
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowOpening {
    pub width: f32,
    pub height: f32,
    pub center_y: f32,
}

impl Default for WindowOpening {
    fn default() -> Self {
        Self {
            width: 15.0,
            height: 8.0,
            center_y: 7.0,
        }
    }
}

/// Door opening in the left wall, floor-standing
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DoorOpening {
    pub width: f32,
    pub height: f32,
    pub center_z: f32,
    /// Seconds for a full swing
    pub swing_seconds: f32,
}

impl Default for DoorOpening {
    fn default() -> Self {
        Self {
            width: 4.0,
            height: 8.0,
            center_z: -18.0,
            swing_seconds: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeskGrid {
    pub rows: u32,
    pub columns: u32,
    pub desks_per_group: u32,
    pub row_spacing: f32,
    pub column_spacing: f32,
    pub pair_spacing: f32,
    pub start_x: f32,
    pub start_z: f32,
}

impl Default for DeskGrid {
    fn default() -> Self {
        Self {
            rows: 6,
            columns: 2,
            desks_per_group: 3,
            row_spacing: 6.0,
            column_spacing: 10.0,
            pair_spacing: 0.5,
            start_x: -20.0,
            start_z: -15.0,
        }
    }
}

/// Student desk: top, recessed shelf, modesty panels, legs
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeskDimensions {
    pub main_width: f32,
    pub main_depth: f32,
    pub main_thickness: f32,
    pub sub_width: f32,
    pub sub_depth: f32,
    pub sub_thickness: f32,
    pub panel_thickness: f32,
    pub height: f32,
    pub leg_width: f32,
    pub gap: f32,
}

impl Default for DeskDimensions {
    fn default() -> Self {
        Self {
            main_width: 5.0,
            main_depth: 1.75,
            main_thickness: 0.2,
            sub_width: 5.0,
            sub_depth: 1.5,
            sub_thickness: 0.1,
            panel_thickness: 0.1,
            height: 3.0,
            leg_width: 0.1,
            gap: 0.8,
        }
    }
}

/// Bench seat; its width follows the desk group it serves
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BenchDimensions {
    pub depth: f32,
    pub height: f32,
    pub leg_width: f32,
    pub seat_thickness: f32,
}

impl Default for BenchDimensions {
    fn default() -> Self {
        Self {
            depth: 1.5,
            height: 1.5,
            leg_width: 0.1,
            seat_thickness: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TeacherDeskDimensions {
    pub position: Vec3,
    pub main_width: f32,
    pub main_depth: f32,
    pub main_thickness: f32,
    pub panel_thickness: f32,
    pub height: f32,
    pub leg_width: f32,
    pub drawer_width: f32,
    pub drawer_height: f32,
    pub drawer_depth: f32,
    pub drawer_thickness: f32,
    pub drawer_x_offset: f32,
}

impl Default for TeacherDeskDimensions {
    fn default() -> Self {
        Self {
            position: Vec3::new(8.0, 0.0, 19.0),
            main_width: 7.0,
            main_depth: 3.0,
            main_thickness: 0.2,
            panel_thickness: 0.1,
            height: 3.2,
            leg_width: 0.15,
            drawer_width: 2.0,
            drawer_height: 0.6,
            drawer_depth: 2.0,
            drawer_thickness: 0.05,
            drawer_x_offset: -2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    pub position: Vec3,
    /// Revolutions per second
    pub speed: f32,
    pub disk_radius: f32,
    pub disk_height: f32,
    pub blade_length: f32,
    pub blade_width: f32,
    pub blade_thickness: f32,
    pub blades: u32,
    pub rod_radius: f32,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 13.5, 0.0),
            speed: 2.0,
            disk_radius: 1.5,
            disk_height: 0.3,
            blade_length: 2.5,
            blade_width: 0.6,
            blade_thickness: 0.08,
            blades: 3,
            rod_radius: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    pub position: Vec3,
    pub body: Vec3,
    pub lens_radius: f32,
    pub lens_length: f32,
    pub mount_radius: f32,
    pub mount_length: f32,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(-10.0, 12.0, 5.0),
            body: Vec3::new(1.5, 0.5, 1.0),
            lens_radius: 0.25,
            lens_length: 0.15,
            mount_radius: 0.1,
            mount_length: 2.5,
        }
    }
}

/// Corridor running along the outside of the door wall
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HallwayConfig {
    pub width: f32,
    pub height: f32,
    pub length: f32,
    pub rail_bar_width: f32,
    pub rail_bars: u32,
    pub rail_bar_spacing: f32,
    pub pillar_spacing: f32,
}

impl HallwayConfig {
    /// One pillar every `pillar_spacing` along the length, both ends included
    pub fn pillar_count(&self) -> u32 {
        if self.pillar_spacing <= 0.0 {
            return 1;
        }
        let spans = (self.length / self.pillar_spacing).floor();
        (spans.min(MAX_PILLARS as f32) as u32).saturating_add(1)
    }
}

impl Default for HallwayConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 15.0,
            length: 50.0,
            rail_bar_width: 0.1,
            rail_bars: 4,
            rail_bar_spacing: 1.0,
            pillar_spacing: 12.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardsConfig {
    pub blackboard: PanelStyle,
    pub blackboard_position: Vec3,
    pub screen: PanelStyle,
    pub screen_position: Vec3,
}

impl Default for BoardsConfig {
    fn default() -> Self {
        let front_z = RoomConfig::default().depth / 2.0;
        Self {
            blackboard: PanelStyle::blackboard(),
            blackboard_position: Vec3::new(10.0, 8.0, front_z - 0.2),
            screen: PanelStyle::projection_screen(),
            screen_position: Vec3::new(-12.0, 8.0, front_z - 0.2),
        }
    }
}

/// Textured plane; scale is in plane space (x width, z height before rotation)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PosterConfig {
    pub texture: PathBuf,
    pub position: Vec3,
    pub scale: Vec3,
    #[serde(default)]
    pub rotation_degrees: f32,
    #[serde(default = "default_poster_axis")]
    pub rotation_axis: Vec3,
}

fn default_poster_axis() -> Vec3 {
    Vec3::X
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            texture: PathBuf::from("assets/textures/poster.png"),
            position: Vec3::new(0.0, 9.0, -RoomConfig::default().depth / 2.0 + 0.11),
            scale: Vec3::new(20.0, 1.0, 15.0),
            rotation_degrees: 90.0,
            rotation_axis: Vec3::X,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ceiling_lights: [Vec3; 4],
    pub fixture_scale: Vec3,
    pub sun_start: Vec3,
    pub sun_center: Vec3,
    pub sun_radius: f32,
    pub sun_speed: f32,
    pub sun_scale: f32,
    pub sun_color: Vec3,
    /// Point the projector spotlight is aimed at
    pub spot_target: Vec3,
    pub shininess: f32,
    /// Specular exponent for textured posters
    pub poster_shininess: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ceiling_lights: [
                Vec3::new(-10.0, 14.5, 10.0),
                Vec3::new(10.0, 14.5, 10.0),
                Vec3::new(-10.0, 14.5, -10.0),
                Vec3::new(10.0, 14.5, -10.0),
            ],
            fixture_scale: Vec3::new(6.0, 0.2, 0.5),
            sun_start: Vec3::new(30.0, 20.0, -50.0),
            sun_center: Vec3::new(0.0, 20.0, -50.0),
            sun_radius: 15.0,
            sun_speed: 0.1,
            sun_scale: 5.0,
            sun_color: Vec3::new(1.0, 1.0, 0.8),
            spot_target: Vec3::new(-12.0, 8.0, 24.8),
            shininess: 32.0,
            poster_shininess: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Radians; PI looks down -Z
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 15.0),
            yaw: std::f32::consts::PI,
            pitch: 0.0,
            speed: 10.0,
            sensitivity: 0.002,
            fov_degrees: 45.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

/// Everything the scene needs; defaults reproduce the stock classroom
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowSettings,
    pub room: RoomConfig,
    pub window_opening: WindowOpening,
    pub door: DoorOpening,
    pub desk_grid: DeskGrid,
    pub desk: DeskDimensions,
    pub bench: BenchDimensions,
    pub teacher_desk: TeacherDeskDimensions,
    pub fan: FanConfig,
    pub projector: ProjectorConfig,
    pub hallway: HallwayConfig,
    pub boards: BoardsConfig,
    pub posters: Vec<PosterConfig>,
    pub lighting: LightingConfig,
    pub camera: CameraConfig,
    pub clear_color: [f64; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            room: RoomConfig::default(),
            window_opening: WindowOpening::default(),
            door: DoorOpening::default(),
            desk_grid: DeskGrid::default(),
            desk: DeskDimensions::default(),
            bench: BenchDimensions::default(),
            teacher_desk: TeacherDeskDimensions::default(),
            fan: FanConfig::default(),
            projector: ProjectorConfig::default(),
            hallway: HallwayConfig::default(),
            boards: BoardsConfig::default(),
            posters: vec![PosterConfig::default()],
            lighting: LightingConfig::default(),
            camera: CameraConfig::default(),
            clear_color: [0.5, 0.7, 0.9],
        }
    }
}

impl SceneConfig {
    /// Read a JSON file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject layouts whose openings leave the wall or overlap
    pub fn validate(&self) -> Result<()> {
        let room = &self.room;
        let window = &self.window_opening;
        let door = &self.door;

        let positive = [
            ("room.width", room.width),
            ("room.height", room.height),
            ("room.depth", room.depth),
            ("room.wall_thickness", room.wall_thickness),
            ("window_opening.width", window.width),
            ("window_opening.height", window.height),
            ("door.width", door.width),
            ("door.height", door.height),
            ("desk.main_width", self.desk.main_width),
            ("desk.height", self.desk.height),
            ("hallway.length", self.hallway.length),
            ("hallway.pillar_spacing", self.hallway.pillar_spacing),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                bail!("{} must be positive, got {}", name, value);
            }
        }

        let grid = &self.desk_grid;
        let desks = grid.rows as u64 * grid.columns as u64 * grid.desks_per_group as u64;
        if desks > MAX_DESKS {
            bail!("desk grid has {} desks, at most {} are allowed", desks, MAX_DESKS);
        }
        let pillars = (self.hallway.length / self.hallway.pillar_spacing).floor();
        if pillars >= MAX_PILLARS as f32 {
            bail!(
                "hallway.pillar_spacing {} gives {} pillars, at most {} are allowed",
                self.hallway.pillar_spacing,
                pillars,
                MAX_PILLARS
            );
        }

        let half_depth = room.depth / 2.0;
        let window_front = window.width / 2.0;
        let window_back = -window.width / 2.0;
        let door_front = door.center_z + door.width / 2.0;
        let door_back = door.center_z - door.width / 2.0;

        if window_front > half_depth {
            bail!("window opening ({}) is wider than the wall ({})", window.width, room.depth);
        }
        if window.center_y - window.height / 2.0 < 0.0
            || window.center_y + window.height / 2.0 > room.height
        {
            bail!("window opening does not fit between floor and ceiling");
        }
        if door.height > room.height {
            bail!("door ({}) is taller than the room ({})", door.height, room.height);
        }
        if door_back < -half_depth {
            bail!("door opening extends past the back wall");
        }
        if door_front > window_back {
            bail!(
                "door opening [{}, {}] must lie behind the window opening [{}, {}]",
                door_back,
                door_front,
                window_back,
                window_front
            );
        }
        Ok(())
    }
}
