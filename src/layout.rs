// layout.rs - Wall cutouts, wall segments and the desk grid derived from the config
use glam::Vec3;

use crate::config::{SceneConfig, MAX_DESKS};

/// Axis-aligned box given by its center and full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub center: Vec3,
    pub size: Vec3,
}

impl Cuboid {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    /// Box spanning `z0..z1` along Z and `y0..y1` along Y, centered on `x`
    fn wall_piece(x: f32, thickness: f32, y0: f32, y1: f32, z0: f32, z1: f32) -> Self {
        Self {
            center: Vec3::new(x, (y0 + y1) / 2.0, (z0 + z1) / 2.0),
            size: Vec3::new(thickness, y1 - y0, z1 - z0),
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.size / 2.0
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.size / 2.0
    }
}

/// Opening boundaries along the side walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutouts {
    pub window_front: f32,
    pub window_back: f32,
    pub window_bottom: f32,
    pub window_top: f32,
    pub door_front: f32,
    pub door_back: f32,
    pub door_top: f32,
}

impl Cutouts {
    pub fn from_config(config: &SceneConfig) -> Self {
        let window = &config.window_opening;
        let door = &config.door;
        Self {
            window_front: window.width / 2.0,
            window_back: -window.width / 2.0,
            window_bottom: window.center_y - window.height / 2.0,
            window_top: window.center_y + window.height / 2.0,
            door_front: door.center_z + door.width / 2.0,
            door_back: door.center_z - door.width / 2.0,
            door_top: door.height,
        }
    }
}

/// Which wall a segment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Front,
    Back,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub wall: Wall,
    pub bounds: Cuboid,
}

/// Solid wall pieces around the window and door openings
///
/// Left wall (door side), from front to back: full-height section, below and
/// above the window, full-height section to the door, above the door,
/// full-height back section. The right wall has only the window opening.
pub fn wall_segments(config: &SceneConfig) -> Vec<WallSegment> {
    let room = &config.room;
    let cut = Cutouts::from_config(config);
    let t = room.wall_thickness;
    let h = room.height;
    let half_depth = room.depth / 2.0;
    let left_x = -room.width / 2.0;
    let right_x = room.width / 2.0;

    let mut segments = Vec::with_capacity(12);
    let mut push = |wall, bounds| segments.push(WallSegment { wall, bounds });

    push(
        Wall::Front,
        Cuboid::new(Vec3::new(0.0, h / 2.0, half_depth), Vec3::new(room.width, h, t)),
    );
    push(
        Wall::Back,
        Cuboid::new(Vec3::new(0.0, h / 2.0, -half_depth), Vec3::new(room.width, h, t)),
    );

    for (wall, x) in [(Wall::Left, left_x), (Wall::Right, right_x)] {
        push(wall, Cuboid::wall_piece(x, t, 0.0, h, cut.window_front, half_depth));
        push(
            wall,
            Cuboid::wall_piece(x, t, 0.0, cut.window_bottom, cut.window_back, cut.window_front),
        );
        push(
            wall,
            Cuboid::wall_piece(x, t, cut.window_top, h, cut.window_back, cut.window_front),
        );
    }

    push(
        Wall::Left,
        Cuboid::wall_piece(left_x, t, 0.0, h, cut.door_front, cut.window_back),
    );
    push(
        Wall::Left,
        Cuboid::wall_piece(left_x, t, cut.door_top, h, cut.door_back, cut.door_front),
    );
    push(
        Wall::Left,
        Cuboid::wall_piece(left_x, t, 0.0, h, -half_depth, cut.door_back),
    );
    push(
        Wall::Right,
        Cuboid::wall_piece(right_x, t, 0.0, h, -half_depth, cut.window_back),
    );

    segments
}

/// One student desk slot in the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeskSlot {
    pub row: u32,
    pub column: u32,
    pub index: u32,
    pub position: Vec3,
}

/// Bench behind one row of a desk group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchSlot {
    pub row: u32,
    pub column: u32,
    pub position: Vec3,
    pub width: f32,
}

/// Spacing derived from the grid and desk dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeskGridMetrics {
    pub stride: f32,
    pub column_width: f32,
}

impl DeskGridMetrics {
    pub fn from_config(config: &SceneConfig) -> Self {
        let stride = config.desk.main_width + config.desk_grid.pair_spacing;
        Self {
            stride,
            column_width: config.desk_grid.desks_per_group as f32 * stride,
        }
    }

    fn column_x(&self, config: &SceneConfig, column: u32) -> f32 {
        let grid = &config.desk_grid;
        grid.start_x + column as f32 * (self.column_width + grid.column_spacing)
    }
}

pub fn desk_slots(config: &SceneConfig) -> Vec<DeskSlot> {
    let grid = &config.desk_grid;
    let metrics = DeskGridMetrics::from_config(config);
    let count = grid.rows as usize * grid.columns as usize * grid.desks_per_group as usize;
    let mut slots = Vec::with_capacity(count.min(MAX_DESKS as usize));

    for row in 0..grid.rows {
        let z = grid.start_z + row as f32 * grid.row_spacing;
        for column in 0..grid.columns {
            let x0 = metrics.column_x(config, column);
            for index in 0..grid.desks_per_group {
                slots.push(DeskSlot {
                    row,
                    column,
                    index,
                    position: Vec3::new(x0 + index as f32 * metrics.stride, 0.0, z),
                });
            }
        }
    }
    slots
}

/// Benches sit half a row behind their desks and span the whole group
pub fn bench_slots(config: &SceneConfig) -> Vec<BenchSlot> {
    let grid = &config.desk_grid;
    let metrics = DeskGridMetrics::from_config(config);
    let count = grid.rows as usize * grid.columns as usize;
    let mut slots = Vec::with_capacity(count.min(MAX_DESKS as usize));

    for row in 0..grid.rows {
        let z = grid.start_z + row as f32 * grid.row_spacing - grid.row_spacing / 2.0;
        for column in 0..grid.columns {
            let x = metrics.column_x(config, column)
                + (metrics.column_width - grid.pair_spacing) / 2.0
                - metrics.stride / 2.0;
            slots.push(BenchSlot {
                row,
                column,
                position: Vec3::new(x, 0.0, z),
                width: metrics.column_width,
            });
        }
    }
    slots
}
