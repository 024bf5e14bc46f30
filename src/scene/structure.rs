use glam::Vec3;

use crate::config::SceneConfig;
use crate::draw::DrawList;
use crate::layout::wall_segments;
use crate::material::palette;

/// Offset that keeps window glass just outside the wall plane
const WINDOW_INSET: f32 = 0.01;

/// Classroom floor, the grey ground around it, and the ceiling
pub fn floors_and_ceiling(list: &mut DrawList, config: &SceneConfig) {
    let w = config.room.width;
    let d = config.room.depth;
    let h = config.room.height;

    list.plane(Vec3::ZERO, Vec3::new(w, 1.0, d), palette::FLOOR, 0.0);

    let outer = [
        (Vec3::new(w, 0.0, 0.0), Vec3::new(w, 1.0, d)),
        (Vec3::new(-w, 0.0, 0.0), Vec3::new(w, 1.0, d)),
        (Vec3::new(0.0, 0.0, -d), Vec3::new(w * 3.0, 1.0, d)),
        (Vec3::new(0.0, 0.0, d), Vec3::new(w * 3.0, 1.0, d)),
    ];
    for (position, scale) in outer {
        list.plane(position, scale, palette::OUTER_FLOOR, 0.0);
    }

    // Flipped so the lit side faces the room
    list.plane(Vec3::new(0.0, h, 0.0), Vec3::new(w, 1.0, d), palette::CEILING, 180.0);
}

pub fn walls(list: &mut DrawList, config: &SceneConfig) {
    for segment in wall_segments(config) {
        list.cube(segment.bounds.center, segment.bounds.size, palette::WALL);
    }
}

/// Glass in both side-wall openings
pub fn windows(list: &mut DrawList, config: &SceneConfig) {
    let opening = &config.window_opening;
    let half_width = config.room.width / 2.0;
    let scale = Vec3::new(opening.width, opening.height, 1.0);

    list.window(
        Vec3::new(-half_width - WINDOW_INSET, opening.center_y, 0.0),
        scale,
        palette::WINDOW,
        90.0,
    );
    list.window(
        Vec3::new(half_width + WINDOW_INSET, opening.center_y, 0.0),
        scale,
        palette::WINDOW,
        -90.0,
    );
}
