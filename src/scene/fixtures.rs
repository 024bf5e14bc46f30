use glam::{Mat4, Vec3};

use crate::config::{FanConfig, HallwayConfig, LightingConfig, PosterConfig, RoomConfig};
use crate::draw::{DrawList, Rotation};
use crate::material::palette;

const FIXTURE_ON: Vec3 = Vec3::ONE;
const FIXTURE_OFF: Vec3 = Vec3::splat(0.15);

const CONNECTOR_OFFSET: f32 = 1.2;
const CONNECTOR_SCALE: Vec3 = Vec3::new(0.1, 0.5, 0.1);
const BLADE_OFFSET: f32 = 2.5;

const PILLAR_SCALE: Vec3 = Vec3::new(0.2, 1.0, 0.5);

/// Ceiling fan: rod, hub disk, then a connector and blade per arm
pub fn ceiling_fan(list: &mut DrawList, fan: &FanConfig, ceiling: f32, angle_degrees: f32) {
    let p = fan.position;
    list.cylinder(
        Vec3::new(p.x, (ceiling + p.y) / 2.0, p.z),
        Vec3::new(fan.rod_radius, ceiling - p.y, fan.rod_radius),
        palette::METAL_DARK,
    );

    let hub = Mat4::from_translation(p) * Mat4::from_rotation_y(angle_degrees.to_radians());
    list.cylinder_with_matrix(
        hub,
        Vec3::new(fan.disk_radius, fan.disk_height, fan.disk_radius),
        palette::METAL_LIGHT,
    );

    let blades = fan.blades.max(1);
    for i in 0..blades {
        let arm = angle_degrees + i as f32 * 360.0 / blades as f32;
        let arm = Mat4::from_translation(p) * Mat4::from_rotation_y(arm.to_radians());

        let connector = arm
            * Mat4::from_translation(Vec3::new(CONNECTOR_OFFSET, 0.0, 0.0))
            * Mat4::from_rotation_z(90f32.to_radians());
        list.cylinder_with_matrix(connector, CONNECTOR_SCALE, palette::FAN_CONNECTOR);

        let blade = arm * Mat4::from_translation(Vec3::new(BLADE_OFFSET, 0.0, 0.0));
        list.cube_with_matrix(
            blade,
            Vec3::new(fan.blade_length, fan.blade_thickness, fan.blade_width),
            palette::METAL_LIGHT,
        );
    }
}

/// Emissive light bars; dim grey when switched off
pub fn ceiling_lights(list: &mut DrawList, lighting: &LightingConfig, on: bool) {
    let color = if on { FIXTURE_ON } else { FIXTURE_OFF };
    for position in lighting.ceiling_lights {
        list.emissive_cube(position, lighting.fixture_scale, color);
    }
}

/// Open corridor outside the door wall, with a handrail along its far side
pub fn hallway(list: &mut DrawList, room: &RoomConfig, hall: &HallwayConfig) {
    let x = -room.width / 2.0 - hall.width / 2.0;
    let half_len = hall.length / 2.0;
    let t = room.wall_thickness;

    list.plane(
        Vec3::new(x, 0.01, 0.0),
        Vec3::new(hall.width, 1.0, hall.length),
        palette::HALLWAY_FLOOR,
        0.0,
    );
    list.cube(
        Vec3::new(x, hall.height + 0.5, 0.0),
        Vec3::new(hall.width, 1.0, hall.length),
        palette::CEILING,
    );
    for z in [-half_len, half_len] {
        list.cube(
            Vec3::new(x, hall.height / 2.0, z),
            Vec3::new(hall.width, hall.height, t),
            palette::WALL,
        );
    }

    let rail_x = x - hall.width / 2.0 + t + hall.rail_bar_width;
    for i in 0..hall.rail_bars {
        list.cube(
            Vec3::new(rail_x, (i + 1) as f32 * hall.rail_bar_spacing, 0.0),
            Vec3::new(hall.rail_bar_width, hall.rail_bar_width, hall.length),
            palette::METAL_LIGHT,
        );
    }

    for i in 0..hall.pillar_count() {
        list.cube(
            Vec3::new(rail_x, hall.height / 2.0, -half_len + i as f32 * hall.pillar_spacing),
            PILLAR_SCALE * Vec3::new(1.0, hall.height, 1.0),
            palette::METAL_LIGHT,
        );
    }
}

/// One textured plane per poster; the slot matches the poster's index
pub fn posters(list: &mut DrawList, posters: &[PosterConfig]) {
    for (slot, poster) in posters.iter().enumerate() {
        list.textured_plane(
            poster.position,
            poster.scale,
            Rotation {
                degrees: poster.rotation_degrees,
                axis: poster.rotation_axis,
            },
            palette::POSTER,
            slot,
        );
    }
}

pub fn sun(list: &mut DrawList, lighting: &LightingConfig, position: Vec3) {
    list.emissive_sphere(position, Vec3::splat(lighting.sun_scale), lighting.sun_color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Shading;
    use crate::mesh::MeshKind;

    #[test]
    fn test_fan_parts() {
        let fan = FanConfig::default();
        let mut list = DrawList::new();
        ceiling_fan(&mut list, &fan, 15.0, 0.0);
        assert_eq!(list.len(), 2 + 2 * fan.blades as usize);

        let rod = list.commands()[0].model;
        let top = rod.transform_point3(Vec3::new(0.0, 0.5, 0.0));
        let bottom = rod.transform_point3(Vec3::new(0.0, -0.5, 0.0));
        assert!((top.y - 15.0).abs() < 1e-5);
        assert!((bottom.y - fan.position.y).abs() < 1e-5);
    }

    #[test]
    fn test_blades_evenly_spaced() {
        let fan = FanConfig::default();
        let mut list = DrawList::new();
        ceiling_fan(&mut list, &fan, 15.0, 30.0);

        let centers: Vec<Vec3> = list
            .commands()
            .iter()
            .filter(|c| c.mesh == MeshKind::Cube)
            .map(|c| c.model.transform_point3(Vec3::ZERO) - fan.position)
            .collect();
        assert_eq!(centers.len(), 3);
        for c in &centers {
            assert!((c.length() - BLADE_OFFSET).abs() < 1e-4);
        }
        let angle = centers[0].angle_between(centers[1]).to_degrees();
        assert!((angle - 120.0).abs() < 1e-2);
    }

    #[test]
    fn test_connector_lies_horizontal() {
        let fan = FanConfig::default();
        let mut list = DrawList::new();
        ceiling_fan(&mut list, &fan, 15.0, 0.0);
        let connector = list.commands()[2].model;
        let axis = connector.transform_vector3(Vec3::Y).normalize();
        assert!(axis.y.abs() < 1e-5);
    }

    #[test]
    fn test_light_colors_follow_switch() {
        let lighting = LightingConfig::default();
        let mut list = DrawList::new();
        ceiling_lights(&mut list, &lighting, true);
        ceiling_lights(&mut list, &lighting, false);
        assert_eq!(list.len(), 8);
        assert_eq!(list.commands()[0].shading, Shading::Emissive(Vec3::ONE));
        assert_eq!(list.commands()[7].shading, Shading::Emissive(Vec3::splat(0.15)));
    }

    #[test]
    fn test_hallway_outside_door_wall() {
        let room = RoomConfig::default();
        let hall = HallwayConfig::default();
        let mut list = DrawList::new();
        hallway(&mut list, &room, &hall);

        assert_eq!(list.len(), 4 + hall.rail_bars as usize + 5);
        let floor = list.commands()[0].model;
        let inner = floor.transform_point3(Vec3::new(0.5, 0.0, 0.0));
        assert!((inner.x + room.width / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_poster_slots_in_order() {
        let posters_cfg = vec![PosterConfig::default(), PosterConfig::default()];
        let mut list = DrawList::new();
        posters(&mut list, &posters_cfg);
        assert_eq!(list.commands()[0].shading, Shading::Textured(0));
        assert_eq!(list.commands()[1].shading, Shading::Textured(1));
    }

    #[test]
    fn test_poster_faces_room() {
        let mut list = DrawList::new();
        posters(&mut list, &[PosterConfig::default()]);
        let normal = list.commands()[0].model.transform_vector3(Vec3::Y).normalize();
        assert!((normal - Vec3::Z).length() < 1e-5);
    }
}
