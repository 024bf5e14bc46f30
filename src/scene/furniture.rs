use glam::{Mat4, Vec3};

use crate::config::{
    BenchDimensions, DeskDimensions, DoorOpening, ProjectorConfig, RoomConfig,
    TeacherDeskDimensions,
};
use crate::draw::{DrawList, Rotation};
use crate::material::{palette, PanelStyle};

/// Extra depth of frame bars beyond the panel surface
const FRAME_DEPTH_EXTRA: f32 = 0.1;
/// Door panel is inset from the wall centerline
const DOOR_INSET: f32 = 0.15;

/// Student desk: top, recessed shelf, three modesty panels, four legs
pub fn desk(list: &mut DrawList, position: Vec3, dims: &DeskDimensions) {
    let mat = palette::WOOD;
    let h = dims.height;

    list.cube(
        position + Vec3::new(0.0, h - dims.main_thickness / 2.0, 0.0),
        Vec3::new(dims.main_width, dims.main_thickness, dims.main_depth),
        mat,
    );

    let sub_y = h - dims.main_thickness - dims.gap - dims.sub_thickness / 2.0;
    list.cube(
        position + Vec3::new(0.0, sub_y, (dims.main_depth - dims.sub_depth) / 2.0),
        Vec3::new(dims.sub_width, dims.sub_thickness, dims.sub_depth),
        mat,
    );

    let shelf_bottom = sub_y - dims.sub_thickness / 2.0;
    let panel_y = (h - dims.main_thickness + shelf_bottom) / 2.0;
    let panel_h = (h - dims.main_thickness) - shelf_bottom;
    let side_x = dims.main_width / 2.0 - dims.panel_thickness / 2.0;

    list.cube(
        position + Vec3::new(0.0, panel_y, dims.main_depth / 2.0 - dims.panel_thickness / 2.0),
        Vec3::new(dims.main_width, panel_h, dims.panel_thickness),
        mat,
    );
    for x in [-side_x, side_x] {
        list.cube(
            position + Vec3::new(x, panel_y, 0.0),
            Vec3::new(dims.panel_thickness, panel_h, dims.main_depth),
            mat,
        );
    }

    let leg_h = shelf_bottom;
    let leg_x = dims.main_width / 2.0 - dims.leg_width / 2.0;
    let front_z = dims.main_depth / 2.0 - dims.leg_width / 2.0;
    let back_z = -(dims.sub_depth / 2.0 - dims.leg_width * 4.0);
    for (x, z) in [(-leg_x, front_z), (leg_x, front_z), (-leg_x, back_z), (leg_x, back_z)] {
        list.cube(
            position + Vec3::new(x, leg_h / 2.0, z),
            Vec3::new(dims.leg_width, leg_h, dims.leg_width),
            mat,
        );
    }
}

/// Bench seat spanning `width`, legs at the corners
pub fn bench(list: &mut DrawList, position: Vec3, width: f32, dims: &BenchDimensions) {
    let mat = palette::BENCH;
    let h = dims.height;

    list.cube(
        position + Vec3::new(0.0, h, 0.0),
        Vec3::new(width, dims.seat_thickness, dims.depth),
        mat,
    );

    let x = width / 2.0 - dims.leg_width / 2.0;
    let z = dims.depth / 2.0 - dims.leg_width / 2.0;
    for sx in [-1.0, 1.0] {
        for sz in [-1.0, 1.0] {
            list.cube(
                position + Vec3::new(sx * x, h / 2.0, sz * z),
                Vec3::new(dims.leg_width, h, dims.leg_width),
                mat,
            );
        }
    }
}

/// Placement of a framed panel: wall-facing rotation plus hinge swing
///
/// `openness` in 0..=1 swings the panel up to 90 degrees about its local
/// +X edge, toward the panel's front. Zero leaves it flat against its wall.
pub fn panel_transform(position: Vec3, width: f32, rotation_degrees: f32, openness: f32) -> Mat4 {
    let mut transform =
        Mat4::from_translation(position) * Mat4::from_rotation_y(rotation_degrees.to_radians());
    if openness > 0.0 {
        let hinge = Vec3::new(width / 2.0, 0.0, 0.0);
        transform = transform
            * Mat4::from_translation(hinge)
            * Mat4::from_rotation_y((90.0 * openness).to_radians())
            * Mat4::from_translation(-hinge);
    }
    transform
}

/// Surface, four frame bars and the optional tray
pub fn framed_panel(list: &mut DrawList, transform: Mat4, style: &PanelStyle) {
    let w = style.width;
    let h = style.height;
    let f = style.frame_thickness;
    let z = style.thickness + FRAME_DEPTH_EXTRA;

    list.cube_with_matrix(transform, Vec3::new(w, h, style.thickness), style.surface);

    let bars = [
        (Vec3::new(0.0, h / 2.0 + f / 2.0, 0.0), Vec3::new(w + 2.0 * f, f, z)),
        (Vec3::new(0.0, -h / 2.0 - f / 2.0, 0.0), Vec3::new(w + 2.0 * f, f, z)),
        (Vec3::new(-w / 2.0 - f / 2.0, 0.0, 0.0), Vec3::new(f, h, z)),
        (Vec3::new(w / 2.0 + f / 2.0, 0.0, 0.0), Vec3::new(f, h, z)),
    ];
    for (offset, scale) in bars {
        list.cube_with_matrix(transform * Mat4::from_translation(offset), scale, style.frame);
    }

    if let Some(tray) = style.tray {
        let offset = Vec3::new(0.0, -h / 2.0 - f - tray.offset, 0.1);
        list.cube_with_matrix(
            transform * Mat4::from_translation(offset),
            Vec3::new(w, tray.height, tray.depth),
            style.frame,
        );
    }
}

/// Door panel in the left wall opening, hinged at its back edge
pub fn door(list: &mut DrawList, room: &RoomConfig, door: &DoorOpening, openness: f32) {
    let position = Vec3::new(-room.width / 2.0 + DOOR_INSET, door.height / 2.0, door.center_z);
    let style = PanelStyle::door(door.width, door.height);
    framed_panel(list, panel_transform(position, door.width, 90.0, openness), &style);
}

/// Teacher's desk: top, back and side panels, drawer box with handle, legs
pub fn teacher_desk(list: &mut DrawList, dims: &TeacherDeskDimensions) {
    let mat = palette::WOOD;
    let p = dims.position;
    let h = dims.height;
    let body_h = h - dims.main_thickness;
    let side_x = dims.main_width / 2.0 - dims.panel_thickness / 2.0;

    list.cube(
        p + Vec3::new(0.0, h - dims.main_thickness / 2.0, 0.0),
        Vec3::new(dims.main_width, dims.main_thickness, dims.main_depth),
        mat,
    );
    list.cube(
        p + Vec3::new(0.0, h / 2.0, -dims.main_depth / 2.0 + dims.panel_thickness / 2.0),
        Vec3::new(dims.main_width, body_h, dims.panel_thickness),
        mat,
    );

    // Left side is split around the drawer
    let lower_depth = dims.main_depth - dims.drawer_depth - 0.4;
    list.cube(
        p + Vec3::new(-side_x, h / 2.0, -dims.main_depth / 2.0 + lower_depth / 2.0 + 0.2),
        Vec3::new(dims.panel_thickness, body_h, lower_depth),
        mat,
    );
    let above_drawer = body_h - dims.drawer_height - 0.3;
    list.cube(
        p + Vec3::new(-side_x, body_h - above_drawer / 2.0, 0.0),
        Vec3::new(dims.panel_thickness, above_drawer, dims.drawer_depth),
        mat,
    );
    list.cube(
        p + Vec3::new(side_x, h / 2.0, 0.0),
        Vec3::new(dims.panel_thickness, body_h, dims.main_depth),
        mat,
    );

    let drawer_mat = mat.tinted(0.9);
    let drawer_y = body_h - dims.drawer_height / 2.0 - 0.15;
    let dx = dims.drawer_x_offset;
    let side = Vec3::new(dims.drawer_thickness, dims.drawer_height, dims.drawer_depth);
    let face = Vec3::new(dims.drawer_width, dims.drawer_height, dims.drawer_thickness);
    let half_w = dims.drawer_width / 2.0 - dims.drawer_thickness / 2.0;
    let half_d = dims.drawer_depth / 2.0 - dims.drawer_thickness / 2.0;

    list.cube(p + Vec3::new(dx + half_w, drawer_y, 0.0), side, drawer_mat);
    list.cube(p + Vec3::new(dx - half_w, drawer_y, 0.0), side, drawer_mat);
    list.cube(p + Vec3::new(dx, drawer_y, half_d), face, drawer_mat);
    list.cube(p + Vec3::new(dx, drawer_y, -half_d), face, drawer_mat);
    list.cube(
        p + Vec3::new(dx, drawer_y, half_d),
        Vec3::new(0.1, 0.1, 0.3),
        palette::METAL_DARK,
    );

    let leg_x = dims.main_width / 2.0 - dims.leg_width / 2.0 - 0.1;
    let leg_z = dims.main_depth / 2.0 - dims.leg_width / 2.0 - 0.1;
    for (x, z) in [(-leg_x, leg_z), (leg_x, leg_z), (-leg_x, -leg_z), (leg_x, -leg_z)] {
        list.cube(
            p + Vec3::new(x, body_h / 2.0, z),
            Vec3::new(dims.leg_width, body_h, dims.leg_width),
            mat,
        );
    }
}

/// Ceiling-mounted projector: mount rod, body, lens facing +Z
pub fn projector(list: &mut DrawList, config: &ProjectorConfig) {
    let p = config.position;
    list.cylinder(
        p + Vec3::new(0.0, 1.5, 0.0),
        Vec3::new(config.mount_radius, config.mount_length, config.mount_radius),
        palette::METAL_DARK,
    );
    list.cube(p, config.body, palette::METAL_DARK);
    list.cylinder_rotated(
        p + Vec3::new(0.0, 0.0, 0.5),
        Vec3::new(config.lens_radius, config.lens_length, config.lens_radius),
        palette::LENS,
        Rotation::about_x(90.0),
    );
}
