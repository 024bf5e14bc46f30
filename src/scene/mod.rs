mod fixtures;
mod furniture;
mod state;
mod structure;

pub use fixtures::{ceiling_fan, ceiling_lights, hallway, posters, sun};
pub use furniture::{bench, desk, door, framed_panel, panel_transform, projector, teacher_desk};
pub use state::SceneState;
pub use structure::{floors_and_ceiling, walls, windows};

use crate::config::SceneConfig;
use crate::draw::DrawList;
use crate::layout::{bench_slots, desk_slots};

/// Build the frame's draw list
///
/// Order matters only for the translucent windows, which come last so they
/// blend over everything else.
pub fn compose(config: &SceneConfig, state: &SceneState) -> DrawList {
    let mut list = DrawList::with_capacity(512);

    floors_and_ceiling(&mut list, config);
    walls(&mut list, config);

    for slot in desk_slots(config) {
        desk(&mut list, slot.position, &config.desk);
    }
    for slot in bench_slots(config) {
        bench(&mut list, slot.position, slot.width, &config.bench);
    }

    let boards = &config.boards;
    framed_panel(
        &mut list,
        panel_transform(boards.blackboard_position, boards.blackboard.width, 0.0, 0.0),
        &boards.blackboard,
    );
    framed_panel(
        &mut list,
        panel_transform(boards.screen_position, boards.screen.width, 0.0, 0.0),
        &boards.screen,
    );
    teacher_desk(&mut list, &config.teacher_desk);
    door(&mut list, &config.room, &config.door, state.door_openness());

    projector(&mut list, &config.projector);
    ceiling_fan(&mut list, &config.fan, config.room.height, state.fan_angle());
    ceiling_lights(&mut list, &config.lighting, state.lights_on);
    hallway(&mut list, &config.room, &config.hallway);
    posters(&mut list, &config.posters);
    sun(&mut list, &config.lighting, state.sun_position());

    windows(&mut list, config);
    list
}
