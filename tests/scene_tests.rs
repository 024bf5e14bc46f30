use classroom_scene::draw::{DrawCommand, Shading};
use classroom_scene::frame::FrameInfo;
use classroom_scene::mesh::MeshKind;
use classroom_scene::{compose, SceneConfig, SceneState};
use glam::Vec3;

fn emissive_colors(commands: &[DrawCommand], mesh: MeshKind) -> Vec<Vec3> {
    commands
        .iter()
        .filter(|c| c.mesh == mesh)
        .filter_map(|c| match c.shading {
            Shading::Emissive(color) => Some(color),
            _ => None,
        })
        .collect()
}

fn advance(state: &mut SceneState, seconds: f32, steps: u32) {
    let delta = seconds / steps as f32;
    for i in 0..steps {
        state.update(&FrameInfo::new(i as u64, (i + 1) as f32 * delta, delta));
    }
}

#[cfg(test)]
mod compose_tests {
    use super::*;

    #[test]
    fn test_default_scene_command_count() {
        let config = SceneConfig::default();
        let list = compose(&config, &SceneState::new(&config));
        assert_eq!(list.len(), 464);
    }

    #[test]
    fn test_windows_are_last_and_translucent() {
        let config = SceneConfig::default();
        let list = compose(&config, &SceneState::new(&config));
        let commands = list.commands();

        let tail = &commands[commands.len() - 2..];
        assert!(tail.iter().all(|c| c.mesh == MeshKind::Window));
        assert!(tail.iter().all(DrawCommand::is_translucent));
        assert_eq!(commands.iter().filter(|c| c.is_translucent()).count(), 2);
    }

    #[test]
    fn test_single_sun_and_poster() {
        let config = SceneConfig::default();
        let list = compose(&config, &SceneState::new(&config));
        let commands = list.commands();

        assert_eq!(emissive_colors(commands, MeshKind::Sphere), vec![config.lighting.sun_color]);
        let posters: Vec<_> = commands
            .iter()
            .filter(|c| matches!(c.shading, Shading::Textured(_)))
            .collect();
        assert_eq!(posters.len(), 1);
        assert_eq!(posters[0].shading, Shading::Textured(0));
    }

    #[test]
    fn test_light_fixtures_start_dim_and_brighten_when_on() {
        let config = SceneConfig::default();
        let mut state = SceneState::new(&config);

        let dark = compose(&config, &state);
        assert_eq!(emissive_colors(dark.commands(), MeshKind::Cube), vec![Vec3::splat(0.15); 4]);

        state.lights_on = true;
        let lit = compose(&config, &state);
        assert_eq!(emissive_colors(lit.commands(), MeshKind::Cube), vec![Vec3::ONE; 4]);
        assert_eq!(lit.len(), dark.len());
    }

    #[test]
    fn test_running_fan_moves_blades() {
        let config = SceneConfig::default();
        let mut state = SceneState::new(&config);
        let before = compose(&config, &state);

        state.fan_on = true;
        advance(&mut state, 0.05, 5);
        let after = compose(&config, &state);

        let changed = before
            .commands()
            .iter()
            .zip(after.commands())
            .filter(|(a, b)| a.model != b.model)
            .count();
        // hub, connectors and blades turn; the sun also moves with time
        let blades = config.fan.blades as usize;
        assert_eq!(changed, 1 + 2 * blades + 1);
    }

    #[test]
    fn test_opening_door_changes_only_door_parts() {
        let config = SceneConfig::default();
        let mut closed_state = SceneState::new(&config);
        let mut open_state = closed_state.clone();
        open_state.door_open = true;

        advance(&mut closed_state, 1.0, 10);
        advance(&mut open_state, 1.0, 10);
        assert_eq!(open_state.door_openness(), 1.0);

        let closed = compose(&config, &closed_state);
        let open = compose(&config, &open_state);
        let changed = closed
            .commands()
            .iter()
            .zip(open.commands())
            .filter(|(a, b)| a.model != b.model)
            .count();
        // frame pieces plus the door surface
        assert_eq!(changed, 5);
    }

    #[test]
    fn test_larger_grid_adds_furniture() {
        let mut config = SceneConfig::default();
        let base = compose(&config, &SceneState::new(&config)).len();

        config.desk_grid.rows += 1;
        let grown = compose(&config, &SceneState::new(&config)).len();

        let per_row = config.desk_grid.columns as usize * (config.desk_grid.desks_per_group as usize * 9 + 5);
        assert_eq!(grown - base, per_row);
    }
}
