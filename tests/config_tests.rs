use classroom_scene::config::SceneConfig;
use classroom_scene::{compose, SceneState};
use glam::Vec3;
use std::io::Write;

#[cfg(test)]
mod load_tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("classroom-scene-{}-{}.json", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_overrides_from_file() {
        let path = write_temp(
            "overrides",
            r#"{
                "window": { "title": "Room 101" },
                "fan": { "blades": 5 },
                "posters": [
                    { "texture": "a.png", "position": [0, 9, -24.9], "scale": [10, 1, 8] },
                    { "texture": "b.png", "position": [10, 9, -24.9], "scale": [5, 1, 5], "rotation_degrees": 90 }
                ]
            }"#,
        );

        let config = SceneConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.window.title, "Room 101");
        assert_eq!(config.window.width, 1600);
        assert_eq!(config.fan.blades, 5);
        assert_eq!(config.posters.len(), 2);
        assert_eq!(config.posters[0].rotation_degrees, 0.0);
        assert_eq!(config.posters[0].rotation_axis, Vec3::X);
    }

    #[test]
    fn test_loaded_config_composes() {
        let config = SceneConfig::from_json(r#"{ "fan": { "blades": 5 }, "posters": [] }"#).unwrap();
        let default = SceneConfig::default();

        let list = compose(&config, &SceneState::new(&config));
        let baseline = compose(&default, &SceneState::new(&default));
        // two extra blade arms, one poster fewer
        assert_eq!(list.len(), baseline.len() + 2 * 2 - 1);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let path = write_temp("invalid", r#"{ "door": { "center_z": 0.0 } }"#);
        let err = SceneConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        let message = format!("{:#}", err);
        assert!(message.contains(&path.display().to_string()));
        assert!(message.contains("window opening"));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = SceneConfig::load("assets/classroom.json").unwrap();
        let default = SceneConfig::default();
        assert_eq!(config.room, default.room);
        assert_eq!(config.desk_grid, default.desk_grid);
        assert_eq!(config.posters[0].texture, default.posters[0].texture);

        let poster = classroom_scene::texture::load_rgba(&config.posters[0].texture).unwrap();
        assert_eq!(poster.dimensions(), (256, 192));
    }
}
