pub mod animation;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod draw;
pub mod frame;
pub mod hud;
pub mod layout;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod texture;

// Re-export the scene entry points
pub use config::SceneConfig;
pub use draw::{DrawCommand, DrawList};
pub use scene::{compose, SceneState};
