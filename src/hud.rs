// hud.rs - egui overlay with frame rate, camera and toggle readouts
use glam::Vec3;
use winit::window::Window;

use crate::camera::Camera;
use crate::scene::SceneState;

/// Key legend shown in the HUD and printed at start-up
pub const CONTROLS: &[(&str, &str)] = &[
    ("WASD", "move"),
    ("Space / Shift", "up / down"),
    ("Mouse", "look"),
    ("Scroll", "zoom"),
    ("C", "lights"),
    ("V", "fan"),
    ("B", "projector"),
    ("Z", "door"),
    ("Tab", "release cursor"),
    ("Esc", "quit"),
];

/// Snapshot of what the HUD displays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudStats {
    pub fps: f32,
    pub camera_position: Vec3,
    pub fov_degrees: f32,
    pub lights_on: bool,
    pub fan_on: bool,
    pub projector_on: bool,
    pub door_open: bool,
}

impl HudStats {
    pub fn new(fps: f32, camera: &Camera, state: &SceneState) -> Self {
        Self {
            fps,
            camera_position: camera.position,
            fov_degrees: camera.fov_degrees,
            lights_on: state.lights_on,
            fan_on: state.fan_on,
            projector_on: state.projector_on,
            door_open: state.door_open,
        }
    }

    pub fn toggles(&self) -> [(&'static str, bool); 4] {
        [
            ("Lights", self.lights_on),
            ("Fan", self.fan_on),
            ("Projector", self.projector_on),
            ("Door", self.door_open),
        ]
    }

    pub fn frame_time_ms(&self) -> f32 {
        if self.fps > 0.0 {
            1000.0 / self.fps
        } else {
            0.0
        }
    }
}

pub struct Hud {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Hud {
    pub fn new(device: &wgpu::Device, window: &Window, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer =
            egui_wgpu::Renderer::new(device, format, egui_wgpu::RendererOptions::default());
        Self {
            ctx,
            state,
            renderer,
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Record the overlay into `encoder`, loading over the scene already in `view`
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        window: &Window,
        size_in_pixels: [u32; 2],
        stats: &HudStats,
    ) {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| {
            egui::Window::new("Classroom")
                .title_bar(true)
                .resizable(false)
                .fixed_pos(egui::pos2(10.0, 10.0))
                .default_width(220.0)
                .show(ctx, |ui| {
                    ui.heading(
                        egui::RichText::new(format!("{:.0} FPS", stats.fps))
                            .size(28.0)
                            .color(egui::Color32::from_rgb(74, 158, 255)),
                    );
                    ui.label(
                        egui::RichText::new(format!("{:.2} ms", stats.frame_time_ms()))
                            .size(14.0)
                            .color(egui::Color32::GRAY),
                    );

                    ui.add_space(8.0);
                    ui.separator();

                    ui.label(
                        egui::RichText::new("Camera")
                            .size(16.0)
                            .color(egui::Color32::from_rgb(100, 200, 100)),
                    );
                    let p = stats.camera_position;
                    ui.monospace(format!("Pos: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
                    ui.monospace(format!("FOV: {:.1}°", stats.fov_degrees));

                    ui.add_space(8.0);
                    ui.separator();

                    ui.label(
                        egui::RichText::new("Scene")
                            .size(16.0)
                            .color(egui::Color32::from_rgb(200, 150, 100)),
                    );
                    for (name, on) in stats.toggles() {
                        let (text, color) = if on {
                            ("on", egui::Color32::from_rgb(100, 255, 100))
                        } else {
                            ("off", egui::Color32::from_rgb(255, 100, 100))
                        };
                        ui.horizontal(|ui| {
                            ui.monospace(format!("{:<10}", name));
                            ui.label(egui::RichText::new(text).color(color));
                        });
                    }

                    ui.add_space(8.0);
                    ui.separator();

                    egui::CollapsingHeader::new("Controls")
                        .default_open(true)
                        .show(ui, |ui| {
                            for (key, action) in CONTROLS {
                                ui.monospace(format!("{:<14} {}", key, action));
                            }
                        });
                });
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .ctx
            .tessellate(full_output.shapes, self.ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: window.scale_factor() as f32,
        };
        self.renderer
            .update_buffers(device, queue, encoder, &tris, &screen_descriptor);

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("HUD Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();
            self.renderer.render(&mut pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;

    #[test]
    fn test_stats_mirror_state() {
        let config = SceneConfig::default();
        let camera = Camera::new(&config.camera);
        let mut state = SceneState::new(&config);
        state.fan_on = true;

        let stats = HudStats::new(60.0, &camera, &state);
        assert_eq!(stats.camera_position, config.camera.position);
        assert_eq!(
            stats.toggles(),
            [("Lights", false), ("Fan", true), ("Projector", false), ("Door", false)]
        );
    }

    #[test]
    fn test_frame_time() {
        let config = SceneConfig::default();
        let camera = Camera::new(&config.camera);
        let state = SceneState::new(&config);
        assert!((HudStats::new(50.0, &camera, &state).frame_time_ms() - 20.0).abs() < 1e-4);
        assert_eq!(HudStats::new(0.0, &camera, &state).frame_time_ms(), 0.0);
    }

    #[test]
    fn test_legend_lists_every_toggle_key() {
        for key in ["C", "V", "B", "Z"] {
            assert!(CONTROLS.iter().any(|(k, _)| *k == key));
        }
    }
}
