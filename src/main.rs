use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use classroom_scene::{
    camera::Camera,
    cli::Cli,
    config::SceneConfig,
    core::{Button, Controller, WinitController},
    frame::FrameClock,
    hud::{HudStats, CONTROLS},
    lighting::LightingUniform,
    renderer::Renderer,
    scene::{self, SceneState},
};

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    camera: Camera,
    controller: WinitController,
    state: SceneState,
    clock: FrameClock,
    config: SceneConfig,
    show_hud: bool,
    cursor_grabbed: bool,
}

impl App {
    fn new(config: SceneConfig, show_hud: bool) -> Self {
        Self {
            window: None,
            renderer: None,
            camera: Camera::new(&config.camera),
            controller: WinitController::new(),
            state: SceneState::new(&config),
            clock: FrameClock::new(),
            config,
            show_hud,
            cursor_grabbed: false,
        }
    }

    fn set_cursor_grab(&mut self, grab: bool) {
        let Some(window) = &self.window else {
            return;
        };

        if grab {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
            if let Err(e) = grabbed {
                log::warn!("Cursor grab unavailable: {}", e);
            }
        } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Failed to release cursor: {}", e);
        }
        window.set_cursor_visible(!grab);
        self.cursor_grabbed = grab;
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.clock.tick();

        self.state.apply_input(&self.controller);
        self.camera
            .apply_input(&self.controller, frame.delta, self.cursor_grabbed);
        self.state.update(&frame);

        let list = scene::compose(&self.config, &self.state);
        let lighting = LightingUniform::new(&self.config, &self.state);
        let stats = HudStats::new(self.clock.fps(), &self.camera, &self.state);

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            match renderer.render(window, &self.camera, &list, &lighting, &stats) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("Surface lost, reconfiguring");
                    renderer.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    eprintln!("Render error: out of GPU memory");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {}", e),
            }
        }

        self.controller.end_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let settings = &self.config.window;
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title(settings.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        settings.width,
                        settings.height,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer = match pollster::block_on(Renderer::new(
                window.clone(),
                &self.config,
                self.show_hud,
            )) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to initialize renderer: {:#}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.renderer = Some(renderer);
            self.set_cursor_grab(true);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return; // egui consumed the event
            }
        }

        self.controller.process_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { .. } => {
                if self.controller.just_pressed(Button::Escape) {
                    event_loop.exit();
                } else if self.controller.just_pressed(Button::ReleaseCursor) {
                    self.set_cursor_grab(false);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if !self.cursor_grabbed => self.set_cursor_grab(true),
            WindowEvent::Focused(false) => self.set_cursor_grab(false),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.controller.process_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match cli.scene_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load scene config: {:#}", e);
            return Err(e);
        }
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, !cli.no_ui);

    println!("Classroom - Controls:");
    for (key, action) in CONTROLS {
        println!("  {:<14} {}", key, action);
    }
    event_loop.run_app(&mut app)?;

    Ok(())
}
