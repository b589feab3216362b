use std::sync::Arc;

use pollster::FutureExt;
use winit::{
    event::{MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    window::Window,
};

use crate::config::SceneConfig;
use crate::error::SceneResult;
use crate::frame_loop::FrameClock;
use crate::input::InputState;
use crate::render::{SceneRenderer, WgpuRenderer};
use crate::scene::camera::{OrbitControls, PerspectiveCamera};
use crate::scene::Scene;

pub struct App {
    pub window: Arc<Window>,
    pub renderer: WgpuRenderer,
    pub scene_renderer: SceneRenderer,
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub input: InputState,
    pub clock: FrameClock,
}

impl App {
    pub fn new(event_loop: &ActiveEventLoop, config: &SceneConfig) -> SceneResult<Self> {
        let window_attributes = Window::default_attributes()
            .with_title(config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(config.window.width, config.window.height));

        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let renderer = WgpuRenderer::new(window.clone()).block_on()?;
        let scene = Scene::load(config);
        let scene_renderer = SceneRenderer::new(&renderer, &scene, config);

        let (width, height) = renderer.get_viewport_size();
        let camera = PerspectiveCamera::new(&config.camera, width as f32 / height as f32);
        let controls = OrbitControls::new(&config.camera);

        Ok(Self {
            window,
            renderer,
            scene_renderer,
            scene,
            camera,
            controls,
            input: InputState::new(),
            clock: FrameClock::new(),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if self.renderer.resize(new_size) {
            self.camera.set_viewport(new_size.width, new_size.height);
            self.scene_renderer.resize(new_size.width, new_size.height);
            log::info!("Resized to {}x{}", new_size.width, new_size.height);
        }
        self.window.request_redraw();
    }

    pub fn handle_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                if state.is_pressed() {
                    self.input.handle_mouse_button_press(*button);
                } else {
                    self.input.handle_mouse_button_release(*button);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.update_mouse_position(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.handle_cursor_left();
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => self.input.handle_wheel_lines(*y),
                MouseScrollDelta::PixelDelta(position) => self.input.handle_wheel_pixels(position.y as f32),
            },
            _ => {}
        }
    }

    /// One frame: advance time, ease the camera, animate, draw, schedule the next.
    pub fn redraw(&mut self) {
        let tick = self.clock.tick_now();

        let (_, height) = self.renderer.get_viewport_size();
        let height = height as f32;
        self.controls.rotate(self.input.take_rotate_drag(), height);
        self.controls.pan(self.input.take_pan_drag(), &self.camera, height);
        self.controls.zoom(self.input.take_zoom());
        self.controls.update(&mut self.camera);

        self.scene.update(tick);
        self.scene_renderer
            .render(&mut self.renderer, &self.scene, &self.camera, self.controls.target);

        self.window.request_redraw();
    }
}
