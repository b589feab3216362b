use env_logger::Env;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowId,
};

use duck_pond::app::App;
use duck_pond::config::SceneConfig;
use duck_pond::error::SceneResult;

struct DuckPondApp {
    config: SceneConfig,
    app: Option<App>,
}

impl ApplicationHandler for DuckPondApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }

        match App::new(event_loop, &self.config) {
            Ok(app) => {
                app.window.request_redraw();
                self.app = Some(app);
            }
            Err(e) => {
                log::error!("Failed to start: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => app.resize(new_size),
            WindowEvent::RedrawRequested => app.redraw(),
            other => app.handle_input(&other),
        }
    }
}

fn main() -> SceneResult<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    let mut app = DuckPondApp {
        config: SceneConfig::load_or_default(),
        app: None,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
