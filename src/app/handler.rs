use std::sync::Arc;

use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::app::app::{App, AssetPaths};
use crate::error::CoinError;
use crate::settings::Settings;

/// Options fixed at launch.
pub struct LaunchOptions {
    pub assets: AssetPaths,
    pub settings: Settings,
    pub muted: bool,
}

pub struct AppHandler {
    pub app: Option<App>,
    pub options: LaunchOptions,
    pub runtime: Runtime,
    /// Fatal startup error, reported once the event loop returns.
    pub error: Option<CoinError>,
}

impl AppHandler {
    pub fn new(options: LaunchOptions, runtime: Runtime) -> Self {
        Self {
            app: None,
            options,
            runtime,
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<App, CoinError> {
        let window_attrs = Window::default_attributes()
            .with_title("Coin Flip")
            .with_inner_size(winit::dpi::LogicalSize::new(800.0, 800.0));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        self.runtime.block_on(App::new(
            window,
            self.options.settings.clone(),
            self.options.assets.clone(),
            self.options.muted,
        ))
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(app) => self.app = Some(app),
            Err(e) => {
                log::error!("failed to start: {e}");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window.request_redraw();
            }
            if response.exit {
                app.shutdown();
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app {
            match app.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    app.recover_surface();
                }
                Err(wgpu::SurfaceError::Timeout) => {
                    log::debug!("surface timeout, skipping frame");
                }
                Err(e) => log::error!("render error: {e}"),
            }
            app.window.request_redraw();
        }
    }
}
