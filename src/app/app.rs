use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use egui_wgpu::ScreenDescriptor;
use egui_winit::State;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::Window;

use crate::animation::{FlipAnimation, roll_half_turns};
use crate::audio::FlipSound;
use crate::coin::{Coin, CoinPart};
use crate::error::Result;
use crate::renderer::Renderer;
use crate::renderer::camera::{CameraController, CameraState};
use crate::settings::Settings;
use crate::texture::load_faces;
use crate::ui::{HudInfo, Ui, UiResponse};

/// Files the coin needs at startup.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub heads: PathBuf,
    pub tails: PathBuf,
    pub sound: PathBuf,
}

impl AssetPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            heads: dir.join("coin_head.svg"),
            tails: dir.join("coin_tail.svg"),
            sound: dir.join("flip.wav"),
        }
    }
}

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

impl EventResponse {
    fn none() -> Self {
        Self {
            repaint: false,
            exit: false,
        }
    }

    fn exit() -> Self {
        Self {
            repaint: false,
            exit: true,
        }
    }
}

pub struct App {
    pub window: Arc<Window>,
    renderer: Renderer,
    coin: Coin,
    flip: FlipAnimation,
    camera_controller: CameraController,
    sound: Option<FlipSound>,
    settings: Settings,
    settings_dirty: bool,
    ui: Ui,
    egui_state: State,
    clock: Instant,
}

impl App {
    pub async fn new(
        window: Arc<Window>,
        settings: Settings,
        assets: AssetPaths,
        muted: bool,
    ) -> Result<Self> {
        let coin = Coin::new();

        // Bring up the GPU while both face images load
        let (renderer, (heads, tails)) = tokio::join!(
            Renderer::new(window.clone(), &coin.mesh),
            load_faces(assets.heads.clone(), assets.tails.clone())
        );
        let mut renderer = renderer?;
        renderer.set_face_texture(CoinPart::Heads, &heads);
        renderer.set_face_texture(CoinPart::Tails, &tails);
        renderer.background_color = settings.view.background_color;

        let sound = if muted {
            log::info!("flip sound muted from the command line");
            None
        } else {
            FlipSound::try_load(&assets.sound, settings.audio.volume)
        };

        let egui_ctx = renderer.egui_context();
        let egui_state = State::new(
            egui_ctx,
            egui::viewport::ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let camera_controller =
            CameraController::new(CameraState::default(), settings.view.damping_factor);

        Ok(Self {
            window,
            renderer,
            coin,
            flip: FlipAnimation::new(settings.flip.config()),
            camera_controller,
            sound,
            settings,
            settings_dirty: false,
            ui: Ui::new(),
            egui_state,
            clock: Instant::now(),
        })
    }

    pub fn handle_event(&mut self, event: &WindowEvent) -> EventResponse {
        // Let egui handle the event first
        let egui_response = self.egui_state.on_window_event(&self.window, event);
        let egui_consumed = egui_response.consumed;
        let egui_wants_pointer = self.egui_state.egui_ctx().wants_pointer_input();

        match event {
            WindowEvent::CloseRequested => return EventResponse::exit(),
            WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if egui_consumed || event.state != ElementState::Pressed {
                    return EventResponse {
                        repaint: egui_response.repaint,
                        exit: false,
                    };
                }
                match &event.logical_key {
                    Key::Named(NamedKey::Escape) => return EventResponse::exit(),
                    Key::Named(NamedKey::Space) if !event.repeat => self.start_flip(),
                    Key::Named(NamedKey::F1) => {
                        self.ui.toggle_settings();
                        if !self.ui.show_settings {
                            self.save_settings();
                        }
                    }
                    Key::Character(c) if c.eq_ignore_ascii_case("r") => {
                        self.camera_controller.reset();
                    }
                    _ => {}
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = (position.x, position.y);
                self.camera_controller
                    .on_mouse_move(position, self.renderer.size().1);
                self.coin.follow_cursor(
                    position,
                    self.renderer.size(),
                    self.settings.view.max_tilt,
                    self.flip.is_flipping() || egui_wants_pointer,
                );
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                if egui_consumed || (pressed && egui_wants_pointer) {
                    return EventResponse {
                        repaint: egui_response.repaint,
                        exit: false,
                    };
                }
                self.camera_controller.on_mouse_button(*button, pressed);
                if press_starts_flip(*button, *state, egui_wants_pointer) {
                    self.start_flip();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if !egui_wants_pointer {
                    let lines = match delta {
                        MouseScrollDelta::LineDelta(_, y) => *y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                    };
                    self.camera_controller.on_scroll(lines);
                }
            }
            _ => {}
        }

        EventResponse::none()
    }

    /// Start a flip unless one is running.
    fn start_flip(&mut self) {
        let half_turns = roll_half_turns(&mut rand::rng(), self.flip.config());
        if !self.flip.try_start(half_turns) {
            return;
        }

        if !self.settings.audio.enabled {
            return;
        }
        if let Some(sound) = &mut self.sound {
            if let Err(e) = sound.play() {
                log::warn!("failed to play flip sound: {e}");
            }
        }
    }

    fn apply_settings(&mut self) {
        self.flip.set_config(self.settings.flip.config());
        self.camera_controller
            .set_damping_factor(self.settings.view.damping_factor);
        self.renderer.background_color = self.settings.view.background_color;
        if let Some(sound) = &mut self.sound {
            sound.set_volume(self.settings.audio.volume);
        }
    }

    fn save_settings(&mut self) {
        if self.settings_dirty {
            self.settings.save();
            self.settings_dirty = false;
        }
    }

    /// Persist any settings edited in the overlay.
    pub fn shutdown(&mut self) {
        self.save_settings();
    }

    /// Advance the animation and camera, then draw one frame.
    pub fn render(&mut self) -> std::result::Result<(), wgpu::SurfaceError> {
        let now = self.clock.elapsed().as_secs_f64();
        let frame = self.flip.update(now);
        self.coin.pose = frame.pose;
        if let Some(outcome) = frame.outcome {
            log::info!(
                "landed on {} ({} half turns)",
                outcome.face.label(),
                outcome.half_turns
            );
        }
        self.camera_controller.update();

        let hud = HudInfo {
            flips: self.flip.completed_flips(),
            face: self.flip.face(),
            last_outcome: self.flip.last_outcome(),
            flipping: self.flip.is_flipping(),
            sound_available: self.sound.is_some(),
        };

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();
        let mut response = UiResponse::default();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            response = self.ui.show(ctx, &hud, &mut self.settings);
        });

        if response.reset_settings {
            self.settings = Settings::default();
            response.settings_changed = true;
        }
        if response.settings_changed {
            self.settings_dirty = true;
            self.apply_settings();
        }
        if response.reset_camera {
            self.camera_controller.reset();
        }
        if response.settings_closed {
            self.save_settings();
        }

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = self.renderer.size();
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.renderer.render(
            &self.coin,
            self.camera_controller.state(),
            paint_jobs,
            full_output.textures_delta,
            screen_descriptor,
        )
    }

    /// Reconfigure the surface after it was lost or outdated.
    pub fn recover_surface(&mut self) {
        self.renderer.resize(self.window.inner_size());
    }
}

/// A left press over the scene flips the coin. Presses the overlay wants are its own.
fn press_starts_flip(button: MouseButton, state: ElementState, egui_wants_pointer: bool) -> bool {
    button == MouseButton::Left && state == ElementState::Pressed && !egui_wants_pointer
}
