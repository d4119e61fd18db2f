use crate::animation::{CoinFace, FlipOutcome};
use crate::settings::Settings;

/// What the overlay needs to know about the coin this frame.
pub struct HudInfo {
    pub flips: u32,
    /// Face toward the camera at rest.
    pub face: CoinFace,
    pub last_outcome: Option<FlipOutcome>,
    pub flipping: bool,
    pub sound_available: bool,
}

/// Actions requested from the overlay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiResponse {
    pub settings_changed: bool,
    /// The settings window was closed this frame.
    pub settings_closed: bool,
    pub reset_camera: bool,
    pub reset_settings: bool,
}

pub struct Ui {
    pub show_settings: bool,
}

impl Ui {
    pub fn new() -> Self {
        Self {
            show_settings: false,
        }
    }

    pub fn toggle_settings(&mut self) {
        self.show_settings = !self.show_settings;
    }

    pub fn show(&mut self, ctx: &egui::Context, hud: &HudInfo, settings: &mut Settings) -> UiResponse {
        let mut response = UiResponse::default();

        if settings.view.show_hud {
            egui::Area::new(egui::Id::new("hud"))
                .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
                .interactable(false)
                .show(ctx, |ui| {
                    ui.label(hint_text(hud));
                    ui.label(format!("Flips: {}", hud.flips));
                    if !hud.flipping {
                        ui.label(format!("Showing: {}", hud.face.label()));
                    }
                    if let Some(outcome) = hud.last_outcome {
                        ui.label(outcome_text(&outcome));
                    }
                });
        }

        let was_open = self.show_settings;
        let mut open = self.show_settings;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .default_pos(egui::pos2(12.0, 96.0))
            .show(ctx, |ui| {
                response.settings_changed |= flip_section(ui, settings);
                response.settings_changed |= view_section(ui, settings);
                response.settings_changed |= audio_section(ui, settings, hud.sound_available);

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Reset camera").clicked() {
                        response.reset_camera = true;
                    }
                    if ui.button("Restore defaults").clicked() {
                        response.reset_settings = true;
                    }
                });
            });
        self.show_settings = open;
        response.settings_closed = was_open && !open;

        response
    }
}

fn hint_text(hud: &HudInfo) -> &'static str {
    if hud.flipping {
        "Flipping..."
    } else {
        "Click the coin (or press Space) to flip. F1: settings"
    }
}

pub fn outcome_text(outcome: &FlipOutcome) -> String {
    format!(
        "Last flip: {} ({} half turns)",
        outcome.face.label(),
        outcome.half_turns
    )
}

fn flip_section(ui: &mut egui::Ui, settings: &mut Settings) -> bool {
    let flip = &mut settings.flip;
    let mut changed = false;
    ui.heading("Flip");
    changed |= ui
        .add(egui::Slider::new(&mut flip.duration, 0.2..=3.0).text("duration (s)"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut flip.max_height, 0.0..=4.0).text("height"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut flip.min_half_turns, 1..=24).text("min half turns"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut flip.half_turn_range, 1..=16).text("extra half turns"))
        .changed();
    changed
}

fn view_section(ui: &mut egui::Ui, settings: &mut Settings) -> bool {
    let view = &mut settings.view;
    let mut changed = false;
    ui.heading("View");

    let mut tilt_degrees = view.max_tilt.to_degrees();
    if ui
        .add(egui::Slider::new(&mut tilt_degrees, 0.0..=60.0).text("max tilt (°)"))
        .changed()
    {
        view.max_tilt = tilt_degrees.to_radians();
        changed = true;
    }
    changed |= ui
        .add(egui::Slider::new(&mut view.damping_factor, 0.01..=1.0).text("orbit damping"))
        .changed();
    ui.horizontal(|ui| {
        ui.label("background");
        changed |= ui.color_edit_button_rgb(&mut view.background_color).changed();
    });
    changed |= ui.checkbox(&mut view.show_hud, "show hud").changed();
    changed
}

fn audio_section(ui: &mut egui::Ui, settings: &mut Settings, sound_available: bool) -> bool {
    let audio = &mut settings.audio;
    let mut changed = false;
    ui.heading("Sound");
    ui.add_enabled_ui(sound_available, |ui| {
        changed |= ui.checkbox(&mut audio.enabled, "play flip sound").changed();
        changed |= ui
            .add(egui::Slider::new(&mut audio.volume, 0.0..=1.0).text("volume"))
            .changed();
    });
    if !sound_available {
        ui.label("No sound loaded");
    }
    changed
}
