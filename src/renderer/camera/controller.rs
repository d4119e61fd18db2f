use std::f32::consts::TAU;

use super::CameraState;
use super::state::{MAX_POLAR, MIN_POLAR};

const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 50.0;
/// Distance scale per wheel line.
const ZOOM_STEP: f32 = 0.95;

/// Orbit controls with damping: input accumulates a pending delta that
/// `update` bleeds into the camera each frame.
pub struct CameraController {
    state: CameraState,
    damping_factor: f32,
    right_mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_zoom: f32,
}

impl CameraController {
    pub fn new(state: CameraState, damping_factor: f32) -> Self {
        Self {
            state,
            damping_factor: damping_factor.clamp(0.001, 1.0),
            right_mouse_pressed: false,
            last_mouse_pos: None,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 1.0,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn set_damping_factor(&mut self, damping_factor: f32) {
        self.damping_factor = damping_factor.clamp(0.001, 1.0);
    }

    /// Handle mouse button press/release
    pub fn on_mouse_button(&mut self, button: winit::event::MouseButton, pressed: bool) {
        if button == winit::event::MouseButton::Right {
            self.right_mouse_pressed = pressed;
            if !pressed {
                self.last_mouse_pos = None;
            }
        }
    }

    /// Handle mouse movement; returns true when the drag rotated the camera.
    pub fn on_mouse_move(&mut self, position: (f64, f64), viewport_height: u32) -> bool {
        if !self.right_mouse_pressed {
            self.last_mouse_pos = None;
            return false;
        }

        let mut handled = false;
        if let Some(last_pos) = self.last_mouse_pos {
            let delta_x = (position.0 - last_pos.0) as f32;
            let delta_y = (position.1 - last_pos.1) as f32;
            self.rotate(delta_x, delta_y, viewport_height);
            handled = true;
        }
        self.last_mouse_pos = Some(position);
        handled
    }

    /// A full window height of drag is one full turn.
    fn rotate(&mut self, delta_x: f32, delta_y: f32, viewport_height: u32) {
        let height = viewport_height.max(1) as f32;
        self.pending_azimuth -= TAU * delta_x / height;
        self.pending_polar -= TAU * delta_y / height;
    }

    /// Positive `lines` zooms in.
    pub fn on_scroll(&mut self, lines: f32) {
        self.pending_zoom *= ZOOM_STEP.powf(lines);
    }

    /// Apply one frame of damped motion. Returns true while the camera moves.
    pub fn update(&mut self) -> bool {
        let k = self.damping_factor;

        self.state.azimuth += self.pending_azimuth * k;
        self.state.polar =
            (self.state.polar + self.pending_polar * k).clamp(MIN_POLAR, MAX_POLAR);
        let zoom = self.pending_zoom.powf(k);
        self.state.distance = (self.state.distance * zoom).clamp(MIN_DISTANCE, MAX_DISTANCE);

        self.pending_azimuth *= 1.0 - k;
        self.pending_polar *= 1.0 - k;
        self.pending_zoom = self.pending_zoom.powf(1.0 - k);

        let moving = self.pending_azimuth.abs() > 1e-5
            || self.pending_polar.abs() > 1e-5
            || (self.pending_zoom - 1.0).abs() > 1e-5;
        if !moving {
            self.pending_azimuth = 0.0;
            self.pending_polar = 0.0;
            self.pending_zoom = 1.0;
        }
        moving
    }

    /// Reset camera to defaults
    pub fn reset(&mut self) {
        self.state.reset();
        self.last_mouse_pos = None;
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_zoom = 1.0;
    }
}
