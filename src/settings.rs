use serde::{Deserialize, Serialize};

use crate::CONFY_APP_NAME;
use crate::animation::FlipConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipSettings {
    /// Seconds from click to landing.
    pub duration: f32,
    pub max_height: f32,
    pub min_half_turns: u32,
    pub half_turn_range: u32,
}

impl Default for FlipSettings {
    fn default() -> Self {
        let config = FlipConfig::default();
        Self {
            duration: config.duration,
            max_height: config.max_height,
            min_half_turns: config.min_half_turns,
            half_turn_range: config.half_turn_range,
        }
    }
}

impl FlipSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "flip").unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "flip", self) {
            log::warn!("failed to save flip settings: {e}");
        }
    }

    pub fn config(&self) -> FlipConfig {
        FlipConfig {
            duration: self.duration,
            max_height: self.max_height,
            min_half_turns: self.min_half_turns,
            half_turn_range: self.half_turn_range.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    /// Maximum pointer tilt in radians.
    pub max_tilt: f32,
    pub damping_factor: f32,
    pub background_color: [f32; 3],
    pub show_hud: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            max_tilt: std::f32::consts::FRAC_PI_6,
            damping_factor: 0.05,
            background_color: [0.0, 0.0, 0.0],
            show_hud: true,
        }
    }
}

impl ViewSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "view").unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "view", self) {
            log::warn!("failed to save view settings: {e}");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    pub enabled: bool,
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 1.0,
        }
    }
}

impl AudioSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "audio").unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "audio", self) {
            log::warn!("failed to save audio settings: {e}");
        }
    }
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub flip: FlipSettings,
    pub view: ViewSettings,
    pub audio: AudioSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            flip: FlipSettings::load(),
            view: ViewSettings::load(),
            audio: AudioSettings::load(),
        }
    }

    pub fn save(&self) {
        self.flip.save();
        self.view.save();
        self.audio.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flip_settings_match_animation_defaults() {
        let settings = FlipSettings::default();
        assert_eq!(settings.config(), FlipConfig::default());
    }

    #[test]
    fn zero_range_is_widened_to_one() {
        let settings = FlipSettings {
            half_turn_range: 0,
            ..FlipSettings::default()
        };
        assert_eq!(settings.config().half_turn_range, 1);
    }

    #[test]
    fn default_tilt_is_thirty_degrees() {
        let view = ViewSettings::default();
        assert!((view.max_tilt.to_degrees() - 30.0).abs() < 1e-4);
    }
}
