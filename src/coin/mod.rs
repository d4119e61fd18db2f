mod geometry;
mod transform;

pub use geometry::*;
pub use transform::*;

use crate::animation::{CoinPose, Tilt, tilt_from_cursor};

/// The coin and its wrapper node. Built once, posed every frame.
pub struct Coin {
    pub mesh: CoinMesh,
    pub tilt: Tilt,
    pub pose: CoinPose,
}

impl Coin {
    pub fn new() -> Self {
        Self {
            mesh: build_cylinder(&CylinderParams::default()),
            tilt: Tilt::default(),
            pose: CoinPose::resting(0.0),
        }
    }

    /// Lean the wrapper toward the cursor. While `frozen` (mid-flip, or the
    /// pointer is over the overlay) the last tilt is kept.
    pub fn follow_cursor(
        &mut self,
        cursor: (f64, f64),
        viewport: (u32, u32),
        max_tilt: f32,
        frozen: bool,
    ) -> bool {
        if frozen {
            return false;
        }
        self.tilt = tilt_from_cursor(cursor, viewport, max_tilt);
        true
    }

    pub fn model_matrix(&self) -> nalgebra_glm::Mat4 {
        model_matrix(&self.tilt, &self.pose)
    }
}

impl Default for Coin {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::FlipAnimation;
    use std::f32::consts::FRAC_PI_6;

    const VIEWPORT: (u32, u32) = (800, 800);

    #[test]
    fn cursor_tilts_coin_at_rest() {
        let mut coin = Coin::new();
        assert!(coin.follow_cursor((800.0, 0.0), VIEWPORT, FRAC_PI_6, false));
        assert!((coin.tilt.x - FRAC_PI_6).abs() < 1e-5);
        assert!((coin.tilt.z + FRAC_PI_6).abs() < 1e-5);
    }

    #[test]
    fn tilt_freezes_during_flip_and_resumes_after_landing() {
        let mut coin = Coin::new();
        let mut flip = FlipAnimation::default();

        coin.follow_cursor((600.0, 200.0), VIEWPORT, FRAC_PI_6, flip.is_flipping());
        let before = coin.tilt;

        assert!(flip.try_start(8));
        flip.update(0.0);
        let moved = coin.follow_cursor((0.0, 800.0), VIEWPORT, FRAC_PI_6, flip.is_flipping());
        assert!(!moved);
        assert_eq!(coin.tilt, before);

        flip.update(2.0);
        assert!(!flip.is_flipping());
        assert!(coin.follow_cursor((0.0, 800.0), VIEWPORT, FRAC_PI_6, flip.is_flipping()));
        assert_ne!(coin.tilt, before);
        assert!((coin.tilt.x + FRAC_PI_6).abs() < 1e-5);
    }
}
