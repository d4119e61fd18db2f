// Flip animation: maps elapsed time to a coin pose

use std::f32::consts::PI;

use rand::Rng;

use super::easing::{arc, ease_out, progress};

/// Yaw the coin rests at so its face art is upright for the default camera.
pub const INITIAL_Y_ROTATION: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipConfig {
    pub duration: f32,
    pub max_height: f32,
    pub min_half_turns: u32,
    pub half_turn_range: u32,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            duration: 0.9,
            max_height: 1.8,
            min_half_turns: 8,
            half_turn_range: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinFace {
    Heads,
    Tails,
}

impl CoinFace {
    pub fn flipped(self) -> Self {
        match self {
            CoinFace::Heads => CoinFace::Tails,
            CoinFace::Tails => CoinFace::Heads,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CoinFace::Heads => "Heads",
            CoinFace::Tails => "Tails",
        }
    }
}

/// Local transform of the coin node for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinPose {
    pub rotation_x: f32,
    pub rotation_y: f32,
    /// Toss height above the resting plane.
    pub lift: f32,
}

impl CoinPose {
    pub fn resting(rotation_x: f32) -> Self {
        Self {
            rotation_x,
            rotation_y: INITIAL_Y_ROTATION,
            lift: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipOutcome {
    pub face: CoinFace,
    pub half_turns: u32,
}

/// Result of advancing the animation by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipFrame {
    pub pose: CoinPose,
    /// Set on the frame the flip lands.
    pub outcome: Option<FlipOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FlipState {
    Idle,
    Flipping {
        /// Latched on the first frame after the click.
        started_at: Option<f64>,
        half_turns: u32,
        start_rotation: f32,
    },
}

/// Pose of a flip at normalized time `t`.
pub fn pose_at(t: f32, half_turns: u32, start_rotation: f32, config: &FlipConfig) -> CoinPose {
    let t = t.clamp(0.0, 1.0);
    let spin = half_turns as f32 * PI * t * ease_out(t);
    CoinPose {
        rotation_x: start_rotation + spin,
        rotation_y: INITIAL_Y_ROTATION,
        lift: config.max_height * arc(t),
    }
}

/// Random number of half turns in `[min_half_turns, min_half_turns + half_turn_range)`.
pub fn roll_half_turns<R: Rng + ?Sized>(rng: &mut R, config: &FlipConfig) -> u32 {
    config.min_half_turns + rng.random_range(0..config.half_turn_range.max(1))
}

pub struct FlipAnimation {
    config: FlipConfig,
    state: FlipState,
    rotation_x: f32,
    face: CoinFace,
    completed: u32,
    last_outcome: Option<FlipOutcome>,
}

impl FlipAnimation {
    pub fn new(config: FlipConfig) -> Self {
        Self {
            config,
            state: FlipState::Idle,
            rotation_x: 0.0,
            face: CoinFace::Heads,
            completed: 0,
            last_outcome: None,
        }
    }

    pub fn config(&self) -> &FlipConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FlipConfig) {
        self.config = config;
    }

    pub fn is_flipping(&self) -> bool {
        matches!(self.state, FlipState::Flipping { .. })
    }

    /// Rest angle for a face. Always in `[0, 2π)` so it never builds up across flips.
    fn rest_rotation(face: CoinFace) -> f32 {
        match face {
            CoinFace::Heads => 0.0,
            CoinFace::Tails => PI,
        }
    }

    /// Face currently pointing at the camera while at rest.
    pub fn face(&self) -> CoinFace {
        self.face
    }

    pub fn completed_flips(&self) -> u32 {
        self.completed
    }

    pub fn last_outcome(&self) -> Option<FlipOutcome> {
        self.last_outcome
    }

    /// Begin a flip. Returns false if one is already in progress.
    pub fn try_start(&mut self, half_turns: u32) -> bool {
        if self.is_flipping() {
            return false;
        }
        self.state = FlipState::Flipping {
            started_at: None,
            half_turns,
            start_rotation: self.rotation_x,
        };
        log::debug!("flip started: {half_turns} half turns");
        true
    }

    /// Advance to `now` (seconds on any monotonic clock).
    pub fn update(&mut self, now: f64) -> FlipFrame {
        let FlipState::Flipping {
            started_at,
            half_turns,
            start_rotation,
        } = &mut self.state
        else {
            return FlipFrame {
                pose: CoinPose::resting(self.rotation_x),
                outcome: None,
            };
        };

        let start = *started_at.get_or_insert(now);
        let elapsed = (now - start).max(0.0) as f32;
        let t = progress(elapsed, self.config.duration);
        let (half_turns, start_rotation) = (*half_turns, *start_rotation);

        if t < 1.0 {
            return FlipFrame {
                pose: pose_at(t, half_turns, start_rotation, &self.config),
                outcome: None,
            };
        }

        self.state = FlipState::Idle;
        if half_turns % 2 == 1 {
            self.face = self.face.flipped();
        }
        self.rotation_x = Self::rest_rotation(self.face);
        self.completed += 1;

        let outcome = FlipOutcome {
            face: self.face,
            half_turns,
        };
        self.last_outcome = Some(outcome);
        log::debug!(
            "flip landed on {} after {} half turns",
            outcome.face.label(),
            half_turns
        );

        FlipFrame {
            pose: CoinPose::resting(self.rotation_x),
            outcome: Some(outcome),
        }
    }
}

impl Default for FlipAnimation {
    fn default() -> Self {
        Self::new(FlipConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn pose_is_at_rest_at_both_ends() {
        let config = FlipConfig::default();
        let start = pose_at(0.0, 9, 0.25, &config);
        assert!(close(start.rotation_x, 0.25));
        assert!(close(start.lift, 0.0));

        let end = pose_at(1.0, 9, 0.25, &config);
        assert!(close(end.rotation_x, 0.25 + 9.0 * PI));
        assert!(end.lift.abs() < 1e-5);
        assert!(close(end.rotation_y, INITIAL_Y_ROTATION));
    }

    #[test]
    fn lift_peaks_halfway() {
        let config = FlipConfig::default();
        let mid = pose_at(0.5, 8, 0.0, &config);
        assert!(close(mid.lift, config.max_height));
        let expected = 8.0 * PI * 0.5 * ease_out(0.5);
        assert!(close(mid.rotation_x, expected));
    }

    #[test]
    fn rolls_stay_in_range() {
        let config = FlipConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let n = roll_half_turns(&mut rng, &config);
            assert!((8..16).contains(&n), "rolled {n}");
        }
    }

    #[test]
    fn cannot_restart_while_flipping() {
        let mut flip = FlipAnimation::default();
        assert!(flip.try_start(8));
        assert!(!flip.try_start(9));
        flip.update(10.0);
        assert!(!flip.try_start(9));
        assert!(flip.is_flipping());
    }

    #[test]
    fn clock_starts_on_first_update() {
        let mut flip = FlipAnimation::default();
        flip.try_start(8);
        let first = flip.update(100.0);
        assert!(close(first.pose.rotation_x, 0.0));
        assert!(first.outcome.is_none());

        let halfway = flip.update(100.45);
        assert!(close(halfway.pose.lift, 1.8));
    }

    #[test]
    fn landing_resets_lift_and_keeps_rotation() {
        let mut flip = FlipAnimation::default();
        flip.try_start(9);
        flip.update(0.0);
        let landed = flip.update(2.0);

        assert_eq!(landed.pose.lift, 0.0);
        assert_eq!(landed.pose.rotation_x, PI);
        assert!(!flip.is_flipping());
        assert_eq!(
            landed.outcome,
            Some(FlipOutcome {
                face: CoinFace::Tails,
                half_turns: 9
            })
        );

        let idle = flip.update(3.0);
        assert_eq!(idle.pose, CoinPose::resting(PI));
        assert!(idle.outcome.is_none());
    }

    #[test]
    fn next_flip_starts_from_resting_rotation() {
        let mut flip = FlipAnimation::default();
        flip.try_start(8);
        flip.update(0.0);
        flip.update(1.0);

        assert!(flip.try_start(9));
        let start = flip.update(5.0);
        assert_eq!(start.pose.rotation_x, 0.0);
        let mid = flip.update(5.45);
        assert!(mid.pose.rotation_x > 0.0);
        let end = flip.update(6.0);
        assert_eq!(end.pose.rotation_x, PI);
        assert_eq!(flip.face(), CoinFace::Tails);
        assert_eq!(flip.completed_flips(), 2);

        assert!(flip.try_start(8));
        let again = flip.update(7.0);
        assert_eq!(again.pose.rotation_x, PI);
    }

    #[test]
    fn rest_rotation_stays_flat_over_many_flips() {
        let mut flip = FlipAnimation::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut now = 0.0;
        for _ in 0..5000 {
            let half_turns = roll_half_turns(&mut rng, flip.config());
            assert!(flip.try_start(half_turns));
            flip.update(now);
            let landed = flip.update(now + 2.0);
            now += 3.0;

            let rest = landed.pose.rotation_x;
            let off = (rest - (rest / PI).round() * PI).abs();
            assert!(off < 1e-4, "rest rotation {rest} is {off} rad off a multiple of pi");
            assert!((0.0..std::f32::consts::TAU).contains(&rest));
        }
        assert_eq!(flip.completed_flips(), 5000);
    }

    #[test]
    fn zero_duration_lands_immediately() {
        let mut flip = FlipAnimation::new(FlipConfig {
            duration: 0.0,
            ..FlipConfig::default()
        });
        flip.try_start(11);
        let frame = flip.update(1.0);
        assert!(frame.outcome.is_some());
        assert_eq!(flip.face(), CoinFace::Tails);
    }

    #[test]
    fn clock_going_backwards_counts_as_no_time() {
        let mut flip = FlipAnimation::default();
        flip.try_start(8);
        flip.update(5.0);
        let frame = flip.update(4.0);
        assert!(close(frame.pose.rotation_x, 0.0));
        assert!(flip.is_flipping());
    }
}
