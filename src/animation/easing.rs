// Scalar curves used by the flip animation

use std::f32::consts::PI;

/// Quintic ease-out: fast start, long settle.
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(5)
}

/// Half sine arc, 0 at both ends and 1 at the midpoint.
pub fn arc(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * PI).sin()
}

/// Normalized progress of `elapsed` through `duration`, clamped to [0, 1].
/// A non-positive duration is already finished.
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn ease_out_hits_endpoints() {
        assert!(close(ease_out(0.0), 0.0));
        assert!(close(ease_out(1.0), 1.0));
        assert!(close(ease_out(0.5), 1.0 - 0.5f32.powi(5)));
    }

    #[test]
    fn ease_out_is_monotonic() {
        let mut last = ease_out(0.0);
        for i in 1..=100 {
            let v = ease_out(i as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn arc_peaks_in_the_middle() {
        assert!(close(arc(0.0), 0.0));
        assert!(close(arc(0.5), 1.0));
        assert!(arc(1.0).abs() < 1e-6);
    }

    #[test]
    fn progress_clamps() {
        assert!(close(progress(-1.0, 0.9), 0.0));
        assert!(close(progress(0.45, 0.9), 0.5));
        assert!(close(progress(5.0, 0.9), 1.0));
        assert!(close(progress(0.0, 0.0), 1.0));
    }
}
