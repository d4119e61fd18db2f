/// Rotation of the coin wrapper following the pointer, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    pub x: f32,
    pub z: f32,
}

/// Map a cursor position in window pixels to a wrapper tilt.
///
/// The cursor is normalized to [-1, 1] on both axes with +y pointing up, so
/// the coin leans toward the pointer. `max_tilt` is reached at the window
/// edges.
pub fn tilt_from_cursor(cursor: (f64, f64), viewport: (u32, u32), max_tilt: f32) -> Tilt {
    let (width, height) = viewport;
    if width == 0 || height == 0 {
        return Tilt::default();
    }

    let x = (cursor.0 / width as f64) as f32 * 2.0 - 1.0;
    let y = -((cursor.1 / height as f64) as f32) * 2.0 + 1.0;

    Tilt {
        x: y * max_tilt,
        z: -x * max_tilt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_6;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn center_is_flat() {
        let tilt = tilt_from_cursor((400.0, 300.0), (800, 600), FRAC_PI_6);
        assert!(close(tilt.x, 0.0));
        assert!(close(tilt.z, 0.0));
    }

    #[test]
    fn corners_reach_max_tilt() {
        let top_left = tilt_from_cursor((0.0, 0.0), (800, 600), FRAC_PI_6);
        assert!(close(top_left.x, FRAC_PI_6));
        assert!(close(top_left.z, FRAC_PI_6));

        let bottom_right = tilt_from_cursor((800.0, 600.0), (800, 600), FRAC_PI_6);
        assert!(close(bottom_right.x, -FRAC_PI_6));
        assert!(close(bottom_right.z, -FRAC_PI_6));
    }

    #[test]
    fn empty_viewport_gives_no_tilt() {
        assert_eq!(tilt_from_cursor((10.0, 10.0), (0, 600), 1.0), Tilt::default());
    }
}
