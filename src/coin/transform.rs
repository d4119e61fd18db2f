use nalgebra_glm as glm;

use crate::animation::{CoinPose, Tilt};

/// Rotation matrix for Euler angles applied in XYZ order.
pub fn euler_xyz(x: f32, y: f32, z: f32) -> glm::Mat4 {
    let identity = glm::Mat4::identity();
    let rx = glm::rotate_x(&identity, x);
    let ry = glm::rotate_y(&identity, y);
    let rz = glm::rotate_z(&identity, z);
    rx * ry * rz
}

/// Wrapper node: carries the pointer tilt.
pub fn wrapper_matrix(tilt: &Tilt) -> glm::Mat4 {
    euler_xyz(tilt.x, 0.0, tilt.z)
}

/// Coin node: flip rotation plus toss offset.
///
/// The lift moves the coin along -Z, which is screen-up for the default
/// top-down camera.
pub fn coin_matrix(pose: &CoinPose) -> glm::Mat4 {
    let translation = glm::translation(&glm::vec3(0.0, 0.0, -pose.lift));
    translation * euler_xyz(pose.rotation_x, pose.rotation_y, 0.0)
}

pub fn model_matrix(tilt: &Tilt, pose: &CoinPose) -> glm::Mat4 {
    wrapper_matrix(tilt) * coin_matrix(pose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn transform(m: &glm::Mat4, p: glm::Vec3) -> glm::Vec3 {
        let v = m * glm::vec4(p.x, p.y, p.z, 1.0);
        glm::vec3(v.x, v.y, v.z)
    }

    #[test]
    fn resting_coin_faces_up() {
        let m = model_matrix(&Tilt::default(), &CoinPose::resting(0.0));
        let up = transform(&m, glm::vec3(0.0, 1.0, 0.0));
        assert!((up.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn half_turn_turns_coin_over() {
        let m = model_matrix(&Tilt::default(), &CoinPose::resting(PI));
        let up = transform(&m, glm::vec3(0.0, 1.0, 0.0));
        assert!((up.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn lift_moves_toward_negative_z() {
        let pose = CoinPose {
            lift: 1.8,
            ..CoinPose::resting(0.0)
        };
        let m = model_matrix(&Tilt::default(), &pose);
        let center = transform(&m, glm::vec3(0.0, 0.0, 0.0));
        assert!((center.z + 1.8).abs() < 1e-5);
    }

    #[test]
    fn tilt_x_rotates_normal_toward_positive_z() {
        let tilt = Tilt { x: 0.3, z: 0.0 };
        let m = model_matrix(&tilt, &CoinPose::resting(0.0));
        let normal = transform(&m, glm::vec3(0.0, 1.0, 0.0));
        assert!((normal.y - 0.3f32.cos()).abs() < 1e-5);
        assert!((normal.z - 0.3f32.sin()).abs() < 1e-5);
    }
}
