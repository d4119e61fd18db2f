use nalgebra_glm as glm;

/// Smallest polar angle; straight down would leave `look_at` without an up axis.
pub const MIN_POLAR: f32 = 1e-3;
pub const MAX_POLAR: f32 = std::f32::consts::FRAC_PI_2;

/// Orbit camera on a sphere around `target`, Y up.
///
/// `polar` is measured from +Y, `azimuth` around Y starting at +Z.
#[derive(Debug, Clone)]
pub struct CameraState {
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
    pub target: [f32; 3],
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub default_azimuth: f32,
    pub default_polar: f32,
    pub default_distance: f32,
}

impl CameraState {
    pub fn new(azimuth: f32, polar: f32, distance: f32, target: [f32; 3]) -> Self {
        let polar = polar.clamp(MIN_POLAR, MAX_POLAR);
        Self {
            azimuth,
            polar,
            distance,
            target,
            fov_y: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            default_azimuth: azimuth,
            default_polar: polar,
            default_distance: distance,
        }
    }

    pub fn reset(&mut self) {
        self.azimuth = self.default_azimuth;
        self.polar = self.default_polar;
        self.distance = self.default_distance;
    }

    pub fn eye(&self) -> glm::Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        glm::vec3(
            self.target[0] + self.distance * sin_p * sin_a,
            self.target[1] + self.distance * cos_p,
            self.target[2] + self.distance * sin_p * cos_a,
        )
    }

    pub fn view(&self) -> glm::Mat4 {
        let target = glm::vec3(self.target[0], self.target[1], self.target[2]);
        glm::look_at(&self.eye(), &target, &glm::vec3(0.0, 1.0, 0.0))
    }

    pub fn projection(&self, aspect: f32) -> glm::Mat4 {
        // wgpu clip space has depth in [0, 1]
        glm::perspective_rh_zo(aspect.max(1e-4), self.fov_y, self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f32) -> glm::Mat4 {
        self.projection(aspect) * self.view()
    }
}

impl Default for CameraState {
    /// Looking straight down at the coin from (0, 3, 0).
    fn default() -> Self {
        Self::new(0.0, 0.0, 3.0, [0.0, 0.0, 0.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_eye_is_above_origin() {
        let eye = CameraState::default().eye();
        assert!(eye.x.abs() < 1e-6);
        assert!((eye.y - 3.0).abs() < 1e-5);
        assert!(eye.z.abs() < 1e-2);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = CameraState::default();
        let clip = camera.view_proj(16.0 / 9.0) * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-4);
        assert!((clip.y / clip.w).abs() < 1e-4);
    }

    #[test]
    fn negative_z_is_screen_up() {
        let camera = CameraState::default();
        let clip = camera.view_proj(1.0) * glm::vec4(0.0, 0.0, -1.0, 1.0);
        assert!(clip.y / clip.w > 0.1);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut camera = CameraState::default();
        camera.azimuth = 2.0;
        camera.polar = 1.0;
        camera.distance = 9.0;
        camera.reset();
        assert_eq!(camera.azimuth, 0.0);
        assert_eq!(camera.polar, MIN_POLAR);
        assert_eq!(camera.distance, 3.0);
    }
}
