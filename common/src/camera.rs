//! Orbital camera for the 3D atom view

use glam::{Mat4, Vec3};

/// 3D perspective camera with orbit, zoom, and pan controls.
///
/// The camera circles a target point at `distance`, parameterized by
/// yaw/pitch. Zoom is clamped to `[min_distance, max_distance]` and an
/// optional auto-rotate slowly advances the yaw every frame.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    // Orbital parameters
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
}

impl OrbitCamera {
    pub fn new(aspect_ratio: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 50.0f32.to_radians(),
            aspect_ratio,
            near: 0.1,
            far: 100.0,
            distance: 5.0,
            yaw: 0.0,
            pitch: 0.3,
            min_distance: 3.0,
            max_distance: 8.0,
            auto_rotate: false,
            auto_rotate_speed: 0.25,
        };
        camera.update_orbital();
        camera
    }

    /// Update camera position from the orbital parameters
    pub fn update_orbital(&mut self) {
        self.position = self.target
            + Vec3::new(
                self.distance * self.pitch.cos() * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                self.distance * self.pitch.cos() * self.yaw.cos(),
            );
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-1.5, 1.5);
        self.update_orbital();
    }

    /// Zoom in/out, clamped to the configured distance range
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).clamp(self.min_distance, self.max_distance);
        self.update_orbital();
    }

    /// Pan the target point within the camera plane
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(self.up).normalize_or_zero();
        let plane_up = right.cross(forward);
        self.target += (right * delta_x + plane_up * delta_y) * self.distance;
        self.update_orbital();
    }

    /// Advance the auto-rotation. No-op unless `auto_rotate` is set.
    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate {
            self.yaw += self.auto_rotate_speed * dt;
            self.update_orbital();
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Get the combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &OrbitCamera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            position: [camera.position.x, camera.position.y, camera.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamps_to_range() {
        let mut camera = OrbitCamera::new(16.0 / 9.0);
        camera.zoom(100.0);
        assert_eq!(camera.distance, camera.min_distance);
        camera.zoom(-100.0);
        assert_eq!(camera.distance, camera.max_distance);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = OrbitCamera::new(1.0);
        camera.orbit(0.0, 10.0);
        assert!(camera.pitch <= 1.5);
        camera.orbit(0.0, -20.0);
        assert!(camera.pitch >= -1.5);
    }

    #[test]
    fn test_auto_rotate_advances_yaw() {
        let mut camera = OrbitCamera::new(1.0);
        let yaw = camera.yaw;
        camera.update(1.0);
        assert_eq!(camera.yaw, yaw);

        camera.auto_rotate = true;
        camera.update(1.0);
        assert!((camera.yaw - yaw - camera.auto_rotate_speed).abs() < 1e-6);
    }

    #[test]
    fn test_position_stays_at_distance() {
        let mut camera = OrbitCamera::new(1.0);
        camera.orbit(0.7, -0.2);
        let actual = (camera.position - camera.target).length();
        assert!((actual - camera.distance).abs() < 1e-4);
    }

    #[test]
    fn test_pan_moves_target() {
        let mut camera = OrbitCamera::new(1.0);
        let before = camera.target;
        camera.pan(0.1, 0.0);
        assert!(camera.target.distance(before) > 0.0);
        // Orbit distance is preserved while panning
        let actual = (camera.position - camera.target).length();
        assert!((actual - camera.distance).abs() < 1e-4);
    }
}
