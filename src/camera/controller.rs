use glam::{Mat4, Quat, Vec2, Vec3};

use super::core::Camera;
use crate::options::CameraOptions;

/// Radians of orbit per pixel of drag at rotate speed 1.0.
const ROTATE_RADIANS_PER_PIXEL: f32 = 0.01;
/// World units of pan per pixel of drag at pan speed 1.0 and distance 1.
const PAN_UNITS_PER_PIXEL: f32 = 0.001;
/// Fractional distance change per scroll unit at zoom speed 1.0.
const ZOOM_STEP: f32 = 0.05;
/// Pending rotation below this magnitude is dropped.
const SETTLE_EPSILON: f32 = 1e-5;

/// Orbit controls around a focus point.
///
/// Rotation input accumulates and is bled out by `damping` on every
/// [`update`](Self::update); pan and zoom apply immediately. Zoom is
/// clamped to the configured distance range.
#[derive(Debug, Clone)]
pub struct ViewControls {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    pending_rotation: Vec2,

    camera: Camera,

    home_distance: f32,
    min_distance: f32,
    max_distance: f32,
    damping: f32,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
}

impl ViewControls {
    /// Controls at the home pose.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let mut controls = Self {
            orientation: Quat::IDENTITY,
            distance: options.home_distance,
            focus_point: Vec3::ZERO,
            pending_rotation: Vec2::ZERO,
            camera: Camera::from_options(options, aspect),
            home_distance: options.home_distance,
            min_distance: options.min_distance,
            max_distance: options.max_distance,
            damping: options.damping.clamp(0.0, 1.0),
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
        };
        controls.update_camera_pos();
        controls
    }

    /// Camera for the current pose.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// World-to-view matrix for the current pose.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    /// Perspective projection for the current viewport.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.camera.projection_matrix()
    }

    /// Eye distance from the focus point.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Point the camera orbits around.
    #[must_use]
    pub fn focus_point(&self) -> Vec3 {
        self.focus_point
    }

    /// Whether no damped rotation is still pending.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pending_rotation == Vec2::ZERO
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Update the viewport aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Queue an orbit by `delta` pixels of drag.
    pub fn rotate(&mut self, delta: Vec2) {
        self.pending_rotation +=
            delta * ROTATE_RADIANS_PER_PIXEL * self.rotate_speed;
    }

    /// Move the focus point by `delta` pixels of drag in the view plane.
    pub fn pan(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        let scale = PAN_UNITS_PER_PIXEL * self.pan_speed * self.distance;

        let translation = right * (-delta.x * scale) + up * (delta.y * scale);

        self.focus_point += translation;
        self.update_camera_pos();
    }

    /// Zoom in (positive) or out (negative), clamped to the distance range.
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * ZOOM_STEP * self.zoom_speed;
        self.distance =
            self.distance.clamp(self.min_distance, self.max_distance);
        self.update_camera_pos();
    }

    /// Apply one frame of damped rotation.
    pub fn update(&mut self) {
        if self.is_settled() {
            return;
        }
        let step = self.pending_rotation * self.damping;
        self.pending_rotation -= step;
        if self.pending_rotation.length() < SETTLE_EPSILON {
            self.pending_rotation = Vec2::ZERO;
        }

        // Horizontal orbit around the camera's up vector
        let up = self.orientation * Vec3::Y;
        self.orientation =
            Quat::from_axis_angle(up, -step.x) * self.orientation;

        // Vertical orbit around the camera's right vector
        let right = self.orientation * Vec3::X;
        self.orientation =
            Quat::from_axis_angle(right, -step.y) * self.orientation;
        self.orientation = self.orientation.normalize();

        self.update_camera_pos();
    }

    /// Return to the home pose, dropping any pending rotation.
    pub fn reset(&mut self) {
        self.orientation = Quat::IDENTITY;
        self.distance = self.home_distance;
        self.focus_point = Vec3::ZERO;
        self.pending_rotation = Vec2::ZERO;
        self.update_camera_pos();
    }
}
