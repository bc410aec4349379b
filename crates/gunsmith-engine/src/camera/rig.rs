//! Camera framing rig: fit-to-bounds dolly and pivot orbit

use glam::{Quat, Vec3};
use gunsmith_core::{Aabb, Transform};

use super::{FramingConfig, ViewPose};

/// Perspective parameters of the preview camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Width / height
    pub aspect: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            aspect: 16.0 / 9.0,
        }
    }
}

/// Distance along the view axis at which the padded box fits both the
/// vertical and the horizontal frustum. Never below `min_distance`.
pub fn fit_distance(bounds: &Aabb, projection: Projection, padding: f32, min_distance: f32) -> f32 {
    let padding = padding.max(1.0);
    let height = 2.0 * bounds.half_extents.y * padding;
    let width = 2.0 * bounds.half_extents.x * padding;

    let half_v_fov = projection.fov_y_degrees.to_radians() * 0.5;
    let half_h_fov = (half_v_fov.tan() * projection.aspect).atan();

    let dist_v = (height * 0.5) / half_v_fov.tan();
    let dist_h = (width * 0.5) / half_h_fov.tan();

    let dist = dist_v.max(dist_h).max(min_distance);
    if dist.is_finite() {
        dist
    } else {
        min_distance
    }
}

/// Camera framing rig
#[derive(Debug, Clone)]
pub struct FramingRig {
    /// Configuration
    pub config: FramingConfig,
    /// Point the holder orbits around, once established by a fit
    focus_center: Option<Vec3>,
    /// Accumulated model yaw in degrees, used while no focus center is set
    model_yaw: f32,
}

impl FramingRig {
    /// Create a rig with custom config
    pub fn with_config(config: FramingConfig) -> Self {
        Self {
            config,
            focus_center: None,
            model_yaw: 0.0,
        }
    }

    /// Current focus center, if any
    pub fn focus_center(&self) -> Option<Vec3> {
        self.focus_center
    }

    /// Set the orbit pivot
    pub fn set_focus_center(&mut self, center: Vec3) {
        self.focus_center = Some(center);
    }

    /// Drop the pivot; drags rotate the model in place again
    pub fn clear_focus_center(&mut self) {
        self.focus_center = None;
    }

    /// Forget any accumulated model rotation (new model spawned)
    pub fn reset_model_yaw(&mut self) {
        self.model_yaw = 0.0;
    }

    /// Camera position that fits `bounds` when looking along `forward`.
    ///
    /// The camera keeps its current orientation and dollies along its own
    /// forward axis. The box center becomes the focus center.
    pub fn fit(&mut self, forward: Vec3, bounds: &Aabb, projection: Projection, padding: f32) -> Vec3 {
        let distance = fit_distance(bounds, projection, padding, self.config.min_distance);
        self.focus_center = Some(bounds.center);
        bounds.center - forward.normalize_or_zero() * distance + self.config.camera_offset
    }

    /// Yaw in degrees for a horizontal drag of `pixels`
    pub fn drag_yaw(&self, pixels: f32) -> f32 {
        pixels * self.config.drag_sensitivity
    }

    /// Apply a yaw delta (degrees).
    ///
    /// With a focus center the holder rotates rigidly around the vertical
    /// axis through it; without one the model turns in place.
    pub fn orbit(&mut self, yaw_degrees: f32, holder: &mut Transform, model: &mut Transform) {
        match self.focus_center {
            Some(center) => holder.rotate_around(center, Vec3::Y, yaw_degrees.to_radians()),
            None => {
                self.model_yaw += yaw_degrees;
                model.rotation = Quat::from_rotation_y(self.model_yaw.to_radians());
            }
        }
    }

    /// Camera and holder transforms for a view pose; the holder is placed at `holder_home`
    pub fn pose_transforms(pose: &ViewPose, holder_home: Vec3) -> (Transform, Transform) {
        let camera = Transform::from_euler_degrees(pose.camera_position, pose.camera_euler);
        let holder = Transform::from_position_rotation(
            holder_home,
            Quat::from_rotation_y(pose.holder_yaw.to_radians()),
        );
        (camera, holder)
    }
}

impl Default for FramingRig {
    fn default() -> Self {
        Self::with_config(FramingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_distance(ex: f64, ey: f64, fov_deg: f64, aspect: f64, p: f64, min: f64) -> f64 {
        let half_v = fov_deg.to_radians() / 2.0;
        let half_h = (half_v.tan() * aspect).atan();
        let dist_v = (ey * p) / half_v.tan();
        let dist_h = (ex * p) / half_h.tan();
        dist_v.max(dist_h).max(min)
    }

    #[test]
    fn test_fit_distance_scenario() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(0.5, 0.3, 0.2));
        let projection = Projection { fov_y_degrees: 60.0, aspect: 1.77 };
        let d = fit_distance(&bounds, projection, 1.2, 0.0);
        let expected = reference_distance(0.5, 0.3, 60.0, 1.77, 1.2, 0.0);
        assert!((d as f64 - expected).abs() < 1e-4);
        // Vertical requirement dominates here
        assert!((d - 0.36 / 30.0_f32.to_radians().tan()).abs() < 1e-4);
    }

    #[test]
    fn test_fit_distance_horizontal_dominates() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 0.1, 0.1));
        let projection = Projection { fov_y_degrees: 60.0, aspect: 1.0 };
        let d = fit_distance(&bounds, projection, 1.0, 0.0);
        let expected = reference_distance(2.0, 0.1, 60.0, 1.0, 1.0, 0.0);
        assert!((d as f64 - expected).abs() < 1e-4);
        assert!(d > 3.0);
    }

    #[test]
    fn test_fit_distance_floor() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::ZERO);
        let d = fit_distance(&bounds, Projection::default(), 1.3, 1.0);
        assert_eq!(d, 1.0);
    }

    #[test]
    fn test_fit_distance_degenerate_fov() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let projection = Projection { fov_y_degrees: 0.0, aspect: 1.0 };
        assert_eq!(fit_distance(&bounds, projection, 1.0, 1.5), 1.5);
    }

    #[test]
    fn test_fit_keeps_orientation() {
        let mut rig = FramingRig::default();
        let camera = Transform::from_euler_degrees(Vec3::new(-3.0, 0.0, 0.0), Vec3::new(0.0, -90.0, 0.0));
        let bounds = Aabb::new(Vec3::new(0.2, 0.1, 0.0), Vec3::new(0.5, 0.3, 0.2));

        let position = rig.fit(camera.forward(), &bounds, Projection::default(), 1.2);
        assert_eq!(rig.focus_center(), Some(bounds.center));

        // Camera sits on the line through the center along its own forward axis
        let to_center = bounds.center - position;
        assert!(to_center.normalize().dot(camera.forward()) > 0.9999);
        let d = fit_distance(&bounds, Projection::default(), 1.2, rig.config.min_distance);
        assert!((to_center.length() - d).abs() < 1e-4);
    }

    #[test]
    fn test_orbit_around_focus_center() {
        let mut rig = FramingRig::default();
        rig.set_focus_center(Vec3::new(1.0, 0.0, 0.0));
        let mut holder = Transform::default();
        let mut model = Transform::default();

        rig.orbit(90.0, &mut holder, &mut model);
        // Holder origin swings around the pivot, model untouched
        assert!((holder.position.distance(Vec3::new(1.0, 0.0, 0.0)) - 1.0).abs() < 1e-5);
        assert!(holder.position.y.abs() < 1e-6);
        assert_eq!(model, Transform::default());
    }

    #[test]
    fn test_orbit_without_focus_rotates_model() {
        let mut rig = FramingRig::default();
        let mut holder = Transform::default();
        let mut model = Transform::default();

        let yaw = rig.drag_yaw(100.0);
        assert!((yaw - 20.0).abs() < 1e-5);
        rig.orbit(yaw, &mut holder, &mut model);
        rig.orbit(yaw, &mut holder, &mut model);

        assert_eq!(holder, Transform::default());
        let (yaw, pitch, roll) = model.rotation.to_euler(glam::EulerRot::YXZ);
        assert!((yaw.to_degrees() - 40.0).abs() < 1e-3);
        assert!(pitch.abs() < 1e-6 && roll.abs() < 1e-6);
        assert_eq!(model.position, Vec3::ZERO);
    }

    #[test]
    fn test_clear_focus_center() {
        let mut rig = FramingRig::default();
        rig.set_focus_center(Vec3::ONE);
        rig.clear_focus_center();
        assert!(rig.focus_center().is_none());
    }

    #[test]
    fn test_pose_transforms() {
        let pose = FramingConfig::default().inventory_pose;
        let (camera, holder) = FramingRig::pose_transforms(&pose, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(camera.position, pose.camera_position);
        assert!((camera.forward() - Vec3::X).length() < 1e-4);
        assert_eq!(holder.position, Vec3::new(0.0, 0.5, 0.0));
    }
}
