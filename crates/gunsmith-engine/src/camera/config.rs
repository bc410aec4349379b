//! Camera framing configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera and weapon-holder placement for one view mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewPose {
    /// Camera world position
    pub camera_position: Vec3,
    /// Camera orientation as euler angles in degrees (pitch, yaw, roll)
    pub camera_euler: Vec3,
    /// Weapon holder yaw in degrees
    pub holder_yaw: f32,
}

/// Camera framing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Floor for any fitted camera distance
    pub min_distance: f32,
    /// Padding multiplier when fitting the whole loadout in the inventory view
    pub inventory_padding: f32,
    /// Padding multiplier when fitting a single attachment
    pub selection_padding: f32,
    /// Drag sensitivity (degrees of yaw per pixel)
    pub drag_sensitivity: f32,
    /// World-space offset added to every fitted camera position
    pub camera_offset: Vec3,
    /// Pose applied when returning to the inventory view
    pub inventory_pose: ViewPose,
    /// Pose applied when browsing attachments
    pub attachment_pose: ViewPose,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            min_distance: 1.0,
            inventory_padding: 2.3,
            selection_padding: 2.6,
            drag_sensitivity: 0.2,
            camera_offset: Vec3::ZERO,
            inventory_pose: ViewPose {
                camera_position: Vec3::new(-1.88, 0.0, 0.05),
                camera_euler: Vec3::new(0.0, -90.0, 0.0),
                holder_yaw: -40.0,
            },
            attachment_pose: ViewPose {
                camera_position: Vec3::new(-0.931, 0.174, 0.058),
                camera_euler: Vec3::new(0.077, -94.201, 0.235),
                holder_yaw: -30.0,
            },
        }
    }
}
