//! Camera framing module
//!
//! Fits the preview camera to a bounding volume and orbits around the
//! established focus center.

mod config;
mod rig;

pub use config::{FramingConfig, ViewPose};
pub use rig::{fit_distance, FramingRig, Projection};
