//! Gunsmith Core - Core types and utilities for the Gunsmith loadout engine
//!
//! This crate provides the foundational types used throughout the engine:
//! - Mathematical primitives (re-exported from glam)
//! - Transform for camera, holder and model positioning
//! - Axis-aligned bounding boxes used for camera framing
//! - RGBA colors for attachment preview tints

pub mod bounds;
pub mod types;

pub use bounds::Aabb;
pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
pub use types::{Color, Transform};
