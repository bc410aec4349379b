//! Axis-aligned bounding volumes

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as center plus half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    /// Create a box from its center and half extents
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Create a box spanning two corners (in any order)
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min) * 0.5,
        }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Full size along each axis
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }

    /// Grow this box so it also contains `other`
    pub fn encapsulate(&mut self, other: &Aabb) {
        *self = Self::from_min_max(self.min().min(other.min()), self.max().max(other.max()));
    }

    /// Smallest box containing every box in the iterator, or `None` if empty
    pub fn enclosing<'a>(boxes: impl IntoIterator<Item = &'a Aabb>) -> Option<Aabb> {
        let mut iter = boxes.into_iter();
        let mut result = *iter.next()?;
        for b in iter {
            result.encapsulate(b);
        }
        Some(result)
    }

    /// Whether a point lies inside or on the boundary
    pub fn contains(&self, point: Vec3) -> bool {
        let d = (point - self.center).abs();
        d.cmple(self.half_extents).all()
    }
}
