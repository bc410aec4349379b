//! Scene/render collaborator interface and an in-memory implementation
//!
//! The engine never owns the scene graph. It toggles node visibility, reads
//! bounds, and moves the camera, holder and model through this trait.

use glam::Vec3;
use gunsmith_core::{Aabb, Transform};

use crate::camera::Projection;

/// What to measure
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsTarget<'a> {
    /// One named node and its renderable content
    Node(&'a str),
    /// Every visible renderable on the model
    WholeModel,
}

/// Scene/render collaborator
pub trait SceneBackend {
    /// Names of every node in the model hierarchy
    fn node_names(&self) -> Vec<String>;

    fn set_node_visible(&mut self, name: &str, visible: bool);

    fn is_node_visible(&self, name: &str) -> bool;

    /// World-space bounds, or `None` if there is nothing renderable
    fn bounds(&self, target: BoundsTarget<'_>) -> Option<Aabb>;

    fn camera_pose(&self) -> Transform;

    fn set_camera_pose(&mut self, pose: Transform);

    fn projection(&self) -> Projection;

    /// Transform of the rigid body holding the weapon
    fn holder_pose(&self) -> Transform;

    fn set_holder_pose(&mut self, pose: Transform);

    /// Local transform of the weapon model inside the holder
    fn model_pose(&self) -> Transform;

    fn set_model_pose(&mut self, pose: Transform);

    fn camera_forward(&self) -> Vec3 {
        self.camera_pose().forward()
    }
}

/// A node of the in-memory scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    /// Model-space bounds of renderable content; `None` for empty groups
    pub local_bounds: Option<Aabb>,
    pub visible: bool,
}

/// Scene graph kept entirely in memory
#[derive(Debug, Clone)]
pub struct HeadlessScene {
    nodes: Vec<SceneNode>,
    camera: Transform,
    projection: Projection,
    holder: Transform,
    model: Transform,
}

impl HeadlessScene {
    /// Create an empty scene
    pub fn new(projection: Projection) -> Self {
        Self {
            nodes: Vec::new(),
            camera: Transform::default(),
            projection,
            holder: Transform::default(),
            model: Transform::default(),
        }
    }

    /// Add a node (visible by default)
    pub fn add_node(&mut self, name: impl Into<String>, local_bounds: Option<Aabb>) {
        self.nodes.push(SceneNode {
            name: name.into(),
            local_bounds,
            visible: true,
        });
    }

    /// All nodes
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// The primary weapon model: a receiver plus every attachment variant,
    /// each variant with two LOD meshes
    pub fn primary_weapon(projection: Projection) -> Self {
        let mut scene = Self::new(projection);
        scene.add_node("sk_primary_dash", None);
        scene.add_node(
            "sk_primary_dash_receiver_LOD0",
            Some(Aabb::new(Vec3::ZERO, Vec3::new(0.35, 0.08, 0.04))),
        );

        let parts: [(&str, Vec3, Vec3); 16] = [
            ("att_00_sight_0", Vec3::new(0.0, 0.12, 0.0), Vec3::new(0.06, 0.03, 0.02)),
            ("att_01_sight_1", Vec3::new(0.0, 0.14, 0.0), Vec3::new(0.09, 0.05, 0.03)),
            ("att_02_sight_2", Vec3::new(0.0, 0.14, 0.0), Vec3::new(0.11, 0.05, 0.03)),
            ("att_03_mag_0", Vec3::new(0.05, -0.15, 0.0), Vec3::new(0.04, 0.08, 0.02)),
            ("att_04_mag_1", Vec3::new(0.05, -0.16, 0.0), Vec3::new(0.04, 0.09, 0.02)),
            ("att_05_mag_2", Vec3::new(0.05, -0.2, 0.0), Vec3::new(0.06, 0.12, 0.03)),
            ("att_06_mag_3", Vec3::new(0.05, -0.15, 0.0), Vec3::new(0.04, 0.08, 0.02)),
            ("att_07_mag_4", Vec3::new(0.05, -0.17, 0.0), Vec3::new(0.05, 0.1, 0.02)),
            ("att_08_barrel_0", Vec3::new(0.5, 0.02, 0.0), Vec3::new(0.15, 0.02, 0.02)),
            ("att_09_barrel_1", Vec3::new(0.55, 0.02, 0.0), Vec3::new(0.2, 0.025, 0.025)),
            ("att_10_barrel_2", Vec3::new(0.6, 0.02, 0.0), Vec3::new(0.25, 0.03, 0.03)),
            ("att_11_tactical_0", Vec3::new(0.3, -0.06, 0.0), Vec3::new(0.04, 0.02, 0.02)),
            ("att_12_tactical_1", Vec3::new(0.3, -0.1, 0.0), Vec3::new(0.03, 0.06, 0.02)),
            ("att_13_tactical_2", Vec3::new(0.3, 0.0, 0.05), Vec3::new(0.05, 0.03, 0.03)),
            ("att_14_stock_0", Vec3::new(-0.5, -0.02, 0.0), Vec3::new(0.15, 0.07, 0.03)),
            ("att_15_stock_1", Vec3::new(-0.45, -0.02, 0.0), Vec3::new(0.1, 0.05, 0.02)),
        ];
        for (part, center, half) in parts {
            for lod in 0..2 {
                scene.add_node(
                    format!("sk_primary_dash_{part}_LOD{lod}"),
                    Some(Aabb::new(center, half)),
                );
            }
        }
        scene
    }

    fn node(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name.eq_ignore_ascii_case(name))
    }

    /// Model-space bounds to world space through model and holder transforms
    fn to_world(&self, local: &Aabb) -> Aabb {
        let matrix = self.holder.matrix() * self.model.matrix();
        let (min, max) = (local.min(), local.max());
        let mut world_min = Vec3::splat(f32::INFINITY);
        let mut world_max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            );
            let p = matrix.transform_point3(corner);
            world_min = world_min.min(p);
            world_max = world_max.max(p);
        }
        Aabb::from_min_max(world_min, world_max)
    }
}

impl SceneBackend for HeadlessScene {
    fn node_names(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.name.clone()).collect()
    }

    fn set_node_visible(&mut self, name: &str, visible: bool) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.name.eq_ignore_ascii_case(name)) {
            node.visible = visible;
        }
    }

    fn is_node_visible(&self, name: &str) -> bool {
        self.node(name).is_some_and(|n| n.visible)
    }

    fn bounds(&self, target: BoundsTarget<'_>) -> Option<Aabb> {
        match target {
            BoundsTarget::Node(name) => {
                let local = self.node(name)?.local_bounds?;
                Some(self.to_world(&local))
            }
            BoundsTarget::WholeModel => {
                let world: Vec<Aabb> = self
                    .nodes
                    .iter()
                    .filter(|n| n.visible)
                    .filter_map(|n| n.local_bounds.as_ref())
                    .map(|b| self.to_world(b))
                    .collect();
                Aabb::enclosing(&world)
            }
        }
    }

    fn camera_pose(&self) -> Transform {
        self.camera
    }

    fn set_camera_pose(&mut self, pose: Transform) {
        self.camera = pose;
    }

    fn projection(&self) -> Projection {
        self.projection
    }

    fn holder_pose(&self) -> Transform {
        self.holder
    }

    fn set_holder_pose(&mut self, pose: Transform) {
        self.holder = pose;
    }

    fn model_pose(&self) -> Transform {
        self.model
    }

    fn set_model_pose(&mut self, pose: Transform) {
        self.model = pose;
    }
}
