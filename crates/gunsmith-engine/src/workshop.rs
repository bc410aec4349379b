//! The workshop facade
//!
//! Wires the loadout session to the scene and UI collaborators. All entry
//! points run on the control thread. Invalid transitions are ignored and
//! missing collaborators turn their side effects into no-ops.

use glam::Vec3;
use gunsmith_core::Transform;
use tracing::{debug, info, warn};

use crate::aggregation::Aggregate;
use crate::camera::{FramingConfig, FramingRig};
use crate::catalog::{Attachment, Catalog, CatalogProvider, Category};
use crate::display::{display_order, stat_rows};
use crate::error::{CatalogError, TransitionError};
use crate::loadout::{FrameTarget, LoadoutSession, LoadoutSnapshot, Transition, ViewMode};
use crate::scene::{BoundsTarget, SceneBackend};
use crate::schedule::{FitRequest, FitScheduler, FitTarget};
use crate::stats::StatBlock;
use crate::variant::VariantResolver;
use crate::view::{LoadoutView, StatsUpdate};

/// Remembers which missing collaborators were already reported
#[derive(Debug, Default)]
struct MissingWarnings {
    scene: bool,
    view: bool,
}

impl MissingWarnings {
    fn scene(&mut self) {
        if !self.scene {
            warn!("No scene attached; framing and visibility updates are skipped");
            self.scene = true;
        }
    }

    fn view(&mut self) {
        if !self.view {
            warn!("No view attached; stats updates are skipped");
            self.view = true;
        }
    }
}

/// Loadout session plus its camera, model and UI side effects
pub struct Workshop {
    session: LoadoutSession,
    rig: FramingRig,
    resolver: VariantResolver,
    scheduler: FitScheduler,
    scene: Option<Box<dyn SceneBackend>>,
    view: Option<Box<dyn LoadoutView>>,
    /// Holder position captured at spawn; view poses rotate it in place
    holder_home: Vec3,
    /// Set once `spawn_model` has run against a scene
    spawned: bool,
    missing: MissingWarnings,
}

impl Workshop {
    pub fn new(catalog: Catalog, base_stats: StatBlock, config: FramingConfig) -> Self {
        Self {
            session: LoadoutSession::new(catalog, base_stats),
            rig: FramingRig::with_config(config),
            resolver: VariantResolver::primary_weapon(),
            scheduler: FitScheduler::new(),
            scene: None,
            view: None,
            holder_home: Vec3::ZERO,
            spawned: false,
            missing: MissingWarnings::default(),
        }
    }

    /// Use a different node resolution table
    pub fn with_resolver(mut self, resolver: VariantResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn attach_scene(&mut self, scene: Box<dyn SceneBackend>) {
        self.scene = Some(scene);
    }

    pub fn attach_view(&mut self, view: Box<dyn LoadoutView>) {
        self.view = Some(view);
    }

    pub fn scene(&self) -> Option<&dyn SceneBackend> {
        self.scene.as_deref()
    }

    pub fn session(&self) -> &LoadoutSession {
        &self.session
    }

    pub fn rig(&self) -> &FramingRig {
        &self.rig
    }

    pub fn snapshot(&self) -> LoadoutSnapshot {
        self.session.snapshot()
    }

    /// Whether a deferred fit is waiting for the next rendered frame
    pub fn has_pending_fit(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// The deferred fit waiting for the next rendered frame
    pub fn pending_fit(&self) -> Option<&FitRequest> {
        self.scheduler.pending()
    }

    /// Replace the catalog from a provider. On error the current catalog stays.
    ///
    /// A spawned model is brought back to the baseline of the reseeded
    /// loadout, the same way as at spawn.
    pub fn initialize(&mut self, provider: &dyn CatalogProvider) -> Result<(), CatalogError> {
        let catalog = Catalog::load(provider)?;
        self.session.reinitialize(catalog);
        self.scheduler.cancel();

        if self.spawned {
            self.reset_model();
            if let Some(view) = self.view.as_deref_mut() {
                view.set_view_mode(ViewMode::Inventory);
            }
        }
        self.push_view(self.session.stats());
        Ok(())
    }

    /// Establish the baseline model state: equipped variants, inventory pose,
    /// and a whole-model fit once the first frame has rendered
    pub fn spawn_model(&mut self) {
        let Some(scene) = self.scene.as_deref() else {
            self.missing.scene();
            return;
        };

        self.holder_home = scene.holder_pose().position;
        info!("Model spawned with {} nodes", scene.node_names().len());
        self.spawned = true;
        self.reset_model();
        self.push_view(self.session.stats());
    }

    fn reset_model(&mut self) {
        let Some(scene) = self.scene.as_deref_mut() else {
            self.missing.scene();
            return;
        };

        scene.set_model_pose(Transform::default());
        self.rig.reset_model_yaw();
        self.rig.clear_focus_center();
        self.resolver.apply_equipped(scene, self.session.equipped());

        self.apply_pose(ViewMode::Inventory);
        self.schedule_inventory_fit();
    }

    pub fn select_category(&mut self, category: Category) {
        let transition = self.session.select_category(category);
        self.apply(transition);
    }

    /// Returns whether the transition happened
    pub fn select_item(&mut self, attachment: &Attachment) -> bool {
        let result = self.session.select_item(attachment);
        self.absorb("select_item", result)
    }

    pub fn select_item_id(&mut self, id: &str) -> bool {
        let result = self.session.select_item_id(id);
        self.absorb("select_item", result)
    }

    pub fn equip(&mut self) -> bool {
        let result = self.session.equip();
        self.absorb("equip", result)
    }

    pub fn return_to_inventory(&mut self) -> bool {
        let result = self.session.return_to_inventory();
        self.absorb("return_to_inventory", result)
    }

    /// Horizontal drag of `pixels` on the preview
    pub fn drag(&mut self, pixels: f32) {
        let yaw = self.rig.drag_yaw(pixels);
        let Some(scene) = self.scene.as_deref_mut() else {
            self.missing.scene();
            return;
        };

        let mut holder = scene.holder_pose();
        let mut model = scene.model_pose();
        self.rig.orbit(yaw, &mut holder, &mut model);
        scene.set_holder_pose(holder);
        scene.set_model_pose(model);
    }

    /// Call once per rendered frame; runs the deferred fit if one is due
    pub fn on_frame_rendered(&mut self) {
        if let Some(request) = self.scheduler.on_frame_rendered() {
            self.fit_now(&request.target, request.padding);
        }
    }

    fn absorb(&mut self, action: &str, result: Result<Transition, TransitionError>) -> bool {
        match result {
            Ok(transition) => {
                self.apply(transition);
                true
            }
            Err(err) => {
                debug!("Ignoring {}: {}", action, err);
                false
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        if let Some(mode) = transition.pose {
            self.apply_pose(mode);
            if let Some(view) = self.view.as_deref_mut() {
                view.set_view_mode(mode);
            }
        }

        match self.scene.as_deref_mut() {
            Some(scene) => {
                for attachment in &transition.variants {
                    self.resolver.apply(scene, attachment);
                }
            }
            None if !transition.variants.is_empty() => self.missing.scene(),
            None => {}
        }

        match transition.frame {
            Some(FrameTarget::WholeModel) => self.schedule_inventory_fit(),
            Some(FrameTarget::Attachment(attachment)) => {
                // An immediate fit wins over anything still waiting for a frame
                self.scheduler.cancel();
                let target = self
                    .scene
                    .as_deref()
                    .and_then(|scene| {
                        let names = scene.node_names();
                        let prefix = self.resolver.resolve(&attachment, &names)?;
                        VariantResolver::framing_node(&names, attachment.category, &prefix)
                    })
                    .map_or(FitTarget::WholeModel, FitTarget::Node);
                let padding = self.rig.config.selection_padding;
                self.fit_now(&target, padding);
            }
            None => {}
        }

        self.push_view(transition.aggregate);
    }

    fn schedule_inventory_fit(&mut self) {
        self.scheduler.schedule(FitRequest {
            target: FitTarget::WholeModel,
            padding: self.rig.config.inventory_padding,
        });
    }

    /// Move the camera to frame a target; node targets fall back to the whole
    /// model, and nothing moves if neither has bounds
    fn fit_now(&mut self, target: &FitTarget, padding: f32) {
        let Some(scene) = self.scene.as_deref_mut() else {
            self.missing.scene();
            return;
        };

        let bounds = match target {
            FitTarget::Node(name) => scene
                .bounds(BoundsTarget::Node(name.as_str()))
                .or_else(|| scene.bounds(BoundsTarget::WholeModel)),
            FitTarget::WholeModel => scene.bounds(BoundsTarget::WholeModel),
        };
        let Some(bounds) = bounds else {
            debug!("Nothing to frame for {:?}", target);
            return;
        };

        let mut pose = scene.camera_pose();
        pose.position = self.rig.fit(scene.camera_forward(), &bounds, scene.projection(), padding);
        scene.set_camera_pose(pose);
    }

    fn apply_pose(&mut self, mode: ViewMode) {
        let Some(scene) = self.scene.as_deref_mut() else {
            self.missing.scene();
            return;
        };

        let pose = match mode {
            ViewMode::Inventory => self.rig.config.inventory_pose,
            ViewMode::Attachments => self.rig.config.attachment_pose,
        };
        let (camera, holder) = FramingRig::pose_transforms(&pose, self.holder_home);
        scene.set_camera_pose(camera);
        scene.set_holder_pose(holder);
        self.rig.clear_focus_center();
    }

    fn push_view(&mut self, aggregate: Aggregate) {
        let Some(view) = self.view.as_deref_mut() else {
            self.missing.view();
            return;
        };

        view.show_stats(&StatsUpdate {
            final_stats: aggregate.final_stats,
            deltas: aggregate.deltas,
            order: display_order(&aggregate.deltas),
            rows: stat_rows(&aggregate.final_stats, &aggregate.deltas),
        });

        let active = self.session.selection().active_category;
        for category in Category::ALL {
            view.set_category_selected(category, active == Some(category));
        }
        if let Some(category) = active {
            for attachment in self.session.catalog().by_category(category) {
                view.set_attachment_state(attachment, self.session.item_state(attachment));
            }
        }
        view.set_equip_button(self.session.equip_button());
    }
}
