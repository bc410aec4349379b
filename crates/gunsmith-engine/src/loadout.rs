//! Loadout state machine
//!
//! Owns the catalog, the equipped map and the selection. Transitions are
//! pure state changes that report what the scene and the UI have to redo;
//! applying those side effects is the workshop's job.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregation::{aggregate, equipped_only, Aggregate, PreviewSwap};
use crate::catalog::{Attachment, Catalog, Category};
use crate::equipment::EquippedMap;
use crate::error::TransitionError;
use crate::stats::{StatBlock, StatDeltas};
use crate::view::{EquipButton, ItemState};

/// Which camera preset and stats mode is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Whole weapon, equipped stats
    #[default]
    Inventory,
    /// Browsing one category, preview stats
    Attachments,
}

/// Top-level loadout state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadoutState {
    /// No category chosen
    Inventory,
    /// A category is open and its item strip is visible
    CategoryBrowsing(Category),
}

/// Ephemeral UI-session selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub active_category: Option<Category>,
    /// Always belongs to `active_category` when set
    pub previewed: Option<Attachment>,
    pub view_mode: ViewMode,
}

/// What the camera should frame after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum FrameTarget {
    /// Everything visible, once layout has settled
    WholeModel,
    /// The model node showing this attachment, falling back to the whole model
    Attachment(Attachment),
}

/// Side effects a transition asks for
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Stats to push to the UI
    pub aggregate: Aggregate,
    /// Attachments whose model variants must be (re)applied, in order
    pub variants: Vec<Attachment>,
    pub frame: Option<FrameTarget>,
    /// Camera preset to apply, when the view mode changed
    pub pose: Option<ViewMode>,
}

/// Cloneable read-only copy of the session for consumers off the control thread
#[derive(Debug, Clone, PartialEq)]
pub struct LoadoutSnapshot {
    pub equipped: Vec<(Category, String)>,
    pub active_category: Option<Category>,
    pub previewed: Option<String>,
    pub view_mode: ViewMode,
    pub final_stats: StatBlock,
    pub deltas: StatDeltas,
}

/// The loadout context: catalog, equipped map and selection
#[derive(Debug, Clone)]
pub struct LoadoutSession {
    catalog: Catalog,
    base_stats: StatBlock,
    equipped: EquippedMap,
    selection: SelectionState,
}

impl LoadoutSession {
    /// Start a session with every category seeded from its catalog default
    pub fn new(catalog: Catalog, base_stats: StatBlock) -> Self {
        let equipped = EquippedMap::seeded_from(&catalog);
        Self {
            catalog,
            base_stats,
            equipped,
            selection: SelectionState::default(),
        }
    }

    /// Replace the catalog wholesale, reseed the equipped map and reset the selection
    pub fn reinitialize(&mut self, catalog: Catalog) {
        info!("Reinitializing loadout with {} attachments", catalog.len());
        self.equipped = EquippedMap::seeded_from(&catalog);
        self.catalog = catalog;
        self.selection = SelectionState::default();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn base_stats(&self) -> &StatBlock {
        &self.base_stats
    }

    pub fn equipped(&self) -> &EquippedMap {
        &self.equipped
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current top-level state
    pub fn state(&self) -> LoadoutState {
        match (self.selection.view_mode, self.selection.active_category) {
            (ViewMode::Attachments, Some(category)) => LoadoutState::CategoryBrowsing(category),
            _ => LoadoutState::Inventory,
        }
    }

    /// Stats for the current view mode: equipped totals in the inventory,
    /// the preview swap while browsing
    pub fn stats(&self) -> Aggregate {
        match self.selection.view_mode {
            ViewMode::Inventory => equipped_only(&self.base_stats, &self.equipped),
            ViewMode::Attachments => aggregate(
                &self.base_stats,
                &self.equipped,
                self.selection.previewed.as_ref().map(PreviewSwap::of),
            ),
        }
    }

    /// Open a category and preview what it has equipped
    pub fn select_category(&mut self, category: Category) -> Transition {
        let mut variants = Vec::new();
        if let Some(revert) = self.revert_preview() {
            variants.push(revert);
        }

        let previewed = self
            .equipped
            .get(category)
            .or_else(|| self.catalog.default_for(category))
            .cloned();
        if let Some(attachment) = &previewed {
            variants.push(attachment.clone());
        }

        let pose = (self.selection.view_mode != ViewMode::Attachments).then_some(ViewMode::Attachments);
        self.selection = SelectionState {
            active_category: Some(category),
            previewed: previewed.clone(),
            view_mode: ViewMode::Attachments,
        };

        Transition {
            aggregate: self.stats(),
            variants,
            frame: Some(previewed.map_or(FrameTarget::WholeModel, FrameTarget::Attachment)),
            pose,
        }
    }

    /// Preview an attachment of the open category
    pub fn select_item(&mut self, attachment: &Attachment) -> Result<Transition, TransitionError> {
        let LoadoutState::CategoryBrowsing(active) = self.state() else {
            return Err(TransitionError::NotBrowsing);
        };
        if attachment.category != active {
            return Err(TransitionError::CategoryMismatch {
                expected: active,
                got: attachment.category,
            });
        }

        self.selection.previewed = Some(attachment.clone());
        Ok(Transition {
            aggregate: self.stats(),
            variants: vec![attachment.clone()],
            frame: Some(FrameTarget::Attachment(attachment.clone())),
            pose: None,
        })
    }

    /// Preview an attachment of the open category by id
    pub fn select_item_id(&mut self, id: &str) -> Result<Transition, TransitionError> {
        let LoadoutState::CategoryBrowsing(active) = self.state() else {
            return Err(TransitionError::NotBrowsing);
        };
        let attachment = self
            .catalog
            .find(active, id)
            .cloned()
            .ok_or_else(|| TransitionError::UnknownAttachment(id.to_string()))?;
        self.select_item(&attachment)
    }

    /// Commit the previewed attachment. Equipping what is already equipped
    /// changes nothing.
    pub fn equip(&mut self) -> Result<Transition, TransitionError> {
        let Some(previewed) = self.selection.previewed.clone() else {
            return Err(TransitionError::NoPreview);
        };

        if !self.equipped.is_equipped(&previewed) {
            info!("Equipped '{}' in {}", previewed.id, previewed.category.name());
            self.equipped.equip(previewed);
        }

        Ok(Transition {
            aggregate: self.stats(),
            variants: Vec::new(),
            frame: None,
            pose: None,
        })
    }

    /// Close the open category. The preview is dropped, never equipped.
    pub fn return_to_inventory(&mut self) -> Result<Transition, TransitionError> {
        if self.state() == LoadoutState::Inventory {
            return Err(TransitionError::NotBrowsing);
        }

        let variants = self.revert_preview().into_iter().collect();
        self.selection = SelectionState::default();

        Ok(Transition {
            aggregate: self.stats(),
            variants,
            frame: Some(FrameTarget::WholeModel),
            pose: Some(ViewMode::Inventory),
        })
    }

    /// Equipped attachment to show again in place of an uncommitted preview
    fn revert_preview(&self) -> Option<Attachment> {
        let previewed = self.selection.previewed.as_ref()?;
        self.equipped.get(previewed.category).cloned()
    }

    /// Button highlight for an attachment
    pub fn item_state(&self, attachment: &Attachment) -> ItemState {
        ItemState {
            selected: self
                .selection
                .previewed
                .as_ref()
                .is_some_and(|p| p.same_as(attachment)),
            equipped: self.equipped.is_equipped(attachment),
        }
    }

    /// Equip action state, `None` when nothing is previewed
    pub fn equip_button(&self) -> Option<EquipButton> {
        let previewed = self.selection.previewed.as_ref()?;
        Some(if self.equipped.is_equipped(previewed) {
            EquipButton::Equipped
        } else {
            EquipButton::Equip
        })
    }

    pub fn snapshot(&self) -> LoadoutSnapshot {
        let stats = self.stats();
        LoadoutSnapshot {
            equipped: self.equipped.ids(),
            active_category: self.selection.active_category,
            previewed: self.selection.previewed.as_ref().map(|a| a.id.clone()),
            view_mode: self.selection.view_mode,
            final_stats: stats.final_stats,
            deltas: stats.deltas,
        }
    }
}
