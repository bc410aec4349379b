//! UI collaborator interface

use crate::catalog::{Attachment, Category};
use crate::display::StatRow;
use crate::loadout::ViewMode;
use crate::stats::{StatBlock, StatChannel, StatDeltas, CHANNEL_COUNT};

/// Everything the stats view needs after a recompute
#[derive(Debug, Clone, PartialEq)]
pub struct StatsUpdate {
    pub final_stats: StatBlock,
    pub deltas: StatDeltas,
    pub order: [StatChannel; CHANNEL_COUNT],
    /// Rows already in display order
    pub rows: Vec<StatRow>,
}

/// Highlight state of one attachment button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemState {
    pub selected: bool,
    pub equipped: bool,
}

/// State of the equip action for the previewed attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipButton {
    /// Previewed attachment differs from the equipped one
    Equip,
    /// Already equipped; the action is disabled
    Equipped,
}

impl EquipButton {
    pub fn label(self) -> &'static str {
        match self {
            EquipButton::Equip => "EQUIP",
            EquipButton::Equipped => "EQUIPPED",
        }
    }

    pub fn interactable(self) -> bool {
        matches!(self, EquipButton::Equip)
    }
}

/// Receives state pushed by the workshop
pub trait LoadoutView {
    /// Called on every aggregation recompute
    fn show_stats(&mut self, update: &StatsUpdate);

    fn set_category_selected(&mut self, category: Category, selected: bool);

    fn set_attachment_state(&mut self, attachment: &Attachment, state: ItemState);

    /// `None` hides the equip action (inventory view)
    fn set_equip_button(&mut self, button: Option<EquipButton>);

    fn set_view_mode(&mut self, _mode: ViewMode) {}
}
