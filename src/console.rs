//! Terminal rendition of the loadout view

use gunsmith_engine::{
    Attachment, Category, EquipButton, IconLookup, ItemState, LoadoutView, StatsUpdate, Trend,
    ViewMode,
};

/// Prints stat rows and button state to stdout
pub struct ConsoleView {
    icons: IconLookup,
}

impl ConsoleView {
    pub fn new(icons: IconLookup) -> Self {
        Self { icons }
    }
}

impl LoadoutView for ConsoleView {
    fn show_stats(&mut self, update: &StatsUpdate) {
        println!("  {:<10} {:>8} {:>8}", "STAT", "VALUE", "DELTA");
        for row in &update.rows {
            let marker = match row.trend {
                Trend::Improved => '▲',
                Trend::Unchanged => ' ',
                Trend::Worsened => '▼',
            };
            println!(
                "  {:<10} {:>8} {:>8} {}",
                row.label(),
                row.value_text(),
                row.delta_text(),
                marker
            );
        }
    }

    fn set_category_selected(&mut self, category: Category, selected: bool) {
        if selected {
            println!("  [{}]", category.name().to_uppercase());
        }
    }

    fn set_attachment_state(&mut self, attachment: &Attachment, state: ItemState) {
        let flags = match (state.selected, state.equipped) {
            (true, true) => "selected, equipped",
            (true, false) => "selected",
            (false, true) => "equipped",
            (false, false) => "",
        };
        let icon = self
            .icons
            .icon_path(&attachment.icon_token)
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!("    {:<18} {:<20} {}", attachment.display_name, flags, icon);
    }

    fn set_equip_button(&mut self, button: Option<EquipButton>) {
        if let Some(button) = button {
            let suffix = if button.interactable() { "" } else { " (disabled)" };
            println!("  <{}>{}", button.label(), suffix);
        }
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        println!("== {:?} ==", mode);
    }
}
