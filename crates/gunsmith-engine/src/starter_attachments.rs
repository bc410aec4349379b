//! Built-in attachment catalog
//!
//! Seeds the five categories for the primary weapon. Each category's first
//! entry is its default and carries an explicit zero-valued modifier.

use gunsmith_core::Color;

use crate::catalog::{Attachment, CatalogProvider, Category};
use crate::error::CatalogError;
use crate::stats::StatChannel::{self, *};
use crate::stats::Modifier;

/// Provider serving the built-in attachments
#[derive(Debug, Clone, Copy, Default)]
pub struct StarterCatalog;

impl CatalogProvider for StarterCatalog {
    fn attachments(&self) -> Result<Vec<Attachment>, CatalogError> {
        Ok(starter_attachments())
    }
}

/// The built-in attachment list, in catalog order
pub fn starter_attachments() -> Vec<Attachment> {
    vec![
        // Sight
        create_attachment("sight_default", "Default Sight", Category::Sight, "att_00_sight_0", Color::WHITE,
            &[(Accuracy, 0.0), (Power, 0.0)]),
        create_attachment("sight_thermal", "Thermal Imaging", Category::Sight, "att_01_sight_1", Color::rgb(0.2, 0.8, 0.2),
            &[(Power, 7.39), (Damage, 8.2), (Range, 2.2)]),
        create_attachment("sight_night", "Nightstalker", Category::Sight, "att_02_sight_2", Color::rgb(0.1, 0.6, 0.9),
            &[(Accuracy, 18.0), (Range, 6.0), (Speed, -6.0)]),
        // Mag
        create_attachment("mag_default", "DEFAULT MAG", Category::Mag, "att_03_mag_0", Color::WHITE,
            &[(FireRate, 0.0)]),
        create_attachment("mag_flashload", "FLASHLOAD", Category::Mag, "att_04_mag_1", Color::rgb(0.8, 0.8, 0.2),
            &[(FireRate, 20.0), (Power, -4.0)]),
        create_attachment("mag_bulletstorm", "BULLETSTORM", Category::Mag, "att_05_mag_2", Color::rgb(0.6, 0.85, 0.3),
            &[(FireRate, 35.0), (Accuracy, -6.0)]),
        create_attachment("mag_quickload", "QUICKLOAD", Category::Mag, "att_06_mag_3", Color::rgb(0.25, 0.7, 0.9),
            &[(Reload, -8.0), (Speed, 5.0)]),
        create_attachment("mag_reloader", "RELOADER", Category::Mag, "att_07_mag_4", Color::rgb(0.9, 0.5, 0.2),
            &[(Reload, -10.0), (Power, 10.0)]),
        // Barrel
        create_attachment("barrel_default", "Default Barrel", Category::Barrel, "att_08_barrel_0", Color::WHITE,
            &[(Damage, 0.0)]),
        create_attachment("barrel_cool", "Cool Breeze", Category::Barrel, "att_09_barrel_1", Color::rgb(0.3, 0.7, 0.2),
            &[(Range, 10.0), (Accuracy, 8.0)]),
        create_attachment("barrel_peace", "Peace Keeper", Category::Barrel, "att_10_barrel_2", Color::rgb(0.2, 0.5, 0.8),
            &[(Damage, 28.0), (Speed, -4.0)]),
        // Stock
        create_attachment("stock_default", "Default Stock", Category::Stock, "att_14_stock_0", Color::WHITE,
            &[(Accuracy, 0.0)]),
        create_attachment("stock_light", "Feather Stock", Category::Stock, "att_15_stock_1", Color::rgb(0.6, 0.8, 0.2),
            &[(Speed, 8.0), (Accuracy, -4.0)]),
        // Tactical
        create_attachment("tac_default", "Default Tactical", Category::Tactical, "att_11_tactical_0", Color::WHITE,
            &[(Power, 0.0)]),
        create_attachment("tac_grip", "Stabilizer Grip", Category::Tactical, "att_12_tactical_1", Color::rgb(0.3, 0.6, 0.2),
            &[(Accuracy, 12.0), (Range, 8.0)]),
        create_attachment("tac_poison", "Poison Module", Category::Tactical, "att_13_tactical_2", Color::rgb(0.8, 0.3, 0.7),
            &[(Power, 55.0), (Damage, 110.4), (Speed, -6.0)]),
    ]
}

fn create_attachment(
    id: &str,
    name: &str,
    category: Category,
    part: &str,
    preview_color: Color,
    modifiers: &[(StatChannel, f32)],
) -> Attachment {
    Attachment {
        id: id.to_string(),
        display_name: name.to_string(),
        category,
        icon_token: format!("ui_icon_att_primary_dash_{part}"),
        preview_color,
        modifiers: modifiers
            .iter()
            .map(|&(channel, value)| Modifier::new(channel, value))
            .collect(),
    }
}
