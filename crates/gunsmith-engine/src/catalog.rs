//! Attachment catalog
//!
//! Per-category ordered attachment lists. Index 0 of each list is the
//! category's default attachment. The catalog is immutable once built;
//! re-initialising replaces it wholesale.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use gunsmith_core::Color;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CatalogError;
use crate::stats::{Modifier, StatChannel};

/// The five attachment categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sight,
    Mag,
    Barrel,
    Stock,
    Tactical,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 5] = [
        Self::Sight,
        Self::Mag,
        Self::Barrel,
        Self::Stock,
        Self::Tactical,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Sight => "Sight",
            Self::Mag => "Mag",
            Self::Barrel => "Barrel",
            Self::Stock => "Stock",
            Self::Tactical => "Tactical",
        }
    }

    /// Lower-case keyword that model node names for this category contain
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Sight => "sight",
            Self::Mag => "mag",
            Self::Barrel => "barrel",
            Self::Stock => "stock",
            Self::Tactical => "tactical",
        }
    }
}

/// One attachment record. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique within its category
    pub id: String,
    pub display_name: String,
    pub category: Category,
    pub icon_token: String,
    #[serde(default)]
    pub preview_color: Color,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl Attachment {
    /// Sum of this attachment's modifiers on one channel
    pub fn delta(&self, channel: StatChannel) -> f32 {
        self.modifiers
            .iter()
            .filter(|m| m.channel == channel)
            .map(|m| m.value)
            .sum()
    }

    /// Whether two records refer to the same catalog entry
    pub fn same_as(&self, other: &Attachment) -> bool {
        self.category == other.category && self.id == other.id
    }
}

/// Source of attachment records (built-in seed data, a file, a server...)
pub trait CatalogProvider {
    /// Every attachment, in catalog order
    fn attachments(&self) -> Result<Vec<Attachment>, CatalogError>;
}

/// Attachments grouped by category, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    by_category: HashMap<Category, Vec<Attachment>>,
}

impl Catalog {
    /// Build a catalog from a flat attachment list.
    /// Returns an error if an id repeats inside a category.
    pub fn from_attachments(attachments: Vec<Attachment>) -> Result<Self, CatalogError> {
        let mut by_category: HashMap<Category, Vec<Attachment>> =
            Category::ALL.iter().map(|&c| (c, Vec::new())).collect();

        for attachment in attachments {
            let list = by_category.entry(attachment.category).or_default();
            if list.iter().any(|a| a.id == attachment.id) {
                return Err(CatalogError::DuplicateId {
                    category: attachment.category,
                    id: attachment.id,
                });
            }
            list.push(attachment);
        }

        Ok(Self { by_category })
    }

    /// Build a catalog from a provider
    pub fn load(provider: &dyn CatalogProvider) -> Result<Self, CatalogError> {
        let catalog = Self::from_attachments(provider.attachments()?)?;
        info!("Catalog loaded with {} attachments", catalog.len());
        Ok(catalog)
    }

    /// Attachments in a category (empty if none)
    pub fn by_category(&self, category: Category) -> &[Attachment] {
        self.by_category
            .get(&category)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// The category's default attachment (index 0)
    pub fn default_for(&self, category: Category) -> Option<&Attachment> {
        self.by_category(category).first()
    }

    /// Look up an attachment by id inside a category
    pub fn find(&self, category: Category, id: &str) -> Option<&Attachment> {
        self.by_category(category).iter().find(|a| a.id == id)
    }

    /// Total number of attachments
    pub fn len(&self) -> usize {
        self.by_category.values().map(|l| l.len()).sum()
    }

    /// Whether the catalog has no attachments at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Catalog read from a JSON array of attachments
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse attachments from a JSON string
    pub fn parse(path: &Path, content: &str) -> Result<Vec<Attachment>, CatalogError> {
        serde_json::from_str(content).map_err(|e| CatalogError::Parse(path.to_path_buf(), e))
    }
}

impl CatalogProvider for JsonCatalog {
    fn attachments(&self) -> Result<Vec<Attachment>, CatalogError> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| CatalogError::Io(self.path.clone(), e))?;
        Self::parse(&self.path, &content)
    }
}

/// Maps icon tokens to image files, with a fallback for unknown tokens
#[derive(Debug, Clone)]
pub struct IconLookup {
    icon_dir: PathBuf,
    fallback: Option<String>,
    known: Vec<String>,
}

impl IconLookup {
    /// Create a lookup rooted at `icon_dir`, knowing every icon the catalog references
    pub fn new(icon_dir: impl Into<PathBuf>, fallback: Option<String>, catalog: &Catalog) -> Self {
        let known = Category::ALL
            .iter()
            .flat_map(|&c| catalog.by_category(c))
            .map(|a| a.icon_token.clone())
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            icon_dir: icon_dir.into(),
            fallback,
            known,
        }
    }

    /// Image path for a token; empty or unknown tokens resolve to the fallback
    pub fn icon_path(&self, token: &str) -> Option<PathBuf> {
        let token = if !token.is_empty() && self.known.iter().any(|k| k == token) {
            token
        } else {
            self.fallback.as_deref()?
        };
        Some(self.icon_dir.join(format!("{token}.png")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starter_attachments::starter_attachments;

    fn attachment(id: &str, category: Category) -> Attachment {
        Attachment {
            id: id.to_string(),
            display_name: id.to_uppercase(),
            category,
            icon_token: format!("ui_icon_{id}"),
            preview_color: Color::WHITE,
            modifiers: vec![],
        }
    }

    #[test]
    fn test_from_attachments_keeps_order() {
        let catalog = Catalog::from_attachments(vec![
            attachment("mag_default", Category::Mag),
            attachment("sight_default", Category::Sight),
            attachment("mag_big", Category::Mag),
        ])
        .unwrap();
        let mags = catalog.by_category(Category::Mag);
        assert_eq!(mags.len(), 2);
        assert_eq!(mags[0].id, "mag_default");
        assert_eq!(catalog.default_for(Category::Mag).unwrap().id, "mag_default");
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_empty_category() {
        let catalog = Catalog::from_attachments(vec![attachment("a", Category::Sight)]).unwrap();
        assert!(catalog.by_category(Category::Stock).is_empty());
        assert!(catalog.default_for(Category::Stock).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::from_attachments(vec![
            attachment("dup", Category::Barrel),
            attachment("dup", Category::Barrel),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId { .. })));
    }

    #[test]
    fn test_same_id_in_different_categories_allowed() {
        let result = Catalog::from_attachments(vec![
            attachment("default", Category::Barrel),
            attachment("default", Category::Stock),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_attachment_delta_sums_channel() {
        let mut a = attachment("x", Category::Tactical);
        a.modifiers = vec![
            Modifier::new(StatChannel::Power, 3.0),
            Modifier::new(StatChannel::Power, 2.0),
            Modifier::new(StatChannel::Speed, -1.0),
        ];
        assert_eq!(a.delta(StatChannel::Power), 5.0);
        assert_eq!(a.delta(StatChannel::Speed), -1.0);
        assert_eq!(a.delta(StatChannel::Range), 0.0);
    }

    #[test]
    fn test_parse_json_catalog() {
        let json = r#"[
            {"id": "sight_default", "display_name": "Default Sight", "category": "Sight",
             "icon_token": "ui_icon_att_00_sight_0",
             "modifiers": [{"channel": "Accuracy", "value": 0.0}]},
            {"id": "sight_red", "display_name": "Red Dot", "category": "Sight",
             "icon_token": "ui_icon_att_01_sight_1",
             "preview_color": {"r": 1.0, "g": 0.0, "b": 0.0},
             "modifiers": [{"channel": "Accuracy", "value": 4.5}]}
        ]"#;
        let attachments = JsonCatalog::parse(Path::new("test.json"), json).unwrap();
        let catalog = Catalog::from_attachments(attachments).unwrap();
        let red = catalog.find(Category::Sight, "sight_red").unwrap();
        assert_eq!(red.delta(StatChannel::Accuracy), 4.5);
        assert_eq!(red.preview_color.a, 1.0);
        assert_eq!(catalog.default_for(Category::Sight).unwrap().preview_color, Color::WHITE);
    }

    #[test]
    fn test_parse_json_error() {
        let result = JsonCatalog::parse(Path::new("bad.json"), "{not json");
        assert!(matches!(result, Err(CatalogError::Parse(..))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let provider = JsonCatalog::new("/nonexistent/gunsmith/catalog.json");
        assert!(matches!(provider.attachments(), Err(CatalogError::Io(..))));
    }

    #[test]
    fn test_icon_lookup_fallback() {
        let catalog = Catalog::from_attachments(starter_attachments()).unwrap();
        let icons = IconLookup::new("icons", Some("ui_icon_missing".to_string()), &catalog);
        assert_eq!(
            icons.icon_path("ui_icon_att_primary_dash_att_01_sight_1"),
            Some(PathBuf::from("icons/ui_icon_att_primary_dash_att_01_sight_1.png"))
        );
        assert_eq!(icons.icon_path(""), Some(PathBuf::from("icons/ui_icon_missing.png")));
        assert_eq!(icons.icon_path("nope"), Some(PathBuf::from("icons/ui_icon_missing.png")));

        let no_fallback = IconLookup::new("icons", None, &catalog);
        assert_eq!(no_fallback.icon_path("nope"), None);
    }
}
