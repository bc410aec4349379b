//! Model variant resolution
//!
//! Decides which named model nodes show the selected attachment. Node names
//! are the contract with the 3D content, so matching is table driven: an
//! ordered `(token, node prefix)` table per category, then a scored scan of
//! the scene's node names.

use std::collections::HashMap;

use tracing::debug;

use crate::catalog::{Attachment, Category};
use crate::equipment::EquippedMap;
use crate::scene::SceneBackend;

/// Substring every attachment node name carries
pub const ATTACHMENT_MARKER: &str = "att_";

/// Start of a level-of-detail suffix (`_LOD0`, `_LOD1`, ...)
const LOD_SUFFIX: &str = "_lod";

/// One explicit mapping entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRule {
    /// Matched case-insensitively against the icon token and the id
    pub token: String,
    /// Base node name (no LOD suffix) to activate
    pub node_prefix: String,
}

/// Lower-cased node name with any LOD suffix removed
pub fn base_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    match lower.find(LOD_SUFFIX) {
        Some(idx) => lower[..idx].to_string(),
        None => lower,
    }
}

/// Whether a node name belongs to a category's variant set
pub fn is_category_node(name: &str, category: Category) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains(ATTACHMENT_MARKER) && lower.contains(category.keyword())
}

/// The `att_...` part of an icon token, without file extension
fn icon_part(icon_token: &str) -> Option<String> {
    let lower = icon_token.to_ascii_lowercase();
    let start = lower.find(ATTACHMENT_MARKER)?;
    let part = &lower[start..];
    let part = part.split('.').next().unwrap_or(part);
    Some(part.to_string())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_ascii_lowercase().contains(&needle.to_ascii_lowercase())
}

/// Extra words that hint at a category in free-form node names
fn synonyms(category: Category) -> &'static [&'static str] {
    match category {
        Category::Sight => &["scope", "optic"],
        Category::Mag => &["magazine", "clip"],
        Category::Barrel => &["muzzle"],
        Category::Stock => &["butt"],
        Category::Tactical => &["laser", "grip", "rail"],
    }
}

/// Resolves attachments to model node prefixes
#[derive(Debug, Clone, Default)]
pub struct VariantResolver {
    rules: HashMap<Category, Vec<VariantRule>>,
}

impl VariantResolver {
    /// A resolver with no explicit rules (heuristic only)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an explicit rule; earlier rules win
    pub fn with_rule(mut self, category: Category, token: &str, node_prefix: &str) -> Self {
        self.rules.entry(category).or_default().push(VariantRule {
            token: token.to_string(),
            node_prefix: node_prefix.to_string(),
        });
        self
    }

    /// Explicit table for the primary weapon model
    pub fn primary_weapon() -> Self {
        let parts: [(Category, &[&str]); 5] = [
            (Category::Sight, &["att_00_sight_0", "att_01_sight_1", "att_02_sight_2"]),
            (
                Category::Mag,
                &["att_03_mag_0", "att_04_mag_1", "att_05_mag_2", "att_06_mag_3", "att_07_mag_4"],
            ),
            (Category::Barrel, &["att_08_barrel_0", "att_09_barrel_1", "att_10_barrel_2"]),
            (Category::Stock, &["att_14_stock_0", "att_15_stock_1"]),
            (
                Category::Tactical,
                &["att_11_tactical_0", "att_12_tactical_1", "att_13_tactical_2"],
            ),
        ];

        let mut resolver = Self::new();
        for (category, tokens) in parts {
            for token in tokens {
                resolver = resolver.with_rule(category, token, &format!("sk_primary_dash_{token}"));
            }
        }
        resolver
    }

    /// Explicit rules for a category, in priority order
    pub fn rules(&self, category: Category) -> &[VariantRule] {
        self.rules.get(&category).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// First explicit rule whose token appears in the icon token or the id
    pub fn resolve_explicit(&self, attachment: &Attachment) -> Option<&str> {
        self.rules(attachment.category)
            .iter()
            .filter(|rule| !rule.node_prefix.is_empty())
            .find(|rule| {
                contains_ci(&attachment.icon_token, &rule.token) || contains_ci(&attachment.id, &rule.token)
            })
            .map(|rule| rule.node_prefix.as_str())
    }

    /// Best-scoring category node for the attachment; ties go to the first seen
    pub fn resolve_heuristic(&self, attachment: &Attachment, node_names: &[String]) -> Option<String> {
        let category = attachment.category;
        let keyword = category.keyword();
        let icon = icon_part(&attachment.icon_token);
        let id_words: Vec<String> = attachment
            .id
            .to_ascii_lowercase()
            .split('_')
            .filter(|w| w.len() >= 3 && *w != keyword && *w != "default")
            .map(str::to_string)
            .collect();

        let mut best: Option<(i32, String)> = None;
        for name in node_names {
            if !is_category_node(name, category) {
                continue;
            }
            let base = base_name(name);

            let mut score = 5;
            if base.contains("_att") {
                score += 2;
            }
            if base.contains("_ads") {
                score += 1;
            }
            if synonyms(category).iter().any(|s| base.contains(s)) {
                score += 2;
            }
            if icon.as_deref().is_some_and(|part| base.contains(part)) {
                score += 10;
            }
            score += 3 * id_words.iter().filter(|w| base.contains(w.as_str())).count() as i32;

            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, base));
            }
        }
        best.map(|(_, base)| base)
    }

    /// Node prefix for an attachment: explicit table first, then the scored scan
    pub fn resolve(&self, attachment: &Attachment, node_names: &[String]) -> Option<String> {
        if let Some(prefix) = self.resolve_explicit(attachment) {
            return Some(prefix.to_ascii_lowercase());
        }
        self.resolve_heuristic(attachment, node_names)
    }

    /// First category node whose base name contains `prefix`, for framing
    pub fn framing_node(node_names: &[String], category: Category, prefix: &str) -> Option<String> {
        let prefix = prefix.to_ascii_lowercase();
        node_names
            .iter()
            .find(|name| is_category_node(name, category) && base_name(name).contains(&prefix))
            .cloned()
    }

    /// Show the attachment's nodes and hide every sibling in its category.
    /// Returns the resolved prefix; nothing changes if none resolves.
    pub fn apply(&self, scene: &mut dyn SceneBackend, attachment: &Attachment) -> Option<String> {
        let names = scene.node_names();
        let Some(prefix) = self.resolve(attachment, &names) else {
            debug!("No model variant for attachment '{}'", attachment.id);
            return None;
        };

        for name in names.iter().filter(|n| is_category_node(n, attachment.category)) {
            scene.set_node_visible(name, base_name(name).contains(&prefix));
        }
        Some(prefix)
    }

    /// Baseline visibility for a freshly spawned model: every category shows
    /// its equipped variant
    pub fn apply_equipped(&self, scene: &mut dyn SceneBackend, equipped: &EquippedMap) {
        for (_, attachment) in equipped.iter() {
            self.apply(scene, attachment);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Projection;
    use crate::catalog::Catalog;
    use crate::scene::HeadlessScene;
    use crate::starter_attachments::StarterCatalog;
    use gunsmith_core::Color;

    fn attachment(id: &str, category: Category, icon: &str) -> Attachment {
        Attachment {
            id: id.to_string(),
            display_name: id.to_string(),
            category,
            icon_token: icon.to_string(),
            preview_color: Color::WHITE,
            modifiers: vec![],
        }
    }

    #[test]
    fn test_base_name_strips_lod() {
        assert_eq!(base_name("sk_primary_dash_att_01_sight_1_LOD0"), "sk_primary_dash_att_01_sight_1");
        assert_eq!(base_name("Receiver"), "receiver");
    }

    #[test]
    fn test_explicit_match_from_icon() {
        let resolver = VariantResolver::primary_weapon();
        let thermal = attachment("sight_thermal", Category::Sight, "ui_icon_att_primary_dash_att_01_sight_1");
        assert_eq!(resolver.resolve_explicit(&thermal), Some("sk_primary_dash_att_01_sight_1"));
    }

    #[test]
    fn test_explicit_match_is_case_insensitive_and_checks_id() {
        let resolver = VariantResolver::new().with_rule(Category::Mag, "QUICKLOAD", "mag_node_q");
        let quick = attachment("mag_quickload", Category::Mag, "");
        assert_eq!(resolver.resolve_explicit(&quick), Some("mag_node_q"));
    }

    #[test]
    fn test_explicit_first_rule_wins() {
        let resolver = VariantResolver::new()
            .with_rule(Category::Barrel, "barrel", "first")
            .with_rule(Category::Barrel, "barrel_cool", "second");
        let cool = attachment("barrel_cool", Category::Barrel, "");
        assert_eq!(resolver.resolve_explicit(&cool), Some("first"));
    }

    #[test]
    fn test_heuristic_prefers_icon_part() {
        let scene = HeadlessScene::primary_weapon(Projection::default());
        let names = scene.node_names();
        let custom = attachment("sight_custom", Category::Sight, "custom_att_02_sight_2.png");
        let resolver = VariantResolver::new();
        assert_eq!(
            resolver.resolve_heuristic(&custom, &names).as_deref(),
            Some("sk_primary_dash_att_02_sight_2")
        );
    }

    #[test]
    fn test_heuristic_synonym_bonus_and_tie_break() {
        let names: Vec<String> = ["gun_att_mag_a_LOD0", "gun_att_magazine_b_LOD0", "gun_att_mag_c_LOD0"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let unknown = attachment("m", Category::Mag, "");
        assert_eq!(
            VariantResolver::new().resolve_heuristic(&unknown, &names).as_deref(),
            Some("gun_att_magazine_b")
        );

        let plain: Vec<String> = vec!["gun_att_mag_a".into(), "gun_att_mag_c".into()];
        assert_eq!(
            VariantResolver::new().resolve_heuristic(&unknown, &plain).as_deref(),
            Some("gun_att_mag_a")
        );
    }

    #[test]
    fn test_heuristic_ignores_other_categories() {
        let names = vec!["sk_att_stock_0".to_string()];
        let sight = attachment("sight_x", Category::Sight, "");
        assert!(VariantResolver::new().resolve_heuristic(&sight, &names).is_none());
    }

    #[test]
    fn test_apply_activates_match_and_hides_siblings() {
        let mut scene = HeadlessScene::primary_weapon(Projection::default());
        let resolver = VariantResolver::primary_weapon();
        let thermal = attachment("sight_thermal", Category::Sight, "ui_icon_att_primary_dash_att_01_sight_1");

        let prefix = resolver.apply(&mut scene, &thermal);
        assert_eq!(prefix.as_deref(), Some("sk_primary_dash_att_01_sight_1"));
        assert!(scene.is_node_visible("sk_primary_dash_att_01_sight_1_LOD0"));
        assert!(scene.is_node_visible("sk_primary_dash_att_01_sight_1_LOD1"));
        for lod in 0..2 {
            assert!(!scene.is_node_visible(&format!("sk_primary_dash_att_00_sight_0_LOD{lod}")));
            assert!(!scene.is_node_visible(&format!("sk_primary_dash_att_02_sight_2_LOD{lod}")));
        }
        // Other categories untouched
        assert!(scene.is_node_visible("sk_primary_dash_att_04_mag_1_LOD0"));
        assert!(scene.is_node_visible("sk_primary_dash_receiver_LOD0"));
    }

    #[test]
    fn test_apply_unresolved_changes_nothing() {
        let mut scene = HeadlessScene::new(Projection::default());
        scene.add_node("body", None);
        let resolver = VariantResolver::new();
        let ghost = attachment("ghost", Category::Stock, "");
        assert!(resolver.apply(&mut scene, &ghost).is_none());
        assert!(scene.is_node_visible("body"));
    }

    #[test]
    fn test_apply_equipped_defaults() {
        let catalog = Catalog::load(&StarterCatalog).unwrap();
        let equipped = EquippedMap::seeded_from(&catalog);
        let mut scene = HeadlessScene::primary_weapon(Projection::default());
        VariantResolver::primary_weapon().apply_equipped(&mut scene, &equipped);

        let visible: Vec<String> = scene
            .nodes()
            .iter()
            .filter(|n| n.visible && n.name.contains("att_"))
            .map(|n| base_name(&n.name))
            .collect();
        assert_eq!(visible.len(), 10);
        for part in ["att_00_sight_0", "att_03_mag_0", "att_08_barrel_0", "att_14_stock_0", "att_11_tactical_0"] {
            assert!(visible.iter().any(|v| v.ends_with(part)), "{part}");
        }
    }

    #[test]
    fn test_framing_node_picks_first_lod() {
        let scene = HeadlessScene::primary_weapon(Projection::default());
        let names = scene.node_names();
        assert_eq!(
            VariantResolver::framing_node(&names, Category::Barrel, "sk_primary_dash_att_09_barrel_1").as_deref(),
            Some("sk_primary_dash_att_09_barrel_1_LOD0")
        );
        assert!(VariantResolver::framing_node(&names, Category::Barrel, "nothing").is_none());
    }
}
