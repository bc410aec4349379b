//! Equipped attachments, one slot per category
//!
//! Seeded from catalog defaults and changed only by an explicit equip.

use serde::{Deserialize, Serialize};

use crate::catalog::{Attachment, Catalog, Category};

/// The committed attachment for each of the five categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquippedMap {
    pub sight: Option<Attachment>,
    pub mag: Option<Attachment>,
    pub barrel: Option<Attachment>,
    pub stock: Option<Attachment>,
    pub tactical: Option<Attachment>,
}

impl EquippedMap {
    /// Seed every category with its catalog default.
    /// A category with an empty catalog list stays empty.
    pub fn seeded_from(catalog: &Catalog) -> Self {
        let mut map = Self::default();
        for category in Category::ALL {
            *map.get_mut(category) = catalog.default_for(category).cloned();
        }
        map
    }

    /// Get the attachment equipped in a category
    pub fn get(&self, category: Category) -> Option<&Attachment> {
        match category {
            Category::Sight => self.sight.as_ref(),
            Category::Mag => self.mag.as_ref(),
            Category::Barrel => self.barrel.as_ref(),
            Category::Stock => self.stock.as_ref(),
            Category::Tactical => self.tactical.as_ref(),
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Option<Attachment> {
        match category {
            Category::Sight => &mut self.sight,
            Category::Mag => &mut self.mag,
            Category::Barrel => &mut self.barrel,
            Category::Stock => &mut self.stock,
            Category::Tactical => &mut self.tactical,
        }
    }

    /// Equip an attachment in its own category. Returns the previously equipped one.
    pub fn equip(&mut self, attachment: Attachment) -> Option<Attachment> {
        self.get_mut(attachment.category).replace(attachment)
    }

    /// Whether this exact catalog entry is the one equipped in its category
    pub fn is_equipped(&self, attachment: &Attachment) -> bool {
        self.get(attachment.category)
            .is_some_and(|equipped| equipped.same_as(attachment))
    }

    /// Equipped attachments in category declaration order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Attachment)> + '_ {
        Category::ALL
            .iter()
            .filter_map(move |&c| self.get(c).map(|a| (c, a)))
    }

    /// `(category, attachment id)` pairs, for snapshots and logging
    pub fn ids(&self) -> Vec<(Category, String)> {
        self.iter().map(|(c, a)| (c, a.id.clone())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starter_attachments::StarterCatalog;

    fn catalog() -> Catalog {
        Catalog::load(&StarterCatalog).unwrap()
    }

    #[test]
    fn test_seeded_from_defaults() {
        let catalog = catalog();
        let map = EquippedMap::seeded_from(&catalog);
        for category in Category::ALL {
            assert_eq!(map.get(category), catalog.default_for(category));
        }
        assert_eq!(map.iter().count(), 5);
    }

    #[test]
    fn test_empty_category_stays_empty() {
        let catalog = Catalog::from_attachments(vec![]).unwrap();
        let map = EquippedMap::seeded_from(&catalog);
        assert!(map.get(Category::Sight).is_none());
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn test_equip_replaces_existing() {
        let catalog = catalog();
        let mut map = EquippedMap::seeded_from(&catalog);
        let thermal = catalog.find(Category::Sight, "sight_thermal").unwrap().clone();
        let prev = map.equip(thermal.clone());
        assert_eq!(prev.unwrap().id, "sight_default");
        assert!(map.is_equipped(&thermal));
        assert_eq!(map.get(Category::Sight).unwrap().id, "sight_thermal");
        // Other categories untouched
        assert_eq!(map.get(Category::Mag).unwrap().id, "mag_default");
    }

    #[test]
    fn test_equip_twice_is_idempotent() {
        let catalog = catalog();
        let grip = catalog.find(Category::Tactical, "tac_grip").unwrap().clone();
        let mut once = EquippedMap::seeded_from(&catalog);
        once.equip(grip.clone());
        let mut twice = once.clone();
        twice.equip(grip);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_ids_in_category_order() {
        let map = EquippedMap::seeded_from(&catalog());
        let ids = map.ids();
        assert_eq!(ids[0], (Category::Sight, "sight_default".to_string()));
        assert_eq!(ids[4], (Category::Tactical, "tac_default".to_string()));
    }
}
