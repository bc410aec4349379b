//! Gunsmith Engine - Loadout logic for the weapon workshop
//!
//! Provides the attachment catalog, stat aggregation, the equip/preview
//! state machine, camera framing and model variant resolution.

pub mod aggregation;
pub mod camera;
pub mod catalog;
pub mod display;
pub mod equipment;
pub mod error;
pub mod loadout;
pub mod scene;
pub mod schedule;
pub mod starter_attachments;
pub mod stats;
pub mod variant;
pub mod view;
pub mod workshop;

pub use aggregation::{aggregate, equipped_only, Aggregate, PreviewSwap};
pub use camera::{fit_distance, FramingConfig, FramingRig, Projection, ViewPose};
pub use catalog::{Attachment, Catalog, CatalogProvider, Category, IconLookup, JsonCatalog};
pub use display::{display_order, stat_rows, StatRow, Trend};
pub use equipment::EquippedMap;
pub use error::{CatalogError, TransitionError};
pub use loadout::{LoadoutSession, LoadoutSnapshot, LoadoutState, SelectionState, ViewMode};
pub use scene::{BoundsTarget, HeadlessScene, SceneBackend};
pub use schedule::{FitRequest, FitScheduler, FitTarget};
pub use starter_attachments::StarterCatalog;
pub use stats::{Modifier, StatBlock, StatChannel, StatDeltas};
pub use variant::VariantResolver;
pub use view::{EquipButton, ItemState, LoadoutView, StatsUpdate};
pub use workshop::Workshop;
