//! Stat aggregation
//!
//! Totals are always `base + Σ modifiers`. Deltas are always measured
//! against the base (naked weapon) block, in both modes.

use crate::catalog::{Attachment, Category};
use crate::equipment::EquippedMap;
use crate::stats::{StatBlock, StatDeltas};

/// A candidate attachment standing in for one category's equipped attachment
#[derive(Debug, Clone, Copy)]
pub struct PreviewSwap<'a> {
    pub category: Category,
    pub candidate: &'a Attachment,
}

impl<'a> PreviewSwap<'a> {
    /// Swap for the candidate's own category
    pub fn of(candidate: &'a Attachment) -> Self {
        Self {
            category: candidate.category,
            candidate,
        }
    }
}

/// Result of an aggregation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub final_stats: StatBlock,
    pub deltas: StatDeltas,
}

impl Aggregate {
    fn from_final(final_stats: StatBlock, base: &StatBlock) -> Self {
        Self {
            final_stats,
            deltas: StatDeltas::between(&final_stats, base),
        }
    }
}

/// Base stats plus the modifiers of every given attachment, in the given order
pub fn sum_attachments<'a>(
    base: &StatBlock,
    attachments: impl IntoIterator<Item = &'a Attachment>,
) -> StatBlock {
    let mut total = *base;
    for attachment in attachments {
        total.apply_all(&attachment.modifiers);
    }
    total
}

/// Aggregate with only the equipped attachments
pub fn equipped_only(base: &StatBlock, equipped: &EquippedMap) -> Aggregate {
    let total = sum_attachments(base, equipped.iter().map(|(_, a)| a));
    Aggregate::from_final(total, base)
}

/// Aggregate with an optional preview swap.
///
/// The candidate replaces the equipped contribution of its category only;
/// every other category contributes as equipped. `None` is equipped-only.
pub fn aggregate(base: &StatBlock, equipped: &EquippedMap, preview: Option<PreviewSwap<'_>>) -> Aggregate {
    let Some(swap) = preview else {
        return equipped_only(base, equipped);
    };

    let mut total = sum_attachments(base, equipped.iter().map(|(_, a)| a));
    if let Some(current) = equipped.get(swap.category) {
        total.remove_all(&current.modifiers);
    }
    total.apply_all(&swap.candidate.modifiers);

    Aggregate::from_final(total, base)
}
