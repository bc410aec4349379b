use std::path::PathBuf;

use crate::catalog::Category;

/// Errors that can occur while loading an attachment catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("I/O error reading catalog '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse catalog '{0}': {1}")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("duplicate attachment id '{id}' in category {category:?}")]
    DuplicateId { category: Category, id: String },
}

/// A loadout transition whose precondition does not hold.
///
/// These come from guarded UI affordances, so the workshop logs and ignores
/// them rather than treating them as failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("no category is being browsed")]
    NotBrowsing,

    #[error("nothing is previewed")]
    NoPreview,

    #[error("attachment belongs to {got:?}, but {expected:?} is active")]
    CategoryMismatch { expected: Category, got: Category },

    #[error("no attachment '{0}' in the active category")]
    UnknownAttachment(String),
}
