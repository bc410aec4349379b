//! Deferred camera fits
//!
//! A fit can be postponed until the next render pass has completed, so that
//! layout and bounds have settled. At most one fit is pending: scheduling a
//! new one supersedes the old one.

/// What a deferred fit should frame
#[derive(Debug, Clone, PartialEq)]
pub enum FitTarget {
    /// Everything currently visible on the model
    WholeModel,
    /// A named scene node, falling back to the whole model
    Node(String),
}

/// A fit to run later
#[derive(Debug, Clone, PartialEq)]
pub struct FitRequest {
    pub target: FitTarget,
    pub padding: f32,
}

/// Holds the single pending deferred fit
#[derive(Debug, Default)]
pub struct FitScheduler {
    pending: Option<FitRequest>,
}

impl FitScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a fit for after the next render pass. Returns the pending
    /// fit it replaced, if any.
    pub fn schedule(&mut self, request: FitRequest) -> Option<FitRequest> {
        let superseded = self.pending.replace(request);
        if let Some(old) = &superseded {
            tracing::debug!("Deferred fit of {:?} superseded", old.target);
        }
        superseded
    }

    /// Drop the pending fit, if any
    pub fn cancel(&mut self) -> Option<FitRequest> {
        self.pending.take()
    }

    /// The fit waiting for the next render pass
    pub fn pending(&self) -> Option<&FitRequest> {
        self.pending.as_ref()
    }

    /// Whether any fit is pending
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Call after a render pass completes; returns the fit that is now due
    pub fn on_frame_rendered(&mut self) -> Option<FitRequest> {
        self.pending.take()
    }
}
