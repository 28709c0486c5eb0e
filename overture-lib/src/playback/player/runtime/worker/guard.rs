//! Liveness guard for the render thread.

use std::sync::Arc;

use crate::playback::state::PlaybackState;

/// Guard that keeps the session's running flag in sync with thread lifetime.
pub(super) struct RenderGuard {
    state: Arc<PlaybackState>,
}

impl RenderGuard {
    /// Mark the session as running.
    pub(super) fn new(state: Arc<PlaybackState>) -> Self {
        state.set_running(true);
        Self { state }
    }
}

impl Drop for RenderGuard {
    fn drop(&mut self) {
        self.state.set_running(false);
    }
}
