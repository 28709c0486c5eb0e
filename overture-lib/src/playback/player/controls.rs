//! Transport and query operations for [`Player`].

use log::{error, info, warn};

use crate::playback::error::PlaybackError;

use super::Player;

impl Player {
    /// Start playback of `count` samples beginning at `start`.
    ///
    /// Any session already running is stopped and fully joined first, so two
    /// sessions never hold the device at once. The device is opened at the
    /// provider's native rate and format; open failures surface here as
    /// [`PlaybackError::DeviceUnavailable`] with no session left behind and
    /// positions unchanged. On success this returns once the render thread is
    /// up, not once audio is audible.
    pub fn play(&self, start: u64, count: u64) -> Result<(), PlaybackError> {
        self.stop();

        let (previous_start, previous_end) = self.state.bounds();
        let previous_current = self.state.current();

        let end = start.saturating_add(count);
        self.state.begin_session(start, end);

        if let Err(err) = self.spawn_session() {
            warn!("failed to open {} output: {}", self.backend.name(), err);
            self.state.rollback_session(previous_start, previous_end, previous_current);
            return Err(err.into());
        }

        info!("started playback of samples {}..{}", start, end);
        Ok(())
    }

    /// Stop playback and wait for the render thread to exit.
    ///
    /// Idempotent: calling while stopped is a no-op. On return the device is
    /// closed and [`Player::is_playing`] reports `false`; queued audio is
    /// discarded, not drained.
    pub fn stop(&self) {
        self.state.request_stop();
        if let Some(handle) = self.render_thread.lock().unwrap().take() {
            if handle.join().is_err() {
                error!("render thread panicked during shutdown");
            }
        }
    }

    /// Whether a render thread is currently active for this player.
    pub fn is_playing(&self) -> bool {
        self.state.is_running()
    }

    /// Start of the most recent playback range.
    pub fn start_position(&self) -> u64 {
        self.state.bounds().0
    }

    /// Exclusive end of the most recent playback range.
    pub fn end_position(&self) -> u64 {
        self.state.bounds().1
    }

    /// The next sample index to be written.
    ///
    /// Monotonically non-decreasing within one session. After a stop or a
    /// natural end this keeps reporting the last position reached, until the
    /// next `play`.
    pub fn current_position(&self) -> u64 {
        self.state.current()
    }

    /// Truncate or extend the active range.
    ///
    /// Safe during playback; the render thread observes the new bound on its
    /// next iteration without a restart. A bound at or below the current
    /// position ends the session as a natural end of range.
    pub fn set_end_position(&self, pos: u64) {
        self.state.set_end(pos);
    }

    /// Seek to `pos`, clamped into the active range.
    ///
    /// During playback the device's queued audio is flushed and filling
    /// resumes from the new index; a discontinuity of at most one period is
    /// expected. Position reads after this call never report a value below
    /// the clamped target.
    pub fn set_current_position(&self, pos: u64) {
        self.state.request_seek(pos);
    }

    /// Set the linear volume scale factor applied at write time.
    ///
    /// Takes effect on the next chunk the render thread writes; no restart.
    /// Negative or non-finite values are rejected with
    /// [`PlaybackError::InvalidArgument`] and leave the previous volume in
    /// effect.
    pub fn set_volume(&self, volume: f32) -> Result<(), PlaybackError> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(PlaybackError::InvalidArgument(format!(
                "volume must be a finite value >= 0, got {}",
                volume
            )));
        }
        self.state.store_volume(volume);
        Ok(())
    }

    /// Current volume scale factor.
    pub fn volume(&self) -> f32 {
        self.state.volume()
    }

    /// The error that ended the last session, if it ended on a device
    /// failure. Cleared by the next `play`.
    pub fn last_error(&self) -> Option<PlaybackError> {
        self.state.last_error()
    }
}
