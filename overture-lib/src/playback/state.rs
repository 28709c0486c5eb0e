//! Shared session state between the controller and the render thread.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;

use super::error::PlaybackError;

const DEFAULT_VOLUME: f32 = 1.0;

/// Control fields mutated only under the session lock.
#[derive(Debug, Default)]
struct SessionControl {
    start_sample: u64,
    end_sample: u64,
    stop_requested: bool,
    seek_request: Option<u64>,
}

/// Snapshot taken by the render thread at the top of each iteration.
pub(crate) struct ControlPoll {
    pub(crate) stop_requested: bool,
    pub(crate) end_sample: u64,
    pub(crate) seek: Option<u64>,
}

/// Mutable shared state for one playback session.
///
/// Cold control fields live behind one mutex. The playback cursor and the
/// volume are read and written on the hot path and use lock-free atomics;
/// volume is stored as `f32` bits in a `u32`.
pub(crate) struct PlaybackState {
    control: Mutex<SessionControl>,
    running: AtomicBool,
    current_sample: AtomicU64,
    volume_bits: AtomicU32,
    last_error: Mutex<Option<PlaybackError>>,
}

impl PlaybackState {
    pub(crate) fn new() -> Self {
        Self {
            control: Mutex::new(SessionControl::default()),
            running: AtomicBool::new(false),
            current_sample: AtomicU64::new(0),
            volume_bits: AtomicU32::new(DEFAULT_VOLUME.to_bits()),
            last_error: Mutex::new(None),
        }
    }

    /// Reset control state for a fresh session over `[start, end)`.
    pub(crate) fn begin_session(&self, start: u64, end: u64) {
        let mut control = self.control.lock().unwrap();
        control.start_sample = start;
        control.end_sample = end.max(start);
        control.stop_requested = false;
        control.seek_request = None;
        self.current_sample.store(start, Ordering::Relaxed);
        *self.last_error.lock().unwrap() = None;
        self.running.store(true, Ordering::SeqCst);
    }

    /// Undo `begin_session` after a failed device open.
    pub(crate) fn rollback_session(&self, start: u64, end: u64, current: u64) {
        let mut control = self.control.lock().unwrap();
        control.start_sample = start;
        control.end_sample = end;
        control.seek_request = None;
        self.current_sample.store(current, Ordering::Relaxed);
        self.running.store(false, Ordering::SeqCst);
    }

    pub(crate) fn request_stop(&self) {
        self.control.lock().unwrap().stop_requested = true;
    }

    /// Request a seek, clamped into the active range.
    ///
    /// The cursor moves to the target immediately so position reads never lag
    /// behind the request; the render thread picks the target up on its next
    /// iteration.
    pub(crate) fn request_seek(&self, pos: u64) -> u64 {
        let mut control = self.control.lock().unwrap();
        let target = pos.clamp(control.start_sample, control.end_sample);
        if self.running.load(Ordering::SeqCst) {
            control.seek_request = Some(target);
        }
        self.current_sample.store(target, Ordering::Relaxed);
        target
    }

    /// Shorten or extend the end bound; values below the session start clamp
    /// to the start. The cursor is pulled down with a shrinking bound so it
    /// never reads past the end.
    pub(crate) fn set_end(&self, pos: u64) -> u64 {
        let mut control = self.control.lock().unwrap();
        control.end_sample = pos.max(control.start_sample);
        let end = control.end_sample;
        if self.current_sample.load(Ordering::Relaxed) > end {
            self.current_sample.store(end, Ordering::Relaxed);
        }
        end
    }

    pub(crate) fn bounds(&self) -> (u64, u64) {
        let control = self.control.lock().unwrap();
        (control.start_sample, control.end_sample)
    }

    /// Render-thread poll: observe stop/end state and consume a pending seek.
    pub(crate) fn poll_control(&self) -> ControlPoll {
        let mut control = self.control.lock().unwrap();
        ControlPoll {
            stop_requested: control.stop_requested,
            end_sample: control.end_sample,
            seek: control.seek_request.take(),
        }
    }

    /// Publish a cursor advance from the render thread.
    ///
    /// The store is skipped while a seek is pending so a completed write can
    /// never move the cursor back below a just-requested target, and the
    /// published value is clamped to the end bound.
    pub(crate) fn publish_advance(&self, position: u64) -> bool {
        let control = self.control.lock().unwrap();
        if control.seek_request.is_some() {
            return false;
        }
        self.current_sample
            .store(position.min(control.end_sample), Ordering::Relaxed);
        true
    }

    pub(crate) fn current(&self) -> u64 {
        self.current_sample.load(Ordering::Relaxed)
    }

    pub(crate) fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    pub(crate) fn store_volume(&self, volume: f32) {
        self.volume_bits.store(volume.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub(crate) fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    pub(crate) fn record_error(&self, error: PlaybackError) {
        *self.last_error.lock().unwrap() = Some(error);
    }

    pub(crate) fn last_error(&self) -> Option<PlaybackError> {
        self.last_error.lock().unwrap().clone()
    }
}
