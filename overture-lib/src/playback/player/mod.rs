//! High-level playback controller.

mod controls;
mod runtime;

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::backend::{AudioBackend, RodioBackend};
use crate::playback::settings::PlayerSettings;
use crate::playback::state::PlaybackState;
use crate::provider::AudioProvider;

/// Playback controller.
///
/// `Player` owns the shared session state and, while a session is active, the
/// render thread feeding the output device. It exposes the thread-safe
/// control surface: play, stop, position queries, seeking, and volume. All
/// operations return promptly; `stop` blocks only until the render thread has
/// fully exited and the device is closed.
pub struct Player {
    provider: Arc<dyn AudioProvider>,
    backend: Arc<dyn AudioBackend>,
    state: Arc<PlaybackState>,
    settings: Arc<Mutex<PlayerSettings>>,
    render_thread: Mutex<Option<JoinHandle<()>>>,
}

impl Player {
    /// Create a player that renders to the default hardware output.
    pub fn new(provider: Arc<dyn AudioProvider>) -> Self {
        Self::with_backend(provider, Arc::new(RodioBackend::default()))
    }

    /// Create a player rendering through a specific output backend.
    pub fn with_backend(provider: Arc<dyn AudioProvider>, backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            provider,
            backend,
            state: Arc::new(PlaybackState::new()),
            settings: Arc::new(Mutex::new(PlayerSettings::default())),
            render_thread: Mutex::new(None),
        }
    }

    /// Replace the player's settings. Takes effect on the next `play`.
    pub fn set_settings(&self, settings: PlayerSettings) {
        *self.settings.lock().unwrap() = settings;
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> PlayerSettings {
        *self.settings.lock().unwrap()
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}
