//! Shared state captured at render-thread spawn time.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use crate::backend::{AudioBackend, DeviceError};
use crate::playback::settings::PlayerSettings;
use crate::playback::state::PlaybackState;
use crate::provider::AudioProvider;

/// Captured shared state passed from `Player::spawn_session` into the render
/// thread.
pub(in crate::playback::player::runtime) struct RenderContext {
    pub(in crate::playback::player::runtime) state: Arc<PlaybackState>,
    pub(in crate::playback::player::runtime) provider: Arc<dyn AudioProvider>,
    pub(in crate::playback::player::runtime) backend: Arc<dyn AudioBackend>,
    pub(in crate::playback::player::runtime) settings: Arc<Mutex<PlayerSettings>>,
    pub(in crate::playback::player::runtime) period_samples: usize,
    /// One-shot channel reporting the device-open result back to `play`.
    pub(in crate::playback::player::runtime) ready: Sender<Result<(), DeviceError>>,
}
