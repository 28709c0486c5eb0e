//! Render-thread bootstrap for [`Player`].

use std::sync::mpsc;
use std::thread;

use crate::backend::DeviceError;

use super::super::Player;
use super::worker::{run_render_thread, RenderContext};

impl Player {
    /// Spawn the render thread for a freshly initialized session.
    ///
    /// The output stream is not movable across threads, so the device is
    /// opened by the render thread itself and the result is reported back
    /// over a one-shot channel. This call blocks only for the open; on
    /// failure the thread is already gone when the error is returned.
    pub(in crate::playback::player) fn spawn_session(&self) -> Result<(), DeviceError> {
        let source_spec = self.provider.spec();
        let period_samples = self
            .settings
            .lock()
            .unwrap()
            .period_samples(source_spec.sample_rate);

        let (ready_tx, ready_rx) = mpsc::channel();
        let context = RenderContext {
            state: self.state.clone(),
            provider: self.provider.clone(),
            backend: self.backend.clone(),
            settings: self.settings.clone(),
            period_samples,
            ready: ready_tx,
        };

        let handle = thread::spawn(move || run_render_thread(context));

        let opened = ready_rx
            .recv()
            .unwrap_or_else(|_| Err(DeviceError::Unavailable("render thread died".to_string())));

        match opened {
            Ok(()) => {
                *self.render_thread.lock().unwrap() = Some(handle);
                Ok(())
            }
            Err(err) => {
                let _ = handle.join();
                Err(err)
            }
        }
    }
}
