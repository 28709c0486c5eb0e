//! Runtime settings for the playback engine.

use serde::{Deserialize, Serialize};

const DEFAULT_PERIOD_MS: f32 = 20.0;

/// Pacing and shutdown behavior for playback sessions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Render chunk length in milliseconds, used when the device does not
    /// dictate its own period.
    pub period_ms: f32,
    /// Drain queued audio before closing the device at the natural end of the
    /// range. Stops always discard instead.
    pub drain_on_end: bool,
}

impl PlayerSettings {
    /// Parse settings from a JSON payload.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Period length in samples for the given sample rate.
    pub(crate) fn period_samples(&self, sample_rate: u32) -> usize {
        ((sample_rate as f32 * self.period_ms / 1000.0) as usize).max(1)
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
            drain_on_end: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = PlayerSettings::default();
        assert_eq!(settings.period_ms, 20.0);
        assert!(settings.drain_on_end);
    }

    #[test]
    fn period_scales_with_sample_rate() {
        let settings = PlayerSettings::default();
        assert_eq!(settings.period_samples(44_100), 882);
        assert_eq!(settings.period_samples(8_000), 160);
    }

    #[test]
    fn period_never_collapses_to_zero() {
        let settings = PlayerSettings {
            period_ms: 0.0,
            ..Default::default()
        };
        assert_eq!(settings.period_samples(44_100), 1);
    }

    #[test]
    fn json_overrides_merge_with_defaults() {
        let settings = PlayerSettings::from_json(r#"{"period_ms": 5.0}"#).unwrap();
        assert_eq!(settings.period_ms, 5.0);
        assert!(settings.drain_on_end);
    }
}
