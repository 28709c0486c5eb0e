use std::fmt::{Display, Formatter};

use crate::backend::DeviceError;

/// Error type for playback control operations and render failures.
#[derive(Debug, Clone)]
pub enum PlaybackError {
    /// The output device could not be opened; no session was started.
    DeviceUnavailable(String),
    /// A control argument was rejected; no state changed.
    InvalidArgument(String),
    /// The device failed during playback and the session shut down.
    DeviceFailure(String),
}

impl Display for PlaybackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeviceUnavailable(err) => write!(f, "output device unavailable: {}", err),
            Self::InvalidArgument(err) => write!(f, "invalid argument: {}", err),
            Self::DeviceFailure(err) => write!(f, "device failure during playback: {}", err),
        }
    }
}

impl std::error::Error for PlaybackError {}

impl From<DeviceError> for PlaybackError {
    fn from(value: DeviceError) -> Self {
        match value {
            DeviceError::Unavailable(err) => Self::DeviceUnavailable(err),
            DeviceError::Recoverable(err) | DeviceError::Fatal(err) => Self::DeviceFailure(err),
        }
    }
}
