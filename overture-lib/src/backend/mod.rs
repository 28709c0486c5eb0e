//! Output device backends.
//!
//! The engine drives exactly one open [`OutputDevice`] per playback session.
//! Devices are produced by an [`AudioBackend`] chosen when the player is
//! built, so hardware output and the hardware-free test device are
//! interchangeable behind the same contract.

mod null;
mod rodio;

use std::fmt::{Display, Formatter};

pub use null::{NullBackend, WriteFailure};
pub use self::rodio::RodioBackend;

/// Stream parameters requested when opening a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSpec {
    pub sample_rate: u32,
    pub channels: u16,
    /// Requested period in samples per write. Devices may adjust; the value
    /// actually in effect is reported by [`OutputDevice::period_samples`].
    pub period_samples: usize,
}

/// Error type for device open and write operations.
#[derive(Debug, Clone)]
pub enum DeviceError {
    /// The device could not be opened.
    Unavailable(String),
    /// A write failed but the device may be re-prepared with
    /// [`OutputDevice::recover`].
    Recoverable(String),
    /// The device failed permanently for this session.
    Fatal(String),
}

impl Display for DeviceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "output device unavailable: {}", err),
            Self::Recoverable(err) => write!(f, "recoverable device error: {}", err),
            Self::Fatal(err) => write!(f, "fatal device error: {}", err),
        }
    }
}

impl std::error::Error for DeviceError {}

/// Factory for output devices.
///
/// Backends are selected at player construction time and must be shareable
/// across threads; the devices they open live entirely on the render thread.
pub trait AudioBackend: Send + Sync {
    /// Backend name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Open an output device for the given stream parameters.
    fn open(&self, spec: OutputSpec) -> Result<Box<dyn OutputDevice>, DeviceError>;
}

/// One open output device. Dropping the device closes it.
pub trait OutputDevice {
    /// Write interleaved samples, blocking as needed to pace real-time
    /// throughput. Returns the number of samples accepted, which may fall
    /// short of the full chunk.
    fn write(&mut self, samples: &[f32]) -> Result<usize, DeviceError>;

    /// Re-prepare the device after a recoverable write error.
    fn recover(&mut self) -> Result<(), DeviceError>;

    /// Drop any queued audio that has not yet played.
    fn discard(&mut self);

    /// Block until all queued audio has played.
    fn drain(&mut self);

    /// The period in samples this device expects per write.
    fn period_samples(&self) -> usize;
}
