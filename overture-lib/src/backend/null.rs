//! Hardware-free output device for tests and headless runs.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::{AudioBackend, DeviceError, OutputDevice, OutputSpec};

/// Scripted failure for one write of a [`NullBackend`] device.
#[derive(Debug, Clone, Copy)]
pub struct WriteFailure {
    /// Zero-based index of the write that fails.
    pub at_write: usize,
    /// Fail with [`DeviceError::Fatal`] instead of `Recoverable`.
    pub fatal: bool,
    /// Whether a recovery attempt after the failure succeeds.
    pub recovery_succeeds: bool,
}

/// Output backend that consumes samples without any hardware.
///
/// Every sample the device accepts is captured for inspection. Pacing is
/// optional: real-time mode sleeps for the duration of each chunk, free-run
/// mode returns immediately. Scripted open and write failures exercise the
/// engine's error paths deterministically.
#[derive(Clone, Default)]
pub struct NullBackend {
    realtime: bool,
    fail_open: bool,
    failure: Option<WriteFailure>,
    short_write: Option<(usize, usize)>,
    captured: Arc<Mutex<Vec<f32>>>,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for each chunk's real-time duration while writing.
    pub fn realtime(mut self) -> Self {
        self.realtime = true;
        self
    }

    /// Make `open` fail with [`DeviceError::Unavailable`].
    pub fn fail_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Inject a failure into one write.
    pub fn fail_write(mut self, failure: WriteFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Accept only `samples` samples on the write with the given index.
    pub fn short_write(mut self, at_write: usize, samples: usize) -> Self {
        self.short_write = Some((at_write, samples));
        self
    }

    /// Shared handle to every sample the device has accepted.
    pub fn captured(&self) -> Arc<Mutex<Vec<f32>>> {
        self.captured.clone()
    }
}

impl AudioBackend for NullBackend {
    fn name(&self) -> &'static str {
        "null"
    }

    fn open(&self, spec: OutputSpec) -> Result<Box<dyn OutputDevice>, DeviceError> {
        if self.fail_open {
            return Err(DeviceError::Unavailable(
                "null backend configured to fail open".to_string(),
            ));
        }

        Ok(Box::new(NullDevice {
            spec,
            realtime: self.realtime,
            failure: self.failure,
            short_write: self.short_write,
            captured: self.captured.clone(),
            writes: 0,
            needs_recovery: false,
        }))
    }
}

struct NullDevice {
    spec: OutputSpec,
    realtime: bool,
    failure: Option<WriteFailure>,
    short_write: Option<(usize, usize)>,
    captured: Arc<Mutex<Vec<f32>>>,
    writes: usize,
    needs_recovery: bool,
}

impl OutputDevice for NullDevice {
    fn write(&mut self, samples: &[f32]) -> Result<usize, DeviceError> {
        let write_index = self.writes;
        self.writes += 1;

        if let Some(failure) = self.failure {
            if write_index == failure.at_write {
                if failure.fatal {
                    return Err(DeviceError::Fatal("scripted write failure".to_string()));
                }
                self.needs_recovery = true;
                return Err(DeviceError::Recoverable("scripted underrun".to_string()));
            }
        }
        if self.needs_recovery {
            return Err(DeviceError::Recoverable(
                "device not re-prepared after underrun".to_string(),
            ));
        }

        let channels = self.spec.channels.max(1) as usize;
        let mut accept = samples.len() / channels;
        if let Some((at_write, short)) = self.short_write {
            if write_index == at_write {
                accept = accept.min(short);
            }
        }

        self.captured
            .lock()
            .unwrap()
            .extend_from_slice(&samples[..accept * channels]);

        if self.realtime {
            let seconds = accept as f64 / self.spec.sample_rate.max(1) as f64;
            thread::sleep(Duration::from_secs_f64(seconds));
        }

        Ok(accept)
    }

    fn recover(&mut self) -> Result<(), DeviceError> {
        let Some(failure) = self.failure else {
            return Ok(());
        };
        if failure.recovery_succeeds {
            self.needs_recovery = false;
            Ok(())
        } else {
            Err(DeviceError::Fatal("scripted recovery failure".to_string()))
        }
    }

    fn discard(&mut self) {}

    fn drain(&mut self) {}

    fn period_samples(&self) -> usize {
        self.spec.period_samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> OutputSpec {
        OutputSpec {
            sample_rate: 8_000,
            channels: 2,
            period_samples: 4,
        }
    }

    #[test]
    fn captures_written_samples() {
        let backend = NullBackend::new();
        let captured = backend.captured();
        let mut device = backend.open(spec()).unwrap();

        assert_eq!(device.write(&[0.1, 0.2, 0.3, 0.4]).unwrap(), 2);
        assert_eq!(*captured.lock().unwrap(), vec![0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn fail_open_reports_unavailable() {
        let backend = NullBackend::new().fail_open();
        assert!(matches!(
            backend.open(spec()),
            Err(DeviceError::Unavailable(_))
        ));
    }

    #[test]
    fn recoverable_write_succeeds_after_recovery() {
        let backend = NullBackend::new().fail_write(WriteFailure {
            at_write: 0,
            fatal: false,
            recovery_succeeds: true,
        });
        let mut device = backend.open(spec()).unwrap();

        assert!(matches!(
            device.write(&[0.5, 0.5]),
            Err(DeviceError::Recoverable(_))
        ));
        device.recover().unwrap();
        assert_eq!(device.write(&[0.5, 0.5]).unwrap(), 1);
    }

    #[test]
    fn failed_recovery_is_fatal() {
        let backend = NullBackend::new().fail_write(WriteFailure {
            at_write: 0,
            fatal: false,
            recovery_succeeds: false,
        });
        let mut device = backend.open(spec()).unwrap();

        assert!(device.write(&[0.0, 0.0]).is_err());
        assert!(matches!(device.recover(), Err(DeviceError::Fatal(_))));
    }

    #[test]
    fn short_write_accepts_partial_chunk() {
        let backend = NullBackend::new().short_write(0, 1);
        let captured = backend.captured();
        let mut device = backend.open(spec()).unwrap();

        assert_eq!(device.write(&[0.1, 0.2, 0.3, 0.4]).unwrap(), 1);
        assert_eq!(*captured.lock().unwrap(), vec![0.1, 0.2]);
        assert_eq!(device.write(&[0.3, 0.4]).unwrap(), 1);
    }
}
