//! Hardware output through a rodio sink.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use std::thread;
use std::time::Duration;

use super::{AudioBackend, DeviceError, OutputDevice, OutputSpec};

const QUEUE_POLL_MS: u64 = 5;
const DEFAULT_MAX_QUEUED_PERIODS: usize = 4;

/// Output backend driving the default system audio device.
#[derive(Debug, Clone)]
pub struct RodioBackend {
    max_queued_periods: usize,
}

impl RodioBackend {
    /// Create a backend that keeps at most `max_queued_periods` chunks queued
    /// on the sink before `write` blocks.
    pub fn new(max_queued_periods: usize) -> Self {
        Self {
            max_queued_periods: max_queued_periods.max(1),
        }
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUEUED_PERIODS)
    }
}

impl AudioBackend for RodioBackend {
    fn name(&self) -> &'static str {
        "rodio"
    }

    fn open(&self, spec: OutputSpec) -> Result<Box<dyn OutputDevice>, DeviceError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|err| DeviceError::Unavailable(err.to_string()))?;
        let sink = Sink::connect_new(stream.mixer());
        sink.play();

        Ok(Box::new(RodioDevice {
            stream,
            sink,
            spec,
            max_queued_periods: self.max_queued_periods,
        }))
    }
}

struct RodioDevice {
    stream: OutputStream,
    sink: Sink,
    spec: OutputSpec,
    max_queued_periods: usize,
}

impl OutputDevice for RodioDevice {
    fn write(&mut self, samples: &[f32]) -> Result<usize, DeviceError> {
        // Sink queue depth bounds how far writes run ahead of the hardware;
        // waiting here is what paces the render loop.
        while self.sink.len() >= self.max_queued_periods {
            thread::sleep(Duration::from_millis(QUEUE_POLL_MS));
        }

        let chunk = SamplesBuffer::new(self.spec.channels, self.spec.sample_rate, samples.to_vec());
        self.sink.append(chunk);

        Ok(samples.len() / self.spec.channels.max(1) as usize)
    }

    fn recover(&mut self) -> Result<(), DeviceError> {
        self.sink = Sink::connect_new(self.stream.mixer());
        self.sink.play();
        Ok(())
    }

    fn discard(&mut self) {
        self.sink.clear();
        self.sink.play();
    }

    fn drain(&mut self) {
        self.sink.sleep_until_end();
    }

    fn period_samples(&self) -> usize {
        self.spec.period_samples
    }
}
