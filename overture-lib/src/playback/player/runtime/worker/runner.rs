//! Render loop implementation.

use log::{error, warn};

use crate::backend::{DeviceError, OutputDevice, OutputSpec};
use crate::playback::state::ControlPoll;

use super::context::RenderContext;
use super::guard::RenderGuard;

/// Run the render loop for one playback session.
///
/// Opens the device, reports the result back to `play`, then pulls provider
/// samples one period at a time, applies the current volume, and writes to
/// the device until the end bound, a stop request, or an unrecoverable device
/// error. Every exit path closes the device (on drop) and clears the running
/// flag (via the guard) before the thread terminates, so the blocking join in
/// `stop` always completes.
pub(in crate::playback::player::runtime) fn run_render_thread(ctx: RenderContext) {
    let _guard = RenderGuard::new(ctx.state.clone());

    let source_spec = ctx.provider.spec();
    let output_spec = OutputSpec {
        sample_rate: source_spec.sample_rate,
        channels: source_spec.channels,
        period_samples: ctx.period_samples,
    };

    let mut device = match ctx.backend.open(output_spec) {
        Ok(device) => {
            let _ = ctx.ready.send(Ok(()));
            device
        }
        Err(err) => {
            let _ = ctx.ready.send(Err(err));
            return;
        }
    };

    let channels = source_spec.channels.max(1) as usize;
    let period = device.period_samples().max(1);
    let drain_on_end = ctx.settings.lock().unwrap().drain_on_end;

    let mut scratch = vec![0.0_f32; period * channels];
    let mut cursor = ctx.state.current();

    loop {
        let ControlPoll {
            stop_requested,
            end_sample,
            seek,
        } = ctx.state.poll_control();

        if stop_requested {
            device.discard();
            break;
        }

        if let Some(target) = seek {
            // Restart-with-flush: queued audio is stale once the cursor moves.
            device.discard();
            cursor = target;
        }

        if cursor >= end_sample {
            if drain_on_end {
                device.drain();
            }
            break;
        }

        let want = period.min((end_sample - cursor) as usize);
        let chunk = &mut scratch[..want * channels];
        let filled = ctx.provider.fill_buffer(chunk, cursor, want as u64) as usize;
        if filled == 0 {
            break;
        }

        let gain = ctx.state.volume();
        let chunk = &mut chunk[..filled * channels];
        for sample in chunk.iter_mut() {
            *sample *= gain;
        }

        match write_with_recovery(device.as_mut(), chunk) {
            Ok(0) => {
                warn!("output device accepted no samples, ending session");
                break;
            }
            Ok(written) => {
                // Advance by what the device actually accepted; a partial
                // write re-pulls the remainder next iteration.
                let advanced = cursor + written as u64;
                if ctx.state.publish_advance(advanced) {
                    cursor = advanced;
                }
            }
            Err(err) => {
                error!("render thread stopping on device error: {}", err);
                ctx.state.record_error(err.into());
                break;
            }
        }
    }
}

/// Write one chunk, attempting a single device recovery on a recoverable
/// error. Any failure after that is fatal for the session.
fn write_with_recovery(
    device: &mut dyn OutputDevice,
    samples: &[f32],
) -> Result<usize, DeviceError> {
    match device.write(samples) {
        Ok(written) => Ok(written),
        Err(DeviceError::Recoverable(reason)) => {
            warn!("recoverable device error ({}), re-preparing device", reason);
            device.recover()?;
            device.write(samples)
        }
        Err(err) => Err(err),
    }
}
