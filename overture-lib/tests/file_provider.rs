//! Decoding behavior of the file-backed provider.

use std::io::Write;

use overture_lib::provider::{AudioProvider, FileProvider, ProviderError};

const RATE: u32 = 8_000;
const FRAMES: u32 = 800;

/// Minimal PCM16 WAV payload containing a mono sine tone.
fn wav_bytes(sample_rate: u32, frames: u32) -> Vec<u8> {
    let data_len = frames * 2;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for i in 0..frames {
        let phase = i as f32 * std::f32::consts::TAU * 440.0 / sample_rate as f32;
        let sample = (phase.sin() * 0.3 * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    bytes
}

fn write_wav() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .expect("create temp wav");
    file.write_all(&wav_bytes(RATE, FRAMES)).expect("write wav");
    file
}

#[test]
fn decodes_wav_and_reports_native_spec() {
    let file = write_wav();
    let provider = FileProvider::open(file.path().to_str().unwrap()).expect("decode wav");

    let spec = provider.spec();
    assert_eq!(spec.sample_rate, RATE);
    assert_eq!(spec.channels, 1);
    assert_eq!(provider.len_samples(), FRAMES as u64);
}

#[test]
fn decoded_samples_match_the_encoded_tone() {
    let file = write_wav();
    let provider = FileProvider::open(file.path().to_str().unwrap()).expect("decode wav");

    let mut decoded = vec![0.0_f32; FRAMES as usize];
    assert_eq!(
        provider.fill_buffer(&mut decoded, 0, FRAMES as u64),
        FRAMES as u64
    );

    for (i, &sample) in decoded.iter().enumerate() {
        let phase = i as f32 * std::f32::consts::TAU * 440.0 / RATE as f32;
        let expected = phase.sin() * 0.3;
        assert!(
            (sample - expected).abs() < 2e-3,
            "sample {} deviates: {} vs {}",
            i,
            sample,
            expected
        );
    }
}

#[test]
fn missing_file_reports_io_error() {
    let result = FileProvider::open("/nonexistent/overture-provider-test.wav");
    assert!(matches!(result, Err(ProviderError::Io(_))));
}
