use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

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

#[test]
fn help_lists_playback_options() {
    Command::new(assert_cmd::cargo::cargo_bin!("overture"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--backend"))
        .stdout(predicate::str::contains("--volume"));
}

#[test]
fn no_arguments_shows_usage() {
    Command::new(assert_cmd::cargo::cargo_bin!("overture"))
        .assert()
        .failure();
}

#[test]
fn plays_generated_tone_through_null_backend() {
    Command::new(assert_cmd::cargo::cargo_bin!("overture"))
        .args(["--tone-hz", "440", "--tone-ms", "40", "--backend", "null"])
        .assert()
        .success()
        .stdout(predicate::str::contains("done at"));
}

#[test]
fn plays_wav_file_through_null_backend() {
    let mut file = tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .expect("create temp wav");
    file.write_all(&wav_bytes(8_000, 800)).expect("write wav");

    Command::new(assert_cmd::cargo::cargo_bin!("overture"))
        .arg(file.path())
        .args(["--backend", "null", "--quiet"])
        .assert()
        .success();
}

#[test]
fn plays_a_sub_range_of_a_wav_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .expect("create temp wav");
    file.write_all(&wav_bytes(8_000, 1_600)).expect("write wav");

    Command::new(assert_cmd::cargo::cargo_bin!("overture"))
        .arg(file.path())
        .args(["--start-ms", "50", "--length-ms", "50", "--backend", "null", "--quiet"])
        .assert()
        .success();
}

#[test]
fn rejects_negative_volume() {
    Command::new(assert_cmd::cargo::cargo_bin!("overture"))
        .args([
            "--tone-hz",
            "440",
            "--tone-ms",
            "10",
            "--backend",
            "null",
            "--quiet",
            "--volume=-1",
        ])
        .assert()
        .failure();
}

#[test]
fn missing_file_fails_cleanly() {
    Command::new(assert_cmd::cargo::cargo_bin!("overture"))
        .arg("/nonexistent/overture-test.wav")
        .args(["--backend", "null", "--quiet"])
        .assert()
        .failure();
}
