//! Playback execution for the CLI.

use std::io::Write;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use clap::ArgMatches;
use log::{error, info};
use overture_lib::backend::{AudioBackend, NullBackend, RodioBackend};
use overture_lib::playback::{Player, PlayerSettings};
use overture_lib::provider::{AudioProvider, FileProvider, SourceSpec, ToneProvider};

const PROGRESS_INTERVAL_MS: u64 = 50;
const TONE_SAMPLE_RATE: u32 = 44_100;

pub fn run(args: &ArgMatches) -> Result<i32, Box<dyn std::error::Error>> {
    let provider = build_provider(args)?;
    let sample_rate = provider.spec().sample_rate as u64;
    let ms_to_samples = |ms: u64| ms * sample_rate / 1000;

    let start_ms: u64 = args.get_one::<String>("start-ms").unwrap().parse()?;
    let start = ms_to_samples(start_ms);
    let count = match args.get_one::<String>("length-ms") {
        Some(raw) => ms_to_samples(raw.parse()?),
        None => provider.len_samples().saturating_sub(start),
    };
    let volume: f32 = args.get_one::<String>("volume").unwrap().parse()?;
    let quiet = args.get_flag("quiet");

    let backend: Arc<dyn AudioBackend> = match args.get_one::<String>("backend").unwrap().as_str() {
        "null" => Arc::new(NullBackend::new().realtime()),
        _ => Arc::new(RodioBackend::default()),
    };

    let player = Player::with_backend(provider, backend);
    if let Some(path) = args.get_one::<String>("settings-json") {
        let payload = std::fs::read_to_string(path)?;
        player.set_settings(PlayerSettings::from_json(&payload)?);
    }

    player.set_volume(volume)?;

    info!("playing samples {}..{}", start, start + count);
    player.play(start, count)?;

    if let Some(raw) = args.get_one::<String>("seek-ms") {
        player.set_current_position(ms_to_samples(raw.parse()?));
    }

    while player.is_playing() {
        if !quiet {
            print_progress(&player, sample_rate);
        }
        sleep(Duration::from_millis(PROGRESS_INTERVAL_MS));
    }

    if let Some(err) = player.last_error() {
        error!("playback failed: {}", err);
        return Ok(1);
    }

    if !quiet {
        println!(
            "\rdone at {:.2}s          ",
            player.current_position() as f64 / sample_rate as f64
        );
    }

    Ok(0)
}

fn print_progress(player: &Player, sample_rate: u64) {
    let position = player.current_position() as f64 / sample_rate as f64;
    let end = player.end_position() as f64 / sample_rate as f64;
    print!("\r{:.2}s / {:.2}s", position, end);
    let _ = std::io::stdout().flush();
}

fn build_provider(args: &ArgMatches) -> Result<Arc<dyn AudioProvider>, Box<dyn std::error::Error>> {
    if let Some(raw_hz) = args.get_one::<String>("tone-hz") {
        let frequency: f32 = raw_hz.parse()?;
        let tone_ms: u64 = args.get_one::<String>("tone-ms").unwrap().parse()?;
        let spec = SourceSpec {
            sample_rate: TONE_SAMPLE_RATE,
            channels: 2,
        };
        let len_samples = tone_ms * spec.sample_rate as u64 / 1000;
        return Ok(Arc::new(ToneProvider::new(spec, frequency, len_samples)));
    }

    let path = args
        .get_one::<String>("INPUT")
        .ok_or("no input file or tone given")?;
    info!("decoding {}", path);
    Ok(Arc::new(FileProvider::open(path)?))
}
