//! CLI argument definitions for `overture`.

use clap::{Arg, ArgAction, Command};

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    // Build the CLI definition in one place to keep main.rs slim.
    Command::new("Overture")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Play audio through the overture engine")
        .arg_required_else_help(true)
        .arg(
            Arg::new("INPUT")
                .help("The input audio file path")
                .required(false)
                .index(1),
        )
        .arg(
            Arg::new("tone-hz")
                .long("tone-hz")
                .value_name("HZ")
                .conflicts_with("INPUT")
                .help("Play a generated sine tone instead of a file"),
        )
        .arg(
            Arg::new("tone-ms")
                .long("tone-ms")
                .value_name("MS")
                .default_value("1000")
                .help("Length of the generated tone"),
        )
        .arg(
            Arg::new("start-ms")
                .long("start-ms")
                .short('s')
                .value_name("MS")
                .default_value("0")
                .help("Playback start position"),
        )
        .arg(
            Arg::new("length-ms")
                .long("length-ms")
                .short('l')
                .value_name("MS")
                .help("Playback length (defaults to the rest of the source)"),
        )
        .arg(
            Arg::new("volume")
                .long("volume")
                .short('g')
                .value_name("GAIN")
                .default_value("1.0")
                .help("Linear playback gain, >= 0"),
        )
        .arg(
            Arg::new("seek-ms")
                .long("seek-ms")
                .value_name("MS")
                .help("Seek once to this position right after playback starts"),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .value_name("NAME")
                .default_value("device")
                .value_parser(["device", "null"])
                .help("Output backend"),
        )
        .arg(
            Arg::new("settings-json")
                .long("settings-json")
                .value_name("PATH")
                .help("Path to a JSON player settings payload"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Suppress progress output"),
        )
}
