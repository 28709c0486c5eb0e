//! # Overture
//!
//! A command-line player that streams an audio file or a generated tone
//! through the overture playback engine.

use log::error;

mod cli;
mod logging;
mod runner;

fn main() {
    logging::init();
    let args = cli::args::build_cli().get_matches();

    let code = match runner::run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            1
        }
    };

    std::process::exit(code)
}
