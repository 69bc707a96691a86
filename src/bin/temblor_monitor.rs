//! temblor-monitor - live microseismic detection in the terminal.
//!
//! Waveform display, event table, and keyboard control surface over the
//! temblor detection pipeline.

use temblor::app::App;
use temblor::config::Config;
use temblor::debug;

fn main() {
    debug::init_from_env();

    // Missing config file means stock pipeline; a malformed one is fatal.
    let config = match Config::load(Config::default_path()) {
        Ok(config) => config,
        Err(temblor::TemblorError::ConfigNotFound { .. }) => Config::default(),
        Err(err) => {
            eprintln!("temblor-monitor: {err}");
            std::process::exit(1);
        }
    };

    let mut app = match App::new(config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("temblor-monitor: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = app.run() {
        eprintln!("temblor-monitor: {err}");
        std::process::exit(1);
    }
}
