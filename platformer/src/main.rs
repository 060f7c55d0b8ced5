use std::process::ExitCode;

use platformer::{
    exit_status,
    logging::{init_logging, LoggingConfig},
    GameConfig,
};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match platformer::run(GameConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}
