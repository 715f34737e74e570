use std::process::ExitCode;

use brmdoor::{cli, config::CONFIG_FILE, Session, SessionConfig};
use log::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    let Some(state) = cli::parse_args(std::env::args().skip(1)) else {
        print!("{}", cli::USAGE);
        return ExitCode::FAILURE;
    };

    info!("Door is {state}");

    let config = match SessionConfig::load_or_default(CONFIG_FILE).await {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match Session::new(config).run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
