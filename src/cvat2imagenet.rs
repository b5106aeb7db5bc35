use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use cvat2imagenet::{process_dataset, Args};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match args.to_convert_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Starting the conversion process...");

    match process_dataset(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to process dataset: {}", e);
            ExitCode::FAILURE
        }
    }
}
