use std::time::Instant;

use clap::Parser;
use tracing::{debug, info, Level};

use advisor_core::logging::{init_logging, log_command_end};
use advisor_core::{AdvisorConfig, AppError};
use fps_advisor::{execute, Advisor, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let (config, source) = match AdvisorConfig::load_with_source(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => fail(anyhow::Error::new(AppError::from(e))),
    };

    let mut log_config = config.logging.to_log_config();
    if cli.verbose {
        log_config = log_config.with_level(Level::DEBUG);
    }
    let _ = init_logging("fps_advisor", log_config);

    match &source {
        Some(path) => info!(path = %path.display(), "Loaded configuration"),
        None => debug!("No config file found, using defaults"),
    }

    let start = Instant::now();
    let result = run(config, &cli.command);
    log_command_end(cli.command.name(), start.elapsed(), result.is_ok());

    match result {
        Ok(report) => println!("{}", report),
        Err(e) => fail(e),
    }
}

fn run(config: AdvisorConfig, command: &Commands) -> anyhow::Result<String> {
    let advisor = Advisor::from_config(config)?;
    execute(&advisor, command)
}

fn fail(e: anyhow::Error) -> ! {
    match e.downcast_ref::<AppError>() {
        Some(app) => {
            eprintln!("{}", app.user_message());
            std::process::exit(app.exit_code());
        }
        None => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
