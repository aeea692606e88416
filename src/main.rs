use anyhow::Result;
use clap::Parser;
use jules::cli::{self, Cli};
use jules::util;
use std::fs::{self, OpenOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir.clone());

    // Initialize logging to file (~/.jules/logs/jules.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    tracing::debug!(command = ?cli.command, "Starting");
    cli::run(cli).await
}
