//! `onecall`: looks up OpenWeatherMap One Call data for a coordinate.
//!
//! `onecall configure` stores the API key, unit system and timeout in a TOML
//! file; `onecall show <LAT> <LON>` prints current conditions, or historical
//! ones with `--at`. Log records go to stderr through `fern`, at warn level
//! unless raised with `-v`.

use chrono::Local;
use clap::Parser;
use fern::Dispatch;
use log::LevelFilter;

mod cli;
mod config;
mod render;

fn set_logger(verbosity: u8) -> anyhow::Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Warn)
        .level_for("onecall_core", level)
        .level_for("onecall", level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    set_logger(cmd.verbose)?;
    cmd.run().await
}
