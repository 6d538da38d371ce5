use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shows an achievement toast", long_about = None)]
pub struct Cli {
    /// Headline of the toast.
    #[arg(long, default_value = "Koleksiyon Açıldı")]
    pub title: String,

    /// Secondary line of the toast.
    #[arg(long, default_value = "Yeni bir antika keşfettiniz")]
    pub subtitle: String,

    /// Path of the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Sound cue to play, overriding the configured one.
    #[arg(long, value_name = "PATH")]
    pub sound: Option<PathBuf>,

    /// Simulates a click after the given delay (e.g. "1s").
    #[arg(long, value_parser = parse_duration)]
    pub click_after: Option<Duration>,

    /// Logs the toast instead of showing a desktop notification.
    #[arg(long, action = ArgAction::SetTrue)]
    pub headless: bool,

    /// JSON log output (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "achievement_toast=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
