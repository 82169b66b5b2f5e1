use std::str::FromStr;
use tracing::Level;

pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

pub fn setup_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_max_level(parse_level(level))
        // disable printing the name of the module in every log line.
        .with_target(false)
        // keep ANSI color codes out of collected log files.
        .with_ansi(false)
        .json()
        .init();
}
