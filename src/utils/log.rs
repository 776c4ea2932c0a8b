use std::str::FromStr;

use colog::format::CologStyle;
use env_logger::Builder;
use log::{Level, LevelFilter};

struct CustomLevelTokens;

impl CologStyle for CustomLevelTokens {
    fn level_token(&self, level: &Level) -> &str {
        match *level {
            Level::Error => "ERR",
            Level::Warn => "WRN",
            Level::Info => "INF",
            Level::Debug => "DBG",
            Level::Trace => "TRC",
        }
    }
}

pub struct Logger;

impl Logger {
    pub fn init(level: Option<LevelFilter>) {
        Builder::new()
            .filter(Some("ragchat"), level.unwrap_or(LevelFilter::Info))
            .filter(Some("rig"), LevelFilter::Warn)
            .filter(Some("qdrant_client"), LevelFilter::Warn)
            .filter(Some("serenity"), LevelFilter::Warn)
            .filter(Some("poise"), LevelFilter::Warn)
            .target(env_logger::Target::Stdout)
            .format(colog::formatter(CustomLevelTokens))
            .write_style(env_logger::WriteStyle::Always)
            .init();
    }

    /// Parses a level name from the config, unknown names fall back to the default.
    pub fn level(name: Option<&str>) -> Option<LevelFilter> {
        name.and_then(|name| LevelFilter::from_str(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(Logger::level(Some("debug")), Some(LevelFilter::Debug));
        assert_eq!(Logger::level(Some("WARN")), Some(LevelFilter::Warn));
        assert_eq!(Logger::level(Some("loud")), None);
        assert_eq!(Logger::level(None), None);
    }
}
