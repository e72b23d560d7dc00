use std::path::PathBuf;

/// Environment variable holding the active user's identifier.
pub const USER_ID_VAR: &str = "GOALTRACK_USER_ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

pub struct Config {
    pub data_path: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let data_path = std::env::var("GOALTRACK_DATA_PATH")
            .unwrap_or_else(|_| "./data/goals.json".into());
        let log_format = std::env::var("GOALTRACK_LOG_FORMAT").unwrap_or_else(|_| "text".into());
        Self {
            data_path: PathBuf::from(data_path),
            log_format: LogFormat::parse(&log_format),
        }
    }
}
