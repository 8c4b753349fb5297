use std::path::PathBuf;

/// Runtime settings read from the environment (after `.env` is loaded).
///
/// | Variable         | Default              |
/// |------------------|----------------------|
/// | `GRADEBOOK_FILE` | `gradebook.csv`      |
/// | `LOG_FILE_PATH`  | `logs/gradebook.log` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub roster_path: PathBuf,
    pub log_file_path: PathBuf,
}

pub const DEFAULT_ROSTER_PATH: &str = "gradebook.csv";
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/gradebook.log";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from(DEFAULT_ROSTER_PATH),
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE_PATH),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Empty values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            roster_path: get("GRADEBOOK_FILE", DEFAULT_ROSTER_PATH),
            log_file_path: get("LOG_FILE_PATH", DEFAULT_LOG_FILE_PATH),
        }
    }

    /// Directory and file name for the rolling log appender.
    pub fn log_location(&self) -> (PathBuf, PathBuf) {
        let dir = self
            .log_file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));
        let file = self
            .log_file_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("gradebook.log"));
        (dir, file)
    }
}
