use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,

    /// `None` logs to stdout.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// An empty `logfile` selects stdout; an absent one the default file.
    pub(crate) fn from_entries(level: Option<String>, logfile: Option<String>) -> Self {
        let file = match logfile {
            Some(path) if path.is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(default_log_file()),
        };
        Self {
            level: level.unwrap_or_else(default_log_level),
            file,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: Some(default_log_file()),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("filter-dns.log")
}
