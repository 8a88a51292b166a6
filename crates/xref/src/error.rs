use std::fmt;

#[derive(Debug)]
pub enum XrefError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty label, empty file name, etc.).
    ConfigValidation(String),
    /// A referenced source label is not configured.
    UnknownSource(String),
    /// Two sources registered under the same label.
    DuplicateSource(String),
    /// IO error (file read/write, not a missing input).
    Io(String),
    /// CSV read/write error.
    Csv(String),
    /// JSON read/write error.
    Json(String),
}

impl fmt::Display for XrefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::UnknownSource(label) => write!(f, "unknown source: {label}"),
            Self::DuplicateSource(label) => write!(f, "duplicate source label: '{label}'"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
        }
    }
}

impl std::error::Error for XrefError {}

impl From<csv::Error> for XrefError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for XrefError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
