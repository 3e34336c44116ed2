use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Locator \"{locator}\" failed: {message}")]
    LocatorFailed { locator: String, message: String },

    #[error("Token provider failed: {0}")]
    TokenProviderFailed(String),

    #[error("Formatter failed: {0}")]
    FormatterFailed(String),

    #[error("Invalid pattern definition: {0}")]
    InvalidPattern(String),

    #[error("Failed to save {destination}: {source}")]
    SaveFailed {
        destination: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParseError(e.message().to_string())
    }
}
