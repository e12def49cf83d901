use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(String),
}

impl From<&str> for PortalError {
    fn from(error: &str) -> Self {
        PortalError::ConfigError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
