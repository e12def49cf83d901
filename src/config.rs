use std::path::{Path, PathBuf};

use clap::Parser;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{PortalError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "student-portal.yaml";

/// Command line overrides.
#[derive(Debug, Default, Parser)]
#[command(name = "student-portal", version, about = "Terminal client for the student records portal")]
pub struct Cli {
    /// YAML config file (defaults to ./student-portal.yaml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8000/
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log in with this username at startup (password from config or env)
    #[arg(short, long)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Initial cookie header, e.g. `csrftoken=...; session_token=...`.
    pub cookies: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/".to_string(),
            cookies: None,
            username: None,
            password: None,
            timeout_secs: 30,
            log_dir: PathBuf::from("./logs"),
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, then the YAML file, then the environment, then `cli`.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.apply_cli(cli);
        config.base_url()?;

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PortalError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("STUDENT_PORTAL_URL") {
            self.base_url = url;
        }
        if let Some(cookies) = lookup("STUDENT_PORTAL_COOKIES") {
            self.cookies = Some(cookies);
        }
        if let Some(username) = lookup("STUDENT_PORTAL_USERNAME") {
            self.username = Some(username);
        }
        if let Some(password) = lookup("STUDENT_PORTAL_PASSWORD") {
            self.password = Some(password);
        }
        if lookup("DEBUG").as_deref() == Some("true") {
            self.log_level = "debug".to_string();
        }
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.base_url {
            self.base_url = url.clone();
        }
        if let Some(username) = &cli.username {
            self.username = Some(username.clone());
        }
    }

    /// Parsed base URL, always ending in `/` so endpoint paths join under it.
    pub fn base_url(&self) -> Result<Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let url = Url::parse(&raw).map_err(|e| PortalError::UrlError(format!("{}: {}", raw, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(PortalError::UrlError(format!(
                "unsupported scheme {} (only http/https allowed)",
                other
            ))),
        }
    }

    /// Credentials for startup login, when both halves are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) if !user.is_empty() => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }
}
