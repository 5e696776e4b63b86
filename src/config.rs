//! Client configuration.
//!
//! Loaded from a TOML file; every field is optional and falls back to a
//! default so a bare `partyq` works against a local server.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub(crate) const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// On-disk config schema.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConfigFile {
    /// Server base URL, e.g. https://192.168.1.10:8443
    pub(crate) server_url: Option<String>,
    /// Opaque transport credential sent as a bearer token; the client does
    /// not interpret its contents.
    pub(crate) auth_token: Option<String>,
    /// Override for the local data directory (search cache, playlists).
    pub(crate) data_dir: Option<String>,
}

/// Resolved configuration used by every command.
#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) server_url: String,
    pub(crate) auth_token: Option<String>,
    pub(crate) data_dir: PathBuf,
}

impl ConfigFile {
    /// Load configuration from disk.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("read config {:?}", path))?;
        let cfg = toml::from_str::<ConfigFile>(&raw)
            .with_context(|| format!("parse config {:?}", path))?;
        Ok(cfg)
    }
}

/// Resolve the effective config: an explicit `--config` path, else
/// `~/.config/partyq/config.toml` when it exists, else defaults.
pub(crate) fn resolve(config_arg: Option<&Path>) -> Result<Config> {
    let file = match config_arg {
        Some(path) => ConfigFile::load(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => ConfigFile::load(&path)?,
            _ => ConfigFile::default(),
        },
    };
    from_file(file)
}

fn from_file(file: ConfigFile) -> Result<Config> {
    let server_url = file
        .server_url
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
        .trim_end_matches('/')
        .to_string();
    let data_dir = match file.data_dir {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .context("locate home directory")?
            .join(".partyq"),
    };
    Ok(Config {
        server_url,
        auth_token: file.auth_token,
        data_dir,
    })
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("partyq").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_resolves_to_defaults() {
        let file = toml::from_str::<ConfigFile>("").unwrap();
        let cfg = from_file(file).unwrap();
        assert_eq!(cfg.server_url, DEFAULT_SERVER_URL);
        assert!(cfg.auth_token.is_none());
        assert!(cfg.data_dir.ends_with(".partyq"));
    }

    #[test]
    fn fields_override_defaults() {
        let file = toml::from_str::<ConfigFile>(
            r#"
            server_url = "https://example.net:8443/"
            auth_token = "secret"
            data_dir = "/var/lib/partyq"
            "#,
        )
        .unwrap();
        let cfg = from_file(file).unwrap();
        assert_eq!(cfg.server_url, "https://example.net:8443");
        assert_eq!(cfg.auth_token.as_deref(), Some("secret"));
        assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/partyq"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let file = toml::from_str::<ConfigFile>("future_knob = 1").unwrap();
        assert!(file.server_url.is_none());
    }
}
