// ============================
// linkkeeper-backend/src/config.rs
// ============================
//! Configuration management.
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `LINKKEEPER_BIND_ADDR`
pub const ENV_PREFIX: &str = "LINKKEEPER_";

/// Unprefixed SSH variables read for compatibility with existing `.env` files
const LEGACY_SSH_VARS: &[&str] = &["SSH_HOST", "SSH_PORT", "SSH_USER", "SSH_PASSWORD"];

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Read `.env` into the process environment.
///
/// A missing file is fine; one that exists but cannot be read or parsed is not.
fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("failed to load .env"),
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Remote host used by operational commands
    pub ssh: RemoteConfig,
    /// Bearer tokens accepted by the static validator
    pub tokens: Vec<TokenMapping>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Connection settings for the remote command host
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Password login; uses `sshpass` when set
    pub password: Option<String>,
    /// Private key for key-based login
    pub identity_file: Option<String>,
    pub connect_timeout_secs: u64,
    /// Overall limit for one remote command
    pub command_timeout_secs: u64,
    /// Trust host keys that are not yet in `known_hosts`
    pub accept_unknown_host_keys: bool,
}

/// Maps a static bearer token to a user
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    pub token: String,
    pub uid: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            ssh: RemoteConfig::default(),
            tokens: Vec::new(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 22,
            user: "root".to_string(),
            password: None,
            identity_file: None,
            connect_timeout_secs: 10,
            command_timeout_secs: 120,
            accept_unknown_host_keys: true,
        }
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("identity_file", &self.identity_file)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("command_timeout_secs", &self.command_timeout_secs)
            .field("accept_unknown_host_keys", &self.accept_unknown_host_keys)
            .finish()
    }
}

impl fmt::Debug for TokenMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenMapping")
            .field("token", &"<redacted>")
            .field("uid", &self.uid)
            .field("name", &self.name)
            .finish()
    }
}

impl Settings {
    /// Load settings from the default config files and the environment
    pub fn load() -> Result<Self> {
        load_dotenv()?;
        let settings: Settings = Self::figment(None).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from an explicit config file plus the environment
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        load_dotenv()?;
        let settings: Settings = Self::figment(Some(path)).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Provider chain: defaults, files, legacy SSH variables, prefixed env
    pub fn figment(path: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Settings::default()));
        let figment = match path {
            Some(path) => match path.extension().and_then(|e| e.to_str()) {
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            },
            None => figment
                .merge(Toml::file("config.toml"))
                .merge(Yaml::file("config.yaml"))
                .merge(Json::file("config.json")),
        };

        figment
            .merge(
                Env::raw()
                    .only(LEGACY_SSH_VARS)
                    .map(|key| key.as_str().to_ascii_lowercase().replacen("ssh_", "ssh.", 1).into()),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check settings for values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!("invalid log level: {}", self.log_level);
        }
        if self.ssh.port == 0 {
            bail!("ssh port must not be zero");
        }
        if self.ssh.host.trim().is_empty() {
            bail!("ssh host must not be empty");
        }
        if self.ssh.command_timeout_secs == 0 {
            bail!("ssh command timeout must be positive");
        }
        for (i, mapping) in self.tokens.iter().enumerate() {
            if mapping.token.trim().is_empty() || mapping.token.contains(char::is_whitespace) {
                bail!("token #{i} for uid {} is empty or contains whitespace", mapping.uid);
            }
            if mapping.uid.trim().is_empty() {
                bail!("token #{i} has an empty uid");
            }
            if self.tokens[..i].iter().any(|other| other.token == mapping.token) {
                bail!("token #{i} for uid {} is configured twice", mapping.uid);
            }
        }
        Ok(())
    }
}
