use std::path::PathBuf;

use crate::ConfigError;

pub const DEFAULT_TOOL: &str = "pt-online-schema-change";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: String,
    pub socket: Option<String>,
}

/// Settings for the external online schema-change tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlineSchemaChangeConfig {
    pub tool: PathBuf,
    /// Extra tokens placed between the mode flag and `--alter`, in order.
    pub params: Vec<String>,
    /// Assemble the real invocation with `--dry-run` instead of `--execute`.
    pub pretend: bool,
}

impl Default for OnlineSchemaChangeConfig {
    fn default() -> Self {
        Self {
            tool: PathBuf::from(DEFAULT_TOOL),
            params: Vec::new(),
            pretend: false,
        }
    }
}

impl OnlineSchemaChangeConfig {
    #[must_use]
    pub fn tool_name(&self) -> String {
        self.tool.to_string_lossy().into_owned()
    }
}

/// The five values the tool's auth string is built from.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn from_connection(config: &ConnectionConfig) -> Result<Self, ConfigError> {
        let database = config.database.trim();
        if database.is_empty() {
            return Err(ConfigError::MissingCredential { field: "database" });
        }

        Ok(Self {
            host: required(config.host.as_deref(), "host")?,
            port: config
                .port
                .ok_or(ConfigError::MissingCredential { field: "port" })?,
            database: database.to_string(),
            username: required(config.user.as_deref(), "username")?,
            password: required(config.password.as_deref(), "password")?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &"*****")
            .field("password", &"*****")
            .finish()
    }
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, ConfigError> {
    value
        .map(str::to_string)
        .ok_or(ConfigError::MissingCredential { field })
}
