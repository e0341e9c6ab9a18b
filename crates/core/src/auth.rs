use crate::{ConfigError, ConnectionConfig, Credentials};

/// Builds the `h=..,P=..,D=..,u=..,p=..,t=..` descriptor the tool connects with.
pub fn build_auth_string(config: &ConnectionConfig, table: &str) -> Result<String, ConfigError> {
    Ok(Credentials::from_connection(config)?.auth_string(table))
}

impl Credentials {
    #[must_use]
    pub fn auth_string(&self, table: &str) -> String {
        format!(
            "h={},P={},D={},u={},p={},t={}",
            self.host, self.port, self.database, self.username, self.password, table
        )
    }
}
