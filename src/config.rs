use crate::error::{BadEnvVarSnafu, ParseEnvVarSnafu, RosterResult};
use dotenvy::var;
use snafu::ResultExt;
use std::{env::VarError, path::PathBuf, sync::Arc};

#[derive(Clone, Debug, Default)]
pub struct RuntimeConfiguration {
    server_config: Arc<ServerConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            server_config: Arc::new(ServerConfig::new()?),
        })
    }

    pub fn server_config(&self) -> Arc<ServerConfig> {
        self.server_config.clone()
    }
}

#[derive(Debug)]
pub struct ServerConfig {
    pub server_ip: String,
    pub max_upload_bytes: usize,
    ///replaces the built-in sample students when set
    pub sample_data_path: Option<PathBuf>,
}

impl ServerConfig {
    pub const DEFAULT_SERVER_IP: &'static str = "127.0.0.1:8080";
    pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

    pub fn new() -> RosterResult<Self> {
        let max_upload_bytes = match optional_env_var("ROSTER_MAX_UPLOAD_BYTES")? {
            Some(bytes) => bytes.parse().context(ParseEnvVarSnafu {
                name: "ROSTER_MAX_UPLOAD_BYTES",
            })?,
            None => Self::DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            server_ip: optional_env_var("ROSTER_SERVER_IP")?
                .unwrap_or_else(|| Self::DEFAULT_SERVER_IP.to_string()),
            max_upload_bytes,
            sample_data_path: optional_env_var("ROSTER_SAMPLE_DATA")?.map(PathBuf::from),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_ip: Self::DEFAULT_SERVER_IP.to_string(),
            max_upload_bytes: Self::DEFAULT_MAX_UPLOAD_BYTES,
            sample_data_path: None,
        }
    }
}

///missing is fine, anything else (eg. non-unicode) is an error
fn optional_env_var(name: &'static str) -> RosterResult<Option<String>> {
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(source) => Err(source).context(BadEnvVarSnafu { name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = RuntimeConfiguration::default();
        let server = config.server_config();
        assert_eq!(server.server_ip, "127.0.0.1:8080");
        assert_eq!(server.max_upload_bytes, 5 * 1024 * 1024);
        assert!(server.sample_data_path.is_none());
    }

    #[test]
    fn missing_var_is_none() {
        assert_eq!(
            optional_env_var("ROSTER_TEST_DEFINITELY_NOT_SET").unwrap(),
            None
        );
    }
}
