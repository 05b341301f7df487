pub mod environment;

use std::fmt;

use environment::{env_flag, env_or, optional_env};

const DEFAULT_FILE_PATH: &str = "parameters.json";

#[async_trait::async_trait]
pub trait Configs: Sized {
    async fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    ParameterStore,
    SecretsManager,
    Environment,
    File,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParameterStore => write!(f, "parameter_store"),
            Self::SecretsManager => write!(f, "secrets_manager"),
            Self::Environment => write!(f, "environment"),
            Self::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "parameter_store" | "ssm" => Ok(Self::ParameterStore),
            "secrets_manager" | "secrets" => Ok(Self::SecretsManager),
            "environment" | "env" => Ok(Self::Environment),
            "file" => Ok(Self::File),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

/// Where parameters are fetched from and how the AWS clients are built.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
    pub with_decryption: bool,
    pub env_prefix: Option<String>,
    pub file_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            region: None,
            profile: None,
            endpoint_url: None,
            with_decryption: true,
            env_prefix: None,
            file_path: DEFAULT_FILE_PATH.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Configs for StoreConfig {
    async fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let backend = env_or("SSM_CONFIG_BACKEND", "parameter_store").parse::<StoreBackend>()?;

        Ok(StoreConfig {
            backend,
            region: optional_env("AWS_REGION"),
            profile: optional_env("AWS_PROFILE"),
            endpoint_url: optional_env("AWS_ENDPOINT").or_else(|| optional_env("SSM_ENDPOINT")),
            with_decryption: env_flag("SSM_WITH_DECRYPTION", true)?,
            env_prefix: optional_env("SSM_ENV_PREFIX"),
            file_path: env_or("SSM_FILE_PATH", DEFAULT_FILE_PATH),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "SSM_CONFIG_BACKEND",
        "AWS_REGION",
        "AWS_PROFILE",
        "AWS_ENDPOINT",
        "SSM_ENDPOINT",
        "SSM_WITH_DECRYPTION",
        "SSM_ENV_PREFIX",
        "SSM_FILE_PATH",
    ];

    fn clear_vars() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("ssm".parse::<StoreBackend>(), Ok(StoreBackend::ParameterStore));
        assert_eq!("SECRETS".parse::<StoreBackend>(), Ok(StoreBackend::SecretsManager));
        assert_eq!("env".parse::<StoreBackend>(), Ok(StoreBackend::Environment));
        assert_eq!("file".parse::<StoreBackend>(), Ok(StoreBackend::File));
        assert!("vault".parse::<StoreBackend>().is_err());
    }

    #[tokio::test]
    #[serial]
    async fn test_load_defaults() {
        clear_vars();

        let config = StoreConfig::load().await.unwrap();
        assert_eq!(config.backend, StoreBackend::ParameterStore);
        assert_eq!(config.region, None);
        assert!(config.with_decryption);
        assert_eq!(config.file_path, DEFAULT_FILE_PATH);
    }

    #[tokio::test]
    #[serial]
    async fn test_load_from_env() {
        clear_vars();
        unsafe {
            std::env::set_var("SSM_CONFIG_BACKEND", "env");
            std::env::set_var("AWS_REGION", "ap-southeast-1");
            std::env::set_var("SSM_ENDPOINT", "http://localhost:4566");
            std::env::set_var("SSM_WITH_DECRYPTION", "false");
            std::env::set_var("SSM_ENV_PREFIX", "MYAPP");
        }

        let config = StoreConfig::load().await.unwrap();
        assert_eq!(config.backend, StoreBackend::Environment);
        assert_eq!(config.region.as_deref(), Some("ap-southeast-1"));
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert!(!config.with_decryption);
        assert_eq!(config.env_prefix.as_deref(), Some("MYAPP"));

        clear_vars();
    }

    #[tokio::test]
    #[serial]
    async fn test_load_rejects_unknown_backend() {
        clear_vars();
        unsafe {
            std::env::set_var("SSM_CONFIG_BACKEND", "vault");
        }

        assert!(StoreConfig::load().await.is_err());

        clear_vars();
    }
}
