use std::env;

use crate::store::{ParameterStore, StoreError};

/// Resolves parameters from process environment variables, for local runs
/// without AWS access.
///
/// `/service/db-url` is read from `SERVICE_DB_URL`, or from
/// `MYAPP_SERVICE_DB_URL` when the prefix is `MYAPP`.
#[derive(Clone, Debug, Default)]
pub struct EnvironmentStore {
    prefix: Option<String>,
}

impl EnvironmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    pub fn variable_name(&self, parameter: &str) -> String {
        let name: String = parameter
            .trim_start_matches('/')
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();

        match &self.prefix {
            Some(prefix) => format!("{prefix}_{name}"),
            None => name,
        }
    }
}

#[async_trait::async_trait]
impl ParameterStore for EnvironmentStore {
    async fn get_parameter(&self, name: &str) -> Result<String, StoreError> {
        let variable = self.variable_name(name);
        match env::var(&variable) {
            Ok(value) => Ok(value),
            Err(env::VarError::NotPresent) => Err(StoreError::NotFound(format!(
                "{name} (environment variable {variable})"
            ))),
            Err(env::VarError::NotUnicode(_)) => Err(StoreError::InvalidValue(format!(
                "Environment variable '{variable}' is not valid unicode"
            ))),
        }
    }
}
