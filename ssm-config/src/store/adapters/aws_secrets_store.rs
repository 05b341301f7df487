use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::get_secret_value::GetSecretValueError,
};
use aws_types::region::Region;
use tracing::debug;

use crate::{
    configs::StoreConfig,
    store::{ParameterStore, StoreError},
};

/// Reads secrets from AWS Secrets Manager. The parameter identifier is used
/// as the secret id (name or ARN).
#[derive(Clone, Debug)]
pub struct AwsSecretsStore {
    client: Client,
}

impl AwsSecretsStore {
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::with_client(Client::new(&config))
    }

    pub async fn new(config: &StoreConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }

        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url.clone());
        }

        let shared_config = loader.load().await;
        Self::with_client(Client::new(&shared_config))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait::async_trait]
impl ParameterStore for AwsSecretsStore {
    async fn get_parameter(&self, name: &str) -> Result<String, StoreError> {
        debug!(secret = name, "Fetching secret from Secrets Manager");

        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| map_sdk_error(name, e))?;

        output
            .secret_string()
            .map(|s| s.to_string())
            .ok_or_else(|| StoreError::InvalidValue(format!("Secret '{name}' has no string value")))
    }
}

fn map_sdk_error<R>(name: &str, error: SdkError<GetSecretValueError, R>) -> StoreError
where
    R: std::fmt::Debug,
{
    let context = DisplayErrorContext(&error).to_string();
    match &error {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => StoreError::ConnectionFailed(
            format!("Failed to reach Secrets Manager for '{name}': {context}"),
        ),
        SdkError::ServiceError(service) => match service.err() {
            GetSecretValueError::ResourceNotFoundException(_) => {
                StoreError::NotFound(name.to_string())
            }
            err if err.code() == Some("AccessDeniedException") => {
                StoreError::AccessDenied(format!("Secret '{name}': {context}"))
            }
            _ => StoreError::QueryFailed(format!("Failed to get secret '{name}': {context}")),
        },
        _ => StoreError::QueryFailed(format!("Failed to get secret '{name}': {context}")),
    }
}
