use aws_config::BehaviorVersion;
use aws_sdk_ssm::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::get_parameter::GetParameterError,
};
use aws_types::region::Region;
use tracing::debug;

use crate::{
    configs::StoreConfig,
    store::{ParameterStore, StoreError},
};

/// Reads parameters from AWS Systems Manager Parameter Store.
#[derive(Clone, Debug)]
pub struct AwsParameterStore {
    client: Client,
    with_decryption: bool,
}

impl AwsParameterStore {
    /// Builds a client from the default AWS credential and region chain.
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
        Self::with_client(Client::new(&shared_config)).with_decryption(config.with_decryption)
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            with_decryption: true,
        }
    }

    /// SecureString parameters come back encrypted when this is off.
    pub fn with_decryption(mut self, with_decryption: bool) -> Self {
        self.with_decryption = with_decryption;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait::async_trait]
impl ParameterStore for AwsParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<String, StoreError> {
        debug!(parameter = name, "Fetching parameter from SSM");

        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(self.with_decryption)
            .send()
            .await
            .map_err(|e| map_sdk_error(name, e))?;

        output
            .parameter()
            .and_then(|p| p.value())
            .map(|v| v.to_string())
            .ok_or_else(|| StoreError::InvalidValue(format!("Parameter '{name}' has no value")))
    }
}

fn map_sdk_error<R>(name: &str, error: SdkError<GetParameterError, R>) -> StoreError
where
    R: std::fmt::Debug,
{
    let context = DisplayErrorContext(&error).to_string();
    match &error {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            StoreError::ConnectionFailed(format!("Failed to reach SSM for '{name}': {context}"))
        }
        SdkError::ServiceError(service) => match service.err() {
            GetParameterError::ParameterNotFound(_)
            | GetParameterError::ParameterVersionNotFound(_) => {
                StoreError::NotFound(name.to_string())
            }
            err if err.code() == Some("AccessDeniedException") => {
                StoreError::AccessDenied(format!("Parameter '{name}': {context}"))
            }
            _ => StoreError::QueryFailed(format!("Failed to get parameter '{name}': {context}")),
        },
        _ => StoreError::QueryFailed(format!("Failed to get parameter '{name}': {context}")),
    }
}
