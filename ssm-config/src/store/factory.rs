use std::sync::Arc;

use tracing::info;

use crate::{
    configs::{StoreBackend, StoreConfig},
    store::{
        ParameterStore, StoreError,
        adapters::{
            aws_parameter_store::AwsParameterStore, aws_secrets_store::AwsSecretsStore,
            environment_store::EnvironmentStore, file_store::FileStore,
        },
    },
};

pub struct StoreFactory {
    config: StoreConfig,
}

impl StoreFactory {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub async fn create(&self) -> Result<Arc<dyn ParameterStore>, StoreError> {
        info!("Using {} parameter store backend", self.config.backend);

        let store: Arc<dyn ParameterStore> = match self.config.backend {
            StoreBackend::ParameterStore => Arc::new(AwsParameterStore::new(&self.config).await),
            StoreBackend::SecretsManager => Arc::new(AwsSecretsStore::new(&self.config).await),
            StoreBackend::Environment => match &self.config.env_prefix {
                Some(prefix) => Arc::new(EnvironmentStore::with_prefix(prefix)),
                None => Arc::new(EnvironmentStore::new()),
            },
            StoreBackend::File => Arc::new(FileStore::load(&self.config.file_path)?),
        };

        Ok(store)
    }
}
