use std::{fmt, sync::Arc};

pub mod adapters;
pub mod factory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(String),
    AccessDenied(String),
    ConnectionFailed(String),
    QueryFailed(String),
    InvalidValue(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Parameter not found: {}", msg),
            Self::AccessDenied(msg) => write!(f, "Access denied: {}", msg),
            Self::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            Self::QueryFailed(msg) => write!(f, "Query failed: {}", msg),
            Self::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Fetch-by-name access to a key-value parameter store.
///
/// Timeouts, retries and decryption are the implementation's business.
#[async_trait::async_trait]
pub trait ParameterStore: Send + Sync {
    async fn get_parameter(&self, name: &str) -> Result<String, StoreError>;
}

#[async_trait::async_trait]
impl<S: ParameterStore + ?Sized> ParameterStore for &S {
    async fn get_parameter(&self, name: &str) -> Result<String, StoreError> {
        (**self).get_parameter(name).await
    }
}

#[async_trait::async_trait]
impl<S: ParameterStore + ?Sized> ParameterStore for Arc<S> {
    async fn get_parameter(&self, name: &str) -> Result<String, StoreError> {
        (**self).get_parameter(name).await
    }
}

#[async_trait::async_trait]
impl<S: ParameterStore + ?Sized> ParameterStore for Box<S> {
    async fn get_parameter(&self, name: &str) -> Result<String, StoreError> {
        (**self).get_parameter(name).await
    }
}
