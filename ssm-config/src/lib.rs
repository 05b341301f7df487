//! Populate typed configuration structs from a remote parameter store.
//!
//! Fields are mapped to parameters with `#[ssm("/path/to/parameter")]` and the
//! struct derives [`SsmConfig`]. A [`Populator`] bound to a [`ParameterStore`]
//! then fetches each annotated parameter and coerces it into the field type.
//!
//! ```ignore
//! use ssm_config::{Populator, SsmConfig, store::adapters::aws_parameter_store::AwsParameterStore};
//!
//! #[derive(Debug, Default, SsmConfig)]
//! struct DatabaseConfig {
//!     #[ssm("/service/db/url")]
//!     url: String,
//!     #[ssm("/service/db/pool-size")]
//!     pool_size: u16,
//!     read_only: bool,
//! }
//!
//! let store = AwsParameterStore::from_env().await;
//! let config: DatabaseConfig = Populator::new(store).load().await?;
//! ```

pub mod coerce;
pub mod configs;
pub mod error;
pub mod fields;
pub mod populator;
pub mod store;

pub use error::ConfigError;
pub use fields::{AsFieldTarget, Field, FieldTarget, Layout, SsmConfig};
pub use populator::Populator;
pub use store::{ParameterStore, StoreError};

/// Derives [`SsmConfig`] for a struct whose fields carry `#[ssm("...")]`.
pub use ssm_config_derive::SsmConfig;
