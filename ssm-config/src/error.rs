use thiserror::Error;

use crate::{coerce::ParseError, store::StoreError};

/// Why a populate call stopped. Fields processed before the failing one keep
/// their new values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("expected a struct, got {kind} `{type_name}`")]
    InvalidTarget {
        kind: &'static str,
        type_name: &'static str,
    },

    #[error("error getting parameter '{parameter}': {source}")]
    Fetch {
        parameter: String,
        #[source]
        source: StoreError,
    },

    #[error("error parsing parameter '{parameter}' into field '{field}' as {kind}: {source}")]
    Coercion {
        field: &'static str,
        parameter: String,
        kind: &'static str,
        #[source]
        source: ParseError,
    },

    #[error("unsupported type {kind} for field '{field}' (parameter '{parameter}')")]
    UnsupportedType {
        field: &'static str,
        parameter: String,
        kind: &'static str,
    },
}

impl ConfigError {
    /// The parameter identifier involved, if the error concerns a field.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::InvalidTarget { .. } => None,
            Self::Fetch { parameter, .. }
            | Self::Coercion { parameter, .. }
            | Self::UnsupportedType { parameter, .. } => Some(parameter.as_str()),
        }
    }
}
