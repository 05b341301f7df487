use tracing::{debug, info, trace, warn};

use crate::{
    error::ConfigError,
    fields::{Layout, SsmConfig},
    store::ParameterStore,
};

/// Fills `#[ssm("...")]` fields from a parameter store.
///
/// Fields are fetched one at a time, in declaration order. The first failure
/// ends the call: fields before it keep their fetched values, the failing
/// field and everything after it are left as they were.
pub struct Populator<S> {
    store: S,
}

impl<S: ParameterStore> Populator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn populate<T>(&self, target: &mut T) -> Result<(), ConfigError>
    where
        T: SsmConfig + ?Sized,
    {
        let fields = match target.layout() {
            Layout::Struct(fields) => fields,
            Layout::Other { kind, type_name } => {
                warn!(kind, type_name, "Populate called on a value that is not a struct");
                return Err(ConfigError::InvalidTarget { kind, type_name });
            }
        };

        let mut populated = 0usize;
        for field in fields {
            let name = field.name();
            let parameter = field.parameter();
            if parameter.is_empty() {
                trace!(field = name, "Skipping field without a parameter name");
                continue;
            }

            debug!(field = name, parameter, "Fetching parameter");
            let value = self.store.get_parameter(parameter).await.map_err(|source| {
                warn!(field = name, parameter, error = %source, "Failed to fetch parameter");
                ConfigError::Fetch {
                    parameter: parameter.to_string(),
                    source,
                }
            })?;

            let target = field.into_target();
            let kind = target.kind();
            if !target.is_supported() {
                warn!(field = name, parameter, kind, "Unsupported field type");
                return Err(ConfigError::UnsupportedType {
                    field: name,
                    parameter: parameter.to_string(),
                    kind,
                });
            }

            target.assign(&value).map_err(|source| {
                warn!(field = name, parameter, kind, error = %source, "Failed to parse parameter");
                ConfigError::Coercion {
                    field: name,
                    parameter: parameter.to_string(),
                    kind,
                    source,
                }
            })?;
            populated += 1;
        }

        info!(populated, "Populated configuration from parameter store");
        Ok(())
    }

    /// Populates a fresh `T::default()`.
    pub async fn load<T>(&self) -> Result<T, ConfigError>
    where
        T: SsmConfig + Default,
    {
        let mut target = T::default();
        self.populate(&mut target).await?;
        Ok(target)
    }
}
