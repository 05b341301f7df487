use std::{collections::HashMap, fs, path::Path};

use serde_json::value::RawValue;
use tracing::debug;

use crate::store::{ParameterStore, StoreError};

/// Parameters loaded once from a JSON object on disk, e.g.
/// `{ "/service/port": 8080, "/service/host": "localhost" }`.
///
/// Strings are used verbatim; numbers and booleans by their JSON text as
/// written in the file, so `1e3` stays `1e3` and integers wider than 64 bits
/// keep every digit.
#[derive(Clone, Debug)]
pub struct FileStore {
    parameters: HashMap<String, String>,
}

impl FileStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::ConnectionFailed(format!("Failed to read file '{}': {}", path.display(), e))
        })?;

        let store = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            count = store.parameters.len(),
            "Loaded parameters from file"
        );
        Ok(store)
    }

    pub fn from_json(content: &str) -> Result<Self, StoreError> {
        let document: HashMap<String, Box<RawValue>> = serde_json::from_str(content)
            .map_err(|e| StoreError::InvalidValue(format!("Parameters file is not a JSON object: {e}")))?;

        let parameters = document
            .into_iter()
            .map(|(name, raw)| {
                let value = scalar_text(&name, &raw)?;
                Ok((name, value))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self { parameters })
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

fn scalar_text(name: &str, raw: &RawValue) -> Result<String, StoreError> {
    let text = raw.get().trim();
    match text.as_bytes().first() {
        Some(b'"') => serde_json::from_str(text).map_err(|e| {
            StoreError::InvalidValue(format!("Parameter '{name}' is not a valid string: {e}"))
        }),
        Some(b'{' | b'[') | Some(b'n') | None => Err(StoreError::InvalidValue(format!(
            "Parameter '{name}' must be a string, number or boolean, got {text}"
        ))),
        Some(_) => Ok(text.to_string()),
    }
}

#[async_trait::async_trait]
impl ParameterStore for FileStore {
    async fn get_parameter(&self, name: &str) -> Result<String, StoreError> {
        self.parameters
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_file_success() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(
            &temp_file,
            r#"{"/test/string":"test","/test/valid-int":1,"/test/valid-bool":true}"#,
        )
        .unwrap();

        let store = FileStore::load(temp_file.path()).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get_parameter("/test/string").await.unwrap(), "test");
        assert_eq!(store.get_parameter("/test/valid-int").await.unwrap(), "1");
        assert_eq!(store.get_parameter("/test/valid-bool").await.unwrap(), "true");
        assert!(matches!(
            store.get_parameter("/test/missing").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_file_not_found() {
        let result = FileStore::load("/nonexistent/parameters.json");
        assert!(matches!(result, Err(StoreError::ConnectionFailed(msg)) if msg.contains("Failed to read file")));
    }

    #[tokio::test]
    async fn test_numbers_keep_their_file_text() {
        let store = FileStore::from_json(
            r#"{
                "/test/exponent": 1e3,
                "/test/wide": 340282366920938463463374607431768211455,
                "/test/negative": -0,
                "/test/escaped": "line\nbreak \u00e9"
            }"#,
        )
        .unwrap();

        assert_eq!(store.get_parameter("/test/exponent").await.unwrap(), "1e3");
        assert_eq!(
            store.get_parameter("/test/wide").await.unwrap(),
            "340282366920938463463374607431768211455"
        );
        assert_eq!(store.get_parameter("/test/negative").await.unwrap(), "-0");
        assert_eq!(store.get_parameter("/test/escaped").await.unwrap(), "line\nbreak \u{e9}");
    }

    #[test]
    fn test_nested_values_are_rejected() {
        assert!(matches!(
            FileStore::from_json(r#"{"/test/nothing":null}"#),
            Err(StoreError::InvalidValue(msg)) if msg.contains("/test/nothing")
        ));
        assert!(FileStore::from_json(r#"{"/test/object":{"a":1}}"#).is_err());
        assert!(FileStore::from_json(r#"{"/test/list":[1,2]}"#).is_err());
        assert!(FileStore::from_json(r#"["not","an","object"]"#).is_err());
        assert!(FileStore::from_json("{}").unwrap().is_empty());
    }
}
