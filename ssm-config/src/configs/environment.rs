use std::env;

use crate::coerce::parse_bool;

pub fn optional_env(env_name: &str) -> Option<String> {
    env::var(env_name).ok().filter(|value| !value.is_empty())
}

pub fn env_or(env_name: &str, default: &str) -> String {
    optional_env(env_name).unwrap_or_else(|| default.to_string())
}

/// Reads a flag using the same literals accepted for `bool` fields.
pub fn env_flag(env_name: &str, default: bool) -> Result<bool, String> {
    match optional_env(env_name) {
        Some(value) => parse_bool(&value)
            .map_err(|_| format!("Environment variable '{env_name}' is not a boolean: {value}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_optional_env_present() {
        unsafe {
            std::env::set_var("SSM_CONFIG_TEST_OPT", "value");
        }
        assert_eq!(optional_env("SSM_CONFIG_TEST_OPT"), Some("value".to_string()));

        unsafe {
            std::env::remove_var("SSM_CONFIG_TEST_OPT");
        }
    }

    #[test]
    #[serial]
    fn test_optional_env_empty_is_missing() {
        unsafe {
            std::env::set_var("SSM_CONFIG_TEST_EMPTY", "");
        }
        assert_eq!(optional_env("SSM_CONFIG_TEST_EMPTY"), None);

        unsafe {
            std::env::remove_var("SSM_CONFIG_TEST_EMPTY");
        }
    }

    #[test]
    #[serial]
    fn test_env_or_missing_uses_default() {
        unsafe {
            std::env::remove_var("SSM_CONFIG_TEST_MISSING");
        }
        assert_eq!(env_or("SSM_CONFIG_TEST_MISSING", "default"), "default");
    }

    #[test]
    #[serial]
    fn test_env_flag() {
        unsafe {
            std::env::set_var("SSM_CONFIG_TEST_FLAG", "F");
        }
        assert_eq!(env_flag("SSM_CONFIG_TEST_FLAG", true), Ok(false));

        unsafe {
            std::env::set_var("SSM_CONFIG_TEST_FLAG", "maybe");
        }
        assert!(env_flag("SSM_CONFIG_TEST_FLAG", true).is_err());

        unsafe {
            std::env::remove_var("SSM_CONFIG_TEST_FLAG");
        }
        assert_eq!(env_flag("SSM_CONFIG_TEST_FLAG", true), Ok(true));
    }
}
