//! Environment variable loading utilities
//!
//! Blank values are treated as unset: a variable exported as `FOO=` should
//! not wipe out a configured value.

use crate::{Result, ToolingError};
use std::env;
use std::str::FromStr;

/// Load an environment variable as a string
///
/// # Returns
///
/// * `Ok(Some(value))` if the variable exists and is not blank
/// * `Ok(None)` if it is missing or blank
/// * `Err` if it exists but is not valid UTF-8
pub fn get_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ToolingError::InvalidEnv {
            key: key.to_string(),
            reason: "contains invalid UTF-8".to_string(),
        }),
    }
}

/// Load and parse an environment variable
///
/// ```rust,ignore
/// let length: Option<u32> = get_env_parse("SUMMAIRIZE_SUMMARY_LENGTH")?;
/// ```
pub fn get_env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env(key)? {
        Some(val) => {
            let parsed = val.trim().parse::<T>().map_err(|e| ToolingError::InvalidEnv {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_missing() {
        let result = get_env("SUMMAIRIZE_TEST_MISSING_VAR_12345").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_get_env_blank_is_unset() {
        env::set_var("SUMMAIRIZE_TEST_BLANK", "   ");
        assert!(get_env("SUMMAIRIZE_TEST_BLANK").unwrap().is_none());
        env::remove_var("SUMMAIRIZE_TEST_BLANK");
    }

    #[test]
    fn test_get_env_parse() {
        env::set_var("SUMMAIRIZE_TEST_LENGTH", " 250 ");
        let result: Option<u32> = get_env_parse("SUMMAIRIZE_TEST_LENGTH").unwrap();
        assert_eq!(result, Some(250));
        env::remove_var("SUMMAIRIZE_TEST_LENGTH");
    }

    #[test]
    fn test_get_env_parse_invalid() {
        env::set_var("SUMMAIRIZE_TEST_INVALID_LENGTH", "many");
        let result: Result<Option<u32>> = get_env_parse("SUMMAIRIZE_TEST_INVALID_LENGTH");
        match result {
            Err(ToolingError::InvalidEnv { key, .. }) => {
                assert_eq!(key, "SUMMAIRIZE_TEST_INVALID_LENGTH")
            }
            other => panic!("expected InvalidEnv, got {:?}", other),
        }
        env::remove_var("SUMMAIRIZE_TEST_INVALID_LENGTH");
    }
}
