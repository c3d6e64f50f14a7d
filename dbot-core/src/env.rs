//! Environment variable helpers used by the config loaders.
//!
//! Unset or blank variables fall back to defaults; set but unparsable values are
//! [`ConfigError::Invalid`] rather than being silently ignored.

use std::env;
use std::str::FromStr;

use crate::error::{ConfigError, Result};

/// Value of the first of `names` that is set and not blank.
pub fn var_any(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

/// Like [`var_any`] but fails with [`ConfigError::Missing`] naming the first variable.
pub fn require_any(names: &[&str]) -> Result<String> {
    var_any(names).ok_or_else(|| ConfigError::Missing(names.join(" or ")))
}

/// Parses `name` as `T`, or returns `default` when unset.
pub fn parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var_any(&[name]) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(name, &raw, e.to_string())),
    }
}

/// Parses a boolean flag. Accepts `true/false`, `1/0`, `yes/no`, `on/off`.
pub fn flag_or(name: &str, default: bool) -> Result<bool> {
    match var_any(&[name]) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::invalid(name, &raw, "expected a boolean")),
        },
    }
}
