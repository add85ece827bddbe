//! Lenient typed extraction from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or holds the wrong type, the default is returned. Settings
//! patches use these with the current value as the default, so unknown or
//! malformed keys leave a setting untouched.

use serde_json::Value;

/// `params[name]` as `f64` (integers widen), else `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as `u64`, else `default`. Negative and fractional values fall back.
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

/// `params[name]` as `usize`, else `default`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// `params[name]` as `bool`, else `default`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// `params[name]` as `&str`, else `None`.
///
/// Enum-valued settings parse the string themselves so that an unknown
/// name is an error rather than a silent fallback.
pub fn param_str<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(Value::as_str)
}
