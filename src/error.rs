use thiserror::Error;

/// Problems found while loading a backdrop configuration.
///
/// Nothing at render time produces an error; every runtime failure
/// degrades to drawing less.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse backdrop config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid color {0:?}, expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("invalid range for {field}: [{min}, {max})")]
    InvalidRange { field: &'static str, min: f64, max: f64 },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}
