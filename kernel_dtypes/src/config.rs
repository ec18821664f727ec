//! Inference configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! index_dtype = "int64"
//! default_library = true
//!
//! [target]
//! name = "opencl"
//! vector_types = true
//! ```
//!
//! Every key is optional. `KERNEL_DTYPES_INDEX_DTYPE` and
//! `KERNEL_DTYPES_TARGET` override the defaults in `from_env`.

use crate::target::Target;
use crate::types::{NativeType, UnknownDTypeName};
use serde::Deserialize;
use std::env;
use thiserror::Error;

const INDEX_DTYPE_VAR: &str = "KERNEL_DTYPES_INDEX_DTYPE";
const TARGET_VAR: &str = "KERNEL_DTYPES_TARGET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid inference config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid {var}: {source}")]
    Env {
        var: &'static str,
        #[source]
        source: UnknownDTypeName,
    },

    #[error("invalid {var}: unknown target '{value}'")]
    UnknownTarget { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InferenceConfig {
    pub target: Target,
    /// Type of loop index variables
    pub index_dtype: NativeType,
    /// Resolve standard math functions and constants without registration
    pub default_library: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            target: Target::default(),
            index_dtype: NativeType::Int32,
            default_library: true,
        }
    }
}

impl InferenceConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Defaults, overridden by environment variables when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(value) = env::var(INDEX_DTYPE_VAR) {
            config.index_dtype = value.parse().map_err(|source| ConfigError::Env {
                var: INDEX_DTYPE_VAR,
                source,
            })?;
        }
        if let Ok(value) = env::var(TARGET_VAR) {
            config.target = match value.trim() {
                "c" => Target::c(),
                "opencl" => Target::opencl(),
                _ => {
                    return Err(ConfigError::UnknownTarget {
                        var: TARGET_VAR,
                        value,
                    })
                }
            };
        }
        Ok(config)
    }
}
