//! Code generation target facts consulted during inference.

use crate::types::{DType, DTypeKind};
use serde::{Deserialize, Serialize};

/// The platform a kernel is lowered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    pub name: String,
    /// Whether the target has native vector types (`float4` and friends)
    pub vector_types: bool,
}

impl Target {
    pub fn new(name: impl Into<String>, vector_types: bool) -> Self {
        Self {
            name: name.into(),
            vector_types,
        }
    }

    /// Plain C, no vector types.
    pub fn c() -> Self {
        Self::new("c", false)
    }

    /// OpenCL C, with vector types.
    pub fn opencl() -> Self {
        Self::new("opencl", true)
    }

    pub fn is_vector_dtype(&self, dtype: &DType) -> bool {
        self.vector_types && dtype.kind() == DTypeKind::Vector
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::c()
    }
}
