//! Kernel environment consulted by inference.
//!
//! # Module Organization
//!
//! - `mod.rs`: `KernelEnv` trait and declaration types
//! - `kernel.rs`: `KernelTypeEnv`, an in-memory environment
//! - `mangle.rs`: default C-style function and symbol resolution

mod kernel;
mod mangle;

pub use kernel::KernelTypeEnv;
pub use mangle::{default_function_signature, default_symbol_signature};

use crate::error::DeclarationKind;
use crate::target::Target;
use crate::types::DType;
use std::collections::HashMap;

/// Names to declarations not yet committed to the environment.
///
/// Consulted before the environment's own argument and temporary tables.
pub type PendingAssignments = HashMap<String, Declaration>;

/// A kernel argument; `dtype` is `None` until it is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDecl {
    pub name: String,
    pub dtype: Option<DType>,
}

impl ArgumentDecl {
    pub fn new(name: impl Into<String>, dtype: Option<DType>) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// Declared type of a temporary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TempDType {
    /// To be determined by inference
    Auto,
    Known(DType),
}

impl TempDType {
    pub fn known(&self) -> Option<&DType> {
        match self {
            TempDType::Known(dtype) => Some(dtype),
            TempDType::Auto => None,
        }
    }
}

impl From<DType> for TempDType {
    fn from(dtype: DType) -> Self {
        TempDType::Known(dtype)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaryDecl {
    pub name: String,
    pub dtype: TempDType,
}

impl TemporaryDecl {
    pub fn new(name: impl Into<String>, dtype: impl Into<TempDType>) -> Self {
        Self {
            name: name.into(),
            dtype: dtype.into(),
        }
    }

    pub fn auto(name: impl Into<String>) -> Self {
        Self::new(name, TempDType::Auto)
    }
}

/// A declaration supplied through `PendingAssignments`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Argument(ArgumentDecl),
    Temporary(TemporaryDecl),
}

impl Declaration {
    /// The declaration kind and its type, if determined.
    pub fn declared_dtype(&self) -> (DeclarationKind, Option<&DType>) {
        match self {
            Declaration::Argument(arg) => (DeclarationKind::Argument, arg.dtype.as_ref()),
            Declaration::Temporary(tv) => (DeclarationKind::Temporary, tv.dtype.known()),
        }
    }
}

impl From<ArgumentDecl> for Declaration {
    fn from(arg: ArgumentDecl) -> Self {
        Declaration::Argument(arg)
    }
}

impl From<TemporaryDecl> for Declaration {
    fn from(tv: TemporaryDecl) -> Self {
        Declaration::Temporary(tv)
    }
}

/// A resolved special symbol (`M_PI`, `INFINITY`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSignature {
    pub dtype: DType,
    /// Spelling in generated code
    pub target_name: String,
}

/// A resolved function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    /// Name of the routine in generated code, e.g. `sqrtf`
    pub target_name: String,
    pub arg_dtypes: Vec<DType>,
    pub return_dtype: DType,
}

/// Everything inference needs to know about the enclosing kernel.
pub trait KernelEnv {
    /// Whether `name` is a loop index.
    fn is_index_name(&self, name: &str) -> bool;

    /// The uniform type of loop indices.
    fn index_dtype(&self) -> DType;

    fn target(&self) -> &Target;

    fn resolve_symbol(&self, name: &str) -> Option<SymbolSignature>;

    /// Resolve a call by name and ordered argument types.
    fn resolve_function(&self, name: &str, arg_dtypes: &[DType]) -> Option<FunctionSignature>;

    fn argument(&self, name: &str) -> Option<&ArgumentDecl>;

    fn temporary(&self, name: &str) -> Option<&TemporaryDecl>;
}
