//! In-memory kernel environment.

use super::mangle::{default_function_signature, default_symbol_signature};
use super::{
    ArgumentDecl, FunctionSignature, KernelEnv, SymbolSignature, TempDType, TemporaryDecl,
};
use crate::config::InferenceConfig;
use crate::target::Target;
use crate::types::DType;
use std::collections::{HashMap, HashSet};

/// A kernel's declarations plus registered symbols and functions.
///
/// Registered functions are matched on exact argument types and take
/// precedence over the default math library.
#[derive(Debug, Clone)]
pub struct KernelTypeEnv {
    index_names: HashSet<String>,
    index_dtype: DType,
    target: Target,
    arguments: HashMap<String, ArgumentDecl>,
    temporaries: HashMap<String, TemporaryDecl>,
    symbols: HashMap<String, SymbolSignature>,
    functions: HashMap<String, Vec<FunctionSignature>>,
    default_library: bool,
}

impl KernelTypeEnv {
    /// Create an environment for a C target with `int32` indices.
    pub fn new() -> Self {
        Self::from_config(&InferenceConfig::default())
    }

    pub fn from_config(config: &InferenceConfig) -> Self {
        Self {
            index_names: HashSet::new(),
            index_dtype: DType::Native(config.index_dtype),
            target: config.target.clone(),
            arguments: HashMap::new(),
            temporaries: HashMap::new(),
            symbols: HashMap::new(),
            functions: HashMap::new(),
            default_library: config.default_library,
        }
    }

    pub fn with_index(mut self, name: impl Into<String>) -> Self {
        self.index_names.insert(name.into());
        self
    }

    pub fn with_argument(mut self, name: impl Into<String>, dtype: Option<DType>) -> Self {
        self.add_argument(ArgumentDecl::new(name, dtype));
        self
    }

    pub fn with_temporary(mut self, name: impl Into<String>, dtype: impl Into<TempDType>) -> Self {
        self.add_temporary(TemporaryDecl::new(name, dtype));
        self
    }

    pub fn with_symbol(mut self, name: impl Into<String>, dtype: DType) -> Self {
        let name = name.into();
        self.symbols.insert(
            name.clone(),
            SymbolSignature {
                dtype,
                target_name: name,
            },
        );
        self
    }

    /// Register a function for one exact argument type list.
    pub fn with_function(
        mut self,
        name: impl Into<String>,
        arg_dtypes: Vec<DType>,
        return_dtype: DType,
        target_name: impl Into<String>,
    ) -> Self {
        self.register_function(
            name,
            FunctionSignature {
                target_name: target_name.into(),
                arg_dtypes,
                return_dtype,
            },
        );
        self
    }

    pub fn add_argument(&mut self, arg: ArgumentDecl) {
        self.arguments.insert(arg.name.clone(), arg);
    }

    pub fn add_temporary(&mut self, tv: TemporaryDecl) {
        self.temporaries.insert(tv.name.clone(), tv);
    }

    pub fn register_function(&mut self, name: impl Into<String>, signature: FunctionSignature) {
        self.functions.entry(name.into()).or_default().push(signature);
    }

    /// Commit an inferred type for a temporary.
    pub fn set_temporary_dtype(&mut self, name: &str, dtype: DType) {
        if let Some(tv) = self.temporaries.get_mut(name) {
            tv.dtype = TempDType::Known(dtype);
        }
    }

    /// Names of temporaries whose type is still `Auto`, sorted.
    pub fn auto_temporaries(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .temporaries
            .values()
            .filter(|tv| tv.dtype == TempDType::Auto)
            .map(|tv| tv.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

impl Default for KernelTypeEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl KernelEnv for KernelTypeEnv {
    fn is_index_name(&self, name: &str) -> bool {
        self.index_names.contains(name)
    }

    fn index_dtype(&self) -> DType {
        self.index_dtype.clone()
    }

    fn target(&self) -> &Target {
        &self.target
    }

    fn resolve_symbol(&self, name: &str) -> Option<SymbolSignature> {
        if let Some(symbol) = self.symbols.get(name) {
            return Some(symbol.clone());
        }
        if self.default_library {
            default_symbol_signature(name)
        } else {
            None
        }
    }

    fn resolve_function(&self, name: &str, arg_dtypes: &[DType]) -> Option<FunctionSignature> {
        let registered = self
            .functions
            .get(name)
            .and_then(|sigs| sigs.iter().find(|sig| sig.arg_dtypes == arg_dtypes));
        if let Some(sig) = registered {
            return Some(sig.clone());
        }
        if self.default_library {
            default_function_signature(name, arg_dtypes)
        } else {
            None
        }
    }

    fn argument(&self, name: &str) -> Option<&ArgumentDecl> {
        self.arguments.get(name)
    }

    fn temporary(&self, name: &str) -> Option<&TemporaryDecl> {
        self.temporaries.get(name)
    }
}
