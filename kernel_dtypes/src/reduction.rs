//! Reduction operations and their result types.
//!
//! A reduction node delegates its whole type derivation to its operation.
//! Element-wise reductions keep the operand type; `argmax`/`argmin` produce a
//! `{value, index}` record.

use crate::error::InferResult;
use crate::target::Target;
use crate::types::DType;
use std::fmt;
use std::str::FromStr;

/// Type of the index half of an arg-reduction result.
const ARG_INDEX_DTYPE: DType = DType::INT32;

/// An operation that folds an operand over one or more loop indices.
pub trait ReductionOperation: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Storage type of the reduction result.
    fn result_dtype(&self, target: &Target, arg_dtype: &DType, inames: &[String])
        -> InferResult<DType>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinReduction {
    Sum,
    Product,
    Max,
    Min,
    ArgMax,
    ArgMin,
}

impl BuiltinReduction {
    pub fn is_arg_reduction(self) -> bool {
        matches!(self, BuiltinReduction::ArgMax | BuiltinReduction::ArgMin)
    }

    fn as_str(self) -> &'static str {
        match self {
            BuiltinReduction::Sum => "sum",
            BuiltinReduction::Product => "product",
            BuiltinReduction::Max => "max",
            BuiltinReduction::Min => "min",
            BuiltinReduction::ArgMax => "argmax",
            BuiltinReduction::ArgMin => "argmin",
        }
    }
}

impl ReductionOperation for BuiltinReduction {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn result_dtype(
        &self,
        _target: &Target,
        arg_dtype: &DType,
        _inames: &[String],
    ) -> InferResult<DType> {
        if !self.is_arg_reduction() {
            return Ok(arg_dtype.clone());
        }
        Ok(DType::record(
            format!("{}_{}_pair", arg_dtype, ARG_INDEX_DTYPE),
            [("value", arg_dtype.clone()), ("index", ARG_INDEX_DTYPE)],
        ))
    }
}

impl fmt::Display for BuiltinReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuiltinReduction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(BuiltinReduction::Sum),
            "product" => Ok(BuiltinReduction::Product),
            "max" => Ok(BuiltinReduction::Max),
            "min" => Ok(BuiltinReduction::Min),
            "argmax" => Ok(BuiltinReduction::ArgMax),
            "argmin" => Ok(BuiltinReduction::ArgMin),
            other => Err(format!("unknown reduction operation '{}'", other)),
        }
    }
}
