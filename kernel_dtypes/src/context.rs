//! Numeric literal context of a resolved type.
//!
//! Code generation uses the context to pick literal spellings, e.g. a `f`
//! suffix for single-precision constants.

use crate::target::Target;
use crate::types::{DType, DTypeKind, NativeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeContext {
    Integer,
    DoublePrecision,
    SinglePrecision,
}

impl TypeContext {
    /// One-letter code: `i`, `d` or `f`.
    pub fn code(self) -> char {
        match self {
            TypeContext::Integer => 'i',
            TypeContext::DoublePrecision => 'd',
            TypeContext::SinglePrecision => 'f',
        }
    }
}

/// Classify `dtype`; `None` means no known context.
///
/// Vector types the target supports classify as their `x` component.
pub fn classify(target: &Target, dtype: &DType) -> Option<TypeContext> {
    match dtype {
        DType::Native(ty) if ty.kind() == DTypeKind::SignedInteger => {
            Some(TypeContext::Integer)
        }
        DType::Native(NativeType::Float64 | NativeType::Complex128) => {
            Some(TypeContext::DoublePrecision)
        }
        DType::Native(NativeType::Float32 | NativeType::Complex64) => {
            Some(TypeContext::SinglePrecision)
        }
        DType::Foreign(_) if target.is_vector_dtype(dtype) => dtype
            .field("x")
            .ok()
            .and_then(|(element, _)| classify(target, element)),
        _ => None,
    }
}
