//! Error types for dtype inference.
//!
//! Inference fails in one of two ways:
//!
//! - `InferError::Deferred`: a name the expression depends on has no type yet.
//!   This is a scheduling signal for a fixed-point driver, not a bug. It
//!   propagates unchanged through every enclosing node.
//! - `InferError::Failed`: a hard failure for this expression. It carries the
//!   rendered sub-expression where it arose.

use crate::types::DType;
use std::fmt;
use thiserror::Error;

/// Result type for inference operations
pub type InferResult<T> = Result<T, InferError>;

/// Inference error: either deferred or failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferError {
    #[error(transparent)]
    Deferred(#[from] DependencyDeferral),

    #[error(transparent)]
    Failed(#[from] TypeInferenceFailure),
}

impl InferError {
    pub fn deferred(name: impl Into<String>, declaration: DeclarationKind) -> Self {
        InferError::Deferred(DependencyDeferral {
            name: name.into(),
            declaration,
        })
    }

    pub fn failed(kind: FailureKind) -> Self {
        InferError::Failed(TypeInferenceFailure::new(kind))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, InferError::Deferred(_))
    }

    /// Name blocking inference, if this is a deferral.
    pub fn deferred_name(&self) -> Option<&str> {
        match self {
            InferError::Deferred(deferral) => Some(&deferral.name),
            InferError::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&TypeInferenceFailure> {
        match self {
            InferError::Failed(failure) => Some(failure),
            InferError::Deferred(_) => None,
        }
    }

    /// Attach the offending expression to a hard failure that has none yet.
    ///
    /// The innermost node wins; deferrals pass through untouched.
    pub(crate) fn located_at(self, render: impl FnOnce() -> String) -> Self {
        match self {
            InferError::Failed(mut failure) if failure.expr.is_none() => {
                failure.expr = Some(render());
                InferError::Failed(failure)
            }
            other => other,
        }
    }
}

/// What kind of declaration is blocking inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Argument,
    Temporary,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Argument => write!(f, "argument"),
            DeclarationKind::Temporary => write!(f, "temporary variable"),
        }
    }
}

/// Soft failure: the type of `name` is not known yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("type of {declaration} '{name}' is not yet determined")]
pub struct DependencyDeferral {
    pub name: String,
    pub declaration: DeclarationKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    TypeMismatch { left: DType, right: DType },
    ConstantTooLarge { value: String },
    UndeducibleConstant { literal: String },
    AmbiguousComplexSize { literal: String },
    UnknownFunctionSignature { name: String, arg_dtypes: Vec<DType> },
    UnknownName { name: String },
    NotARecord { dtype: DType, field: String },
    FieldNotFound { dtype: DType, field: String },
    EmptyOperands,
    UnresolvedTemporaries { names: Vec<String> },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeMismatch { left, right } => write!(
                f,
                "nothing known about result of operation on '{}' and '{}'",
                left, right
            ),
            Self::ConstantTooLarge { value } => {
                write!(f, "integer constant '{}' too large", value)
            }
            Self::UndeducibleConstant { literal } => {
                write!(f, "cannot deduce type of constant '{}'", literal)
            }
            Self::AmbiguousComplexSize { literal } => write!(
                f,
                "complex constant '{}' needs to be sized for type inference",
                literal
            ),
            Self::UnknownFunctionSignature { name, arg_dtypes } => {
                let args: Vec<_> = arg_dtypes.iter().map(|t| t.to_string()).collect();
                write!(
                    f,
                    "no type inference information on function '{}' for argument types ({})",
                    name,
                    args.join(", ")
                )
            }
            Self::UnknownName { name } => {
                write!(f, "name not known in type inference: {}", name)
            }
            Self::NotARecord { dtype, field } => write!(
                f,
                "cannot access field '{}' of non-record type '{}'",
                field, dtype
            ),
            Self::FieldNotFound { dtype, field } => {
                write!(f, "type '{}' has no field '{}'", dtype, field)
            }
            Self::EmptyOperands => write!(f, "no operand types to combine"),
            Self::UnresolvedTemporaries { names } => write!(
                f,
                "could not determine type of variable(s): {}",
                names.join(", ")
            ),
        }
    }
}

/// Hard failure with the sub-expression it arose in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInferenceFailure {
    pub kind: FailureKind,
    pub expr: Option<String>,
}

impl TypeInferenceFailure {
    pub fn new(kind: FailureKind) -> Self {
        Self { kind, expr: None }
    }
}

impl fmt::Display for TypeInferenceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type inference failed: {}", self.kind)?;
        if let Some(expr) = &self.expr {
            write!(f, " (in '{}')", expr)?;
        }
        Ok(())
    }
}

impl std::error::Error for TypeInferenceFailure {}
