//! Type inference engine for kernel expressions.
//!
//! `TypeInferenceEngine` recurses bottom-up over an expression: every child
//! is fully inferred before its parent combines the results. The environment
//! and pending assignments are borrowed, never mutated, so an engine can be
//! rebuilt and rerun freely after a deferral.

mod arithmetic;
mod constant;
mod type_ops;

pub use arithmetic::SMALL_INTEGER_LIMIT;
pub use type_ops::{combine, combine_pair};

use crate::env::{KernelEnv, PendingAssignments};
use crate::error::{DeclarationKind, FailureKind, InferError, InferResult};
use crate::ir::Expr;
use crate::types::{DType, FieldAccessError};
use std::borrow::Cow;
use std::fmt;

pub struct TypeInferenceEngine<'a, E: KernelEnv + ?Sized> {
    env: &'a E,
    /// Declarations that shadow the environment's argument and temporary tables
    new_assignments: &'a PendingAssignments,
}

impl<'a, E: KernelEnv + ?Sized> TypeInferenceEngine<'a, E> {
    pub fn new(env: &'a E, new_assignments: &'a PendingAssignments) -> Self {
        Self {
            env,
            new_assignments,
        }
    }

    /// Infer the storage type of `expr`.
    ///
    /// Hard failures carry the innermost sub-expression they arose in.
    #[tracing::instrument(level = "trace", skip_all, fields(expr = %expr))]
    pub fn infer(&self, expr: &Expr) -> InferResult<DType> {
        self.infer_node(expr)
            .map_err(|err| err.located_at(|| expr.to_string()))
    }

    fn infer_node(&self, expr: &Expr) -> InferResult<DType> {
        match expr {
            Expr::Constant(literal) => constant::constant_dtype(literal),
            Expr::Variable(name) | Expr::TaggedVariable { name, .. } => self.infer_variable(name),
            // The index is constrained to an index type elsewhere
            Expr::Subscript { aggregate, .. } | Expr::LinearSubscript { aggregate, .. } => {
                self.infer(aggregate)
            }
            Expr::Lookup { aggregate, name } => self.infer_lookup(aggregate, name),
            Expr::Sum(children) | Expr::Product(children) => self.infer_sum_like(children),
            Expr::Quotient {
                numerator,
                denominator,
            } => self.infer_quotient(numerator, denominator),
            Expr::FloorDiv {
                numerator,
                denominator,
            }
            | Expr::Remainder {
                numerator,
                denominator,
            } => self.infer_binary(numerator, denominator),
            Expr::Power { base, exponent } => self.infer_binary(base, exponent),
            Expr::Call {
                function,
                parameters,
            } => self.infer_call(function, parameters),
            // No boolean type has a portable memory layout; truth values are int32
            Expr::Comparison { .. }
            | Expr::LogicalNot(_)
            | Expr::LogicalAnd(_)
            | Expr::LogicalOr(_) => Ok(DType::INT32),
            Expr::If {
                condition,
                then,
                else_,
            } => {
                self.infer(condition)?;
                self.infer_binary(then, else_)
            }
            Expr::Reduction {
                operation,
                expr,
                inames,
            } => {
                let arg_dtype = self.infer(expr)?;
                operation.result_dtype(self.env.target(), &arg_dtype, inames)
            }
        }
    }

    /// Resolve a name: loop index, special symbol, then declarations.
    fn infer_variable(&self, name: &str) -> InferResult<DType> {
        if self.env.is_index_name(name) {
            return Ok(self.env.index_dtype());
        }

        if let Some(symbol) = self.env.resolve_symbol(name) {
            return Ok(symbol.dtype);
        }

        let declared = self
            .new_assignments
            .get(name)
            .map(|decl| decl.declared_dtype())
            .or_else(|| {
                self.env
                    .argument(name)
                    .map(|arg| (DeclarationKind::Argument, arg.dtype.as_ref()))
            })
            .or_else(|| {
                self.env
                    .temporary(name)
                    .map(|tv| (DeclarationKind::Temporary, tv.dtype.known()))
            });

        match declared {
            Some((_, Some(dtype))) => Ok(dtype.clone()),
            Some((declaration, None)) => {
                tracing::debug!(name, %declaration, "dtype dependency unresolved");
                Err(InferError::deferred(name, declaration))
            }
            None => Err(InferError::failed(FailureKind::UnknownName {
                name: name.to_string(),
            })),
        }
    }

    fn infer_lookup(&self, aggregate: &Expr, field: &str) -> InferResult<DType> {
        let agg_dtype = self.infer(aggregate)?;
        match agg_dtype.field(field) {
            Ok((dtype, _offset)) => Ok(dtype.clone()),
            Err(FieldAccessError::NotARecord) => Err(InferError::failed(FailureKind::NotARecord {
                dtype: agg_dtype.clone(),
                field: field.to_string(),
            })),
            Err(FieldAccessError::Missing) => {
                Err(InferError::failed(FailureKind::FieldNotFound {
                    dtype: agg_dtype.clone(),
                    field: field.to_string(),
                }))
            }
        }
    }

    fn infer_call(&self, function: &Expr, parameters: &[Expr]) -> InferResult<DType> {
        let name: Cow<'_, str> = match function {
            Expr::Variable(name) | Expr::TaggedVariable { name, .. } => Cow::Borrowed(name),
            other => Cow::Owned(other.to_string()),
        };

        let arg_dtypes = parameters
            .iter()
            .map(|param| self.infer(param))
            .collect::<InferResult<Vec<_>>>()?;

        match self.env.resolve_function(&name, &arg_dtypes) {
            Some(signature) => Ok(signature.return_dtype),
            None => Err(InferError::failed(FailureKind::UnknownFunctionSignature {
                name: name.into_owned(),
                arg_dtypes,
            })),
        }
    }
}

impl<E: KernelEnv + ?Sized> fmt::Debug for TypeInferenceEngine<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInferenceEngine")
            .field("new_assignments", &self.new_assignments.keys())
            .finish_non_exhaustive()
    }
}
