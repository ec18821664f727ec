//! Dtype inference for kernel expressions.
//!
//! # Module Organization
//!
//! - `engine/`: `TypeInferenceEngine` and per-node rules
//! - `fixpoint.rs`: multi-pass resolution of `Auto` temporaries
//! - `tests.rs`: engine test suite

mod engine;
mod fixpoint;

pub use engine::{combine, combine_pair, TypeInferenceEngine, SMALL_INTEGER_LIMIT};
pub use fixpoint::resolve_temporaries;

use crate::env::{KernelEnv, PendingAssignments};
use crate::error::InferResult;
use crate::ir::Expr;
use crate::types::DType;

/// Infer the storage type of `expr`.
///
/// `pending` holds declarations not yet committed to `env`; it is consulted
/// first. Safe to call again after a deferral.
pub fn infer_dtype<E: KernelEnv + ?Sized>(
    expr: &Expr,
    env: &E,
    pending: &PendingAssignments,
) -> InferResult<DType> {
    TypeInferenceEngine::new(env, pending).infer(expr)
}
