//! Multi-pass resolution of temporaries declared with `Auto` dtype.
//!
//! Each pass infers every writer of a pending temporary, using the types
//! resolved so far as pending assignments. A temporary whose writers defer is
//! requeued. Writers reading the temporary itself (an accumulator such as
//! `acc = acc + a[i]`) are first skipped, then re-inferred with the type the
//! other writers give until it stops widening. A full pass without progress
//! fails with the names still pending.

use super::engine::{combine, TypeInferenceEngine};
use crate::env::{KernelEnv, PendingAssignments, TempDType, TemporaryDecl};
use crate::error::{FailureKind, InferError, InferResult};
use crate::ir::Expr;
use crate::types::{DType, NativeType};
use std::collections::{BTreeMap, VecDeque};

/// Resolve the types of `Auto` temporaries from the expressions written to
/// them.
///
/// `writes` pairs a temporary name with one right-hand side assigned to it;
/// a temporary may appear several times. Writes to names that are not `Auto`
/// temporaries in `env` are ignored. Returns the resolved types by name.
pub fn resolve_temporaries<E: KernelEnv + ?Sized>(
    env: &E,
    writes: &[(String, Expr)],
) -> InferResult<BTreeMap<String, DType>> {
    let mut writers: BTreeMap<&str, Vec<&Expr>> = BTreeMap::new();
    for (name, rhs) in writes {
        let is_auto = env
            .temporary(name)
            .is_some_and(|tv| tv.dtype == TempDType::Auto);
        if is_auto {
            writers.entry(name.as_str()).or_default().push(rhs);
        }
    }

    let mut queue: VecDeque<&str> = writers.keys().copied().collect();
    let mut resolved = PendingAssignments::new();
    let mut result = BTreeMap::new();
    let mut stalled = 0usize;

    while let Some(name) = queue.pop_front() {
        let outcome = infer_writers(env, &resolved, name, &writers[name]);
        match outcome {
            Ok(Some(dtype)) => {
                tracing::debug!(name, dtype = %dtype, "resolved temporary dtype");
                resolved.insert(
                    name.to_string(),
                    TemporaryDecl::new(name, dtype.clone()).into(),
                );
                result.insert(name.to_string(), dtype);
                stalled = 0;
            }
            Ok(None) => {
                queue.push_back(name);
                stalled += 1;
                if stalled >= queue.len() {
                    let mut names: Vec<String> = queue.iter().map(|n| n.to_string()).collect();
                    names.sort();
                    return Err(InferError::failed(FailureKind::UnresolvedTemporaries {
                        names,
                    }));
                }
            }
            Err(err) => return Err(err),
        }
    }

    Ok(result)
}

/// Combine the types of every writer of `name`, or `None` if it must wait.
fn infer_writers<E: KernelEnv + ?Sized>(
    env: &E,
    resolved: &PendingAssignments,
    name: &str,
    rhs_exprs: &[&Expr],
) -> InferResult<Option<DType>> {
    let engine = TypeInferenceEngine::new(env, resolved);
    let mut dtypes = Vec::with_capacity(rhs_exprs.len());
    let mut self_referencing = Vec::new();

    for rhs in rhs_exprs {
        match engine.infer(rhs) {
            Ok(dtype) => dtypes.push(dtype),
            Err(err) if err.deferred_name() == Some(name) => self_referencing.push(*rhs),
            Err(err) if err.is_deferred() => {
                tracing::debug!(name, blocked_on = err.deferred_name(), "deferring temporary");
                return Ok(None);
            }
            Err(err) => return Err(err),
        }
    }

    if dtypes.is_empty() {
        return Ok(None);
    }
    let mut dtype = combine(&dtypes)?;
    if self_referencing.is_empty() {
        return Ok(Some(dtype));
    }

    // Promotion only widens, so this settles within one step per native type
    let mut assumed = resolved.clone();
    for _ in 0..NativeType::ALL.len() {
        assumed.insert(
            name.to_string(),
            TemporaryDecl::new(name, dtype.clone()).into(),
        );
        let engine = TypeInferenceEngine::new(env, &assumed);
        let mut all = dtypes.clone();
        for rhs in &self_referencing {
            match engine.infer(rhs) {
                Ok(dtype) => all.push(dtype),
                Err(err) if err.is_deferred() => return Ok(None),
                Err(err) => return Err(err),
            }
        }

        let widened = combine(&all)?;
        if widened == dtype {
            break;
        }
        tracing::debug!(name, from = %dtype, to = %widened, "widening self-referencing temporary");
        dtype = widened;
    }
    Ok(Some(dtype))
}
