//! Shared helpers for integration tests
// Each test target uses a different subset of these helpers.
#![allow(dead_code)]

use kernel_dtypes::*;

/// A small kernel environment: `out[i] = alpha * x[i] + y[i]` style arguments
/// plus a few auto temporaries.
pub fn saxpy_env() -> KernelTypeEnv {
    KernelTypeEnv::new()
        .with_index("i")
        .with_argument("n", Some(DType::INT32))
        .with_argument("alpha", Some(DType::FLOAT32))
        .with_argument("x", Some(DType::FLOAT32))
        .with_argument("y", Some(DType::FLOAT32))
        .with_argument("w", Some(DType::FLOAT64))
        .with_argument("counts", Some(DType::Native(NativeType::Int16)))
        .with_argument("flags", Some(DType::Native(NativeType::UInt8)))
        .with_temporary("t", TempDType::Auto)
        .with_temporary("acc", TempDType::Auto)
}

pub fn infer_in(env: &KernelTypeEnv, expr: &Expr) -> InferResult<DType> {
    infer_dtype(expr, env, &PendingAssignments::new())
}

/// `name[i]`
pub fn at_i(name: &str) -> Expr {
    Expr::subscript(Expr::var(name), Expr::var("i"))
}

/// The hard-failure message of an inference result.
pub fn failure_message(result: InferResult<DType>) -> String {
    match result {
        Err(err @ InferError::Failed(_)) => err.to_string(),
        other => panic!("expected hard failure, got {:?}", other),
    }
}
