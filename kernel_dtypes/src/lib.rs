//! Storage type ("dtype") inference for array/kernel compiler expressions.
//!
//! Given an expression tree of arithmetic, indexing, calls, comparisons and
//! reductions, derive the numeric type each sub-expression occupies once
//! lowered to code.
//!
//! ```
//! use kernel_dtypes::{infer_dtype, DType, Expr, KernelTypeEnv, PendingAssignments};
//!
//! let env = KernelTypeEnv::new().with_argument("x", Some(DType::FLOAT64));
//! let expr = Expr::sum([Expr::var("x"), Expr::int(3)]);
//! let dtype = infer_dtype(&expr, &env, &PendingAssignments::new()).unwrap();
//! assert_eq!(dtype, DType::FLOAT64);
//! ```

// Library code logs through `tracing`, never straight to the terminal.
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]

pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod inference;
pub mod ir;
pub mod reduction;
pub mod target;
pub mod types;

pub use config::{ConfigError, InferenceConfig};
pub use context::{classify, TypeContext};
pub use env::{
    ArgumentDecl, Declaration, FunctionSignature, KernelEnv, KernelTypeEnv, PendingAssignments,
    SymbolSignature, TempDType, TemporaryDecl,
};
pub use error::{
    DeclarationKind, DependencyDeferral, FailureKind, InferError, InferResult,
    TypeInferenceFailure,
};
pub use inference::{combine, infer_dtype, resolve_temporaries, TypeInferenceEngine};
pub use ir::{ComparisonOp, Expr, Literal, Scalar};
pub use reduction::{BuiltinReduction, ReductionOperation};
pub use target::Target;
pub use types::{DType, DTypeKind, Field, ForeignType, NativeType};
