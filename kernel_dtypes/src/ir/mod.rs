//! Expression IR consumed by dtype inference.
//!
//! - `core.rs`: `Expr`, `Literal`, `Scalar`, `ComparisonOp`
//! - `display.rs`: source-like rendering used in error messages

mod core;
mod display;

pub use self::core::{ComparisonOp, Expr, Literal, Scalar};
