use crate::error::{FailureKind, InferError, InferResult};
use crate::ir::Literal;
use crate::types::DType;
use num_traits::ToPrimitive;

/// Storage type of a literal.
///
/// Integral values are sized by magnitude, ignoring any declared type:
/// `int32` if it fits, else `int64`.
pub(super) fn constant_dtype(literal: &Literal) -> InferResult<DType> {
    if let Some(value) = literal.integer_value() {
        if value.to_i32().is_some() {
            return Ok(DType::INT32);
        }
        if value.to_i64().is_some() {
            return Ok(DType::INT64);
        }
        return Err(InferError::failed(FailureKind::ConstantTooLarge {
            value: value.to_string(),
        }));
    }

    match literal {
        Literal::Sized { dtype, .. } => Ok(dtype.clone()),
        Literal::Scalar(scalar) => Ok(DType::Native(scalar.native_type())),
        // Guess the smaller type
        Literal::Float(_) => Ok(DType::FLOAT32),
        Literal::Complex { re, im } => {
            if narrows_exactly(*re) && narrows_exactly(*im) {
                // Nothing is lost by guessing single precision; covers `1j`
                Ok(DType::COMPLEX64)
            } else {
                // Complex code generation needs exact types, refuse to guess
                Err(InferError::failed(FailureKind::AmbiguousComplexSize {
                    literal: literal.to_string(),
                }))
            }
        }
        _ => Err(InferError::failed(FailureKind::UndeducibleConstant {
            literal: literal.to_string(),
        })),
    }
}

/// Whether `value` survives a round trip through `f32`.
fn narrows_exactly(value: f64) -> bool {
    f64::from(value as f32) == value
}
