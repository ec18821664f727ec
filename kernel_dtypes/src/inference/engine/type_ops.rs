use crate::error::{FailureKind, InferError, InferResult};
use crate::types::{promote_native, DType, DTypeKind, NativeType};
use std::sync::Arc;

/// Combine operand types into the type of their arithmetic result.
///
/// The result does not depend on operand order. Any foreign operand wins over
/// the natives, and every foreign operand must be the same type. Natives are
/// promoted as one set (see `promote_operands`). Fails on empty input.
pub fn combine(dtypes: &[DType]) -> InferResult<DType> {
    let mut foreign: Option<&DType> = None;
    let mut natives = Vec::with_capacity(dtypes.len());

    for dtype in dtypes {
        match dtype {
            DType::Native(ty) => natives.push(*ty),
            DType::Foreign(_) => match foreign {
                Some(seen) => {
                    combine_pair(seen, dtype)?;
                }
                None => foreign = Some(dtype),
            },
        }
    }

    if let Some(dtype) = foreign {
        return Ok(dtype.clone());
    }
    promote_operands(&natives)
        .map(DType::Native)
        .ok_or_else(|| InferError::failed(FailureKind::EmptyOperands))
}

/// Combine two operand types.
pub fn combine_pair(result: &DType, other: &DType) -> InferResult<DType> {
    match (result, other) {
        (DType::Native(a), DType::Native(b)) => promote_operands(&[*a, *b])
            .map(DType::Native)
            .ok_or_else(|| InferError::failed(FailureKind::EmptyOperands)),
        // A foreign type is assumed to define its own arithmetic closure
        (DType::Native(_), DType::Foreign(_)) => Ok(other.clone()),
        (DType::Foreign(_), DType::Native(_)) => Ok(result.clone()),
        (DType::Foreign(a), DType::Foreign(b)) => {
            if Arc::ptr_eq(a, b) || a == b {
                Ok(result.clone())
            } else {
                Err(InferError::failed(FailureKind::TypeMismatch {
                    left: result.clone(),
                    right: other.clone(),
                }))
            }
        }
    }
}

/// Usual conversions over a whole operand set; `None` for an empty set.
///
/// Integers alone promote through their widest signed and widest unsigned
/// member. With any float or complex operand each integer asks for a float
/// twice its width, except `int32` next to a `float32`, which stays single
/// precision.
fn promote_operands(types: &[NativeType]) -> Option<NativeType> {
    let (integers, reals): (Vec<NativeType>, Vec<NativeType>) =
        types.iter().partition(|ty| ty.is_integer());

    if reals.is_empty() {
        return promote_integers(&integers);
    }

    let single_precision = types.contains(&NativeType::Float32);
    let bits = reals
        .iter()
        .map(|ty| ty.real_part().bits())
        .chain(integers.iter().map(|ty| match ty {
            NativeType::Int32 if single_precision => 32,
            other => other.bits() * 2,
        }))
        .max()?
        .min(64);
    let float = NativeType::float_of_bits(bits).unwrap_or(NativeType::Float64);

    if reals.iter().any(|ty| ty.kind() == DTypeKind::Complex) {
        Some(match float {
            NativeType::Float64 => NativeType::Complex128,
            _ => NativeType::Complex64,
        })
    } else {
        Some(float)
    }
}

fn promote_integers(integers: &[NativeType]) -> Option<NativeType> {
    let widest = |kind: DTypeKind| {
        integers
            .iter()
            .copied()
            .filter(|ty| ty.kind() == kind)
            .max_by_key(|ty| ty.bits())
    };
    match (
        widest(DTypeKind::SignedInteger),
        widest(DTypeKind::UnsignedInteger),
    ) {
        (Some(signed), Some(unsigned)) => Some(promote_native(signed, unsigned)),
        (Some(ty), None) | (None, Some(ty)) => Some(ty),
        (None, None) => None,
    }
}
