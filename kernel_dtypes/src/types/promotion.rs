//! Usual arithmetic conversions between native types.
//!
//! The table is the classic array-library one: the wider type wins, an
//! integer only joins a float that has enough mantissa to hold it exactly,
//! mixed signedness widens to the next signed type (`uint64` has none and
//! goes to `float64`), and complex absorbs real by promoting its parts.
//!
//! The `int32`/`float32` override lives in the combiner, not here.

use super::{DTypeKind, NativeType};

/// Promote two native types under the usual arithmetic conversions.
///
/// Symmetric in its arguments.
pub fn promote_native(a: NativeType, b: NativeType) -> NativeType {
    if a == b {
        return a;
    }

    match (a.kind(), b.kind()) {
        (DTypeKind::Complex, _) | (_, DTypeKind::Complex) => {
            complex_with_part(promote_native(a.real_part(), b.real_part()))
        }
        (DTypeKind::Float, DTypeKind::Float) => wider(a, b),
        (DTypeKind::Float, _) => integer_with_float(b, a),
        (_, DTypeKind::Float) => integer_with_float(a, b),
        (DTypeKind::SignedInteger, DTypeKind::SignedInteger)
        | (DTypeKind::UnsignedInteger, DTypeKind::UnsignedInteger) => wider(a, b),
        (DTypeKind::SignedInteger, _) => mixed_sign(a, b),
        _ => mixed_sign(b, a),
    }
}

fn wider(a: NativeType, b: NativeType) -> NativeType {
    if a.bits() >= b.bits() {
        a
    } else {
        b
    }
}

fn mixed_sign(signed: NativeType, unsigned: NativeType) -> NativeType {
    if signed.bits() > unsigned.bits() {
        signed
    } else {
        NativeType::signed_of_bits(unsigned.bits() * 2).unwrap_or(NativeType::Float64)
    }
}

/// An integer of `n` bits fits exactly in a float of `2n` bits or more.
fn integer_with_float(integer: NativeType, float: NativeType) -> NativeType {
    let bits = float.bits().max(integer.bits() * 2).min(64);
    NativeType::float_of_bits(bits).unwrap_or(NativeType::Float64)
}

fn complex_with_part(part: NativeType) -> NativeType {
    match part {
        NativeType::Float64 => NativeType::Complex128,
        _ => NativeType::Complex64,
    }
}
