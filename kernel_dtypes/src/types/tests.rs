use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_native_kinds() {
    assert_eq!(NativeType::Int32.kind(), DTypeKind::SignedInteger);
    assert_eq!(NativeType::UInt64.kind(), DTypeKind::UnsignedInteger);
    assert_eq!(NativeType::Float16.kind(), DTypeKind::Float);
    assert_eq!(NativeType::Complex64.kind(), DTypeKind::Complex);
    assert_eq!(NativeType::Complex64.real_part(), NativeType::Float32);
    assert_eq!(NativeType::Complex128.itemsize(), 16);
}

#[test]
fn test_native_names_round_trip_through_from_str() {
    for ty in NativeType::ALL {
        assert_eq!(ty.name().parse::<NativeType>(), Ok(ty));
    }
    assert_eq!("double".parse::<DType>(), Ok(DType::FLOAT64));
    assert_eq!(
        "quad".parse::<NativeType>(),
        Err(UnknownDTypeName("quad".to_string()))
    );
}

#[test]
fn test_holds_integer() {
    assert!(NativeType::Int8.holds_integer(-128));
    assert!(!NativeType::Int8.holds_integer(128));
    assert!(!NativeType::UInt32.holds_integer(-1));
    assert!(NativeType::Float16.holds_integer(1023));
    assert!(NativeType::Float16.holds_integer(2048));
    assert!(!NativeType::Float16.holds_integer(70_000));
    assert!(NativeType::Complex64.holds_integer(-1023));
}

#[test]
fn test_promote_same_kind_wider_wins() {
    assert_eq!(
        promote_native(NativeType::Int8, NativeType::Int64),
        NativeType::Int64
    );
    assert_eq!(
        promote_native(NativeType::UInt16, NativeType::UInt8),
        NativeType::UInt16
    );
    assert_eq!(
        promote_native(NativeType::Float32, NativeType::Float64),
        NativeType::Float64
    );
}

#[test]
fn test_promote_mixed_sign() {
    assert_eq!(
        promote_native(NativeType::Int8, NativeType::UInt8),
        NativeType::Int16
    );
    assert_eq!(
        promote_native(NativeType::Int64, NativeType::UInt32),
        NativeType::Int64
    );
    // No signed type can hold every uint64
    assert_eq!(
        promote_native(NativeType::UInt64, NativeType::Int8),
        NativeType::Float64
    );
}

#[test]
fn test_promote_integer_with_float() {
    assert_eq!(
        promote_native(NativeType::Int16, NativeType::Float32),
        NativeType::Float32
    );
    assert_eq!(
        promote_native(NativeType::UInt8, NativeType::Float16),
        NativeType::Float16
    );
    assert_eq!(
        promote_native(NativeType::Int32, NativeType::Float16),
        NativeType::Float64
    );
    // The usual table widens int32 + float32; the combiner overrides this
    assert_eq!(
        promote_native(NativeType::Int32, NativeType::Float32),
        NativeType::Float64
    );
}

#[test]
fn test_promote_complex() {
    assert_eq!(
        promote_native(NativeType::Complex64, NativeType::Float64),
        NativeType::Complex128
    );
    assert_eq!(
        promote_native(NativeType::Int8, NativeType::Complex64),
        NativeType::Complex64
    );
    assert_eq!(
        promote_native(NativeType::Int32, NativeType::Complex64),
        NativeType::Complex128
    );
}

#[test]
fn test_promote_is_commutative() {
    for a in NativeType::ALL {
        for b in NativeType::ALL {
            assert_eq!(promote_native(a, b), promote_native(b, a), "{a} vs {b}");
        }
    }
}

#[test]
fn test_record_layout() {
    let rec = DType::record(
        "pair",
        [
            ("flag", DType::Native(NativeType::Int8)),
            ("value", DType::FLOAT64),
        ],
    );
    assert_eq!(rec.kind(), DTypeKind::Record);
    assert_eq!(rec.field("flag"), Ok((&DType::Native(NativeType::Int8), 0)));
    assert_eq!(rec.field("value"), Ok((&DType::FLOAT64, 8)));
    assert_eq!(rec.itemsize(), 16);
    assert_eq!(rec.alignment(), 8);
    assert!(!rec.is_native());
}

#[test]
fn test_vector_layout() {
    let v = DType::vector(NativeType::Float32, 3);
    assert_eq!(v.name(), "float3");
    assert_eq!(v.kind(), DTypeKind::Vector);
    assert_eq!(v.itemsize(), 16);
    assert_eq!(v.field("x"), Ok((&DType::FLOAT32, 0)));
    assert_eq!(v.field("z"), Ok((&DType::FLOAT32, 8)));
    assert_eq!(v.field("s2"), Ok((&DType::FLOAT32, 8)));
    assert_eq!(v.field("w"), Err(FieldAccessError::Missing));

    let wide = DType::vector(NativeType::Float64, 8);
    assert_eq!(wide.field("x"), Ok((&DType::FLOAT64, 0)));
    assert_eq!(wide.field("s7"), Ok((&DType::FLOAT64, 56)));
}

#[test]
fn test_field_on_scalar_fails() {
    assert_eq!(DType::INT32.field("x"), Err(FieldAccessError::NotARecord));
    let opaque = DType::opaque("curandState", 48);
    assert_eq!(opaque.field("x"), Err(FieldAccessError::NotARecord));
}

#[test]
fn test_foreign_equality_is_structural() {
    let a = DType::record("p", [("x", DType::FLOAT32)]);
    let b = DType::record("p", [("x", DType::FLOAT32)]);
    let c = DType::record("p", [("x", DType::FLOAT64)]);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(DType::opaque("t", 4), DType::opaque("t", 8));
}
