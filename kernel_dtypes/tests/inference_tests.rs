//! End-to-end dtype inference through the public API.

mod common;

use common::{at_i, failure_message, infer_in, saxpy_env};
use kernel_dtypes::*;
use num_bigint::BigInt;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_saxpy_body_is_single_precision() {
    let env = saxpy_env();
    let body = Expr::sum([
        Expr::product([Expr::var("alpha"), at_i("x")]),
        at_i("y"),
    ]);
    assert_eq!(infer_in(&env, &body), Ok(DType::FLOAT32));
}

#[test]
fn test_index_arithmetic_stays_int32() {
    let env = saxpy_env();
    let expr = Expr::sum([
        Expr::product([Expr::int(2), Expr::var("i")]),
        Expr::int(1),
    ]);
    assert_eq!(infer_in(&env, &expr), Ok(DType::INT32));
}

#[test]
fn test_float64_plus_literal() {
    let env = saxpy_env();
    let expr = Expr::sum([at_i("w"), Expr::int(3)]);
    assert_eq!(infer_in(&env, &expr), Ok(DType::FLOAT64));
}

#[test]
fn test_integer_operands_include_small_literal() {
    let env = saxpy_env();
    let expr = Expr::sum([
        at_i("counts"),
        at_i("counts"),
        at_i("counts"),
        Expr::int(500),
    ]);
    let expected = combine(&[
        DType::Native(NativeType::Int16),
        DType::Native(NativeType::Int16),
        DType::Native(NativeType::Int16),
        DType::INT32,
    ]);
    assert_eq!(infer_in(&env, &expr), expected);
    assert_eq!(expected, Ok(DType::INT32));
}

#[test]
fn test_unsigned_operands_drop_small_literal() {
    let env = saxpy_env();
    let expr = Expr::sum([at_i("flags"), Expr::int(1)]);
    assert_eq!(infer_in(&env, &expr), Ok(DType::Native(NativeType::UInt8)));
}

#[test]
fn test_mean_is_float64() {
    let env = saxpy_env();
    let expr = Expr::quotient(at_i("counts"), Expr::var("n"));
    assert_eq!(infer_in(&env, &expr), Ok(DType::FLOAT64));
}

#[test]
fn test_constant_sizing() {
    let env = saxpy_env();
    let pow2 = |exp: u32| Expr::Constant(Literal::Int(BigInt::from(2).pow(exp)));

    assert_eq!(infer_in(&env, &pow2(40)), Ok(DType::INT64));
    insta::assert_snapshot!(
        failure_message(infer_in(&env, &pow2(70))),
        @"type inference failed: integer constant '1180591620717411303424' too large (in '1180591620717411303424')"
    );
}

#[test]
fn test_complex_constants() {
    let env = saxpy_env();
    assert_eq!(infer_in(&env, &Expr::complex(0.0, 1.0)), Ok(DType::COMPLEX64));
    insta::assert_snapshot!(
        failure_message(infer_in(&env, &Expr::complex(0.0, 0.1))),
        @"type inference failed: complex constant '0.1j' needs to be sized for type inference (in '0.1j')"
    );
}

#[test]
fn test_comparisons_are_int32() {
    let env = saxpy_env();
    let cond = Expr::LogicalAnd(vec![
        Expr::compare(Expr::var("i"), ComparisonOp::Lt, Expr::var("n")),
        Expr::LogicalNot(Box::new(Expr::compare(
            at_i("w"),
            ComparisonOp::Ge,
            Expr::float(0.5),
        ))),
    ]);
    assert_eq!(infer_in(&env, &cond), Ok(DType::INT32));
}

#[test]
fn test_select_combines_branches() {
    let env = saxpy_env();
    let expr = Expr::if_then_else(
        Expr::compare(at_i("x"), ComparisonOp::Gt, Expr::int(0)),
        at_i("x"),
        Expr::product([Expr::var("alpha"), at_i("x")]),
    );
    assert_eq!(infer_in(&env, &expr), Ok(DType::FLOAT32));
}

#[test]
fn test_math_calls_use_default_library() {
    let env = saxpy_env();
    assert_eq!(
        infer_in(&env, &Expr::call("sqrt", [at_i("x")])),
        Ok(DType::FLOAT32)
    );
    assert_eq!(
        infer_in(&env, &Expr::call("exp", [at_i("counts")])),
        Ok(DType::FLOAT64)
    );
    assert_eq!(
        infer_in(&env, &Expr::call("pow", [at_i("x"), at_i("w")])),
        Ok(DType::FLOAT64)
    );
}

#[test]
fn test_call_without_default_library() {
    let config = InferenceConfig {
        default_library: false,
        ..InferenceConfig::default()
    };
    let env = KernelTypeEnv::from_config(&config).with_argument("x", Some(DType::FLOAT32));
    insta::assert_snapshot!(
        failure_message(infer_in(&env, &Expr::call("sqrt", [Expr::var("x")]))),
        @"type inference failed: no type inference information on function 'sqrt' for argument types (float32) (in 'sqrt(x)')"
    );
}

#[test]
fn test_index_dtype_from_config() {
    let config = InferenceConfig::from_toml_str("index_dtype = \"int64\"").unwrap();
    let env = KernelTypeEnv::from_config(&config).with_index("i");
    let expr = Expr::sum([Expr::var("i"), Expr::int(1)]);
    assert_eq!(infer_in(&env, &expr), Ok(DType::INT64));
}

#[test]
fn test_record_fields() {
    let particle = DType::record(
        "particle",
        [
            ("pos", DType::vector(NativeType::Float32, 4)),
            ("mass", DType::FLOAT64),
        ],
    );
    let env = saxpy_env().with_argument("parts", Some(particle));

    let mass = Expr::lookup(at_i("parts"), "mass");
    assert_eq!(infer_in(&env, &mass), Ok(DType::FLOAT64));

    let pos_y = Expr::lookup(Expr::lookup(at_i("parts"), "pos"), "y");
    assert_eq!(infer_in(&env, &pos_y), Ok(DType::FLOAT32));

    insta::assert_snapshot!(
        failure_message(infer_in(&env, &Expr::lookup(at_i("parts"), "charge"))),
        @"type inference failed: type 'particle' has no field 'charge' (in 'parts[i].charge')"
    );
}

#[test]
fn test_foreign_operands() {
    let float4 = DType::vector(NativeType::Float32, 4);
    let env = saxpy_env()
        .with_argument("v", Some(float4.clone()))
        .with_argument("d", Some(DType::vector(NativeType::Float64, 4)));

    // A vector scaled by a native scalar stays a vector
    let scaled = Expr::product([Expr::var("alpha"), at_i("v")]);
    assert_eq!(infer_in(&env, &scaled), Ok(float4.clone()));

    assert_eq!(
        combine(&[float4.clone(), float4.clone()]),
        Ok(float4)
    );

    let mixed = Expr::sum([at_i("v"), at_i("d")]);
    insta::assert_snapshot!(
        failure_message(infer_in(&env, &mixed)),
        @"type inference failed: nothing known about result of operation on 'float4' and 'double4' (in 'v[i] + d[i]')"
    );
}

#[test]
fn test_sum_of_native_triples_ignores_operand_order() {
    let env = NativeType::ALL
        .iter()
        .fold(KernelTypeEnv::new(), |env, ty| {
            env.with_argument(ty.name(), Some(DType::Native(*ty)))
        });
    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

    for a in NativeType::ALL {
        for b in NativeType::ALL {
            for c in NativeType::ALL {
                let operands = [a, b, c];
                let results: Vec<_> = orders
                    .iter()
                    .map(|order| {
                        let expr = Expr::sum(order.iter().map(|&k| Expr::var(operands[k].name())));
                        infer_in(&env, &expr)
                    })
                    .collect();
                assert!(
                    results.iter().all(|result| *result == results[0]),
                    "{a}, {b}, {c}: {results:?}"
                );
            }
        }
    }

    let single = Expr::sum([Expr::var("int32"), Expr::var("float32"), Expr::var("complex64")]);
    assert_eq!(infer_in(&env, &single), Ok(DType::COMPLEX64));
    let single = Expr::sum([Expr::var("int32"), Expr::var("complex64"), Expr::var("float32")]);
    assert_eq!(infer_in(&env, &single), Ok(DType::COMPLEX64));
}

#[test]
fn test_native_combine_is_commutative() {
    for a in NativeType::ALL {
        for b in NativeType::ALL {
            let ab = combine(&[DType::Native(a), DType::Native(b)]);
            let ba = combine(&[DType::Native(b), DType::Native(a)]);
            assert_eq!(ab, ba, "{a} with {b}");
        }
    }
    assert_eq!(combine(&[DType::INT32, DType::FLOAT32]), Ok(DType::FLOAT32));
}

#[test]
fn test_reduction_over_index() {
    let env = saxpy_env();
    let dot = Expr::reduce(
        Arc::new(BuiltinReduction::Sum),
        Expr::product([at_i("x"), at_i("w")]),
        ["i"],
    );
    assert_eq!(infer_in(&env, &dot), Ok(DType::FLOAT64));

    let argmin = Expr::reduce(Arc::new(BuiltinReduction::ArgMin), at_i("x"), ["i"]);
    let index = Expr::lookup(argmin, "index");
    assert_eq!(infer_in(&env, &index), Ok(DType::INT32));
}

#[test]
fn test_deferral_then_override() {
    let env = saxpy_env();
    let expr = Expr::sum([Expr::var("t"), at_i("x")]);

    let err = infer_in(&env, &expr).unwrap_err();
    assert!(err.is_deferred());
    assert_eq!(err.deferred_name(), Some("t"));
    insta::assert_snapshot!(
        err.to_string(),
        @"type of temporary variable 't' is not yet determined"
    );

    let mut pending = PendingAssignments::new();
    pending.insert("t".to_string(), TemporaryDecl::new("t", DType::FLOAT64).into());
    assert_eq!(infer_dtype(&expr, &env, &pending), Ok(DType::FLOAT64));
}

#[test]
fn test_classify_contexts() {
    let opencl = Target::opencl();
    let c = Target::c();

    let double4 = DType::vector(NativeType::Float64, 4);
    assert_eq!(classify(&opencl, &double4), Some(TypeContext::DoublePrecision));
    assert_eq!(classify(&c, &double4), None);

    assert_eq!(classify(&c, &DType::COMPLEX64), Some(TypeContext::SinglePrecision));
    assert_eq!(classify(&c, &DType::INT64), Some(TypeContext::Integer));
    assert_eq!(classify(&c, &DType::Native(NativeType::UInt32)), None);
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let env = saxpy_env();
    let pending = PendingAssignments::new();
    let exprs = [
        Expr::sum([at_i("w"), Expr::int(3)]),
        Expr::quotient(Expr::var("n"), Expr::var("n")),
        Expr::call("sqrt", [at_i("x")]),
    ];

    let (env, pending) = (&env, &pending);
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = exprs
            .iter()
            .map(|expr| scope.spawn(move || infer_dtype(expr, env, pending)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        results,
        vec![Ok(DType::FLOAT64), Ok(DType::FLOAT64), Ok(DType::FLOAT32)]
    );
}
