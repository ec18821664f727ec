//! Default C-style resolution of math functions and constants.
//!
//! Single-precision calls get the `f`-suffixed C name (`sqrtf`); integer
//! arguments to float functions promote to `float64`, as C does. Complex
//! arguments are left to caller-registered signatures.

use super::{FunctionSignature, SymbolSignature};
use crate::inference::combine;
use crate::types::{DType, DTypeKind, NativeType};

const UNARY_FLOAT_FUNCTIONS: &[&str] = &[
    "sqrt", "exp", "log", "sin", "cos", "tan", "fabs", "floor", "ceil",
];

const BINARY_FLOAT_FUNCTIONS: &[&str] = &["pow", "fmin", "fmax", "atan2", "fmod"];

/// Resolve a call against the built-in math library.
pub fn default_function_signature(name: &str, arg_dtypes: &[DType]) -> Option<FunctionSignature> {
    let natives: Option<Vec<NativeType>> = arg_dtypes.iter().map(DType::as_native).collect();
    let natives = natives?;

    let return_type = if UNARY_FLOAT_FUNCTIONS.contains(&name) {
        let [arg] = natives.as_slice() else {
            return None;
        };
        float_result(*arg)?
    } else if BINARY_FLOAT_FUNCTIONS.contains(&name) {
        let [_, _] = natives.as_slice() else {
            return None;
        };
        float_result(combine(arg_dtypes).ok()?.as_native()?)?
    } else {
        match (name, natives.as_slice()) {
            ("abs", [arg]) if arg.is_integer() => *arg,
            ("min" | "max", [a, b]) if !is_complex(*a) && !is_complex(*b) => {
                combine(arg_dtypes).ok()?.as_native()?
            }
            _ => return None,
        }
    };

    let target_name = if return_type == NativeType::Float32 && !is_integer_call(name) {
        format!("{}f", name)
    } else {
        name.to_string()
    };

    Some(FunctionSignature {
        target_name,
        arg_dtypes: arg_dtypes.to_vec(),
        return_dtype: DType::Native(return_type),
    })
}

/// Resolve one of the built-in constants.
pub fn default_symbol_signature(name: &str) -> Option<SymbolSignature> {
    let dtype = match name {
        "M_PI" | "M_E" | "M_SQRT2" | "M_LN2" => DType::FLOAT64,
        "INFINITY" | "NAN" => DType::FLOAT32,
        _ => return None,
    };
    Some(SymbolSignature {
        dtype,
        target_name: name.to_string(),
    })
}

/// C math has no half-precision routines; `float16` computes in `float32`.
fn float_result(arg: NativeType) -> Option<NativeType> {
    match arg.kind() {
        DTypeKind::Float if arg == NativeType::Float64 => Some(NativeType::Float64),
        DTypeKind::Float => Some(NativeType::Float32),
        DTypeKind::SignedInteger | DTypeKind::UnsignedInteger => Some(NativeType::Float64),
        _ => None,
    }
}

fn is_complex(ty: NativeType) -> bool {
    ty.kind() == DTypeKind::Complex
}

fn is_integer_call(name: &str) -> bool {
    matches!(name, "abs" | "min" | "max")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(name: &str, args: &[DType]) -> Option<(String, DType)> {
        default_function_signature(name, args).map(|sig| (sig.target_name, sig.return_dtype))
    }

    #[test]
    fn test_unary_float_functions() {
        assert_eq!(
            resolve("sqrt", &[DType::FLOAT32]),
            Some(("sqrtf".to_string(), DType::FLOAT32))
        );
        assert_eq!(
            resolve("sqrt", &[DType::FLOAT64]),
            Some(("sqrt".to_string(), DType::FLOAT64))
        );
        // Integer arguments promote like C
        assert_eq!(
            resolve("exp", &[DType::INT32]),
            Some(("exp".to_string(), DType::FLOAT64))
        );
        assert_eq!(
            resolve("sin", &[DType::Native(NativeType::Float16)]),
            Some(("sinf".to_string(), DType::FLOAT32))
        );
        assert_eq!(resolve("sqrt", &[DType::COMPLEX64]), None);
        assert_eq!(resolve("sqrt", &[DType::FLOAT32, DType::FLOAT32]), None);
    }

    #[test]
    fn test_binary_float_functions_promote() {
        assert_eq!(
            resolve("pow", &[DType::FLOAT32, DType::FLOAT64]),
            Some(("pow".to_string(), DType::FLOAT64))
        );
        assert_eq!(
            resolve("fmax", &[DType::FLOAT32, DType::INT32]),
            Some(("fmaxf".to_string(), DType::FLOAT32))
        );
    }

    #[test]
    fn test_integer_functions() {
        assert_eq!(
            resolve("abs", &[DType::INT64]),
            Some(("abs".to_string(), DType::INT64))
        );
        assert_eq!(resolve("abs", &[DType::FLOAT32]), None);
        assert_eq!(
            resolve("max", &[DType::FLOAT32, DType::FLOAT32]),
            Some(("max".to_string(), DType::FLOAT32))
        );
        assert_eq!(
            resolve("min", &[DType::INT32, DType::INT64]),
            Some(("min".to_string(), DType::INT64))
        );
    }

    #[test]
    fn test_foreign_arguments_are_not_resolved() {
        let rec = DType::record("p", [("x", DType::FLOAT32)]);
        assert_eq!(resolve("sqrt", &[rec]), None);
    }

    #[test]
    fn test_default_symbols() {
        assert_eq!(
            default_symbol_signature("M_PI").map(|s| s.dtype),
            Some(DType::FLOAT64)
        );
        assert_eq!(
            default_symbol_signature("INFINITY").map(|s| s.dtype),
            Some(DType::FLOAT32)
        );
        assert_eq!(default_symbol_signature("pi"), None);
    }
}
