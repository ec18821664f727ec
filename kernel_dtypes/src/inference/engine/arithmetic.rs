use super::type_ops::combine;
use super::TypeInferenceEngine;
use crate::env::KernelEnv;
use crate::error::InferResult;
use crate::ir::Expr;
use crate::types::DType;
use num_traits::ToPrimitive;

/// Integer constants below this magnitude are "small".
pub const SMALL_INTEGER_LIMIT: i64 = 1024;

impl<E: KernelEnv + ?Sized> TypeInferenceEngine<'_, E> {
    /// Sum and product share one rule.
    ///
    /// Small integer literals only take part in the combine when every other
    /// operand is a signed integer. Mixed with anything else they are exactly
    /// representable in the type the other operands choose and must not
    /// widen it.
    pub(super) fn infer_sum_like(&self, children: &[Expr]) -> InferResult<DType> {
        let mut dtypes = Vec::with_capacity(children.len());
        let mut small_integers = Vec::new();

        for child in children {
            let dtype = self.infer(child)?;
            match small_integer_literal(child) {
                Some(value) => small_integers.push((value, dtype)),
                None => dtypes.push(dtype),
            }
        }

        if dtypes.iter().all(DType::is_signed_integer) {
            dtypes.extend(small_integers.into_iter().map(|(_, dtype)| dtype));
            return combine(&dtypes);
        }

        let result = combine(&dtypes)?;
        for (value, _) in &small_integers {
            if !holds_integer(&result, *value) {
                tracing::warn!(
                    literal = *value,
                    dtype = %result,
                    "small integer literal dropped from combine is not representable in result type"
                );
            }
        }
        Ok(result)
    }

    /// True division: two integer operands always give `float64`.
    pub(super) fn infer_quotient(&self, numerator: &Expr, denominator: &Expr) -> InferResult<DType> {
        let n_dtype = self.infer(numerator)?;
        let d_dtype = self.infer(denominator)?;

        if n_dtype.is_integer() && d_dtype.is_integer() {
            Ok(DType::FLOAT64)
        } else {
            combine(&[n_dtype, d_dtype])
        }
    }

    /// Floor division, remainder and power combine both operands.
    pub(super) fn infer_binary(&self, left: &Expr, right: &Expr) -> InferResult<DType> {
        let left = self.infer(left)?;
        let right = self.infer(right)?;
        combine(&[left, right])
    }
}

/// The value of an integral constant with magnitude below the limit.
fn small_integer_literal(expr: &Expr) -> Option<i64> {
    let value = expr.as_literal()?.integer_value()?.to_i64()?;
    (value.unsigned_abs() < SMALL_INTEGER_LIMIT.unsigned_abs()).then_some(value)
}

/// Foreign types are assumed to hold any small integer.
fn holds_integer(dtype: &DType, value: i64) -> bool {
    dtype
        .as_native()
        .map_or(true, |ty| ty.holds_integer(i128::from(value)))
}
