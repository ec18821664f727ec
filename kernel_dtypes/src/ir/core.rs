//! Core expression IR.
//!
//! Expressions are produced by a front end and only read here. Children are
//! boxed; reductions hold their operation behind an `Arc` so trees stay
//! cheap to clone and shareable across threads.

use crate::reduction::ReductionOperation;
use crate::types::NativeType;
use half::f16;
use num_bigint::BigInt;
use std::sync::Arc;

/// A literal value carried by `Expr::Constant`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Arbitrary-precision integer with no declared size
    Int(BigInt),
    /// Boolean; integral (`true` is 1)
    Bool(bool),
    /// Floating value with no declared size
    Float(f64),
    /// Complex value with no declared size
    Complex { re: f64, im: f64 },
    /// Scalar of an exact native type
    Scalar(Scalar),
    /// Value that carries its own descriptor, e.g. a vector constant
    Sized { text: String, dtype: crate::types::DType },
    /// Non-numeric constant
    Str(String),
}

impl Literal {
    /// The value as an integer, if the literal is integral.
    ///
    /// Integer-typed scalars count; floats never do, even `3.0`.
    pub fn integer_value(&self) -> Option<BigInt> {
        match self {
            Literal::Int(value) => Some(value.clone()),
            Literal::Bool(value) => Some(BigInt::from(u8::from(*value))),
            Literal::Scalar(scalar) => scalar.integer_value(),
            _ => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        self.integer_value().is_some()
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(BigInt::from(value))
    }
}

impl From<BigInt> for Literal {
    fn from(value: BigInt) -> Self {
        Literal::Int(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<Scalar> for Literal {
    fn from(value: Scalar) -> Self {
        Literal::Scalar(value)
    }
}

/// A scalar of exact native type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float16(f16),
    Float32(f32),
    Float64(f64),
    Complex64 { re: f32, im: f32 },
    Complex128 { re: f64, im: f64 },
}

impl Scalar {
    pub fn native_type(&self) -> NativeType {
        match self {
            Scalar::Int8(_) => NativeType::Int8,
            Scalar::Int16(_) => NativeType::Int16,
            Scalar::Int32(_) => NativeType::Int32,
            Scalar::Int64(_) => NativeType::Int64,
            Scalar::UInt8(_) => NativeType::UInt8,
            Scalar::UInt16(_) => NativeType::UInt16,
            Scalar::UInt32(_) => NativeType::UInt32,
            Scalar::UInt64(_) => NativeType::UInt64,
            Scalar::Float16(_) => NativeType::Float16,
            Scalar::Float32(_) => NativeType::Float32,
            Scalar::Float64(_) => NativeType::Float64,
            Scalar::Complex64 { .. } => NativeType::Complex64,
            Scalar::Complex128 { .. } => NativeType::Complex128,
        }
    }

    pub fn integer_value(&self) -> Option<BigInt> {
        match *self {
            Scalar::Int8(v) => Some(BigInt::from(v)),
            Scalar::Int16(v) => Some(BigInt::from(v)),
            Scalar::Int32(v) => Some(BigInt::from(v)),
            Scalar::Int64(v) => Some(BigInt::from(v)),
            Scalar::UInt8(v) => Some(BigInt::from(v)),
            Scalar::UInt16(v) => Some(BigInt::from(v)),
            Scalar::UInt32(v) => Some(BigInt::from(v)),
            Scalar::UInt64(v) => Some(BigInt::from(v)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::Ne => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
        }
    }
}

/// An expression node.
#[derive(Debug, Clone)]
pub enum Expr {
    Constant(Literal),
    Variable(String),
    TaggedVariable {
        name: String,
        tag: String,
    },
    Subscript {
        aggregate: Box<Expr>,
        index: Box<Expr>,
    },
    /// Subscript by a single flattened index
    LinearSubscript {
        aggregate: Box<Expr>,
        index: Box<Expr>,
    },
    /// Record field access
    Lookup {
        aggregate: Box<Expr>,
        name: String,
    },
    Sum(Vec<Expr>),
    Product(Vec<Expr>),
    /// True division
    Quotient {
        numerator: Box<Expr>,
        denominator: Box<Expr>,
    },
    FloorDiv {
        numerator: Box<Expr>,
        denominator: Box<Expr>,
    },
    Remainder {
        numerator: Box<Expr>,
        denominator: Box<Expr>,
    },
    Power {
        base: Box<Expr>,
        exponent: Box<Expr>,
    },
    Call {
        function: Box<Expr>,
        parameters: Vec<Expr>,
    },
    Comparison {
        left: Box<Expr>,
        op: ComparisonOp,
        right: Box<Expr>,
    },
    LogicalNot(Box<Expr>),
    LogicalAnd(Vec<Expr>),
    LogicalOr(Vec<Expr>),
    If {
        condition: Box<Expr>,
        then: Box<Expr>,
        else_: Box<Expr>,
    },
    Reduction {
        operation: Arc<dyn ReductionOperation>,
        expr: Box<Expr>,
        inames: Vec<String>,
    },
}

// Convenience constructors, used heavily by front ends and tests.
impl Expr {
    pub fn constant(value: impl Into<Literal>) -> Self {
        Expr::Constant(value.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Constant(Literal::from(value))
    }

    pub fn float(value: f64) -> Self {
        Expr::Constant(Literal::Float(value))
    }

    pub fn complex(re: f64, im: f64) -> Self {
        Expr::Constant(Literal::Complex { re, im })
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn tagged(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Expr::TaggedVariable {
            name: name.into(),
            tag: tag.into(),
        }
    }

    pub fn sum(children: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Sum(children.into_iter().collect())
    }

    pub fn product(children: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Product(children.into_iter().collect())
    }

    pub fn quotient(numerator: Expr, denominator: Expr) -> Self {
        Expr::Quotient {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
        }
    }

    pub fn power(base: Expr, exponent: Expr) -> Self {
        Expr::Power {
            base: Box::new(base),
            exponent: Box::new(exponent),
        }
    }

    pub fn subscript(aggregate: Expr, index: Expr) -> Self {
        Expr::Subscript {
            aggregate: Box::new(aggregate),
            index: Box::new(index),
        }
    }

    pub fn lookup(aggregate: Expr, name: impl Into<String>) -> Self {
        Expr::Lookup {
            aggregate: Box::new(aggregate),
            name: name.into(),
        }
    }

    pub fn call(function: impl Into<String>, parameters: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Call {
            function: Box::new(Expr::Variable(function.into())),
            parameters: parameters.into_iter().collect(),
        }
    }

    pub fn compare(left: Expr, op: ComparisonOp, right: Expr) -> Self {
        Expr::Comparison {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn if_then_else(condition: Expr, then: Expr, else_: Expr) -> Self {
        Expr::If {
            condition: Box::new(condition),
            then: Box::new(then),
            else_: Box::new(else_),
        }
    }

    pub fn reduce<I, S>(operation: Arc<dyn ReductionOperation>, expr: Expr, inames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::Reduction {
            operation,
            expr: Box::new(expr),
            inames: inames.into_iter().map(Into::into).collect(),
        }
    }

    /// The literal, if this is a constant.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Constant(literal) => Some(literal),
            _ => None,
        }
    }
}
