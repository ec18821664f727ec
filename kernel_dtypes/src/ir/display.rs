use super::core::{Expr, Literal, Scalar};
use std::fmt;

// Binding strength, loosest first.
const PREC_OR: u8 = 1;
const PREC_AND: u8 = 2;
const PREC_NOT: u8 = 3;
const PREC_COMPARISON: u8 = 4;
const PREC_SUM: u8 = 5;
const PREC_PRODUCT: u8 = 6;
const PREC_POWER: u8 = 7;
const PREC_ATOM: u8 = 8;

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::LogicalOr(_) => PREC_OR,
            Expr::LogicalAnd(_) => PREC_AND,
            Expr::LogicalNot(_) => PREC_NOT,
            Expr::Comparison { .. } => PREC_COMPARISON,
            Expr::Sum(_) => PREC_SUM,
            Expr::Product(_)
            | Expr::Quotient { .. }
            | Expr::FloorDiv { .. }
            | Expr::Remainder { .. } => PREC_PRODUCT,
            Expr::Power { .. } => PREC_POWER,
            Expr::Constant(Literal::Complex { re, .. }) if *re != 0.0 => PREC_SUM,
            _ => PREC_ATOM,
        }
    }
}

struct Child<'a>(&'a Expr, u8);

impl fmt::Display for Child<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Child(expr, min_prec) = *self;
        if expr.precedence() < min_prec {
            write!(f, "({})", expr)
        } else {
            write!(f, "{}", expr)
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, children: &[Expr], sep: &str, min_prec: u8) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", Child(child, min_prec))?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(literal) => write!(f, "{}", literal),
            Expr::Variable(name) => f.write_str(name),
            Expr::TaggedVariable { name, tag } => write!(f, "{}${}", name, tag),
            Expr::Subscript { aggregate, index } | Expr::LinearSubscript { aggregate, index } => {
                write!(f, "{}[{}]", Child(aggregate, PREC_ATOM), index)
            }
            Expr::Lookup { aggregate, name } => {
                write!(f, "{}.{}", Child(aggregate, PREC_ATOM), name)
            }
            Expr::Sum(children) => join(f, children, " + ", PREC_SUM + 1),
            Expr::Product(children) => join(f, children, "*", PREC_PRODUCT + 1),
            Expr::Quotient {
                numerator,
                denominator,
            } => write!(
                f,
                "{} / {}",
                Child(numerator, PREC_PRODUCT),
                Child(denominator, PREC_POWER)
            ),
            Expr::FloorDiv {
                numerator,
                denominator,
            } => write!(
                f,
                "{} // {}",
                Child(numerator, PREC_PRODUCT),
                Child(denominator, PREC_POWER)
            ),
            Expr::Remainder {
                numerator,
                denominator,
            } => write!(
                f,
                "{} % {}",
                Child(numerator, PREC_PRODUCT),
                Child(denominator, PREC_POWER)
            ),
            Expr::Power { base, exponent } => write!(
                f,
                "{}**{}",
                Child(base, PREC_ATOM),
                Child(exponent, PREC_POWER)
            ),
            Expr::Call {
                function,
                parameters,
            } => {
                write!(f, "{}(", Child(function, PREC_ATOM))?;
                join(f, parameters, ", ", 0)?;
                f.write_str(")")
            }
            Expr::Comparison { left, op, right } => write!(
                f,
                "{} {} {}",
                Child(left, PREC_SUM),
                op.as_str(),
                Child(right, PREC_SUM)
            ),
            Expr::LogicalNot(operand) => write!(f, "not {}", Child(operand, PREC_NOT)),
            Expr::LogicalAnd(children) => join(f, children, " and ", PREC_AND + 1),
            Expr::LogicalOr(children) => join(f, children, " or ", PREC_OR + 1),
            Expr::If {
                condition,
                then,
                else_,
            } => write!(f, "If({}, {}, {})", condition, then, else_),
            Expr::Reduction {
                operation,
                expr,
                inames,
            } => {
                if let [iname] = inames.as_slice() {
                    write!(f, "{}({}, {})", operation.name(), iname, expr)
                } else {
                    write!(f, "{}(({}), {})", operation.name(), inames.join(", "), expr)
                }
            }
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{:?}", value),
            Literal::Complex { re, im } => fmt_complex(f, *re, *im),
            Literal::Scalar(scalar) => write!(f, "{}", scalar),
            Literal::Sized { text, .. } => f.write_str(text),
            Literal::Str(text) => write!(f, "{:?}", text),
        }
    }
}

fn fmt_complex(f: &mut fmt::Formatter<'_>, re: f64, im: f64) -> fmt::Result {
    if re == 0.0 {
        write!(f, "{}j", im)
    } else if im.is_sign_negative() {
        write!(f, "({}-{}j)", re, -im)
    } else {
        write!(f, "({}+{}j)", re, im)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ty = self.native_type();
        match *self {
            Scalar::Int8(v) => write!(f, "{}({})", ty, v),
            Scalar::Int16(v) => write!(f, "{}({})", ty, v),
            Scalar::Int32(v) => write!(f, "{}({})", ty, v),
            Scalar::Int64(v) => write!(f, "{}({})", ty, v),
            Scalar::UInt8(v) => write!(f, "{}({})", ty, v),
            Scalar::UInt16(v) => write!(f, "{}({})", ty, v),
            Scalar::UInt32(v) => write!(f, "{}({})", ty, v),
            Scalar::UInt64(v) => write!(f, "{}({})", ty, v),
            Scalar::Float16(v) => write!(f, "{}({})", ty, v),
            Scalar::Float32(v) => write!(f, "{}({:?})", ty, v),
            Scalar::Float64(v) => write!(f, "{}({:?})", ty, v),
            Scalar::Complex64 { re, im } => {
                write!(f, "{}(", ty)?;
                fmt_complex(f, f64::from(re), f64::from(im))?;
                f.write_str(")")
            }
            Scalar::Complex128 { re, im } => {
                write!(f, "{}(", ty)?;
                fmt_complex(f, re, im)?;
                f.write_str(")")
            }
        }
    }
}
