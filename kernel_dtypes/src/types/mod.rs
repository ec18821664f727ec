//! Storage type descriptors ("dtypes") for kernel expressions.
//!
//! # Module Organization
//!
//! - `mod.rs`: `DType`, `NativeType`, `ForeignType`, field access
//! - `layout.rs`: record, vector and opaque constructors with C layout
//! - `promotion.rs`: usual arithmetic conversions between native types
//!
//! # Native vs Foreign
//!
//! - `NativeType`: numeric scalars with built-in promotion rules. Two native
//!   descriptors of the same kind and width are interchangeable.
//! - `ForeignType`: records, vectors and opaque types defined outside the
//!   combiner. They compare structurally and are never related to each other.

mod layout;
mod promotion;

#[cfg(test)]
mod tests;

pub use promotion::promote_native;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Coarse classification of a dtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DTypeKind {
    SignedInteger,
    UnsignedInteger,
    Float,
    Complex,
    Record,
    Vector,
    Opaque,
}

/// Numeric scalar types with built-in promotion rules.
///
/// Complex types are named by their total width: `Complex64` holds two
/// `Float32` parts, `Complex128` two `Float64` parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum NativeType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float16,
    Float32,
    Float64,
    Complex64,
    Complex128,
}

impl NativeType {
    pub const ALL: [NativeType; 13] = [
        NativeType::Int8,
        NativeType::Int16,
        NativeType::Int32,
        NativeType::Int64,
        NativeType::UInt8,
        NativeType::UInt16,
        NativeType::UInt32,
        NativeType::UInt64,
        NativeType::Float16,
        NativeType::Float32,
        NativeType::Float64,
        NativeType::Complex64,
        NativeType::Complex128,
    ];

    pub fn kind(self) -> DTypeKind {
        match self {
            NativeType::Int8 | NativeType::Int16 | NativeType::Int32 | NativeType::Int64 => {
                DTypeKind::SignedInteger
            }
            NativeType::UInt8 | NativeType::UInt16 | NativeType::UInt32 | NativeType::UInt64 => {
                DTypeKind::UnsignedInteger
            }
            NativeType::Float16 | NativeType::Float32 | NativeType::Float64 => DTypeKind::Float,
            NativeType::Complex64 | NativeType::Complex128 => DTypeKind::Complex,
        }
    }

    /// Size in bytes.
    pub fn itemsize(self) -> usize {
        match self {
            NativeType::Int8 | NativeType::UInt8 => 1,
            NativeType::Int16 | NativeType::UInt16 | NativeType::Float16 => 2,
            NativeType::Int32 | NativeType::UInt32 | NativeType::Float32 => 4,
            NativeType::Int64 | NativeType::UInt64 | NativeType::Float64 => 8,
            NativeType::Complex64 => 8,
            NativeType::Complex128 => 16,
        }
    }

    pub fn bits(self) -> usize {
        self.itemsize() * 8
    }

    /// Alignment in bytes; complex types align like their parts.
    pub fn alignment(self) -> usize {
        match self {
            NativeType::Complex64 => 4,
            NativeType::Complex128 => 8,
            other => other.itemsize(),
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self.kind(),
            DTypeKind::SignedInteger | DTypeKind::UnsignedInteger
        )
    }

    /// Real part type of a complex type; real types return themselves.
    pub fn real_part(self) -> NativeType {
        match self {
            NativeType::Complex64 => NativeType::Float32,
            NativeType::Complex128 => NativeType::Float64,
            other => other,
        }
    }

    /// Signed integer type of the given bit width.
    pub(crate) fn signed_of_bits(bits: usize) -> Option<NativeType> {
        match bits {
            8 => Some(NativeType::Int8),
            16 => Some(NativeType::Int16),
            32 => Some(NativeType::Int32),
            64 => Some(NativeType::Int64),
            _ => None,
        }
    }

    /// Float type of the given bit width.
    pub(crate) fn float_of_bits(bits: usize) -> Option<NativeType> {
        match bits {
            16 => Some(NativeType::Float16),
            32 => Some(NativeType::Float32),
            64 => Some(NativeType::Float64),
            _ => None,
        }
    }

    /// Whether the integer `value` is exactly representable in this type.
    ///
    /// Floating types count their implicit leading bit, so `Float16` holds
    /// every integer up to 2048 in magnitude.
    pub fn holds_integer(self, value: i128) -> bool {
        match self {
            NativeType::Int8 => i8::try_from(value).is_ok(),
            NativeType::Int16 => i16::try_from(value).is_ok(),
            NativeType::Int32 => i32::try_from(value).is_ok(),
            NativeType::Int64 => i64::try_from(value).is_ok(),
            NativeType::UInt8 => u8::try_from(value).is_ok(),
            NativeType::UInt16 => u16::try_from(value).is_ok(),
            NativeType::UInt32 => u32::try_from(value).is_ok(),
            NativeType::UInt64 => u64::try_from(value).is_ok(),
            NativeType::Float16 | NativeType::Float32 | NativeType::Float64 => {
                let mantissa = match self {
                    NativeType::Float16 => 11,
                    NativeType::Float32 => 24,
                    _ => 53,
                };
                value.unsigned_abs() <= 1u128 << mantissa
            }
            NativeType::Complex64 | NativeType::Complex128 => {
                self.real_part().holds_integer(value)
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NativeType::Int8 => "int8",
            NativeType::Int16 => "int16",
            NativeType::Int32 => "int32",
            NativeType::Int64 => "int64",
            NativeType::UInt8 => "uint8",
            NativeType::UInt16 => "uint16",
            NativeType::UInt32 => "uint32",
            NativeType::UInt64 => "uint64",
            NativeType::Float16 => "float16",
            NativeType::Float32 => "float32",
            NativeType::Float64 => "float64",
            NativeType::Complex64 => "complex64",
            NativeType::Complex128 => "complex128",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a dtype name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dtype name '{0}'")]
pub struct UnknownDTypeName(pub String);

impl FromStr for NativeType {
    type Err = UnknownDTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        NativeType::ALL
            .iter()
            .copied()
            .find(|ty| ty.name() == name)
            .or(match name {
                "int" => Some(NativeType::Int32),
                "long" => Some(NativeType::Int64),
                "float" => Some(NativeType::Float32),
                "double" => Some(NativeType::Float64),
                _ => None,
            })
            .ok_or_else(|| UnknownDTypeName(name.to_string()))
    }
}

impl TryFrom<String> for NativeType {
    type Error = UnknownDTypeName;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// A named field of a record or vector type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub dtype: DType,
    /// Byte offset from the start of the enclosing type
    pub offset: usize,
}

/// A type the combiner treats opaquely.
///
/// Equality is structural: name, kind, size and every field with its offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForeignType {
    pub name: String,
    pub kind: DTypeKind,
    pub itemsize: usize,
    pub alignment: usize,
    /// Ordered field layout (empty for opaque types)
    pub fields: Vec<Field>,
}

/// A storage type descriptor.
///
/// Descriptors are immutable; cloning a foreign descriptor only bumps a
/// reference count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DType {
    Native(NativeType),
    Foreign(Arc<ForeignType>),
}

impl DType {
    pub const INT32: DType = DType::Native(NativeType::Int32);
    pub const INT64: DType = DType::Native(NativeType::Int64);
    pub const FLOAT32: DType = DType::Native(NativeType::Float32);
    pub const FLOAT64: DType = DType::Native(NativeType::Float64);
    pub const COMPLEX64: DType = DType::Native(NativeType::Complex64);
    pub const COMPLEX128: DType = DType::Native(NativeType::Complex128);

    pub fn is_native(&self) -> bool {
        matches!(self, DType::Native(_))
    }

    pub fn as_native(&self) -> Option<NativeType> {
        match self {
            DType::Native(ty) => Some(*ty),
            DType::Foreign(_) => None,
        }
    }

    pub fn kind(&self) -> DTypeKind {
        match self {
            DType::Native(ty) => ty.kind(),
            DType::Foreign(ty) => ty.kind,
        }
    }

    pub fn itemsize(&self) -> usize {
        match self {
            DType::Native(ty) => ty.itemsize(),
            DType::Foreign(ty) => ty.itemsize,
        }
    }

    pub fn alignment(&self) -> usize {
        match self {
            DType::Native(ty) => ty.alignment(),
            DType::Foreign(ty) => ty.alignment,
        }
    }

    /// Signed or unsigned integer.
    pub fn is_integer(&self) -> bool {
        self.as_native().is_some_and(NativeType::is_integer)
    }

    pub fn is_signed_integer(&self) -> bool {
        self.kind() == DTypeKind::SignedInteger
    }

    /// Record and vector types carry a field layout.
    pub fn has_fields(&self) -> bool {
        matches!(self.kind(), DTypeKind::Record | DTypeKind::Vector)
    }

    /// Ordered field layout; empty for scalars and opaque types.
    pub fn fields(&self) -> &[Field] {
        match self {
            DType::Foreign(ty) => &ty.fields,
            DType::Native(_) => &[],
        }
    }

    /// Look up a field by name, returning its type and byte offset.
    pub fn field(&self, name: &str) -> Result<(&DType, usize), FieldAccessError> {
        if !self.has_fields() {
            return Err(FieldAccessError::NotARecord);
        }
        self.fields()
            .iter()
            .find(|field| field.name == name)
            .map(|field| (&field.dtype, field.offset))
            .ok_or(FieldAccessError::Missing)
    }

    pub fn name(&self) -> &str {
        match self {
            DType::Native(ty) => ty.name(),
            DType::Foreign(ty) => &ty.name,
        }
    }
}

/// Why `DType::field` failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccessError {
    NotARecord,
    Missing,
}

impl From<NativeType> for DType {
    fn from(ty: NativeType) -> Self {
        DType::Native(ty)
    }
}

impl From<ForeignType> for DType {
    fn from(ty: ForeignType) -> Self {
        DType::Foreign(Arc::new(ty))
    }
}

impl FromStr for DType {
    type Err = UnknownDTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<NativeType>().map(DType::Native)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
