//! Constructors for foreign descriptors.
//!
//! Records use C struct layout: each field is placed at the next multiple of
//! its alignment and the total size is padded to the record's alignment.

use super::{DType, DTypeKind, Field, ForeignType, NativeType};
use num_integer::Integer;

/// Lane names shared by every vector type, beyond the `s0..sN` aliases.
const VECTOR_COMPONENTS: [&str; 4] = ["x", "y", "z", "w"];

impl DType {
    /// Build a record type with C layout from `(name, dtype)` pairs.
    pub fn record<N, I>(name: impl Into<String>, fields: I) -> DType
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, DType)>,
    {
        let mut offset = 0usize;
        let mut alignment = 1usize;
        let mut laid_out = Vec::new();

        for (field_name, dtype) in fields {
            let field_align = dtype.alignment().max(1);
            offset = Integer::next_multiple_of(&offset, &field_align);
            alignment = alignment.max(field_align);
            let size = dtype.itemsize();
            laid_out.push(Field {
                name: field_name.into(),
                dtype,
                offset,
            });
            offset += size;
        }

        DType::from(ForeignType {
            name: name.into(),
            kind: DTypeKind::Record,
            itemsize: Integer::next_multiple_of(&offset, &alignment),
            alignment,
            fields: laid_out,
        })
    }

    /// Build a vector type of `count` lanes, named like `float4`.
    ///
    /// The first four lanes are reachable as `x y z w`, every lane as
    /// `s0..sN`. Three-lane vectors occupy the storage of four.
    pub fn vector(element: NativeType, count: usize) -> DType {
        let padded = if count == 3 { 4 } else { count };
        let elem_size = element.itemsize();
        let elem_dtype = DType::Native(element);

        let mut fields: Vec<Field> = VECTOR_COMPONENTS
            .iter()
            .take(count)
            .enumerate()
            .map(|(lane, name)| Field {
                name: (*name).to_string(),
                dtype: elem_dtype.clone(),
                offset: lane * elem_size,
            })
            .collect();
        fields.extend((0..count).map(|lane| Field {
            name: format!("s{lane}"),
            dtype: elem_dtype.clone(),
            offset: lane * elem_size,
        }));

        let itemsize = padded * elem_size;
        DType::from(ForeignType {
            name: format!("{}{count}", vector_base_name(element)),
            kind: DTypeKind::Vector,
            itemsize,
            alignment: itemsize,
            fields,
        })
    }

    /// Build an opaque type of the given size, aligned to its size.
    pub fn opaque(name: impl Into<String>, itemsize: usize) -> DType {
        DType::from(ForeignType {
            name: name.into(),
            kind: DTypeKind::Opaque,
            itemsize,
            alignment: itemsize.max(1),
            fields: Vec::new(),
        })
    }
}

fn vector_base_name(element: NativeType) -> &'static str {
    match element {
        NativeType::Int8 => "char",
        NativeType::UInt8 => "uchar",
        NativeType::Int16 => "short",
        NativeType::UInt16 => "ushort",
        NativeType::Int32 => "int",
        NativeType::UInt32 => "uint",
        NativeType::Int64 => "long",
        NativeType::UInt64 => "ulong",
        NativeType::Float16 => "half",
        NativeType::Float32 => "float",
        NativeType::Float64 => "double",
        NativeType::Complex64 => "cfloat",
        NativeType::Complex128 => "cdouble",
    }
}
