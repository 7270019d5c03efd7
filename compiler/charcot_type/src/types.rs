// IR value types and the mapping from source type names.

use std::fmt;

use crate::domain::RecordKind;

/// The type of an IR value, as spelled in the emitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrType {
    Void,
    /// `i1`
    Bool,
    /// `i32`
    Int,
    /// `float`
    Float,
    /// `i8*`, used for strings and anything without a better type
    Opaque,
    /// `i8**`, the runtime's array handle
    OpaqueArray,
    /// Pointer to a clinical record struct, e.g. `%Patient*`
    Record(RecordKind),
}

impl IrType {
    /// Maps a declared type name. Unknown names are opaque pointers.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "int" => IrType::Int,
            "float" => IrType::Float,
            "string" => IrType::Opaque,
            "bool" => IrType::Bool,
            "date" => IrType::Int,
            "measurement" => IrType::Float,
            other => RecordKind::from_type_name(other)
                .map(IrType::Record)
                .unwrap_or(IrType::Opaque),
        }
    }

    /// Maps an optional annotation; a missing one is an opaque pointer.
    pub fn from_annotation(annotation: Option<&str>) -> Self {
        annotation.map_or(IrType::Opaque, IrType::from_type_name)
    }

    pub fn is_pointer(self) -> bool {
        matches!(self, IrType::Opaque | IrType::OpaqueArray | IrType::Record(_))
    }

    /// The zero value used for fresh globals
    pub fn zero_value(self) -> &'static str {
        "zeroinitializer"
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Void => f.write_str("void"),
            IrType::Bool => f.write_str("i1"),
            IrType::Int => f.write_str("i32"),
            IrType::Float => f.write_str("float"),
            IrType::Opaque => f.write_str("i8*"),
            IrType::OpaqueArray => f.write_str("i8**"),
            IrType::Record(kind) => write!(f, "%{}*", kind.name()),
        }
    }
}
