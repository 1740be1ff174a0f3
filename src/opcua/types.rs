// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Address-space value and identifier types.

use std::fmt;

use chrono::{DateTime, Utc};

/// Identifier of a node or type in the address space.
///
/// Numeric identifiers denote concrete, already-expanded types. String
/// identifiers on a variable's type definition mark a placeholder whose
/// structured type has not been materialized yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Numeric { namespace: u16, id: u32 },
    String { namespace: u16, id: String },
}

impl NodeId {
    pub fn numeric(namespace: u16, id: u32) -> Self {
        NodeId::Numeric { namespace, id }
    }

    pub fn string(namespace: u16, id: impl Into<String>) -> Self {
        NodeId::String {
            namespace,
            id: id.into(),
        }
    }

    /// The standard Objects folder (`i=85`).
    pub fn objects_folder() -> Self {
        NodeId::numeric(0, 85)
    }

    /// `BaseDataVariableType` (`i=63`).
    pub fn base_data_variable_type() -> Self {
        NodeId::numeric(0, 63)
    }

    pub fn namespace(&self) -> u16 {
        match self {
            NodeId::Numeric { namespace, .. } | NodeId::String { namespace, .. } => *namespace,
        }
    }

    /// String identifier, if this is a string node id.
    pub fn as_string_id(&self) -> Option<&str> {
        match self {
            NodeId::String { id, .. } => Some(id),
            NodeId::Numeric { .. } => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, NodeId::String { .. })
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = self.namespace();
        if ns != 0 {
            write!(f, "ns={ns};")?;
        }
        match self {
            NodeId::Numeric { id, .. } => write!(f, "i={id}"),
            NodeId::String { id, .. } => write!(f, "s={id}"),
        }
    }
}

/// Browse name: a name qualified by a namespace index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: u16,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace: u16, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// Node class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Object,
    Variable,
    ObjectType,
    VariableType,
    DataType,
}

/// Built-in scalar types of the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantType {
    Boolean,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    String,
    DateTime,
}

impl VariantType {
    /// Numeric identifier of the built-in data type in namespace 0.
    pub fn type_id(self) -> u32 {
        match self {
            VariantType::Boolean => 1,
            VariantType::SByte => 2,
            VariantType::Byte => 3,
            VariantType::Int16 => 4,
            VariantType::UInt16 => 5,
            VariantType::Int32 => 6,
            VariantType::UInt32 => 7,
            VariantType::Int64 => 8,
            VariantType::UInt64 => 9,
            VariantType::Float => 10,
            VariantType::Double => 11,
            VariantType::String => 12,
            VariantType::DateTime => 13,
        }
    }

    /// Data type node id.
    pub fn data_type(self) -> NodeId {
        NodeId::numeric(0, self.type_id())
    }

    /// Name as used in binary type dictionaries (`opc:<name>`).
    pub fn as_str(self) -> &'static str {
        match self {
            VariantType::Boolean => "Boolean",
            VariantType::SByte => "SByte",
            VariantType::Byte => "Byte",
            VariantType::Int16 => "Int16",
            VariantType::UInt16 => "UInt16",
            VariantType::Int32 => "Int32",
            VariantType::UInt32 => "UInt32",
            VariantType::Int64 => "Int64",
            VariantType::UInt64 => "UInt64",
            VariantType::Float => "Float",
            VariantType::Double => "Double",
            VariantType::String => "String",
            VariantType::DateTime => "DateTime",
        }
    }

    /// Parse a dictionary type name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Boolean" => Some(VariantType::Boolean),
            "SByte" => Some(VariantType::SByte),
            "Byte" => Some(VariantType::Byte),
            "Int16" => Some(VariantType::Int16),
            "UInt16" => Some(VariantType::UInt16),
            "Int32" => Some(VariantType::Int32),
            "UInt32" => Some(VariantType::UInt32),
            "Int64" => Some(VariantType::Int64),
            "UInt64" => Some(VariantType::UInt64),
            "Float" => Some(VariantType::Float),
            "Double" => Some(VariantType::Double),
            "String" => Some(VariantType::String),
            "DateTime" => Some(VariantType::DateTime),
            _ => None,
        }
    }
}

/// Value held by a variable node.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Empty,
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    DateTime(DateTime<Utc>),
    Array(Vec<Variant>),
}

impl Variant {
    /// Default scalar for a built-in type.
    pub fn default_for(variant_type: VariantType) -> Self {
        match variant_type {
            VariantType::Boolean => Variant::Boolean(false),
            VariantType::SByte => Variant::SByte(0),
            VariantType::Byte => Variant::Byte(0),
            VariantType::Int16 => Variant::Int16(0),
            VariantType::UInt16 => Variant::UInt16(0),
            VariantType::Int32 => Variant::Int32(0),
            VariantType::UInt32 => Variant::UInt32(0),
            VariantType::Int64 => Variant::Int64(0),
            VariantType::UInt64 => Variant::UInt64(0),
            VariantType::Float => Variant::Float(0.0),
            VariantType::Double => Variant::Double(0.0),
            VariantType::String => Variant::String(String::new()),
            VariantType::DateTime => Variant::DateTime(DateTime::<Utc>::UNIX_EPOCH),
        }
    }

    /// Scalar type of this value, if it is a scalar.
    pub fn variant_type(&self) -> Option<VariantType> {
        match self {
            Variant::Boolean(_) => Some(VariantType::Boolean),
            Variant::SByte(_) => Some(VariantType::SByte),
            Variant::Byte(_) => Some(VariantType::Byte),
            Variant::Int16(_) => Some(VariantType::Int16),
            Variant::UInt16(_) => Some(VariantType::UInt16),
            Variant::Int32(_) => Some(VariantType::Int32),
            Variant::UInt32(_) => Some(VariantType::UInt32),
            Variant::Int64(_) => Some(VariantType::Int64),
            Variant::UInt64(_) => Some(VariantType::UInt64),
            Variant::Float(_) => Some(VariantType::Float),
            Variant::Double(_) => Some(VariantType::Double),
            Variant::String(_) => Some(VariantType::String),
            Variant::DateTime(_) => Some(VariantType::DateTime),
            Variant::Empty | Variant::Array(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Variant::Array(_))
    }

    /// Try to convert to i128 (integers and booleans only).
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Variant::Boolean(v) => Some(*v as i128),
            Variant::SByte(v) => Some(*v as i128),
            Variant::Byte(v) => Some(*v as i128),
            Variant::Int16(v) => Some(*v as i128),
            Variant::UInt16(v) => Some(*v as i128),
            Variant::Int32(v) => Some(*v as i128),
            Variant::UInt32(v) => Some(*v as i128),
            Variant::Int64(v) => Some(*v as i128),
            Variant::UInt64(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// Try to convert to f64 (numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Variant::Float(v) => Some(*v as f64),
            Variant::Double(v) => Some(*v),
            other => other.as_i128().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Empty => write!(f, "<empty>"),
            Variant::Boolean(v) => write!(f, "{v}"),
            Variant::SByte(v) => write!(f, "{v}"),
            Variant::Byte(v) => write!(f, "{v}"),
            Variant::Int16(v) => write!(f, "{v}"),
            Variant::UInt16(v) => write!(f, "{v}"),
            Variant::Int32(v) => write!(f, "{v}"),
            Variant::UInt32(v) => write!(f, "{v}"),
            Variant::Int64(v) => write!(f, "{v}"),
            Variant::UInt64(v) => write!(f, "{v}"),
            Variant::Float(v) => write!(f, "{v}"),
            Variant::Double(v) => write!(f, "{v}"),
            Variant::String(s) => write!(f, "{s}"),
            Variant::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Variant::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::objects_folder().to_string(), "i=85");
        assert_eq!(NodeId::numeric(2, 7).to_string(), "ns=2;i=7");
        assert_eq!(
            NodeId::string(2, "geometry_msgs/PointType").to_string(),
            "ns=2;s=geometry_msgs/PointType"
        );
    }

    #[test]
    fn test_node_id_string_id() {
        assert_eq!(NodeId::string(1, "abc").as_string_id(), Some("abc"));
        assert!(NodeId::numeric(1, 3).as_string_id().is_none());
    }

    #[test]
    fn test_variant_type_round_trip_name() {
        for vt in [
            VariantType::Boolean,
            VariantType::Int32,
            VariantType::Double,
            VariantType::DateTime,
        ] {
            assert_eq!(VariantType::parse(vt.as_str()), Some(vt));
        }
        assert_eq!(VariantType::parse("Point"), None);
        assert_eq!(VariantType::Float.data_type(), NodeId::numeric(0, 10));
    }

    #[test]
    fn test_variant_defaults() {
        assert_eq!(Variant::default_for(VariantType::Int32), Variant::Int32(0));
        assert_eq!(
            Variant::default_for(VariantType::String),
            Variant::String(String::new())
        );
        assert_eq!(
            Variant::default_for(VariantType::DateTime).variant_type(),
            Some(VariantType::DateTime)
        );
    }

    #[test]
    fn test_variant_numeric_views() {
        assert_eq!(Variant::UInt64(7).as_i128(), Some(7));
        assert_eq!(Variant::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Variant::String("x".into()).as_f64(), None);
        assert_eq!(
            Variant::Array(vec![Variant::Byte(1), Variant::Byte(2)]).to_string(),
            "[1, 2]"
        );
    }
}
