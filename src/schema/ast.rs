// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type and field descriptors for discovered ROS types.

use crate::opcua::types::NodeId;

/// A field as reported by type introspection: name and raw type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// Field (attribute) name
    pub name: String,
    /// Raw type string, e.g. "float64", "geometry_msgs/Point[]", "uint8[16]"
    pub type_string: String,
}

impl RawField {
    pub fn new(name: impl Into<String>, type_string: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_string: type_string.into(),
        }
    }
}

/// Introspected shape of a message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeClass {
    /// Full type name (e.g. "geometry_msgs/Pose")
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<RawField>,
}

impl TypeClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, builder style.
    pub fn field(mut self, name: impl Into<String>, type_string: impl Into<String>) -> Self {
        self.fields.push(RawField::new(name, type_string));
        self
    }
}

/// Introspected shape of a service type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceClass {
    /// Full service name (e.g. "std_srvs/SetBool")
    pub name: String,
    /// Request message ("<name>Request")
    pub request: TypeClass,
    /// Response message ("<name>Response")
    pub response: TypeClass,
}

/// One field of a registered structured type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Message-system base type name (array marker removed)
    pub base_type: String,
    /// Whether the raw type carried an array marker
    pub is_array: bool,
}

impl FieldDescriptor {
    /// Build a descriptor from a raw introspection field.
    pub fn from_raw(raw: &RawField) -> Self {
        let (base_type, is_array) = split_array_type(&raw.type_string);
        Self {
            name: raw.name.clone(),
            base_type: base_type.to_string(),
            is_array,
        }
    }
}

/// A structured (non-primitive) type registered with the target meta-model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Canonical ROS type name
    pub name: String,
    /// Ordered field list
    pub fields: Vec<FieldDescriptor>,
    /// Identifier assigned by the registrar
    pub type_id: NodeId,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, type_id: NodeId) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            type_id,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Split a raw field type into its base type and array flag.
///
/// ROS arrays are single-dimension, so the string is split at the first
/// `[` when it ends with `]`. Fixed and dynamic arrays are not distinguished.
pub fn split_array_type(type_string: &str) -> (&str, bool) {
    if type_string.ends_with(']') {
        if let Some(pos) = type_string.find('[') {
            return (&type_string[..pos], true);
        }
    }
    (type_string, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_dynamic_array() {
        assert_eq!(split_array_type("int32[]"), ("int32", true));
    }

    #[test]
    fn test_split_fixed_array() {
        assert_eq!(split_array_type("float64[36]"), ("float64", true));
        assert_eq!(
            split_array_type("geometry_msgs/Point[4]"),
            ("geometry_msgs/Point", true)
        );
    }

    #[test]
    fn test_split_scalar() {
        assert_eq!(split_array_type("int32"), ("int32", false));
        assert_eq!(split_array_type("std_msgs/Header"), ("std_msgs/Header", false));
    }

    #[test]
    fn test_split_unterminated_marker_is_scalar() {
        assert_eq!(split_array_type("int32[3"), ("int32[3", false));
    }

    #[test]
    fn test_field_descriptor_from_raw() {
        let field = FieldDescriptor::from_raw(&RawField::new("points", "geometry_msgs/Point[]"));
        assert_eq!(field.name, "points");
        assert_eq!(field.base_type, "geometry_msgs/Point");
        assert!(field.is_array);
    }

    #[test]
    fn test_type_class_builder() {
        let class = TypeClass::new("pkg/Pair").field("a", "int8").field("b", "string");
        assert_eq!(class.fields.len(), 2);
        assert_eq!(class.fields[1], RawField::new("b", "string"));
    }
}
