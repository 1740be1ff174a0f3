// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `serde` structures mapping the binary type dictionary XML.
//!
//! These mirror the `opc:TypeDictionary` schema closely enough for
//! `quick-xml` to write and read back the documents produced by
//! [`TypeDictionaryBuilder`](super::TypeDictionaryBuilder).

#![allow(clippy::pedantic)] // XML schema naming conventions differ from Rust

use serde::{Deserialize, Serialize};

use crate::opcua::types::VariantType;

pub const OPC_BINARY_NS: &str = "http://opcfoundation.org/BinarySchema/";
pub const OPC_UA_NS: &str = "http://opcfoundation.org/UA/";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Prefix for built-in field types.
pub const BUILTIN_PREFIX: &str = "opc:";
/// Prefix for structured field types defined in the same dictionary.
pub const TARGET_PREFIX: &str = "tns:";
/// Prefix of generated array length fields.
pub const LENGTH_FIELD_PREFIX: &str = "NoOf";

/// Root `<opc:TypeDictionary>` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "opc:TypeDictionary")]
pub struct TypeDictionary {
    #[serde(rename = "@xmlns:opc", default)]
    pub xmlns_opc: String,

    #[serde(rename = "@xmlns:xsi", default)]
    pub xmlns_xsi: String,

    #[serde(rename = "@xmlns:ua", default)]
    pub xmlns_ua: String,

    #[serde(rename = "@xmlns:tns", default)]
    pub xmlns_tns: String,

    #[serde(rename = "@DefaultByteOrder", default)]
    pub default_byte_order: String,

    #[serde(rename = "@TargetNamespace", default)]
    pub target_namespace: String,

    #[serde(
        rename(serialize = "opc:Import", deserialize = "Import"),
        alias = "opc:Import",
        default
    )]
    pub imports: Vec<Import>,

    #[serde(
        rename(serialize = "opc:StructuredType", deserialize = "StructuredType"),
        alias = "opc:StructuredType",
        default
    )]
    pub structured_types: Vec<StructuredType>,
}

impl TypeDictionary {
    pub fn new(target_namespace: impl Into<String>) -> Self {
        let target_namespace = target_namespace.into();
        Self {
            xmlns_opc: OPC_BINARY_NS.into(),
            xmlns_xsi: XSI_NS.into(),
            xmlns_ua: OPC_UA_NS.into(),
            xmlns_tns: target_namespace.clone(),
            default_byte_order: "LittleEndian".into(),
            target_namespace,
            imports: vec![Import {
                namespace: OPC_UA_NS.into(),
            }],
            structured_types: Vec::new(),
        }
    }

    pub fn structured_type(&self, name: &str) -> Option<&StructuredType> {
        self.structured_types.iter().find(|s| s.name == name)
    }
}

/// `<opc:Import Namespace=".."/>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    #[serde(rename = "@Namespace")]
    pub namespace: String,
}

/// `<opc:StructuredType Name=".." BaseType="..">`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredType {
    #[serde(rename = "@Name")]
    pub name: String,

    #[serde(rename = "@BaseType", default)]
    pub base_type: String,

    #[serde(
        rename(serialize = "opc:Field", deserialize = "Field"),
        alias = "opc:Field",
        default
    )]
    pub fields: Vec<FieldDef>,
}

impl StructuredType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: "ua:ExtensionObject".into(),
            fields: Vec::new(),
        }
    }

    /// Logical members: array length fields folded into their array field.
    pub fn members(&self) -> Vec<Member> {
        let length_fields: Vec<&str> = self
            .fields
            .iter()
            .filter_map(|f| f.length_field.as_deref())
            .collect();

        self.fields
            .iter()
            .filter(|f| !length_fields.contains(&f.name.as_str()))
            .map(|f| Member {
                name: f.name.clone(),
                type_ref: TypeRef::parse(&f.type_name),
                is_array: f.length_field.is_some(),
            })
            .collect()
    }
}

/// `<opc:Field Name=".." TypeName=".." LengthField=".."/>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    #[serde(rename = "@Name")]
    pub name: String,

    #[serde(rename = "@TypeName")]
    pub type_name: String,

    #[serde(rename = "@LengthField", default, skip_serializing_if = "Option::is_none")]
    pub length_field: Option<String>,
}

/// Resolved type of a structure member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Builtin(VariantType),
    Structured(String),
}

impl TypeRef {
    /// Parse a `TypeName` attribute (`opc:Int32`, `tns:geometry_msgs/Point`).
    pub fn parse(type_name: &str) -> Self {
        if let Some(builtin) = type_name
            .strip_prefix(BUILTIN_PREFIX)
            .and_then(VariantType::parse)
        {
            return TypeRef::Builtin(builtin);
        }
        let name = type_name
            .strip_prefix(TARGET_PREFIX)
            .unwrap_or(type_name);
        TypeRef::Structured(name.to_string())
    }

    /// Render as a `TypeName` attribute value.
    pub fn to_type_name(&self) -> String {
        match self {
            TypeRef::Builtin(vt) => format!("{BUILTIN_PREFIX}{}", vt.as_str()),
            TypeRef::Structured(name) => format!("{TARGET_PREFIX}{name}"),
        }
    }
}

/// A logical structure member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub type_ref: TypeRef,
    pub is_array: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_parse() {
        assert_eq!(
            TypeRef::parse("opc:Double"),
            TypeRef::Builtin(VariantType::Double)
        );
        assert_eq!(
            TypeRef::parse("tns:geometry_msgs/Point"),
            TypeRef::Structured("geometry_msgs/Point".into())
        );
        assert_eq!(
            TypeRef::parse("opc:Unknown"),
            TypeRef::Structured("opc:Unknown".into())
        );
    }

    #[test]
    fn test_members_fold_length_fields() {
        let mut st = StructuredType::new("pkg/Cloud");
        st.fields.push(FieldDef {
            name: "NoOfpoints".into(),
            type_name: "opc:Int32".into(),
            length_field: None,
        });
        st.fields.push(FieldDef {
            name: "points".into(),
            type_name: "tns:pkg/Point".into(),
            length_field: Some("NoOfpoints".into()),
        });
        st.fields.push(FieldDef {
            name: "id".into(),
            type_name: "opc:UInt32".into(),
            length_field: None,
        });

        let members = st.members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "points");
        assert!(members[0].is_array);
        assert_eq!(members[1].type_ref, TypeRef::Builtin(VariantType::UInt32));
        assert!(!members[1].is_array);
    }
}
