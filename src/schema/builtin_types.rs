// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Mapping of ROS primitive field types to address-space built-in types.
//!
//! Any field type name found here is a primitive; every other name is a
//! structured message type that must be registered by the schema walker.
//!
//! ```text
//! bool            -> Boolean
//! int8, byte      -> SByte      (byte is the deprecated alias of int8)
//! uint8, char     -> Byte       (char is the deprecated alias of uint8)
//! int16 .. uint64 -> Int16 .. UInt64
//! float32         -> Float
//! float64         -> Double
//! string          -> String
//! time, duration  -> DateTime
//! ```

use crate::core::value::{MessageValue, RosDuration, RosTime};
use crate::opcua::types::VariantType;

/// ROS primitive names and their built-in counterparts.
pub const BUILTIN_TYPES: &[(&str, VariantType)] = &[
    ("bool", VariantType::Boolean),
    ("int8", VariantType::SByte),
    ("byte", VariantType::SByte),
    ("uint8", VariantType::Byte),
    ("char", VariantType::Byte),
    ("int16", VariantType::Int16),
    ("uint16", VariantType::UInt16),
    ("int32", VariantType::Int32),
    ("uint32", VariantType::UInt32),
    ("int64", VariantType::Int64),
    ("uint64", VariantType::UInt64),
    ("float32", VariantType::Float),
    ("float64", VariantType::Double),
    ("string", VariantType::String),
    ("time", VariantType::DateTime),
    ("duration", VariantType::DateTime),
];

/// Built-in type for a ROS primitive name.
pub fn variant_type_for(ros_type: &str) -> Option<VariantType> {
    BUILTIN_TYPES
        .iter()
        .find(|(name, _)| *name == ros_type)
        .map(|(_, vt)| *vt)
}

/// Check if a ROS type name is a primitive.
pub fn is_builtin(ros_type: &str) -> bool {
    variant_type_for(ros_type).is_some()
}

/// Zero value of a ROS primitive, as a fresh message field holds it.
pub fn default_value(ros_type: &str) -> Option<MessageValue> {
    let value = match ros_type {
        "bool" => MessageValue::Bool(false),
        "int8" | "byte" => MessageValue::Int8(0),
        "uint8" | "char" => MessageValue::UInt8(0),
        "int16" => MessageValue::Int16(0),
        "uint16" => MessageValue::UInt16(0),
        "int32" => MessageValue::Int32(0),
        "uint32" => MessageValue::UInt32(0),
        "int64" => MessageValue::Int64(0),
        "uint64" => MessageValue::UInt64(0),
        "float32" => MessageValue::Float32(0.0),
        "float64" => MessageValue::Float64(0.0),
        "string" => MessageValue::String(String::new()),
        "time" => MessageValue::Time(RosTime::default()),
        "duration" => MessageValue::Duration(RosDuration::default()),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values_cover_table() {
        for (name, _) in BUILTIN_TYPES {
            assert!(default_value(name).is_some(), "no default for {name}");
        }
        assert_eq!(default_value("char"), Some(MessageValue::UInt8(0)));
        assert_eq!(default_value("pkg/Point"), None);
    }

    #[test]
    fn test_integer_mappings() {
        assert_eq!(variant_type_for("int8"), Some(VariantType::SByte));
        assert_eq!(variant_type_for("uint8"), Some(VariantType::Byte));
        assert_eq!(variant_type_for("int64"), Some(VariantType::Int64));
        assert_eq!(variant_type_for("uint32"), Some(VariantType::UInt32));
    }

    #[test]
    fn test_deprecated_aliases() {
        assert_eq!(variant_type_for("byte"), variant_type_for("int8"));
        assert_eq!(variant_type_for("char"), variant_type_for("uint8"));
    }

    #[test]
    fn test_float_and_temporal_mappings() {
        assert_eq!(variant_type_for("float32"), Some(VariantType::Float));
        assert_eq!(variant_type_for("float64"), Some(VariantType::Double));
        assert_eq!(variant_type_for("time"), Some(VariantType::DateTime));
        assert_eq!(variant_type_for("duration"), Some(VariantType::DateTime));
    }

    #[test]
    fn test_non_primitives() {
        assert!(!is_builtin("std_msgs/Header"));
        assert!(!is_builtin("Header"));
        assert!(!is_builtin("int32[]"));
        assert!(is_builtin("string"));
    }

    #[test]
    fn test_table_has_no_duplicates() {
        let mut names: Vec<&str> = BUILTIN_TYPES.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILTIN_TYPES.len());
    }
}
