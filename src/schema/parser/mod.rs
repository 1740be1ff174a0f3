// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS `.msg` / `.srv` definition parser using Pest.
//!
//! The format supports:
//! - One `type name` declaration per line
//! - Array types: T[] (dynamic) or T[n] (fixed)
//! - Nested types: package/MessageName or MessageName
//! - Constants (`type NAME=value`), which are skipped
//! - Default values (`type name value`), which are ignored
//! - Comments (# style)
//! - `---` separating service request and response

use pest::Parser;
use pest_derive::Parser;

use crate::core::{BridgeError, Result};
use crate::schema::ast::RawField;

/// Pest parser for ROS definition text.
#[derive(Parser)]
#[grammar = "schema/parser/msg.pest"] // Path relative to src/ directory
pub struct MsgParser;

/// Parse definition text into sections of fields split at `---`.
///
/// Field type strings are returned exactly as written.
pub fn parse_sections(name: &str, definition: &str) -> Result<Vec<Vec<RawField>>> {
    let pairs = MsgParser::parse(Rule::definition, definition)
        .map_err(|e| BridgeError::parse(format!("definition of {name}"), format!("{e}")))?;

    let mut sections = vec![Vec::new()];
    for pair in pairs {
        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::field => {
                    let mut inner = item.into_inner();
                    let (Some(field_type), Some(field_name)) = (inner.next(), inner.next()) else {
                        continue;
                    };
                    if let Some(current) = sections.last_mut() {
                        current.push(RawField::new(field_name.as_str(), field_type.as_str()));
                    }
                }
                Rule::separator => sections.push(Vec::new()),
                // Constants are not part of the instance layout
                _ => {}
            }
        }
    }
    Ok(sections)
}

/// Parse a `.msg` definition.
pub fn parse_message(name: &str, definition: &str) -> Result<Vec<RawField>> {
    let mut sections = parse_sections(name, definition)?;
    if sections.len() != 1 {
        return Err(BridgeError::invalid_schema(
            name,
            "message definition must not contain '---'",
        ));
    }
    Ok(sections.remove(0))
}

/// Parse a `.srv` definition into request and response fields.
pub fn parse_service(name: &str, definition: &str) -> Result<(Vec<RawField>, Vec<RawField>)> {
    let sections = parse_sections(name, definition)?;
    let [request, response]: [Vec<RawField>; 2] = sections.try_into().map_err(|s: Vec<_>| {
        BridgeError::invalid_schema(
            name,
            format!("service definition needs exactly one '---', found {}", s.len() - 1),
        )
    })?;
    Ok((request, response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_message() {
        let fields = parse_message("test/Msg", "int32 value").unwrap();
        assert_eq!(fields, vec![RawField::new("value", "int32")]);
    }

    #[test]
    fn test_parse_multiple_fields_with_comments() {
        let msg = "# A point\nfloat32 x  # abscissa\n\nfloat32 y\n";
        let fields = parse_message("test/Point", msg).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "x");
        assert_eq!(fields[1].name, "y");
    }

    #[test]
    fn test_parse_arrays() {
        let fields = parse_message("test/Arr", "int32[] values\nfloat64[36] covariance").unwrap();
        assert_eq!(fields[0].type_string, "int32[]");
        assert_eq!(fields[1].type_string, "float64[36]");
    }

    #[test]
    fn test_parse_nested_types() {
        let msg = "Header header\ngeometry_msgs/Pose pose";
        let fields = parse_message("nav_msgs/Odometry", msg).unwrap();
        assert_eq!(fields[0].type_string, "Header");
        assert_eq!(fields[1].type_string, "geometry_msgs/Pose");
    }

    #[test]
    fn test_constants_are_skipped() {
        let msg = "byte DEBUG=1\nbyte INFO = 2\nstring NAME=a # b\nbyte level";
        let fields = parse_message("rosgraph_msgs/Log", msg).unwrap();
        assert_eq!(fields, vec![RawField::new("level", "byte")]);
    }

    #[test]
    fn test_default_values_are_ignored() {
        let fields = parse_message("test/Defaults", "int32 count 5\nstring label").unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], RawField::new("count", "int32"));
    }

    #[test]
    fn test_windows_line_endings() {
        let fields = parse_message("test/Crlf", "int8 a\r\nint8 b\r\n").unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_parse_service() {
        let srv = "bool data\n---\nbool success\nstring message\n";
        let (request, response) = parse_service("std_srvs/SetBool", srv).unwrap();
        assert_eq!(request, vec![RawField::new("data", "bool")]);
        assert_eq!(response.len(), 2);
        assert_eq!(response[1].name, "message");
    }

    #[test]
    fn test_parse_empty_service() {
        let (request, response) = parse_service("std_srvs/Empty", "---\n").unwrap();
        assert!(request.is_empty());
        assert!(response.is_empty());
    }

    #[test]
    fn test_service_without_separator_is_invalid() {
        let err = parse_service("bad/Srv", "int32 a").unwrap_err();
        assert!(matches!(err, BridgeError::InvalidSchema { .. }));
    }

    #[test]
    fn test_message_with_separator_is_invalid() {
        assert!(parse_message("bad/Msg", "int32 a\n---\nint32 b").is_err());
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = parse_message("bad/Msg", "int32 [] broken !!").unwrap_err();
        assert!(matches!(err, BridgeError::ParseError { .. }));
    }
}
