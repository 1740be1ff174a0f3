// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type discovery and schema document tests.
//!
//! These run the full bootstrap against definition catalogs and check the
//! registry and the installed schema document.

mod common;

use common::{bootstrap_catalog, bootstrap_fixtures};
use rosua::dictionary::{parse_document, TypeRef};
use rosua::schema::{is_builtin, TypeClass};
use rosua::{BridgeConfig, MsgCatalog, VariantType};

#[test]
fn test_point_end_to_end() {
    let mut catalog = MsgCatalog::new();
    catalog.add_class(TypeClass::new("Point").field("x", "float32").field("y", "float32"));

    let (_, types) = bootstrap_catalog(&catalog, &BridgeConfig::default());
    let mapping = types.mapping();
    assert_eq!(mapping.len(), 1);
    assert!(mapping.contains_key("Point"));

    let document = parse_document(&types.schema_document).unwrap();
    assert_eq!(document.structured_types.len(), 1);
    let point = &document.structured_types[0];
    assert_eq!(point.name, "Point");
    assert_eq!(point.fields.len(), 2);
    for field in &point.fields {
        assert_eq!(TypeRef::parse(&field.type_name), TypeRef::Builtin(VariantType::Float));
        assert!(field.length_field.is_none());
    }
}

#[test]
fn test_ghost_root_is_skipped() {
    let mut catalog = MsgCatalog::new();
    catalog.add_broken("Ghost", "package not built");
    catalog.add_class(TypeClass::new("Real").field("v", "int32"));

    let (_, types) = bootstrap_catalog(&catalog, &BridgeConfig::default());
    let mapping = types.mapping();
    assert!(!mapping.contains_key("Ghost"));
    assert!(mapping.contains_key("Real"));
}

#[test]
fn test_mutual_reference_registered_once() {
    let (space, types) = bootstrap_fixtures();
    let registry = &types.registry;

    let ping = registry.get("demo_msgs/Ping").unwrap();
    let pong = registry.get("demo_msgs/Pong").unwrap();
    assert_eq!(ping.fields[1].base_type, "demo_msgs/Pong");
    assert_eq!(pong.fields[1].base_type, "demo_msgs/Ping");
    assert_ne!(ping.type_id, pong.type_id);

    assert_eq!(space.type_id("demo_msgs/Ping"), Some(&ping.type_id));
    assert_eq!(registry.iter().filter(|d| d.name == "demo_msgs/Ping").count(), 1);
}

#[test]
fn test_fixture_registration_order() {
    let (_, types) = bootstrap_fixtures();
    let names: Vec<&str> = types.registry.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "demo_msgs/Cloud",
            "std_msgs/Header",
            "geometry_msgs/Point",
            "demo_msgs/Ping",
            "demo_msgs/Pong",
            "geometry_msgs/Pose",
            "geometry_msgs/Quaternion",
            "geometry_msgs/PoseStamped",
            "demo_msgs/SetTargetRequest",
            "demo_msgs/SetTargetResponse",
        ]
    );

    let document = parse_document(&types.schema_document).unwrap();
    let written: Vec<&str> = document
        .structured_types
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(written, names);
}

#[test]
fn test_completeness() {
    let (_, types) = bootstrap_fixtures();
    for descriptor in types.registry.iter() {
        for field in &descriptor.fields {
            assert!(
                is_builtin(&field.base_type) || types.registry.contains(&field.base_type),
                "{}.{} refers to unregistered {}",
                descriptor.name,
                field.name,
                field.base_type
            );
        }
    }
}

#[test]
fn test_broken_fixture_is_absent() {
    let (_, types) = bootstrap_fixtures();
    assert!(!types.registry.contains("demo_msgs/Broken"));
}

#[test]
fn test_array_fields_in_document() {
    let (_, types) = bootstrap_fixtures();
    let cloud = types.registry.get("demo_msgs/Cloud").unwrap();
    let flags: Vec<(&str, bool)> = cloud
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.is_array))
        .collect();
    assert_eq!(
        flags,
        vec![
            ("header", false),
            ("points", true),
            ("tag", true),
            ("timeout", false)
        ]
    );

    let document = parse_document(&types.schema_document).unwrap();
    let members = document
        .structured_type("demo_msgs/Cloud")
        .unwrap()
        .members();
    assert_eq!(members.len(), 4);
    assert_eq!(
        members[1].type_ref,
        TypeRef::Structured("geometry_msgs/Point".into())
    );
    assert!(members[1].is_array);
    assert_eq!(members[2].type_ref, TypeRef::Builtin(VariantType::Byte));
    assert_eq!(members[3].type_ref, TypeRef::Builtin(VariantType::DateTime));
}

#[test]
fn test_service_types_are_flat() {
    let (_, types) = bootstrap_fixtures();
    let request = types.registry.get("demo_msgs/SetTargetRequest").unwrap();
    let response = types.registry.get("demo_msgs/SetTargetResponse").unwrap();
    assert_eq!(request.fields.len(), 2);
    assert_eq!(request.fields[0].base_type, "geometry_msgs/Point");
    assert_eq!(response.fields[1].name, "message");
}

#[test]
fn test_document_uses_config_names() {
    let config = BridgeConfig::from_file(common::fixture_path("bridge.toml")).unwrap();
    let (_, types) = bootstrap_catalog(&common::fixture_catalog(), &config);

    let text = String::from_utf8(types.schema_document.clone()).unwrap();
    assert!(text.contains("TargetNamespace=\"urn:rosua:test\""));
    assert!(types
        .mapping()
        .values()
        .all(|id| id.namespace() == 3));
}
