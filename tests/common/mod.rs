// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use rosua::{
    create_ros_data_types, AddressSpace, BridgeConfig, MemoryAddressSpace, MessageInstance,
    MessageValue, MsgCatalog, NodeId, RosDataTypes, TypeRegistry,
};

// ============================================================================
// Fixtures
// ============================================================================

/// Get the path to a test fixture file or directory.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Catalog of every definition under `tests/fixtures/msgs`.
pub fn fixture_catalog() -> MsgCatalog {
    let mut catalog = MsgCatalog::new();
    catalog
        .load_dir(&fixture_path("msgs"))
        .expect("fixture definitions load");
    catalog
}

/// Bootstrap an in-memory address space from the fixture definitions.
pub fn bootstrap_fixtures() -> (MemoryAddressSpace, RosDataTypes) {
    bootstrap_catalog(&fixture_catalog(), &BridgeConfig::default())
}

/// Bootstrap an in-memory address space from an arbitrary catalog.
pub fn bootstrap_catalog(
    catalog: &MsgCatalog,
    config: &BridgeConfig,
) -> (MemoryAddressSpace, RosDataTypes) {
    let mut space = MemoryAddressSpace::new(config.namespace_index)
        .with_placeholder_suffix(config.placeholder_suffix.clone());
    let types = create_ros_data_types(catalog, &mut space, config).expect("bootstrap succeeds");
    (space, types)
}

// ============================================================================
// Node helpers
// ============================================================================

/// Child of `node` with the given browse name.
pub fn child<S: AddressSpace>(space: &S, node: &NodeId, name: &str) -> NodeId {
    space
        .children(node, None)
        .unwrap()
        .into_iter()
        .find(|c| space.browse_name(c).unwrap().name == name)
        .unwrap_or_else(|| panic!("{node} has no child named {name}"))
}

/// Node reached by following a dotted browse path from `node`.
pub fn descend<S: AddressSpace>(space: &S, node: &NodeId, path: &str) -> NodeId {
    path.split('.')
        .fold(node.clone(), |current, name| child(space, &current, name))
}

/// Every node of the subtree below `root`, root included.
pub fn subtree<S: AddressSpace>(space: &S, root: &NodeId) -> Vec<NodeId> {
    let mut out = vec![root.clone()];
    let mut i = 0;
    while i < out.len() {
        let children = space.children(&out[i], None).unwrap();
        out.extend(children);
        i += 1;
    }
    out
}

/// Number of nodes in the subtree still typed by an unresolved placeholder.
pub fn unresolved_placeholders<S: AddressSpace>(
    space: &S,
    registry: &TypeRegistry,
    root: &NodeId,
    suffix: &str,
) -> usize {
    subtree(space, root)
        .iter()
        .filter(|n| {
            let type_definition = space.type_definition(n).unwrap();
            registry.resolve_placeholder(&type_definition, suffix).is_some()
                && space.children(n, None).unwrap().is_empty()
        })
        .count()
}

// ============================================================================
// Message helpers
// ============================================================================

/// Set a field of a nested message by dotted path.
pub fn set_path(message: &mut MessageInstance, path: &str, value: MessageValue) {
    let mut parts: Vec<&str> = path.split('.').collect();
    let last = parts.pop().expect("non-empty path");
    let mut current = message;
    for part in parts {
        current = current
            .get_mut(part)
            .and_then(MessageValue::as_struct_mut)
            .unwrap_or_else(|| panic!("no nested message at {part}"));
    }
    assert!(current.set(last, value), "no field {last}");
}

/// Field of a nested message by dotted path.
pub fn get_path<'a>(message: &'a MessageInstance, path: &str) -> &'a MessageValue {
    let mut parts: Vec<&str> = path.split('.').collect();
    let last = parts.pop().expect("non-empty path");
    let mut current = message;
    for part in parts {
        current = current
            .get(part)
            .and_then(MessageValue::as_struct)
            .unwrap_or_else(|| panic!("no nested message at {part}"));
    }
    current
        .get(last)
        .unwrap_or_else(|| panic!("no field {last}"))
}
