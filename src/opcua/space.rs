// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Collaborator traits for the live server.
//!
//! The bridge never talks to a server directly. It drives these traits, and
//! every failure they report propagates unchanged to the caller of the bridge
//! entry point (as [`BridgeError::Collaborator`](crate::BridgeError)).

use crate::core::Result;
use crate::opcua::types::{NodeClass, NodeId, QualifiedName, Variant};

/// Registers structured data types with the server's meta-model.
pub trait MetaModelRegistrar {
    /// Create an empty structured data type and return its identifier.
    fn create_structured_type(&mut self, name: &str) -> Result<NodeId>;

    /// Install a finalized schema document into the live meta-model.
    fn install_schema_document(&mut self, document: &[u8]) -> Result<()>;
}

/// Node-level access to the server's address space.
pub trait AddressSpace {
    /// Materialize the declared shape of `type_id` under `parent`.
    ///
    /// Returns the created nodes; the first one is the root of the new
    /// subtree. Implementations may expand only one level, leaving nested
    /// structured fields as placeholder variables.
    fn instantiate(
        &mut self,
        parent: &NodeId,
        type_id: &NodeId,
        node_id: Option<NodeId>,
        browse_name: Option<QualifiedName>,
    ) -> Result<Vec<NodeId>>;

    /// Delete a node and everything below it.
    fn delete_node(&mut self, node: &NodeId) -> Result<()>;

    /// List the children of a node, optionally only those of one class.
    fn children(&self, node: &NodeId, class: Option<NodeClass>) -> Result<Vec<NodeId>>;

    fn node_class(&self, node: &NodeId) -> Result<NodeClass>;

    fn browse_name(&self, node: &NodeId) -> Result<QualifiedName>;

    /// Declared type of the node.
    fn type_definition(&self, node: &NodeId) -> Result<NodeId>;

    /// Read a variable's scalar or array value.
    fn read_value(&self, node: &NodeId) -> Result<Variant>;

    /// Write a variable's scalar or array value.
    fn write_value(&mut self, node: &NodeId, value: Variant) -> Result<()>;

    /// Variable children of a node.
    fn variable_children(&self, node: &NodeId) -> Result<Vec<NodeId>> {
        self.children(node, Some(NodeClass::Variable))
    }
}
