// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-process address space.
//!
//! [`MemoryAddressSpace`] implements both collaborator traits so the bridge can
//! run without a network server. Structured types become known in two steps,
//! as on a real server: [`create_structured_type`] allocates an id, and
//! [`install_schema_document`] supplies the field lists.
//!
//! Instantiation expands one level only. A scalar field of a structured type
//! is left as a placeholder variable whose type definition is the string id
//! `"<type name><suffix>"`; resolving it is the bridge's job.
//!
//! [`create_structured_type`]: MetaModelRegistrar::create_structured_type
//! [`install_schema_document`]: MetaModelRegistrar::install_schema_document

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::core::{BridgeError, Result};
use crate::dictionary::{parse_document, Member, TypeRef};
use crate::opcua::space::{AddressSpace, MetaModelRegistrar};
use crate::opcua::types::{NodeClass, NodeId, QualifiedName, Variant};

/// Default suffix appended to placeholder type identifiers.
pub const DEFAULT_PLACEHOLDER_SUFFIX: &str = "Type";

#[derive(Debug, Clone)]
struct Node {
    class: NodeClass,
    browse_name: QualifiedName,
    type_definition: NodeId,
    data_type: Option<NodeId>,
    value: Variant,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
struct TypeShape {
    name: String,
    members: Vec<Member>,
    installed: bool,
}

/// Address space held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryAddressSpace {
    namespace: u16,
    placeholder_suffix: String,
    nodes: HashMap<NodeId, Node>,
    types: HashMap<NodeId, TypeShape>,
    type_ids: HashMap<String, NodeId>,
    next_id: u32,
}

impl MemoryAddressSpace {
    /// Create an address space whose own nodes live in `namespace`.
    pub fn new(namespace: u16) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            NodeId::objects_folder(),
            Node {
                class: NodeClass::Object,
                browse_name: QualifiedName::new(0, "Objects"),
                type_definition: NodeId::numeric(0, 61),
                data_type: None,
                value: Variant::Empty,
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            namespace,
            placeholder_suffix: DEFAULT_PLACEHOLDER_SUFFIX.to_string(),
            nodes,
            types: HashMap::new(),
            type_ids: HashMap::new(),
            next_id: 1,
        }
    }

    /// Use a different placeholder suffix.
    pub fn with_placeholder_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.placeholder_suffix = suffix.into();
        self
    }

    pub fn namespace(&self) -> u16 {
        self.namespace
    }

    pub fn placeholder_suffix(&self) -> &str {
        &self.placeholder_suffix
    }

    /// Identifier of a created structured type.
    pub fn type_id(&self, type_name: &str) -> Option<&NodeId> {
        self.type_ids.get(type_name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Data type of a variable, if known.
    pub fn data_type(&self, node: &NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(node, "data_type")?.data_type.clone())
    }

    /// Add a plain folder object under `parent`.
    pub fn add_folder(&mut self, parent: &NodeId, name: &str) -> Result<NodeId> {
        let id = self.allocate();
        self.insert_node(
            id.clone(),
            parent,
            Node {
                class: NodeClass::Object,
                browse_name: QualifiedName::new(self.namespace, name),
                type_definition: NodeId::numeric(0, 61),
                data_type: None,
                value: Variant::Empty,
                parent: None,
                children: Vec::new(),
            },
            "add_folder",
        )?;
        Ok(id)
    }

    /// Render the subtree below `root`, one node per line.
    ///
    /// Leaves show their value; inner nodes show their type definition.
    pub fn render_tree(&self, root: &NodeId) -> Result<String> {
        let mut out = String::new();
        self.render_node(root, 0, &mut out)?;
        Ok(out)
    }

    fn render_node(&self, id: &NodeId, depth: usize, out: &mut String) -> Result<()> {
        let node = self.node(id, "render_tree")?;
        let pad = "  ".repeat(depth);
        let type_label = self
            .types
            .get(&node.type_definition)
            .map(|shape| shape.name.clone())
            .unwrap_or_else(|| node.type_definition.to_string());
        if node.children.is_empty() && node.class == NodeClass::Variable {
            let _ = writeln!(out, "{pad}{} = {}", node.browse_name.name, node.value);
        } else {
            let _ = writeln!(out, "{pad}{} ({type_label})", node.browse_name.name);
        }
        for child in &node.children {
            self.render_node(child, depth + 1, out)?;
        }
        Ok(())
    }

    fn allocate(&mut self) -> NodeId {
        let id = NodeId::numeric(self.namespace, self.next_id);
        self.next_id += 1;
        id
    }

    fn node(&self, id: &NodeId, operation: &str) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| BridgeError::collaborator(operation, id.to_string(), "unknown node"))
    }

    fn node_mut(&mut self, id: &NodeId, operation: &str) -> Result<&mut Node> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| BridgeError::collaborator(operation, id.to_string(), "unknown node"))
    }

    fn insert_node(
        &mut self,
        id: NodeId,
        parent: &NodeId,
        mut node: Node,
        operation: &str,
    ) -> Result<()> {
        if self.nodes.contains_key(&id) {
            return Err(BridgeError::collaborator(
                operation,
                id.to_string(),
                "node id already in use",
            ));
        }
        // A node named like an existing sibling goes right after it, so a
        // replacement keeps its predecessor's position once that is deleted.
        let siblings = &self.node(parent, operation)?.children;
        let position = siblings
            .iter()
            .rposition(|c| {
                self.nodes
                    .get(c)
                    .is_some_and(|n| n.browse_name == node.browse_name)
            })
            .map_or(siblings.len(), |i| i + 1);
        self.node_mut(parent, operation)?
            .children
            .insert(position, id.clone());
        node.parent = Some(parent.clone());
        self.nodes.insert(id, node);
        Ok(())
    }

    fn member_node(&self, member: &Member) -> Node {
        let (type_definition, data_type, value) = match &member.type_ref {
            TypeRef::Builtin(vt) => {
                let value = if member.is_array {
                    Variant::Array(Vec::new())
                } else {
                    Variant::default_for(*vt)
                };
                (NodeId::base_data_variable_type(), Some(vt.data_type()), value)
            }
            // Arrays of messages stay plain array variables
            TypeRef::Structured(name) if member.is_array => (
                NodeId::base_data_variable_type(),
                self.type_ids.get(name).cloned(),
                Variant::Array(Vec::new()),
            ),
            TypeRef::Structured(name) => (
                NodeId::string(self.namespace, format!("{name}{}", self.placeholder_suffix)),
                self.type_ids.get(name).cloned(),
                Variant::Empty,
            ),
        };
        Node {
            class: NodeClass::Variable,
            browse_name: QualifiedName::new(self.namespace, member.name.clone()),
            type_definition,
            data_type,
            value,
            parent: None,
            children: Vec::new(),
        }
    }

    fn remove_subtree(&mut self, id: &NodeId) {
        if let Some(node) = self.nodes.remove(id) {
            for child in node.children {
                self.remove_subtree(&child);
            }
        }
    }
}

impl Default for MemoryAddressSpace {
    fn default() -> Self {
        Self::new(2)
    }
}

impl MetaModelRegistrar for MemoryAddressSpace {
    fn create_structured_type(&mut self, name: &str) -> Result<NodeId> {
        if self.type_ids.contains_key(name) {
            return Err(BridgeError::collaborator(
                "create_structured_type",
                name,
                "type already exists",
            ));
        }
        let id = self.allocate();
        self.type_ids.insert(name.to_string(), id.clone());
        self.types.insert(
            id.clone(),
            TypeShape {
                name: name.to_string(),
                members: Vec::new(),
                installed: false,
            },
        );
        tracing::debug!(type_name = name, type_id = %id, "created structured type");
        Ok(id)
    }

    fn install_schema_document(&mut self, document: &[u8]) -> Result<()> {
        let dictionary = parse_document(document).map_err(|e| {
            BridgeError::collaborator("install_schema_document", "schema document", e.to_string())
        })?;

        for structured in &dictionary.structured_types {
            let id = self.type_ids.get(&structured.name).ok_or_else(|| {
                BridgeError::collaborator(
                    "install_schema_document",
                    structured.name.as_str(),
                    "type was never created",
                )
            })?;
            if let Some(shape) = self.types.get_mut(id) {
                shape.members = structured.members();
                shape.installed = true;
            }
        }
        Ok(())
    }
}

impl AddressSpace for MemoryAddressSpace {
    fn instantiate(
        &mut self,
        parent: &NodeId,
        type_id: &NodeId,
        node_id: Option<NodeId>,
        browse_name: Option<QualifiedName>,
    ) -> Result<Vec<NodeId>> {
        let shape = self.types.get(type_id).ok_or_else(|| {
            BridgeError::collaborator("instantiate", type_id.to_string(), "unknown type")
        })?;
        if !shape.installed {
            return Err(BridgeError::collaborator(
                "instantiate",
                shape.name.as_str(),
                "no schema installed for type",
            ));
        }
        let type_name = shape.name.clone();
        let members = shape.members.clone();

        let root_id = match node_id {
            Some(id) => id,
            None => self.allocate(),
        };
        let short_name = type_name.rsplit('/').next().unwrap_or(&type_name);
        let browse_name =
            browse_name.unwrap_or_else(|| QualifiedName::new(self.namespace, short_name));

        self.insert_node(
            root_id.clone(),
            parent,
            Node {
                class: NodeClass::Variable,
                browse_name,
                type_definition: type_id.clone(),
                data_type: Some(type_id.clone()),
                value: Variant::Empty,
                parent: None,
                children: Vec::new(),
            },
            "instantiate",
        )?;

        let mut created = vec![root_id.clone()];
        for member in &members {
            let child_id = self.allocate();
            let node = self.member_node(member);
            self.insert_node(child_id.clone(), &root_id, node, "instantiate")?;
            created.push(child_id);
        }
        Ok(created)
    }

    fn delete_node(&mut self, node: &NodeId) -> Result<()> {
        if *node == NodeId::objects_folder() {
            return Err(BridgeError::collaborator(
                "delete_node",
                node.to_string(),
                "cannot delete the Objects folder",
            ));
        }
        let parent = self.node(node, "delete_node")?.parent.clone();
        if let Some(parent) = parent {
            if let Some(p) = self.nodes.get_mut(&parent) {
                p.children.retain(|c| c != node);
            }
        }
        self.remove_subtree(node);
        Ok(())
    }

    fn children(&self, node: &NodeId, class: Option<NodeClass>) -> Result<Vec<NodeId>> {
        let parent = self.node(node, "children")?;
        Ok(parent
            .children
            .iter()
            .filter(|c| match class {
                Some(wanted) => self.nodes.get(*c).map(|n| n.class) == Some(wanted),
                None => true,
            })
            .cloned()
            .collect())
    }

    fn node_class(&self, node: &NodeId) -> Result<NodeClass> {
        Ok(self.node(node, "node_class")?.class)
    }

    fn browse_name(&self, node: &NodeId) -> Result<QualifiedName> {
        Ok(self.node(node, "browse_name")?.browse_name.clone())
    }

    fn type_definition(&self, node: &NodeId) -> Result<NodeId> {
        Ok(self.node(node, "type_definition")?.type_definition.clone())
    }

    fn read_value(&self, node: &NodeId) -> Result<Variant> {
        let n = self.node(node, "read_value")?;
        if n.class != NodeClass::Variable {
            return Err(BridgeError::collaborator(
                "read_value",
                node.to_string(),
                "not a variable",
            ));
        }
        Ok(n.value.clone())
    }

    fn write_value(&mut self, node: &NodeId, value: Variant) -> Result<()> {
        let n = self.node_mut(node, "write_value")?;
        if n.class != NodeClass::Variable {
            return Err(BridgeError::collaborator(
                "write_value",
                node.to_string(),
                "not a variable",
            ));
        }
        n.value = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::TypeDictionaryBuilder;
    use crate::opcua::types::VariantType;

    fn space_with_point() -> (MemoryAddressSpace, NodeId) {
        let mut space = MemoryAddressSpace::new(2);
        let mut builder = TypeDictionaryBuilder::new("ROSDictionary", "urn:test");
        let id = builder
            .create_type(&mut space, "geometry_msgs/Point")
            .unwrap();
        builder
            .add_field("float64", "x", "geometry_msgs/Point", false)
            .unwrap();
        builder
            .add_field("float64", "y", "geometry_msgs/Point", false)
            .unwrap();
        let doc = builder.finalize().unwrap();
        space.install_schema_document(&doc).unwrap();
        (space, id)
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut space = MemoryAddressSpace::new(2);
        space.create_structured_type("pkg/A").unwrap();
        let err = space.create_structured_type("pkg/A").unwrap_err();
        assert!(err.is_collaborator());
    }

    #[test]
    fn test_instantiate_before_install_fails() {
        let mut space = MemoryAddressSpace::new(2);
        let id = space.create_structured_type("pkg/A").unwrap();
        let err = space
            .instantiate(&NodeId::objects_folder(), &id, None, None)
            .unwrap_err();
        assert!(err.is_collaborator());
    }

    #[test]
    fn test_instantiate_point() {
        let (mut space, id) = space_with_point();
        let nodes = space
            .instantiate(&NodeId::objects_folder(), &id, None, None)
            .unwrap();
        assert_eq!(nodes.len(), 3);

        let root = &nodes[0];
        assert_eq!(space.browse_name(root).unwrap().name, "Point");
        assert_eq!(space.type_definition(root).unwrap(), id);
        let children = space.variable_children(root).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(space.read_value(&children[0]).unwrap(), Variant::Double(0.0));
        assert_eq!(
            space.data_type(&children[0]).unwrap(),
            Some(VariantType::Double.data_type())
        );
    }

    #[test]
    fn test_explicit_node_id_and_browse_name() {
        let (mut space, id) = space_with_point();
        let wanted = NodeId::string(2, "robot/target");
        let nodes = space
            .instantiate(
                &NodeId::objects_folder(),
                &id,
                Some(wanted.clone()),
                Some(QualifiedName::new(2, "target")),
            )
            .unwrap();
        assert_eq!(nodes[0], wanted);
        assert_eq!(space.browse_name(&wanted).unwrap().name, "target");

        let err = space
            .instantiate(&NodeId::objects_folder(), &id, Some(wanted), None)
            .unwrap_err();
        assert!(err.is_collaborator());
    }

    #[test]
    fn test_delete_is_recursive() {
        let (mut space, id) = space_with_point();
        let before = space.node_count();
        let nodes = space
            .instantiate(&NodeId::objects_folder(), &id, None, None)
            .unwrap();
        space.delete_node(&nodes[0]).unwrap();
        assert_eq!(space.node_count(), before);
        assert!(space
            .children(&NodeId::objects_folder(), None)
            .unwrap()
            .is_empty());
        assert!(space.delete_node(&NodeId::objects_folder()).is_err());
    }

    #[test]
    fn test_write_to_object_fails() {
        let mut space = MemoryAddressSpace::new(2);
        let folder = space.add_folder(&NodeId::objects_folder(), "robot").unwrap();
        assert!(space.write_value(&folder, Variant::Int32(1)).is_err());
        assert_eq!(
            space.children(&NodeId::objects_folder(), Some(NodeClass::Object)).unwrap(),
            vec![folder]
        );
    }

    #[test]
    fn test_install_unknown_type_fails() {
        let mut other = MemoryAddressSpace::new(2);
        let mut builder = TypeDictionaryBuilder::new("ROSDictionary", "urn:test");
        builder.create_type(&mut other, "pkg/Only").unwrap();
        let doc = builder.finalize().unwrap();

        let mut space = MemoryAddressSpace::new(2);
        assert!(space.install_schema_document(&doc).is_err());
    }

    #[test]
    fn test_render_tree() {
        let (mut space, id) = space_with_point();
        let nodes = space
            .instantiate(&NodeId::objects_folder(), &id, None, None)
            .unwrap();
        let text = space.render_tree(&nodes[0]).unwrap();
        assert_eq!(text, "Point (geometry_msgs/Point)\n  x = 0\n  y = 0\n");
    }
}
