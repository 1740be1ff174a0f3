// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Node instantiation with placeholder resolution.
//!
//! The address space may expand a structured type one level deep only,
//! leaving nested message fields as placeholder variables typed by a string
//! identifier. [`NodeInstantiator`] replaces every such placeholder with a
//! concrete subtree of the registered type, depth first, so the returned
//! subtree holds no placeholder it could have resolved.

use crate::core::{BridgeError, Result};
use crate::opcua::memory::DEFAULT_PLACEHOLDER_SUFFIX;
use crate::opcua::space::AddressSpace;
use crate::opcua::types::{NodeClass, NodeId, QualifiedName};
use crate::schema::ast::TypeDescriptor;

use super::registry::TypeRegistry;

/// Instantiates registered types and resolves their placeholders.
#[derive(Debug, Clone)]
pub struct NodeInstantiator<'a> {
    registry: &'a TypeRegistry,
    placeholder_suffix: &'a str,
}

impl<'a> NodeInstantiator<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            placeholder_suffix: DEFAULT_PLACEHOLDER_SUFFIX,
        }
    }

    pub fn with_placeholder_suffix(mut self, suffix: &'a str) -> Self {
        self.placeholder_suffix = suffix;
        self
    }

    /// Instantiate `type_id` under `parent` and return the root of the
    /// resolved subtree.
    pub fn instantiate<S>(
        &self,
        space: &mut S,
        parent: &NodeId,
        type_id: &NodeId,
        node_id: Option<NodeId>,
        browse_name: Option<QualifiedName>,
    ) -> Result<NodeId>
    where
        S: AddressSpace + ?Sized,
    {
        let root = first_created(space.instantiate(parent, type_id, node_id, browse_name)?, type_id)?;
        let mut expanding = vec![type_id.clone()];
        self.resolve(space, &root, &mut expanding)?;
        Ok(root)
    }

    /// Registered type `node` is a placeholder for, if any.
    pub fn placeholder_type<S>(&self, space: &S, node: &NodeId) -> Result<Option<&'a TypeDescriptor>>
    where
        S: AddressSpace + ?Sized,
    {
        if space.node_class(node)? != NodeClass::Variable {
            return Ok(None);
        }
        let type_definition = space.type_definition(node)?;
        Ok(self
            .registry
            .resolve_placeholder(&type_definition, self.placeholder_suffix))
    }

    // `expanding` holds the types on the path from the root; a placeholder for
    // one of them would expand forever and is left in place.
    fn resolve<S>(&self, space: &mut S, node: &NodeId, expanding: &mut Vec<NodeId>) -> Result<()>
    where
        S: AddressSpace + ?Sized,
    {
        let children = space.children(node, None)?;
        for child in children {
            let Some(descriptor) = self.placeholder_type(space, &child)? else {
                self.resolve(space, &child, expanding)?;
                continue;
            };
            if expanding.contains(&descriptor.type_id) {
                tracing::warn!(
                    type_name = %descriptor.name,
                    node = %child,
                    "recursive placeholder left unresolved"
                );
                continue;
            }

            let browse_name = space.browse_name(&child)?;
            tracing::debug!(
                browse_name = %browse_name,
                type_name = %descriptor.name,
                "resolving placeholder"
            );
            let created = space.instantiate(node, &descriptor.type_id, None, Some(browse_name))?;
            let replacement = first_created(created, &descriptor.type_id)?;

            expanding.push(descriptor.type_id.clone());
            self.resolve(space, &replacement, expanding)?;
            expanding.pop();

            space.delete_node(&child)?;
        }
        Ok(())
    }
}

fn first_created(created: Vec<NodeId>, type_id: &NodeId) -> Result<NodeId> {
    created.into_iter().next().ok_or_else(|| {
        BridgeError::collaborator("instantiate", type_id.to_string(), "no node created")
    })
}

/// Instantiate a registered type and resolve its placeholders.
///
/// Returns the root node of the new subtree. Address-space failures propagate
/// unchanged; nodes created before a failure are not removed.
pub fn instantiate_customized<S>(
    space: &mut S,
    registry: &TypeRegistry,
    parent: &NodeId,
    type_id: &NodeId,
    node_id: Option<NodeId>,
    browse_name: Option<QualifiedName>,
    placeholder_suffix: &str,
) -> Result<NodeId>
where
    S: AddressSpace + ?Sized,
{
    NodeInstantiator::new(registry)
        .with_placeholder_suffix(placeholder_suffix)
        .instantiate(space, parent, type_id, node_id, browse_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;
    use crate::opcua::memory::MemoryAddressSpace;
    use crate::schema::ast::TypeClass;
    use crate::schema::catalog::MsgCatalog;
    use crate::bridge::walker::create_ros_data_types;

    fn bootstrap(classes: Vec<TypeClass>) -> (MemoryAddressSpace, TypeRegistry) {
        let mut catalog = MsgCatalog::new();
        for class in classes {
            catalog.add_class(class);
        }
        let mut space = MemoryAddressSpace::new(2);
        let types = create_ros_data_types(&catalog, &mut space, &BridgeConfig::default()).unwrap();
        (space, types.registry)
    }

    fn names<S: AddressSpace>(space: &S, node: &NodeId) -> Vec<String> {
        space
            .children(node, None)
            .unwrap()
            .iter()
            .map(|c| space.browse_name(c).unwrap().name)
            .collect()
    }

    #[test]
    fn test_nested_placeholders_resolved() {
        let (mut space, registry) = bootstrap(vec![
            TypeClass::new("geometry_msgs/Pose")
                .field("position", "geometry_msgs/Point")
                .field("orientation", "geometry_msgs/Quaternion"),
            TypeClass::new("geometry_msgs/Point").field("x", "float64"),
            TypeClass::new("geometry_msgs/Quaternion").field("w", "float64"),
        ]);
        let type_id = registry.type_id("geometry_msgs/Pose").unwrap().clone();
        let root = NodeInstantiator::new(&registry)
            .instantiate(&mut space, &NodeId::objects_folder(), &type_id, None, None)
            .unwrap();

        assert_eq!(names(&space, &root), vec!["position", "orientation"]);

        for child in space.children(&root, None).unwrap() {
            assert!(!space.type_definition(&child).unwrap().is_string());
            assert_eq!(space.variable_children(&child).unwrap().len(), 1);
        }
    }

    #[test]
    fn test_resolved_children_keep_declaration_order() {
        let (mut space, registry) = bootstrap(vec![
            TypeClass::new("pkg/Outer")
                .field("a", "pkg/Inner")
                .field("b", "int32")
                .field("c", "pkg/Inner"),
            TypeClass::new("pkg/Inner").field("v", "uint8"),
        ]);
        let type_id = registry.type_id("pkg/Outer").unwrap().clone();
        let root = NodeInstantiator::new(&registry)
            .instantiate(&mut space, &NodeId::objects_folder(), &type_id, None, None)
            .unwrap();
        assert_eq!(names(&space, &root), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_flat_type_unchanged() {
        let (mut space, registry) =
            bootstrap(vec![TypeClass::new("pkg/Flat").field("a", "int32").field("b", "string")]);
        let type_id = registry.type_id("pkg/Flat").unwrap().clone();
        let root = instantiate_customized(
            &mut space,
            &registry,
            &NodeId::objects_folder(),
            &type_id,
            None,
            None,
            "Type",
        )
        .unwrap();
        assert_eq!(names(&space, &root), vec!["a", "b"]);
    }

    #[test]
    fn test_self_reference_left_as_placeholder() {
        let (mut space, registry) = bootstrap(vec![TypeClass::new("pkg/Link")
            .field("id", "int32")
            .field("next", "pkg/Link")]);
        let type_id = registry.type_id("pkg/Link").unwrap().clone();
        let root = NodeInstantiator::new(&registry)
            .instantiate(&mut space, &NodeId::objects_folder(), &type_id, None, None)
            .unwrap();
        let next = space.children(&root, None).unwrap()[1].clone();
        assert!(space.type_definition(&next).unwrap().is_string());
    }

    #[test]
    fn test_unknown_type_is_collaborator_error() {
        let (mut space, registry) = bootstrap(vec![TypeClass::new("pkg/A").field("a", "int8")]);
        let err = NodeInstantiator::new(&registry)
            .instantiate(
                &mut space,
                &NodeId::objects_folder(),
                &NodeId::numeric(2, 999),
                None,
                None,
            )
            .unwrap_err();
        assert!(err.is_collaborator());
    }
}
