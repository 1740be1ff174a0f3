// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Registry of structured ROS types known to the address space.
//!
//! The registry is created by the bootstrap phase and passed by reference to
//! every later component. A type name appears at most once, and "is new" is
//! answered against primitives plus registered types, which is what stops the
//! schema walker from revisiting a type.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::core::{BridgeError, FieldLayout, MessageInstance, MessageValue, Result};
use crate::opcua::types::NodeId;
use crate::schema::ast::{FieldDescriptor, TypeDescriptor};
use crate::schema::builtin_types::{default_value, is_builtin};

/// Ordered set of registered structured types.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    descriptors: Vec<TypeDescriptor>,
    index: HashMap<String, usize>,
    by_id: HashMap<NodeId, usize>,
    layouts: HashMap<String, Arc<FieldLayout>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `type_name` is neither a primitive nor already registered.
    pub fn is_new(&self, type_name: &str) -> bool {
        !is_builtin(type_name) && !self.index.contains_key(type_name)
    }

    /// Register a structured type with the identifier the registrar assigned.
    pub fn register(&mut self, type_name: &str, type_id: NodeId) -> Result<()> {
        if !self.is_new(type_name) {
            return Err(BridgeError::invariant_violation(format!(
                "type '{type_name}' registered twice"
            )));
        }
        let slot = self.descriptors.len();
        self.index.insert(type_name.to_string(), slot);
        self.by_id.insert(type_id.clone(), slot);
        self.descriptors.push(TypeDescriptor::new(type_name, type_id));
        Ok(())
    }

    /// Append a field to a registered type.
    pub fn push_field(&mut self, owner: &str, field: FieldDescriptor) -> Result<()> {
        let slot = *self
            .index
            .get(owner)
            .ok_or_else(|| BridgeError::type_not_found(owner))?;
        self.descriptors[slot].fields.push(field);
        self.layouts.remove(owner);
        Ok(())
    }

    /// Build the field layout of every registered type.
    ///
    /// Called once the walk is complete; field lists do not change afterwards.
    pub fn seal(&mut self) {
        for descriptor in &self.descriptors {
            self.layouts.insert(
                descriptor.name.clone(),
                Arc::new(FieldLayout::new(
                    descriptor.fields.iter().map(|f| f.name.clone()),
                )),
            );
        }
    }

    pub fn get(&self, type_name: &str) -> Option<&TypeDescriptor> {
        self.index.get(type_name).map(|&i| &self.descriptors[i])
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.index.contains_key(type_name)
    }

    pub fn type_id(&self, type_name: &str) -> Option<&NodeId> {
        self.get(type_name).map(|d| &d.type_id)
    }

    /// Reverse lookup from an assigned identifier.
    pub fn by_type_id(&self, type_id: &NodeId) -> Option<&TypeDescriptor> {
        self.by_id.get(type_id).map(|&i| &self.descriptors[i])
    }

    /// Registered type a placeholder's string type identifier stands for.
    ///
    /// The identifier is `"<type name><suffix>"`; numeric identifiers are
    /// never placeholders.
    pub fn resolve_placeholder(&self, type_definition: &NodeId, suffix: &str) -> Option<&TypeDescriptor> {
        let id = type_definition.as_string_id()?;
        let name = id.strip_suffix(suffix)?;
        self.get(name)
    }

    /// Types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Type name to identifier mapping.
    pub fn mapping(&self) -> BTreeMap<String, NodeId> {
        self.descriptors
            .iter()
            .map(|d| (d.name.clone(), d.type_id.clone()))
            .collect()
    }

    /// Field layout of a registered type.
    pub fn layout(&self, type_name: &str) -> Option<Arc<FieldLayout>> {
        if let Some(layout) = self.layouts.get(type_name) {
            return Some(Arc::clone(layout));
        }
        let descriptor = self.get(type_name)?;
        Some(Arc::new(FieldLayout::new(
            descriptor.fields.iter().map(|f| f.name.clone()),
        )))
    }

    /// A default-initialised instance of a registered type.
    ///
    /// Primitives are zero or empty, arrays are empty and nested messages are
    /// built recursively. A nested field that refers back to a type already
    /// being built is left `Null`.
    pub fn new_message(&self, type_name: &str) -> Result<MessageInstance> {
        let mut building = HashSet::new();
        self.build_message(type_name, &mut building)
    }

    fn build_message<'a>(
        &'a self,
        type_name: &'a str,
        building: &mut HashSet<&'a str>,
    ) -> Result<MessageInstance> {
        let descriptor = self
            .get(type_name)
            .ok_or_else(|| BridgeError::type_not_found(type_name))?;
        let layout = self
            .layout(type_name)
            .ok_or_else(|| BridgeError::type_not_found(type_name))?;

        building.insert(type_name);
        let mut message = MessageInstance::new(type_name, layout);
        for field in &descriptor.fields {
            let value = if field.is_array {
                MessageValue::Array(Vec::new())
            } else if let Some(value) = default_value(&field.base_type) {
                value
            } else if building.contains(field.base_type.as_str()) || !self.contains(&field.base_type) {
                MessageValue::Null
            } else {
                MessageValue::Struct(self.build_message(&field.base_type, building)?)
            };
            message.set(&field.name, value);
        }
        building.remove(type_name);
        Ok(message)
    }
}
