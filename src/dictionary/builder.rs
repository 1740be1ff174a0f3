// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Accumulates structured type definitions into a schema document.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::core::{BridgeError, Result};
use crate::dictionary::model::{
    FieldDef, StructuredType, TypeDictionary, TypeRef, LENGTH_FIELD_PREFIX,
};
use crate::opcua::space::MetaModelRegistrar;
use crate::opcua::types::{NodeId, VariantType};
use crate::schema::builtin_types::variant_type_for;

/// Builds the binary type dictionary for every registered ROS type.
///
/// Types are written in the order they are created. A type must be created
/// with [`create_type`](Self::create_type) before fields are added to it.
#[derive(Debug, Clone)]
pub struct TypeDictionaryBuilder {
    dictionary_name: String,
    document: TypeDictionary,
    index: HashMap<String, usize>,
}

impl TypeDictionaryBuilder {
    pub fn new(dictionary_name: impl Into<String>, namespace_uri: impl Into<String>) -> Self {
        Self {
            dictionary_name: dictionary_name.into(),
            document: TypeDictionary::new(namespace_uri),
            index: HashMap::new(),
        }
    }

    pub fn dictionary_name(&self) -> &str {
        &self.dictionary_name
    }

    /// Register a new empty structured type with the registrar and start its
    /// definition in the document.
    pub fn create_type<R>(&mut self, registrar: &mut R, type_name: &str) -> Result<NodeId>
    where
        R: MetaModelRegistrar + ?Sized,
    {
        if self.index.contains_key(type_name) {
            return Err(BridgeError::invariant_violation(format!(
                "structured type '{type_name}' created twice"
            )));
        }
        let type_id = registrar.create_structured_type(type_name)?;
        self.index
            .insert(type_name.to_string(), self.document.structured_types.len());
        self.document
            .structured_types
            .push(StructuredType::new(type_name));
        Ok(type_id)
    }

    /// Append one field to the definition of `owner`.
    ///
    /// Array fields are preceded by an `Int32` length field named
    /// `NoOf<alias>`, as the binary encoding expects.
    pub fn add_field(
        &mut self,
        field_type: &str,
        field_alias: &str,
        owner: &str,
        is_array: bool,
    ) -> Result<()> {
        let slot = *self.index.get(owner).ok_or_else(|| {
            BridgeError::invariant_violation(format!(
                "field '{field_alias}' added to '{owner}' before the type was created"
            ))
        })?;
        let type_ref = match variant_type_for(field_type) {
            Some(vt) => TypeRef::Builtin(vt),
            None => TypeRef::Structured(field_type.to_string()),
        };

        let fields = &mut self.document.structured_types[slot].fields;
        if is_array {
            let length_field = format!("{LENGTH_FIELD_PREFIX}{field_alias}");
            fields.push(FieldDef {
                name: length_field.clone(),
                type_name: TypeRef::Builtin(VariantType::Int32).to_type_name(),
                length_field: None,
            });
            fields.push(FieldDef {
                name: field_alias.to_string(),
                type_name: type_ref.to_type_name(),
                length_field: Some(length_field),
            });
        } else {
            fields.push(FieldDef {
                name: field_alias.to_string(),
                type_name: type_ref.to_type_name(),
                length_field: None,
            });
        }
        Ok(())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.index.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.document.structured_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.structured_types.is_empty()
    }

    /// The document accumulated so far.
    pub fn document(&self) -> &TypeDictionary {
        &self.document
    }

    /// Serialize the accumulated document to XML bytes.
    pub fn finalize(&self) -> Result<Vec<u8>> {
        let mut buffer = String::new();
        buffer.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

        let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
        serializer.indent(' ', 2);
        self.document
            .serialize(serializer)
            .map_err(|e| BridgeError::dictionary(e.to_string()))?;
        writeln!(buffer).map_err(|e| BridgeError::dictionary(e.to_string()))?;

        Ok(buffer.into_bytes())
    }
}

/// Parse a schema document produced by [`TypeDictionaryBuilder::finalize`].
pub fn parse_document(document: &[u8]) -> Result<TypeDictionary> {
    let text = std::str::from_utf8(document)
        .map_err(|e| BridgeError::dictionary(format!("document is not UTF-8: {e}")))?;
    quick_xml::de::from_str(text).map_err(|e| BridgeError::dictionary(e.to_string()))
}
