// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema walker: recursive type discovery and registration.
//!
//! Every structured type reachable from the corpus roots is registered
//! exactly once, in pre-order of first discovery. A type is registered before
//! its fields are walked, so cyclic and self-referential definitions end the
//! recursion at the registry check.

use crate::config::BridgeConfig;
use crate::core::Result;
use crate::dictionary::TypeDictionaryBuilder;
use crate::opcua::space::MetaModelRegistrar;
use crate::opcua::types::NodeId;
use crate::schema::ast::{FieldDescriptor, TypeClass};
use crate::schema::descriptor::{RosCorpus, TypeIntrospector};

use super::registry::TypeRegistry;

/// Walks type definitions and feeds the registry and the schema document.
#[derive(Debug, Clone)]
pub struct SchemaWalker {
    registry: TypeRegistry,
    builder: TypeDictionaryBuilder,
}

impl SchemaWalker {
    pub fn new(builder: TypeDictionaryBuilder) -> Self {
        Self {
            registry: TypeRegistry::new(),
            builder,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn builder(&self) -> &TypeDictionaryBuilder {
        &self.builder
    }

    /// Walk message roots and return the names registered by this call.
    ///
    /// A root whose definition cannot be resolved is skipped without being
    /// registered. A nested type that cannot be resolved stays registered
    /// with an empty field list.
    pub fn discover<I, R>(
        &mut self,
        introspector: &I,
        registrar: &mut R,
        roots: &[String],
    ) -> Result<Vec<String>>
    where
        I: TypeIntrospector + ?Sized,
        R: MetaModelRegistrar + ?Sized,
    {
        let before = self.registry.len();
        for root in roots {
            if !self.registry.is_new(root) {
                continue;
            }
            let Some(class) = introspector.class_for(root) else {
                tracing::warn!(type_name = %root, "unresolvable message definition, skipping");
                continue;
            };
            self.create_type(registrar, root)?;
            self.walk_fields(introspector, registrar, root, &class)?;
        }
        Ok(self.registered_since(before))
    }

    /// Register the request and response types of each service.
    ///
    /// Service fields are recorded flat; nested message types they mention
    /// are not walked.
    pub fn discover_services<I, R>(
        &mut self,
        introspector: &I,
        registrar: &mut R,
        services: &[String],
    ) -> Result<Vec<String>>
    where
        I: TypeIntrospector + ?Sized,
        R: MetaModelRegistrar + ?Sized,
    {
        let before = self.registry.len();
        for name in services {
            let Some(service) = introspector.service_class_for(name) else {
                tracing::warn!(service = %name, "unresolvable service definition, skipping");
                continue;
            };
            for class in [&service.request, &service.response] {
                if !self.registry.is_new(&class.name) {
                    tracing::warn!(
                        type_name = %class.name,
                        service = %name,
                        "service sub-type already registered, skipping"
                    );
                    continue;
                }
                self.create_type(registrar, &class.name)?;
                for raw in &class.fields {
                    self.append_field(&class.name, FieldDescriptor::from_raw(raw))?;
                }
            }
        }
        Ok(self.registered_since(before))
    }

    /// Finish walking and hand back the registry and the document builder.
    pub fn finish(mut self) -> (TypeRegistry, TypeDictionaryBuilder) {
        self.registry.seal();
        (self.registry, self.builder)
    }

    fn walk<I, R>(&mut self, introspector: &I, registrar: &mut R, type_name: &str) -> Result<()>
    where
        I: TypeIntrospector + ?Sized,
        R: MetaModelRegistrar + ?Sized,
    {
        match introspector.class_for(type_name) {
            Some(class) => self.walk_fields(introspector, registrar, type_name, &class),
            None => {
                tracing::warn!(type_name, "unresolvable nested type, left empty");
                Ok(())
            }
        }
    }

    fn walk_fields<I, R>(
        &mut self,
        introspector: &I,
        registrar: &mut R,
        owner: &str,
        class: &TypeClass,
    ) -> Result<()>
    where
        I: TypeIntrospector + ?Sized,
        R: MetaModelRegistrar + ?Sized,
    {
        for raw in &class.fields {
            let field = FieldDescriptor::from_raw(raw);
            if self.registry.is_new(&field.base_type) {
                self.create_type(registrar, &field.base_type)?;
                self.walk(introspector, registrar, &field.base_type)?;
            }
            self.append_field(owner, field)?;
        }
        Ok(())
    }

    fn create_type<R>(&mut self, registrar: &mut R, type_name: &str) -> Result<NodeId>
    where
        R: MetaModelRegistrar + ?Sized,
    {
        let type_id = self.builder.create_type(registrar, type_name)?;
        self.registry.register(type_name, type_id.clone())?;
        tracing::debug!(type_name, type_id = %type_id, "registered structured type");
        Ok(type_id)
    }

    fn append_field(&mut self, owner: &str, field: FieldDescriptor) -> Result<()> {
        self.builder
            .add_field(&field.base_type, &field.name, owner, field.is_array)?;
        self.registry.push_field(owner, field)
    }

    fn registered_since(&self, before: usize) -> Vec<String> {
        self.registry
            .iter()
            .skip(before)
            .map(|d| d.name.clone())
            .collect()
    }
}

/// Result of the bootstrap phase.
#[derive(Debug, Clone)]
pub struct RosDataTypes {
    /// Every registered structured type.
    pub registry: TypeRegistry,
    /// The schema document installed with the registrar.
    pub schema_document: Vec<u8>,
}

impl RosDataTypes {
    /// Type name to identifier mapping.
    pub fn mapping(&self) -> std::collections::BTreeMap<String, NodeId> {
        self.registry.mapping()
    }
}

/// Discover every type of `corpus`, register it and install the schema
/// document.
///
/// Messages are walked before services. Unresolvable definitions are skipped,
/// so a partially broken corpus yields a partial mapping. Registrar failures
/// propagate unchanged.
pub fn create_ros_data_types<C, R>(
    corpus: &C,
    registrar: &mut R,
    config: &BridgeConfig,
) -> Result<RosDataTypes>
where
    C: RosCorpus + ?Sized,
    R: MetaModelRegistrar + ?Sized,
{
    let builder = TypeDictionaryBuilder::new(&config.dictionary_name, &config.namespace_uri);
    let mut walker = SchemaWalker::new(builder);

    walker.discover(corpus, registrar, &corpus.message_type_names())?;
    walker.discover_services(corpus, registrar, &corpus.service_type_names())?;

    let (registry, builder) = walker.finish();
    let schema_document = builder.finalize()?;
    registrar.install_schema_document(&schema_document)?;

    tracing::debug!(
        dictionary = builder.dictionary_name(),
        types = registry.len(),
        "installed schema document"
    );

    Ok(RosDataTypes {
        registry,
        schema_document,
    })
}
