// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rosua
//!
//! Bridge between ROS message definitions and an OPC UA address space.
//!
//! This library translates ROS types into OPC UA structured types and keeps
//! values in sync between message instances and node trees:
//! - **Type discovery** walks every message and service reachable from a
//!   corpus and registers each structured type once ([`bridge::walker`])
//! - **Schema document** generation for the registered types ([`dictionary`])
//! - **Instantiation** of node subtrees with placeholder resolution
//!   ([`bridge::instantiate`])
//! - **Value sync** in both directions, matching browse names to field names
//!   ([`bridge::sync`])
//!
//! ## Architecture
//!
//! - `core/` - Errors and the message-side value model
//! - `schema/` - ROS definitions: parsing, catalog, primitive mapping
//! - `opcua/` - Node ids, variants, collaborator traits, in-memory space
//! - `dictionary/` - Binary type dictionary builder
//! - `bridge/` - Registry, walker, instantiator, synchronizers
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rosua::{
//!     create_ros_data_types, instantiate_customized, update_node_with_message,
//!     BridgeConfig, MemoryAddressSpace, MessageValue, MsgCatalog, NodeId,
//! };
//!
//! let config = BridgeConfig::default().with_msg_path("/opt/ros/noetic/share");
//! let catalog = MsgCatalog::from_paths(&config.msg_paths)?;
//! let mut space = MemoryAddressSpace::new(config.namespace_index);
//!
//! let types = create_ros_data_types(&catalog, &mut space, &config)?;
//! let type_id = types.registry.type_id("geometry_msgs/Point").cloned().unwrap();
//! let node = instantiate_customized(
//!     &mut space,
//!     &types.registry,
//!     &NodeId::objects_folder(),
//!     &type_id,
//!     None,
//!     None,
//!     &config.placeholder_suffix,
//! )?;
//!
//! let mut point = types.registry.new_message("geometry_msgs/Point")?;
//! point.set("x", MessageValue::Float64(1.5));
//! update_node_with_message(&mut space, &node, &MessageValue::Struct(point))?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{
    BridgeError, FieldLayout, MessageInstance, MessageValue, Result, RosDuration, RosTime,
    ValueShape,
};

// ROS definitions
pub mod schema;

pub use schema::{MsgCatalog, RosCorpus, TypeDescriptor, TypeIntrospector};

// OPC UA side
pub mod opcua;

pub use opcua::{
    AddressSpace, MemoryAddressSpace, MetaModelRegistrar, NodeClass, NodeId, QualifiedName,
    Variant, VariantType,
};

// Schema document
pub mod dictionary;

pub use dictionary::TypeDictionaryBuilder;

// Bridge
pub mod bridge;

pub use bridge::{
    create_ros_data_types, instantiate_customized, update_message_instance_with_node,
    update_node_with_message, NodeInstantiator, RosDataTypes, SchemaWalker, TypeRegistry,
};

// Configuration
pub mod config;

pub use config::{BridgeConfig, ConfigError};
