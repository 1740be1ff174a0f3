// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The bridge proper: type discovery, instantiation and value sync.
//!
//! Bootstrap runs once, before any node is instantiated:
//!
//! ```text
//! corpus --SchemaWalker--> TypeRegistry + schema document --> registrar
//! ```
//!
//! Afterwards the registry is shared by reference with the instantiator and
//! nothing mutates it.

pub mod instantiate;
pub mod registry;
pub mod sync;
pub mod walker;

pub use instantiate::{instantiate_customized, NodeInstantiator};
pub use registry::TypeRegistry;
pub use sync::{
    coerce, from_variant, read_into, to_variant, update_message_instance_with_node,
    update_node_with_message,
};
pub use walker::{create_ros_data_types, RosDataTypes, SchemaWalker};
