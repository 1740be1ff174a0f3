// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS type definitions as seen by the bridge.
//!
//! This module provides:
//! - Descriptors for registered structured types and their fields
//! - The primitive type mapping table
//! - Parsing of ROS `.msg` / `.srv` text
//! - A catalog implementing the introspection traits

pub mod ast;
pub mod builtin_types;
pub mod catalog;
pub mod descriptor;
pub mod parser;

pub use ast::{
    split_array_type, FieldDescriptor, RawField, ServiceClass, TypeClass, TypeDescriptor,
};
pub use builtin_types::{default_value, is_builtin, variant_type_for, BUILTIN_TYPES};
pub use catalog::{qualify_type, MsgCatalog};
pub use descriptor::{RosCorpus, TypeIntrospector};
pub use parser::{parse_message, parse_service};
