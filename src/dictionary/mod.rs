// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema document (binary type dictionary) for registered ROS types.
//!
//! The rest of the bridge treats the finalized document as an opaque blob
//! that is handed to [`MetaModelRegistrar::install_schema_document`](crate::opcua::MetaModelRegistrar).

pub mod builder;
pub mod model;

pub use builder::{parse_document, TypeDictionaryBuilder};
pub use model::{FieldDef, Member, StructuredType, TypeDictionary, TypeRef};
