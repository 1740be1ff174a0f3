// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! OPC UA side of the bridge: identifiers, values and the collaborator traits.

pub mod memory;
pub mod space;
pub mod types;

pub use memory::{MemoryAddressSpace, DEFAULT_PLACEHOLDER_SUFFIX};
pub use space::{AddressSpace, MetaModelRegistrar};
pub use types::{NodeClass, NodeId, QualifiedName, Variant, VariantType};
