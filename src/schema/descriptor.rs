// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Introspection traits for loose coupling.
//!
//! The schema walker only needs to ask "what fields does this type have" and
//! "which types exist". These traits let it work against a parsed catalog, a
//! live ROS installation, or a test double without depending on any of them.

use crate::schema::ast::{ServiceClass, TypeClass};

/// Looks up message and service definitions by name.
pub trait TypeIntrospector {
    /// Field list of a message type, or `None` if the definition is missing
    /// or broken.
    fn class_for(&self, type_name: &str) -> Option<TypeClass>;

    /// Request/response classes of a service, or `None` if missing or broken.
    fn service_class_for(&self, service_name: &str) -> Option<ServiceClass>;
}

/// Enumerates the root types to bridge.
pub trait RosCorpus: TypeIntrospector {
    fn message_type_names(&self) -> Vec<String>;

    fn service_type_names(&self) -> Vec<String>;
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for &T {
    fn class_for(&self, type_name: &str) -> Option<TypeClass> {
        (**self).class_for(type_name)
    }

    fn service_class_for(&self, service_name: &str) -> Option<ServiceClass> {
        (**self).service_class_for(service_name)
    }
}

impl<T: RosCorpus + ?Sized> RosCorpus for &T {
    fn message_type_names(&self) -> Vec<String> {
        (**self).message_type_names()
    }

    fn service_type_names(&self) -> Vec<String> {
        (**self).service_type_names()
    }
}
