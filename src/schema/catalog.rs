// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Catalog of ROS message and service definitions.
//!
//! [`MsgCatalog`] is the type-introspection and corpus collaborator used by
//! the schema walker. It is filled from definition text, either added one by
//! one or loaded from a `<root>/<package>/{msg,srv}/` tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::{BridgeError, Result};
use crate::schema::ast::{RawField, ServiceClass, TypeClass};
use crate::schema::builtin_types::is_builtin;
use crate::schema::descriptor::{RosCorpus, TypeIntrospector};
use crate::schema::parser;

fn type_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*/[A-Za-z][A-Za-z0-9_]*$").expect("valid type name regex")
    })
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Parsed(T),
    Broken(String),
}

impl<T> Entry<T> {
    fn parsed(&self) -> Option<&T> {
        match self {
            Entry::Parsed(v) => Some(v),
            Entry::Broken(_) => None,
        }
    }
}

/// In-memory catalog of parsed `.msg` and `.srv` definitions.
#[derive(Debug, Clone, Default)]
pub struct MsgCatalog {
    messages: BTreeMap<String, Entry<Vec<RawField>>>,
    services: BTreeMap<String, Entry<(Vec<RawField>, Vec<RawField>)>>,
}

impl MsgCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message definition under its full name (`package/Name`).
    ///
    /// Text that fails to parse is kept as a broken entry: the name is still
    /// enumerated, but introspection reports it as unresolvable.
    pub fn add_message(&mut self, full_name: &str, definition: &str) -> Result<()> {
        let package = package_of(full_name)?;
        let entry = match parser::parse_message(full_name, definition) {
            Ok(fields) => Entry::Parsed(qualify_fields(package, fields)),
            Err(e) => {
                tracing::warn!(type_name = full_name, error = %e, "broken message definition");
                Entry::Broken(e.to_string())
            }
        };
        self.messages.insert(full_name.to_string(), entry);
        Ok(())
    }

    /// Add a service definition under its full name (`package/Name`).
    pub fn add_service(&mut self, full_name: &str, definition: &str) -> Result<()> {
        let package = package_of(full_name)?;
        let entry = match parser::parse_service(full_name, definition) {
            Ok((request, response)) => Entry::Parsed((
                qualify_fields(package, request),
                qualify_fields(package, response),
            )),
            Err(e) => {
                tracing::warn!(service = full_name, error = %e, "broken service definition");
                Entry::Broken(e.to_string())
            }
        };
        self.services.insert(full_name.to_string(), entry);
        Ok(())
    }

    /// Add an already-introspected message class. Field types are used as-is.
    pub fn add_class(&mut self, class: TypeClass) {
        self.messages
            .insert(class.name.clone(), Entry::Parsed(class.fields));
    }

    /// Record a message that is listed but cannot be resolved.
    pub fn add_broken(&mut self, full_name: &str, reason: impl Into<String>) {
        self.messages
            .insert(full_name.to_string(), Entry::Broken(reason.into()));
    }

    /// Load every `<root>/<package>/msg/*.msg` and `<root>/<package>/srv/*.srv`.
    ///
    /// A file that cannot be read is recorded as broken. A file whose
    /// `package/Name` is not a valid type name is skipped. Returns the number
    /// of definitions recorded.
    pub fn load_dir(&mut self, root: &Path) -> Result<usize> {
        let mut packages: Vec<_> = fs::read_dir(root)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        packages.sort();

        let mut loaded = 0;
        for package_dir in packages {
            let Some(package) = package_dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            for (kind, ext) in [("msg", "msg"), ("srv", "srv")] {
                let dir = package_dir.join(kind);
                if !dir.is_dir() {
                    continue;
                }
                let mut files: Vec<_> = fs::read_dir(&dir)?
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.extension().and_then(|x| x.to_str()) == Some(ext))
                    .collect();
                files.sort();

                for file in files {
                    let Some(stem) = file.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    let full_name = format!("{package}/{stem}");
                    if !type_name_regex().is_match(&full_name) {
                        tracing::warn!(
                            path = %file.display(),
                            type_name = %full_name,
                            "not a valid ROS type name, skipping"
                        );
                        continue;
                    }
                    match fs::read_to_string(&file) {
                        Ok(text) if kind == "msg" => self.add_message(&full_name, &text)?,
                        Ok(text) => self.add_service(&full_name, &text)?,
                        Err(e) => {
                            tracing::warn!(
                                path = %file.display(),
                                error = %e,
                                "unreadable definition file"
                            );
                            let reason = e.to_string();
                            if kind == "msg" {
                                self.messages.insert(full_name, Entry::Broken(reason));
                            } else {
                                self.services.insert(full_name, Entry::Broken(reason));
                            }
                        }
                    }
                    loaded += 1;
                }
            }
        }
        tracing::debug!(root = %root.display(), loaded, "loaded ROS definitions");
        Ok(loaded)
    }

    /// Build a catalog from several definition roots.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut catalog = Self::new();
        for path in paths {
            catalog.load_dir(path.as_ref())?;
        }
        Ok(catalog)
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Reason a definition is broken, if it is.
    pub fn broken_reason(&self, full_name: &str) -> Option<&str> {
        if let Some(Entry::Broken(reason)) = self.messages.get(full_name) {
            return Some(reason);
        }
        match self.services.get(full_name) {
            Some(Entry::Broken(reason)) => Some(reason),
            _ => None,
        }
    }

    fn service_part(&self, type_name: &str) -> Option<TypeClass> {
        let (service, is_request) = if let Some(s) = type_name.strip_suffix("Request") {
            (s, true)
        } else {
            (type_name.strip_suffix("Response")?, false)
        };
        let (request, response) = self.services.get(service)?.parsed()?;
        let fields = if is_request { request } else { response };
        Some(TypeClass {
            name: type_name.to_string(),
            fields: fields.clone(),
        })
    }
}

impl TypeIntrospector for MsgCatalog {
    fn class_for(&self, type_name: &str) -> Option<TypeClass> {
        match self.messages.get(type_name) {
            Some(entry) => entry.parsed().map(|fields| TypeClass {
                name: type_name.to_string(),
                fields: fields.clone(),
            }),
            None => self.service_part(type_name),
        }
    }

    fn service_class_for(&self, service_name: &str) -> Option<ServiceClass> {
        let (request, response) = self.services.get(service_name)?.parsed()?;
        Some(ServiceClass {
            name: service_name.to_string(),
            request: TypeClass {
                name: format!("{service_name}Request"),
                fields: request.clone(),
            },
            response: TypeClass {
                name: format!("{service_name}Response"),
                fields: response.clone(),
            },
        })
    }
}

impl RosCorpus for MsgCatalog {
    fn message_type_names(&self) -> Vec<String> {
        self.messages.keys().cloned().collect()
    }

    fn service_type_names(&self) -> Vec<String> {
        self.services.keys().cloned().collect()
    }
}

fn package_of(full_name: &str) -> Result<&str> {
    if !type_name_regex().is_match(full_name) {
        return Err(BridgeError::invalid_schema(
            full_name,
            "expected a 'package/Name' type name",
        ));
    }
    Ok(full_name.split('/').next().unwrap_or(full_name))
}

fn qualify_fields(package: &str, fields: Vec<RawField>) -> Vec<RawField> {
    fields
        .into_iter()
        .map(|f| RawField {
            type_string: qualify_type(package, &f.type_string),
            name: f.name,
        })
        .collect()
}

/// Resolve a field type string relative to the package that declares it.
///
/// `Header` always means `std_msgs/Header`; any other unqualified message name
/// refers to the declaring package. Array suffixes are preserved.
pub fn qualify_type(package: &str, type_string: &str) -> String {
    let (base, suffix) = match type_string.find('[') {
        Some(pos) => type_string.split_at(pos),
        None => (type_string, ""),
    };
    if is_builtin(base) || base.contains('/') {
        type_string.to_string()
    } else if base == "Header" {
        format!("std_msgs/Header{suffix}")
    } else {
        format!("{package}/{base}{suffix}")
    }
}
