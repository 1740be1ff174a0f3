// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - show the OPC UA side of ROS definitions.

use std::io::Write as _;
use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;

use crate::common::{bootstrap, load_config, Result};
use rosua::{NodeId, NodeInstantiator};

/// Schema operations.
#[derive(Subcommand, Clone, Debug)]
pub enum SchemaCmd {
    /// Print the schema document for all definitions
    Dictionary {
        /// Configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Definition roots (<root>/<package>/msg, <root>/<package>/srv)
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,
    },

    /// List registered types and their identifiers
    Types {
        /// Configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,

        /// Definition roots
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,
    },

    /// Instantiate a type and print its node tree
    Tree {
        /// Type to instantiate (package/Name)
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Definition roots
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,
    },
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        match self {
            SchemaCmd::Dictionary { config, paths } => cmd_dictionary(config, paths),
            SchemaCmd::Types {
                config,
                json,
                paths,
            } => cmd_types(config, json, paths),
            SchemaCmd::Tree {
                type_name,
                config,
                paths,
            } => cmd_tree(type_name, config, paths),
        }
    }
}

fn cmd_dictionary(config: Option<PathBuf>, paths: Vec<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref(), &paths)?;
    let (_, types) = bootstrap(&config)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&types.schema_document)?;
    Ok(())
}

fn cmd_types(config: Option<PathBuf>, json: bool, paths: Vec<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref(), &paths)?;
    let (_, types) = bootstrap(&config)?;

    let entries: Vec<TypeEntry> = types
        .registry
        .iter()
        .map(|d| TypeEntry {
            name: d.name.clone(),
            type_id: d.type_id.to_string(),
            fields: d.fields.len(),
        })
        .collect();

    output_json_or(json, &entries, || {
        let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
        for entry in &entries {
            println!(
                "{:<width$}  {}  ({} fields)",
                entry.name, entry.type_id, entry.fields
            );
        }
        println!();
        println!("{} types registered", entries.len());
        Ok(())
    })
}

fn cmd_tree(type_name: String, config: Option<PathBuf>, paths: Vec<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref(), &paths)?;
    let (mut space, types) = bootstrap(&config)?;

    let type_id = types
        .registry
        .type_id(&type_name)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Unknown type: {type_name}"))?;

    let root = NodeInstantiator::new(&types.registry)
        .with_placeholder_suffix(&config.placeholder_suffix)
        .instantiate(
            &mut space,
            &NodeId::objects_folder(),
            &type_id,
            None,
            None,
        )?;

    print!("{}", space.render_tree(&root)?);
    Ok(())
}

fn output_json_or<T>(
    json: bool,
    value: &T,
    human_fn: impl FnOnce() -> std::io::Result<()>,
) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn()?;
    }
    Ok(())
}

// Output types

#[derive(Serialize)]
struct TypeEntry {
    name: String,
    type_id: String,
    fields: usize,
}

