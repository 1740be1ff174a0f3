// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rosua::{create_ros_data_types, BridgeConfig, MemoryAddressSpace, MsgCatalog, RosDataTypes};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Load the configuration file (if any) and append extra definition roots.
pub fn load_config(config: Option<&Path>, paths: &[PathBuf]) -> Result<BridgeConfig> {
    let mut config = match config {
        Some(path) => BridgeConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BridgeConfig::default(),
    };
    config.msg_paths.extend(paths.iter().cloned());
    if config.msg_paths.is_empty() {
        anyhow::bail!("no definition roots given (pass PATH or set msg_paths in the config)");
    }
    Ok(config)
}

/// Load definitions and run the bootstrap against an in-memory address space.
pub fn bootstrap(config: &BridgeConfig) -> Result<(MemoryAddressSpace, RosDataTypes)> {
    let catalog = MsgCatalog::from_paths(&config.msg_paths)?;
    let mut space = MemoryAddressSpace::new(config.namespace_index)
        .with_placeholder_suffix(config.placeholder_suffix.clone());
    let types = create_ros_data_types(&catalog, &mut space, config)?;
    Ok((space, types))
}
