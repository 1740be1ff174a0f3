// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rosua CLI
//!
//! Developer tool for inspecting how ROS definitions map onto OPC UA types.
//!
//! ## Usage
//!
//! ```sh
//! # Print the schema document for every definition under a root
//! rosua schema dictionary /opt/ros/noetic/share
//!
//! # List type name -> type id
//! rosua schema types --json /opt/ros/noetic/share
//!
//! # Instantiate one type and print the resolved node tree
//! rosua schema tree geometry_msgs/Pose --config bridge.toml
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::SchemaCmd;
use common::Result;

/// rosua - ROS to OPC UA type bridge
///
/// Walks ROS message and service definitions and shows the OPC UA
/// structured types and node trees they produce.
#[derive(Parser, Clone)]
#[command(name = "rosua")]
#[command(about = "Map ROS message definitions onto OPC UA structured types", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Schema operations (dictionary, types, tree)
    #[command(subcommand)]
    Schema(SchemaCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Schema(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
