// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout rosua.
//!
//! This module provides the foundational types for the library:
//! - [`BridgeError`] - Error handling shared by every component
//! - [`MessageValue`] / [`MessageInstance`] - Message-side value representation

pub mod error;
pub mod value;

pub use error::{BridgeError, Result};
pub use value::{FieldLayout, MessageInstance, MessageValue, RosDuration, RosTime, ValueShape};
