// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for Hostsweep
//!
//! Provides command-line access to the sweep pipeline and the warehouse view
//! bootstrap. Both commands run against the embedded in-memory engine with
//! generated demo data; production deployments embed the library and wire in
//! their own engine client.

pub mod commands;
pub mod demo;
pub mod output;
pub mod sweepcli;

pub use commands::{Cli, Commands, OutputFormat};
pub use sweepcli::{handle_sweep, handle_views};
