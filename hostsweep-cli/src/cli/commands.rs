// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};

/// Hostsweep command-line interface
#[derive(Parser)]
#[command(
    name = "hostsweep",
    version,
    about = "Keyset-paginated host sweep pipeline over a warehouse QA service"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Explicit log level
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print version information
    Version,

    /// Run a demo sweep against the embedded in-memory engine
    Sweep {
        /// Number of demo hosts to seed
        #[arg(long, default_value_t = 50)]
        hosts: usize,

        /// Keys per page
        #[arg(long, default_value_t = 10)]
        page_size: usize,

        /// Cap on total keys swept (omit for the default of 100, 0 for none)
        #[arg(long)]
        max_count: Option<usize>,

        /// Worker count
        #[arg(long, default_value_t = 4)]
        concurrency: usize,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Bootstrap the registered warehouse views
    Views {
        /// Number of demo hosts to seed
        #[arg(long, default_value_t = 50)]
        hosts: usize,
    },
}

/// Output format for sweep results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Log level selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
