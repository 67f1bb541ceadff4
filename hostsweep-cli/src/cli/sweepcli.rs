// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command handlers

use colored::Colorize;
use std::sync::Arc;

use hostsweep::engine::MemoryEngine;
use hostsweep::qa::AnswerService;
use hostsweep::{ConnectionContext, PipelineConfig, RuntimeEnv, ScanSpec, SessionSlot};

use crate::cli::commands::OutputFormat;
use crate::cli::demo::{demo_partition, seed_hosts, DemoQa};
use crate::cli::output::ResultFormatter;

/// Run a demo sweep and print the transcript
pub fn handle_sweep(
    hosts: usize,
    page_size: usize,
    max_count: Option<usize>,
    concurrency: usize,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Arc::new(MemoryEngine::new());
    seed_hosts(&engine, hosts);

    let context = ConnectionContext::new(RuntimeEnv::Interactive, engine);
    let qa = Arc::new(DemoQa::new());

    let mut config = PipelineConfig::new()
        .with_page_size(page_size)
        .with_concurrency(concurrency);
    if let Some(max_count) = max_count {
        // 0 on the command line means unbounded
        config = config.with_max_count(if max_count == 0 { None } else { Some(max_count) });
    }

    let pipeline = context.pipeline(
        Arc::clone(&qa) as Arc<dyn AnswerService>,
        ScanSpec::host_dimension_at(demo_partition()),
        config,
    );

    let processed = pipeline.process_all()?;
    print!(
        "{}",
        ResultFormatter::format_sweep(processed, &qa.transcript(), format)
    );
    Ok(())
}

/// Bootstrap the registered warehouse views against demo data
pub fn handle_views(hosts: usize) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Arc::new(MemoryEngine::new());
    seed_hosts(&engine, hosts);

    let context = ConnectionContext::new(RuntimeEnv::Interactive, engine);
    let initializer = context.view_initializer();
    let mut slot = SessionSlot::driver();

    let report = initializer.create_all_views(&mut slot);
    if report.is_complete() {
        println!(
            "{}",
            format!("✅ All {} views created and verified", report.attempted).green()
        );
        Ok(())
    } else {
        println!(
            "{}",
            format!(
                "⚠ Only {}/{} views created successfully",
                report.created, report.attempted
            )
            .yellow()
        );
        Err("view bootstrap incomplete".into())
    }
}
