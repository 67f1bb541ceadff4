// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use hostsweep::HostAnswer;

use crate::cli::commands::OutputFormat;

/// Result formatter for different output formats
pub struct ResultFormatter;

impl ResultFormatter {
    /// Format a finished sweep in the specified format
    pub fn format_sweep(
        processed: usize,
        transcript: &[HostAnswer],
        format: OutputFormat,
    ) -> String {
        match format {
            OutputFormat::Table => Self::format_table(processed, transcript),
            OutputFormat::Json => Self::format_json(processed, transcript),
        }
    }

    /// Format the sweep as a table using comfy-table
    fn format_table(processed: usize, transcript: &[HostAnswer]) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "Sweep Results".bold().green()));
        output.push_str(&format!("Hosts processed: {}\n\n", processed));

        if transcript.is_empty() {
            output.push_str(&format!("{}\n", "No hosts answered".yellow()));
            return output;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("host_id").fg(Color::Green),
            Cell::new("answer").fg(Color::Green),
        ]);
        for answer in transcript {
            table.add_row(vec![answer.host_id.to_string(), answer.answer_text.clone()]);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Format the sweep as JSON
    fn format_json(processed: usize, transcript: &[HostAnswer]) -> String {
        let json_result = serde_json::json!({
            "status": "success",
            "processed": processed,
            "answers": transcript.iter().map(|a| {
                serde_json::json!({
                    "host_id": a.host_id,
                    "answer_text": a.answer_text,
                })
            }).collect::<Vec<_>>(),
        });

        serde_json::to_string_pretty(&json_result).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize results to JSON\"}"
                .to_string()
        })
    }
}
