// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Console sink printing one table per micro-batch.
//!
//! ```text
//! -------------------------------------------
//! Batch: 0
//! -------------------------------------------
//! +--------------------+-----+
//! |            customer|score|
//! +--------------------+-----+
//! |Spencer.Davis@tes...|  8.0|
//! +--------------------+-----+
//!
//! ```
//!
//! With truncation on, cells longer than the width are cut and everything is
//! right-aligned; with it off, cells are left-aligned and printed whole.

use std::io::{self, Stdout, Write};

use crate::config::consts::{DEFAULT_NUM_ROWS, MIN_COLUMN_WIDTH, TRUNCATE_WIDTH};
use crate::config::SinkConfig;
use crate::errors::SinkError;
use crate::records::Row;
use crate::traits::RowSink;

const BATCH_RULE: &str = "-------------------------------------------";
const NULL_CELL: &str = "null";

/// Rendering options for the console sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Rows shown per batch
    pub num_rows: usize,
    /// Cut cells longer than this; `None` prints cells whole
    pub truncate: Option<usize>,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            num_rows: DEFAULT_NUM_ROWS,
            truncate: Some(TRUNCATE_WIDTH),
        }
    }
}

impl ConsoleOptions {
    pub fn from_config(config: &SinkConfig) -> Self {
        Self {
            num_rows: config.get_num_rows(),
            truncate: config.get_truncate_width(),
        }
    }
}

pub struct ConsoleSink<W: Write + Send> {
    out: W,
    options: ConsoleOptions,
}

impl ConsoleSink<Stdout> {
    pub fn stdout(options: ConsoleOptions) -> Self {
        Self::new(io::stdout(), options)
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W, options: ConsoleOptions) -> Self {
        Self { out, options }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> RowSink for ConsoleSink<W> {
    fn write_batch(&mut self, batch_id: u64, columns: &[&str], rows: &[Row]) -> Result<(), SinkError> {
        let text = render_batch(batch_id, columns, rows, &self.options);
        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|source| SinkError::Io { batch_id, source })
    }
}

/// Full console output for one batch, banner included.
pub fn render_batch(batch_id: u64, columns: &[&str], rows: &[Row], options: &ConsoleOptions) -> String {
    format!(
        "{rule}\nBatch: {batch_id}\n{rule}\n{table}\n",
        rule = BATCH_RULE,
        table = render_table(columns, rows, options),
    )
}

/// Table for `rows`, limited to `options.num_rows`.
pub fn render_table(columns: &[&str], rows: &[Row], options: &ConsoleOptions) -> String {
    let shown = &rows[..rows.len().min(options.num_rows)];

    let header: Vec<String> = columns.iter().map(|c| fit(c, options.truncate)).collect();
    let body: Vec<Vec<String>> = shown
        .iter()
        .map(|row| {
            (0..columns.len())
                .map(|i| fit(row.get(i).unwrap_or(NULL_CELL), options.truncate))
                .collect()
        })
        .collect();

    let mut widths = vec![MIN_COLUMN_WIDTH; columns.len()];
    for line in std::iter::once(&header).chain(body.iter()) {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = format!(
        "+{}+\n",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("+")
    );
    let right_align = options.truncate.is_some();

    let mut table = String::new();
    table.push_str(&separator);
    table.push_str(&render_line(&header, &widths, right_align));
    table.push_str(&separator);
    for line in &body {
        table.push_str(&render_line(line, &widths, right_align));
    }
    table.push_str(&separator);

    if rows.len() > options.num_rows {
        let noun = if options.num_rows == 1 { "row" } else { "rows" };
        table.push_str(&format!("only showing top {} {}\n", options.num_rows, noun));
    }
    table
}

fn render_line(cells: &[String], widths: &[usize], right_align: bool) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            if right_align {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .collect();
    format!("|{}|\n", padded.join("|"))
}

fn fit(cell: &str, truncate: Option<usize>) -> String {
    match truncate {
        Some(limit) if cell.chars().count() > limit => {
            if limit < 4 {
                cell.chars().take(limit).collect()
            } else {
                let mut cut: String = cell.chars().take(limit - 3).collect();
                cut.push_str("...");
                cut
            }
        }
        _ => cell.to_string(),
    }
}
