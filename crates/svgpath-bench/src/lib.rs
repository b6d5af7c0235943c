//! # svgpath Bench
//!
//! Path data corpora and measurement helpers for the svgpath benchmarks.
//!
//! ## Features
//!
//! - Deterministic path data generation in several writing styles
//! - Per-corpus statistics (size, command and event counts, diagnostics)
//! - JSON reports
//!
//! ## Usage
//!
//! ```rust,ignore
//! use svgpath_bench::{generate_path_data, CorpusReport, CorpusStats, CorpusStyle};
//!
//! let data = generate_path_data(1000, CorpusStyle::Compact);
//! let mut report = CorpusReport::new("compact");
//! report.add(CorpusStats::measure("compact_1000", &data)?);
//! report.print_summary();
//! ```

use serde::{Deserialize, Serialize};
use svgpath::{build_path, IncompletePath, PathDataParser};
use thiserror::Error;
use tracing::debug;

/// Benchmark errors.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corpus does not compile: {0}")]
    Compile(#[from] IncompletePath),
}

/// How generated path data is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorpusStyle {
    /// Absolute commands, space separated.
    Absolute,
    /// Relative commands where the interpreter supports them.
    Relative,
    /// Relative commands with every optional separator left out.
    Compact,
}

impl CorpusStyle {
    pub const ALL: [CorpusStyle; 3] = [
        CorpusStyle::Absolute,
        CorpusStyle::Relative,
        CorpusStyle::Compact,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CorpusStyle::Absolute => "absolute",
            CorpusStyle::Relative => "relative",
            CorpusStyle::Compact => "compact",
        }
    }
}

/// Generate a closed path of `segments` drawing commands after an initial
/// move-to.
///
/// The output is deterministic and always compiles.
pub fn generate_path_data(segments: usize, style: CorpusStyle) -> String {
    let relative = style != CorpusStyle::Absolute;
    let compact = style == CorpusStyle::Compact;
    let mut out = String::with_capacity(segments * 24);
    out.push_str("M 0 0");

    for i in 0..segments {
        let a = (i % 17) as f64 + 0.5;
        let b = -((i % 11) as f64) - 0.25;
        out.push(if compact { '\n' } else { ' ' });

        // Smooth commands stay absolute: only their absolute forms draw.
        let (letter, numbers): (char, Vec<f64>) = match (i % 6, relative) {
            (0, false) => ('L', vec![a * 4.0, a * 2.0]),
            (0, true) => ('l', vec![a, b]),
            (1, false) => ('C', vec![a, a * 2.0, a * 3.0, a, a * 4.0, a * 2.0]),
            (1, true) => ('c', vec![a, b, a * 2.0, b, a * 3.0, -b]),
            (2, _) => ('S', vec![a * 5.0, a, a * 6.0, a * 3.0]),
            (3, false) => ('Q', vec![a * 2.0, a * 5.0, a * 3.0, a]),
            (3, true) => ('q', vec![a, a, a * 2.0, b]),
            (4, _) => ('T', vec![a * 7.0, a * 2.0]),
            (_, false) => ('H', vec![a * 3.0]),
            (_, true) => ('v', vec![b]),
        };

        out.push(letter);
        push_numbers(&mut out, &numbers, compact);
    }

    out.push_str(if compact { "z" } else { " Z" });
    out
}

fn push_numbers(out: &mut String, numbers: &[f64], compact: bool) {
    for (i, n) in numbers.iter().enumerate() {
        // A minus sign already starts a new number.
        let needs_separator = !compact || (i > 0 && *n >= 0.0);
        if needs_separator {
            out.push(if compact { ',' } else { ' ' });
        }
        out.push_str(&n.to_string());
    }
}

/// Measurements for one corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Name of the corpus.
    pub name: String,
    /// Size of the path data in bytes.
    pub bytes: usize,
    /// Parsed commands.
    pub commands: usize,
    /// Primitive operations after compilation.
    pub events: usize,
    /// Parser diagnostics.
    pub diagnostics: usize,
}

impl CorpusStats {
    /// Parse and compile `data`, recording the sizes involved.
    pub fn measure(name: impl Into<String>, data: &str) -> Result<Self, BenchError> {
        let name = name.into();
        let (commands, diagnostics) = PathDataParser::new(data).parse_with_diagnostics();
        let path = build_path(data)?;

        debug!(corpus = %name, commands = commands.len(), "Measured corpus");

        Ok(Self {
            name,
            bytes: data.len(),
            commands: commands.len(),
            events: path.len(),
            diagnostics: diagnostics.len(),
        })
    }

    /// Print a summary line.
    pub fn print_line(&self) {
        println!(
            "{:30} {:>10} B {:>8} cmds {:>8} events {:>4} diag",
            self.name, self.bytes, self.commands, self.events, self.diagnostics
        );
    }
}

/// A collection of corpus measurements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusReport {
    pub name: String,
    pub stats: Vec<CorpusStats>,
}

impl CorpusReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stats: Vec::new(),
        }
    }

    pub fn add(&mut self, stats: CorpusStats) {
        self.stats.push(stats);
    }

    /// Measure every style at each of the given sizes.
    pub fn standard(sizes: &[usize]) -> Result<Self, BenchError> {
        let mut report = Self::new("standard");
        for &size in sizes {
            for style in CorpusStyle::ALL {
                let data = generate_path_data(size, style);
                report.add(CorpusStats::measure(
                    format!("{}_{}", style.name(), size),
                    &data,
                )?);
            }
        }
        Ok(report)
    }

    pub fn print_summary(&self) {
        println!("\n=== {} ===", self.name);
        for stats in &self.stats {
            stats.print_line();
        }
    }

    /// Save the report as JSON.
    pub fn save_json(&self, path: impl AsRef<std::path::Path>) -> Result<(), BenchError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
