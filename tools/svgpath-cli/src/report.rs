//! Parse and compile reports.
//!
//! Each report has a JSON form (serde) and a plain text form (`Display`).

use std::fmt;
use std::path::Path as FsPath;
use svgpath::{
    compile, CompileError, Command, Diagnostic, ParserConfig, Path, PathDataParser, PathEvent,
    Rect,
};
use svgpath_common::{OptionExt, Result};
use tracing::{debug, info};

/// Collect path data strings from positional arguments or an input file.
///
/// The file holds one path data string per line; blank lines are skipped.
pub fn read_inputs(data: Vec<String>, input: Option<&FsPath>) -> Result<Vec<String>> {
    let data = match input {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            let lines: Vec<String> = content
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect();
            info!(path = %path.display(), lines = lines.len(), "Read path data");
            lines
        }
        None => data,
    };

    (!data.is_empty())
        .then_some(data)
        .ok_or_invalid("no path data given")
}

/// Commands parsed from a batch of path data strings.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ParseReport {
    pub commands: Vec<Command>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseReport {
    /// Parse each string independently, concatenating the results.
    pub fn build(data: &[String], config: ParserConfig) -> Self {
        let mut report = Self {
            commands: Vec::new(),
            diagnostics: Vec::new(),
        };

        for text in data {
            let (commands, diagnostics) =
                PathDataParser::with_config(text, config).parse_with_diagnostics();
            report.commands.extend(commands);
            report.diagnostics.extend(diagnostics);
        }

        debug!(
            commands = report.commands.len(),
            diagnostics = report.diagnostics.len(),
            "Parsed path data"
        );
        report
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            writeln!(f, "{}", command)?;
        }
        for diagnostic in &self.diagnostics {
            writeln!(f, "warning: {}", diagnostic)?;
        }
        Ok(())
    }
}

/// Why a compile stopped, in reportable form.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompileFailure {
    pub index: usize,
    pub category: &'static str,
    pub message: String,
}

impl From<&CompileError> for CompileFailure {
    fn from(error: &CompileError) -> Self {
        Self {
            index: error.index(),
            category: error.category(),
            message: error.to_string(),
        }
    }
}

/// The primitive operations a batch of path data compiles to.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompileReport {
    pub events: Vec<PathEvent>,
    pub bounding_box: Option<Rect>,
    pub error: Option<CompileFailure>,
}

impl CompileReport {
    /// Parse and compile every string into one path.
    ///
    /// On failure the report still holds everything drawn before the
    /// offending command.
    pub fn build(data: &[String], config: ParserConfig) -> Self {
        let commands = ParseReport::build(data, config).commands;
        let mut path = Path::new();
        let error = compile(commands, &mut path).err();

        Self {
            events: path.events().to_vec(),
            bounding_box: path.bounding_box(),
            error: error.as_ref().map(CompileFailure::from),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for CompileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{}", event)?;
        }
        match self.bounding_box {
            Some(rect) => writeln!(
                f,
                "bounding box: x={} y={} width={} height={}",
                rect.x, rect.y, rect.width, rect.height
            ),
            None => writeln!(f, "bounding box: none"),
        }
    }
}
