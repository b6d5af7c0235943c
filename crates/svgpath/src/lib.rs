//! # svgpath
//!
//! SVG path data parsing and interpretation.
//!
//! ## Features
//!
//! - **Parsing**: the `d` attribute mini-language into typed [`Command`]s,
//!   including implicit command repetition and separator-less numbers
//! - **Interpretation**: relative coordinates, single-axis lines and smooth
//!   curve reflection resolved into absolute primitive operations
//! - **Sinks**: any path builder implementing [`PathSink`]; [`Path`]
//!   records the operations and reports bounds
//!
//! ## Architecture
//!
//! ```text
//! path data ──► PathDataParser ──► [Command] ──► compile ──► PathSink
//!                     │                                         └── Path
//!                     └── Diagnostic (dropped tokens, arity mismatches)
//! ```
//!
//! ## Usage
//!
//! ```
//! use svgpath::{build_path, Point};
//!
//! let path = build_path("M0,0 C10,10 20,0 30,0 S50,10 60,0").unwrap();
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.bounding_box().unwrap().min(), Point::new(0.0, 0.0));
//! ```

pub mod command;
pub mod compiler;
pub mod config;
pub mod geom;
pub mod parser;
pub mod path;

pub use command::{command_arity, Command};
pub use compiler::{compile, CompileError};
pub use config::{ArcFlagLexing, ParserConfig};
pub use geom::{Point, Rect, Vector};
pub use parser::{parse, parse_all, parse_with_config, Diagnostic, PathDataParser};
pub use path::{IncompletePath, Path, PathEvent};

/// Trait for receiving primitive drawing operations.
///
/// Implemented by path builders that accumulate the output of [`compile`].
/// All coordinates are absolute.
pub trait PathSink {
    /// Start a new subpath at `to`.
    fn move_to(&mut self, to: Point);

    /// Straight segment from the current point to `to`.
    fn line_to(&mut self, to: Point);

    /// Cubic Bézier segment from the current point to `to`.
    fn cubic_curve_to(&mut self, to: Point, control1: Point, control2: Point);

    /// Quadratic Bézier segment from the current point to `to`.
    fn quadratic_curve_to(&mut self, to: Point, control: Point);

    /// Close the current subpath back to its starting point.
    fn close_subpath(&mut self);

    /// The point the next segment starts from, if any.
    fn current_point(&self) -> Option<Point>;
}

/// Parse `data` and compile it into a [`Path`].
///
/// On failure the error still carries the part of the path built before
/// the offending command.
pub fn build_path(data: &str) -> Result<Path, IncompletePath> {
    Path::from_commands(parse(data))
}

/// Like [`build_path`], with a parser configuration.
pub fn build_path_with_config(data: &str, config: ParserConfig) -> Result<Path, IncompletePath> {
    Path::from_commands(parse_with_config(data, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_path() {
        let path = build_path("M 0 0 L 10 0 L 10 10 Z").unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.bounding_box(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_build_path_failure_keeps_prefix() {
        let err = build_path("M 0 0 L 10 0 t 5 5").unwrap_err();
        assert_eq!(err.path.len(), 2);
        assert!(matches!(err.error, CompileError::UnsupportedCommand { index: 2, .. }));
    }

    #[test]
    fn test_build_path_with_config() {
        let err = build_path_with_config("M0 0 a5 5 0 1110 10", ParserConfig::strict_arcs())
            .unwrap_err();
        assert!(matches!(
            err.error.command(),
            Command::ArcToRel {
                large_arc: true,
                sweep: true,
                ..
            }
        ));
    }

    #[test]
    fn test_sink_as_trait_object() {
        let mut path = Path::new();
        let sink: &mut dyn PathSink = &mut path;
        compile(parse("M 1 2 h 3"), sink).unwrap();
        assert_eq!(path.current_point(), Some(Point::new(4.0, 2.0)));
    }
}
