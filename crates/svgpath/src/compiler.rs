//! Command interpreter.
//!
//! Replays parsed commands against a [`PathSink`], resolving relative
//! operands against the current point and deriving the implicit control
//! points of smooth curves.

use crate::command::Command;
use crate::geom::{Point, Vector};
use crate::PathSink;
use thiserror::Error;
use tracing::{debug, trace};

/// Why compilation stopped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A relative or single-axis command appeared before any move-to.
    #[error("command {index} ({command}) requires a current point")]
    MissingCurrentPoint { index: usize, command: Command },

    /// Commands the interpreter does not draw: smooth relative curves,
    /// elliptical arcs and invalid commands.
    #[error("command {index} ({command}) is not supported")]
    UnsupportedCommand { index: usize, command: Command },
}

impl CompileError {
    /// Position of the offending command in the sequence.
    pub fn index(&self) -> usize {
        match self {
            CompileError::MissingCurrentPoint { index, .. }
            | CompileError::UnsupportedCommand { index, .. } => *index,
        }
    }

    /// The offending command.
    pub fn command(&self) -> &Command {
        match self {
            CompileError::MissingCurrentPoint { command, .. }
            | CompileError::UnsupportedCommand { command, .. } => command,
        }
    }

    /// Get the error category for reporting.
    pub fn category(&self) -> &'static str {
        match self {
            CompileError::MissingCurrentPoint { .. } => "missing_current_point",
            CompileError::UnsupportedCommand { .. } => "unsupported_command",
        }
    }
}

/// Interpreter state, discarded when compilation ends.
#[derive(Debug, Default)]
struct CursorState {
    current_point: Option<Point>,
    /// Second control point of the preceding cubic, if the preceding
    /// command was one.
    last_cubic_control: Option<Point>,
    /// Control point of the preceding quadratic, if the preceding command
    /// was one.
    last_quadratic_control: Option<Point>,
    subpath_start: Option<Point>,
}

struct Compiler<'s, S: PathSink + ?Sized> {
    sink: &'s mut S,
    state: CursorState,
}

impl<'s, S: PathSink + ?Sized> Compiler<'s, S> {
    fn new(sink: &'s mut S) -> Self {
        let state = CursorState {
            current_point: sink.current_point(),
            ..CursorState::default()
        };
        Self { sink, state }
    }

    fn process_command(&mut self, index: usize, command: Command) -> Result<(), CompileError> {
        trace!(index, command = %command, "Processing command");

        match command {
            Command::MoveTo(to) => self.move_to(to),
            Command::MoveToRel(delta) => {
                let from = self.current(index, command)?;
                self.move_to(from + delta);
            }
            Command::LineTo(to) => self.line_to(to),
            Command::LineToRel(delta) => {
                let from = self.current(index, command)?;
                self.line_to(from + delta);
            }
            Command::HorizontalTo(x) => {
                let from = self.current(index, command)?;
                self.line_to(Point::new(x, from.y));
            }
            Command::HorizontalToRel(dx) => {
                let from = self.current(index, command)?;
                self.line_to(from + Vector::new(dx, 0.0));
            }
            Command::VerticalTo(y) => {
                let from = self.current(index, command)?;
                self.line_to(Point::new(from.x, y));
            }
            Command::VerticalToRel(dy) => {
                let from = self.current(index, command)?;
                self.line_to(from + Vector::new(0.0, dy));
            }
            Command::CubicTo { ctrl1, ctrl2, to } => self.cubic_to(ctrl1, ctrl2, to),
            Command::CubicToRel { ctrl1, ctrl2, to } => {
                let from = self.current(index, command)?;
                self.cubic_to(from + ctrl1, from + ctrl2, from + to);
            }
            Command::SmoothCubicTo { ctrl2, to } => {
                let from = self.current(index, command)?;
                // Without a preceding cubic the reflection is the current point.
                let ctrl1 = self
                    .state
                    .last_cubic_control
                    .map_or(from, |last| from.reflect(last));
                self.cubic_to(ctrl1, ctrl2, to);
            }
            Command::QuadTo { ctrl, to } => self.quadratic_to(ctrl, to),
            Command::QuadToRel { ctrl, to } => {
                let from = self.current(index, command)?;
                self.quadratic_to(from + ctrl, from + to);
            }
            Command::SmoothQuadTo(to) => {
                let from = self.current(index, command)?;
                let ctrl = self
                    .state
                    .last_quadratic_control
                    .map_or(from, |last| from.reflect(last));
                self.quadratic_to(ctrl, to);
            }
            Command::Close => self.close(),
            Command::SmoothCubicToRel { .. }
            | Command::SmoothQuadToRel(_)
            | Command::ArcTo { .. }
            | Command::ArcToRel { .. }
            | Command::Invalid { .. } => {
                return Err(CompileError::UnsupportedCommand { index, command });
            }
        }

        Ok(())
    }

    fn current(&self, index: usize, command: Command) -> Result<Point, CompileError> {
        self.state
            .current_point
            .ok_or(CompileError::MissingCurrentPoint { index, command })
    }

    fn move_to(&mut self, to: Point) {
        self.sink.move_to(to);
        self.state.subpath_start = Some(to);
        self.advance(to);
    }

    fn line_to(&mut self, to: Point) {
        self.sink.line_to(to);
        self.advance(to);
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.sink.cubic_curve_to(to, ctrl1, ctrl2);
        self.advance(to);
        self.state.last_cubic_control = Some(ctrl2);
    }

    fn quadratic_to(&mut self, ctrl: Point, to: Point) {
        self.sink.quadratic_curve_to(to, ctrl);
        self.advance(to);
        self.state.last_quadratic_control = Some(ctrl);
    }

    fn close(&mut self) {
        self.sink.close_subpath();
        let back_to = self.sink.current_point().or(self.state.subpath_start);
        self.state.current_point = back_to;
        self.state.last_cubic_control = None;
        self.state.last_quadratic_control = None;
    }

    /// Move the cursor and forget the reflection points; curve commands
    /// set their own afterwards.
    fn advance(&mut self, to: Point) {
        self.state.current_point = Some(to);
        self.state.last_cubic_control = None;
        self.state.last_quadratic_control = None;
    }
}

/// Replay `commands` against `sink`.
///
/// Stops at the first command that cannot be drawn. Everything issued to
/// the sink before that point stays in the sink.
pub fn compile<I, S>(commands: I, sink: &mut S) -> Result<(), CompileError>
where
    I: IntoIterator<Item = Command>,
    S: PathSink + ?Sized,
{
    let mut compiler = Compiler::new(sink);

    for (index, command) in commands.into_iter().enumerate() {
        if let Err(err) = compiler.process_command(index, command) {
            debug!(index, error = %err, "Aborting path compilation");
            return Err(err);
        }
    }

    Ok(())
}
