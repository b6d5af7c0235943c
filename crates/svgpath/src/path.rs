//! A recording path sink.

use crate::compiler::{compile, CompileError};
use crate::command::Command;
use crate::geom::{Point, Rect};
use crate::PathSink;
use std::fmt;
use thiserror::Error;

/// A primitive drawing operation with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEvent {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    QuadraticTo { ctrl: Point, to: Point },
    Close,
}

impl fmt::Display for PathEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathEvent::MoveTo(to) => write!(f, "M {}", to),
            PathEvent::LineTo(to) => write!(f, "L {}", to),
            PathEvent::CubicTo { ctrl1, ctrl2, to } => write!(f, "C {} {} {}", ctrl1, ctrl2, to),
            PathEvent::QuadraticTo { ctrl, to } => write!(f, "Q {} {}", ctrl, to),
            PathEvent::Close => write!(f, "Z"),
        }
    }
}

/// A path built from primitive operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    events: Vec<PathEvent>,
    subpath_start: Option<Point>,
    current: Option<Point>,
}

/// A path whose compilation stopped early, together with the reason.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("incomplete path: {error}")]
pub struct IncompletePath {
    /// Everything drawn before the failing command.
    pub path: Path,
    #[source]
    pub error: CompileError,
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile commands into a new path.
    pub fn from_commands<I>(commands: I) -> Result<Self, IncompletePath>
    where
        I: IntoIterator<Item = Command>,
    {
        let mut path = Path::new();
        match compile(commands, &mut path) {
            Ok(()) => Ok(path),
            Err(error) => Err(IncompletePath { path, error }),
        }
    }

    /// Get the recorded events.
    pub fn events(&self) -> &[PathEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Bounds of everything the path covers, curve extrema included and
    /// control points excluded. `None` for an empty path.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        let mut include = |p: Point| {
            bounds = Some(match bounds {
                Some(mut rect) => {
                    rect.include(p);
                    rect
                }
                None => Rect::from_point(p),
            });
        };

        let mut from = None;
        let mut start = None;
        for event in &self.events {
            match *event {
                PathEvent::MoveTo(to) => {
                    include(to);
                    start = Some(to);
                    from = Some(to);
                }
                PathEvent::LineTo(to) => {
                    include(to);
                    from = Some(to);
                }
                PathEvent::CubicTo { ctrl1, ctrl2, to } => {
                    if let Some(p0) = from {
                        for t in cubic_extrema(p0, ctrl1, ctrl2, to).into_iter().flatten() {
                            include(cubic_point(p0, ctrl1, ctrl2, to, t));
                        }
                    }
                    include(to);
                    from = Some(to);
                }
                PathEvent::QuadraticTo { ctrl, to } => {
                    if let Some(p0) = from {
                        for t in quadratic_extrema(p0, ctrl, to).into_iter().flatten() {
                            include(quadratic_point(p0, ctrl, to, t));
                        }
                    }
                    include(to);
                    from = Some(to);
                }
                PathEvent::Close => from = start,
            }
        }

        bounds
    }

    /// Bounds of every point of the path, control points included.
    pub fn control_bounds(&self) -> Option<Rect> {
        let mut points = self.events.iter().flat_map(|event| match *event {
            PathEvent::MoveTo(to) | PathEvent::LineTo(to) => vec![to],
            PathEvent::CubicTo { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
            PathEvent::QuadraticTo { ctrl, to } => vec![ctrl, to],
            PathEvent::Close => Vec::new(),
        });

        let mut bounds = Rect::from_point(points.next()?);
        for p in points {
            bounds.include(p);
        }
        Some(bounds)
    }
}

impl PathSink for Path {
    fn move_to(&mut self, to: Point) {
        self.events.push(PathEvent::MoveTo(to));
        self.subpath_start = Some(to);
        self.current = Some(to);
    }

    fn line_to(&mut self, to: Point) {
        self.events.push(PathEvent::LineTo(to));
        self.current = Some(to);
    }

    fn cubic_curve_to(&mut self, to: Point, control1: Point, control2: Point) {
        self.events.push(PathEvent::CubicTo {
            ctrl1: control1,
            ctrl2: control2,
            to,
        });
        self.current = Some(to);
    }

    fn quadratic_curve_to(&mut self, to: Point, control: Point) {
        self.events.push(PathEvent::QuadraticTo { ctrl: control, to });
        self.current = Some(to);
    }

    fn close_subpath(&mut self) {
        self.events.push(PathEvent::Close);
        self.current = self.subpath_start;
    }

    fn current_point(&self) -> Option<Point> {
        self.current
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, event) in self.events.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", event)?;
        }
        Ok(())
    }
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

fn quadratic_point(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let c = t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}

/// Parameters in (0, 1) where the cubic's derivative vanishes on either axis.
fn cubic_extrema(p0: Point, p1: Point, p2: Point, p3: Point) -> [Option<f64>; 4] {
    let [x0, x1] = cubic_axis_extrema(p0.x, p1.x, p2.x, p3.x);
    let [y0, y1] = cubic_axis_extrema(p0.y, p1.y, p2.y, p3.y);
    [x0, x1, y0, y1]
}

fn cubic_axis_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> [Option<f64>; 2] {
    // Derivative / 3 = a t^2 + b t + c
    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 2.0 * (p0 - 2.0 * p1 + p2);
    let c = p1 - p0;
    let inside = |t: f64| (t > 0.0 && t < 1.0).then_some(t);
    let tolerance = degeneracy_tolerance(&[p0, p1, p2, p3]);

    if a.abs() < tolerance {
        if b.abs() < tolerance {
            return [None, None];
        }
        return [inside(-c / b), None];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return [None, None];
    }
    let root = discriminant.sqrt();
    [
        inside((-b + root) / (2.0 * a)),
        inside((-b - root) / (2.0 * a)),
    ]
}

/// Coefficients below this are rounding noise from coordinates of this size.
fn degeneracy_tolerance(coords: &[f64]) -> f64 {
    let magnitude = coords.iter().fold(1.0_f64, |max, c| max.max(c.abs()));
    f64::EPSILON * magnitude
}

fn quadratic_extrema(p0: Point, p1: Point, p2: Point) -> [Option<f64>; 2] {
    let axis = |p0: f64, p1: f64, p2: f64| {
        let denominator = p0 - 2.0 * p1 + p2;
        if denominator.abs() < degeneracy_tolerance(&[p0, p1, p2]) {
            return None;
        }
        let t = (p0 - p1) / denominator;
        (t > 0.0 && t < 1.0).then_some(t)
    };
    [axis(p0.x, p1.x, p2.x), axis(p0.y, p1.y, p2.y)]
}
