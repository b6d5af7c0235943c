//! Path data commands.
//!
//! One variant per SVG path command letter, absolute and relative forms
//! kept apart. Relative operands are [`Vector`]s, absolute ones [`Point`]s.
//! See <https://www.w3.org/TR/SVG/paths.html#PathData>.

use crate::geom::{Point, Vector};
use std::fmt;

/// A single path data command.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// `M x y`
    MoveTo(Point),
    /// `m dx dy`
    MoveToRel(Vector),
    /// `L x y`
    LineTo(Point),
    /// `l dx dy`
    LineToRel(Vector),
    /// `H x`
    HorizontalTo(f64),
    /// `h dx`
    HorizontalToRel(f64),
    /// `V y`
    VerticalTo(f64),
    /// `v dy`
    VerticalToRel(f64),
    /// `C x1 y1 x2 y2 x y`
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    /// `c dx1 dy1 dx2 dy2 dx dy`
    CubicToRel { ctrl1: Vector, ctrl2: Vector, to: Vector },
    /// `S x2 y2 x y`
    SmoothCubicTo { ctrl2: Point, to: Point },
    /// `s dx2 dy2 dx dy`
    SmoothCubicToRel { ctrl2: Vector, to: Vector },
    /// `Q x1 y1 x y`
    QuadTo { ctrl: Point, to: Point },
    /// `q dx1 dy1 dx dy`
    QuadToRel { ctrl: Vector, to: Vector },
    /// `T x y`
    SmoothQuadTo(Point),
    /// `t dx dy`
    SmoothQuadToRel(Vector),
    /// `A rx ry x-axis-rotation large-arc-flag sweep-flag x y`
    ArcTo {
        radii: Vector,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    /// `a rx ry x-axis-rotation large-arc-flag sweep-flag dx dy`
    ArcToRel {
        radii: Vector,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Vector,
    },
    /// `Z` or `z`
    Close,
    /// A command letter followed by the wrong number of operands.
    Invalid {
        letter: char,
        expected: usize,
        actual: usize,
    },
}

/// Number of operands the command letter takes, or `None` if `letter` is
/// not a path command.
pub fn command_arity(letter: char) -> Option<usize> {
    match letter {
        'M' | 'm' | 'L' | 'l' | 'T' | 't' => Some(2),
        'H' | 'h' | 'V' | 'v' => Some(1),
        'C' | 'c' => Some(6),
        'S' | 's' | 'Q' | 'q' => Some(4),
        'A' | 'a' => Some(7),
        'Z' | 'z' => Some(0),
        _ => None,
    }
}

impl Command {
    /// Build the command for `letter` from its operands.
    ///
    /// Returns [`Command::Invalid`] when the operand count does not match
    /// the letter's arity.
    pub fn from_args(letter: char, args: &[f64]) -> Command {
        let p = |x: f64, y: f64| Point::new(x, y);
        let v = |x: f64, y: f64| Vector::new(x, y);

        match (letter, args) {
            ('M', &[x, y]) => Command::MoveTo(p(x, y)),
            ('m', &[x, y]) => Command::MoveToRel(v(x, y)),
            ('L', &[x, y]) => Command::LineTo(p(x, y)),
            ('l', &[x, y]) => Command::LineToRel(v(x, y)),
            ('H', &[x]) => Command::HorizontalTo(x),
            ('h', &[x]) => Command::HorizontalToRel(x),
            ('V', &[y]) => Command::VerticalTo(y),
            ('v', &[y]) => Command::VerticalToRel(y),
            ('C', &[x1, y1, x2, y2, x, y]) => Command::CubicTo {
                ctrl1: p(x1, y1),
                ctrl2: p(x2, y2),
                to: p(x, y),
            },
            ('c', &[x1, y1, x2, y2, x, y]) => Command::CubicToRel {
                ctrl1: v(x1, y1),
                ctrl2: v(x2, y2),
                to: v(x, y),
            },
            ('S', &[x2, y2, x, y]) => Command::SmoothCubicTo {
                ctrl2: p(x2, y2),
                to: p(x, y),
            },
            ('s', &[x2, y2, x, y]) => Command::SmoothCubicToRel {
                ctrl2: v(x2, y2),
                to: v(x, y),
            },
            ('Q', &[x1, y1, x, y]) => Command::QuadTo {
                ctrl: p(x1, y1),
                to: p(x, y),
            },
            ('q', &[x1, y1, x, y]) => Command::QuadToRel {
                ctrl: v(x1, y1),
                to: v(x, y),
            },
            ('T', &[x, y]) => Command::SmoothQuadTo(p(x, y)),
            ('t', &[x, y]) => Command::SmoothQuadToRel(v(x, y)),
            ('A', &[rx, ry, rotation, large_arc, sweep, x, y]) => Command::ArcTo {
                radii: v(rx, ry),
                x_rotation: rotation,
                large_arc: large_arc != 0.0,
                sweep: sweep != 0.0,
                to: p(x, y),
            },
            ('a', &[rx, ry, rotation, large_arc, sweep, x, y]) => Command::ArcToRel {
                radii: v(rx, ry),
                x_rotation: rotation,
                large_arc: large_arc != 0.0,
                sweep: sweep != 0.0,
                to: v(x, y),
            },
            ('Z' | 'z', &[]) => Command::Close,
            _ => Command::Invalid {
                letter,
                expected: command_arity(letter).unwrap_or(0),
                actual: args.len(),
            },
        }
    }

    /// The path data letter for this command.
    ///
    /// `Close` always reports `Z` since both spellings parse to it.
    pub fn letter(&self) -> char {
        match self {
            Command::MoveTo(_) => 'M',
            Command::MoveToRel(_) => 'm',
            Command::LineTo(_) => 'L',
            Command::LineToRel(_) => 'l',
            Command::HorizontalTo(_) => 'H',
            Command::HorizontalToRel(_) => 'h',
            Command::VerticalTo(_) => 'V',
            Command::VerticalToRel(_) => 'v',
            Command::CubicTo { .. } => 'C',
            Command::CubicToRel { .. } => 'c',
            Command::SmoothCubicTo { .. } => 'S',
            Command::SmoothCubicToRel { .. } => 's',
            Command::QuadTo { .. } => 'Q',
            Command::QuadToRel { .. } => 'q',
            Command::SmoothQuadTo(_) => 'T',
            Command::SmoothQuadToRel(_) => 't',
            Command::ArcTo { .. } => 'A',
            Command::ArcToRel { .. } => 'a',
            Command::Close => 'Z',
            Command::Invalid { letter, .. } => *letter,
        }
    }

    pub fn is_relative(&self) -> bool {
        self.letter().is_ascii_lowercase()
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Command::Invalid { .. })
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.letter();
        match *self {
            Command::MoveTo(to) | Command::LineTo(to) | Command::SmoothQuadTo(to) => {
                write!(f, "{} {}", letter, to)
            }
            Command::MoveToRel(to) | Command::LineToRel(to) | Command::SmoothQuadToRel(to) => {
                write!(f, "{} {}", letter, to)
            }
            Command::HorizontalTo(value)
            | Command::HorizontalToRel(value)
            | Command::VerticalTo(value)
            | Command::VerticalToRel(value) => write!(f, "{} {}", letter, value),
            Command::CubicTo { ctrl1, ctrl2, to } => {
                write!(f, "{} {} {} {}", letter, ctrl1, ctrl2, to)
            }
            Command::CubicToRel { ctrl1, ctrl2, to } => {
                write!(f, "{} {} {} {}", letter, ctrl1, ctrl2, to)
            }
            Command::SmoothCubicTo { ctrl2, to } | Command::QuadTo { ctrl: ctrl2, to } => {
                write!(f, "{} {} {}", letter, ctrl2, to)
            }
            Command::SmoothCubicToRel { ctrl2, to } | Command::QuadToRel { ctrl: ctrl2, to } => {
                write!(f, "{} {} {}", letter, ctrl2, to)
            }
            Command::ArcTo {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "{} {} {} {} {} {}",
                letter,
                radii,
                x_rotation,
                flag(large_arc),
                flag(sweep),
                to
            ),
            Command::ArcToRel {
                radii,
                x_rotation,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "{} {} {} {} {} {}",
                letter,
                radii,
                x_rotation,
                flag(large_arc),
                flag(sweep),
                to
            ),
            Command::Close => write!(f, "Z"),
            Command::Invalid {
                letter,
                expected,
                actual,
            } => write!(
                f,
                "<invalid {}: expected {} operands, got {}>",
                letter, expected, actual
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTERS: &str = "MmLlHhVvCcSsQqTtAaZz";

    #[test]
    fn test_arity_table() {
        for letter in LETTERS.chars() {
            assert!(command_arity(letter).is_some(), "{}", letter);
        }
        assert_eq!(command_arity('C'), Some(6));
        assert_eq!(command_arity('a'), Some(7));
        assert_eq!(command_arity('z'), Some(0));
        assert_eq!(command_arity('e'), None);
        assert_eq!(command_arity('B'), None);
    }

    #[test]
    fn test_exact_arity_is_valid() {
        for letter in LETTERS.chars() {
            let arity = command_arity(letter).unwrap();
            let args = vec![1.0; arity];
            let command = Command::from_args(letter, &args);
            assert!(!command.is_invalid(), "{} -> {:?}", letter, command);
        }
    }

    #[test]
    fn test_wrong_arity_is_invalid() {
        for letter in LETTERS.chars() {
            let arity = command_arity(letter).unwrap();
            let more = Command::from_args(letter, &vec![1.0; arity + 1]);
            assert_eq!(
                more,
                Command::Invalid {
                    letter,
                    expected: arity,
                    actual: arity + 1
                }
            );
            if arity > 0 {
                let fewer = Command::from_args(letter, &vec![1.0; arity - 1]);
                assert_eq!(
                    fewer,
                    Command::Invalid {
                        letter,
                        expected: arity,
                        actual: arity - 1
                    }
                );
            }
        }
    }

    #[test]
    fn test_letter_round_trips() {
        for letter in "MmLlHhVvCcSsQqTtAa".chars() {
            let arity = command_arity(letter).unwrap();
            let command = Command::from_args(letter, &vec![0.0; arity]);
            assert_eq!(command.letter(), letter);
            assert_eq!(command.is_relative(), letter.is_ascii_lowercase());
        }
        assert_eq!(Command::from_args('z', &[]).letter(), 'Z');
    }

    #[test]
    fn test_arc_flags_are_nonzero_tests() {
        let command = Command::from_args('A', &[5.0, 5.0, 30.0, 0.0, 2.5, 10.0, 10.0]);
        assert!(matches!(
            command,
            Command::ArcTo {
                large_arc: false,
                sweep: true,
                ..
            }
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::from_args('L', &[10.0, 20.0]).to_string(), "L 10 20");
        assert_eq!(
            Command::from_args('c', &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).to_string(),
            "c 1 2 3 4 5 6"
        );
        assert_eq!(
            Command::from_args('A', &[5.0, 5.0, 0.0, 1.0, 0.0, 10.0, 10.0]).to_string(),
            "A 5 5 0 1 0 10 10"
        );
        assert_eq!(Command::Close.to_string(), "Z");
        assert_eq!(Command::from_args('h', &[-2.5]).to_string(), "h -2.5");
    }
}
