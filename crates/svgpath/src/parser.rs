//! Path data tokenizer.
//!
//! A single left-to-right scan over the input, one character at a time.
//! Numbers are accumulated in a token buffer and flushed into the operand
//! list of the current command letter on separators, on signs and on a
//! second decimal point. A letter closes out the command in progress.
//!
//! The scan never fails. Tokens that do not parse as numbers are dropped
//! and commands with the wrong operand count become [`Command::Invalid`];
//! both are recorded as [`Diagnostic`]s.

use crate::command::{command_arity, Command};
use crate::config::{ArcFlagLexing, ParserConfig};
use thiserror::Error;
use tracing::{debug, trace};

/// Something the parser recovered from.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// A numeric token that did not parse and was dropped.
    ///
    /// `offset` counts characters, not bytes, from the start of the input.
    #[error("dropped unparsable number {token:?} at character {offset}")]
    LexicalDrop { token: String, offset: usize },

    /// A command letter followed by the wrong number of operands.
    #[error("command {letter} expects {expected} operands, got {actual}")]
    ArityMismatch {
        letter: char,
        expected: usize,
        actual: usize,
    },

    /// Numbers seen before any command letter.
    #[error("discarded {count} operands preceding the first command")]
    StrayArguments { count: usize },
}

/// Path data parser.
pub struct PathDataParser<'a> {
    input: &'a str,
    config: ParserConfig,
    /// Letter of the command whose operands are being collected.
    current_letter: Option<char>,
    /// Characters of the number in progress.
    token: String,
    /// Character index (not byte offset) where `token` started.
    token_start: usize,
    /// Operands collected for `current_letter`.
    args: Vec<f64>,
    commands: Vec<Command>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> PathDataParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Self {
            input,
            config,
            current_letter: None,
            token: String::new(),
            token_start: 0,
            args: Vec::new(),
            commands: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Parse the input into commands.
    pub fn parse(self) -> Vec<Command> {
        self.parse_with_diagnostics().0
    }

    /// Parse the input, also returning what the parser had to recover from.
    pub fn parse_with_diagnostics(mut self) -> (Vec<Command>, Vec<Diagnostic>) {
        for (offset, ch) in self.input.chars().enumerate() {
            self.consume(offset, ch);
        }
        self.flush_argument();
        self.finish_command();

        (self.commands, self.diagnostics)
    }

    fn consume(&mut self, offset: usize, ch: char) {
        if command_arity(ch).is_some() {
            self.flush_argument();
            self.finish_command();
            self.current_letter = Some(ch);
        } else if ch == ',' || ch.is_ascii_whitespace() {
            self.flush_argument();
        } else if ch == '-' {
            // A sign starts a new number.
            self.flush_argument();
            self.start_token(offset, ch);
        } else if ch == '.' && self.token.contains('.') {
            // So does a second decimal point: `0.25.75` is two numbers.
            self.flush_argument();
            self.start_token(offset, ch);
        } else if (ch == '0' || ch == '1') && self.at_compact_flag() {
            self.start_token(offset, ch);
            self.flush_argument();
        } else {
            if self.token.is_empty() {
                self.token_start = offset;
            }
            self.token.push(ch);
        }
    }

    fn start_token(&mut self, offset: usize, ch: char) {
        self.token.clear();
        self.token.push(ch);
        self.token_start = offset;
    }

    /// Whether the next operand is an arc flag lexed as a single digit.
    fn at_compact_flag(&self) -> bool {
        self.config.arc_flags == ArcFlagLexing::SingleDigit
            && self.token.is_empty()
            && matches!(self.current_letter, Some('A' | 'a'))
            && matches!(self.args.len(), 3 | 4)
    }

    /// Move the number in progress into the operand list.
    ///
    /// If the current command already has all its operands, it is emitted
    /// first and the number becomes the first operand of a repeated command
    /// with the same letter (`L 10 10 20 20` is two line-tos). A token that
    /// does not parse never starts a repeat.
    fn flush_argument(&mut self) {
        if self.token.is_empty() {
            return;
        }
        let token = std::mem::take(&mut self.token);

        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                if let Some(letter) = self.current_letter {
                    if command_arity(letter) == Some(self.args.len()) {
                        self.emit_command(letter);
                    }
                }
                self.args.push(value);
            }
            _ => {
                debug!(token = %token, offset = self.token_start, "Dropping unparsable number");
                self.diagnostics.push(Diagnostic::LexicalDrop {
                    token,
                    offset: self.token_start,
                });
            }
        }
    }

    /// Close out the command in progress, if any.
    fn finish_command(&mut self) {
        match self.current_letter.take() {
            Some(letter) => self.emit_command(letter),
            None if !self.args.is_empty() => {
                let count = self.args.len();
                debug!(count, "Discarding operands before first command");
                self.diagnostics.push(Diagnostic::StrayArguments { count });
                self.args.clear();
            }
            None => {}
        }
    }

    fn emit_command(&mut self, letter: char) {
        let command = Command::from_args(letter, &self.args);
        self.args.clear();

        if let Command::Invalid {
            letter,
            expected,
            actual,
        } = command
        {
            debug!(%letter, expected, actual, "Arity mismatch");
            self.diagnostics.push(Diagnostic::ArityMismatch {
                letter,
                expected,
                actual,
            });
        } else {
            trace!(command = %command, "Emitting command");
        }

        self.commands.push(command);
    }
}

/// Parse a path data string.
pub fn parse(text: &str) -> Vec<Command> {
    PathDataParser::new(text).parse()
}

/// Parse a path data string with the given configuration.
pub fn parse_with_config(text: &str, config: ParserConfig) -> Vec<Command> {
    PathDataParser::with_config(text, config).parse()
}

/// Parse several path data strings independently and concatenate the results.
pub fn parse_all<I, S>(texts: I) -> Vec<Command>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .flat_map(|text| parse(text.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Point, Vector};

    #[test]
    fn test_parse_simple() {
        let commands = parse("M 10 20 L 30 40 Z");
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(Point::new(10.0, 20.0)),
                Command::LineTo(Point::new(30.0, 40.0)),
                Command::Close,
            ]
        );
    }

    #[test]
    fn test_implicit_repetition() {
        let commands = parse("L 10 10 20 20");
        assert_eq!(
            commands,
            vec![
                Command::LineTo(Point::new(10.0, 10.0)),
                Command::LineTo(Point::new(20.0, 20.0)),
            ]
        );
    }

    #[test]
    fn test_repeated_moveto_keeps_letter() {
        let commands = parse("m1 2 3 4");
        assert_eq!(
            commands,
            vec![
                Command::MoveToRel(Vector::new(1.0, 2.0)),
                Command::MoveToRel(Vector::new(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn test_second_decimal_point_starts_number() {
        let commands = parse("M0.25.75");
        assert_eq!(commands, vec![Command::MoveTo(Point::new(0.25, 0.75))]);
    }

    #[test]
    fn test_minus_starts_number() {
        let commands = parse("l-5-5");
        assert_eq!(commands, vec![Command::LineToRel(Vector::new(-5.0, -5.0))]);
    }

    #[test]
    fn test_no_separator_after_letter() {
        let commands = parse("M10,20L30,40H5V6z");
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(Point::new(10.0, 20.0)),
                Command::LineTo(Point::new(30.0, 40.0)),
                Command::HorizontalTo(5.0),
                Command::VerticalTo(6.0),
                Command::Close,
            ]
        );
    }

    #[test]
    fn test_whitespace_separators() {
        let commands = parse("M 1\t2\nL\r\n3 4");
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(Point::new(1.0, 2.0)),
                Command::LineTo(Point::new(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn test_missing_operand_is_invalid() {
        let (commands, diagnostics) = PathDataParser::new("M 10 L 5 5").parse_with_diagnostics();
        assert_eq!(
            commands[0],
            Command::Invalid {
                letter: 'M',
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(commands[1], Command::LineTo(Point::new(5.0, 5.0)));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::ArityMismatch {
                letter: 'M',
                expected: 2,
                actual: 1
            }]
        );
    }

    #[test]
    fn test_extra_operand_is_invalid() {
        // The third number starts a repeated L that never gets its y.
        let commands = parse("L 1 2 3");
        assert_eq!(
            commands,
            vec![
                Command::LineTo(Point::new(1.0, 2.0)),
                Command::Invalid {
                    letter: 'L',
                    expected: 2,
                    actual: 1
                },
            ]
        );
    }

    #[test]
    fn test_close_with_operand() {
        let commands = parse("M0 0Z 5");
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(Point::new(0.0, 0.0)),
                Command::Close,
                Command::Invalid {
                    letter: 'Z',
                    expected: 0,
                    actual: 1
                },
            ]
        );
    }

    #[test]
    fn test_unparsable_token_is_dropped() {
        let (commands, diagnostics) = PathDataParser::new("M 1 2 L 3 x 4").parse_with_diagnostics();
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(Point::new(1.0, 2.0)),
                Command::LineTo(Point::new(3.0, 4.0)),
            ]
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::LexicalDrop {
                token: "x".to_string(),
                offset: 10
            }]
        );
    }

    #[test]
    fn test_dropped_token_after_complete_command() {
        let (commands, diagnostics) = PathDataParser::new("M0 0 L1 2 x").parse_with_diagnostics();
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(Point::new(0.0, 0.0)),
                Command::LineTo(Point::new(1.0, 2.0)),
            ]
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::LexicalDrop {
                token: "x".to_string(),
                offset: 10
            }]
        );

        // A dropped token between repeats leaves the repeats intact.
        let commands = parse("L1 2 x 3 4");
        assert_eq!(
            commands,
            vec![
                Command::LineTo(Point::new(1.0, 2.0)),
                Command::LineTo(Point::new(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn test_drop_offset_counts_characters() {
        // The degree sign is two bytes in UTF-8 but a single character.
        let (_, diagnostics) = PathDataParser::new("M° 1 2 L 3 x 4").parse_with_diagnostics();
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::LexicalDrop {
                    token: "°".to_string(),
                    offset: 1
                },
                Diagnostic::LexicalDrop {
                    token: "x".to_string(),
                    offset: 11
                },
            ]
        );
    }

    #[test]
    fn test_non_finite_token_is_dropped() {
        let (commands, diagnostics) = PathDataParser::new("M inf 1 2").parse_with_diagnostics();
        assert_eq!(commands, vec![Command::MoveTo(Point::new(1.0, 2.0))]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_stray_arguments_are_discarded() {
        let (commands, diagnostics) = PathDataParser::new("1 2 M 3 4").parse_with_diagnostics();
        assert_eq!(commands, vec![Command::MoveTo(Point::new(3.0, 4.0))]);
        assert_eq!(diagnostics, vec![Diagnostic::StrayArguments { count: 2 }]);
    }

    #[test]
    fn test_exponent() {
        let commands = parse("M1e2 2.5E1");
        assert_eq!(commands, vec![Command::MoveTo(Point::new(100.0, 25.0))]);
    }

    #[test]
    fn test_arc_decimal_flags() {
        let commands = parse("A5 5 0 1 0 10 10");
        assert_eq!(
            commands,
            vec![Command::ArcTo {
                radii: Vector::new(5.0, 5.0),
                x_rotation: 0.0,
                large_arc: true,
                sweep: false,
                to: Point::new(10.0, 10.0),
            }]
        );

        // Compact flags are one operand in lenient mode.
        let commands = parse("A5 5 0 1110 10");
        assert_eq!(
            commands,
            vec![Command::Invalid {
                letter: 'A',
                expected: 7,
                actual: 5
            }]
        );
    }

    #[test]
    fn test_arc_single_digit_flags() {
        let commands = parse_with_config("a5 5 30 1110 10", ParserConfig::strict_arcs());
        assert_eq!(
            commands,
            vec![Command::ArcToRel {
                radii: Vector::new(5.0, 5.0),
                x_rotation: 30.0,
                large_arc: true,
                sweep: true,
                to: Vector::new(10.0, 10.0),
            }]
        );

        let commands = parse_with_config("A5,5,0,0,1,7,8 1 1 0 0 1 2 3", ParserConfig::strict_arcs());
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[0],
            Command::ArcTo {
                large_arc: false,
                sweep: true,
                ..
            }
        ));
        assert!(matches!(
            commands[1],
            Command::ArcTo {
                large_arc: false,
                sweep: true,
                to: Point { x: 2.0, y: 3.0 },
                ..
            }
        ));
    }

    #[test]
    fn test_parse_all_is_independent() {
        let commands = parse_all(["M 0 0 L 1", "M 2 2"]);
        assert_eq!(
            commands,
            vec![
                Command::MoveTo(Point::new(0.0, 0.0)),
                Command::Invalid {
                    letter: 'L',
                    expected: 2,
                    actual: 1
                },
                Command::MoveTo(Point::new(2.0, 2.0)),
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let data = "M0,0 C10,10 20,0 30,0 S50,10 60,0 q1-2.5.5.5t3 4z";
        assert_eq!(parse(data), parse(data));
    }
}
