//! Parser configuration.

/// How the two flag operands of an elliptical arc are lexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcFlagLexing {
    /// Flags are ordinary decimal numbers, true when nonzero.
    ///
    /// `A5 5 0 11 10 10` reads `11` as a single operand.
    #[default]
    Decimal,
    /// At a flag position a lone `0` or `1` is a complete operand, so
    /// `A5 5 0 1110 10` has both flags set and ends at `10 10`.
    SingleDigit,
}

/// Path data parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// Arc flag lexing mode.
    pub arc_flags: ArcFlagLexing,
}

impl ParserConfig {
    /// Lenient configuration (the default).
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Lex arc flags the way the SVG grammar defines them.
    pub fn strict_arcs() -> Self {
        Self {
            arc_flags: ArcFlagLexing::SingleDigit,
        }
    }

    /// Set the arc flag lexing mode.
    pub fn with_arc_flags(mut self, arc_flags: ArcFlagLexing) -> Self {
        self.arc_flags = arc_flags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_default() {
        let config = ParserConfig::default();
        assert_eq!(config.arc_flags, ArcFlagLexing::Decimal);
        assert_eq!(config, ParserConfig::lenient());
    }

    #[test]
    fn test_parser_config_strict_arcs() {
        let config = ParserConfig::strict_arcs();
        assert_eq!(config.arc_flags, ArcFlagLexing::SingleDigit);
        assert_eq!(
            ParserConfig::default().with_arc_flags(ArcFlagLexing::SingleDigit),
            config
        );
    }
}
