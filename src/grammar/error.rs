use thiserror::Error;

use super::position::Position;

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a grammar fails to compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{kind} at {pos}")]
    Syntax { kind: SyntaxError, pos: Position },

    #[error("undefined rule identifier '{0}'")]
    UndefinedRule(String),

    #[error("rule '{name}' is defined more than once, redefinition at {pos}")]
    DuplicateRule { name: String, pos: Position },

    #[error("grammar contains no rule definitions")]
    EmptyGrammar,

    #[error("start rule '{0}' is not defined")]
    MissingStartRule(String),
}

impl Error {
    /// Position of the offending input, if the error has one.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Syntax { pos, .. } | Error::DuplicateRule { pos, .. } => Some(*pos),
            _ => None,
        }
    }
}

/// Malformed input at a specific position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("unterminated string literal")]
    UnterminatedLiteral,
    #[error("unterminated character class")]
    UnterminatedClass,
    #[error("unknown escape '\\{0}'")]
    UnknownEscape(char),
    #[error("escape U+{0:X} is not a unicode scalar value")]
    InvalidCodePoint(u32),
    #[error("expecting name")]
    ExpectingName,
    #[error("expecting '::='")]
    ExpectingDefinition,
    #[error("empty alternation")]
    EmptyAlternation,
    #[error("malformed character range")]
    MalformedRange,
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("expecting ')'")]
    ExpectingCloseParen,
    #[error("expecting preceding item to */+/?")]
    MissingQuantifierOperand,
    #[error("expecting newline or end")]
    ExpectingNewline,
    #[error("groups nested deeper than {0}")]
    NestingTooDeep(usize),
}
