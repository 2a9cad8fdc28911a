use std::error::Error;
use std::fmt;

use crate::grammar::RuleId;
use crate::token::Token;

/// Structural defect in a rule table, detected at `Grammar` construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    UnknownRule { referenced_by: RuleId, missing: RuleId },
    MissingInitialRule(RuleId),
    NoRules,
    ZeroWidthPattern { name: String },
    InvalidPattern { name: String, message: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::UnknownRule { referenced_by, missing } => write!(
                f,
                "rule {referenced_by} references unknown rule {missing}"
            ),
            GrammarError::MissingInitialRule(id) => {
                write!(f, "initial rule {id} is not present in the rule table")
            }
            GrammarError::NoRules => write!(f, "grammar has no rules and no default initial rule"),
            GrammarError::ZeroWidthPattern { name } => {
                write!(f, "lexer pattern {name:?} can match a zero-width string")
            }
            GrammarError::InvalidPattern { name, message } => {
                write!(f, "lexer pattern {name:?} is not a valid regex: {message}")
            }
        }
    }
}

impl Error for GrammarError {}

/// Lexer failed to match any pattern at some offset in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub offset: usize,
    pub preview: String,
}

impl LexError {
    pub fn new(offset: usize, preview: impl Into<String>) -> Self {
        Self {
            offset,
            preview: preview.into(),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized token at offset {}: {:?}",
            self.offset, self.preview
        )
    }
}

impl Error for LexError {}

/// Top-level parse failed to reduce the initial rule to end of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserRuntimeError {
    pub furthest: Token,
}

impl ParserRuntimeError {
    pub fn new(furthest: Token) -> Self {
        Self { furthest }
    }
}

impl fmt::Display for ParserRuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected token: {}", self.furthest)
    }
}

impl Error for ParserRuntimeError {}

/// Everything `Parser::parse` can fail with. `Io` sits outside the three
/// failure kinds the engine itself defines: it comes from resolving a
/// `Source` before the lexer ever sees a string.
#[derive(Debug)]
pub enum ParseFailure {
    Grammar(GrammarError),
    Lex(LexError),
    Runtime(ParserRuntimeError),
    Io(std::io::Error),
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::Grammar(e) => write!(f, "{e}"),
            ParseFailure::Lex(e) => write!(f, "{e}"),
            ParseFailure::Runtime(e) => write!(f, "{e}"),
            ParseFailure::Io(e) => write!(f, "failed to read source: {e}"),
        }
    }
}

impl From<std::io::Error> for ParseFailure {
    fn from(e: std::io::Error) -> Self {
        ParseFailure::Io(e)
    }
}

impl Error for ParseFailure {}

impl From<GrammarError> for ParseFailure {
    fn from(e: GrammarError) -> Self {
        ParseFailure::Grammar(e)
    }
}

impl From<LexError> for ParseFailure {
    fn from(e: LexError) -> Self {
        ParseFailure::Lex(e)
    }
}

impl From<ParserRuntimeError> for ParseFailure {
    fn from(e: ParserRuntimeError) -> Self {
        ParseFailure::Runtime(e)
    }
}
