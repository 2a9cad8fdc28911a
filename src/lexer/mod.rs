mod iter;

pub use iter::Lex;

use std::collections::HashSet;

use regex::Regex;

use crate::error::{GrammarError, LexError};
use crate::token::Token;

/// Compiles a set of named patterns into one scanner. Patterns are tried in
/// declaration order at every offset; Rust's `regex` crate already resolves
/// alternation leftmost-first, which is exactly the declaration-order
/// priority this component promises (not longest-match).
#[derive(Debug, Clone)]
pub struct Lexer {
    combined: Regex,
    /// Token name for each capture group, in declaration order.
    names: Vec<String>,
    skip: HashSet<String>,
}

impl Lexer {
    /// `patterns` is an ordered list of `(token_name, regex)`. `skip` names
    /// patterns whose matches are consumed but never emitted as tokens.
    pub fn new<I, S>(patterns: I, skip: HashSet<String>) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let patterns: Vec<(String, String)> = patterns
            .into_iter()
            .map(|(name, pat)| (name.into(), pat.into()))
            .collect();

        for (name, pat) in &patterns {
            let re = Regex::new(pat).map_err(|e| GrammarError::InvalidPattern {
                name: name.clone(),
                message: e.to_string(),
            })?;
            if re.is_match("") {
                return Err(GrammarError::ZeroWidthPattern { name: name.clone() });
            }
        }

        let mut names = Vec::with_capacity(patterns.len());
        let mut alternatives = Vec::with_capacity(patterns.len());
        for (i, (name, pat)) in patterns.iter().enumerate() {
            names.push(name.clone());
            alternatives.push(format!("(?P<g{i}>{pat})"));
        }
        let combined_source = alternatives.join("|");
        let combined = Regex::new(&combined_source)
            .expect("combination of already-validated patterns must itself compile");

        Ok(Self {
            combined,
            names,
            skip,
        })
    }

    /// Scans `source` end-to-end, returning a materialized token sequence
    /// terminated by the end-of-input sentinel.
    pub fn lex(&self, source: &str) -> Result<Vec<Token>, LexError> {
        let mut tokens: Vec<Token> = Lex::new(self, source).collect::<Result<_, _>>()?;
        tokens.push(Token::eoi(source.len()));
        Ok(tokens)
    }

    fn match_at(&self, source: &str, offset: usize) -> Option<(String, String)> {
        let rest = &source[offset..];
        let caps = self.combined.captures(rest)?;
        let whole = caps.get(0)?;
        if whole.start() != 0 {
            return None;
        }
        for (i, name) in self.names.iter().enumerate() {
            if let Some(m) = caps.name(&format!("g{i}")) {
                return Some((name.clone(), m.as_str().to_string()));
            }
        }
        None
    }

    fn should_skip(&self, name: &str) -> bool {
        self.skip.contains(name)
    }
}
