use super::Lexer;
use crate::error::LexError;
use crate::token::Token;

/// Lazily scans a source string one token at a time. `Lexer::lex` drains this
/// into a materialized `Vec` before handing tokens to a `TokenBuffer`, but the
/// scanning itself never looks ahead further than the next match.
pub struct Lex<'a> {
    lexer: &'a Lexer,
    source: &'a str,
    offset: usize,
    done: bool,
}

impl<'a> Lex<'a> {
    pub(super) fn new(lexer: &'a Lexer, source: &'a str) -> Self {
        Self {
            lexer,
            source,
            offset: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for Lex<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done || self.offset >= self.source.len() {
                return None;
            }

            match self.lexer.match_at(self.source, self.offset) {
                Some((name, value)) => {
                    let start = self.offset;
                    let advance = value.len();
                    self.offset += advance;
                    if self.lexer.should_skip(&name) {
                        continue;
                    }
                    return Some(Ok(Token::new(name, value, start)));
                }
                None => {
                    self.done = true;
                    let preview: String = self.source[self.offset..]
                        .chars()
                        .take(16)
                        .collect();
                    return Some(Err(LexError::new(self.offset, preview)));
                }
            }
        }
    }
}
