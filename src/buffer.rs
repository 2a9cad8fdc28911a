use crate::token::Token;

/// A random-access, bookmarkable view over a materialized token sequence.
/// Backtracking needs O(1) `seek`, which rules out a forward-only stream, so
/// the full sequence is eagerly collected up front.
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    index: usize,
}

impl TokenBuffer {
    /// `tokens` must already end with the end-of-input sentinel.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    /// The token at the cursor. Once past the end of the stream this keeps
    /// returning the final (end-of-input) token rather than panicking.
    pub fn current(&self) -> &Token {
        self.token_at(self.index)
    }

    /// The token at an arbitrary index, independent of the current cursor.
    /// Out-of-range indices clamp to the final (end-of-input) token.
    pub fn token_at(&self, index: usize) -> &Token {
        self.tokens
            .get(index)
            .unwrap_or_else(|| self.tokens.last().expect("token stream always has T_EOI"))
    }

    /// Advances the cursor by one. A no-op once the end-of-input token has
    /// been reached.
    pub fn next(&mut self) {
        if self.index < self.tokens.len() - 1 {
            self.index += 1;
        }
    }

    pub fn key(&self) -> usize {
        self.index
    }

    pub fn seek(&mut self, index: usize) {
        assert!(index < self.tokens.len(), "seek out of bounds");
        self.index = index;
    }
}
