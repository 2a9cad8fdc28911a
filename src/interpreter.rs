use crate::ast::Value;
use crate::builder::Builder;
use crate::buffer::TokenBuffer;
use crate::grammar::{Grammar, Rule, RuleId, UNBOUNDED};
use crate::token::Token;

/// Outcome of reducing a single rule. `NoMatch` is an ordinary control
/// signal, not an error; it must never escape the parser façade.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
    Matched(Value),
    NoMatch,
}

/// Per-invocation state threaded through the recursion by reference. Kept
/// out of the interpreter/grammar themselves so nothing here is shared
/// across parses.
pub struct ReduceContext {
    furthest_index: usize,
}

impl ReduceContext {
    pub fn new(start_index: usize) -> Self {
        Self {
            furthest_index: start_index,
        }
    }

    /// Records a buffer cursor position reached during the parse, whether or
    /// not the rule that reached it ultimately backtracked.
    fn note(&mut self, index: usize) {
        if index > self.furthest_index {
            self.furthest_index = index;
        }
    }

    pub fn furthest_index(&self) -> usize {
        self.furthest_index
    }

    /// Resolves the deepest cursor position reached to the token worth
    /// reporting. The end-of-input sentinel itself is never useful as an
    /// error location, so when the deepest position landed on it this steps
    /// back to the last real token instead.
    pub fn furthest_token(&self, buffer: &TokenBuffer) -> Token {
        let token = buffer.token_at(self.furthest_index);
        if token.is_eoi() && self.furthest_index > 0 {
            buffer.token_at(self.furthest_index - 1).clone()
        } else {
            token.clone()
        }
    }
}

/// Recursively reduces `id` against `buffer`, guided by `grammar`, handing
/// successful productions to `builder`. Every alternative attempt snapshots
/// the buffer cursor first and restores it on failure, so a `NoMatch` always
/// leaves the buffer exactly as it found it.
pub fn reduce(
    grammar: &Grammar,
    buffer: &mut TokenBuffer,
    id: &RuleId,
    builder: &dyn Builder,
    ctx: &mut ReduceContext,
) -> Reduction {
    let rule = grammar
        .get(id)
        .unwrap_or_else(|| panic!("rule {id} missing from a validated grammar"));

    match rule {
        Rule::Terminal { token_name, keep } => {
            let token = buffer.current().clone();
            if token.name != *token_name {
                return Reduction::NoMatch;
            }
            buffer.next();
            ctx.note(buffer.key());
            let value = if *keep {
                Value::Token(token)
            } else {
                Value::empty()
            };
            Reduction::Matched(value)
        }

        Rule::Concatenation { children, .. } => {
            let bookmark = buffer.key();
            let mut raw = Vec::new();
            for child in children {
                match reduce(grammar, buffer, child, builder, ctx) {
                    Reduction::Matched(v) => v.flatten_into(&mut raw),
                    Reduction::NoMatch => {
                        buffer.seek(bookmark);
                        return Reduction::NoMatch;
                    }
                }
            }
            Reduction::Matched(builder.build(rule, raw))
        }

        Rule::Alternation { children, .. } => {
            let bookmark = buffer.key();
            for child in children {
                match reduce(grammar, buffer, child, builder, ctx) {
                    Reduction::Matched(v) => {
                        return Reduction::Matched(builder.build(rule, vec![v]));
                    }
                    Reduction::NoMatch => buffer.seek(bookmark),
                }
            }
            Reduction::NoMatch
        }

        Rule::Repetition { child, min, max, .. } => {
            let entry = buffer.key();
            let mut raw = Vec::new();
            let mut count = 0usize;
            loop {
                let bookmark = buffer.key();
                match reduce(grammar, buffer, child, builder, ctx) {
                    Reduction::Matched(v) => {
                        v.flatten_into(&mut raw);
                        count += 1;
                        if *max != UNBOUNDED && count as i64 == *max {
                            break;
                        }
                    }
                    Reduction::NoMatch => {
                        buffer.seek(bookmark);
                        break;
                    }
                }
            }
            if count < *min {
                buffer.seek(entry);
                return Reduction::NoMatch;
            }
            Reduction::Matched(builder.build(rule, raw))
        }
    }
}
