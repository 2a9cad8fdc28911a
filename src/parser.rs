use log::{debug, trace};

use crate::ast::Value;
use crate::builder::{Builder, DefaultBuilder};
use crate::buffer::TokenBuffer;
use crate::error::{ParseFailure, ParserRuntimeError};
use crate::grammar::Grammar;
use crate::interpreter::{reduce, ReduceContext, Reduction};
use crate::lexer::Lexer;
use crate::source::Source;

/// Wires a [`Lexer`], a [`Grammar`] and a tree [`Builder`] behind a single
/// `parse` entry point.
pub struct Parser {
    lexer: Lexer,
    grammar: Grammar,
    builder: Box<dyn Builder>,
}

impl Parser {
    pub fn new(lexer: Lexer, grammar: Grammar) -> Self {
        Self::with_builder(lexer, grammar, Box::new(DefaultBuilder))
    }

    pub fn with_builder(lexer: Lexer, grammar: Grammar, builder: Box<dyn Builder>) -> Self {
        Self {
            lexer,
            grammar,
            builder,
        }
    }

    pub fn parse(&self, source: impl Into<Source>) -> Result<Value, ParseFailure> {
        let source = source.into();
        let contents = source.contents()?;
        trace!("read {} bytes of source", contents.len());

        let tokens = self.lexer.lex(&contents)?;
        debug!("lexed {} tokens", tokens.len());

        let mut buffer = TokenBuffer::new(tokens);
        let mut ctx = ReduceContext::new(buffer.key());

        let initial = self.grammar.initial().clone();
        let outcome = reduce(
            &self.grammar,
            &mut buffer,
            &initial,
            self.builder.as_ref(),
            &mut ctx,
        );

        match outcome {
            Reduction::Matched(value) if buffer.current().is_eoi() => {
                debug!("parse succeeded");
                Ok(value)
            }
            _ => {
                let furthest = ctx.furthest_token(&buffer);
                debug!("parse failed, furthest token reached: {}", furthest);
                Err(ParserRuntimeError::new(furthest).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Rule, RuleId, UNBOUNDED};
    use std::collections::HashSet;

    fn json_like_parser() -> Parser {
        let mut skip = HashSet::new();
        skip.insert("WS".to_string());
        let lexer = Lexer::new(
            vec![
                ("WS", r"[ \t\r\n]+"),
                ("TRUE", r"true"),
                ("FALSE", r"false"),
                ("NULL", r"null"),
                ("STRING", r#""[^"]*""#),
                ("NUMBER", r"-?[0-9]+(\.[0-9]+)?"),
                ("LBRACE", r"\{"),
                ("RBRACE", r"\}"),
                ("LBRACKET", r"\["),
                ("RBRACKET", r"\]"),
                ("COLON", r":"),
                ("COMMA", r","),
            ],
            skip,
        )
        .unwrap();

        let rules = vec![
            (
                RuleId::name("value"),
                Rule::alternation(
                    vec![
                        RuleId::name("true"),
                        RuleId::name("false"),
                        RuleId::name("null"),
                        RuleId::name("string"),
                        RuleId::name("number"),
                        RuleId::name("object"),
                        RuleId::name("array"),
                    ],
                    None,
                ),
            ),
            (RuleId::name("true"), Rule::terminal("TRUE", true)),
            (RuleId::name("false"), Rule::terminal("FALSE", true)),
            (RuleId::name("null"), Rule::terminal("NULL", true)),
            (RuleId::name("string"), Rule::terminal("STRING", true)),
            (RuleId::name("number"), Rule::terminal("NUMBER", true)),
            (
                RuleId::name("object"),
                Rule::concatenation(
                    vec![
                        RuleId::name("lbrace"),
                        RuleId::name("pair_list"),
                        RuleId::name("rbrace"),
                    ],
                    Some("object"),
                ),
            ),
            (RuleId::name("lbrace"), Rule::terminal("LBRACE", false)),
            (RuleId::name("rbrace"), Rule::terminal("RBRACE", false)),
            (
                RuleId::name("pair_list"),
                Rule::alternation(
                    vec![RuleId::name("pair_list_nonempty"), RuleId::name("empty")],
                    None,
                ),
            ),
            (
                RuleId::name("pair_list_nonempty"),
                Rule::concatenation(
                    vec![
                        RuleId::name("pair"),
                        RuleId::name("pair_tail"),
                    ],
                    None,
                ),
            ),
            (
                RuleId::name("pair_tail"),
                Rule::repetition(RuleId::name("comma_pair"), 0, UNBOUNDED, None),
            ),
            (
                RuleId::name("comma_pair"),
                Rule::concatenation(
                    vec![RuleId::name("comma"), RuleId::name("pair")],
                    None,
                ),
            ),
            (RuleId::name("comma"), Rule::terminal("COMMA", false)),
            (
                RuleId::name("pair"),
                Rule::concatenation(
                    vec![
                        RuleId::name("string"),
                        RuleId::name("colon"),
                        RuleId::name("value"),
                    ],
                    Some("pair"),
                ),
            ),
            (RuleId::name("colon"), Rule::terminal("COLON", false)),
            (RuleId::name("empty"), Rule::concatenation(vec![], None)),
            (
                RuleId::name("array"),
                Rule::concatenation(
                    vec![
                        RuleId::name("lbracket"),
                        RuleId::name("element_list"),
                        RuleId::name("rbracket"),
                    ],
                    Some("array"),
                ),
            ),
            (RuleId::name("lbracket"), Rule::terminal("LBRACKET", false)),
            (RuleId::name("rbracket"), Rule::terminal("RBRACKET", false)),
            (
                RuleId::name("element_list"),
                Rule::alternation(
                    vec![RuleId::name("element_list_nonempty"), RuleId::name("empty")],
                    None,
                ),
            ),
            (
                RuleId::name("element_list_nonempty"),
                Rule::concatenation(
                    vec![RuleId::name("value"), RuleId::name("element_tail")],
                    None,
                ),
            ),
            (
                RuleId::name("element_tail"),
                Rule::repetition(RuleId::name("comma_value"), 0, UNBOUNDED, None),
            ),
            (
                RuleId::name("comma_value"),
                Rule::concatenation(
                    vec![RuleId::name("comma"), RuleId::name("value")],
                    None,
                ),
            ),
        ];

        let grammar = Grammar::new(rules, Some(RuleId::name("value"))).unwrap();
        Parser::new(lexer, grammar)
    }

    #[test]
    fn parses_a_bare_literal() {
        let parser = json_like_parser();
        let value = parser.parse("true").unwrap();
        assert_eq!(value, Value::Token(crate::token::Token::new("TRUE", "true", 0)));
    }

    #[test]
    fn parses_an_empty_object() {
        let parser = json_like_parser();
        let value = parser.parse("{}").unwrap();
        assert_eq!(
            value,
            Value::Node {
                label: "object".to_string(),
                children: Vec::new(),
            }
        );
    }

    #[test]
    fn parses_an_object_with_one_pair() {
        let parser = json_like_parser();
        let value = parser.parse(r#"{"a":1}"#).unwrap();
        match value {
            Value::Node { label, children } => {
                assert_eq!(label, "object");
                assert_eq!(children.len(), 1);
                match &children[0] {
                    Value::Node { label, children } => {
                        assert_eq!(label, "pair");
                        assert_eq!(children.len(), 2);
                    }
                    other => panic!("expected pair node, got {other:?}"),
                }
            }
            other => panic!("expected object node, got {other:?}"),
        }
    }

    #[test]
    fn parses_an_array_of_numbers() {
        let parser = json_like_parser();
        let value = parser.parse("[1,2,3]").unwrap();
        match value {
            Value::Node { label, children } => {
                assert_eq!(label, "array");
                assert_eq!(children.len(), 3);
            }
            other => panic!("expected array node, got {other:?}"),
        }
    }

    #[test]
    fn truncated_object_reports_unexpected_token_at_brace() {
        let parser = json_like_parser();
        let err = parser.parse("{").unwrap_err();
        match err {
            ParseFailure::Runtime(e) => assert_eq!(e.furthest.offset, 0),
            other => panic!("expected a runtime error, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_symbol_is_a_lex_error() {
        let parser = json_like_parser();
        let err = parser.parse("@").unwrap_err();
        match err {
            ParseFailure::Lex(e) => assert_eq!(e.offset, 0),
            other => panic!("expected a lex error, got {other:?}"),
        }
    }

    #[test]
    fn trailing_comma_is_rejected() {
        let parser = json_like_parser();
        let err = parser.parse("[1,]").unwrap_err();
        match err {
            ParseFailure::Runtime(e) => assert_eq!(e.furthest.offset, 3),
            other => panic!("expected a runtime error, got {other:?}"),
        }
    }
}
