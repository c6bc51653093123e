//! Recursive-descent parser producing an [`Expr`] tree from a token stream.
//!
//! Grammar (whitespace insignificant):
//!
//! ```text
//! expression  := chain EOF
//! chain       := primary ( '.' primary | '[' INTEGER ']' | '[' '*' ']' chain? )*
//! primary     := IDENTIFIER | multiselect
//! multiselect := '{' IDENTIFIER ':' chain ( ',' IDENTIFIER ':' chain )* '}'
//! ```
//!
//! A `[*]` binds the remainder of its chain as the projection's right-hand
//! side, so `book[*].title` projects `title` over every element of `book`.

use crate::error::{PipelineError, PipelineResult};

use super::ast::{Expr, KeyedExpr};
use super::tokens::{SpannedToken, Token, tokenize};

/// Parse an expression string into an AST.
pub fn parse(expression: &str) -> PipelineResult<Expr> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_chain()?;
    parser.expect_eof()?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &SpannedToken {
        // The token stream always ends with Eof, which is never consumed.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> SpannedToken {
        let t = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn syntax_error(&self, message: impl Into<String>) -> PipelineError {
        PipelineError::QuerySyntax {
            offset: self.peek().offset,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: &Token, what: &str) -> PipelineResult<()> {
        if &self.peek().token == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.syntax_error(format!("expected {what}")))
        }
    }

    fn expect_eof(&self) -> PipelineResult<()> {
        match self.peek().token {
            Token::Eof => Ok(()),
            _ => Err(self.syntax_error("expected end of expression")),
        }
    }

    fn parse_chain(&mut self) -> PipelineResult<Expr> {
        let first = self.parse_primary()?;
        self.parse_rest(first)
    }

    fn parse_rest(&mut self, mut lhs: Expr) -> PipelineResult<Expr> {
        loop {
            match self.peek().token {
                Token::Dot => {
                    self.advance();
                    let rhs = self.parse_primary()?;
                    lhs = Expr::chained(lhs, rhs);
                }
                Token::LeftBracket => {
                    self.advance();
                    match self.peek().token.clone() {
                        Token::Star => {
                            self.advance();
                            self.expect(&Token::RightBracket, "']' after '*'")?;
                            // Everything after a wildcard belongs to the
                            // projection's right-hand side.
                            let rhs = self.parse_projection_rhs()?;
                            return Ok(Expr::Projection {
                                lhs: Box::new(lhs),
                                rhs: Box::new(rhs),
                            });
                        }
                        Token::Integer(index) => {
                            self.advance();
                            self.expect(&Token::RightBracket, "']' after index")?;
                            lhs = Expr::chained(lhs, Expr::Index(index));
                        }
                        _ => return Err(self.syntax_error("expected '*' or integer index after '['")),
                    }
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn parse_projection_rhs(&mut self) -> PipelineResult<Expr> {
        match self.peek().token {
            Token::Dot => {
                self.advance();
                let first = self.parse_primary()?;
                self.parse_rest(first)
            }
            Token::LeftBracket => self.parse_rest(Expr::Identity),
            _ => Ok(Expr::Identity),
        }
    }

    fn parse_primary(&mut self) -> PipelineResult<Expr> {
        match self.peek().token.clone() {
            Token::Identifier(name) => {
                self.advance();
                Ok(Expr::Field(name))
            }
            Token::LeftBrace => self.parse_multiselect_hash(),
            _ => Err(self.syntax_error("expected identifier or multi-select hash")),
        }
    }

    fn parse_multiselect_hash(&mut self) -> PipelineResult<Expr> {
        self.expect(&Token::LeftBrace, "'{'")?;
        let mut entries = Vec::new();
        loop {
            let key = match self.peek().token.clone() {
                Token::Identifier(name) => {
                    self.advance();
                    name
                }
                _ => return Err(self.syntax_error("expected output key identifier")),
            };
            self.expect(&Token::Colon, "':' after output key")?;
            let expr = self.parse_chain()?;
            entries.push(KeyedExpr { key, expr });

            match self.peek().token {
                Token::Comma => {
                    self.advance();
                }
                Token::RightBrace => {
                    self.advance();
                    return Ok(Expr::MultiSelectHash(entries));
                }
                _ => return Err(self.syntax_error("expected ',' or '}' in multi-select hash")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::error::PipelineError;
    use crate::query::ast::{Expr, KeyedExpr};

    #[test]
    fn parses_nested_field_chain() {
        assert_eq!(
            parse("store.bicycle.color").unwrap(),
            Expr::SubExpr {
                lhs: Box::new(Expr::SubExpr {
                    lhs: Box::new(Expr::Field("store".to_string())),
                    rhs: Box::new(Expr::Field("bicycle".to_string())),
                }),
                rhs: Box::new(Expr::Field("color".to_string())),
            }
        );
    }

    #[test]
    fn parses_projection_with_multiselect_hash() {
        assert_eq!(
            parse("store.book[*].{Title: title, Price: price}").unwrap(),
            Expr::Projection {
                lhs: Box::new(Expr::SubExpr {
                    lhs: Box::new(Expr::Field("store".to_string())),
                    rhs: Box::new(Expr::Field("book".to_string())),
                }),
                rhs: Box::new(Expr::MultiSelectHash(vec![
                    KeyedExpr {
                        key: "Title".to_string(),
                        expr: Expr::Field("title".to_string()),
                    },
                    KeyedExpr {
                        key: "Price".to_string(),
                        expr: Expr::Field("price".to_string()),
                    },
                ])),
            }
        );
    }

    #[test]
    fn parses_bare_wildcard_as_identity_projection() {
        assert_eq!(
            parse("book[*]").unwrap(),
            Expr::Projection {
                lhs: Box::new(Expr::Field("book".to_string())),
                rhs: Box::new(Expr::Identity),
            }
        );
    }

    #[test]
    fn parses_index_access() {
        assert_eq!(
            parse("book[0].title").unwrap(),
            Expr::SubExpr {
                lhs: Box::new(Expr::SubExpr {
                    lhs: Box::new(Expr::Field("book".to_string())),
                    rhs: Box::new(Expr::Index(0)),
                }),
                rhs: Box::new(Expr::Field("title".to_string())),
            }
        );
    }

    #[test]
    fn rejects_trailing_dot() {
        let err = parse("store.").unwrap_err();
        assert!(matches!(err, PipelineError::QuerySyntax { offset: 6, .. }));
    }

    #[test]
    fn rejects_unclosed_bracket() {
        let err = parse("book[*").unwrap_err();
        assert!(err.to_string().contains("']'"));
    }

    #[test]
    fn rejects_empty_multiselect_hash() {
        let err = parse("book[*].{}").unwrap_err();
        assert!(err.to_string().contains("output key"));
    }

    #[test]
    fn rejects_missing_colon() {
        let err = parse("book[*].{Title title}").unwrap_err();
        assert!(err.to_string().contains("':'"));
    }

    #[test]
    fn rejects_empty_expression() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, PipelineError::QuerySyntax { offset: 0, .. }));
    }
}
