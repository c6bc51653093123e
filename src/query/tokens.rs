//! Token definitions and lexical analysis for path expressions.
//!
//! The lexer converts a raw expression string into a flat token sequence with
//! byte offsets, which the parser consumes.

use crate::error::{PipelineError, PipelineResult};

/// Tokens of the path-expression language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Subexpression separator (`.`)
    Dot,
    /// Wildcard selector (`*`)
    Star,
    /// Left bracket (`[`)
    LeftBracket,
    /// Right bracket (`]`)
    RightBracket,
    /// Left brace (`{`)
    LeftBrace,
    /// Right brace (`}`)
    RightBrace,
    /// Key/value separator in a multi-select hash (`:`)
    Colon,
    /// Element separator in a multi-select hash (`,`)
    Comma,
    /// Field or output-key identifier
    Identifier(String),
    /// Integer literal (array index)
    Integer(i64),
    /// End of input
    Eof,
}

/// A token plus the byte offset it starts at in the source expression.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub offset: usize,
}

/// Tokenize an expression into a sequence ending with [`Token::Eof`].
///
/// Fails with [`PipelineError::QuerySyntax`] on any character outside the
/// language.
pub fn tokenize(expression: &str) -> PipelineResult<Vec<SpannedToken>> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '.' => simple(&mut chars, Token::Dot),
            '*' => simple(&mut chars, Token::Star),
            '[' => simple(&mut chars, Token::LeftBracket),
            ']' => simple(&mut chars, Token::RightBracket),
            '{' => simple(&mut chars, Token::LeftBrace),
            '}' => simple(&mut chars, Token::RightBrace),
            ':' => simple(&mut chars, Token::Colon),
            ',' => simple(&mut chars, Token::Comma),
            c if c.is_ascii_alphabetic() || c == '_' => lex_identifier(&mut chars),
            c if c.is_ascii_digit() || c == '-' => lex_integer(&mut chars, offset)?,
            other => {
                return Err(PipelineError::QuerySyntax {
                    offset,
                    message: format!("unexpected character '{other}'"),
                });
            }
        };
        tokens.push(SpannedToken { token, offset });
    }

    tokens.push(SpannedToken {
        token: Token::Eof,
        offset: expression.len(),
    });
    Ok(tokens)
}

fn simple(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>, token: Token) -> Token {
    chars.next();
    token
}

fn lex_identifier(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> Token {
    let mut name = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    Token::Identifier(name)
}

fn lex_integer(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    offset: usize,
) -> PipelineResult<Token> {
    let mut digits = String::new();
    if let Some(&(_, '-')) = chars.peek() {
        digits.push('-');
        chars.next();
    }
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_digit() {
            digits.push(c);
            chars.next();
        } else {
            break;
        }
    }
    digits
        .parse::<i64>()
        .map(Token::Integer)
        .map_err(|_| PipelineError::QuerySyntax {
            offset,
            message: format!("invalid integer literal '{digits}'"),
        })
}
