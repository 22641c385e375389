//! Header tokenizer
//!
//! Produces identifier, integer and punctuation tokens with line numbers.
//! Comments and preprocessor directives are skipped; the parser never
//! sees them.

use crate::error::{BindError, BindResult};

/// A lexical token kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword
    Ident(String),
    /// Integer literal (decimal or 0x hex)
    Int(i64),
    /// `::` scope separator
    ColonColon,
    /// Single punctuation character: `;{}(),*&=:[]~-`
    Punct(char),
}

/// A token with its source line (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
}

impl Token {
    fn new(kind: TokenKind, line: u32) -> Self {
        Token { kind, line }
    }
}

/// Tokenize header text
///
/// `path` is used only for error reporting.
pub fn tokenize(path: &str, text: &str) -> BindResult<Vec<Token>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut line: u32 = 1;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;

        match c {
            '\n' => {
                line += 1;
                i += 1;
            }
            c if c.is_whitespace() => {
                i += 1;
            }
            // Preprocessor directive: skip to end of line
            '#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            '/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            '/' if bytes.get(i + 1) == Some(&b'*') => {
                let start_line = line;
                i += 2;
                loop {
                    if i + 1 >= bytes.len() {
                        return Err(BindError::parse(
                            path,
                            start_line,
                            "unterminated block comment",
                        ));
                    }
                    if bytes[i] == b'*' && bytes[i + 1] == b'/' {
                        i += 2;
                        break;
                    }
                    if bytes[i] == b'\n' {
                        line += 1;
                    }
                    i += 1;
                }
            }
            ':' if bytes.get(i + 1) == Some(&b':') => {
                tokens.push(Token::new(TokenKind::ColonColon, line));
                i += 2;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < bytes.len()
                    && ((bytes[i] as char).is_ascii_alphanumeric() || bytes[i] == b'_')
                {
                    i += 1;
                }
                tokens.push(Token::new(
                    TokenKind::Ident(text[start..i].to_string()),
                    line,
                ));
            }
            c if c.is_ascii_digit() => {
                let start = i;
                let radix = if c == '0' && matches!(bytes.get(i + 1), Some(b'x') | Some(b'X')) {
                    i += 2;
                    16
                } else {
                    10
                };
                while i < bytes.len() && (bytes[i] as char).is_ascii_alphanumeric() {
                    i += 1;
                }
                let digits = if radix == 16 {
                    &text[start + 2..i]
                } else {
                    &text[start..i]
                };
                let value = i64::from_str_radix(digits, radix).map_err(|_| {
                    BindError::parse(path, line, format!("invalid integer literal '{}'", &text[start..i]))
                })?;
                tokens.push(Token::new(TokenKind::Int(value), line));
            }
            ';' | '{' | '}' | '(' | ')' | ',' | '*' | '&' | '=' | ':' | '[' | ']' | '~' | '-' => {
                tokens.push(Token::new(TokenKind::Punct(c), line));
                i += 1;
            }
            other => {
                return Err(BindError::parse(
                    path,
                    line,
                    format!("unexpected character '{}'", other),
                ));
            }
        }
    }

    Ok(tokens)
}
