//! Lexer for tile descriptions
//!
//! Tokenizes source text with logos; every token carries its line and column.

use std::fmt;

use logos::Logos;

use crate::error::{Error, Result};
use crate::lane::Lane;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
pub enum Token {
    // Keywords
    #[token("module")]
    Module,
    #[token("sync")]
    Sync,

    // Lanes: w0 w1 n0 n1 e0 e1 s0 s1
    #[regex(r"[wnes][01]", |lex| lex.slice().parse::<Lane>().ok())]
    Lane(Lane),

    // Module and construction names
    #[regex(r"[A-Za-z0-9_]+", |lex| lex.slice().to_string())]
    Ident(String),

    // Wiring
    #[token("<->")]
    Passthrough,
    #[token("->")]
    Arrow,

    // Operators
    #[token("~=")]
    TildeEq,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Token::Lane(lane) => return write!(f, "lane '{}'", lane),
            Token::Ident(name) => return write!(f, "name '{}'", name),
            Token::Module => "module",
            Token::Sync => "sync",
            Token::Passthrough => "<->",
            Token::Arrow => "->",
            Token::TildeEq => "~=",
            Token::Tilde => "~",
            Token::Amp => "&",
            Token::Pipe => "|",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Semi => ";",
            Token::Comma => ",",
        };
        write!(f, "'{}'", symbol)
    }
}

/// Line and column of a token, both 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocatedToken {
    pub token: Token,
    pub loc: Location,
}

pub struct Lexer<'src> {
    source: &'src str,
    /// Byte offset at which each line begins
    line_starts: Vec<usize>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.bytes().enumerate().filter(|&(_, b)| b == b'\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, line_starts }
    }

    pub fn tokenize(&self) -> Result<Vec<LocatedToken>> {
        Token::lexer(self.source)
            .spanned()
            .map(|(token, range)| {
                let loc = self.locate(range.start);
                match token {
                    Ok(token) => Ok(LocatedToken { token, loc }),
                    Err(_) => Err(Error::Lex {
                        message: format!("Unexpected character: '{}'", &self.source[range]),
                        line: loc.line,
                        col: loc.col,
                    }),
                }
            })
            .collect()
    }

    fn locate(&self, offset: usize) -> Location {
        // line_starts[0] is 0, so at least one start precedes any offset
        let line = self.line_starts.partition_point(|&start| start <= offset);
        Location { line, col: offset - self.line_starts[line - 1] + 1 }
    }
}
