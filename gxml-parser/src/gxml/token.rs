//! Tokens emitted by the scanner

use crate::gxml::error::LexicalError;
use serde::Serialize;
use std::fmt;

/// 1-based line and column of a character in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn start() -> Self {
        Self::new(1, 1)
    }

    /// Position just after `c`.
    pub fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self::new(self.line + 1, 1)
        } else {
            Self::new(self.line, self.column + 1)
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Eof,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `</`
    LtSlash,
    /// `/>`
    SlashGt,
    /// `=`
    Equals,
    /// Tag or attribute name, lower-cased
    Word,
    /// Attribute value, quotes stripped and entities resolved
    QuotedString,
    /// Free text between tags
    XmlText,
    Bad,
}

impl TokenKind {
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtSlash => "'</'",
            TokenKind::SlashGt => "'/>'",
            TokenKind::Equals => "'='",
            TokenKind::Word => "word",
            TokenKind::QuotedString => "quoted string",
            TokenKind::XmlText => "text",
            TokenKind::Bad => "bad token",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
    /// Set only on `Bad` tokens.
    #[serde(skip)]
    pub error: Option<LexicalError>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
            error: None,
        }
    }

    pub fn bad(error: LexicalError, position: Position) -> Self {
        Self {
            kind: TokenKind::Bad,
            text: String::new(),
            position,
            error: Some(error),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "<EOF>"),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::LtSlash => write!(f, "</"),
            TokenKind::SlashGt => write!(f, "/>"),
            TokenKind::Equals => write!(f, "="),
            TokenKind::Word => write!(f, "WORD({})", self.text),
            TokenKind::QuotedString => write!(f, "QSTR({:?})", self.text),
            TokenKind::XmlText => write!(f, "TEXT({:?})", self.text),
            TokenKind::Bad => match &self.error {
                Some(error) => write!(f, "BAD({})", error),
                None => write!(f, "BAD"),
            },
        }
    }
}
