//! Error types for scanning and parsing
//!
//!     Errors fall into three families. Lexical errors come out of the scanner as `Bad` tokens,
//!     syntax errors are grammar violations found by the parser, and semantic errors are
//!     well-formed documents that still cannot be built into a value (a map key given twice).
//!     Any of them aborts the parse; the partially built tree is dropped with it.

use crate::gxml::token::Position;
use std::fmt;

/// Errors raised by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// `&name;` where `name` is not in the entity table
    UnknownEntity(String),
    /// Entity reference not closed by `;`
    UnterminatedEntity,
    /// Input ended inside a quoted attribute value
    UnterminatedQuote,
    /// Input ended inside a tag
    UnterminatedTag,
    /// `<` or `</` not followed immediately by a tag name
    MalformedTagOpener,
    /// `/` inside a tag not followed by `>`
    SlashWithoutGt,
    /// Character that cannot appear where it was found inside a tag
    UnexpectedChar(char),
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexicalError::UnknownEntity(name) => write!(f, "unknown entity '&{};'", name),
            LexicalError::UnterminatedEntity => write!(f, "unterminated entity reference"),
            LexicalError::UnterminatedQuote => write!(f, "input ends inside a quoted value"),
            LexicalError::UnterminatedTag => write!(f, "input ends inside a tag"),
            LexicalError::MalformedTagOpener => {
                write!(f, "'<' not followed by a tag name or '/'")
            }
            LexicalError::SlashWithoutGt => write!(f, "'/' inside a tag not followed by '>'"),
            LexicalError::UnexpectedChar(c) => write!(f, "unexpected {:?} inside a tag", c),
        }
    }
}

impl std::error::Error for LexicalError {}

/// Grammar violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    NoOpeningTag { found: String },
    NoTagName { found: String },
    MissingEquals { attribute: String },
    MissingQuotedValue { attribute: String },
    ErrorInsideOpeningTag { tag: String, found: String },
    NoClosingTag { tag: String, found: String },
    ClosingTagWithoutName,
    MismatchedClosingTag { expected: String, found: String },
    ClosingTagWithoutGt { tag: String },
    NoEndOfFile { found: String },
    /// Map element without a `name` attribute
    MissingNameAttribute,
    /// Attempt to insert a child into a string value
    InsertIntoString,
    /// Top-level wrapper tag with no value inside
    EmptyDocument,
    /// Top-level wrapper tag with more than one value inside
    MultipleDocumentValues(usize),
    /// More tags open at once than the parser accepts
    NestingTooDeep { limit: usize },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::NoOpeningTag { found } => {
                write!(f, "no opening tag found (got {})", found)
            }
            SyntaxError::NoTagName { found } => {
                write!(f, "no tag name after '<' (got {})", found)
            }
            SyntaxError::MissingEquals { attribute } => write!(
                f,
                "malformed attribute list: no equals sign in attribute '{}'",
                attribute
            ),
            SyntaxError::MissingQuotedValue { attribute } => write!(
                f,
                "malformed attribute list: no quoted string in attribute '{}'",
                attribute
            ),
            SyntaxError::ErrorInsideOpeningTag { tag, found } => {
                write!(f, "error inside opening tag <{}> (got {})", tag, found)
            }
            SyntaxError::NoClosingTag { tag, found } => write!(
                f,
                "could not find closing '</' tag for <{}> (got {})",
                tag, found
            ),
            SyntaxError::ClosingTagWithoutName => write!(f, "closing tag has no tag name"),
            SyntaxError::MismatchedClosingTag { expected, found } => write!(
                f,
                "mismatched closing tag: expected </{}>, found </{}>",
                expected, found
            ),
            SyntaxError::ClosingTagWithoutGt { tag } => {
                write!(f, "closing tag </{}> not followed by '>'", tag)
            }
            SyntaxError::NoEndOfFile { found } => {
                write!(f, "no end-of-file found after top-level tag (got {})", found)
            }
            SyntaxError::MissingNameAttribute => {
                write!(f, "missing name attribute for map element")
            }
            SyntaxError::InsertIntoString => write!(f, "cannot insert into a string value"),
            SyntaxError::EmptyDocument => write!(f, "document produced no value"),
            SyntaxError::MultipleDocumentValues(count) => {
                write!(f, "document produced multiple values ({})", count)
            }
            SyntaxError::NestingTooDeep { limit } => {
                write!(f, "tags nested deeper than {} levels", limit)
            }
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Well-formed input that cannot be turned into a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    DuplicateKey(String),
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::DuplicateKey(key) => write!(f, "duplicate map key '{}'", key),
        }
    }
}

impl std::error::Error for SemanticError {}

/// Values [to_gxml_checked](crate::gxml::serializing::to_gxml_checked) refuses to write,
/// because the text it would produce parses back to something else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    /// A bare string has no tag to carry it
    TopLevelString,
    /// Text the scanner would rewrite: empty, padded, or holding anything but single spaces
    UnstableText(String),
    /// Output would open more tags than the parser accepts
    TooDeep { limit: usize },
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializeError::TopLevelString => {
                write!(f, "a gxml document must be a map or a list, not a string")
            }
            SerializeError::UnstableText(text) => {
                write!(f, "text {:?} would not survive parsing", text)
            }
            SerializeError::TooDeep { limit } => {
                write!(f, "value nests deeper than {} tags", limit)
            }
        }
    }
}

impl std::error::Error for SerializeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    Lexical(LexicalError),
    Syntax(SyntaxError),
    Semantic(SemanticError),
}

/// Error returned by [parse](crate::gxml::parsing::parse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Option<Position>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Option<Position>) -> Self {
        Self { kind, position }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn category(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::Lexical(_) => "lexical",
            ParseErrorKind::Syntax(_) => "syntax",
            ParseErrorKind::Semantic(_) => "semantic",
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Lexical(_))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Syntax(_))
    }

    pub fn is_semantic(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Semantic(_))
    }
}

impl From<LexicalError> for ParseError {
    fn from(err: LexicalError) -> Self {
        Self::new(ParseErrorKind::Lexical(err), None)
    }
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        Self::new(ParseErrorKind::Syntax(err), None)
    }
}

impl From<SemanticError> for ParseError {
    fn from(err: SemanticError) -> Self {
        Self::new(ParseErrorKind::Semantic(err), None)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error", self.category())?;
        if let Some(position) = self.position {
            write!(f, " at {}", position)?;
        }
        match &self.kind {
            ParseErrorKind::Lexical(e) => write!(f, ": {}", e),
            ParseErrorKind::Syntax(e) => write!(f, ": {}", e),
            ParseErrorKind::Semantic(e) => write!(f, ": {}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::Lexical(e) => Some(e),
            ParseErrorKind::Syntax(e) => Some(e),
            ParseErrorKind::Semantic(e) => Some(e),
        }
    }
}

/// Parser results with boxed errors keep the recursive frames small.
pub type ParseResult<T> = Result<T, Box<ParseError>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_category_and_position() {
        let err = ParseError::from(SyntaxError::MismatchedClosingTag {
            expected: "a".into(),
            found: "b".into(),
        })
        .at(Position::new(1, 4));
        assert_eq!(
            err.to_string(),
            "syntax error at 1:4: mismatched closing tag: expected </a>, found </b>"
        );
    }

    #[test]
    fn test_categories() {
        assert!(ParseError::from(LexicalError::UnterminatedQuote).is_lexical());
        assert!(ParseError::from(SyntaxError::EmptyDocument).is_syntax());
        assert_eq!(
            ParseError::from(SemanticError::DuplicateKey("k".into())).category(),
            "semantic"
        );
    }
}
