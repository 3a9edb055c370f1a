//! Parser
//!
//!     Recursive descent over the scanner's token stream with a single token of lookahead:
//!
//!         Document   := TagSet EOF
//!         TagSet     := LT WORD AttrList ( GT EntityList LTSLASH WORD GT | SLASHGT )
//!         AttrList   := ( WORD EQUALS QUOTED_STRING )*
//!         EntityList := ( XML_TEXT | TagSet )*
//!
//!     The parser pulls tokens on demand, so scanning and parsing run interleaved and a `Bad`
//!     token aborts the parse at the point it is produced.
//!
//! Contributions
//!
//!     A TagSet does not always produce one value. A registered tag (see
//!     [TypeRegistry](super::registry::TypeRegistry)) builds its container as soon as its
//!     name is read and inserts each child the moment that child is complete, so an insert
//!     error stops the parse before anything after the child is looked at. The finished
//!     container is contributed together with the tag's own attributes. Any
//!     other tag is a transparent wrapper: it contributes its children as they are, each one
//!     now carrying the wrapper's attributes. That is how `<elem name="k">v</elem>` hands the
//!     key `k` to the text `v` for the enclosing map to use.
//!
//!     Free text directly inside a registered container is a child with no attributes.
//!
//!     At the top level a registered tag yields its container. An unregistered top-level tag
//!     must wrap exactly one value, which becomes the document.
//!
//!     Nesting is bounded by [MAX_NESTING] open tags.

use crate::gxml::error::{ParseError, ParseResult, SyntaxError};
use crate::gxml::registry::TypeRegistry;
use crate::gxml::scanning::Scanner;
use crate::gxml::serializing::debug_dump;
use crate::gxml::token::{Position, Token, TokenKind};
use crate::gxml::wrapped::{AttributeMap, Wrapped};

/// One value produced by a TagSet or a text token, waiting to be inserted into its parent.
#[derive(Debug)]
struct Child {
    value: Wrapped,
    attrs: AttributeMap,
    position: Position,
}

/// Deepest tag nesting the parser accepts, counting every open tag (registered or not).
///
/// Values parsed within this bound, and the recursive walks over them, stay well inside the
/// stack of a default thread. Deeper documents fail with
/// [NestingTooDeep](SyntaxError::NestingTooDeep).
pub const MAX_NESTING: usize = 256;

/// Where the children of an open tag go as they are produced.
enum Sink {
    /// Registered container; children are inserted as soon as they are complete.
    Container(Wrapped),
    /// Transparent wrapper; children are handed to the parent when the tag closes.
    Wrapper(Vec<Child>),
}

impl Sink {
    fn accept(&mut self, child: Child) -> ParseResult<()> {
        match self {
            Sink::Container(container) => container
                .insert(child.value, &child.attrs)
                .map_err(|e| Box::new(e.at(child.position))),
            Sink::Wrapper(children) => {
                children.push(child);
                Ok(())
            }
        }
    }
}

struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> ParseResult<Self> {
        let mut scanner = Scanner::new(source);
        let current = scanner.next_token();
        let parser = Self { scanner, current };
        parser.check_lexical()?;
        Ok(parser)
    }

    fn check_lexical(&self) -> ParseResult<()> {
        match (&self.current.kind, &self.current.error) {
            (TokenKind::Bad, Some(error)) => {
                Err(Box::new(ParseError::from(error.clone()).at(self.current.position)))
            }
            _ => Ok(()),
        }
    }

    /// Move to the next token, returning the one just consumed.
    fn advance(&mut self) -> ParseResult<Token> {
        let next = self.scanner.next_token();
        let consumed = std::mem::replace(&mut self.current, next);
        self.check_lexical()?;
        Ok(consumed)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    fn syntax(&self, error: SyntaxError) -> Box<ParseError> {
        Box::new(ParseError::from(error).at(self.current.position))
    }

    fn found(&self) -> String {
        match self.current.kind {
            TokenKind::Word | TokenKind::QuotedString | TokenKind::XmlText => {
                self.current.to_string()
            }
            kind => kind.describe().to_string(),
        }
    }

    fn document(&mut self) -> ParseResult<Wrapped> {
        log::trace!("document");
        let start = self.current.position;
        if !self.at(TokenKind::Lt) {
            return Err(self.syntax(SyntaxError::NoOpeningTag {
                found: self.found(),
            }));
        }
        let mut values = self.tag_set(1)?;
        if !self.at(TokenKind::Eof) {
            return Err(self.syntax(SyntaxError::NoEndOfFile {
                found: self.found(),
            }));
        }

        match values.len() {
            1 => Ok(values.remove(0).value),
            0 => Err(Box::new(
                ParseError::from(SyntaxError::EmptyDocument).at(start),
            )),
            n => Err(Box::new(
                ParseError::from(SyntaxError::MultipleDocumentValues(n)).at(start),
            )),
        }
    }

    fn tag_set(&mut self, depth: usize) -> ParseResult<Vec<Child>> {
        let open = self.current.position;
        if depth > MAX_NESTING {
            return Err(Box::new(
                ParseError::from(SyntaxError::NestingTooDeep { limit: MAX_NESTING }).at(open),
            ));
        }
        self.advance()?;
        if !self.at(TokenKind::Word) {
            return Err(self.syntax(SyntaxError::NoTagName {
                found: self.found(),
            }));
        }
        let tag = self.advance()?.text;
        log::trace!("tag set <{}> at {}", tag, open);
        let attrs = self.attr_list()?;

        let mut sink = match TypeRegistry::lookup(&tag) {
            Some(kind) => {
                log::debug!("construct <{}>", tag);
                Sink::Container(TypeRegistry::construct(kind))
            }
            None => Sink::Wrapper(Vec::new()),
        };

        if self.at(TokenKind::SlashGt) {
            self.advance()?;
        } else if self.at(TokenKind::Gt) {
            self.advance()?;
            self.entity_list(&mut sink, depth)?;
            self.closing_tag(&tag)?;
        } else {
            return Err(self.syntax(SyntaxError::ErrorInsideOpeningTag {
                tag,
                found: self.found(),
            }));
        }

        match sink {
            Sink::Container(value) => Ok(vec![Child {
                value,
                attrs,
                position: open,
            }]),
            Sink::Wrapper(children) => Ok(children
                .into_iter()
                .map(|child| Child {
                    value: child.value,
                    attrs: attrs.clone(),
                    position: open,
                })
                .collect()),
        }
    }

    fn attr_list(&mut self) -> ParseResult<AttributeMap> {
        let mut attrs = AttributeMap::new();
        while self.at(TokenKind::Word) {
            let attribute = self.advance()?.text;
            if !self.at(TokenKind::Equals) {
                return Err(self.syntax(SyntaxError::MissingEquals { attribute }));
            }
            self.advance()?;
            if !self.at(TokenKind::QuotedString) {
                return Err(self.syntax(SyntaxError::MissingQuotedValue { attribute }));
            }
            let value = self.advance()?.text;
            log::trace!("attribute {}={:?}", attribute, value);
            attrs.insert(attribute, value);
        }
        Ok(attrs)
    }

    fn entity_list(&mut self, sink: &mut Sink, depth: usize) -> ParseResult<()> {
        loop {
            match self.current.kind {
                TokenKind::XmlText => {
                    let text = self.advance()?;
                    sink.accept(Child {
                        value: Wrapped::String(text.text),
                        attrs: AttributeMap::new(),
                        position: text.position,
                    })?;
                }
                TokenKind::Lt => {
                    for child in self.tag_set(depth + 1)? {
                        sink.accept(child)?;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn closing_tag(&mut self, tag: &str) -> ParseResult<()> {
        if !self.at(TokenKind::LtSlash) {
            return Err(self.syntax(SyntaxError::NoClosingTag {
                tag: tag.to_string(),
                found: self.found(),
            }));
        }
        self.advance()?;
        if !self.at(TokenKind::Word) {
            return Err(self.syntax(SyntaxError::ClosingTagWithoutName));
        }
        if self.current.text != tag {
            return Err(self.syntax(SyntaxError::MismatchedClosingTag {
                expected: tag.to_string(),
                found: self.current.text.clone(),
            }));
        }
        self.advance()?;
        if !self.at(TokenKind::Gt) {
            return Err(self.syntax(SyntaxError::ClosingTagWithoutGt {
                tag: tag.to_string(),
            }));
        }
        self.advance()?;
        Ok(())
    }
}

fn parse_boxed(source: &str) -> ParseResult<Wrapped> {
    Parser::new(source)?.document()
}

/// Parse one gXML document into its value.
pub fn parse(source: &str) -> Result<Wrapped, ParseError> {
    match parse_boxed(source) {
        Ok(value) => {
            if log::log_enabled!(log::Level::Trace) {
                log::trace!("parsed value:\n{}", debug_dump(&value));
            }
            Ok(value)
        }
        Err(error) => {
            log::debug!("parse failed: {}", error);
            Err(*error)
        }
    }
}

/// Success flag plus diagnostic, for callers that report rather than propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub value: Option<Wrapped>,
    pub diagnostic: Option<String>,
}

impl ParseOutcome {
    pub fn is_success(&self) -> bool {
        self.value.is_some()
    }
}

pub fn parse_with_diagnostic(source: &str) -> ParseOutcome {
    match parse(source) {
        Ok(value) => ParseOutcome {
            value: Some(value),
            diagnostic: None,
        },
        Err(error) => ParseOutcome {
            value: None,
            diagnostic: Some(error.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gxml::error::{LexicalError, ParseErrorKind, SemanticError};

    fn syntax_error(source: &str) -> SyntaxError {
        match parse(source).unwrap_err().kind {
            ParseErrorKind::Syntax(e) => e,
            other => panic!("expected a syntax error for {source:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_map_with_one_element() {
        let value = parse(r#"<aarray><elem name="foo">bar</elem></aarray>"#).unwrap();
        assert_eq!(value, Wrapped::map([("foo", Wrapped::string("bar"))]));
    }

    #[test]
    fn test_list_keeps_order() {
        let value = parse("<dll><elem>A</elem><elem>B</elem></dll>").unwrap();
        assert_eq!(value, Wrapped::dll(vec!["A".into(), "B".into()]));
    }

    #[test]
    fn test_self_closing_container_is_empty() {
        assert_eq!(parse("<sll/>").unwrap(), Wrapped::sll(vec![]));
        assert_eq!(parse("<aarray />").unwrap(), Wrapped::map(Vec::<(String, Wrapped)>::new()));
    }

    #[test]
    fn test_text_directly_in_list() {
        assert_eq!(parse("<sll>bare</sll>").unwrap(), Wrapped::sll(vec!["bare".into()]));
    }

    #[test]
    fn test_nested_wrappers_pass_the_outer_name() {
        let value = parse(r#"<aarray><elem name="k"><x><y>v</y></x></elem></aarray>"#).unwrap();
        assert_eq!(value.get("k"), Some(&Wrapped::string("v")));
    }

    #[test]
    fn test_unregistered_top_level_yields_its_child() {
        assert_eq!(parse("<elem>hello</elem>").unwrap(), Wrapped::string("hello"));
        assert_eq!(syntax_error("<elem/>"), SyntaxError::EmptyDocument);
        assert_eq!(
            syntax_error("<elem><sll/><dll/></elem>"),
            SyntaxError::MultipleDocumentValues(2)
        );
    }

    #[test]
    fn test_missing_name_attribute() {
        assert_eq!(
            syntax_error("<aarray><elem>x</elem></aarray>"),
            SyntaxError::MissingNameAttribute
        );
        assert_eq!(
            syntax_error(r#"<aarray><elem id="1">x</elem></aarray>"#),
            SyntaxError::MissingNameAttribute
        );
    }

    #[test]
    fn test_duplicate_key_is_semantic() {
        let err = parse(r#"<aarray><elem name="k">1</elem><elem name="k">2</elem></aarray>"#)
            .unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Semantic(SemanticError::DuplicateKey("k".into()))
        );
        assert_eq!(err.position, Some(Position::new(1, 32)));
    }

    #[test]
    fn test_insert_errors_come_before_later_grammar_errors() {
        assert_eq!(
            syntax_error("<aarray><elem>x</elem>"),
            SyntaxError::MissingNameAttribute
        );
        let err = parse(r#"<aarray><elem name="k">1</elem><elem name="k">2</elem></sll>"#)
            .unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Semantic(SemanticError::DuplicateKey("k".into()))
        );
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}{}", "<sll>".repeat(depth), "</sll>".repeat(depth));
        assert_eq!(parse(&nested(MAX_NESTING)).unwrap().depth(), MAX_NESTING);

        let err = parse(&nested(MAX_NESTING + 1)).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Syntax(SyntaxError::NestingTooDeep { limit: MAX_NESTING })
        );
        assert_eq!(err.position, Some(Position::new(1, 5 * MAX_NESTING + 1)));
    }

    #[test]
    fn test_closing_tag_errors() {
        assert_eq!(
            syntax_error("<sll></dll>"),
            SyntaxError::MismatchedClosingTag {
                expected: "sll".into(),
                found: "dll".into()
            }
        );
        assert!(matches!(
            syntax_error("<sll>"),
            SyntaxError::NoClosingTag { .. }
        ));
        assert!(matches!(
            syntax_error("<sll></sll x>"),
            SyntaxError::ClosingTagWithoutGt { .. }
        ));
    }

    #[test]
    fn test_attribute_errors() {
        assert_eq!(
            syntax_error(r#"<elem name "x">a</elem>"#),
            SyntaxError::MissingEquals {
                attribute: "name".into()
            }
        );
        assert_eq!(
            syntax_error("<elem name=>a</elem>"),
            SyntaxError::MissingQuotedValue {
                attribute: "name".into()
            }
        );
    }

    #[test]
    fn test_document_boundaries() {
        assert!(matches!(syntax_error("text"), SyntaxError::NoOpeningTag { .. }));
        assert!(matches!(syntax_error(""), SyntaxError::NoOpeningTag { .. }));
        assert!(matches!(
            syntax_error("<sll/><sll/>"),
            SyntaxError::NoEndOfFile { .. }
        ));
    }

    #[test]
    fn test_lexical_errors_surface_with_position() {
        let err = parse("<sll>&bogus;</sll>").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Lexical(LexicalError::UnknownEntity("bogus".into()))
        );
        assert!(err.position.is_some());
    }

    #[test]
    fn test_parse_with_diagnostic() {
        let ok = parse_with_diagnostic("<sll/>");
        assert!(ok.is_success());
        assert_eq!(ok.diagnostic, None);

        let failed = parse_with_diagnostic("<sll></dll>");
        assert!(!failed.is_success());
        assert!(failed
            .diagnostic
            .unwrap()
            .contains("mismatched closing tag"));
    }
}
