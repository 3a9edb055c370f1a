//! Scanner
//!
//!     A table-driven finite-state automaton over classified characters. Each step reads one
//!     character (or replays the one pushed back by the previous step), looks up the cell for
//!     the current state and the character's class in [transitions], and runs that cell's
//!     actions. A step either emits a token or just updates the pending buffers.
//!
//! Normalization
//!
//!     The scanner does the text normalization so the parser never sees raw whitespace:
//!         - Tag and attribute names are lower-cased when the WORD token is emitted.
//!         - Inside free text, a run of whitespace collapses to a single space.
//!         - Whitespace touching a tag boundary (leading or trailing) is dropped.
//!         - Entity references are resolved through the [entity table](super::entities),
//!           both in free text and inside quoted attribute values.
//!
//! Errors
//!
//!     Lexical errors surface as a `Bad` token carrying a [LexicalError]. After a `Bad` token
//!     the automaton is in its final state and only produces EOF, so the parser must stop.

pub mod transitions;

use crate::gxml::chars::classify;
use crate::gxml::entities;
use crate::gxml::error::LexicalError;
use crate::gxml::token::{Position, Token, TokenKind};
use std::str::Chars;
use transitions::{
    transition, Fault, State, Transition, APPEND, APPEND_WS, EMIT_BAD, EMIT_EOF, EMIT_EQ,
    EMIT_GT, EMIT_LT, EMIT_LTSLASH, EMIT_QSTR, EMIT_SLASHGT, EMIT_TEXT, EMIT_WORD, PUSHBACK,
    RESOLVE, SAVE_ESC, SAVE_WS,
};

/// Scanner over one in-memory input buffer.
pub struct Scanner<'a> {
    chars: Chars<'a>,
    cursor: Position,
    state: State,
    token: String,
    escape: String,
    saved_ws: char,
    /// Last character read and where it was; replayed when `replay` is set
    current: Option<char>,
    current_position: Position,
    replay: bool,
    token_start: Option<Position>,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars(),
            cursor: Position::start(),
            state: State::Init,
            token: String::new(),
            escape: String::new(),
            saved_ws: ' ',
            current: None,
            current_position: Position::start(),
            replay: false,
            token_start: None,
            finished: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Run the automaton until it emits the next token.
    pub fn next_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.step() {
                log::trace!("scanned {} at {}", token, token.position);
                return token;
            }
        }
    }

    /// Consume one character (or the pushed-back one) and apply its transition.
    pub fn step(&mut self) -> Option<Token> {
        let (c, position) = self.read();
        let cell = transition(self.state, classify(c));
        self.apply(cell, c, position)
    }

    fn read(&mut self) -> (Option<char>, Position) {
        if self.replay {
            self.replay = false;
            return (self.current, self.current_position);
        }
        let position = self.cursor;
        let c = self.chars.next();
        if let Some(c) = c {
            self.cursor = self.cursor.advance(c);
        }
        self.current = c;
        self.current_position = position;
        (c, position)
    }

    fn apply(&mut self, cell: Transition, c: Option<char>, position: Position) -> Option<Token> {
        let actions = cell.actions;
        let from = self.state;
        self.state = cell.next;

        if self.token_start.is_none() && !(actions.is_empty() && cell.next == from) {
            self.token_start = Some(position);
        }

        if actions.contains(APPEND_WS) {
            self.token.push(self.saved_ws);
        }
        if actions.contains(APPEND) {
            if let Some(c) = c {
                self.token.push(c);
            }
        }
        if actions.contains(SAVE_WS) {
            // Runs collapse to one literal space whatever the whitespace was.
            self.saved_ws = ' ';
        }
        if actions.contains(SAVE_ESC) {
            if let Some(c) = c {
                self.escape.push(c);
            }
        }
        if actions.contains(RESOLVE) {
            match entities::lookup(&self.escape) {
                Some(literal) => {
                    self.token.push(literal);
                    self.escape.clear();
                }
                None => {
                    let name = std::mem::take(&mut self.escape);
                    return Some(self.fail(LexicalError::UnknownEntity(name), position));
                }
            }
        }
        if actions.contains(PUSHBACK) {
            self.replay = true;
        }

        let kind = if actions.contains(EMIT_EOF) {
            TokenKind::Eof
        } else if actions.contains(EMIT_LT) {
            TokenKind::Lt
        } else if actions.contains(EMIT_LTSLASH) {
            TokenKind::LtSlash
        } else if actions.contains(EMIT_GT) {
            TokenKind::Gt
        } else if actions.contains(EMIT_SLASHGT) {
            TokenKind::SlashGt
        } else if actions.contains(EMIT_EQ) {
            TokenKind::Equals
        } else if actions.contains(EMIT_WORD) {
            TokenKind::Word
        } else if actions.contains(EMIT_QSTR) {
            TokenKind::QuotedString
        } else if actions.contains(EMIT_TEXT) {
            TokenKind::XmlText
        } else if actions.contains(EMIT_BAD) {
            let fault = cell.fault.unwrap_or(Fault::UnexpectedChar);
            return Some(self.fail(fault_error(fault, c), position));
        } else {
            return None;
        };

        Some(self.emit(kind, position))
    }

    fn emit(&mut self, kind: TokenKind, position: Position) -> Token {
        let text = match kind {
            TokenKind::Eof => "<EOF>".to_string(),
            TokenKind::Lt => "<".to_string(),
            TokenKind::LtSlash => "</".to_string(),
            TokenKind::Gt => ">".to_string(),
            TokenKind::SlashGt => "/>".to_string(),
            TokenKind::Equals => "=".to_string(),
            // Tags and attributes aren't case sensitive
            TokenKind::Word => self.token.to_lowercase(),
            _ => std::mem::take(&mut self.token),
        };
        let start = self.token_start.take().unwrap_or(position);
        self.reset_buffers();

        // The character that ended text or a name may start the next token.
        if !self.replay && matches!(self.state, State::ToTag | State::Slash) {
            self.token_start = Some(position);
        }
        if kind == TokenKind::Eof {
            self.finished = true;
        }
        Token::new(kind, text, start)
    }

    fn fail(&mut self, error: LexicalError, position: Position) -> Token {
        log::debug!("lexical error at {}: {}", position, error);
        self.state = State::Final;
        self.replay = false;
        self.token_start = None;
        self.finished = true;
        self.reset_buffers();
        Token::bad(error, position)
    }

    fn reset_buffers(&mut self) {
        self.token.clear();
        self.escape.clear();
    }
}

fn fault_error(fault: Fault, c: Option<char>) -> LexicalError {
    match fault {
        Fault::UnterminatedTag => LexicalError::UnterminatedTag,
        Fault::UnterminatedQuote => LexicalError::UnterminatedQuote,
        Fault::UnterminatedEntity => LexicalError::UnterminatedEntity,
        Fault::MalformedTagOpener => LexicalError::MalformedTagOpener,
        Fault::SlashWithoutGt => LexicalError::SlashWithoutGt,
        Fault::UnexpectedChar => match c {
            Some(c) => LexicalError::UnexpectedChar(c),
            None => LexicalError::UnterminatedTag,
        },
    }
}

/// Yields tokens up to and including the first `Eof` or `Bad`.
impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

/// Scan a whole buffer into its token stream.
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    fn texts(source: &str) -> Vec<String> {
        tokenize(source)
            .into_iter()
            .filter(|t| t.kind == TokenKind::XmlText)
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_open_text_close() {
        use TokenKind::*;
        assert_eq!(
            kinds("<sll>a</sll>"),
            vec![Lt, Word, Gt, XmlText, LtSlash, Word, Gt, Eof]
        );
    }

    #[test]
    fn test_attributes() {
        let tokens = tokenize(r#"<elem name="foo" id="2">"#);
        let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "<",
                "WORD(elem)",
                "WORD(name)",
                "=",
                "QSTR(\"foo\")",
                "WORD(id)",
                "=",
                "QSTR(\"2\")",
                ">",
                "<EOF>"
            ]
        );
    }

    #[test]
    fn test_self_closing_with_and_without_attributes() {
        use TokenKind::*;
        assert_eq!(kinds("<sll/>"), vec![Lt, Word, SlashGt, Eof]);
        assert_eq!(kinds("<sll />"), vec![Lt, Word, SlashGt, Eof]);
        assert_eq!(
            kinds(r#"<elem name="x"/>"#),
            vec![Lt, Word, Word, Equals, QuotedString, SlashGt, Eof]
        );
    }

    #[test]
    fn test_words_are_case_folded() {
        let tokens = tokenize(r#"<SLL Name="Keep">"#);
        assert_eq!(tokens[1].text, "sll");
        assert_eq!(tokens[2].text, "name");
        assert_eq!(tokens[4].text, "Keep");
    }

    #[test]
    fn test_whitespace_collapses_inside_text() {
        assert_eq!(texts("<a>  one \t\n two   </a>"), vec!["one two"]);
        assert_eq!(texts("<a>x\ty</a>"), vec!["x y"]);
    }

    #[test]
    fn test_whitespace_between_tags_is_dropped() {
        use TokenKind::*;
        assert_eq!(
            kinds("  <a>\n  <b/>\n</a>  "),
            vec![Lt, Word, Gt, Lt, Word, SlashGt, LtSlash, Word, Gt, Eof]
        );
    }

    #[test]
    fn test_entities_in_text() {
        assert_eq!(texts("<a>&lt;A&gt;</a>"), vec!["<A>"]);
        assert_eq!(texts("<a>x &amp; y</a>"), vec!["x & y"]);
        assert_eq!(texts("<a>&nbsp;</a>"), vec!["\u{a0}"]);
    }

    #[test]
    fn test_entities_in_quoted_values() {
        let tokens = tokenize(r#"<elem name="a&quot;b&amp;c">"#);
        assert_eq!(tokens[4].kind, TokenKind::QuotedString);
        assert_eq!(tokens[4].text, "a\"b&c");
    }

    #[test]
    fn test_quoted_values_keep_whitespace() {
        let tokens = tokenize(r#"<elem name="  two  words ">"#);
        assert_eq!(tokens[4].text, "  two  words ");
    }

    #[test]
    fn test_unknown_entity_is_bad_and_final() {
        let tokens = tokenize("<a>&bogus;</a>");
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Bad);
        assert_eq!(
            last.error,
            Some(LexicalError::UnknownEntity("bogus".to_string()))
        );
    }

    #[test]
    fn test_scanner_stops_after_bad() {
        let mut scanner = Scanner::new("<a>&bogus;</a>");
        let bad = scanner.by_ref().find(|t| t.kind == TokenKind::Bad);
        assert!(bad.is_some());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_unterminated_inputs() {
        let last = |s: &str| tokenize(s).pop().unwrap().error;
        assert_eq!(last(r#"<a name="x"#), Some(LexicalError::UnterminatedQuote));
        assert_eq!(last("<a>&amp"), Some(LexicalError::UnterminatedEntity));
        assert_eq!(last("<a"), Some(LexicalError::UnterminatedTag));
        assert_eq!(last("<"), Some(LexicalError::UnterminatedTag));
        assert_eq!(last("<a>&lt <b>"), Some(LexicalError::UnterminatedEntity));
    }

    #[test]
    fn test_malformed_tags() {
        let last = |s: &str| tokenize(s).pop().unwrap().error;
        assert_eq!(last("< a>"), Some(LexicalError::MalformedTagOpener));
        assert_eq!(last("<a/ >"), Some(LexicalError::SlashWithoutGt));
        assert_eq!(last("<a<b>"), Some(LexicalError::UnexpectedChar('<')));
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("<sll>\n  <elem>x</elem>");
        let positions: Vec<(TokenKind, String)> = tokens
            .iter()
            .map(|t| (t.kind, t.position.to_string()))
            .collect();
        assert_eq!(positions[0], (TokenKind::Lt, "1:1".to_string()));
        assert_eq!(positions[1], (TokenKind::Word, "1:2".to_string()));
        assert_eq!(positions[2], (TokenKind::Gt, "1:5".to_string()));
        assert_eq!(positions[3], (TokenKind::Lt, "2:3".to_string()));
        assert_eq!(positions[6], (TokenKind::XmlText, "2:9".to_string()));
        assert_eq!(positions[7], (TokenKind::LtSlash, "2:10".to_string()));
    }

    #[test]
    fn test_eof_repeats_in_final_state() {
        let mut scanner = Scanner::new("");
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
        assert_eq!(scanner.state(), State::Final);
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
    }
}
