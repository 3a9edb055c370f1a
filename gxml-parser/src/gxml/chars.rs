//! Character classes
//!
//!     The scanner automaton never looks at raw characters when choosing a transition, only at
//!     the class a character falls into. Keeping the alphabet this small is what makes the
//!     transition table in [scanning](super::scanning) a fixed, total, 10-column matrix.

/// Input alphabet of the scanner automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Eof,
    Quote,
    Lt,
    Gt,
    Equal,
    Slash,
    Amp,
    Semi,
    Whitespace,
    Other,
}

impl CharClass {
    /// Number of classes, i.e. the column count of the transition table.
    pub const COUNT: usize = 10;

    /// Column index of this class in the transition table.
    pub const fn index(self) -> usize {
        match self {
            CharClass::Eof => 0,
            CharClass::Quote => 1,
            CharClass::Lt => 2,
            CharClass::Gt => 3,
            CharClass::Equal => 4,
            CharClass::Slash => 5,
            CharClass::Amp => 6,
            CharClass::Semi => 7,
            CharClass::Whitespace => 8,
            CharClass::Other => 9,
        }
    }
}

/// Classify one input character; `None` stands for end of input.
pub const fn classify(c: Option<char>) -> CharClass {
    match c {
        None => CharClass::Eof,
        Some('"') => CharClass::Quote,
        Some('<') => CharClass::Lt,
        Some('>') => CharClass::Gt,
        Some('=') => CharClass::Equal,
        Some('/') => CharClass::Slash,
        Some('&') => CharClass::Amp,
        Some(';') => CharClass::Semi,
        Some(' ' | '\t' | '\n' | '\r' | '\x0c') => CharClass::Whitespace,
        Some(_) => CharClass::Other,
    }
}
