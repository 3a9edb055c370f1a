//! Scanner transition table
//!
//!     The table is indexed by `[state][class]`. Every cell names the next state and the set
//!     of actions to run, so the automaton has no undefined transitions: the array type makes
//!     the compiler check that all 12 x 10 cells are filled.
//!
//!     Actions are applied in a fixed order (see `Scanner::apply`): buffer edits first,
//!     escape resolution, pushback, and the emission last. A cell emits at most one token.
//!
//!     State    Meaning
//!     -------  -------------------------------------------------------------
//!     Init     outside any tag, no text pending
//!     ToTag    saw '<', nothing emitted yet
//!     ToTag2   emitted '</', waiting for the closing tag name
//!     InTag    accumulating a tag or attribute name
//!     InTag2   inside a tag, between names, '=' and values
//!     InQuote  inside a quoted attribute value
//!     InQuoteAmp  entity reference inside a quoted value
//!     InStr    free text, last character was not whitespace
//!     InStrWs  free text, last character was whitespace
//!     Slash    saw '/' inside a tag, '>' must follow
//!     InAmp    entity reference inside free text
//!     Final    end of input seen; every further step emits EOF

use crate::gxml::chars::CharClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Init,
    ToTag,
    ToTag2,
    InTag,
    InTag2,
    InQuote,
    InQuoteAmp,
    InStr,
    InStrWs,
    Slash,
    InAmp,
    Final,
}

impl State {
    pub const COUNT: usize = 12;

    pub const ALL: [State; State::COUNT] = [
        State::Init,
        State::ToTag,
        State::ToTag2,
        State::InTag,
        State::InTag2,
        State::InQuote,
        State::InQuoteAmp,
        State::InStr,
        State::InStrWs,
        State::Slash,
        State::InAmp,
        State::Final,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Composable set of scanner actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actions(u16);

pub const NONE: u16 = 0;
/// Append the current character to the token buffer
pub const APPEND: u16 = 1 << 0;
/// Append the saved whitespace character to the token buffer
pub const APPEND_WS: u16 = 1 << 1;
/// Remember a whitespace character for later
pub const SAVE_WS: u16 = 1 << 2;
/// Append the current character to the escape buffer
pub const SAVE_ESC: u16 = 1 << 3;
/// Resolve the escape buffer through the entity table
pub const RESOLVE: u16 = 1 << 4;
/// Present the current character again on the next step
pub const PUSHBACK: u16 = 1 << 5;
pub const EMIT_EOF: u16 = 1 << 6;
pub const EMIT_LT: u16 = 1 << 7;
pub const EMIT_LTSLASH: u16 = 1 << 8;
pub const EMIT_GT: u16 = 1 << 9;
pub const EMIT_SLASHGT: u16 = 1 << 10;
pub const EMIT_EQ: u16 = 1 << 11;
pub const EMIT_WORD: u16 = 1 << 12;
pub const EMIT_QSTR: u16 = 1 << 13;
pub const EMIT_TEXT: u16 = 1 << 14;
pub const EMIT_BAD: u16 = 1 << 15;

impl Actions {
    pub const fn contains(self, flag: u16) -> bool {
        self.0 & flag == flag && flag != 0
    }

    pub const fn emits(self) -> bool {
        self.0 & !(APPEND | APPEND_WS | SAVE_WS | SAVE_ESC | RESOLVE | PUSHBACK) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Why a cell emits a `Bad` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    UnterminatedTag,
    UnterminatedQuote,
    UnterminatedEntity,
    MalformedTagOpener,
    SlashWithoutGt,
    UnexpectedChar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: State,
    pub actions: Actions,
    pub fault: Option<Fault>,
}

const fn t(next: State, actions: u16) -> Transition {
    Transition {
        next,
        actions: Actions(actions),
        fault: None,
    }
}

const fn bad(fault: Fault) -> Transition {
    Transition {
        next: State::Final,
        actions: Actions(EMIT_BAD),
        fault: Some(fault),
    }
}

use Fault::*;
use State::*;

const OPEN: Transition = bad(MalformedTagOpener);
const UNEXPECTED: Transition = bad(UnexpectedChar);
const NO_SEMI: Transition = bad(UnterminatedEntity);
const NO_GT: Transition = bad(SlashWithoutGt);

#[rustfmt::skip]
static TABLE: [[Transition; CharClass::COUNT]; State::COUNT] = [
    //  EOF                          QUOTE                 LT                  GT                              EQUAL                           SLASH                   AMP                       SEMI                      WHITESPACE              OTHER
    /* Init */
    [t(Final, EMIT_EOF),             t(InStr, APPEND),     t(ToTag, NONE),     t(Init, EMIT_GT),               t(InStr, APPEND),               t(InStr, APPEND),       t(InAmp, NONE),           t(InStr, APPEND),         t(Init, NONE),          t(InStr, APPEND)],
    /* ToTag */
    [bad(UnterminatedTag),           OPEN,                 OPEN,               OPEN,                           OPEN,                           t(ToTag2, EMIT_LTSLASH), OPEN,                    t(InTag, EMIT_LT | PUSHBACK), OPEN,               t(InTag, EMIT_LT | PUSHBACK)],
    /* ToTag2 */
    [bad(UnterminatedTag),           OPEN,                 OPEN,               OPEN,                           OPEN,                           OPEN,                   OPEN,                     t(InTag, APPEND),         OPEN,                   t(InTag, APPEND)],
    /* InTag */
    [bad(UnterminatedTag),           UNEXPECTED,           UNEXPECTED,         t(Init, EMIT_WORD | PUSHBACK),  t(InTag2, EMIT_WORD | PUSHBACK), t(Slash, EMIT_WORD),   UNEXPECTED,               t(InTag, APPEND),         t(InTag2, EMIT_WORD),   t(InTag, APPEND)],
    /* InTag2 */
    [bad(UnterminatedTag),           t(InQuote, NONE),     UNEXPECTED,         t(Init, EMIT_GT),               t(InTag2, EMIT_EQ),             t(Slash, NONE),         UNEXPECTED,               t(InTag, APPEND),         t(InTag2, NONE),        t(InTag, APPEND)],
    /* InQuote */
    [bad(UnterminatedQuote),         t(InTag2, EMIT_QSTR), t(InQuote, APPEND), t(InQuote, APPEND),             t(InQuote, APPEND),             t(InQuote, APPEND),     t(InQuoteAmp, NONE),      t(InQuote, APPEND),       t(InQuote, APPEND),     t(InQuote, APPEND)],
    /* InQuoteAmp */
    [NO_SEMI,                        NO_SEMI,              NO_SEMI,            NO_SEMI,                        NO_SEMI,                        NO_SEMI,                NO_SEMI,                  t(InQuote, RESOLVE),      NO_SEMI,                t(InQuoteAmp, SAVE_ESC)],
    /* InStr */
    [t(Init, EMIT_TEXT | PUSHBACK),  t(InStr, APPEND),     t(ToTag, EMIT_TEXT), t(Init, EMIT_TEXT | PUSHBACK), t(InStr, APPEND),               t(InStr, APPEND),       t(InAmp, NONE),           t(InStr, APPEND),         t(InStrWs, SAVE_WS),    t(InStr, APPEND)],
    /* InStrWs */
    [t(Init, EMIT_TEXT | PUSHBACK),  t(InStr, APPEND_WS | APPEND), t(ToTag, EMIT_TEXT), t(Init, EMIT_TEXT | PUSHBACK), t(InStr, APPEND_WS | APPEND), t(InStr, APPEND_WS | APPEND), t(InAmp, APPEND_WS), t(InStr, APPEND_WS | APPEND), t(InStrWs, NONE), t(InStr, APPEND_WS | APPEND)],
    /* Slash */
    [bad(UnterminatedTag),           NO_GT,                NO_GT,              t(Init, EMIT_SLASHGT),          NO_GT,                          NO_GT,                  NO_GT,                    NO_GT,                    NO_GT,                  NO_GT],
    /* InAmp */
    [NO_SEMI,                        NO_SEMI,              NO_SEMI,            NO_SEMI,                        NO_SEMI,                        NO_SEMI,                NO_SEMI,                  t(InStr, RESOLVE),        NO_SEMI,                t(InAmp, SAVE_ESC)],
    /* Final */
    [t(Final, EMIT_EOF),             t(Final, EMIT_EOF),   t(Final, EMIT_EOF), t(Final, EMIT_EOF),             t(Final, EMIT_EOF),             t(Final, EMIT_EOF),     t(Final, EMIT_EOF),       t(Final, EMIT_EOF),       t(Final, EMIT_EOF),     t(Final, EMIT_EOF)],
];

/// Look up the cell for `(state, class)`.
pub fn transition(state: State, class: CharClass) -> Transition {
    TABLE[state.index()][class.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSES: [CharClass; CharClass::COUNT] = [
        CharClass::Eof,
        CharClass::Quote,
        CharClass::Lt,
        CharClass::Gt,
        CharClass::Equal,
        CharClass::Slash,
        CharClass::Amp,
        CharClass::Semi,
        CharClass::Whitespace,
        CharClass::Other,
    ];

    #[test]
    fn test_at_most_one_emission_per_cell() {
        let emit_flags = [
            EMIT_EOF,
            EMIT_LT,
            EMIT_LTSLASH,
            EMIT_GT,
            EMIT_SLASHGT,
            EMIT_EQ,
            EMIT_WORD,
            EMIT_QSTR,
            EMIT_TEXT,
            EMIT_BAD,
        ];
        for state in State::ALL {
            for class in CLASSES {
                let cell = transition(state, class);
                let emitted = emit_flags
                    .iter()
                    .filter(|flag| cell.actions.contains(**flag))
                    .count();
                assert!(emitted <= 1, "{state:?} x {class:?} emits {emitted} tokens");
            }
        }
    }

    #[test]
    fn test_faults_always_emit_bad_and_stop() {
        for state in State::ALL {
            for class in CLASSES {
                let cell = transition(state, class);
                assert_eq!(
                    cell.fault.is_some(),
                    cell.actions.contains(EMIT_BAD),
                    "{state:?} x {class:?}"
                );
                if cell.fault.is_some() {
                    assert_eq!(cell.next, State::Final);
                }
            }
        }
    }

    #[test]
    fn test_end_of_input_always_makes_progress() {
        // EOF either emits or pushes back into a state that emits on EOF.
        for state in State::ALL {
            let cell = transition(state, CharClass::Eof);
            assert!(cell.actions.emits(), "{state:?} swallows EOF");
            if cell.actions.contains(PUSHBACK) {
                let replay = transition(cell.next, CharClass::Eof);
                assert!(replay.actions.contains(EMIT_EOF));
            }
        }
    }

    #[test]
    fn test_pushback_always_pairs_with_an_emission() {
        for state in State::ALL {
            for class in CLASSES {
                let cell = transition(state, class);
                if cell.actions.contains(PUSHBACK) {
                    assert!(cell.actions.emits(), "{state:?} x {class:?} loops");
                }
            }
        }
    }

    #[test]
    fn test_final_absorbs_everything() {
        for class in CLASSES {
            let cell = transition(State::Final, class);
            assert_eq!(cell.next, State::Final);
            assert!(cell.actions.contains(EMIT_EOF));
        }
    }
}
