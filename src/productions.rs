//! Production tables and the machine registry.
//!
//! This module mirrors the output of the offline grammar compiler: one state
//! table per production, plus four registries keyed by which parameters the
//! production takes. Context-parameterized productions are registered under
//! an encoded name `<production> = <context>`.
//!
//! The tables are plain data. Nothing in here executes; the parser's
//! interpreter walks whichever table the registry hands it.

use crate::classify::{
    AMP, ANCHOR, BACKSLASH, BANG, BOM, COLON, CR, DASH, DIGIT, DOT, EOF, ESC_SINGLE, ESC_U,
    ESC_UU, ESC_X, GT, HASH, HEX, INDICATOR, LF, LT, NS, PERCENT, PRINTABLE, QUESTION, SPACE,
    STAR, TAG, UPPER_A, UPPER_L, UPPER_M, UPPER_Y, URI, WHITE, WORD,
};
use crate::error::{YeastError, YeastResult};
use crate::machine::Action::{
    BeginChoice, BeginToken, BeginTokenChomped, BeginTokenKept, Commit, EmptyToken, EndChoice,
    EndToken, EndTokenChomped, EndTokenKept, Failure, IncrementCounter, NextChar, NextLine,
    NonPositiveN, PopState, PrevChar, PushState, ResetCounter, ResetState, SetState, Success,
};
use crate::machine::Guard::{CounterLessEqualN, CounterLessThanN, StartOfLine};
use crate::machine::{Choice, MachineDef, State};
use crate::parser::Production;
use crate::token::Code;

/// Separator between a production name and its context in encoded registry
/// names.
pub(crate) const CONTEXT_SEPARATOR: &str = " = ";

struct Registered {
    name: &'static str,
    machine: &'static MachineDef,
}

/// Select the machine for a production, honoring the parameter shape.
pub(crate) fn lookup(production: &Production<'_>) -> YeastResult<&'static MachineDef> {
    let table: &[Registered] = match (production.n.is_some(), production.t.is_some()) {
        (false, false) => &MACHINES,
        (true, false) => &MACHINES_WITH_N,
        (false, true) => &MACHINES_WITH_T,
        (true, true) => &MACHINES_WITH_NT,
    };
    for entry in table {
        let matched = match production.c {
            None => entry.name == production.name,
            Some(context) => entry
                .name
                .split_once(CONTEXT_SEPARATOR)
                .is_some_and(|(name, c)| name == production.name && c == context),
        };
        if matched {
            return Ok(entry.machine);
        }
    }
    Err(YeastError::UnknownProduction { name: production.name.to_string() })
}

static MACHINES: [Registered; 11] = [
    Registered { name: "l-yaml-stream", machine: &L_YAML_STREAM },
    Registered { name: "c-byte-order-mark", machine: &C_BYTE_ORDER_MARK },
    Registered { name: "b-break", machine: &B_BREAK },
    Registered { name: "b-as-line-feed", machine: &B_AS_LINE_FEED },
    Registered { name: "s-separate-in-line", machine: &S_SEPARATE_IN_LINE },
    Registered { name: "l-comment", machine: &L_COMMENT },
    Registered { name: "c-ns-esc-char", machine: &C_NS_ESC_CHAR },
    Registered { name: "c-ns-alias-node", machine: &C_NS_ALIAS_NODE },
    Registered { name: "c-ns-anchor-property", machine: &C_NS_ANCHOR_PROPERTY },
    Registered { name: "c-ns-tag-property", machine: &C_NS_TAG_PROPERTY },
    Registered { name: "l-directive", machine: &L_DIRECTIVE },
];

static MACHINES_WITH_N: [Registered; 9] = [
    Registered { name: "s-indent", machine: &S_INDENT },
    Registered { name: "s-indent-lt", machine: &S_INDENT_LT },
    Registered { name: "s-indent-le", machine: &S_INDENT_LE },
    Registered { name: "l-empty = block-out", machine: &L_EMPTY },
    Registered { name: "l-empty = block-in", machine: &L_EMPTY },
    Registered { name: "l-empty = flow-out", machine: &L_EMPTY },
    Registered { name: "l-empty = flow-in", machine: &L_EMPTY },
    Registered { name: "ns-plain = flow-out", machine: &NS_PLAIN_FLOW_OUT },
    Registered { name: "ns-plain = flow-in", machine: &NS_PLAIN_FLOW_IN },
];

static MACHINES_WITH_T: [Registered; 1] =
    [Registered { name: "b-chomped-last", machine: &B_CHOMPED_LAST }];

static MACHINES_WITH_NT: [Registered; 1] =
    [Registered { name: "l-chomped-empty", machine: &L_CHOMPED_EMPTY }];

// ---------------------------------------------------------------------------
// b-break, b-as-line-feed
// ---------------------------------------------------------------------------

macro_rules! break_machine {
    ($code:expr) => {
        [
            // 0: dispatch on the break form
            State { actions: &[], guards: &[], arcs: &[(CR, 1), (LF, 2), (0, 6)] },
            // 1: carriage return, maybe followed by a line feed
            State {
                actions: &[BeginToken($code), NextChar],
                guards: &[],
                arcs: &[(LF, 3), (0, 4)],
            },
            // 2: lone line feed
            State { actions: &[BeginToken($code), NextChar], guards: &[], arcs: &[(0, 4)] },
            // 3: line feed of a CR LF pair
            State { actions: &[NextChar], guards: &[], arcs: &[(0, 4)] },
            // 4: close the break
            State { actions: &[EndToken($code), NextLine], guards: &[], arcs: &[(0, 5)] },
            // 5
            State { actions: &[Success], guards: &[], arcs: &[] },
            // 6
            State { actions: &[Failure], guards: &[], arcs: &[] },
        ]
    };
}

static B_BREAK_STATES: [State; 7] = break_machine!(Code::Break);
static B_BREAK: MachineDef = MachineDef { name: "b-break", states: &B_BREAK_STATES };

static B_AS_LINE_FEED_STATES: [State; 7] = break_machine!(Code::LineFeed);
static B_AS_LINE_FEED: MachineDef =
    MachineDef { name: "b-as-line-feed", states: &B_AS_LINE_FEED_STATES };

// ---------------------------------------------------------------------------
// c-byte-order-mark
// ---------------------------------------------------------------------------

static C_BYTE_ORDER_MARK_STATES: [State; 4] = [
    State { actions: &[], guards: &[], arcs: &[(BOM, 1), (0, 3)] },
    State {
        actions: &[BeginToken(Code::Bom), NextChar, EndToken(Code::Bom)],
        guards: &[],
        arcs: &[(0, 2)],
    },
    State { actions: &[Success], guards: &[], arcs: &[] },
    State { actions: &[Failure], guards: &[], arcs: &[] },
];
static C_BYTE_ORDER_MARK: MachineDef =
    MachineDef { name: "c-byte-order-mark", states: &C_BYTE_ORDER_MARK_STATES };

// ---------------------------------------------------------------------------
// s-separate-in-line: white space, or nothing at the start of a line
// ---------------------------------------------------------------------------

static S_SEPARATE_IN_LINE_STATES: [State; 7] = [
    // 0: consume white space if there is any
    State { actions: &[], guards: &[], arcs: &[(WHITE, 1), (0, 4)] },
    // 1
    State {
        actions: &[BeginToken(Code::White), NextChar],
        guards: &[],
        arcs: &[(WHITE, 2), (0, 3)],
    },
    // 2
    State { actions: &[NextChar], guards: &[], arcs: &[(WHITE, 2), (0, 3)] },
    // 3
    State { actions: &[EndToken(Code::White)], guards: &[], arcs: &[(0, 5)] },
    // 4: no white space counts as separation only at the start of a line
    State { actions: &[], guards: &[(StartOfLine, 5)], arcs: &[(0, 6)] },
    // 5
    State { actions: &[Success], guards: &[], arcs: &[] },
    // 6
    State { actions: &[Failure], guards: &[], arcs: &[] },
];
static S_SEPARATE_IN_LINE: MachineDef =
    MachineDef { name: "s-separate-in-line", states: &S_SEPARATE_IN_LINE_STATES };

// ---------------------------------------------------------------------------
// s-indent(n): exactly n spaces
// ---------------------------------------------------------------------------

static S_INDENT_STATES: [State; 6] = [
    State {
        actions: &[ResetCounter, BeginToken(Code::Indent)],
        guards: &[(CounterLessThanN, 1)],
        arcs: &[(0, 3)],
    },
    State { actions: &[], guards: &[], arcs: &[(SPACE, 2), (0, 5)] },
    State {
        actions: &[NextChar, IncrementCounter],
        guards: &[(CounterLessThanN, 1)],
        arcs: &[(0, 3)],
    },
    State { actions: &[EndToken(Code::Indent)], guards: &[], arcs: &[(0, 4)] },
    State { actions: &[Success], guards: &[], arcs: &[] },
    State { actions: &[Failure], guards: &[], arcs: &[] },
];
static S_INDENT: MachineDef = MachineDef { name: "s-indent", states: &S_INDENT_STATES };

// s-indent(<n) and s-indent(<=n): bounded runs of spaces.

macro_rules! bounded_indent_machine {
    ($guard:expr) => {
        [
            // 0: a bound below zero can never be met
            State {
                actions: &[ResetCounter, BeginToken(Code::Indent)],
                guards: &[($guard, 1)],
                arcs: &[(0, 6)],
            },
            // 1: optional next space
            State { actions: &[], guards: &[], arcs: &[(SPACE, 2), (0, 4)] },
            // 2: take it only while the bound allows
            State { actions: &[IncrementCounter], guards: &[($guard, 3)], arcs: &[(0, 4)] },
            // 3
            State { actions: &[NextChar], guards: &[], arcs: &[(SPACE, 2), (0, 4)] },
            // 4
            State { actions: &[EndToken(Code::Indent)], guards: &[], arcs: &[(0, 5)] },
            // 5
            State { actions: &[Success], guards: &[], arcs: &[] },
            // 6
            State { actions: &[NonPositiveN], guards: &[], arcs: &[] },
        ]
    };
}

static S_INDENT_LT_STATES: [State; 7] = bounded_indent_machine!(CounterLessThanN);
static S_INDENT_LT: MachineDef = MachineDef { name: "s-indent-lt", states: &S_INDENT_LT_STATES };

static S_INDENT_LE_STATES: [State; 7] = bounded_indent_machine!(CounterLessEqualN);
static S_INDENT_LE: MachineDef = MachineDef { name: "s-indent-le", states: &S_INDENT_LE_STATES };

// ---------------------------------------------------------------------------
// l-empty(n,c): an empty line (at most n indentation spaces, then a break).
// Vacuously matched by an exhausted stream.
// ---------------------------------------------------------------------------

static L_EMPTY_STATES: [State; 12] = [
    // 0
    State { actions: &[ResetCounter, BeginToken(Code::Indent)], guards: &[], arcs: &[(0, 1)] },
    // 1
    State {
        actions: &[],
        guards: &[],
        arcs: &[(SPACE, 2), (CR, 4), (LF, 4), (EOF, 9), (0, 10)],
    },
    // 2
    State { actions: &[IncrementCounter], guards: &[(CounterLessEqualN, 3)], arcs: &[(0, 10)] },
    // 3
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(SPACE, 2), (CR, 4), (LF, 4), (EOF, 9), (0, 10)],
    },
    // 4
    State {
        actions: &[EndToken(Code::Indent), BeginToken(Code::LineFeed)],
        guards: &[],
        arcs: &[(CR, 5), (LF, 6)],
    },
    // 5
    State { actions: &[NextChar], guards: &[], arcs: &[(LF, 7), (0, 8)] },
    // 6
    State { actions: &[NextChar], guards: &[], arcs: &[(0, 8)] },
    // 7
    State { actions: &[NextChar], guards: &[], arcs: &[(0, 8)] },
    // 8
    State { actions: &[EndToken(Code::LineFeed), NextLine], guards: &[], arcs: &[(0, 11)] },
    // 9
    State { actions: &[EndToken(Code::Indent)], guards: &[], arcs: &[(0, 11)] },
    // 10
    State { actions: &[Failure], guards: &[], arcs: &[] },
    // 11
    State { actions: &[Success], guards: &[], arcs: &[] },
];
static L_EMPTY: MachineDef = MachineDef { name: "l-empty", states: &L_EMPTY_STATES };

// ---------------------------------------------------------------------------
// b-chomped-last(t): the final break of a block scalar
// ---------------------------------------------------------------------------

static B_CHOMPED_LAST_STATES: [State; 7] = [
    State { actions: &[], guards: &[], arcs: &[(CR, 1), (LF, 2), (EOF, 5), (0, 6)] },
    State { actions: &[BeginTokenChomped, NextChar], guards: &[], arcs: &[(LF, 3), (0, 4)] },
    State { actions: &[BeginTokenChomped, NextChar], guards: &[], arcs: &[(0, 4)] },
    State { actions: &[NextChar], guards: &[], arcs: &[(0, 4)] },
    State { actions: &[EndTokenChomped, NextLine], guards: &[], arcs: &[(0, 5)] },
    State { actions: &[Success], guards: &[], arcs: &[] },
    State { actions: &[Failure], guards: &[], arcs: &[] },
];
static B_CHOMPED_LAST: MachineDef =
    MachineDef { name: "b-chomped-last", states: &B_CHOMPED_LAST_STATES };

// ---------------------------------------------------------------------------
// l-chomped-empty(n,t): trailing empty lines after a block scalar
// ---------------------------------------------------------------------------

static L_CHOMPED_EMPTY_STATES: [State; 12] = [
    // 0: one empty line per iteration
    State { actions: &[], guards: &[], arcs: &[(SPACE, 1), (CR, 1), (LF, 1), (0, 10)] },
    // 1
    State {
        actions: &[PushState, ResetCounter, BeginToken(Code::Indent)],
        guards: &[],
        arcs: &[(0, 2)],
    },
    // 2
    State {
        actions: &[],
        guards: &[],
        arcs: &[(SPACE, 3), (CR, 5), (LF, 6), (EOF, 9), (0, 11)],
    },
    // 3
    State { actions: &[IncrementCounter], guards: &[(CounterLessEqualN, 4)], arcs: &[(0, 11)] },
    // 4
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(SPACE, 3), (CR, 5), (LF, 6), (EOF, 9), (0, 11)],
    },
    // 5
    State {
        actions: &[EndToken(Code::Indent), BeginTokenKept, NextChar],
        guards: &[],
        arcs: &[(LF, 7), (0, 8)],
    },
    // 6
    State {
        actions: &[EndToken(Code::Indent), BeginTokenKept, NextChar],
        guards: &[],
        arcs: &[(0, 8)],
    },
    // 7
    State { actions: &[NextChar], guards: &[], arcs: &[(0, 8)] },
    // 8
    State { actions: &[EndTokenKept, NextLine, PopState], guards: &[], arcs: &[(0, 0)] },
    // 9
    State { actions: &[EndToken(Code::Indent), PopState], guards: &[], arcs: &[(0, 10)] },
    // 10
    State { actions: &[Success], guards: &[], arcs: &[] },
    // 11: the line turned out not to be empty
    State { actions: &[ResetState], guards: &[], arcs: &[(0, 10)] },
];
static L_CHOMPED_EMPTY: MachineDef =
    MachineDef { name: "l-chomped-empty", states: &L_CHOMPED_EMPTY_STATES };

// ---------------------------------------------------------------------------
// c-ns-esc-char: backslash escapes, including \xXX, \uXXXX and \UXXXXXXXX
// ---------------------------------------------------------------------------

static C_NS_ESC_CHAR_STATES: [State; 21] = [
    // 0
    State { actions: &[], guards: &[], arcs: &[(BACKSLASH, 1), (0, 20)] },
    // 1: the backslash indicator, then dispatch on the escape form
    State {
        actions: &[
            BeginChoice(Choice::Escape),
            EmptyToken(Code::BeginEscape),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
        ],
        guards: &[],
        arcs: &[(ESC_SINGLE, 2), (ESC_X, 3), (ESC_U, 6), (ESC_UU, 11), (0, 20)],
    },
    // 2: single character escape
    State {
        actions: &[
            Commit(Choice::Escape),
            BeginToken(Code::Meta),
            NextChar,
            EndToken(Code::Meta),
            EmptyToken(Code::EndEscape),
            EndChoice(Choice::Escape),
            Success,
        ],
        guards: &[],
        arcs: &[],
    },
    // 3: \x, two hex digits
    State {
        actions: &[
            Commit(Choice::Escape),
            BeginChoice(Choice::Escaped),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
            BeginToken(Code::Meta),
        ],
        guards: &[],
        arcs: &[(HEX, 4), (0, 20)],
    },
    // 4
    State { actions: &[NextChar], guards: &[], arcs: &[(HEX, 5), (0, 20)] },
    // 5
    State {
        actions: &[
            NextChar,
            EndToken(Code::Meta),
            Commit(Choice::Escaped),
            EndChoice(Choice::Escaped),
            EmptyToken(Code::EndEscape),
            EndChoice(Choice::Escape),
            Success,
        ],
        guards: &[],
        arcs: &[],
    },
    // 6: \u, four hex digits
    State {
        actions: &[
            Commit(Choice::Escape),
            BeginChoice(Choice::Escaped),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
            BeginToken(Code::Meta),
        ],
        guards: &[],
        arcs: &[(HEX, 7), (0, 20)],
    },
    // 7
    State { actions: &[NextChar], guards: &[], arcs: &[(HEX, 8), (0, 20)] },
    // 8
    State { actions: &[NextChar], guards: &[], arcs: &[(HEX, 9), (0, 20)] },
    // 9
    State { actions: &[NextChar], guards: &[], arcs: &[(HEX, 10), (0, 20)] },
    // 10
    State {
        actions: &[
            NextChar,
            EndToken(Code::Meta),
            Commit(Choice::Escaped),
            EndChoice(Choice::Escaped),
            EmptyToken(Code::EndEscape),
            EndChoice(Choice::Escape),
            Success,
        ],
        guards: &[],
        arcs: &[],
    },
    // 11: \U, eight hex digits
    State {
        actions: &[
            Commit(Choice::Escape),
            BeginChoice(Choice::Escaped),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
            BeginToken(Code::Meta),
        ],
        guards: &[],
        arcs: &[(HEX, 12), (0, 20)],
    },
    // 12
    State { actions: &[NextChar], guards: &[], arcs: &[(HEX, 13), (0, 20)] },
    // 13
    State { actions: &[NextChar], guards: &[], arcs: &[(HEX, 14), (0, 20)] },
    // 14
    State { actions: &[NextChar], guards: &[], arcs: &[(HEX, 15), (0, 20)] },
    // 15
    State { actions: &[NextChar], guards: &[], arcs: &[(HEX, 16), (0, 20)] },
    // 16
    State { actions: &[NextChar], guards: &[], arcs: &[(HEX, 17), (0, 20)] },
    // 17
    State { actions: &[NextChar], guards: &[], arcs: &[(HEX, 18), (0, 20)] },
    // 18
    State { actions: &[NextChar], guards: &[], arcs: &[(HEX, 19), (0, 20)] },
    // 19
    State {
        actions: &[
            NextChar,
            EndToken(Code::Meta),
            Commit(Choice::Escaped),
            EndChoice(Choice::Escaped),
            EmptyToken(Code::EndEscape),
            EndChoice(Choice::Escape),
            Success,
        ],
        guards: &[],
        arcs: &[],
    },
    // 20
    State { actions: &[Failure], guards: &[], arcs: &[] },
];
static C_NS_ESC_CHAR: MachineDef =
    MachineDef { name: "c-ns-esc-char", states: &C_NS_ESC_CHAR_STATES };

// ---------------------------------------------------------------------------
// l-comment: optional separation white space, optional comment, then a break
// or the end of input
// ---------------------------------------------------------------------------

static L_COMMENT_STATES: [State; 15] = [
    // 0
    State { actions: &[], guards: &[], arcs: &[(WHITE, 1), (HASH, 4), (0, 14)] },
    // 1
    State {
        actions: &[BeginToken(Code::White), NextChar],
        guards: &[],
        arcs: &[(WHITE, 2), (0, 3)],
    },
    // 2
    State { actions: &[NextChar], guards: &[], arcs: &[(WHITE, 2), (0, 3)] },
    // 3
    State {
        actions: &[EndToken(Code::White)],
        guards: &[],
        arcs: &[(HASH, 4), (CR, 9), (LF, 10), (EOF, 13), (0, 14)],
    },
    // 4: the '#' indicator
    State {
        actions: &[
            EmptyToken(Code::BeginComment),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
        ],
        guards: &[],
        arcs: &[(CR, 8), (LF, 8), (EOF, 8), (PRINTABLE, 5), (0, 8)],
    },
    // 5: comment text
    State {
        actions: &[BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(CR, 7), (LF, 7), (EOF, 7), (PRINTABLE, 6), (0, 7)],
    },
    // 6
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(CR, 7), (LF, 7), (EOF, 7), (PRINTABLE, 6), (0, 7)],
    },
    // 7
    State { actions: &[EndToken(Code::Meta)], guards: &[], arcs: &[(0, 8)] },
    // 8
    State {
        actions: &[EmptyToken(Code::EndComment)],
        guards: &[],
        arcs: &[(CR, 9), (LF, 10), (EOF, 13), (0, 14)],
    },
    // 9
    State {
        actions: &[BeginToken(Code::Break), NextChar],
        guards: &[],
        arcs: &[(LF, 11), (0, 12)],
    },
    // 10
    State { actions: &[BeginToken(Code::Break), NextChar], guards: &[], arcs: &[(0, 12)] },
    // 11
    State { actions: &[NextChar], guards: &[], arcs: &[(0, 12)] },
    // 12
    State { actions: &[EndToken(Code::Break), NextLine], guards: &[], arcs: &[(0, 13)] },
    // 13
    State { actions: &[Success], guards: &[], arcs: &[] },
    // 14
    State { actions: &[Failure], guards: &[], arcs: &[] },
];
static L_COMMENT: MachineDef = MachineDef { name: "l-comment", states: &L_COMMENT_STATES };

// ---------------------------------------------------------------------------
// c-ns-alias-node and c-ns-anchor-property: an indicator and a name
// ---------------------------------------------------------------------------

macro_rules! named_node_machine {
    ($indicator:expr, $begin:expr, $end:expr) => {
        [
            // 0
            State { actions: &[], guards: &[], arcs: &[($indicator, 1), (0, 5)] },
            // 1
            State {
                actions: &[
                    EmptyToken($begin),
                    BeginToken(Code::Indicator),
                    NextChar,
                    EndToken(Code::Indicator),
                ],
                guards: &[],
                arcs: &[(ANCHOR, 2), (0, 5)],
            },
            // 2
            State {
                actions: &[BeginToken(Code::Meta), NextChar],
                guards: &[],
                arcs: &[(ANCHOR, 3), (0, 4)],
            },
            // 3
            State { actions: &[NextChar], guards: &[], arcs: &[(ANCHOR, 3), (0, 4)] },
            // 4
            State {
                actions: &[EndToken(Code::Meta), EmptyToken($end), Success],
                guards: &[],
                arcs: &[],
            },
            // 5
            State { actions: &[Failure], guards: &[], arcs: &[] },
        ]
    };
}

static C_NS_ALIAS_NODE_STATES: [State; 6] =
    named_node_machine!(STAR, Code::BeginAlias, Code::EndAlias);
static C_NS_ALIAS_NODE: MachineDef =
    MachineDef { name: "c-ns-alias-node", states: &C_NS_ALIAS_NODE_STATES };

static C_NS_ANCHOR_PROPERTY_STATES: [State; 6] =
    named_node_machine!(AMP, Code::BeginAnchor, Code::EndAnchor);
static C_NS_ANCHOR_PROPERTY: MachineDef =
    MachineDef { name: "c-ns-anchor-property", states: &C_NS_ANCHOR_PROPERTY_STATES };

// ---------------------------------------------------------------------------
// c-ns-tag-property: verbatim `!<uri>`, named handle `!word!suffix`,
// secondary `!!suffix`, primary `!suffix` or non-specific `!`, resolved by
// backtracking
// ---------------------------------------------------------------------------

static C_NS_TAG_PROPERTY_STATES: [State; 23] = [
    // 0
    State { actions: &[], guards: &[], arcs: &[(BANG, 1), (0, 22)] },
    // 1: try the verbatim form first
    State { actions: &[PushState], guards: &[], arcs: &[(0, 2)] },
    // 2
    State {
        actions: &[
            EmptyToken(Code::BeginTag),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
        ],
        guards: &[],
        arcs: &[(LT, 3), (0, 8)],
    },
    // 3
    State {
        actions: &[BeginToken(Code::Indicator), NextChar, EndToken(Code::Indicator)],
        guards: &[],
        arcs: &[(URI, 4), (0, 8)],
    },
    // 4
    State {
        actions: &[BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(URI, 5), (0, 6)],
    },
    // 5
    State { actions: &[NextChar], guards: &[], arcs: &[(URI, 5), (0, 6)] },
    // 6
    State { actions: &[EndToken(Code::Meta)], guards: &[], arcs: &[(GT, 7), (0, 8)] },
    // 7
    State {
        actions: &[
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
            PopState,
            EmptyToken(Code::EndTag),
            Success,
        ],
        guards: &[],
        arcs: &[],
    },
    // 8: not verbatim; try a named (or secondary) handle
    State { actions: &[ResetState, PushState], guards: &[], arcs: &[(0, 9)] },
    // 9
    State {
        actions: &[
            EmptyToken(Code::BeginTag),
            EmptyToken(Code::BeginHandle),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
        ],
        guards: &[],
        arcs: &[(WORD, 10), (BANG, 13), (0, 17)],
    },
    // 10
    State {
        actions: &[BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(WORD, 11), (0, 12)],
    },
    // 11
    State { actions: &[NextChar], guards: &[], arcs: &[(WORD, 11), (0, 12)] },
    // 12
    State { actions: &[EndToken(Code::Meta)], guards: &[], arcs: &[(BANG, 13), (0, 17)] },
    // 13: closing '!' of the handle commits this alternative
    State {
        actions: &[
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
            EmptyToken(Code::EndHandle),
            PopState,
        ],
        guards: &[],
        arcs: &[(TAG, 14), (0, 22)],
    },
    // 14
    State {
        actions: &[BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(TAG, 15), (0, 16)],
    },
    // 15
    State { actions: &[NextChar], guards: &[], arcs: &[(TAG, 15), (0, 16)] },
    // 16
    State {
        actions: &[EndToken(Code::Meta), EmptyToken(Code::EndTag), Success],
        guards: &[],
        arcs: &[],
    },
    // 17: primary handle, possibly non-specific
    State {
        actions: &[
            ResetState,
            EmptyToken(Code::BeginTag),
            EmptyToken(Code::BeginHandle),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
            EmptyToken(Code::EndHandle),
        ],
        guards: &[],
        arcs: &[(TAG, 18), (0, 21)],
    },
    // 18
    State {
        actions: &[BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(TAG, 19), (0, 20)],
    },
    // 19
    State { actions: &[NextChar], guards: &[], arcs: &[(TAG, 19), (0, 20)] },
    // 20
    State {
        actions: &[EndToken(Code::Meta), EmptyToken(Code::EndTag), Success],
        guards: &[],
        arcs: &[],
    },
    // 21: a lone '!' is the non-specific tag
    State { actions: &[EmptyToken(Code::EndTag), Success], guards: &[], arcs: &[] },
    // 22
    State { actions: &[Failure], guards: &[], arcs: &[] },
];
static C_NS_TAG_PROPERTY: MachineDef =
    MachineDef { name: "c-ns-tag-property", states: &C_NS_TAG_PROPERTY_STATES };

// ---------------------------------------------------------------------------
// l-directive: %YAML with a version number, or a reserved directive with
// arbitrary arguments, resolved by backtracking on the keyword
// ---------------------------------------------------------------------------

static L_DIRECTIVE_STATES: [State; 29] = [
    // 0
    State { actions: &[], guards: &[], arcs: &[(PERCENT, 1), (0, 26)] },
    // 1: '%', then try the YAML keyword
    State {
        actions: &[
            EmptyToken(Code::BeginDirective),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
            PushState,
        ],
        guards: &[],
        arcs: &[(UPPER_Y, 2), (NS, 14), (0, 28)],
    },
    // 2
    State { actions: &[BeginToken(Code::Meta), NextChar], guards: &[], arcs: &[(UPPER_A, 3), (0, 14)] },
    // 3
    State { actions: &[NextChar], guards: &[], arcs: &[(UPPER_M, 4), (0, 14)] },
    // 4
    State { actions: &[NextChar], guards: &[], arcs: &[(UPPER_L, 5), (0, 14)] },
    // 5
    State { actions: &[NextChar], guards: &[], arcs: &[(WHITE, 6), (0, 14)] },
    // 6: "YAML" confirmed
    State {
        actions: &[EndToken(Code::Meta), PopState, BeginToken(Code::White), NextChar],
        guards: &[],
        arcs: &[(WHITE, 7), (0, 8)],
    },
    // 7
    State { actions: &[NextChar], guards: &[], arcs: &[(WHITE, 7), (0, 8)] },
    // 8
    State { actions: &[EndToken(Code::White)], guards: &[], arcs: &[(DIGIT, 9), (0, 26)] },
    // 9: version number
    State {
        actions: &[BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(DIGIT, 10), (DOT, 11), (0, 13)],
    },
    // 10
    State { actions: &[NextChar], guards: &[], arcs: &[(DIGIT, 10), (DOT, 11), (0, 13)] },
    // 11
    State { actions: &[NextChar], guards: &[], arcs: &[(DIGIT, 12), (0, 26)] },
    // 12
    State { actions: &[NextChar], guards: &[], arcs: &[(DIGIT, 12), (0, 13)] },
    // 13
    State {
        actions: &[EndToken(Code::Meta), EmptyToken(Code::EndDirective)],
        guards: &[],
        arcs: &[(CR, 21), (LF, 22), (EOF, 25), (0, 26)],
    },
    // 14: reserved directive name
    State {
        actions: &[ResetState, BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(ANCHOR, 15), (0, 16)],
    },
    // 15
    State { actions: &[NextChar], guards: &[], arcs: &[(ANCHOR, 15), (0, 16)] },
    // 16
    State { actions: &[EndToken(Code::Meta)], guards: &[], arcs: &[(WHITE, 17), (0, 20)] },
    // 17
    State {
        actions: &[BeginToken(Code::White), NextChar],
        guards: &[],
        arcs: &[(WHITE, 18), (0, 19)],
    },
    // 18
    State { actions: &[NextChar], guards: &[], arcs: &[(WHITE, 18), (0, 19)] },
    // 19
    State { actions: &[EndToken(Code::White)], guards: &[], arcs: &[(ANCHOR, 23), (0, 20)] },
    // 20
    State {
        actions: &[EmptyToken(Code::EndDirective)],
        guards: &[],
        arcs: &[(CR, 21), (LF, 22), (EOF, 25), (0, 26)],
    },
    // 21
    State {
        actions: &[BeginToken(Code::Break), NextChar],
        guards: &[],
        arcs: &[(LF, 24), (0, 27)],
    },
    // 22
    State { actions: &[BeginToken(Code::Break), NextChar], guards: &[], arcs: &[(0, 27)] },
    // 23: another argument
    State {
        actions: &[BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(ANCHOR, 15), (0, 16)],
    },
    // 24
    State { actions: &[NextChar], guards: &[], arcs: &[(0, 27)] },
    // 25
    State { actions: &[Success], guards: &[], arcs: &[] },
    // 26
    State { actions: &[Failure], guards: &[], arcs: &[] },
    // 27
    State { actions: &[EndToken(Code::Break), NextLine], guards: &[], arcs: &[(0, 25)] },
    // 28: '%' with no name at all
    State { actions: &[ResetState], guards: &[], arcs: &[(0, 20)] },
];
static L_DIRECTIVE: MachineDef = MachineDef { name: "l-directive", states: &L_DIRECTIVE_STATES };

// ---------------------------------------------------------------------------
// ns-plain(n,c): multiline plain scalar with folding. The flow-in variant
// narrows the safe set to non-flow characters.
// ---------------------------------------------------------------------------

macro_rules! plain_machine {
    ($safe:expr) => {
        [
            // 0: first character
            State {
                actions: &[],
                guards: &[],
                arcs: &[
                    (DASH, 1),
                    (QUESTION, 1),
                    (COLON, 1),
                    (INDICATOR, 34),
                    ($safe, 4),
                    (0, 34),
                ],
            },
            // 1: '-', '?' or ':' starts a plain scalar only when followed by
            // a safe character
            State {
                actions: &[
                    PushState,
                    EmptyToken(Code::BeginScalar),
                    BeginToken(Code::Text),
                    NextChar,
                ],
                guards: &[],
                arcs: &[($safe, 2), (0, 3)],
            },
            // 2
            State {
                actions: &[SetState],
                guards: &[],
                arcs: &[(COLON, 6), (WHITE, 9), ($safe, 5), (CR, 17), (LF, 17), (0, 33)],
            },
            // 3
            State { actions: &[ResetState], guards: &[], arcs: &[(0, 34)] },
            // 4: ordinary first character
            State {
                actions: &[
                    PushState,
                    EmptyToken(Code::BeginScalar),
                    BeginToken(Code::Text),
                    NextChar,
                ],
                guards: &[],
                arcs: &[(COLON, 6), (WHITE, 9), ($safe, 5), (CR, 17), (LF, 17), (0, 33)],
            },
            // 5: text loop
            State {
                actions: &[NextChar],
                guards: &[],
                arcs: &[(COLON, 6), (WHITE, 9), ($safe, 5), (CR, 17), (LF, 17), (0, 33)],
            },
            // 6: ':' stays in the scalar only when followed by a safe
            // character
            State { actions: &[NextChar], guards: &[], arcs: &[($safe, 7), (0, 8)] },
            // 7
            State {
                actions: &[],
                guards: &[],
                arcs: &[(COLON, 6), (WHITE, 9), ($safe, 5), (CR, 17), (LF, 17), (0, 33)],
            },
            // 8: retract the ':'; the scalar ended before it
            State { actions: &[PrevChar], guards: &[], arcs: &[(0, 33)] },
            // 9: white space is content only when more content follows on
            // the line
            State { actions: &[PushState], guards: &[], arcs: &[(0, 10)] },
            // 10
            State {
                actions: &[NextChar],
                guards: &[],
                arcs: &[(WHITE, 10), (HASH, 12), ($safe, 11), (0, 12)],
            },
            // 11
            State {
                actions: &[PopState],
                guards: &[],
                arcs: &[(COLON, 6), (WHITE, 9), ($safe, 5), (CR, 17), (LF, 17), (0, 33)],
            },
            // 12: trailing white space is separation, not content
            State { actions: &[ResetState], guards: &[], arcs: &[(0, 13)] },
            // 13
            State {
                actions: &[EndToken(Code::Text), SetState, BeginToken(Code::White), NextChar],
                guards: &[],
                arcs: &[(WHITE, 14), (CR, 15), (LF, 15), (0, 16)],
            },
            // 14
            State {
                actions: &[NextChar],
                guards: &[],
                arcs: &[(WHITE, 14), (CR, 15), (LF, 15), (0, 16)],
            },
            // 15
            State {
                actions: &[EndToken(Code::White), BeginToken(Code::LineFold)],
                guards: &[],
                arcs: &[(CR, 18), (LF, 19)],
            },
            // 16: the scalar ended before the separation
            State {
                actions: &[
                    EndToken(Code::White),
                    PopState,
                    EmptyToken(Code::EndScalar),
                    Success,
                ],
                guards: &[],
                arcs: &[],
            },
            // 17: line break directly after content
            State {
                actions: &[EndToken(Code::Text), SetState, BeginToken(Code::LineFold)],
                guards: &[],
                arcs: &[(CR, 18), (LF, 19)],
            },
            // 18
            State { actions: &[NextChar], guards: &[], arcs: &[(LF, 20), (0, 21)] },
            // 19
            State { actions: &[NextChar], guards: &[], arcs: &[(0, 21)] },
            // 20
            State { actions: &[NextChar], guards: &[], arcs: &[(0, 21)] },
            // 21
            State { actions: &[EndToken(Code::LineFold), NextLine], guards: &[], arcs: &[(0, 22)] },
            // 22: continuation line, still speculative
            State {
                actions: &[ResetCounter, BeginToken(Code::Indent)],
                guards: &[],
                arcs: &[(SPACE, 23), (CR, 25), (LF, 25), (EOF, 31), (0, 24)],
            },
            // 23
            State {
                actions: &[NextChar, IncrementCounter],
                guards: &[],
                arcs: &[(SPACE, 23), (CR, 25), (LF, 25), (EOF, 31), (0, 24)],
            },
            // 24: the line continues the scalar only when indented deeper
            // than n
            State {
                actions: &[EndToken(Code::Indent)],
                guards: &[(CounterLessEqualN, 31)],
                arcs: &[(HASH, 31), ($safe, 30), (0, 31)],
            },
            // 25: empty line inside the scalar
            State {
                actions: &[EndToken(Code::Indent), BeginToken(Code::LineFeed)],
                guards: &[],
                arcs: &[(CR, 26), (LF, 27)],
            },
            // 26
            State { actions: &[NextChar], guards: &[], arcs: &[(LF, 28), (0, 29)] },
            // 27
            State { actions: &[NextChar], guards: &[], arcs: &[(0, 29)] },
            // 28
            State { actions: &[NextChar], guards: &[], arcs: &[(0, 29)] },
            // 29
            State { actions: &[EndToken(Code::LineFeed), NextLine], guards: &[], arcs: &[(0, 22)] },
            // 30
            State { actions: &[BeginToken(Code::Text)], guards: &[], arcs: &[($safe, 5), (0, 31)] },
            // 31: not a continuation; the scalar ended at the last content
            State { actions: &[ResetState], guards: &[], arcs: &[(0, 32)] },
            // 32
            State { actions: &[EmptyToken(Code::EndScalar), Success], guards: &[], arcs: &[] },
            // 33: end of the scalar with text open
            State {
                actions: &[
                    EndToken(Code::Text),
                    PopState,
                    EmptyToken(Code::EndScalar),
                    Success,
                ],
                guards: &[],
                arcs: &[],
            },
            // 34
            State { actions: &[Failure], guards: &[], arcs: &[] },
        ]
    };
}

static NS_PLAIN_FLOW_OUT_STATES: [State; 35] = plain_machine!(NS);
static NS_PLAIN_FLOW_OUT: MachineDef =
    MachineDef { name: "ns-plain = flow-out", states: &NS_PLAIN_FLOW_OUT_STATES };

static NS_PLAIN_FLOW_IN_STATES: [State; 35] = plain_machine!(ANCHOR);
static NS_PLAIN_FLOW_IN: MachineDef =
    MachineDef { name: "ns-plain = flow-in", states: &NS_PLAIN_FLOW_IN_STATES };

// ---------------------------------------------------------------------------
// l-yaml-stream: byte order mark, directives, comments, document markers and
// one plain-style root node per document
// ---------------------------------------------------------------------------

#[rustfmt::skip]
mod stream {
    pub const T0: i32 = 0;
    pub const TEND: i32 = 1;
    pub const TB: i32 = 2;
    pub const TW: i32 = 3;
    pub const TW2: i32 = 4;
    pub const TW3: i32 = 5;
    pub const TBR1: i32 = 6;
    pub const TBR2: i32 = 7;
    pub const TBR3: i32 = 8;
    pub const TBR4: i32 = 9;
    pub const TC0: i32 = 10;
    pub const TC1: i32 = 11;
    pub const TC2: i32 = 12;
    pub const TC3: i32 = 13;
    pub const TC4: i32 = 14;
    pub const TD0: i32 = 15;
    pub const TD1: i32 = 16;
    pub const TD2: i32 = 17;
    pub const TDW: i32 = 18;
    pub const TDW2: i32 = 19;
    pub const TDN: i32 = 20;
    pub const TDCA: i32 = 21;
    pub const TDCB: i32 = 22;
    pub const TDE: i32 = 23;
    pub const TMS: i32 = 24;
    pub const TMS2: i32 = 25;
    pub const TMS3: i32 = 26;
    pub const TMSOK: i32 = 27;
    pub const TMR: i32 = 28;
    pub const TOPEN: i32 = 29;
    pub const TME: i32 = 30;
    pub const TME2: i32 = 31;
    pub const TME3: i32 = 32;
    pub const TMEOK: i32 = 33;
    pub const TAFT: i32 = 34;
    pub const TAW: i32 = 35;
    pub const TAW2: i32 = 36;
    pub const TAW3: i32 = 37;
    pub const TFAIL: i32 = 38;
    pub const IN0: i32 = 39;
    pub const IEOF: i32 = 40;
    pub const IBR1: i32 = 41;
    pub const IBR2: i32 = 42;
    pub const IBR3: i32 = 43;
    pub const IBR4: i32 = 44;
    pub const IC0: i32 = 45;
    pub const IC1: i32 = 46;
    pub const IC2: i32 = 47;
    pub const IC3: i32 = 48;
    pub const IC4: i32 = 49;
    pub const IW: i32 = 50;
    pub const IW2: i32 = 51;
    pub const IW3: i32 = 52;
    pub const IMS: i32 = 53;
    pub const IMS2: i32 = 54;
    pub const IMS3: i32 = 55;
    pub const IMSOK: i32 = 56;
    pub const IMR: i32 = 57;
    pub const IME: i32 = 58;
    pub const IME2: i32 = 59;
    pub const IME3: i32 = 60;
    pub const IMEOK: i32 = 61;
    pub const NOPEN: i32 = 62;
    pub const SC: i32 = 63;
    pub const SEOL: i32 = 64;
    pub const SB1: i32 = 65;
    pub const SB2: i32 = 66;
    pub const SB3: i32 = 67;
    pub const SB4: i32 = 68;
    pub const SNL: i32 = 69;
    pub const SIND: i32 = 70;
    pub const SIND2: i32 = 71;
    pub const SIND3: i32 = 72;
    pub const SMT: i32 = 73;
    pub const SM1: i32 = 74;
    pub const SM2: i32 = 75;
    pub const SM3: i32 = 76;
    pub const SM4: i32 = 77;
    pub const SCONT: i32 = 78;
    pub const SRST: i32 = 79;
    pub const SCLOSE: i32 = 80;
    pub const SEOF: i32 = 81;
    pub const SFAIL: i32 = 82;
    pub const DTAIL: i32 = 83;
    pub const DEOF: i32 = 84;
    pub const DBR1: i32 = 85;
    pub const DBR2: i32 = 86;
    pub const DBR3: i32 = 87;
    pub const DBR4: i32 = 88;
    pub const DW: i32 = 89;
    pub const DW2: i32 = 90;
    pub const DW3: i32 = 91;
    pub const DC0: i32 = 92;
    pub const DC1: i32 = 93;
    pub const DC2: i32 = 94;
    pub const DC3: i32 = 95;
    pub const DC4: i32 = 96;
    pub const DMS: i32 = 97;
    pub const DMS2: i32 = 98;
    pub const DMS3: i32 = 99;
    pub const DMSOK: i32 = 100;
    pub const DMR: i32 = 101;
    pub const DME: i32 = 102;
    pub const DME2: i32 = 103;
    pub const DME3: i32 = 104;
    pub const DMEOK: i32 = 105;
    pub const COUNT: usize = 106;
}

use stream::*;

static L_YAML_STREAM_STATES: [State; stream::COUNT] = [
    // T0: top of stream or between documents, at the start of a line
    State {
        actions: &[],
        guards: &[],
        arcs: &[
            (EOF, TEND),
            (BOM, TB),
            (PERCENT, TD0),
            (WHITE, TW),
            (HASH, TC0),
            (CR, TBR1),
            (LF, TBR2),
            (DASH, TMS),
            (DOT, TME),
            (0, TOPEN),
        ],
    },
    // TEND
    State { actions: &[Success], guards: &[], arcs: &[] },
    // TB: byte order mark
    State {
        actions: &[BeginToken(Code::Bom), NextChar, EndToken(Code::Bom)],
        guards: &[],
        arcs: &[(0, T0)],
    },
    // TW: leading indentation
    State {
        actions: &[BeginToken(Code::Indent), NextChar],
        guards: &[],
        arcs: &[(WHITE, TW2), (0, TW3)],
    },
    // TW2
    State { actions: &[NextChar], guards: &[], arcs: &[(WHITE, TW2), (0, TW3)] },
    // TW3
    State {
        actions: &[EndToken(Code::Indent)],
        guards: &[],
        arcs: &[(EOF, TEND), (HASH, TC0), (CR, TBR1), (LF, TBR2), (0, TOPEN)],
    },
    // TBR1: separation break starting with CR
    State {
        actions: &[BeginToken(Code::Break), NextChar],
        guards: &[],
        arcs: &[(LF, TBR3), (0, TBR4)],
    },
    // TBR2
    State { actions: &[BeginToken(Code::Break), NextChar], guards: &[], arcs: &[(0, TBR4)] },
    // TBR3
    State { actions: &[NextChar], guards: &[], arcs: &[(0, TBR4)] },
    // TBR4
    State { actions: &[EndToken(Code::Break), NextLine], guards: &[], arcs: &[(0, T0)] },
    // TC0: comment indicator
    State {
        actions: &[
            EmptyToken(Code::BeginComment),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
        ],
        guards: &[],
        arcs: &[(CR, TC4), (LF, TC4), (EOF, TC4), (PRINTABLE, TC1), (0, TC4)],
    },
    // TC1
    State {
        actions: &[BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(CR, TC3), (LF, TC3), (EOF, TC3), (PRINTABLE, TC2), (0, TC3)],
    },
    // TC2
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(CR, TC3), (LF, TC3), (EOF, TC3), (PRINTABLE, TC2), (0, TC3)],
    },
    // TC3
    State { actions: &[EndToken(Code::Meta)], guards: &[], arcs: &[(0, TC4)] },
    // TC4
    State {
        actions: &[EmptyToken(Code::EndComment)],
        guards: &[],
        arcs: &[(CR, TBR1), (LF, TBR2), (EOF, TEND), (0, TFAIL)],
    },
    // TD0: directive indicator
    State {
        actions: &[
            EmptyToken(Code::BeginDirective),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
        ],
        guards: &[],
        arcs: &[(NS, TD1), (0, TDCB)],
    },
    // TD1: directive name or argument
    State {
        actions: &[BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(NS, TD2), (WHITE, TDW), (0, TDCA)],
    },
    // TD2
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(NS, TD2), (WHITE, TDW), (0, TDCA)],
    },
    // TDW
    State {
        actions: &[EndToken(Code::Meta), BeginToken(Code::White), NextChar],
        guards: &[],
        arcs: &[(WHITE, TDW2), (0, TDN)],
    },
    // TDW2
    State { actions: &[NextChar], guards: &[], arcs: &[(WHITE, TDW2), (0, TDN)] },
    // TDN
    State { actions: &[EndToken(Code::White)], guards: &[], arcs: &[(NS, TD1), (0, TDCB)] },
    // TDCA
    State {
        actions: &[EndToken(Code::Meta), EmptyToken(Code::EndDirective)],
        guards: &[],
        arcs: &[(0, TDE)],
    },
    // TDCB
    State { actions: &[EmptyToken(Code::EndDirective)], guards: &[], arcs: &[(0, TDE)] },
    // TDE
    State {
        actions: &[],
        guards: &[],
        arcs: &[(CR, TBR1), (LF, TBR2), (EOF, TEND), (0, TFAIL)],
    },
    // TMS: possible '---'
    State {
        actions: &[
            PushState,
            EmptyToken(Code::BeginDocument),
            BeginToken(Code::DocumentStart),
            NextChar,
        ],
        guards: &[],
        arcs: &[(DASH, TMS2), (0, TMR)],
    },
    // TMS2
    State { actions: &[NextChar], guards: &[], arcs: &[(DASH, TMS3), (0, TMR)] },
    // TMS3
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(WHITE, TMSOK), (CR, TMSOK), (LF, TMSOK), (EOF, TMSOK), (0, TMR)],
    },
    // TMSOK
    State {
        actions: &[EndToken(Code::DocumentStart), PopState],
        guards: &[],
        arcs: &[(0, IN0)],
    },
    // TMR: not a marker after all
    State { actions: &[ResetState], guards: &[], arcs: &[(0, TOPEN)] },
    // TOPEN: content opens a bare document
    State { actions: &[EmptyToken(Code::BeginDocument)], guards: &[], arcs: &[(0, NOPEN)] },
    // TME: possible '...' with no open document
    State {
        actions: &[PushState, BeginToken(Code::DocumentEnd), NextChar],
        guards: &[],
        arcs: &[(DOT, TME2), (0, TMR)],
    },
    // TME2
    State { actions: &[NextChar], guards: &[], arcs: &[(DOT, TME3), (0, TMR)] },
    // TME3
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(WHITE, TMEOK), (CR, TMEOK), (LF, TMEOK), (EOF, TMEOK), (0, TMR)],
    },
    // TMEOK
    State { actions: &[EndToken(Code::DocumentEnd), PopState], guards: &[], arcs: &[(0, TAFT)] },
    // TAFT: rest of a marker line
    State {
        actions: &[],
        guards: &[],
        arcs: &[(WHITE, TAW), (HASH, TC0), (CR, TBR1), (LF, TBR2), (EOF, TEND), (0, TFAIL)],
    },
    // TAW
    State {
        actions: &[BeginToken(Code::White), NextChar],
        guards: &[],
        arcs: &[(WHITE, TAW2), (0, TAW3)],
    },
    // TAW2
    State { actions: &[NextChar], guards: &[], arcs: &[(WHITE, TAW2), (0, TAW3)] },
    // TAW3
    State {
        actions: &[EndToken(Code::White)],
        guards: &[],
        arcs: &[(HASH, TC0), (CR, TBR1), (LF, TBR2), (EOF, TEND), (0, TFAIL)],
    },
    // TFAIL
    State { actions: &[Failure], guards: &[], arcs: &[] },
    // IN0: inside a document, before its node
    State {
        actions: &[],
        guards: &[],
        arcs: &[
            (EOF, IEOF),
            (WHITE, IW),
            (HASH, IC0),
            (CR, IBR1),
            (LF, IBR2),
            (DASH, IMS),
            (DOT, IME),
            (0, NOPEN),
        ],
    },
    // IEOF
    State { actions: &[EmptyToken(Code::EndDocument), Success], guards: &[], arcs: &[] },
    // IBR1
    State {
        actions: &[BeginToken(Code::Break), NextChar],
        guards: &[],
        arcs: &[(LF, IBR3), (0, IBR4)],
    },
    // IBR2
    State { actions: &[BeginToken(Code::Break), NextChar], guards: &[], arcs: &[(0, IBR4)] },
    // IBR3
    State { actions: &[NextChar], guards: &[], arcs: &[(0, IBR4)] },
    // IBR4
    State { actions: &[EndToken(Code::Break), NextLine], guards: &[], arcs: &[(0, IN0)] },
    // IC0
    State {
        actions: &[
            EmptyToken(Code::BeginComment),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
        ],
        guards: &[],
        arcs: &[(CR, IC4), (LF, IC4), (EOF, IC4), (PRINTABLE, IC1), (0, IC4)],
    },
    // IC1
    State {
        actions: &[BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(CR, IC3), (LF, IC3), (EOF, IC3), (PRINTABLE, IC2), (0, IC3)],
    },
    // IC2
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(CR, IC3), (LF, IC3), (EOF, IC3), (PRINTABLE, IC2), (0, IC3)],
    },
    // IC3
    State { actions: &[EndToken(Code::Meta)], guards: &[], arcs: &[(0, IC4)] },
    // IC4
    State {
        actions: &[EmptyToken(Code::EndComment)],
        guards: &[],
        arcs: &[(CR, IBR1), (LF, IBR2), (EOF, IEOF), (0, SFAIL)],
    },
    // IW
    State {
        actions: &[BeginToken(Code::Indent), NextChar],
        guards: &[],
        arcs: &[(WHITE, IW2), (0, IW3)],
    },
    // IW2
    State { actions: &[NextChar], guards: &[], arcs: &[(WHITE, IW2), (0, IW3)] },
    // IW3
    State {
        actions: &[EndToken(Code::Indent)],
        guards: &[],
        arcs: &[(EOF, IEOF), (HASH, IC0), (CR, IBR1), (LF, IBR2), (0, NOPEN)],
    },
    // IMS: '---' inside a document closes it and opens the next
    State {
        actions: &[
            PushState,
            EmptyToken(Code::EndDocument),
            EmptyToken(Code::BeginDocument),
            BeginToken(Code::DocumentStart),
            NextChar,
        ],
        guards: &[],
        arcs: &[(DASH, IMS2), (0, IMR)],
    },
    // IMS2
    State { actions: &[NextChar], guards: &[], arcs: &[(DASH, IMS3), (0, IMR)] },
    // IMS3
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(WHITE, IMSOK), (CR, IMSOK), (LF, IMSOK), (EOF, IMSOK), (0, IMR)],
    },
    // IMSOK
    State {
        actions: &[EndToken(Code::DocumentStart), PopState],
        guards: &[],
        arcs: &[(0, IN0)],
    },
    // IMR
    State { actions: &[ResetState], guards: &[], arcs: &[(0, NOPEN)] },
    // IME: '...' ends the document
    State {
        actions: &[PushState, BeginToken(Code::DocumentEnd), NextChar],
        guards: &[],
        arcs: &[(DOT, IME2), (0, IMR)],
    },
    // IME2
    State { actions: &[NextChar], guards: &[], arcs: &[(DOT, IME3), (0, IMR)] },
    // IME3
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(WHITE, IMEOK), (CR, IMEOK), (LF, IMEOK), (EOF, IMEOK), (0, IMR)],
    },
    // IMEOK
    State {
        actions: &[EndToken(Code::DocumentEnd), PopState, EmptyToken(Code::EndDocument)],
        guards: &[],
        arcs: &[(0, TAFT)],
    },
    // NOPEN: the root node, a plain-style scalar
    State {
        actions: &[
            PushState,
            EmptyToken(Code::BeginNode),
            EmptyToken(Code::BeginScalar),
            BeginToken(Code::Text),
        ],
        guards: &[],
        arcs: &[(PRINTABLE, SC), (0, SFAIL)],
    },
    // SC: content text
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(CR, SEOL), (LF, SEOL), (EOF, SEOF), (PRINTABLE, SC), (0, SEOF)],
    },
    // SEOL: the line break may fold into the scalar
    State {
        actions: &[EndToken(Code::Text), SetState, BeginToken(Code::LineFold)],
        guards: &[],
        arcs: &[(CR, SB1), (LF, SB2)],
    },
    // SB1
    State { actions: &[NextChar], guards: &[], arcs: &[(LF, SB3), (0, SB4)] },
    // SB2
    State { actions: &[NextChar], guards: &[], arcs: &[(0, SB4)] },
    // SB3
    State { actions: &[NextChar], guards: &[], arcs: &[(0, SB4)] },
    // SB4
    State { actions: &[EndToken(Code::LineFold), NextLine], guards: &[], arcs: &[(0, SNL)] },
    // SNL: next line, speculative until content confirms the fold
    State {
        actions: &[],
        guards: &[],
        arcs: &[
            (EOF, SRST),
            (WHITE, SIND),
            (HASH, SRST),
            (DASH, SRST),
            (DOT, SRST),
            (PERCENT, SRST),
            (CR, SMT),
            (LF, SMT),
            (PRINTABLE, SCONT),
            (0, SRST),
        ],
    },
    // SIND
    State {
        actions: &[BeginToken(Code::Indent), NextChar],
        guards: &[],
        arcs: &[(WHITE, SIND2), (0, SIND3)],
    },
    // SIND2
    State { actions: &[NextChar], guards: &[], arcs: &[(WHITE, SIND2), (0, SIND3)] },
    // SIND3
    State {
        actions: &[EndToken(Code::Indent)],
        guards: &[],
        arcs: &[(CR, SMT), (LF, SMT), (EOF, SRST), (HASH, SRST), (PRINTABLE, SCONT), (0, SRST)],
    },
    // SMT: empty line inside the scalar
    State { actions: &[BeginToken(Code::LineFeed)], guards: &[], arcs: &[(CR, SM1), (LF, SM2)] },
    // SM1
    State { actions: &[NextChar], guards: &[], arcs: &[(LF, SM3), (0, SM4)] },
    // SM2
    State { actions: &[NextChar], guards: &[], arcs: &[(0, SM4)] },
    // SM3
    State { actions: &[NextChar], guards: &[], arcs: &[(0, SM4)] },
    // SM4
    State { actions: &[EndToken(Code::LineFeed), NextLine], guards: &[], arcs: &[(0, SNL)] },
    // SCONT: the fold is confirmed
    State { actions: &[BeginToken(Code::Text)], guards: &[], arcs: &[(PRINTABLE, SC), (0, SFAIL)] },
    // SRST: not a continuation
    State { actions: &[ResetState], guards: &[], arcs: &[(0, SCLOSE)] },
    // SCLOSE
    State {
        actions: &[EmptyToken(Code::EndScalar), EmptyToken(Code::EndNode)],
        guards: &[],
        arcs: &[(0, DTAIL)],
    },
    // SEOF: scalar, node and document all end with the input
    State {
        actions: &[
            EndToken(Code::Text),
            PopState,
            EmptyToken(Code::EndScalar),
            EmptyToken(Code::EndNode),
            EmptyToken(Code::EndDocument),
            Success,
        ],
        guards: &[],
        arcs: &[],
    },
    // SFAIL
    State { actions: &[Failure], guards: &[], arcs: &[] },
    // DTAIL: after the node, inside the document
    State {
        actions: &[],
        guards: &[],
        arcs: &[
            (EOF, DEOF),
            (CR, DBR1),
            (LF, DBR2),
            (WHITE, DW),
            (HASH, DC0),
            (DASH, DMS),
            (DOT, DME),
            (0, SFAIL),
        ],
    },
    // DEOF
    State { actions: &[EmptyToken(Code::EndDocument), Success], guards: &[], arcs: &[] },
    // DBR1
    State {
        actions: &[BeginToken(Code::Break), NextChar],
        guards: &[],
        arcs: &[(LF, DBR3), (0, DBR4)],
    },
    // DBR2
    State { actions: &[BeginToken(Code::Break), NextChar], guards: &[], arcs: &[(0, DBR4)] },
    // DBR3
    State { actions: &[NextChar], guards: &[], arcs: &[(0, DBR4)] },
    // DBR4
    State { actions: &[EndToken(Code::Break), NextLine], guards: &[], arcs: &[(0, DTAIL)] },
    // DW
    State {
        actions: &[BeginToken(Code::White), NextChar],
        guards: &[],
        arcs: &[(WHITE, DW2), (0, DW3)],
    },
    // DW2
    State { actions: &[NextChar], guards: &[], arcs: &[(WHITE, DW2), (0, DW3)] },
    // DW3
    State {
        actions: &[EndToken(Code::White)],
        guards: &[],
        arcs: &[(HASH, DC0), (CR, DBR1), (LF, DBR2), (EOF, DEOF), (0, SFAIL)],
    },
    // DC0
    State {
        actions: &[
            EmptyToken(Code::BeginComment),
            BeginToken(Code::Indicator),
            NextChar,
            EndToken(Code::Indicator),
        ],
        guards: &[],
        arcs: &[(CR, DC4), (LF, DC4), (EOF, DC4), (PRINTABLE, DC1), (0, DC4)],
    },
    // DC1
    State {
        actions: &[BeginToken(Code::Meta), NextChar],
        guards: &[],
        arcs: &[(CR, DC3), (LF, DC3), (EOF, DC3), (PRINTABLE, DC2), (0, DC3)],
    },
    // DC2
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(CR, DC3), (LF, DC3), (EOF, DC3), (PRINTABLE, DC2), (0, DC3)],
    },
    // DC3
    State { actions: &[EndToken(Code::Meta)], guards: &[], arcs: &[(0, DC4)] },
    // DC4
    State {
        actions: &[EmptyToken(Code::EndComment)],
        guards: &[],
        arcs: &[(CR, DBR1), (LF, DBR2), (EOF, DEOF), (0, SFAIL)],
    },
    // DMS: '---' after the node
    State {
        actions: &[
            PushState,
            EmptyToken(Code::EndDocument),
            EmptyToken(Code::BeginDocument),
            BeginToken(Code::DocumentStart),
            NextChar,
        ],
        guards: &[],
        arcs: &[(DASH, DMS2), (0, DMR)],
    },
    // DMS2
    State { actions: &[NextChar], guards: &[], arcs: &[(DASH, DMS3), (0, DMR)] },
    // DMS3
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(WHITE, DMSOK), (CR, DMSOK), (LF, DMSOK), (EOF, DMSOK), (0, DMR)],
    },
    // DMSOK
    State {
        actions: &[EndToken(Code::DocumentStart), PopState],
        guards: &[],
        arcs: &[(0, IN0)],
    },
    // DMR: a second node would start here, which the document cannot hold
    State { actions: &[ResetState], guards: &[], arcs: &[(0, SFAIL)] },
    // DME: '...'
    State {
        actions: &[PushState, BeginToken(Code::DocumentEnd), NextChar],
        guards: &[],
        arcs: &[(DOT, DME2), (0, DMR)],
    },
    // DME2
    State { actions: &[NextChar], guards: &[], arcs: &[(DOT, DME3), (0, DMR)] },
    // DME3
    State {
        actions: &[NextChar],
        guards: &[],
        arcs: &[(WHITE, DMEOK), (CR, DMEOK), (LF, DMEOK), (EOF, DMEOK), (0, DMR)],
    },
    // DMEOK
    State {
        actions: &[EndToken(Code::DocumentEnd), PopState, EmptyToken(Code::EndDocument)],
        guards: &[],
        arcs: &[(0, TAFT)],
    },
];
static L_YAML_STREAM: MachineDef =
    MachineDef { name: "l-yaml-stream", states: &L_YAML_STREAM_STATES };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_shape() {
        assert!(lookup(&Production::named("b-break")).is_ok());
        assert!(lookup(&Production::named("s-indent")).is_err());
        assert!(lookup(&Production::named("s-indent").with_n("2")).is_ok());
        assert!(lookup(&Production::named("b-chomped-last").with_t("strip")).is_ok());
        assert!(lookup(&Production::named("b-chomped-last")).is_err());
        assert!(lookup(&Production::named("l-chomped-empty").with_n("1").with_t("keep")).is_ok());
    }

    #[test]
    fn lookup_with_context() {
        assert!(lookup(&Production::named("l-empty").with_n("2").with_c("block-in")).is_ok());
        assert!(lookup(&Production::named("l-empty").with_n("2").with_c("block-up")).is_err());
        assert!(lookup(&Production::named("l-empty").with_n("2")).is_err());
        assert!(lookup(&Production::named("ns-plain").with_n("0").with_c("flow-out")).is_ok());
        assert!(lookup(&Production::named("ns-plain").with_n("0").with_c("flow-in")).is_ok());
        assert!(lookup(&Production::named("ns-plain").with_n("0").with_c("block-key")).is_err());
    }

    #[test]
    fn unknown_production() {
        let err = lookup(&Production::named("no-such-rule")).unwrap_err();
        assert!(matches!(err, YeastError::UnknownProduction { .. }));
    }

    #[test]
    fn state_tables_are_well_formed() {
        let machines: &[&MachineDef] = &[
            &L_YAML_STREAM,
            &C_BYTE_ORDER_MARK,
            &B_BREAK,
            &B_AS_LINE_FEED,
            &S_SEPARATE_IN_LINE,
            &L_COMMENT,
            &C_NS_ESC_CHAR,
            &C_NS_ALIAS_NODE,
            &C_NS_ANCHOR_PROPERTY,
            &C_NS_TAG_PROPERTY,
            &L_DIRECTIVE,
            &S_INDENT,
            &S_INDENT_LT,
            &S_INDENT_LE,
            &L_EMPTY,
            &NS_PLAIN_FLOW_OUT,
            &NS_PLAIN_FLOW_IN,
            &B_CHOMPED_LAST,
            &L_CHOMPED_EMPTY,
        ];
        for machine in machines {
            let count = machine.states.len() as i32;
            for (index, state) in machine.states.iter().enumerate() {
                for &(_, target) in state.arcs {
                    assert!(
                        (0..count).contains(&target),
                        "{}[{index}] arc to {target}",
                        machine.name
                    );
                }
                for &(_, target) in state.guards {
                    assert!(
                        (0..count).contains(&target),
                        "{}[{index}] guard to {target}",
                        machine.name
                    );
                }
                // A default arm, if present, must come last.
                if let Some(default_at) = state.arcs.iter().position(|&(mask, _)| mask == 0) {
                    assert_eq!(
                        default_at,
                        state.arcs.len() - 1,
                        "{}[{index}] default arm not last",
                        machine.name
                    );
                }
            }
        }
    }
}
