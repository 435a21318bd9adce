//! Table representation of the production state machines.
//!
//! A machine is data, not code: a list of states, each carrying an inline
//! action sequence, optional guards, and class-mask transition arcs. One
//! generic interpreter in the parser executes whichever machine the registry
//! selected at open time. The tables mirror the output of the offline
//! grammar compiler and are consumed as-is.

use crate::token::Code;

/// Terminal state index: the machine has finished and the parser returns
/// end-of-stream tokens from now on.
pub(crate) const STATE_DONE: i32 = -1;

/// Named choice points recognized by the escape productions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Choice {
    Escape = 0,
    Escaped = 1,
}

/// Error message for each choice, indexed by discriminant.
pub(crate) static CHOICE_ERRORS: [&str; 2] = [
    "Commit to 'escape' was made outside it",
    "Commit to 'escaped' was made outside it",
];

/// Guards short-circuit the class dispatch of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Guard {
    /// The current character starts a line.
    StartOfLine,
    /// The loop counter is below the indentation parameter.
    CounterLessThanN,
    /// The loop counter does not exceed the indentation parameter.
    CounterLessEqualN,
}

/// Actions executed on entering a state. Any action may complete tokens; the
/// interpreter then records its position and yields, resuming mid-sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// Open a token with the given MATCH (or BOM) code.
    BeginToken(Code),
    /// Close the open token; the code must match the open context (or be
    /// UNPARSED as a recovery override).
    EndToken(Code),
    /// Open a BREAK token under `strip` chomping, a LINE_FEED token
    /// otherwise. Used for the final break of a block scalar.
    BeginTokenChomped,
    /// Close the chomping-dependent token opened by [`Action::BeginTokenChomped`].
    EndTokenChomped,
    /// Open a LINE_FEED token under `keep` chomping, a BREAK token
    /// otherwise. Used for trailing empty lines.
    BeginTokenKept,
    /// Close the chomping-dependent token opened by [`Action::BeginTokenKept`].
    EndTokenKept,
    /// Emit a zero-length token (BEGIN/END grouping codes).
    EmptyToken(Code),
    /// Advance the character engine by one character.
    NextChar,
    /// Retract the character engine to the previous character.
    PrevChar,
    /// Account for a consumed line break.
    NextLine,
    ResetCounter,
    IncrementCounter,
    BeginChoice(Choice),
    EndChoice(Choice),
    Commit(Choice),
    /// Push a backtracking checkpoint.
    PushState,
    /// Re-capture the innermost checkpoint in place, committing progress.
    SetState,
    /// Discard the innermost checkpoint, keeping progress.
    PopState,
    /// Restore the innermost checkpoint, discarding progress.
    ResetState,
    /// Report the impossible-repetition error and stop.
    NonPositiveN,
    /// The machine matched its production.
    Success,
    /// No viable continuation; the caller sees UNEXPECTED.
    Failure,
}

/// One state: inline actions, guard list, then class-mask arcs.
///
/// Dispatch order is fixed: guards first, then arcs in lexical order; the
/// first arc whose mask intersects the current character's mask fires, and an
/// empty mask is an unconditional default arm.
#[derive(Debug)]
pub(crate) struct State {
    pub actions: &'static [Action],
    pub guards: &'static [(Guard, i32)],
    pub arcs: &'static [(u64, i32)],
}

/// A complete production machine.
#[derive(Debug)]
pub(crate) struct MachineDef {
    pub name: &'static str,
    pub states: &'static [State],
}

/// Result of running the active machine for one stretch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// One or more tokens are ready for delivery.
    Token,
    /// The machine reached its SUCCESS terminal.
    Done,
    /// No transition applies at the current character.
    Unexpected,
}
