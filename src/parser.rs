//! The parser: character engine, token emitter, backtracking frames, machine
//! interpreter and token delivery.
//!
//! One parser owns one byte source and runs one production machine chosen at
//! open time. Tokens are accumulated on a stack and handed out one at a time;
//! tokens produced inside an uncommitted backtracking scope stay on the stack
//! until the scope commits, so the caller never observes a discarded
//! alternative.

use crate::classify::{self, char_class};
use crate::encoding::{decode, Encoding};
use crate::error::{YeastError, YeastResult};
use crate::machine::{Action, Guard, MachineDef, Step, CHOICE_ERRORS, STATE_DONE};
use crate::productions;
use crate::source::{ByteSource, DYNAMIC_BUFFER_SIZE};
use crate::token::{Code, CodeType, RawToken, Token, TokenText};

/// Identification of a specific production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Production<'p> {
    /// Production name.
    pub name: &'p str,
    /// Indentation argument.
    pub n: Option<&'p str>,
    /// Context argument.
    pub c: Option<&'p str>,
    /// Chomp argument.
    pub t: Option<&'p str>,
}

impl<'p> Production<'p> {
    #[must_use]
    pub fn named(name: &'p str) -> Self {
        Production { name, ..Production::default() }
    }

    #[must_use]
    pub fn with_n(self, n: &'p str) -> Self {
        Production { n: Some(n), ..self }
    }

    #[must_use]
    pub fn with_c(self, c: &'p str) -> Self {
        Production { c: Some(c), ..self }
    }

    #[must_use]
    pub fn with_t(self, t: &'p str) -> Self {
        Production { t: Some(t), ..self }
    }
}

/// Block scalar chomping behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Chomp {
    Strip,
    #[default]
    Clip,
    Keep,
}

/// Decoded state of the character the engine looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharCode {
    /// Not decoded yet.
    None,
    /// End of input reached.
    Eof,
    /// Malformed byte sequence.
    Invalid,
    Point(u32),
}

/// A character with its position and class mask. `begin..end` are absolute
/// stream offsets of the encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Char {
    byte_offset: u64,
    char_offset: u64,
    line: u64,
    line_char: u64,
    begin: u64,
    end: u64,
    code: CharCode,
    mask: u64,
}

impl Char {
    fn start_of_stream() -> Char {
        Char {
            byte_offset: 0,
            char_offset: 0,
            line: 1,
            line_char: 0,
            begin: 0,
            end: 0,
            code: CharCode::None,
            mask: 0,
        }
    }
}

/// The token currently accumulating matched characters. Its code is implied
/// by the top of the code stack.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LiveToken {
    byte_offset: u64,
    char_offset: u64,
    line: u64,
    line_char: u64,
    begin: u64,
    end: u64,
}

/// A backtracking checkpoint.
#[derive(Debug, Clone)]
struct Frame {
    prev: Char,
    curr: Char,
    current: LiveToken,
    choices: u32,
    tokens_depth: usize,
    codes_depth: usize,
    groups_depth: usize,
}

/// Outcome of a single action.
enum Perform {
    Continue,
    Done,
    Unexpected,
}

/// Encapsulated YEAST parser.
pub struct Parser<'src> {
    source: ByteSource<'src>,
    encoding: Encoding,
    machine: &'static MachineDef,
    state: i32,
    action_ix: usize,
    /// Loop counter.
    i: i64,
    /// Indentation parameter.
    n: i64,
    t: Chomp,
    prev: Char,
    curr: Char,
    current: LiveToken,
    tokens: Vec<RawToken>,
    codes: Vec<Code>,
    frames: Vec<Frame>,
    /// Open BEGIN groups, so recovery can close what it interrupts.
    groups: Vec<Code>,
    choices: u32,
    next_return: usize,
    did_see_eof: bool,
}

impl<'src> Parser<'src> {
    /// Open a parser over `source` for the given production.
    ///
    /// Fails when the production is not registered under the given parameter
    /// shape, when `n`/`t` do not parse, or when the source cannot provide
    /// its first bytes.
    pub fn new(mut source: ByteSource<'src>, production: &Production<'_>) -> YeastResult<Self> {
        let machine = productions::lookup(production)?;
        let n = match production.n {
            Some(text) => text
                .trim()
                .parse()
                .map_err(|_| YeastError::InvalidArgument("n must be an integer"))?,
            None => -9999,
        };
        let t = match production.t {
            None | Some("clip") => Chomp::Clip,
            Some("strip") => Chomp::Strip,
            Some("keep") => Chomp::Keep,
            Some(_) => {
                return Err(YeastError::InvalidArgument("t must be strip, clip or keep"))
            }
        };
        while source.window().len() < 4 {
            if source.more(4)? == 0 {
                break;
            }
        }
        let encoding = Encoding::detect(source.window());
        let curr = Char::start_of_stream();
        let mut parser = Parser {
            source,
            encoding,
            machine,
            state: 0,
            action_ix: 0,
            i: 0,
            n,
            t,
            prev: curr.clone(),
            curr,
            current: LiveToken {
                byte_offset: 0,
                char_offset: 0,
                line: 1,
                line_char: 0,
                begin: 0,
                end: 0,
            },
            tokens: Vec::new(),
            codes: Vec::new(),
            frames: Vec::new(),
            groups: Vec::new(),
            choices: 0,
            next_return: 0,
            did_see_eof: false,
        };
        parser.next_char()?;
        Ok(parser)
    }

    /// The detected encoding of the source.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Close the parser, releasing the source.
    pub fn close(self) -> YeastResult<()> {
        Ok(())
    }

    /// Return the next parsed token.
    ///
    /// The returned token borrows from the parser and stays valid until the
    /// next call. Once a DONE token has been returned, every further call
    /// returns another DONE token.
    pub fn next_token(&mut self) -> YeastResult<Token<'_>> {
        let slot = loop {
            if self.next_return < self.deliverable_len() {
                let ix = self.next_return;
                self.next_return += 1;
                break Some(ix);
            }
            if self.frames.is_empty() && self.next_return == self.tokens.len() {
                self.tokens.clear();
                self.next_return = 0;
            }
            if self.state == STATE_DONE {
                break None;
            }
            match self.step()? {
                Step::Token => {}
                Step::Done => self.finish()?,
                Step::Unexpected => self.recover()?,
            }
        };
        Ok(match slot {
            Some(ix) => self.resolve(ix),
            None => Token {
                byte_offset: self.curr.byte_offset,
                char_offset: self.curr.char_offset,
                line: self.curr.line,
                line_char: self.curr.line_char,
                bytes: b"",
                encoding: self.encoding,
                code: Code::Done,
            },
        })
    }

    fn resolve(&self, ix: usize) -> Token<'_> {
        let raw = &self.tokens[ix];
        let bytes: &[u8] = match &raw.text {
            TokenText::Window { begin, end } => {
                let off = self.source.byte_offset();
                &self.source.window()[(begin - off) as usize..(end - off) as usize]
            }
            TokenText::Static(text) => text.as_bytes(),
            TokenText::Owned(text) => text.as_bytes(),
            TokenText::Empty => b"",
        };
        Token {
            byte_offset: raw.byte_offset,
            char_offset: raw.char_offset,
            line: raw.line,
            line_char: raw.line_char,
            bytes,
            encoding: raw.encoding,
            code: raw.code,
        }
    }

    // ------------------------------------------------------------------
    // Character engine
    // ------------------------------------------------------------------

    fn next_char(&mut self) -> YeastResult<()> {
        if self.curr.code == CharCode::Eof {
            return Ok(());
        }
        self.prev = self.curr.clone();
        if self.curr.code != CharCode::None {
            let width = self.curr.end - self.curr.begin;
            self.current.end = self.curr.end;
            self.curr.byte_offset += width;
            self.curr.char_offset += 1;
            self.curr.line_char += 1;
            self.curr.begin = self.curr.end;
        }
        let lookahead = self.encoding.max_char_bytes() as u64;
        while !self.did_see_eof && self.source.end_offset() < self.curr.begin + lookahead {
            if self.source.more(DYNAMIC_BUFFER_SIZE)? == 0 {
                self.did_see_eof = true;
            }
        }
        // Start of line survives the start of the stream and a byte order
        // mark; consuming anything else clears it. Line breaks re-introduce
        // it through `next_line`.
        let inherited = match self.prev.code {
            CharCode::None => classify::SOL,
            CharCode::Point(0xFEFF) => self.prev.mask & classify::SOL,
            _ => 0,
        };
        if self.curr.begin == self.source.end_offset() {
            self.did_see_eof = true;
            self.curr.end = self.curr.begin;
            self.curr.code = CharCode::Eof;
            self.curr.mask = classify::EOF | inherited;
            return Ok(());
        }
        let rel = (self.curr.begin - self.source.byte_offset()) as usize;
        let window = self.source.window();
        let (point, consumed) = decode(self.encoding, &window[rel..]);
        let consumed = consumed.clamp(1, window.len() - rel);
        self.curr.end = self.curr.begin + consumed as u64;
        match point {
            Some(cp) => {
                self.curr.code = CharCode::Point(cp);
                self.curr.mask = char_class(cp) | inherited;
            }
            None => {
                self.curr.code = CharCode::Invalid;
                self.curr.mask = inherited;
            }
        }
        Ok(())
    }

    fn prev_char(&mut self) {
        debug_assert!(self.prev.code != CharCode::None, "nothing to retract to");
        self.curr = self.prev.clone();
        self.current.end = self.curr.begin;
    }

    fn next_line(&mut self) {
        self.curr.mask |= classify::SOL;
        self.curr.line += 1;
        self.curr.line_char = 0;
    }

    // ------------------------------------------------------------------
    // Token emitter
    // ------------------------------------------------------------------

    fn anchor_current(&mut self) {
        self.current = LiveToken {
            byte_offset: self.curr.byte_offset,
            char_offset: self.curr.char_offset,
            line: self.curr.line,
            line_char: self.curr.line_char,
            begin: self.curr.begin,
            end: self.curr.begin,
        };
    }

    fn finalize_current(&mut self, code: Code) -> RawToken {
        let text = if self.current.begin == self.current.end {
            TokenText::Empty
        } else {
            TokenText::Window { begin: self.current.begin, end: self.current.end }
        };
        RawToken {
            byte_offset: self.current.byte_offset,
            char_offset: self.current.char_offset,
            line: self.current.line,
            line_char: self.current.line_char,
            text,
            encoding: self.encoding,
            code,
        }
    }

    fn begin_token(&mut self, code: Code) {
        debug_assert!(
            code.code_type() == CodeType::Match || code == Code::Bom,
            "cannot open a token with {code:?}"
        );
        if self.current.begin != self.current.end {
            let open = *self.codes.last().expect("matched characters outside a code context");
            let token = self.finalize_current(open);
            self.tokens.push(token);
        }
        self.codes.push(code);
        self.anchor_current();
    }

    fn end_token(&mut self, code: Code) {
        let top = self.codes.pop();
        debug_assert!(
            top == Some(code) || code == Code::Unparsed,
            "closed {code:?} over {top:?}"
        );
        if self.current.begin == self.current.end {
            // An empty token is relabeled by the new stack top, not emitted.
            self.anchor_current();
            return;
        }
        let mut token = self.finalize_current(code);
        if code == Code::Bom {
            token.text = TokenText::Static(self.encoding.name());
            token.encoding = Encoding::Utf8;
        }
        self.tokens.push(token);
        self.anchor_current();
    }

    fn empty_token(&mut self, code: Code) {
        debug_assert_eq!(self.current.begin, self.current.end, "{code:?} over an open token");
        match code.code_type() {
            CodeType::Begin => self.groups.push(code),
            CodeType::End => {
                let open = self.groups.pop();
                debug_assert_eq!(open.map(Code::pair), Some(code));
            }
            _ => {}
        }
        self.tokens.push(RawToken {
            byte_offset: self.curr.byte_offset,
            char_offset: self.curr.char_offset,
            line: self.curr.line,
            line_char: self.curr.line_char,
            text: TokenText::Empty,
            encoding: self.encoding,
            code,
        });
        self.anchor_current();
    }

    /// Fake tokens anchor at the live token's start when it holds matched
    /// characters, so a following UNPARSED region that swallows the partial
    /// match keeps positions monotone.
    fn fake_token(&mut self, code: Code, text: TokenText) {
        let at_live = self.current.begin != self.current.end;
        let (byte_offset, char_offset, line, line_char) = if at_live {
            (
                self.current.byte_offset,
                self.current.char_offset,
                self.current.line,
                self.current.line_char,
            )
        } else {
            (self.curr.byte_offset, self.curr.char_offset, self.curr.line, self.curr.line_char)
        };
        self.tokens.push(RawToken {
            byte_offset,
            char_offset,
            line,
            line_char,
            text,
            encoding: Encoding::Utf8,
            code,
        });
    }

    // ------------------------------------------------------------------
    // Frame stack
    // ------------------------------------------------------------------

    fn snapshot(&self) -> Frame {
        Frame {
            prev: self.prev.clone(),
            curr: self.curr.clone(),
            current: self.current.clone(),
            choices: self.choices,
            tokens_depth: self.tokens.len(),
            codes_depth: self.codes.len(),
            groups_depth: self.groups.len(),
        }
    }

    fn push_state(&mut self) {
        let frame = self.snapshot();
        self.frames.push(frame);
    }

    fn set_state(&mut self) {
        let frame = self.snapshot();
        *self.frames.last_mut().expect("set_state without a checkpoint") = frame;
    }

    fn pop_state(&mut self) {
        self.frames.pop().expect("pop_state without a checkpoint");
    }

    fn restore(&mut self, frame: Frame) {
        self.prev = frame.prev;
        self.curr = frame.curr;
        self.current = frame.current;
        self.choices = frame.choices;
        self.tokens.truncate(frame.tokens_depth);
        self.codes.truncate(frame.codes_depth);
        self.groups.truncate(frame.groups_depth);
    }

    fn reset_state(&mut self) {
        let frame = self.frames.pop().expect("reset_state without a checkpoint");
        self.restore(frame);
    }

    /// True when no input was consumed since the innermost checkpoint.
    #[allow(dead_code)]
    pub(crate) fn is_same_state(&self) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.curr.byte_offset == self.curr.byte_offset)
    }

    fn deliverable_len(&self) -> usize {
        self.frames.first().map_or(self.tokens.len(), |frame| frame.tokens_depth)
    }

    fn tokens_ready(&self) -> bool {
        self.next_return < self.deliverable_len()
    }

    // ------------------------------------------------------------------
    // Machine interpreter
    // ------------------------------------------------------------------

    fn step(&mut self) -> YeastResult<Step> {
        loop {
            debug_assert!(self.state >= 0, "stepping a finished machine");
            let state = &self.machine.states[self.state as usize];
            while self.action_ix < state.actions.len() {
                let action = state.actions[self.action_ix];
                self.action_ix += 1;
                match self.perform(action)? {
                    Perform::Continue => {
                        if self.tokens_ready() {
                            return Ok(Step::Token);
                        }
                    }
                    Perform::Done => return Ok(Step::Done),
                    Perform::Unexpected => return Ok(Step::Unexpected),
                }
            }
            let mut target = None;
            for &(guard, to) in state.guards {
                if self.guard_passes(guard) {
                    target = Some(to);
                    break;
                }
            }
            if target.is_none() {
                for &(mask, to) in state.arcs {
                    if mask == 0 || mask & self.curr.mask != 0 {
                        target = Some(to);
                        break;
                    }
                }
            }
            match target {
                Some(to) => {
                    #[cfg(feature = "trace-states")]
                    tracing::trace!(
                        machine = self.machine.name,
                        from = self.state,
                        to,
                        "transition"
                    );
                    self.state = to;
                    self.action_ix = 0;
                }
                None => return Ok(Step::Unexpected),
            }
        }
    }

    fn guard_passes(&self, guard: Guard) -> bool {
        match guard {
            Guard::StartOfLine => self.curr.mask & classify::SOL != 0,
            Guard::CounterLessThanN => self.i < self.n,
            Guard::CounterLessEqualN => self.i <= self.n,
        }
    }

    fn perform(&mut self, action: Action) -> YeastResult<Perform> {
        match action {
            Action::BeginToken(code) => self.begin_token(code),
            Action::EndToken(code) => self.end_token(code),
            Action::BeginTokenChomped => self.begin_token(self.chomp_code()),
            Action::EndTokenChomped => self.end_token(self.chomp_code()),
            Action::BeginTokenKept => self.begin_token(self.keep_code()),
            Action::EndTokenKept => self.end_token(self.keep_code()),
            Action::EmptyToken(code) => self.empty_token(code),
            Action::NextChar => self.next_char()?,
            Action::PrevChar => self.prev_char(),
            Action::NextLine => self.next_line(),
            Action::ResetCounter => self.i = 0,
            Action::IncrementCounter => self.i += 1,
            Action::BeginChoice(choice) => {
                debug_assert_eq!(self.choices & (1 << choice as u32), 0);
                self.choices |= 1 << choice as u32;
            }
            Action::EndChoice(choice) => self.choices &= !(1 << choice as u32),
            Action::Commit(choice) => {
                if self.choices & (1 << choice as u32) == 0 {
                    self.fake_token(
                        Code::Error,
                        TokenText::Static(CHOICE_ERRORS[choice as usize]),
                    );
                }
            }
            Action::PushState => self.push_state(),
            Action::SetState => self.set_state(),
            Action::PopState => self.pop_state(),
            Action::ResetState => self.reset_state(),
            Action::NonPositiveN => {
                self.frames.clear();
                self.codes.clear();
                self.fake_token(Code::Error, TokenText::Static("Fewer than 0 repetitions"));
                self.close_groups();
                self.state = STATE_DONE;
            }
            Action::Success => return Ok(Perform::Done),
            Action::Failure => return Ok(Perform::Unexpected),
        }
        Ok(Perform::Continue)
    }

    fn chomp_code(&self) -> Code {
        match self.t {
            Chomp::Strip => Code::Break,
            Chomp::Clip | Chomp::Keep => Code::LineFeed,
        }
    }

    fn keep_code(&self) -> Code {
        match self.t {
            Chomp::Keep => Code::LineFeed,
            Chomp::Strip | Chomp::Clip => Code::Break,
        }
    }

    // ------------------------------------------------------------------
    // Termination and recovery
    // ------------------------------------------------------------------

    /// The machine matched its production. With input left over this is
    /// still an error at the stream level.
    fn finish(&mut self) -> YeastResult<()> {
        debug_assert!(self.frames.is_empty(), "machine finished inside a checkpoint");
        self.frames.clear();
        if self.curr.code != CharCode::Eof {
            self.fake_token(Code::Error, TokenText::Static("Expected end of input"));
            self.unparsed_rest()?;
        }
        self.close_groups();
        self.state = STATE_DONE;
        Ok(())
    }

    /// No transition applied: report the offending character and mark
    /// everything left as unparsed, keeping the group nesting balanced.
    fn recover(&mut self) -> YeastResult<()> {
        while self.frames.len() > 1 {
            self.frames.pop();
        }
        if let Some(frame) = self.frames.pop() {
            self.restore(frame);
        }
        let text = match self.curr.code {
            CharCode::Eof => TokenText::Static("Unexpected end of input"),
            CharCode::Invalid => TokenText::Static("Invalid byte sequence"),
            CharCode::Point(cp) => TokenText::Owned(unexpected_message(cp).into_boxed_str()),
            CharCode::None => unreachable!("undecoded character mid-parse"),
        };
        self.fake_token(Code::Error, text);
        self.unparsed_rest()?;
        self.close_groups();
        self.state = STATE_DONE;
        Ok(())
    }

    /// Consume everything up to end of input into UNPARSED tokens, one per
    /// line. Any partial accumulation of the interrupted token joins the
    /// first chunk.
    fn unparsed_rest(&mut self) -> YeastResult<()> {
        self.codes.clear();
        loop {
            if self.curr.code == CharCode::Eof {
                self.flush_unparsed();
                return Ok(());
            }
            if self.encoding == Encoding::Utf8 {
                self.unparsed_bulk_line()?;
            } else {
                let was_break = self.curr.mask & classify::BREAK != 0;
                self.next_char()?;
                if was_break {
                    self.next_line();
                    self.flush_unparsed();
                }
            }
        }
    }

    /// Bulk variant of the unparsed loop: extend the chunk through the next
    /// line feed (or the end of the window) in one scan.
    fn unparsed_bulk_line(&mut self) -> YeastResult<()> {
        let rel = (self.curr.begin - self.source.byte_offset()) as usize;
        let window = self.source.window();
        let (stop, saw_break) = match memchr::memchr(b'\n', &window[rel..]) {
            Some(pos) => (rel + pos + 1, true),
            None => (window.len(), false),
        };
        let chunk = &window[rel..stop];
        let chars = chunk.iter().filter(|&&b| b & 0xC0 != 0x80).count() as u64;
        let end = self.source.byte_offset() + stop as u64;
        self.current.end = end;
        self.curr.byte_offset = end;
        self.curr.char_offset += chars;
        if saw_break {
            self.curr.line += 1;
            self.curr.line_char = 0;
        } else {
            self.curr.line_char += chars;
        }
        self.curr.begin = end;
        self.curr.end = end;
        self.curr.code = CharCode::None;
        self.curr.mask = 0;
        self.flush_unparsed();
        self.next_char()
    }

    fn flush_unparsed(&mut self) {
        if self.current.begin == self.current.end {
            self.anchor_current();
            return;
        }
        let token = self.finalize_current(Code::Unparsed);
        self.tokens.push(token);
        self.anchor_current();
    }

    fn close_groups(&mut self) {
        while let Some(open) = self.groups.pop() {
            self.fake_token(open.pair(), TokenText::Empty);
        }
    }
}

fn unexpected_message(cp: u32) -> String {
    if cp < 0x100 {
        format!("Unexpected '\\x{cp:02X}'")
    } else if cp < 0x10000 {
        format!("Unexpected '\\u{cp:04X}'")
    } else {
        format!("Unexpected '\\U{cp:08X}'")
    }
}
