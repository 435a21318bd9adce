//! YEAST token codes and token records.
//!
//! Every code is a printable ASCII character (except the NUL that terminates
//! the stream), so a token stream can be dumped as text with one letter per
//! token. BEGIN/END codes come in case-paired letters.

use crate::encoding::Encoding;

/// Parsed YEAST token codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Code {
    /// Parsing is done.
    Done = 0,
    /// Byte order mark.
    Bom = b'U',
    /// Content text.
    Text = b'T',
    /// Non-content text.
    Meta = b't',
    /// Non-content (separation) line break.
    Break = b'b',
    /// Line break normalized to a line feed.
    LineFeed = b'L',
    /// Line break folded to a content space.
    LineFold = b'l',
    /// Character indicating structure.
    Indicator = b'I',
    /// Non-content (separation) white space.
    White = b'w',
    /// Indentation spaces.
    Indent = b'i',
    /// Document start marker.
    DocumentStart = b'K',
    /// Document end marker.
    DocumentEnd = b'k',
    BeginEscape = b'E',
    EndEscape = b'e',
    BeginComment = b'C',
    EndComment = b'c',
    BeginDirective = b'D',
    EndDirective = b'd',
    BeginTag = b'G',
    EndTag = b'g',
    BeginHandle = b'H',
    EndHandle = b'h',
    BeginAnchor = b'A',
    EndAnchor = b'a',
    BeginProperties = b'P',
    EndProperties = b'p',
    BeginAlias = b'R',
    EndAlias = b'r',
    BeginScalar = b'S',
    EndScalar = b's',
    BeginSequence = b'Q',
    EndSequence = b'q',
    BeginMapping = b'M',
    EndMapping = b'm',
    BeginNode = b'N',
    EndNode = b'n',
    BeginPair = b'X',
    EndPair = b'x',
    BeginDocument = b'O',
    EndDocument = b'o',
    /// Parsing error.
    Error = b'!',
    /// Unparsed text (due to a preceding error).
    Unparsed = b'-',
}

/// The role of each YEAST token code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeType {
    /// Token begins a group of tokens.
    Begin,
    /// Token ends a group of tokens.
    End,
    /// Token matches some input characters.
    Match,
    /// Token contains non-input characters.
    Fake,
}

impl Code {
    /// The role of this code.
    #[must_use]
    pub const fn code_type(self) -> CodeType {
        use Code::*;
        match self {
            BeginEscape | BeginComment | BeginDirective | BeginTag | BeginHandle | BeginAnchor
            | BeginProperties | BeginAlias | BeginScalar | BeginSequence | BeginMapping
            | BeginNode | BeginPair | BeginDocument => CodeType::Begin,
            EndEscape | EndComment | EndDirective | EndTag | EndHandle | EndAnchor
            | EndProperties | EndAlias | EndScalar | EndSequence | EndMapping | EndNode
            | EndPair | EndDocument => CodeType::End,
            Text | Meta | Break | LineFeed | LineFold | Indicator | White | Indent
            | DocumentStart | DocumentEnd | Unparsed => CodeType::Match,
            Done | Bom | Error => CodeType::Fake,
        }
    }

    /// The paired code: BEGIN for END and vice versa, identity otherwise.
    /// An involution: `code.pair().pair() == code`.
    #[must_use]
    pub const fn pair(self) -> Code {
        use Code::*;
        match self {
            BeginEscape => EndEscape,
            EndEscape => BeginEscape,
            BeginComment => EndComment,
            EndComment => BeginComment,
            BeginDirective => EndDirective,
            EndDirective => BeginDirective,
            BeginTag => EndTag,
            EndTag => BeginTag,
            BeginHandle => EndHandle,
            EndHandle => BeginHandle,
            BeginAnchor => EndAnchor,
            EndAnchor => BeginAnchor,
            BeginProperties => EndProperties,
            EndProperties => BeginProperties,
            BeginAlias => EndAlias,
            EndAlias => BeginAlias,
            BeginScalar => EndScalar,
            EndScalar => BeginScalar,
            BeginSequence => EndSequence,
            EndSequence => BeginSequence,
            BeginMapping => EndMapping,
            EndMapping => BeginMapping,
            BeginNode => EndNode,
            EndNode => BeginNode,
            BeginPair => EndPair,
            EndPair => BeginPair,
            BeginDocument => EndDocument,
            EndDocument => BeginDocument,
            other => other,
        }
    }

    /// The printable YEAST letter of this code (`'\0'` for [`Code::Done`]).
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

/// The bytes a stored token points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenText {
    /// A sub-range of the source stream, as absolute byte offsets.
    Window { begin: u64, end: u64 },
    /// A fixed message (BOM names, canned error texts). Always UTF-8.
    Static(&'static str),
    /// A formatted message owned by the token. Always UTF-8.
    Owned(Box<str>),
    /// No bytes at all (empty BEGIN/END group tokens, DONE).
    Empty,
}

impl TokenText {
    pub(crate) fn window_len(&self) -> u64 {
        match *self {
            TokenText::Window { begin, end } => end - begin,
            _ => 0,
        }
    }
}

/// A token as stored on the parser's token stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawToken {
    pub byte_offset: u64,
    pub char_offset: u64,
    pub line: u64,
    pub line_char: u64,
    pub text: TokenText,
    pub encoding: Encoding,
    pub code: Code,
}

/// A single parsed token, borrowed from the parser.
///
/// The byte slice points either into the source window or at a static
/// message; it is valid only until the next call on the same parser, because
/// the window may slide or grow in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Zero based offset in bytes.
    pub byte_offset: u64,
    /// Zero based offset in characters.
    pub char_offset: u64,
    /// One based line number.
    pub line: u64,
    /// Zero based character in line.
    pub line_char: u64,
    /// The matched bytes, or the synthetic message for fake tokens.
    pub bytes: &'a [u8],
    /// Encoding of `bytes`.
    pub encoding: Encoding,
    /// Parsed token code.
    pub code: Code,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CODES: &[Code] = &[
        Code::Done,
        Code::Bom,
        Code::Text,
        Code::Meta,
        Code::Break,
        Code::LineFeed,
        Code::LineFold,
        Code::Indicator,
        Code::White,
        Code::Indent,
        Code::DocumentStart,
        Code::DocumentEnd,
        Code::BeginEscape,
        Code::EndEscape,
        Code::BeginComment,
        Code::EndComment,
        Code::BeginDirective,
        Code::EndDirective,
        Code::BeginTag,
        Code::EndTag,
        Code::BeginHandle,
        Code::EndHandle,
        Code::BeginAnchor,
        Code::EndAnchor,
        Code::BeginProperties,
        Code::EndProperties,
        Code::BeginAlias,
        Code::EndAlias,
        Code::BeginScalar,
        Code::EndScalar,
        Code::BeginSequence,
        Code::EndSequence,
        Code::BeginMapping,
        Code::EndMapping,
        Code::BeginNode,
        Code::EndNode,
        Code::BeginPair,
        Code::EndPair,
        Code::BeginDocument,
        Code::EndDocument,
        Code::Error,
        Code::Unparsed,
    ];

    #[test]
    fn pair_is_involution() {
        for &code in ALL_CODES {
            assert_eq!(code.pair().pair(), code, "{code:?}");
        }
    }

    #[test]
    fn begin_end_letters_are_case_pairs() {
        for &code in ALL_CODES {
            match code.code_type() {
                CodeType::Begin => {
                    assert_eq!(code.pair().code_type(), CodeType::End);
                    assert_eq!(
                        code.as_char().to_ascii_lowercase(),
                        code.pair().as_char()
                    );
                }
                CodeType::End => assert_eq!(code.pair().code_type(), CodeType::Begin),
                _ => assert_eq!(code.pair(), code),
            }
        }
    }

    #[test]
    fn codes_are_printable_ascii() {
        for &code in ALL_CODES {
            if code != Code::Done {
                let ch = code.as_char();
                assert!(ch.is_ascii() && !ch.is_ascii_control(), "{code:?}");
            }
        }
    }
}
