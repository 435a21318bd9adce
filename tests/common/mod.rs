#![allow(dead_code)]

use std::fmt::Write;

use yeast::{ByteSource, Code, CodeType, Parser, Production};

/// A token copied out of the parser, safe to keep across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedToken {
    pub code: Code,
    pub byte_offset: u64,
    pub char_offset: u64,
    pub line: u64,
    pub line_char: u64,
    pub bytes: Vec<u8>,
}

/// Run a production over a source and collect every token including the
/// final DONE.
pub fn collect_tokens(source: ByteSource<'_>, production: &Production<'_>) -> Vec<OwnedToken> {
    let mut parser = Parser::new(source, production).expect("open parser");
    let mut tokens = Vec::new();
    loop {
        let token = parser.next_token().expect("next token");
        let done = token.code == Code::Done;
        tokens.push(OwnedToken {
            code: token.code,
            byte_offset: token.byte_offset,
            char_offset: token.char_offset,
            line: token.line,
            line_char: token.line_char,
            bytes: token.bytes.to_vec(),
        });
        if done {
            return tokens;
        }
        assert!(tokens.len() < 1_000_000, "runaway token stream");
    }
}

/// Render a token stream as one line per token: the code letter, then the
/// escaped token bytes between bars. The final DONE token is omitted.
pub fn yeast_dump(tokens: &[OwnedToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        if token.code == Code::Done {
            break;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        write!(out, "{}", token.code.as_char()).unwrap();
        if !token.bytes.is_empty() {
            out.push_str(" |");
            for ch in String::from_utf8_lossy(&token.bytes).chars() {
                match ch {
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    c if (c as u32) < 0x20 => write!(out, "\\x{:02X}", c as u32).unwrap(),
                    c => out.push(c),
                }
            }
            out.push('|');
        }
    }
    out
}

/// Assert that tokenizing `input` with `production` yields exactly the
/// expected YEAST dump.
pub fn assert_eq_yeast(input: &str, production: &Production<'_>, expected: &str) {
    let tokens = collect_tokens(ByteSource::from_str(input), production);
    assert_eq!(yeast_dump(&tokens), expected, "for input {input:?}");
    assert_stream_invariants(&tokens);
}

/// The universal stream invariants: balanced nesting and monotone positions.
pub fn assert_stream_invariants(tokens: &[OwnedToken]) {
    let mut open = Vec::new();
    let mut prev_byte = 0u64;
    let mut prev_char = 0u64;
    let mut prev_line = 1u64;
    for token in tokens {
        match token.code.code_type() {
            CodeType::Begin => open.push(token.code),
            CodeType::End => {
                let begin = open.pop().expect("END without BEGIN");
                assert_eq!(begin.pair(), token.code, "mismatched group");
            }
            _ => {}
        }
        assert!(token.byte_offset >= prev_byte, "byte offsets must not decrease");
        assert!(token.char_offset >= prev_char, "char offsets must not decrease");
        assert!(token.line >= prev_line, "line numbers must not decrease");
        prev_byte = token.byte_offset;
        prev_char = token.char_offset;
        prev_line = token.line;
    }
    assert!(open.is_empty(), "unclosed groups: {open:?}");
}
