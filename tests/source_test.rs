mod common;

use std::fs::{self, File};
use std::io::Cursor;

use common::{assert_stream_invariants, collect_tokens, yeast_dump};
use yeast::{ByteSource, Code, Parser, Production};

fn stream() -> Production<'static> {
    Production::named("l-yaml-stream")
}

#[test]
fn vec_and_reader_sources_match_the_slice_source() {
    let input = "foo\n bar\n---\nbaz\n# done\n";
    let from_slice = collect_tokens(ByteSource::from_str(input), &stream());
    let from_vec = collect_tokens(ByteSource::from_vec(input.as_bytes().to_vec()), &stream());
    let from_reader =
        collect_tokens(ByteSource::from_reader(Cursor::new(input.as_bytes().to_vec())), &stream());
    assert_eq!(from_slice, from_vec);
    assert_eq!(from_slice, from_reader);
}

#[test]
fn large_input_stream_read_matches_mmap() {
    let mut content = String::new();
    let mut index = 0u32;
    while content.len() < (1 << 20) {
        content.push_str(&format!("entry number {index:06}\n"));
        index += 1;
    }
    let path = std::env::temp_dir().join(format!("yeast-large-{}.txt", std::process::id()));
    fs::write(&path, &content).unwrap();

    let mapped = ByteSource::from_file_mmap(&File::open(&path).unwrap()).unwrap();
    let read = ByteSource::from_file_read(File::open(&path).unwrap());
    let mapped_tokens = collect_tokens(mapped, &stream());
    let read_tokens = collect_tokens(read, &stream());
    fs::remove_file(&path).unwrap();

    assert_eq!(mapped_tokens.len(), read_tokens.len());
    assert_eq!(mapped_tokens, read_tokens);
    assert_stream_invariants(&mapped_tokens);
}

#[test]
fn path_source_tokenizes_like_a_slice() {
    let input = "a\n b\n";
    let path = std::env::temp_dir().join(format!("yeast-path-{}.txt", std::process::id()));
    fs::write(&path, input).unwrap();
    let from_path = collect_tokens(ByteSource::from_path(&path).unwrap(), &stream());
    fs::remove_file(&path).unwrap();
    let from_slice = collect_tokens(ByteSource::from_str(input), &stream());
    assert_eq!(from_path, from_slice);
}

#[test]
fn utf16le_surrogate_pair_advances_once() {
    // 'a', U+10000 (surrogate pair D800 DC00), 'b' in UTF-16LE.
    let bytes = [0x61, 0x00, 0x00, 0xD8, 0x00, 0xDC, 0x62, 0x00];
    let parser = Parser::new(ByteSource::from_slice(&bytes), &stream()).unwrap();
    assert_eq!(parser.encoding(), yeast::Encoding::Utf16Le);
    let tokens = collect_tokens(ByteSource::from_slice(&bytes), &stream());
    let text = tokens.iter().find(|t| t.code == Code::Text).unwrap();
    assert_eq!(text.bytes, bytes);
    let done = tokens.last().unwrap();
    assert_eq!(done.code, Code::Done);
    assert_eq!(done.byte_offset, 8);
    // Three characters: the pair counts once.
    assert_eq!(done.char_offset, 3);
}

#[test]
fn utf16be_with_bom() {
    let bytes = [0xFE, 0xFF, 0xD8, 0x3D, 0xDE, 0x00];
    let tokens = collect_tokens(ByteSource::from_slice(&bytes), &stream());
    assert_eq!(tokens[0].code, Code::Bom);
    assert_eq!(tokens[0].bytes, b"UTF-16BE");
    let done = tokens.last().unwrap();
    assert_eq!(done.byte_offset, 6);
    assert_eq!(done.char_offset, 2);
}

#[test]
fn utf32be_content() {
    let bytes = [0x00, 0x00, 0x00, 0x61];
    let tokens = collect_tokens(ByteSource::from_slice(&bytes), &stream());
    let text = tokens.iter().find(|t| t.code == Code::Text).unwrap();
    assert_eq!(text.bytes, bytes);
    let done = tokens.last().unwrap();
    assert_eq!(done.byte_offset, 4);
    assert_eq!(done.char_offset, 1);
}

#[test]
fn tokens_decode_to_whole_characters() {
    // Byte accounting: every window-backed token decodes without overrun.
    let input = "héllo\n wörld\n---\n\u{1F600}\n";
    let tokens = collect_tokens(ByteSource::from_str(input), &stream());
    for token in &tokens {
        if token.code == Code::Done {
            continue;
        }
        let mut rest = token.bytes.as_slice();
        while !rest.is_empty() {
            let (point, consumed) = yeast::encoding::decode(yeast::Encoding::Utf8, rest);
            assert!(point.is_some(), "token bytes decode cleanly: {:?}", token);
            rest = &rest[consumed..];
        }
    }
    assert_stream_invariants(&tokens);
}

#[test]
fn identical_runs_are_deterministic() {
    let input = "%YAML 1.2\n---\nfoo bar\n# c\n...\n";
    let first = collect_tokens(ByteSource::from_str(input), &stream());
    let second = collect_tokens(ByteSource::from_str(input), &stream());
    assert_eq!(first, second);
    assert!(!yeast_dump(&first).is_empty());
}
