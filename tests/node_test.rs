mod common;

use common::{assert_eq_yeast, assert_stream_invariants, collect_tokens, yeast_dump};
use yeast::{ByteSource, Code, Production};

#[test]
fn escape_single_character() {
    assert_eq_yeast(
        "\\n",
        &Production::named("c-ns-esc-char"),
        concat!("E\n", "I |\\|\n", "t |n|\n", "e"),
    );
}

#[test]
fn escape_hex_forms() {
    let production = Production::named("c-ns-esc-char");
    assert_eq_yeast(
        "\\x41",
        &production,
        concat!("E\n", "I |\\|\n", "I |x|\n", "t |41|\n", "e"),
    );
    assert_eq_yeast(
        "\\u2603",
        &production,
        concat!("E\n", "I |\\|\n", "I |u|\n", "t |2603|\n", "e"),
    );
    assert_eq_yeast(
        "\\U0001F600",
        &production,
        concat!("E\n", "I |\\|\n", "I |U|\n", "t |0001F600|\n", "e"),
    );
}

#[test]
fn escape_with_bad_letter_recovers_balanced() {
    let tokens = collect_tokens(ByteSource::from_str("\\q"), &Production::named("c-ns-esc-char"));
    assert_eq!(
        yeast_dump(&tokens),
        concat!(
            "E\n",
            "I |\\|\n",
            "! |Unexpected '\\x71'|\n",
            "- |q|\n",
            "e",
        )
    );
    assert_stream_invariants(&tokens);
}

#[test]
fn escape_truncated_hex_recovers() {
    let tokens = collect_tokens(ByteSource::from_str("\\x4"), &Production::named("c-ns-esc-char"));
    assert_eq!(
        yeast_dump(&tokens),
        concat!(
            "E\n",
            "I |\\|\n",
            "I |x|\n",
            "! |Unexpected end of input|\n",
            "- |4|\n",
            "e",
        )
    );
    assert_stream_invariants(&tokens);
}

#[test]
fn tag_with_named_handle() {
    let tokens = collect_tokens(ByteSource::from_str("!e!t"), &Production::named("c-ns-tag-property"));
    assert_eq!(
        yeast_dump(&tokens),
        concat!(
            "G\n",
            "H\n",
            "I |!|\n",
            "t |e|\n",
            "I |!|\n",
            "h\n",
            "t |t|\n",
            "g",
        )
    );
    // The abandoned verbatim alternative leaks nothing.
    assert!(tokens.iter().all(|t| t.bytes != b"<"));
}

#[test]
fn tag_verbatim() {
    assert_eq_yeast(
        "!<tag:x>",
        &Production::named("c-ns-tag-property"),
        concat!(
            "G\n",
            "I |!|\n",
            "I |<|\n",
            "t |tag:x|\n",
            "I |>|\n",
            "g",
        ),
    );
}

#[test]
fn tag_secondary_handle() {
    assert_eq_yeast(
        "!!str",
        &Production::named("c-ns-tag-property"),
        concat!(
            "G\n",
            "H\n",
            "I |!|\n",
            "I |!|\n",
            "h\n",
            "t |str|\n",
            "g",
        ),
    );
}

#[test]
fn tag_primary_and_non_specific() {
    let production = Production::named("c-ns-tag-property");
    assert_eq_yeast(
        "!local",
        &production,
        concat!("G\n", "H\n", "I |!|\n", "h\n", "t |local|\n", "g"),
    );
    assert_eq_yeast("!", &production, concat!("G\n", "H\n", "I |!|\n", "h\n", "g"));
}

#[test]
fn alias_node() {
    assert_eq_yeast(
        "*anc",
        &Production::named("c-ns-alias-node"),
        concat!("R\n", "I |*|\n", "t |anc|\n", "r"),
    );
}

#[test]
fn anchor_property() {
    assert_eq_yeast(
        "&a1",
        &Production::named("c-ns-anchor-property"),
        concat!("A\n", "I |&|\n", "t |a1|\n", "a"),
    );
}

#[test]
fn malformed_bytes_recover_in_band() {
    let tokens =
        collect_tokens(ByteSource::from_slice(b"*\x80"), &Production::named("c-ns-alias-node"));
    assert_eq!(
        yeast_dump(&tokens),
        concat!(
            "R\n",
            "I |*|\n",
            "! |Invalid byte sequence|\n",
            "- |\u{FFFD}|\n",
            "r",
        )
    );
    assert_stream_invariants(&tokens);
}

#[test]
fn comment_line() {
    assert_eq_yeast(
        "# hi\n",
        &Production::named("l-comment"),
        concat!("C\n", "I |#|\n", "t | hi|\n", "c\n", "b |\\n|"),
    );
}

#[test]
fn comment_after_white_at_end_of_input() {
    assert_eq_yeast(
        " # x",
        &Production::named("l-comment"),
        concat!("w | |\n", "C\n", "I |#|\n", "t | x|\n", "c"),
    );
}

#[test]
fn blank_line_is_a_comment_line() {
    assert_eq_yeast("  \n", &Production::named("l-comment"), concat!("w |  |\n", "b |\\n|"));
}

#[test]
fn yaml_directive() {
    assert_eq_yeast(
        "%YAML 1.2\n",
        &Production::named("l-directive"),
        concat!(
            "D\n",
            "I |%|\n",
            "t |YAML|\n",
            "w | |\n",
            "t |1.2|\n",
            "d\n",
            "b |\\n|",
        ),
    );
}

#[test]
fn reserved_directive_with_arguments() {
    assert_eq_yeast(
        "%FOO bar baz\n",
        &Production::named("l-directive"),
        concat!(
            "D\n",
            "I |%|\n",
            "t |FOO|\n",
            "w | |\n",
            "t |bar|\n",
            "w | |\n",
            "t |baz|\n",
            "d\n",
            "b |\\n|",
        ),
    );
}

#[test]
fn directive_keyword_backtracks_to_reserved() {
    // "YAMLX" shares the whole keyword prefix; the YAML alternative is
    // abandoned and the name re-parses as a reserved directive.
    let tokens =
        collect_tokens(ByteSource::from_str("%YAMLX 1\n"), &Production::named("l-directive"));
    assert_eq!(
        yeast_dump(&tokens),
        concat!(
            "D\n",
            "I |%|\n",
            "t |YAMLX|\n",
            "w | |\n",
            "t |1|\n",
            "d\n",
            "b |\\n|",
        )
    );
    assert!(tokens.iter().filter(|t| t.code == Code::Meta).count() == 2);
}

#[test]
fn byte_order_mark_production() {
    let tokens =
        collect_tokens(ByteSource::from_slice(b"\xEF\xBB\xBF"), &Production::named("c-byte-order-mark"));
    assert_eq!(yeast_dump(&tokens), "U |UTF-8|");
    assert_eq!(tokens[0].byte_offset, 0);
}

#[test]
fn valid_escape_has_no_error_tokens() {
    let tokens = collect_tokens(ByteSource::from_str("\\x41"), &Production::named("c-ns-esc-char"));
    assert!(tokens.iter().all(|t| t.code != Code::Error));
}
