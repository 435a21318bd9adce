mod common;

use common::{assert_eq_yeast, collect_tokens, yeast_dump};
use rstest::rstest;
use yeast::{ByteSource, Production};

fn plain_out() -> Production<'static> {
    Production::named("ns-plain").with_n("0").with_c("flow-out")
}

fn plain_in() -> Production<'static> {
    Production::named("ns-plain").with_n("0").with_c("flow-in")
}

#[test]
fn plain_one_line() {
    assert_eq_yeast("foo bar", &plain_out(), concat!("S\n", "T |foo bar|\n", "s"));
}

#[test]
fn plain_keeps_colon_before_safe_char() {
    assert_eq_yeast("foo:bar", &plain_out(), concat!("S\n", "T |foo:bar|\n", "s"));
}

#[test]
fn plain_stops_at_colon_space() {
    assert_eq_yeast(
        "foo: bar",
        &plain_out(),
        concat!(
            "S\n",
            "T |foo|\n",
            "s\n",
            "! |Expected end of input|\n",
            "- |: bar|",
        ),
    );
}

#[test]
fn plain_stops_before_comment() {
    assert_eq_yeast(
        "foo #bar",
        &plain_out(),
        concat!(
            "S\n",
            "T |foo|\n",
            "w | |\n",
            "s\n",
            "! |Expected end of input|\n",
            "- |#bar|",
        ),
    );
}

#[test]
fn plain_hash_without_space_is_content() {
    assert_eq_yeast("foo#bar", &plain_out(), concat!("S\n", "T |foo#bar|\n", "s"));
}

#[test]
fn plain_folds_a_deeper_line() {
    assert_eq_yeast(
        "foo\n bar",
        &plain_out(),
        concat!(
            "S\n",
            "T |foo|\n",
            "l |\\n|\n",
            "i | |\n",
            "T |bar|\n",
            "s",
        ),
    );
}

#[test]
fn plain_folds_across_empty_lines() {
    assert_eq_yeast(
        "foo\n\n bar",
        &plain_out(),
        concat!(
            "S\n",
            "T |foo|\n",
            "l |\\n|\n",
            "L |\\n|\n",
            "i | |\n",
            "T |bar|\n",
            "s",
        ),
    );
}

#[test]
fn plain_rejects_a_shallow_continuation() {
    assert_eq_yeast(
        "foo\nbar",
        &plain_out(),
        concat!(
            "S\n",
            "T |foo|\n",
            "s\n",
            "! |Expected end of input|\n",
            "- |\\n|\n",
            "- |bar|",
        ),
    );
}

#[test]
fn plain_flow_in_stops_at_flow_indicator() {
    assert_eq_yeast(
        "a,b",
        &plain_in(),
        concat!("S\n", "T |a|\n", "s\n", "! |Expected end of input|\n", "- |,b|"),
    );
}

#[test]
fn plain_flow_out_keeps_flow_indicators() {
    assert_eq_yeast("a,b", &plain_out(), concat!("S\n", "T |a,b|\n", "s"));
}

#[test]
fn plain_dash_needs_a_following_safe_char() {
    assert_eq_yeast(
        "-",
        &plain_out(),
        concat!("! |Unexpected '\\x2D'|\n", "- |-|"),
    );
    assert_eq_yeast("-a", &plain_out(), concat!("S\n", "T |-a|\n", "s"));
}

#[test]
fn indent_exact() {
    let production = Production::named("s-indent").with_n("2");
    assert_eq_yeast(
        "  x",
        &production,
        concat!("i |  |\n", "! |Expected end of input|\n", "- |x|"),
    );
}

#[test]
fn indent_interrupted_by_tab() {
    let production = Production::named("s-indent").with_n("3");
    assert_eq_yeast(
        "  \tx",
        &production,
        concat!("! |Unexpected '\\x09'|\n", "- |  \\tx|"),
    );
}

#[test]
fn indent_below_zero_repetitions() {
    let production = Production::named("s-indent-lt").with_n("0");
    assert_eq_yeast("", &production, "! |Fewer than 0 repetitions|");
}

#[test]
fn indent_up_to_bound() {
    let production = Production::named("s-indent-le").with_n("0");
    assert_eq_yeast(
        " x",
        &production,
        concat!("! |Expected end of input|\n", "- | x|"),
    );
}

#[test]
fn empty_line_with_indent() {
    let production = Production::named("l-empty").with_n("2").with_c("block-in");
    assert_eq_yeast("  \n", &production, concat!("i |  |\n", "L |\\n|"));
}

#[test]
fn overlong_empty_line_is_an_error() {
    let production = Production::named("l-empty").with_n("0").with_c("flow-in");
    assert_eq_yeast(
        " \n",
        &production,
        concat!("! |Unexpected '\\x20'|\n", "- | \\n|"),
    );
}

#[test]
fn breaks() {
    assert_eq_yeast("\r\n", &Production::named("b-break"), "b |\\r\\n|");
    assert_eq_yeast("\n", &Production::named("b-as-line-feed"), "L |\\n|");
}

#[rstest]
#[case("strip", "b |\\n|")]
#[case("clip", "L |\\n|")]
#[case("keep", "L |\\n|")]
fn chomped_last_break(#[case] t: &str, #[case] expected: &str) {
    let production = Production::named("b-chomped-last").with_t(t);
    assert_eq_yeast("\n", &production, expected);
}

#[test]
fn nothing_to_chomp_at_end_of_input() {
    let strip = Production::named("b-chomped-last").with_t("strip");
    let tokens = collect_tokens(ByteSource::from_str(""), &strip);
    assert_eq!(tokens.len(), 1);
}

#[rstest]
#[case("keep", concat!("L |\\n|\n", "i | |\n", "L |\\n|"))]
#[case("clip", concat!("b |\\n|\n", "i | |\n", "b |\\n|"))]
#[case("strip", concat!("b |\\n|\n", "i | |\n", "b |\\n|"))]
fn chomped_trailing_empty_lines(#[case] t: &str, #[case] expected: &str) {
    let production = Production::named("l-chomped-empty").with_n("1").with_t(t);
    assert_eq_yeast("\n \n", &production, expected);
}

#[test]
fn separation_in_line() {
    let production = Production::named("s-separate-in-line");
    assert_eq_yeast(
        "  x",
        &production,
        concat!("w |  |\n", "! |Expected end of input|\n", "- |x|"),
    );
    // The start of a line separates on its own.
    let tokens = collect_tokens(ByteSource::from_str(""), &production);
    assert_eq!(yeast_dump(&tokens), "");
    assert_eq!(tokens.len(), 1);
}
