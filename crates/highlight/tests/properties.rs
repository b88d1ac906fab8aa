//! Invariants that must hold for any input and any chunking.

use highlight::markup::strip_markup;
use highlight::{CssHighlighter, LexState, TargetId};

const CORPUS: &[&str] = &[
    "",
    "a{color:red;}",
    "/* note */b{}",
    "p{width: 10px;}",
    "a:hover > b:focus { x: 1px 2px; }",
    "html { font: 12px/1.5 serif; }\n\n/* footer */\nfooter{}",
    "/*/ still comment */ ok{}",
    "weird }}} ;;; ::: {{{ px x xp",
    "a & b < c > d { content: \"<&>\"; }",
    "/* unterminated { a: b;",
    "trailing slash /",
    "ünïcödé { ☃: 1px; }",
];

fn feed_in_chunks(input: &str, size: usize) -> (String, Vec<String>) {
    let mut hl = CssHighlighter::new();
    hl.bind(&TargetId::from("style"), String::new);
    let chars: Vec<char> = input.chars().collect();
    let mut flushes = Vec::new();
    for chunk in chars.chunks(size) {
        let chunk: String = chunk.iter().collect();
        flushes.extend(hl.feed_str(&chunk));
    }
    (hl.markup(), flushes)
}

#[test]
fn stripped_markup_reconstructs_every_prefix() {
    for input in CORPUS {
        let mut state = LexState::new();
        let mut consumed = String::new();
        for ch in input.chars() {
            state.push(ch);
            consumed.push(ch);
            assert_eq!(
                strip_markup(&state.markup()).unwrap(),
                consumed,
                "prefix of {input:?}"
            );
        }
    }
}

#[test]
fn finalized_never_holds_an_open_wrapper() {
    for input in CORPUS {
        let mut state = LexState::new();
        for ch in input.chars() {
            state.push(ch);
            assert!(
                strip_markup(state.finalized()).is_ok(),
                "finalized unbalanced in {input:?}"
            );
        }
    }
}

#[test]
fn chunking_does_not_change_the_result() {
    for input in CORPUS {
        let one = feed_in_chunks(input, 1);
        for size in [2, 3, 7, 32] {
            assert_eq!(feed_in_chunks(input, size), one, "chunk {size} of {input:?}");
        }
    }
}

#[test]
fn flushes_end_on_statement_boundaries() {
    for input in CORPUS {
        let (_, flushes) = feed_in_chunks(input, 1);
        for flush in &flushes {
            assert!(flush.ends_with(';'));
            assert_eq!(flush.matches(';').count(), 1, "{flush:?} from {input:?}");
        }
    }
}

#[test]
fn flushes_are_the_source_minus_comments() {
    let input = "/* head; */a{b:c;}/* mid; */d{e:f;}";
    let (_, flushes) = feed_in_chunks(input, 1);
    assert_eq!(flushes, vec!["a{b:c;".to_string(), "}d{e:f;".to_string()]);
}
