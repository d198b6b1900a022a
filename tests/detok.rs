//! Detokenizer behavior: markup-driven attachment, rule-driven defaults,
//! and decontraction reversal.

use utok::Detokenizer;

fn detok() -> Detokenizer {
    Detokenizer::new("eng", None).expect("resources load")
}

#[test]
fn test_basic_punctuation_attachment() {
    let d = detok();
    assert_eq!(d.detokenize_string("Hello , world ."), "Hello, world.");
    assert_eq!(d.detokenize_string("( inside )"), "(inside)");
    assert_eq!(d.detokenize_string("$ 100 now"), "$100 now");
    assert_eq!(d.detokenize_string("100 % sure"), "100% sure");
}

#[test]
fn test_markup_markers_win() {
    let d = detok();
    assert_eq!(d.detokenize_string("peace @-@ loving"), "peace-loving");
    assert_eq!(d.detokenize_string("( \"@ Hi ! @\" )"), "(\"Hi!\")");
}

#[test]
fn test_handles_are_not_markup() {
    let d = detok();
    assert_eq!(d.detokenize_string("ask @dravid today"), "ask @dravid today");
}

#[test]
fn test_decontraction_reversal() {
    let d = detok();
    assert_eq!(d.detokenize_string("can n't"), "can't");
    assert_eq!(d.detokenize_string("will n't"), "won't");
    assert_eq!(d.detokenize_string("can n't 've"), "can't've");
    assert_eq!(d.detokenize_string("O'Connor 's car"), "O'Connor's car");
    assert_eq!(d.detokenize_string("should n't"), "shouldn't");
}

#[test]
fn test_plain_words_keep_spaces() {
    let d = detok();
    assert_eq!(d.detokenize_string("three plain words"), "three plain words");
    // `you all` must never collapse into `y'all`.
    assert_eq!(d.detokenize_string("you all come"), "you all come");
}

#[test]
fn test_line_id_passthrough() {
    let d = detok().with_first_token_line_id(true);
    assert_eq!(
        d.detokenize_string("GEN:1:1 In the beginning ."),
        "GEN:1:1 In the beginning."
    );
}

#[test]
fn test_empty_line() {
    assert_eq!(detok().detokenize_string(""), "");
}
