//! End-to-end surface scenarios: one input line in, one token stream out.

use rstest::rstest;
use utok::{Tokenizer, TokenizerOptions};

fn tokenizer(lcode: &str) -> Tokenizer {
    Tokenizer::new(lcode, None, TokenizerOptions::default()).expect("resources load")
}

fn tokenizer_with(lcode: &str, options: TokenizerOptions) -> Tokenizer {
    Tokenizer::new(lcode, None, options).expect("resources load")
}

#[rstest]
#[case(
    "Capt. O'Connor's car can't've cost $100,000.",
    "Capt. O'Connor 's car can n't 've cost $ 100,000 ."
)]
#[case(
    "Mr. Miller (Mary's ex-brother-in-law) can't afford $15,000.00.",
    "Mr. Miller ( Mary 's ex - brother-in-law ) can n't afford $ 15,000.00 ."
)]
#[case("(\"Hello,world!\")", "( \"@ Hello , world ! @\" )")]
#[case(
    "Visit https://www.youtube.com/watch?v=AaZ_RSt0KP8 or email a.almukhanov@energo.gov.kz.",
    "Visit https://www.youtube.com/watch?v=AaZ_RSt0KP8 or email a.almukhanov@energo.gov.kz ."
)]
#[case("peace-loving T-shirt", "peace @-@ loving T-shirt")]
fn test_english_surface(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(tokenizer("eng").tokenize_string(input), expected);
}

#[test]
fn test_line_id_mode() {
    let options = TokenizerOptions {
        first_token_is_line_id: true,
        ..Default::default()
    };
    let tok = tokenizer_with("eng", options);
    assert_eq!(
        tok.tokenize_string("GEN:1:1\tIn the beginning, God created the heavens."),
        "GEN:1:1 In the beginning , God created the heavens ."
    );
}

#[test]
fn test_simple_mode_strips_markers() {
    let options = TokenizerOptions {
        simple: true,
        ..Default::default()
    };
    let tok = tokenizer_with("eng", options);
    assert_eq!(tok.tokenize_string("peace-loving T-shirt"), "peace - loving T-shirt");
    assert_eq!(
        tok.tokenize_string("(\"Hello,world!\")"),
        "( \" Hello , world ! \" )"
    );
}

#[rstest]
#[case("Watch #2 and #throwback now", "Watch #2 and #throwback now")]
#[case("thanks @dravid for the tip", "thanks @dravid for the tip")]
#[case("see <a href=\"x.html\">here</a>", "see <a href=\"x.html\"> here </a>")]
#[case("open report.pdf now", "open report.pdf now")]
#[case("Nos. 3 and 4", "Nos. 3 and 4")]
#[case("No. Not today.", "No . Not today .")]
#[case("Wait!!! Really???", "Wait !!! Really ???")]
#[case("the U.S economy", "the U.S. economy")]
#[case("he said wo n't again", "he said will n't again")]
fn test_construct_recognition(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(tokenizer("eng").tokenize_string(input), expected, "input {:?}", input);
}

#[test]
fn test_misspelling_rewrite() {
    assert_eq!(
        tokenizer("eng").tokenize_string("teh seperate report"),
        "the separate report"
    );
}

#[test]
fn test_french_elision_with_lcode() {
    let tok = tokenizer("fra");
    assert_eq!(tok.tokenize_string("l'homme de qu'avec"), "l' homme de qu' avec");
}

#[test]
fn test_french_rules_inert_for_english() {
    // l' is lcode fra; with eng the word stays whole.
    assert_eq!(tokenizer("eng").tokenize_string("l'homme"), "l'homme");
}

#[test]
fn test_universal_equals_english_on_neutral_input() {
    let input = "ein Haus am See .";
    assert_eq!(
        tokenizer("").tokenize_string(input),
        tokenizer("eng").tokenize_string(input)
    );
}

#[test]
fn test_unknown_lcode_warns_and_falls_back() {
    let tok = tokenizer("xyz");
    assert!(tok
        .warnings()
        .iter()
        .any(|w| w.to_string().contains("falling back")));
    assert_eq!(tok.tokenize_string("a test ."), "a test .");
}

#[test]
fn test_chart_types_and_spans() {
    use utok::TokenType;

    let chart = tokenizer("eng").tokenize_with_chart("Capt. O'Connor's car can't've cost $100,000.");
    assert!(chart.finalize().is_ok());

    let summary: Vec<(usize, usize, TokenType, &str)> = chart
        .tokens()
        .iter()
        .map(|t| (t.start, t.end, t.token_type, t.surface.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, 5, TokenType::Abbrev, "Capt."),
            (6, 14, TokenType::Lexical, "O'Connor"),
            (14, 16, TokenType::Decontraction, "'s"),
            (17, 20, TokenType::WordB, "car"),
            (21, 24, TokenType::Decontraction, "can"),
            (24, 27, TokenType::Decontraction, "n't"),
            (27, 29, TokenType::Decontraction, "'ve"),
            (30, 34, TokenType::WordB, "cost"),
            (35, 36, TokenType::PunctB, "$"),
            (36, 43, TokenType::Number, "100,000"),
            (43, 44, TokenType::PunctE, "."),
        ]
    );

    let sem: Vec<Option<&str>> = chart.tokens().iter().map(|t| t.sem_class.as_deref()).collect();
    assert_eq!(sem[0], Some("military-rank"));
    assert_eq!(sem[8], Some("currency-unit"));
}

#[test]
fn test_word_positions_after_splits() {
    use utok::TokenType;

    let chart = tokenizer("eng").tokenize_with_chart("peace-loving T-shirt");
    let types: Vec<TokenType> = chart.tokens().iter().map(|t| t.token_type).collect();
    assert_eq!(
        types,
        vec![
            TokenType::WordB,
            TokenType::Punct,
            TokenType::WordI,
            TokenType::Lexical,
        ]
    );
}

#[test]
fn test_ordinal_auto_attach() {
    assert_eq!(tokenizer("eng").tokenize_string("the 4th of July"), "the 4 @th of July");
}

#[test]
fn test_emoji_sequence() {
    let surface = tokenizer("eng").tokenize_string("nice \u{1F600}\u{1F600} work");
    assert_eq!(surface, "nice \u{1F600}\u{1F600} work");
    let chart = tokenizer("eng").tokenize_with_chart("nice \u{1F600}\u{1F600} work");
    assert_eq!(chart.tokens()[1].token_type, utok::TokenType::EmojiSeq);
}

#[test]
fn test_empty_and_whitespace_lines() {
    let tok = tokenizer("eng");
    assert_eq!(tok.tokenize_string(""), "");
    assert_eq!(tok.tokenize_string("   "), "");
}

#[test]
fn test_control_characters_deleted() {
    let tok = tokenizer("eng");
    let chart = tok.tokenize_with_chart("a\u{0007}b cd");
    assert!(chart.finalize().is_ok());
    assert_eq!(chart.deletions(), &[1]);
    assert_eq!(utok::emit::surface(&chart, false), "ab cd");
}
