//! Annotation output grammar, both serialization forms.

use utok::{emit, AnnotationFormat, Tokenizer, TokenizerOptions};

fn chart(line: &str) -> utok::Chart {
    Tokenizer::new("eng", None, TokenizerOptions::default())
        .expect("resources load")
        .tokenize_with_chart(line)
}

#[test]
fn test_double_colon_scenario() {
    let chart = chart("Capt. O'Connor's car can't've cost $100,000.");
    let text = emit::annotations_double_colon(&chart, 1);
    let expected = "\
::line 1 ::s Capt. O'Connor's car can't've cost $100,000.
::span 0-5 ::type ABBREV ::sem-class military-rank ::surf Capt.
::span 6-14 ::type LEXICAL ::sem-class person-last-name ::surf O'Connor
::span 14-16 ::type DECONTRACTION ::surf 's
::span 17-20 ::type WORD-B ::surf car
::span 21-24 ::type DECONTRACTION ::surf can
::span 24-27 ::type DECONTRACTION ::surf n't
::span 27-29 ::type DECONTRACTION ::surf 've
::span 30-34 ::type WORD-B ::surf cost
::span 35-36 ::type PUNCT-B ::sem-class currency-unit ::surf $
::span 36-43 ::type NUMBER ::surf 100,000
::span 43-44 ::type PUNCT-E ::surf .
";
    assert_eq!(text, expected);
}

#[test]
fn test_json_annotations() {
    let chart = chart("No. 7 waits.");
    let json = emit::annotations_json(&chart, 3);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 4);
    assert_eq!(arr[0]["line"], 3);
    assert_eq!(arr[0]["span"], serde_json::json!([0, 3]));
    assert_eq!(arr[0]["type"], "ABBREV");
    assert_eq!(arr[0]["sem_class"], "number-indicator");
    assert_eq!(arr[0]["surf"], "No.");
    assert_eq!(arr[1]["type"], "NUMBER");
    assert_eq!(arr[2]["surf"], "waits");
    assert_eq!(arr[3]["type"], "PUNCT-E");
}

#[test]
fn test_annotation_format_parsing() {
    assert_eq!("json".parse::<AnnotationFormat>(), Ok(AnnotationFormat::Json));
    assert_eq!(
        "double-colon".parse::<AnnotationFormat>(),
        Ok(AnnotationFormat::DoubleColon)
    );
    assert!("xml".parse::<AnnotationFormat>().is_err());
}

#[test]
fn test_double_colon_escaping() {
    let chart = chart("a::b");
    let text = emit::annotations_double_colon(&chart, 1);
    assert!(text.starts_with("::line 1 ::s a\\:\\:b\n"), "got: {}", text);
}

#[test]
fn test_offsets_are_scalar_positions() {
    // Offsets count Unicode scalars, not bytes.
    let chart = chart("año 42");
    let spans: Vec<(usize, usize)> = chart.tokens().iter().map(|t| (t.start, t.end)).collect();
    assert_eq!(spans, vec![(0, 3), (4, 6)]);
}
