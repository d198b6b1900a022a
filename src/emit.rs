//! Output serialization: the surface token stream and the two annotation
//! forms (JSON and double-colon).

use serde::Serialize;
use std::fmt::Write as _;

use crate::chart::Chart;
use crate::resource::escape;

/// Annotation serialization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotationFormat {
    #[default]
    Json,
    DoubleColon,
}

impl std::str::FromStr for AnnotationFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(AnnotationFormat::Json),
            "double-colon" => Ok(AnnotationFormat::DoubleColon),
            _ => Err(format!("unknown annotation format: {}", s)),
        }
    }
}

/// The surface token stream: tokens separated by single spaces, `@`
/// markers rendered on the marked sides unless `simple`.
pub fn surface(chart: &Chart, simple: bool) -> String {
    let mut out = String::with_capacity(chart.line().len() + chart.tokens().len());
    for token in chart.tokens() {
        if !out.is_empty() {
            out.push(' ');
        }
        if simple {
            out.push_str(&token.surface);
        } else {
            out.push_str(&token.marked_surface());
        }
    }
    out
}

#[derive(Serialize)]
struct TokenAnnotation<'a> {
    line: usize,
    span: [usize; 2],
    #[serde(rename = "type")]
    token_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sem_class: Option<&'a str>,
    surf: &'a str,
}

/// One JSON array of token objects per input line.
pub fn annotations_json(chart: &Chart, line_no: usize) -> String {
    let records: Vec<TokenAnnotation> = chart
        .tokens()
        .iter()
        .map(|t| TokenAnnotation {
            line: line_no,
            span: [t.start, t.end],
            token_type: t.token_type.as_str(),
            sem_class: t.sem_class.as_deref(),
            surf: &t.surface,
        })
        .collect();
    serde_json::to_string(&records).expect("token annotations serialize")
}

/// The double-colon annotation form:
///
/// ```text
/// ::line 1 ::s Capt. O'Connor's car
/// ::span 0-5 ::type ABBREV ::sem-class military-rank ::surf Capt.
/// ```
pub fn annotations_double_colon(chart: &Chart, line_no: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "::line {} ::s {}", line_no, escape(chart.line()));
    for t in chart.tokens() {
        let _ = write!(
            out,
            "::span {}-{} ::type {}",
            t.start,
            t.end,
            t.token_type.as_str()
        );
        if let Some(sem) = &t.sem_class {
            let _ = write!(out, " ::sem-class {}", escape(sem));
        }
        let _ = writeln!(out, " ::surf {}", escape(&t.surface));
    }
    out
}

/// Dispatch on the configured format.
pub fn annotations(chart: &Chart, line_no: usize, format: AnnotationFormat) -> String {
    match format {
        AnnotationFormat::Json => {
            let mut s = annotations_json(chart, line_no);
            s.push('\n');
            s
        }
        AnnotationFormat::DoubleColon => annotations_double_colon(chart, line_no),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Token, TokenType};

    fn sample_chart() -> Chart {
        let mut chart = Chart::new("No. 5");
        let mut abbrev = Token::new(0, 3, "No.", TokenType::Abbrev);
        abbrev.sem_class = Some("number-indicator".to_string());
        chart.push(abbrev);
        chart.push(Token::new(4, 5, "5", TokenType::Number));
        chart
    }

    #[test]
    fn test_surface_simple_strips_markup() {
        let mut chart = Chart::new("a-b");
        chart.push(Token::new(0, 1, "a", TokenType::WordB));
        let mut dash = Token::new(1, 2, "-", TokenType::Punct);
        dash.markup_left = true;
        dash.markup_right = true;
        chart.push(dash);
        chart.push(Token::new(2, 3, "b", TokenType::WordI));
        assert_eq!(surface(&chart, false), "a @-@ b");
        assert_eq!(surface(&chart, true), "a - b");
    }

    #[test]
    fn test_double_colon_grammar() {
        let text = annotations_double_colon(&sample_chart(), 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "::line 1 ::s No. 5");
        assert_eq!(
            lines[1],
            "::span 0-3 ::type ABBREV ::sem-class number-indicator ::surf No."
        );
        assert_eq!(lines[2], "::span 4-5 ::type NUMBER ::surf 5");
    }

    #[test]
    fn test_json_annotation_shape() {
        let json = annotations_json(&sample_chart(), 7);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["line"], 7);
        assert_eq!(parsed[0]["span"][1], 3);
        assert_eq!(parsed[0]["type"], "ABBREV");
        assert_eq!(parsed[1].get("sem_class"), None);
        assert_eq!(parsed[1]["surf"], "5");
    }
}
