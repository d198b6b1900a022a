//! The tokenization pipeline.
//!
//! One input line is normalized, its feature vectors are computed once,
//! and the ordered steps are applied to the current span: a step either
//! finds a recognizable token somewhere in the span and the driver recurses
//! on the residues to its left and right, or it delegates to the next step.
//! The terminal whitespace split guarantees every span is consumed.

pub mod steps;

use std::path::Path;
use std::sync::Arc;

use crate::chart::{Chart, Token, TokenType};
use crate::emit::AnnotationFormat;
use crate::error::{ResourceError, Warning};
use crate::normalize::NormLine;
use crate::resource::rules::Side;
use crate::resource::{default_data_dir, fold, ResourceStore};

use steps::{Ctx, STEPS};

/// Caller-selected behavior, shared by the tokenizer and the emitters.
#[derive(Debug, Clone, Default)]
pub struct TokenizerOptions {
    /// Treat the first whitespace-delimited field of each line as an
    /// opaque line identifier.
    pub first_token_is_line_id: bool,
    /// Suppress `@` attachment markers in surface output.
    pub simple: bool,
    /// Serialization form for annotation output.
    pub annotation_format: AnnotationFormat,
    /// Emit chart annotations instead of the surface stream.
    pub chart: bool,
    pub verbose: bool,
}

/// A configured tokenizer. Cheap to clone; the resource store is shared
/// read-only, so clones can tokenize on separate threads.
#[derive(Clone)]
pub struct Tokenizer {
    store: Arc<ResourceStore>,
    options: TokenizerOptions,
    lcode: String,
    warnings: Vec<Warning>,
}

impl Tokenizer {
    /// Build a tokenizer for `lcode` from the data files in `data_dir`
    /// (the crate's bundled `data/` when `None`).
    pub fn new(
        lcode: &str,
        data_dir: Option<&Path>,
        options: TokenizerOptions,
    ) -> Result<Self, ResourceError> {
        let dir = data_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(default_data_dir);
        let (store, warnings) = ResourceStore::load(&dir, lcode)?;
        Ok(Self {
            store: Arc::new(store),
            options,
            lcode: lcode.to_string(),
            warnings,
        })
    }

    /// Warnings collected while loading resources.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn lcode(&self) -> &str {
        &self.lcode
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// Tokenize one line into its surface stream.
    pub fn tokenize_string(&self, line: &str) -> String {
        crate::emit::surface(&self.tokenize_with_chart(line), self.options.simple)
    }

    /// Tokenize one line into a chart with spans, types, sem-classes, and
    /// markup.
    pub fn tokenize_with_chart(&self, line: &str) -> Chart {
        let norm = NormLine::new(line);
        let ctx = Ctx {
            line: &norm,
            store: self.store.as_ref(),
        };

        let mut tokens = Vec::new();
        let mut start = 0;
        if self.options.first_token_is_line_id {
            if let Some((a, b)) = first_field(&norm) {
                tokens.push(ctx.token(a, b, TokenType::LineId));
                start = b;
            }
        }
        run_span(&ctx, start, norm.len(), 0, &mut tokens);

        let line_chars: Vec<char> = line.chars().collect();
        self.apply_auto_attach(&line_chars, &mut tokens);
        assign_word_positions(&mut tokens);

        let mut chart = Chart::new(line);
        chart.set_deletions(norm.deleted().to_vec());
        chart.extend(tokens);
        chart
    }

    /// Auto-attach rules: context-keyed `@` markers (ordinal `th` after a
    /// digit). Surface-keyed markup-attach rules take precedence, so any
    /// token they key is skipped here.
    fn apply_auto_attach(&self, line_chars: &[char], tokens: &mut [Token]) {
        let rules = self.store.auto_attach_rules();
        if rules.is_empty() {
            return;
        }
        for token in tokens.iter_mut() {
            if !self.store.markup_rules(&token.surface).is_empty() {
                continue;
            }
            for rule in rules {
                let surface_matches = if rule.common.case_sensitive {
                    token.surface == rule.surface
                } else {
                    fold(&token.surface) == fold(&rule.surface)
                };
                if !surface_matches {
                    continue;
                }
                let left: String = line_chars[..token.start].iter().collect();
                let right: String = line_chars[token.end.min(line_chars.len())..]
                    .iter()
                    .collect();
                let attached_left = token.start > 0 && !line_chars[token.start - 1].is_whitespace();
                let attached_right =
                    token.end < line_chars.len() && !line_chars[token.end].is_whitespace();
                match rule.side {
                    Side::Start => {
                        if attached_left && rule.common.context.left_matches(&left) {
                            token.markup_left = true;
                        }
                    }
                    Side::End => {
                        if attached_right && rule.common.context.right_matches(&right) {
                            token.markup_right = true;
                        }
                    }
                    Side::Both => {
                        if attached_left
                            && attached_right
                            && rule.common.context.matches(&left, &right)
                        {
                            token.markup_left = true;
                            token.markup_right = true;
                        }
                    }
                }
            }
        }
    }
}

/// The recursive span driver. Steps fall through in order; on a match the
/// residues restart per the step's policy.
fn run_span(ctx: &Ctx, i: usize, j: usize, k: usize, out: &mut Vec<Token>) {
    if i >= j {
        return;
    }
    let span_vector = ctx.line.bits().span_vector(i, j);
    for (step_idx, step) in STEPS.iter().enumerate().skip(k) {
        // A full mask means the step runs unconditionally; the terminal
        // whitespace split must fire even for spans whose characters
        // carry no feature bits at all.
        let mask = step.guard_mask();
        if mask != u64::MAX && !span_vector.has_any(mask) {
            continue;
        }
        if let Some(m) = step.find(ctx, i, j) {
            debug_assert!(i <= m.start && m.start < m.end && m.end <= j);
            let next = if step.restarts() { 0 } else { step_idx + 1 };
            run_span(ctx, i, m.start, next, out);
            out.extend(m.tokens);
            run_span(ctx, m.end, j, next, out);
            return;
        }
    }
}

/// Span of the first whitespace-delimited field, if any.
fn first_field(norm: &NormLine) -> Option<(usize, usize)> {
    let mut a = 0;
    while a < norm.len() && norm.char_at(a) == ' ' {
        a += 1;
    }
    if a == norm.len() {
        return None;
    }
    let mut b = a;
    while b < norm.len() && norm.char_at(b) != ' ' {
        b += 1;
    }
    Some((a, b))
}

/// A word token directly abutting its predecessor is an interior piece of
/// a split run; a word after a gap begins the run.
fn assign_word_positions(tokens: &mut [Token]) {
    for idx in 1..tokens.len() {
        if tokens[idx].token_type.is_word() && tokens[idx - 1].end == tokens[idx].start {
            tokens[idx].token_type = TokenType::WordI;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_field() {
        let norm = NormLine::new("GEN:1:1\tIn the beginning");
        assert_eq!(first_field(&norm), Some((0, 7)));
        let norm = NormLine::new("   ");
        assert_eq!(first_field(&norm), None);
    }

    #[test]
    fn test_assign_word_positions() {
        let mut tokens = vec![
            Token::new(0, 5, "peace", TokenType::WordB),
            Token::new(5, 6, "-", TokenType::Punct),
            Token::new(6, 12, "loving", TokenType::WordB),
            Token::new(13, 20, "T-shirt", TokenType::WordB),
        ];
        assign_word_positions(&mut tokens);
        assert_eq!(tokens[0].token_type, TokenType::WordB);
        assert_eq!(tokens[2].token_type, TokenType::WordI);
        assert_eq!(tokens[3].token_type, TokenType::WordB);
    }
}
