//! Exact-match recognizers backed by the resource tables: lexical
//! expressions, abbreviations, contractions, repairs, and misspellings.

use crate::bits::CharBits;
use crate::chart::{Token, TokenType};
use crate::resource::fold;
use crate::resource::rules::ContractionRule;

use super::{at_word_boundary, ends_word, is_word_char, Ctx, StepMatch};

/// Preserve a lexical multi-word or hyphenated expression (`T-shirt`,
/// `brother-in-law`, `Xi'an`). Case-insensitive unless the entry says
/// otherwise; the entry's sem-class is copied onto the token.
pub fn find_lexical(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let lens = ctx.store.lexical_lens();
    if lens.is_empty() {
        return None;
    }
    for p in i..j {
        let c = ctx.line.char_at(p);
        let starts = c.is_alphanumeric() || ctx.line.bits().at(p).has_any(CharBits::APOSTROPHE);
        if !starts || !at_word_boundary(ctx, i, p) {
            continue;
        }
        for &len in lens {
            if p + len > j {
                continue;
            }
            let expr = ctx.line.slice(p, p + len);
            let Some(rule) = ctx.store.lexical(expr) else {
                continue;
            };
            if !ends_word(ctx, j, p + len) {
                continue;
            }
            if !rule
                .common
                .context
                .matches(ctx.line.slice(i, p), ctx.line.slice(p + len, j))
            {
                continue;
            }
            let mut token = ctx.token(p, p + len, rule.token_type);
            token.sem_class = rule.common.sem_class.clone();
            return Some(StepMatch::single(token, p, p + len));
        }
    }
    None
}

/// Longest-match abbreviation lookup, honoring the rule's context regexes
/// (`No.` only before digits) and case sensitivity.
pub fn find_abbrev(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let lens = ctx.store.abbrev_lens();
    if lens.is_empty() {
        return None;
    }
    for p in i..j {
        if !ctx.line.char_at(p).is_alphabetic() || !at_word_boundary(ctx, i, p) {
            continue;
        }
        for &len in lens {
            if p + len > j {
                continue;
            }
            let candidate = ctx.line.slice(p, p + len);
            let Some(rule) = ctx.store.abbrev(candidate) else {
                continue;
            };
            if !ends_word(ctx, j, p + len) {
                continue;
            }
            if !rule
                .common
                .context
                .matches(ctx.line.slice(i, p), ctx.line.slice(p + len, j))
            {
                continue;
            }
            let mut token = ctx.token(p, p + len, TokenType::Abbrev);
            token.sem_class = rule.common.sem_class.clone();
            return Some(StepMatch::single(token, p, p + len));
        }
    }
    None
}

fn is_contraction_char(ctx: &Ctx, pos: usize) -> bool {
    is_word_char(ctx, pos) || ctx.line.bits().at(pos).has_any(CharBits::APOSTROPHE)
}

/// Decontract: whole-word table entries emit two or three pieces with the
/// normalized target surfaces; side-keyed entries detach a suffix (`'s`)
/// or a prefix (`l'`, which re-attaches rightward on reconstruction).
pub fn find_contraction(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let mut p = i;
    while p < j {
        if !is_contraction_char(ctx, p) {
            p += 1;
            continue;
        }
        let w0 = p;
        let mut w1 = p;
        while w1 < j && is_contraction_char(ctx, w1) {
            w1 += 1;
        }
        p = w1;
        if let Some(m) = match_contraction_word(ctx, i, j, w0, w1) {
            return Some(m);
        }
    }
    None
}

fn rule_matches_surface(rule: &ContractionRule, text: &str) -> bool {
    if rule.common.case_sensitive {
        rule.surface == text
    } else {
        fold(&rule.surface) == fold(text)
    }
}

fn match_contraction_word(
    ctx: &Ctx,
    i: usize,
    j: usize,
    w0: usize,
    w1: usize,
) -> Option<StepMatch> {
    let word = ctx.line.slice(w0, w1);
    let word_len = w1 - w0;

    if let Some(rule) = ctx.store.contraction_word(word) {
        if rule
            .common
            .context
            .matches(ctx.line.slice(i, w0), ctx.line.slice(w1, j))
        {
            let pieces: Vec<&str> = rule.target.split(' ').collect();
            if let Some(spans) = split_proportional(w0, w1, &pieces) {
                let tokens: Vec<Token> = pieces
                    .iter()
                    .zip(spans)
                    .map(|(piece, (a, b))| {
                        ctx.token_with_surface(a, b, *piece, TokenType::Decontraction)
                    })
                    .collect();
                return Some(StepMatch {
                    start: w0,
                    end: w1,
                    tokens,
                });
            }
        }
    }

    for rule in ctx.store.contraction_prefixes() {
        let plen = rule.surface.chars().count();
        if plen >= word_len || !rule_matches_surface(rule, ctx.line.slice(w0, w0 + plen)) {
            continue;
        }
        if !ctx.line.char_at(w0 + plen).is_alphabetic() {
            continue;
        }
        if !rule
            .common
            .context
            .matches(ctx.line.slice(i, w0), ctx.line.slice(w0 + plen, j))
        {
            continue;
        }
        let token =
            ctx.token_with_surface(w0, w0 + plen, rule.target.clone(), TokenType::DecontractionR);
        return Some(StepMatch::single(token, w0, w0 + plen));
    }

    for rule in ctx.store.contraction_suffixes() {
        let slen = rule.surface.chars().count();
        if slen >= word_len || !rule_matches_surface(rule, ctx.line.slice(w1 - slen, w1)) {
            continue;
        }
        // The stem left behind must be a real word.
        let stem = ctx.line.slice(w0, w1 - slen);
        if !stem.chars().any(char::is_alphabetic) {
            continue;
        }
        if !rule
            .common
            .context
            .matches(ctx.line.slice(i, w1 - slen), ctx.line.slice(w1, j))
        {
            continue;
        }
        let token =
            ctx.token_with_surface(w1 - slen, w1, rule.target.clone(), TokenType::Decontraction);
        return Some(StepMatch::single(token, w1 - slen, w1));
    }

    None
}

/// Allocate the original span `[w0, w1)` across target pieces in
/// proportion to their lengths. Fractional boundaries round up, so ties go
/// to the left piece; every piece keeps at least one character.
fn split_proportional(w0: usize, w1: usize, pieces: &[&str]) -> Option<Vec<(usize, usize)>> {
    let span = w1 - w0;
    let n = pieces.len();
    if n == 0 || span < n {
        return None;
    }
    let total: usize = pieces.iter().map(|p| p.chars().count()).sum();
    if total == 0 {
        return None;
    }

    let mut spans = Vec::with_capacity(n);
    let mut prev = w0;
    let mut cum = 0usize;
    for (idx, piece) in pieces.iter().enumerate() {
        cum += piece.chars().count();
        let remaining = n - idx - 1;
        let b = w0 + (span * cum + total - 1) / total;
        let b = b.clamp(prev + 1, w1 - remaining);
        spans.push((prev, b));
        prev = b;
    }
    Some(spans)
}

/// Rewrite a previously mistokenized fragment (`wo n't` -> `will n't`,
/// `U.S` -> `U.S.`). Keys may span several whitespace-delimited words.
pub fn find_repair(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let max_words = ctx.store.repair_max_words();
    if max_words == 0 {
        return None;
    }
    let words = collect_words(ctx, i, j);
    for wi in 0..words.len() {
        let upper = max_words.min(words.len() - wi);
        for wc in (1..=upper).rev() {
            let frag_start = words[wi].0;
            let frag_end = words[wi + wc - 1].1;
            let fragment = join_words(ctx, &words[wi..wi + wc]);
            let Some(rule) = ctx.store.repair(&fragment) else {
                continue;
            };
            if !rule
                .common
                .context
                .matches(ctx.line.slice(i, frag_start), ctx.line.slice(frag_end, j))
            {
                continue;
            }
            let pieces: Vec<&str> = rule.target.split(' ').collect();
            let default_type = if wc > 1 {
                TokenType::Decontraction
            } else {
                TokenType::WordB
            };
            let token_type = rule.token_type.unwrap_or(default_type);
            let tokens: Vec<Token> = if pieces.len() == wc {
                pieces
                    .iter()
                    .zip(&words[wi..wi + wc])
                    .map(|(piece, &(a, b))| ctx.token_with_surface(a, b, *piece, token_type))
                    .collect()
            } else {
                vec![ctx.token_with_surface(
                    frag_start,
                    frag_end,
                    rule.target.clone(),
                    token_type,
                )]
            };
            return Some(StepMatch {
                start: frag_start,
                end: frag_end,
                tokens,
            });
        }
    }
    None
}

/// Rewrite a known misspelling to its target form.
pub fn find_misspelling(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let mut p = i;
    while p < j {
        if !is_word_char(ctx, p) {
            p += 1;
            continue;
        }
        let w0 = p;
        let mut w1 = p;
        while w1 < j && is_word_char(ctx, w1) {
            w1 += 1;
        }
        p = w1;
        let word = ctx.line.slice(w0, w1);
        let Some(rule) = ctx.store.misspelling(word) else {
            continue;
        };
        if !rule
            .common
            .context
            .matches(ctx.line.slice(i, w0), ctx.line.slice(w1, j))
        {
            continue;
        }
        let token = ctx.token_with_surface(w0, w1, rule.target.clone(), TokenType::WordB);
        return Some(StepMatch::single(token, w0, w1));
    }
    None
}

/// Whitespace-delimited word spans within `[i, j)`.
fn collect_words(ctx: &Ctx, i: usize, j: usize) -> Vec<(usize, usize)> {
    let mut words = Vec::new();
    let mut p = i;
    while p < j {
        if ctx.line.char_at(p) == ' ' {
            p += 1;
            continue;
        }
        let s = p;
        while p < j && ctx.line.char_at(p) != ' ' {
            p += 1;
        }
        words.push((s, p));
    }
    words
}

fn join_words(ctx: &Ctx, words: &[(usize, usize)]) -> String {
    words
        .iter()
        .map(|&(a, b)| ctx.line.slice(a, b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_proportional_even() {
        // "can't" (5 chars) into "can" + "n't"
        let spans = split_proportional(0, 5, &["can", "n't"]).unwrap();
        assert_eq!(spans, vec![(0, 3), (3, 5)]);
    }

    #[test]
    fn test_split_proportional_ties_go_left() {
        // "won't" (5 chars) into "will" + "n't": 4/7 of 5 is 2.86, the
        // left piece rounds up to 3.
        let spans = split_proportional(0, 5, &["will", "n't"]).unwrap();
        assert_eq!(spans, vec![(0, 3), (3, 5)]);
    }

    #[test]
    fn test_split_proportional_three_pieces() {
        // "can't've" (8 chars) into three pieces
        let spans = split_proportional(0, 8, &["can", "n't", "'ve"]).unwrap();
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].0, 0);
        assert_eq!(spans[2].1, 8);
        for (a, b) in &spans {
            assert!(a < b);
        }
    }

    #[test]
    fn test_split_proportional_rejects_short_span() {
        assert!(split_proportional(0, 2, &["a", "b", "c"]).is_none());
    }
}
