//! Number recognition: integers and decimals with thousands grouping in
//! any decimal-digit script.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::chart::TokenType;

use super::{Ctx, StepMatch};

// Alternatives are ordered so grouped forms win over the plain form at the
// same start. `\d` is Unicode-aware, so Devanagari and Arabic-Indic digits
// match throughout. A trailing period is only consumed as a decimal point,
// i.e. when another digit follows, so sentence-final periods survive.
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        [-+]?\d{1,3}(?:,\d{3})+(?:\.\d+)?      # 15,000.00
        | [-+]?\d{1,3}(?:\.\d{3})+(?:,\d+)?    # 15.000,00
        | [-+]?\d{1,3}(?:'\d{3})+(?:\.\d+)?    # 1'000.50
        | [-+]?\d+(?:[.,]\d+)?                 # 42 / 3.14 / 3,14
        ",
    )
    .unwrap()
});

pub fn find_number(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let slice = ctx.line.slice(i, j);
    for m in NUMBER.find_iter(slice) {
        let mut bstart = m.start();
        let text = m.as_str();

        // A sign counts only at the start of a word; elsewhere it is
        // punctuation between words (`3-4`).
        if text.starts_with(['-', '+']) {
            let attached = match slice[..bstart].chars().next_back() {
                Some(c) => !c.is_whitespace(),
                None => i > 0 && !ctx.line.char_at(i - 1).is_whitespace(),
            };
            if attached {
                bstart += 1;
            }
        }

        // Skip digits glued to a preceding word (`AaZ0KP8`); they belong
        // to that word.
        if let Some(prev) = slice[..bstart].chars().next_back() {
            if prev.is_alphanumeric() || prev == '.' || prev == ',' {
                continue;
            }
        }

        let (a, b) = ctx.char_span(i, slice, bstart, m.end());
        if a >= b {
            continue;
        }
        let token = ctx.token(a, b, TokenType::Number);
        return Some(StepMatch::single(token, a, b));
    }
    None
}
