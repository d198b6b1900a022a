//! Punctuation splitting and attachment markup.
//!
//! Each punctuation character with a `punct-split` rule is detached at the
//! side the rule names, with `group True` keeping runs of the same
//! character together (`!!!`). When a `markup-attach` rule matches the
//! split token's context, the token carries `@` on the matched side(s) so
//! the detokenizer can restore the original adjacency.

use crate::chart::{Token, TokenType};
use crate::resource::rules::Side;

use super::{Ctx, StepMatch};

pub fn find_punct_split(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let mut p = i;
    while p < j {
        let c = ctx.line.char_at(p);
        let rules = ctx.store.punct_rules(c);
        if rules.is_empty() {
            p += 1;
            continue;
        }

        for rule in rules {
            let mut pe = p + 1;
            if rule.group {
                while pe < j && ctx.line.char_at(pe) == c {
                    pe += 1;
                }
            }
            let at_word_start = p == i || ctx.line.char_at(p - 1) == ' ';
            let at_word_end = pe == j || ctx.line.char_at(pe) == ' ';
            let applies = match rule.side {
                Side::Start => at_word_start,
                Side::End => at_word_end,
                Side::Both => true,
            };
            if !applies {
                continue;
            }
            if !rule
                .common
                .context
                .matches(ctx.line.slice(i, p), ctx.line.slice(pe, j))
            {
                continue;
            }
            let mut token = ctx.token(p, pe, punct_type(ctx, p, pe));
            token.sem_class = rule.common.sem_class.clone();
            apply_markup(ctx, &mut token, i, j, p, pe);
            return Some(StepMatch::single(token, p, pe));
        }

        p += 1;
    }
    None
}

/// Classify a punctuation token by its adjacency in the full line:
/// attached to the following word, to the preceding word, to both, or
/// standing alone.
fn punct_type(ctx: &Ctx, p: usize, pe: usize) -> TokenType {
    let left_attached = p > 0 && !ctx.line.char_at(p - 1).is_whitespace();
    let right_attached = pe < ctx.line.len() && !ctx.line.char_at(pe).is_whitespace();
    match (left_attached, right_attached) {
        (false, true) => TokenType::PunctB,
        (true, false) => TokenType::PunctE,
        (true, true) => TokenType::Punct,
        (false, false) => TokenType::PunctS,
    }
}

/// Apply `markup-attach` rules for this surface. A `side both` rule marks
/// both sides only when both context regexes match inside the current
/// span; one-sided rules mark their side independently.
fn apply_markup(ctx: &Ctx, token: &mut Token, i: usize, j: usize, p: usize, pe: usize) {
    let left = ctx.line.slice(i, p);
    let right = ctx.line.slice(pe, j);
    for rule in ctx.store.markup_rules(&token.surface) {
        if !rule.common.context.matches(left, right) {
            continue;
        }
        match rule.side {
            Side::Start => token.markup_left = true,
            Side::End => token.markup_right = true,
            Side::Both => {
                token.markup_left = true;
                token.markup_right = true;
            }
        }
    }
}
