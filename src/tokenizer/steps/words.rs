//! Emoji/symbol runs and the terminal whitespace split.

use crate::bits::CharBits;
use crate::chart::TokenType;

use super::{is_word_char, Ctx, StepMatch};

const EMOJI_RUN: u64 =
    CharBits::EMOJI | CharBits::REGIONAL_INDICATOR | CharBits::VARIATION_SELECTOR;

/// Maximal run of emoji and symbol characters, including joiner sequences
/// (flags, skin tones, ZWJ families). Combining marks on ordinary letters
/// never start a run.
pub fn find_emoji(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let bits = ctx.line.bits();
    let mut p = i;
    while p < j {
        if !bits
            .at(p)
            .has_any(CharBits::EMOJI | CharBits::REGIONAL_INDICATOR)
        {
            p += 1;
            continue;
        }
        let mut e = p + 1;
        loop {
            if e < j && bits.at(e).has_any(EMOJI_RUN) {
                e += 1;
            } else if e + 1 < j
                && bits.at(e).has_any(CharBits::ZWJ)
                && bits.at(e + 1).has_any(EMOJI_RUN)
            {
                e += 2;
            } else {
                break;
            }
        }
        let token = ctx.token(p, e, TokenType::EmojiSeq);
        return Some(StepMatch::single(token, p, e));
    }
    None
}

/// Final fallthrough: split the remaining span on whitespace. Pieces with
/// word characters become words (WORD-B/WORD-I is resolved once the whole
/// line is assembled); anything else is MISC. Zero-width non-joiners are
/// not whitespace, so words containing them stay together.
pub fn split_whitespace(ctx: &Ctx, i: usize, j: usize) -> StepMatch {
    let mut tokens = Vec::new();
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
        let token_type = if (s..p).any(|q| is_word_char(ctx, q)) {
            TokenType::WordB
        } else {
            TokenType::Misc
        };
        tokens.push(ctx.token(s, p, token_type));
    }
    StepMatch {
        start: i,
        end: j,
        tokens,
    }
}
