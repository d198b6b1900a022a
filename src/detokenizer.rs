//! Detokenizer: the inverse of the pipeline.
//!
//! Consumes a space-separated token stream (with or without `@` attachment
//! markers) and reconstructs running text. Attachment between neighbors is
//! decided from, in order: explicit `@` markers, `detok-resource.txt`
//! rules keyed by surface and side, and defaults by punctuation class.
//! Decontraction pieces re-join through the reversal map derived from the
//! contraction tables (`can n't 've` -> `can't've`, `will n't` -> `won't`).

use std::path::Path;
use std::sync::Arc;

use crate::bits::{char_bits, CharBits};
use crate::error::{ResourceError, Warning};
use crate::resource::rules::Side;
use crate::resource::{default_data_dir, ResourceStore};

/// Punctuation that attaches to its left neighbor by default.
const CLOSING: &[char] = &[
    '.', ',', ';', ':', '!', '?', '%', ')', ']', '}', '»', '\u{201D}', '\u{2019}', '\u{2026}',
];
/// Punctuation and currency that attach to their right neighbor by default.
const OPENING: &[char] = &[
    '(', '[', '{', '«', '\u{201C}', '\u{2018}', '¿', '¡', '$', '\u{20AC}', '£', '¥',
];

/// A configured detokenizer.
#[derive(Clone)]
pub struct Detokenizer {
    store: Arc<ResourceStore>,
    lcode: String,
    warnings: Vec<Warning>,
    first_token_is_line_id: bool,
}

/// One parsed input token with its explicit attachment markers.
#[derive(Debug, Clone)]
struct Piece {
    surface: String,
    attach_left: bool,
    attach_right: bool,
}

impl Detokenizer {
    /// Build a detokenizer for `lcode` from the data files in `data_dir`
    /// (the crate's bundled `data/` when `None`).
    pub fn new(lcode: &str, data_dir: Option<&Path>) -> Result<Self, ResourceError> {
        let dir = data_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(default_data_dir);
        let (store, warnings) = ResourceStore::load(&dir, lcode)?;
        Ok(Self {
            store: Arc::new(store),
            lcode: lcode.to_string(),
            warnings,
            first_token_is_line_id: false,
        })
    }

    /// Pass the first whitespace-delimited field of each line through
    /// unchanged.
    pub fn with_first_token_line_id(mut self, yes: bool) -> Self {
        self.first_token_is_line_id = yes;
        self
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn lcode(&self) -> &str {
        &self.lcode
    }

    /// Reconstruct running text from one tokenized line.
    pub fn detokenize_string(&self, line: &str) -> String {
        let mut fields = line.split_whitespace();
        let mut out = String::with_capacity(line.len());

        if self.first_token_is_line_id {
            if let Some(id) = fields.next() {
                out.push_str(id);
            }
        }

        let mut pieces: Vec<Piece> = fields.map(parse_piece).collect();
        pieces = self.rejoin_contractions(pieces);

        let mut prev: Option<&Piece> = None;
        for piece in &pieces {
            if let Some(prev) = prev {
                if !self.attaches(prev, piece, &out) {
                    out.push(' ');
                }
            } else if !out.is_empty() {
                // After a line id the original separator is gone; a single
                // space stands in for it.
                out.push(' ');
            }
            out.push_str(&piece.surface);
            prev = Some(piece);
        }
        out
    }

    /// Collapse adjacent decontraction pieces back into their contracted
    /// surface, longest window first.
    fn rejoin_contractions(&self, pieces: Vec<Piece>) -> Vec<Piece> {
        let max_words = self.store.rejoin_max_words();
        if max_words < 2 {
            return pieces;
        }
        let mut out: Vec<Piece> = Vec::with_capacity(pieces.len());
        let mut k = 0;
        while k < pieces.len() {
            let mut joined = None;
            let upper = max_words.min(pieces.len() - k);
            for w in (2..=upper).rev() {
                let window = &pieces[k..k + w];
                let key = window
                    .iter()
                    .map(|p| p.surface.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                if let Some(orig) = self.store.rejoin(&key) {
                    joined = Some(Piece {
                        surface: orig.to_string(),
                        attach_left: window[0].attach_left,
                        attach_right: window[w - 1].attach_right,
                    });
                    k += w;
                    break;
                }
            }
            match joined {
                Some(p) => out.push(p),
                None => {
                    out.push(pieces[k].clone());
                    k += 1;
                }
            }
        }
        out
    }

    /// Does `cur` join onto `prev` without a space?
    fn attaches(&self, prev: &Piece, cur: &Piece, written: &str) -> bool {
        if prev.attach_right || cur.attach_left {
            return true;
        }

        for rule in self.store.detok_rules(&cur.surface) {
            if matches!(rule.side, Side::Start | Side::Both)
                && rule.common.context.left_matches(written)
            {
                return true;
            }
        }
        for rule in self.store.detok_rules(&prev.surface) {
            if matches!(rule.side, Side::End | Side::Both)
                && rule.common.context.right_matches(&cur.surface)
            {
                return true;
            }
        }

        default_attach(prev, cur)
    }
}

/// Strip `@` attachment markers from a raw token. A leading or trailing
/// `@` is a marker only when what remains starts (or ends) with something
/// other than a word character, so handles like `@dravid` survive intact.
fn parse_piece(raw: &str) -> Piece {
    let mut surface = raw.to_string();
    let mut attach_left = false;
    let mut attach_right = false;

    if surface.len() > 1 && surface.starts_with('@') {
        let rest = &surface[1..];
        if !rest.chars().next().map(char::is_alphanumeric).unwrap_or(true) {
            attach_left = true;
            surface = rest.to_string();
        }
    }
    if surface.len() > 1 && surface.ends_with('@') {
        let rest = &surface[..surface.len() - 1];
        if !rest.chars().next_back().map(char::is_alphanumeric).unwrap_or(true) {
            attach_right = true;
            surface = rest.to_string();
        }
    }

    Piece {
        surface,
        attach_left,
        attach_right,
    }
}

fn default_attach(prev: &Piece, cur: &Piece) -> bool {
    // Closing punctuation hugs the preceding token; opening punctuation
    // and currency hug the following one.
    if cur.surface.chars().all(|c| CLOSING.contains(&c)) {
        return true;
    }
    if prev.surface.chars().all(|c| OPENING.contains(&c)) {
        return true;
    }

    // Suffix decontractions: 's, 'll, 've, 'd after a word.
    let cur_chars: Vec<char> = cur.surface.chars().collect();
    if cur_chars.len() <= 4
        && char_bits(cur_chars[0]).has_any(CharBits::APOSTROPHE)
        && cur_chars[1..].iter().all(|c| c.is_alphabetic())
        && prev
            .surface
            .chars()
            .next_back()
            .map(char::is_alphabetic)
            .unwrap_or(false)
    {
        return true;
    }

    // Prefix decontractions: l', qu' before a word.
    let mut prev_chars = prev.surface.chars();
    let prev_first = prev_chars.next();
    let prev_last = prev.surface.chars().next_back();
    if let (Some(first), Some(last)) = (prev_first, prev_last) {
        if first.is_alphabetic()
            && char_bits(last).has_any(CharBits::APOSTROPHE)
            && prev.surface.chars().count() <= 3
            && cur_chars
                .first()
                .map(|c| c.is_alphabetic())
                .unwrap_or(false)
        {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_piece_markers() {
        let p = parse_piece("@-@");
        assert_eq!(p.surface, "-");
        assert!(p.attach_left && p.attach_right);

        let p = parse_piece("\"@");
        assert_eq!(p.surface, "\"");
        assert!(!p.attach_left && p.attach_right);

        let p = parse_piece("@\"");
        assert_eq!(p.surface, "\"");
        assert!(p.attach_left && !p.attach_right);
    }

    #[test]
    fn test_parse_piece_keeps_handles() {
        let p = parse_piece("@dravid");
        assert_eq!(p.surface, "@dravid");
        assert!(!p.attach_left && !p.attach_right);
    }

    #[test]
    fn test_default_attach_punct_classes() {
        let word = parse_piece("word");
        let period = parse_piece(".");
        let open = parse_piece("(");
        let genitive = parse_piece("'s");
        assert!(default_attach(&word, &period));
        assert!(default_attach(&open, &word));
        assert!(default_attach(&word, &genitive));
        assert!(!default_attach(&word, &word));
    }
}
