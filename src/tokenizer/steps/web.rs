//! Recognizers for markup and network constructs: XML tags, URLs, email
//! addresses, handles, hashtags, and filename-like tokens.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::chart::TokenType;

use super::{at_word_boundary, Ctx, StepMatch};

/// Longest tag the scanner will consider; anything longer is treated as a
/// stray `<`.
const MAX_XML_TAG_LEN: usize = 256;

/// Match `<...>` with balanced quotes. A manual scan instead of a regex so
/// quote state can be tracked.
pub fn find_xml_tag(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let mut p = i;
    while p < j {
        if ctx.line.char_at(p) != '<' {
            p += 1;
            continue;
        }
        // Tag content must look like a tag, not a comparison operator.
        if p + 1 >= j {
            return None;
        }
        let first = ctx.line.char_at(p + 1);
        if !(first.is_alphabetic() || first == '/' || first == '!' || first == '?') {
            p += 1;
            continue;
        }
        let mut quote: Option<char> = None;
        let mut q = p + 1;
        while q < j && q - p <= MAX_XML_TAG_LEN {
            let c = ctx.line.char_at(q);
            match quote {
                Some(open) => {
                    if c == open {
                        quote = None;
                    }
                }
                None => match c {
                    '"' | '\'' => quote = Some(c),
                    '>' => {
                        let token = ctx.token(p, q + 1, TokenType::XmlTag);
                        return Some(StepMatch::single(token, p, q + 1));
                    }
                    '<' => break,
                    _ => {}
                },
            }
            q += 1;
        }
        p += 1;
    }
    None
}

static SCHEME_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:https?|ftp)://\S+|\bmailto:\S+@\S+").unwrap());
static WWW_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bwww\.[-\w]+(?:\.[-\w]+)+\S*").unwrap());
static BARE_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9][-A-Za-z0-9]*(?:\.[-A-Za-z0-9]+)+(?:/\S*)?").unwrap());

/// Characters a URL or email never ends with; a trailing run of these is
/// sentence punctuation, not address material.
const TRIM_TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '"', '\''];

fn trim_trailing(s: &str) -> &str {
    s.trim_end_matches(TRIM_TRAILING)
}

pub fn find_url(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let slice = ctx.line.slice(i, j);
    let mut best: Option<(usize, usize)> = None;

    if let Some(m) = SCHEME_URL.find(slice) {
        let text = trim_trailing(m.as_str());
        if !text.is_empty() {
            best = consider(best, m.start(), m.start() + text.len());
        }
    }
    if let Some(m) = WWW_URL.find(slice) {
        let text = trim_trailing(m.as_str());
        if !text.is_empty() {
            best = consider(best, m.start(), m.start() + text.len());
        }
    }
    for m in BARE_DOMAIN.find_iter(slice) {
        // A bare domain is only a URL when it stands alone and ends in a
        // known TLD; `energo.gov.kz` inside an email address must not
        // match here.
        if let Some(prev) = slice[..m.start()].chars().next_back() {
            if prev.is_alphanumeric() || prev == '@' || prev == '.' || prev == '-' || prev == '_' {
                continue;
            }
        }
        let text = trim_trailing(m.as_str());
        let host = text.split('/').next().unwrap_or(text);
        let tld = host.rsplit('.').next().unwrap_or("");
        if tld.is_empty() || !ctx.store.is_tld(tld) {
            continue;
        }
        best = consider(best, m.start(), m.start() + text.len());
        break;
    }

    let (bstart, bend) = best?;
    let (a, b) = ctx.char_span(i, slice, bstart, bend);
    Some(StepMatch::single(ctx.token(a, b, TokenType::Url), a, b))
}

/// Keep the earlier candidate; at equal starts, the longer one.
fn consider(best: Option<(usize, usize)>, start: usize, end: usize) -> Option<(usize, usize)> {
    match best {
        Some((bs, be)) if (bs, std::cmp::Reverse(be)) <= (start, std::cmp::Reverse(end)) => {
            Some((bs, be))
        }
        _ => Some((start, end)),
    }
}

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\pL\pN._+\-]+@(?:[\pL\pN\-]+\.)+\pL{2,}").unwrap());

pub fn find_email(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let slice = ctx.line.slice(i, j);
    for m in EMAIL.find_iter(slice) {
        if let Some(prev) = slice[..m.start()].chars().next_back() {
            if prev.is_alphanumeric() || prev == '@' || prev == '.' {
                continue;
            }
        }
        let tld = m.as_str().rsplit('.').next().unwrap_or("");
        if !ctx.store.is_tld(tld) {
            continue;
        }
        let (a, b) = ctx.char_span(i, slice, m.start(), m.end());
        return Some(StepMatch::single(ctx.token(a, b, TokenType::Email), a, b));
    }
    None
}

static HANDLE_OR_HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[@#][\pL\pN_]+").unwrap());

pub fn find_handle_hashtag(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let slice = ctx.line.slice(i, j);
    for m in HANDLE_OR_HASHTAG.find_iter(slice) {
        // `@` or `#` glued to a preceding word is not a handle marker.
        if let Some(prev) = slice[..m.start()].chars().next_back() {
            if prev.is_alphanumeric() {
                continue;
            }
        }
        let token_type = if m.as_str().starts_with('@') {
            TokenType::Handle
        } else {
            TokenType::Hashtag
        };
        let (a, b) = ctx.char_span(i, slice, m.start(), m.end());
        return Some(StepMatch::single(ctx.token(a, b, token_type), a, b));
    }
    None
}

/// Filename-like tokens are driven entirely by `::preserve` rules from the
/// resource files: patterns for known non-TLD extensions and similar.
pub fn find_filename(ctx: &Ctx, i: usize, j: usize) -> Option<StepMatch> {
    let slice = ctx.line.slice(i, j);
    let mut best: Option<(usize, usize, &crate::resource::rules::PreserveRule)> = None;

    for rule in ctx.store.preserves() {
        for m in rule.pattern.find_iter(slice) {
            let (a, b) = ctx.char_span(i, slice, m.start(), m.end());
            if !at_word_boundary(ctx, i, a) {
                continue;
            }
            if b < j && super::is_word_char(ctx, b) {
                continue;
            }
            if !rule
                .common
                .context
                .matches(&slice[..m.start()], &slice[m.end()..])
            {
                continue;
            }
            match best {
                Some((bs, be, _)) if (bs, std::cmp::Reverse(be)) <= (a, std::cmp::Reverse(b)) => {}
                _ => best = Some((a, b, rule)),
            }
            break;
        }
    }

    let (a, b, rule) = best?;
    let mut token = ctx.token(a, b, rule.token_type);
    token.sem_class = rule.common.sem_class.clone();
    Some(StepMatch::single(token, a, b))
}
