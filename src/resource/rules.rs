//! Typed resource rules.
//!
//! Data-file rules are heterogeneous records keyed by slot names; here each
//! rule kind gets a fixed slot schema. Slots the schema does not know about
//! are kept in an `extra` side-map rather than rejected.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;

use crate::chart::TokenType;

/// Which side of a surface a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Start,
    End,
    Both,
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" | "left" => Ok(Side::Start),
            "end" | "right" => Ok(Side::End),
            "both" => Ok(Side::Both),
            _ => Err(format!("unknown side `{}`", s)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Start => "start",
            Side::End => "end",
            Side::Both => "both",
        })
    }
}

/// A context condition attached to a rule.
///
/// The `regex` crate has no look-around, so `left-context` compiles with a
/// trailing anchor and is matched against the text *before* the rule site,
/// while `right-context` compiles with a leading anchor and is matched
/// against the text *after* it.
#[derive(Debug, Clone)]
pub struct Context {
    pub left: Option<Regex>,
    pub right: Option<Regex>,
}

impl Context {
    pub fn none() -> Self {
        Self {
            left: None,
            right: None,
        }
    }

    pub fn left_matches(&self, before: &str) -> bool {
        match &self.left {
            Some(re) => re.is_match(before),
            None => true,
        }
    }

    pub fn right_matches(&self, after: &str) -> bool {
        match &self.right {
            Some(re) => re.is_match(after),
            None => true,
        }
    }

    pub fn matches(&self, before: &str, after: &str) -> bool {
        self.left_matches(before) && self.right_matches(after)
    }
}

/// Slots shared by every rule kind.
#[derive(Debug, Clone)]
pub struct RuleCommon {
    /// ISO 639-3 code, empty = universal.
    pub lcode: String,
    pub case_sensitive: bool,
    pub sem_class: Option<String>,
    pub context: Context,
    /// Slots the schema does not model.
    pub extra: HashMap<String, String>,
}

impl RuleCommon {
    pub fn universal() -> Self {
        Self {
            lcode: String::new(),
            case_sensitive: false,
            sem_class: None,
            context: Context::none(),
            extra: HashMap::new(),
        }
    }

    /// Specificity for tie-breaking: a concrete lcode beats universal.
    pub fn specificity(&self) -> usize {
        if self.lcode.is_empty() {
            0
        } else {
            1
        }
    }
}

/// `::contraction can't ::target can n't`
///
/// Without a `side`, the surface matches a whole word. With `side end` the
/// surface is a detachable suffix (`'s`), with `side start` a detachable
/// prefix that re-attaches rightward (`l'`).
#[derive(Debug, Clone)]
pub struct ContractionRule {
    pub surface: String,
    pub target: String,
    pub side: Option<Side>,
    pub common: RuleCommon,
}

/// `::repair wo n't ::target will n't`: rewrites a mistokenized fragment.
#[derive(Debug, Clone)]
pub struct RepairRule {
    pub surface: String,
    pub target: String,
    pub token_type: Option<TokenType>,
    pub common: RuleCommon,
}

/// `::abbrev Capt. ::sem-class military-rank`
#[derive(Debug, Clone)]
pub struct AbbrevRule {
    pub surface: String,
    /// Human-readable expansion (`Capt.` -> `Captain`).
    pub exp: Option<String>,
    pub common: RuleCommon,
}

/// `::lexical brother-in-law`: multi-word or hyphenated expression kept
/// whole. Also backs `::resource-rule` entries, which differ only in the
/// token type they emit.
#[derive(Debug, Clone)]
pub struct LexicalRule {
    pub surface: String,
    pub token_type: TokenType,
    pub common: RuleCommon,
}

/// `::misspelling recieve ::target receive ::lcode eng`
#[derive(Debug, Clone)]
pub struct MisspellingRule {
    pub surface: String,
    pub target: String,
    pub common: RuleCommon,
}

/// `::punct-split ! ::side end ::group True`
#[derive(Debug, Clone)]
pub struct PunctSplitRule {
    pub surface: char,
    pub side: Side,
    /// Keep consecutive runs of the same character together (`!!!`).
    pub group: bool,
    pub common: RuleCommon,
}

/// `::markup-attach - ::side both ::left-context \pL ::right-context \pL`
/// and `::auto-attach th ::side start ::left-context \d` share a shape:
/// which side(s) of a token get an `@` marker, gated by context.
#[derive(Debug, Clone)]
pub struct AttachRule {
    /// Keyed surface for markup-attach; the matched text for auto-attach.
    pub surface: String,
    pub side: Side,
    pub common: RuleCommon,
}

/// `::preserve \S+\.(?:doc|pdf) ::type FILENAME`: regex-preserved token.
#[derive(Debug, Clone)]
pub struct PreserveRule {
    pub pattern: Regex,
    pub token_type: TokenType,
    pub common: RuleCommon,
}

/// Detokenizer attach rule from `detok-resource.txt`:
/// `::markup-attach , ::side start` (attach toward the left neighbor).
#[derive(Debug, Clone)]
pub struct DetokRule {
    pub surface: String,
    pub side: Side,
    pub common: RuleCommon,
}

/// Access to the fields shared lookup logic needs.
pub trait KeyedRule {
    fn surface(&self) -> &str;
    fn common(&self) -> &RuleCommon;
}

macro_rules! keyed_rule {
    ($($ty:ty),+) => {
        $(impl KeyedRule for $ty {
            fn surface(&self) -> &str {
                &self.surface
            }
            fn common(&self) -> &RuleCommon {
                &self.common
            }
        })+
    };
}

keyed_rule!(
    ContractionRule,
    RepairRule,
    AbbrevRule,
    LexicalRule,
    MisspellingRule,
    AttachRule,
    DetokRule
);

/// Parse a `::type` slot value into a token type.
pub fn parse_token_type(s: &str) -> Option<TokenType> {
    Some(match s {
        "WORD-B" => TokenType::WordB,
        "WORD-I" => TokenType::WordI,
        "PUNCT" => TokenType::Punct,
        "PUNCT-B" => TokenType::PunctB,
        "PUNCT-E" => TokenType::PunctE,
        "PUNCT-S" => TokenType::PunctS,
        "ABBREV" => TokenType::Abbrev,
        "NUMBER" => TokenType::Number,
        "LEXICAL" => TokenType::Lexical,
        "DECONTRACTION" => TokenType::Decontraction,
        "DECONTRACTION-R" => TokenType::DecontractionR,
        "URL" => TokenType::Url,
        "EMAIL" => TokenType::Email,
        "XML-TAG" => TokenType::XmlTag,
        "HASHTAG" => TokenType::Hashtag,
        "HANDLE" => TokenType::Handle,
        "FILENAME" => TokenType::Filename,
        "EMOJI-SEQ" => TokenType::EmojiSeq,
        "MARKUP" => TokenType::Markup,
        "LINE-ID" => TokenType::LineId,
        "MISC" => TokenType::Misc,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parse() {
        assert_eq!("start".parse::<Side>().unwrap(), Side::Start);
        assert_eq!("right".parse::<Side>().unwrap(), Side::End);
        assert!("middle".parse::<Side>().is_err());
    }

    #[test]
    fn test_context_default_matches() {
        let ctx = Context::none();
        assert!(ctx.matches("anything", "at all"));
    }

    #[test]
    fn test_context_anchored() {
        let ctx = Context {
            left: Some(Regex::new(r"\d$").unwrap()),
            right: Some(Regex::new(r"^\s").unwrap()),
        };
        assert!(ctx.matches("No 4", " more"));
        assert!(!ctx.matches("four", " more"));
        assert!(!ctx.matches("No 4", "more"));
    }

    #[test]
    fn test_token_type_names_round_trip() {
        for t in [
            TokenType::WordB,
            TokenType::PunctE,
            TokenType::DecontractionR,
            TokenType::XmlTag,
        ] {
            assert_eq!(parse_token_type(t.as_str()), Some(t));
        }
        assert_eq!(parse_token_type("NOT-A-TYPE"), None);
    }
}
