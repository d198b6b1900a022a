//! Token and chart data model.
//!
//! A [`Chart`] records every token decision for one input line: surface
//! form, original character span, token type, optional semantic class, and
//! attachment markup. Charts are created per line, populated by the
//! pipeline, consumed by the emitter, and discarded.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::TokenizeError;

/// Token categories emitted by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Word beginning a whitespace-separated run.
    WordB,
    /// Word piece left adjacent to a preceding token with no gap.
    WordI,
    Punct,
    /// Punctuation split from the beginning of a word.
    PunctB,
    /// Punctuation split from the end of a word.
    PunctE,
    /// Punctuation that already stood alone.
    PunctS,
    Abbrev,
    Number,
    Lexical,
    Decontraction,
    /// Decontraction piece that attaches to its right neighbor on
    /// reconstruction.
    DecontractionR,
    Url,
    Email,
    XmlTag,
    Hashtag,
    Handle,
    Filename,
    EmojiSeq,
    Markup,
    LineId,
    Misc,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::WordB => "WORD-B",
            TokenType::WordI => "WORD-I",
            TokenType::Punct => "PUNCT",
            TokenType::PunctB => "PUNCT-B",
            TokenType::PunctE => "PUNCT-E",
            TokenType::PunctS => "PUNCT-S",
            TokenType::Abbrev => "ABBREV",
            TokenType::Number => "NUMBER",
            TokenType::Lexical => "LEXICAL",
            TokenType::Decontraction => "DECONTRACTION",
            TokenType::DecontractionR => "DECONTRACTION-R",
            TokenType::Url => "URL",
            TokenType::Email => "EMAIL",
            TokenType::XmlTag => "XML-TAG",
            TokenType::Hashtag => "HASHTAG",
            TokenType::Handle => "HANDLE",
            TokenType::Filename => "FILENAME",
            TokenType::EmojiSeq => "EMOJI-SEQ",
            TokenType::Markup => "MARKUP",
            TokenType::LineId => "LINE-ID",
            TokenType::Misc => "MISC",
        }
    }

    /// True for the word-like types that participate in WORD-B/WORD-I
    /// assignment.
    pub fn is_word(self) -> bool {
        matches!(self, TokenType::WordB | TokenType::WordI)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One token of the input line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Start offset into the original line, in Unicode scalar values.
    pub start: usize,
    /// End offset (half-open).
    pub end: usize,
    /// Surface form, possibly normalized by a rule; the original substring
    /// is always recoverable through `start`/`end`.
    pub surface: String,
    pub token_type: TokenType,
    /// Free-form tag from the matching resource rule.
    pub sem_class: Option<String>,
    /// Render `@` on the left side in surface output.
    pub markup_left: bool,
    /// Render `@` on the right side in surface output.
    pub markup_right: bool,
}

impl Token {
    pub fn new(start: usize, end: usize, surface: impl Into<String>, token_type: TokenType) -> Self {
        Self {
            start,
            end,
            surface: surface.into(),
            token_type,
            sem_class: None,
            markup_left: false,
            markup_right: false,
        }
    }

    /// Surface with attachment markup rendered on the marked sides.
    pub fn marked_surface(&self) -> String {
        match (self.markup_left, self.markup_right) {
            (false, false) => self.surface.clone(),
            (true, false) => format!("@{}", self.surface),
            (false, true) => format!("{}@", self.surface),
            (true, true) => format!("@{}@", self.surface),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token({}, {:?}, {}-{})",
            self.token_type, self.surface, self.start, self.end
        )
    }
}

/// All token decisions for one input line.
#[derive(Debug, Clone)]
pub struct Chart {
    /// The original line.
    line: String,
    /// Primary tokenization, in source order.
    tokens: Vec<Token>,
    /// Sibling tokenizations not chosen, kept for downstream consumers.
    alternatives: Vec<Token>,
    /// Original character offsets deleted during normalization.
    deletions: Vec<usize>,
}

impl Chart {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            tokens: Vec::new(),
            alternatives: Vec::new(),
            deletions: Vec::new(),
        }
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) {
        self.tokens.extend(tokens);
    }

    pub fn push_alternative(&mut self, token: Token) {
        self.alternatives.push(token);
    }

    pub fn set_deletions(&mut self, deletions: Vec<usize>) {
        self.deletions = deletions;
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn alternatives(&self) -> &[Token] {
        &self.alternatives
    }

    pub fn deletions(&self) -> &[usize] {
        &self.deletions
    }

    /// Verify chart invariants: spans strictly ordered and, together with
    /// the deletion map, covering every character of the line.
    pub fn finalize(&self) -> Result<(), TokenizeError> {
        let mut expected = 0usize;
        let mut deleted = self.deletions.iter().copied().peekable();
        let line_len = self.line.chars().count();

        for token in &self.tokens {
            if token.start >= token.end {
                return Err(TokenizeError::Internal(format!(
                    "empty span {}-{} for {:?}",
                    token.start, token.end, token.surface
                )));
            }
            // Skip over deletions and whitespace between tokens. Deletions
            // inside a token span are consumed silently.
            while deleted.peek().map(|&d| d < expected).unwrap_or(false) {
                deleted.next();
            }
            while expected < token.start {
                if deleted.peek() == Some(&expected) {
                    deleted.next();
                } else {
                    let c = self.line.chars().nth(expected);
                    if !c.map(char::is_whitespace).unwrap_or(false) {
                        return Err(TokenizeError::Internal(format!(
                            "uncovered offset {} before {:?}",
                            expected, token.surface
                        )));
                    }
                }
                expected += 1;
            }
            if token.start < expected {
                return Err(TokenizeError::Internal(format!(
                    "overlapping span {}-{} for {:?}",
                    token.start, token.end, token.surface
                )));
            }
            expected = token.end;
        }

        while deleted.peek().map(|&d| d < expected).unwrap_or(false) {
            deleted.next();
        }
        while expected < line_len {
            if deleted.peek() == Some(&expected) {
                deleted.next();
            } else {
                let c = self.line.chars().nth(expected);
                if !c.map(char::is_whitespace).unwrap_or(false) {
                    return Err(TokenizeError::Internal(format!(
                        "uncovered trailing offset {}",
                        expected
                    )));
                }
            }
            expected += 1;
        }

        Ok(())
    }

    /// Re-project the primary tokens through their offsets, reconstructing
    /// the original substrings they cover.
    pub fn project(&self) -> Vec<String> {
        let chars: Vec<char> = self.line.chars().collect();
        self.tokens
            .iter()
            .map(|t| chars[t.start..t.end].iter().collect())
            .collect()
    }
}
