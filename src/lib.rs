//! utok - universal multilingual tokenizer and detokenizer
//!
//! Segments a line of text into tokens - words, punctuation, numbers,
//! URLs, XML tags, email addresses, hashtags, handles, abbreviations,
//! contractions, and lexical multi-word expressions - across a wide range
//! of scripts. Output comes as a surface token stream or as a chart with
//! per-token span offsets, types, and semantic classes. The companion
//! [`Detokenizer`] inverts the tokenization, steered by `@` attachment
//! markers and the resource tables.
//!
//! ## Architecture
//!
//! - [`bits`] - per-codepoint feature bits and line vectors, the cheap
//!   relevance guards in front of every pipeline step
//! - [`normalize`] - control-character deletion and whitespace
//!   normalization with offset preservation
//! - [`resource`] - the data-file driven rule store (contractions,
//!   abbreviations, lexical entries, punctuation-split rules, ...)
//! - [`chart`] - the per-line token record
//! - [`tokenizer`] - the ordered step pipeline with recursive span
//!   subdivision
//! - [`emit`] - surface and annotation serialization
//! - [`detokenizer`] - reconstruction of running text from tokens
//!
//! ## Usage
//!
//! ```rust,no_run
//! use utok::{Tokenizer, TokenizerOptions};
//!
//! let tok = Tokenizer::new("eng", None, TokenizerOptions::default()).unwrap();
//! let surface = tok.tokenize_string("Mr. Miller can't afford it.");
//! assert_eq!(surface, "Mr. Miller can n't afford it .");
//! ```

pub mod bits;
pub mod chart;
pub mod detokenizer;
pub mod emit;
pub mod error;
pub mod normalize;
pub mod resource;
pub mod tokenizer;

pub use chart::{Chart, Token, TokenType};
pub use detokenizer::Detokenizer;
pub use emit::AnnotationFormat;
pub use error::{DetokenizeError, ResourceError, TokenizeError, Warning};
pub use tokenizer::{Tokenizer, TokenizerOptions};
