//! # Chora Syntax
//!
//! Line-oriented syntax highlighting driven by regex rule tables.
//!
//! ## Model
//!
//! Each language is a [`LanguageDef`]: an ordered list of token rules plus an
//! optional multi-line block (C comments, Python triple-quoted strings).
//! Highlighting walks a line left to right and at every step takes the rule
//! whose next match starts first; ties go to the rule listed first. A block
//! that is still open at the end of a line is reported through
//! [`LineState::InBlock`] so the caller can feed it into the next line.
//!
//! ```
//! use chora_syntax::{Highlighter, Language, LineState, TokenKind};
//!
//! let hl = Highlighter::new(Language::Cpp);
//! let (spans, state) = hl.highlight_line("int x = 42; /* open", LineState::Normal);
//! assert_eq!(spans[0].kind, TokenKind::Type);
//! assert_eq!(state, LineState::InBlock);
//! ```

pub mod highlighter;
pub mod language;
pub mod rules;

pub use highlighter::{Highlighter, LineState, Span};
pub use language::Language;
pub use rules::{BlockDef, LanguageDef, RuleDef, RuleSet};

/// Kinds of token a rule can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Type,
    Class,
    Preprocessor,
    Comment,
    String,
    Function,
    Number,
}

/// Errors raised while compiling rule tables.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("Invalid pattern for {language}: {source}")]
    Pattern {
        language: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Rule for {language} uses capture group {group} but the pattern has {available}")]
    MissingGroup {
        language: &'static str,
        group: usize,
        available: usize,
    },
}
