//! Bridges `chora-syntax` into iced's `text_editor`.
//!
//! iced asks for lines in order and calls `change_line` when an edit
//! invalidates everything from some line on. The block state at the end of
//! every highlighted line is kept so highlighting can resume mid-file
//! without rescanning from the top.

use chora_syntax::{Highlighter as SyntaxHighlighter, Language, LineState, TokenKind};
use iced::advanced::text::highlighter::{Format, Highlighter};
use iced::{Color, Font};
use std::ops::Range;

use crate::theme::{EDITOR_FONT_BOLD, EDITOR_FONT_ITALIC, colors};

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSettings {
    pub language: Language,
}

/// Highlight attached to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightFormat {
    pub kind: TokenKind,
}

impl HighlightFormat {
    pub fn color(self) -> Color {
        match self.kind {
            TokenKind::Keyword => colors::KEYWORD,
            TokenKind::Type | TokenKind::Class => colors::TYPE,
            TokenKind::Function => colors::FUNCTION,
            TokenKind::String => colors::STRING,
            TokenKind::Number => colors::NUMBER,
            TokenKind::Comment => colors::COMMENT,
            TokenKind::Preprocessor => colors::PREPROCESSOR,
        }
    }

    pub fn font(self) -> Option<Font> {
        match self.kind {
            TokenKind::Keyword | TokenKind::Type | TokenKind::Class => Some(EDITOR_FONT_BOLD),
            TokenKind::Comment => Some(EDITOR_FONT_ITALIC),
            _ => None,
        }
    }

    pub fn to_format(self) -> Format<Font> {
        Format {
            color: Some(self.color()),
            font: self.font(),
        }
    }
}

pub struct EditorHighlighter {
    syntax: SyntaxHighlighter,
    /// State at the end of each line highlighted so far
    line_states: Vec<LineState>,
}

impl Highlighter for EditorHighlighter {
    type Settings = HighlightSettings;
    type Highlight = HighlightFormat;
    type Iterator<'a> = std::vec::IntoIter<(Range<usize>, HighlightFormat)> where Self: 'a;

    fn new(settings: &Self::Settings) -> Self {
        Self {
            syntax: SyntaxHighlighter::new(settings.language),
            line_states: Vec::new(),
        }
    }

    fn update(&mut self, new_settings: &Self::Settings) {
        if self.syntax.language() != Some(new_settings.language) {
            self.syntax = SyntaxHighlighter::new(new_settings.language);
            self.line_states.clear();
        }
    }

    fn change_line(&mut self, line: usize) {
        self.line_states.truncate(line);
    }

    fn highlight_line(&mut self, line: &str) -> Self::Iterator<'_> {
        let state = self.line_states.last().copied().unwrap_or_default();
        let (spans, next) = self.syntax.highlight_line(line, state);
        self.line_states.push(next);

        spans
            .into_iter()
            .map(|span| (span.range, HighlightFormat { kind: span.kind }))
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn current_line(&self) -> usize {
        self.line_states.len()
    }
}
