//! Line scanner.

use std::ops::Range;
use std::sync::Arc;

use crate::rules::{Rule, RuleSet};
use crate::{Language, LanguageDef, SyntaxError, TokenKind};

/// Carry-over between consecutive lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Normal,
    /// A multi-line block opened on an earlier line and is still open.
    InBlock,
}

/// A highlighted byte range within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub range: Range<usize>,
    pub kind: TokenKind,
}

impl Span {
    fn new(range: Range<usize>, kind: TokenKind) -> Self {
        Self { range, kind }
    }
}

/// Next known match for one rule.
#[derive(Debug, Clone)]
enum Slot {
    Unknown,
    Exhausted,
    At(Range<usize>),
}

/// Highlights lines of one language.
#[derive(Debug, Clone)]
pub struct Highlighter {
    rules: Arc<RuleSet>,
    language: Option<Language>,
}

impl Highlighter {
    pub fn new(language: Language) -> Self {
        Self {
            rules: RuleSet::builtin(language),
            language: Some(language),
        }
    }

    /// Builds a highlighter from a custom table.
    pub fn from_definition(def: &LanguageDef) -> Result<Self, SyntaxError> {
        Ok(Self {
            rules: Arc::new(RuleSet::compile(def)?),
            language: None,
        })
    }

    /// The built-in language, `None` for custom tables.
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn name(&self) -> &'static str {
        self.rules.name()
    }

    /// Highlights a single line given the state left by the previous one.
    ///
    /// Returned spans are sorted and never overlap.
    pub fn highlight_line(&self, line: &str, state: LineState) -> (Vec<Span>, LineState) {
        let mut spans = Vec::new();
        let mut pos = 0;

        if state == LineState::InBlock {
            if let Some(block) = &self.rules.block {
                match block.end.find(line) {
                    Some(end) => {
                        spans.push(Span::new(0..end.end(), block.kind));
                        pos = end.end();
                    }
                    None => {
                        if !line.is_empty() {
                            spans.push(Span::new(0..line.len(), block.kind));
                        }
                        return (spans, LineState::InBlock);
                    }
                }
            }
        }

        let mut slots = vec![Slot::Unknown; self.rules.rules.len()];

        while pos < line.len() {
            let block_start = self
                .rules
                .block
                .as_ref()
                .and_then(|block| block.start.find_at(line, pos))
                .map(|m| m.range());

            let mut best: Option<(usize, Range<usize>)> = None;
            for (index, rule) in self.rules.rules.iter().enumerate() {
                let stale = match &slots[index] {
                    Slot::Unknown => true,
                    Slot::At(range) => range.start < pos,
                    Slot::Exhausted => false,
                };
                if stale {
                    slots[index] = match next_match(rule, line, pos) {
                        Some(range) => Slot::At(range),
                        None => Slot::Exhausted,
                    };
                }
                if let Slot::At(range) = &slots[index] {
                    let earlier = best
                        .as_ref()
                        .is_none_or(|(_, current)| range.start < current.start);
                    if earlier {
                        best = Some((index, range.clone()));
                    }
                }
            }

            // The block opener wins ties against every rule.
            if let Some(start) = block_start {
                let beats_rules = best
                    .as_ref()
                    .is_none_or(|(_, range)| start.start <= range.start);
                if beats_rules {
                    let Some(block) = self.rules.block.as_ref() else {
                        break;
                    };
                    match block.end.find_at(line, start.end) {
                        Some(end) => {
                            spans.push(Span::new(start.start..end.end(), block.kind));
                            pos = end.end();
                            continue;
                        }
                        None => {
                            spans.push(Span::new(start.start..line.len(), block.kind));
                            return (spans, LineState::InBlock);
                        }
                    }
                }
            }

            match best {
                Some((index, range)) => {
                    pos = range.end;
                    spans.push(Span::new(range, self.rules.rules[index].kind));
                }
                None => break,
            }
        }

        (spans, LineState::Normal)
    }

    /// Highlights every line of `text`, threading the block state through.
    pub fn highlight_text(&self, text: &str) -> Vec<Vec<Span>> {
        let mut state = LineState::Normal;
        text.lines()
            .map(|line| {
                let (spans, next) = self.highlight_line(line, state);
                state = next;
                spans
            })
            .collect()
    }
}

/// Finds the first non-empty token of `rule` starting at or after `from`.
fn next_match(rule: &Rule, line: &str, mut from: usize) -> Option<Range<usize>> {
    while from <= line.len() {
        let (whole, token) = if rule.group == 0 {
            let m = rule.regex.find_at(line, from)?;
            (m.range(), Some(m.range()))
        } else {
            let caps = rule.regex.captures_at(line, from)?;
            let whole = caps.get(0)?.range();
            (whole, caps.get(rule.group).map(|g| g.range()))
        };

        match token {
            Some(range) if !range.is_empty() => return Some(range),
            _ => from = next_boundary(line, whole.start.max(from)),
        }
    }
    None
}

fn next_boundary(line: &str, pos: usize) -> usize {
    let mut next = pos + 1;
    while next < line.len() && !line.is_char_boundary(next) {
        next += 1;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockDef, RuleDef};

    fn kinds(line: &str, spans: &[Span]) -> Vec<(String, TokenKind)> {
        spans
            .iter()
            .map(|s| (line[s.range.clone()].to_string(), s.kind))
            .collect()
    }

    #[test]
    fn test_cpp_tokens() {
        let hl = Highlighter::new(Language::Cpp);
        let line = "int main() { return 0; }";
        let (spans, state) = hl.highlight_line(line, LineState::Normal);

        assert_eq!(state, LineState::Normal);
        assert_eq!(
            kinds(line, &spans),
            vec![
                ("int".to_string(), TokenKind::Type),
                ("main".to_string(), TokenKind::Function),
                ("return".to_string(), TokenKind::Keyword),
                ("0".to_string(), TokenKind::Number),
            ]
        );
    }

    #[test]
    fn test_comment_marker_inside_string() {
        let hl = Highlighter::new(Language::Cpp);
        let line = r#"auto url = "http://x"; // trailing"#;
        let (spans, _) = hl.highlight_line(line, LineState::Normal);
        let found = kinds(line, &spans);

        assert!(found.contains(&(r#""http://x""#.to_string(), TokenKind::String)));
        assert!(found.contains(&("// trailing".to_string(), TokenKind::Comment)));
    }

    #[test]
    fn test_numbers_inside_comment_stay_comment() {
        let hl = Highlighter::new(Language::Cpp);
        let line = "// 42 apples";
        let (spans, _) = hl.highlight_line(line, LineState::Normal);
        assert_eq!(spans, vec![Span::new(0..line.len(), TokenKind::Comment)]);
    }

    #[test]
    fn test_preprocessor() {
        let hl = Highlighter::new(Language::Cpp);
        let (spans, _) = hl.highlight_line("#include <vector>", LineState::Normal);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, TokenKind::Preprocessor);
    }

    #[test]
    fn test_block_comment_across_lines() {
        let hl = Highlighter::new(Language::Cpp);

        let (spans, state) = hl.highlight_line("x = 1; /* start", LineState::Normal);
        assert_eq!(state, LineState::InBlock);
        assert_eq!(spans.last().map(|s| s.kind), Some(TokenKind::Comment));

        let (spans, state) = hl.highlight_line("still comment", LineState::InBlock);
        assert_eq!(state, LineState::InBlock);
        assert_eq!(spans, vec![Span::new(0..13, TokenKind::Comment)]);

        let line = "end */ int y;";
        let (spans, state) = hl.highlight_line(line, LineState::InBlock);
        assert_eq!(state, LineState::Normal);
        assert_eq!(
            kinds(line, &spans),
            vec![
                ("end */".to_string(), TokenKind::Comment),
                ("int".to_string(), TokenKind::Type),
            ]
        );
    }

    #[test]
    fn test_empty_line_keeps_block_open() {
        let hl = Highlighter::new(Language::Cpp);
        let (spans, state) = hl.highlight_line("", LineState::InBlock);
        assert!(spans.is_empty());
        assert_eq!(state, LineState::InBlock);
    }

    #[test]
    fn test_block_closed_on_same_line() {
        let hl = Highlighter::new(Language::Cpp);
        let line = "/* a */ b";
        let (spans, state) = hl.highlight_line(line, LineState::Normal);
        assert_eq!(state, LineState::Normal);
        assert_eq!(spans, vec![Span::new(0..7, TokenKind::Comment)]);
    }

    #[test]
    fn test_python_triple_quotes() {
        let hl = Highlighter::new(Language::Python);
        let lines = hl.highlight_text("def f():\n    \"\"\"doc\n    more\"\"\"\n    return 1\n");

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0][0].kind, TokenKind::Keyword);
        assert_eq!(lines[1].last().map(|s| s.kind), Some(TokenKind::String));
        assert!(lines[2].iter().all(|s| s.kind == TokenKind::String));
        assert_eq!(lines[3][0].kind, TokenKind::Keyword);
    }

    #[test]
    fn test_rust_macro_and_attribute() {
        let hl = Highlighter::new(Language::Rust);
        let line = "#[derive(Debug)] fn f() { println!(\"hi\"); }";
        let (spans, _) = hl.highlight_line(line, LineState::Normal);
        let found = kinds(line, &spans);

        assert_eq!(found[0], ("#[derive(Debug)]".to_string(), TokenKind::Preprocessor));
        assert!(found.contains(&("println".to_string(), TokenKind::Function)));
        assert!(found.contains(&("\"hi\"".to_string(), TokenKind::String)));
    }

    #[test]
    fn test_shell_comment_and_variable() {
        let hl = Highlighter::new(Language::Shell);
        let line = "echo $HOME # where";
        let (spans, _) = hl.highlight_line(line, LineState::Normal);
        let found = kinds(line, &spans);

        assert!(found.contains(&("$HOME".to_string(), TokenKind::Type)));
        assert_eq!(found.last(), Some(&("# where".to_string(), TokenKind::Comment)));
    }

    #[test]
    fn test_shell_hash_inside_word_is_not_a_comment() {
        let hl = Highlighter::new(Language::Shell);
        let (spans, _) = hl.highlight_line("echo a#b", LineState::Normal);
        assert!(spans.iter().all(|s| s.kind != TokenKind::Comment));

        let line = "# header";
        let (spans, _) = hl.highlight_line(line, LineState::Normal);
        assert_eq!(kinds(line, &spans), vec![("# header".to_string(), TokenKind::Comment)]);
    }

    #[test]
    fn test_plain_text_has_no_spans() {
        let hl = Highlighter::new(Language::PlainText);
        let (spans, state) = hl.highlight_line("int x = 1; /* nothing", LineState::Normal);
        assert!(spans.is_empty());
        assert_eq!(state, LineState::Normal);

        // no block defined, so a stale InBlock is dropped
        let (_, state) = hl.highlight_line("text", LineState::InBlock);
        assert_eq!(state, LineState::Normal);
    }

    #[test]
    fn test_multibyte_text() {
        let hl = Highlighter::new(Language::Cpp);
        let line = "// héllo ✓";
        let (spans, _) = hl.highlight_line(line, LineState::Normal);
        assert_eq!(spans, vec![Span::new(0..line.len(), TokenKind::Comment)]);

        let line = "é int";
        let (spans, _) = hl.highlight_line(line, LineState::Normal);
        assert_eq!(kinds(line, &spans), vec![("int".to_string(), TokenKind::Type)]);
    }

    #[test]
    fn test_custom_definition_priority() {
        let def = LanguageDef {
            name: "ini",
            rules: vec![
                RuleDef::new(r";.*", TokenKind::Comment),
                RuleDef::group(r"^\[([^\]]+)\]", TokenKind::Class, 1),
                RuleDef::new(r"[a-z]+", TokenKind::Keyword),
            ],
            block: Some(BlockDef {
                start: "<<",
                end: ">>",
                kind: TokenKind::String,
            }),
        };
        let hl = Highlighter::from_definition(&def).expect("valid definition");
        assert_eq!(hl.language(), None);
        assert_eq!(hl.name(), "ini");

        let line = "[section] key ; note";
        let (spans, _) = hl.highlight_line(line, LineState::Normal);
        assert_eq!(
            kinds(line, &spans),
            vec![
                ("section".to_string(), TokenKind::Class),
                ("key".to_string(), TokenKind::Keyword),
                ("; note".to_string(), TokenKind::Comment),
            ]
        );

        let (spans, state) = hl.highlight_line("a <<b", LineState::Normal);
        assert_eq!(spans.last(), Some(&Span::new(2..5, TokenKind::String)));
        assert_eq!(state, LineState::InBlock);
    }

    #[test]
    fn test_optional_group_without_participation() {
        let def = LanguageDef {
            name: "opt",
            rules: vec![RuleDef::group(r"x(y)?", TokenKind::Keyword, 1)],
            block: None,
        };
        let hl = Highlighter::from_definition(&def).expect("valid definition");
        let (spans, _) = hl.highlight_line("x x xy", LineState::Normal);
        assert_eq!(spans, vec![Span::new(5..6, TokenKind::Keyword)]);
    }
}
