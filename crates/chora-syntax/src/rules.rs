//! Rule tables and their compiled form.

use std::borrow::Cow;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Language, SyntaxError, TokenKind};

/// A single token rule as written in a language table.
#[derive(Debug, Clone)]
pub struct RuleDef {
    pub pattern: Cow<'static, str>,
    pub kind: TokenKind,
    /// Capture group holding the token; 0 means the whole match.
    pub group: usize,
}

impl RuleDef {
    pub fn new(pattern: impl Into<Cow<'static, str>>, kind: TokenKind) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
            group: 0,
        }
    }

    pub fn group(pattern: impl Into<Cow<'static, str>>, kind: TokenKind, group: usize) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
            group,
        }
    }
}

/// A construct that may span several lines.
#[derive(Debug, Clone, Copy)]
pub struct BlockDef {
    pub start: &'static str,
    pub end: &'static str,
    pub kind: TokenKind,
}

/// Uncompiled description of a language.
#[derive(Debug, Clone)]
pub struct LanguageDef {
    pub name: &'static str,
    /// Rules in priority order.
    pub rules: Vec<RuleDef>,
    pub block: Option<BlockDef>,
}

#[derive(Debug)]
pub(crate) struct Rule {
    pub(crate) regex: Regex,
    pub(crate) kind: TokenKind,
    pub(crate) group: usize,
}

#[derive(Debug)]
pub(crate) struct Block {
    pub(crate) start: Regex,
    pub(crate) end: Regex,
    pub(crate) kind: TokenKind,
}

/// Compiled rule table.
#[derive(Debug)]
pub struct RuleSet {
    pub(crate) name: &'static str,
    pub(crate) rules: Vec<Rule>,
    pub(crate) block: Option<Block>,
}

impl RuleSet {
    /// Compiles a language definition.
    pub fn compile(def: &LanguageDef) -> Result<Self, SyntaxError> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|source| SyntaxError::Pattern {
                language: def.name,
                source,
            })
        };

        let mut rules = Vec::with_capacity(def.rules.len());
        for rule in &def.rules {
            let regex = compile(&rule.pattern)?;
            // captures_len counts the implicit whole-match group
            let available = regex.captures_len() - 1;
            if rule.group > available {
                return Err(SyntaxError::MissingGroup {
                    language: def.name,
                    group: rule.group,
                    available,
                });
            }
            rules.push(Rule {
                regex,
                kind: rule.kind,
                group: rule.group,
            });
        }

        let block = match &def.block {
            Some(block) => Some(Block {
                start: compile(&regex::escape(block.start))?,
                end: compile(&regex::escape(block.end))?,
                kind: block.kind,
            }),
            None => None,
        };

        Ok(Self {
            name: def.name,
            rules,
            block,
        })
    }

    /// A table that highlights nothing.
    pub fn empty(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
            block: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the shared compiled table for a built-in language.
    pub fn builtin(language: Language) -> Arc<RuleSet> {
        match language {
            Language::Cpp => CPP.clone(),
            Language::Rust => RUST.clone(),
            Language::Python => PYTHON.clone(),
            Language::Shell => SHELL.clone(),
            Language::PlainText => PLAIN.clone(),
        }
    }
}

fn compile_builtin(def: LanguageDef) -> Arc<RuleSet> {
    match RuleSet::compile(&def) {
        Ok(set) => Arc::new(set),
        Err(e) => {
            tracing::error!("Built-in highlighting for {} disabled: {}", def.name, e);
            Arc::new(RuleSet::empty(def.name))
        }
    }
}

/// Joins words into a single `\b(?:a|b|c)\b` alternation.
fn word_list(words: &[&str]) -> String {
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    format!(r"\b(?:{})\b", alternatives.join("|"))
}

const DOUBLE_QUOTED: &str = r#""(?:[^"\\]|\\.)*""#;
const SINGLE_QUOTED: &str = r"'(?:[^'\\]|\\.)*'";
const FUNCTION_CALL: &str = r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\(";
const NUMBER: &str = r"\b[0-9]+\.?[0-9]*\b";
const PASCAL_CASE: &str = r"\b[A-Z][A-Za-z0-9_]*[a-z][A-Za-z0-9_]*\b";

const CPP_KEYWORDS: &[&str] = &[
    "class", "const", "enum", "explicit", "friend", "inline", "long", "namespace", "operator",
    "private", "protected", "public", "short", "signals", "signed", "slots", "static", "struct",
    "template", "typedef", "typename", "union", "unsigned", "virtual", "volatile", "if", "else",
    "for", "while", "do", "switch", "case", "default", "break", "continue", "return", "try",
    "catch", "throw", "new", "delete", "this", "auto", "constexpr", "decltype", "noexcept",
    "nullptr", "true", "false", "using", "override", "final",
];

const CPP_TYPES: &[&str] = &[
    "int", "float", "double", "char", "bool", "void", "size_t", "wchar_t", "int8_t", "int16_t",
    "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "type",
    "unsafe", "use", "where", "while", "true", "false",
];

const RUST_TYPES: &[&str] = &[
    "bool", "char", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "str", "u8",
    "u16", "u32", "u64", "u128", "usize",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
    "True", "False", "None", "self",
];

const PYTHON_TYPES: &[&str] = &[
    "int", "float", "str", "bool", "list", "dict", "tuple", "set", "frozenset", "bytes",
    "bytearray", "complex", "object",
];

const SHELL_KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done", "case", "esac",
    "in", "function", "return", "export", "local", "readonly", "source", "exit",
];

static CPP: Lazy<Arc<RuleSet>> = Lazy::new(|| {
    compile_builtin(LanguageDef {
        name: "C++",
        rules: vec![
            RuleDef::new(r"^\s*#.*", TokenKind::Preprocessor),
            RuleDef::new(r"//.*", TokenKind::Comment),
            RuleDef::new(DOUBLE_QUOTED, TokenKind::String),
            RuleDef::new(SINGLE_QUOTED, TokenKind::String),
            RuleDef::new(word_list(CPP_TYPES), TokenKind::Type),
            RuleDef::new(word_list(CPP_KEYWORDS), TokenKind::Keyword),
            RuleDef::group(FUNCTION_CALL, TokenKind::Function, 1),
            RuleDef::new(PASCAL_CASE, TokenKind::Class),
            RuleDef::new(NUMBER, TokenKind::Number),
        ],
        block: Some(BlockDef {
            start: "/*",
            end: "*/",
            kind: TokenKind::Comment,
        }),
    })
});

static RUST: Lazy<Arc<RuleSet>> = Lazy::new(|| {
    compile_builtin(LanguageDef {
        name: "Rust",
        rules: vec![
            RuleDef::new(r"#!?\[[^\]]*\]", TokenKind::Preprocessor),
            RuleDef::new(r"//.*", TokenKind::Comment),
            RuleDef::new(DOUBLE_QUOTED, TokenKind::String),
            RuleDef::new(r"'(?:[^'\\]|\\.)'", TokenKind::String),
            RuleDef::new(word_list(RUST_TYPES), TokenKind::Type),
            RuleDef::new(word_list(RUST_KEYWORDS), TokenKind::Keyword),
            RuleDef::group(r"\b([A-Za-z_][A-Za-z0-9_]*)!", TokenKind::Function, 1),
            RuleDef::group(FUNCTION_CALL, TokenKind::Function, 1),
            RuleDef::new(PASCAL_CASE, TokenKind::Class),
            RuleDef::new(NUMBER, TokenKind::Number),
        ],
        block: Some(BlockDef {
            start: "/*",
            end: "*/",
            kind: TokenKind::Comment,
        }),
    })
});

static PYTHON: Lazy<Arc<RuleSet>> = Lazy::new(|| {
    compile_builtin(LanguageDef {
        name: "Python",
        rules: vec![
            RuleDef::new(r"#.*", TokenKind::Comment),
            RuleDef::new(r"^\s*@[A-Za-z_][A-Za-z0-9_.]*", TokenKind::Preprocessor),
            RuleDef::new(DOUBLE_QUOTED, TokenKind::String),
            RuleDef::new(SINGLE_QUOTED, TokenKind::String),
            RuleDef::new(word_list(PYTHON_TYPES), TokenKind::Type),
            RuleDef::new(word_list(PYTHON_KEYWORDS), TokenKind::Keyword),
            RuleDef::group(FUNCTION_CALL, TokenKind::Function, 1),
            RuleDef::new(PASCAL_CASE, TokenKind::Class),
            RuleDef::new(NUMBER, TokenKind::Number),
        ],
        block: Some(BlockDef {
            start: "\"\"\"",
            end: "\"\"\"",
            kind: TokenKind::String,
        }),
    })
});

static SHELL: Lazy<Arc<RuleSet>> = Lazy::new(|| {
    compile_builtin(LanguageDef {
        name: "Shell",
        rules: vec![
            RuleDef::group(r"(?:^|\s)(#.*)", TokenKind::Comment, 1),
            RuleDef::new(DOUBLE_QUOTED, TokenKind::String),
            RuleDef::new(r"'[^']*'", TokenKind::String),
            RuleDef::new(r"\$\{[^}]*\}|\$[A-Za-z_][A-Za-z0-9_]*|\$[0-9@#?$!*-]", TokenKind::Type),
            RuleDef::new(word_list(SHELL_KEYWORDS), TokenKind::Keyword),
            RuleDef::group(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*\(\)", TokenKind::Function, 1),
            RuleDef::new(NUMBER, TokenKind::Number),
        ],
        block: None,
    })
});

static PLAIN: Lazy<Arc<RuleSet>> = Lazy::new(|| Arc::new(RuleSet::empty("Plain Text")));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_compile() {
        for language in Language::ALL {
            let set = RuleSet::builtin(language);
            assert_eq!(set.name(), language.name());
            if language != Language::PlainText {
                assert!(!set.rules.is_empty(), "{} has no rules", language);
            }
        }
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let def = LanguageDef {
            name: "Broken",
            rules: vec![RuleDef::new(r"(unclosed", TokenKind::Keyword)],
            block: None,
        };
        assert!(matches!(
            RuleSet::compile(&def),
            Err(SyntaxError::Pattern { language: "Broken", .. })
        ));
    }

    #[test]
    fn test_missing_group_is_reported() {
        let def = LanguageDef {
            name: "Broken",
            rules: vec![RuleDef::group(r"\bfoo\b", TokenKind::Keyword, 1)],
            block: None,
        };
        assert!(matches!(
            RuleSet::compile(&def),
            Err(SyntaxError::MissingGroup { group: 1, available: 0, .. })
        ));
    }

    #[test]
    fn test_word_list_escapes() {
        assert_eq!(word_list(&["c++", "if"]), r"\b(?:c\+\+|if)\b");
    }
}
