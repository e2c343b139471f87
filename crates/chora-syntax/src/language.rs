//! Language detection.

use std::path::Path;

/// Languages with a built-in rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    Cpp,
    Rust,
    Python,
    Shell,
    #[default]
    PlainText,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Cpp,
        Language::Rust,
        Language::Python,
        Language::Shell,
        Language::PlainText,
    ];

    /// Detects the language from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "c" | "h" | "cpp" | "cxx" | "cc" | "c++" | "hpp" | "hxx" | "hh" | "h++" | "ino" => {
                Language::Cpp
            }
            "rs" => Language::Rust,
            "py" | "pyw" | "pyi" => Language::Python,
            "sh" | "bash" | "zsh" | "ksh" => Language::Shell,
            _ => Language::PlainText,
        }
    }

    /// Detects the language from a path, looking at the extension first and
    /// a few well-known file names second.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            let lang = Self::from_extension(ext);
            if lang != Language::PlainText {
                return lang;
            }
        }

        match path.file_name().and_then(|n| n.to_str()) {
            Some(".bashrc" | ".bash_profile" | ".profile" | ".zshrc") => Language::Shell,
            Some("SConstruct" | "SConscript") => Language::Python,
            _ => Language::PlainText,
        }
    }

    /// Human readable name, shown in the status bar.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::Rust => "Rust",
            Language::Python => "Python",
            Language::Shell => "Shell",
            Language::PlainText => "Plain Text",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
