//! Documents shown in editor tabs.
//!
//! A `Document` only knows where its text lives on disk and how to label
//! it. The text itself is owned by the editor widget in the UI crate and is
//! handed in whenever the document is written.

use chora_syntax::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::CoreResult;

pub const UNTITLED: &str = "Untitled";

/// Unique identifier for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

/// A file (or a not yet saved buffer) open in a tab.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    path: Option<PathBuf>,
    title: String,
    language: Language,
}

impl Document {
    /// A new empty buffer with no file behind it.
    pub fn untitled() -> Self {
        Self {
            id: DocumentId::new(),
            path: None,
            title: UNTITLED.to_string(),
            language: Language::PlainText,
        }
    }

    /// Reads `path` as UTF-8 and returns the document with its text.
    pub fn open(path: impl AsRef<Path>) -> CoreResult<(Self, String)> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::info!("Opened {} ({} bytes)", path.display(), text.len());

        let mut document = Self::untitled();
        document.set_path(path.to_path_buf());
        Ok((document, text))
    }

    /// Writes `text` to `path` and makes it this document's file.
    pub fn save_to(&mut self, path: impl AsRef<Path>, text: &str) -> CoreResult<()> {
        let path = path.as_ref();
        std::fs::write(path, text)?;
        tracing::info!("Saved {} ({} bytes)", path.display(), text.len());

        if self.path.as_deref() != Some(path) {
            self.set_path(path.to_path_buf());
        }
        Ok(())
    }

    fn set_path(&mut self, path: PathBuf) {
        self.title = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        self.language = Language::from_path(&path);
        self.path = Some(path);
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_untitled(&self) -> bool {
        self.path.is_none()
    }
}

/// Width in pixels of the line-number gutter: ten pixels of padding plus one
/// digit cell per digit of the largest line number and one spare cell.
pub fn line_number_area_width(line_count: usize, char_width: f32) -> f32 {
    let digits = line_count.max(1).ilog10() + 1;
    10.0 + char_width * (digits + 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_untitled() {
        let doc = Document::untitled();
        assert_eq!(doc.title(), "Untitled");
        assert!(doc.is_untitled());
        assert_eq!(doc.language(), Language::PlainText);
        assert_ne!(doc.id(), Document::untitled().id());
    }

    #[test]
    fn test_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("main.cpp");
        std::fs::write(&path, "int main() {}\n").unwrap();

        let (doc, text) = Document::open(&path).unwrap();
        assert_eq!(text, "int main() {}\n");
        assert_eq!(doc.title(), "main.cpp");
        assert_eq!(doc.path(), Some(path.as_path()));
        assert_eq!(doc.language(), Language::Cpp);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        assert!(Document::open(dir.path().join("nope.txt")).is_err());
    }

    #[test]
    fn test_save_as_renames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("script.py");

        let mut doc = Document::untitled();
        let id = doc.id();
        doc.save_to(&path, "print('hi')\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "print('hi')\n");
        assert_eq!(doc.title(), "script.py");
        assert_eq!(doc.language(), Language::Python);
        assert_eq!(doc.id(), id);
        assert!(!doc.is_untitled());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let mut doc = Document::untitled();
        assert!(doc.save_to(dir.path().join("no/such/dir.txt"), "x").is_err());
        assert!(doc.is_untitled());
    }

    #[test]
    fn test_line_number_area_width() {
        assert_eq!(line_number_area_width(0, 8.0), 10.0 + 8.0 * 2.0);
        assert_eq!(line_number_area_width(9, 8.0), 10.0 + 8.0 * 2.0);
        assert_eq!(line_number_area_width(10, 8.0), 10.0 + 8.0 * 3.0);
        assert_eq!(line_number_area_width(12345, 7.0), 10.0 + 7.0 * 6.0);
    }
}
