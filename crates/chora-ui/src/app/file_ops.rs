use std::path::{Path, PathBuf};
use std::time::Instant;

use chora_core::{Document, FileTree};

use super::{App, TabInfo};
use crate::status::FILE_MESSAGE_TIMEOUT;

const CANCELLED: &str = "Cancelled";

pub fn is_cancelled(error: &str) -> bool {
    error == CANCELLED
}

/// Reads `path` off the UI thread.
pub async fn open_document(path: PathBuf) -> Result<(Document, String), String> {
    let shown = path.display().to_string();
    tokio::task::spawn_blocking(move || Document::open(&path))
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| {
            tracing::warn!("Failed to open {}: {}", shown, e);
            e.to_string()
        })
}

pub async fn pick_and_open() -> Result<(Document, String), String> {
    let handle = rfd::AsyncFileDialog::new()
        .add_filter("All Files", &["*"])
        .add_filter("C/C++", &["c", "cc", "cpp", "cxx", "h", "hh", "hpp"])
        .add_filter("Rust", &["rs"])
        .add_filter("Python", &["py", "pyw"])
        .add_filter("Shell", &["sh", "bash", "zsh"])
        .pick_file()
        .await;

    match handle {
        Some(file) => open_document(file.path().to_path_buf()).await,
        None => Err(CANCELLED.to_string()),
    }
}

pub async fn pick_folder(start: PathBuf) -> Result<PathBuf, String> {
    match rfd::AsyncFileDialog::new().set_directory(start).pick_folder().await {
        Some(folder) => Ok(folder.path().to_path_buf()),
        None => Err(CANCELLED.to_string()),
    }
}

/// Writes `text` to `path` and returns the document as it is after saving.
pub async fn save_document(mut document: Document, path: PathBuf, text: String) -> Result<Document, String> {
    tokio::task::spawn_blocking(move || {
        document
            .save_to(&path, &text)
            .map(|()| document)
            .map_err(|e| {
                tracing::warn!("Failed to save {}: {}", path.display(), e);
                e.to_string()
            })
    })
    .await
    .map_err(|e| e.to_string())?
}

pub async fn pick_and_save(document: Document, text: String) -> Result<Document, String> {
    let mut dialog = rfd::AsyncFileDialog::new().set_file_name(document.title());
    if let Some(dir) = document.path().and_then(Path::parent) {
        dialog = dialog.set_directory(dir);
    }

    match dialog.save_file().await {
        Some(file) => save_document(document, file.path().to_path_buf(), text).await,
        None => Err(CANCELLED.to_string()),
    }
}

impl App {
    pub fn open_tree(&mut self, root: PathBuf) -> bool {
        match FileTree::open(&root) {
            Ok(tree) => {
                self.file_tree = Some(tree);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to open folder {}: {}", root.display(), e);
                false
            }
        }
    }

    pub fn refresh_file_tree(&mut self) {
        if let Some(tree) = &mut self.file_tree {
            if let Err(e) = tree.refresh() {
                tracing::warn!("Failed to refresh {}: {}", tree.root_path().display(), e);
            }
        }
    }

    pub fn find_tab(&self, path: &Path) -> Option<usize> {
        self.tabs
            .iter()
            .position(|tab| tab.document.path() == Some(path))
    }

    /// Opens a freshly read document in a new tab, or focuses the tab that
    /// already shows that file.
    pub fn add_document_tab(&mut self, document: Document, text: &str) {
        let existing = document.path().and_then(|path| self.find_tab(path));
        let idx = match existing {
            Some(idx) => idx,
            None => {
                self.tabs.push(TabInfo::from_document(document, text));
                self.tabs.len() - 1
            }
        };
        self.active_tab = Some(idx);

        let title = self.tabs[idx].document.title().to_string();
        self.status
            .show_for(format!("Opened: {}", title), FILE_MESSAGE_TIMEOUT, Instant::now());
    }

    /// Removes a tab; the tab to its left (or the new first tab) becomes
    /// current.
    pub fn close_tab(&mut self, idx: usize) {
        if idx >= self.tabs.len() {
            return;
        }
        let closed = self.tabs.remove(idx);
        tracing::debug!("Closed tab {}", closed.document.title());

        self.active_tab = match self.active_tab {
            _ if self.tabs.is_empty() => None,
            Some(active) if active > idx => Some(active - 1),
            Some(active) if active == idx => Some(idx.saturating_sub(1).min(self.tabs.len() - 1)),
            other => other,
        };
    }

    pub fn persist_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save_to(path) {
            tracing::warn!("Failed to save settings to {}: {}", path.display(), e);
        }
    }
}
