//! The folder shown in the sidebar.
//!
//! Directories are read one level at a time: a node's children are loaded
//! the first time it is expanded, and [`FileTree::refresh`] re-reads only
//! the directories that are currently expanded.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::{CoreError, CoreResult};

/// Quiet period used to coalesce bursts of filesystem events.
pub const WATCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Type of file tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

/// A node in the file tree.
#[derive(Debug, Clone)]
pub struct FileNode {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Loaded children; empty until the directory is first expanded
    pub children: Vec<FileNode>,
    pub expanded: bool,
    loaded: bool,
}

impl FileNode {
    fn new(path: PathBuf, kind: NodeKind) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path,
            kind,
            children: Vec::new(),
            expanded: false,
            loaded: false,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    fn load(&mut self) -> CoreResult<()> {
        self.children = read_children(&self.path)?;
        self.loaded = true;
        Ok(())
    }

    fn find_mut(&mut self, target: &Path) -> Option<&mut FileNode> {
        if self.path == target {
            return Some(self);
        }
        self.children
            .iter_mut()
            .filter(|child| target.starts_with(&child.path))
            .find_map(|child| child.find_mut(target))
    }

    fn collect_expanded(&self, out: &mut HashSet<PathBuf>) {
        if self.expanded {
            out.insert(self.path.clone());
        }
        for child in &self.children {
            child.collect_expanded(out);
        }
    }

    /// Reloads this directory and any expanded descendants.
    fn reload(&mut self, expanded: &HashSet<PathBuf>) -> CoreResult<()> {
        self.load()?;
        for child in &mut self.children {
            if child.is_directory() && expanded.contains(&child.path) {
                // A directory that became unreadable just stays collapsed.
                if child.reload(expanded).is_ok() {
                    child.expanded = true;
                }
            }
        }
        Ok(())
    }

    /// This directory if it is expanded, then its expanded subdirectories.
    fn collect_open_dirs(&self, out: &mut Vec<PathBuf>) {
        if !self.expanded {
            return;
        }
        out.push(self.path.clone());
        for child in &self.children {
            child.collect_open_dirs(out);
        }
    }

    fn flatten<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a FileNode)>) {
        for child in &self.children {
            out.push((depth, child));
            if child.expanded {
                child.flatten(depth + 1, out);
            }
        }
    }
}

/// Lists a directory: hidden entries skipped, directories first, then by
/// case-insensitive name.
pub fn read_children(dir: &Path) -> CoreResult<Vec<FileNode>> {
    let mut children = Vec::new();
    for entry in std::fs::read_dir(dir)?.flatten() {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let kind = match entry.file_type() {
            Ok(t) if t.is_dir() => NodeKind::Directory,
            Ok(_) => NodeKind::File,
            Err(_) => continue,
        };
        // Symlinks to directories are browsable too
        let kind = if kind == NodeKind::File && entry.path().is_dir() {
            NodeKind::Directory
        } else {
            kind
        };
        children.push(FileNode::new(entry.path(), kind));
    }

    children.sort_by(|a, b| match (a.kind, b.kind) {
        (NodeKind::Directory, NodeKind::File) => std::cmp::Ordering::Less,
        (NodeKind::File, NodeKind::Directory) => std::cmp::Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
    Ok(children)
}

/// A lazily loaded directory tree.
#[derive(Debug, Clone)]
pub struct FileTree {
    root: FileNode,
}

impl FileTree {
    /// Opens `path` as the tree root and reads its first level.
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(CoreError::NotADirectory(path.to_path_buf()));
        }

        let mut root = FileNode::new(path.to_path_buf(), NodeKind::Directory);
        root.load()?;
        root.expanded = true;
        tracing::info!("Opened folder {}", path.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &FileNode {
        &self.root
    }

    pub fn root_path(&self) -> &Path {
        &self.root.path
    }

    /// Expands or collapses the directory at `path`, loading it on first
    /// expansion. Returns the new expansion state.
    pub fn toggle(&mut self, path: &Path) -> CoreResult<bool> {
        let node = self
            .root
            .find_mut(path)
            .ok_or_else(|| CoreError::NotFound(path.to_path_buf()))?;
        if !node.is_directory() {
            return Err(CoreError::NotADirectory(path.to_path_buf()));
        }

        if node.expanded {
            node.expanded = false;
        } else {
            if !node.loaded {
                node.load()?;
            }
            node.expanded = true;
        }
        Ok(node.expanded)
    }

    /// Re-reads the tree from disk, keeping expanded directories expanded.
    pub fn refresh(&mut self) -> CoreResult<()> {
        let mut expanded = HashSet::new();
        self.root.collect_expanded(&mut expanded);
        self.root.reload(&expanded)?;
        self.root.expanded = true;
        tracing::debug!("Refreshed file tree at {}", self.root.path.display());
        Ok(())
    }

    /// The root and every directory whose contents are on screen.
    pub fn open_dirs(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        self.root.collect_open_dirs(&mut out);
        out
    }

    /// Visible nodes in display order with their depth below the root.
    pub fn visible(&self) -> Vec<(usize, &FileNode)> {
        let mut out = Vec::new();
        self.root.flatten(0, &mut out);
        out
    }
}

/// Watches a set of directories (not their subtrees) and reports batches
/// of changed paths.
pub struct WorkspaceWatcher {
    _watcher: RecommendedWatcher,
    changes: mpsc::Receiver<PathBuf>,
}

impl WorkspaceWatcher {
    /// Watches each of `dirs` non-recursively. The first directory must be
    /// watchable; the others are skipped with a warning if they are not.
    pub fn new(dirs: &[PathBuf]) -> CoreResult<Self> {
        let (tx, changes) = mpsc::channel(256);

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) if is_structural(&event.kind) => {
                    for path in event.paths {
                        // Receiver gone means the watcher is being dropped
                        if tx.blocking_send(path).is_err() {
                            return;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("File watcher error: {}", e),
            }
        })?;

        for (i, dir) in dirs.iter().enumerate() {
            match watcher.watch(dir, RecursiveMode::NonRecursive) {
                Ok(()) => {}
                Err(e) if i == 0 => return Err(e.into()),
                Err(e) => tracing::warn!("Not watching {}: {}", dir.display(), e),
            }
        }

        Ok(Self {
            _watcher: watcher,
            changes,
        })
    }

    /// Waits for the next change and collects whatever else arrives within
    /// [`WATCH_DEBOUNCE`] of it. Returns `None` once the watcher has stopped.
    pub async fn next_batch(&mut self) -> Option<Vec<PathBuf>> {
        let first = self.changes.recv().await?;
        let mut batch = vec![first];
        loop {
            match tokio::time::timeout(WATCH_DEBOUNCE, self.changes.recv()).await {
                Ok(Some(path)) => {
                    if !batch.contains(&path) {
                        batch.push(path);
                    }
                }
                Ok(None) | Err(_) => break,
            }
        }
        Some(batch)
    }
}

/// Only changes that can alter the tree's shape are interesting.
fn is_structural(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_)
            | EventKind::Remove(_)
            | EventKind::Modify(notify::event::ModifyKind::Name(_))
    )
}
