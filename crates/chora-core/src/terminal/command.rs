//! Built-in commands and `cd` target resolution.

use std::path::{Component, Path, PathBuf};

/// What a submitted line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Empty the output view
    Clear,
    /// Change directory; the target may be empty (bare `cd`)
    ChangeDir(&'a str),
    /// Anything else goes to the shell untouched
    External(&'a str),
}

impl<'a> Command<'a> {
    /// Classifies an already trimmed, non-empty line.
    pub fn parse(line: &'a str) -> Self {
        if line == "clear" {
            return Command::Clear;
        }
        if line == "cd" {
            return Command::ChangeDir("");
        }
        match line.strip_prefix("cd") {
            Some(rest) if rest.starts_with(char::is_whitespace) => Command::ChangeDir(rest.trim()),
            _ => Command::External(line),
        }
    }
}

/// Resolves a `cd` target against `cwd`. The result is not checked for
/// existence.
pub fn resolve_target(target: &str, cwd: &Path, home: &Path) -> PathBuf {
    let joined = if target.is_empty() || target == "~" {
        home.to_path_buf()
    } else if let Some(rest) = target
        .strip_prefix("~/")
        .or_else(|| target.strip_prefix("~\\"))
    {
        home.join(rest)
    } else {
        let path = Path::new(target);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        }
    };
    normalize(&joined)
}

/// Removes `.` and folds `..` without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if !at_root {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("clear"), Command::Clear);
        assert_eq!(Command::parse("cd"), Command::ChangeDir(""));
        assert_eq!(Command::parse("cd   src "), Command::ChangeDir("src"));
        assert_eq!(Command::parse("cdrom"), Command::External("cdrom"));
        assert_eq!(Command::parse("clear all"), Command::External("clear all"));
        assert_eq!(Command::parse("ls -la"), Command::External("ls -la"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_target() {
        let home = Path::new("/home/ana");
        let cwd = Path::new("/home/ana/src");

        assert_eq!(resolve_target("", cwd, home), home);
        assert_eq!(resolve_target("~", cwd, home), home);
        assert_eq!(resolve_target("~/docs", cwd, home), home.join("docs"));
        assert_eq!(resolve_target("/etc", cwd, home), Path::new("/etc"));
        assert_eq!(resolve_target("lib", cwd, home), Path::new("/home/ana/src/lib"));
        assert_eq!(resolve_target("../x/./y", cwd, home), Path::new("/home/ana/x/y"));
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/a/../../..")), Path::new("/"));
        assert_eq!(normalize(Path::new("/a/./b/..")), Path::new("/a"));
    }
}
