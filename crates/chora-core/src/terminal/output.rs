//! Terminal output buffer.

use std::collections::VecDeque;

/// How a line should be coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Prompt plus the command as typed
    Echo,
    /// Child stdout
    Stdout,
    /// Child stderr and terminal errors
    Error,
    /// Non-zero exit codes and notices
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub kind: LineKind,
}

/// Bounded list of output lines; the oldest are dropped first.
#[derive(Debug, Clone)]
pub struct Scrollback {
    lines: VecDeque<OutputLine>,
    capacity: usize,
}

impl Scrollback {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, text: impl Into<String>, kind: LineKind) {
        self.lines.push_back(OutputLine {
            text: text.into(),
            kind,
        });
        self.trim();
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.trim();
    }

    fn trim(&mut self) {
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&OutputLine> {
        self.lines.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_drops_oldest() {
        let mut out = Scrollback::new(3);
        for i in 0..5 {
            out.push(format!("line {}", i), LineKind::Stdout);
        }
        let texts: Vec<_> = out.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["line 2", "line 3", "line 4"]);

        out.set_capacity(1);
        assert_eq!(out.len(), 1);
        assert_eq!(out.last().map(|l| l.text.as_str()), Some("line 4"));
    }
}
