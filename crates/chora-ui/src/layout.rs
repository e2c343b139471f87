//! Geometry shared by the editor and its line-number gutter.
//!
//! The gutter and the editor sit side by side in one scrollable, so both
//! use the same padding and line height and scroll together.

use std::fmt::Write;

/// Space above the first line and below the last one.
pub const EDITOR_PADDING: f32 = 16.0;

pub const TOOLBAR_HEIGHT: f32 = 36.0;
pub const TAB_BAR_HEIGHT: f32 = 36.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;

/// Line numbers `1..=line_count`, one per row.
pub fn gutter_text(line_count: usize) -> String {
    let line_count = line_count.max(1);
    let mut out = String::with_capacity(line_count * 4);
    for n in 1..=line_count {
        if n > 1 {
            out.push('\n');
        }
        let _ = write!(out, "{}", n);
    }
    out
}

/// Total height of a document with `line_count` lines.
pub fn content_height(line_count: usize, line_height: f32) -> f32 {
    line_count.max(1) as f32 * line_height + 2.0 * EDITOR_PADDING
}

/// Scroll offset that brings `line` into a viewport showing `height`
/// pixels from `offset`, or `None` when it is already visible.
pub fn reveal_offset(line: usize, line_height: f32, offset: f32, height: f32) -> Option<f32> {
    let top = EDITOR_PADDING + line as f32 * line_height;
    let bottom = top + line_height;

    if top < offset {
        Some((top - EDITOR_PADDING).max(0.0))
    } else if height > 0.0 && bottom > offset + height {
        Some(bottom + EDITOR_PADDING - height)
    } else {
        None
    }
}

/// Clamps a scroll offset to what a document of `line_count` lines allows.
pub fn clamp_offset(offset: f32, line_count: usize, line_height: f32, height: f32) -> f32 {
    let max = (content_height(line_count, line_height) - height).max(0.0);
    offset.clamp(0.0, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gutter_text() {
        assert_eq!(gutter_text(0), "1");
        assert_eq!(gutter_text(3), "1\n2\n3");
        assert_eq!(gutter_text(12).lines().count(), 12);
    }

    #[test]
    fn test_reveal_visible_line() {
        assert_eq!(reveal_offset(3, 20.0, 0.0, 240.0), None);
    }

    #[test]
    fn test_reveal_below() {
        let offset = reveal_offset(20, 20.0, 0.0, 200.0).unwrap();
        let bottom = EDITOR_PADDING + 21.0 * 20.0;
        assert_eq!(offset, bottom + EDITOR_PADDING - 200.0);
        assert_eq!(reveal_offset(20, 20.0, offset, 200.0), None);
    }

    #[test]
    fn test_reveal_above() {
        assert_eq!(reveal_offset(0, 20.0, 100.0, 200.0), Some(0.0));
        assert_eq!(reveal_offset(10, 20.0, 400.0, 200.0), Some(200.0));
    }

    #[test]
    fn test_clamp_offset() {
        assert_eq!(clamp_offset(-5.0, 10, 20.0, 100.0), 0.0);
        assert_eq!(clamp_offset(1000.0, 10, 20.0, 100.0), 132.0);
        assert_eq!(clamp_offset(1000.0, 2, 20.0, 500.0), 0.0);
    }
}
