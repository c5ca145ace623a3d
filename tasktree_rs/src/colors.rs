//! Terminal color utilities for CLI output.
//!
//! Provides ANSI color codes and the semantic helpers used by usage
//! rendering and routing reports.

use std::io::IsTerminal;

use crate::types::ColorMode;

// ============================================================================
// ANSI Color Codes
// ============================================================================

pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub const DIM: &str = "\x1b[2m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const RESET: &str = "\x1b[0m";

// ============================================================================
// Color State
// ============================================================================

/// Determines if colors should be used based on ColorMode and terminal detection.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    }
}

/// Colorizer that can be passed around to format functions.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    /// Painter that never emits escape codes.
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    // === Semantic colors ===

    /// Task names and invocations - YELLOW
    pub fn task(&self, s: &str) -> String {
        self.wrap(s, YELLOW)
    }

    /// `<command>` style hints - CYAN
    pub fn hint(&self, s: &str) -> String {
        self.wrap(s, CYAN)
    }

    /// Required placeholder - GREEN
    pub fn placeholder(&self, s: &str) -> String {
        self.wrap(s, GREEN)
    }

    /// Optional placeholder: plain brackets around a green name.
    pub fn optional_placeholder(&self, s: &str) -> String {
        if self.enabled {
            format!("{RESET}[{}{RESET}]", self.placeholder(s))
        } else {
            format!("[{s}]")
        }
    }

    /// Group titles
    pub fn underline(&self, s: &str) -> String {
        self.wrap(s, UNDERLINE)
    }

    pub fn dim(&self, s: &str) -> String {
        self.wrap(s, DIM)
    }

    // === Raw color access ===

    pub fn wrap(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

/// Number of characters a terminal would display for `s`, skipping CSI escape
/// sequences.
pub fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // CSI ends at the first byte in 0x40..=0x7e
            for c in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&c) {
                    break;
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

/// Right-pad `s` with spaces to `width` visible columns.
pub fn pad_visible(s: &str, width: usize) -> String {
    let visible = visible_width(s);
    if visible >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - visible))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_painter_disabled() {
        let p = Painter { enabled: false };
        assert_eq!(p.task("build"), "build");
        assert_eq!(p.placeholder("file"), "file");
        assert_eq!(p.optional_placeholder("mode"), "[mode]");
    }

    #[test]
    fn test_painter_enabled() {
        let p = Painter { enabled: true };
        assert_eq!(p.task("build"), "\x1b[33mbuild\x1b[0m");
        assert_eq!(p.placeholder("file"), "\x1b[32mfile\x1b[0m");
        assert_eq!(p.underline("Group"), "\x1b[4mGroup\x1b[0m");
    }

    #[test]
    fn test_visible_width_ignores_escapes() {
        let p = Painter { enabled: true };
        assert_eq!(visible_width("build"), 5);
        assert_eq!(visible_width(&p.task("build")), 5);
        assert_eq!(visible_width(&p.optional_placeholder("mode")), 6);
    }

    #[test]
    fn test_pad_visible() {
        let p = Painter { enabled: true };
        let padded = pad_visible(&p.task("db"), 6);
        assert_eq!(visible_width(&padded), 6);
        assert!(padded.ends_with("    "));
        assert_eq!(pad_visible("toolong", 3), "toolong");
    }

    #[test]
    fn test_color_mode_detection() {
        assert!(is_enabled(ColorMode::Always));
        assert!(!is_enabled(ColorMode::Never));
        // Auto depends on terminal, can't reliably test
    }
}
