//! Fenced code block tracking.
//!
//! Used when admonition syntax inside code samples must be left alone.

/// Opening fence of the block currently being skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenFence {
    marker: char,
    len: usize,
}

/// Line-by-line tracker for backtick and tilde code fences.
///
/// A block opens on a run of three or more `` ` `` or `~` and closes on a
/// run of the same character that is at least as long and carries nothing
/// but whitespace after it.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<OpenFence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the last line fed to [`update`](Self::update) left us inside a block.
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` if the line opened or closed a block.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let Some((marker, len, rest)) = marker_run(line.trim_start()) else {
            return false;
        };

        match self.open {
            Some(open) => {
                let closes =
                    marker == open.marker && len >= open.len && rest.trim().is_empty();
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = Some(OpenFence { marker, len });
                true
            }
        }
    }
}

/// Split a leading run of at least three fence characters off `trimmed`.
fn marker_run(trimmed: &str) -> Option<(char, usize, &str)> {
    let marker = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|&c| c == marker).count();
    if len < 3 {
        return None;
    }
    // Fence characters are ASCII, so `len` is also a byte offset.
    Some((marker, len, &trimmed[len..]))
}
