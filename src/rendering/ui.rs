//! # User Interface Elements
//!
//! The message panel shown under the map.

use crate::game::MessageLog;

/// Shows the newest messages, oldest first, clipped to a column width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePanel {
    /// Number of lines shown
    pub lines: usize,
    /// Maximum characters per line
    pub width: usize,
}

impl Default for MessagePanel {
    fn default() -> Self {
        Self::new(5, 80)
    }
}

impl MessagePanel {
    /// Creates a panel of `lines` rows, each at most `width` characters.
    pub fn new(lines: usize, width: usize) -> Self {
        Self { lines, width }
    }

    /// Renders the panel, one message per line, each ending in `\n`.
    pub fn render(&self, log: &MessageLog) -> String {
        log.recent(self.lines)
            .map(|message| {
                let mut line: String = message.chars().take(self.width).collect();
                line.push('\n');
                line
            })
            .collect()
    }
}
