//! # Rendering Module
//!
//! Plain-text presentation of the map and message log. Rendering only reads
//! engine state and runs after a turn has finished.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::game::Engine;

/// Renders a full frame: the map followed by the message panel.
pub fn render_frame(engine: &Engine, display: &TextDisplay, panel: &MessagePanel) -> String {
    let mut frame = display.render(engine.map());
    frame.push_str(&panel.render(engine.messages()));
    frame
}
