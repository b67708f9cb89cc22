//! Text styling for rendered diffs.

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Styling applied to rendered diff text.
///
/// Passed explicitly to the renderer; nothing here touches process-wide
/// color state. When disabled every method returns its input unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Whether ANSI styling is emitted.
    pub enabled: bool,
}

impl Palette {
    /// No styling.
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// ANSI styling via `colored`. Still honours `NO_COLOR` and friends.
    pub const fn ansi() -> Self {
        Self { enabled: true }
    }

    /// Default text style, wrapped around a whole rendered block.
    pub fn neutral(&self, text: &str) -> String {
        if self.enabled {
            text.white().to_string()
        } else {
            text.to_string()
        }
    }

    /// Style for expected values.
    pub fn positive(&self, text: &str) -> String {
        if self.enabled {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Style for paths and values that should not be there.
    pub fn attention(&self, text: &str) -> String {
        if self.enabled {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}
