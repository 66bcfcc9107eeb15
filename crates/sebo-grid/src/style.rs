//! Text styling for cells

/// Text style applied to a cell.
///
/// The catalog tools only care about weight and slant; in particular an
/// italic cell marks a column whose value is produced by a sheet formula
/// rather than typed by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
}

impl TextStyle {
    /// Create a plain (non-bold, non-italic) style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// True when no styling is applied
    pub fn is_plain(&self) -> bool {
        *self == TextStyle::default()
    }
}
