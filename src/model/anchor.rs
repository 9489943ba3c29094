//! Inline non-text objects.

/// A zero-width object occupying one position in the text flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// An embedded image.
    Image(Image),
    /// A horizontal rule.
    Rule,
}

/// An embedded image referenced by filename.
///
/// Dimensions are display overrides; `None` means natural size.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    pub filename: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Image {
    pub fn new(filename: impl Into<String>) -> Self {
        Image {
            filename: filename.into(),
            width: None,
            height: None,
        }
    }

    /// Set the display size override.
    pub fn scale(&mut self, width: Option<u32>, height: Option<u32>) {
        self.width = width;
        self.height = height;
    }
}
