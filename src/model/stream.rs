//! The flat tag-stream document representation.
//!
//! A document is a sequence of [`Event`]s: text runs and anchors interleaved
//! with begin/end markers for tagged regions. The stream is the interchange
//! format between an editing buffer and the HTML codec; both conversion
//! directions consume and produce it.

use crate::model::anchor::Anchor;
use crate::model::tags::Tag;

/// The literal glyph prefixed to bulleted list items in the text flow.
pub const BULLET_STR: &str = "\u{2022} ";

/// One item of a flat tag stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Open a tagged region.
    Begin(Tag),
    /// Close the innermost region whose tag key matches.
    End(Tag),
    /// A run of text.
    Text(String),
    /// A zero-width embedded object.
    Anchor(Anchor),
}

impl Event {
    pub fn text(s: impl Into<String>) -> Event {
        Event::Text(s.into())
    }
}

/// Concatenated text content of a stream, with anchors rendered as nothing.
/// Mostly useful in tests.
pub fn plain_text(events: &[Event]) -> String {
    let mut out = String::new();
    for ev in events {
        if let Event::Text(t) = ev {
            out.push_str(t);
        }
    }
    out
}
