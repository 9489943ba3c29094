//! Document model: tags, anchors, and the flat event stream.

pub mod anchor;
pub mod stream;
pub mod tags;

pub use anchor::{Anchor, Image};
pub use stream::{BULLET_STR, Event, plain_text};
pub use tags::{Color, Justification, ParagraphType, Tag, TagKey, TagTable, TextMod};
