//! # notemark
//!
//! Bidirectional HTML import/export for attributed rich-text note documents.
//!
//! A document is modeled as a flat [`Event`] stream: text runs and anchor
//! objects interleaved with begin/end markers for style and structural
//! regions ([`Tag`]). Regions may overlap arbitrarily and list indentation
//! is encoded as "set the indent level" markers, so conversion to and from
//! HTML's nested tree is the real work: paragraph boundaries are
//! synthesized from embedded newlines, indent levels are rewritten into
//! properly nested lists, and overlapping style spans are normalized before
//! the tree is built.
//!
//! ## Quick Start
//!
//! ```
//! use notemark::{Event, Tag, TagTable, TextMod};
//! use notemark::{ReadOptions, WriteOptions, read_html, write_html};
//!
//! let stream = vec![
//!     Event::Begin(Tag::Mod(TextMod::Bold)),
//!     Event::text("hello"),
//!     Event::End(Tag::Mod(TextMod::Bold)),
//! ];
//!
//! let opts = WriteOptions { partial: true, xhtml: true, ..Default::default() };
//! let html = write_html(stream.clone(), &TagTable::new(), &opts).unwrap();
//! assert_eq!(html, "<b>hello</b>");
//!
//! let back = read_html([html], &ReadOptions { partial: true, ..Default::default() }).unwrap();
//! assert_eq!(back, stream);
//! ```

pub mod dom;
pub mod error;
pub mod html;
pub mod model;
pub mod transform;

pub use error::{Error, Result};
pub use html::{ReadOptions, WriteOptions, read_html, write_html};
pub use model::{
    Anchor, BULLET_STR, Color, Event, Image, Justification, ParagraphType, Tag, TagTable, TextMod,
    plain_text,
};
