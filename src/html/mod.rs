//! HTML reading and writing for tag-stream documents.

pub mod reader;
pub mod style;
pub mod writer;

pub use reader::{ReadOptions, read_html};
pub use writer::{WriteOptions, write_html};
