//! Stream rewriting passes shared by the two conversion directions.

pub mod indent;
pub mod normalize;
pub mod paragraphs;

pub use indent::{nest_indents, unnest_indents};
pub use normalize::normalize_tags;
pub use paragraphs::find_paragraphs;
