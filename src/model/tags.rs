//! Style and structural tag descriptors.
//!
//! A document is described by a flat stream of begin/end events referencing
//! these tags. Tags form a closed set of variants so that serialization and
//! parsing can dispatch with an exhaustive match instead of runtime
//! type-sniffing.

use std::collections::HashMap;
use std::fmt;

/// Simple character modifiers with fixed HTML element mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextMod {
    Bold,
    Italic,
    Underline,
    /// Monospace / teletype text (`<tt>`).
    Monospace,
    /// Unbreakable text (`<nobr>`).
    NoWrap,
}

impl TextMod {
    /// The HTML element name this modifier maps to.
    pub fn html_name(&self) -> &'static str {
        match self {
            TextMod::Bold => "b",
            TextMod::Italic => "i",
            TextMod::Underline => "u",
            TextMod::Monospace => "tt",
            TextMod::NoWrap => "nobr",
        }
    }

    /// Inverse of [`html_name`](Self::html_name).
    pub fn from_html_name(name: &str) -> Option<TextMod> {
        match name {
            "b" => Some(TextMod::Bold),
            "i" => Some(TextMod::Italic),
            "u" => Some(TextMod::Underline),
            "tt" => Some(TextMod::Monospace),
            "nobr" => Some(TextMod::NoWrap),
            _ => None,
        }
    }
}

/// Block justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Justification {
    Left,
    Center,
    Right,
    /// Justified text; serializes as CSS `justify`.
    Fill,
}

impl Justification {
    /// The `text-align` value emitted for this justification.
    pub fn css_value(&self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
            Justification::Fill => "justify",
        }
    }
}

/// How a paragraph or list item is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParagraphType {
    /// Plain block with no marker.
    #[default]
    None,
    /// Bulleted list item.
    Bullet,
}

/// An RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS hex color (`#rgb` or `#rrggbb`, leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Color::rgb(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::rgb(r, g, b))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A style or structural region descriptor.
///
/// `Paragraph` tags are synthetic: they are inserted by paragraph synthesis
/// in the write pipeline and never appear in buffer-produced streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Mod(TextMod),
    /// Font family name.
    Family(String),
    /// Font size in points.
    Size(u32),
    FgColor(Color),
    BgColor(Color),
    Justify(Justification),
    /// Indentation region. Levels start at 1; in the flat stream encoding a
    /// begin event means "set the current indent to this level".
    Indent {
        level: u32,
        par_type: ParagraphType,
    },
    /// Wraps the literal bullet glyph inserted in front of bulleted items.
    Bullet,
    Link {
        href: String,
    },
    Paragraph(ParagraphType),
}

impl Tag {
    pub fn indent(level: u32, par_type: ParagraphType) -> Tag {
        Tag::Indent { level, par_type }
    }

    /// The stable identity key used for end-event matching, adjacent-region
    /// merging, and [`TagTable`] lookup.
    ///
    /// Keys carry the discriminating parameters of each variant: an indent
    /// tag keys on its level (two levels are distinct regions, but the
    /// paragraph type is an attribute, not an identity), and paragraph tags
    /// key on the variant alone.
    pub fn key(&self) -> TagKey {
        match self {
            Tag::Mod(m) => TagKey::Mod(*m),
            Tag::Family(f) => TagKey::Family(f.clone()),
            Tag::Size(n) => TagKey::Size(*n),
            Tag::FgColor(c) => TagKey::FgColor(*c),
            Tag::BgColor(c) => TagKey::BgColor(*c),
            Tag::Justify(j) => TagKey::Justify(*j),
            Tag::Indent { level, .. } => TagKey::Indent(*level),
            Tag::Bullet => TagKey::Bullet,
            Tag::Link { href } => TagKey::Link(href.clone()),
            Tag::Paragraph(_) => TagKey::Paragraph,
        }
    }

    /// Stable tags form the block skeleton of a document. They are produced
    /// properly nested and are never split by normalization; style spans are
    /// clipped to fit inside them.
    pub fn is_stable(&self) -> bool {
        matches!(self, Tag::Indent { .. } | Tag::Paragraph(_))
    }
}

/// Stable identity key of a [`Tag`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagKey {
    Mod(TextMod),
    Family(String),
    Size(u32),
    FgColor(Color),
    BgColor(Color),
    Justify(Justification),
    Indent(u32),
    Bullet,
    Link(String),
    Paragraph,
}

/// Lookup table from tag identity keys to tag descriptors.
///
/// The write pipeline resolves indent tags it has to synthesize (when the
/// flat stream jumps several levels at once) through this table, so a caller
/// can supply per-level paragraph types. Levels missing from the table fall
/// back to a plain indent.
#[derive(Debug, Clone, Default)]
pub struct TagTable {
    tags: HashMap<TagKey, Tag>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag under its identity key.
    pub fn insert(&mut self, tag: Tag) {
        self.tags.insert(tag.key(), tag);
    }

    pub fn lookup(&self, key: &TagKey) -> Option<&Tag> {
        self.tags.get(key)
    }

    /// Resolve the indent tag for `level`.
    pub fn indent_tag(&self, level: u32) -> Tag {
        self.lookup(&TagKey::Indent(level))
            .cloned()
            .unwrap_or(Tag::Indent {
                level,
                par_type: ParagraphType::None,
            })
    }
}
