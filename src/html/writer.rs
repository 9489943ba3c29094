//! Tag stream to HTML serialization.
//!
//! The stream is first rewritten into properly nested regions (paragraph
//! synthesis, indent nesting, normalization), built into a tree, then
//! restructured to HTML list semantics and cleaned of the newlines that
//! block elements supply on their own.

use crate::dom::{Dom, NodeData, NodeId};
use crate::error::{Error, Result};
use crate::model::anchor::Anchor;
use crate::model::stream::Event;
use crate::model::tags::{ParagraphType, Tag, TagTable, TextMod};
use crate::transform::{find_paragraphs, nest_indents, normalize_tags};

const XHTML_HEADER: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd\">\n<html xmlns=\"http://www.w3.org/1999/xhtml\">\n<head>\n<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\n";

const HTML_HEADER: &str = "<html>\n<head>\n<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" />\n";

const FOOTER: &str = "</body></html>";

/// Options for [`write_html`].
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Document title, emitted in the header.
    pub title: Option<String>,
    /// Emit only body content, no document header or footer.
    pub partial: bool,
    /// Emit XHTML (self-closing void elements) instead of legacy HTML.
    pub xhtml: bool,
}

impl WriteOptions {
    pub fn xhtml() -> Self {
        WriteOptions {
            xhtml: true,
            ..Default::default()
        }
    }
}

/// Serialize a flat tag stream to HTML text.
pub fn write_html(stream: Vec<Event>, table: &TagTable, opts: &WriteOptions) -> Result<String> {
    let events = normalize_tags(nest_indents(find_paragraphs(stream), table));
    let mut dom = Dom::from_events(events);
    prepare(&mut dom);

    let mut out = String::new();
    if !opts.partial {
        out.push_str(if opts.xhtml { XHTML_HEADER } else { HTML_HEADER });
        if let Some(title) = &opts.title {
            out.push_str(&format!("<title>{}</title>\n", escape_attr(title)));
        }
        out.push_str("</head><body>");
    }

    serialize(&dom, dom.root(), opts.xhtml, &mut out)?;

    if !opts.partial {
        out.push_str(FOOTER);
    }
    Ok(out)
}

/// Restructure and clean the tree before serialization.
fn prepare(dom: &mut Dom) {
    restructure(dom, dom.root(), false);
    let mut last_leaf = None;
    cleanup(dom, dom.root(), &mut last_leaf);
}

/// Rewrite paragraphs to HTML list semantics: a paragraph inside an indent
/// region becomes a list item, a top-level paragraph is unwrapped, and an
/// indent directly inside another indent gets a list item wrapper so nested
/// `<ul>` elements stay inside an `<li>`.
fn restructure(dom: &mut Dom, id: NodeId, within_indent: bool) {
    let children: Vec<NodeId> = dom.children(id).collect();
    for child in children {
        let data = dom.get(child).map(|n| n.data.clone());
        match data {
            Some(NodeData::Tag(Tag::Paragraph(par_type))) => {
                if within_indent {
                    let item = dom.alloc(NodeData::ListItem(par_type));
                    dom.insert_before(child, item);
                    dom.detach(child);
                    dom.reparent_children(child, item);
                } else {
                    // Splice the paragraph's children into its place.
                    while let Some(grandchild) = dom.first_child(child) {
                        dom.detach(grandchild);
                        dom.insert_before(child, grandchild);
                    }
                    dom.detach(child);
                }
            }
            Some(NodeData::Tag(Tag::Indent { .. })) => {
                if within_indent {
                    let item = dom.alloc(NodeData::ListItem(ParagraphType::None));
                    dom.insert_before(child, item);
                    dom.detach(child);
                    dom.append(item, child);
                }
                restructure(dom, child, true);
            }
            Some(_) => restructure(dom, child, within_indent),
            None => {}
        }
    }
}

/// Preorder cleanup walk: drop bullet glyph subtrees, trim the newlines that
/// rules and list boundaries supply on their own, and delete emptied tags.
fn cleanup(dom: &mut Dom, id: NodeId, last_leaf: &mut Option<NodeId>) {
    let data = dom.get(id).map(|n| n.data.clone());

    if matches!(&data, Some(NodeData::Tag(Tag::Bullet))) {
        dom.detach(id);
        return;
    }

    // A rule or list supplies its own line break; drop the preceding one.
    if matches!(
        &data,
        Some(NodeData::Anchor(Anchor::Rule)) | Some(NodeData::Tag(Tag::Indent { .. }))
    ) {
        trim_trailing_newline(dom, *last_leaf);
    }

    // The closing of a list item conveys a line break; trim it from the
    // item's rightmost descendant unless a nested list will handle it.
    if matches!(&data, Some(NodeData::ListItem(_))) {
        let mut child = dom.last_child(id);
        while let Some(c) = child {
            if dom.is_leaf(c) {
                break;
            }
            if matches!(dom.get(c).map(|n| &n.data), Some(NodeData::Tag(Tag::Indent { .. }))) {
                child = None;
                break;
            }
            child = dom.last_child(c);
        }
        trim_trailing_newline(dom, child);
    }

    if dom.is_leaf(id) {
        // The rule also supplies the break that follows it.
        if matches!(
            last_leaf.and_then(|l| dom.get(l)).map(|n| &n.data),
            Some(NodeData::Anchor(Anchor::Rule))
        ) {
            if let Some(NodeData::Text(text)) = dom.get_mut(id).map(|n| &mut n.data) {
                if text.starts_with('\n') {
                    text.remove(0);
                }
            }
        }

        if !matches!(data, Some(NodeData::Tag(_)) | Some(NodeData::ListItem(_))) {
            *last_leaf = Some(id);
        }
    } else {
        let children: Vec<NodeId> = dom.children(id).collect();
        for child in children {
            cleanup(dom, child, last_leaf);
        }
    }

    // Emptied wrapper tags serialize to nothing useful; drop them.
    if matches!(data, Some(NodeData::Tag(_)) | Some(NodeData::ListItem(_))) && dom.is_leaf(id) {
        dom.detach(id);
    }
}

fn trim_trailing_newline(dom: &mut Dom, id: Option<NodeId>) {
    if let Some(id) = id {
        if let Some(NodeData::Text(text)) = dom.get_mut(id).map(|n| &mut n.data) {
            if text.ends_with('\n') {
                text.pop();
            }
        }
    }
}

fn serialize(dom: &Dom, id: NodeId, xhtml: bool, out: &mut String) -> Result<()> {
    for child in dom.children(id) {
        let Some(node) = dom.get(child) else { continue };
        match &node.data {
            NodeData::Root => {}
            NodeData::Text(text) => out.push_str(&escape_text(text, xhtml)),
            NodeData::Anchor(anchor) => write_anchor(anchor, xhtml, out),
            NodeData::ListItem(par_type) => {
                match par_type {
                    ParagraphType::Bullet => out.push_str("<li>"),
                    ParagraphType::None => {
                        out.push_str("<li style=\"list-style-type:none\">")
                    }
                }
                serialize(dom, child, xhtml, out)?;
                out.push_str("</li>");
            }
            NodeData::List => {
                return Err(Error::Serialize("list container node".to_string()));
            }
            NodeData::Tag(tag) => {
                let close = write_tag_begin(tag, out)?;
                serialize(dom, child, xhtml, out)?;
                out.push_str(close);
            }
        }
    }
    Ok(())
}

/// Write a tag's opening markup and return its closing markup.
fn write_tag_begin(tag: &Tag, out: &mut String) -> Result<&'static str> {
    match tag {
        Tag::Mod(m) => {
            out.push('<');
            out.push_str(m.html_name());
            out.push('>');
            Ok(match m {
                TextMod::Bold => "</b>",
                TextMod::Italic => "</i>",
                TextMod::Underline => "</u>",
                TextMod::Monospace => "</tt>",
                TextMod::NoWrap => "</nobr>",
            })
        }
        Tag::Size(points) => {
            out.push_str(&format!("<span style=\"font-size: {points}pt\">"));
            Ok("</span>")
        }
        Tag::Family(family) => {
            out.push_str(&format!("<span style=\"font-family: {family}\">"));
            Ok("</span>")
        }
        Tag::FgColor(color) => {
            out.push_str(&format!("<span style=\"color: {color}\">"));
            Ok("</span>")
        }
        Tag::BgColor(color) => {
            out.push_str(&format!("<span style=\"background-color: {color}\">"));
            Ok("</span>")
        }
        Tag::Justify(justify) => {
            out.push_str(&format!(
                "<div style=\"text-align: {}\">",
                justify.css_value()
            ));
            Ok("</div>")
        }
        Tag::Indent { .. } => {
            out.push_str("<ul>");
            Ok("</ul>")
        }
        Tag::Link { href } => {
            out.push_str(&format!("<a href=\"{}\">", escape_attr(href)));
            Ok("</a>")
        }
        // Paragraphs are unwrapped and bullets dropped before serialization.
        Tag::Paragraph(_) | Tag::Bullet => {
            Err(Error::Serialize(format!("unexpected tag {tag:?}")))
        }
    }
}

fn write_anchor(anchor: &Anchor, xhtml: bool, out: &mut String) {
    match anchor {
        Anchor::Image(img) => {
            out.push_str(&format!("<img src=\"{}\"", escape_attr(&img.filename)));
            if let Some(width) = img.width {
                out.push_str(&format!(" width=\"{width}\""));
            }
            if let Some(height) = img.height {
                out.push_str(&format!(" height=\"{height}\""));
            }
            out.push_str(if xhtml { " />" } else { " >" });
        }
        Anchor::Rule => out.push_str(if xhtml { "<hr/>" } else { "<hr>" }),
    }
}

/// Escape text content.
///
/// Every second space of a run becomes `&nbsp;` so runs survive HTML
/// whitespace collapsing; replacement is non-overlapping left to right, so
/// `"   "` becomes `" &nbsp; "`.
fn escape_text(text: &str, xhtml: bool) -> String {
    let text = text
        .replace('&', "&amp;")
        .replace('>', "&gt;")
        .replace('<', "&lt;")
        .replace('\t', "&#09;")
        .replace("  ", " &nbsp;");
    if xhtml {
        text.replace('\n', "<br/>\n")
    } else {
        text.replace('\n', "<br>\n")
    }
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
