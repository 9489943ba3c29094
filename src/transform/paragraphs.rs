//! Paragraph synthesis for the write direction.
//!
//! Editing buffers produce flat streams with no paragraph markers; block
//! boundaries exist only as `\n` characters in text runs. This pass wraps
//! each paragraph of content in a synthetic [`Tag::Paragraph`] region so the
//! later tree passes can turn paragraphs into list items.

use memchr::memchr;

use crate::model::stream::Event;
use crate::model::tags::{ParagraphType, Tag};

/// Wrap each paragraph of content in a begin/end pair of paragraph tags.
///
/// A paragraph opens lazily at the first text or anchor and closes just
/// after the `\n` that ends it (the newline stays inside the region). The
/// paragraph type is that of the innermost open indent region at the time
/// the paragraph opens. Tag begin/end events are held back until the next
/// content so they fall inside the paragraph they style.
pub fn find_paragraphs(events: Vec<Event>) -> Vec<Event> {
    let mut out = Vec::with_capacity(events.len());
    let mut within = false;
    let mut par_type = ParagraphType::None;
    let mut par_stack: Vec<Tag> = Vec::new();
    // Tag events seen since the last content, emitted before the next one.
    let mut pending: Vec<Event> = Vec::new();

    fn open(out: &mut Vec<Event>, stack: &mut Vec<Tag>, pt: ParagraphType) {
        let tag = Tag::Paragraph(pt);
        out.push(Event::Begin(tag.clone()));
        stack.push(tag);
    }

    for ev in events {
        match ev {
            Event::Text(text) => {
                out.append(&mut pending);

                let mut rest = text.as_str();
                while let Some(pos) = memchr(b'\n', rest.as_bytes()) {
                    if !within {
                        within = true;
                        open(&mut out, &mut par_stack, par_type);
                    }
                    out.push(Event::Text(rest[..=pos].to_string()));
                    if let Some(tag) = par_stack.pop() {
                        out.push(Event::End(tag));
                    }
                    within = false;
                    rest = &rest[pos + 1..];
                }
                if !rest.is_empty() {
                    if !within {
                        within = true;
                        open(&mut out, &mut par_stack, par_type);
                    }
                    out.push(Event::Text(rest.to_string()));
                }
            }
            Event::Anchor(anchor) => {
                out.append(&mut pending);
                if !within {
                    within = true;
                    open(&mut out, &mut par_stack, par_type);
                }
                out.push(Event::Anchor(anchor));
            }
            other => {
                match &other {
                    Event::Begin(Tag::Indent { par_type: pt, .. }) => par_type = *pt,
                    Event::End(Tag::Indent { .. }) => par_type = ParagraphType::None,
                    _ => {}
                }
                pending.push(other);
            }
        }
    }

    if within {
        if let Some(tag) = par_stack.pop() {
            out.push(Event::End(tag));
        }
    }
    out.append(&mut pending);
    out
}
