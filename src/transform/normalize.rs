//! Tag-stream normalization.
//!
//! Buffer streams may interleave region boundaries arbitrarily; trees
//! cannot. This pass rewrites a stream so regions nest properly: stable tags
//! (indents and paragraphs) keep their positions as the block skeleton, and
//! style spans are clipped at every stable boundary by closing before it and
//! reopening after. A peephole merges the resulting back-to-back identical
//! style regions and drops empty ones.

use crate::model::stream::Event;
use crate::model::tags::Tag;

/// Rewrite a stream so all begin/end pairs nest properly.
pub fn normalize_tags(events: Vec<Event>) -> Vec<Event> {
    let mut out = Vec::with_capacity(events.len());
    // Currently open style spans, outermost first.
    let mut open: Vec<Tag> = Vec::new();

    for ev in events {
        match ev {
            Event::Begin(tag) if tag.is_stable() => {
                for t in open.iter().rev() {
                    push(&mut out, Event::End(t.clone()));
                }
                push(&mut out, Event::Begin(tag));
                for t in open.iter() {
                    push(&mut out, Event::Begin(t.clone()));
                }
            }
            Event::End(tag) if tag.is_stable() => {
                for t in open.iter().rev() {
                    push(&mut out, Event::End(t.clone()));
                }
                push(&mut out, Event::End(tag));
                for t in open.iter() {
                    push(&mut out, Event::Begin(t.clone()));
                }
            }
            Event::Begin(tag) => {
                open.push(tag.clone());
                push(&mut out, Event::Begin(tag));
            }
            Event::End(tag) => {
                let key = tag.key();
                let Some(pos) = open.iter().rposition(|t| t.key() == key) else {
                    // No matching open span; drop the stray end.
                    continue;
                };
                // Close the spans opened above the match, end it, reopen them.
                for t in open[pos + 1..].iter().rev() {
                    push(&mut out, Event::End(t.clone()));
                }
                push(&mut out, Event::End(open[pos].clone()));
                let reopen: Vec<Tag> = open[pos + 1..].to_vec();
                open.remove(pos);
                for t in reopen {
                    push(&mut out, Event::Begin(t));
                }
            }
            other => out.push(other),
        }
    }

    for t in open.iter().rev() {
        push(&mut out, Event::End(t.clone()));
    }
    out
}

/// Append an event, cancelling empty style regions (`Begin(t) End(t)`) and
/// merging adjacent identical ones (`End(t) Begin(t)`).
fn push(out: &mut Vec<Event>, ev: Event) {
    match (&ev, out.last()) {
        (Event::End(b), Some(Event::Begin(a))) if !b.is_stable() && a.key() == b.key() => {
            out.pop();
        }
        (Event::Begin(b), Some(Event::End(a))) if !b.is_stable() && a.key() == b.key() => {
            out.pop();
        }
        _ => out.push(ev),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tags::{ParagraphType, TextMod};

    fn bold() -> Tag {
        Tag::Mod(TextMod::Bold)
    }

    fn italic() -> Tag {
        Tag::Mod(TextMod::Italic)
    }

    fn par() -> Tag {
        Tag::Paragraph(ParagraphType::None)
    }

    #[test]
    fn test_style_clipped_at_paragraph_boundary() {
        let out = normalize_tags(vec![
            Event::Begin(bold()),
            Event::Begin(par()),
            Event::text("a\n"),
            Event::End(par()),
            Event::Begin(par()),
            Event::text("b\n"),
            Event::End(par()),
            Event::End(bold()),
        ]);
        assert_eq!(
            out,
            vec![
                Event::Begin(par()),
                Event::Begin(bold()),
                Event::text("a\n"),
                Event::End(bold()),
                Event::End(par()),
                Event::Begin(par()),
                Event::Begin(bold()),
                Event::text("b\n"),
                Event::End(bold()),
                Event::End(par()),
            ]
        );
    }

    #[test]
    fn test_overlapping_styles_rewritten_to_nest() {
        // <b> .. <i> .. </b> .. </i> becomes properly nested regions.
        let out = normalize_tags(vec![
            Event::Begin(bold()),
            Event::text("a"),
            Event::Begin(italic()),
            Event::text("b"),
            Event::End(bold()),
            Event::text("c"),
            Event::End(italic()),
        ]);
        assert_eq!(
            out,
            vec![
                Event::Begin(bold()),
                Event::text("a"),
                Event::Begin(italic()),
                Event::text("b"),
                Event::End(italic()),
                Event::End(bold()),
                Event::Begin(italic()),
                Event::text("c"),
                Event::End(italic()),
            ]
        );
    }

    #[test]
    fn test_unclosed_span_closed_at_end() {
        let out = normalize_tags(vec![Event::Begin(bold()), Event::text("a")]);
        assert_eq!(
            out,
            vec![Event::Begin(bold()), Event::text("a"), Event::End(bold())]
        );
    }

    #[test]
    fn test_stray_end_dropped() {
        let out = normalize_tags(vec![Event::text("a"), Event::End(bold())]);
        assert_eq!(out, vec![Event::text("a")]);
    }

    #[test]
    fn test_empty_span_cancelled() {
        let out = normalize_tags(vec![
            Event::text("a"),
            Event::Begin(bold()),
            Event::End(bold()),
            Event::text("b"),
        ]);
        assert_eq!(out, vec![Event::text("a"), Event::text("b")]);
    }
}
