//! Conversion between flat "set the indent level" regions and nested lists.
//!
//! In buffer streams an indent begin means "the indent level is now N", with
//! no requirement that level changes nest. HTML lists do nest, so the write
//! direction rewrites level jumps into properly nested one-level regions and
//! the read direction flattens the parsed list tree back out.

use crate::dom::{Dom, NodeData, NodeId};
use crate::model::stream::{BULLET_STR, Event};
use crate::model::tags::{ParagraphType, Tag, TagTable};

/// Rewrite flat indent events into properly nested one-level regions.
///
/// A begin at level N opens levels up to N one at a time (intermediate
/// levels resolved through `table`); an end is deferred until the next item
/// shows how far to close. Content after a pending end closes every level;
/// a begin at a lower level closes down to that level. A begin at or below
/// the current level is a no-op. Remaining levels close at end of stream.
pub fn nest_indents(events: Vec<Event>, table: &TagTable) -> Vec<Event> {
    let mut out = Vec::with_capacity(events.len());
    let mut depth: u32 = 0;
    let mut closing = false;

    for ev in events {
        if closing {
            match &ev {
                Event::Text(_) | Event::Anchor(_) => {
                    while depth > 0 {
                        out.push(Event::End(table.indent_tag(depth)));
                        depth -= 1;
                    }
                    closing = false;
                }
                Event::Begin(Tag::Indent { level, .. }) => {
                    while depth > *level {
                        out.push(Event::End(table.indent_tag(depth)));
                        depth -= 1;
                    }
                    closing = false;
                }
                _ => {}
            }
        }

        match ev {
            Event::Begin(Tag::Indent { level, par_type }) => {
                while depth < level {
                    depth += 1;
                    if depth == level {
                        out.push(Event::Begin(Tag::indent(level, par_type)));
                    } else {
                        out.push(Event::Begin(table.indent_tag(depth)));
                    }
                }
            }
            Event::End(Tag::Indent { .. }) => {
                closing = true;
            }
            other => out.push(other),
        }
    }

    while depth > 0 {
        out.push(Event::End(table.indent_tag(depth)));
        depth -= 1;
    }
    out
}

/// Flatten a parsed list tree back into flat indent events.
///
/// Lists track the indent depth; each list item becomes an indent region at
/// the current depth, suspending the enclosing item's region while it is
/// open. Bulleted items get the literal bullet glyph prefixed to their text.
pub fn unnest_indents(dom: &Dom) -> Vec<Event> {
    let mut out = Vec::new();
    let mut li_stack: Vec<Tag> = Vec::new();
    walk(dom, dom.root(), 0, &mut li_stack, &mut out);
    out
}

fn walk(dom: &Dom, id: NodeId, depth: u32, li_stack: &mut Vec<Tag>, out: &mut Vec<Event>) {
    for child in dom.children(id) {
        let Some(node) = dom.get(child) else { continue };
        match &node.data {
            NodeData::Root => {}
            NodeData::Text(text) => out.push(Event::Text(text.clone())),
            NodeData::Anchor(anchor) => out.push(Event::Anchor(anchor.clone())),
            NodeData::Tag(tag) => {
                out.push(Event::Begin(tag.clone()));
                walk(dom, child, depth, li_stack, out);
                out.push(Event::End(tag.clone()));
            }
            NodeData::List => {
                walk(dom, child, depth + 1, li_stack, out);
            }
            NodeData::ListItem(par_type) => {
                // Suspend the enclosing item's region while this one is open.
                if let Some(outer) = li_stack.last() {
                    out.push(Event::End(outer.clone()));
                }
                let tag = Tag::indent(depth, *par_type);
                out.push(Event::Begin(tag.clone()));
                li_stack.push(tag);

                if *par_type == ParagraphType::Bullet {
                    out.push(Event::Begin(Tag::Bullet));
                    out.push(Event::Text(BULLET_STR.to_string()));
                    out.push(Event::End(Tag::Bullet));
                }

                walk(dom, child, depth, li_stack, out);

                let tag = li_stack.pop().unwrap_or(Tag::indent(depth, *par_type));
                out.push(Event::End(tag));
                if let Some(outer) = li_stack.last() {
                    out.push(Event::Begin(outer.clone()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ind(level: u32) -> Tag {
        Tag::indent(level, ParagraphType::None)
    }

    #[test]
    fn test_nest_opens_intermediate_levels() {
        let out = nest_indents(
            vec![Event::Begin(ind(2)), Event::text("x")],
            &TagTable::new(),
        );
        assert_eq!(
            out,
            vec![
                Event::Begin(ind(1)),
                Event::Begin(ind(2)),
                Event::text("x"),
                Event::End(ind(2)),
                Event::End(ind(1)),
            ]
        );
    }

    #[test]
    fn test_nest_end_then_content_closes_all() {
        let out = nest_indents(
            vec![
                Event::Begin(ind(2)),
                Event::text("a"),
                Event::End(ind(2)),
                Event::text("b"),
            ],
            &TagTable::new(),
        );
        assert_eq!(
            out,
            vec![
                Event::Begin(ind(1)),
                Event::Begin(ind(2)),
                Event::text("a"),
                Event::End(ind(2)),
                Event::End(ind(1)),
                Event::text("b"),
            ]
        );
    }

    #[test]
    fn test_nest_end_then_lower_begin_closes_partially() {
        let out = nest_indents(
            vec![
                Event::Begin(ind(2)),
                Event::text("a"),
                Event::End(ind(2)),
                Event::Begin(ind(1)),
                Event::text("b"),
            ],
            &TagTable::new(),
        );
        assert_eq!(
            out,
            vec![
                Event::Begin(ind(1)),
                Event::Begin(ind(2)),
                Event::text("a"),
                Event::End(ind(2)),
                Event::text("b"),
                Event::End(ind(1)),
            ]
        );
    }

    #[test]
    fn test_nest_begin_at_current_level_is_noop() {
        let out = nest_indents(
            vec![
                Event::Begin(ind(1)),
                Event::text("a"),
                Event::Begin(ind(1)),
                Event::text("b"),
            ],
            &TagTable::new(),
        );
        assert_eq!(
            out,
            vec![
                Event::Begin(ind(1)),
                Event::text("a"),
                Event::text("b"),
                Event::End(ind(1)),
            ]
        );
    }

    #[test]
    fn test_unnest_bullet_list() {
        let mut dom = Dom::new();
        let list = dom.alloc(NodeData::List);
        dom.append(dom.root(), list);
        let item = dom.alloc(NodeData::ListItem(ParagraphType::Bullet));
        dom.append(list, item);
        dom.append_text(item, "hello\n");

        let bullet_tag = Tag::indent(1, ParagraphType::Bullet);
        assert_eq!(
            unnest_indents(&dom),
            vec![
                Event::Begin(bullet_tag.clone()),
                Event::Begin(Tag::Bullet),
                Event::text(BULLET_STR),
                Event::End(Tag::Bullet),
                Event::text("hello\n"),
                Event::End(bullet_tag),
            ]
        );
    }

    #[test]
    fn test_unnest_nested_list_suspends_outer_item() {
        let mut dom = Dom::new();
        let list = dom.alloc(NodeData::List);
        dom.append(dom.root(), list);
        let outer = dom.alloc(NodeData::ListItem(ParagraphType::None));
        dom.append(list, outer);
        dom.append_text(outer, "a\n");
        let inner_list = dom.alloc(NodeData::List);
        dom.append(outer, inner_list);
        let inner = dom.alloc(NodeData::ListItem(ParagraphType::None));
        dom.append(inner_list, inner);
        dom.append_text(inner, "b\n");

        assert_eq!(
            unnest_indents(&dom),
            vec![
                Event::Begin(ind(1)),
                Event::text("a\n"),
                Event::End(ind(1)),
                Event::Begin(ind(2)),
                Event::text("b\n"),
                Event::End(ind(2)),
                Event::Begin(ind(1)),
                Event::End(ind(1)),
            ]
        );
    }
}
