//! Document tree construction from flat event streams.

pub mod arena;

pub use arena::{Dom, Node, NodeData, NodeId};

use crate::model::stream::Event;

impl Dom {
    /// Build a tree from a flat event stream.
    ///
    /// Begin/end events are matched by tag key. An end event that does not
    /// match the innermost open region closes every region above the nearest
    /// matching ancestor; an end with no open match is dropped.
    pub fn from_events(events: Vec<Event>) -> Dom {
        let mut dom = Dom::new();
        // Open tag nodes, outermost first. The cursor is the innermost one.
        let mut stack: Vec<NodeId> = Vec::new();

        for ev in events {
            match ev {
                Event::Begin(tag) => {
                    let cursor = stack.last().copied().unwrap_or(dom.root());
                    let node = dom.alloc(NodeData::Tag(tag));
                    dom.append(cursor, node);
                    stack.push(node);
                }
                Event::End(tag) => {
                    let key = tag.key();
                    let matched = stack.iter().rposition(|&id| {
                        matches!(dom.get(id).map(|n| &n.data),
                            Some(NodeData::Tag(t)) if t.key() == key)
                    });
                    if let Some(pos) = matched {
                        stack.truncate(pos);
                    }
                }
                Event::Text(text) => {
                    let cursor = stack.last().copied().unwrap_or(dom.root());
                    dom.append_text(cursor, &text);
                }
                Event::Anchor(anchor) => {
                    let cursor = stack.last().copied().unwrap_or(dom.root());
                    let node = dom.alloc(NodeData::Anchor(anchor));
                    dom.append(cursor, node);
                }
            }
        }

        dom
    }
}
