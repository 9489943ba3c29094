//! HTML to tag stream parsing.
//!
//! Runs the html5ever tokenizer over the input and builds a document tree
//! by dispatching on element names, then flattens the tree's list structure
//! back into flat indent events. The token sink uses interior mutability
//! because the tokenizer takes `&self` callbacks.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag as HtmlTag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};

use crate::dom::{Dom, NodeData, NodeId};
use crate::error::{Error, Result};
use crate::html::style::{parse_list_style_type, parse_style_attr};
use crate::model::anchor::{Anchor, Image};
use crate::model::stream::Event;
use crate::model::tags::{ParagraphType, Tag, TextMod};
use crate::transform::unnest_indents;

/// Options for [`read_html`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Treat the input as a body fragment; do not require `<body>`.
    pub partial: bool,
    /// Swallow parse errors and return whatever was built.
    pub ignore_errors: bool,
}

/// Parse HTML text into a flat tag stream.
///
/// `lines` is any iterator of string chunks; the tokenizer is fed
/// incrementally. Unless `ignore_errors` is set, the first parse or style
/// error is returned after the input is exhausted.
pub fn read_html<I>(lines: I, opts: &ReadOptions) -> Result<Vec<Event>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let sink = HtmlSink::new(opts.partial);
    let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let input = BufferQueue::default();
    for line in lines {
        input.push_back(StrTendril::from(line.as_ref()));
        let _ = tokenizer.feed(&input);
    }
    tokenizer.end();

    let mut state = tokenizer.sink.state.into_inner();
    if let Some(err) = state.error.take() {
        if !opts.ignore_errors {
            return Err(err);
        }
    }

    let root = state.dom.root();
    fixup_lists(&mut state.dom, root);
    Ok(unnest_indents(&state.dom))
}

struct HtmlSink {
    state: RefCell<ReaderState>,
}

struct ReaderState {
    dom: Dom,
    cursor: NodeId,
    /// Open elements with the cursor position to restore on close.
    tag_stack: Vec<(String, NodeId)>,
    partial: bool,
    within_body: bool,
    /// Set after a line-breaking element; strips the whitespace that markup
    /// indentation puts after it.
    newline: bool,
    /// Discarding raw text inside `script`/`style`.
    skip_raw: bool,
    error: Option<Error>,
}

impl HtmlSink {
    fn new(partial: bool) -> Self {
        let dom = Dom::new();
        let root = dom.root();
        HtmlSink {
            state: RefCell::new(ReaderState {
                dom,
                cursor: root,
                tag_stack: Vec::new(),
                partial,
                within_body: false,
                newline: false,
                skip_raw: false,
                error: None,
            }),
        }
    }
}

impl TokenSink for HtmlSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut state = self.state.borrow_mut();
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => {
                    let result = state.handle_start(&tag);
                    if tag.self_closing {
                        state.handle_end(tag.name.as_ref());
                    }
                    result
                }
                TagKind::EndTag => {
                    state.handle_end(tag.name.as_ref());
                    TokenSinkResult::Continue
                }
            },
            Token::CharacterTokens(data) => {
                state.handle_data(&data);
                TokenSinkResult::Continue
            }
            Token::ParseError(msg) => {
                if state.error.is_none() {
                    state.error = Some(Error::Parse(msg.to_string()));
                }
                TokenSinkResult::Continue
            }
            Token::DoctypeToken(_)
            | Token::CommentToken(_)
            | Token::NullCharacterToken
            | Token::EOFToken => TokenSinkResult::Continue,
        }
    }
}

impl ReaderState {
    /// Append a node at the cursor and optionally descend into it.
    fn append(&mut self, data: NodeData, descend: bool) {
        let node = self.dom.alloc(data);
        self.dom.append(self.cursor, node);
        if descend {
            self.cursor = node;
        }
    }

    fn handle_start(&mut self, tag: &HtmlTag) -> TokenSinkResult<()> {
        self.newline = false;
        self.tag_stack
            .push((tag.name.as_ref().to_string(), self.cursor));

        let name = tag.name.as_ref();
        if let Some(m) = TextMod::from_html_name(name) {
            self.append(NodeData::Tag(Tag::Mod(m)), true);
            return TokenSinkResult::Continue;
        }

        match name {
            "html" => {}
            "body" => self.within_body = true,
            "span" | "div" => {
                if let Some(style) = attr(tag, "style") {
                    match parse_style_attr(&style) {
                        Ok(tags) => {
                            for t in tags {
                                self.append(NodeData::Tag(t), true);
                            }
                        }
                        Err(err) => {
                            if self.error.is_none() {
                                self.error = Some(err);
                            }
                        }
                    }
                }
            }
            "p" => self.append_text("\n"),
            "br" => {
                self.append_text("\n");
                self.newline = true;
            }
            "hr" => {
                self.append_text("\n");
                self.append(NodeData::Anchor(Anchor::Rule), false);
                self.append_text("\n");
            }
            "img" => {
                let img = parse_image(tag);
                self.append(NodeData::Anchor(Anchor::Image(img)), false);
            }
            "ul" | "ol" => {
                self.append(NodeData::List, true);
                self.newline = true;
            }
            "li" => {
                let par_type = match attr(tag, "style") {
                    Some(style) => parse_list_style_type(&style),
                    None => ParagraphType::Bullet,
                };
                self.append(NodeData::ListItem(par_type), true);
                self.newline = true;
            }
            "a" => {
                if let Some(href) = attr(tag, "href") {
                    self.append(NodeData::Tag(Tag::Link { href }), true);
                }
            }
            "script" => {
                self.skip_raw = true;
                return TokenSinkResult::RawData(RawKind::ScriptData);
            }
            "style" => {
                self.skip_raw = true;
                return TokenSinkResult::RawData(RawKind::Rawtext);
            }
            // Ignore other elements.
            _ => {}
        }
        TokenSinkResult::Continue
    }

    fn handle_end(&mut self, name: &str) {
        if name == "script" || name == "style" {
            self.skip_raw = false;
        }

        if !self.partial && (name == "html" || name == "body" || !self.within_body) {
            return;
        }

        if name != "br" {
            self.newline = false;
        }
        match name {
            "ul" | "ol" | "li" => self.newline = true,
            "p" => self.append_text("\n"),
            _ => {}
        }

        // Pop to the matching open element, restoring the cursor; orphaned
        // closes pop through mismatched frames.
        while let Some((frame_name, ptr)) = self.tag_stack.pop() {
            self.cursor = ptr;
            if frame_name == name {
                break;
            }
        }
    }

    fn handle_data(&mut self, data: &str) {
        if self.skip_raw {
            return;
        }
        if !self.partial && !self.within_body {
            return;
        }

        let strip_leading = self.newline;
        self.newline = false;
        let text = normalize_data(data, strip_leading);
        if !text.is_empty() {
            self.append_text(&text);
        }
    }

    fn append_text(&mut self, text: &str) {
        self.dom.append_text(self.cursor, text);
    }
}

fn attr(tag: &HtmlTag, name: &str) -> Option<String> {
    tag.attrs
        .iter()
        .find(|a| a.name.local.as_ref() == name)
        .map(|a| a.value.to_string())
}

fn parse_image(tag: &HtmlTag) -> Image {
    let mut img = Image::new(attr(tag, "src").unwrap_or_default());
    // Non-numeric dimensions are ignored, not fatal.
    let width = attr(tag, "width").and_then(|v| v.trim().parse::<u32>().ok());
    let height = attr(tag, "height").and_then(|v| v.trim().parse::<u32>().ok());
    img.scale(width, height);
    img
}

/// Collapse runs of newlines and spaces to one space, optionally stripping
/// a leading run. Non-breaking spaces are excluded from collapsing and then
/// folded to plain spaces, so escaped space runs survive.
fn normalize_data(data: &str, strip_leading: bool) -> String {
    let mut out = String::with_capacity(data.len());
    let mut run = false;
    let mut at_start = true;
    for ch in data.chars() {
        match ch {
            '\n' | ' ' => run = true,
            _ => {
                if run {
                    if !(at_start && strip_leading) {
                        out.push(' ');
                    }
                    run = false;
                }
                at_start = false;
                out.push(if ch == '\u{a0}' { ' ' } else { ch });
            }
        }
    }
    if run && !(at_start && strip_leading) {
        out.push(' ');
    }
    out
}

/// Post-parse tree fix-up: adjacent content and lists need the newlines the
/// markup only implies.
fn fixup_lists(dom: &mut Dom, id: NodeId) {
    let children: Vec<NodeId> = dom.children(id).collect();
    for child in children {
        let data = dom.get(child).map(|n| n.data.clone());
        match data {
            Some(NodeData::List) => {
                // A list after other content starts on a new line.
                if let Some(prev) = dom.prev_sibling(child) {
                    if let Some(NodeData::Text(text)) = dom.get_mut(prev).map(|n| &mut n.data) {
                        text.push('\n');
                    } else {
                        let nl = dom.alloc(NodeData::Text("\n".to_string()));
                        dom.insert_before(child, nl);
                    }
                }
            }
            Some(NodeData::ListItem(_)) => {
                // `</li>` implies a newline unless a nested list follows.
                let ends_in_list = matches!(
                    dom.last_child(child).and_then(|l| dom.get(l)).map(|n| &n.data),
                    Some(NodeData::List)
                );
                if !ends_in_list {
                    dom.append_text(child, "\n");
                }
            }
            _ => {}
        }
        fixup_lists(dom, child);
    }
}
