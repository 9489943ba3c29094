//! End-to-end conversion tests: write a tag stream to HTML, read it back,
//! and check the documented equivalences.

use notemark::{
    Anchor, BULLET_STR, Event, Image, ParagraphType, ReadOptions, Tag, TagTable, TextMod,
    WriteOptions, plain_text, read_html, write_html,
};

fn write_partial(stream: Vec<Event>) -> String {
    let opts = WriteOptions {
        partial: true,
        xhtml: true,
        ..Default::default()
    };
    write_html(stream, &TagTable::new(), &opts).unwrap()
}

fn read_partial(html: &str) -> Vec<Event> {
    let opts = ReadOptions {
        partial: true,
        ignore_errors: false,
    };
    read_html([html], &opts).unwrap()
}

fn roundtrip(stream: Vec<Event>) -> Vec<Event> {
    read_partial(&write_partial(stream))
}

#[test]
fn paragraph_splitting() {
    // "a\nb\nc" becomes three paragraphs with no trailing empty one.
    let html = write_partial(vec![Event::text("a\nb\nc")]);
    assert_eq!(html, "a<br/>\nb<br/>\nc");

    assert_eq!(read_partial(&html), vec![Event::text("a\nb\nc")]);
}

#[test]
fn space_preservation() {
    let html = write_partial(vec![Event::text("a  b")]);
    assert_eq!(html, "a &nbsp;b");
    assert_eq!(read_partial(&html), vec![Event::text("a  b")]);
}

#[test]
fn tab_preservation() {
    let html = write_partial(vec![Event::text("a\tb")]);
    assert_eq!(html, "a&#09;b");

    let opts = ReadOptions {
        partial: true,
        ignore_errors: true,
    };
    let events = read_html([html.as_str()], &opts).unwrap();
    assert_eq!(events, vec![Event::text("a\tb")]);
}

#[test]
fn list_roundtrip() {
    let bullet = Tag::indent(1, ParagraphType::Bullet);
    let plain = Tag::indent(1, ParagraphType::None);
    let stream = vec![
        Event::Begin(bullet.clone()),
        Event::Begin(Tag::Bullet),
        Event::text(BULLET_STR),
        Event::End(Tag::Bullet),
        Event::text("x\n"),
        Event::End(bullet.clone()),
        Event::Begin(plain.clone()),
        Event::text("y\n"),
        Event::End(plain.clone()),
    ];

    let html = write_partial(stream.clone());
    assert_eq!(
        html,
        "<ul><li>x</li><li style=\"list-style-type:none\">y</li></ul>"
    );

    assert_eq!(read_partial(&html), stream);
}

#[test]
fn nested_list_roundtrip() {
    let outer = Tag::indent(1, ParagraphType::Bullet);
    let inner = Tag::indent(2, ParagraphType::Bullet);
    let stream = vec![
        Event::Begin(outer.clone()),
        Event::Begin(Tag::Bullet),
        Event::text(BULLET_STR),
        Event::End(Tag::Bullet),
        Event::text("a\n"),
        Event::End(outer.clone()),
        Event::Begin(inner.clone()),
        Event::Begin(Tag::Bullet),
        Event::text(BULLET_STR),
        Event::End(Tag::Bullet),
        Event::text("b\n"),
        Event::End(inner.clone()),
    ];

    let events = roundtrip(stream);
    // The nested item sits at level 2 with its bullet and text intact.
    assert!(events.contains(&Event::Begin(inner.clone())));
    assert!(events.contains(&Event::End(inner)));
    assert_eq!(
        plain_text(&events),
        format!("{BULLET_STR}a\n{BULLET_STR}b\n")
    );
}

#[test]
fn rule_newline_absorption() {
    let stream = vec![
        Event::text("a\n"),
        Event::Anchor(Anchor::Rule),
        Event::text("\nb"),
    ];
    let html = write_partial(stream.clone());
    assert_eq!(html, "a<hr/>b");
    assert_eq!(read_partial(&html), stream);
}

#[test]
fn image_roundtrip() {
    let mut img = Image::new("photo.png");
    img.scale(Some(64), Some(48));
    let stream = vec![
        Event::text("before "),
        Event::Anchor(Anchor::Image(img.clone())),
        Event::text(" after"),
    ];
    let html = write_partial(stream.clone());
    assert_eq!(html, "before <img src=\"photo.png\" width=\"64\" height=\"48\" /> after");
    assert_eq!(read_partial(&html), stream);
}

#[test]
fn styled_text_roundtrip() {
    let bold = Tag::Mod(TextMod::Bold);
    let italic = Tag::Mod(TextMod::Italic);
    let stream = vec![
        Event::Begin(bold.clone()),
        Event::text("strong "),
        Event::Begin(italic.clone()),
        Event::text("both"),
        Event::End(italic.clone()),
        Event::End(bold.clone()),
        Event::text(" plain"),
    ];
    assert_eq!(roundtrip(stream.clone()), stream);
}

#[test]
fn overlapping_styles_normalized() {
    // Overlapping spans come back properly nested with the same styled text.
    let bold = Tag::Mod(TextMod::Bold);
    let italic = Tag::Mod(TextMod::Italic);
    let stream = vec![
        Event::Begin(bold.clone()),
        Event::text("a"),
        Event::Begin(italic.clone()),
        Event::text("b"),
        Event::End(bold.clone()),
        Event::text("c"),
        Event::End(italic.clone()),
    ];
    let html = write_partial(stream);
    assert_eq!(html, "<b>a<i>b</i></b><i>c</i>");
    assert_eq!(plain_text(&read_partial(&html)), "abc");
}

#[test]
fn bold_across_paragraphs() {
    let bold = Tag::Mod(TextMod::Bold);
    let stream = vec![
        Event::Begin(bold.clone()),
        Event::text("a\nb"),
        Event::End(bold.clone()),
    ];
    let html = write_partial(stream.clone());
    assert_eq!(html, "<b>a<br/>\n</b><b>b</b>");

    // Reading merges the adjacent text runs back together; the styled
    // content is unchanged.
    let events = read_partial(&html);
    assert_eq!(plain_text(&events), "a\nb");
    assert_eq!(events[0], Event::Begin(bold));
}

#[test]
fn link_roundtrip() {
    let link = Tag::Link {
        href: "http://example.com/a?b=1&c=2".to_string(),
    };
    let stream = vec![
        Event::Begin(link.clone()),
        Event::text("click"),
        Event::End(link.clone()),
    ];
    let html = write_partial(stream.clone());
    assert_eq!(
        html,
        "<a href=\"http://example.com/a?b=1&amp;c=2\">click</a>"
    );
    assert_eq!(roundtrip(stream.clone()), stream);
}

#[test]
fn escaped_characters_roundtrip() {
    let stream = vec![Event::text("1 < 2 & 3 > 2")];
    let html = write_partial(stream.clone());
    assert_eq!(html, "1 &lt; 2 &amp; 3 &gt; 2");
    assert_eq!(read_partial(&html), stream);
}

#[test]
fn full_document_roundtrip() {
    let opts = WriteOptions {
        title: Some("My Note".to_string()),
        partial: false,
        xhtml: true,
    };
    let html = write_html(vec![Event::text("body text")], &TagTable::new(), &opts).unwrap();
    assert!(html.contains("<title>My Note</title>"));

    let events = read_html([html.as_str()], &ReadOptions::default()).unwrap();
    assert_eq!(events, vec![Event::text("body text")]);
}

#[test]
fn malformed_close_keeps_text() {
    let opts = ReadOptions {
        partial: true,
        ignore_errors: true,
    };
    let events = read_html(["<b><i>x</b>y"], &opts).unwrap();
    assert_eq!(plain_text(&events), "xy");
}

#[test]
fn unknown_text_align_is_an_error() {
    let opts = ReadOptions {
        partial: true,
        ignore_errors: false,
    };
    let result = read_html(["<div style=\"text-align: diagonal\">x</div>"], &opts);
    assert!(result.is_err());

    // The same input is recoverable when errors are ignored.
    let opts = ReadOptions {
        partial: true,
        ignore_errors: true,
    };
    let events = read_html(["<div style=\"text-align: diagonal\">x</div>"], &opts).unwrap();
    assert_eq!(plain_text(&events), "x");
}

#[test]
fn justify_roundtrip() {
    use notemark::Justification;
    let center = Tag::Justify(Justification::Center);
    let stream = vec![
        Event::Begin(center.clone()),
        Event::text("middle"),
        Event::End(center.clone()),
    ];
    let html = write_partial(stream.clone());
    assert_eq!(html, "<div style=\"text-align: center\">middle</div>");
    assert_eq!(roundtrip(stream.clone()), stream);
}
