//! Inline `style=""` attribute parsing.

use cssparser::{
    AtRuleParser, ParseError, Parser, ParserInput, QualifiedRuleParser, RuleBodyItemParser,
    RuleBodyParser, Token,
};

use crate::error::{Error, Result};
use crate::model::tags::{Color, Justification, ParagraphType, Tag};

/// Result of parsing one style attribute.
#[derive(Debug, Default)]
struct ParsedStyle {
    tags: Vec<Tag>,
    par_type: Option<ParagraphType>,
}

/// Parse a style attribute into the tags it describes.
///
/// Unknown properties and unparseable color values are ignored; an unknown
/// `text-align` value is an error (it would silently change justification on
/// a round trip).
pub fn parse_style_attr(style: &str) -> Result<Vec<Tag>> {
    parse_attr(style).map(|p| p.tags)
}

/// Extract the paragraph type from a list item's style attribute.
///
/// Items are bulleted unless `list-style-type: none` says otherwise.
pub fn parse_list_style_type(style: &str) -> ParagraphType {
    match parse_attr(style) {
        Ok(p) => p.par_type.unwrap_or(ParagraphType::Bullet),
        Err(_) => ParagraphType::Bullet,
    }
}

fn parse_attr(style: &str) -> Result<ParsedStyle> {
    let mut input = ParserInput::new(style);
    let mut parser = Parser::new(&mut input);

    let mut style_parser = StyleAttrParser {
        parsed: ParsedStyle::default(),
        error: None,
    };
    for result in RuleBodyParser::new(&mut parser, &mut style_parser) {
        // Lenient parsing; hard errors are recorded by the parser itself.
        let _ = result;
    }

    match style_parser.error {
        Some(err) => Err(err),
        None => Ok(style_parser.parsed),
    }
}

struct StyleAttrParser {
    parsed: ParsedStyle,
    error: Option<Error>,
}

impl<'i> cssparser::DeclarationParser<'i> for StyleAttrParser {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: cssparser::CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &cssparser::ParserState,
    ) -> std::result::Result<Self::Declaration, ParseError<'i, Self::Error>> {
        match name.as_ref().to_ascii_lowercase().as_str() {
            "font-size" => {
                if let Some(size) = parse_point_size(input) {
                    self.parsed.tags.push(Tag::Size(size));
                }
            }
            "font-family" => {
                if let Some(family) = parse_first_family(input) {
                    self.parsed.tags.push(Tag::Family(family));
                }
            }
            "text-align" => match parse_justification(input) {
                Ok(justify) => self.parsed.tags.push(Tag::Justify(justify)),
                Err(err) => {
                    if self.error.is_none() {
                        self.error = Some(err);
                    }
                }
            },
            "color" => {
                if let Some(color) = parse_color(input) {
                    self.parsed.tags.push(Tag::FgColor(color));
                }
            }
            "background-color" => {
                if let Some(color) = parse_color(input) {
                    self.parsed.tags.push(Tag::BgColor(color));
                }
            }
            "list-style-type" => {
                if let Ok(ident) = input.try_parse(|i| i.expect_ident_cloned()) {
                    match ident.as_ref() {
                        "disc" => self.parsed.par_type = Some(ParagraphType::Bullet),
                        "none" => self.parsed.par_type = Some(ParagraphType::None),
                        _ => {}
                    }
                }
            }
            // Ignore other properties.
            _ => {}
        }

        // Consume whatever remains so the declaration parses cleanly.
        while input.next().is_ok() {}
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for StyleAttrParser {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: cssparser::CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for StyleAttrParser {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for StyleAttrParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Font sizes are written in points; accept a bare number too.
fn parse_point_size(input: &mut Parser<'_, '_>) -> Option<u32> {
    let value = input
        .try_parse(|i| -> std::result::Result<f32, ParseError<'_, ()>> {
            match i.next()? {
                Token::Dimension { value, .. } => Ok(*value),
                Token::Number { value, .. } => Ok(*value),
                _ => Err(i.new_custom_error(())),
            }
        })
        .ok()?;
    if value >= 0.0 {
        Some(value.round() as u32)
    } else {
        None
    }
}

/// Take the first family of a comma-separated font list.
fn parse_first_family(input: &mut Parser<'_, '_>) -> Option<String> {
    let mut family = String::new();
    loop {
        match input.next() {
            Ok(Token::Ident(name)) => {
                if !family.is_empty() {
                    family.push(' ');
                }
                family.push_str(name.as_ref());
            }
            Ok(Token::QuotedString(name)) => {
                if !family.is_empty() {
                    family.push(' ');
                }
                family.push_str(name.as_ref());
            }
            Ok(Token::Comma) | Err(_) => break,
            Ok(_) => {}
        }
    }
    if family.is_empty() { None } else { Some(family) }
}

fn parse_justification(input: &mut Parser<'_, '_>) -> Result<Justification> {
    let Ok(ident) = input.try_parse(|i| i.expect_ident_cloned()) else {
        return Err(Error::Style("missing justification value".to_string()));
    };
    match ident.as_ref() {
        "left" => Ok(Justification::Left),
        "center" => Ok(Justification::Center),
        "right" => Ok(Justification::Right),
        "justify" | "fill" => Ok(Justification::Fill),
        other => Err(Error::Style(format!("unknown justification '{other}'"))),
    }
}

fn parse_color(input: &mut Parser<'_, '_>) -> Option<Color> {
    // Named colors
    if let Ok(ident) = input.try_parse(|i| i.expect_ident_cloned()) {
        let color = match ident.as_ref() {
            "black" => Color::rgb(0, 0, 0),
            "white" => Color::rgb(255, 255, 255),
            "red" => Color::rgb(255, 0, 0),
            "green" => Color::rgb(0, 128, 0),
            "blue" => Color::rgb(0, 0, 255),
            "yellow" => Color::rgb(255, 255, 0),
            "cyan" => Color::rgb(0, 255, 255),
            "magenta" => Color::rgb(255, 0, 255),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            _ => return None,
        };
        return Some(color);
    }

    // Hex colors tokenize as IDHash (letter-leading) or Hash (digit-leading).
    // The token type must be checked inside try_parse so a non-match resets
    // the parser position.
    if let Ok(hash) = input.try_parse(|i| -> std::result::Result<_, ParseError<'_, ()>> {
        match i.next()? {
            Token::IDHash(h) | Token::Hash(h) => Ok(h.clone()),
            _ => Err(i.new_custom_error(())),
        }
    }) {
        return Color::from_hex(hash.as_ref());
    }

    None
}
