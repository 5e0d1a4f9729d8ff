//! A small, error-tolerant XML parser.
//!
//! Math bodies are short strings, so this parser favors clear diagnostics
//! over speed. It scans the source character by character, building the
//! arena tree as it goes and collecting every problem it can describe. A
//! structural dead end (truncated input, unclosable tag) aborts the parse;
//! the document then has no root but still carries the diagnostics.
//!
//! Supported syntax: the XML prolog, comments, processing instructions,
//! a DOCTYPE declaration, CDATA sections, elements with prefixed names and
//! attributes, and character data with the five predefined entities plus
//! numeric character references. Namespace declarations are stored as
//! ordinary attributes.

use smol_str::SmolStr;

use super::dom::{NodeId, XmlAttribute, XmlDocument};
use crate::diag::{Diag, Span};

/// Parses `source` into a document, never panicking on malformed input.
pub fn parse(source: &str) -> XmlDocument {
    Parser::new(source).parse()
}

/// Marker for a structural dead end; the parse stops where it stands.
struct Abort;

type Step<T> = Result<T, Abort>;

struct Parser<'a> {
    source: &'a str,
    pos: usize,
    doc: XmlDocument,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            doc: XmlDocument::empty(),
        }
    }

    fn parse(mut self) -> XmlDocument {
        // The abort itself is not interesting; the diagnostics explaining
        // it have already been recorded.
        let _ = self.parse_document();
        self.doc
    }

    fn parse_document(&mut self) -> Step<()> {
        self.skip_misc()?;
        if self.is_at_end() {
            self.error_here("no element found");
            return Err(Abort);
        }
        if !self.check('<') {
            self.error_here("start tag expected, '<' not found");
            return Err(Abort);
        }
        let root = self.parse_element(None)?;
        self.doc.set_root(root);
        self.skip_misc()?;
        if !self.is_at_end() {
            self.error_here("extra content at the end of the document");
        }
        Ok(())
    }

    /// Parses one element, assuming `pos` sits on its opening `<`.
    fn parse_element(&mut self, parent: Option<NodeId>) -> Step<NodeId> {
        self.advance(); // consume '<'
        let (prefix, local) = self.parse_name()?;
        let id = self.doc.push_element(prefix.clone(), local.clone(), parent);

        // Attributes until the tag closes one way or the other.
        loop {
            self.skip_whitespace();
            if self.consume_str("/>") {
                return Ok(id);
            }
            if self.consume_char('>') {
                break;
            }
            if self.is_at_end() {
                self.error_here(format!(
                    "unexpected end of input inside tag '{}'",
                    qname(&prefix, &local)
                ));
                return Err(Abort);
            }
            let (attr_prefix, attr_local) = self.parse_name()?;
            self.skip_whitespace();
            if !self.consume_char('=') {
                let span = self.span_here();
                self.doc.push_error(
                    Diag::error(format!(
                        "expected '=' after attribute name '{}'",
                        qname(&attr_prefix, &attr_local)
                    ))
                    .with_span(span, "here")
                    .with_help("attributes are written name=\"value\""),
                );
                return Err(Abort);
            }
            self.skip_whitespace();
            let value = self.parse_attribute_value()?;
            self.doc
                .push_attribute(id, XmlAttribute::new(attr_prefix, attr_local, value));
        }

        // Children until the matching end tag.
        loop {
            if self.is_at_end() {
                self.error_here(format!(
                    "unexpected end of input, expected '</{}>'",
                    qname(&prefix, &local)
                ));
                return Err(Abort);
            }
            if self.starts_with("</") {
                self.pos += 2;
                let (close_prefix, close_local) = self.parse_name()?;
                self.skip_whitespace();
                if !self.consume_char('>') {
                    self.error_here("expected '>' to finish the end tag");
                    return Err(Abort);
                }
                if close_prefix != prefix || close_local != local {
                    self.error_here(format!(
                        "opening and ending tag mismatch: '{}' and '{}'",
                        qname(&prefix, &local),
                        qname(&close_prefix, &close_local)
                    ));
                    // Recover by treating it as the close of this element.
                }
                return Ok(id);
            }
            if self.starts_with("<!--") {
                self.skip_comment()?;
            } else if self.starts_with("<![CDATA[") {
                let text = self.parse_cdata()?;
                self.doc.push_text(id, text);
            } else if self.starts_with("<?") {
                self.skip_processing_instruction()?;
            } else if self.check('<') {
                self.parse_element(Some(id))?;
            } else {
                let text = self.parse_text();
                if !text.is_empty() {
                    self.doc.push_text(id, text);
                }
            }
        }
    }

    /// Parses a (possibly prefixed) XML name into `(prefix, local)`.
    fn parse_name(&mut self) -> Step<(SmolStr, SmolStr)> {
        let start = self.pos;
        match self.peek() {
            Some(ch) if is_name_start(ch) => self.advance(),
            Some(ch) => {
                self.error_here(format!("invalid name start character '{ch}'"));
                return Err(Abort);
            }
            None => {
                self.error_here("unexpected end of input, expected a name");
                return Err(Abort);
            }
        }
        while let Some(ch) = self.peek() {
            if is_name_char(ch) {
                self.advance();
            } else {
                break;
            }
        }
        let name = &self.source[start..self.pos];
        Ok(match name.split_once(':') {
            Some((prefix, local)) => (SmolStr::new(prefix), SmolStr::new(local)),
            None => (SmolStr::default(), SmolStr::new(name)),
        })
    }

    fn parse_attribute_value(&mut self) -> Step<String> {
        let quote = match self.peek() {
            Some(ch @ ('"' | '\'')) => {
                self.advance();
                ch
            }
            _ => {
                self.error_here("expected a quoted attribute value");
                return Err(Abort);
            }
        };
        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    self.error_here("unterminated attribute value");
                    return Err(Abort);
                }
                Some(ch) if ch == quote => {
                    self.advance();
                    return Ok(value);
                }
                Some('<') => {
                    self.error_here("'<' is not allowed in an attribute value");
                    self.advance();
                }
                Some('&') => self.parse_entity(&mut value),
                Some(ch) => {
                    value.push(ch);
                    self.advance();
                }
            }
        }
    }

    /// Collects character data up to the next `<` or end of input.
    fn parse_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '<' => break,
                '&' => self.parse_entity(&mut text),
                _ => {
                    text.push(ch);
                    self.advance();
                }
            }
        }
        text
    }

    /// Decodes one entity reference starting at `&`, appending to `out`.
    fn parse_entity(&mut self, out: &mut String) {
        let start = self.pos;
        self.advance(); // consume '&'
        let Some(end) = self.source[self.pos..]
            .char_indices()
            .take(12)
            .find(|(_, ch)| *ch == ';')
            .map(|(offset, _)| self.pos + offset)
        else {
            self.error_at(start..start + 1, "unterminated entity reference");
            return;
        };
        let name = &self.source[self.pos..end];
        let decoded = match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => name
                .strip_prefix("#x")
                .map(|hex| u32::from_str_radix(hex, 16))
                .or_else(|| name.strip_prefix('#').map(str::parse::<u32>))
                .and_then(Result::ok)
                .and_then(char::from_u32),
        };
        match decoded {
            Some(ch) => out.push(ch),
            None => self.error_at(start..end + 1, format!("entity '{name}' not defined")),
        }
        self.pos = end + 1;
    }

    fn parse_cdata(&mut self) -> Step<String> {
        let start = self.pos;
        self.pos += "<![CDATA[".len();
        match self.source[self.pos..].find("]]>") {
            Some(offset) => {
                let content = self.source[self.pos..self.pos + offset].to_string();
                self.pos += offset + 3;
                Ok(content)
            }
            None => {
                self.error_at(start..start + 9, "unterminated CDATA section");
                Err(Abort)
            }
        }
    }

    fn skip_comment(&mut self) -> Step<()> {
        let start = self.pos;
        self.pos += "<!--".len();
        match self.source[self.pos..].find("-->") {
            Some(offset) => {
                self.pos += offset + 3;
                Ok(())
            }
            None => {
                self.error_at(start..start + 4, "unterminated comment");
                Err(Abort)
            }
        }
    }

    fn skip_processing_instruction(&mut self) -> Step<()> {
        let start = self.pos;
        self.pos += "<?".len();
        match self.source[self.pos..].find("?>") {
            Some(offset) => {
                self.pos += offset + 2;
                Ok(())
            }
            None => {
                self.error_at(start..start + 2, "unterminated processing instruction");
                Err(Abort)
            }
        }
    }

    /// Skips a `<!DOCTYPE …>` declaration, including an internal subset.
    fn skip_doctype(&mut self) -> Step<()> {
        let start = self.pos;
        self.pos += "<!".len();
        let mut depth = 0usize;
        while let Some(ch) = self.peek() {
            self.advance();
            match ch {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '>' if depth == 0 => return Ok(()),
                _ => {}
            }
        }
        self.error_at(start..start + 2, "unterminated markup declaration");
        Err(Abort)
    }

    /// Skips whitespace, comments, processing instructions, and DOCTYPE
    /// declarations between document-level constructs.
    fn skip_misc(&mut self) -> Step<()> {
        loop {
            self.skip_whitespace();
            if self.starts_with("<!--") {
                self.skip_comment()?;
            } else if self.starts_with("<?") {
                self.skip_processing_instruction()?;
            } else if self.starts_with("<!") {
                self.skip_doctype()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn check(&self, expected: char) -> bool {
        self.peek() == Some(expected)
    }

    fn consume_char(&mut self, expected: char) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn starts_with(&self, pattern: &str) -> bool {
        self.source[self.pos..].starts_with(pattern)
    }

    fn consume_str(&mut self, pattern: &str) -> bool {
        if self.starts_with(pattern) {
            self.pos += pattern.len();
            true
        } else {
            false
        }
    }

    /// The span of the character at the current position (empty at EOF).
    fn span_here(&self) -> Span {
        let width = self.peek().map_or(0, char::len_utf8);
        self.pos..self.pos + width
    }

    /// Records an error pointing at the current position.
    fn error_here(&mut self, message: impl Into<String>) {
        let span = self.span_here();
        self.error_at(span, message);
    }

    /// Records an error pointing at `span`.
    fn error_at(&mut self, span: Span, message: impl Into<String>) {
        self.doc
            .push_error(Diag::error(message).with_span(span, "here"));
    }
}

fn qname(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{prefix}:{local}")
    }
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '.' | '-' | '_' | ':')
}
