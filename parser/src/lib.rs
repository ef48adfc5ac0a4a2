pub mod stack_of_open_elements;

use dom::element::is_void_element;
use dom::{Attribute, Dom, DomException, NodeId};
use stack_of_open_elements::StackOfOpenElements;
use tokenizer::{State, Token, Tokenizer};

pub(crate) const fn is_parser_whitespace(string: char) -> bool {
    if let '\t' | '\u{000a}' | '\u{000c}' | '\u{000d}' | '\u{0020}' = string {
        return true;
    }
    false
}

// Elements whose contents are tokenized as text until the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "script", "style", "xmp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// Content goes below an `<html>` element, created on demand.
    Document { html: Option<NodeId> },
    Fragment(NodeId),
}

/// A forgiving tree builder. It keeps a stack of open elements, closes
/// elements by name and never reparents content.
pub struct Parser<'a> {
    dom: &'a mut Dom,
    document: NodeId,
    target: Target,
    tokenizer: Tokenizer,
    stack_of_open_elements: StackOfOpenElements,
    pending_text: String,
}

impl<'a> Parser<'a> {
    fn new(dom: &'a mut Dom, document: NodeId, target: Target, input: &str) -> Self {
        Self {
            dom,
            document,
            target,
            tokenizer: Tokenizer::new(input),
            stack_of_open_elements: StackOfOpenElements::new(),
            pending_text: String::new(),
        }
    }

    pub fn parse(mut self) -> Result<(), DomException> {
        while let Some(token) = self.tokenizer.next_token() {
            match token {
                Token::Doctype { name, .. } => {
                    tracing::trace!(?name, "ignoring doctype");
                }
                Token::StartTag {
                    name, attributes, ..
                } => self.process_start_tag(&name, attributes)?,
                Token::EndTag { name } => self.process_end_tag(&name)?,
                Token::Comment { data } => {
                    self.flush_pending_text()?;
                    let parent = self.insertion_parent()?;
                    let comment = self.dom.create_comment(self.document, &data);
                    self.dom.append_child(parent, comment)?;
                }
                Token::Character { data } => self.process_character(data),
                Token::EndOfFile => {
                    self.flush_pending_text()?;
                    break;
                }
            }
        }

        Ok(())
    }

    fn process_start_tag(
        &mut self,
        name: &str,
        attributes: Vec<tokenizer::Attribute>,
    ) -> Result<(), DomException> {
        self.flush_pending_text()?;

        if name == "html" {
            if let Target::Document { .. } = self.target {
                let html = self.html_element()?;
                for attribute in attributes {
                    if !self.dom.has_attribute(html, &attribute.name) {
                        self.dom.set_attribute(html, &attribute.name, &attribute.value)?;
                    }
                }
                return Ok(());
            }
        }

        let parent = self.insertion_parent()?;
        let attributes = attributes
            .into_iter()
            .map(|attribute| Attribute::new(attribute.name, attribute.value))
            .collect();
        let element = self
            .dom
            .create_element_for_parser(self.document, name, attributes);
        self.dom.append_child(parent, element)?;

        if is_void_element(name) {
            return Ok(());
        }

        self.stack_of_open_elements.push(element);
        if RAW_TEXT_ELEMENTS.contains(&name) {
            self.tokenizer.switch_to(State::RawText);
        }

        Ok(())
    }

    fn process_end_tag(&mut self, name: &str) -> Result<(), DomException> {
        self.flush_pending_text()?;

        match self
            .stack_of_open_elements
            .find_element_with_tag_name(self.dom, name)
        {
            Some(element) => self
                .stack_of_open_elements
                .pop_elements_until_element_has_been_popped(element),
            None if name == "html" => {}
            None => tracing::debug!(name, "ignoring end tag without matching start tag"),
        }

        Ok(())
    }

    fn process_character(&mut self, character: char) {
        // Whitespace before the root element is dropped.
        if let Target::Document { html: None } = self.target {
            if self.stack_of_open_elements.is_empty() && is_parser_whitespace(character) {
                return;
            }
        }
        self.pending_text.push(character);
    }

    fn flush_pending_text(&mut self) -> Result<(), DomException> {
        if self.pending_text.is_empty() {
            return Ok(());
        }

        let data = std::mem::take(&mut self.pending_text);
        let parent = self.insertion_parent()?;
        let text = self.dom.create_text_node(self.document, &data);
        self.dom.append_child(parent, text)?;
        Ok(())
    }

    // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node
    fn insertion_parent(&mut self) -> Result<NodeId, DomException> {
        if let Some(current_node) = self.stack_of_open_elements.current_node() {
            return Ok(current_node);
        }

        match self.target {
            Target::Document { .. } => self.html_element(),
            Target::Fragment(fragment) => Ok(fragment),
        }
    }

    fn html_element(&mut self) -> Result<NodeId, DomException> {
        match self.target {
            Target::Document { html: Some(html) } => Ok(html),
            Target::Document { html: None } => {
                let html = self
                    .dom
                    .create_element_for_parser(self.document, "html", Vec::new());
                self.dom.append_child(self.document, html)?;
                self.target = Target::Document { html: Some(html) };
                Ok(html)
            }
            Target::Fragment(fragment) => Ok(fragment),
        }
    }
}

/// Parses `input` as a complete document into `document`.
pub fn parse_document(dom: &mut Dom, document: NodeId, input: &str) -> Result<(), DomException> {
    Parser::new(dom, document, Target::Document { html: None }, input).parse()
}

/// Parses `input` into a new document fragment owned by `document`.
pub fn parse_fragment(dom: &mut Dom, document: NodeId, input: &str) -> Result<NodeId, DomException> {
    let fragment = dom.create_document_fragment(document);
    Parser::new(dom, document, Target::Fragment(fragment), input).parse()?;
    Ok(fragment)
}
