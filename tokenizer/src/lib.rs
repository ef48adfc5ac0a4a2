use std::collections::VecDeque;

macro_rules! on {
    ($c:expr) => {
        Some($c)
    };
}

macro_rules! on_whitespace {
    () => {
        on!('\t') | // Tab
        on!('\n') | // Line Feed
        on!('\u{000c}') | // Form Feed
        on!('\r') | // Carriage Return
        on!(' ') // Space
    };
}

macro_rules! on_null {
    () => {
        on!('\u{0000}')
    };
}

macro_rules! on_anything_else {
    () => {
        Some(_)
    };
    ($c:ident) => {
        Some($c)
    };
}

macro_rules! on_eof {
    () => {
        None
    };
}

macro_rules! on_ascii_upper_alpha {
    () => {
        Some('A'..='Z')
    };
    ($c:ident) => {
        Some($c @ 'A'..='Z')
    };
}

macro_rules! on_ascii_lower_alpha {
    () => {
        Some('a'..='z')
    };
    ($c:ident) => {
        Some($c @ 'a'..='z')
    };
}

macro_rules! on_ascii_alpha {
    () => {
        on_ascii_upper_alpha!() | on_ascii_lower_alpha!()
    };
    ($c:ident) => {
        on_ascii_upper_alpha!($c) | on_ascii_lower_alpha!($c)
    };
}

const REPLACEMENT_CHARACTER: char = '\u{fffd}';

// Only the references that show up in hand-written templates are supported.
const NAMED_CHARACTER_REFERENCES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00a0}'),
    ("copy", '\u{00a9}'),
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    Data,
    RawText,
    TagOpen,
    EndTagOpen,
    TagName,
    RawTextLessThanSign,
    RawTextEndTagOpen,
    RawTextEndTagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
    BogusComment,
    MarkupDeclarationOpen,
    CommentStart,
    CommentStartDash,
    Comment,
    CommentEndDash,
    CommentEnd,
    Doctype,
    BeforeDoctypeName,
    DoctypeName,
    AfterDoctypeName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Doctype {
        name: Option<String>,
        force_quirks: bool,
    },
    StartTag {
        name: String,
        self_closing: bool,
        attributes: Vec<Attribute>,
    },
    EndTag {
        name: String,
    },
    Comment {
        data: String,
    },
    Character {
        data: char,
    },
    EndOfFile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug)]
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    state: State,
    pending_token: Option<Token>,
    pending_attribute: Option<Attribute>,
    last_start_tag_name: Option<String>,
    end_tag_buffer: String,
    queue: VecDeque<Token>,
    eof_emitted: bool,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            // Newlines are normalized before tokenization.
            input: input.replace("\r\n", "\n").replace('\r', "\n").chars().collect(),
            position: 0,
            state: State::Data,
            pending_token: None,
            pending_attribute: None,
            last_start_tag_name: None,
            end_tag_buffer: String::new(),
            queue: VecDeque::new(),
            eof_emitted: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn switch_to(&mut self, state: State) {
        self.state = state;
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn consume(&mut self) -> Option<char> {
        let character = self.peek();
        self.position += 1;
        character
    }

    fn reconsume(&mut self, state: State) {
        self.position -= 1;
        self.state = state;
    }

    /// Consumes `keyword` if the input continues with it, ignoring ASCII case.
    fn consume_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.input.get(self.position..).unwrap_or_default();
        let matches = rest.len() >= keyword.len()
            && keyword
                .chars()
                .zip(rest)
                .all(|(expected, actual)| expected.eq_ignore_ascii_case(actual));
        if matches {
            self.position += keyword.len();
        }
        matches
    }

    fn emit(&mut self, token: Token) {
        self.eof_emitted |= matches!(token, Token::EndOfFile);
        self.queue.push_back(token);
    }

    fn emit_character(&mut self, data: char) {
        self.emit(Token::Character { data });
    }

    fn emit_characters(&mut self, data: &str) {
        for character in data.chars() {
            self.emit_character(character);
        }
    }

    // A duplicate attribute is a parse error; the first occurrence wins.
    fn commit_attribute(&mut self) {
        let Some(attribute) = self.pending_attribute.take() else {
            return;
        };
        if let Some(Token::StartTag { attributes, .. }) = &mut self.pending_token {
            if attributes.iter().all(|existing| existing.name != attribute.name) {
                attributes.push(attribute);
            }
        }
    }

    fn start_attribute(&mut self, name: String) {
        self.commit_attribute();
        self.pending_attribute = Some(Attribute {
            name,
            value: String::new(),
        });
    }

    fn emit_pending_token(&mut self) {
        self.commit_attribute();

        let Some(token) = self.pending_token.take() else {
            return;
        };
        if let Token::StartTag { name, .. } = &token {
            self.last_start_tag_name = Some(name.clone());
        }
        self.emit(token);
    }

    /// Emits the pending token and returns to the data state.
    fn finish_token(&mut self) {
        self.state = State::Data;
        self.emit_pending_token();
    }

    fn finish_token_with_force_quirks(&mut self) {
        self.state = State::Data;
        self.emit_doctype_with_force_quirks();
    }

    fn append_to_tag_name(&mut self, character: char) {
        match &mut self.pending_token {
            Some(Token::StartTag { name, .. }) | Some(Token::EndTag { name }) => {
                name.push(character.to_ascii_lowercase())
            }
            _ => {}
        }
    }

    fn append_to_attribute_name(&mut self, character: char) {
        if let Some(Attribute { name, .. }) = &mut self.pending_attribute {
            name.push(character.to_ascii_lowercase());
        }
    }

    fn append_to_attribute_value(&mut self, data: &str) {
        if let Some(Attribute { value, .. }) = &mut self.pending_attribute {
            value.push_str(data);
        }
    }

    fn append_to_comment(&mut self, data: &str) {
        if let Some(Token::Comment { data: comment }) = &mut self.pending_token {
            comment.push_str(data);
        }
    }

    fn append_to_doctype_name(&mut self, character: char) {
        if let Some(Token::Doctype { name, .. }) = &mut self.pending_token {
            name.get_or_insert_with(String::new)
                .push(character.to_ascii_lowercase());
        }
    }

    fn emit_doctype_with_force_quirks(&mut self) {
        if let Some(Token::Doctype { force_quirks, .. }) = &mut self.pending_token {
            *force_quirks = true;
        }
        self.emit_pending_token();
    }

    fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.pending_token, &self.last_start_tag_name) {
            (Some(Token::EndTag { name }), Some(last_start_tag_name)) => {
                name == last_start_tag_name
            }
            _ => false,
        }
    }

    // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state
    // The `&` has already been consumed. Returns the code points the reference stands for,
    // or the consumed characters unchanged when they do not form a reference.
    fn consume_character_reference(&mut self) -> String {
        match self.peek() {
            Some('#') => {
                self.position += 1;
                let mut consumed = String::from("&#");
                let radix = match self.peek() {
                    Some(x @ ('x' | 'X')) => {
                        consumed.push(x);
                        self.position += 1;
                        16
                    }
                    _ => 10,
                };

                let mut code: u32 = 0;
                let mut digits = 0;
                while let Some(digit) = self.peek().and_then(|c| c.to_digit(radix)) {
                    code = code.saturating_mul(radix).saturating_add(digit);
                    digits += 1;
                    self.position += 1;
                }
                if digits == 0 {
                    // absence-of-digits-in-numeric-character-reference parse error
                    return consumed;
                }
                if self.peek() == Some(';') {
                    self.position += 1;
                }

                char::from_u32(code)
                    .filter(|character| *character != '\u{0000}')
                    .unwrap_or(REPLACEMENT_CHARACTER)
                    .to_string()
            }
            Some(c) if c.is_ascii_alphanumeric() => {
                let start = self.position;
                while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
                    self.position += 1;
                }
                let name: String = self.input[start..self.position].iter().collect();
                match NAMED_CHARACTER_REFERENCES
                    .iter()
                    .find(|(reference, _)| *reference == name)
                {
                    Some((_, character)) => {
                        if self.peek() == Some(';') {
                            self.position += 1;
                        }
                        character.to_string()
                    }
                    None => format!("&{name}"),
                }
            }
            _ => "&".to_string(),
        }
    }

    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.eof_emitted {
                return None;
            }
            self.step();
        }
    }

    fn step(&mut self) {
        match self.state {
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#data-state
            State::Data => {
                match self.consume() {
                    on!('&') => {
                        let reference = self.consume_character_reference();
                        self.emit_characters(&reference);
                    }
                    on!('<') => self.switch_to(State::TagOpen),
                    on_null!() => self.emit_character(REPLACEMENT_CHARACTER),
                    on_eof!() => self.emit(Token::EndOfFile),
                    on_anything_else!(character) => self.emit_character(character),
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state
            State::RawText => {
                match self.consume() {
                    on!('<') => self.switch_to(State::RawTextLessThanSign),
                    on_null!() => self.emit_character(REPLACEMENT_CHARACTER),
                    on_eof!() => self.emit(Token::EndOfFile),
                    on_anything_else!(character) => self.emit_character(character),
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state
            State::TagOpen => {
                match self.consume() {
                    on!('!') => self.switch_to(State::MarkupDeclarationOpen),
                    on!('/') => self.switch_to(State::EndTagOpen),
                    on_ascii_alpha!() => {
                        // 1. Create a new start tag token, set its tag name to the empty string.
                        self.pending_token = Some(Token::StartTag {
                            name: String::new(),
                            self_closing: false,
                            attributes: Vec::new(),
                        });
                        // 2. Reconsume in the tag name state.
                        self.reconsume(State::TagName);
                    }
                    on!('?') => {
                        // unexpected-question-mark-instead-of-tag-name parse error
                        self.pending_token = Some(Token::Comment {
                            data: String::new(),
                        });
                        self.reconsume(State::BogusComment);
                    }
                    on_eof!() => {
                        // eof-before-tag-name parse error
                        self.emit_character('<');
                        self.emit(Token::EndOfFile);
                    }
                    on_anything_else!() => {
                        // invalid-first-character-of-tag-name parse error
                        self.emit_character('<');
                        self.reconsume(State::Data);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state
            State::EndTagOpen => {
                match self.consume() {
                    on_ascii_alpha!() => {
                        self.pending_token = Some(Token::EndTag {
                            name: String::new(),
                        });
                        self.reconsume(State::TagName);
                    }
                    on!('>') => {
                        // missing-end-tag-name parse error
                        self.switch_to(State::Data);
                    }
                    on_eof!() => {
                        // eof-before-tag-name parse error
                        self.emit_characters("</");
                        self.emit(Token::EndOfFile);
                    }
                    on_anything_else!() => {
                        // invalid-first-character-of-tag-name parse error
                        self.pending_token = Some(Token::Comment {
                            data: String::new(),
                        });
                        self.reconsume(State::BogusComment);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state
            State::TagName => {
                match self.consume() {
                    on_whitespace!() => self.switch_to(State::BeforeAttributeName),
                    on!('/') => self.switch_to(State::SelfClosingStartTag),
                    on!('>') => {
                        self.finish_token();
                    }
                    on_null!() => self.append_to_tag_name(REPLACEMENT_CHARACTER),
                    on_eof!() => {
                        // eof-in-tag parse error
                        self.emit(Token::EndOfFile);
                    }
                    on_anything_else!(character) => self.append_to_tag_name(character),
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state
            State::RawTextLessThanSign => {
                match self.consume() {
                    on!('/') => {
                        self.end_tag_buffer.clear();
                        self.switch_to(State::RawTextEndTagOpen);
                    }
                    _ => {
                        self.emit_character('<');
                        self.reconsume(State::RawText);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state
            State::RawTextEndTagOpen => {
                match self.consume() {
                    on_ascii_alpha!() => {
                        self.pending_token = Some(Token::EndTag {
                            name: String::new(),
                        });
                        self.reconsume(State::RawTextEndTagName);
                    }
                    _ => {
                        self.emit_characters("</");
                        self.reconsume(State::RawText);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state
            State::RawTextEndTagName => {
                match self.consume() {
                    on_whitespace!() if self.is_appropriate_end_tag_token() => {
                        self.switch_to(State::BeforeAttributeName)
                    }
                    on!('/') if self.is_appropriate_end_tag_token() => {
                        self.switch_to(State::SelfClosingStartTag)
                    }
                    on!('>') if self.is_appropriate_end_tag_token() => {
                        self.finish_token();
                    }
                    on_ascii_alpha!(character) => {
                        self.append_to_tag_name(character);
                        self.end_tag_buffer.push(character);
                    }
                    _ => {
                        // Not our end tag after all, the consumed characters are text.
                        self.pending_token = None;
                        self.emit_characters("</");
                        let buffer = std::mem::take(&mut self.end_tag_buffer);
                        self.emit_characters(&buffer);
                        self.reconsume(State::RawText);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state
            State::BeforeAttributeName => {
                match self.consume() {
                    on_whitespace!() => {}
                    on!('/') | on!('>') | on_eof!() => self.reconsume(State::AfterAttributeName),
                    on!('=') => {
                        // unexpected-equals-sign-before-attribute-name parse error
                        self.start_attribute("=".to_string());
                        self.switch_to(State::AttributeName);
                    }
                    on_anything_else!() => {
                        self.start_attribute(String::new());
                        self.reconsume(State::AttributeName);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state
            State::AttributeName => {
                match self.consume() {
                    on_whitespace!() | on!('/') | on!('>') | on_eof!() => {
                        self.reconsume(State::AfterAttributeName)
                    }
                    on!('=') => self.switch_to(State::BeforeAttributeValue),
                    on_null!() => self.append_to_attribute_name(REPLACEMENT_CHARACTER),
                    on_anything_else!(character) => self.append_to_attribute_name(character),
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state
            State::AfterAttributeName => {
                match self.consume() {
                    on_whitespace!() => {}
                    on!('/') => self.switch_to(State::SelfClosingStartTag),
                    on!('=') => self.switch_to(State::BeforeAttributeValue),
                    on!('>') => {
                        self.finish_token();
                    }
                    on_eof!() => self.emit(Token::EndOfFile),
                    on_anything_else!() => {
                        self.start_attribute(String::new());
                        self.reconsume(State::AttributeName);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state
            State::BeforeAttributeValue => {
                match self.consume() {
                    on_whitespace!() => {}
                    on!('"') => self.switch_to(State::AttributeValueDoubleQuoted),
                    on!('\'') => self.switch_to(State::AttributeValueSingleQuoted),
                    on!('>') => {
                        // missing-attribute-value parse error
                        self.finish_token();
                    }
                    _ => self.reconsume(State::AttributeValueUnquoted),
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state
            State::AttributeValueDoubleQuoted | State::AttributeValueSingleQuoted => {
                let quote = match self.state {
                    State::AttributeValueDoubleQuoted => '"',
                    _ => '\'',
                };
                match self.consume() {
                    Some(character) if character == quote => {
                        self.switch_to(State::AfterAttributeValueQuoted)
                    }
                    on!('&') => {
                        let reference = self.consume_character_reference();
                        self.append_to_attribute_value(&reference);
                    }
                    on_null!() => {
                        self.append_to_attribute_value(&REPLACEMENT_CHARACTER.to_string())
                    }
                    on_eof!() => self.emit(Token::EndOfFile),
                    on_anything_else!(character) => {
                        self.append_to_attribute_value(&character.to_string())
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state
            State::AttributeValueUnquoted => {
                match self.consume() {
                    on_whitespace!() => self.switch_to(State::BeforeAttributeName),
                    on!('&') => {
                        let reference = self.consume_character_reference();
                        self.append_to_attribute_value(&reference);
                    }
                    on!('>') => {
                        self.finish_token();
                    }
                    on_null!() => {
                        self.append_to_attribute_value(&REPLACEMENT_CHARACTER.to_string())
                    }
                    on_eof!() => self.emit(Token::EndOfFile),
                    on_anything_else!(character) => {
                        self.append_to_attribute_value(&character.to_string())
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state
            State::AfterAttributeValueQuoted => {
                match self.consume() {
                    on_whitespace!() => self.switch_to(State::BeforeAttributeName),
                    on!('/') => self.switch_to(State::SelfClosingStartTag),
                    on!('>') => {
                        self.finish_token();
                    }
                    on_eof!() => self.emit(Token::EndOfFile),
                    on_anything_else!() => {
                        // missing-whitespace-between-attributes parse error
                        self.reconsume(State::BeforeAttributeName);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state
            State::SelfClosingStartTag => {
                match self.consume() {
                    on!('>') => {
                        if let Some(Token::StartTag { self_closing, .. }) = &mut self.pending_token
                        {
                            *self_closing = true;
                        }
                        self.finish_token();
                    }
                    on_eof!() => self.emit(Token::EndOfFile),
                    on_anything_else!() => {
                        // unexpected-solidus-in-tag parse error
                        self.reconsume(State::BeforeAttributeName);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state
            State::BogusComment => {
                match self.consume() {
                    on!('>') => {
                        self.finish_token();
                    }
                    on_eof!() => {
                        self.emit_pending_token();
                        self.emit(Token::EndOfFile);
                    }
                    on_null!() => self.append_to_comment(&REPLACEMENT_CHARACTER.to_string()),
                    on_anything_else!(character) => self.append_to_comment(&character.to_string()),
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state
            State::MarkupDeclarationOpen => {
                if self.consume_keyword("--") {
                    self.pending_token = Some(Token::Comment {
                        data: String::new(),
                    });
                    self.switch_to(State::CommentStart);
                } else if self.consume_keyword("DOCTYPE") {
                    self.switch_to(State::Doctype);
                } else {
                    // incorrectly-opened-comment parse error
                    self.pending_token = Some(Token::Comment {
                        data: String::new(),
                    });
                    self.switch_to(State::BogusComment);
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state
            State::CommentStart => {
                match self.consume() {
                    on!('-') => self.switch_to(State::CommentStartDash),
                    on!('>') => {
                        // abrupt-closing-of-empty-comment parse error
                        self.finish_token();
                    }
                    _ => self.reconsume(State::Comment),
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state
            State::CommentStartDash => {
                match self.consume() {
                    on!('-') => self.switch_to(State::CommentEnd),
                    on!('>') => {
                        self.finish_token();
                    }
                    on_eof!() => {
                        self.emit_pending_token();
                        self.emit(Token::EndOfFile);
                    }
                    on_anything_else!() => {
                        self.append_to_comment("-");
                        self.reconsume(State::Comment);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#comment-state
            State::Comment => {
                match self.consume() {
                    on!('-') => self.switch_to(State::CommentEndDash),
                    on_null!() => self.append_to_comment(&REPLACEMENT_CHARACTER.to_string()),
                    on_eof!() => {
                        self.emit_pending_token();
                        self.emit(Token::EndOfFile);
                    }
                    on_anything_else!(character) => self.append_to_comment(&character.to_string()),
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state
            State::CommentEndDash => {
                match self.consume() {
                    on!('-') => self.switch_to(State::CommentEnd),
                    on_eof!() => {
                        self.emit_pending_token();
                        self.emit(Token::EndOfFile);
                    }
                    on_anything_else!() => {
                        self.append_to_comment("-");
                        self.reconsume(State::Comment);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state
            State::CommentEnd => {
                match self.consume() {
                    on!('>') => {
                        self.finish_token();
                    }
                    on!('-') => self.append_to_comment("-"),
                    on_eof!() => {
                        self.emit_pending_token();
                        self.emit(Token::EndOfFile);
                    }
                    on_anything_else!() => {
                        self.append_to_comment("--");
                        self.reconsume(State::Comment);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#doctype-state
            State::Doctype => {
                self.pending_token = Some(Token::Doctype {
                    name: None,
                    force_quirks: false,
                });
                match self.consume() {
                    on_whitespace!() => self.switch_to(State::BeforeDoctypeName),
                    on_eof!() => {
                        self.emit_doctype_with_force_quirks();
                        self.emit(Token::EndOfFile);
                    }
                    _ => self.reconsume(State::BeforeDoctypeName),
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state
            State::BeforeDoctypeName => {
                match self.consume() {
                    on_whitespace!() => {}
                    on!('>') => {
                        // missing-doctype-name parse error
                        self.finish_token_with_force_quirks();
                    }
                    on_eof!() => {
                        self.emit_doctype_with_force_quirks();
                        self.emit(Token::EndOfFile);
                    }
                    on_anything_else!(character) => {
                        self.append_to_doctype_name(character);
                        self.switch_to(State::DoctypeName);
                    }
                }
            }
            // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state
            State::DoctypeName => {
                match self.consume() {
                    on_whitespace!() => self.switch_to(State::AfterDoctypeName),
                    on!('>') => {
                        self.finish_token();
                    }
                    on_eof!() => {
                        self.emit_doctype_with_force_quirks();
                        self.emit(Token::EndOfFile);
                    }
                    on_anything_else!(character) => self.append_to_doctype_name(character),
                }
            }
            // Public and system identifiers are skipped, they carry no meaning for us.
            State::AfterDoctypeName => {
                match self.consume() {
                    on!('>') => {
                        self.finish_token();
                    }
                    on_eof!() => {
                        self.emit_doctype_with_force_quirks();
                        self.emit(Token::EndOfFile);
                    }
                    on_anything_else!() => {}
                }
            }
        }
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
