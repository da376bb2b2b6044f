//! Lexer states.
//!
//! Each state consumes some input, may emit lexemes, and returns the state
//! that runs next. `Halted` is entered only after a terminal lexeme has been
//! queued.

use super::{is_space, Lexer, LexemeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum State {
    ContentStart,
    TagStart,
    Attributes,
    /// `<!` constructs: CDATA sections, comments, and other declarations.
    CData,
    Comment,
    /// `<?...?>` declarations such as the XML prolog.
    Namespace,
    TagContents,
    Halted,
}

const CDATA_OPEN: &str = "<![";
const CDATA_CLOSE: &str = "]]>";
const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

impl<'a> Lexer<'a> {
    pub(super) fn step(&mut self, state: State) -> State {
        match state {
            State::ContentStart => self.lex_content_start(),
            State::TagStart => self.lex_tag_start(),
            State::Attributes => self.lex_attributes(),
            State::CData => self.lex_cdata(),
            State::Comment => self.lex_comment(),
            State::Namespace => self.lex_namespace(),
            State::TagContents => self.lex_tag_contents(),
            State::Halted => State::Halted,
        }
    }

    fn lex_content_start(&mut self) -> State {
        self.skip_whitespace();
        match self.peek() {
            None => {
                self.emit(LexemeKind::EndOfInput);
                State::Halted
            }
            Some('<') => State::TagStart,
            Some(_) => State::TagContents,
        }
    }

    fn lex_tag_start(&mut self) -> State {
        self.accept("<");
        let mut closing = false;
        match self.peek() {
            Some('!') => {
                self.pos = self.start;
                return State::CData;
            }
            Some('?') => {
                self.pos = self.start;
                return State::Namespace;
            }
            Some('/') => {
                self.next_rune();
                closing = true;
            }
            _ => {}
        }
        self.ignore();

        let tag_kind = if closing {
            LexemeKind::CloseTag
        } else {
            LexemeKind::OpenTag
        };

        // `ns:tag` reports the prefix, then keeps scanning for the local name.
        loop {
            self.accept_until(|c| matches!(c, '/' | ':' | '>') || is_space(c));
            match self.peek() {
                Some(':') => {
                    self.emit(LexemeKind::NamespacePrefix);
                    self.next_rune();
                    self.ignore();
                }
                Some(c) if is_space(c) => {
                    self.emit(tag_kind);
                    return State::Attributes;
                }
                Some('>') => {
                    self.emit(tag_kind);
                    self.next_rune();
                    self.ignore();
                    return if closing {
                        State::ContentStart
                    } else {
                        State::TagContents
                    };
                }
                other => {
                    return self.fail(format!(
                        "error parsing tag, unexpected symbol: {}",
                        describe(other)
                    ));
                }
            }
        }
    }

    fn lex_attributes(&mut self) -> State {
        self.skip_whitespace();

        match self.peek() {
            Some('/') => {
                self.next_rune();
                if self.peek() == Some('>') {
                    self.next_rune();
                    self.ignore();
                    self.emit(LexemeKind::SelfClosingTag);
                    return State::ContentStart;
                }
                self.backup();
            }
            Some('?' | '!') if self.rest().chars().nth(1) == Some('>') => {
                self.pos += 2;
                self.ignore();
                self.emit(LexemeKind::NamespaceEnd);
                return State::TagContents;
            }
            Some('>') => {
                self.next_rune();
                self.ignore();
                return State::TagContents;
            }
            _ => {}
        }

        loop {
            self.accept_until(|c| c == ':' || c == '=');
            match self.peek() {
                Some(':') => {
                    self.emit(LexemeKind::NamespacePrefix);
                    self.next_rune();
                    self.ignore();
                }
                Some('=') => {
                    self.emit(LexemeKind::AttributeName);
                    break;
                }
                _ => {
                    return self.fail("lex attributes: did not find := before end of input".to_string());
                }
            }
        }

        self.accept("=");
        self.skip_whitespace();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.next_rune();
                self.ignore();
                self.accept_until(|c| c == quote);
                self.emit(LexemeKind::AttributeValue);
                self.next_rune();
                self.ignore();
            }
            _ => {
                // Unquoted value: runs to whitespace or the end of the tag.
                self.accept_until(|c| c == '>' || is_space(c));
                self.emit(LexemeKind::AttributeValue);
            }
        }

        State::Attributes
    }

    fn lex_cdata(&mut self) -> State {
        match self.lookahead(COMMENT_OPEN) {
            None => return self.fail("peeked past end of content".to_string()),
            Some(true) => return State::Comment,
            Some(false) => {}
        }

        if self.lookahead(CDATA_OPEN) != Some(true) {
            // `<!DOCTYPE ...>` and friends carry nothing a feed needs.
            self.accept_until(|c| c == '>');
            if self.next_rune().is_none() {
                return self.fail("markup declaration: end of input before >".to_string());
            }
            self.ignore();
            return State::ContentStart;
        }

        self.accept_run(CDATA_OPEN);
        self.accept_until(|c| c == '[');
        self.accept("[");
        self.ignore();

        loop {
            self.accept_until(|c| c == ']');
            match self.lookahead(CDATA_CLOSE) {
                None => return self.fail("CDATA: end of input before ]]>".to_string()),
                Some(true) => break,
                Some(false) => {
                    self.next_rune();
                }
            }
        }

        self.emit(LexemeKind::RawHtml);
        self.pos += CDATA_CLOSE.len();
        self.ignore();
        State::ContentStart
    }

    fn lex_comment(&mut self) -> State {
        self.pos += COMMENT_OPEN.len();
        loop {
            self.accept_until(|c| c == '-');
            match self.lookahead(COMMENT_CLOSE) {
                None => return self.fail("comment: end of input before -->".to_string()),
                Some(true) => break,
                Some(false) => {
                    self.next_rune();
                }
            }
        }
        self.pos += COMMENT_CLOSE.len();
        self.ignore();
        State::ContentStart
    }

    fn lex_namespace(&mut self) -> State {
        self.accept_run("<!?");
        self.ignore();
        loop {
            self.accept_until(|c| matches!(c, '?' | '!' | ':' | '>') || is_space(c));
            match self.peek() {
                Some(':') => {
                    self.emit(LexemeKind::NamespacePrefix);
                    self.next_rune();
                    self.ignore();
                }
                Some(c) if is_space(c) => {
                    self.emit(LexemeKind::OpenTag);
                    return State::Attributes;
                }
                Some('?' | '!') => {
                    self.emit(LexemeKind::OpenTag);
                    self.accept_run("?!>");
                    self.ignore();
                    self.emit(LexemeKind::NamespaceEnd);
                    return State::ContentStart;
                }
                other => {
                    return self.fail(format!(
                        "error parsing declaration, unexpected symbol: {}",
                        describe(other)
                    ));
                }
            }
        }
    }

    fn lex_tag_contents(&mut self) -> State {
        self.skip_whitespace();
        match self.peek() {
            None | Some('<') => State::ContentStart,
            Some(_) => {
                self.accept_until(|c| c == '<');
                self.emit(LexemeKind::Text);
                State::ContentStart
            }
        }
    }
}

fn describe(symbol: Option<char>) -> String {
    match symbol {
        Some(c) => format!("{:?}", c),
        None => "end of input".to_string(),
    }
}
