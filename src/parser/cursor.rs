use crate::lexer::{Lexeme, LexemeKind, Lexer};

use super::ParseError;

/// The parser's view of the lexer: a single push-back slot and fatal lexemes
/// surfaced as errors.
///
/// Handlers read ahead until they see something that belongs to their caller
/// (an item boundary, end of input, an unrelated tag) and hand it back with
/// [`Cursor::push_back`]. One slot is enough because every handler returns as
/// soon as it pushes.
pub(super) struct Cursor<'a> {
    lexer: Lexer<'a>,
    pushed: Option<Lexeme<'a>>,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            pushed: None,
        }
    }

    pub(super) fn name(&self) -> &'a str {
        self.lexer.name()
    }

    /// Next lexeme, or the tokenizer's fatal error. The error is sticky, so
    /// every call after the first failure fails the same way.
    pub(super) fn advance(&mut self) -> Result<Lexeme<'a>, ParseError> {
        let lexeme = match self.pushed.take() {
            Some(lexeme) => lexeme,
            None => self.lexer.next_lexeme(),
        };
        if let LexemeKind::Error(message) = &lexeme.kind {
            return Err(ParseError::Malformed {
                name: self.lexer.name().to_string(),
                line: self.lexer.line(),
                message: message.clone(),
            });
        }
        Ok(lexeme)
    }

    pub(super) fn push_back(&mut self, lexeme: Lexeme<'a>) {
        debug_assert!(self.pushed.is_none(), "push-back slot already occupied");
        self.pushed = Some(lexeme);
    }
}
