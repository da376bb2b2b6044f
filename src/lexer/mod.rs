//! Tokenizer for RSS/Atom markup.
//!
//! The lexer is a small state machine in the style of a hand-written template
//! scanner: each state inspects the input at the cursor, emits zero or more
//! [`Lexeme`]s, and names the state to run next. It does not know anything
//! about feeds; it only classifies spans of markup.
//!
//! Lexemes are produced on demand. [`Lexer::next_lexeme`] runs states only
//! until at least one lexeme is pending, so a consumer that stops early never
//! pays for scanning the rest of the document.
//!
//! # Tolerance
//!
//! Feeds in the wild are rarely valid XML, so the scanner accepts a lot:
//! namespaces are split off and reported but never resolved, comments and
//! `<!DOCTYPE>` style declarations are dropped, CDATA sections are passed
//! through untouched. What it does not accept (an unexpected symbol inside a
//! tag name, an attribute without `=`, a section running off the end of the
//! input) ends the scan with a single [`LexemeKind::Error`].
//!
//! # Example
//!
//! ```
//! use feedscan::lexer::{Lexer, LexemeKind};
//!
//! let kinds: Vec<LexemeKind> = Lexer::new("doc", "<title>Hi</title>")
//!     .map(|lexeme| lexeme.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         LexemeKind::OpenTag,
//!         LexemeKind::Text,
//!         LexemeKind::CloseTag,
//!         LexemeKind::EndOfInput,
//!     ]
//! );
//! ```

mod lexeme;
mod states;

use std::collections::VecDeque;
use std::iter::FusedIterator;

pub use lexeme::{Lexeme, LexemeKind};
use states::State;

/// Characters treated as insignificant whitespace between tokens.
pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Demand-driven scanner over one in-memory document.
///
/// A lexer is single-use: once it has produced `EndOfInput` or an `Error`
/// it keeps returning that same lexeme and never rescans.
pub struct Lexer<'a> {
    /// Document name, used only in diagnostics.
    name: &'a str,
    input: &'a str,
    state: State,
    /// Cursor (byte offset into `input`).
    pos: usize,
    /// Start of the span that the next emitted lexeme will cover.
    start: usize,
    /// Byte width of the last rune returned by `next_rune`.
    width: usize,
    pending: VecDeque<Lexeme<'a>>,
    /// The sticky `EndOfInput`/`Error` once it has been handed out.
    terminal: Option<Lexeme<'a>>,
    /// Set once the iterator has yielded the terminal lexeme.
    exhausted: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(name: &'a str, input: &'a str) -> Self {
        Self {
            name,
            input,
            state: State::ContentStart,
            pos: 0,
            start: 0,
            width: 0,
            pending: VecDeque::with_capacity(4),
            terminal: None,
            exhausted: false,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Line of the cursor, 1-based. After an error this is the line of the
    /// offending construct.
    pub fn line(&self) -> usize {
        1 + self.input[..self.pos].bytes().filter(|&b| b == b'\n').count()
    }

    /// Returns the next lexeme, running the state machine only as far as needed.
    pub fn next_lexeme(&mut self) -> Lexeme<'a> {
        loop {
            if let Some(lexeme) = self.pending.pop_front() {
                if lexeme.is_terminal() {
                    self.pending.clear();
                    self.terminal = Some(lexeme.clone());
                }
                return lexeme;
            }
            if let Some(terminal) = &self.terminal {
                return terminal.clone();
            }
            if self.state == State::Halted {
                // Halting always queues a terminal lexeme first, so this is unreachable
                // in practice; fall back to end of input rather than spin.
                self.terminal = Some(Lexeme::new(LexemeKind::EndOfInput, ""));
                continue;
            }
            self.state = self.step(self.state);
        }
    }

    // ------------------------------------------------------------------------
    // Cursor primitives
    // ------------------------------------------------------------------------

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Consumes and returns the next rune, or `None` at end of input.
    fn next_rune(&mut self) -> Option<char> {
        match self.rest().chars().next() {
            Some(c) => {
                self.width = c.len_utf8();
                self.pos += self.width;
                Some(c)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    /// Steps back over the rune returned by the last `next_rune`. One step only.
    fn backup(&mut self) {
        self.pos -= self.width;
        self.width = 0;
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Bounded lookahead: does the input at the cursor start with `expected`?
    ///
    /// Returns `None` when the input ends before the answer is known, which
    /// callers treat as a fatal read past the end of the content.
    fn lookahead(&self, expected: &str) -> Option<bool> {
        let mut ahead = self.rest().chars();
        for want in expected.chars() {
            if ahead.next()? != want {
                return Some(false);
            }
        }
        Some(true)
    }

    /// Consumes one rune if it is in `valid`.
    fn accept(&mut self, valid: &str) -> bool {
        match self.peek() {
            Some(c) if valid.contains(c) => {
                self.next_rune();
                true
            }
            _ => false,
        }
    }

    /// Consumes a run of runes from `valid`.
    fn accept_run(&mut self, valid: &str) {
        while self.accept(valid) {}
    }

    /// Consumes runes up to (not including) the first one matching `stop`.
    fn accept_until(&mut self, stop: impl Fn(char) -> bool) {
        let rest = self.rest();
        let len = rest.find(stop).unwrap_or(rest.len());
        self.pos += len;
    }

    fn skip_whitespace(&mut self) {
        self.accept_until(|c| !is_space(c));
        self.ignore();
    }

    /// Drops the pending span.
    fn ignore(&mut self) {
        self.start = self.pos;
    }

    fn emit(&mut self, kind: LexemeKind) {
        let value = &self.input[self.start..self.pos];
        self.pending.push_back(Lexeme::new(kind, value));
        self.start = self.pos;
    }

    /// Queues an error lexeme and halts the machine.
    fn fail(&mut self, message: String) -> State {
        tracing::debug!(
            name = %self.name,
            line = self.line(),
            message = %message,
            "Tokenizer stopped on malformed input"
        );
        let value = &self.input[self.start..self.pos];
        self.pending.push_back(Lexeme::new(LexemeKind::Error(message), value));
        State::Halted
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Lexeme<'a>;

    /// Yields every lexeme up to and including the terminal one, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let lexeme = self.next_lexeme();
        if lexeme.is_terminal() {
            self.exhausted = true;
        }
        Some(lexeme)
    }
}

impl FusedIterator for Lexer<'_> {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn lex(input: &str) -> Vec<(LexemeKind, &str)> {
        Lexer::new("test", input)
            .map(|lexeme| (lexeme.kind, lexeme.value))
            .collect()
    }

    use LexemeKind::*;

    #[test]
    fn test_simple_tag() {
        assert_eq!(lex("<tag>"), vec![(OpenTag, "tag"), (EndOfInput, "")]);
    }

    #[test]
    fn test_self_closing_tag() {
        assert_eq!(
            lex("<tag />"),
            vec![(OpenTag, "tag"), (SelfClosingTag, ""), (EndOfInput, "")]
        );
    }

    #[test]
    fn test_tag_with_attributes() {
        assert_eq!(
            lex(r#"<tag attr1="val1" attr2="val2">"#),
            vec![
                (OpenTag, "tag"),
                (AttributeName, "attr1"),
                (AttributeValue, "val1"),
                (AttributeName, "attr2"),
                (AttributeValue, "val2"),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_self_closing_with_attributes() {
        assert_eq!(
            lex(r#"<tag a1="v1" />"#),
            vec![
                (OpenTag, "tag"),
                (AttributeName, "a1"),
                (AttributeValue, "v1"),
                (SelfClosingTag, ""),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_single_quoted_attribute() {
        assert_eq!(
            lex("<tag a='v 1'/>"),
            vec![
                (OpenTag, "tag"),
                (AttributeName, "a"),
                (AttributeValue, "v 1"),
                (SelfClosingTag, ""),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_closing_tags() {
        assert_eq!(
            lex("<tag><child></child></tag>"),
            vec![
                (OpenTag, "tag"),
                (OpenTag, "child"),
                (CloseTag, "child"),
                (CloseTag, "tag"),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_closing_tag_with_trailing_space() {
        assert_eq!(
            lex("<item>x</item >"),
            vec![
                (OpenTag, "item"),
                (Text, "x"),
                (CloseTag, "item"),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_text_keeps_trailing_whitespace() {
        assert_eq!(
            lex("<tag>\n  Child text\n</tag>"),
            vec![
                (OpenTag, "tag"),
                (Text, "Child text\n"),
                (CloseTag, "tag"),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_text_is_not_decoded() {
        assert_eq!(
            lex("<t>a &amp; b</t>"),
            vec![
                (OpenTag, "t"),
                (Text, "a &amp; b"),
                (CloseTag, "t"),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_bare_text_at_top_level() {
        assert_eq!(
            lex("hello <a>"),
            vec![(Text, "hello "), (OpenTag, "a"), (EndOfInput, "")]
        );
    }

    #[test]
    fn test_cdata_is_raw_html() {
        assert_eq!(
            lex("<tag><![CDATA[child & <b>text</b>]]></tag>"),
            vec![
                (OpenTag, "tag"),
                (RawHtml, "child & <b>text</b>"),
                (CloseTag, "tag"),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_cdata_interior_is_exact() {
        assert_eq!(
            lex("<t><![CDATA[\n a ] b ]] c \n]]></t>"),
            vec![
                (OpenTag, "t"),
                (RawHtml, "\n a ] b ]] c \n"),
                (CloseTag, "t"),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_consecutive_cdata_sections() {
        let input = "<content:encoded>\n<![CDATA[one]]>\n<![CDATA[two]]>\n</content:encoded>";
        assert_eq!(
            lex(input),
            vec![
                (NamespacePrefix, "content"),
                (OpenTag, "encoded"),
                (RawHtml, "one"),
                (RawHtml, "two"),
                (NamespacePrefix, "content"),
                (CloseTag, "encoded"),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_xml_declaration() {
        assert_eq!(
            lex(r#"<?xml version="1.0" encoding="UTF-8"?>"#),
            vec![
                (OpenTag, "xml"),
                (AttributeName, "version"),
                (AttributeValue, "1.0"),
                (AttributeName, "encoding"),
                (AttributeValue, "UTF-8"),
                (NamespaceEnd, ""),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_declaration_without_attributes() {
        assert_eq!(
            lex("<?php?><a>"),
            vec![
                (OpenTag, "php"),
                (NamespaceEnd, ""),
                (OpenTag, "a"),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_namespaced_attributes() {
        assert_eq!(
            lex(r#"<rss ns1:a1="v1" ns2:a2="v2"></rss>"#),
            vec![
                (OpenTag, "rss"),
                (NamespacePrefix, "ns1"),
                (AttributeName, "a1"),
                (AttributeValue, "v1"),
                (NamespacePrefix, "ns2"),
                (AttributeName, "a2"),
                (AttributeValue, "v2"),
                (CloseTag, "rss"),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_comment_is_dropped() {
        assert_eq!(
            lex("<tag><!-- child></child--></tag>"),
            vec![(OpenTag, "tag"), (CloseTag, "tag"), (EndOfInput, "")]
        );
    }

    #[test]
    fn test_empty_comment_is_dropped() {
        assert_eq!(
            lex("<!----><a>"),
            vec![(OpenTag, "a"), (EndOfInput, "")]
        );
    }

    #[test]
    fn test_doctype_is_dropped() {
        assert_eq!(
            lex("<!DOCTYPE rss><rss>"),
            vec![(OpenTag, "rss"), (EndOfInput, "")]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(lex(""), vec![(EndOfInput, "")]);
        assert_eq!(lex(" \n\t "), vec![(EndOfInput, "")]);
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(
            lex("<t>héllo ✓</t>"),
            vec![
                (OpenTag, "t"),
                (Text, "héllo ✓"),
                (CloseTag, "t"),
                (EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_glued_slash_is_fatal() {
        let lexemes = lex("<a><br/></a>");
        assert_eq!(lexemes[0], (OpenTag, "a"));
        assert!(matches!(lexemes[1].0, Error(ref m) if m.contains("unexpected symbol")));
        assert_eq!(lexemes.len(), 2);
    }

    #[test]
    fn test_unterminated_tag_is_fatal() {
        let lexemes = lex("<title");
        assert!(matches!(lexemes.last().unwrap().0, Error(_)));
    }

    #[test]
    fn test_attribute_without_equals_is_fatal() {
        let lexemes = lex("<a href");
        assert_eq!(lexemes[0], (OpenTag, "a"));
        assert!(matches!(lexemes[1].0, Error(ref m) if m.contains("did not find")));
    }

    #[test]
    fn test_unterminated_cdata_is_fatal() {
        let lexemes = lex("<t><![CDATA[never closed");
        assert!(matches!(lexemes.last().unwrap().0, Error(_)));
    }

    #[test]
    fn test_unterminated_comment_is_fatal() {
        let lexemes = lex("<t><!-- never closed");
        assert!(matches!(lexemes.last().unwrap().0, Error(_)));
    }

    #[test]
    fn test_truncated_markup_declaration_is_fatal() {
        let lexemes = lex("<t><!");
        assert!(matches!(lexemes.last().unwrap().0, Error(ref m) if m.contains("past end")));
    }

    #[test]
    fn test_error_is_sticky() {
        let mut lexer = Lexer::new("sticky", "<a>\n<b/>");
        assert_eq!(lexer.next_lexeme().kind, OpenTag);
        let first = lexer.next_lexeme();
        assert!(matches!(first.kind, Error(_)));
        for _ in 0..3 {
            assert_eq!(lexer.next_lexeme(), first);
        }
        assert_eq!(lexer.line(), 2);
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let mut lexer = Lexer::new("eof", "<a>");
        lexer.next_lexeme();
        for _ in 0..3 {
            assert_eq!(lexer.next_lexeme().kind, EndOfInput);
        }
    }

    #[test]
    fn test_iterator_stops_after_terminal() {
        let mut lexer = Lexer::new("iter", "<a>");
        assert_eq!(lexer.next().map(|l| l.kind), Some(OpenTag));
        assert_eq!(lexer.next().map(|l| l.kind), Some(EndOfInput));
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_production_is_lazy() {
        let input = "<a>one</a><b>";
        let mut lexer = Lexer::new("lazy", input);
        assert_eq!(lexer.next_lexeme().value, "a");
        // Only the first tag has been scanned so far.
        assert!(lexer.pos <= "<a>".len());
    }

    proptest! {
        #[test]
        fn prop_lexer_terminates_without_panicking(input in "[<>/!?\\[\\]=\"a-c: \\n-]{0,64}") {
            let lexemes: Vec<_> = Lexer::new("prop", &input).collect();
            prop_assert!(!lexemes.is_empty());
            prop_assert!(lexemes.last().unwrap().is_terminal());
            prop_assert_eq!(lexemes.iter().filter(|l| l.is_terminal()).count(), 1);
        }

        #[test]
        fn prop_values_are_input_substrings(input in "[<>/=\"a-c \\n]{0,64}") {
            for lexeme in Lexer::new("prop", &input) {
                if !matches!(lexeme.kind, Error(_)) {
                    prop_assert!(input.contains(lexeme.value));
                }
            }
        }
    }
}
