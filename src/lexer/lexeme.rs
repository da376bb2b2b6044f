use std::fmt;

/// Classification of a scanned span of feed markup.
///
/// The set is closed: the parser matches on it exhaustively and anything it
/// does not care about (attributes of unknown tags, namespace prefixes) is
/// simply passed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexemeKind {
    /// Input is exhausted. Every request after this one yields it again.
    EndOfInput,
    /// A malformed low-level construct. Terminal, like `EndOfInput`.
    Error(String),
    /// The `ns` of `ns:tag` or `ns:attr`.
    NamespacePrefix,
    /// The `?>` closing an `<?xml ... ?>` style declaration.
    NamespaceEnd,
    OpenTag,
    CloseTag,
    /// The `/>` of `<tag ... />`.
    SelfClosingTag,
    AttributeName,
    AttributeValue,
    /// Character data between tags, still entity-encoded.
    Text,
    /// The interior of a `<![CDATA[ ... ]]>` section.
    RawHtml,
}

impl LexemeKind {
    fn name(&self) -> &'static str {
        match self {
            LexemeKind::EndOfInput => "end of input",
            LexemeKind::Error(_) => "error",
            LexemeKind::NamespacePrefix => "namespace",
            LexemeKind::NamespaceEnd => "end namespace",
            LexemeKind::OpenTag => "open tag",
            LexemeKind::CloseTag => "close tag",
            LexemeKind::SelfClosingTag => "self-closing tag",
            LexemeKind::AttributeName => "attribute name",
            LexemeKind::AttributeValue => "attribute value",
            LexemeKind::Text => "text",
            LexemeKind::RawHtml => "raw html",
        }
    }
}

impl fmt::Display for LexemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed span of the input.
///
/// `value` borrows the exact source text the lexeme covers. Nothing is
/// decoded here; entity handling belongs to [`crate::text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub kind: LexemeKind,
    pub value: &'a str,
}

impl<'a> Lexeme<'a> {
    pub fn new(kind: LexemeKind, value: &'a str) -> Self {
        Self { kind, value }
    }

    /// True for `EndOfInput` and `Error`, after which the lexer produces nothing new.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, LexemeKind::EndOfInput | LexemeKind::Error(_))
    }

    /// True when this lexeme opens a tag with the given local name.
    pub fn opens(&self, name: &str) -> bool {
        self.kind == LexemeKind::OpenTag && self.value == name
    }
}

/// Values longer than this are elided in `Display` output.
const DISPLAY_VALUE_CHARS: usize = 10;

impl fmt::Display for Lexeme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match &self.kind {
            LexemeKind::Error(message) => message.as_str(),
            _ => self.value,
        };
        match value.char_indices().nth(DISPLAY_VALUE_CHARS) {
            Some((cut, _)) => write!(f, "{{{}, {:?}...}}", self.kind, &value[..cut]),
            None => write!(f, "{{{}, {:?}}}", self.kind, value),
        }
    }
}
