//! Turns content lexemes into field values.
//!
//! Plain text arrives entity-encoded (`&amp;`, `&#8217;`, `&eacute;`) and is
//! decoded here. CDATA sections are kept byte for byte; feeds use them to
//! ship HTML, and any entities inside are the HTML's own business.

use crate::lexer::{Lexeme, LexemeKind};

/// Returns the content carried by a `Text` or `RawHtml` lexeme.
///
/// Other kinds carry no content and yield `None`. Malformed or unknown
/// entities are left as written.
pub fn normalize(lexeme: &Lexeme<'_>) -> Option<String> {
    match lexeme.kind {
        LexemeKind::Text => Some(html_escape::decode_html_entities(lexeme.value).into_owned()),
        LexemeKind::RawHtml => Some(lexeme.value.to_string()),
        _ => None,
    }
}
