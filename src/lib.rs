//! Tolerant RSS/Atom parsing for feeds as they exist in the wild.
//!
//! The [`lexer`] turns a document into a stream of classified spans without
//! requiring well-formed XML, and the [`parser`] dispatches those spans into a
//! [`Feed`] and its [`Entry`] records. Publication dates go through the
//! layout table in [`date`]; plain text is entity-decoded by [`text`] while
//! CDATA passes through untouched. The [`driver`] parses many files at once.
//!
//! ```
//! let doc = r#"<rss><channel><title>Example</title>
//! <item><title>Hello</title><pubDate>Mon, 19 Aug 2013 10:33:12 GMT</pubDate></item>
//! </channel></rss>"#;
//! let parsed = feedscan::parse_document("example.xml", doc).unwrap();
//! assert_eq!(parsed.feed.title.as_deref(), Some("Example"));
//! assert_eq!(parsed.entries.len(), 1);
//! assert!(parsed.entries[0].updated.is_some());
//! ```

pub mod config;
pub mod date;
pub mod driver;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod text;
pub mod util;

pub use config::{Config, ConfigError};
pub use model::{Enclosure, Entry, Feed};
pub use parser::{parse_bytes, parse_document, FeedParser, ParseError, ParsedFeed};
