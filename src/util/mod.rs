//! Helpers for printing untrusted feed text to a terminal.
//!
//! ```
//! use feedscan::util::{display_width, one_line, truncate_to_width};
//!
//! let title = one_line("  Long\narticle   title ");
//! assert_eq!(title, "Long article title");
//! assert_eq!(display_width("Hello 世界"), 10);
//! assert_eq!(truncate_to_width(&title, 10), "Long ar...");
//! ```

mod display;

pub use display::{display_width, one_line, strip_control_chars, truncate_to_width};
