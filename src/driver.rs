//! Concurrent batch parsing of feed documents on disk.
//!
//! Each document is read, size-checked, and parsed on the blocking pool under
//! its own deadline. A failure (unreadable file, oversize document, fatal
//! parse error, timeout) is confined to that document; the rest of the batch
//! carries on.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde_json::json;
use thiserror::Error;

use crate::config::Config;
use crate::parser::{parse_bytes, ParseError, ParsedFeed};
use crate::util::{one_line, truncate_to_width};

/// Errors that confine themselves to a single document.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The document could not be read from disk
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document exceeds the configured size limit
    #[error("Document too large: {size} bytes (max {limit})")]
    TooLarge { size: u64, limit: u64 },
    /// Parsing did not finish before the deadline
    #[error("Parse timed out after {0:?}")]
    Timeout(Duration),
    /// The tokenizer rejected the document
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The blocking parse task panicked or was cancelled
    #[error("Parse task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Limits applied to every document in a batch.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    pub concurrency: usize,
    pub parse_timeout: Duration,
    pub max_document_size: u64,
}

impl From<&Config> for DriverOptions {
    fn from(config: &Config) -> Self {
        Self {
            concurrency: config.concurrency.max(1),
            parse_timeout: Duration::from_secs(config.parse_timeout_secs),
            max_document_size: config.max_document_size,
        }
    }
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Outcome for one input path.
pub struct DocumentResult {
    pub path: PathBuf,
    pub result: Result<ParsedFeed, DriverError>,
}

// ============================================================================
// Batch
// ============================================================================

/// Parses every path with at most `options.concurrency` documents in flight.
///
/// Results come back in input order regardless of completion order.
pub async fn parse_all(paths: Vec<PathBuf>, options: &DriverOptions) -> Vec<DocumentResult> {
    let mut results: Vec<(usize, DocumentResult)> = stream::iter(paths.into_iter().enumerate())
        .map(|(index, path)| async move {
            let result = parse_file(&path, options).await;
            match &result {
                Ok(parsed) => tracing::debug!(
                    path = %path.display(),
                    entries = parsed.entries.len(),
                    "Document parsed"
                ),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Document failed"),
            }
            (index, DocumentResult { path, result })
        })
        .buffer_unordered(options.concurrency.max(1))
        .collect()
        .await;

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}

/// Reads and parses one document.
pub async fn parse_file(path: &Path, options: &DriverOptions) -> Result<ParsedFeed, DriverError> {
    let io_error = |source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    };

    let meta = tokio::fs::metadata(path).await.map_err(io_error)?;
    if meta.len() > options.max_document_size {
        return Err(DriverError::TooLarge {
            size: meta.len(),
            limit: options.max_document_size,
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(io_error)?;
    // The file may have grown since the metadata check.
    let size = bytes.len() as u64;
    if size > options.max_document_size {
        return Err(DriverError::TooLarge {
            size,
            limit: options.max_document_size,
        });
    }

    let name = path.display().to_string();
    run_with_deadline(options.parse_timeout, move || parse_bytes(&name, &bytes)).await
}

/// Runs a parse on the blocking pool and gives up after `deadline`.
///
/// A timed-out parse keeps its blocking thread until it finishes on its own;
/// its result is dropped.
async fn run_with_deadline<F>(deadline: Duration, parse: F) -> Result<ParsedFeed, DriverError>
where
    F: FnOnce() -> Result<ParsedFeed, ParseError> + Send + 'static,
{
    let task = tokio::task::spawn_blocking(parse);
    let parsed = tokio::time::timeout(deadline, task)
        .await
        .map_err(|_| DriverError::Timeout(deadline))???;
    Ok(parsed)
}

// ============================================================================
// Reporting
// ============================================================================

impl DocumentResult {
    /// One JSON object describing this document.
    pub fn to_json(&self) -> serde_json::Value {
        let path = self.path.display().to_string();
        match &self.result {
            Ok(parsed) => json!({
                "path": path,
                "feed": parsed.feed,
                "entries": parsed.entries,
            }),
            Err(e) => json!({
                "path": path,
                "error": e.to_string(),
            }),
        }
    }

    /// Human-readable summary block, entry titles cut to `title_width`
    /// columns.
    pub fn write_summary<W: Write>(&self, out: &mut W, title_width: usize) -> std::io::Result<()> {
        writeln!(out, "== {}", self.path.display())?;
        let parsed = match &self.result {
            Ok(parsed) => parsed,
            Err(e) => return writeln!(out, "   error: {}", one_line(&e.to_string())),
        };

        let title = parsed
            .feed
            .title
            .as_deref()
            .map(one_line)
            .unwrap_or_else(|| "(untitled feed)".to_string());
        writeln!(
            out,
            "   {} ({} {})",
            truncate_to_width(&title, title_width),
            parsed.entries.len(),
            if parsed.entries.len() == 1 { "entry" } else { "entries" }
        )?;

        for entry in &parsed.entries {
            let title = entry
                .title
                .as_deref()
                .map(one_line)
                .unwrap_or_else(|| "(untitled)".to_string());
            match entry.updated {
                Some(updated) => writeln!(
                    out,
                    "   - {}  [{}]",
                    truncate_to_width(&title, title_width),
                    updated.format("%Y-%m-%d %H:%M")
                )?,
                None => writeln!(out, "   - {}", truncate_to_width(&title, title_width))?,
            }
            if !entry.enclosure.is_empty() {
                let media = entry
                    .enclosure
                    .url
                    .as_deref()
                    .or(entry.enclosure.mime_type.as_deref())
                    .map(one_line)
                    .unwrap_or_else(|| "(no url)".to_string());
                writeln!(out, "     enclosure: {}", truncate_to_width(&media, title_width))?;
            }
        }
        Ok(())
    }
}
