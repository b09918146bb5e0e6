//! Serializing collected pages into the corpus file.

use crate::driver::PageResult;
use std::path::{Path, PathBuf};
use tome_common::Result;

/// What ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub bytes: u64,
}

/// Join page texts with a blank line, in crawl order. Pages without text are skipped.
///
/// ```
/// use tome_crawl::{NormalizedUrl, PageResult, corpus::render};
///
/// let url = NormalizedUrl::parse("https://example.test/").unwrap();
/// let pages = vec![
///     PageResult { source_url: url.clone(), text: "First".into() },
///     PageResult { source_url: url.clone(), text: String::new() },
///     PageResult { source_url: url, text: "Second".into() },
/// ];
/// assert_eq!(render(&pages), "First\n\nSecond");
/// ```
pub fn render(pages: &[PageResult]) -> String {
    pages
        .iter()
        .map(|p| p.text.as_str())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub struct CorpusWriter {
    path: PathBuf,
}

impl CorpusWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the corpus, creating the parent directory if needed.
    ///
    /// Returns `Ok(None)` without touching the filesystem when no page
    /// produced any text.
    pub async fn write(&self, pages: &[PageResult]) -> Result<Option<CorpusSummary>> {
        let body = render(pages);
        if body.is_empty() {
            tracing::warn!(path=%self.path.display(), "corpus.empty");
            return Ok(None);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, body.as_bytes()).await?;

        let summary = CorpusSummary {
            path: self.path.clone(),
            pages: pages.iter().filter(|p| !p.text.is_empty()).count(),
            bytes: body.len() as u64,
        };
        tracing::info!(
            path=%summary.path.display(),
            pages=summary.pages,
            kib=%format!("{:.2}", summary.bytes as f64 / 1024.0),
            "corpus.written"
        );
        Ok(Some(summary))
    }
}
