//! The crawl loop.
//!
//! One URL at a time: dequeue, scope check, mark visited, fetch, analyze,
//! offer discovered links, then wait out the politeness delay. The delay
//! follows every fetch attempt, successful or not. Page-level failures are
//! logged and skipped; the loop ends when the frontier is empty, the page cap
//! is reached, or the cancellation token fires.

use crate::fetch::PageSource;
use crate::frontier::Frontier;
use crate::normalize::NormalizedUrl;
use crate::settings::CrawlSettings;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    Running,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The frontier ran dry.
    Exhausted,
    /// `max_pages` fetch attempts were made.
    PageLimit,
    Cancelled,
}

/// Text collected from one successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub source_url: NormalizedUrl,
    /// Empty when no content container was found.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages in the order they were processed.
    pub pages: Vec<PageResult>,
    pub visited: usize,
    pub fetch_attempts: usize,
    pub fetch_failures: usize,
    pub scope_rejections: usize,
    pub pages_without_content: usize,
    pub stop: StopReason,
}

pub struct Crawler<S> {
    settings: CrawlSettings,
    source: S,
    state: CrawlState,
}

impl<S: PageSource> Crawler<S> {
    pub fn new(settings: CrawlSettings, source: S) -> Self {
        Self {
            settings,
            source,
            state: CrawlState::Idle,
        }
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Run the crawl to completion. Each call starts from a fresh frontier.
    pub async fn run(&mut self, cancel: &CancellationToken) -> CrawlReport {
        self.state = CrawlState::Running;
        let started = Instant::now();
        let scope = &self.settings.scope;

        let mut frontier = Frontier::new();
        let seeded = frontier.seed(self.settings.seeds.iter().cloned());
        tracing::info!(
            host=%scope.host(),
            seeds=seeded,
            excluded=?scope.excluded_prefixes(),
            required=?scope.required_prefix(),
            "crawl.start"
        );

        let mut pages = Vec::new();
        let mut fetch_attempts = 0usize;
        let mut fetch_failures = 0usize;
        let mut scope_rejections = 0usize;
        let mut pages_without_content = 0usize;

        let stop = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if self
                .settings
                .max_pages
                .is_some_and(|max| fetch_attempts >= max)
            {
                break StopReason::PageLimit;
            }
            let Some(url) = frontier.next() else {
                break StopReason::Exhausted;
            };

            if let Err(reason) = scope.check(&url) {
                tracing::info!(url=%url, %reason, "crawl.scope.rejected");
                frontier.mark_visited(url);
                scope_rejections += 1;
                continue;
            }
            if !frontier.mark_visited(url.clone()) {
                continue;
            }

            tracing::info!(url=%url, pending=frontier.pending_len(), "crawl.page.fetching");
            fetch_attempts += 1;
            match self.source.fetch(&url).await {
                Err(err) => {
                    fetch_failures += 1;
                    tracing::warn!(
                        url=%url,
                        kind=err.kind(),
                        status=?err.status_code(),
                        error=%err,
                        "crawl.page.fetch_failed"
                    );
                }
                Ok(body) => {
                    let analysis = self.settings.analyzer.analyze(&body, &url, scope);
                    match &analysis.container {
                        Some(container) => tracing::info!(
                            url=%url,
                            container=%container,
                            blocks=analysis.blocks,
                            chars=analysis.text.chars().count(),
                            "crawl.page.extracted"
                        ),
                        None => {
                            pages_without_content += 1;
                            tracing::warn!(url=%url, "crawl.page.no_content");
                        }
                    }

                    let found = analysis.links.accepted.len();
                    let queued = analysis
                        .links
                        .accepted
                        .into_iter()
                        .filter(|link| frontier.offer(link.clone()))
                        .count();
                    tracing::debug!(
                        url=%url,
                        found,
                        queued,
                        malformed=analysis.links.malformed,
                        out_of_scope=analysis.links.out_of_scope,
                        "crawl.links.discovered"
                    );

                    pages.push(PageResult {
                        source_url: url,
                        text: analysis.text,
                    });
                }
            }

            self.pause(cancel).await;
        };

        self.state = CrawlState::Done;
        let report = CrawlReport {
            pages,
            visited: frontier.visited_len(),
            fetch_attempts,
            fetch_failures,
            scope_rejections,
            pages_without_content,
            stop,
        };
        tracing::info!(
            stop=?report.stop,
            visited=report.visited,
            pages=report.pages.len(),
            failures=report.fetch_failures,
            elapsed_ms=started.elapsed().as_millis() as u64,
            "crawl.done"
        );
        report
    }

    async fn pause(&self, cancel: &CancellationToken) {
        let delay = self.settings.delay;
        if delay.is_zero() {
            return;
        }
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = cancel.cancelled() => {}
        }
    }
}
