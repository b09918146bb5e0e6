//! Validated crawl job parameters.

use crate::extract::ContentLocator;
use crate::links::LinkDiscoverer;
use crate::normalize::NormalizedUrl;
use crate::page::PageAnalyzer;
use crate::scope::Scope;
use std::path::PathBuf;
use std::time::Duration;
use tome_common::{Result, TomeError};
use tome_config::CrawlConfig;

/// A crawl job ready to run: seeds parsed, scope fixed, selectors compiled.
pub struct CrawlSettings {
    pub seeds: Vec<NormalizedUrl>,
    pub scope: Scope,
    pub analyzer: PageAnalyzer,
    pub output: PathBuf,
    pub timeout: Duration,
    pub delay: Duration,
    pub max_pages: Option<usize>,
    pub user_agent: String,
}

impl CrawlSettings {
    /// Validate raw configuration.
    ///
    /// Seeds that fail to parse are logged and skipped; the first usable seed
    /// fixes the target host. Bad selectors and an empty seed list are errors.
    ///
    /// ```
    /// use tome_config::CrawlConfig;
    /// use tome_crawl::CrawlSettings;
    ///
    /// let cfg = CrawlConfig {
    ///     seeds: vec!["https://free-dnd.ttrpg.ru/".into(), "https://free-dnd.ttrpg.ru/dms-basics".into()],
    ///     exclude_prefixes: vec!["/spells".into()],
    ///     ..Default::default()
    /// };
    /// let settings = CrawlSettings::from_config(&cfg).unwrap();
    /// assert_eq!(settings.scope.host(), "free-dnd.ttrpg.ru");
    /// assert_eq!(settings.seeds.len(), 2);
    /// ```
    pub fn from_config(cfg: &CrawlConfig) -> Result<Self> {
        let seeds: Vec<NormalizedUrl> = cfg
            .seeds
            .iter()
            .filter_map(|raw| {
                let parsed = NormalizedUrl::parse(raw);
                if parsed.is_none() {
                    tracing::warn!(seed=%raw, "crawl.seed.malformed");
                }
                parsed
            })
            .collect();
        let first = seeds
            .first()
            .ok_or_else(|| TomeError::Seed("no usable seed URL configured".into()))?;

        let scope = Scope::for_seed(
            first,
            cfg.exclude_prefixes.clone(),
            cfg.require_prefix.clone(),
        )?;

        let locator = ContentLocator::from_selectors(&cfg.content_selectors)?;
        let navigation = cfg
            .scan_navigation
            .then_some(cfg.navigation_selector.as_str());
        let links = LinkDiscoverer::new(navigation)?;

        if cfg.timeout_secs == 0 {
            return Err(TomeError::Config("timeout_secs must be positive".into()));
        }

        Ok(Self {
            seeds,
            scope,
            analyzer: PageAnalyzer::new(locator, links, cfg.min_block_chars),
            output: cfg.output.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            delay: Duration::from_millis(cfg.delay_ms),
            max_pages: cfg.max_pages,
            user_agent: cfg.user_agent.clone(),
        })
    }
}
