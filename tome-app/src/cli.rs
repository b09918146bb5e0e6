use clap::Parser;
use std::path::PathBuf;
use tome_config::TomeConfig;

/// Command-line flags. Anything given here wins over the YAML file and
/// `TOME__*` environment values.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tome", about = "Crawl a rule-book website into a plain-text corpus")]
pub struct Cli {
    /// YAML config file (defaults to ./tome.yaml when present)
    #[arg(long, short = 'c', env = "TOME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seed URL; repeat for several. Replaces the configured seed list.
    #[arg(long = "seed")]
    pub seeds: Vec<String>,

    /// Excluded path prefix; repeat for several. Replaces the configured list.
    #[arg(long = "exclude")]
    pub excludes: Vec<String>,

    /// Only fetch paths under this prefix
    #[arg(long)]
    pub require_prefix: Option<String>,

    /// Corpus output file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Pause after every fetch attempt, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Minimum characters for a block element to be kept
    #[arg(long)]
    pub min_block_chars: Option<usize>,

    /// Also follow links found in the navigation region
    #[arg(long)]
    pub scan_navigation: bool,

    /// Stop after this many fetch attempts
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Log encoding: text or json
    #[arg(long)]
    pub log_format: Option<String>,

    /// Directory for the rolling log file
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    pub fn apply_overrides(&self, cfg: &mut TomeConfig) {
        let crawl = &mut cfg.crawl;
        if !self.seeds.is_empty() {
            crawl.seeds = self.seeds.clone();
        }
        if !self.excludes.is_empty() {
            crawl.exclude_prefixes = self.excludes.clone();
        }
        if let Some(prefix) = &self.require_prefix {
            crawl.require_prefix = Some(prefix.clone());
        }
        if let Some(output) = &self.output {
            crawl.output = output.clone();
        }
        if let Some(secs) = self.timeout_secs {
            crawl.timeout_secs = secs;
        }
        if let Some(ms) = self.delay_ms {
            crawl.delay_ms = ms;
        }
        if let Some(min) = self.min_block_chars {
            crawl.min_block_chars = min;
        }
        if self.scan_navigation {
            crawl.scan_navigation = true;
        }
        if let Some(max) = self.max_pages {
            crawl.max_pages = Some(max);
        }

        if let Some(format) = &self.log_format {
            cfg.logging.format = format.clone();
        }
        if let Some(dir) = &self.log_dir {
            cfg.logging.dir = Some(dir.clone());
        }
    }
}
