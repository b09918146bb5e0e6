use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use tokio_util::sync::CancellationToken;
use tome_common::observability::{LogConfig, LogFormat, init_logging};
use tome_config::{TomeConfig, TomeConfigLoader};
use tome_crawl::{CorpusWriter, CrawlSettings, Crawler, HttpPageSource};
mod cli;

const DEFAULT_CONFIG_FILE: &str = "tome.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins over file, flags win over both)
    let loader = match &cli.config {
        Some(path) => TomeConfigLoader::new().with_file(path),
        None => TomeConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let mut cfg: TomeConfig = loader.load().context("loading configuration")?;
    cli.apply_overrides(&mut cfg);

    // 2) Logging
    let log_path = init_logging(log_config(&cfg)?)?;
    tracing::info!(log_file=%log_path.display(), version=?cfg.version, "tome.start");

    // 3) Crawl
    let settings = CrawlSettings::from_config(&cfg.crawl).context("invalid crawl settings")?;
    let source = HttpPageSource::new(&settings.user_agent, settings.timeout)?;
    let writer = CorpusWriter::new(settings.output.clone());
    let mut crawler = Crawler::new(settings, source);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("tome.interrupted");
                cancel.cancel();
            }
        }
    });

    let report = crawler.run(&cancel).await;

    // 4) Corpus
    let summary = writer
        .write(&report.pages)
        .await
        .with_context(|| format!("writing corpus to {}", writer.path().display()))?;
    match summary {
        Some(summary) => tracing::info!(
            path=%summary.path.display(),
            pages=summary.pages,
            bytes=summary.bytes,
            visited=report.visited,
            failures=report.fetch_failures,
            stop=?report.stop,
            "tome.finished"
        ),
        None => tracing::warn!(
            visited=report.visited,
            failures=report.fetch_failures,
            stop=?report.stop,
            "tome.finished.empty"
        ),
    }

    Ok(())
}

fn log_config(cfg: &TomeConfig) -> Result<LogConfig> {
    let format: LogFormat = cfg
        .logging
        .format
        .parse()
        .map_err(anyhow::Error::msg)
        .context("logging.format")?;
    Ok(LogConfig {
        log_dir: cfg.logging.dir.clone(),
        emit_stderr: cfg.logging.stderr,
        format,
        default_filter: cfg.logging.filter.clone(),
        ..LogConfig::default()
    })
}
