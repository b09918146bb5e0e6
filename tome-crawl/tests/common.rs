#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use tome_common::observability::{LogConfig, LogFormat};
use tome_config::CrawlConfig;
use tome_crawl::{CrawlSettings, NormalizedUrl, PageSource};
use tome_http::FetchError;

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "tome-tests",
            log_dir: Some(std::env::temp_dir().join("tome-tests")),
            emit_stderr: true,
            format: if std::env::var("TOME_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            default_filter: "debug".into(),
        };

        tome_common::observability::init_logging(config).unwrap_or_default()
    });
}

pub const HOST: &str = "https://example.test";

pub fn url(path: &str) -> String {
    format!("{HOST}{path}")
}

/// Wrap content in a page whose `<main>` is the article container.
pub fn page(main: &str) -> String {
    format!(
        "<!doctype html><html><head><title>t</title></head><body>\
         <nav><a href=\"/nav-only\">Menu</a></nav><main>{main}</main></body></html>"
    )
}

/// Page whose `<main>` holds a paragraph and bare anchors to `links`.
pub fn linking_page(text: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!("<a href=\"{l}\">{l}</a>"))
        .collect();
    page(&format!("<p>{text}</p>{anchors}"))
}

enum Canned {
    Html(String),
    Timeout,
    Status(u16),
}

/// In-memory site that records every fetch.
#[derive(Clone, Default)]
pub struct CannedSite {
    pages: Arc<HashMap<String, Canned>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl CannedSite {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, path: &str, canned: Canned) -> Self {
        Arc::get_mut(&mut self.pages)
            .expect("configure before cloning")
            .insert(url(path), canned);
        self
    }

    pub fn html(self, path: &str, body: impl Into<String>) -> Self {
        self.with(path, Canned::Html(body.into()))
    }

    pub fn timeout(self, path: &str) -> Self {
        self.with(path, Canned::Timeout)
    }

    pub fn status(self, path: &str, code: u16) -> Self {
        self.with(path, Canned::Status(code))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PageSource for CannedSite {
    async fn fetch(&self, url: &NormalizedUrl) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.pages.get(url.as_str()) {
            Some(Canned::Html(body)) => Ok(body.clone()),
            Some(Canned::Timeout) => Err(FetchError::Timeout(Duration::from_secs(10))),
            Some(Canned::Status(code)) => Err(FetchError::Status {
                code: *code,
                body_snippet: String::new(),
            }),
            None => Err(FetchError::Status {
                code: 404,
                body_snippet: String::new(),
            }),
        }
    }
}

pub fn config(seeds: &[&str]) -> CrawlConfig {
    CrawlConfig {
        seeds: seeds.iter().map(|p| url(p)).collect(),
        delay_ms: 0,
        content_selectors: vec!["main".into()],
        ..Default::default()
    }
}

pub fn settings(cfg: &CrawlConfig) -> CrawlSettings {
    CrawlSettings::from_config(cfg).expect("valid crawl config")
}
