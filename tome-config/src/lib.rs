//! Loader for crawl job configuration with YAML + environment overlays.
//!
//! Sources are merged in order: YAML files or inline snippets first, then
//! `TOME__`-prefixed environment variables (`__` separates nesting levels, so
//! `TOME__CRAWL__DELAY_MS=250` overrides `crawl.delay_ms`). String values may
//! reference other variables as `${VAR}`; those are expanded after merging.
//! Every field has a default, so an empty document is a valid (if seedless)
//! configuration.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct TomeConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Raw crawl job settings, validated later by the crawler.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Entry points; the first one fixes the target host.
    #[serde(default)]
    pub seeds: Vec<String>,
    /// Path prefixes that are never fetched, checked in order.
    #[serde(default)]
    pub exclude_prefixes: Vec<String>,
    /// When set, only paths under this prefix are fetched.
    #[serde(default)]
    pub require_prefix: Option<String>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_min_block_chars")]
    pub min_block_chars: usize,
    /// Candidate content containers, most specific first.
    #[serde(default = "default_content_selectors")]
    pub content_selectors: Vec<String>,
    #[serde(default)]
    pub scan_navigation: bool,
    #[serde(default = "default_navigation_selector")]
    pub navigation_selector: String,
    #[serde(default)]
    pub max_pages: Option<usize>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            exclude_prefixes: Vec::new(),
            require_prefix: None,
            output: default_output(),
            timeout_secs: default_timeout_secs(),
            delay_ms: default_delay_ms(),
            min_block_chars: default_min_block_chars(),
            content_selectors: default_content_selectors(),
            scan_navigation: false,
            navigation_selector: default_navigation_selector(),
            max_pages: None,
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub stderr: bool,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            format: default_log_format(),
            stderr: true,
            filter: default_log_filter(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("corpus/corpus.txt")
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_delay_ms() -> u64 {
    500
}
fn default_min_block_chars() -> usize {
    2
}
fn default_content_selectors() -> Vec<String> {
    ["div.p-article-content", "section.compendium-main", "main", "article"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_navigation_selector() -> String {
    "nav".into()
}
fn default_user_agent() -> String {
    concat!("tome/", env!("CARGO_PKG_VERSION")).into()
}
fn default_log_format() -> String {
    "text".into()
}
fn default_log_filter() -> String {
    "info".into()
}
fn default_true() -> bool {
    true
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct TomeConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: String,
}

impl Default for TomeConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TomeConfigLoader {
    /// Start with no sources; environment overrides are layered on in [`load`](Self::load).
    ///
    /// ```
    /// use tome_config::TomeConfigLoader;
    ///
    /// let config = TomeConfigLoader::new()
    ///     .with_yaml_str("version: '1'\ncrawl:\n  seeds: []")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(config.crawl.seeds.is_empty());
    /// assert_eq!(config.crawl.delay_ms, 500);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            env_prefix: "TOME".into(),
        }
    }

    /// Use a different environment prefix (tests use this to stay isolated).
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent, so env-only setups still load.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use tome_config::TomeConfigLoader;
    ///
    /// let cfg = TomeConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// crawl:
    ///   seeds: ["https://free-dnd.ttrpg.ru/"]
    ///   exclude_prefixes: ["/monsters", "/spells"]
    ///   scan_navigation: true
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.crawl.seeds.len(), 1);
    /// assert_eq!(cfg.crawl.exclude_prefixes, vec!["/monsters", "/spells"]);
    /// assert!(cfg.crawl.scan_navigation);
    /// assert_eq!(cfg.crawl.navigation_selector, "nav");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use tome_config::TomeConfigLoader;
    ///
    /// unsafe { std::env::set_var("TOME_DOC_SITE", "https://longstoryshort.app"); }
    ///
    /// let config = TomeConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// crawl:
    ///   seeds: ["${TOME_DOC_SITE}/srd/races/traits/"]
    ///   require_prefix: "/srd/"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.crawl.seeds[0], "https://longstoryshort.app/srd/races/traits/");
    /// assert_eq!(config.crawl.require_prefix.as_deref(), Some("/srd/"));
    ///
    /// unsafe { std::env::remove_var("TOME_DOC_SITE"); }
    /// ```
    pub fn load(self) -> Result<TomeConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: TomeConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("TOME_T_FOO", Some("bar"), || {
            let mut v = json!("prefix-${TOME_T_FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars(
            [("TOME_T_HOST", Some("example.test")), ("TOME_T_SECTION", Some("srd"))],
            || {
                let mut v = json!([
                    "https://$TOME_T_HOST/",
                    { "prefix": "/${TOME_T_SECTION}/" },
                    15,
                    true,
                    null
                ]);
                expand_env_in_value(&mut v);
                assert_eq!(
                    v,
                    json!(["https://example.test/", { "prefix": "/srd/" }, 15, true, null])
                );
            },
        );
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars(
            [("TOME_T_A", Some("${TOME_T_B}")), ("TOME_T_B", Some("${TOME_T_A}"))],
            || {
                let mut v = json!("x=${TOME_T_A}-y");
                expand_env_in_value(&mut v);
                let s = v.as_str().unwrap();
                assert!(s.starts_with("x=") && s.ends_with("-y"));
                assert!(s.contains("${"));
            },
        );
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${TOME_T_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${TOME_T_DOES_NOT_EXIST}"));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = TomeConfigLoader::new()
            .with_env_prefix("TOME_T_EMPTY")
            .with_yaml_str("{}")
            .load()
            .unwrap();
        assert!(cfg.crawl.seeds.is_empty());
        assert_eq!(cfg.crawl.timeout_secs, 15);
        assert_eq!(cfg.crawl.min_block_chars, 2);
        assert_eq!(cfg.crawl.content_selectors[0], "div.p-article-content");
        assert!(cfg.crawl.max_pages.is_none());
        assert_eq!(cfg.logging.format, "text");
        assert!(cfg.logging.stderr);
    }
}
