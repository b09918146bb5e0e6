//! Which URLs a crawl job is allowed to fetch.

use crate::normalize::NormalizedUrl;
use thiserror::Error;
use tome_common::{Result, TomeError};

/// Why a URL was kept out of the crawl. Not a failure: rejected URLs are
/// recorded as visited and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeRejection {
    #[error("scheme `{0}` is not crawlable")]
    Scheme(String),
    #[error("host `{0}` is outside the crawl")]
    ForeignHost(String),
    #[error("path matches excluded prefix `{0}`")]
    Excluded(String),
    #[error("path is outside required prefix `{0}`")]
    OutsideRequired(String),
}

/// Single-host scope with ordered excluded prefixes and an optional required prefix.
#[derive(Debug, Clone)]
pub struct Scope {
    host: String,
    port: Option<u16>,
    excluded: Vec<String>,
    required: Option<String>,
}

impl Scope {
    /// Build a scope anchored on the host (and effective port) of `seed`.
    ///
    /// ```
    /// use tome_crawl::NormalizedUrl;
    /// use tome_crawl::scope::Scope;
    ///
    /// let seed = NormalizedUrl::parse("https://free-dnd.ttrpg.ru/").unwrap();
    /// let scope = Scope::for_seed(&seed, vec!["/spells".into()], None).unwrap();
    ///
    /// let glossary = seed.join("/rules-glossary").unwrap();
    /// let fireball = seed.join("/spells/fireball").unwrap();
    /// assert!(scope.allows(&glossary));
    /// assert!(!scope.allows(&fireball));
    /// ```
    pub fn for_seed(
        seed: &NormalizedUrl,
        excluded: Vec<String>,
        required: Option<String>,
    ) -> Result<Self> {
        let host = seed
            .host()
            .ok_or_else(|| TomeError::Seed(format!("seed `{seed}` has no host")))?
            .to_string();
        let excluded = excluded
            .iter()
            .filter_map(|p| encode_prefix(seed, p))
            .collect();
        let required = required.as_deref().and_then(|p| encode_prefix(seed, p));
        Ok(Self {
            host,
            port: seed.port(),
            excluded,
            required,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn excluded_prefixes(&self) -> &[String] {
        &self.excluded
    }

    pub fn required_prefix(&self) -> Option<&str> {
        self.required.as_deref()
    }

    /// Check `url` against host, excluded prefixes (first match wins) and the
    /// required prefix, in that order.
    pub fn check(&self, url: &NormalizedUrl) -> std::result::Result<(), ScopeRejection> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ScopeRejection::Scheme(url.scheme().to_string()));
        }
        if url.host() != Some(self.host.as_str()) || url.port() != self.port {
            return Err(ScopeRejection::ForeignHost(
                url.host().unwrap_or("-").to_string(),
            ));
        }

        let path = url.path();
        if let Some(prefix) = self.excluded.iter().find(|p| path.starts_with(p.as_str())) {
            return Err(ScopeRejection::Excluded(prefix.clone()));
        }
        if let Some(required) = &self.required {
            if !path.starts_with(required.as_str()) {
                return Err(ScopeRejection::OutsideRequired(required.clone()));
            }
        }
        Ok(())
    }

    pub fn allows(&self, url: &NormalizedUrl) -> bool {
        self.check(url).is_ok()
    }
}

/// Percent-encode a configured path prefix the way [`NormalizedUrl::path`]
/// is encoded, so `/заклинания` matches the path the `url` crate produces.
/// Blank prefixes yield `None`.
fn encode_prefix(seed: &NormalizedUrl, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !trimmed.starts_with('/') {
        return Some(trimmed.to_string());
    }
    Some(
        seed.join(trimmed)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|| trimmed.to_string()),
    )
}
