//! Canonical URL identity.
//!
//! A [`NormalizedUrl`] is always absolute and never carries a fragment, so two
//! links that differ only by `#anchor` or by relative-vs-absolute spelling
//! compare equal. Normalization never fails loudly: a URL that cannot be
//! parsed or resolved simply yields `None` and is dropped by the caller.

use std::fmt;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedUrl(Url);

impl NormalizedUrl {
    /// Normalize an absolute URL string.
    ///
    /// ```
    /// use tome_crawl::NormalizedUrl;
    ///
    /// let u = NormalizedUrl::parse("https://free-dnd.ttrpg.ru/rules-glossary#grapple").unwrap();
    /// assert_eq!(u.as_str(), "https://free-dnd.ttrpg.ru/rules-glossary");
    /// assert!(NormalizedUrl::parse("/relative/only").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        Url::parse(raw.trim()).ok().map(Self::from_url)
    }

    /// Resolve `href` against this URL and normalize the result.
    ///
    /// ```
    /// use tome_crawl::NormalizedUrl;
    ///
    /// let page = NormalizedUrl::parse("https://longstoryshort.app/srd/races/traits/").unwrap();
    /// let next = page.join("../classes/#top").unwrap();
    /// assert_eq!(next.as_str(), "https://longstoryshort.app/srd/races/classes/");
    /// ```
    pub fn join(&self, href: &str) -> Option<Self> {
        self.0.join(href.trim()).ok().map(Self::from_url)
    }

    fn from_url(mut url: Url) -> Self {
        url.set_fragment(None);
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    pub fn port(&self) -> Option<u16> {
        self.0.port_or_known_default()
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Normalize `raw`, resolving it against `base` when one is given.
pub fn normalize(raw: &str, base: Option<&NormalizedUrl>) -> Option<NormalizedUrl> {
    match base {
        Some(base) => base.join(raw),
        None => NormalizedUrl::parse(raw),
    }
}
