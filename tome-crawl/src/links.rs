//! Outbound link discovery.

use crate::extract::parse_selector;
use crate::normalize::NormalizedUrl;
use crate::scope::Scope;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tome_common::Result;

/// In-scope links found on one page, in document order and without repeats.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkHarvest {
    pub accepted: Vec<NormalizedUrl>,
    /// Hrefs that could not be resolved into a URL.
    pub malformed: usize,
    pub out_of_scope: usize,
}

pub struct LinkDiscoverer {
    anchors: Selector,
    navigation: Option<Selector>,
}

impl LinkDiscoverer {
    /// `navigation` enables scanning of that region in addition to the content subtree.
    pub fn new(navigation: Option<&str>) -> Result<Self> {
        Ok(Self {
            anchors: parse_selector("a[href]")?,
            navigation: navigation.map(parse_selector).transpose()?,
        })
    }

    pub fn scans_navigation(&self) -> bool {
        self.navigation.is_some()
    }

    /// Resolve every anchor under `content` (then under each navigation
    /// region, when enabled) against `page` and keep those `scope` allows.
    pub fn discover<'a>(
        &self,
        doc: &'a Html,
        content: ElementRef<'a>,
        page: &NormalizedUrl,
        scope: &Scope,
    ) -> LinkHarvest {
        let mut harvest = LinkHarvest::default();
        let mut seen = HashSet::new();

        let nav_regions = self
            .navigation
            .iter()
            .flat_map(|sel| doc.select(sel));
        for region in std::iter::once(content).chain(nav_regions) {
            for anchor in region.select(&self.anchors) {
                let Some(href) = anchor.value().attr("href") else {
                    continue;
                };
                let Some(url) = page.join(href) else {
                    harvest.malformed += 1;
                    continue;
                };
                if let Err(reason) = scope.check(&url) {
                    tracing::trace!(url=%url, %reason, "crawl.link.out_of_scope");
                    harvest.out_of_scope += 1;
                    continue;
                }
                if seen.insert(url.clone()) {
                    harvest.accepted.push(url);
                }
            }
        }
        harvest
    }
}
