//! Everything the crawler learns from one fetched body.
//!
//! The parsed DOM never leaves [`PageAnalyzer::analyze`], so the crawl loop
//! only holds owned results across await points.

use crate::extract::{ContentLocator, assemble, extract_blocks};
use crate::links::{LinkDiscoverer, LinkHarvest};
use crate::normalize::NormalizedUrl;
use crate::scope::Scope;
use scraper::Html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAnalysis {
    /// Label of the locator strategy that matched, `None` when no container was found.
    pub container: Option<String>,
    /// Assembled page text; empty when no container was found.
    pub text: String,
    pub blocks: usize,
    pub links: LinkHarvest,
}

impl PageAnalysis {
    pub fn content_located(&self) -> bool {
        self.container.is_some()
    }
}

pub struct PageAnalyzer {
    locator: ContentLocator,
    links: LinkDiscoverer,
    min_block_chars: usize,
}

impl PageAnalyzer {
    pub fn new(locator: ContentLocator, links: LinkDiscoverer, min_block_chars: usize) -> Self {
        Self {
            locator,
            links,
            min_block_chars,
        }
    }

    /// Locate, extract and assemble the page text, then harvest its links.
    ///
    /// Without a content container there is no text and no link discovery.
    pub fn analyze(&self, html: &str, page: &NormalizedUrl, scope: &Scope) -> PageAnalysis {
        let doc = Html::parse_document(html);
        let Some((label, content)) = self.locator.locate(&doc) else {
            return PageAnalysis {
                container: None,
                text: String::new(),
                blocks: 0,
                links: LinkHarvest::default(),
            };
        };

        let blocks = extract_blocks(content, self.min_block_chars);
        let text = assemble(&blocks);
        let links = self.links.discover(&doc, content, page, scope);

        PageAnalysis {
            container: Some(label.to_string()),
            text,
            blocks: blocks.len(),
            links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(scan_nav: bool) -> PageAnalyzer {
        PageAnalyzer::new(
            ContentLocator::from_selectors(["div.p-article-content", "main", "article"]).unwrap(),
            LinkDiscoverer::new(scan_nav.then_some("nav")).unwrap(),
            2,
        )
    }

    fn page() -> (NormalizedUrl, Scope) {
        let url = NormalizedUrl::parse("https://example.test/rules").unwrap();
        let scope = Scope::for_seed(&url, vec![], None).unwrap();
        (url, scope)
    }

    #[test]
    fn extracts_text_and_links_from_article_container() {
        let (url, scope) = page();
        let html = r#"<html><body>
            <div class="p-article-content">
              <h1>Conditions</h1>
              <p>Blinded: a blinded creature can't see.</p>
              <h2>Charmed</h2>
              <p>A charmed creature can't attack the charmer. See <a href="/rules/charm">charm</a> rules.</p>
            </div></body></html>"#;
        let analysis = analyzer(false).analyze(html, &url, &scope);

        assert_eq!(analysis.container.as_deref(), Some("div.p-article-content"));
        assert_eq!(
            analysis.text,
            "Conditions\nBlinded: a blinded creature can't see.\n\nCharmed\nA charmed creature can't attack the charmer. See charm rules."
        );
        assert_eq!(analysis.blocks, 4);
        assert_eq!(analysis.links.accepted.len(), 1);
    }

    #[test]
    fn missing_container_yields_no_text_and_no_links() {
        let (url, scope) = page();
        let html = r#"<html><body><nav><a href="/other">Other</a></nav><div>Text</div></body></html>"#;
        let analysis = analyzer(true).analyze(html, &url, &scope);

        assert!(!analysis.content_located());
        assert!(analysis.text.is_empty());
        assert!(analysis.links.accepted.is_empty());
    }
}
