use scraper::{ElementRef, Html, Selector};
use tome_common::{Result, TomeError};

/// One way of finding the content container in a document.
pub trait LocateStrategy: Send + Sync {
    fn locate<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>>;

    /// Label used in logs when this strategy wins.
    fn label(&self) -> &str;
}

/// First element matching a CSS selector.
pub struct CssStrategy {
    css: String,
    selector: Selector,
}

impl CssStrategy {
    pub fn new(css: &str) -> Result<Self> {
        Ok(Self {
            css: css.trim().to_string(),
            selector: parse_selector(css)?,
        })
    }
}

impl LocateStrategy for CssStrategy {
    fn locate<'a>(&self, doc: &'a Html) -> Option<ElementRef<'a>> {
        doc.select(&self.selector).next()
    }

    fn label(&self) -> &str {
        &self.css
    }
}

/// Parse a CSS selector, mapping failures into [`TomeError::Selector`].
pub fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css.trim()).map_err(|e| TomeError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Ordered fallback over content-container strategies; the first hit wins.
pub struct ContentLocator {
    strategies: Vec<Box<dyn LocateStrategy>>,
}

impl ContentLocator {
    /// Build a locator from CSS selectors in priority order.
    ///
    /// ```
    /// use scraper::Html;
    /// use tome_crawl::extract::ContentLocator;
    ///
    /// let locator = ContentLocator::from_selectors(["div.p-article-content", "main"]).unwrap();
    /// let doc = Html::parse_document("<body><main><p>Rules</p></main></body>");
    /// let (label, found) = locator.locate(&doc).unwrap();
    /// assert_eq!(label, "main");
    /// assert_eq!(found.value().name(), "main");
    /// ```
    pub fn from_selectors<I, S>(selectors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let strategies = selectors
            .into_iter()
            .map(|css| CssStrategy::new(css.as_ref()).map(|s| Box::new(s) as Box<dyn LocateStrategy>))
            .collect::<Result<Vec<_>>>()?;
        if strategies.is_empty() {
            return Err(TomeError::Config(
                "at least one content selector is required".into(),
            ));
        }
        Ok(Self { strategies })
    }

    pub fn with_strategy(mut self, strategy: Box<dyn LocateStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Return the winning strategy's label and the matched subtree.
    pub fn locate<'a>(&self, doc: &'a Html) -> Option<(&str, ElementRef<'a>)> {
        self.strategies
            .iter()
            .find_map(|s| s.locate(doc).map(|el| (s.label(), el)))
    }
}
