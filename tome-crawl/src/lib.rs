//! Site-scoped crawler that turns a rule-book website into a text corpus.
//!
//! - URL identity and scoping (`normalize`, `scope`)
//! - Breadth-first work queue with visited tracking (`frontier`)
//! - Page acquisition behind the [`PageSource`] trait (`fetch`)
//! - Main-content location, block extraction and text assembly (`extract`)
//! - In-scope link discovery (`links`) and per-page analysis (`page`)
//! - The sequential crawl loop (`driver`) and the corpus file writer (`corpus`)
//!
//! The loop is single-flight: one fetch at a time followed by a
//! fixed politeness delay.

pub mod corpus;
pub mod driver;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod links;
pub mod normalize;
pub mod page;
pub mod scope;
pub mod settings;

pub use corpus::{CorpusSummary, CorpusWriter};
pub use driver::{CrawlReport, CrawlState, Crawler, PageResult, StopReason};
pub use fetch::{HttpPageSource, PageSource};
pub use normalize::NormalizedUrl;
pub use settings::CrawlSettings;
