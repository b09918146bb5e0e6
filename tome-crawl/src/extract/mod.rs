//! Turning a parsed page into readable text.
//!
//! [`locate`] finds the article container, [`blocks`] walks its direct
//! children into [`ContentBlock`]s, and [`assemble`] joins them with
//! heading-aware spacing.

pub mod assemble;
pub mod blocks;
pub mod locate;

pub use assemble::assemble;
pub use blocks::{BlockKind, ContentBlock, TagClass, classify, extract_blocks};
pub use locate::{ContentLocator, CssStrategy, LocateStrategy, parse_selector};
