use scraper::{ElementRef, Node};

/// Semantic role of an extracted fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `h1`..`h6`, carrying the depth.
    Heading(u8),
    /// Any other block-level element.
    Block,
    /// Bare text sitting directly inside the container.
    InlineText,
}

impl BlockKind {
    pub fn is_heading(self) -> bool {
        matches!(self, Self::Heading(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub kind: BlockKind,
    pub text: String,
}

impl ContentBlock {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Heading(level),
            text: text.into(),
        }
    }

    pub fn block(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Block,
            text: text.into(),
        }
    }

    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::InlineText,
            text: text.into(),
        }
    }
}

/// How a direct child element of the content container is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Heading(u8),
    /// Inline or decorative markup; dropped at the top level.
    Inline,
    Block,
}

/// Classify an element by its (lowercase) tag name.
///
/// ```
/// use tome_crawl::extract::{TagClass, classify};
///
/// assert_eq!(classify("h2"), TagClass::Heading(2));
/// assert_eq!(classify("span"), TagClass::Inline);
/// assert_eq!(classify("table"), TagClass::Block);
/// ```
pub fn classify(tag: &str) -> TagClass {
    match tag {
        "h1" => TagClass::Heading(1),
        "h2" => TagClass::Heading(2),
        "h3" => TagClass::Heading(3),
        "h4" => TagClass::Heading(4),
        "h5" => TagClass::Heading(5),
        "h6" => TagClass::Heading(6),
        "a" | "abbr" | "b" | "br" | "em" | "hr" | "i" | "img" | "noscript" | "script"
        | "small" | "span" | "strong" | "style" | "sub" | "sup" | "u" => TagClass::Inline,
        _ => TagClass::Block,
    }
}

/// Walk the direct children of `root` and keep the block-level text.
///
/// Bare text is kept when non-blank. Elements are kept when they are not
/// inline and their flattened text has at least `min_chars` characters.
/// Anything else is dropped, never merged into a neighbour.
pub fn extract_blocks(root: ElementRef<'_>, min_chars: usize) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    for child in root.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    blocks.push(ContentBlock::inline(trimmed));
                }
            }
            Node::Element(el) => {
                let kind = match classify(el.name()) {
                    TagClass::Inline => continue,
                    TagClass::Heading(level) => BlockKind::Heading(level),
                    TagClass::Block => BlockKind::Block,
                };
                let Some(el_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let text = flatten_text(el_ref);
                if text.is_empty() || text.chars().count() < min_chars {
                    continue;
                }
                blocks.push(ContentBlock { kind, text });
            }
            _ => {}
        }
    }
    blocks
}

/// Elements whose text is never reader-visible content.
fn is_non_text(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "noscript")
}

/// Descendant text outside script/style subtrees, whitespace collapsed to
/// single spaces.
fn flatten_text(el: ElementRef<'_>) -> String {
    el.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| is_non_text(e.name()))
            });
            (!hidden).then_some(&**text)
        })
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn blocks_of(body: &str, min_chars: usize) -> Vec<ContentBlock> {
        let doc = Html::parse_document(&format!("<html><body><main>{body}</main></body></html>"));
        let main = doc
            .select(&Selector::parse("main").unwrap())
            .next()
            .unwrap();
        extract_blocks(main, min_chars)
    }

    #[test]
    fn classifies_every_heading_level() {
        for level in 1..=6u8 {
            assert_eq!(classify(&format!("h{level}")), TagClass::Heading(level));
        }
        assert_eq!(classify("h7"), TagClass::Block);
    }

    #[test]
    fn decorative_tags_are_inline() {
        for tag in ["a", "b", "i", "strong", "em", "script", "style", "br", "hr", "span"] {
            assert_eq!(classify(tag), TagClass::Inline, "{tag}");
        }
        for tag in ["p", "div", "ul", "table", "blockquote", "section"] {
            assert_eq!(classify(tag), TagClass::Block, "{tag}");
        }
    }

    #[test]
    fn keeps_headings_blocks_and_bare_text_in_order() {
        let blocks = blocks_of(
            "<h2>Grappling</h2>\n  <p>When you want to grab a creature,\n   you can use the Attack action.</p>\n  Loose trailing text  ",
            2,
        );
        assert_eq!(
            blocks,
            vec![
                ContentBlock::heading(2, "Grappling"),
                ContentBlock::block(
                    "When you want to grab a creature, you can use the Attack action."
                ),
                ContentBlock::inline("Loose trailing text"),
            ]
        );
    }

    #[test]
    fn drops_inline_children_at_top_level() {
        let blocks = blocks_of(
            r#"<a href="/next">Next chapter</a><span>badge</span><script>var x = 1;</script><br><p>Kept paragraph</p>"#,
            2,
        );
        assert_eq!(blocks, vec![ContentBlock::block("Kept paragraph")]);
    }

    #[test]
    fn short_fragments_are_rejected() {
        let blocks = blocks_of("<div>⚔</div><p>ok</p><p>long enough</p>", 3);
        assert_eq!(blocks, vec![ContentBlock::block("long enough")]);
    }

    #[test]
    fn nested_markup_is_flattened() {
        let blocks = blocks_of(
            "<ul><li>Strength</li><li>Dexterity</li></ul><p>Roll <b>4d6</b> and drop the lowest.</p>",
            2,
        );
        assert_eq!(
            blocks,
            vec![
                ContentBlock::block("Strength Dexterity"),
                ContentBlock::block("Roll 4d6 and drop the lowest."),
            ]
        );
    }

    #[test]
    fn nested_script_and_style_text_is_left_out() {
        let blocks = blocks_of(
            "<div><p>Rules text</p><script>var tracker = 1;</script>\
             <style>.x{color:red}</style><noscript><p>Enable JS</p></noscript></div>",
            2,
        );
        assert_eq!(blocks, vec![ContentBlock::block("Rules text")]);
    }

    #[test]
    fn block_holding_only_script_is_dropped() {
        let blocks = blocks_of("<div><script>track()</script></div><p>Kept</p>", 2);
        assert_eq!(blocks, vec![ContentBlock::block("Kept")]);
    }

    #[test]
    fn empty_elements_are_dropped_even_with_zero_minimum() {
        let blocks = blocks_of("<div>   </div><p></p>", 0);
        assert!(blocks.is_empty());
    }
}
