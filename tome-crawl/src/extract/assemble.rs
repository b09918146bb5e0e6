use super::blocks::ContentBlock;

/// Join blocks into page text.
///
/// A heading directly followed by non-heading content is separated by a single
/// newline so it stays attached to its paragraph; every other pair gets a
/// blank line.
///
/// ```
/// use tome_crawl::extract::{ContentBlock, assemble};
///
/// let text = assemble(&[
///     ContentBlock::heading(2, "Resting"),
///     ContentBlock::block("A short rest lasts one hour."),
///     ContentBlock::block("A long rest lasts eight hours."),
/// ]);
/// assert_eq!(
///     text,
///     "Resting\nA short rest lasts one hour.\n\nA long rest lasts eight hours."
/// );
/// ```
pub fn assemble(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    let mut previous: Option<&ContentBlock> = None;
    for block in blocks {
        if let Some(prev) = previous {
            if prev.kind.is_heading() && !block.kind.is_heading() {
                out.push('\n');
            } else {
                out.push_str("\n\n");
            }
        }
        out.push_str(&block.text);
        previous = Some(block);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_clings_to_following_block() {
        let text = assemble(&[ContentBlock::heading(1, "X"), ContentBlock::block("Y")]);
        assert_eq!(text, "X\nY");
    }

    #[test]
    fn blocks_are_separated_by_blank_line() {
        let text = assemble(&[ContentBlock::block("X"), ContentBlock::block("Y")]);
        assert_eq!(text, "X\n\nY");
    }

    #[test]
    fn consecutive_headings_are_separated_by_blank_line() {
        let text = assemble(&[ContentBlock::heading(1, "X"), ContentBlock::heading(2, "Y")]);
        assert_eq!(text, "X\n\nY");
    }

    #[test]
    fn heading_before_bare_text_uses_single_break() {
        let text = assemble(&[
            ContentBlock::block("Intro"),
            ContentBlock::heading(3, "Note"),
            ContentBlock::inline("loose"),
        ]);
        assert_eq!(text, "Intro\n\nNote\nloose");
    }

    #[test]
    fn empty_and_single_inputs() {
        assert_eq!(assemble(&[]), "");
        assert_eq!(assemble(&[ContentBlock::heading(1, "Only")]), "Only");
    }
}
