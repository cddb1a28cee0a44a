use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

/// Info string that marks a fenced block as a timeline.
pub const TIMELINE_TAG: &str = "timeline";

/// Returns the content of every ```` ```timeline ```` block in `markdown`, in
/// document order. Only the first word of the info string is compared, so
/// ```` ```timeline desc ```` counts too.
pub fn timeline_blocks(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                if info.split_whitespace().next() == Some(TIMELINE_TAG) {
                    current = Some(String::new());
                }
            }
            Event::Text(text) => {
                if let Some(block) = current.as_mut() {
                    block.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
            _ => {}
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_tagged_blocks_in_order() {
        let md = "# Plans\n\n```timeline\n2024-03-01: one\n```\n\ntext\n\n```rust\nfn main() {}\n```\n\n```timeline\n2024-04-01: two\n```\n";
        let blocks = timeline_blocks(md);
        assert_eq!(blocks, vec!["2024-03-01: one\n", "2024-04-01: two\n"]);
    }

    #[test]
    fn keeps_blank_lines_inside_a_block() {
        let md = "```timeline\n2024-03-01\nfirst\n\nsecond\n```";
        assert_eq!(timeline_blocks(md), vec!["2024-03-01\nfirst\n\nsecond\n"]);
    }

    #[test]
    fn tag_must_be_the_first_word() {
        let md = "```timeline desc\n2024-03-01: a\n```\n\n```mytimeline\n2024-03-01: b\n```\n\n~~~timeline\n2024-03-02: c\n~~~\n";
        assert_eq!(timeline_blocks(md), vec!["2024-03-01: a\n", "2024-03-02: c\n"]);
    }

    #[test]
    fn plain_text_has_no_blocks() {
        assert!(timeline_blocks("2024-03-01: not fenced").is_empty());
        assert!(timeline_blocks("").is_empty());
    }
}
