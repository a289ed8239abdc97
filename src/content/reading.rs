//! Reading time estimation

use super::post::ContentSection;
use super::richtext;

/// Assumed reading speed
pub const WORDS_PER_MINUTE: usize = 200;

/// Whitespace-separated words across every section body
pub fn word_count(content: &[ContentSection]) -> usize {
    content
        .iter()
        .map(|section| richtext::as_text(&section.body).split_whitespace().count())
        .sum()
}

/// Minutes to read, rounded up; empty content reads in 0 minutes
pub fn estimate(content: &[ContentSection]) -> u32 {
    let minutes = word_count(content).div_ceil(WORDS_PER_MINUTE);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RichTextBlock;

    fn section(paragraphs: &[&str]) -> ContentSection {
        ContentSection {
            heading: "Heading words are not counted".to_string(),
            body: paragraphs
                .iter()
                .map(|p| RichTextBlock::paragraph(*p))
                .collect(),
        }
    }

    fn words(n: usize) -> String {
        (1..=n)
            .map(|i| format!("word{}", i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_empty_content_is_zero() {
        assert_eq!(estimate(&[]), 0);
        assert_eq!(estimate(&[section(&[])]), 0);
        assert_eq!(estimate(&[section(&["   ", "\n"])]), 0);
    }

    #[test]
    fn test_rounds_up_at_boundary() {
        assert_eq!(estimate(&[section(&[words(200).as_str()])]), 1);
        assert_eq!(estimate(&[section(&[words(201).as_str()])]), 2);
        assert_eq!(estimate(&[section(&[words(1).as_str()])]), 1);
    }

    #[test]
    fn test_whitespace_runs_do_not_change_count() {
        let tight = [section(&["a b c"])];
        let loose = [section(&["a  b\t\n c  "])];
        assert_eq!(word_count(&tight), 3);
        assert_eq!(word_count(&tight), word_count(&loose));
        assert_eq!(estimate(&tight), estimate(&loose));
    }

    #[test]
    fn test_counts_across_sections_and_blocks() {
        let content = [
            section(&[words(150).as_str(), words(30).as_str()]),
            section(&[words(21).as_str()]),
        ];
        assert_eq!(word_count(&content), 201);
        assert_eq!(estimate(&content), 2);
    }
}
