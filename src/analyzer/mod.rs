pub mod rules;
pub mod stats;
pub mod verdict;

use std::sync::LazyLock;

use tracing::debug;

use crate::config::Config;
pub use stats::TextStats;
pub use verdict::{Reason, Verdict};

static DEFAULT_CONFIG: LazyLock<Config> = LazyLock::new(Config::default);

/// Classify one page of text with the built-in keyword lists and thresholds.
pub fn classify(text: &str) -> Verdict {
    classify_with(text, &DEFAULT_CONFIG)
}

/// Rule chain, first match wins: emptiness → failure marker → TOC → repetition.
pub fn classify_with(text: &str, config: &Config) -> Verdict {
    let trimmed = stats::trim(text);
    let stats = stats::measure(trimmed);
    let reason = first_matching_rule(trimmed, stats, config).unwrap_or(Reason::MeaningfulContent);
    debug!(
        "classified {} chars / {} words: {}",
        stats.character_count, stats.word_count, reason
    );
    Verdict::new(reason, stats)
}

fn first_matching_rule(trimmed: &str, stats: TextStats, config: &Config) -> Option<Reason> {
    if stats.character_count == 0 {
        return Some(Reason::Empty);
    }
    if stats.character_count < config.thresholds.min_characters {
        return Some(Reason::TooShort);
    }

    let lower = trimmed.to_lowercase();
    if rules::has_failure_marker(&lower, &config.failure_markers) {
        return Some(Reason::ExtractionFailed);
    }
    if rules::is_table_of_contents(trimmed, &lower, config) {
        return Some(Reason::TableOfContents);
    }
    if rules::is_repetitive(trimmed, &config.thresholds) {
        return Some(Reason::Repetitive);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROSE: &str = "The river had been rising for three days before anyone in the village \
        took it seriously.\nBy the time the mill owner sent his sons to move the grain, the lower \
        fields were already under water and the road to the market town had washed out.\nShe \
        watched from the ridge as the water crept toward the church steps, wondering whether \
        the old stone bridge would hold through another night of rain.";

    #[test]
    fn empty() {
        let v = classify("");
        assert!(v.is_empty);
        assert!(v.is_non_content);
        assert!(!v.is_table_of_contents);
        assert_eq!(v.reason, Reason::Empty);
        assert_eq!(v.character_count, 0);
        assert_eq!(v.word_count, 0);
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(classify("  \n\t \r\n ").reason, Reason::Empty);
    }

    #[test]
    fn too_short() {
        let v = classify("hi");
        assert_eq!(v.reason, Reason::TooShort);
        assert_eq!(v.reason.as_str(), "Too short (less than 10 characters)");
        assert!(v.is_empty);
        assert_eq!(v.character_count, 2);
        assert_eq!(v.word_count, 1);
    }

    #[test]
    fn short_boundary() {
        assert_eq!(classify("   123456789   ").reason, Reason::TooShort);
        assert_ne!(classify("1234567890").reason, Reason::TooShort);
    }

    #[test]
    fn byte_order_mark_only_is_empty() {
        let v = classify("\u{feff}");
        assert_eq!(v.reason, Reason::Empty);
        assert_eq!(v.character_count, 0);
    }

    #[test]
    fn byte_order_mark_not_counted() {
        let v = classify("\u{feff}123456789");
        assert_eq!(v.reason, Reason::TooShort);
        assert_eq!(v.character_count, 9);
    }

    #[test]
    fn extraction_failed() {
        let v = classify("[Text extraction failed for this page]");
        assert_eq!(v.reason, Reason::ExtractionFailed);
        assert!(v.is_non_content);
        assert!(!v.is_table_of_contents);
        assert!(!v.is_empty);
    }

    #[test]
    fn table_of_contents() {
        let v = classify("Table of Contents\nChapter 1 ... 5\nChapter 2 ... 12\nIndex ... 50");
        assert_eq!(v.reason, Reason::TableOfContents);
        assert!(v.is_table_of_contents);
        assert!(v.is_non_content);
    }

    #[test]
    fn repetitive() {
        let text = ["a a"; 10].join("\n");
        let v = classify(&text);
        assert_eq!(v.reason, Reason::Repetitive);
        assert!(v.is_non_content);
        assert!(!v.is_table_of_contents);
        assert_eq!(v.word_count, 20);
    }

    #[test]
    fn meaningful_prose() {
        let v = classify(PROSE);
        assert_eq!(v.reason, Reason::MeaningfulContent);
        assert!(!v.is_non_content);
        assert!(!v.is_empty);
        assert!(!v.is_table_of_contents);
    }

    #[test]
    fn failure_marker_wins_over_toc() {
        let text = "Table of Contents\nPreface\nChapter 1\nextraction failed on this page";
        assert_eq!(classify(text).reason, Reason::ExtractionFailed);
    }

    #[test]
    fn toc_wins_over_repetition() {
        let text = ["Chapter 1"; 6].join("\n");
        assert_eq!(classify(&text).reason, Reason::TableOfContents);
    }

    #[test]
    fn idempotent() {
        for text in ["", "hi", PROSE, "Contents\nIndex\nPreface"] {
            assert_eq!(classify(text), classify(text));
        }
    }

    #[test]
    fn custom_config() {
        let mut config = Config::default();
        config.thresholds.min_characters = 1000;
        assert_eq!(classify_with(PROSE, &config).reason, Reason::TooShort);
    }
}
