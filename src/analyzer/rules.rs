use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::stats::content_lines;
use crate::config::{Config, Thresholds};

static CHAPTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)chapter\s+[0-9]+").unwrap());
static PAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)page\s+[0-9]+").unwrap());

/// Substring search; `lower` must already be lowercased.
pub fn has_failure_marker(lower: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| lower.contains(m.as_str()))
}

/// Number of distinct keywords occurring anywhere in `lower`.
pub fn keyword_matches(lower: &str, keywords: &[String]) -> usize {
    keywords.iter().filter(|kw| lower.contains(kw.as_str())).count()
}

pub fn is_table_of_contents(text: &str, lower: &str, config: &Config) -> bool {
    let t = &config.thresholds;
    let keywords = keyword_matches(lower, &config.toc_keywords);
    if keywords >= t.toc_keyword_matches {
        return true;
    }

    let chapters = CHAPTER_RE.find_iter(text).count();
    let pages = PAGE_RE.find_iter(text).count();
    if chapters >= t.numbered_reference_matches || pages >= t.numbered_reference_matches {
        return true;
    }

    // Mostly short lines only counts with at least a weak keyword signal.
    let lines = content_lines(text);
    if lines.len() >= t.short_line_min_lines {
        let short = lines
            .iter()
            .filter(|l| l.chars().count() < t.short_line_length)
            .count();
        let ratio = short as f64 / lines.len() as f64;
        if ratio > t.short_line_ratio && keywords >= t.short_line_keyword_matches {
            return true;
        }
    }

    false
}

pub fn is_repetitive(text: &str, t: &Thresholds) -> bool {
    let lines = content_lines(text);
    if lines.is_empty() || lines.len() < t.repetition_min_lines {
        return false;
    }

    let unique: HashSet<&str> = lines.iter().copied().collect();
    let ratio = unique.len() as f64 / lines.len() as f64;
    if ratio < t.unique_line_ratio {
        return true;
    }

    let total: usize = lines.iter().map(|l| l.chars().count()).sum();
    let mean = total as f64 / lines.len() as f64;
    mean < t.mean_line_length && lines.len() > t.structured_min_lines
}
