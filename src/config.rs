use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::info;

/// Literal written into a page file when its text could not be extracted.
pub const EXTRACTION_FAILED_TEXT: &str = "[Text extraction failed for this page]";

pub const DEFAULT_PAGE_PREFIX: &str = "page";
pub const DEFAULT_SPLIT_OUTPUT: &str = "./output";
pub const MARKER_EXTENSION: &str = "no-content";
pub const BATCH_CHUNK: usize = 500;

const TOC_KEYWORDS: &[&str] = &[
    "table of contents",
    "contents",
    "chapter",
    "part 1",
    "part 2",
    "part 3",
    "index",
    "acknowledgements",
    "dedication",
    "preface",
    "introduction",
    "foreword",
    "copyright",
    "title page",
    "about the author",
];

const FAILURE_MARKERS: &[&str] = &[
    "[text extraction failed for this page]",
    "extraction failed",
    "could not extract text",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub toc_keywords: Vec<String>,
    pub failure_markers: Vec<String>,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Trimmed texts shorter than this are "too short".
    pub min_characters: usize,
    pub toc_keyword_matches: usize,
    /// Matches of `chapter N` or `page N` needed to call a page a TOC.
    pub numbered_reference_matches: usize,
    pub short_line_length: usize,
    /// Fraction of short lines that must be exceeded.
    pub short_line_ratio: f64,
    pub short_line_min_lines: usize,
    pub short_line_keyword_matches: usize,
    pub repetition_min_lines: usize,
    pub unique_line_ratio: f64,
    pub mean_line_length: f64,
    /// Line count that must be exceeded for the mean-length check.
    pub structured_min_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toc_keywords: TOC_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            failure_markers: FAILURE_MARKERS.iter().map(|s| s.to_string()).collect(),
            thresholds: Thresholds::default(),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_characters: 10,
            toc_keyword_matches: 2,
            numbered_reference_matches: 2,
            short_line_length: 50,
            short_line_ratio: 0.7,
            short_line_min_lines: 3,
            short_line_keyword_matches: 1,
            repetition_min_lines: 3,
            unique_line_ratio: 0.3,
            mean_line_length: 15.0,
            structured_min_lines: 5,
        }
    }
}

impl Config {
    /// Load from a TOML file, or fall back to the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(raw)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    // Matching happens against lowercased text.
    fn normalize(&mut self) {
        for kw in self.toc_keywords.iter_mut().chain(self.failure_markers.iter_mut()) {
            *kw = kw.to_lowercase();
        }
        self.toc_keywords.retain(|kw| !kw.is_empty());
        self.failure_markers.retain(|m| !m.is_empty());
    }

    fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        for (name, value) in [
            ("short_line_ratio", t.short_line_ratio),
            ("unique_line_ratio", t.unique_line_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("thresholds.{} must be within [0, 1], got {}", name, value);
            }
        }
        if !t.mean_line_length.is_finite() || t.mean_line_length < 0.0 {
            bail!("thresholds.mean_line_length must be a non-negative number");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.toc_keywords.len(), 15);
        assert_eq!(c.failure_markers.len(), 3);
        assert_eq!(c.thresholds.min_characters, 10);
        assert_eq!(c.thresholds.short_line_ratio, 0.7);
        assert_eq!(c.thresholds.unique_line_ratio, 0.3);
        assert_eq!(c.thresholds.structured_min_lines, 5);
    }

    #[test]
    fn failure_text_is_a_marker() {
        let c = Config::default();
        assert!(c.failure_markers.contains(&EXTRACTION_FAILED_TEXT.to_lowercase()));
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_override() {
        let c = Config::from_toml("[thresholds]\nmin_characters = 25\n").unwrap();
        assert_eq!(c.thresholds.min_characters, 25);
        assert_eq!(c.thresholds.toc_keyword_matches, 2);
        assert_eq!(c.toc_keywords, Config::default().toc_keywords);
    }

    #[test]
    fn keywords_lowercased() {
        let c = Config::from_toml("toc_keywords = [\"Glossary\", \"\", \"APPENDIX\"]").unwrap();
        assert_eq!(c.toc_keywords, vec!["glossary", "appendix"]);
    }

    #[test]
    fn rejects_bad_ratio() {
        assert!(Config::from_toml("[thresholds]\nshort_line_ratio = 1.5\n").is_err());
        assert!(Config::from_toml("[thresholds]\nunique_line_ratio = -0.1\n").is_err());
    }

    #[test]
    fn rejects_unknown_field() {
        assert!(Config::from_toml("[thresholds]\nnope = 1\n").is_err());
    }

    #[test]
    fn load_without_path() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn load_missing_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
