use std::fmt;

use serde::Serialize;

use super::stats::TextStats;

/// Why a text was accepted or flagged. The literal strings are persisted
/// into marker files and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Reason {
    #[serde(rename = "Empty file")]
    Empty,
    #[serde(rename = "Too short (less than 10 characters)")]
    TooShort,
    #[serde(rename = "Text extraction failed")]
    ExtractionFailed,
    #[serde(rename = "Table of contents or similar metadata page")]
    TableOfContents,
    #[serde(rename = "Repetitive or structured content (likely not meaningful text)")]
    Repetitive,
    #[serde(rename = "Contains meaningful content")]
    MeaningfulContent,
}

impl Reason {
    pub const ALL: [Reason; 6] = [
        Reason::Empty,
        Reason::TooShort,
        Reason::ExtractionFailed,
        Reason::TableOfContents,
        Reason::Repetitive,
        Reason::MeaningfulContent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Empty => "Empty file",
            Reason::TooShort => "Too short (less than 10 characters)",
            Reason::ExtractionFailed => "Text extraction failed",
            Reason::TableOfContents => "Table of contents or similar metadata page",
            Reason::Repetitive => "Repetitive or structured content (likely not meaningful text)",
            Reason::MeaningfulContent => "Contains meaningful content",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub is_empty: bool,
    pub is_table_of_contents: bool,
    pub is_non_content: bool,
    pub reason: Reason,
    pub character_count: usize,
    pub word_count: usize,
}

impl Verdict {
    /// Flags are derived from the reason so they can never disagree with it.
    pub fn new(reason: Reason, stats: TextStats) -> Self {
        Self {
            is_empty: matches!(reason, Reason::Empty | Reason::TooShort),
            is_table_of_contents: reason == Reason::TableOfContents,
            is_non_content: reason != Reason::MeaningfulContent,
            reason,
            character_count: stats.character_count,
            word_count: stats.word_count,
        }
    }
}
