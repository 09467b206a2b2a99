#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub character_count: usize,
    pub word_count: usize,
}

/// Unicode whitespace plus the byte-order mark, which editors leave at the start of files.
pub fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

pub fn trim(text: &str) -> &str {
    text.trim_matches(is_blank)
}

/// Measure already-trimmed text. Characters are Unicode scalar values.
pub fn measure(trimmed: &str) -> TextStats {
    TextStats {
        character_count: trimmed.chars().count(),
        word_count: trimmed.split(is_blank).filter(|w| !w.is_empty()).count(),
    }
}

/// Non-blank lines, each trimmed.
pub fn content_lines(text: &str) -> Vec<&str> {
    text.lines().map(trim).filter(|l| !l.is_empty()).collect()
}
