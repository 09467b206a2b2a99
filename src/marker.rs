use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use tempfile::NamedTempFile;

use crate::analyzer::Verdict;
use crate::config::MARKER_EXTENSION;

/// `page001.txt` → `page001.no-content`, next to the text file.
pub fn marker_path(text_path: &Path) -> PathBuf {
    text_path.with_extension(MARKER_EXTENSION)
}

pub fn render(verdict: &Verdict, at: DateTime<Utc>) -> String {
    format!(
        "Marked as no-content: {}\nCharacter count: {}\nWord count: {}\nAnalysis date: {}",
        verdict.reason,
        verdict.character_count,
        verdict.word_count,
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Write the marker via a temp file in the same directory, then rename over the target.
pub fn write_marker(text_path: &Path, verdict: &Verdict) -> Result<PathBuf> {
    let path = marker_path(text_path);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(render(verdict, Utc::now()).as_bytes())?;
    // Temp files are owner-only; give the marker the same mode as its page.
    if let Ok(meta) = std::fs::metadata(text_path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
    }
    tmp.persist(&path)
        .with_context(|| format!("Failed to write marker {}", path.display()))?;
    Ok(path)
}
