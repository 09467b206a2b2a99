use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::analyzer::{self, Reason, Verdict};
use crate::config::{Config, BATCH_CHUNK};
use crate::marker;

#[derive(Debug, Default, Serialize)]
pub struct AnalysisSummary {
    pub processed: usize,
    pub marked: usize,
    pub by_reason: BTreeMap<Reason, usize>,
}

impl AnalysisSummary {
    pub fn with_content(&self) -> usize {
        self.processed - self.marked
    }

    fn record(&mut self, verdict: &Verdict) {
        self.processed += 1;
        if verdict.is_non_content {
            self.marked += 1;
        }
        *self.by_reason.entry(verdict.reason).or_default() += 1;
    }

    pub fn print(&self) {
        println!("\nAnalysis complete:");
        println!("- Total files processed: {}", self.processed);
        println!("- Files marked as no-content: {}", self.marked);
        println!("- Files with content: {}", self.with_content());
        for reason in Reason::ALL {
            if let Some(n) = self.by_reason.get(&reason) {
                println!("  {:>5}  {}", n, reason);
            }
        }
    }
}

/// `*.txt` files directly inside `dir`, sorted by name.
pub fn list_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn classify_file(path: &Path, config: &Config) -> Result<Verdict> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to analyze file {}", path.display()))?;
    Ok(analyzer::classify_with(&text, config))
}

/// Classify every text file in `dir`, writing a marker for each non-content page.
pub fn analyze_directory(dir: &Path, config: &Config, dry_run: bool) -> Result<AnalysisSummary> {
    let files = list_text_files(dir)?;
    info!("Found {} text files to analyze in {}", files.len(), dir.display());
    analyze_files(&files, config, dry_run)
}

/// Classify exactly the given files; nothing else in their directories is touched.
pub fn analyze_files(files: &[PathBuf], config: &Config, dry_run: bool) -> Result<AnalysisSummary> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut summary = AnalysisSummary::default();

    for chunk in files.chunks(BATCH_CHUNK) {
        let verdicts = chunk
            .par_iter()
            .map(|path| classify_file(path, config))
            .collect::<Result<Vec<_>>>()?;

        for (path, verdict) in chunk.iter().zip(&verdicts) {
            summary.record(verdict);
            if !verdict.is_non_content {
                continue;
            }
            if !dry_run {
                marker::write_marker(path, verdict)?;
            }
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            pb.suspend(|| info!("Marked: {} - {}", name, verdict.reason));
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(summary)
}
