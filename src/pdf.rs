use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use lopdf::Document;
use regex::Regex;
use tracing::{info, warn};

use crate::config::EXTRACTION_FAILED_TEXT;

static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

#[derive(Debug)]
pub struct PdfInfo {
    pub file_name: String,
    pub page_count: usize,
    pub file_size: u64,
}

impl PdfInfo {
    pub fn size_mb(&self) -> f64 {
        self.file_size as f64 / 1024.0 / 1024.0
    }
}

/// Tabs become spaces, space runs collapse, ends are trimmed.
pub fn normalize_page_text(raw: &str) -> String {
    let detabbed = raw.replace('\t', " ");
    SPACES_RE.replace_all(&detabbed, " ").trim().to_string()
}

/// `book.pdf` page 7 → `book.pdf.page007.txt`
pub fn page_text_name(base: &str, page: u32) -> String {
    format!("{}.page{:03}.txt", base, page)
}

pub fn page_pdf_name(prefix: &str, page: u32) -> String {
    format!("{}_{:03}.pdf", prefix, page)
}

fn load(input: &Path) -> Result<Document> {
    if !input.exists() {
        bail!("Input file not found: {}", input.display());
    }
    Document::load(input).with_context(|| format!("Failed to parse PDF {}", input.display()))
}

fn file_name(input: &Path) -> String {
    input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Output directory defaults to the directory holding the input.
fn resolve_output(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

fn page_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );
    Ok(pb)
}

pub fn info(input: &Path) -> Result<PdfInfo> {
    let meta = std::fs::metadata(input)
        .with_context(|| format!("Failed to stat {}", input.display()))?;
    let doc = load(input)?;
    Ok(PdfInfo {
        file_name: file_name(input),
        page_count: doc.get_pages().len(),
        file_size: meta.len(),
    })
}

/// Write each page's text to `<name>.pageNNN.txt`. Returns the written paths in page order.
pub fn extract_pages_to_text(input: &Path, output: Option<&Path>) -> Result<Vec<PathBuf>> {
    let doc = load(input)?;
    let out_dir = resolve_output(input, output);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    info!("Processing PDF with {} pages...", pages.len());

    let base = file_name(input);
    let pb = page_bar(pages.len())?;
    let mut written = Vec::with_capacity(pages.len());

    for page in pages {
        let text = match doc.extract_text(&[page]) {
            Ok(raw) => normalize_page_text(&raw),
            Err(e) => {
                pb.suspend(|| warn!("Could not extract text from page {}: {}", page, e));
                EXTRACTION_FAILED_TEXT.to_string()
            }
        };

        let path = out_dir.join(page_text_name(&base, page));
        std::fs::write(&path, &text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Text extraction completed. Files saved to: {}", out_dir.display());
    Ok(written)
}

/// Save every page as its own PDF named `<prefix>_NNN.pdf`.
pub fn split_to_pages(input: &Path, output: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let doc = load(input)?;
    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    info!("Processing PDF with {} pages...", pages.len());

    let pb = page_bar(pages.len())?;
    let mut written = Vec::with_capacity(pages.len());

    for &page in &pages {
        let others: Vec<u32> = pages.iter().copied().filter(|&p| p != page).collect();
        let mut single = doc.clone();
        single.delete_pages(&others);
        single.prune_objects();
        single.compress();

        let path = output.join(page_pdf_name(prefix, page));
        single
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(written)
}
