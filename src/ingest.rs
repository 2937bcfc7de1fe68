use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    error::{Error, Result},
    walker,
};

/// Kind of an uploaded source, declared by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Pdf,
    Tabular,
}

impl SourceKind {
    /// Detect the kind from a path's extension; `None` for unsupported.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => Some(Self::Text),
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => Some(Self::Pdf),
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Some(Self::Tabular),
            _ => None,
        }
    }
}

/// One uploaded source: where it came from, what it claims to be, and its
/// raw bytes.
#[derive(Debug, Clone)]
pub struct SourceItem {
    pub origin: String,
    pub kind: SourceKind,
    pub bytes: Vec<u8>,
}

/// A raw resume document produced by ingestion.
///
/// `origin` is display-only; a document's identity is its position in the
/// ingestion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResume {
    pub origin: String,
    pub text: String,
}

/// Why a source contributed no documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The extension is none of txt/pdf/csv.
    UnsupportedType,
    /// The PDF parser could not extract any text from the file.
    UnreadablePdf,
    /// The tabular file has no column with the expected name.
    MissingColumn(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnsupportedType => write!(f, "unsupported file type"),
            SkipReason::UnreadablePdf => write!(f, "no text could be extracted"),
            SkipReason::MissingColumn(column) => write!(f, "no '{column}' column"),
        }
    }
}

/// A source that contributed no documents, with the reason why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub origin: String,
    pub reason: SkipReason,
}

/// Ordered resume documents plus an accounting of skipped sources.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub resumes: Vec<RawResume>,
    pub skipped: Vec<SkippedSource>,
}

/// What one source item extracted to: zero or more documents, and at most
/// one skip record.
#[derive(Debug)]
struct Extracted {
    resumes: Vec<RawResume>,
    skipped: Option<SkippedSource>,
}

/// Resolve CLI inputs into source items.
///
/// Directories are walked recursively for supported files; explicit file
/// arguments are taken as-is, and an unsupported extension on one becomes a
/// skip record instead of an error. A path that exists as neither file nor
/// directory is fatal.
pub fn load_sources(inputs: &[PathBuf]) -> Result<(Vec<SourceItem>, Vec<SkippedSource>)> {
    let mut files: Vec<PathBuf> = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(walker::discover_files(input)?);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(Error::NotFound {
                kind: "input",
                name: input.display().to_string(),
            });
        }
    }

    let mut sources = Vec::new();
    let mut skipped = Vec::new();
    for path in files {
        let origin = path.display().to_string();
        match SourceKind::from_path(&path) {
            Some(kind) => {
                let bytes = std::fs::read(&path)?;
                sources.push(SourceItem { origin, kind, bytes });
            }
            None => skipped.push(SkippedSource {
                origin,
                reason: SkipReason::UnsupportedType,
            }),
        }
    }

    Ok((sources, skipped))
}

/// Extract documents from every source item.
///
/// Extraction runs on the rayon pool; assembly is sequential so the
/// document order stays item order, then row order, regardless of
/// parallelism. Downstream tie-breaking depends on that order.
pub fn extract_documents(sources: &[SourceItem], column: &str) -> Result<IngestReport> {
    let extracted = sources
        .par_iter()
        .map(|item| extract_item(item, column))
        .collect::<Result<Vec<_>>>()?;

    let mut report = IngestReport::default();
    for e in extracted {
        report.resumes.extend(e.resumes);
        report.skipped.extend(e.skipped);
    }

    tracing::debug!(
        "extracted {} documents from {} sources ({} skipped)",
        report.resumes.len(),
        sources.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Full ingestion: resolve paths, read bytes, extract documents, and merge
/// the skip records from both phases.
pub fn collect_resumes(inputs: &[PathBuf], column: &str) -> Result<IngestReport> {
    let (sources, mut skipped) = load_sources(inputs)?;
    let report = extract_documents(&sources, column)?;
    skipped.extend(report.skipped);
    Ok(IngestReport {
        resumes: report.resumes,
        skipped,
    })
}

fn extract_item(item: &SourceItem, column: &str) -> Result<Extracted> {
    match item.kind {
        SourceKind::Text => extract_text(item),
        SourceKind::Pdf => Ok(extract_pdf(item)),
        SourceKind::Tabular => extract_tabular(item, column),
    }
}

/// A text source is exactly one document. Invalid UTF-8 fails the whole
/// request rather than silently dropping the file.
fn extract_text(item: &SourceItem) -> Result<Extracted> {
    let text = match std::str::from_utf8(&item.bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            return Err(Error::Decode {
                origin: item.origin.clone(),
            });
        }
    };
    Ok(Extracted {
        resumes: vec![RawResume {
            origin: item.origin.clone(),
            text,
        }],
        skipped: None,
    })
}

/// A readable PDF is one document, even when no page yields text (the
/// empty string still counts). An unreadable PDF becomes a skip record,
/// never an error.
fn extract_pdf(item: &SourceItem) -> Extracted {
    match pdf_extract::extract_text_from_mem(&item.bytes) {
        Ok(text) => Extracted {
            resumes: vec![RawResume {
                origin: item.origin.clone(),
                text,
            }],
            skipped: None,
        },
        Err(err) => {
            tracing::warn!("could not extract text from {}: {err}", item.origin);
            Extracted {
                resumes: Vec::new(),
                skipped: Some(SkippedSource {
                    origin: item.origin.clone(),
                    reason: SkipReason::UnreadablePdf,
                }),
            }
        }
    }
}

/// A tabular source contributes one document per non-empty cell of
/// `column`, in row order. A missing column becomes a skip record; a
/// malformed record is fatal.
fn extract_tabular(item: &SourceItem, column: &str) -> Result<Extracted> {
    let mut reader = csv::Reader::from_reader(item.bytes.as_slice());
    let headers = reader.headers()?.clone();
    let Some(position) = headers.iter().position(|h| h == column) else {
        return Ok(Extracted {
            resumes: Vec::new(),
            skipped: Some(SkippedSource {
                origin: item.origin.clone(),
                reason: SkipReason::MissingColumn(column.to_string()),
            }),
        });
    };

    let mut resumes = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if let Some(cell) = record.get(position)
            && !cell.is_empty()
        {
            resumes.push(RawResume {
                origin: format!("{}#{}", item.origin, row + 1),
                text: cell.to_string(),
            });
        }
    }

    Ok(Extracted {
        resumes,
        skipped: None,
    })
}
