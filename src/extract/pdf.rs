//! PDF → text via `pdf-extract`, one page at a time.

use std::panic::{AssertUnwindSafe, catch_unwind};

use pdf_extract::{Document, OutputError, PlainTextOutput, output_doc_page};
use tracing::{debug, info, warn};

use crate::error::ExtractError;

/// Text of every readable page, one trimmed line per non-blank line.
///
/// Pages that fail to render (or panic the parser) are skipped, and scanned
/// image-only pages contribute nothing. A document that cannot be opened at
/// all is an error.
pub fn extract_text_from_pdf(data: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract can panic on malformed input instead of returning an error.
    let doc = match catch_unwind(|| load_document(data)) {
        Ok(result) => result?,
        Err(_) => {
            warn!("PDF parser panicked on malformed input");
            return Err(ExtractError::Pdf("documento malformado".into()));
        }
    };

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let (pages, skipped) = collect_pages(&page_numbers, |page| {
        catch_unwind(AssertUnwindSafe(|| page_text(&doc, page)))
            .unwrap_or_else(|_| Err("parser panicked".to_string()))
    });

    let cleaned = clean_extracted_text(&pages.join("\n"));
    info!(
        pages = page_numbers.len(),
        skipped,
        chars = cleaned.len(),
        "PDF extraction successful"
    );
    Ok(cleaned)
}

fn load_document(data: &[u8]) -> Result<Document, ExtractError> {
    let mut doc = Document::load_mem(data).map_err(|e| {
        warn!(error = %e, "PDF extraction failed");
        ExtractError::Pdf(e.to_string())
    })?;
    // Owner-password-only documents open with an empty user password.
    if doc.is_encrypted() {
        doc.decrypt("")
            .map_err(|e| ExtractError::Pdf(e.to_string()))?;
    }
    Ok(doc)
}

fn page_text(doc: &Document, page: u32) -> Result<String, String> {
    let mut text = String::new();
    {
        let mut output = PlainTextOutput::new(&mut text);
        output_doc_page(doc, &mut output, page).map_err(|e: OutputError| e.to_string())?;
    }
    Ok(text)
}

/// Run `extract` over `pages`, keeping successes and counting failures.
fn collect_pages<F>(pages: &[u32], mut extract: F) -> (Vec<String>, usize)
where
    F: FnMut(u32) -> Result<String, String>,
{
    let mut texts = Vec::with_capacity(pages.len());
    let mut skipped = 0;
    for &page in pages {
        match extract(page) {
            Ok(text) => texts.push(text),
            Err(e) => {
                debug!(page, error = %e, "Skipping unreadable PDF page");
                skipped += 1;
            }
        }
    }
    (texts, skipped)
}

/// Trim lines and drop blank ones.
fn clean_extracted_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
