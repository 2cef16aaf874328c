//! PDF text extraction.
//!
//! Pages are read in page-number order and their text appended as lopdf
//! returns it, which ends every text line with `\n`. A failure on any page
//! fails the whole document.

use lopdf::Document;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("page {page}: {source}")]
    Page { page: u32, source: lopdf::Error },
}

/// Extract the text of every page of an in-memory PDF.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = Document::load_mem(bytes)?;
    extract_all_pages(&doc)
}

pub fn extract_pdf_file(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    extract_pdf_text(&bytes)
}

fn extract_all_pages(doc: &Document) -> Result<String, ExtractError> {
    let mut text = String::new();
    for page in doc.get_pages().into_keys() {
        let page_text = doc
            .extract_text(&[page])
            .map_err(|source| ExtractError::Page { page, source })?;
        text.push_str(&page_text);
    }
    Ok(text)
}
