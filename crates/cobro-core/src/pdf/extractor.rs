//! Report text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Text source for accounts receivable report PDFs.
pub struct PdfTextSource {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfTextSource {
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load `data` and return the text of all pages joined by `\n`.
    pub fn text_from_bytes(data: &[u8]) -> Result<String> {
        let mut source = Self::new();
        source.load(data)?;
        source.extract_text()
    }

    /// Per-page text, in page order.
    pub fn pages(&self) -> Result<Vec<String>> {
        let doc = self.document()?;

        match pdf_extract::extract_text_from_mem_by_pages(&self.raw_data) {
            Ok(pages) => Ok(pages),
            Err(e) => {
                warn!("pdf-extract failed ({}), falling back to lopdf", e);
                let count = doc.get_pages().len() as u32;
                (1..=count)
                    .map(|page| {
                        doc.extract_text(&[page])
                            .map_err(|e| PdfError::TextExtraction(e.to_string()))
                    })
                    .collect()
            }
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }
}

impl Default for PdfTextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfTextSource {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        let pages = self.pages()?;
        debug!("Extracted text from {} pages", pages.len());
        Ok(pages.join("\n"))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }
        let mut pages = self.pages()?;
        let index = (page - 1) as usize;
        if index < pages.len() {
            Ok(pages.swap_remove(index))
        } else {
            Err(PdfError::InvalidPage(page))
        }
    }
}
