//! # PDF Text Extraction
//!
//! Thin wrapper over [`pdf_extract`]. The tide table is a text PDF, so no
//! layout analysis happens here: every page's text is pulled out in page
//! order and glued together into one blob for the [`crate::normalize`] step.
//!
//! `pdf_extract` can panic on malformed input instead of returning an error,
//! so the call runs under [`std::panic::catch_unwind`].

use crate::TideError;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::debug;

/// Read a PDF file and return the text of all pages concatenated in order.
///
/// # Errors
/// - [`TideError::Io`] if the file cannot be read
/// - [`TideError::Pdf`] if the document cannot be decoded
///
/// # Example
/// ```no_run
/// use tide_table_lib::pdf_text::extract_text;
///
/// let text = extract_text("Data_Ilheus.pdf")?;
/// println!("{} characters", text.len());
/// # Ok::<(), tide_table_lib::TideError>(())
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String, TideError> {
    let data = fs::read(path.as_ref())?;
    debug!(
        "Read {} bytes from {}",
        data.len(),
        path.as_ref().display()
    );
    extract_text_from_bytes(&data)
}

/// Extract text from an in-memory PDF.
pub fn extract_text_from_bytes(data: &[u8]) -> Result<String, TideError> {
    let pages = read_pages(data)?;
    debug!("Extracted {} pages", pages.len());
    Ok(join_pages(pages))
}

/// Glue page texts together in page order. The table rows never span a page
/// break, so nothing is inserted between pages.
fn join_pages(pages: Vec<String>) -> String {
    pages.concat()
}

fn read_pages(data: &[u8]) -> Result<Vec<String>, TideError> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }))
    .map_err(|_| TideError::Pdf("text extraction aborted on a malformed tide table".into()))?
    .map_err(|e| TideError::Pdf(format!("cannot read tide table text: {e}")))
}
