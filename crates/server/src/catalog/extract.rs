//! PDF text extraction.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while extracting catalog text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF could not be parsed.
    #[error("failed to extract text from PDF: {0}")]
    Pdf(String),
}

/// Extract the plain text of every page of a PDF, joined with blank lines.
///
/// Pages that yield no extractable text contribute nothing (no placeholder).
/// A document with zero extractable text returns an empty string; that is not
/// an error by itself. Extraction is CPU-bound, so the parse runs on the
/// blocking thread pool.
///
/// # Errors
///
/// Returns `ExtractError` if the file cannot be read or the PDF is corrupt.
pub async fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let bytes = tokio::fs::read(path).await?;

    let raw = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| ExtractError::Pdf(format!("extraction task failed: {e}")))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    Ok(join_pages(&raw))
}

/// Join per-page text with blank-line separators.
///
/// `pdf-extract` returns the whole document as one string with form feeds
/// (`\x0C`) between pages; empty pages are dropped.
fn join_pages(raw: &str) -> String {
    raw.split('\x0C')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_blank_line_separator() {
        let raw = "page one\x0Cpage two\x0Cpage three";
        assert_eq!(join_pages(raw), "page one\n\npage two\n\npage three");
    }

    #[test]
    fn test_join_pages_drops_empty_pages() {
        let raw = "page one\x0C   \x0Cpage three";
        assert_eq!(join_pages(raw), "page one\n\npage three");
    }

    #[test]
    fn test_join_pages_all_empty_is_empty_string() {
        assert_eq!(join_pages("\x0C \x0C"), "");
        assert_eq!(join_pages(""), "");
    }

    #[test]
    fn test_join_pages_single_page() {
        assert_eq!(join_pages("  only page  "), "only page");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = extract_text(Path::new("/nonexistent/catalog.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_pdf_error() {
        let dir = std::env::temp_dir().join("bodega-extract-test");
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("not-a-pdf.pdf");
        std::fs::write(&path, b"this is not a pdf").expect("write");

        let err = extract_text(&path).await.unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));

        let _ = std::fs::remove_file(&path);
    }
}
