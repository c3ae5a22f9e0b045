//! Uploaded asset handling.
//!
//! Every store owns one directory `{upload_root}/{slug}/` holding its logo,
//! catalog and product images. Filenames are sanitized before they touch the
//! filesystem or the database.

use std::path::{Path, PathBuf};

use bodega_core::Slug;
use thiserror::Error;

/// Errors that can occur while saving an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The client-supplied filename has no usable characters.
    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),

    /// Filesystem error.
    #[error("upload I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sanitize a client-supplied filename.
///
/// Strips any path components, then keeps only `[A-Za-z0-9._-]`, mapping
/// whitespace to underscores and dropping everything else. Returns `None`
/// when nothing usable remains (empty, dot-only, ...).
#[must_use]
pub fn sanitize_filename(name: &str) -> Option<String> {
    // Take the last path component; uploads must never escape the store dir.
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);

    let mut out = String::with_capacity(base.len());
    for c in base.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c);
        } else if c.is_whitespace() {
            out.push('_');
        }
    }

    let trimmed = out.trim_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_owned())
}

/// The asset directory for a store.
#[must_use]
pub fn store_dir(upload_root: &Path, slug: &Slug) -> PathBuf {
    upload_root.join(slug.as_str())
}

/// Save an uploaded file into a store's asset directory.
///
/// Creates the directory if needed and returns the sanitized filename that
/// was stored (the name to persist in the database).
///
/// # Errors
///
/// Returns `UploadError::InvalidFilename` if the filename sanitizes to
/// nothing, or `UploadError::Io` if the write fails.
pub async fn save_upload(
    upload_root: &Path,
    slug: &Slug,
    filename: &str,
    bytes: &[u8],
) -> Result<String, UploadError> {
    let stored_name = sanitize_filename(filename)
        .ok_or_else(|| UploadError::InvalidFilename(filename.to_owned()))?;

    let dir = store_dir(upload_root, slug);
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(&stored_name), bytes).await?;

    Ok(stored_name)
}

/// Remove a store's asset directory.
///
/// Used to clean up after a store insert fails once files were already
/// written; a missing directory is not an error.
pub async fn remove_store_dir(upload_root: &Path, slug: &Slug) {
    let dir = store_dir(upload_root, slug);
    if let Err(err) = tokio::fs::remove_dir_all(&dir).await
        && err.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!(dir = %dir.display(), error = %err, "failed to remove store dir");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("logo.png").as_deref(), Some("logo.png"));
        assert_eq!(
            sanitize_filename("My Catalog 2026.pdf").as_deref(),
            Some("My_Catalog_2026.pdf")
        );
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(
            sanitize_filename("../../etc/passwd").as_deref(),
            Some("passwd")
        );
        assert_eq!(
            sanitize_filename("C:\\Users\\x\\logo.png").as_deref(),
            Some("logo.png")
        );
    }

    #[test]
    fn test_sanitize_drops_unusable_names() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("..."), None);
        assert_eq!(sanitize_filename("¡¡¡"), None);
    }

    #[tokio::test]
    async fn test_save_and_remove_roundtrip() {
        let root = std::env::temp_dir().join(format!("bodega-uploads-{}", std::process::id()));
        let slug = Slug::from_name("Acme Shop");

        let stored = save_upload(&root, &slug, "logo.png", b"png-bytes")
            .await
            .unwrap();
        assert_eq!(stored, "logo.png");

        let on_disk = tokio::fs::read(root.join("acme-shop").join("logo.png"))
            .await
            .unwrap();
        assert_eq!(on_disk, b"png-bytes");

        remove_store_dir(&root, &slug).await;
        assert!(!root.join("acme-shop").exists());

        // Removing again is a no-op.
        remove_store_dir(&root, &slug).await;

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
