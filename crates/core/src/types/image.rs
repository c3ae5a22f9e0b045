//! Product image reference.

use serde::{Deserialize, Serialize};
use url::Url;

use super::slug::Slug;

/// Reference to a product image.
///
/// A product may carry a locally uploaded file, an external URL, both, or
/// neither. When both are set the local filename wins; that rule is encoded
/// here once so every endpoint resolves images identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Filename of an uploaded image under the owning store's asset directory.
    pub file: Option<String>,
    /// Absolute external image URL.
    pub url: Option<String>,
}

impl ImageRef {
    /// An empty reference (no image).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            file: None,
            url: None,
        }
    }

    /// Reference a locally uploaded file.
    #[must_use]
    pub const fn local(file: String) -> Self {
        Self {
            file: Some(file),
            url: None,
        }
    }

    /// Reference an external URL.
    #[must_use]
    pub const fn external(url: String) -> Self {
        Self {
            file: None,
            url: Some(url),
        }
    }

    /// True if neither a file nor a URL is set.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.file.is_none() && self.url.is_none()
    }

    /// Resolve the client-facing image URL for a product owned by `slug`.
    ///
    /// A local filename resolves to `/uploads/{slug}/{filename}` and takes
    /// precedence over an external URL. An external URL is returned verbatim.
    /// Returns `None` when no image is set.
    #[must_use]
    pub fn resolve(&self, slug: &Slug) -> Option<String> {
        if let Some(file) = &self.file {
            return Some(format!("/uploads/{slug}/{file}"));
        }
        self.url.clone()
    }

    /// True if `candidate` is an absolute http(s) URL.
    ///
    /// Used to validate external image URLs on input; relative paths and
    /// other schemes are rejected.
    #[must_use]
    pub fn is_external_url(candidate: &str) -> bool {
        Url::parse(candidate)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false)
    }
}
