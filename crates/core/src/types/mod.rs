//! Core types for Bodega.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod image;
pub mod slug;

pub use id::*;
pub use image::ImageRef;
pub use slug::{Slug, SlugError};
