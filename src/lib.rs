//! Thumbforge generates batches of identity-locked YouTube/Reel thumbnails
//! through the Gemini image API: upload reference photos, pick a style, and
//! fan out four parallel variations per press.

pub mod config;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod logger;
pub mod models;
pub mod studio;

pub use config::GeminiConfig;
pub use error::{Result, StudioError};
pub use gemini::{GeminiClient, ImageClient};
pub use generation::{BatchGenerator, ImageModelTrait, VARIATIONS};
pub use studio::{GalleryView, StudioAction, StudioState, ThumbnailStudio};
