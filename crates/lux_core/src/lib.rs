//! LUX Core - textures consumed by the scattering materials.
//!
//! This crate provides:
//!
//! - **`Texture`**: a pure `(u, v, p) -> Color` lookup shared between materials
//! - **Procedural textures**: `SolidColor`, `CheckerTexture`
//! - **Image textures**: `ImageTexture` backed by a decoded, linearized image
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lux_core::{CheckerTexture, Color, Texture};
//!
//! let checker = CheckerTexture::from_colors(0.32, Color::new(0.2, 0.3, 0.1), Color::splat(0.9));
//! let shared: Arc<dyn Texture> = Arc::new(checker);
//! ```

pub mod texture;

// Re-export commonly used types
pub use texture::{
    CheckerTexture, Color, ImageData, ImageTexture, SolidColor, Texture, TextureError,
    TextureResult,
};
