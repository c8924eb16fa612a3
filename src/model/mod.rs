//! Domain model types (pure).
//!
//! Identifiers, content snapshots, the thumbnail provider boundary, preview
//! key actions and the error taxonomy. Nothing here knows about layout.

pub mod content;
pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod thumbnail;

// Re-export for convenience
pub use content::{Content, ContentElement};
pub use error::{AppError, StripError};
pub use identifiers::StoryId;
pub use key_action::KeyAction;
pub use thumbnail::{LetterThumbnail, Thumbnail, ThumbnailImage, ThumbnailRef, UpdateCallback};
