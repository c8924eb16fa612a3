//! Thumbnail provider boundary.
//!
//! Thumbnails are owned by the host application. The engine holds shared
//! handles, subscribes once per item for readiness notifications, and asks
//! for a raster at a size hint when painting.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Raster produced by a thumbnail provider.
///
/// The terminal renderer paints thumbnails as a colored block with
/// initials, so the raster is reduced to exactly that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailImage {
    /// Size the raster was produced for.
    pub size: i32,
    /// Up to two characters drawn inside the circle.
    pub initials: String,
    /// Fill color as RGB.
    pub color: (u8, u8, u8),
    /// Whether the real image is available yet.
    pub ready: bool,
}

/// Callback invoked when a thumbnail finishes loading.
pub type UpdateCallback = Box<dyn Fn()>;

/// Externally managed thumbnail image state.
pub trait Thumbnail: fmt::Debug {
    /// Raster at the requested size.
    fn image(&self, size: i32) -> ThumbnailImage;

    /// Register a callback fired whenever the image changes.
    fn subscribe_to_updates(&self, callback: UpdateCallback);
}

/// Shared, non-owning handle to a thumbnail provider.
pub type ThumbnailRef = Rc<dyn Thumbnail>;

/// Thumbnail that renders initials over a color derived from the name.
///
/// Starts as a placeholder; [`LetterThumbnail::mark_ready`] simulates the
/// image finishing its download and notifies every subscriber.
pub struct LetterThumbnail {
    name: String,
    ready: Cell<bool>,
    subscribers: RefCell<Vec<UpdateCallback>>,
}

impl LetterThumbnail {
    /// Create a placeholder thumbnail for a display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ready: Cell::new(false),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Create a thumbnail already wrapped in a shared handle.
    pub fn shared(name: impl Into<String>) -> ThumbnailRef {
        Rc::new(Self::new(name))
    }

    /// Mark the image loaded and notify subscribers.
    pub fn mark_ready(&self) {
        self.ready.set(true);
        for callback in self.subscribers.borrow().iter() {
            callback();
        }
    }

    /// Whether [`LetterThumbnail::mark_ready`] was called.
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// Number of registered update callbacks.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }

    fn color(&self) -> (u8, u8, u8) {
        // FNV-1a over the name keeps colors stable between runs.
        let hash = self
            .name
            .bytes()
            .fold(0x811c_9dc5_u32, |acc, byte| {
                (acc ^ u32::from(byte)).wrapping_mul(0x0100_0193)
            });
        let [r, g, b, _] = hash.to_le_bytes();
        (r / 2 + 64, g / 2 + 64, b / 2 + 64)
    }
}

impl fmt::Debug for LetterThumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LetterThumbnail")
            .field("name", &self.name)
            .field("ready", &self.ready.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl Thumbnail for LetterThumbnail {
    fn image(&self, size: i32) -> ThumbnailImage {
        ThumbnailImage {
            size,
            initials: self.initials(),
            color: self.color(),
            ready: self.ready.get(),
        }
    }

    fn subscribe_to_updates(&self, callback: UpdateCallback) {
        self.subscribers.borrow_mut().push(callback);
    }
}
