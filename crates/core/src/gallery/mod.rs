//! Auto-advancing image gallery.
//!
//! - [`Gallery`]: the synchronous state machine, a fixed image list and a
//!   current index with wraparound navigation.
//! - [`AutoAdvance`]: the one-shot auto-advance schedule, rearmed from the
//!   last index change.
//! - [`Carousel`]: a tokio task that owns a gallery and its schedule for
//!   the lifetime of a view and publishes [`GallerySnapshot`]s.
//!
//! Operations on an empty gallery are no-ops, never errors: a gallery with
//! nothing to show renders nothing.

mod carousel;
mod timer;

use std::time::Duration;

use serde::Serialize;

use crate::error::CoreError;

pub use carousel::Carousel;
pub use timer::AutoAdvance;

/// Delay between automatic advances when none is configured.
pub const DEFAULT_AUTO_SLIDE_INTERVAL: Duration = Duration::from_millis(3000);

// ---------------------------------------------------------------------------
// GalleryState
// ---------------------------------------------------------------------------

/// Where the gallery is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum GalleryState {
    /// No images; nothing is displayed.
    Idle,
    /// Showing the image at this index.
    Displaying(usize),
}

impl GalleryState {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Displaying(index) => Some(index),
        }
    }
}

/// What a rendering layer needs to paint the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GallerySnapshot {
    pub state: GalleryState,
    pub is_auto_advancing: bool,
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// A fixed, ordered list of images and the index currently on display.
///
/// Invariant: `current_index < images.len()` whenever `images` is non-empty.
#[derive(Debug, Clone)]
pub struct Gallery<T> {
    images: Vec<T>,
    current_index: usize,
}

impl<T> Gallery<T> {
    /// Create a gallery showing the first image.
    pub fn new(images: Vec<T>) -> Self {
        Self {
            images,
            current_index: 0,
        }
    }

    pub fn images(&self) -> &[T] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn state(&self) -> GalleryState {
        if self.images.is_empty() {
            GalleryState::Idle
        } else {
            GalleryState::Displaying(self.current_index)
        }
    }

    /// Index on display, `None` for an empty gallery.
    pub fn current_index(&self) -> Option<usize> {
        self.state().index()
    }

    /// Image on display, `None` for an empty gallery.
    pub fn current(&self) -> Option<&T> {
        self.images.get(self.current_index)
    }

    /// Advance one image, wrapping from the last back to the first.
    ///
    /// Returns the new index, or `None` (and does nothing) when empty.
    pub fn next(&mut self) -> Option<usize> {
        let len = self.images.len();
        if len == 0 {
            return None;
        }
        self.current_index = (self.current_index + 1) % len;
        Some(self.current_index)
    }

    /// Step back one image, wrapping from the first to the last.
    ///
    /// Returns the new index, or `None` (and does nothing) when empty.
    pub fn previous(&mut self) -> Option<usize> {
        let len = self.images.len();
        if len == 0 {
            return None;
        }
        self.current_index = (self.current_index + len - 1) % len;
        Some(self.current_index)
    }

    /// Jump straight to `index`.
    ///
    /// On an empty gallery this is a no-op returning `Ok(None)`. An index
    /// past the end fails with [`CoreError::OutOfRange`] and leaves the
    /// current index untouched.
    pub fn go_to(&mut self, index: usize) -> Result<Option<usize>, CoreError> {
        let len = self.images.len();
        if len == 0 {
            return Ok(None);
        }
        if index >= len {
            return Err(CoreError::OutOfRange { index, len });
        }
        self.current_index = index;
        Ok(Some(index))
    }

    /// Whether there is anywhere for an automatic advance to go.
    pub(crate) fn can_advance(&self) -> bool {
        self.images.len() > 1
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
