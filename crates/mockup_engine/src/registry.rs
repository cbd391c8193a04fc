use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use studio_logging::studio_warn;

use crate::ImageHandle;

/// Image bytes plus the MIME type they were registered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub bytes: Arc<Vec<u8>>,
    pub mime: String,
}

/// Owner of every image byte buffer in the application. Handles stand in for
/// the browser's object URLs: a finite resource that must be released exactly
/// once when the staged file, preview or result that owns it goes away.
#[derive(Debug, Default)]
pub struct ImageRegistry {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_handle: u64,
    images: HashMap<u64, StoredImage>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, bytes: Vec<u8>, mime: impl Into<String>) -> ImageHandle {
        let mut inner = self.inner.lock().expect("image registry lock");
        inner.next_handle += 1;
        let handle = ImageHandle(inner.next_handle);
        inner.images.insert(
            handle.0,
            StoredImage {
                bytes: Arc::new(bytes),
                mime: mime.into(),
            },
        );
        handle
    }

    pub fn image(&self, handle: ImageHandle) -> Option<StoredImage> {
        let inner = self.inner.lock().expect("image registry lock");
        inner.images.get(&handle.0).cloned()
    }

    /// Frees the bytes behind `handle`. Releasing an unknown handle is a
    /// logged no-op; on the happy path every handle is released exactly once.
    pub fn release(&self, handle: ImageHandle) -> bool {
        let mut inner = self.inner.lock().expect("image registry lock");
        if inner.images.remove(&handle.0).is_some() {
            true
        } else {
            studio_warn!("release of unknown image handle {}", handle.0);
            false
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("image registry lock").images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
