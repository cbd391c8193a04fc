use crate::{FailureKind, StoredImage};

/// A finished composite: design applied onto one T-shirt photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// The compositing seam. The simulated run loop drives this exactly the way
/// a real backend would be driven: one cancellable call per unit of work,
/// whose completion yields one result.
#[async_trait::async_trait]
pub trait Compositor: Send + Sync {
    async fn compose(
        &self,
        design: &StoredImage,
        mockup: &StoredImage,
    ) -> Result<ComposedImage, FailureKind>;
}

/// Stand-in compositor: ignores its inputs and returns a fixed placeholder
/// image for every result. Deterministic so tests can rely on the output
/// bytes.
#[derive(Debug, Default)]
pub struct PlaceholderCompositor;

// Smallest valid PNG: 1x1, RGBA, transparent.
const PLACEHOLDER_PNG: [u8; 67] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // signature
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15,
    0xC4, 0x89, //
    0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, // IDAT
    0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, //
    0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82, // IEND
];

#[async_trait::async_trait]
impl Compositor for PlaceholderCompositor {
    async fn compose(
        &self,
        _design: &StoredImage,
        _mockup: &StoredImage,
    ) -> Result<ComposedImage, FailureKind> {
        Ok(ComposedImage {
            bytes: PLACEHOLDER_PNG.to_vec(),
            mime: "image/png".to_string(),
        })
    }
}
