use std::collections::HashMap;
use std::sync::Arc;

use studio_logging::studio_debug;

use mockup_core::ImageHandle;
use mockup_engine::ImageRegistry;

/// Lazily decoded egui textures keyed by image handle. A failed decode is
/// cached as `None` so the gallery does not retry an SVG every frame.
pub struct TextureCache {
    registry: Arc<ImageRegistry>,
    textures: HashMap<u64, Option<egui::TextureHandle>>,
}

impl TextureCache {
    pub fn new(registry: Arc<ImageRegistry>) -> Self {
        Self {
            registry,
            textures: HashMap::new(),
        }
    }

    pub fn texture(&mut self, ctx: &egui::Context, handle: ImageHandle) -> Option<egui::TextureHandle> {
        if let Some(cached) = self.textures.get(&handle.0) {
            return cached.clone();
        }

        let decoded = self
            .registry
            .image(mockup_engine::ImageHandle(handle.0))
            .and_then(|stored| decode(ctx, handle.0, &stored.bytes));
        if decoded.is_none() {
            studio_debug!("no texture for image handle {}", handle.0);
        }
        self.textures.insert(handle.0, decoded.clone());
        decoded
    }

    /// Drops the cached texture when its image handle is released.
    pub fn evict(&mut self, handle: ImageHandle) {
        self.textures.remove(&handle.0);
    }
}

fn decode(ctx: &egui::Context, key: u64, bytes: &[u8]) -> Option<egui::TextureHandle> {
    let decoded = image::load_from_memory(bytes).ok()?.into_rgba8();
    let size = [decoded.width() as usize, decoded.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, decoded.as_raw());
    Some(ctx.load_texture(
        format!("image-{key}"),
        color_image,
        egui::TextureOptions::LINEAR,
    ))
}
