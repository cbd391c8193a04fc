//! Layout constants shared by the panels.

use egui::Color32;

pub const THUMBNAIL_SIZE: f32 = 48.0;
pub const CARD_IMAGE_SIZE: f32 = 220.0;
pub const GALLERY_COLUMNS: usize = 3;
pub const DROP_TARGET_HEIGHT: f32 = 72.0;

pub const ERROR_COLOR: Color32 = Color32::from_rgb(0xd9, 0x3c, 0x3c);
pub const HINT_COLOR: Color32 = Color32::from_gray(140);

pub fn selection_stroke() -> egui::Stroke {
    egui::Stroke::new(2.0, Color32::from_rgb(0x4a, 0x8f, 0xe7))
}

/// "2.4 MB" style size label, decimal like the browsers show it.
pub fn size_label(byte_size: u64) -> String {
    const KB: f64 = 1000.0;
    const MB: f64 = KB * 1000.0;
    let bytes = byte_size as f64;
    if bytes >= MB {
        format!("{:.1} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{byte_size} B")
    }
}

#[cfg(test)]
mod tests {
    use super::size_label;

    #[test]
    fn size_label_picks_the_right_unit() {
        assert_eq!(size_label(512), "512 B");
        assert_eq!(size_label(2_400), "2.4 KB");
        assert_eq!(size_label(2_400_000), "2.4 MB");
    }
}
