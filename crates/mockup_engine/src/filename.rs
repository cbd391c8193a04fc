use crate::MockupId;

/// Output filename for one saved result: `mockup-<id>.<ext>`.
pub fn mockup_filename(id: MockupId, mime: &str) -> String {
    format!("mockup-{id}.{ext}", ext = extension_for_mime(mime))
}

/// File extension for the MIME types the intakes accept. Anything else
/// gets a generic extension rather than an invented one.
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/svg+xml" => "svg",
        _ => "bin",
    }
}
