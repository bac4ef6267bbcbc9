//! Content-type hints and the previewable subset.

/// Content-type hint for any extension the vault accepts.
///
/// Used when serving downloads; unknown extensions fall back to a generic
/// byte stream at the transport layer.
pub fn content_type_for(ext: &str) -> Option<&'static str> {
    let hint = match ext.to_ascii_lowercase().as_str() {
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => return None,
    };
    Some(hint)
}

/// Content-type hint if the extension is in the previewable subset.
///
/// Only image and PDF types render inline; everything else must go through
/// download.
pub fn preview_content_type(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" | "jpg" | "jpeg" | "pdf" => content_type_for(ext),
        _ => None,
    }
}
