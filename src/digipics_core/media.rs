use std::path::Path;

/// Picture file extensions accepted for import (lowercase).
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Return the lowercased extension of `path` if it names a supported picture.
///
/// Only the name is inspected; whether the path is a regular file is the
/// caller's concern.
pub fn picture_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Extension used in the collection. There is no reason to keep `jpeg`.
pub fn normalize_extension(ext: &str) -> &str {
    match ext {
        "jpeg" => "jpg",
        other => other,
    }
}
