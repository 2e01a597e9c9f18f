//! Image blob keys, media URLs and admin previews.
//!
//! Image files live in a path-addressed blob store. A stored reference is a
//! relative key such as `places/0b7c...e1.jpg`; it becomes a URL by joining it
//! onto the configured media URL prefix.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Key prefix under which all place images are stored.
pub const IMAGE_KEY_PREFIX: &str = "places/";

/// Default public URL prefix for stored media.
pub const DEFAULT_MEDIA_URL: &str = "/media/";

/// Extensions accepted for uploaded images (lowercase).
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Preview text shown when an image reference is empty.
pub const NO_IMAGE_PLACEHOLDER: &str = "No image";

/// Height in pixels of the admin preview thumbnail.
pub const PREVIEW_HEIGHT_PX: u32 = 100;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Extract and validate the lowercase extension of an uploaded filename.
pub fn image_extension(filename: &str) -> Result<String, CoreError> {
    let ext = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
        _ => {
            return Err(CoreError::Validation(format!(
                "File '{filename}' has no extension"
            )))
        }
    };
    if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )))
    }
}

/// Generate a fresh, collision-free key for an image with extension `ext`.
pub fn new_image_key(ext: &str) -> String {
    format!("{IMAGE_KEY_PREFIX}{}.{ext}", uuid::Uuid::new_v4())
}

/// Ensure a key stays inside the blob store root.
///
/// Keys must be relative, `/`-separated and free of `.`/`..` segments.
pub fn validate_image_key(key: &str) -> Result<(), CoreError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.contains('\0')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if bad {
        Err(CoreError::Validation(format!("Invalid image key '{key}'")))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// URLs
// ---------------------------------------------------------------------------

/// Normalise a media URL prefix to start and end with `/`.
pub fn normalize_media_url(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Relative URL of a stored image, or `None` for an empty reference.
///
/// `prefix` must already be normalised with [`normalize_media_url`].
pub fn media_url(prefix: &str, key: &str) -> Option<String> {
    if key.is_empty() {
        None
    } else {
        Some(format!("{prefix}{}", key.trim_start_matches('/')))
    }
}

/// Admin preview for an image: an `<img>` tag, or the placeholder text.
pub fn preview_html(url: Option<&str>) -> String {
    match url {
        Some(url) => format!(
            r#"<img src="{}" height="{PREVIEW_HEIGHT_PX}" />"#,
            escape_html(url)
        ),
        None => NO_IMAGE_PLACEHOLDER.to_string(),
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(image_extension("Photo.JPG").unwrap(), "jpg");
        assert_eq!(image_extension("a.b.webp").unwrap(), "webp");
    }

    #[test]
    fn extension_rejects_unknown_or_missing() {
        assert_matches!(image_extension("notes.txt"), Err(CoreError::Validation(_)));
        assert_matches!(image_extension("noext"), Err(CoreError::Validation(_)));
        assert_matches!(image_extension(".png"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn new_keys_live_under_places_prefix() {
        let key = new_image_key("png");
        assert!(key.starts_with("places/"));
        assert!(key.ends_with(".png"));
        assert!(validate_image_key(&key).is_ok());
        assert_ne!(key, new_image_key("png"));
    }

    #[test]
    fn key_validation_blocks_traversal() {
        assert!(validate_image_key("places/a.jpg").is_ok());
        for key in ["", "/etc/passwd", "../secret", "places/../../x", "places//a", "a\\b"] {
            assert_matches!(validate_image_key(key), Err(CoreError::Validation(_)), "{key}");
        }
    }

    #[test]
    fn media_url_prefix_normalisation() {
        assert_eq!(normalize_media_url("/media/"), "/media/");
        assert_eq!(normalize_media_url("media"), "/media/");
        assert_eq!(normalize_media_url("/static/media"), "/static/media/");
        assert_eq!(normalize_media_url(""), "/");
    }

    #[test]
    fn media_url_joins_key() {
        assert_eq!(
            media_url("/media/", "places/a.jpg").as_deref(),
            Some("/media/places/a.jpg")
        );
        assert_eq!(media_url("/media/", ""), None);
    }

    #[test]
    fn preview_renders_img_or_placeholder() {
        assert_eq!(
            preview_html(Some("/media/places/a.jpg")),
            r#"<img src="/media/places/a.jpg" height="100" />"#
        );
        assert_eq!(preview_html(None), NO_IMAGE_PLACEHOLDER);
    }

    #[test]
    fn preview_escapes_url() {
        assert_eq!(
            preview_html(Some(r#"/media/"x"<y>.jpg"#)),
            r#"<img src="/media/&quot;x&quot;&lt;y&gt;.jpg" height="100" />"#
        );
    }
}
