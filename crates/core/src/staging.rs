//! Staged-image naming and extension rules (PRD-06).
//!
//! Generated images land in a shared staging directory before review.
//! There is no locking on that directory; filenames embed the product id,
//! a random component, and a timestamp so concurrent jobs cannot collide.
//! Only raster image extensions are ever written there.

use rand::Rng;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// File extensions allowed in the staging directory.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Map a generation response's mime type to a staging file extension.
pub fn extension_for_mime(mime_type: &str) -> Result<&'static str, CoreError> {
    match mime_type {
        "image/jpeg" | "image/jpg" => Ok("jpg"),
        "image/png" => Ok("png"),
        "image/webp" => Ok("webp"),
        other => Err(CoreError::Validation(format!(
            "Unsupported image mime type '{other}'"
        ))),
    }
}

/// Validate that a staged filename carries an allowed extension.
pub fn validate_extension(filename: &str) -> Result<(), CoreError> {
    let ext = filename
        .rsplit('.')
        .next()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "File extension of '{filename}' is not an allowed image type"
        )))
    }
}

/// Build a staging filename: `product_<id>_<uniq>_<unix-ts>.<ext>`.
pub fn staged_filename(product_id: DbId, now: Timestamp, extension: &str) -> String {
    let uniq: u64 = rand::rng().random();
    format!(
        "product_{product_id}_{uniq:016x}_{}.{extension}",
        now.timestamp()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn mime_mapping() {
        assert_eq!(extension_for_mime("image/jpeg").unwrap(), "jpg");
        assert_eq!(extension_for_mime("image/png").unwrap(), "png");
        assert_eq!(extension_for_mime("image/webp").unwrap(), "webp");
        assert!(extension_for_mime("image/svg+xml").is_err());
        assert!(extension_for_mime("text/html").is_err());
    }

    #[test]
    fn extension_validation() {
        assert!(validate_extension("a.jpg").is_ok());
        assert!(validate_extension("a.PNG").is_ok());
        assert!(validate_extension("a.php").is_err());
        assert!(validate_extension("no-extension").is_err());
    }

    #[test]
    fn staged_filename_shape() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let name = staged_filename(5, now, "png");
        assert!(name.starts_with("product_5_"));
        assert!(name.ends_with(&format!("_{}.png", now.timestamp())));
        validate_extension(&name).unwrap();
    }

    #[test]
    fn staged_filenames_do_not_collide() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let a = staged_filename(5, now, "png");
        let b = staged_filename(5, now, "png");
        assert_ne!(a, b);
    }
}
