//! Persistence of generated artifacts (PRD-06).
//!
//! Text artifacts become staged review rows; image artifacts additionally
//! land as files in the staging directory before their row is written, so
//! a pending row always points at an existing file.

use std::path::Path;

use base64::Engine;
use blueboost_core::error::CoreError;
use blueboost_core::staging::{extension_for_mime, staged_filename};
use blueboost_core::types::DbId;
use blueboost_gateway::generation::GeneratedImage;

/// Decode a generated image and write it into the staging directory.
///
/// Returns the staging-relative filename. The directory is created on
/// first use; filenames are randomized so concurrent jobs cannot collide.
pub async fn write_staged_image(
    staging_dir: &Path,
    product_id: DbId,
    image: &GeneratedImage,
) -> Result<String, CoreError> {
    let extension = extension_for_mime(&image.mime_type)?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(image.base64.as_bytes())
        .map_err(|e| CoreError::Validation(format!("Invalid base64 image payload: {e}")))?;
    if bytes.is_empty() {
        return Err(CoreError::Validation("Empty image payload".to_string()));
    }

    tokio::fs::create_dir_all(staging_dir)
        .await
        .map_err(|e| CoreError::Internal(format!("Cannot create staging directory: {e}")))?;

    let filename = staged_filename(product_id, chrono::Utc::now(), extension);
    let path = staging_dir.join(&filename);
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| CoreError::Internal(format!("Cannot write staged image: {e}")))?;

    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_image() -> GeneratedImage {
        // 1x1 transparent PNG.
        GeneratedImage {
            base64: "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==".to_string(),
            mime_type: "image/png".to_string(),
            index: 0,
        }
    }

    #[tokio::test]
    async fn writes_decoded_file_into_staging_dir() {
        let dir = tempfile::tempdir().unwrap();
        let filename = write_staged_image(dir.path(), 5, &png_image()).await.unwrap();

        assert!(filename.starts_with("product_5_"));
        assert!(filename.ends_with(".png"));
        let written = std::fs::read(dir.path().join(&filename)).unwrap();
        assert_eq!(&written[1..4], &b"PNG"[..]);
    }

    #[tokio::test]
    async fn rejects_invalid_base64() {
        let dir = tempfile::tempdir().unwrap();
        let image = GeneratedImage {
            base64: "%%%not-base64%%%".to_string(),
            mime_type: "image/png".to_string(),
            index: 0,
        };
        let err = write_staged_image(dir.path(), 5, &image).await.unwrap_err();
        assert!(err.to_string().contains("base64"));
    }

    #[tokio::test]
    async fn rejects_unsupported_mime_type() {
        let dir = tempfile::tempdir().unwrap();
        let image = GeneratedImage {
            base64: "aGk=".to_string(),
            mime_type: "image/tiff".to_string(),
            index: 0,
        };
        assert!(write_staged_image(dir.path(), 5, &image).await.is_err());
    }

    #[tokio::test]
    async fn creates_missing_staging_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("staging").join("generated");
        let filename = write_staged_image(&nested, 9, &png_image()).await.unwrap();
        assert!(nested.join(filename).exists());
    }
}
