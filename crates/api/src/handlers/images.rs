//! Handlers for staged product images (PRD-06/PRD-07).
//!
//! The staged artifact is a file, so acceptance is a small pipeline:
//! catalog row, file copy, thumbnails, staging-row flip, staged-file
//! cleanup. Failures roll back the dependent record created in the same
//! operation (an orphaned catalog row is deleted when the copy fails);
//! thumbnailing is best-effort and never aborts an accept.

use std::path::{Path as FsPath, PathBuf};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use blueboost_core::error::CoreError;
use blueboost_core::review::{sync_gate, validate_rejection_reason, ReviewOperation, SyncGate};
use blueboost_core::types::DbId;
use blueboost_db::models::image::{ProductImage, RejectImageRequest};
use blueboost_db::models::status::ReviewStatus;
use blueboost_db::repositories::{CatalogImageRepo, ProductImageRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Thumbnail variants generated for every accepted image.
const THUMBNAIL_SIZES: &[(u32, u32, &str)] = &[(98, 98, "small"), (452, 452, "home")];

/// WebP encoding quality for thumbnail variants.
const WEBP_QUALITY: f32 = 80.0;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a staged image or return `NotFound`.
async fn find_image(state: &AppState, id: DbId) -> AppResult<ProductImage> {
    ProductImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductImage",
            id,
        }))
}

/// Directory holding a product's live images.
fn live_dir(state: &AppState, product_id: DbId) -> PathBuf {
    state
        .config
        .media_dir
        .join("products")
        .join(product_id.to_string())
}

/// Remove a file, tracing instead of failing when it is already gone.
async fn remove_file_best_effort(path: &FsPath, what: &str) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove {what}");
        }
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/products/{product_id}/images
pub async fn list_product_images(
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rows = ProductImageRepo::list_by_product(&state.pool, product_id).await?;
    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// Accept
// ---------------------------------------------------------------------------

/// POST /api/v1/images/{id}/accept
///
/// Moves a staged image into the live catalog:
/// 1. the staged file must still exist;
/// 2. a catalog row is created (position = highest + 1, cover only when
///    the product has none);
/// 3. the file is copied into catalog storage -- a copy failure deletes
///    the just-created catalog row;
/// 4. thumbnails (JPEG + WebP per configured size) are generated
///    best-effort;
/// 5. the staging row flips to accepted with the catalog image id;
/// 6. the staged file is removed.
pub async fn accept_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let image = find_image(&state, id).await?;

    if image.status_id != ReviewStatus::Pending.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Only pending images can be accepted".into(),
        )));
    }

    let staged = state.config.staging_dir.join(&image.filename);
    if !tokio::fs::try_exists(&staged).await.unwrap_or(false) {
        return Err(AppError::Core(CoreError::Validation(
            "Staged image file is missing; the image cannot be accepted".into(),
        )));
    }

    // Step 1: catalog record.
    let catalog_image =
        CatalogImageRepo::create(&state.pool, image.product_id, &image.filename).await?;

    // Step 2: copy into catalog storage; roll back the record on failure.
    let dir = live_dir(&state, image.product_id);
    let live_path = dir.join(&image.filename);
    let copy_result = async {
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::copy(&staged, &live_path).await?;
        Ok::<_, std::io::Error>(())
    }
    .await;

    if let Err(e) = copy_result {
        if let Err(rollback_err) = CatalogImageRepo::delete(&state.pool, catalog_image.id).await {
            tracing::error!(
                catalog_image_id = catalog_image.id,
                error = %rollback_err,
                "Failed to roll back catalog image after copy failure",
            );
        }
        return Err(AppError::InternalError(format!(
            "Failed to copy image into catalog storage: {e}"
        )));
    }

    // Step 3: thumbnails, best-effort.
    let thumb_source = live_path.clone();
    let thumb_dir = dir.clone();
    let stem = image
        .filename
        .rsplit_once('.')
        .map(|(stem, _)| stem.to_string())
        .unwrap_or_else(|| image.filename.clone());
    let thumb_result =
        tokio::task::spawn_blocking(move || generate_thumbnails(&thumb_source, &thumb_dir, &stem))
            .await;
    match thumb_result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::warn!(image_id = id, error = %e, "Thumbnail generation failed; accept continues");
        }
        Err(e) => {
            tracing::warn!(image_id = id, error = %e, "Thumbnail task panicked; accept continues");
        }
    }

    // Step 4: flip the staging row, then drop the staged file.
    ProductImageRepo::accept(&state.pool, id, catalog_image.id).await?;
    remove_file_best_effort(&staged, "staged image file").await;

    tracing::info!(
        image_id = id,
        catalog_image_id = catalog_image.id,
        product_id = image.product_id,
        cover = catalog_image.cover,
        "Image accepted into catalog",
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "id": id,
            "status": "accepted",
            "catalog_image_id": catalog_image.id,
            "cover": catalog_image.cover,
            "position": catalog_image.position,
        }),
    }))
}

// ---------------------------------------------------------------------------
// Reject
// ---------------------------------------------------------------------------

/// POST /api/v1/images/{id}/reject
///
/// For generated images the rejection is reported to the remote API by
/// prompt id, and that sync must succeed before the staged file is
/// deleted and the row flips. The row itself is retained with the
/// reason.
pub async fn reject_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectImageRequest>,
) -> AppResult<impl IntoResponse> {
    let image = find_image(&state, id).await?;

    if image.status_id != ReviewStatus::Pending.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Only pending images can be rejected".into(),
        )));
    }

    validate_rejection_reason(input.reason.as_deref()).map_err(AppError::Core)?;

    if let Some(prompt_id) = image.prompt_id {
        let result = state
            .gateway
            .reject_image(prompt_id, input.reason.as_deref())
            .await;
        if let Err(e) = result {
            match sync_gate(ReviewOperation::Reject) {
                SyncGate::Strict => return Err(e.into()),
                SyncGate::BestEffort => {
                    tracing::warn!(image_id = id, error = %e, "Image rejection sync failed");
                }
            }
        }
    }

    let staged = state.config.staging_dir.join(&image.filename);
    remove_file_best_effort(&staged, "staged image file").await;

    ProductImageRepo::reject(&state.pool, id, input.reason.as_deref()).await?;
    tracing::info!(image_id = id, "Image rejected");

    Ok(Json(DataResponse {
        data: serde_json::json!({ "id": id, "status": "rejected" }),
    }))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/v1/images/{id}
///
/// Deleting an accepted image also removes its live catalog record and
/// file; any still-staged file is removed too.
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let image = find_image(&state, id).await?;

    if let Some(catalog_image_id) = image.catalog_image_id {
        if let Some(catalog_image) = CatalogImageRepo::find_by_id(&state.pool, catalog_image_id).await? {
            let live = live_dir(&state, image.product_id).join(&catalog_image.filename);
            remove_file_best_effort(&live, "live image file").await;
            CatalogImageRepo::delete(&state.pool, catalog_image_id).await?;
        }
    }

    let staged = state.config.staging_dir.join(&image.filename);
    remove_file_best_effort(&staged, "staged image file").await;

    ProductImageRepo::delete(&state.pool, id).await?;
    tracing::info!(image_id = id, "Image deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Thumbnails
// ---------------------------------------------------------------------------

/// Generate JPEG and WebP thumbnail variants next to the live image.
///
/// Runs on the blocking pool; decoding and re-encoding are CPU-bound.
fn generate_thumbnails(source: &FsPath, dir: &FsPath, stem: &str) -> Result<(), String> {
    let img = image::open(source).map_err(|e| format!("decode: {e}"))?;

    for (width, height, name) in THUMBNAIL_SIZES {
        let thumb = img.thumbnail(*width, *height);

        let jpeg_path = dir.join(format!("{stem}-{name}.jpg"));
        thumb
            .to_rgb8()
            .save_with_format(&jpeg_path, image::ImageFormat::Jpeg)
            .map_err(|e| format!("{name} jpeg: {e}"))?;

        let rgba = thumb.to_rgba8();
        let encoded = webp::Encoder::from_rgba(&rgba, thumb.width(), thumb.height())
            .encode(WEBP_QUALITY);
        let webp_path = dir.join(format!("{stem}-{name}.webp"));
        std::fs::write(&webp_path, &*encoded).map_err(|e| format!("{name} webp: {e}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnails_are_written_for_each_size() {
        let dir = std::env::temp_dir().join(format!("blueboost-thumb-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let source = dir.join("source.png");
        image::RgbaImage::from_pixel(640, 480, image::Rgba([10, 20, 30, 255]))
            .save_with_format(&source, image::ImageFormat::Png)
            .unwrap();

        generate_thumbnails(&source, &dir, "source").unwrap();

        for (_, _, name) in THUMBNAIL_SIZES {
            assert!(dir.join(format!("source-{name}.jpg")).exists());
            assert!(dir.join(format!("source-{name}.webp")).exists());
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn thumbnail_generation_fails_on_missing_source() {
        let missing = std::env::temp_dir().join("blueboost-no-such-file.png");
        let err = generate_thumbnails(&missing, &std::env::temp_dir(), "x").unwrap_err();
        assert!(err.starts_with("decode:"));
    }
}
