//! Generation job processor (PRD-04).
//!
//! One job is processed in a single pass: claim, decode parameters, call
//! the remote API, persist artifacts, land in a terminal state. The claim
//! is an atomic conditional update, so a second `process` call for the
//! same job observes a miss and no-ops -- re-processing never duplicates
//! a remote call.
//!
//! Partial success is a completed state: per-item persistence failures
//! are embedded in `response_data` rather than failing the job, unless
//! every item failed.

use std::path::PathBuf;
use std::sync::Arc;

use blueboost_core::jobs::{
    batch_progress, decode_params, ContentJobParams, FaqJobParams, FaqTarget, ImageJobParams,
    INVALID_JOB_PARAMETERS, JOB_TYPE_CONTENT, JOB_TYPE_FAQ, JOB_TYPE_IMAGE,
};
use blueboost_core::catalog::{CategoryData, ProductData};
use blueboost_core::localized::LocalizedText;
use blueboost_core::types::{DbId, RequestContext};
use blueboost_db::models::content::CreateContent;
use blueboost_db::models::faq::CreateFaq;
use blueboost_db::models::image::CreateProductImage;
use blueboost_db::models::job::GenerationJob;
use blueboost_db::repositories::{
    CategoryFaqRepo, CategoryRepo, ContentRepo, JobRepo, ProductFaqRepo, ProductImageRepo,
    ProductRepo,
};
use blueboost_gateway::generation::{FaqGenerationData, GenerationResult};
use blueboost_gateway::RemoteApiClient;
use sqlx::PgPool;

use crate::artifacts::write_staged_image;

/// Initial label set when a job is claimed.
const LABEL_STARTING: &str = "Starting generation";

/// Label set when the remote API call is in flight.
const LABEL_CALLING: &str = "Calling generation service";

/// Label set while artifacts are persisted.
const LABEL_SAVING: &str = "Saving generated content";

/// Label on the completed job.
const LABEL_COMPLETED: &str = "Completed";

/// Outcome of a `process` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The job was claimed and driven to a terminal state.
    Processed,
    /// The job exists but was not pending; nothing was done.
    AlreadyHandled,
    /// No job with that id exists.
    NotFound,
}

/// Drives a claimed generation job to completion.
pub struct JobProcessor {
    pool: PgPool,
    gateway: Arc<RemoteApiClient>,
    staging_dir: PathBuf,
    ctx: RequestContext,
}

impl JobProcessor {
    pub fn new(
        pool: PgPool,
        gateway: Arc<RemoteApiClient>,
        staging_dir: PathBuf,
        ctx: RequestContext,
    ) -> Self {
        Self {
            pool,
            gateway,
            staging_dir,
            ctx,
        }
    }

    /// Process a specific job by id.
    ///
    /// Claims atomically; a job that is already processing or terminal is
    /// left untouched and reported as [`ProcessOutcome::AlreadyHandled`].
    pub async fn process(&self, job_id: DbId) -> Result<ProcessOutcome, sqlx::Error> {
        let Some(job) = JobRepo::claim_pending(&self.pool, job_id, LABEL_STARTING).await? else {
            return match JobRepo::find_by_id(&self.pool, job_id).await? {
                Some(job) => {
                    tracing::debug!(
                        job_id,
                        status_id = job.status_id,
                        "Job is not pending; skipping",
                    );
                    Ok(ProcessOutcome::AlreadyHandled)
                }
                None => Ok(ProcessOutcome::NotFound),
            };
        };

        self.run_claimed(job).await?;
        Ok(ProcessOutcome::Processed)
    }

    /// Run a job that has already been claimed (status = processing).
    pub async fn run_claimed(&self, job: GenerationJob) -> Result<(), sqlx::Error> {
        tracing::info!(job_id = job.id, job_type = %job.job_type, "Processing job");

        match job.job_type.as_str() {
            JOB_TYPE_FAQ => self.run_faq_job(&job).await,
            JOB_TYPE_IMAGE => self.run_image_job(&job).await,
            JOB_TYPE_CONTENT => self.run_content_job(&job).await,
            other => {
                self.fail(job.id, &format!("Unknown job type '{other}'")).await
            }
        }
    }

    /// Mark a job failed. Progress stays frozen at its last value.
    async fn fail(&self, job_id: DbId, message: &str) -> Result<(), sqlx::Error> {
        tracing::warn!(job_id, error = message, "Job failed");
        JobRepo::fail(&self.pool, job_id, message).await
    }

    // -----------------------------------------------------------------------
    // FAQ jobs
    // -----------------------------------------------------------------------

    async fn run_faq_job(&self, job: &GenerationJob) -> Result<(), sqlx::Error> {
        let params: FaqJobParams = match decode_params(&job.request_data) {
            Ok(p) => p,
            Err(_) => return self.fail(job.id, INVALID_JOB_PARAMETERS).await,
        };

        JobRepo::update_progress(&self.pool, job.id, 10, Some(LABEL_CALLING)).await?;

        let generated = match params.target {
            FaqTarget::Product(product_id) => {
                let Some(product) = ProductRepo::find_by_id(&self.pool, product_id).await? else {
                    return self
                        .fail(job.id, &format!("Product {product_id} not found"))
                        .await;
                };
                let data = match ProductData::from_localized(
                    product.id,
                    &product.name,
                    &product.description_long,
                    &product.link_rewrite,
                    self.ctx,
                ) {
                    Ok(d) => d,
                    Err(e) => return self.fail(job.id, &e.to_string()).await,
                };
                self.gateway.generate_product_faqs(params.prompt_id, &data).await
            }
            FaqTarget::Category(category_id) => {
                let Some(category) = CategoryRepo::find_by_id(&self.pool, category_id).await?
                else {
                    return self
                        .fail(job.id, &format!("Category {category_id} not found"))
                        .await;
                };
                let data = match CategoryData::from_localized(
                    category.id,
                    &category.name,
                    &category.description,
                    self.ctx,
                ) {
                    Ok(d) => d,
                    Err(e) => return self.fail(job.id, &e.to_string()).await,
                };
                self.gateway.generate_category_faqs(params.prompt_id, &data).await
            }
        };

        let result: GenerationResult<FaqGenerationData> = match generated {
            Ok(r) => r,
            Err(e) => return self.fail(job.id, &e.to_string()).await,
        };

        if result.data.main_entity.is_empty() {
            return self
                .fail(job.id, "Generation service returned no results")
                .await;
        }

        JobRepo::update_progress(&self.pool, job.id, 70, Some(LABEL_SAVING)).await?;

        let mut faq_ids: Vec<DbId> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for item in &result.data.main_entity {
            let input = CreateFaq {
                api_faq_id: item.id,
                question: LocalizedText::from_pairs([(self.ctx.language_id, item.name.clone())]),
                answer: LocalizedText::from_pairs([(
                    self.ctx.language_id,
                    item.accepted_answer.text.clone(),
                )]),
            };
            let saved = match params.target {
                FaqTarget::Product(product_id) => {
                    ProductFaqRepo::create(&self.pool, product_id, &input)
                        .await
                        .map(|row| row.id)
                }
                FaqTarget::Category(category_id) => {
                    CategoryFaqRepo::create(&self.pool, category_id, &input)
                        .await
                        .map(|row| row.id)
                }
            };
            match saved {
                Ok(id) => faq_ids.push(id),
                Err(e) => errors.push(format!("Failed to save FAQ '{}': {e}", item.name)),
            }
        }

        if faq_ids.is_empty() {
            return self.fail(job.id, &errors.join("; ")).await;
        }

        let response = serde_json::json!({ "faq_ids": faq_ids, "errors": errors });
        JobRepo::complete(&self.pool, job.id, &response, LABEL_COMPLETED).await
    }

    // -----------------------------------------------------------------------
    // Image jobs
    // -----------------------------------------------------------------------

    async fn run_image_job(&self, job: &GenerationJob) -> Result<(), sqlx::Error> {
        let params: ImageJobParams = match decode_params(&job.request_data) {
            Ok(p) => p,
            Err(_) => return self.fail(job.id, INVALID_JOB_PARAMETERS).await,
        };

        let Some(product) = ProductRepo::find_by_id(&self.pool, params.product_id).await? else {
            return self
                .fail(job.id, &format!("Product {} not found", params.product_id))
                .await;
        };
        let data = match ProductData::from_localized(
            product.id,
            &product.name,
            &product.description_long,
            &product.link_rewrite,
            self.ctx,
        ) {
            Ok(d) => d,
            Err(e) => return self.fail(job.id, &e.to_string()).await,
        };

        JobRepo::update_progress(&self.pool, job.id, 10, Some(LABEL_CALLING)).await?;

        let result = match self.gateway.generate_images(&params.prompt_ids, &data).await {
            Ok(r) => r,
            Err(e) => return self.fail(job.id, &e.to_string()).await,
        };

        if result.data.images.is_empty() {
            // Surface the first per-item error when the remote reported one.
            let message = result
                .data
                .errors
                .first()
                .map(|e| e.error.clone())
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Generation service returned no images".to_string());
            return self.fail(job.id, &message).await;
        }

        JobRepo::update_progress(&self.pool, job.id, 70, Some(LABEL_SAVING)).await?;

        let mut saved = Vec::new();
        let mut errors: Vec<String> = result
            .data
            .errors
            .iter()
            .map(|e| match e.index {
                Some(index) => format!("Image {index}: {}", e.error),
                None => e.error.clone(),
            })
            .collect();

        for image in &result.data.images {
            let filename =
                match write_staged_image(&self.staging_dir, params.product_id, image).await {
                    Ok(f) => f,
                    Err(e) => {
                        errors.push(format!("Image {}: {e}", image.index));
                        continue;
                    }
                };

            let prompt_id = usize::try_from(image.index)
                .ok()
                .and_then(|i| params.prompt_ids.get(i))
                .copied();
            let input = CreateProductImage {
                product_id: params.product_id,
                filename: filename.clone(),
                prompt_id,
            };
            match ProductImageRepo::create(&self.pool, &input).await {
                Ok(row) => saved.push(serde_json::json!({ "id": row.id, "filename": filename })),
                Err(e) => {
                    errors.push(format!("Image {}: failed to save: {e}", image.index));
                    // Leave no orphaned file behind for a row we failed to
                    // create.
                    let path = self.staging_dir.join(&filename);
                    if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                        tracing::warn!(
                            path = %path.display(),
                            error = %remove_err,
                            "Failed to remove staged file after save error",
                        );
                    }
                }
            }
        }

        if saved.is_empty() {
            return self.fail(job.id, &errors.join("; ")).await;
        }

        let response = serde_json::json!({ "images": saved, "errors": errors });
        JobRepo::complete(&self.pool, job.id, &response, LABEL_COMPLETED).await
    }

    // -----------------------------------------------------------------------
    // Content jobs (always a batch; one product is a batch of one)
    // -----------------------------------------------------------------------

    async fn run_content_job(&self, job: &GenerationJob) -> Result<(), sqlx::Error> {
        let params: ContentJobParams = match decode_params(&job.request_data) {
            Ok(p) => p,
            Err(_) => return self.fail(job.id, INVALID_JOB_PARAMETERS).await,
        };

        if params.product_ids.is_empty() {
            return self.fail(job.id, INVALID_JOB_PARAMETERS).await;
        }

        let total = params.product_ids.len();
        let mut processed_items = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        JobRepo::update_progress(&self.pool, job.id, batch_progress(0, total), Some(LABEL_CALLING))
            .await?;

        for (done, &product_id) in params.product_ids.iter().enumerate() {
            match self.generate_content_for(product_id, params.prompt_id).await? {
                Ok(content_id) => {
                    processed_items.push(serde_json::json!({
                        "product_id": product_id,
                        "content_id": content_id,
                    }));
                }
                Err(message) => errors.push(message),
            }

            let label = format!("Processed {}/{total} products", done + 1);
            JobRepo::update_progress(
                &self.pool,
                job.id,
                batch_progress(done + 1, total),
                Some(&label),
            )
            .await?;
        }

        if processed_items.is_empty() {
            return self.fail(job.id, &errors.join("; ")).await;
        }

        let response = serde_json::json!({
            "processed_items": processed_items,
            "errors": errors,
        });
        JobRepo::complete(&self.pool, job.id, &response, LABEL_COMPLETED).await
    }

    /// Generate and stage content for one batch entry.
    ///
    /// The outer `Result` is an infrastructure failure on our own
    /// database; the inner one is the per-entity outcome collected into
    /// the batch manifest.
    async fn generate_content_for(
        &self,
        product_id: DbId,
        prompt_id: DbId,
    ) -> Result<Result<DbId, String>, sqlx::Error> {
        let Some(product) = ProductRepo::find_by_id(&self.pool, product_id).await? else {
            return Ok(Err(format!("Product {product_id} not found")));
        };

        let data = match ProductData::from_localized(
            product.id,
            &product.name,
            &product.description_long,
            &product.link_rewrite,
            self.ctx,
        ) {
            Ok(d) => d,
            Err(e) => return Ok(Err(format!("Product {product_id}: {e}"))),
        };

        let result = match self.gateway.generate_content(prompt_id, &data).await {
            Ok(r) => r,
            Err(e) => return Ok(Err(format!("Product {product_id}: {e}"))),
        };

        let Some(description) = result.data.descriptions.first() else {
            return Ok(Err(format!(
                "Product {product_id}: generation service returned no description"
            )));
        };

        let long = description.description_long.clone().unwrap_or_default();
        if long.trim().is_empty() {
            return Ok(Err(format!(
                "Product {product_id}: generation service returned an empty description"
            )));
        }

        let input = CreateContent {
            api_content_id: description.id,
            generated_content: LocalizedText::from_pairs([(self.ctx.language_id, long)]),
            generated_summary: description
                .description_short
                .clone()
                .filter(|s| !s.trim().is_empty())
                .map(|s| LocalizedText::from_pairs([(self.ctx.language_id, s)])),
        };

        match ContentRepo::create(&self.pool, product_id, &input).await {
            Ok(row) => Ok(Ok(row.id)),
            Err(e) => Ok(Err(format!("Product {product_id}: failed to save: {e}"))),
        }
    }
}
