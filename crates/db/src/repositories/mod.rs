pub mod api_log_repo;
pub mod catalog_repo;
pub mod category_faq_repo;
pub mod content_repo;
pub mod credit_repo;
pub mod image_repo;
pub mod job_repo;
pub mod product_faq_repo;

pub use api_log_repo::ApiLogRepo;
pub use catalog_repo::{CatalogImageRepo, CategoryRepo, LanguageRepo, ProductRepo};
pub use category_faq_repo::CategoryFaqRepo;
pub use content_repo::ContentRepo;
pub use credit_repo::CreditRepo;
pub use image_repo::ProductImageRepo;
pub use job_repo::JobRepo;
pub use product_faq_repo::ProductFaqRepo;
