pub mod category_faqs;
pub mod contents;
pub mod credits;
pub mod images;
pub mod jobs;
pub mod logs;
pub mod product_faqs;
pub mod prompts;
