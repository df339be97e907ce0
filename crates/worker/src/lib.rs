//! Background processing for generation jobs (PRD-04).
//!
//! The dispatcher claims pending jobs from the database and runs them
//! through the processor, which calls the remote API and persists the
//! produced artifacts as staged review rows.

pub mod artifacts;
pub mod dispatcher;
pub mod processor;

pub use dispatcher::JobDispatcher;
pub use processor::{JobProcessor, ProcessOutcome};
