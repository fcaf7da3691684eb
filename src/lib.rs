//! Desktop client for a batch document processor.
//!
//! The user names a document type and picks images; the client uploads them
//! in one multipart request and shows, per file, the OCR text, the extraction
//! prompt (new or reused) and the extracted key-value pairs.
//!
//! - `upload` validates input, builds the request and maps the response
//! - `app` holds the workflow state machine and the egui front end
//! - `utils` formats results for display

pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod upload;
pub mod utils;

pub use app::{DocProcessorApp, Phase, WorkflowState};
pub use config::Config;
pub use error::{ErrorKind, SubmitRejected, UploadError, ValidationError};
pub use upload::{DocumentProcessor, FileHandle, FileResult, HttpProcessor, KeyValues};
