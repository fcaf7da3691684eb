mod client;
pub mod request;
pub mod selection;
mod types;
mod validate;

pub use client::{map_response, DocumentProcessor, HttpProcessor};
pub use types::{FileHandle, FileResult, FileSource, KeyValues, SubmissionRequest};
pub use validate::validate;
