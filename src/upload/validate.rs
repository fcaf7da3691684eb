use super::types::{FileHandle, SubmissionRequest};
use crate::error::ValidationError;

/// Checks the form. The document type is checked before the file list.
pub fn validate(document_type: &str, files: &[FileHandle]) -> Result<(), ValidationError> {
    if document_type.trim().is_empty() {
        return Err(ValidationError::MissingDocumentType);
    }
    if files.is_empty() {
        return Err(ValidationError::NoFiles);
    }
    Ok(())
}

impl SubmissionRequest {
    pub fn new(document_type: &str, files: &[FileHandle]) -> Result<Self, ValidationError> {
        validate(document_type, files)?;
        Ok(Self {
            document_type: document_type.trim().to_string(),
            files: files.to_vec(),
        })
    }
}
