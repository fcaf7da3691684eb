use super::types::{FileSource, SubmissionRequest};
use crate::error::UploadError;
use reqwest::multipart::{Form, Part};
use tracing::debug;

/// Multipart field shared by every uploaded file.
pub const FILES_FIELD: &str = "files";
pub const DOCUMENT_TYPE_FIELD: &str = "documentType";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    File {
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
    Text(String),
}

/// One multipart entry, before it is handed to reqwest.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub value: FieldValue,
}

/// Reads every file and lays out the form: files in selection order, then the document type.
///
/// No extension filtering happens here; whatever was selected is sent.
pub async fn build_fields(request: &SubmissionRequest) -> Result<Vec<FormField>, UploadError> {
    let mut fields = Vec::with_capacity(request.files().len() + 1);

    for file in request.files() {
        let bytes = match &file.source {
            FileSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| UploadError::ReadFile {
                        name: file.name.clone(),
                        source,
                    })?
            }
            FileSource::Memory(bytes) => bytes.to_vec(),
        };
        let mime = mime_guess::from_path(&file.name)
            .first_or_octet_stream()
            .to_string();
        debug!("adding {} ({} bytes, {})", file.name, bytes.len(), mime);

        fields.push(FormField {
            name: FILES_FIELD,
            value: FieldValue::File {
                file_name: file.name.clone(),
                mime,
                bytes,
            },
        });
    }

    fields.push(FormField {
        name: DOCUMENT_TYPE_FIELD,
        value: FieldValue::Text(request.document_type().to_string()),
    });

    Ok(fields)
}

pub fn into_form(fields: Vec<FormField>) -> Result<Form, UploadError> {
    let mut form = Form::new();
    for field in fields {
        form = match field.value {
            FieldValue::File {
                file_name,
                mime,
                bytes,
            } => {
                let part = Part::bytes(bytes).file_name(file_name).mime_str(&mime)?;
                form.part(field.name, part)
            }
            FieldValue::Text(text) => form.text(field.name, text),
        };
    }
    Ok(form)
}

pub async fn build_form(request: &SubmissionRequest) -> Result<Form, UploadError> {
    into_form(build_fields(request).await?)
}
