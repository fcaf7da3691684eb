use crate::error::{SubmitRejected, UploadError};
use crate::upload::{DocumentProcessor, FileHandle, FileResult, SubmissionRequest};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// The form and whatever the last submission produced.
///
/// `results` and `last_error` are never both set. Edits are ignored while a
/// submission is in flight, and every accepted edit drops stale output.
#[derive(Debug, Default)]
pub struct WorkflowState {
    document_type: String,
    selected_files: Vec<FileHandle>,
    phase: Phase,
    last_error: Option<String>,
    results: Option<Vec<FileResult>>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    pub fn selected_files(&self) -> &[FileHandle] {
        &self.selected_files
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn results(&self) -> Option<&[FileResult]> {
        self.results.as_deref()
    }

    /// Local path of the selected file a result belongs to.
    ///
    /// `None` when the name is ambiguous (several selected files share it) or
    /// the file has no path on disk.
    pub fn local_path_for(&self, file_name: &str) -> Option<&Path> {
        let mut matches = self.selected_files.iter().filter(|f| f.name == file_name);
        let file = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        file.path()
    }

    /// Returns whether the edit was applied.
    pub fn set_document_type(&mut self, document_type: impl Into<String>) -> bool {
        if !self.accept_edit("document type") {
            return false;
        }
        self.document_type = document_type.into();
        true
    }

    /// Replaces the selection. Returns whether the edit was applied.
    pub fn set_files(&mut self, files: Vec<FileHandle>) -> bool {
        if !self.accept_edit("file selection") {
            return false;
        }
        self.selected_files = files;
        true
    }

    pub fn add_files(&mut self, files: impl IntoIterator<Item = FileHandle>) -> bool {
        if !self.accept_edit("file selection") {
            return false;
        }
        self.selected_files.extend(files);
        true
    }

    pub fn remove_file(&mut self, index: usize) -> bool {
        if index >= self.selected_files.len() || !self.accept_edit("file selection") {
            return false;
        }
        self.selected_files.remove(index);
        true
    }

    /// Empties the whole form.
    pub fn reset(&mut self) -> bool {
        if !self.accept_edit("form reset") {
            return false;
        }
        self.document_type.clear();
        self.selected_files.clear();
        true
    }

    fn accept_edit(&mut self, what: &str) -> bool {
        if self.is_submitting() {
            debug!("ignoring {} edit while a submission is in flight", what);
            return false;
        }
        self.clear_output();
        self.phase = Phase::Idle;
        true
    }

    fn clear_output(&mut self) {
        self.results = None;
        self.last_error = None;
    }

    /// Validates and enters `Submitting`. The caller must send exactly one
    /// request for the returned submission and hand its outcome to [`settle`].
    ///
    /// Invalid input moves to `Failed` with the validation message.
    ///
    /// [`settle`]: WorkflowState::settle
    pub fn begin_submit(&mut self) -> Result<SubmissionRequest, SubmitRejected> {
        if self.is_submitting() {
            warn!("submission rejected: one is already in flight");
            return Err(SubmitRejected::InFlight);
        }

        let request = match SubmissionRequest::new(&self.document_type, &self.selected_files) {
            Ok(request) => request,
            Err(e) => {
                info!("submission rejected: {}", e);
                self.results = None;
                self.last_error = Some(e.to_string());
                self.phase = Phase::Failed;
                return Err(e.into());
            }
        };

        self.clear_output();
        self.phase = Phase::Submitting;
        info!(
            "submitting {} file(s) as '{}'",
            request.files().len(),
            request.document_type()
        );
        Ok(request)
    }

    /// Applies the outcome of the in-flight submission. Ignored when nothing is in flight.
    pub fn settle(&mut self, outcome: Result<Vec<FileResult>, UploadError>) {
        if !self.is_submitting() {
            warn!("discarding an upload outcome with no submission in flight");
            return;
        }

        match outcome {
            Ok(files) => {
                info!("submission succeeded with {} result(s)", files.len());
                self.last_error = None;
                self.results = Some(files);
                self.phase = Phase::Succeeded;
            }
            Err(e) => {
                warn!("submission failed: {}", e);
                self.results = None;
                self.last_error = Some(e.user_message());
                self.phase = Phase::Failed;
            }
        }
    }

    /// Runs one full submission against `processor` and returns the settled phase.
    pub async fn submit<P>(&mut self, processor: &P) -> Result<Phase, SubmitRejected>
    where
        P: DocumentProcessor + ?Sized,
    {
        let request = self.begin_submit()?;
        let outcome = processor.process(request).await;
        self.settle(outcome);
        Ok(self.phase)
    }
}
