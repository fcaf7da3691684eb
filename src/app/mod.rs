mod state;
mod ui;

use crate::error::UploadError;
use crate::upload::{selection, DocumentProcessor, FileResult};
use derivative::Derivative;
use eframe::{egui, App};
pub use state::{Phase, WorkflowState};
use std::sync::mpsc::{self as std_mpsc, Receiver};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info};

type Outcome = Result<Vec<FileResult>, UploadError>;

/// Desktop front end. Owns the workflow state on the UI thread; the one
/// in-flight upload runs on the tokio runtime and reports back over a channel.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct DocProcessorApp {
    state: WorkflowState,
    #[derivative(Debug = "ignore")]
    processor: Arc<dyn DocumentProcessor>,
    #[derivative(Debug = "ignore")]
    runtime: Handle,
    #[derivative(Debug = "ignore")]
    outcome_receiver: Option<Receiver<Outcome>>,
    endpoint_label: String,
}

impl DocProcessorApp {
    pub fn new(
        processor: Arc<dyn DocumentProcessor>,
        runtime: Handle,
        endpoint_label: impl Into<String>,
    ) -> Self {
        Self {
            state: WorkflowState::new(),
            processor,
            runtime,
            outcome_receiver: None,
            endpoint_label: endpoint_label.into(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut WorkflowState {
        &mut self.state
    }

    /// Validates the form and dispatches the upload. Does nothing while one is in flight.
    pub fn start_upload(&mut self) {
        let request = match self.state.begin_submit() {
            Ok(request) => request,
            Err(e) => {
                debug!("upload not started: {}", e);
                return;
            }
        };

        let (sender, receiver) = std_mpsc::channel();
        self.outcome_receiver = Some(receiver);

        let processor = Arc::clone(&self.processor);
        self.runtime.spawn(async move {
            let outcome = processor.process(request).await;
            // The receiver only goes away with the app itself.
            let _ = sender.send(outcome);
        });
    }

    /// Drains a finished upload into the state. Returns whether anything changed.
    pub fn update_state(&mut self) -> bool {
        let Some(receiver) = &self.outcome_receiver else {
            return false;
        };

        match receiver.try_recv() {
            Ok(outcome) => {
                self.outcome_receiver = None;
                self.state.settle(outcome);
                true
            }
            Err(std_mpsc::TryRecvError::Empty) => false,
            Err(std_mpsc::TryRecvError::Disconnected) => {
                self.outcome_receiver = None;
                self.state.settle(Err(UploadError::Unknown));
                true
            }
        }
    }

    pub fn pick_files(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", &selection::ACCEPTED_EXTENSIONS)
            .pick_files()
        {
            info!("selected {} file(s)", paths.len());
            self.state.set_files(
                paths
                    .into_iter()
                    .map(crate::upload::FileHandle::from_path)
                    .collect(),
            );
        }
    }

    pub fn add_folder(&mut self) {
        if let Some(folder) = rfd::FileDialog::new().pick_folder() {
            let files = selection::collect_from_folder(&folder);
            info!("adding {} image(s) from {}", files.len(), folder.display());
            self.state.add_files(files);
        }
    }

    fn take_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        let files: Vec<_> = dropped
            .into_iter()
            .filter_map(|file| selection::from_dropped(&file.name, file.path, file.bytes))
            .collect();
        if !files.is_empty() {
            info!("{} file(s) dropped", files.len());
            self.state.add_files(files);
        }
    }
}

impl App for DocProcessorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.update_state() {
            ctx.request_repaint();
        }
        self.take_dropped_files(ctx);
        self.render(ctx);

        if self.state.is_submitting() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
