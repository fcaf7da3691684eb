use anyhow::{anyhow, Result};
use docproc_uploader::{logger, Config, DocProcessorApp, HttpProcessor};
use eframe::CreationContext;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    logger::init();

    let config = Config::from_env();
    info!(
        "processing endpoint {} (timeout {:?})",
        config.endpoint_url, config.request_timeout
    );

    // Uploads run here; the UI thread only polls for their outcome.
    let runtime = tokio::runtime::Runtime::new()?;
    let processor = Arc::new(HttpProcessor::new(&config));
    let handle = runtime.handle().clone();
    let endpoint = config.endpoint_url.clone();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Document Processor",
        options,
        Box::new(move |_cc: &CreationContext| {
            Box::new(DocProcessorApp::new(processor, handle, endpoint))
        }),
    )
    .map_err(|e| anyhow!("failed to start the UI: {e}"))?;

    runtime.shutdown_background();
    Ok(())
}
