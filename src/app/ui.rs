use super::DocProcessorApp;
use crate::upload::FileResult;
use crate::utils::display::{format_size, key_values_text};
use eframe::egui::{self, Color32, RichText};
use tracing::warn;

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 50, 50);
const ACCENT_COLOR: Color32 = Color32::from_rgb(0, 123, 255);

impl DocProcessorApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(16.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Document Processor with OCR + AI Prompt");
                        ui.label(
                            RichText::new(format!("Endpoint: {}", self.endpoint_label))
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });
                    ui.add_space(16.0);

                    self.render_form(ui);
                    ui.add_space(12.0);
                    self.render_actions(ui);

                    if let Some(error) = self.state.last_error() {
                        ui.add_space(12.0);
                        ui.vertical_centered(|ui| {
                            ui.colored_label(ERROR_COLOR, RichText::new(error).strong());
                        });
                    }

                    if self.state.results().is_some() {
                        ui.add_space(20.0);
                        self.render_results(ui);
                    }
                    ui.add_space(20.0);
                });
        });
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        let busy = self.state.is_submitting();

        ui.group(|ui| {
            ui.label(RichText::new("Document Type (used to save/reuse prompt):").strong());
            let mut document_type = self.state.document_type().to_string();
            let edit = egui::TextEdit::singleline(&mut document_type)
                .hint_text("e.g. Invoice, Contract")
                .desired_width(f32::INFINITY);
            if ui.add_enabled(!busy, edit).changed() {
                self.state.set_document_type(document_type);
            }
        });

        ui.add_space(12.0);

        ui.group(|ui| {
            ui.label(RichText::new("Select PNG, TIFF, JPG or JPEG files:").strong());
            ui.horizontal(|ui| {
                if ui.add_enabled(!busy, egui::Button::new("📁 Select Files")).clicked() {
                    self.pick_files();
                }
                if ui.add_enabled(!busy, egui::Button::new("📂 Add Folder")).clicked() {
                    self.add_folder();
                }
            });
            ui.label(
                RichText::new("You can also drop files onto the window.")
                    .small()
                    .color(ui.visuals().text_color().gamma_multiply(0.7)),
            );

            let mut remove = None;
            for (idx, file) in self.state.selected_files().iter().enumerate() {
                ui.horizontal(|ui| {
                    if ui.add_enabled(!busy, egui::Button::new("✖").small()).clicked() {
                        remove = Some(idx);
                    }
                    match file.size_hint() {
                        Some(size) => ui.label(format!("{} ({})", file.name, format_size(size))),
                        None => ui.label(&file.name),
                    };
                });
            }
            if let Some(idx) = remove {
                self.state.remove_file(idx);
            }
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        let busy = self.state.is_submitting();

        ui.vertical_centered(|ui| {
            let label = if busy { "Processing..." } else { "Upload & Process" };
            let button = egui::Button::new(RichText::new(label).size(18.0))
                .min_size(egui::vec2(220.0, 40.0));
            if ui.add_enabled(!busy, button).clicked() {
                self.start_upload();
            }

            if busy {
                ui.add_space(6.0);
                ui.spinner();
            } else if ui.button("🗑 Clear").clicked() {
                self.state.reset();
            }
        });
    }

    fn render_results(&self, ui: &mut egui::Ui) {
        let Some(results) = self.state.results() else {
            return;
        };

        ui.group(|ui| {
            ui.heading(format!(
                "Results for Document Type: \"{}\"",
                self.state.document_type().trim()
            ));
            if results.is_empty() {
                ui.label("The processor returned no files.");
            }

            for (idx, result) in results.iter().enumerate() {
                ui.add_space(12.0);
                self.render_file_result(ui, idx, result);
                ui.separator();
            }
        });
    }

    fn render_file_result(&self, ui: &mut egui::Ui, idx: usize, result: &FileResult) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&result.file_name).heading());
            if let Some(path) = self.state.local_path_for(&result.file_name) {
                if ui.small_button("Open").clicked() {
                    if let Err(e) = open::that(path) {
                        warn!("could not open {}: {}", path.display(), e);
                    }
                }
            }
        });

        ui.label(RichText::new("Extracted Text (OCR):").strong());
        egui::ScrollArea::vertical()
            .id_source(("ocr", idx))
            .max_height(180.0)
            .show(ui, |ui| {
                read_only_block(ui, &result.extracted_text);
            });

        ui.add_space(6.0);
        ui.label(
            RichText::new(format!("AI-Generated Prompt {}:", result.prompt_label()))
                .strong()
                .color(ACCENT_COLOR),
        );
        read_only_block(ui, &result.prompt);

        ui.add_space(6.0);
        ui.label(RichText::new("Extracted Key-Value Pairs:").strong());
        read_only_block(ui, &key_values_text(&result.key_values));
    }
}

/// Selectable, non-editable monospace text.
fn read_only_block(ui: &mut egui::Ui, text: &str) {
    let mut text = text;
    ui.add(
        egui::TextEdit::multiline(&mut text)
            .code_editor()
            .desired_rows(1)
            .desired_width(f32::INFINITY),
    );
}
