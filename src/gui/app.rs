//! PlotPad Main Application
//! Main window wiring the options panel, the dataset editor and the
//! chart preview, and running the draw-chart pipeline.

use crate::charts::{ChartPreview, StaticChartRenderer};
use crate::data::collect_records;
use crate::gui::{DatasetEditor, OptionsPanel, OptionsPanelAction};
use egui::SidePanel;

/// Pixel size of the preview texture built after each render.
const PREVIEW_SIZE: (u32, u32) = (1000, 700);

/// Which picture the preview strip shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PreviewMode {
    Live,
    LastRender,
}

/// Main application window.
pub struct PlotPadApp {
    options_panel: OptionsPanel,
    dataset_editor: DatasetEditor,
    preview_mode: PreviewMode,
    render_texture: Option<egui::TextureHandle>,
}

impl PlotPadApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            options_panel: OptionsPanel::new(),
            dataset_editor: DatasetEditor::new(),
            preview_mode: PreviewMode::Live,
            render_texture: None,
        }
    }

    /// Collect the form, report issues, render and save.
    fn handle_draw_chart(&mut self, ctx: &egui::Context) {
        let options = self.options_panel.options.clone();
        log::info!("drawing {} chart", options.kind.display_name());

        let (records, issues) = collect_records(&self.dataset_editor.form, options.kind);

        // One modal error dialog per excluded dataset; the render
        // still runs with whatever survived.
        for issue in &issues {
            let _ = rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Error")
                .set_description(issue.to_string())
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
        }

        match StaticChartRenderer::render(&options, &records) {
            Ok(path) => {
                let file = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());

                self.update_render_texture(ctx);
                self.options_panel.last_output = Some(path);
                self.options_panel
                    .set_status(&format!("Chart saved as {file}"));

                let _ = rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Info)
                    .set_title("Chart saved")
                    .set_description(format!("The chart has been saved as {file}."))
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
            Err(e) => {
                log::error!("render failed: {e:#}");
                self.options_panel.set_status(&format!("Error: {e}"));

                let _ = rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Error")
                    .set_description(format!("Drawing the chart failed: {e}"))
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
        }
    }

    /// Rebuild the last-render texture from the saved chart picture.
    fn update_render_texture(&mut self, ctx: &egui::Context) {
        let options = &self.options_panel.options;
        let (records, _) = collect_records(&self.dataset_editor.form, options.kind);
        let (width, height) = PREVIEW_SIZE;

        match StaticChartRenderer::render_to_rgb(options, &records, width, height) {
            Ok(rgb) => {
                let image =
                    egui::ColorImage::from_rgb([width as usize, height as usize], &rgb);
                self.render_texture =
                    Some(ctx.load_texture("last_render", image, egui::TextureOptions::LINEAR));
                self.preview_mode = PreviewMode::LastRender;
            }
            Err(e) => log::error!("preview texture render failed: {e:#}"),
        }
    }

    fn handle_open_last_image(&mut self) {
        let Some(path) = self.options_panel.last_output.clone() else {
            return;
        };
        if let Err(e) = open::that(&path) {
            log::error!("could not open {}: {e}", path.display());
            self.options_panel
                .set_status(&format!("Error: could not open {}", path.display()));
        }
    }

    fn show_preview(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.preview_mode, PreviewMode::Live, "Live preview");
            ui.selectable_value(
                &mut self.preview_mode,
                PreviewMode::LastRender,
                "Last render",
            );
        });
        ui.add_space(4.0);

        match self.preview_mode {
            PreviewMode::Live => {
                let options = &self.options_panel.options;
                // Issues are only surfaced on an explicit draw; the
                // live view just skips what cannot be resolved yet.
                let (records, _) = collect_records(&self.dataset_editor.form, options.kind);
                ChartPreview::show(ui, options, &records);
            }
            PreviewMode::LastRender => match &self.render_texture {
                Some(texture) => {
                    ui.add(
                        egui::Image::new(texture)
                            .max_size(ui.available_size())
                            .maintain_aspect_ratio(true),
                    );
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label("No chart rendered yet");
                    });
                }
            },
        }
    }
}

impl eframe::App for PlotPadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - chart options and actions
        SidePanel::left("options_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.options_panel.show(ui);

                    match action {
                        OptionsPanelAction::AddDataset => {
                            self.dataset_editor.form.add_dataset();
                        }
                        OptionsPanelAction::DrawChart => self.handle_draw_chart(ctx),
                        OptionsPanelAction::OpenLastImage => self.handle_open_last_image(),
                        OptionsPanelAction::None => {}
                    }
                });
            });

        // Central panel - dataset editor on top, preview below
        egui::CentralPanel::default().show(ctx, |ui| {
            let editor_height = ui.available_height() * 0.55;
            ui.allocate_ui(egui::vec2(ui.available_width(), editor_height), |ui| {
                ui.set_min_height(editor_height);
                self.dataset_editor.show(ui);
            });

            ui.separator();
            self.show_preview(ui);
        });
    }
}
