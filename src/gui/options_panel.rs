//! Options Panel Widget
//! Left side panel with the global chart options and actions.

use crate::charts::{ChartKind, ChartOptions};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Left side panel holding the chart options, the global actions and
/// the status line.
pub struct OptionsPanel {
    pub options: ChartOptions,
    pub status: String,
    /// Path of the most recently saved chart, if any.
    pub last_output: Option<PathBuf>,
}

impl Default for OptionsPanel {
    fn default() -> Self {
        Self {
            options: ChartOptions::default(),
            status: "Ready".to_string(),
            last_output: None,
        }
    }
}

impl OptionsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> OptionsPanelAction {
        let mut action = OptionsPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 PlotPad")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Dataset entry & chart export")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Chart Options Section =====
        ui.label(RichText::new("⚙ Chart Options").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 90.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Title:"));
            ui.text_edit_singleline(&mut self.options.title);
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Chart type:"));
            ComboBox::from_id_salt("chart_kind")
                .width(170.0)
                .selected_text(self.options.kind.display_name())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::ALL {
                        ui.selectable_value(&mut self.options.kind, kind, kind.display_name());
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("X axis label:"));
            ui.text_edit_singleline(&mut self.options.x_label);
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Y axis label:"));
            ui.text_edit_singleline(&mut self.options.y_label);
        });

        ui.add_space(5.0);

        ui.checkbox(&mut self.options.show_data_labels, "Show data point labels");

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let add_button = egui::Button::new(RichText::new("➕ Add dataset").size(14.0))
                .min_size(egui::vec2(180.0, 30.0));
            if ui.add(add_button).clicked() {
                action = OptionsPanelAction::AddDataset;
            }

            ui.add_space(8.0);

            let draw_button = egui::Button::new(RichText::new("▶ Draw chart").size(16.0))
                .min_size(egui::vec2(180.0, 35.0));
            if ui.add(draw_button).clicked() {
                action = OptionsPanelAction::DrawChart;
            }

            ui.add_space(8.0);

            ui.add_enabled_ui(self.last_output.is_some(), |ui| {
                let open_button = egui::Button::new(RichText::new("🖼 Open saved image").size(13.0))
                    .min_size(egui::vec2(160.0, 28.0));
                if ui.add(open_button).clicked() {
                    action = OptionsPanelAction::OpenLastImage;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("saved") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set the status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by the options panel
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsPanelAction {
    None,
    AddDataset,
    DrawChart,
    OpenLastImage,
}
