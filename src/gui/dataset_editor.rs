//! Dataset Editor Widget
//! Scrollable central area where datasets and their point rows are
//! added, edited and deleted.
//!
//! Row mutations are collected as actions during the immediate-mode
//! pass and applied afterwards, so the form tree is never edited
//! while it is being iterated.

use crate::data::{ChartForm, EntryId};
use egui::{Color32, RichText, ScrollArea};

/// Starting value handed to the color button when a dataset gets its
/// first explicit color.
const INITIAL_PICK: Color32 = Color32::from_rgb(100, 149, 237);

/// Deferred edits emitted while drawing the rows.
enum EditorAction {
    AddPoint(EntryId),
    RemoveDataset(EntryId),
    RemovePoint(EntryId, EntryId),
    SetColor(EntryId, Color32),
    ClearColor(EntryId),
}

/// Owns the form tree and draws it as editable rows.
pub struct DatasetEditor {
    pub form: ChartForm,
}

impl Default for DatasetEditor {
    fn default() -> Self {
        Self {
            form: ChartForm::new(),
        }
    }
}

impl DatasetEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the editor
    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.form.datasets.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("No datasets yet - use \"Add dataset\" to start")
                        .size(15.0)
                        .color(Color32::GRAY),
                );
            });
            return;
        }

        let mut actions: Vec<EditorAction> = Vec::new();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for dataset in &mut self.form.datasets {
                    let dataset_id = dataset.id;

                    egui::Frame::none()
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .rounding(6.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            // Dataset header row
                            ui.horizontal(|ui| {
                                ui.label("Label:");
                                ui.add(
                                    egui::TextEdit::singleline(&mut dataset.label)
                                        .desired_width(140.0),
                                );

                                ui.add_space(8.0);
                                ui.label("Color:");
                                match dataset.color {
                                    Some(color) => {
                                        let mut edited = color;
                                        if ui.color_edit_button_srgba(&mut edited).changed() {
                                            actions
                                                .push(EditorAction::SetColor(dataset_id, edited));
                                        }
                                        if ui
                                            .small_button("↺")
                                            .on_hover_text("Use the chart default color")
                                            .clicked()
                                        {
                                            actions.push(EditorAction::ClearColor(dataset_id));
                                        }
                                    }
                                    None => {
                                        if ui.button("Pick color").clicked() {
                                            actions.push(EditorAction::SetColor(
                                                dataset_id,
                                                INITIAL_PICK,
                                            ));
                                        }
                                    }
                                }

                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.button("🗑 Delete dataset").clicked() {
                                            actions
                                                .push(EditorAction::RemoveDataset(dataset_id));
                                        }
                                        if ui.button("➕ Add point").clicked() {
                                            actions.push(EditorAction::AddPoint(dataset_id));
                                        }
                                    },
                                );
                            });

                            // Point rows
                            for (i, point) in dataset.points.iter_mut().enumerate() {
                                ui.horizontal(|ui| {
                                    ui.add_space(24.0);
                                    ui.label(
                                        RichText::new(format!("{}.", i + 1))
                                            .size(11.0)
                                            .color(Color32::GRAY),
                                    );
                                    ui.label("X:");
                                    ui.add(
                                        egui::TextEdit::singleline(&mut point.x)
                                            .desired_width(70.0),
                                    );
                                    ui.label("Y:");
                                    ui.add(
                                        egui::TextEdit::singleline(&mut point.y)
                                            .desired_width(70.0),
                                    );
                                    if ui.small_button("✖").clicked() {
                                        actions
                                            .push(EditorAction::RemovePoint(dataset_id, point.id));
                                    }
                                });
                            }
                        });

                    ui.add_space(8.0);
                }
            });

        for action in actions {
            match action {
                EditorAction::AddPoint(dataset) => {
                    self.form.add_point(dataset);
                }
                EditorAction::RemoveDataset(dataset) => self.form.remove_dataset(dataset),
                EditorAction::RemovePoint(dataset, point) => {
                    self.form.remove_point(dataset, point)
                }
                EditorAction::SetColor(dataset, color) => {
                    if let Some(ds) = self.form.dataset_mut(dataset) {
                        ds.color = Some(color);
                    }
                }
                EditorAction::ClearColor(dataset) => {
                    if let Some(ds) = self.form.dataset_mut(dataset) {
                        ds.color = None;
                    }
                }
            }
        }
    }
}
