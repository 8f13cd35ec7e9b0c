//! Chart Preview Module
//! Live egui_plot rendering of the current form, mirroring whichever
//! chart kind is selected. The saved PNG comes from the static
//! renderer; this view tracks edits as they are typed.

use crate::charts::{ChartKind, ChartOptions, SeriesRecord};
use crate::stats::{CubicSpline, LinearFit};
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

/// Sample count for the previewed smooth curve, matching the export.
const PREVIEW_SAMPLES: usize = 100;

/// Draws the interactive preview plot.
pub struct ChartPreview;

impl ChartPreview {
    /// Series color: the dataset's chosen color or the kind default.
    fn series_color(record: &SeriesRecord, kind: ChartKind) -> Color32 {
        let (r, g, b) = record.color.unwrap_or_else(|| kind.default_color());
        Color32::from_rgb(r, g, b)
    }

    fn series_name(record: &SeriesRecord, index: usize) -> String {
        record
            .label
            .clone()
            .unwrap_or_else(|| format!("Series {}", index + 1))
    }

    /// Draw the preview for the current options and records.
    pub fn show(ui: &mut egui::Ui, options: &ChartOptions, records: &[SeriesRecord]) {
        Plot::new("chart_preview")
            .height(ui.available_height().max(180.0))
            .x_axis_label(options.x_label.clone())
            .y_axis_label(options.y_label.clone())
            .legend(Legend::default())
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for (i, record) in records.iter().enumerate() {
                    let color = Self::series_color(record, options.kind);
                    let name = Self::series_name(record, i);

                    match options.kind {
                        ChartKind::Line => {
                            Self::marked_line(plot_ui, record, color, &name);
                        }
                        ChartKind::Regression => {
                            Self::scatter_with_fit(plot_ui, record, color, &name);
                        }
                        ChartKind::Smoothed => {
                            Self::smooth_curve(plot_ui, record, color, &name, options);
                        }
                    }

                    if options.show_data_labels && options.kind != ChartKind::Smoothed {
                        Self::point_texts(plot_ui, record);
                    }
                }
            });
    }

    fn marked_line(
        plot_ui: &mut egui_plot::PlotUi,
        record: &SeriesRecord,
        color: Color32,
        name: &str,
    ) {
        let pts: Vec<[f64; 2]> = record.points().map(|(x, y)| [x, y]).collect();
        plot_ui.line(
            Line::new(PlotPoints::from(pts.clone()))
                .color(color)
                .width(2.0)
                .name(name),
        );
        plot_ui.points(
            Points::new(PlotPoints::from(pts))
                .radius(3.5)
                .color(color)
                .name(name),
        );
    }

    fn scatter_with_fit(
        plot_ui: &mut egui_plot::PlotUi,
        record: &SeriesRecord,
        color: Color32,
        name: &str,
    ) {
        let pts: Vec<[f64; 2]> = record.points().map(|(x, y)| [x, y]).collect();
        plot_ui.points(
            Points::new(PlotPoints::from(pts))
                .radius(3.5)
                .color(color)
                .name(name),
        );

        // Fit trace at the original x positions, like the export.
        let fit = LinearFit::fit(&record.xs, &record.ys);
        let fit_pts: Vec<[f64; 2]> = record.xs.iter().map(|&x| [x, fit.evaluate(x)]).collect();
        plot_ui.line(
            Line::new(PlotPoints::from(fit_pts))
                .color(color)
                .width(1.5)
                .style(egui_plot::LineStyle::dashed_loose())
                .name(name),
        );
    }

    fn smooth_curve(
        plot_ui: &mut egui_plot::PlotUi,
        record: &SeriesRecord,
        color: Color32,
        name: &str,
        options: &ChartOptions,
    ) {
        let mut sorted: Vec<(f64, f64)> = record.points().collect();
        sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let xs: Vec<f64> = sorted.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = sorted.iter().map(|p| p.1).collect();

        // Datasets the spline rejects fall back to their raw points,
        // so there is still something to look at while typing.
        match CubicSpline::natural(&xs, &ys) {
            Ok(spline) => {
                let curve: Vec<[f64; 2]> = spline
                    .resample(PREVIEW_SAMPLES)
                    .into_iter()
                    .map(|(x, y)| [x, y])
                    .collect();
                plot_ui.line(
                    Line::new(PlotPoints::from(curve))
                        .color(color)
                        .width(2.0)
                        .name(name),
                );

                if options.show_data_labels {
                    let pts: Vec<[f64; 2]> = sorted.iter().map(|&(x, y)| [x, y]).collect();
                    plot_ui.points(
                        Points::new(PlotPoints::from(pts))
                            .radius(3.5)
                            .color(color)
                            .name(name),
                    );
                    Self::point_texts(plot_ui, record);
                }
            }
            Err(_) => {
                let pts: Vec<[f64; 2]> = sorted.iter().map(|&(x, y)| [x, y]).collect();
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .radius(3.5)
                        .color(color)
                        .name(name),
                );
            }
        }
    }

    fn point_texts(plot_ui: &mut egui_plot::PlotUi, record: &SeriesRecord) {
        for (x, y) in record.points() {
            plot_ui.text(Text::new(PlotPoint::new(x, y), format!("({x}, {y})")));
        }
    }
}
