//! Static Chart Renderer
//! Draws the three chart styles with plotters and saves them as PNG.
//!
//! Drawing is generic over the backend so the same code produces the
//! saved file, the in-memory preview texture and the test images. A
//! fresh drawing area is created per render, so repeated renders never
//! accumulate state.
//!
//! Legend visibility is intentionally different per chart kind:
//! - Line: legend always drawn.
//! - Regression: legend only when show_data_labels is set and at
//!   least one record carries a label.
//! - Smoothed: legend only when show_data_labels is set.

use crate::charts::{ChartKind, ChartOptions, SeriesRecord};
use crate::stats::{CubicSpline, LinearFit};
use anyhow::{anyhow, Context, Result};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Pixel size of the saved chart images.
const CHART_SIZE: (u32, u32) = (1000, 700);

/// Sample count of the resampled smooth curve.
const SMOOTH_SAMPLES: usize = 100;

type Chart2d<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Renders the selected chart kind over resolved series records.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render into the process working directory under the kind's
    /// fixed filename. Nothing is written when drawing fails.
    pub fn render(options: &ChartOptions, records: &[SeriesRecord]) -> Result<PathBuf> {
        Self::render_into(options, records, Path::new("."))
    }

    /// Render into `dir` under the kind's fixed filename.
    pub fn render_into(
        options: &ChartOptions,
        records: &[SeriesRecord],
        dir: &Path,
    ) -> Result<PathBuf> {
        let (width, height) = CHART_SIZE;
        let rgb = Self::render_to_rgb(options, records, width, height)?;

        let path = dir.join(options.kind.output_file());
        image::save_buffer(&path, &rgb, width, height, image::ExtendedColorType::Rgb8)
            .with_context(|| format!("failed to write {}", path.display()))?;

        log::info!("saved {} ({}x{})", path.display(), width, height);
        Ok(path)
    }

    /// Render into a raw RGB buffer (3 bytes per pixel).
    pub fn render_to_rgb(
        options: &ChartOptions,
        records: &[SeriesRecord],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw(&root, options, records)?;
            root.present().map_err(|e| anyhow!("{:?}", e))?;
        }
        Ok(buffer)
    }

    /// Render and PNG-encode in memory.
    pub fn render_to_png_bytes(
        options: &ChartOptions,
        records: &[SeriesRecord],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>> {
        let rgb = Self::render_to_rgb(options, records, width, height)?;
        let img = image::RgbImage::from_raw(width, height, rgb)
            .ok_or_else(|| anyhow!("rgb buffer does not match {}x{}", width, height))?;

        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .context("png encoding failed")?;
        Ok(bytes)
    }

    /// Dispatch on the chart kind. The per-kind default color is
    /// passed explicitly so each routine's fallback stays visible at
    /// the call site.
    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        options: &ChartOptions,
        records: &[SeriesRecord],
    ) -> Result<()> {
        let default_color = Self::rgb(options.kind.default_color());
        match options.kind {
            ChartKind::Line => Self::draw_line_chart(root, options, records, default_color),
            ChartKind::Regression => {
                Self::draw_regression_chart(root, options, records, default_color)
            }
            ChartKind::Smoothed => Self::draw_smooth_chart(root, options, records, default_color),
        }
    }

    /// Marked polyline per record; legend always drawn.
    fn draw_line_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        options: &ChartOptions,
        records: &[SeriesRecord],
        default_color: RGBColor,
    ) -> Result<()> {
        let points: Vec<(f64, f64)> = records.iter().flat_map(|r| r.points()).collect();
        let (x_range, y_range) = Self::value_ranges(&points);
        let mut chart = Self::build_chart(root, options, x_range, y_range)?;

        for record in records {
            let color = Self::series_color(record, default_color);
            let pts: Vec<(f64, f64)> = record.points().collect();

            let series = chart
                .draw_series(LineSeries::new(pts.iter().copied(), color.stroke_width(2)))
                .map_err(|e| anyhow!("{:?}", e))?;
            if let Some(label) = &record.label {
                series.label(label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
            }

            Self::draw_markers(&mut chart, &pts, color)?;
            if options.show_data_labels {
                Self::draw_point_labels(&mut chart, &pts)?;
            }
        }

        Self::draw_legend(&mut chart)
    }

    /// Scatter plus dashed least-squares line per record. The fit is
    /// evaluated at the record's original x positions in entry order,
    /// not resampled; unsorted input draws a jagged trace. Legend only
    /// when show_data_labels is set and some record has a label.
    fn draw_regression_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        options: &ChartOptions,
        records: &[SeriesRecord],
        default_color: RGBColor,
    ) -> Result<()> {
        let fits: Vec<LinearFit> = records
            .iter()
            .map(|r| LinearFit::fit(&r.xs, &r.ys))
            .collect();

        // Autoscale over the raw points and the fitted values.
        let mut points: Vec<(f64, f64)> = records.iter().flat_map(|r| r.points()).collect();
        for (record, fit) in records.iter().zip(&fits) {
            points.extend(record.xs.iter().map(|&x| (x, fit.evaluate(x))));
        }
        let (x_range, y_range) = Self::value_ranges(&points);
        let mut chart = Self::build_chart(root, options, x_range, y_range)?;

        for (record, fit) in records.iter().zip(&fits) {
            let color = Self::series_color(record, default_color);
            let pts: Vec<(f64, f64)> = record.points().collect();

            let scatter = chart
                .draw_series(
                    pts.iter()
                        .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
                )
                .map_err(|e| anyhow!("{:?}", e))?;
            if let Some(label) = &record.label {
                scatter
                    .label(label.as_str())
                    .legend(move |(x, y)| Circle::new((x + 9, y), 4, color.filled()));
            }

            let fit_line = record.xs.iter().map(|&x| (x, fit.evaluate(x)));
            chart
                .draw_series(DashedLineSeries::new(fit_line, 6, 4, color.stroke_width(2)))
                .map_err(|e| anyhow!("{:?}", e))?;

            if options.show_data_labels {
                Self::draw_point_labels(&mut chart, &pts)?;
            }
        }

        if options.show_data_labels && records.iter().any(|r| r.label.is_some()) {
            Self::draw_legend(&mut chart)?;
        }
        Ok(())
    }

    /// Natural-spline curve per record, resampled at 100 x positions
    /// over the sorted data range. show_data_labels additionally
    /// scatters the original points, writes their coordinates and
    /// enables the legend; without it only the curves are drawn.
    fn draw_smooth_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        options: &ChartOptions,
        records: &[SeriesRecord],
        default_color: RGBColor,
    ) -> Result<()> {
        struct Smoothed<'a> {
            record: &'a SeriesRecord,
            sorted: Vec<(f64, f64)>,
            curve: Vec<(f64, f64)>,
        }

        let mut smoothed = Vec::with_capacity(records.len());
        for record in records {
            // Stable sort keeps duplicate-x entry order; the spline
            // then rejects duplicate knots with a clear error.
            let mut sorted: Vec<(f64, f64)> = record.points().collect();
            sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            let xs: Vec<f64> = sorted.iter().map(|p| p.0).collect();
            let ys: Vec<f64> = sorted.iter().map(|p| p.1).collect();

            let spline = CubicSpline::natural(&xs, &ys).map_err(|e| {
                anyhow!(
                    "dataset '{}': {}",
                    record.label.as_deref().unwrap_or("(unnamed)"),
                    e
                )
            })?;
            smoothed.push(Smoothed {
                record,
                sorted,
                curve: spline.resample(SMOOTH_SAMPLES),
            });
        }

        let points: Vec<(f64, f64)> = smoothed
            .iter()
            .flat_map(|s| s.curve.iter().chain(s.sorted.iter()).copied())
            .collect();
        let (x_range, y_range) = Self::value_ranges(&points);
        let mut chart = Self::build_chart(root, options, x_range, y_range)?;

        for entry in &smoothed {
            let color = Self::series_color(entry.record, default_color);

            let series = chart
                .draw_series(LineSeries::new(
                    entry.curve.iter().copied(),
                    color.stroke_width(2),
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
            if let Some(label) = &entry.record.label {
                series.label(label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
            }

            if options.show_data_labels {
                Self::draw_markers(&mut chart, &entry.sorted, color)?;
                Self::draw_point_labels(&mut chart, &entry.sorted)?;
            }
        }

        if options.show_data_labels {
            Self::draw_legend(&mut chart)?;
        }
        Ok(())
    }

    fn build_chart<'a, DB: DrawingBackend>(
        root: &'a DrawingArea<DB, Shift>,
        options: &ChartOptions,
        x_range: Range<f64>,
        y_range: Range<f64>,
    ) -> Result<Chart2d<'a, DB>> {
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

        let mut chart = ChartBuilder::on(root)
            .caption(options.title.as_str(), ("sans-serif", 28))
            .margin(12)
            .x_label_area_size(44)
            .y_label_area_size(56)
            .build_cartesian_2d(x_range, y_range)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .configure_mesh()
            .x_desc(options.x_label.as_str())
            .y_desc(options.y_label.as_str())
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        Ok(chart)
    }

    fn draw_markers<DB: DrawingBackend>(
        chart: &mut Chart2d<'_, DB>,
        pts: &[(f64, f64)],
        color: RGBColor,
    ) -> Result<()> {
        chart
            .draw_series(
                pts.iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }

    /// "(x, y)" text beside each point, anchored to its right edge.
    fn draw_point_labels<DB: DrawingBackend>(
        chart: &mut Chart2d<'_, DB>,
        pts: &[(f64, f64)],
    ) -> Result<()> {
        let style = TextStyle::from(("sans-serif", 13).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Bottom));

        chart
            .draw_series(
                pts.iter()
                    .map(|&(x, y)| Text::new(format!("({x}, {y})"), (x, y), style.clone())),
            )
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }

    fn draw_legend<'a, DB: DrawingBackend + 'a>(chart: &mut Chart2d<'a, DB>) -> Result<()> {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }

    fn series_color(record: &SeriesRecord, default_color: RGBColor) -> RGBColor {
        record
            .color
            .map(|(r, g, b)| RGBColor(r, g, b))
            .unwrap_or(default_color)
    }

    fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
        RGBColor(r, g, b)
    }

    /// Padded data ranges; an empty point set still yields a drawable
    /// frame, and a flat axis is widened so plotters accepts it.
    fn value_ranges(points: &[(f64, f64)]) -> (Range<f64>, Range<f64>) {
        if points.is_empty() {
            return (0.0..1.0, 0.0..1.0);
        }

        let pad_axis = |values: &mut dyn Iterator<Item = f64>| -> Range<f64> {
            let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
            for v in values {
                min = min.min(v);
                max = max.max(v);
            }
            if max - min < f64::EPSILON {
                return (min - 0.5)..(max + 0.5);
            }
            let pad = (max - min) * 0.05;
            (min - pad)..(max + pad)
        };

        (
            pad_axis(&mut points.iter().map(|p| p.0)),
            pad_axis(&mut points.iter().map(|p| p.1)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 4] = [137, 80, 78, 71];

    fn record(xs: &[f64], ys: &[f64], label: Option<&str>) -> SeriesRecord {
        SeriesRecord {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            label: label.map(str::to_string),
            color: None,
        }
    }

    fn options(kind: ChartKind, show_data_labels: bool) -> ChartOptions {
        ChartOptions {
            title: "Test".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            kind,
            show_data_labels,
        }
    }

    fn out_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("plotpad_render_tests").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn each_kind_saves_its_fixed_filename() {
        let records = vec![
            record(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 3.0, 6.0], Some("a")),
            record(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.5, 2.5, 2.0], None),
        ];

        for (kind, file) in [
            (ChartKind::Line, "line_chart.png"),
            (ChartKind::Regression, "regression_line_chart.png"),
            (ChartKind::Smoothed, "smooth_curve_chart.png"),
        ] {
            let dir = out_dir("filenames");
            let path = StaticChartRenderer::render_into(&options(kind, true), &records, &dir)
                .expect("render should succeed");
            assert_eq!(path, dir.join(file));
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[test]
    fn empty_record_set_still_draws_a_frame() {
        let bytes = StaticChartRenderer::render_to_png_bytes(
            &options(ChartKind::Line, false),
            &[],
            400,
            300,
        )
        .expect("empty render should succeed");
        assert!(bytes.starts_with(&PNG_MAGIC));
    }

    #[test]
    fn png_bytes_have_png_header() {
        let records = vec![record(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.5], Some("s"))];
        let bytes = StaticChartRenderer::render_to_png_bytes(
            &options(ChartKind::Regression, true),
            &records,
            400,
            300,
        )
        .unwrap();
        assert!(bytes.starts_with(&PNG_MAGIC));
    }

    #[test]
    fn flat_series_does_not_break_axis_ranges() {
        let records = vec![record(&[1.0, 1.0, 1.0], &[2.0, 2.0, 2.0], None)];
        StaticChartRenderer::render_to_png_bytes(
            &options(ChartKind::Line, false),
            &records,
            400,
            300,
        )
        .expect("degenerate ranges should be widened");
    }

    #[test]
    fn duplicate_x_fails_smoothed_render_without_writing() {
        let dir = out_dir("dup_x");
        let _ = std::fs::remove_file(dir.join("smooth_curve_chart.png"));
        let records = vec![record(
            &[1.0, 2.0, 2.0, 3.0],
            &[1.0, 2.0, 3.0, 4.0],
            Some("dup"),
        )];

        let err = StaticChartRenderer::render_into(
            &options(ChartKind::Smoothed, false),
            &records,
            &dir,
        )
        .unwrap_err();
        assert!(err.to_string().contains("dup"));
        assert!(!dir.join("smooth_curve_chart.png").exists());
    }

    #[test]
    fn unsorted_input_is_sorted_before_smoothing() {
        let records = vec![record(
            &[4.0, 1.0, 3.0, 2.0],
            &[8.0, 1.0, 6.0, 3.0],
            Some("shuffled"),
        )];
        StaticChartRenderer::render_to_png_bytes(
            &options(ChartKind::Smoothed, true),
            &records,
            400,
            300,
        )
        .expect("sorting should make the knots valid");
    }
}
