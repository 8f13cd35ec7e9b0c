//! Chart Record Module
//! Render-ready series data and the chart-kind/option vocabulary.

/// The three chart styles the form can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Regression,
    Smoothed,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Regression, ChartKind::Smoothed];

    /// Name shown in the chart-kind selector.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line chart",
            ChartKind::Regression => "Regression line chart",
            ChartKind::Smoothed => "Smooth curve chart",
        }
    }

    /// Fixed output filename, overwritten on every render of this kind.
    pub fn output_file(&self) -> &'static str {
        match self {
            ChartKind::Line => "line_chart.png",
            ChartKind::Regression => "regression_line_chart.png",
            ChartKind::Smoothed => "smooth_curve_chart.png",
        }
    }

    /// Series color used for datasets without a chosen color.
    pub fn default_color(&self) -> (u8, u8, u8) {
        match self {
            ChartKind::Line => (0, 0, 255),
            ChartKind::Regression => (255, 0, 0),
            ChartKind::Smoothed => (0, 128, 0),
        }
    }
}

/// Global options read from the form at render time.
#[derive(Debug, Clone, Default)]
pub struct ChartOptions {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    pub show_data_labels: bool,
}

/// The resolved, render-ready form of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRecord {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    /// None when the label field was left blank.
    pub label: Option<String>,
    pub color: Option<(u8, u8, u8)>,
}

impl SeriesRecord {
    /// Pairs of (x, y) in entry order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }
}
