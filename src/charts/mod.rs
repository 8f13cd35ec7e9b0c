//! Charts module - Chart rendering

mod plotter;
mod record;
mod renderer;

pub use plotter::ChartPreview;
pub use record::{ChartKind, ChartOptions, SeriesRecord};
pub use renderer::StaticChartRenderer;
