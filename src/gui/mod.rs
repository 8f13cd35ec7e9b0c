//! GUI module - User interface components

mod app;
mod dataset_editor;
mod options_panel;

pub use app::PlotPadApp;
pub use dataset_editor::DatasetEditor;
pub use options_panel::{OptionsPanel, OptionsPanelAction};
