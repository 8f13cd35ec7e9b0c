//! Data module - Form state and record collection

mod collect;
mod form;

pub use collect::{collect_records, Axis, DatasetIssue, MIN_SPLINE_POINTS};
pub use form::{ChartForm, Dataset, EntryId, PointEntry};
