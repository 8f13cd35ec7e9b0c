//! Record Collection Module
//! Turns the form tree into render-ready records, reporting one issue
//! per dataset that cannot be drawn.

use crate::charts::{ChartKind, SeriesRecord};
use crate::data::{ChartForm, Dataset};
use std::fmt;
use thiserror::Error;

/// Smallest dataset a natural cubic spline of degree 3 can smooth.
pub const MIN_SPLINE_POINTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// Why a dataset was excluded from the render. The Display text is
/// shown verbatim in the per-dataset error dialog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetIssue {
    #[error("Dataset '{label}' is incomplete. Add data points before drawing the chart.")]
    IncompleteDataset { label: String },
    #[error("Dataset '{label}', point {position}: {axis} value '{text}' is not a number.")]
    NonNumericCoordinate {
        label: String,
        position: usize,
        axis: Axis,
        text: String,
    },
    #[error(
        "Dataset '{label}' has {have} complete points; a smooth curve needs at least {MIN_SPLINE_POINTS}."
    )]
    TooFewPointsForSpline { label: String, have: usize },
}

/// Collect one record per drawable dataset, plus the issues for every
/// dataset left out. Rendering proceeds with whatever survives.
pub fn collect_records(form: &ChartForm, kind: ChartKind) -> (Vec<SeriesRecord>, Vec<DatasetIssue>) {
    let mut records = Vec::new();
    let mut issues = Vec::new();

    for dataset in &form.datasets {
        match resolve_dataset(dataset, kind, &mut issues) {
            Some(record) => records.push(record),
            None => log::warn!(
                "dataset '{}' excluded from {} render",
                dataset.label,
                kind.display_name()
            ),
        }
    }

    (records, issues)
}

fn resolve_dataset(
    dataset: &Dataset,
    kind: ChartKind,
    issues: &mut Vec<DatasetIssue>,
) -> Option<SeriesRecord> {
    let label = dataset.label.trim().to_string();
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut parse_failed = false;

    for (i, point) in dataset.points.iter().enumerate() {
        let (x_text, y_text) = (point.x.trim(), point.y.trim());
        // A point counts only when both fields are filled in; partial
        // rows are skipped without complaint.
        if x_text.is_empty() || y_text.is_empty() {
            continue;
        }

        let x = parse_coordinate(x_text);
        let y = parse_coordinate(y_text);
        for (axis, value, text) in [(Axis::X, x, x_text), (Axis::Y, y, y_text)] {
            if value.is_none() {
                issues.push(DatasetIssue::NonNumericCoordinate {
                    label: label.clone(),
                    position: i + 1,
                    axis,
                    text: text.to_string(),
                });
                parse_failed = true;
            }
        }

        if let (Some(x), Some(y)) = (x, y) {
            xs.push(x);
            ys.push(y);
        }
    }

    if parse_failed {
        return None;
    }
    if xs.is_empty() {
        issues.push(DatasetIssue::IncompleteDataset { label });
        return None;
    }
    if kind == ChartKind::Smoothed && xs.len() < MIN_SPLINE_POINTS {
        issues.push(DatasetIssue::TooFewPointsForSpline {
            label,
            have: xs.len(),
        });
        return None;
    }

    Some(SeriesRecord {
        xs,
        ys,
        label: (!label.is_empty()).then_some(label),
        color: dataset.color.map(|c| (c.r(), c.g(), c.b())),
    })
}

/// Parse one coordinate field. Non-finite values ("NaN", "inf") have
/// no place on a chart and are treated as non-numeric.
fn parse_coordinate(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(datasets: Vec<(&str, Vec<(&str, &str)>)>) -> ChartForm {
        let mut form = ChartForm::new();
        for (label, points) in datasets {
            let id = form.add_dataset();
            form.dataset_mut(id).unwrap().label = label.to_string();
            for (x, y) in points {
                form.add_point(id).unwrap();
                let point = form.dataset_mut(id).unwrap().points.last_mut().unwrap();
                point.x = x.to_string();
                point.y = y.to_string();
            }
        }
        form
    }

    #[test]
    fn complete_dataset_yields_a_record() {
        let form = form_with(vec![("a", vec![("1", "2"), ("3", "4.5")])]);
        let (records, issues) = collect_records(&form, ChartKind::Line);

        assert!(issues.is_empty());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].xs, vec![1.0, 3.0]);
        assert_eq!(records[0].ys, vec![2.0, 4.5]);
        assert_eq!(records[0].label.as_deref(), Some("a"));
        assert_eq!(records[0].color, None);
    }

    #[test]
    fn partially_filled_points_are_skipped_silently() {
        let form = form_with(vec![("a", vec![("1", ""), ("", "2"), ("3", "4")])]);
        let (records, issues) = collect_records(&form, ChartKind::Line);

        assert!(issues.is_empty());
        assert_eq!(records[0].xs, vec![3.0]);
    }

    #[test]
    fn empty_dataset_reports_exactly_one_issue() {
        let form = form_with(vec![("empty", vec![("", ""), ("5", "")]), ("ok", vec![("1", "1")])]);
        let (records, issues) = collect_records(&form, ChartKind::Line);

        assert_eq!(records.len(), 1);
        assert_eq!(
            issues,
            vec![DatasetIssue::IncompleteDataset {
                label: "empty".to_string()
            }]
        );
    }

    #[test]
    fn non_numeric_field_excludes_the_dataset() {
        let form = form_with(vec![("bad", vec![("1", "two"), ("3", "4")])]);
        let (records, issues) = collect_records(&form, ChartKind::Line);

        assert!(records.is_empty());
        assert_eq!(
            issues,
            vec![DatasetIssue::NonNumericCoordinate {
                label: "bad".to_string(),
                position: 1,
                axis: Axis::Y,
                text: "two".to_string(),
            }]
        );
    }

    #[test]
    fn non_finite_values_count_as_non_numeric() {
        let form = form_with(vec![("inf", vec![("1", "inf")])]);
        let (records, issues) = collect_records(&form, ChartKind::Line);

        assert!(records.is_empty());
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn smoothed_kind_requires_four_points() {
        let form = form_with(vec![("short", vec![("1", "1"), ("2", "2"), ("3", "3")])]);

        let (records, issues) = collect_records(&form, ChartKind::Smoothed);
        assert!(records.is_empty());
        assert_eq!(
            issues,
            vec![DatasetIssue::TooFewPointsForSpline {
                label: "short".to_string(),
                have: 3,
            }]
        );

        // The same dataset is fine for the other kinds.
        let (records, issues) = collect_records(&form, ChartKind::Regression);
        assert_eq!(records.len(), 1);
        assert!(issues.is_empty());
    }

    #[test]
    fn blank_label_becomes_none() {
        let form = form_with(vec![("   ", vec![("1", "2")])]);
        let (records, _) = collect_records(&form, ChartKind::Line);
        assert_eq!(records[0].label, None);
    }
}
