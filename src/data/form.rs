//! Form Model Module
//! The in-memory form tree: datasets owning point-entry rows.
//!
//! Rows carry generated IDs so deletion is always "remove by ID from
//! the owner's collection"; children hold no reference to their parent.

use egui::Color32;

/// Stable identifier for a dataset or point row. Never reused within
/// one form's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

/// One (x, y) entry row. Fields stay raw text until render time.
#[derive(Debug, Clone)]
pub struct PointEntry {
    pub id: EntryId,
    pub x: String,
    pub y: String,
}

/// A named, optionally colored group of point entries.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub id: EntryId,
    pub label: String,
    /// None until the user picks a color; the renderer then applies
    /// its per-chart-kind default.
    pub color: Option<Color32>,
    pub points: Vec<PointEntry>,
}

impl Dataset {
    /// Remove a point row by ID. A stale ID is a silent no-op.
    pub fn remove_point(&mut self, id: EntryId) {
        self.points.retain(|p| p.id != id);
    }
}

/// The whole form tree: ordered datasets plus the ID counter.
#[derive(Debug, Clone, Default)]
pub struct ChartForm {
    pub datasets: Vec<Dataset>,
    next_id: u64,
}

impl ChartForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> EntryId {
        self.next_id += 1;
        EntryId(self.next_id)
    }

    /// Append a dataset prefilled with a cosmetic "Dataset N" label.
    pub fn add_dataset(&mut self) -> EntryId {
        let id = self.alloc_id();
        let label = format!("Dataset {}", self.datasets.len() + 1);
        self.datasets.push(Dataset {
            id,
            label,
            color: None,
            points: Vec::new(),
        });
        id
    }

    /// Remove a dataset and all its points. A stale ID is a silent no-op.
    pub fn remove_dataset(&mut self, id: EntryId) {
        self.datasets.retain(|d| d.id != id);
    }

    /// Append a blank point row to the given dataset.
    pub fn add_point(&mut self, dataset: EntryId) -> Option<EntryId> {
        let id = self.alloc_id();
        let ds = self.dataset_mut(dataset)?;
        ds.points.push(PointEntry {
            id,
            x: String::new(),
            y: String::new(),
        });
        Some(id)
    }

    /// Remove one point row from the given dataset.
    pub fn remove_point(&mut self, dataset: EntryId, point: EntryId) {
        if let Some(ds) = self.dataset_mut(dataset) {
            ds.remove_point(point);
        }
    }

    pub fn dataset_mut(&mut self, id: EntryId) -> Option<&mut Dataset> {
        self.datasets.iter_mut().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_labels_count_up() {
        let mut form = ChartForm::new();
        form.add_dataset();
        form.add_dataset();
        assert_eq!(form.datasets[0].label, "Dataset 1");
        assert_eq!(form.datasets[1].label, "Dataset 2");
    }

    #[test]
    fn ids_are_unique_across_kinds() {
        let mut form = ChartForm::new();
        let d1 = form.add_dataset();
        let p1 = form.add_point(d1).unwrap();
        let d2 = form.add_dataset();
        assert_ne!(d1, p1);
        assert_ne!(p1, d2);
    }

    #[test]
    fn removing_a_point_shrinks_by_one() {
        let mut form = ChartForm::new();
        let ds = form.add_dataset();
        let p1 = form.add_point(ds).unwrap();
        let p2 = form.add_point(ds).unwrap();

        form.remove_point(ds, p1);
        let points = &form.datasets[0].points;
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, p2);

        // Stale ID: no-op.
        form.remove_point(ds, p1);
        assert_eq!(form.datasets[0].points.len(), 1);
    }

    #[test]
    fn removing_a_dataset_drops_its_points() {
        let mut form = ChartForm::new();
        let d1 = form.add_dataset();
        form.add_point(d1);
        form.add_point(d1);
        let d2 = form.add_dataset();

        form.remove_dataset(d1);
        assert_eq!(form.datasets.len(), 1);
        assert_eq!(form.datasets[0].id, d2);
    }

    #[test]
    fn add_point_to_missing_dataset_returns_none() {
        let mut form = ChartForm::new();
        let d = form.add_dataset();
        form.remove_dataset(d);
        assert!(form.add_point(d).is_none());
    }
}
