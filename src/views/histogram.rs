use crate::data::model::{Attribute, PenguinDataset, Species};

use super::ViewError;

/// Species in the order they first appear in the dataset, which is the
/// category order both histograms use.
pub fn appearance_order(dataset: &PenguinDataset) -> Vec<Species> {
    let mut order = Vec::with_capacity(dataset.species_present.len());
    for r in dataset.records() {
        if !order.contains(&r.species) {
            order.push(r.species);
        }
    }
    order
}

// ---------------------------------------------------------------------------
// Count by species
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryHistogram {
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// One bar per species present.
    pub bars: Vec<(Species, usize)>,
}

impl CategoryHistogram {
    pub fn species_counts(dataset: &PenguinDataset) -> Self {
        let bars = appearance_order(dataset)
            .into_iter()
            .map(|s| {
                let n = dataset.records().iter().filter(|r| r.species == s).count();
                (s, n)
            })
            .collect();
        CategoryHistogram {
            x_label: "species",
            y_label: "count",
            bars,
        }
    }

    pub fn total(&self) -> usize {
        self.bars.iter().map(|(_, n)| n).sum()
    }
}

// ---------------------------------------------------------------------------
// Binned distribution, layered by species
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramLayer {
    pub species: Species,
    /// One count per bin.
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinnedHistogram {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub attribute: Attribute,
    /// `bins + 1` ascending edges; the last bin is closed on the right.
    pub edges: Vec<f64>,
    pub layers: Vec<HistogramLayer>,
}

impl BinnedHistogram {
    /// Body mass split into `bins` equal-width bins over the full dataset.
    pub fn body_mass(dataset: &PenguinDataset, bins: i64) -> Result<Self, ViewError> {
        let mut hist = Self::layered(dataset, Attribute::BodyMass, bins)?;
        hist.title = "Palmer Penguins";
        hist.x_label = "Mass";
        hist.y_label = "Count";
        Ok(hist)
    }

    pub fn layered(
        dataset: &PenguinDataset,
        attribute: Attribute,
        bins: i64,
    ) -> Result<Self, ViewError> {
        if bins < 1 {
            return Err(ViewError::InvalidBinCount(bins));
        }
        let bins = bins as usize;

        let values: Vec<(Species, f64)> = dataset
            .records()
            .iter()
            .filter_map(|r| attribute.value(r).map(|v| (r.species, v)))
            .filter(|(_, v)| v.is_finite())
            .collect();
        if values.is_empty() {
            return Err(ViewError::Empty(attribute.column()));
        }

        let edges = bin_edges(values.iter().map(|(_, v)| *v), bins);
        let mut layers: Vec<HistogramLayer> = appearance_order(dataset)
            .into_iter()
            .map(|species| HistogramLayer {
                species,
                counts: vec![0; bins],
            })
            .collect();

        for (species, v) in values {
            let idx = bin_index(&edges, v);
            if let Some(layer) = layers.iter_mut().find(|l| l.species == species) {
                layer.counts[idx] += 1;
            }
        }

        Ok(BinnedHistogram {
            title: "",
            x_label: attribute.column(),
            y_label: "count",
            attribute,
            edges,
            layers,
        })
    }

    pub fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Total number of records represented across every layer.
    pub fn total(&self) -> usize {
        self.layers.iter().flat_map(|l| &l.counts).sum()
    }
}

/// Equal-width edges over `[min, max]` of the finite values; a degenerate
/// range is widened by 0.5 on each side.
fn bin_edges(values: impl Iterator<Item = f64>, bins: usize) -> Vec<f64> {
    let (mut lo, mut hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
    edges.push(hi);
    edges
}

fn bin_index(edges: &[f64], v: f64) -> usize {
    let bins = edges.len() - 1;
    let width = (edges[bins] - edges[0]) / bins as f64;
    let idx = ((v - edges[0]) / width).floor() as usize;
    idx.min(bins - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{palmer_like, record};

    fn prepared() -> PenguinDataset {
        PenguinDataset::prepare(palmer_like())
    }

    #[test]
    fn one_bar_per_species_present() {
        let ds = prepared();
        let h = CategoryHistogram::species_counts(&ds);
        assert_eq!(h.bars.len(), ds.species_present.len());
        assert_eq!(h.total(), ds.len());
        assert_eq!(
            h.bars,
            vec![
                (Species::Adelie, 151),
                (Species::Gentoo, 123),
                (Species::Chinstrap, 68)
            ]
        );
    }

    #[test]
    fn missing_species_gets_no_bar() {
        let ds = PenguinDataset::prepare(vec![
            record(Species::Gentoo, Some(5000.0)),
            record(Species::Gentoo, Some(5100.0)),
        ]);
        let h = CategoryHistogram::species_counts(&ds);
        assert_eq!(h.bars, vec![(Species::Gentoo, 2)]);
    }

    #[test]
    fn changing_bins_preserves_total() {
        let ds = prepared();
        let fifty = BinnedHistogram::body_mass(&ds, 50).unwrap();
        let ten = BinnedHistogram::body_mass(&ds, 10).unwrap();
        assert_eq!(fifty.bin_count(), 50);
        assert_eq!(ten.bin_count(), 10);
        assert_eq!(fifty.total(), ds.len());
        assert_eq!(ten.total(), ds.len());
        assert_eq!(ten.layers.len(), 3);
        assert_eq!(ten.title, "Palmer Penguins");
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let ds = PenguinDataset::prepare(vec![
            record(Species::Adelie, Some(3000.0)),
            record(Species::Adelie, Some(3500.0)),
            record(Species::Gentoo, Some(4000.0)),
        ]);
        let h = BinnedHistogram::body_mass(&ds, 2).unwrap();
        assert_eq!(h.edges, vec![3000.0, 3500.0, 4000.0]);
        assert_eq!(h.layers[0].counts, vec![1, 1]);
        assert_eq!(h.layers[1].counts, vec![0, 1]);
    }

    #[test]
    fn single_value_widens_range() {
        let ds = PenguinDataset::prepare(vec![record(Species::Adelie, Some(3800.0))]);
        let h = BinnedHistogram::body_mass(&ds, 4).unwrap();
        assert_eq!(h.edges.first(), Some(&3799.5));
        assert_eq!(h.edges.last(), Some(&3800.5));
        assert_eq!(h.total(), 1);
        assert_eq!(h.bin_width(), 0.25);
    }

    #[test]
    fn infinite_values_are_left_out_of_the_bins() {
        let ds = PenguinDataset::prepare(vec![
            record(Species::Adelie, Some(3000.0)),
            record(Species::Adelie, Some(f64::INFINITY)),
            record(Species::Gentoo, Some(3600.0)),
        ]);
        let h = BinnedHistogram::body_mass(&ds, 3).unwrap();
        assert_eq!(h.edges.first(), Some(&3000.0));
        assert_eq!(h.edges.last(), Some(&3600.0));
        assert!(h.edges.iter().all(|e| e.is_finite()));
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn only_infinite_values_is_an_error() {
        let ds = PenguinDataset::prepare(vec![record(Species::Adelie, Some(f64::NEG_INFINITY))]);
        assert_eq!(
            BinnedHistogram::body_mass(&ds, 3),
            Err(ViewError::Empty("body_mass_g"))
        );
    }

    #[test]
    fn edges_ignore_non_finite_inputs() {
        let edges = bin_edges([1.0, f64::INFINITY, 3.0, f64::NAN].into_iter(), 2);
        assert_eq!(edges, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn zero_bins_is_an_error() {
        let ds = prepared();
        assert_eq!(
            BinnedHistogram::body_mass(&ds, 0),
            Err(ViewError::InvalidBinCount(0))
        );
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let ds = PenguinDataset::prepare(Vec::new());
        assert_eq!(
            BinnedHistogram::body_mass(&ds, 10),
            Err(ViewError::Empty("body_mass_g"))
        );
    }

    #[test]
    fn layered_skips_missing_values_of_other_attributes() {
        let mut a = record(Species::Adelie, Some(3000.0));
        a.flipper_length_mm = None;
        let ds = PenguinDataset::prepare(vec![a, record(Species::Adelie, Some(3100.0))]);
        let h = BinnedHistogram::layered(&ds, Attribute::FlipperLength, 3).unwrap();
        assert_eq!(h.total(), 1);
        assert_eq!(h.x_label, "flipper_length_mm");
    }
}
