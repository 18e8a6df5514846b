use crate::data::model::{Attribute, PenguinDataset, Species};

use super::histogram::appearance_order;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub species: Species,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub title: &'static str,
    pub x: Attribute,
    pub y: Attribute,
    pub series: Vec<ScatterSeries>,
    /// Records left out because x or y was missing.
    pub skipped: usize,
}

/// Axis label for an attribute; bill length and body mass get readable
/// names, the others keep their column name.
pub fn axis_label(attr: Attribute) -> &'static str {
    match attr {
        Attribute::BillLength => "Bill Length (mm)",
        Attribute::BodyMass => "Body Mass (g)",
        other => other.column(),
    }
}

impl ScatterPlot {
    pub fn mass_vs_depth(dataset: &PenguinDataset) -> Self {
        let mut plot = Self::by_species(dataset, Attribute::BodyMass, Attribute::BillDepth);
        plot.title = "Plotly Scatter Plot";
        plot
    }

    pub fn by_species(dataset: &PenguinDataset, x: Attribute, y: Attribute) -> Self {
        let mut series: Vec<ScatterSeries> = appearance_order(dataset)
            .into_iter()
            .map(|species| ScatterSeries {
                species,
                points: Vec::new(),
            })
            .collect();
        let mut skipped = 0;

        for r in dataset.records() {
            let (Some(px), Some(py)) = (x.value(r), y.value(r)) else {
                skipped += 1;
                continue;
            };
            if let Some(s) = series.iter_mut().find(|s| s.species == r.species) {
                s.points.push([px, py]);
            }
        }

        ScatterPlot {
            title: "",
            x,
            y,
            series,
            skipped,
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}
