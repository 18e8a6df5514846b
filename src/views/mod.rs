/// View functions: pure `(dataset, controls) → artifact` computations.
///
/// ```text
///   PenguinDataset ──┐
///                    ├──► render(view) ──► ViewArtifact ──► ui
///   ControlState ────┘
/// ```
///
/// Each view states the controls it reads in [`ViewId::dependencies`]; the
/// reactive graph uses that list, never the function body, to decide what
/// to recompute.

pub mod histogram;
pub mod scatter;
pub mod table;

use thiserror::Error;

use crate::controls::{ControlId, ControlState};
use crate::data::model::PenguinDataset;

use histogram::{BinnedHistogram, CategoryHistogram};
use scatter::ScatterPlot;
use table::TableSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViewId {
    Table,
    Grid,
    SpeciesHistogram,
    MassHistogram,
    Scatter,
}

impl ViewId {
    pub const ALL: [ViewId; 5] = [
        ViewId::Table,
        ViewId::Grid,
        ViewId::SpeciesHistogram,
        ViewId::MassHistogram,
        ViewId::Scatter,
    ];

    /// Controls this view reads.
    pub fn dependencies(self) -> &'static [ControlId] {
        match self {
            ViewId::MassHistogram => &[ControlId::SeabornBinCount],
            ViewId::Table | ViewId::Grid | ViewId::SpeciesHistogram | ViewId::Scatter => &[],
        }
    }

    /// Card heading.
    pub fn title(self) -> &'static str {
        match self {
            ViewId::Table => "Palmer Penguins Data Table",
            ViewId::Grid => "Palmer Penguins Data Grid",
            ViewId::SpeciesHistogram => "Species Histogram",
            ViewId::MassHistogram => "Seaborn Histogram",
            ViewId::Scatter => "Plotly Scatterplot: Species",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewArtifact {
    Table(TableSnapshot),
    Grid(TableSnapshot),
    CategoryHistogram(CategoryHistogram),
    DistributionHistogram(BinnedHistogram),
    Scatter(ScatterPlot),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewError {
    #[error("bin count must be at least 1, got {0}")]
    InvalidBinCount(i64),
    #[error("no values to plot for {0}")]
    Empty(&'static str),
}

pub type ViewOutput = Result<ViewArtifact, ViewError>;

/// Run one view function against the current state.
pub fn render(view: ViewId, dataset: &PenguinDataset, controls: &ControlState) -> ViewOutput {
    let artifact = match view {
        ViewId::Table => ViewArtifact::Table(TableSnapshot::paginated(dataset)),
        ViewId::Grid => ViewArtifact::Grid(TableSnapshot::grid(dataset)),
        ViewId::SpeciesHistogram => {
            ViewArtifact::CategoryHistogram(CategoryHistogram::species_counts(dataset))
        }
        ViewId::MassHistogram => ViewArtifact::DistributionHistogram(
            BinnedHistogram::body_mass(dataset, controls.seaborn_bin_count)?,
        ),
        ViewId::Scatter => ViewArtifact::Scatter(ScatterPlot::mass_vs_depth(dataset)),
    };
    Ok(artifact)
}
